use protocol::provider::ParticleProvider;

use crate::V3;

/// Per-vertex state owned by a simulator.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub fixed: bool,
	pub pos: V3,
	// working prediction, rebuilt every step
	pub pred: V3,
	pub vel: V3,
	pub imass: f32,
	pub rest_pos: V3,
}

impl Particle {
	pub fn new(id: usize, mass: f32, pos: V3) -> Self {
		Self {
			fixed: id == 0,
			pos,
			pred: pos,
			vel: V3::zeros(),
			imass: 1.0 / mass, // unchecked, mass <= 0 is not supported
			rest_pos: pos,
		}
	}

	/// Snapshot the provider into a chain, anchor first.
	pub fn collect(rope: &dyn ParticleProvider) -> Vec<Self> {
		(0..rope.len())
			.map(|id| Self::new(id, rope.mass(id), rope.get_pos(id)))
			.collect()
	}

	pub fn rest_length(&self, other: &Self) -> f32 {
		(self.rest_pos - other.rest_pos).magnitude()
	}
}

/// Copy the anchor from the provider, so external moves are honored.
pub fn sync_fixed(particles: &mut [Particle], rope: &dyn ParticleProvider) {
	for (id, p) in particles.iter_mut().enumerate() {
		if p.fixed {
			p.pos = rope.get_pos(id);
		}
	}
}

pub fn write_back(particles: &[Particle], rope: &mut dyn ParticleProvider) {
	for (id, p) in particles.iter().enumerate() {
		rope.set_pos(id, p.pos);
	}
}

/// Neighbours `idx` and `idx + 1`, both mutable.
pub fn pair_mut(
	particles: &mut [Particle],
	idx: usize,
) -> (&mut Particle, &mut Particle) {
	let (head, tail) = particles.split_at_mut(idx + 1);
	(&mut head[idx], &mut tail[0])
}

#[cfg(test)]
mod test {
	use super::*;
	use protocol::provider::RopeObject;

	#[test]
	fn test_collect() {
		let rope = RopeObject::new_line(V3::zeros(), V3::new(0., 0., 2.), 3, 4.0);
		let ps = Particle::collect(&rope);
		assert_eq!(ps.len(), 3);
		assert!(ps[0].fixed);
		assert!(ps[1..].iter().all(|p| !p.fixed));
		assert!(ps.iter().all(|p| (p.imass - 0.25).abs() < 1e-6));
		assert!(ps.iter().all(|p| p.vel == V3::zeros()));
		assert!((ps[1].rest_length(&ps[2]) - 2.0).abs() < 1e-6);
	}

	#[test]
	fn test_sync_fixed_only_touches_anchor() {
		let mut rope = RopeObject::new_line(V3::zeros(), V3::new(1., 0., 0.), 2, 1.0);
		let mut ps = Particle::collect(&rope);
		rope.set_pos(0, V3::new(0., 3., 0.));
		rope.set_pos(1, V3::new(9., 9., 9.));
		sync_fixed(&mut ps, &rope);
		assert_eq!(ps[0].pos, V3::new(0., 3., 0.));
		assert_eq!(ps[1].pos, V3::new(1., 0., 0.));
		assert_eq!(ps[0].rest_pos, V3::zeros());
	}

	#[test]
	fn test_pair_mut() {
		let rope = RopeObject::new_line(V3::zeros(), V3::new(1., 0., 0.), 3, 1.0);
		let mut ps = Particle::collect(&rope);
		let (p1, p2) = pair_mut(&mut ps, 1);
		p1.pred.y = 1.0;
		p2.pred.y = 2.0;
		assert_eq!(ps[1].pred.y, 1.0);
		assert_eq!(ps[2].pred.y, 2.0);
	}
}
