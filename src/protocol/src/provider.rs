// provider: host side of a rope, the only state a simulator reads and writes

use serde::{Deserialize, Serialize};

use crate::V3;

/// Ordered point entities of one rope. Index 0 is the anchor.
pub trait ParticleProvider {
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn mass(&self, id: usize) -> f32;

	fn get_pos(&self, id: usize) -> V3;

	fn set_pos(&mut self, id: usize, pos: V3);
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleObject {
	pub mass: f32,
	pub pos: V3,
}

impl ParticleObject {
	pub fn new(mass: f32, pos: V3) -> Self {
		Self { mass, pos }
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RopeObject {
	particles: Vec<ParticleObject>,
}

impl RopeObject {
	pub fn new(particles: Vec<ParticleObject>) -> Self {
		Self { particles }
	}

	pub fn from_positions(positions: &[V3], mass: f32) -> Self {
		Self::new(
			positions
				.iter()
				.map(|&pos| ParticleObject::new(mass, pos))
				.collect(),
		)
	}

	// count particles starting at `start`, each `step` further along
	pub fn new_line(start: V3, step: V3, count: usize, mass: f32) -> Self {
		let particles = (0..count)
			.map(|idx| ParticleObject::new(mass, start + step * idx as f32))
			.collect();
		Self { particles }
	}

	pub fn push(&mut self, particle: ParticleObject) {
		self.particles.push(particle);
	}

	pub fn particles(&self) -> &[ParticleObject] {
		&self.particles
	}

	pub fn positions(&self) -> Vec<V3> {
		self.particles.iter().map(|p| p.pos).collect()
	}
}

impl ParticleProvider for RopeObject {
	fn len(&self) -> usize {
		self.particles.len()
	}

	fn mass(&self, id: usize) -> f32 {
		self.particles[id].mass
	}

	fn get_pos(&self, id: usize) -> V3 {
		self.particles[id].pos
	}

	fn set_pos(&mut self, id: usize, pos: V3) {
		self.particles[id].pos = pos;
	}
}
