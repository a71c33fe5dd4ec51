pub mod pbd;
mod perturb;
pub mod xpbd;

use dyn_clone::DynClone;
use protocol::pr_model::{PrConstraint, PrModel, PrParticle};
use protocol::provider::ParticleProvider;
use tracing::instrument;

use crate::config::{Algorithm, SimulationParameter};
use crate::error::{RopeError, RopeResult};
use crate::particle::Particle;

pub use pbd::PbdSimulator;
pub use xpbd::XpbdSimulator;

/// One rope integrator, bound for life to the rope it was built from.
pub trait Simulator: DynClone + Send {
	/// Sync the anchor from `rope`, integrate, project, write every
	/// position back. `dt` must be positive; nothing is checked.
	fn step(&mut self, rope: &mut dyn ParticleProvider, dt: f32);

	fn algorithm(&self) -> Algorithm;

	fn iterations(&self) -> usize;

	fn particles(&self) -> &[Particle];

	fn rest_lengths(&self) -> Vec<f32>;

	fn render(&self) -> PrModel {
		let particles = self
			.particles()
			.iter()
			.map(|p| PrParticle {
				pos: p.pos.into(),
				fixed: p.fixed,
			})
			.collect();
		let constraints = self
			.rest_lengths()
			.into_iter()
			.enumerate()
			.map(|(id, rest_length)| PrConstraint {
				id,
				particles: vec![id, id + 1],
				rest_length,
			})
			.collect();
		PrModel {
			label: self.algorithm().label(self.iterations()),
			color: self.algorithm().color(),
			particles,
			constraints,
		}
	}
}

dyn_clone::clone_trait_object!(Simulator);

#[instrument(skip(rope), fields(particles = rope.len()))]
pub fn build(
	parameter: &SimulationParameter,
	rope: &dyn ParticleProvider,
) -> RopeResult<Box<dyn Simulator>> {
	if rope.is_empty() {
		return Err(RopeError::InvalidArgument(
			"rope has no particles".to_string(),
		));
	}
	let simulator: Box<dyn Simulator> = match parameter {
		SimulationParameter::Pbd(p) => Box::new(PbdSimulator::new(p.clone(), rope)),
		SimulationParameter::Xpbd(p) => {
			Box::new(XpbdSimulator::new(p.clone(), rope))
		}
	};
	Ok(simulator)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::config::{PbdParameter, XpbdParameter};
	use crate::V3;
	use protocol::provider::RopeObject;

	#[test]
	fn test_build_empty_rope() {
		let rope = RopeObject::default();
		let result = build(&SimulationParameter::default(), &rope);
		assert!(matches!(result, Err(RopeError::InvalidArgument(_))));
	}

	#[test]
	fn test_build_matches_tag() {
		let rope = RopeObject::new_line(V3::zeros(), V3::new(1., 0., 0.), 4, 1.0);
		let pbd = build(&PbdParameter::default().into(), &rope).unwrap();
		assert_eq!(pbd.algorithm(), Algorithm::Pbd);
		assert_eq!(pbd.particles().len(), 4);
		assert_eq!(pbd.rest_lengths().len(), 3);
		let xpbd = build(
			&XpbdParameter::default().with_iterations(7).into(),
			&rope,
		)
		.unwrap();
		assert_eq!(xpbd.algorithm(), Algorithm::Xpbd);
		assert_eq!(xpbd.iterations(), 7);
		assert_eq!(xpbd.rest_lengths().len(), 3);
	}

	#[test]
	fn test_single_particle() {
		let mut rope = RopeObject::new_line(V3::zeros(), V3::zeros(), 1, 1.0);
		for param in [
			SimulationParameter::default_for(Algorithm::Pbd),
			SimulationParameter::default_for(Algorithm::Xpbd),
		] {
			let mut sim = build(&param, &rope).unwrap();
			assert!(sim.rest_lengths().is_empty());
			rope.set_pos(0, V3::new(1., 2., 3.));
			sim.step(&mut rope, 0.02);
			assert_eq!(rope.get_pos(0), V3::new(1., 2., 3.));
		}
	}

	#[test]
	fn test_render() {
		let rope = RopeObject::new_line(V3::zeros(), V3::new(0., -1., 0.), 3, 1.0);
		let sim = build(&SimulationParameter::default(), &rope).unwrap();
		let model = sim.render();
		assert_eq!(model.label, "PBD\niteration:10");
		assert_eq!(model.color, [0., 1., 0., 1.]);
		assert_eq!(model.particles.len(), 3);
		assert!(model.particles[0].fixed);
		assert_eq!(model.constraints[1].particles, vec![1, 2]);
		assert!((model.length() - 2.0).abs() < 1e-6);
	}

	#[test]
	fn test_clone_is_independent() {
		let mut rope = RopeObject::new_line(V3::zeros(), V3::new(1., 0., 0.), 3, 1.0);
		let mut sim = build(&SimulationParameter::default(), &rope).unwrap();
		let snapshot = sim.clone();
		sim.step(&mut rope, 0.02);
		assert_ne!(sim.particles()[2].pos, snapshot.particles()[2].pos);
	}
}
