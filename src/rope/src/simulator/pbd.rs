use protocol::provider::ParticleProvider;
use tracing::debug;

use super::perturb::Perturber;
use super::Simulator;
use crate::config::{Algorithm, PbdParameter};
use crate::particle::{pair_mut, sync_fixed, write_back, Particle};

/// Per-iteration factor so that `iterations` weak projections add up to
/// the configured overall stiffness.
pub fn stiffness_factor(stiffness: f32, iterations: usize) -> f32 {
	1.0 - (1.0 - stiffness.clamp(0.0, 1.0)).powf(1.0 / iterations as f32)
}

// C(p1, p2) = |p1 - p2| - d, with d taken from the rest shape
fn constraint(v1: &Particle, v2: &Particle) -> f32 {
	(v1.pred - v2.pred).magnitude() - v1.rest_length(v2)
}

#[derive(Clone)]
pub struct PbdSimulator {
	parameter: PbdParameter,
	particles: Vec<Particle>,
	perturber: Perturber,
}

impl PbdSimulator {
	pub fn new(parameter: PbdParameter, rope: &dyn ParticleProvider) -> Self {
		let particles = Particle::collect(rope);
		debug!(
			particles = particles.len(),
			stiffness = parameter.stiffness,
			iterations = parameter.iterations,
			"pbd simulator built"
		);
		let perturber = Perturber::new(parameter.perturb_degenerate);
		Self {
			parameter,
			particles,
			perturber,
		}
	}

	pub fn parameter(&self) -> &PbdParameter {
		&self.parameter
	}

	fn simulate(&mut self, dt: f32) {
		let gravity = self.parameter.gravity;
		for p in self.particles.iter_mut().filter(|p| !p.fixed) {
			p.vel += gravity * dt;
		}

		// no damping, no collision constraints
		for p in self.particles.iter_mut() {
			p.pred = p.pos + p.vel * dt;
		}

		let k = stiffness_factor(self.parameter.stiffness, self.parameter.iterations);
		for _ in 0..self.parameter.iterations {
			self.project_constraints(k);
		}

		for p in self.particles.iter_mut().filter(|p| !p.fixed) {
			p.vel = (p.pred - p.pos) / dt;
			p.pos = p.pred;
		}
	}

	// one Gauss-Seidel sweep, anchor to tip
	fn project_constraints(&mut self, k: f32) {
		for idx in 0..self.particles.len().saturating_sub(1) {
			let (v1, v2) = pair_mut(&mut self.particles, idx);
			let dp = v1.pred - v2.pred;
			let l = dp.magnitude();
			if self.perturber.check(l, &mut v1.pred, &mut v2.pred) {
				continue;
			}
			let w1 = v1.imass;
			let w2 = v2.imass;

			let grad = dp / l;
			let c = constraint(v1, v2);
			let s = c / ((w1 + w2) * grad.dot(&grad));

			v1.pred += -s * w1 * grad * k;
			v2.pred += s * w2 * grad * k;
		}
	}
}

impl Simulator for PbdSimulator {
	fn step(&mut self, rope: &mut dyn ParticleProvider, dt: f32) {
		sync_fixed(&mut self.particles, rope);
		self.simulate(dt);
		write_back(&self.particles, rope);
	}

	fn algorithm(&self) -> Algorithm {
		Algorithm::Pbd
	}

	fn iterations(&self) -> usize {
		self.parameter.iterations
	}

	fn particles(&self) -> &[Particle] {
		&self.particles
	}

	fn rest_lengths(&self) -> Vec<f32> {
		self.particles
			.windows(2)
			.map(|w| w[0].rest_length(&w[1]))
			.collect()
	}
}
