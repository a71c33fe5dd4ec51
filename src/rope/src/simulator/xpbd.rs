use protocol::provider::ParticleProvider;
use tracing::debug;

use super::perturb::Perturber;
use super::Simulator;
use crate::config::{Algorithm, XpbdParameter};
use crate::particle::{pair_mut, sync_fixed, write_back, Particle};
use crate::V3;

/// Distance constraint between chain neighbours `p1` and `p1 + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct XpbdConstraint {
	pub p1: usize,
	pub l0: f32,
	pub lambda: f32,
	pub compliance: f32,
}

impl XpbdConstraint {
	pub fn new(p1: usize, particles: &[Particle]) -> Self {
		Self {
			p1,
			l0: (particles[p1 + 1].pos - particles[p1].pos).magnitude(),
			lambda: 0.0,
			compliance: 0.0,
		}
	}

	pub fn pre_iteration(&mut self, compliance: f32) {
		self.lambda = 0.0;
		self.compliance = compliance;
	}

	fn dlambda(&self, dp: V3, l: f32, imass: f32, dt: f32) -> f32 {
		let c = l - self.l0;
		let compliance_t = self.compliance / (dt * dt);
		let grad = dp / l;
		// grad is unit length, so grad . (imass * grad) == imass
		(c - compliance_t * self.lambda)
			/ (grad.dot(&(imass * grad)) + compliance_t)
	}

	fn step(&mut self, particles: &mut [Particle], perturber: &mut Perturber, dt: f32) {
		let (p1, p2) = pair_mut(particles, self.p1);
		let dp = p2.pred - p1.pred;
		let l = dp.magnitude();
		if perturber.check(l, &mut p1.pred, &mut p2.pred) {
			return;
		}
		let dlambda = self.dlambda(dp, l, p1.imass + p2.imass, dt);
		let correct = dp / l * dlambda;
		self.lambda += dlambda;

		p1.pred += p1.imass * correct;
		p2.pred -= p2.imass * correct;
	}
}

#[derive(Clone)]
pub struct XpbdSimulator {
	parameter: XpbdParameter,
	particles: Vec<Particle>,
	constraints: Vec<XpbdConstraint>,
	perturber: Perturber,
}

impl XpbdSimulator {
	pub fn new(parameter: XpbdParameter, rope: &dyn ParticleProvider) -> Self {
		let particles = Particle::collect(rope);
		let constraints = (0..particles.len().saturating_sub(1))
			.map(|idx| XpbdConstraint::new(idx, &particles))
			.collect::<Vec<_>>();
		debug!(
			particles = particles.len(),
			constraints = constraints.len(),
			flexibility = parameter.flexibility,
			iterations = parameter.iterations,
			"xpbd simulator built"
		);
		let perturber = Perturber::new(parameter.perturb_degenerate);
		Self {
			parameter,
			particles,
			constraints,
			perturber,
		}
	}

	pub fn parameter(&self) -> &XpbdParameter {
		&self.parameter
	}

	pub fn constraints(&self) -> &[XpbdConstraint] {
		&self.constraints
	}

	fn simulate(&mut self, dt: f32) {
		// external force is folded into the velocity update below
		for p in self.particles.iter_mut() {
			p.pred = p.pos + p.vel * dt;
		}

		for constraint in self.constraints.iter_mut() {
			constraint.pre_iteration(self.parameter.flexibility);
		}

		for _ in 0..self.parameter.iterations {
			self.solve_constraints(dt);
		}

		let gravity = self.parameter.gravity;
		for p in self.particles.iter_mut().filter(|p| !p.fixed) {
			p.vel = (p.pred - p.pos) / dt + gravity * dt;
			p.pos = p.pred;
		}
	}

	// sequential, each constraint sees the previous correction
	fn solve_constraints(&mut self, dt: f32) {
		for constraint in self.constraints.iter_mut() {
			constraint.step(&mut self.particles, &mut self.perturber, dt);
		}
	}
}

impl Simulator for XpbdSimulator {
	fn step(&mut self, rope: &mut dyn ParticleProvider, dt: f32) {
		sync_fixed(&mut self.particles, rope);
		self.simulate(dt);
		write_back(&self.particles, rope);
	}

	fn algorithm(&self) -> Algorithm {
		Algorithm::Xpbd
	}

	fn iterations(&self) -> usize {
		self.parameter.iterations
	}

	fn particles(&self) -> &[Particle] {
		&self.particles
	}

	fn rest_lengths(&self) -> Vec<f32> {
		self.constraints.iter().map(|c| c.l0).collect()
	}
}
