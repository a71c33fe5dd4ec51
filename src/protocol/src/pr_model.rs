// pr_model: rope snapshot for inspection tooling

use serde::{Deserialize, Serialize};

use crate::V3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrParticle {
	pub pos: [f32; 3],
	pub fixed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrConstraint {
	pub id: usize,
	pub particles: Vec<usize>,
	pub rest_length: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrModel {
	pub label: String,
	pub color: [f32; 4],
	pub particles: Vec<PrParticle>,
	pub constraints: Vec<PrConstraint>,
}

impl PrModel {
	// sum of current segment lengths
	pub fn length(&self) -> f32 {
		self.particles
			.windows(2)
			.map(|w| (V3::from(w[1].pos) - V3::from(w[0].pos)).magnitude())
			.sum()
	}
}
