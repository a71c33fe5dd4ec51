use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RopeError;
use crate::V3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
	Pbd,
	Xpbd,
}

impl Algorithm {
	pub fn label(&self, iterations: usize) -> String {
		match self {
			Self::Pbd => format!("PBD\niteration:{}", iterations),
			Self::Xpbd => format!("XPBD\niteration: {}", iterations),
		}
	}

	// rgba used by inspection tooling
	pub fn color(&self) -> [f32; 4] {
		match self {
			Self::Pbd => [0., 1., 0., 1.],
			Self::Xpbd => [0., 0., 1., 1.],
		}
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Pbd => write!(f, "PBD"),
			Self::Xpbd => write!(f, "XPBD"),
		}
	}
}

impl FromStr for Algorithm {
	type Err = RopeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"pbd" => Ok(Self::Pbd),
			"xpbd" => Ok(Self::Xpbd),
			_ => Err(RopeError::InvalidArgument(format!(
				"unknown algorithm: {}",
				s
			))),
		}
	}
}

/// Standard environment gravity.
pub fn default_gravity() -> V3 {
	V3::new(0., -9.81, 0.)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PbdParameter {
	/// Overall stiffness, clamped to [0, 1] when applied.
	pub stiffness: f32,
	pub iterations: usize,
	pub gravity: V3,
	pub perturb_degenerate: bool,
}

impl Default for PbdParameter {
	fn default() -> Self {
		Self {
			stiffness: 1.0,
			iterations: 10,
			gravity: default_gravity(),
			perturb_degenerate: false,
		}
	}
}

impl PbdParameter {
	pub fn with_stiffness(mut self, stiffness: f32) -> Self {
		self.stiffness = stiffness;
		self
	}

	pub fn with_iterations(mut self, iterations: usize) -> Self {
		self.iterations = iterations;
		self
	}

	pub fn with_gravity(mut self, gravity: V3) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn with_perturb_degenerate(mut self, on: bool) -> Self {
		self.perturb_degenerate = on;
		self
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XpbdParameter {
	/// Compliance of every distance constraint, 0 is rigid.
	pub flexibility: f32,
	pub iterations: usize,
	pub gravity: V3,
	pub perturb_degenerate: bool,
}

impl Default for XpbdParameter {
	fn default() -> Self {
		Self {
			flexibility: 0.001,
			iterations: 10,
			gravity: default_gravity(),
			perturb_degenerate: false,
		}
	}
}

impl XpbdParameter {
	pub fn with_flexibility(mut self, flexibility: f32) -> Self {
		self.flexibility = flexibility;
		self
	}

	pub fn with_iterations(mut self, iterations: usize) -> Self {
		self.iterations = iterations;
		self
	}

	pub fn with_gravity(mut self, gravity: V3) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn with_perturb_degenerate(mut self, on: bool) -> Self {
		self.perturb_degenerate = on;
		self
	}
}

/// Parameter block tagged by the algorithm it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SimulationParameter {
	Pbd(PbdParameter),
	Xpbd(XpbdParameter),
}

impl Default for SimulationParameter {
	fn default() -> Self {
		Self::Pbd(PbdParameter::default())
	}
}

impl SimulationParameter {
	pub fn default_for(algorithm: Algorithm) -> Self {
		match algorithm {
			Algorithm::Pbd => Self::Pbd(PbdParameter::default()),
			Algorithm::Xpbd => Self::Xpbd(XpbdParameter::default()),
		}
	}

	pub fn algorithm(&self) -> Algorithm {
		match self {
			Self::Pbd(_) => Algorithm::Pbd,
			Self::Xpbd(_) => Algorithm::Xpbd,
		}
	}

	pub fn iterations(&self) -> usize {
		match self {
			Self::Pbd(p) => p.iterations,
			Self::Xpbd(p) => p.iterations,
		}
	}
}

impl From<PbdParameter> for SimulationParameter {
	fn from(p: PbdParameter) -> Self {
		Self::Pbd(p)
	}
}

impl From<XpbdParameter> for SimulationParameter {
	fn from(p: XpbdParameter) -> Self {
		Self::Xpbd(p)
	}
}
