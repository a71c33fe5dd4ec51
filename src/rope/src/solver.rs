use protocol::pr_model::PrModel;
use protocol::provider::ParticleProvider;
use tracing::{debug, warn};

use crate::config::{Algorithm, SimulationParameter};
use crate::error::RopeResult;
use crate::simulator::{self, Simulator};

/// Owns one rope and, once initialized, the simulator bound to it.
///
/// Algorithm and parameters are chosen before `initialize`; afterwards
/// they are frozen and change requests are ignored with a warning.
#[derive(Clone)]
pub struct RopeSolver<P> {
	pub play_on_awake: bool,
	parameter: SimulationParameter,
	rope: P,
	simulator: Option<Box<dyn Simulator>>,
}

impl<P: ParticleProvider> RopeSolver<P> {
	pub fn new(rope: P) -> Self {
		Self {
			play_on_awake: true,
			parameter: SimulationParameter::default(),
			rope,
			simulator: None,
		}
	}

	/// `tag` is an algorithm name, e.g. "pbd" or "xpbd".
	pub fn from_tag(rope: P, tag: &str) -> RopeResult<Self> {
		let algorithm: Algorithm = tag.parse()?;
		Ok(Self::new(rope).with_parameter(SimulationParameter::default_for(algorithm)))
	}

	pub fn with_parameter(mut self, parameter: impl Into<SimulationParameter>) -> Self {
		self.parameter = parameter.into();
		self
	}

	pub fn with_play_on_awake(mut self, play_on_awake: bool) -> Self {
		self.play_on_awake = play_on_awake;
		self
	}

	pub fn algorithm(&self) -> Algorithm {
		self.parameter.algorithm()
	}

	pub fn parameter(&self) -> &SimulationParameter {
		&self.parameter
	}

	pub fn is_initialized(&self) -> bool {
		self.simulator.is_some()
	}

	/// Switching resets the parameter block to the new algorithm's defaults.
	pub fn set_algorithm(&mut self, algorithm: Algorithm) {
		if self.is_initialized() {
			warn!(
				current = %self.algorithm(),
				requested = %algorithm,
				"algorithm is fixed after initialization, ignored"
			);
			return;
		}
		if algorithm != self.algorithm() {
			self.parameter = SimulationParameter::default_for(algorithm);
		}
	}

	pub fn set_parameter(&mut self, parameter: impl Into<SimulationParameter>) {
		if self.is_initialized() {
			warn!(
				current = %self.algorithm(),
				"parameters are fixed after initialization, ignored"
			);
			return;
		}
		self.parameter = parameter.into();
	}

	pub fn initialize(&mut self) -> RopeResult<()> {
		if self.is_initialized() {
			return Ok(());
		}
		let simulator = simulator::build(&self.parameter, &self.rope)?;
		debug!(algorithm = %self.algorithm(), "rope solver initialized");
		self.simulator = Some(simulator);
		Ok(())
	}

	/// No-op until initialized.
	pub fn step(&mut self, dt: f32) {
		if let Some(simulator) = self.simulator.as_mut() {
			simulator.step(&mut self.rope, dt);
		}
	}

	pub fn awake(&mut self) -> RopeResult<()> {
		if self.play_on_awake {
			self.initialize()?;
		}
		Ok(())
	}

	pub fn fixed_update(&mut self, dt: f32) {
		if self.play_on_awake {
			self.step(dt);
		}
	}

	pub fn simulator(&self) -> Option<&dyn Simulator> {
		self.simulator.as_deref()
	}

	pub fn rope(&self) -> &P {
		&self.rope
	}

	pub fn rope_mut(&mut self) -> &mut P {
		&mut self.rope
	}

	pub fn into_rope(self) -> P {
		self.rope
	}

	pub fn pr_model(&self) -> Option<PrModel> {
		self.simulator.as_ref().map(|s| s.render())
	}
}
