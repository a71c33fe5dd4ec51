pub mod config;
pub mod error;
pub mod particle;
pub mod simulator;
pub mod solver;

pub use protocol::V3;
pub use protocol::pr_model::PrModel;
pub use protocol::provider::{ParticleObject, ParticleProvider, RopeObject};

pub use config::{Algorithm, PbdParameter, SimulationParameter, XpbdParameter};
pub use error::{RopeError, RopeResult};
pub use simulator::Simulator;
pub use solver::RopeSolver;
