use thiserror::Error;

#[derive(Debug, Error)]
pub enum RopeError {
	/// Unknown algorithm tag, or a rope that cannot carry a simulator.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}

pub type RopeResult<T> = Result<T, RopeError>;
