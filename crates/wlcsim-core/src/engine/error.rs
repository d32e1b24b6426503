use thiserror::Error;

use super::config::ConfigError;
use super::sink::SinkError;
use crate::core::error::SimulationError;

#[derive(Debug, Error)]
pub enum EnsembleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid sweep: {0}")]
    InvalidArgument(#[from] SimulationError),

    #[error("Result sink failed: {source}")]
    Sink {
        #[from]
        source: SinkError,
    },
}
