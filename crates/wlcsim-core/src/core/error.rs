use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument {
        parameter: &'static str,
        reason: String,
    },

    #[error("Radius of gyration requires at least 2 points, got {found}")]
    InsufficientPoints { found: usize },

    #[error(
        "Self-avoiding chain stalled after placing {placed} of {segments} segments ({attempts} attempts)"
    )]
    SelfAvoidanceExhausted {
        placed: usize,
        segments: usize,
        attempts: usize,
    },
}

impl SimulationError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter,
            reason: reason.into(),
        }
    }
}

pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::invalid(
            parameter,
            format!("must be a finite positive number, got {}", value),
        ))
    }
}

pub(crate) fn require_non_negative(
    parameter: &'static str,
    value: f64,
) -> Result<(), SimulationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::invalid(
            parameter,
            format!("must be a finite non-negative number, got {}", value),
        ))
    }
}
