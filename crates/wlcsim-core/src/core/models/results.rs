use super::parameters::ChainParameters;
use crate::core::error::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GyrationResult {
    pub rg: f64,
    pub rg_bump: f64,
    pub parameters: Option<ChainParameters>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrialFailure {
    pub cell: usize,
    pub trial: usize,
    pub path_length: f64,
    pub error: SimulationError,
}

/// One entry in the result stream of a sweep. Failed trials are reported in place of the record
/// they would have produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepRecord {
    Success {
        cell: usize,
        trial: usize,
        result: GyrationResult,
    },
    Failure(TrialFailure),
}

impl SweepRecord {
    pub fn cell(&self) -> usize {
        match self {
            SweepRecord::Success { cell, .. } => *cell,
            SweepRecord::Failure(failure) => failure.cell,
        }
    }

    pub fn trial(&self) -> usize {
        match self {
            SweepRecord::Success { trial, .. } => *trial,
            SweepRecord::Failure(failure) => failure.trial,
        }
    }

    pub fn result(&self) -> Option<&GyrationResult> {
        match self {
            SweepRecord::Success { result, .. } => Some(result),
            SweepRecord::Failure(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SweepRecord::Failure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_work_for_both_variants() {
        let ok = SweepRecord::Success {
            cell: 1,
            trial: 4,
            result: GyrationResult {
                rg: 2.0,
                rg_bump: 2.5,
                parameters: None,
            },
        };
        let failed = SweepRecord::Failure(TrialFailure {
            cell: 3,
            trial: 0,
            path_length: 100.0,
            error: SimulationError::SelfAvoidanceExhausted {
                placed: 10,
                segments: 100,
                attempts: 1000,
            },
        });

        assert_eq!((ok.cell(), ok.trial()), (1, 4));
        assert_eq!(ok.result().map(|r| r.rg_bump), Some(2.5));
        assert!(!ok.is_failure());

        assert_eq!((failed.cell(), failed.trial()), (3, 0));
        assert!(failed.result().is_none());
        assert!(failed.is_failure());
    }
}
