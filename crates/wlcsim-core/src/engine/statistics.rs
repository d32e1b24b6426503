use crate::core::error::SimulationError;
use crate::core::models::results::SweepRecord;
use crate::core::observables::gyration::theoretical_radius_of_gyration;
use crate::engine::config::SweepCell;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Running mean and variance of a stream of samples (Welford's update). NaN samples are
/// ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Accumulator {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consume(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Equivalent to consuming every sample `other` has seen.
    pub fn merge(&mut self, other: &Accumulator) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let total = self.count + other.count;
        let delta = other.mean - self.mean;
        let weight = other.count as f64 / total as f64;
        self.mean += delta * weight;
        self.m2 += other.m2 + delta * delta * self.count as f64 * weight;
        self.count = total;
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Zero until a sample has been consumed.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance; NaN without samples.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Standard error of the mean.
    pub fn uncertainty(&self) -> f64 {
        (self.variance() / self.count as f64).sqrt()
    }

    /// `sqrt(<x^2>)` over the consumed samples.
    pub fn root_mean_square(&self) -> f64 {
        (self.variance() + self.mean * self.mean).sqrt()
    }
}

/// Aggregate view of one sweep cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellReport {
    pub cell: SweepCell,
    pub successes: usize,
    pub failures: usize,
    pub rg: Accumulator,
    pub rg_bump: Accumulator,
    /// Kratky-Porod expectation per distinct path length, in first-seen order.
    pub theoretical: Vec<(f64, f64)>,
}

impl CellReport {
    pub fn new(cell: SweepCell, path_lengths: &[f64]) -> Result<Self, SimulationError> {
        let theoretical = path_lengths
            .iter()
            .copied()
            .unique_by(|length| length.to_bits())
            .map(|length| {
                theoretical_radius_of_gyration(
                    cell.linear_density,
                    cell.persistence_length,
                    length,
                )
                .map(|rg| (length, rg))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            cell,
            successes: 0,
            failures: 0,
            rg: Accumulator::new(),
            rg_bump: Accumulator::new(),
            theoretical,
        })
    }

    pub fn record(&mut self, record: &SweepRecord) {
        match record.result() {
            Some(result) => {
                self.successes += 1;
                self.rg.consume(result.rg);
                self.rg_bump.consume(result.rg_bump);
            }
            None => self.failures += 1,
        }
    }

    /// A cell is flagged as soon as one of its trials failed.
    #[inline]
    pub fn is_failed(&self) -> bool {
        self.failures > 0
    }

    pub fn theoretical_rg(&self, path_length: f64) -> Option<f64> {
        self.theoretical
            .iter()
            .find(|(length, _)| *length == path_length)
            .map(|(_, rg)| *rg)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepSummary {
    /// The seed the sweep actually ran with.
    pub seed: u64,
    pub workers: usize,
    pub cells: Vec<CellReport>,
    /// Set when the sweep stopped before its last cell.
    pub interrupted: bool,
}

impl SweepSummary {
    pub fn total_records(&self) -> usize {
        self.cells.iter().map(|c| c.successes + c.failures).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.cells.iter().map(|c| c.failures).sum()
    }

    pub fn failed_cells(&self) -> impl Iterator<Item = &CellReport> {
        self.cells.iter().filter(|c| c.is_failed())
    }
}
