use crate::core::models::results::{SweepRecord, TrialFailure};
use crate::engine::config::{SweepCell, SweepConfig};
use crate::engine::error::EnsembleError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::sink::ResultSink;
use crate::engine::statistics::{CellReport, SweepSummary};
use crate::engine::streams::{partition, resolve_seed, resolve_workers, worker_stream};
use crate::engine::trial::ChainSimulationUnit;
use rand::Rng;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs a parameter sweep: every cell of the sweep grid simulates `num_paths` chains and emits
/// one record per chain.
///
/// The seed and stream count are fixed at construction, so two collectors built from the same
/// configuration produce identical record streams.
#[derive(Debug, Clone)]
pub struct EnsembleCollector {
    config: SweepConfig,
    cells: Vec<SweepCell>,
    seed: u64,
    workers: usize,
}

impl EnsembleCollector {
    /// Validates every cell of the sweep before any chain is grown.
    pub fn new(config: SweepConfig) -> Result<Self, EnsembleError> {
        config.validate()?;
        let seed = resolve_seed(config.seed);
        let workers = resolve_workers(config.workers);
        let cells = config.cells();
        Ok(Self {
            config,
            cells,
            seed,
            workers,
        })
    }

    #[inline]
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    #[inline]
    pub fn cells(&self) -> &[SweepCell] {
        &self.cells
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn run<S>(
        &self,
        sink: &mut S,
        reporter: &ProgressReporter,
    ) -> Result<SweepSummary, EnsembleError>
    where
        S: ResultSink + ?Sized,
    {
        self.run_with_interrupt(sink, reporter, &AtomicBool::new(false))
    }

    /// Like [`run`](Self::run), but stops before the next cell once `interrupt` is set. Records
    /// of completed cells stay in the sink.
    #[instrument(skip_all, name = "ensemble_sweep", fields(seed = self.seed, workers = self.workers))]
    pub fn run_with_interrupt<S>(
        &self,
        sink: &mut S,
        reporter: &ProgressReporter,
        interrupt: &AtomicBool,
    ) -> Result<SweepSummary, EnsembleError>
    where
        S: ResultSink + ?Sized,
    {
        reporter.report(Progress::SweepStart {
            total_cells: self.cells.len() as u64,
        });
        info!(
            cells = self.cells.len(),
            chains_per_cell = self.config.num_paths,
            self_avoiding = self.config.is_self_avoiding(),
            "Starting ensemble sweep."
        );

        let mut reports = Vec::with_capacity(self.cells.len());
        let mut interrupted = false;

        for cell in &self.cells {
            if interrupt.load(Ordering::Relaxed) {
                warn!(
                    completed = reports.len(),
                    remaining = self.cells.len() - reports.len(),
                    "Sweep interrupted; skipping remaining cells."
                );
                reporter.report(Progress::Message(format!(
                    "Interrupted after {} of {} cells",
                    reports.len(),
                    self.cells.len()
                )));
                interrupted = true;
                break;
            }

            reporter.report(Progress::CellStart {
                index: cell.index,
                linear_density: cell.linear_density,
                persistence_length: cell.persistence_length,
                link_diameter: cell.link_diameter,
                localization_precision: cell.localization_precision,
            });

            let records = self.run_cell(cell, reporter)?;
            let mut report = CellReport::new(*cell, &self.config.path_lengths)?;
            for record in records {
                report.record(&record);
                sink.append(record)?;
            }
            sink.flush()?;

            if report.is_failed() {
                warn!(
                    cell = cell.index,
                    failures = report.failures,
                    linear_density = cell.linear_density,
                    persistence_length = cell.persistence_length,
                    link_diameter = cell.link_diameter,
                    "Cell flagged: some chains could not be generated."
                );
            } else {
                debug!(cell = cell.index, mean_rg = report.rg.mean(), "Cell complete.");
            }

            reporter.report(Progress::CellFinish {
                index: cell.index,
                failures: report.failures,
            });
            reports.push(report);
        }

        reporter.report(Progress::SweepFinish);

        let summary = SweepSummary {
            seed: self.seed,
            workers: self.workers,
            cells: reports,
            interrupted,
        };
        info!(
            records = summary.total_records(),
            failures = summary.total_failures(),
            interrupted,
            "Ensemble sweep finished."
        );
        Ok(summary)
    }

    /// Simulates every chain of one cell and returns the records in trial order.
    #[instrument(skip_all, name = "sweep_cell", fields(cell = cell.index))]
    pub fn run_cell(
        &self,
        cell: &SweepCell,
        reporter: &ProgressReporter,
    ) -> Result<Vec<SweepRecord>, EnsembleError> {
        let unit = ChainSimulationUnit::new(
            &cell.chain_configuration(&self.config),
            self.config.self_avoidance,
        )?;
        let chunks = partition(self.config.num_paths, self.workers);

        reporter.report(Progress::TaskStart {
            total_steps: self.config.num_paths as u64,
        });

        #[cfg(not(feature = "parallel"))]
        let iterator = chunks.iter();

        #[cfg(feature = "parallel")]
        let iterator = chunks.par_iter();

        let per_chunk: Vec<Vec<SweepRecord>> = iterator
            .map(|(worker, trials)| self.run_chunk(&unit, cell, *worker, trials.clone(), reporter))
            .collect();

        reporter.report(Progress::TaskFinish);

        Ok(per_chunk.into_iter().flatten().collect())
    }

    fn run_chunk(
        &self,
        unit: &ChainSimulationUnit,
        cell: &SweepCell,
        worker: usize,
        trials: Range<usize>,
        reporter: &ProgressReporter,
    ) -> Vec<SweepRecord> {
        let mut rng = worker_stream(self.seed, cell.index, self.workers, worker);
        trials
            .map(|trial| {
                let record = self.run_trial(unit, cell.index, trial, &mut rng);
                reporter.report(Progress::TaskIncrement);
                record
            })
            .collect()
    }

    fn run_trial(
        &self,
        unit: &ChainSimulationUnit,
        cell: usize,
        trial: usize,
        rng: &mut impl Rng,
    ) -> SweepRecord {
        match unit.run(trial, rng) {
            Ok(mut result) => {
                if !self.config.full_parameter_spec {
                    result.parameters = None;
                }
                SweepRecord::Success {
                    cell,
                    trial,
                    result,
                }
            }
            Err(error) => {
                debug!(cell, trial, %error, "Chain generation failed.");
                SweepRecord::Failure(TrialFailure {
                    cell,
                    trial,
                    path_length: unit.config().path_length(trial).unwrap_or(f64::NAN),
                    error,
                })
            }
        }
    }
}
