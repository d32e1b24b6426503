use crate::core::chains::SelfAvoidanceLimits;
use crate::core::error::{SimulationError, require_non_negative, require_positive};
use crate::core::models::parameters::ChainConfiguration;
use itertools::iproduct;
use nalgebra::Point3;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Parameters of a full sweep. Every combination of linear density, persistence length, link
/// diameter and localization precision forms one cell of `num_paths` chains.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub num_paths: usize,
    pub path_lengths: Vec<f64>,
    pub linear_densities: Vec<f64>,
    pub persistence_lengths: Vec<f64>,
    pub localization_precisions: Vec<f64>,
    pub segment_conversion: f64,
    /// A zero entry sweeps the plain wormlike chain.
    pub link_diameters: Vec<f64>,
    pub initial_point: Point3<f64>,
    /// Attach the originating parameter tuple to every emitted record.
    pub full_parameter_spec: bool,
    pub self_avoidance: SelfAvoidanceLimits,
    /// Run-level seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Number of independent random streams per cell. `None` uses the worker pool size.
    pub workers: Option<usize>,
}

/// One point of the sweep grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepCell {
    pub index: usize,
    pub linear_density: f64,
    pub persistence_length: f64,
    pub link_diameter: f64,
    pub localization_precision: f64,
}

impl SweepCell {
    pub fn chain_configuration(&self, config: &SweepConfig) -> ChainConfiguration {
        ChainConfiguration {
            num_paths: config.num_paths,
            path_lengths: config.path_lengths.clone(),
            linear_density: self.linear_density,
            segment_conversion: config.segment_conversion,
            link_diameter: self.link_diameter,
            localization_precision: self.localization_precision,
            persistence_length: self.persistence_length,
            initial_point: config.initial_point,
        }
    }
}

impl SweepConfig {
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::new()
    }

    /// Cells in sweep order: linear density outermost, then persistence length, link diameter
    /// and localization precision.
    pub fn cells(&self) -> Vec<SweepCell> {
        iproduct!(
            self.linear_densities.iter().copied(),
            self.persistence_lengths.iter().copied(),
            self.link_diameters.iter().copied(),
            self.localization_precisions.iter().copied()
        )
        .enumerate()
        .map(
            |(
                index,
                (linear_density, persistence_length, link_diameter, localization_precision),
            )| SweepCell {
                index,
                linear_density,
                persistence_length,
                link_diameter,
                localization_precision,
            },
        )
        .collect()
    }

    pub fn is_self_avoiding(&self) -> bool {
        self.link_diameters.iter().any(|&d| d > 0.0)
    }

    /// Checks every cell of the sweep; a sweep is only started when all of them are valid.
    pub fn validate(&self) -> Result<(), SimulationError> {
        for (parameter, values) in [
            ("linear_densities", &self.linear_densities),
            ("persistence_lengths", &self.persistence_lengths),
            ("link_diameters", &self.link_diameters),
            ("localization_precisions", &self.localization_precisions),
        ] {
            if values.is_empty() {
                return Err(SimulationError::invalid(parameter, "must not be empty"));
            }
        }
        for &value in &self.linear_densities {
            require_positive("linear_densities", value)?;
        }
        for &value in &self.persistence_lengths {
            require_positive("persistence_lengths", value)?;
        }
        for &value in &self.link_diameters {
            require_non_negative("link_diameters", value)?;
        }
        for &value in &self.localization_precisions {
            require_non_negative("localization_precisions", value)?;
        }
        if self.workers == Some(0) {
            return Err(SimulationError::invalid("workers", "must be at least 1"));
        }
        if self.is_self_avoiding() && self.self_avoidance.max_attempts_per_point == 0 {
            return Err(SimulationError::invalid(
                "max_attempts_per_point",
                "must be at least 1 for self-avoiding chains",
            ));
        }
        for cell in self.cells() {
            cell.chain_configuration(self).validate()?;
        }
        Ok(())
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading sweep configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.to_string_lossy())
    }

    /// `origin` names the source in error messages.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: FileSweepConfig = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        file.into_builder().build()
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileSelfAvoidance {
    max_attempts_per_point: Option<usize>,
    max_restarts: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileSweepConfig {
    num_paths: Option<usize>,
    path_lengths: Option<Vec<f64>>,
    linear_densities: Option<Vec<f64>>,
    persistence_lengths: Option<Vec<f64>>,
    localization_precisions: Option<Vec<f64>>,
    segment_conversion: Option<f64>,
    link_diameters: Option<Vec<f64>>,
    initial_point: Option<[f64; 3]>,
    full_parameter_spec: Option<bool>,
    seed: Option<u64>,
    workers: Option<usize>,
    self_avoidance: Option<FileSelfAvoidance>,
}

impl FileSweepConfig {
    fn into_builder(self) -> SweepConfigBuilder {
        let self_avoidance = self.self_avoidance.unwrap_or_default();
        SweepConfigBuilder {
            num_paths: self.num_paths,
            path_lengths: self.path_lengths,
            linear_densities: self.linear_densities,
            persistence_lengths: self.persistence_lengths,
            localization_precisions: self.localization_precisions,
            segment_conversion: self.segment_conversion,
            link_diameters: self.link_diameters,
            initial_point: self.initial_point.map(Point3::from),
            full_parameter_spec: self.full_parameter_spec,
            max_attempts_per_point: self_avoidance.max_attempts_per_point,
            max_restarts: self_avoidance.max_restarts,
            seed: self.seed,
            workers: self.workers,
        }
    }
}

#[derive(Default)]
pub struct SweepConfigBuilder {
    num_paths: Option<usize>,
    path_lengths: Option<Vec<f64>>,
    linear_densities: Option<Vec<f64>>,
    persistence_lengths: Option<Vec<f64>>,
    localization_precisions: Option<Vec<f64>>,
    segment_conversion: Option<f64>,
    link_diameters: Option<Vec<f64>>,
    initial_point: Option<Point3<f64>>,
    full_parameter_spec: Option<bool>,
    max_attempts_per_point: Option<usize>,
    max_restarts: Option<usize>,
    seed: Option<u64>,
    workers: Option<usize>,
}

impl SweepConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_paths(mut self, n: usize) -> Self {
        self.num_paths = Some(n);
        self
    }
    pub fn path_lengths(mut self, lengths: Vec<f64>) -> Self {
        self.path_lengths = Some(lengths);
        self
    }
    pub fn linear_densities(mut self, densities: Vec<f64>) -> Self {
        self.linear_densities = Some(densities);
        self
    }
    pub fn persistence_lengths(mut self, lengths: Vec<f64>) -> Self {
        self.persistence_lengths = Some(lengths);
        self
    }
    pub fn localization_precisions(mut self, precisions: Vec<f64>) -> Self {
        self.localization_precisions = Some(precisions);
        self
    }
    pub fn segment_conversion(mut self, factor: f64) -> Self {
        self.segment_conversion = Some(factor);
        self
    }
    pub fn link_diameters(mut self, diameters: Vec<f64>) -> Self {
        self.link_diameters = Some(diameters);
        self
    }
    pub fn initial_point(mut self, point: Point3<f64>) -> Self {
        self.initial_point = Some(point);
        self
    }
    pub fn full_parameter_spec(mut self, enabled: bool) -> Self {
        self.full_parameter_spec = Some(enabled);
        self
    }
    pub fn max_attempts_per_point(mut self, attempts: usize) -> Self {
        self.max_attempts_per_point = Some(attempts);
        self
    }
    pub fn max_restarts(mut self, restarts: usize) -> Self {
        self.max_restarts = Some(restarts);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn build(self) -> Result<SweepConfig, ConfigError> {
        let num_paths = self
            .num_paths
            .ok_or(ConfigError::MissingParameter("num_paths"))?;
        let path_lengths = self
            .path_lengths
            .ok_or(ConfigError::MissingParameter("path_lengths"))?;
        if path_lengths.len() != num_paths {
            return Err(ConfigError::InvalidValue {
                parameter: "path_lengths",
                reason: format!(
                    "expected {} entries (one per chain), got {}",
                    num_paths,
                    path_lengths.len()
                ),
            });
        }
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidValue {
                parameter: "workers",
                reason: "must be at least 1".to_string(),
            });
        }

        let defaults = SelfAvoidanceLimits::default();
        Ok(SweepConfig {
            num_paths,
            path_lengths,
            linear_densities: self
                .linear_densities
                .ok_or(ConfigError::MissingParameter("linear_densities"))?,
            persistence_lengths: self
                .persistence_lengths
                .ok_or(ConfigError::MissingParameter("persistence_lengths"))?,
            localization_precisions: self.localization_precisions.unwrap_or_else(|| vec![0.0]),
            segment_conversion: self.segment_conversion.unwrap_or(1.0),
            link_diameters: self.link_diameters.unwrap_or_else(|| vec![0.0]),
            initial_point: self.initial_point.unwrap_or_else(Point3::origin),
            full_parameter_spec: self.full_parameter_spec.unwrap_or(false),
            self_avoidance: SelfAvoidanceLimits {
                max_attempts_per_point: self
                    .max_attempts_per_point
                    .unwrap_or(defaults.max_attempts_per_point),
                max_restarts: self.max_restarts.unwrap_or(defaults.max_restarts),
            },
            seed: self.seed,
            workers: self.workers,
        })
    }
}
