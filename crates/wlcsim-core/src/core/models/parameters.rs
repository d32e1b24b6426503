use crate::core::error::{SimulationError, require_non_negative, require_positive};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// The physical parameter tuple a result originates from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainParameters {
    pub linear_density: f64,
    pub persistence_length: f64,
    pub path_length: f64,
    pub localization_precision: f64,
    /// Zero for the plain wormlike chain.
    pub link_diameter: f64,
}

/// Everything a generator needs to grow one chain, in simulation units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainGeometry {
    pub segments: usize,
    pub segment_length: f64,
    /// Persistence length measured in segments.
    pub persistence_segments: f64,
    pub initial_point: Point3<f64>,
}

impl ChainGeometry {
    pub fn new(
        segments: usize,
        segment_length: f64,
        persistence_segments: f64,
        initial_point: Point3<f64>,
    ) -> Result<Self, SimulationError> {
        if segments == 0 {
            return Err(SimulationError::invalid(
                "segments",
                "a chain needs at least one segment",
            ));
        }
        require_positive("segment_length", segment_length)?;
        require_positive("persistence_segments", persistence_segments)?;
        if !initial_point.coords.iter().all(|c| c.is_finite()) {
            return Err(SimulationError::invalid(
                "initial_point",
                "coordinates must be finite",
            ));
        }
        Ok(Self {
            segments,
            segment_length,
            persistence_segments,
            initial_point,
        })
    }

    /// Expected cosine between consecutive segment directions.
    pub fn expected_bond_cosine(&self) -> f64 {
        (-1.0 / self.persistence_segments).exp()
    }
}

/// Immutable description of one batch of chains sharing the same physical parameters.
///
/// Path lengths are given in physical chain units (e.g. base pairs). The linear density converts
/// chain units into length units, and the segment conversion factor gives the number of chain
/// units folded into one simulation segment:
///
/// - segments per chain: `round(path_length / segment_conversion)`
/// - segment length: `segment_conversion / linear_density`
/// - contour length: `path_length / linear_density`
#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfiguration {
    pub num_paths: usize,
    pub path_lengths: Vec<f64>,
    pub linear_density: f64,
    pub segment_conversion: f64,
    /// Zero disables self-avoidance.
    pub link_diameter: f64,
    pub localization_precision: f64,
    pub persistence_length: f64,
    pub initial_point: Point3<f64>,
}

impl ChainConfiguration {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.num_paths == 0 {
            return Err(SimulationError::invalid(
                "num_paths",
                "at least one chain must be simulated",
            ));
        }
        if self.path_lengths.len() != self.num_paths {
            return Err(SimulationError::invalid(
                "path_lengths",
                format!(
                    "expected {} path lengths (one per chain), got {}",
                    self.num_paths,
                    self.path_lengths.len()
                ),
            ));
        }
        require_positive("linear_density", self.linear_density)?;
        require_positive("segment_conversion", self.segment_conversion)?;
        require_positive("persistence_length", self.persistence_length)?;
        require_non_negative("link_diameter", self.link_diameter)?;
        require_non_negative("localization_precision", self.localization_precision)?;

        let segment_length = self.segment_length();
        if self.link_diameter > segment_length {
            return Err(SimulationError::invalid(
                "link_diameter",
                format!(
                    "{} exceeds the segment length {}; bonded neighbours would overlap",
                    self.link_diameter, segment_length
                ),
            ));
        }

        for &length in &self.path_lengths {
            require_positive("path_lengths", length)?;
            self.segments_for(length)?;
        }

        if !self.initial_point.coords.iter().all(|c| c.is_finite()) {
            return Err(SimulationError::invalid(
                "initial_point",
                "coordinates must be finite",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn segment_length(&self) -> f64 {
        self.segment_conversion / self.linear_density
    }

    #[inline]
    pub fn persistence_segments(&self) -> f64 {
        self.persistence_length / self.segment_length()
    }

    pub fn segments_for(&self, path_length: f64) -> Result<usize, SimulationError> {
        let segments = (path_length / self.segment_conversion).round();
        if !segments.is_finite() || segments < 1.0 {
            return Err(SimulationError::invalid(
                "path_lengths",
                format!(
                    "path length {} is shorter than one segment ({} chain units)",
                    path_length, self.segment_conversion
                ),
            ));
        }
        Ok(segments as usize)
    }

    pub fn path_length(&self, trial: usize) -> Result<f64, SimulationError> {
        self.path_lengths.get(trial).copied().ok_or_else(|| {
            SimulationError::invalid(
                "trial",
                format!(
                    "chain index {} is out of range for {} chains",
                    trial,
                    self.path_lengths.len()
                ),
            )
        })
    }

    pub fn geometry(&self, trial: usize) -> Result<ChainGeometry, SimulationError> {
        let path_length = self.path_length(trial)?;
        ChainGeometry::new(
            self.segments_for(path_length)?,
            self.segment_length(),
            self.persistence_segments(),
            self.initial_point,
        )
    }

    pub fn parameters(&self, trial: usize) -> Result<ChainParameters, SimulationError> {
        Ok(ChainParameters {
            linear_density: self.linear_density,
            persistence_length: self.persistence_length,
            path_length: self.path_length(trial)?,
            localization_precision: self.localization_precision,
            link_diameter: self.link_diameter,
        })
    }
}
