use super::wormlike::{initial_direction, next_direction, turning_angle_scale};
use crate::core::error::SimulationError;
use crate::core::models::conformation::ChainConformation;
use crate::core::models::parameters::ChainGeometry;
use nalgebra::Point3;
use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfAvoidanceLimits {
    /// Candidate directions tried for a single point before the chain is declared stuck.
    pub max_attempts_per_point: usize,
    /// How many times a stuck chain is regrown from the initial point.
    pub max_restarts: usize,
}

impl Default for SelfAvoidanceLimits {
    fn default() -> Self {
        Self {
            max_attempts_per_point: 100,
            max_restarts: 10,
        }
    }
}

type CellKey = (i64, i64, i64);

/// Uniform hash grid with cells at least as wide as the exclusion distance, so every conflicting
/// point lies in the 27 cells around a candidate. Keys saturate far from the origin, which only
/// merges distant cells.
struct ExclusionGrid {
    inverse_cell_size: f64,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl ExclusionGrid {
    fn new(cell_size: f64) -> Self {
        Self {
            inverse_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
        }
    }

    fn key(&self, point: &Point3<f64>) -> CellKey {
        (
            (point.x * self.inverse_cell_size).floor() as i64,
            (point.y * self.inverse_cell_size).floor() as i64,
            (point.z * self.inverse_cell_size).floor() as i64,
        )
    }

    fn insert(&mut self, index: usize, point: &Point3<f64>) {
        let key = self.key(point);
        self.cells.entry(key).or_default().push(index);
    }

    fn clear(&mut self) {
        self.cells.clear();
    }

    /// True when no stored point except `bonded` is strictly closer than `diameter`.
    fn admits(
        &self,
        candidate: &Point3<f64>,
        points: &[Point3<f64>],
        bonded: usize,
        diameter: f64,
    ) -> bool {
        let (cx, cy, cz) = self.key(candidate);
        let diameter_sq = diameter * diameter;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = (
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    );
                    let Some(indices) = self.cells.get(&key) else {
                        continue;
                    };
                    let clash = indices.iter().any(|&i| {
                        i != bonded && (points[i] - candidate).norm_squared() < diameter_sq
                    });
                    if clash {
                        return false;
                    }
                }
            }
        }
        true
    }
}

enum Growth {
    Complete(Vec<Point3<f64>>),
    Stuck { placed: usize },
}

pub(super) fn generate(
    geometry: &ChainGeometry,
    link_diameter: f64,
    limits: &SelfAvoidanceLimits,
    rng: &mut impl Rng,
) -> Result<ChainConformation, SimulationError> {
    // Validation guarantees `link_diameter <= segment_length`; sizing cells by the bond keeps
    // keys bounded for tiny diameters.
    let mut grid = ExclusionGrid::new(geometry.segment_length);
    let mut attempts = 0usize;
    let mut best_placed = 0usize;

    for restart in 0..=limits.max_restarts {
        grid.clear();
        match grow(geometry, link_diameter, limits, &mut grid, &mut attempts, rng) {
            Growth::Complete(points) => {
                if restart > 0 {
                    trace!(restart, attempts, "Self-avoiding chain completed after restart.");
                }
                return Ok(ChainConformation::from_grown(points));
            }
            Growth::Stuck { placed } => {
                debug!(
                    restart,
                    placed,
                    segments = geometry.segments,
                    "Self-avoiding chain reached a dead end."
                );
                best_placed = best_placed.max(placed);
            }
        }
    }

    Err(SimulationError::SelfAvoidanceExhausted {
        placed: best_placed,
        segments: geometry.segments,
        attempts,
    })
}

fn grow(
    geometry: &ChainGeometry,
    link_diameter: f64,
    limits: &SelfAvoidanceLimits,
    grid: &mut ExclusionGrid,
    attempts: &mut usize,
    rng: &mut impl Rng,
) -> Growth {
    let angle_scale = turning_angle_scale(geometry.persistence_segments);
    let mut points = Vec::with_capacity(geometry.segments + 1);
    points.push(geometry.initial_point);
    grid.insert(0, &geometry.initial_point);

    let mut direction = initial_direction();
    let first = geometry.initial_point + direction.into_inner() * geometry.segment_length;
    grid.insert(1, &first);
    points.push(first);

    for placed in 1..geometry.segments {
        let previous = points[placed];
        let mut accepted = None;
        for _ in 0..limits.max_attempts_per_point {
            *attempts += 1;
            let candidate_direction = next_direction(&direction, angle_scale, rng);
            let candidate = previous + candidate_direction.into_inner() * geometry.segment_length;
            if grid.admits(&candidate, &points, placed, link_diameter) {
                accepted = Some((candidate_direction, candidate));
                break;
            }
        }

        let Some((next, point)) = accepted else {
            return Growth::Stuck { placed };
        };
        direction = next;
        grid.insert(points.len(), &point);
        points.push(point);
    }

    Growth::Complete(points)
}
