use crate::core::error::{SimulationError, require_non_negative};
use crate::core::models::conformation::ChainConformation;
use nalgebra::{Point3, Vector3};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Simulates a finite-precision measurement of every point in `conformation`.
///
/// Each coordinate is displaced independently by a draw from `N(0, sigma^2)`. The input is left
/// untouched; `sigma == 0` returns an exact copy without consuming random numbers.
pub fn apply_localization_noise(
    conformation: &ChainConformation,
    sigma: f64,
    rng: &mut impl Rng,
) -> Result<ChainConformation, SimulationError> {
    require_non_negative("localization_precision", sigma)?;
    if sigma == 0.0 {
        return Ok(conformation.clone());
    }

    let noise = Normal::new(0.0, sigma)
        .map_err(|e| SimulationError::invalid("localization_precision", e.to_string()))?;
    let bumped: Vec<Point3<f64>> = conformation
        .points()
        .iter()
        .map(|p| {
            let offset = Vector3::new(noise.sample(rng), noise.sample(rng), noise.sample(rng));
            p + offset
        })
        .collect();

    Ok(ChainConformation::from_grown(bumped))
}
