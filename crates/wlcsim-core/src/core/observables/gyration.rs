use crate::core::error::{SimulationError, require_positive};
use crate::core::utils::geometry::centroid;
use nalgebra::Point3;

/// Below this contour-to-persistence ratio the closed form loses precision to cancellation and
/// its Taylor expansion is used instead.
const SERIES_CROSSOVER: f64 = 1e-2;

/// Root-mean-square distance of the points from their centroid.
pub fn radius_of_gyration(points: &[Point3<f64>]) -> Result<f64, SimulationError> {
    if points.len() < 2 {
        return Err(SimulationError::InsufficientPoints {
            found: points.len(),
        });
    }
    let center = centroid(points).ok_or(SimulationError::InsufficientPoints { found: 0 })?;
    let mean_square = points
        .iter()
        .map(|p| (p - center).norm_squared())
        .sum::<f64>()
        / points.len() as f64;
    Ok(mean_square.sqrt())
}

/// Kratky-Porod expectation of the radius of gyration, `sqrt(<Rg^2>)`, for a wormlike chain.
///
/// `linear_density` converts the chain length `path_length` (e.g. base pairs) into the contour
/// length `Lc = path_length / linear_density`, which shares its unit with `persistence_length`:
///
/// `<Rg^2> = Lp Lc / 3 - Lp^2 + 2 Lp^3 / Lc - 2 Lp^4 / Lc^2 (1 - exp(-Lc / Lp))`
pub fn theoretical_radius_of_gyration(
    linear_density: f64,
    persistence_length: f64,
    path_length: f64,
) -> Result<f64, SimulationError> {
    require_positive("linear_density", linear_density)?;
    require_positive("persistence_length", persistence_length)?;
    require_positive("path_length", path_length)?;

    let contour_length = path_length / linear_density;
    let x = contour_length / persistence_length;

    let reduced = if x < SERIES_CROSSOVER {
        reduced_mean_square_series(x)
    } else {
        reduced_mean_square(x)
    };

    Ok(persistence_length * reduced.max(0.0).sqrt())
}

/// `<Rg^2> / Lp^2` as a function of `x = Lc / Lp`.
#[inline]
fn reduced_mean_square(x: f64) -> f64 {
    x / 3.0 - 1.0 + 2.0 / x + 2.0 * (-x).exp_m1() / (x * x)
}

#[inline]
fn reduced_mean_square_series(x: f64) -> f64 {
    x * x / 12.0 - x.powi(3) / 60.0 + x.powi(4) / 360.0 - x.powi(5) / 2520.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_points_two_apart_have_unit_radius_of_gyration() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        assert_eq!(radius_of_gyration(&points).unwrap(), 1.0);
    }

    #[test]
    fn radius_of_gyration_is_translation_invariant() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(-1.0, 0.5, 3.0),
        ];
        let shifted: Vec<_> = points
            .iter()
            .map(|p| p + nalgebra::Vector3::new(10.0, -4.0, 7.0))
            .collect();
        let a = radius_of_gyration(&points).unwrap();
        let b = radius_of_gyration(&shifted).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn radius_of_gyration_of_square_corners() {
        let points = [
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
        ];
        assert!((radius_of_gyration(&points).unwrap() - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn fewer_than_two_points_is_an_error() {
        assert_eq!(
            radius_of_gyration(&[Point3::origin()]),
            Err(SimulationError::InsufficientPoints { found: 1 })
        );
        assert_eq!(
            radius_of_gyration(&[]),
            Err(SimulationError::InsufficientPoints { found: 0 })
        );
    }

    #[test]
    fn theoretical_value_approaches_rigid_rod_limit() {
        // Lc = 1, Lp = 100: <Rg^2> -> Lc^2 / 12.
        let rg = theoretical_radius_of_gyration(1.0, 100.0, 1.0).unwrap();
        let rod = (1.0f64 / 12.0).sqrt();
        assert!((rg - rod).abs() / rod < 1e-2);
    }

    #[test]
    fn theoretical_value_approaches_flexible_coil_limit() {
        // Lc = 10_000, Lp = 1: <Rg^2> -> Lp Lc / 3.
        let rg = theoretical_radius_of_gyration(1.0, 1.0, 10_000.0).unwrap();
        let coil = (10_000.0f64 / 3.0).sqrt();
        assert!((rg - coil).abs() / coil < 1e-3);
    }

    #[test]
    fn series_and_closed_form_agree_at_crossover() {
        let series = reduced_mean_square_series(SERIES_CROSSOVER);
        let closed = reduced_mean_square(SERIES_CROSSOVER);
        assert!((series - closed).abs() / closed < 1e-6);
    }

    #[test]
    fn linear_density_rescales_contour_length() {
        let a = theoretical_radius_of_gyration(2.0, 50.0, 1000.0).unwrap();
        let b = theoretical_radius_of_gyration(1.0, 50.0, 500.0).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn theoretical_value_rejects_non_positive_inputs() {
        assert!(theoretical_radius_of_gyration(0.0, 1.0, 1.0).is_err());
        assert!(theoretical_radius_of_gyration(1.0, -1.0, 1.0).is_err());
        assert!(theoretical_radius_of_gyration(1.0, 1.0, 0.0).is_err());
    }
}
