use crate::core::error::SimulationError;
use nalgebra::Vector3;
use rand::distributions::Standard;
use rand::prelude::*;
use rand_distr::{StandardNormal, Uniform};
use std::f64::consts::TAU;
use tracing::instrument;

/// Draws one point uniformly distributed on the surface of the unit sphere.
///
/// The polar coordinate is sampled through `u = cos(theta)` rather than the angle itself, which
/// absorbs the `sin(theta)` area element. Sampling both angles uniformly would crowd the poles.
#[inline]
pub fn unit_sphere_point(rng: &mut impl Rng) -> Vector3<f64> {
    let u: f64 = rng.sample(Uniform::new_inclusive(-1.0, 1.0));
    let azimuth: f64 = rng.sample(Uniform::new(0.0, TAU));
    let rho = (1.0 - u * u).max(0.0).sqrt();
    Vector3::new(rho * azimuth.cos(), rho * azimuth.sin(), u)
}

#[instrument(level = "trace", skip_all, fields(n = n))]
pub fn unit_sphere_points(
    n: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Vector3<f64>>, SimulationError> {
    if n == 0 {
        return Err(SimulationError::invalid(
            "n",
            "at least one sphere point must be requested",
        ));
    }
    Ok((0..n).map(|_| unit_sphere_point(rng)).collect())
}

#[inline]
pub fn standard_normal(rng: &mut impl Rng) -> f64 {
    rng.sample(StandardNormal)
}

/// One draw from `U[0, 1)`.
#[inline]
pub fn uniform01(rng: &mut impl Rng) -> f64 {
    rng.sample(Standard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    const SAMPLES: usize = 20_000;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0x5eed)
    }

    #[test]
    fn unit_sphere_points_rejects_zero_count() {
        let result = unit_sphere_points(0, &mut rng());
        assert!(matches!(
            result,
            Err(SimulationError::InvalidArgument { parameter: "n", .. })
        ));
    }

    #[test]
    fn unit_sphere_points_returns_requested_count_of_unit_vectors() {
        let points = unit_sphere_points(1_000, &mut rng()).unwrap();
        assert_eq!(points.len(), 1_000);
        for p in &points {
            assert!((p.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn unit_sphere_points_have_zero_mean_coordinates() {
        let points = unit_sphere_points(SAMPLES, &mut rng()).unwrap();
        let mean = points.iter().sum::<Vector3<f64>>() / SAMPLES as f64;
        assert!(mean.x.abs() < 0.03, "mean x = {}", mean.x);
        assert!(mean.y.abs() < 0.03, "mean y = {}", mean.y);
        assert!(mean.z.abs() < 0.03, "mean z = {}", mean.z);
    }

    #[test]
    fn unit_sphere_z_coordinate_passes_kolmogorov_smirnov_against_uniform() {
        let mut z: Vec<f64> = unit_sphere_points(SAMPLES, &mut rng())
            .unwrap()
            .iter()
            .map(|p| p.z)
            .collect();
        z.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let n = z.len() as f64;
        let statistic = z
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let cdf = (value + 1.0) / 2.0;
                let upper = (i as f64 + 1.0) / n - cdf;
                let lower = cdf - i as f64 / n;
                upper.max(lower)
            })
            .fold(0.0, f64::max);

        // Critical value at the 0.1% significance level.
        let critical = 1.95 / n.sqrt();
        assert!(statistic < critical, "KS statistic {} >= {}", statistic, critical);
    }

    #[test]
    fn standard_normal_has_zero_mean_and_unit_variance() {
        let mut rng = rng();
        let draws: Vec<f64> = (0..SAMPLES).map(|_| standard_normal(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / SAMPLES as f64;
        let variance = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / SAMPLES as f64;
        assert!(mean.abs() < 0.03);
        assert!((variance - 1.0).abs() < 0.05);
    }

    #[test]
    fn uniform01_stays_in_half_open_unit_interval() {
        let mut rng = rng();
        let draws: Vec<f64> = (0..SAMPLES).map(|_| uniform01(&mut rng)).collect();
        assert!(draws.iter().all(|&x| (0.0..1.0).contains(&x)));
        let mean = draws.iter().sum::<f64>() / SAMPLES as f64;
        assert!((mean - 0.5).abs() < 0.01);
    }

    #[test]
    fn same_seed_reproduces_the_same_points() {
        let a = unit_sphere_points(16, &mut rng()).unwrap();
        let b = unit_sphere_points(16, &mut rng()).unwrap();
        assert_eq!(a, b);
    }
}
