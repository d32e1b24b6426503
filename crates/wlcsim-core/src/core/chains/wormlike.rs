use crate::core::models::conformation::ChainConformation;
use crate::core::models::parameters::ChainGeometry;
use crate::core::utils::{geometry, sampling};
use nalgebra::{Unit, Vector3};
use rand::Rng;

/// Standard deviation of the turning angle between consecutive segments.
///
/// For `a ~ N(0, s^2)`, `E[cos a] = exp(-s^2 / 2)`; `s^2 = 2 / Lp` gives `exp(-1 / Lp)`.
#[inline]
pub(super) fn turning_angle_scale(persistence_segments: f64) -> f64 {
    (2.0 / persistence_segments).sqrt()
}

/// Rotates `current` by a Gaussian angle about a uniformly oriented axis perpendicular to it.
pub(super) fn next_direction(
    current: &Unit<Vector3<f64>>,
    angle_scale: f64,
    rng: &mut impl Rng,
) -> Unit<Vector3<f64>> {
    let angle = angle_scale * sampling::standard_normal(rng);
    let axis = loop {
        let reference = sampling::unit_sphere_point(rng);
        if let Some(axis) = geometry::perpendicular_axis(current, &reference) {
            break axis;
        }
    };
    geometry::rotate_about_axis(current, &axis, angle)
}

pub(super) fn initial_direction() -> Unit<Vector3<f64>> {
    Vector3::z_axis()
}

pub(super) fn generate(geometry: &ChainGeometry, rng: &mut impl Rng) -> ChainConformation {
    let angle_scale = turning_angle_scale(geometry.persistence_segments);
    let mut points = Vec::with_capacity(geometry.segments + 1);
    points.push(geometry.initial_point);

    let mut direction = initial_direction();
    let mut position = geometry.initial_point;
    for segment in 0..geometry.segments {
        if segment > 0 {
            direction = next_direction(&direction, angle_scale, rng);
        }
        position += direction.into_inner() * geometry.segment_length;
        points.push(position);
    }

    ChainConformation::from_grown(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn geometry(segments: usize, persistence_segments: f64) -> ChainGeometry {
        ChainGeometry::new(segments, 1.5, persistence_segments, Point3::new(-1.0, 0.5, 2.0))
            .unwrap()
    }

    #[test]
    fn conformation_has_segment_count_plus_one_points() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for segments in [1, 2, 17, 300] {
            let chain = generate(&geometry(segments, 10.0), &mut rng);
            assert_eq!(chain.len(), segments + 1);
        }
    }

    #[test]
    fn first_point_equals_initial_point_exactly() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let chain = generate(&geometry(40, 3.0), &mut rng);
        assert_eq!(*chain.initial_point(), Point3::new(-1.0, 0.5, 2.0));
    }

    #[test]
    fn first_segment_follows_the_polar_axis() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let chain = generate(&geometry(5, 3.0), &mut rng);
        let first = chain.points()[1] - chain.points()[0];
        assert!((first - Vector3::new(0.0, 0.0, 1.5)).norm() < 1e-12);
    }

    #[test]
    fn every_segment_has_the_configured_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let chain = generate(&geometry(200, 2.0), &mut rng);
        for pair in chain.points().windows(2) {
            assert!(((pair[1] - pair[0]).norm() - 1.5).abs() < 1e-9);
        }
    }

    #[test]
    fn mean_bond_cosine_converges_to_exponential_decay() {
        let persistence_segments = 5.0;
        let geometry = geometry(100, persistence_segments);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let mut sum = 0.0;
        let mut count = 0usize;
        for _ in 0..100 {
            let chain = generate(&geometry, &mut rng);
            let directions: Vec<_> = chain.bond_directions().collect();
            for pair in directions.windows(2) {
                sum += pair[0].dot(&pair[1]);
                count += 1;
            }
        }

        let empirical = sum / count as f64;
        let expected = (-1.0 / persistence_segments).exp();
        assert!(
            (empirical - expected).abs() < 0.01,
            "empirical {} vs expected {}",
            empirical,
            expected
        );
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let g = geometry(64, 8.0);
        let a = generate(&g, &mut ChaCha8Rng::seed_from_u64(9));
        let b = generate(&g, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
