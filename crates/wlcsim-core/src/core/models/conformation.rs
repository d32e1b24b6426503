use crate::core::error::SimulationError;
use nalgebra::{Point3, Unit, Vector3};

/// An ordered sequence of 3D points describing one polymer conformation.
///
/// A conformation always holds at least two points; the first one is the initial point the
/// chain was grown from.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainConformation {
    points: Vec<Point3<f64>>,
}

impl ChainConformation {
    pub fn new(points: Vec<Point3<f64>>) -> Result<Self, SimulationError> {
        if points.len() < 2 {
            return Err(SimulationError::InsufficientPoints {
                found: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub(crate) fn from_grown(points: Vec<Point3<f64>>) -> Self {
        debug_assert!(points.len() >= 2);
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    #[inline]
    pub fn initial_point(&self) -> &Point3<f64> {
        &self.points[0]
    }

    /// Unit direction of every bond, in chain order. Zero-length bonds are skipped.
    pub fn bond_directions(&self) -> impl Iterator<Item = Unit<Vector3<f64>>> + '_ {
        self.points
            .windows(2)
            .filter_map(|pair| Unit::try_new(pair[1] - pair[0], f64::EPSILON))
    }

    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> ChainConformation {
        ChainConformation::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(3.0, 0.0, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn new_rejects_fewer_than_two_points() {
        assert_eq!(
            ChainConformation::new(vec![Point3::origin()]),
            Err(SimulationError::InsufficientPoints { found: 1 })
        );
        assert_eq!(
            ChainConformation::new(Vec::new()),
            Err(SimulationError::InsufficientPoints { found: 0 })
        );
    }

    #[test]
    fn segment_count_is_one_less_than_point_count() {
        let chain = l_shape();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.segment_count(), 2);
        assert!(!chain.is_empty());
    }

    #[test]
    fn bond_directions_are_normalized_in_chain_order() {
        let directions: Vec<_> = l_shape().bond_directions().collect();
        assert_eq!(directions.len(), 2);
        assert!((directions[0].into_inner() - Vector3::z()).norm() < 1e-12);
        assert!((directions[1].into_inner() - Vector3::x()).norm() < 1e-12);
    }

    #[test]
    fn initial_point_is_first_point() {
        assert_eq!(*l_shape().initial_point(), Point3::origin());
    }
}
