use nalgebra::{Point3, Rotation3, Unit, Vector3};

const PARALLEL_TOLERANCE: f64 = 1e-8;

/// Unit axis perpendicular to both `direction` and `reference`, or `None` when they are
/// (anti)parallel and the cross product is degenerate.
pub fn perpendicular_axis(
    direction: &Vector3<f64>,
    reference: &Vector3<f64>,
) -> Option<Unit<Vector3<f64>>> {
    Unit::try_new(direction.cross(reference), PARALLEL_TOLERANCE)
}

pub fn rotate_about_axis(
    vector: &Unit<Vector3<f64>>,
    axis: &Unit<Vector3<f64>>,
    angle_radians: f64,
) -> Unit<Vector3<f64>> {
    let rotation = Rotation3::from_axis_angle(axis, angle_radians);
    Unit::new_normalize(rotation * vector.into_inner())
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}
