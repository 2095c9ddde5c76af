//! Model-space points.

/// A point (or displacement) in model space.
///
/// Double precision keeps projected frames bit-reproducible across runs.
pub type Point3 = glam::DVec3;

/// Averages a set of corners; used for face centers.
pub fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::ZERO;
    }
    points.iter().copied().sum::<Point3>() / points.len() as f64
}
