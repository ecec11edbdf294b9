//! Small geometry helpers shared by the movement code.

use glam::Vec3;

/// Average of a set of points. Empty input averages to zero.
pub fn average(points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return Vec3::ZERO;
    }
    points.iter().copied().sum::<Vec3>() / points.len() as f32
}

/// Angle in degrees between a surface normal and world up.
///
/// 0 means a flat floor, 90 a vertical wall, 180 a flat ceiling.
/// Degenerate normals report 0.
pub fn angle_from_vertical_degrees(normal: Vec3) -> f32 {
    if normal.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    normal.angle_between(Vec3::Y).to_degrees()
}

/// Project `direction` onto the plane of a surface with the given normal,
/// keeping the component of the original motion that runs along the surface.
pub fn surface_tangent(normal: Vec3, direction: Vec3) -> Vec3 {
    normal.cross(direction).cross(normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), Vec3::ZERO);

        let avg = average(&[Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 2.0, 0.0)]);
        assert_eq!(avg, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_angle_from_vertical() {
        assert!(angle_from_vertical_degrees(Vec3::Y).abs() < 0.001);
        assert!((angle_from_vertical_degrees(Vec3::X) - 90.0).abs() < 0.001);
        assert!((angle_from_vertical_degrees(-Vec3::Y) - 180.0).abs() < 0.001);

        let slope = Vec3::new(-1.0, 1.0, 0.0).normalize();
        assert!((angle_from_vertical_degrees(slope) - 45.0).abs() < 0.001);
    }

    #[test]
    fn test_surface_tangent_preserves_along_surface_motion() {
        // Moving +X into a 45-degree incline: the tangent climbs.
        let normal = Vec3::new(-1.0, 1.0, 0.0).normalize();
        let tangent = surface_tangent(normal, Vec3::X);

        assert!(tangent.x > 0.0);
        assert!(tangent.y > 0.0);
        // No component into the surface.
        assert!(tangent.dot(normal).abs() < 0.001);
    }

    #[test]
    fn test_surface_tangent_on_wall() {
        // Moving straight down along a vertical wall stays straight down.
        let tangent = surface_tangent(Vec3::X, -Vec3::Y);
        assert!((tangent + Vec3::Y).length() < 0.001);
    }
}
