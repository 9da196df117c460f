// projection.rs - angular (view-angle) projection of world points

use glam::DVec3;

use crate::viewer::Orientation;

/// World-space point. Scene coordinates use z as "up" and +y as "forward".
pub type Point3 = DVec3;

/// Direction of a point as seen from the viewer, in degrees.
///
/// `theta` is the horizontal offset, `phi` the vertical one. Neither is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewAngle {
    pub theta: f64,
    pub phi: f64,
}

impl ViewAngle {
    #[cfg(test)]
    pub const fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }

    /// Subtracts the viewer's look orientation, giving the angle relative to
    /// the centre of view.
    pub fn relative_to(self, orientation: Orientation) -> Self {
        Self {
            theta: self.theta - orientation.theta,
            phi: self.phi - orientation.phi,
        }
    }
}

/// Projects `point` into view angles relative to `viewer`.
///
/// theta uses the depth/vertical-plane distance as the adjacent leg and phi the
/// horizontal-plane distance. `atan2(0, 0)` is 0, so a point that coincides
/// with the viewer lands at (0, 0).
pub fn project(point: Point3, viewer: Point3) -> ViewAngle {
    let d = point - viewer;
    let xy_dist = (d.x * d.x + d.y * d.y).sqrt();
    let yz_dist = (d.y * d.y + d.z * d.z).sqrt();

    ViewAngle {
        theta: d.x.atan2(yz_dist).to_degrees(),
        phi: d.z.atan2(xy_dist).to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn coincident_point_projects_to_origin() {
        let v = Point3::new(50.0, 0.0, 10.0);
        let a = project(v, v);
        assert_eq!(a.theta, 0.0);
        assert_eq!(a.phi, 0.0);
    }

    #[test]
    fn projection_is_deterministic() {
        let p = Point3::new(13.7, -42.25, 3.5);
        let v = Point3::new(-1.0, 8.0, 99.0);
        let a = project(p, v);
        let b = project(p, v);
        assert_eq!(a.theta.to_bits(), b.theta.to_bits());
        assert_eq!(a.phi.to_bits(), b.phi.to_bits());
    }

    #[test]
    fn translation_leaves_angles_unchanged() {
        let p = Point3::new(40.0, 60.0, 0.0);
        let v = Point3::new(50.0, 0.0, 10.0);
        let shift = Point3::new(-25.0, 125.0, 7.0);
        let a = project(p, v);
        let b = project(p + shift, v + shift);
        assert_eq!(a, b);
    }

    #[test]
    fn straight_ahead_below_eye_level() {
        // Point directly in front (dx = 0) and 10 units below at distance 20.
        let a = project(Point3::new(50.0, 20.0, 0.0), Point3::new(50.0, 0.0, 10.0));
        assert!(approx(a.theta, 0.0));
        assert!(approx(a.phi, (-10.0f64).atan2(20.0).to_degrees()));
        assert!(a.phi < 0.0);
    }

    #[test]
    fn theta_uses_depth_plane_distance() {
        // dx = -10, dy = 40, dz = -10: both planar distances are sqrt(1700).
        let a = project(Point3::new(40.0, 40.0, 0.0), Point3::new(50.0, 0.0, 10.0));
        let leg = 1700f64.sqrt();
        assert!(approx(a.theta, (-10.0f64).atan2(leg).to_degrees()));
        assert!(approx(a.phi, (-10.0f64).atan2(leg).to_degrees()));
    }

    #[test]
    fn point_to_the_side_is_ninety_degrees() {
        // dy = dz = 0 leaves only dx, so theta is +/-90 and phi is 0.
        let v = Point3::ZERO;
        assert!(approx(project(Point3::new(5.0, 0.0, 0.0), v).theta, 90.0));
        assert!(approx(project(Point3::new(-5.0, 0.0, 0.0), v).theta, -90.0));
        assert!(approx(project(Point3::new(5.0, 0.0, 0.0), v).phi, 0.0));
    }

    #[test]
    fn relative_to_subtracts_orientation() {
        let a = ViewAngle::new(12.5, -3.0).relative_to(Orientation::new(5.0, -10.0));
        assert_eq!(a, ViewAngle::new(7.5, 7.0));
    }
}
