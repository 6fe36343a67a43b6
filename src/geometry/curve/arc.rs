use crate::error::Result;
use crate::math::arc_2d::arc_point_at;
use crate::math::{Point2, Point3, ProjectionPlane, Vector2, Vector3};

use super::{Curve, CurveDomain};

/// A circular arc fitted to part of a Bézier curve.
///
/// The arc lives in a [`ProjectionPlane`]: its center is a 2D point on that
/// plane and the dropped coordinate is restored from `depth` when the arc is
/// evaluated in 3D. The sweep `end_angle - start_angle` is signed and follows
/// the traversal direction of the source curve. `t_start..t_end` is the
/// range of the curve's global parameter that the arc replaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    center: Point2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    t_start: f64,
    t_end: f64,
    error: f64,
    plane: ProjectionPlane,
    depth: f64,
}

impl Arc {
    /// Creates a new arc.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        t_start: f64,
        t_end: f64,
        error: f64,
        plane: ProjectionPlane,
        depth: f64,
    ) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            t_start,
            t_end,
            error,
            plane,
            depth,
        }
    }

    /// Returns the center of the arc on the projection plane.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the start angle in radians.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the end angle in radians.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Signed sweep: positive for counter-clockwise arcs.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Returns whether the arc turns counter-clockwise on its plane.
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.sweep() >= 0.0
    }

    /// Start of the source parameter range.
    #[must_use]
    pub fn t_start(&self) -> f64 {
        self.t_start
    }

    /// End of the source parameter range.
    #[must_use]
    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    /// Fit error measured when the arc was accepted.
    #[must_use]
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Returns the plane the arc was fitted in.
    #[must_use]
    pub fn plane(&self) -> ProjectionPlane {
        self.plane
    }

    /// Arc length, `radius * |sweep|`.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.radius * self.sweep().abs()
    }

    /// Point at fraction `s` of the sweep, `s` in `[0, 1]`.
    #[must_use]
    pub fn point_at_fraction(&self, s: f64) -> Point3 {
        let p = arc_point_at(&self.center, self.radius, self.start_angle, self.sweep(), s);
        self.plane.embed(&p, self.depth)
    }

    /// Returns the 3D start point.
    #[must_use]
    pub fn start_point(&self) -> Point3 {
        self.point_at_fraction(0.0)
    }

    /// Returns the 3D end point.
    #[must_use]
    pub fn end_point(&self) -> Point3 {
        self.point_at_fraction(1.0)
    }

    /// Replaces the end angle, keeping the traversal direction.
    pub(crate) fn set_end_angle(&mut self, end_angle: f64) {
        self.end_angle = end_angle;
    }
}

impl Curve for Arc {
    /// Evaluates at an absolute angle in radians.
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let p = Point2::new(
            self.center.x + self.radius * t.cos(),
            self.center.y + self.radius * t.sin(),
        );
        Ok(self.plane.embed(&p, self.depth))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let sign = if self.is_ccw() { 1.0 } else { -1.0 };
        let tangent = Vector2::new(-sign * t.sin(), sign * t.cos());
        Ok(self.plane.embed_vector(&tangent))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.start_angle, self.end_angle)
    }

    fn is_closed(&self) -> bool {
        (self.sweep().abs() - std::f64::consts::TAU).abs() < crate::math::TOLERANCE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-10;

    fn quarter() -> Arc {
        Arc::new(
            Point2::origin(),
            2.0,
            0.0,
            FRAC_PI_2,
            0.0,
            1.0,
            0.0,
            ProjectionPlane::Xy,
            5.0,
        )
    }

    #[test]
    fn endpoints_lift_into_3d() {
        let arc = quarter();
        assert!((arc.start_point() - Point3::new(2.0, 0.0, 5.0)).norm() < TOL);
        assert!((arc.end_point() - Point3::new(0.0, 2.0, 5.0)).norm() < TOL);
    }

    #[test]
    fn length_is_radius_times_sweep() {
        assert!((quarter().length() - PI).abs() < TOL);
    }

    #[test]
    fn clockwise_tangent() {
        let arc = Arc::new(
            Point2::origin(),
            1.0,
            FRAC_PI_2,
            0.0,
            0.0,
            1.0,
            0.0,
            ProjectionPlane::Xy,
            0.0,
        );
        assert!(!arc.is_ccw());
        let tan = arc.tangent(FRAC_PI_2).unwrap();
        assert!((tan - Vector3::new(1.0, 0.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn counter_clockwise_tangent() {
        let arc = quarter();
        let tan = arc.tangent(0.0).unwrap();
        assert!((tan - Vector3::new(0.0, 1.0, 0.0)).norm() < TOL);
        let tan = arc.tangent(FRAC_PI_2).unwrap();
        assert!((tan - Vector3::new(-1.0, 0.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn evaluate_takes_angles() {
        let arc = quarter();
        let p = arc.evaluate(FRAC_PI_2).unwrap();
        assert!((p - arc.end_point()).norm() < TOL);
    }
}
