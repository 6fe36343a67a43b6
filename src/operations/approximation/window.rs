use crate::error::Result;
use crate::geometry::{Arc, Curve};
use crate::math::arc_2d::{angle_of, directed_sweep};
use crate::math::circle_2d::{circle_through_points, orientation_2d};
use crate::math::{Point3, ProjectionPlane};

/// Evaluates `curve` at a fraction of its domain.
pub(super) fn sample<C: Curve + ?Sized>(curve: &C, s: f64) -> Result<Point3> {
    let domain = curve.domain();
    curve.evaluate(domain.t_min + s * (domain.t_max - domain.t_min))
}

/// Fits the circle through the window's start, middle and end samples.
///
/// Returns `None` when those samples are collinear. The returned arc
/// carries the fit error: the summed radial deviation of the samples at a
/// quarter and three quarters of the window.
pub(super) fn fit_window<C: Curve + ?Sized>(
    curve: &C,
    t_start: f64,
    t_end: f64,
    plane: ProjectionPlane,
) -> Result<Option<Arc>> {
    let start3 = sample(curve, t_start)?;
    let start = plane.project(&start3);
    let mid = plane.project(&sample(curve, (t_start + t_end) * 0.5)?);
    let end = plane.project(&sample(curve, t_end)?);

    let Some((center, radius)) = circle_through_points(&start, &mid, &end) else {
        return Ok(None);
    };

    let is_ccw = orientation_2d(&start, &mid, &end) > 0.0;
    let start_angle = angle_of(&center, &start);
    let sweep = directed_sweep(start_angle, angle_of(&center, &end), is_ccw);

    let quarter = (t_end - t_start) * 0.25;
    let probe1 = plane.project(&sample(curve, t_start + quarter)?);
    let probe2 = plane.project(&sample(curve, t_end - quarter)?);
    let error = ((probe1 - center).norm() - radius).abs() + ((probe2 - center).norm() - radius).abs();

    Ok(Some(Arc::new(
        center,
        radius,
        start_angle,
        start_angle + sweep,
        t_start,
        t_end,
        error,
        plane,
        plane.depth(&start3),
    )))
}

/// Snaps the end angle of an arc finishing at parameter 1 onto the curve's
/// true end point.
pub(super) fn cap_at_curve_end<C: Curve + ?Sized>(curve: &C, arc: &mut Arc) -> Result<()> {
    let end = arc.plane().project(&sample(curve, 1.0)?);
    let sweep = directed_sweep(arc.start_angle(), angle_of(arc.center(), &end), arc.is_ccw());
    arc.set_end_angle(arc.start_angle() + sweep);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Segment;

    const KAPPA: f64 = 0.552_284_749_830_793_4;

    fn quarter_circle() -> Segment {
        Segment::new(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, KAPPA, 0.0),
            Point3::new(KAPPA, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn quarter_circle_fits_unit_circle() {
        let arc = fit_window(&quarter_circle(), 0.0, 1.0, ProjectionPlane::Xy)
            .unwrap()
            .unwrap();
        assert!(arc.center().coords.norm() < 1e-3);
        assert!((arc.radius() - 1.0).abs() < 1e-3);
        assert!(arc.error() < 1e-3, "error={}", arc.error());
        assert!((arc.sweep() - std::f64::consts::FRAC_PI_2).abs() < 1e-3);
        assert!(arc.is_ccw());
    }

    #[test]
    fn reversed_traversal_is_clockwise() {
        let seg = quarter_circle();
        let reversed = Segment::new(*seg.end(), *seg.end_handle(), *seg.start_handle(), *seg.start());
        let arc = fit_window(&reversed, 0.0, 1.0, ProjectionPlane::Xy).unwrap().unwrap();
        assert!(!arc.is_ccw());
        assert!((arc.sweep() + std::f64::consts::FRAC_PI_2).abs() < 1e-3);
    }

    #[test]
    fn straight_window_is_unfit() {
        let seg = Segment::line(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 3.0, 0.0));
        assert!(fit_window(&seg, 0.0, 1.0, ProjectionPlane::Xy).unwrap().is_none());
    }

    #[test]
    fn projection_plane_selects_axes() {
        // The same quarter circle lying in the XZ plane.
        let seg = quarter_circle();
        let swap = |p: &Point3| Point3::new(p.x, 7.0, p.y);
        let upright = Segment::new(
            swap(seg.start()),
            swap(seg.start_handle()),
            swap(seg.end_handle()),
            swap(seg.end()),
        );
        assert!(fit_window(&upright, 0.0, 1.0, ProjectionPlane::Xy).unwrap().is_none());
        let arc = fit_window(&upright, 0.0, 1.0, ProjectionPlane::Xz).unwrap().unwrap();
        assert!((arc.radius() - 1.0).abs() < 1e-3);
        assert!((arc.start_point() - Point3::new(1.0, 7.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn capping_keeps_the_true_end() {
        let seg = quarter_circle();
        let mut arc = fit_window(&seg, 0.0, 1.0, ProjectionPlane::Xy).unwrap().unwrap();
        let before = arc.end_angle();
        cap_at_curve_end(&seg, &mut arc).unwrap();
        assert!((arc.end_angle() - before).abs() < 1e-9);
    }
}
