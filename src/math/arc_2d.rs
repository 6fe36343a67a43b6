use std::f64::consts::TAU;

use super::Point2;

/// Polar angle of `p` around `center`, in `(-π, π]`.
#[must_use]
pub fn angle_of(center: &Point2, p: &Point2) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

/// Signed sweep from `start_angle` to `end_angle` in the given direction.
///
/// A positive sweep runs counter-clockwise, a negative one clockwise. The
/// result lies in `[0, 2π)` for counter-clockwise arcs and in
/// `(-2π, 0]` for clockwise ones, so crossing the `±π` branch cut never
/// flips the direction.
#[must_use]
pub fn directed_sweep(start_angle: f64, end_angle: f64, is_ccw: bool) -> f64 {
    let mut sweep = end_angle - start_angle;
    if is_ccw {
        sweep = sweep.rem_euclid(TAU);
    } else {
        sweep = -(-sweep).rem_euclid(TAU);
    }
    sweep
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-10;

    #[test]
    fn angle_of_axes() {
        let o = Point2::origin();
        assert!(angle_of(&o, &Point2::new(1.0, 0.0)).abs() < TOL);
        assert!((angle_of(&o, &Point2::new(0.0, 2.0)) - FRAC_PI_2).abs() < TOL);
        assert!((angle_of(&o, &Point2::new(-1.0, 0.0)) - PI).abs() < TOL);
    }

    #[test]
    fn sweep_across_branch_cut_ccw() {
        // 170° → -170° counter-clockwise is a 20° sweep.
        let sweep = directed_sweep(170_f64.to_radians(), (-170_f64).to_radians(), true);
        assert!((sweep - 20_f64.to_radians()).abs() < TOL, "sweep={sweep}");
    }

    #[test]
    fn sweep_across_branch_cut_cw() {
        // -170° → 170° clockwise is a -20° sweep.
        let sweep = directed_sweep((-170_f64).to_radians(), 170_f64.to_radians(), false);
        assert!((sweep + 20_f64.to_radians()).abs() < TOL, "sweep={sweep}");
    }

    #[test]
    fn sweep_long_way_round() {
        let sweep = directed_sweep(0.0, FRAC_PI_2, false);
        assert!((sweep + 3.0 * FRAC_PI_2).abs() < TOL, "sweep={sweep}");
    }

    #[test]
    fn quarter_arc_points() {
        let c = Point2::new(1.0, 1.0);
        let p0 = arc_point_at(&c, 2.0, 0.0, FRAC_PI_2, 0.0);
        let p1 = arc_point_at(&c, 2.0, 0.0, FRAC_PI_2, 1.0);
        assert!((p0 - Point2::new(3.0, 1.0)).norm() < TOL);
        assert!((p1 - Point2::new(1.0, 3.0)).norm() < TOL);
    }
}
