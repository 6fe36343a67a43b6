use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
/// Parallelism is judged on the sine of the angle between the directions so
/// the test does not depend on their lengths.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    if cross.abs() <= TOLERANCE * d1.norm() * d2.norm() {
        return None;
    }
    let delta = p2 - p1;
    let t = delta.perp(d2) / cross;
    let u = delta.perp(d1) / cross;
    Some((t, u))
}

/// Fits the unique circle through three points.
///
/// The center is the intersection of the perpendicular bisectors of the
/// chords `a → b` and `b → c`. Returns `(center, radius)` where the radius
/// is measured to `a`, or `None` when the points are collinear or
/// coincident.
#[must_use]
pub fn circle_through_points(a: &Point2, b: &Point2, c: &Point2) -> Option<(Point2, f64)> {
    let ab = b - a;
    let bc = c - b;

    let mid_ab = nalgebra::center(a, b);
    let mid_bc = nalgebra::center(b, c);
    let normal_ab = Vector2::new(-ab.y, ab.x);
    let normal_bc = Vector2::new(-bc.y, bc.x);

    let (t, _) = line_line_intersect_2d(&mid_ab, &normal_ab, &mid_bc, &normal_bc)?;
    let center = mid_ab + normal_ab * t;
    Some((center, (a - center).norm()))
}

/// Signed area of the triangle `a, b, c` times two.
///
/// Positive for counter-clockwise turns, negative for clockwise ones.
#[must_use]
pub fn orientation_2d(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b - a).perp(&(c - b))
}
