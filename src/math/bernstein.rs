use crate::error::{GeometryError, Result};

use super::{Point3, Vector3};

/// Returns `n!`, or `None` when it does not fit in a `u64` (`n > 20`).
#[must_use]
pub fn factorial(n: u64) -> Option<u64> {
    (1..=n).try_fold(1_u64, u64::checked_mul)
}

/// Returns the binomial coefficient `C(n, k)` computed from factorials.
///
/// `C(n, k) = 0` for `k > n`.
#[must_use]
pub fn binomial(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let denominator = factorial(k)?.checked_mul(factorial(n - k)?)?;
    Some(factorial(n)? / denominator)
}

/// Evaluates the Bézier curve defined by `control_points` at `t`.
///
/// `point(t) = Σ C(n, i) · t^(n-i) · (1 - t)^i · P[n - i]` with `t`
/// clamped to `[0, 1]`. The first control point is returned exactly at
/// `t = 0` and the last one exactly at `t = 1`.
///
/// # Errors
///
/// Returns an error if `control_points` is empty or if the curve order is
/// too high for the factorial table.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn bezier_point(control_points: &[Point3], t: f64) -> Result<Point3> {
    let Some(order) = control_points.len().checked_sub(1) else {
        return Err(GeometryError::Degenerate("bezier curve has no control points".into()).into());
    };
    let t = t.clamp(0.0, 1.0);
    let s = 1.0 - t;
    let n = order as u64;

    let mut acc = Vector3::zeros();
    for i in 0..=n {
        let coefficient = binomial(n, i).ok_or_else(|| {
            GeometryError::Degenerate(format!("bezier order {n} is too high to evaluate"))
        })?;
        let weight = coefficient as f64 * t.powi((n - i) as i32) * s.powi(i as i32);
        acc += control_points[(n - i) as usize].coords * weight;
    }
    Ok(Point3::from(acc))
}
