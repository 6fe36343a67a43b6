use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{BezierCurve, Curve, CurveDomain};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::length::{approximate_length, sample_count_for};

/// Controls the segment search behind global-parameter queries.
#[derive(Debug, Clone, Copy)]
pub struct ParametrizeParams {
    /// Samples per segment on the first pass.
    pub initial_samples: usize,
    /// Samples added on each retry.
    pub sample_increment: usize,
    /// Number of passes before giving up.
    pub max_attempts: usize,
    /// Slack that lets a segment ending exactly at `t` match.
    pub boundary_tolerance: f64,
}

impl Default for ParametrizeParams {
    fn default() -> Self {
        Self {
            initial_samples: 10,
            sample_increment: 10,
            max_attempts: 10,
            boundary_tolerance: 5e-6,
        }
    }
}

/// A segment index and the local parameter within it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveLocation {
    /// Index of the segment, the closing segment being last.
    pub segment: usize,
    /// Local parameter in `[0, 1]`.
    pub local_t: f64,
}

/// Maps a global parameter to a segment-local one.
///
/// Segments are walked in order, accumulating their share of the total
/// length. Each segment is sampled at least as densely as the curve's
/// resolution asks for, and more densely on each retry pass.
///
/// # Errors
///
/// Returns [`OperationError::PointNotFound`] if no segment matches after
/// `params.max_attempts` passes, and a degenerate-geometry error when an
/// interior `t` is requested on a curve of zero length.
pub fn locate(curve: &BezierCurve, t: f64, params: &ParametrizeParams) -> Result<CurveLocation> {
    curve.validate()?;
    let last = curve.segment_count() - 1;
    if t <= 0.0 {
        return Ok(CurveLocation {
            segment: 0,
            local_t: 0.0,
        });
    }
    if t >= 1.0 {
        // On a closed curve the last segment is the closing one, ending at the first anchor.
        return Ok(CurveLocation {
            segment: last,
            local_t: 1.0,
        });
    }

    let total = curve.length()?;
    if total < TOLERANCE {
        return Err(GeometryError::Degenerate("curve has zero length".into()).into());
    }

    let segments = curve.segments()?;
    let resolution = curve.resolution();
    // Never sample a segment more coarsely than the cached total did, or the
    // fractions cannot add up to 1.
    let floors = segments
        .iter()
        .map(|segment| sample_count_for(segment, resolution))
        .collect::<Result<Vec<_>>>()?;
    let mut samples = params.initial_samples;
    for attempt in 1..=params.max_attempts {
        let mut cumulative = 0.0;
        for (index, (segment, floor)) in segments.iter().zip(&floors).enumerate() {
            let fraction = approximate_length(segment, samples.max(*floor))? / total;
            if cumulative + fraction + params.boundary_tolerance > t {
                let local_t = if fraction > 0.0 {
                    ((t - cumulative) / fraction).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                return Ok(CurveLocation {
                    segment: index,
                    local_t,
                });
            }
            cumulative += fraction;
        }
        tracing::debug!(t, samples, attempt, cumulative, "no segment matched, raising sample count");
        samples += params.sample_increment;
    }

    Err(OperationError::PointNotFound {
        t,
        attempts: params.max_attempts,
    }
    .into())
}

/// Evaluates the point at a global, length-proportional parameter.
pub struct PointOnCurve {
    t: f64,
    params: ParametrizeParams,
}

impl PointOnCurve {
    /// Creates a new `PointOnCurve` query with default search parameters.
    #[must_use]
    pub fn new(t: f64) -> Self {
        Self::with_params(t, ParametrizeParams::default())
    }

    /// Creates a new `PointOnCurve` query.
    #[must_use]
    pub fn with_params(t: f64, params: ParametrizeParams) -> Self {
        Self { t, params }
    }

    /// Executes the query, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than 2 anchors or no segment
    /// can be located for `t`.
    pub fn execute(&self, curve: &BezierCurve) -> Result<Point3> {
        let location = locate(curve, self.t, &self.params)?;
        curve.segment(location.segment)?.point_at(location.local_t)
    }
}

/// Evaluates the unit tangent at a global, length-proportional parameter.
pub struct TangentOnCurve {
    t: f64,
    params: ParametrizeParams,
}

impl TangentOnCurve {
    /// Creates a new `TangentOnCurve` query with default search parameters.
    #[must_use]
    pub fn new(t: f64) -> Self {
        Self::with_params(t, ParametrizeParams::default())
    }

    /// Creates a new `TangentOnCurve` query.
    #[must_use]
    pub fn with_params(t: f64, params: ParametrizeParams) -> Self {
        Self { t, params }
    }

    /// Executes the query, returning the unit tangent.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than 2 anchors, no segment
    /// can be located for `t`, or the tangent is degenerate.
    pub fn execute(&self, curve: &BezierCurve) -> Result<Vector3> {
        let location = locate(curve, self.t, &self.params)?;
        curve.segment(location.segment)?.tangent_at(location.local_t)
    }
}

impl Curve for BezierCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        PointOnCurve::new(t).execute(self)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        TangentOnCurve::new(t).execute(self)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn is_closed(&self) -> bool {
        BezierCurve::is_closed(self)
    }
}
