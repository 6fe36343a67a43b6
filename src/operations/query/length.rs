use crate::error::Result;
use crate::geometry::{BezierCurve, Segment};

/// Samples used for the coarse estimate that sizes the real one.
pub const COARSE_SAMPLES: usize = 3;

/// Lower bound on samples per segment: at least the start/end pair.
pub const MIN_SAMPLES: usize = 2;

/// Upper bound on samples per segment.
pub const MAX_SAMPLES: usize = 1 << 16;

/// Length of the polyline through `sample_count + 1` evenly spaced points.
///
/// Never exceeds the true arc length and converges to it as the sample
/// count grows. A `sample_count` of zero measures the chord.
///
/// # Errors
///
/// Propagates segment evaluation failures.
#[allow(clippy::cast_precision_loss)]
pub fn approximate_length(segment: &Segment, sample_count: usize) -> Result<f64> {
    let sample_count = sample_count.max(1);
    let mut previous = segment.point_at(0.0)?;
    let mut length = 0.0;
    for i in 1..=sample_count {
        let point = segment.point_at(i as f64 / sample_count as f64)?;
        length += (point - previous).norm();
        previous = point;
    }
    Ok(length)
}

/// Number of samples a segment gets at `resolution` samples per unit length.
///
/// The count is derived from a coarse length estimate so that short and long
/// segments end up with the same density.
///
/// # Errors
///
/// Propagates segment evaluation failures.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sample_count_for(segment: &Segment, resolution: f64) -> Result<usize> {
    let coarse = approximate_length(segment, COARSE_SAMPLES)?;
    let count = (coarse * resolution).round();
    let count = if count.is_finite() && count > 0.0 {
        (count.min(MAX_SAMPLES as f64)) as usize
    } else {
        0
    };
    Ok(count.max(MIN_SAMPLES))
}

/// Length of a segment sampled at `resolution` samples per unit length.
///
/// # Errors
///
/// Propagates segment evaluation failures.
pub fn segment_length(segment: &Segment, resolution: f64) -> Result<f64> {
    approximate_length(segment, sample_count_for(segment, resolution)?)
}

/// Sum of all segment lengths in curve order, closing segment included.
///
/// This always recomputes; [`BezierCurve::length`] is the cached entry point.
///
/// # Errors
///
/// Propagates segment evaluation failures.
pub fn total_length(curve: &BezierCurve) -> Result<f64> {
    let resolution = curve.resolution();
    curve
        .segments()?
        .iter()
        .map(|segment| segment_length(segment, resolution))
        .sum()
}

/// Measures the length of a whole curve or one of its segments.
pub struct Length {
    segment: Option<usize>,
}

impl Length {
    /// Creates a query for the total curve length.
    #[must_use]
    pub fn of_curve() -> Self {
        Self { segment: None }
    }

    /// Creates a query for the segment starting at anchor `index`.
    #[must_use]
    pub fn of_segment(index: usize) -> Self {
        Self {
            segment: Some(index),
        }
    }

    /// Executes the query at the curve's resolution.
    ///
    /// The whole-curve form reads and refreshes the curve's length cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than 2 anchors or the segment
    /// index is out of range.
    pub fn execute(&self, curve: &BezierCurve) -> Result<f64> {
        match self.segment {
            None => curve.length(),
            Some(index) => {
                curve.validate()?;
                curve.segment_length(index)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn arch() -> Segment {
        Segment::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(4.0, 2.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        )
    }

    #[test]
    fn straight_segment_is_exact() {
        let seg = Segment::line(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0));
        for samples in [0, 1, 2, 7, 50] {
            let len = approximate_length(&seg, samples).unwrap();
            assert!((len - 5.0).abs() < 1e-10, "samples={samples} len={len}");
        }
    }

    #[test]
    fn refinement_never_shrinks() {
        let seg = arch();
        let coarse = approximate_length(&seg, 4).unwrap();
        let fine = approximate_length(&seg, 64).unwrap();
        let finer = approximate_length(&seg, 512).unwrap();
        assert!(coarse <= fine + 1e-12);
        assert!(fine <= finer + 1e-12);
        assert!(finer - fine < 1e-3);
    }

    #[test]
    fn sample_count_scales_with_length() {
        let long = Segment::line(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0));
        let short = Segment::line(Point3::new(0.0, 0.0, 0.0), Point3::new(0.1, 0.0, 0.0));
        assert_eq!(sample_count_for(&long, 2.0).unwrap(), 20);
        assert_eq!(sample_count_for(&short, 2.0).unwrap(), MIN_SAMPLES);
        assert_eq!(sample_count_for(&short, 100.0).unwrap(), 10);
    }

    #[test]
    fn sample_count_is_capped() {
        let long = Segment::line(Point3::new(0.0, 0.0, 0.0), Point3::new(1e6, 0.0, 0.0));
        assert_eq!(sample_count_for(&long, 1e6).unwrap(), MAX_SAMPLES);
    }

    #[test]
    fn collinear_curve_length_ignores_resolution() {
        let mut curve = BezierCurve::polyline(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            ],
            false,
        );
        for resolution in [0.01, 1.0, 10.0, 250.0] {
            curve.set_resolution(resolution).unwrap();
            let len = Length::of_curve().execute(&curve).unwrap();
            assert!((len - 2.0).abs() < 1e-4, "resolution={resolution} len={len}");
        }
    }

    #[test]
    fn segment_query() {
        let curve = BezierCurve::polyline(
            &[Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 2.5, 0.0)],
            false,
        );
        let len = Length::of_segment(0).execute(&curve).unwrap();
        assert!((len - 2.5).abs() < 1e-10);
        assert!(Length::of_segment(1).execute(&curve).is_err());
    }

    #[test]
    fn total_is_sum_of_segments() {
        let curve = BezierCurve::from_anchors(
            [
                crate::geometry::AnchorPoint::new(Point3::new(0.0, 0.0, 0.0)),
                crate::geometry::AnchorPoint::connected(
                    Point3::new(2.0, 1.0, 0.0),
                    crate::math::Vector3::new(-1.0, 0.0, 0.0),
                ),
                crate::geometry::AnchorPoint::new(Point3::new(4.0, 0.0, 0.0)),
            ],
            true,
        );
        let sum: f64 = (0..3).map(|i| curve.segment_length(i).unwrap()).sum();
        assert!((total_length(&curve).unwrap() - sum).abs() < 1e-12);
        assert!(curve.length().unwrap() > 0.0);
    }
}
