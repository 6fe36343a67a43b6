use crate::error::{GeometryError, Result};
use crate::geometry::anchor::AnchorPoint;
use crate::math::bernstein::bezier_point;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// Polynomial degree of a segment, inferred from its handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentDegree {
    /// Neither handle is set: a straight line.
    Linear,
    /// Exactly one handle is set.
    Quadratic,
    /// Both handles are set.
    Cubic,
}

/// The curve piece between two consecutive anchors.
///
/// Handles are stored as absolute positions. A handle whose position is
/// exactly equal to its anchor does not contribute a control point, which
/// lowers the degree of the segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point3,
    start_handle: Point3,
    end_handle: Point3,
    end: Point3,
}

impl Segment {
    /// Creates a segment from its endpoints and absolute handle positions.
    #[must_use]
    pub fn new(start: Point3, start_handle: Point3, end_handle: Point3, end: Point3) -> Self {
        Self {
            start,
            start_handle,
            end_handle,
            end,
        }
    }

    /// Creates a straight segment.
    #[must_use]
    pub fn line(start: Point3, end: Point3) -> Self {
        Self::new(start, start, end, end)
    }

    /// Builds the segment leaving `from` and arriving at `to`.
    ///
    /// Uses the outgoing handle (`handle2`) of `from` and the incoming
    /// handle (`handle1`) of `to`.
    #[must_use]
    pub fn between(from: &AnchorPoint, to: &AnchorPoint) -> Self {
        Self::new(
            *from.position(),
            from.handle2_position(),
            to.handle1_position(),
            *to.position(),
        )
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the absolute position of the handle leaving the start point.
    #[must_use]
    pub fn start_handle(&self) -> &Point3 {
        &self.start_handle
    }

    /// Returns the absolute position of the handle entering the end point.
    #[must_use]
    pub fn end_handle(&self) -> &Point3 {
        &self.end_handle
    }

    /// Infers the degree with exact equality tests, no tolerance.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn degree(&self) -> SegmentDegree {
        let has_start = self.start_handle != self.start;
        let has_end = self.end_handle != self.end;
        match (has_start, has_end) {
            (true, true) => SegmentDegree::Cubic,
            (false, false) => SegmentDegree::Linear,
            _ => SegmentDegree::Quadratic,
        }
    }

    /// Returns the Bézier control points in order, after degree collapse.
    #[must_use]
    pub fn control_points(&self) -> Vec<Point3> {
        match self.degree() {
            SegmentDegree::Linear => vec![self.start, self.end],
            SegmentDegree::Quadratic => {
                let handle = if self.start_handle == self.start {
                    self.end_handle
                } else {
                    self.start_handle
                };
                vec![self.start, handle, self.end]
            }
            SegmentDegree::Cubic => vec![self.start, self.start_handle, self.end_handle, self.end],
        }
    }

    /// Evaluates the segment at local `t`, clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Propagates failures from the Bernstein evaluator.
    pub fn point_at(&self, t: f64) -> Result<Point3> {
        if self.degree() == SegmentDegree::Linear {
            let t = t.clamp(0.0, 1.0);
            return Ok(Point3::from(self.start.coords.lerp(&self.end.coords, t)));
        }
        bezier_point(&self.control_points(), t)
    }

    /// Returns the raw derivative at local `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Vector3 {
        let t = t.clamp(0.0, 1.0);
        match self.control_points().as_slice() {
            [a, b, c, d] => {
                let c1 = d.coords - c.coords * 3.0 + b.coords * 3.0 - a.coords;
                let c2 = c.coords * 3.0 - b.coords * 6.0 + a.coords * 3.0;
                let c3 = (b - a) * 3.0;
                c1 * (3.0 * t * t) + c2 * (2.0 * t) + c3
            }
            [a, b, c] => (b - a) * (2.0 * (1.0 - t)) + (c - b) * (2.0 * t),
            _ => self.end - self.start,
        }
    }

    /// Computes the unit tangent at local `t`.
    ///
    /// Linear segments return the chord direction regardless of `t`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] when the derivative vanishes.
    pub fn tangent_at(&self, t: f64) -> Result<Vector3> {
        let derivative = self.derivative_at(t);
        let len = derivative.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(derivative / len)
    }

    /// Samples `sample_count + 1` points at evenly spaced local parameters.
    ///
    /// The first point is the segment start and the last is the segment end.
    ///
    /// # Errors
    ///
    /// Propagates evaluation failures.
    #[allow(clippy::cast_precision_loss)]
    pub fn interpolate(&self, sample_count: usize) -> Result<Vec<Point3>> {
        let sample_count = sample_count.max(1);
        (0..=sample_count)
            .map(|i| self.point_at(i as f64 / sample_count as f64))
            .collect()
    }
}

impl Curve for Segment {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.point_at(t)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        self.tangent_at(t)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn is_closed(&self) -> bool {
        false
    }
}
