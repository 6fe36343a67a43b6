use crate::error::{Result, TessellationError};
use crate::geometry::BezierCurve;
use crate::operations::query::length::sample_count_for;

use super::{Polyline, TessellationParams};

/// Tessellates a Bézier curve into a polyline.
///
/// Each segment is interpolated with a sample count proportional to its
/// length, so the density is uniform along the curve. Points shared by
/// adjacent segments appear once; a closed curve does not repeat its first
/// point at the end.
pub struct TessellateCurve {
    params: TessellationParams,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation.
    #[must_use]
    pub fn new(params: TessellationParams) -> Self {
        Self { params }
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than 2 anchors or the
    /// resolution override is not positive.
    pub fn execute(&self, curve: &BezierCurve) -> Result<Polyline> {
        curve.validate()?;
        let closed = curve.is_closed();

        if !self.params.interpolated_points {
            return Ok(Polyline {
                points: curve.anchors().map(|a| *a.position()).collect(),
                closed,
            });
        }

        let resolution = self.params.resolution.unwrap_or_else(|| curve.resolution());
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(TessellationError::InvalidParameters(format!(
                "resolution must be positive, got {resolution}"
            ))
            .into());
        }

        let mut points = Vec::new();
        for (index, segment) in curve.segments()?.iter().enumerate() {
            let samples = segment.interpolate(sample_count_for(segment, resolution)?)?;
            let skip = usize::from(index > 0);
            points.extend(samples.into_iter().skip(skip));
        }
        if closed {
            points.pop();
        }

        Ok(Polyline { points, closed })
    }
}
