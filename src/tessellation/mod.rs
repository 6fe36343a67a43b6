mod tessellate_curve;

pub use tessellate_curve::TessellateCurve;

use crate::math::Point3;

/// Parameters controlling curve interpolation for rendering and export.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Samples per unit length; `None` uses the curve's own resolution.
    pub resolution: Option<f64>,
    /// Emit interpolated samples between anchors. When `false` only the
    /// anchor positions are emitted.
    pub interpolated_points: bool,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            resolution: None,
            interpolated_points: true,
        }
    }
}

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
    /// Whether the last vertex connects back to the first.
    pub closed: bool,
}
