mod approximate_arcs;
mod window;

pub use approximate_arcs::ApproximateArcs;

use crate::error::{BeziarcError, GeometryError, OperationError};
use crate::geometry::Arc;
use crate::math::{Point3, ProjectionPlane};

/// Parameters controlling arc approximation.
#[derive(Debug, Clone, Copy)]
pub struct ArcFitParams {
    /// Floor applied to the caller's error threshold.
    pub min_error_threshold: f64,
    /// Binary-search steps allowed per window.
    pub max_iterations: usize,
    /// Window span below which a collinear window is flagged instead of shrunk.
    pub min_span: f64,
    /// Plane the curve is flattened onto for fitting.
    pub plane: ProjectionPlane,
}

impl Default for ArcFitParams {
    fn default() -> Self {
        Self {
            min_error_threshold: 1e-4,
            max_iterations: 100,
            min_span: 1e-3,
            plane: ProjectionPlane::Xy,
        }
    }
}

/// A parameter range that could not be fitted with a circle.
///
/// Produced when the window samples stay collinear down to the minimum
/// span. Consecutive unfit windows are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct UnfitSpan {
    /// Start of the covered parameter range.
    pub t_start: f64,
    /// End of the covered parameter range.
    pub t_end: f64,
    /// Curve point at `t_start`.
    pub start: Point3,
    /// Curve point at `t_end`.
    pub end: Point3,
}

/// One piece of an approximation, in parameter order.
#[derive(Debug, Clone, PartialEq)]
pub enum FittedSpan {
    /// A circular arc within the error threshold.
    Arc(Arc),
    /// A range left unfitted because its samples were collinear.
    Unfit(UnfitSpan),
}

impl FittedSpan {
    /// Start of the covered parameter range.
    #[must_use]
    pub fn t_start(&self) -> f64 {
        match self {
            Self::Arc(arc) => arc.t_start(),
            Self::Unfit(span) => span.t_start,
        }
    }

    /// End of the covered parameter range.
    #[must_use]
    pub fn t_end(&self) -> f64 {
        match self {
            Self::Arc(arc) => arc.t_end(),
            Self::Unfit(span) => span.t_end,
        }
    }

    /// Returns the arc, if this span was fitted.
    #[must_use]
    pub fn as_arc(&self) -> Option<&Arc> {
        match self {
            Self::Arc(arc) => Some(arc),
            Self::Unfit(_) => None,
        }
    }
}

/// Result of [`ApproximateArcs`]: the spans produced plus any diagnostics.
#[derive(Debug, Default)]
pub struct ArcApproximation {
    /// Contiguous spans starting at parameter 0.
    pub spans: Vec<FittedSpan>,
    /// [`GeometryError::InvalidArcFit`] for each unfit span and
    /// [`OperationError::ApproximationDidNotConverge`] if a window was abandoned.
    pub diagnostics: Vec<BeziarcError>,
}

impl ArcApproximation {
    /// Iterates over the fitted arcs, skipping unfit spans.
    pub fn arcs(&self) -> impl Iterator<Item = &Arc> + '_ {
        self.spans.iter().filter_map(FittedSpan::as_arc)
    }

    /// Returns whether the spans reach parameter 1.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.spans.last().is_some_and(|span| span.t_end() >= 1.0)
    }

    /// Returns whether every span is a fitted arc and the whole range is covered.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.is_complete() && self.diagnostics.is_empty()
    }

    fn push_arc(&mut self, arc: Arc) {
        self.spans.push(FittedSpan::Arc(arc));
    }

    fn push_unfit(&mut self, span: UnfitSpan) {
        if let Some(FittedSpan::Unfit(previous)) = self.spans.last_mut() {
            previous.t_end = span.t_end;
            previous.end = span.end;
            return;
        }
        self.spans.push(FittedSpan::Unfit(span));
        self.diagnostics.push(GeometryError::InvalidArcFit.into());
    }

    fn abandon(&mut self, t_start: f64, iterations: usize) {
        self.diagnostics
            .push(OperationError::ApproximationDidNotConverge { t_start, iterations }.into());
    }
}
