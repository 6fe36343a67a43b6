use crate::error::Result;
use crate::geometry::{Arc, Curve};

use super::window::{cap_at_curve_end, fit_window, sample};
use super::{ArcApproximation, ArcFitParams, UnfitSpan};

/// How a single window search ended.
enum WindowOutcome {
    Arc(Arc),
    Unfit(UnfitSpan),
    DidNotConverge { iterations: usize },
}

/// Approximates a curve with circular arcs within an error threshold.
///
/// The curve is covered left to right by windows of its domain, mapped to
/// `[0, 1]`. Each window is fitted with the circle through its start, middle
/// and end samples and judged by how far the samples at a quarter and three
/// quarters of the window stray from it. The window end is binary-searched
/// so each arc is as long as the threshold allows.
///
/// Works on any [`Curve`]: a whole
/// [`BezierCurve`](crate::geometry::BezierCurve) is sampled by global
/// arc-length parameter, a single [`Segment`](crate::geometry::Segment) by
/// its local parameter.
#[derive(Debug)]
pub struct ApproximateArcs {
    threshold: f64,
    params: ArcFitParams,
}

impl ApproximateArcs {
    /// Creates a new approximation with default parameters.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self::with_params(threshold, ArcFitParams::default())
    }

    /// Creates a new approximation.
    #[must_use]
    pub fn with_params(threshold: f64, params: ArcFitParams) -> Self {
        Self { threshold, params }
    }

    /// The threshold actually used, after the configured floor.
    #[must_use]
    pub fn effective_threshold(&self) -> f64 {
        self.threshold.max(self.params.min_error_threshold)
    }

    /// Executes the approximation.
    ///
    /// A window that does not converge ends the walk; the spans committed
    /// before it are returned with an
    /// [`ApproximationDidNotConverge`](crate::error::OperationError::ApproximationDidNotConverge)
    /// diagnostic.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve cannot be evaluated, for example a
    /// [`BezierCurve`](crate::geometry::BezierCurve) with fewer than 2 anchors.
    pub fn execute<C: Curve + ?Sized>(&self, curve: &C) -> Result<ArcApproximation> {
        let threshold = self.effective_threshold();
        let mut result = ArcApproximation::default();
        let mut t_start = 0.0;

        while t_start < 1.0 {
            match self.search_window(curve, t_start, threshold)? {
                WindowOutcome::Arc(arc) => {
                    tracing::debug!(
                        t_start = arc.t_start(),
                        t_end = arc.t_end(),
                        radius = arc.radius(),
                        error = arc.error(),
                        "committed arc"
                    );
                    t_start = arc.t_end();
                    result.push_arc(arc);
                }
                WindowOutcome::Unfit(span) if span.t_end > t_start => {
                    tracing::warn!(
                        t_start = span.t_start,
                        t_end = span.t_end,
                        "collinear samples at minimum span, window left unfit"
                    );
                    t_start = span.t_end;
                    result.push_unfit(span);
                }
                WindowOutcome::Unfit(_) => {
                    tracing::warn!(t_start, "window collapsed to zero span");
                    result.abandon(t_start, self.params.max_iterations);
                    break;
                }
                WindowOutcome::DidNotConverge { iterations } => {
                    tracing::warn!(t_start, iterations, threshold, "arc window did not converge");
                    result.abandon(t_start, iterations);
                    break;
                }
            }
        }

        Ok(result)
    }

    /// Binary-searches the end of the window starting at `t_start`.
    ///
    /// Good windows grow by half their span, bad ones shrink to their
    /// midpoint. The first bad window after a good one ends the search and
    /// the good one is committed.
    fn search_window<C: Curve + ?Sized>(
        &self,
        curve: &C,
        t_start: f64,
        threshold: f64,
    ) -> Result<WindowOutcome> {
        let mut t_end = 1.0;
        let mut previous_good: Option<Arc> = None;

        for _ in 0..self.params.max_iterations {
            let candidate = fit_window(curve, t_start, t_end, self.params.plane)?;
            match candidate {
                Some(mut arc) if arc.error() <= threshold => {
                    if t_end >= 1.0 {
                        cap_at_curve_end(curve, &mut arc)?;
                        return Ok(WindowOutcome::Arc(arc));
                    }
                    t_end = (t_end + (t_end - t_start) * 0.5).min(1.0);
                    previous_good = Some(arc);
                }
                bad => {
                    if let Some(good) = previous_good {
                        return Ok(WindowOutcome::Arc(good));
                    }
                    if bad.is_none() && t_end - t_start <= self.params.min_span {
                        return Ok(WindowOutcome::Unfit(UnfitSpan {
                            t_start,
                            t_end,
                            start: sample(curve, t_start)?,
                            end: sample(curve, t_end)?,
                        }));
                    }
                    t_end = (t_start + t_end) * 0.5;
                }
            }
        }

        Ok(WindowOutcome::DidNotConverge {
            iterations: self.params.max_iterations,
        })
    }
}
