use thiserror::Error;

/// Top-level error type for the beziarc curve library.
#[derive(Debug, Error)]
pub enum BeziarcError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    /// The three sample points of an arc window are collinear.
    #[error("invalid arc fit: sample points are collinear")]
    InvalidArcFit,
}

/// Errors related to the anchor structure of a curve.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("anchor not found")]
    AnchorNotFound,

    #[error("index {index} is out of bounds for a curve with {len} anchors")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("invalid curve topology: {points} anchor(s), closed = {closed}; at least 2 are required")]
    InvalidCurveTopology { points: usize, closed: bool },
}

/// Errors related to curve operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No segment matched the global parameter after every escalation pass.
    #[error("no segment found for global parameter t = {t} after {attempts} attempts")]
    PointNotFound { t: f64, attempts: usize },

    #[error("arc approximation did not converge for window starting at t = {t_start} after {iterations} iterations")]
    ApproximationDidNotConverge { t_start: f64, iterations: usize },
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`BeziarcError`].
pub type Result<T> = std::result::Result<T, BeziarcError>;
