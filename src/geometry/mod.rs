pub mod anchor;
pub mod bezier;
pub mod curve;

pub use anchor::{AnchorId, AnchorPoint, HandleStyle};
pub use bezier::{BezierCurve, DEFAULT_RESOLUTION};
pub use curve::{Arc, Curve, CurveDomain, Segment, SegmentDegree};
