pub mod length;
mod point_on_curve;

pub use length::Length;
pub use point_on_curve::{locate, CurveLocation, ParametrizeParams, PointOnCurve, TangentOnCurve};
