pub mod approximation;
pub mod migration;
pub mod query;

pub use approximation::{ApproximateArcs, ArcApproximation, ArcFitParams, FittedSpan, UnfitSpan};
pub use migration::{migrate_resolution, MigrateResolution};
pub use query::{Length, PointOnCurve, TangentOnCurve};
