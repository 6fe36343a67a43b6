use crate::error::{OperationError, Result};
use crate::geometry::BezierCurve;

/// Schema version at which resolution became samples per unit length.
pub const RESOLUTION_SCHEMA_VERSION: u32 = 1;

/// Samples used to probe segment lengths during migration.
pub const MIGRATION_PROBE_SAMPLES: usize = 5;

/// Converts a per-segment sample count into samples per unit length.
///
/// Older curves stored a fixed number of samples per segment. Dividing by
/// the shortest segment's length keeps that segment's sample count and gives
/// longer ones proportionally more.
///
/// # Errors
///
/// Returns an error if `shortest_segment_length` is not a positive finite number.
pub fn migrate_resolution(old_resolution: f64, shortest_segment_length: f64) -> Result<f64> {
    if !shortest_segment_length.is_finite() || shortest_segment_length <= 0.0 {
        return Err(OperationError::InvalidInput(format!(
            "shortest segment length must be positive, got {shortest_segment_length}"
        ))
        .into());
    }
    Ok(old_resolution / shortest_segment_length)
}

/// Upgrades a curve's stored resolution to the current schema, at most once.
pub struct MigrateResolution {
    probe_samples: usize,
}

impl Default for MigrateResolution {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrateResolution {
    /// Creates a new migration using [`MIGRATION_PROBE_SAMPLES`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            probe_samples: MIGRATION_PROBE_SAMPLES,
        }
    }

    /// Executes the migration.
    ///
    /// Returns `true` if the resolution was converted and `false` if the
    /// curve was already at [`RESOLUTION_SCHEMA_VERSION`].
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than 2 anchors or its
    /// shortest segment has zero length.
    pub fn execute(&self, curve: &mut BezierCurve) -> Result<bool> {
        if curve.resolution_schema_version() >= RESOLUTION_SCHEMA_VERSION {
            return Ok(false);
        }
        let shortest = curve.shortest_segment_length(self.probe_samples)?;
        let old = curve.resolution();
        let new = migrate_resolution(old, shortest)?;
        curve.set_resolution(new)?;
        curve.set_resolution_schema_version(RESOLUTION_SCHEMA_VERSION);
        tracing::debug!(old, new, shortest, "migrated curve resolution");
        Ok(true)
    }
}
