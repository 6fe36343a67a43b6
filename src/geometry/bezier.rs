use std::cell::Cell;

use slotmap::SlotMap;

use crate::error::{Result, TessellationError, TopologyError};
use crate::math::{Point3, Vector3};
use crate::operations::migration::RESOLUTION_SCHEMA_VERSION;
use crate::operations::query::length::{approximate_length, segment_length, total_length};

use super::anchor::{AnchorId, AnchorPoint, HandleStyle};
use super::curve::Segment;

/// Default sampling density, in samples per unit of curve length.
pub const DEFAULT_RESOLUTION: f64 = 10.0;

/// A piecewise Bézier curve through an ordered sequence of anchors.
///
/// Anchors are owned by an internal arena and addressed by [`AnchorId`];
/// their order in the curve defines segment adjacency. A closed curve has
/// an extra segment from the last anchor back to the first.
///
/// The total length is cached. Every mutation goes through a method that
/// invalidates the cache, and the next [`length`](Self::length) call
/// recomputes it. The cache uses interior mutability, so a curve can be
/// moved between threads but not shared between them.
#[derive(Debug, Clone)]
pub struct BezierCurve {
    anchors: SlotMap<AnchorId, AnchorPoint>,
    order: Vec<AnchorId>,
    closed: bool,
    resolution: f64,
    length_cache: Cell<Option<f64>>,
    resolution_schema: u32,
}

impl Default for BezierCurve {
    fn default() -> Self {
        Self {
            anchors: SlotMap::with_key(),
            order: Vec::new(),
            closed: false,
            resolution: DEFAULT_RESOLUTION,
            length_cache: Cell::new(None),
            resolution_schema: RESOLUTION_SCHEMA_VERSION,
        }
    }
}

impl BezierCurve {
    /// Creates an empty open curve at the default resolution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a curve from anchors in order.
    #[must_use]
    pub fn from_anchors(anchors: impl IntoIterator<Item = AnchorPoint>, closed: bool) -> Self {
        let mut curve = Self::new();
        for anchor in anchors {
            curve.add_point(anchor);
        }
        curve.closed = closed;
        curve
    }

    /// Creates a curve of handle-less anchors through `points`.
    #[must_use]
    pub fn polyline(points: &[Point3], closed: bool) -> Self {
        Self::from_anchors(points.iter().copied().map(AnchorPoint::new), closed)
    }

    // --- Anchor structure ---

    /// Appends an anchor and returns its ID.
    pub fn add_point(&mut self, anchor: AnchorPoint) -> AnchorId {
        let id = self.anchors.insert(anchor);
        self.order.push(id);
        self.invalidate();
        id
    }

    /// Inserts an anchor at `index` in curve order.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is greater than the anchor count.
    pub fn insert_point(&mut self, index: usize, anchor: AnchorPoint) -> Result<AnchorId> {
        if index > self.order.len() {
            return Err(TopologyError::IndexOutOfBounds {
                index,
                len: self.order.len(),
            }
            .into());
        }
        let id = self.anchors.insert(anchor);
        self.order.insert(index, id);
        self.invalidate();
        Ok(id)
    }

    /// Removes an anchor and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchor does not belong to this curve.
    pub fn remove_point(&mut self, id: AnchorId) -> Result<AnchorPoint> {
        let anchor = self.anchors.remove(id).ok_or(TopologyError::AnchorNotFound)?;
        self.order.retain(|&other| other != id);
        self.invalidate();
        Ok(anchor)
    }

    /// Returns the anchor with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchor does not belong to this curve.
    pub fn anchor(&self, id: AnchorId) -> Result<&AnchorPoint> {
        Ok(self.anchors.get(id).ok_or(TopologyError::AnchorNotFound)?)
    }

    /// Returns the anchor at `index` in curve order.
    #[must_use]
    pub fn anchor_at(&self, index: usize) -> Option<&AnchorPoint> {
        self.order.get(index).and_then(|&id| self.anchors.get(id))
    }

    /// Returns the anchor IDs in curve order.
    #[must_use]
    pub fn anchor_ids(&self) -> &[AnchorId] {
        &self.order
    }

    /// Iterates over the anchors in curve order.
    pub fn anchors(&self) -> impl Iterator<Item = &AnchorPoint> + '_ {
        self.order.iter().filter_map(|&id| self.anchors.get(id))
    }

    /// Returns the position of `id` in curve order.
    #[must_use]
    pub fn index_of(&self, id: AnchorId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }

    /// Returns the number of anchors.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.order.len()
    }

    // --- Anchor geometry ---

    /// Applies `edit` to an anchor and invalidates the cached length.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchor does not belong to this curve.
    pub fn modify_anchor(&mut self, id: AnchorId, edit: impl FnOnce(&mut AnchorPoint)) -> Result<()> {
        let anchor = self.anchors.get_mut(id).ok_or(TopologyError::AnchorNotFound)?;
        edit(anchor);
        self.invalidate();
        Ok(())
    }

    /// Moves an anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchor does not belong to this curve.
    pub fn set_position(&mut self, id: AnchorId, position: Point3) -> Result<()> {
        self.modify_anchor(id, |a| a.set_position(position))
    }

    /// Sets the incoming handle of an anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchor does not belong to this curve.
    pub fn set_handle1(&mut self, id: AnchorId, handle: Vector3) -> Result<()> {
        self.modify_anchor(id, |a| a.set_handle1(handle))
    }

    /// Sets the outgoing handle of an anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchor does not belong to this curve.
    pub fn set_handle2(&mut self, id: AnchorId, handle: Vector3) -> Result<()> {
        self.modify_anchor(id, |a| a.set_handle2(handle))
    }

    /// Changes the handle style of an anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchor does not belong to this curve.
    pub fn set_handle_style(&mut self, id: AnchorId, style: HandleStyle) -> Result<()> {
        self.modify_anchor(id, |a| a.set_style(style))
    }

    // --- Curve flags ---

    /// Returns whether the curve is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Opens or closes the curve.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
        self.invalidate();
    }

    /// Returns the sampling density in samples per unit length.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Sets the sampling density in samples per unit length.
    ///
    /// # Errors
    ///
    /// Returns an error if `resolution` is not a positive finite number.
    pub fn set_resolution(&mut self, resolution: f64) -> Result<()> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(TessellationError::InvalidParameters(format!(
                "resolution must be positive, got {resolution}"
            ))
            .into());
        }
        self.resolution = resolution;
        self.invalidate();
        Ok(())
    }

    /// Schema version of the stored resolution value.
    #[must_use]
    pub fn resolution_schema_version(&self) -> u32 {
        self.resolution_schema
    }

    /// Records the schema version of the stored resolution value.
    ///
    /// Loaders set this to the persisted version before running
    /// [`MigrateResolution`](crate::operations::MigrateResolution).
    pub fn set_resolution_schema_version(&mut self, version: u32) {
        self.resolution_schema = version;
    }

    // --- Segments ---

    /// Checks that the curve has enough anchors to be evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidCurveTopology`] for fewer than 2 anchors.
    pub fn validate(&self) -> Result<()> {
        if self.order.len() < 2 {
            return Err(TopologyError::InvalidCurveTopology {
                points: self.order.len(),
                closed: self.closed,
            }
            .into());
        }
        Ok(())
    }

    /// Number of segments, including the closing one.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        match self.order.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Returns the segment starting at anchor `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a valid segment index.
    pub fn segment(&self, index: usize) -> Result<Segment> {
        let count = self.segment_count();
        if index >= count {
            return Err(TopologyError::IndexOutOfBounds { index, len: count }.into());
        }
        let from = self.anchor(self.order[index])?;
        let to = self.anchor(self.order[(index + 1) % self.order.len()])?;
        Ok(Segment::between(from, to))
    }

    /// Returns all segments in curve order.
    ///
    /// # Errors
    ///
    /// Returns an error if an anchor ID is dangling.
    pub fn segments(&self) -> Result<Vec<Segment>> {
        (0..self.segment_count()).map(|i| self.segment(i)).collect()
    }

    // --- Length ---

    /// Returns whether the cached length is stale.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.length_cache.get().is_none()
    }

    /// Returns the cached length without recomputing it.
    #[must_use]
    pub fn cached_length(&self) -> Option<f64> {
        self.length_cache.get()
    }

    /// Returns the total curve length, recomputing it if the cache is stale.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than 2 anchors.
    pub fn length(&self) -> Result<f64> {
        if let Some(length) = self.length_cache.get() {
            return Ok(length);
        }
        self.recompute_length()
    }

    /// Recomputes and caches the total curve length.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than 2 anchors.
    pub fn recompute_length(&self) -> Result<f64> {
        self.validate()?;
        let length = total_length(self)?;
        self.length_cache.set(Some(length));
        Ok(length)
    }

    /// Length of one segment at the curve's resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a valid segment index.
    pub fn segment_length(&self, index: usize) -> Result<f64> {
        segment_length(&self.segment(index)?, self.resolution)
    }

    /// Shortest segment length, each probed with a fixed sample count.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has fewer than 2 anchors.
    pub fn shortest_segment_length(&self, probe_samples: usize) -> Result<f64> {
        self.validate()?;
        let mut shortest = f64::INFINITY;
        for segment in self.segments()? {
            shortest = shortest.min(approximate_length(&segment, probe_samples)?);
        }
        Ok(shortest)
    }

    fn invalidate(&self) {
        self.length_cache.set(None);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn collinear() -> BezierCurve {
        BezierCurve::polyline(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            ],
            false,
        )
    }

    #[test]
    fn segment_counts() {
        let mut curve = collinear();
        assert_eq!(curve.segment_count(), 2);
        curve.set_closed(true);
        assert_eq!(curve.segment_count(), 3);
        assert_eq!(BezierCurve::new().segment_count(), 0);
    }

    #[test]
    fn closing_segment_wraps_to_first_anchor() {
        let mut curve = collinear();
        curve.set_closed(true);
        let closing = curve.segment(2).unwrap();
        assert_eq!(*closing.start(), Point3::new(2.0, 0.0, 0.0));
        assert_eq!(*closing.end(), Point3::new(0.0, 0.0, 0.0));
        assert!(curve.segment(3).is_err());
    }

    #[test]
    fn too_few_points_is_rejected() {
        let curve = BezierCurve::polyline(&[Point3::origin()], true);
        assert!(curve.validate().is_err());
        assert!(curve.length().is_err());
    }

    #[test]
    fn length_is_cached_until_mutation() {
        let mut curve = collinear();
        assert!(curve.is_dirty());
        let len = curve.length().unwrap();
        assert!((len - 2.0).abs() < 1e-10);
        assert!(!curve.is_dirty());
        assert_eq!(curve.cached_length(), Some(len));

        let id = curve.anchor_ids()[2];
        curve.set_position(id, Point3::new(3.0, 0.0, 0.0)).unwrap();
        assert!(curve.is_dirty());
        assert!((curve.length().unwrap() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn every_mutation_marks_dirty() {
        let mut curve = collinear();
        let id = curve.anchor_ids()[1];
        let mutations: Vec<Box<dyn Fn(&mut BezierCurve)>> = vec![
            Box::new(|c: &mut BezierCurve| c.set_closed(true)),
            Box::new(|c: &mut BezierCurve| c.set_resolution(4.0).unwrap()),
            Box::new(move |c: &mut BezierCurve| c.set_handle1(id, Vector3::new(0.0, 1.0, 0.0)).unwrap()),
            Box::new(move |c: &mut BezierCurve| c.set_handle2(id, Vector3::new(0.0, 1.0, 0.0)).unwrap()),
            Box::new(move |c: &mut BezierCurve| c.set_handle_style(id, HandleStyle::Connected).unwrap()),
            Box::new(|c: &mut BezierCurve| {
                c.add_point(AnchorPoint::new(Point3::new(5.0, 0.0, 0.0)));
            }),
            Box::new(|c: &mut BezierCurve| {
                c.insert_point(0, AnchorPoint::new(Point3::new(-1.0, 0.0, 0.0))).unwrap();
            }),
        ];
        for mutate in mutations {
            curve.length().unwrap();
            assert!(!curve.is_dirty());
            mutate(&mut curve);
            assert!(curve.is_dirty());
        }
        curve.length().unwrap();
        curve.remove_point(id).unwrap();
        assert!(curve.is_dirty());
    }

    #[test]
    fn insert_and_remove_keep_order() {
        let mut curve = collinear();
        let inserted = curve
            .insert_point(1, AnchorPoint::new(Point3::new(0.5, 1.0, 0.0)))
            .unwrap();
        assert_eq!(curve.index_of(inserted), Some(1));
        assert_eq!(curve.point_count(), 4);
        assert!(curve.insert_point(9, AnchorPoint::new(Point3::origin())).is_err());

        let removed = curve.remove_point(inserted).unwrap();
        assert_eq!(*removed.position(), Point3::new(0.5, 1.0, 0.0));
        assert_eq!(curve.index_of(inserted), None);
        assert!(curve.remove_point(inserted).is_err());
        assert!((curve.anchor_at(1).unwrap().position().x - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn closed_length_adds_closing_segment() {
        let open = BezierCurve::polyline(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(3.0, 4.0, 0.0),
            ],
            false,
        );
        let mut closed = open.clone();
        closed.set_closed(true);
        let closing = closed.segment_length(2).unwrap();
        let diff = closed.length().unwrap() - (open.length().unwrap() + closing);
        assert!(diff.abs() < 1e-10, "diff={diff}");
        assert!((closing - 5.0).abs() < 1e-10);
    }

    #[test]
    fn invalid_resolution_is_rejected() {
        let mut curve = collinear();
        assert!(curve.set_resolution(0.0).is_err());
        assert!(curve.set_resolution(-3.0).is_err());
        assert!(curve.set_resolution(f64::NAN).is_err());
        assert!((curve.resolution() - DEFAULT_RESOLUTION).abs() < f64::EPSILON);
    }

    #[test]
    fn shortest_segment() {
        let curve = BezierCurve::polyline(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
                Point3::new(4.0, 1.5, 0.0),
            ],
            false,
        );
        assert!((curve.shortest_segment_length(5).unwrap() - 1.5).abs() < 1e-10);
    }
}
