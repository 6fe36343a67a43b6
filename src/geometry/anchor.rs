use crate::math::{Point3, Vector3};

slotmap::new_key_type! {
    /// Unique identifier for an anchor owned by a [`BezierCurve`](super::BezierCurve).
    pub struct AnchorId;
}

/// How the two handles of an anchor relate to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HandleStyle {
    /// No handles: both offsets are zero and the curve passes straight through.
    #[default]
    None,
    /// Handles move independently.
    Free,
    /// `handle2 == -handle1`, keeping the tangent continuous.
    Connected,
}

/// A point the curve passes through, with two tangent handles.
///
/// `handle1` shapes the segment arriving at the anchor and `handle2` the
/// segment leaving it. Both are offsets relative to the position. The
/// mutators keep the handles consistent with the [`HandleStyle`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorPoint {
    position: Point3,
    handle1: Vector3,
    handle2: Vector3,
    style: HandleStyle,
}

impl AnchorPoint {
    /// Creates an anchor without handles.
    #[must_use]
    pub fn new(position: Point3) -> Self {
        Self {
            position,
            handle1: Vector3::zeros(),
            handle2: Vector3::zeros(),
            style: HandleStyle::None,
        }
    }

    /// Creates an anchor with independent handles.
    #[must_use]
    pub fn free(position: Point3, handle1: Vector3, handle2: Vector3) -> Self {
        Self {
            position,
            handle1,
            handle2,
            style: HandleStyle::Free,
        }
    }

    /// Creates an anchor whose outgoing handle mirrors `handle1`.
    #[must_use]
    pub fn connected(position: Point3, handle1: Vector3) -> Self {
        Self {
            position,
            handle1,
            handle2: -handle1,
            style: HandleStyle::Connected,
        }
    }

    /// Returns the position.
    #[must_use]
    pub fn position(&self) -> &Point3 {
        &self.position
    }

    /// Returns the incoming handle offset.
    #[must_use]
    pub fn handle1(&self) -> &Vector3 {
        &self.handle1
    }

    /// Returns the outgoing handle offset.
    #[must_use]
    pub fn handle2(&self) -> &Vector3 {
        &self.handle2
    }

    /// Returns the handle style.
    #[must_use]
    pub fn style(&self) -> HandleStyle {
        self.style
    }

    /// Absolute position of the incoming handle.
    #[must_use]
    pub fn handle1_position(&self) -> Point3 {
        self.position + self.handle1
    }

    /// Absolute position of the outgoing handle.
    #[must_use]
    pub fn handle2_position(&self) -> Point3 {
        self.position + self.handle2
    }

    /// Moves the anchor. Handles follow since they are relative.
    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    /// Sets the incoming handle offset.
    ///
    /// A `None` anchor becomes `Free`; a `Connected` anchor mirrors the
    /// value into `handle2`.
    pub fn set_handle1(&mut self, handle: Vector3) {
        self.promote_from_none();
        self.handle1 = handle;
        if self.style == HandleStyle::Connected {
            self.handle2 = -handle;
        }
    }

    /// Sets the outgoing handle offset.
    ///
    /// A `None` anchor becomes `Free`; a `Connected` anchor mirrors the
    /// value into `handle1`.
    pub fn set_handle2(&mut self, handle: Vector3) {
        self.promote_from_none();
        self.handle2 = handle;
        if self.style == HandleStyle::Connected {
            self.handle1 = -handle;
        }
    }

    /// Changes the handle style and re-establishes its invariant.
    ///
    /// Switching to `Connected` keeps `handle1` and mirrors it; switching
    /// to `None` clears both handles.
    pub fn set_style(&mut self, style: HandleStyle) {
        self.style = style;
        match style {
            HandleStyle::None => {
                self.handle1 = Vector3::zeros();
                self.handle2 = Vector3::zeros();
            }
            HandleStyle::Connected => self.handle2 = -self.handle1,
            HandleStyle::Free => {}
        }
    }

    fn promote_from_none(&mut self) {
        if self.style == HandleStyle::None {
            self.style = HandleStyle::Free;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_anchor_has_no_handles() {
        let a = AnchorPoint::new(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(a.style(), HandleStyle::None);
        assert_eq!(a.handle1_position(), *a.position());
        assert_eq!(a.handle2_position(), *a.position());
    }

    #[test]
    fn connected_mirrors_either_handle() {
        let mut a = AnchorPoint::connected(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(*a.handle2(), Vector3::new(-1.0, 0.0, 0.0));

        a.set_handle2(Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(*a.handle1(), Vector3::new(0.0, -2.0, 0.0));

        a.set_handle1(Vector3::new(3.0, 0.0, 1.0));
        assert_eq!(*a.handle2(), Vector3::new(-3.0, 0.0, -1.0));
    }

    #[test]
    fn free_handles_are_independent() {
        let mut a = AnchorPoint::free(
            Point3::origin(),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        a.set_handle1(Vector3::new(5.0, 0.0, 0.0));
        assert_eq!(*a.handle2(), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn setting_a_handle_on_none_promotes_to_free() {
        let mut a = AnchorPoint::new(Point3::origin());
        a.set_handle2(Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(a.style(), HandleStyle::Free);
        assert_eq!(*a.handle1(), Vector3::zeros());
    }

    #[test]
    fn style_changes_restore_invariants() {
        let mut a = AnchorPoint::free(
            Point3::origin(),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(4.0, 0.0, 0.0),
        );
        a.set_style(HandleStyle::Connected);
        assert_eq!(*a.handle2(), Vector3::new(-1.0, -1.0, 0.0));

        a.set_style(HandleStyle::None);
        assert_eq!(*a.handle1(), Vector3::zeros());
        assert_eq!(*a.handle2(), Vector3::zeros());
    }

    #[test]
    fn handles_follow_position() {
        let mut a = AnchorPoint::connected(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        a.set_position(Point3::new(0.0, 5.0, 0.0));
        assert_eq!(a.handle1_position(), Point3::new(1.0, 5.0, 0.0));
    }
}
