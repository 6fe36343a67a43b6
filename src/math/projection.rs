use super::{Point2, Point3, Vector2, Vector3};

/// Axis-aligned plane used to flatten 3D curve samples for arc fitting.
///
/// Projection drops one coordinate; [`ProjectionPlane::embed`] restores it
/// from a caller-supplied depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectionPlane {
    /// Drops Z.
    #[default]
    Xy,
    /// Drops Y.
    Xz,
    /// Drops X.
    Yz,
}

impl ProjectionPlane {
    /// Projects a 3D point onto the plane.
    #[must_use]
    pub fn project(self, p: &Point3) -> Point2 {
        match self {
            Self::Xy => Point2::new(p.x, p.y),
            Self::Xz => Point2::new(p.x, p.z),
            Self::Yz => Point2::new(p.y, p.z),
        }
    }

    /// Returns the coordinate that [`project`](Self::project) drops.
    #[must_use]
    pub fn depth(self, p: &Point3) -> f64 {
        match self {
            Self::Xy => p.z,
            Self::Xz => p.y,
            Self::Yz => p.x,
        }
    }

    /// Lifts a plane point back into 3D at the given depth.
    #[must_use]
    pub fn embed(self, p: &Point2, depth: f64) -> Point3 {
        match self {
            Self::Xy => Point3::new(p.x, p.y, depth),
            Self::Xz => Point3::new(p.x, depth, p.y),
            Self::Yz => Point3::new(depth, p.x, p.y),
        }
    }

    /// Lifts a plane direction back into 3D.
    #[must_use]
    pub fn embed_vector(self, v: &Vector2) -> Vector3 {
        match self {
            Self::Xy => Vector3::new(v.x, v.y, 0.0),
            Self::Xz => Vector3::new(v.x, 0.0, v.y),
            Self::Yz => Vector3::new(0.0, v.x, v.y),
        }
    }
}
