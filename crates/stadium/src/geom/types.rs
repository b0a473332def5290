//! Value types: 2D points/vectors and the 3D section plane.

use nalgebra::{Point2, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Point in section coordinates (x away from the point of focus, y up).
pub type Pt2 = Point2<f64>;
/// Displacement in section coordinates.
pub type Vec2 = Vector2<f64>;
pub type Pt3 = Point3<f64>;
pub type Vec3 = Vector3<f64>;

/// Reference frame a section lives in: origin plus orthonormal in-plane axes.
///
/// Invariants:
/// - `x_axis` and `y_axis` are unit length and orthogonal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Pt3,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
}

impl Default for Plane {
    fn default() -> Self {
        Self::xy()
    }
}

impl Plane {
    /// World XY plane at the origin.
    #[inline]
    pub fn xy() -> Self {
        Self {
            origin: Pt3::origin(),
            x_axis: Vec3::x(),
            y_axis: Vec3::y(),
        }
    }

    /// Plane through `origin` spanned by `x_axis` and `y_axis`.
    ///
    /// `y_axis` is re-orthogonalised against `x_axis` (Gram-Schmidt). Returns
    /// `None` if the axes are zero or parallel.
    pub fn new(origin: Pt3, x_axis: Vec3, y_axis: Vec3) -> Option<Self> {
        let x = x_axis.try_normalize(1e-12)?;
        let y = (y_axis - x * x.dot(&y_axis)).try_normalize(1e-12)?;
        Some(Self {
            origin,
            x_axis: x,
            y_axis: y,
        })
    }

    /// Unit normal (`x_axis × y_axis`).
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.x_axis.cross(&self.y_axis)
    }

    /// Map a section point into world coordinates.
    #[inline]
    pub fn to_world(&self, p: &Pt2) -> Pt3 {
        self.origin + self.x_axis * p.x + self.y_axis * p.y
    }
}
