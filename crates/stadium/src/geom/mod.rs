//! Planar primitives and the section reference frame.
//!
//! Purpose
//! - Keep every solver computation in abstract 2D section coordinates
//!   (`Pt2`, `Vec2`), with the point of focus as the sightline target.
//! - `Plane` carries the 3D orientation a section is later placed in; the
//!   solver never mutates it.
//!
//! Code cross-refs: `SolverCfg` (tolerances), `section::Section`.

mod cfg;
mod types;

pub use cfg::SolverCfg;
pub use types::{Plane, Pt2, Pt3, Vec2, Vec3};

/// Point at coordinates `(x, y)`.
#[inline]
pub fn pt2(x: f64, y: f64) -> Pt2 {
    Pt2::new(x, y)
}

/// Vector with components `(x, y)`.
#[inline]
pub fn vec2(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn point_minus_point_is_vector() {
        let a = pt2(3.0, 4.0);
        let b = pt2(0.0, 0.0);
        let v: Vec2 = b - a;
        assert_eq!(v, vector![-3.0, -4.0]);
        assert!((v.norm() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn point_plus_vector_offsets() {
        let p = pt2(1.0, 1.0) + vec2(0.5, -2.0);
        assert!((p.x - 1.5).abs() < 1e-12 && (p.y + 1.0).abs() < 1e-12);
    }
}
