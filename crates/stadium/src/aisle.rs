//! Aisle stair profile alongside each seating riser.
//!
//! A riser no taller than the step height is walked as one step. Taller
//! risers get `n = floor(height / step_height)` intermediate treads of
//! `step_width`, ending at the riser top; the rise is split into `n + 1`
//! equal increments.

use serde::{Deserialize, Serialize};

use crate::geom::Pt2;

/// Step limits for aisle treads.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AisleStep {
    pub height: f64,
    pub width: f64,
}

/// Number of intermediate treads for a riser of `riser_height`.
#[inline]
pub fn step_count(riser_height: f64, step: AisleStep) -> usize {
    if riser_height <= step.height {
        0
    } else {
        (riser_height / step.height).floor() as usize
    }
}

/// Append `p` unless it repeats the last point.
#[inline]
pub fn push_distinct(out: &mut Vec<Pt2>, p: Pt2) {
    if out.last() != Some(&p) {
        out.push(p);
    }
}

/// Append the aisle profile of one row: tread start, then the stair up the
/// riser ending at `riser_top`. Consecutive equal points are written once.
pub fn push_steps(
    out: &mut Vec<Pt2>,
    row_start: Pt2,
    riser_top: Pt2,
    riser_height: f64,
    step: AisleStep,
) {
    push_distinct(out, row_start);
    let bottom_y = riser_top.y - riser_height;
    let n = step_count(riser_height, step);
    if n == 0 {
        push_distinct(out, Pt2::new(riser_top.x, bottom_y));
    } else {
        let rise = riser_height / (n + 1) as f64;
        let mut p = Pt2::new(riser_top.x - step.width * n as f64, bottom_y);
        push_distinct(out, p);
        for _ in 0..n {
            p.y += rise;
            push_distinct(out, p);
            p.x += step.width;
            push_distinct(out, p);
        }
    }
    push_distinct(out, riser_top);
}
