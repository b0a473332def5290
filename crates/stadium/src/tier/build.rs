//! Row point generation for one tier.
//!
//! ```text
//!                ptC---
//!                 |
//!                 | riser
//!       row width |
//!   ptA----------ptB
//! ```
//!
//! Rows are processed in ascending order; each riser depends on the previous
//! row's top point and each spectator on the one in front of it.

use serde::Serialize;

use super::cfg::TierCfg;
use super::state::RowState;
use crate::aisle::{self, AisleStep};
use crate::error::BowlError;
use crate::geom::{Plane, Pt2, SolverCfg};
use crate::solver::solve_riser;
use crate::spectator::{self, EyeOffsets, Forward, PlaceCtx, Spectator};

/// Section-level inputs for building one tier.
#[derive(Clone, Copy, Debug)]
pub struct BuildCtx {
    pub section_index: usize,
    pub plane: Plane,
    pub pof: Pt2,
    pub solver: SolverCfg,
}

/// A computed seating tier.
///
/// Invariants:
/// - `points.len() == cfg.expected_point_count()`.
/// - `riser_heights.len() == cfg.row_count - 1`, `spectators.len() == cfg.row_count`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tier {
    pub cfg: TierCfg,
    pub section_index: usize,
    pub plane: Plane,
    /// Resolved anchor (own start, or the previous tier's last point).
    pub start_pt: Pt2,
    pub points: Vec<Pt2>,
    pub riser_heights: Vec<f64>,
    pub spectators: Vec<Spectator>,
    pub aisle_points: Vec<Pt2>,
}

impl Tier {
    /// Build a tier. `previous_last` is the last profile point of the tier
    /// in front, if any.
    pub fn build(
        cfg: TierCfg,
        ctx: &BuildCtx,
        previous_last: Option<Pt2>,
    ) -> Result<Self, BowlError> {
        let idx = ctx.section_index;
        cfg.validate(idx)?;
        let start_pt = if cfg.build_from_previous_tier {
            previous_last.ok_or(BowlError::MissingPredecessor { tier: idx })?
        } else {
            cfg.start_pt
        };
        tracing::debug!(
            tier = idx,
            rows = cfg.row_count,
            chained = cfg.build_from_previous_tier,
            "building tier"
        );

        let rows = RowPoints::run(&cfg, ctx, start_pt)?;
        Ok(Self {
            cfg,
            section_index: idx,
            plane: ctx.plane,
            start_pt,
            points: rows.points,
            riser_heights: rows.risers,
            spectators: rows.spectators,
            aisle_points: rows.aisle,
        })
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.cfg.row_count
    }

    /// Last profile point; the anchor of a tier built on top of this one.
    #[inline]
    pub fn last_point(&self) -> Option<Pt2> {
        self.points.last().copied()
    }

    /// Top point of each riser, in row order.
    pub fn riser_tops(&self) -> Vec<Pt2> {
        self.row_indices()
            .into_iter()
            .filter_map(|(_, top)| top.and_then(|i| self.points.get(i).copied()))
            .collect()
    }

    /// Rear end of each row's tread (the point its spectator is placed from).
    pub fn tread_ends(&self) -> Vec<Pt2> {
        self.row_indices()
            .into_iter()
            .filter_map(|(end, _)| self.points.get(end).copied())
            .collect()
    }

    /// Profile indices of each row's tread end and, for all but the last
    /// row, its riser top.
    fn row_indices(&self) -> Vec<(usize, Option<usize>)> {
        let mut out = Vec::with_capacity(self.row_count());
        let mut p = self.cfg.fascia.as_ref().map_or(0, |f| f.emitted()) + 1;
        for row in 0..self.riser_heights.len() {
            let state = self.cfg.row_state(row);
            let curb = self
                .cfg
                .super_riser
                .as_ref()
                .map_or(0, |sr| state.curb_points(sr));
            out.push((p, Some(p + curb + 1)));
            p += curb + 2 + state.guardrail_points();
        }
        out.push((p, None));
        out
    }
}

/// Profile buffer sized to the exact expected point count.
struct ProfileBuf {
    tier: usize,
    capacity: usize,
    pts: Vec<Pt2>,
}

impl ProfileBuf {
    fn new(tier: usize, capacity: usize) -> Self {
        Self {
            tier,
            capacity,
            pts: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, p: Pt2) -> Result<(), BowlError> {
        if self.pts.len() >= self.capacity {
            return Err(self.defect(self.pts.len() + 1));
        }
        self.pts.push(p);
        Ok(())
    }

    fn get(&self, i: usize) -> Option<Pt2> {
        self.pts.get(i).copied()
    }

    fn finish(self) -> Result<Vec<Pt2>, BowlError> {
        if self.pts.len() != self.capacity {
            return Err(self.defect(self.pts.len()));
        }
        Ok(self.pts)
    }

    fn defect(&self, written: usize) -> BowlError {
        tracing::error!(
            tier = self.tier,
            capacity = self.capacity,
            written,
            "profile buffer sizing defect"
        );
        BowlError::SizingDefect {
            tier: self.tier,
            capacity: self.capacity,
            written,
        }
    }
}

struct RowPoints {
    points: Vec<Pt2>,
    risers: Vec<f64>,
    spectators: Vec<Spectator>,
    aisle: Vec<Pt2>,
}

impl RowPoints {
    fn run(cfg: &TierCfg, ctx: &BuildCtx, start_pt: Pt2) -> Result<Self, BowlError> {
        let idx = ctx.section_index;
        let last = cfg.row_count - 1;
        let sr = cfg.super_riser.as_ref();
        let place_ctx = PlaceCtx {
            section_index: idx,
            pof: ctx.pof,
            separation: cfg.spec_separation,
            eps: ctx.solver.eps_degenerate * cfg.spectator.unit,
        };
        let step = AisleStep {
            height: cfg.aisle_step_height,
            width: cfg.aisle_step_width,
        };

        let mut pts = ProfileBuf::new(idx, cfg.expected_point_count());
        let mut risers = Vec::with_capacity(last);
        let mut spectators: Vec<Spectator> = Vec::with_capacity(cfg.row_count);
        let mut aisle = Vec::new();

        let mut pt_a = Pt2::new(start_pt.x + cfg.start_x, start_pt.y + cfg.start_y);

        // fascia, outermost point first
        let mut first_forward = 0;
        if let Some(f) = cfg.fascia.as_ref().filter(|f| !f.points.is_empty()) {
            let len = f.emitted();
            for i in 0..len {
                pts.push(pt_a + f.points[len - i])?;
            }
            first_forward = len - f.blocker;
        }
        pts.push(pt_a)?;
        let first_forward = pts
            .get(first_forward)
            .ok_or_else(|| BowlError::config(idx, "fascia blocker outside profile"))?;

        let offsets_for = |row: usize| -> EyeOffsets {
            match (RowState::of(sr, row).uses_super_eyes(), sr) {
                (true, Some(sr)) => sr.eye_offsets(),
                _ => cfg.spectator.eye_offsets(),
            }
        };
        let forward_for = |spectators: &[Spectator], row: usize| -> Forward {
            match row.checked_sub(1).and_then(|r| spectators.get(r)) {
                Some(prev) => Forward {
                    seated: prev.loc,
                    standing: prev.loc_standing,
                },
                None => Forward::point(first_forward),
            }
        };

        for row in 0..last {
            let state = cfg.row_state(row);

            let mut pt_b = Pt2::new(pt_a.x + cfg.row_widths[row], pt_a.y);
            pts.push(pt_b)?;
            let forward = forward_for(&spectators, row);
            spectators.push(spectator::place(&place_ctx, row, pt_b, offsets_for(row), forward));

            if let (RowState::PreSuperRiser, Some(sr)) = (state, sr) {
                let (curb_w, curb_h) = sr.curb();
                if curb_w > 0.0 {
                    if curb_h > 0.0 {
                        pt_b.y += curb_h;
                        pts.push(pt_b)?;
                    }
                    pt_b.x += curb_w;
                    pts.push(pt_b)?;
                }
            }

            let solve = solve_riser(cfg, idx, pt_b, row, ctx.pof, ctx.solver)?;
            risers.push(solve.height);
            let mut pt_c = Pt2::new(pt_b.x, pt_b.y + solve.height);
            pts.push(pt_c)?;

            aisle::push_steps(&mut aisle, pt_a, pt_c, solve.height, step);

            if let (RowState::SuperRiser, Some(sr)) = (state, sr) {
                pt_c.x += sr.guardrail_width;
                pts.push(pt_c)?;
                pt_c.y -= 0.5 * cfg.spectator.unit;
                pts.push(pt_c)?;
            }

            pt_a = pt_c;
        }

        aisle::push_distinct(&mut aisle, pt_a);
        pt_a.x += cfg.row_widths[last];
        pts.push(pt_a)?;
        aisle::push_distinct(&mut aisle, pt_a);
        let forward = forward_for(&spectators, last);
        spectators.push(spectator::place(&place_ctx, last, pt_a, offsets_for(last), forward));

        Ok(Self {
            points: pts.finish()?,
            risers,
            spectators,
            aisle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_buf_rejects_overflow() {
        let mut buf = ProfileBuf::new(4, 2);
        buf.push(Pt2::origin()).unwrap();
        buf.push(Pt2::new(1.0, 0.0)).unwrap();
        let err = buf.push(Pt2::new(2.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            BowlError::SizingDefect {
                tier: 4,
                capacity: 2,
                written: 3
            }
        );
    }

    #[test]
    fn profile_buf_rejects_underfill() {
        let mut buf = ProfileBuf::new(0, 3);
        buf.push(Pt2::origin()).unwrap();
        assert!(matches!(
            buf.finish(),
            Err(BowlError::SizingDefect { written: 1, .. })
        ));
    }
}
