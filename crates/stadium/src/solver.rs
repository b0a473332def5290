//! Riser-height solve: smallest riser giving the next row its target C-value.
//!
//! Derivation (triangle proportionality, point of focus at `O`)
//! - `t`: horizontal distance between the current and the next row's eye.
//! - `h`: current eye height above `O`.
//! - `d`: horizontal distance from `O` to the next row's eye.
//! - The next eye must sit at height `r` such that the line from it to `O`
//!   passes `c + h` at the current eye, so `r = (c + h) / (d - t) * d`.
//! - The riser is `r` minus the next eye offset and the riser bottom height.
//!
//! Constraints are applied in order: rake clamp `tan(max_rake) * t` (skipped
//! next to the super riser), non-negativity, then ceiling rounding to
//! `round_to`. A clamped riser can fall short of the target C-value.
//! Risers taller than `max_riser_units * unit` are degenerate.

use serde::Serialize;

use crate::error::BowlError;
use crate::geom::{Pt2, SolverCfg, Vec2};
use crate::tier::{RowState, TierCfg};

/// Outcome of one riser solve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RiserSolve {
    /// Unconstrained solution.
    pub raw: f64,
    /// Rake limit, if this row is subject to it.
    pub limit: Option<f64>,
    pub clamped: bool,
    /// Height after clamp, before rounding.
    pub unrounded: f64,
    pub height: f64,
}

/// Solve riser `row` of `tier`, whose bottom (after any curb) is `pt_b`.
pub fn solve_riser(
    tier: &TierCfg,
    tier_index: usize,
    pt_b: Pt2,
    row: usize,
    pof: Pt2,
    cfg: SolverCfg,
) -> Result<RiserSolve, BowlError> {
    let sp = &tier.spectator;
    let state = tier.row_state(row);
    let next_width = tier.row_widths.get(row + 1).copied().ok_or_else(|| {
        BowlError::config(tier_index, format!("no row behind riser {row}"))
    })?;

    let mut b = Pt2::from(pt_b - pof);
    let mut riser = 0.0;
    let mut cur = Vec2::new(sp.eye_x, sp.eye_y);
    let mut next = cur;
    let mut next_width = next_width;

    match (state, tier.super_riser.as_ref()) {
        (RowState::PreSuperRiser, Some(sr)) => {
            let (curb_w, curb_h) = sr.curb();
            riser -= curb_h;
            b.x -= curb_w;
            b.y -= curb_h;
            cur = Vec2::new(sp.s_eye_x, sp.s_eye_y);
            next = Vec2::new(sr.eye_x - curb_w, sr.eye_y);
        }
        (RowState::SuperRiser, Some(sr)) => {
            next_width += sr.guardrail_width;
            cur = Vec2::new(sr.eye_x, sr.eye_y);
            riser += 0.5 * sp.unit;
        }
        _ => {}
    }

    let t = next_width + cur.x - next.x;
    let h = b.y + cur.y;
    let d = (b.x - cur.x) + t;
    if t < 0.0 || d < 0.0 {
        return Err(BowlError::config(
            tier_index,
            format!("row {row}: inverted sightline triangle (t = {t}, d = {d})"),
        ));
    }
    let base = d - t;
    if base <= cfg.eps_degenerate * sp.unit {
        return Err(BowlError::degenerate(
            tier_index,
            row,
            format!("forward eye at {base} from point of focus"),
        ));
    }

    let r = (sp.target_c() + h) / base * d;
    let raw = riser + r - next.y - b.y;
    if !raw.is_finite() {
        return Err(BowlError::degenerate(tier_index, row, format!("riser solve gave {raw}")));
    }

    let limit = state.clamps_rake().then(|| tier.max_rake_angle.tan() * t);
    let mut unrounded = raw;
    let mut clamped = false;
    if let Some(lim) = limit {
        if unrounded > lim {
            unrounded = lim;
            clamped = true;
        }
    }
    unrounded = unrounded.max(0.0);
    let max_riser = cfg.max_riser_units * sp.unit;
    if unrounded > max_riser {
        return Err(BowlError::degenerate(
            tier_index,
            row,
            format!("riser {unrounded} exceeds {max_riser}; eye too close to point of focus"),
        ));
    }
    let height = round_up(unrounded, tier.round_to, cfg.eps_round);

    tracing::trace!(
        tier = tier_index,
        row,
        ?state,
        raw,
        clamped,
        height,
        "riser solve"
    );
    Ok(RiserSolve {
        raw,
        limit,
        clamped,
        unrounded,
        height,
    })
}

/// Round `h` up to the next multiple of `step`; `step <= 0` leaves it as is.
/// Quotients within `slack` above a whole multiple round down to it.
#[inline]
pub fn round_up(h: f64, step: f64, slack: f64) -> f64 {
    if step > 0.0 {
        (h / step - slack).ceil() * step
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::SuperRiser;

    fn cfg3() -> TierCfg {
        TierCfg {
            round_to: 10.0,
            max_rake_angle: 35f64.to_radians(),
            ..TierCfg::uniform(3, 800.0)
        }
    }

    #[test]
    fn round_up_ceil_multiple() {
        assert_eq!(round_up(561.2, 10.0, 0.0), 570.0);
        assert_eq!(round_up(560.0, 10.0, 0.0), 560.0);
        assert_eq!(round_up(12.34, 0.0, 0.0), 12.34);
        // float noise just above a multiple stays on it
        assert_eq!(round_up(560.000_000_000_1, 10.0, 1e-9), 560.0);
    }

    #[test]
    fn unclamped_solution_meets_target() {
        // far from the point of focus the riser is small and unclamped
        let tier = TierCfg {
            round_to: 0.0,
            ..cfg3()
        };
        let pt_b = Pt2::new(20_800.0, 0.0);
        let s = solve_riser(&tier, 0, pt_b, 0, Pt2::origin(), SolverCfg::default()).unwrap();
        assert!(!s.clamped);
        // next eye y = riser + eye_y; line to origin at current eye x
        let cur = Pt2::new(pt_b.x - 500.0, 1200.0);
        let next = Pt2::new(pt_b.x + 800.0 - 500.0, s.height + 1200.0);
        let line_y = next.y * cur.x / next.x;
        assert!((line_y - cur.y - 90.0).abs() < 1e-6);
    }

    #[test]
    fn near_focus_is_clamped_then_rounded() {
        let tier = cfg3();
        let s = solve_riser(&tier, 0, Pt2::new(800.0, 0.0), 0, Pt2::origin(), SolverCfg::default())
            .unwrap();
        // (90 + 1200) / 300 * 1100 - 1200
        assert!((s.raw - 3530.0).abs() < 1e-9);
        assert!(s.clamped);
        let lim = 35f64.to_radians().tan() * 800.0;
        assert!((s.unrounded - lim).abs() < 1e-9);
        assert_eq!(s.height, 570.0);
        assert!(s.height >= s.unrounded && s.height < lim + 10.0);
    }

    #[test]
    fn super_riser_rows_skip_clamp() {
        let tier = TierCfg {
            super_riser: Some(SuperRiser {
                row: 1,
                curb_width: 200.0,
                curb_height: 150.0,
                ..SuperRiser::default()
            }),
            ..cfg3()
        };
        let s0 = solve_riser(&tier, 0, Pt2::new(1000.0, 150.0), 0, Pt2::origin(), SolverCfg::default())
            .unwrap();
        assert!(s0.limit.is_none() && !s0.clamped);
        let s1 = solve_riser(&tier, 0, Pt2::new(1800.0, 800.0), 1, Pt2::origin(), SolverCfg::default())
            .unwrap();
        assert!(s1.limit.is_none());
    }

    #[test]
    fn degenerate_triangle_is_error() {
        // current eye exactly above the point of focus
        let tier = cfg3();
        let err = solve_riser(&tier, 2, Pt2::new(500.0, 0.0), 0, Pt2::origin(), SolverCfg::default())
            .unwrap_err();
        assert!(matches!(err, BowlError::GeometricDegeneracy { tier: 2, row: 0, .. }));
    }

    #[test]
    fn unclamped_super_riser_near_focus_is_degenerate() {
        // super riser at row 0: no rake clamp, eye 1e-3 past the focus
        let tier = TierCfg {
            super_riser: Some(SuperRiser::default()),
            ..cfg3()
        };
        let err = solve_riser(&tier, 1, Pt2::new(500.001, 0.0), 0, Pt2::origin(), SolverCfg::default())
            .unwrap_err();
        assert!(matches!(err, BowlError::GeometricDegeneracy { tier: 1, row: 0, .. }));
    }

    #[test]
    fn degeneracy_tolerance_scales_with_unit() {
        // 1e-4 clear of the focus is inside 1e-9 * unit for unit 1e6
        let mut tier = cfg3();
        tier.spectator.unit = 1.0e6;
        let pt_b = Pt2::new(500.0001, 0.0);
        let err = solve_riser(&tier, 0, pt_b, 0, Pt2::origin(), SolverCfg::default()).unwrap_err();
        assert!(matches!(err, BowlError::GeometricDegeneracy { .. }));
    }

    #[test]
    fn inverted_triangle_is_config_error() {
        // next eye offset larger than the row: t < 0
        let tier = TierCfg {
            row_widths: vec![800.0, 100.0, 800.0],
            spectator: crate::spectator::SpectatorParameters {
                eye_x: 500.0,
                ..Default::default()
            },
            super_riser: Some(SuperRiser {
                row: 1,
                eye_x: 900.0,
                ..SuperRiser::default()
            }),
            ..cfg3()
        };
        let err = solve_riser(&tier, 0, Pt2::new(5000.0, 0.0), 0, Pt2::origin(), SolverCfg::default())
            .unwrap_err();
        assert!(matches!(err, BowlError::InvalidConfiguration { .. }));
    }

    #[test]
    fn point_of_focus_shift_is_translation_invariant() {
        let tier = TierCfg {
            round_to: 0.0,
            ..cfg3()
        };
        let pof = Pt2::new(-300.0, 250.0);
        let a = solve_riser(&tier, 0, Pt2::new(9000.0, 400.0), 0, Pt2::origin(), SolverCfg::default())
            .unwrap();
        let b = solve_riser(
            &tier,
            0,
            Pt2::new(9000.0 + pof.x, 400.0 + pof.y),
            0,
            pof,
            SolverCfg::default(),
        )
        .unwrap();
        assert!((a.height - b.height).abs() < 1e-9);
    }
}
