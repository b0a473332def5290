//! Section assembler: ordered tiers sharing one plane and one point of focus.
//!
//! Purpose
//! - Build every tier eagerly and in order; a tier marked
//!   `build_from_previous_tier` is anchored at the previous tier's last
//!   profile point.
//! - Expose read-only, tier-indexed collections of row-indexed results.
//!
//! Invariants
//! - `tiers[0]` is never chained.
//! - `tiers[i].section_index == i` and `tiers[i].plane == plane`.
//! - A `Section` only exists fully built; any error aborts construction.
//!
//! Code cross-refs: `tier::{Tier, TierCfg}`, `spectator::EyePosture`.

use serde::{Deserialize, Serialize};

use crate::error::BowlError;
use crate::geom::{Plane, Pt2, SolverCfg, Vec2};
use crate::spectator::{EyePosture, Spectator};
use crate::tier::{BuildCtx, Tier, TierCfg};

/// Serializable description of a whole section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionCfg {
    pub plane: Plane,
    pub pof: Pt2,
    pub solver: SolverCfg,
    pub tiers: Vec<TierCfg>,
}

impl Default for SectionCfg {
    fn default() -> Self {
        Self {
            plane: Plane::xy(),
            pof: Pt2::origin(),
            solver: SolverCfg::default(),
            tiers: Vec::new(),
        }
    }
}

impl SectionCfg {
    pub fn build(self) -> Result<Section, BowlError> {
        Section::with_solver_cfg(self.tiers, self.plane, self.pof, self.solver)
    }
}

/// A fully computed seating section. `Clone` is a deep copy.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section {
    pub plane: Plane,
    /// Point of focus, the target of every sightline.
    pub pof: Pt2,
    pub tiers: Vec<Tier>,
}

/// One row's results, flattened across tiers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RowRecord {
    pub tier: usize,
    pub row: usize,
    /// Riser behind this row; `None` for a tier's last row.
    pub riser_height: Option<f64>,
    pub eye: Pt2,
    pub eye_standing: Pt2,
    pub cvalue: f64,
    pub cvalue_standing: f64,
}

impl Section {
    /// Section in `plane`, with the point of focus at `pof`.
    pub fn new(tiers: Vec<TierCfg>, plane: Plane, pof: Pt2) -> Result<Self, BowlError> {
        Self::with_solver_cfg(tiers, plane, pof, SolverCfg::default())
    }

    /// Section in the world XY plane, focused on the origin.
    pub fn with_xy_plane(tiers: Vec<TierCfg>) -> Result<Self, BowlError> {
        Self::new(tiers, Plane::xy(), Pt2::origin())
    }

    pub fn with_solver_cfg(
        mut cfgs: Vec<TierCfg>,
        plane: Plane,
        pof: Pt2,
        solver: SolverCfg,
    ) -> Result<Self, BowlError> {
        let Some(first) = cfgs.first_mut() else {
            return Err(BowlError::config(0, "section has no tiers"));
        };
        first.build_from_previous_tier = false;

        let _span = tracing::debug_span!("section", tiers = cfgs.len()).entered();
        let mut tiers: Vec<Tier> = Vec::with_capacity(cfgs.len());
        for (section_index, cfg) in cfgs.into_iter().enumerate() {
            let ctx = BuildCtx {
                section_index,
                plane,
                pof,
                solver,
            };
            let previous_last = tiers.last().and_then(Tier::last_point);
            tiers.push(Tier::build(cfg, &ctx, previous_last)?);
        }
        tracing::debug!(
            tiers = tiers.len(),
            rows = tiers.iter().map(Tier::row_count).sum::<usize>(),
            "section built"
        );
        Ok(Self { plane, pof, tiers })
    }

    fn per_row<T>(&self, f: impl Fn(&Spectator) -> T) -> Vec<Vec<T>> {
        self.tiers
            .iter()
            .map(|t| t.spectators.iter().map(&f).collect())
            .collect()
    }

    /// Profile polyline of each tier.
    pub fn profile_points(&self) -> Vec<Vec<Pt2>> {
        self.tiers.iter().map(|t| t.points.clone()).collect()
    }

    pub fn cvalues(&self, posture: EyePosture) -> Vec<Vec<f64>> {
        self.per_row(|s| s.clearance(posture))
    }

    pub fn spectator_points(&self, posture: EyePosture) -> Vec<Vec<Pt2>> {
        self.per_row(|s| s.eye(posture))
    }

    pub fn sightlines(&self, posture: EyePosture) -> Vec<Vec<Vec2>> {
        self.per_row(|s| s.sightline(posture))
    }

    pub fn riser_heights(&self) -> Vec<Vec<f64>> {
        self.tiers.iter().map(|t| t.riser_heights.clone()).collect()
    }

    pub fn aisle_points(&self) -> Vec<Vec<Pt2>> {
        self.tiers.iter().map(|t| t.aisle_points.clone()).collect()
    }

    /// Every row of every tier, in tier then row order.
    pub fn rows(&self) -> impl Iterator<Item = RowRecord> + '_ {
        self.tiers.iter().flat_map(|t| {
            t.spectators.iter().map(move |s| RowRecord {
                tier: t.section_index,
                row: s.row,
                riser_height: t.riser_heights.get(s.row).copied(),
                eye: s.loc,
                eye_standing: s.loc_standing,
                cvalue: s.cvalue,
                cvalue_standing: s.cvalue_standing,
            })
        })
    }
}
