//! Tier configuration records and up-front validation.

use serde::{Deserialize, Serialize};

use super::state::RowState;
use crate::error::BowlError;
use crate::geom::{Pt2, Vec2};
use crate::spectator::{EyeOffsets, SpectatorParameters};

/// Oversized riser inside a tier (vomitory or structural break).
///
/// `row` is the row sitting on top of the super riser. The curb is a raised
/// step in front of it; the guardrail platform sits on top of it. Eye offsets
/// replace the tier defaults for `row`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperRiser {
    pub row: usize,
    pub curb_width: f64,
    pub curb_height: f64,
    pub guardrail_width: f64,
    pub eye_x: f64,
    pub eye_y: f64,
    pub s_eye_x: f64,
    pub s_eye_y: f64,
}

impl Default for SuperRiser {
    fn default() -> Self {
        Self {
            row: 0,
            curb_width: 0.0,
            curb_height: 0.0,
            guardrail_width: 0.0,
            eye_x: 500.0,
            eye_y: 1200.0,
            s_eye_x: 600.0,
            s_eye_y: 1650.0,
        }
    }
}

impl SuperRiser {
    #[inline]
    pub fn eye_offsets(&self) -> EyeOffsets {
        EyeOffsets {
            seated: Vec2::new(self.eye_x, self.eye_y),
            standing: Vec2::new(self.s_eye_x, self.s_eye_y),
        }
    }

    /// Curb `(width, height)` as built. A curb without width is not built.
    #[inline]
    pub fn curb(&self) -> (f64, f64) {
        if self.curb_width > 0.0 {
            (self.curb_width, self.curb_height.max(0.0))
        } else {
            (0.0, 0.0)
        }
    }
}

/// Leading profile prepended to a tier's first row.
///
/// `points` are offsets from the tier's first point; `points[0]` is that
/// point itself and is not re-emitted. `blocker` selects the fascia point the
/// first row's sightline has to clear.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fascia {
    pub points: Vec<Vec2>,
    pub blocker: usize,
}

impl Fascia {
    /// Number of profile points the fascia adds in front of the first row.
    #[inline]
    pub fn emitted(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Configuration of one seating tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierCfg {
    pub start_pt: Pt2,
    pub start_x: f64,
    pub start_y: f64,
    pub row_count: usize,
    pub row_widths: Vec<f64>,
    /// Upper bound on riser slope, radians.
    pub max_rake_angle: f64,
    /// Riser rounding increment; 0 disables rounding.
    pub round_to: f64,
    pub aisle_step_height: f64,
    pub aisle_step_width: f64,
    pub build_from_previous_tier: bool,
    pub spectator: SpectatorParameters,
    pub fascia: Option<Fascia>,
    pub super_riser: Option<SuperRiser>,
    pub spec_separation: bool,
}

impl Default for TierCfg {
    fn default() -> Self {
        Self::uniform(10, 800.0)
    }
}

impl TierCfg {
    /// `row_count` rows of equal width, starting at the point of focus.
    pub fn uniform(row_count: usize, width: f64) -> Self {
        Self {
            start_pt: Pt2::origin(),
            start_x: 0.0,
            start_y: 0.0,
            row_count,
            row_widths: vec![width; row_count],
            max_rake_angle: 34f64.to_radians(),
            round_to: 0.0,
            aisle_step_height: 200.0,
            aisle_step_width: 300.0,
            build_from_previous_tier: false,
            spectator: SpectatorParameters::default(),
            fascia: None,
            super_riser: None,
            spec_separation: false,
        }
    }

    /// Role of riser `row` (between `row` and `row + 1`).
    #[inline]
    pub fn row_state(&self, row: usize) -> RowState {
        RowState::of(self.super_riser.as_ref(), row)
    }

    /// Exact number of profile points the tier build emits.
    pub fn expected_point_count(&self) -> usize {
        let mut n = self.fascia.as_ref().map_or(0, Fascia::emitted) + 1;
        for row in 0..self.row_count.saturating_sub(1) {
            let state = self.row_state(row);
            // riser bottom and top
            n += 2;
            if let Some(sr) = self.super_riser.as_ref() {
                n += state.curb_points(sr) + state.guardrail_points();
            }
        }
        n + 1
    }

    /// Reject configurations the builder cannot turn into geometry.
    pub fn validate(&self, tier: usize) -> Result<(), BowlError> {
        let err = |reason: String| Err(BowlError::config(tier, reason));
        if self.row_count == 0 {
            return err("row_count must be positive".into());
        }
        if self.row_widths.len() != self.row_count {
            return err(format!(
                "row_widths has {} entries for {} rows",
                self.row_widths.len(),
                self.row_count
            ));
        }
        if let Some((row, w)) = self
            .row_widths
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return err(format!("row {row} has invalid width {w}"));
        }
        if !self.start_pt.x.is_finite()
            || !self.start_pt.y.is_finite()
            || !self.start_x.is_finite()
            || !self.start_y.is_finite()
        {
            return err("start point must be finite".into());
        }
        if !(0.0..std::f64::consts::FRAC_PI_2).contains(&self.max_rake_angle) {
            return err(format!(
                "max_rake_angle {} outside [0, pi/2)",
                self.max_rake_angle
            ));
        }
        if !self.round_to.is_finite() || self.round_to < 0.0 {
            return err(format!("round_to {} must be >= 0", self.round_to));
        }
        if !self.aisle_step_height.is_finite() || self.aisle_step_height <= 0.0 {
            return err(format!(
                "aisle_step_height {} must be > 0",
                self.aisle_step_height
            ));
        }
        if !self.aisle_step_width.is_finite() || self.aisle_step_width < 0.0 {
            return err(format!(
                "aisle_step_width {} must be >= 0",
                self.aisle_step_width
            ));
        }
        let sp = &self.spectator;
        if !sp.unit.is_finite() || sp.unit <= 0.0 {
            return err(format!("unit {} must be > 0", sp.unit));
        }
        if !sp.target_c_value.is_finite() || sp.target_c_value < 0.0 {
            return err(format!(
                "target_c_value {} must be >= 0",
                sp.target_c_value
            ));
        }
        if let Some(sr) = self.super_riser.as_ref() {
            if sr.row >= self.row_count {
                return err(format!(
                    "super riser row {} outside [0, {}]",
                    sr.row,
                    self.row_count - 1
                ));
            }
            if sr.curb_width < 0.0 || sr.curb_height < 0.0 || sr.guardrail_width < 0.0 {
                return err("super riser curb and guardrail sizes must be >= 0".into());
            }
        }
        if let Some(f) = self.fascia.as_ref() {
            if !f.points.is_empty() && f.blocker > f.emitted() {
                return err(format!(
                    "fascia blocker {} outside [0, {}]",
                    f.blocker,
                    f.emitted()
                ));
            }
        }
        Ok(())
    }
}
