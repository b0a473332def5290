//! Spectator model: eye positions, sightlines and achieved C-values per row.
//!
//! Conventions
//! - Eye offsets are measured from a row's rear riser point: `x` back towards
//!   the point of focus (subtracted), `y` up (added).
//! - A sightline runs from an eye to the point of focus.
//! - The C-value is the vertical gap between a sightline and the forward
//!   reference point, taken at the forward point's x.

use serde::{Deserialize, Serialize};

use crate::geom::{Pt2, Vec2};

/// Seated or standing eye.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyePosture {
    Seated,
    Standing,
}

/// Per-tier spectator configuration.
///
/// `target_c_value` is in thousandths of `unit` (90 with `unit = 1000` is 90 mm).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectatorParameters {
    pub eye_x: f64,
    pub eye_y: f64,
    pub s_eye_x: f64,
    pub s_eye_y: f64,
    pub unit: f64,
    pub target_c_value: f64,
}

impl Default for SpectatorParameters {
    fn default() -> Self {
        Self {
            eye_x: 500.0,
            eye_y: 1200.0,
            s_eye_x: 600.0,
            s_eye_y: 1650.0,
            unit: 1000.0,
            target_c_value: 90.0,
        }
    }
}

impl SpectatorParameters {
    /// Required clearance in section units.
    #[inline]
    pub fn target_c(&self) -> f64 {
        self.target_c_value / 1000.0 * self.unit
    }

    #[inline]
    pub fn eye_offsets(&self) -> EyeOffsets {
        EyeOffsets {
            seated: Vec2::new(self.eye_x, self.eye_y),
            standing: Vec2::new(self.s_eye_x, self.s_eye_y),
        }
    }
}

/// Seated and standing eye offsets, `(back, up)` from the rear riser point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeOffsets {
    pub seated: Vec2,
    pub standing: Vec2,
}

impl EyeOffsets {
    #[inline]
    pub fn get(&self, posture: EyePosture) -> Vec2 {
        match posture {
            EyePosture::Seated => self.seated,
            EyePosture::Standing => self.standing,
        }
    }

    /// Eye location for a rear riser point.
    #[inline]
    pub fn eye_at(&self, riser_pt: Pt2, posture: EyePosture) -> Pt2 {
        let off = self.get(posture);
        Pt2::new(riser_pt.x - off.x, riser_pt.y + off.y)
    }
}

/// Points the spectator of a row looks over.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Forward {
    pub seated: Pt2,
    pub standing: Pt2,
}

impl Forward {
    /// Same reference point for both postures (first row of a tier).
    #[inline]
    pub fn point(p: Pt2) -> Self {
        Self {
            seated: p,
            standing: p,
        }
    }
}

/// One row's spectator. Built once during the tier build, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Spectator {
    pub section_index: usize,
    pub row: usize,
    pub loc: Pt2,
    pub loc_standing: Pt2,
    pub sight_line: Vec2,
    pub sight_line_standing: Vec2,
    pub forward: Forward,
    /// Achieved clearance; NaN when the eye is vertically above the point of focus.
    pub cvalue: f64,
    pub cvalue_standing: f64,
    /// Standing clearance measured against the forward standing eye.
    pub separation: bool,
}

impl Spectator {
    #[inline]
    pub fn eye(&self, posture: EyePosture) -> Pt2 {
        match posture {
            EyePosture::Seated => self.loc,
            EyePosture::Standing => self.loc_standing,
        }
    }

    #[inline]
    pub fn sightline(&self, posture: EyePosture) -> Vec2 {
        match posture {
            EyePosture::Seated => self.sight_line,
            EyePosture::Standing => self.sight_line_standing,
        }
    }

    #[inline]
    pub fn clearance(&self, posture: EyePosture) -> f64 {
        match posture {
            EyePosture::Seated => self.cvalue,
            EyePosture::Standing => self.cvalue_standing,
        }
    }
}

/// Section-wide inputs shared by every placement in one tier.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlaceCtx {
    pub section_index: usize,
    pub pof: Pt2,
    pub separation: bool,
    pub eps: f64,
}

/// Place the spectator of `row` behind `riser_pt`.
///
/// A clearance that is undefined (eye vertically above the point of focus)
/// is recorded as NaN; only the riser solve rejects that geometry.
pub(crate) fn place(
    ctx: &PlaceCtx,
    row: usize,
    riser_pt: Pt2,
    offsets: EyeOffsets,
    forward: Forward,
) -> Spectator {
    let loc = offsets.eye_at(riser_pt, EyePosture::Seated);
    let loc_standing = offsets.eye_at(riser_pt, EyePosture::Standing);
    let forward = if ctx.separation {
        forward
    } else {
        Forward::point(forward.seated)
    };

    let cvalue = clearance(loc, forward.seated, ctx.pof, ctx.eps).unwrap_or(f64::NAN);
    let cvalue_standing = if ctx.separation {
        clearance(loc_standing, forward.standing, ctx.pof, ctx.eps).unwrap_or(f64::NAN)
    } else {
        cvalue
    };
    if cvalue.is_nan() || cvalue_standing.is_nan() {
        tracing::debug!(tier = ctx.section_index, row, "eye above point of focus; clearance undefined");
    }

    Spectator {
        section_index: ctx.section_index,
        row,
        loc,
        loc_standing,
        sight_line: ctx.pof - loc,
        sight_line_standing: ctx.pof - loc_standing,
        forward,
        cvalue,
        cvalue_standing,
        separation: ctx.separation,
    }
}

/// Height of the sightline `eye → pof` above `forward`, at `forward.x`.
///
/// `None` when the eye sits vertically above the point of focus.
pub fn clearance(eye: Pt2, forward: Pt2, pof: Pt2, eps: f64) -> Option<f64> {
    let dx = pof.x - eye.x;
    if dx.abs() <= eps {
        return None;
    }
    let line_y = eye.y + (forward.x - eye.x) * (pof.y - eye.y) / dx;
    Some(line_y - forward.y)
}
