//! Per-row role relative to a tier's super riser.
//!
//! Row `r` here names the riser between row `r` and row `r + 1`, and the
//! spectator seated on row `r`.
//!
//! | state            | condition          | points             | riser solve                        |
//! |------------------|--------------------|--------------------|------------------------------------|
//! | `Normal`         | no super riser, or `r + 1 < S` | bottom, top | rake clamp                      |
//! | `PreSuperRiser`  | `r + 1 == S`       | + curb points      | measured from curb, standing eye, no clamp |
//! | `SuperRiser`     | `r == S`           | + guardrail points | super eyes, guardrail run, no clamp |
//! | `PostSuperRiser` | `r > S`            | bottom, top        | rake clamp                         |

use super::cfg::SuperRiser;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowState {
    Normal,
    PreSuperRiser,
    SuperRiser,
    PostSuperRiser,
}

impl RowState {
    #[inline]
    pub fn of(super_riser: Option<&SuperRiser>, row: usize) -> Self {
        match super_riser {
            None => RowState::Normal,
            Some(sr) if row + 1 == sr.row => RowState::PreSuperRiser,
            Some(sr) if row == sr.row => RowState::SuperRiser,
            Some(sr) if row > sr.row => RowState::PostSuperRiser,
            Some(_) => RowState::Normal,
        }
    }

    /// Whether the riser behind this row is bounded by the max rake angle.
    #[inline]
    pub fn clamps_rake(self) -> bool {
        matches!(self, RowState::Normal | RowState::PostSuperRiser)
    }

    /// Whether the spectator of this row uses the super riser's eye offsets.
    #[inline]
    pub fn uses_super_eyes(self) -> bool {
        self == RowState::SuperRiser
    }

    /// Extra profile points emitted for the curb in front of the super riser.
    #[inline]
    pub fn curb_points(self, sr: &SuperRiser) -> usize {
        match (self, sr.curb()) {
            (RowState::PreSuperRiser, (w, h)) if w > 0.0 => 1 + usize::from(h > 0.0),
            _ => 0,
        }
    }

    /// Extra profile points emitted for the guardrail platform.
    #[inline]
    pub fn guardrail_points(self) -> usize {
        if self == RowState::SuperRiser {
            2
        } else {
            0
        }
    }
}
