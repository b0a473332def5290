//! Seating tiers: configuration, per-row state, and the row point builder.
//!
//! A tier is a run of rows sharing one rake/riser policy. Its build emits
//! the profile polyline (`points`), one riser height per row gap, one
//! spectator per row, and the aisle stair profile.
//!
//! Code cross-refs: `solver::solve_riser`, `aisle::push_steps`,
//! `spectator::place`, `section::Section`.

mod build;
mod cfg;
mod state;

pub use build::{BuildCtx, Tier};
pub use cfg::{Fascia, SuperRiser, TierCfg};
pub use state::RowState;
