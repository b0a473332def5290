//! Cross-section geometry of stadium seating bowls.
//!
//! Given tier configurations, a section computes each tier's profile
//! polyline, the riser heights that give every row its target C-value
//! (bounded by a maximum rake and rounded to a build increment), spectator
//! eye points and sightlines, and the aisle stair profile.
//!
//! Layout
//! - `geom`: `Pt2`/`Vec2`, the section `Plane`, and `SolverCfg` tolerances.
//! - `spectator`: eye placement and clearance per row.
//! - `solver`: the riser-height solve.
//! - `aisle`: stair treads alongside tall risers.
//! - `tier`: tier configuration, the per-row super-riser state, and the row builder.
//! - `section`: ordered tiers, chaining, and the aggregate queries.
//!
//! Everything is pure computation: no I/O, no shared state, deterministic.

pub mod aisle;
pub mod error;
pub mod geom;
pub mod section;
pub mod solver;
pub mod spectator;
pub mod tier;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::BowlError;
pub use geom::{Plane, Pt2, SolverCfg, Vec2};
pub use section::{RowRecord, Section, SectionCfg};
pub use spectator::{EyePosture, Spectator, SpectatorParameters};
pub use tier::{Fascia, SuperRiser, Tier, TierCfg};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::aisle::AisleStep;
    pub use crate::geom::{pt2, vec2, Plane, Pt2, SolverCfg, Vec2};
    pub use crate::section::{RowRecord, Section, SectionCfg};
    pub use crate::solver::{solve_riser, RiserSolve};
    pub use crate::spectator::{EyePosture, Spectator, SpectatorParameters};
    pub use crate::tier::{Fascia, RowState, SuperRiser, Tier, TierCfg};
    pub use crate::BowlError;
}
