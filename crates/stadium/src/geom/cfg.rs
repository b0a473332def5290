//! Numeric tolerances for the section solver.

use serde::{Deserialize, Serialize};

/// Solver configuration (tolerances).
///
/// - `eps_degenerate`: smallest accepted horizontal distance between the
///   forward eye and the point of focus (`d - t` in the riser solve), in
///   multiples of the tier's `unit`.
/// - `eps_round`: slack (in `round_to` units) below which a riser is not
///   bumped to the next rounding increment.
/// - `max_riser_units`: tallest accepted riser, in multiples of `unit`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverCfg {
    pub eps_degenerate: f64,
    pub eps_round: f64,
    pub max_riser_units: f64,
}

impl Default for SolverCfg {
    fn default() -> Self {
        Self {
            eps_degenerate: 1e-9,
            eps_round: 1e-9,
            max_riser_units: 100.0,
        }
    }
}
