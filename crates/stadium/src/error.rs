//! Errors surfaced while building a section.

use thiserror::Error;

/// Failure of a section or tier build.
///
/// Any error aborts the whole section; no partially built tier is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BowlError {
    /// Caller-supplied configuration cannot describe a seating tier.
    #[error("tier {tier}: invalid configuration: {reason}")]
    InvalidConfiguration { tier: usize, reason: String },
    /// The sightline triangle collapsed or inverted during a solve.
    #[error("tier {tier}, row {row}: degenerate sightline geometry: {reason}")]
    GeometricDegeneracy {
        tier: usize,
        row: usize,
        reason: String,
    },
    /// Tier is set to build from a previous tier, but none exists.
    #[error("tier {tier} builds from a previous tier but has no predecessor")]
    MissingPredecessor { tier: usize },
    /// Profile buffer was sized wrong (internal invariant violation).
    #[error("tier {tier}: profile buffer holds {capacity} points, build wrote {written}")]
    SizingDefect {
        tier: usize,
        capacity: usize,
        written: usize,
    },
}

impl BowlError {
    pub(crate) fn config(tier: usize, reason: impl Into<String>) -> Self {
        BowlError::InvalidConfiguration {
            tier,
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(tier: usize, row: usize, reason: impl Into<String>) -> Self {
        BowlError::GeometricDegeneracy {
            tier,
            row,
            reason: reason.into(),
        }
    }
}
