//! Crate-wide error type.
//!
//! Malformed input fails fast with a [`ValidationError`]. Distance-provider
//! failures are represented by [`DistanceError`] but are recovered locally
//! by [`FallbackDistance`](crate::geo::FallbackDistance) and never abort a
//! scoring or optimization run.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LeagueError>;

/// Errors surfaced by the public API.
#[derive(Debug, Error)]
pub enum LeagueError {
    /// Input data failed structural validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A configuration struct rejected its own parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A distance lookup failed and no fallback was in place.
    #[error(transparent)]
    Distance(#[from] DistanceError),
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A team or matchup has an empty identifier.
    MissingId,
    /// Two teams share the same identifier.
    DuplicateTeamId,
    /// A matchup references the same team as home and away.
    SelfMatchup,
    /// A strategic-outlier constraint targets a cluster that doesn't exist.
    ClusterIndexOutOfRange,
}

/// A validation error: category plus a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Failure of a distance provider.
#[derive(Debug, Error)]
pub enum DistanceError {
    /// The provider could not be reached or timed out.
    #[error("distance provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with a non-success status.
    #[error("distance provider returned status {0}")]
    Status(u16),

    /// The provider answered but the payload had no usable distance.
    #[error("malformed distance response: {0}")]
    Malformed(String),
}
