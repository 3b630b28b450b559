//! Error types for engine operations
//!
//! Business-rule violations are values, not panics: every engine operation
//! returns `EngineResult` and the caller translates failures into user-facing
//! responses. Only malformed documents (bad JSON, unknown status strings)
//! surface outside this taxonomy.

use thiserror::Error;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Typed failure of an engine operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Action attempted from a state that does not permit it
    /// (countering a terminal offer, funding a non-pending milestone)
    #[error("invalid transition: cannot {action} from '{from}'")]
    InvalidTransition {
        /// The attempted action
        action: &'static str,
        /// The state the document was in
        from: String,
    },

    /// Actor lacks permission for the requested action
    /// (editing a funded milestone, acting out of turn)
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A required prior step is missing
    /// (final release before the first-half release)
    #[error("prerequisite not met: {0}")]
    PrerequisiteNotMet(String),

    /// Input data violates a field invariant
    /// (milestone amount below the minimum, missing required text)
    #[error("validation failed: {0}")]
    ValidationError(String),
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidTransition`]
    pub fn invalid_transition(action: &'static str, from: impl std::fmt::Display) -> Self {
        EngineError::InvalidTransition {
            action,
            from: from.to_string(),
        }
    }

    /// Whether the client can recover by correcting input and retrying
    ///
    /// Every engine failure is recoverable; this exists so callers can build
    /// uniform error responses without matching on variants.
    pub fn is_recoverable(&self) -> bool {
        true
    }
}
