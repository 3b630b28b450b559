//! HTTP API handlers
//!
//! Every mutation handler follows the same shape: validate the request, load
//! the document from the database, run the pure engine operation, persist the
//! returned document, and respond. Business-rule refusals come back from the
//! engines as typed values and are translated in `error_codes`; only
//! infrastructure failures travel through `error::ApiError`.

pub mod deals;
pub mod error_codes;
pub mod health;
pub mod milestones;
pub mod offers;

use pact_types::Role;

use crate::error::ApiError;

/// Run blocking diesel work off the actix worker threads
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    actix_web::web::block(f)
        .await
        .map_err(|e| ApiError::Internal(format!("Blocking task failed: {}", e)))?
        .map_err(ApiError::from)
}

/// Parse an acting role out of a validated request field
pub(crate) fn parse_role(raw: &str) -> Result<Role, ApiError> {
    raw.parse::<Role>().map_err(ApiError::BadRequest)
}

/// Refuse an action reserved for the other party.
///
/// Single chokepoint for the handler-level role checks, so screens cannot
/// drift apart on who is allowed to do what.
pub(crate) fn require_role(
    actual: Role,
    expected: Role,
    action: &str,
) -> Result<(), pact_core::EngineError> {
    if actual != expected {
        return Err(pact_core::EngineError::Forbidden(format!(
            "only the {} may {}",
            expected, action
        )));
    }
    Ok(())
}

/// Validate that a role string names one of the two deal parties
pub(crate) fn validate_party_role(role: &str) -> Result<(), validator::ValidationError> {
    match role.to_lowercase().as_str() {
        "creator" | "marketer" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_role")),
    }
}

/// Validate a review decision string ("approved" / "revision_required")
pub(crate) fn validate_review_decision(
    decision: &str,
) -> Result<(), validator::ValidationError> {
    decision
        .parse::<pact_types::ReviewDecision>()
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("invalid_decision"))
}
