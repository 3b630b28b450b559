//! PACT error codes system
//!
//! Provides standardized error codes and responses for the client error
//! handling system. Each code maps to a user-facing message and a
//! recoverability hint.
//!
//! # Error Code Families
//! - OFR-xxx: Offer negotiation errors
//! - DEAL-xxx: Deal/escrow errors
//! - MST-xxx: Milestone errors
//! - REQ-xxx / SRV-xxx: Request and server errors (see `error::ApiError`)
//!
//! Within a family: 001 = not found, 002 = forbidden, 003 = invalid state,
//! 004 = prerequisite missing, 005 = validation failure.

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use pact_core::EngineError;

/// Error response with standardized error code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Operation success (always false for errors)
    pub success: bool,
    /// PACT error code (e.g., "DEAL-004")
    pub error_code: String,
    /// Human-readable error message
    pub error: String,
    /// Whether the error can be recovered from (client can retry/correct)
    pub recoverable: bool,
    /// Optional additional details for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: &str, message: &str, recoverable: bool) -> Self {
        Self {
            success: false,
            error_code: code.to_string(),
            error: message.to_string(),
            recoverable,
            details: None,
        }
    }

    /// Add optional details
    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }
}

/// Translate a typed engine failure into an HTTP response.
///
/// `family` selects the code prefix ("OFR", "DEAL", "MST") so the client can
/// route the error to the right screen affordance.
pub fn from_engine_error(family: &str, err: &EngineError) -> HttpResponse {
    let recoverable = err.is_recoverable();
    match err {
        EngineError::Forbidden(_) => HttpResponse::Forbidden().json(ErrorResponse::new(
            &format!("{}-002", family),
            "You are not authorized to perform this action.",
            recoverable,
        )
        .with_details(&err.to_string())),
        EngineError::InvalidTransition { .. } => HttpResponse::Conflict().json(
            ErrorResponse::new(
                &format!("{}-003", family),
                "This action is not available in the current state.",
                recoverable,
            )
            .with_details(&err.to_string()),
        ),
        EngineError::PrerequisiteNotMet(_) => HttpResponse::Conflict().json(
            ErrorResponse::new(
                &format!("{}-004", family),
                "A required prior step has not happened yet.",
                recoverable,
            )
            .with_details(&err.to_string()),
        ),
        EngineError::ValidationError(_) => HttpResponse::BadRequest().json(
            ErrorResponse::new(
                &format!("{}-005", family),
                "The submitted data is invalid.",
                recoverable,
            )
            .with_details(&err.to_string()),
        ),
    }
}

/// OFR-001: Offer not found
pub fn offer_not_found(offer_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::new("OFR-001", "Offer not found or has been deleted.", false)
            .with_details(&format!("offer_id: {}", offer_id)),
    )
}

/// DEAL-001: Deal not found
pub fn deal_not_found(deal_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::new("DEAL-001", "Deal not found.", false)
            .with_details(&format!("deal_id: {}", deal_id)),
    )
}

/// MST-001: Milestone not found
pub fn milestone_not_found(milestone_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::new("MST-001", "Milestone not found.", false)
            .with_details(&format!("milestone_id: {}", milestone_id)),
    )
}

/// DEAL-006: Proof submission not found
pub fn proof_not_found(proof_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::new("DEAL-006", "Proof submission not found.", false)
            .with_details(&format!("proof_id: {}", proof_id)),
    )
}
