//! Deal and escrow API handlers

use actix_web::{get, post, web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use validator::Validate;

use pact_core::{escrow, Deal};
use pact_types::{ReviewDecision, Role};

use crate::db::DbPool;
use crate::error::ApiError;
use crate::handlers::error_codes;
use crate::handlers::offers::ActorRequest;
use crate::handlers::{
    blocking, parse_role, require_role, validate_party_role, validate_review_decision,
};
use crate::models::deal::DealRecord;

/// Request body for submitting proof of work
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProofRequest {
    #[validate(custom = "validate_party_role")]
    pub role: String,
    #[validate(length(min = 1, message = "At least one attachment is required"))]
    pub attachments: Vec<String>,
}

/// Request body for reviewing a proof submission
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewProofRequest {
    #[validate(custom = "validate_party_role")]
    pub role: String,
    #[validate(custom = "validate_review_decision")]
    pub decision: String,
    #[validate(length(max = 5000, message = "Feedback max 5000 characters"))]
    pub feedback: Option<String>,
}

async fn load_deal(pool: &web::Data<DbPool>, deal_id: &str) -> Result<Option<Deal>, ApiError> {
    let pool = pool.clone();
    let id = deal_id.to_string();
    blocking(move || {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        DealRecord::load_document(&mut conn, &id)
    })
    .await
}

async fn persist_deal(pool: &web::Data<DbPool>, document: Deal) -> Result<(), ApiError> {
    let pool = pool.clone();
    blocking(move || {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        DealRecord::apply_document(&mut conn, &document)
    })
    .await
}

/// Fetch a deal document
///
/// # Endpoint
/// GET /api/deals/{id}
#[get("/api/deals/{id}")]
pub async fn get_deal(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let deal_id = path.into_inner();
    match load_deal(&pool, &deal_id).await? {
        Some(document) => Ok(HttpResponse::Ok().json(json!({ "success": true, "deal": document }))),
        None => Ok(error_codes::deal_not_found(&deal_id)),
    }
}

/// Escrow summary for a deal: project price, escrow holdings, milestone
/// paid/remaining figures, and total earnings
///
/// # Endpoint
/// GET /api/deals/{id}/summary
#[get("/api/deals/{id}/summary")]
pub async fn deal_summary(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let deal_id = path.into_inner();
    let Some(document) = load_deal(&pool, &deal_id).await? else {
        return Ok(error_codes::deal_not_found(&deal_id));
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "summary": escrow::summarize(&document),
        "canReleaseFirstHalf": escrow::can_release_first_half(&document),
        "canReleaseFinal": escrow::can_release_final(&document),
    })))
}

/// Release the first half of the base contract amount into earnings
///
/// # Endpoint
/// POST /api/deals/{id}/release-first-half
#[post("/api/deals/{id}/release-first-half")]
pub async fn release_first_half(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let deal_id = path.into_inner();
    let role = parse_role(&body.role)?;

    let Some(document) = load_deal(&pool, &deal_id).await? else {
        return Ok(error_codes::deal_not_found(&deal_id));
    };

    let result = require_role(role, Role::Marketer, "release payments")
        .and_then(|_| escrow::release_first_half(&document));
    match result {
        Ok(updated) => {
            persist_deal(&pool, updated.clone()).await?;
            info!(deal_id = %deal_id, "First-half release recorded");
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "deal": updated,
                "summary": escrow::summarize(&updated),
            })))
        }
        Err(e) => Ok(error_codes::from_engine_error("DEAL", &e)),
    }
}

/// Release the remaining balance of the base contract amount
///
/// Refused with DEAL-004 until the first-half release has occurred.
///
/// # Endpoint
/// POST /api/deals/{id}/release-final
#[post("/api/deals/{id}/release-final")]
pub async fn release_final(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let deal_id = path.into_inner();
    let role = parse_role(&body.role)?;

    let Some(document) = load_deal(&pool, &deal_id).await? else {
        return Ok(error_codes::deal_not_found(&deal_id));
    };

    let result = require_role(role, Role::Marketer, "release payments")
        .and_then(|_| escrow::release_final(&document));
    match result {
        Ok(updated) => {
            persist_deal(&pool, updated.clone()).await?;
            info!(deal_id = %deal_id, "Final release recorded");
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "deal": updated,
                "summary": escrow::summarize(&updated),
            })))
        }
        Err(e) => Ok(error_codes::from_engine_error("DEAL", &e)),
    }
}

/// Submit proof of work for review
///
/// # Endpoint
/// POST /api/deals/{id}/proofs
#[post("/api/deals/{id}/proofs")]
pub async fn submit_proof(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<SubmitProofRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let deal_id = path.into_inner();
    let role = parse_role(&body.role)?;

    let Some(document) = load_deal(&pool, &deal_id).await? else {
        return Ok(error_codes::deal_not_found(&deal_id));
    };

    match escrow::submit_proof(&document, role, body.into_inner().attachments) {
        Ok(updated) => {
            persist_deal(&pool, updated.clone()).await?;
            info!(deal_id = %deal_id, "Proof submitted for review");
            Ok(HttpResponse::Ok().json(json!({ "success": true, "deal": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("DEAL", &e)),
    }
}

/// Review a pending proof submission
///
/// # Endpoint
/// POST /api/deals/{id}/proofs/{proof_id}/review
#[post("/api/deals/{id}/proofs/{proof_id}/review")]
pub async fn review_proof(
    pool: web::Data<DbPool>,
    path: web::Path<(String, String)>,
    body: web::Json<ReviewProofRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let (deal_id, proof_id) = path.into_inner();
    let role = parse_role(&body.role)?;
    let decision = body
        .decision
        .parse::<ReviewDecision>()
        .map_err(ApiError::BadRequest)?;

    let Some(document) = load_deal(&pool, &deal_id).await? else {
        return Ok(error_codes::deal_not_found(&deal_id));
    };
    if document.find_proof(&proof_id).is_none() {
        return Ok(error_codes::proof_not_found(&proof_id));
    }

    match escrow::review_proof(
        &document,
        role,
        &proof_id,
        decision,
        body.into_inner().feedback,
    ) {
        Ok(updated) => {
            persist_deal(&pool, updated.clone()).await?;
            info!(deal_id = %deal_id, proof_id = %proof_id, decision = %decision.as_str(), "Proof reviewed");
            Ok(HttpResponse::Ok().json(json!({ "success": true, "deal": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("DEAL", &e)),
    }
}

/// Creator marks the approved content as posted on the agreed platform
///
/// # Endpoint
/// POST /api/deals/{id}/final-posted
#[post("/api/deals/{id}/final-posted")]
pub async fn final_posted(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let deal_id = path.into_inner();
    let role = parse_role(&body.role)?;

    let Some(document) = load_deal(&pool, &deal_id).await? else {
        return Ok(error_codes::deal_not_found(&deal_id));
    };

    match escrow::mark_final_posted(&document, role) {
        Ok(updated) => {
            persist_deal(&pool, updated.clone()).await?;
            Ok(HttpResponse::Ok().json(json!({ "success": true, "deal": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("DEAL", &e)),
    }
}

/// Approve the final posted content and release the remaining balance
///
/// Refused with DEAL-004 when the first-half release has not occurred; in
/// that case neither the status nor the ledger changes.
///
/// # Endpoint
/// POST /api/deals/{id}/complete
#[post("/api/deals/{id}/complete")]
pub async fn complete_deal(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let deal_id = path.into_inner();
    let role = parse_role(&body.role)?;

    let Some(document) = load_deal(&pool, &deal_id).await? else {
        return Ok(error_codes::deal_not_found(&deal_id));
    };

    match escrow::issue_completion_payment(&document, role) {
        Ok(updated) => {
            persist_deal(&pool, updated.clone()).await?;
            info!(deal_id = %deal_id, "Completion payment issued");
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "deal": updated,
                "summary": escrow::summarize(&updated),
            })))
        }
        Err(e) => Ok(error_codes::from_engine_error("DEAL", &e)),
    }
}

/// Open a cancellation request
///
/// # Endpoint
/// POST /api/deals/{id}/cancel
#[post("/api/deals/{id}/cancel")]
pub async fn request_cancellation(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let deal_id = path.into_inner();
    parse_role(&body.role)?;

    let Some(document) = load_deal(&pool, &deal_id).await? else {
        return Ok(error_codes::deal_not_found(&deal_id));
    };

    match escrow::request_cancellation(&document) {
        Ok(updated) => {
            persist_deal(&pool, updated.clone()).await?;
            info!(deal_id = %deal_id, "Cancellation requested");
            Ok(HttpResponse::Ok().json(json!({ "success": true, "deal": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("DEAL", &e)),
    }
}

/// Confirm a pending cancellation request (terminal)
///
/// # Endpoint
/// POST /api/deals/{id}/cancel/confirm
#[post("/api/deals/{id}/cancel/confirm")]
pub async fn confirm_cancellation(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let deal_id = path.into_inner();
    parse_role(&body.role)?;

    let Some(document) = load_deal(&pool, &deal_id).await? else {
        return Ok(error_codes::deal_not_found(&deal_id));
    };

    match escrow::confirm_cancellation(&document) {
        Ok(updated) => {
            persist_deal(&pool, updated.clone()).await?;
            info!(deal_id = %deal_id, "Deal cancelled");
            Ok(HttpResponse::Ok().json(json!({ "success": true, "deal": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("DEAL", &e)),
    }
}

/// Withdraw a pending cancellation request and resume the deal
///
/// # Endpoint
/// POST /api/deals/{id}/cancel/withdraw
#[post("/api/deals/{id}/cancel/withdraw")]
pub async fn withdraw_cancellation(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let deal_id = path.into_inner();
    parse_role(&body.role)?;

    let Some(document) = load_deal(&pool, &deal_id).await? else {
        return Ok(error_codes::deal_not_found(&deal_id));
    };

    match escrow::withdraw_cancellation(&document) {
        Ok(updated) => {
            persist_deal(&pool, updated.clone()).await?;
            Ok(HttpResponse::Ok().json(json!({ "success": true, "deal": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("DEAL", &e)),
    }
}
