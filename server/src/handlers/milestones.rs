//! Milestone API handlers
//!
//! Milestones are created and managed by the marketer (funding, review) with
//! work submitted by the creator. The funded-milestone edit lock and the
//! lifecycle transitions are enforced by the engine; handlers add the
//! role-of-the-actor checks and the richer field validation.

use actix_web::{delete, post, put, web, HttpResponse};
use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use validator::Validate;

use pact_core::milestone::{self, MilestoneDraft, MilestoneEdit};
use pact_core::{EngineError, Milestone};
use pact_types::{ReviewDecision, Role, UsdAmount};

use crate::db::DbPool;
use crate::error::ApiError;
use crate::handlers::error_codes;
use crate::handlers::offers::ActorRequest;
use crate::handlers::{
    blocking, parse_role, require_role, validate_party_role, validate_review_decision,
};
use crate::models::deal::DealRecord;
use crate::models::milestone::MilestoneRecord;
use crate::validation::{format_validation_error, validate_milestone_fields};

/// Request body for creating a milestone
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMilestoneRequest {
    #[validate(custom = "validate_party_role")]
    pub role: String,
    #[validate(length(min = 1, max = 120, message = "Milestone name must be 1-120 characters"))]
    pub name: String,
    /// Cents
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,
    pub bonus: Option<i64>,
    pub due_date: Option<NaiveDate>,
    #[validate(length(max = 5000, message = "Description max 5000 characters"))]
    pub description: Option<String>,
}

/// Request body for editing an unfunded milestone
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditMilestoneRequest {
    #[validate(custom = "validate_party_role")]
    pub role: String,
    #[validate(length(min = 1, max = 120, message = "Milestone name must be 1-120 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: Option<i64>,
    pub bonus: Option<i64>,
    pub due_date: Option<NaiveDate>,
    #[validate(length(max = 5000, message = "Description max 5000 characters"))]
    pub description: Option<String>,
}

/// Request body for submitting milestone work
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitWorkRequest {
    #[validate(custom = "validate_party_role")]
    pub role: String,
    pub content: Option<String>,
    #[validate(length(min = 1, message = "At least one file is required"))]
    pub files: Vec<String>,
}

/// Request body for reviewing milestone work
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewMilestoneRequest {
    #[validate(custom = "validate_party_role")]
    pub role: String,
    #[validate(custom = "validate_review_decision")]
    pub decision: String,
    #[validate(length(max = 5000, message = "Feedback max 5000 characters"))]
    pub feedback: Option<String>,
}

async fn load_milestone(
    pool: &web::Data<DbPool>,
    milestone_id: &str,
) -> Result<Option<(String, Milestone)>, ApiError> {
    let pool = pool.clone();
    let id = milestone_id.to_string();
    blocking(move || {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        match MilestoneRecord::find_by_id(&mut conn, &id)? {
            Some(record) => {
                let deal_id = record.deal_id.clone();
                Ok(Some((deal_id, record.into_document()?)))
            }
            None => Ok(None),
        }
    })
    .await
}

async fn persist_milestone(
    pool: &web::Data<DbPool>,
    document: Milestone,
) -> Result<(), ApiError> {
    let pool = pool.clone();
    blocking(move || {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        MilestoneRecord::apply_document(&mut conn, &document)
    })
    .await
}

/// Create a milestone on a deal
///
/// # Endpoint
/// POST /api/deals/{id}/milestones
#[post("/api/deals/{id}/milestones")]
pub async fn create_milestone(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<CreateMilestoneRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let deal_id = path.into_inner();
    let role = parse_role(&body.role)?;
    let request = body.into_inner();

    let amount = UsdAmount::from_cents(request.amount);
    let bonus = UsdAmount::from_cents(request.bonus.unwrap_or(0));
    let description = request.description.unwrap_or_default();

    // Field validation with per-field feedback before the engine runs
    let validation = validate_milestone_fields(&request.name, amount, bonus, &description);
    if !validation.is_valid {
        return Ok(error_codes::from_engine_error(
            "MST",
            &EngineError::ValidationError(format_validation_error(&validation)),
        ));
    }

    let result = require_role(role, Role::Marketer, "create milestones").and_then(|_| {
        milestone::create(MilestoneDraft {
            name: request.name,
            amount,
            bonus,
            due_date: request.due_date,
            description,
        })
    });

    match result {
        Ok(document) => {
            let pool2 = pool.clone();
            let id = deal_id.clone();
            let doc = document.clone();
            let created = blocking(move || {
                let mut conn = pool2.get().context("Failed to get DB connection")?;
                if DealRecord::find_by_id(&mut conn, &id)?.is_none() {
                    return Ok(None);
                }
                MilestoneRecord::create(&mut conn, &id, &doc)?;
                Ok(Some(doc))
            })
            .await?;

            match created {
                Some(document) => {
                    info!(deal_id = %deal_id, milestone_id = %document.id, "Milestone created");
                    Ok(HttpResponse::Created()
                        .json(json!({ "success": true, "milestone": document })))
                }
                None => Ok(error_codes::deal_not_found(&deal_id)),
            }
        }
        Err(e) => Ok(error_codes::from_engine_error("MST", &e)),
    }
}

/// Edit an unfunded milestone
///
/// # Endpoint
/// PUT /api/deals/{id}/milestones/{milestone_id}
#[put("/api/deals/{id}/milestones/{milestone_id}")]
pub async fn edit_milestone(
    pool: web::Data<DbPool>,
    path: web::Path<(String, String)>,
    body: web::Json<EditMilestoneRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let (_deal_id, milestone_id) = path.into_inner();
    let role = parse_role(&body.role)?;
    let request = body.into_inner();

    let Some((_, document)) = load_milestone(&pool, &milestone_id).await? else {
        return Ok(error_codes::milestone_not_found(&milestone_id));
    };

    let result = require_role(role, Role::Marketer, "edit milestones").and_then(|_| {
        milestone::edit(
            &document,
            MilestoneEdit {
                name: request.name,
                amount: request.amount.map(UsdAmount::from_cents),
                bonus: request.bonus.map(UsdAmount::from_cents),
                due_date: request.due_date,
                description: request.description,
            },
        )
    });

    match result {
        Ok(updated) => {
            persist_milestone(&pool, updated.clone()).await?;
            Ok(HttpResponse::Ok().json(json!({ "success": true, "milestone": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("MST", &e)),
    }
}

/// Delete an unfunded milestone
///
/// # Endpoint
/// DELETE /api/deals/{id}/milestones/{milestone_id}
#[delete("/api/deals/{id}/milestones/{milestone_id}")]
pub async fn delete_milestone(
    pool: web::Data<DbPool>,
    path: web::Path<(String, String)>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let (_deal_id, milestone_id) = path.into_inner();
    let role = parse_role(&body.role)?;

    let Some((_, document)) = load_milestone(&pool, &milestone_id).await? else {
        return Ok(error_codes::milestone_not_found(&milestone_id));
    };

    let result = require_role(role, Role::Marketer, "delete milestones")
        .and_then(|_| milestone::ensure_deletable(&document));
    match result {
        Ok(()) => {
            let pool2 = pool.clone();
            let id = milestone_id.clone();
            blocking(move || {
                let mut conn = pool2.get().context("Failed to get DB connection")?;
                MilestoneRecord::delete(&mut conn, &id)
            })
            .await?;
            info!(milestone_id = %milestone_id, "Milestone deleted");
            Ok(HttpResponse::Ok().json(json!({ "success": true })))
        }
        Err(e) => Ok(error_codes::from_engine_error("MST", &e)),
    }
}

/// Fund a pending milestone's escrow
///
/// # Endpoint
/// POST /api/deals/{id}/milestones/{milestone_id}/fund
#[post("/api/deals/{id}/milestones/{milestone_id}/fund")]
pub async fn fund_milestone(
    pool: web::Data<DbPool>,
    path: web::Path<(String, String)>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let (deal_id, milestone_id) = path.into_inner();
    let role = parse_role(&body.role)?;

    let Some((_, document)) = load_milestone(&pool, &milestone_id).await? else {
        return Ok(error_codes::milestone_not_found(&milestone_id));
    };

    let result = require_role(role, Role::Marketer, "fund milestones")
        .and_then(|_| milestone::fund(&document));
    match result {
        Ok(updated) => {
            persist_milestone(&pool, updated.clone()).await?;
            info!(deal_id = %deal_id, milestone_id = %milestone_id, "Milestone escrow funded");
            Ok(HttpResponse::Ok().json(json!({ "success": true, "milestone": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("MST", &e)),
    }
}

/// Submit work on a funded milestone
///
/// # Endpoint
/// POST /api/deals/{id}/milestones/{milestone_id}/submit
#[post("/api/deals/{id}/milestones/{milestone_id}/submit")]
pub async fn submit_milestone_work(
    pool: web::Data<DbPool>,
    path: web::Path<(String, String)>,
    body: web::Json<SubmitWorkRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let (_deal_id, milestone_id) = path.into_inner();
    let role = parse_role(&body.role)?;
    let request = body.into_inner();

    let Some((_, document)) = load_milestone(&pool, &milestone_id).await? else {
        return Ok(error_codes::milestone_not_found(&milestone_id));
    };

    let result = require_role(role, Role::Creator, "submit milestone work").and_then(|_| {
        milestone::submit_work(
            &document,
            request.content.unwrap_or_default(),
            request.files,
        )
    });
    match result {
        Ok(updated) => {
            persist_milestone(&pool, updated.clone()).await?;
            info!(milestone_id = %milestone_id, "Milestone work submitted for review");
            Ok(HttpResponse::Ok().json(json!({ "success": true, "milestone": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("MST", &e)),
    }
}

/// Review submitted milestone work
///
/// # Endpoint
/// POST /api/deals/{id}/milestones/{milestone_id}/review
#[post("/api/deals/{id}/milestones/{milestone_id}/review")]
pub async fn review_milestone(
    pool: web::Data<DbPool>,
    path: web::Path<(String, String)>,
    body: web::Json<ReviewMilestoneRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let (deal_id, milestone_id) = path.into_inner();
    let role = parse_role(&body.role)?;
    let decision = body
        .decision
        .parse::<ReviewDecision>()
        .map_err(ApiError::BadRequest)?;
    let request = body.into_inner();

    let Some((_, document)) = load_milestone(&pool, &milestone_id).await? else {
        return Ok(error_codes::milestone_not_found(&milestone_id));
    };

    let result = require_role(role, Role::Marketer, "review milestone work")
        .and_then(|_| milestone::review(&document, decision, request.feedback));
    match result {
        Ok(updated) => {
            persist_milestone(&pool, updated.clone()).await?;
            info!(
                deal_id = %deal_id,
                milestone_id = %milestone_id,
                decision = %decision.as_str(),
                "Milestone reviewed"
            );
            Ok(HttpResponse::Ok().json(json!({ "success": true, "milestone": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("MST", &e)),
    }
}
