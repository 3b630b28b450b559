//! Offer negotiation API handlers

use actix_web::{get, post, web, HttpResponse};
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use pact_core::negotiation::{self, CounterTerms};
use pact_core::{display, Offer};
use pact_types::{OfferStatus, UsdAmount};

use crate::db::DbPool;
use crate::error::ApiError;
use crate::handlers::error_codes;
use crate::handlers::{blocking, parse_role, validate_party_role};
use crate::models::deal::DealRecord;
use crate::models::offer::{NewOfferRecord, OfferRecord};
use crate::models::to_json_list;

/// Request body carrying only the acting party
#[derive(Debug, Deserialize, Validate)]
pub struct ActorRequest {
    #[validate(custom = "validate_party_role")]
    pub role: String,
}

/// Query string selecting the viewing party
#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    pub role: String,
}

/// Request body for creating an offer
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    pub creator_id: String,
    pub marketer_id: String,
    #[validate(length(min = 1, max = 120, message = "Offer name must be 1-120 characters"))]
    pub offer_name: String,
    #[validate(length(max = 5000, message = "Description max 5000 characters"))]
    pub description: Option<String>,
    /// Cents; must be positive
    #[validate(range(min = 1, message = "Proposed amount must be positive"))]
    pub proposed_amount: i64,
    pub deliverables: Option<Vec<String>>,
    pub desired_review_date: Option<NaiveDate>,
    pub desired_post_date: Option<NaiveDate>,
    #[validate(length(max = 5000, message = "Notes max 5000 characters"))]
    pub notes: Option<String>,
    pub attachments: Option<Vec<String>>,
    /// Create as a draft instead of sending immediately
    pub draft: Option<bool>,
}

/// Request body for a counter-offer; unset term fields keep the current value
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CounterOfferRequest {
    #[validate(custom = "validate_party_role")]
    pub role: String,
    #[validate(range(min = 1, message = "Counter amount must be positive"))]
    pub counter_amount: Option<i64>,
    pub counter_review_date: Option<NaiveDate>,
    pub counter_post_date: Option<NaiveDate>,
    #[validate(length(max = 5000, message = "Description max 5000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 5000, message = "Notes max 5000 characters"))]
    pub notes: Option<String>,
    pub deliverables: Option<Vec<String>>,
}

async fn load_offer(pool: &web::Data<DbPool>, offer_id: &str) -> Result<Option<Offer>, ApiError> {
    let pool = pool.clone();
    let id = offer_id.to_string();
    blocking(move || {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        OfferRecord::load_document(&mut conn, &id)
    })
    .await
}

async fn persist_offer(pool: &web::Data<DbPool>, document: Offer) -> Result<(), ApiError> {
    let pool = pool.clone();
    blocking(move || {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        OfferRecord::apply_document(&mut conn, &document)
    })
    .await
}

/// Create a new offer (marketer → creator)
///
/// # Endpoint
/// POST /api/offers
#[post("/api/offers")]
pub async fn create_offer(
    pool: web::Data<DbPool>,
    body: web::Json<CreateOfferRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let status = if body.draft.unwrap_or(false) {
        OfferStatus::Draft
    } else {
        OfferStatus::Sent
    };

    let now = Utc::now().naive_utc();
    let request = body.into_inner();
    let new_offer = NewOfferRecord {
        id: Uuid::new_v4().to_string(),
        creator_id: request.creator_id,
        marketer_id: request.marketer_id,
        offer_name: request.offer_name,
        description: request.description.unwrap_or_default(),
        proposed_amount: request.proposed_amount,
        deliverables: to_json_list(&request.deliverables.unwrap_or_default())?,
        desired_review_date: request.desired_review_date,
        desired_post_date: request.desired_post_date,
        notes: request.notes.unwrap_or_default(),
        attachments: to_json_list(&request.attachments.unwrap_or_default())?,
        status: status.as_str().to_string(),
        viewed_by_creator: false,
        viewed_by_marketer: false,
        created_at: now,
        updated_at: now,
    };

    let document = blocking(move || {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        let record = OfferRecord::create(&mut conn, new_offer)?;
        record.into_document(Vec::new())
    })
    .await?;

    info!(offer_id = %document.id, status = %document.status, "Offer created");
    Ok(HttpResponse::Created().json(json!({ "success": true, "offer": document })))
}

/// Fetch an offer document
///
/// # Endpoint
/// GET /api/offers/{id}
#[get("/api/offers/{id}")]
pub async fn get_offer(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let offer_id = path.into_inner();
    match load_offer(&pool, &offer_id).await? {
        Some(document) => Ok(HttpResponse::Ok().json(json!({ "success": true, "offer": document }))),
        None => Ok(error_codes::offer_not_found(&offer_id)),
    }
}

/// Derived view of an offer for one party: display label, permissions, and
/// the effective terms with their change flags
///
/// # Endpoint
/// GET /api/offers/{id}/status?role=creator
#[get("/api/offers/{id}/status")]
pub async fn offer_status(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    query: web::Query<RoleQuery>,
) -> Result<HttpResponse, ApiError> {
    let offer_id = path.into_inner();
    let role = parse_role(&query.role)?;

    let Some(document) = load_offer(&pool, &offer_id).await? else {
        return Ok(error_codes::offer_not_found(&offer_id));
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "displayStatus": display::display_status(&document, role),
        "permissions": negotiation::action_permissions(&document, role),
        "currentTerms": negotiation::current_terms(&document),
    })))
}

/// Append a counter-offer
///
/// # Endpoint
/// POST /api/offers/{id}/counter
#[post("/api/offers/{id}/counter")]
pub async fn counter_offer(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<CounterOfferRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let offer_id = path.into_inner();
    let role = parse_role(&body.role)?;

    let Some(document) = load_offer(&pool, &offer_id).await? else {
        return Ok(error_codes::offer_not_found(&offer_id));
    };

    let request = body.into_inner();
    let terms = CounterTerms {
        amount: request.counter_amount.map(UsdAmount::from_cents),
        review_date: request.counter_review_date,
        post_date: request.counter_post_date,
        description: request.description,
        notes: request.notes,
        deliverables: request.deliverables,
    };

    match negotiation::counter(&document, role, terms) {
        Ok(updated) => {
            persist_offer(&pool, updated.clone()).await?;
            info!(offer_id = %offer_id, by = %role, "Counter-offer appended");
            Ok(HttpResponse::Ok().json(json!({ "success": true, "offer": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("OFR", &e)),
    }
}

/// Accept the offer at its current terms, creating the deal
///
/// # Endpoint
/// POST /api/offers/{id}/accept
#[post("/api/offers/{id}/accept")]
pub async fn accept_offer(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let offer_id = path.into_inner();
    let role = parse_role(&body.role)?;

    let Some(document) = load_offer(&pool, &offer_id).await? else {
        return Ok(error_codes::offer_not_found(&offer_id));
    };

    match negotiation::accept(&document, role) {
        Ok(outcome) => {
            let offer_doc = outcome.offer.clone();
            let deal_doc = outcome.deal.clone();
            let id = offer_id.clone();
            let pool2 = pool.clone();
            blocking(move || {
                let mut conn = pool2.get().context("Failed to get DB connection")?;
                let record = OfferRecord::find_by_id(&mut conn, &id)?
                    .context("Offer row disappeared mid-accept")?;
                OfferRecord::apply_document(&mut conn, &offer_doc)?;
                DealRecord::create_from_document(
                    &mut conn,
                    &id,
                    &record.creator_id,
                    &record.marketer_id,
                    &deal_doc,
                )?;
                Ok(())
            })
            .await?;

            info!(offer_id = %offer_id, deal_id = %outcome.deal.id, "Offer accepted, deal created");
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "offer": outcome.offer,
                "deal": outcome.deal,
            })))
        }
        Err(e) => Ok(error_codes::from_engine_error("OFR", &e)),
    }
}

/// Reject the offer outright
///
/// # Endpoint
/// POST /api/offers/{id}/reject
#[post("/api/offers/{id}/reject")]
pub async fn reject_offer(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let offer_id = path.into_inner();
    let role = parse_role(&body.role)?;

    let Some(document) = load_offer(&pool, &offer_id).await? else {
        return Ok(error_codes::offer_not_found(&offer_id));
    };

    match negotiation::reject(&document, role) {
        Ok(updated) => {
            persist_offer(&pool, updated.clone()).await?;
            info!(offer_id = %offer_id, by = %role, "Offer rejected");
            Ok(HttpResponse::Ok().json(json!({ "success": true, "offer": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("OFR", &e)),
    }
}

/// Move the offer into the marketer's review queue
///
/// # Endpoint
/// POST /api/offers/{id}/review
#[post("/api/offers/{id}/review")]
pub async fn review_offer(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let offer_id = path.into_inner();
    let role = parse_role(&body.role)?;

    let Some(document) = load_offer(&pool, &offer_id).await? else {
        return Ok(error_codes::offer_not_found(&offer_id));
    };

    match negotiation::mark_in_review(&document, role) {
        Ok(updated) => {
            persist_offer(&pool, updated.clone()).await?;
            Ok(HttpResponse::Ok().json(json!({ "success": true, "offer": updated })))
        }
        Err(e) => Ok(error_codes::from_engine_error("OFR", &e)),
    }
}

/// Record that the receiving party has viewed the current terms
///
/// A sender calling this is a silent no-op, mirroring the engine.
///
/// # Endpoint
/// POST /api/offers/{id}/viewed
#[post("/api/offers/{id}/viewed")]
pub async fn view_offer(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ActorRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let offer_id = path.into_inner();
    let role = parse_role(&body.role)?;

    let Some(document) = load_offer(&pool, &offer_id).await? else {
        return Ok(error_codes::offer_not_found(&offer_id));
    };

    let updated = negotiation::mark_viewed(&document, role);
    if updated != document {
        persist_offer(&pool, updated.clone()).await?;
    }
    Ok(HttpResponse::Ok().json(json!({ "success": true, "offer": updated })))
}
