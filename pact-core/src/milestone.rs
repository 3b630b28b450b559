//! Milestone lifecycle
//!
//! State machine for a single milestone:
//!
//! ```text
//! pending ──fund──▶ active ──submit──▶ in_review ──approve──▶ completed
//!                     ▲                    │
//!                     │                 request
//!                  resubmit             revision
//!                     │                    ▼
//!                     └──────── revision_required
//! ```
//!
//! Funding locks the milestone: edit and delete are refused unconditionally
//! once `funded_at` is set, whatever the status.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use pact_types::{MilestoneStatus, ReviewDecision, Role, UsdAmount};

use crate::types::deal::{Deliverable, Feedback, Milestone};
use crate::types::errors::{EngineError, EngineResult};

/// Minimum milestone amount: 100 currency units
pub const MIN_MILESTONE_AMOUNT: UsdAmount = UsdAmount(10_000);

/// Fields for creating a milestone
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneDraft {
    pub name: String,
    pub amount: UsdAmount,
    pub bonus: UsdAmount,
    pub due_date: Option<NaiveDate>,
    pub description: String,
}

/// Partial edit of an unfunded milestone; unset fields keep their value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilestoneEdit {
    pub name: Option<String>,
    pub amount: Option<UsdAmount>,
    pub bonus: Option<UsdAmount>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

fn validate_fields(name: &str, amount: UsdAmount) -> EngineResult<()> {
    if name.trim().is_empty() {
        return Err(EngineError::ValidationError(
            "milestone name is required".to_string(),
        ));
    }
    if amount < MIN_MILESTONE_AMOUNT {
        return Err(EngineError::ValidationError(format!(
            "milestone amount must be at least {}, got {}",
            MIN_MILESTONE_AMOUNT, amount
        )));
    }
    Ok(())
}

/// Create a new pending milestone, validating the field invariants first.
pub fn create(draft: MilestoneDraft) -> EngineResult<Milestone> {
    validate_fields(&draft.name, draft.amount)?;

    Ok(Milestone {
        id: Uuid::new_v4().to_string(),
        name: draft.name,
        amount: draft.amount,
        bonus: draft.bonus,
        due_date: draft.due_date,
        description: draft.description,
        status: MilestoneStatus::Pending,
        funded_at: None,
        completed_at: None,
        deliverables: Vec::new(),
        feedback: Vec::new(),
    })
}

/// Fund the milestone's escrow. Allowed only from pending.
pub fn fund(milestone: &Milestone) -> EngineResult<Milestone> {
    if milestone.status != MilestoneStatus::Pending {
        return Err(EngineError::invalid_transition("fund", milestone.status));
    }

    let mut updated = milestone.clone();
    updated.status = MilestoneStatus::Active;
    updated.funded_at = Some(Utc::now().naive_utc());
    Ok(updated)
}

/// Submit work for review. Allowed from the funded stage and after a
/// revision request; each submission appends a deliverable block.
pub fn submit_work(milestone: &Milestone, content: String, files: Vec<String>) -> EngineResult<Milestone> {
    if !milestone.status.accepts_submission() {
        return Err(EngineError::invalid_transition(
            "submit work",
            milestone.status,
        ));
    }

    let mut updated = milestone.clone();
    updated.deliverables.push(Deliverable {
        content,
        files,
        submitted_at: Utc::now().naive_utc(),
        submitted_by: Role::Creator,
    });
    updated.status = MilestoneStatus::InReview;
    Ok(updated)
}

/// Review submitted work. Allowed only from in_review.
///
/// Approval sets `completed_at` (once, on first approval) and completes the
/// milestone, which flips its escrow into paid-out in the deal summary. A
/// revision request records the feedback and sends the milestone back for
/// another submission.
pub fn review(
    milestone: &Milestone,
    decision: ReviewDecision,
    feedback: Option<String>,
) -> EngineResult<Milestone> {
    if milestone.status != MilestoneStatus::InReview {
        return Err(EngineError::invalid_transition("review", milestone.status));
    }

    let mut updated = milestone.clone();
    match decision {
        ReviewDecision::Approved => {
            updated.status = MilestoneStatus::Completed;
            if updated.completed_at.is_none() {
                updated.completed_at = Some(Utc::now().naive_utc());
            }
        }
        ReviewDecision::RevisionRequired => {
            updated.status = MilestoneStatus::RevisionRequired;
            if let Some(message) = feedback {
                updated.feedback.push(Feedback {
                    author: Role::Marketer,
                    message,
                    created_at: Utc::now().naive_utc(),
                });
            }
        }
    }
    Ok(updated)
}

/// Edit an unfunded milestone. Refused unconditionally once funded.
pub fn edit(milestone: &Milestone, changes: MilestoneEdit) -> EngineResult<Milestone> {
    if milestone.is_locked() {
        return Err(EngineError::Forbidden(
            "a funded milestone can no longer be edited".to_string(),
        ));
    }

    let name = changes.name.unwrap_or_else(|| milestone.name.clone());
    let amount = changes.amount.unwrap_or(milestone.amount);
    validate_fields(&name, amount)?;

    let mut updated = milestone.clone();
    updated.name = name;
    updated.amount = amount;
    if let Some(bonus) = changes.bonus {
        updated.bonus = bonus;
    }
    if let Some(due_date) = changes.due_date {
        updated.due_date = Some(due_date);
    }
    if let Some(description) = changes.description {
        updated.description = description;
    }
    Ok(updated)
}

/// Check that the milestone may be deleted. Refused once funded.
pub fn ensure_deletable(milestone: &Milestone) -> EngineResult<()> {
    if milestone.is_locked() {
        return Err(EngineError::Forbidden(
            "a funded milestone can no longer be deleted".to_string(),
        ));
    }
    Ok(())
}
