//! Offer negotiation engine
//!
//! Pure state machine over an offer and its counter chain: who may act,
//! what the effective terms are, and the accept / counter / reject /
//! mark-in-review / mark-viewed transitions. Several client screens render
//! derived state from these rules; keeping them in one place is what keeps
//! reviewer permissions and status labels consistent across the product.

use chrono::NaiveDate;
use uuid::Uuid;

use pact_types::{DealStatus, OfferStatus, Role, UsdAmount};

use crate::types::deal::{Deal, OfferContent, PaymentInfo};
use crate::types::errors::{EngineError, EngineResult};
use crate::types::offer::{Counter, Offer, TermChanges, Terms};

/// What the viewing party is allowed to do with an offer right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPermissions {
    /// The viewer may accept, reject, or counter
    pub can_act: bool,
    /// The offer is sitting in the marketer's review queue
    pub is_reviewing: bool,
}

/// New terms proposed in a counter-offer; unset fields keep the current value
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterTerms {
    pub amount: Option<UsdAmount>,
    pub review_date: Option<NaiveDate>,
    pub post_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub deliverables: Option<Vec<String>>,
}

/// Result of accepting an offer: the terminal offer plus the created deal
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedOffer {
    pub offer: Offer,
    pub deal: Deal,
}

/// Compute the effective terms of an offer.
///
/// The latest counter wins field-by-field, falling back to the original
/// offer wherever the counter left a field unset. Each `changed` flag
/// compares the effective value against the ORIGINAL offer, not the
/// previous counter, because that is the diff the counterparty reviews.
pub fn current_terms(offer: &Offer) -> Terms {
    let latest = offer.latest_counter();

    let amount = latest
        .and_then(|c| c.counter_amount)
        .unwrap_or(offer.proposed_amount);
    let review_date = latest
        .and_then(|c| c.counter_review_date)
        .or(offer.desired_review_date);
    let post_date = latest
        .and_then(|c| c.counter_post_date)
        .or(offer.desired_post_date);
    let description = latest
        .and_then(|c| c.description.clone())
        .unwrap_or_else(|| offer.description.clone());
    let notes = latest
        .and_then(|c| c.notes.clone())
        .unwrap_or_else(|| offer.notes.clone());
    let deliverables = latest
        .and_then(|c| c.deliverables.clone())
        .unwrap_or_else(|| offer.deliverables.clone());

    let changed = TermChanges {
        amount: amount != offer.proposed_amount,
        review_date: review_date != offer.desired_review_date,
        post_date: post_date != offer.desired_post_date,
        description: description != offer.description,
        notes: notes != offer.notes,
        deliverables: deliverables != offer.deliverables,
    };

    Terms {
        amount,
        review_date,
        post_date,
        description,
        notes,
        deliverables,
        changed,
    }
}

/// Derive the viewer's permissions on an offer.
///
/// With no counters only the creator may act (offers are marketer-issued);
/// once the chain starts, the turn belongs to whoever did not author the
/// latest counter. Terminal offers grant nobody anything.
pub fn action_permissions(offer: &Offer, viewer: Role) -> ActionPermissions {
    let is_reviewing = offer.status == OfferStatus::InReview;

    if !offer.status.is_actionable() {
        return ActionPermissions {
            can_act: false,
            is_reviewing,
        };
    }

    let can_act = match offer.latest_counter() {
        None => viewer == Role::Creator,
        Some(counter) => viewer != counter.counter_by,
    };

    ActionPermissions {
        can_act,
        is_reviewing,
    }
}

fn ensure_can_act(offer: &Offer, viewer: Role, action: &'static str) -> EngineResult<()> {
    if !offer.status.is_actionable() {
        return Err(EngineError::invalid_transition(action, offer.status));
    }
    if !action_permissions(offer, viewer).can_act {
        return Err(EngineError::Forbidden(format!(
            "{} may not {} this offer: it is the counterparty's turn",
            viewer, action
        )));
    }
    Ok(())
}

/// Accept the offer at its current terms, producing the deal.
pub fn accept(offer: &Offer, viewer: Role) -> EngineResult<AcceptedOffer> {
    ensure_can_act(offer, viewer, "accept")?;

    let terms = current_terms(offer);

    let mut accepted = offer.clone();
    accepted.status = OfferStatus::Accepted;

    let deal_id = Uuid::new_v4().to_string();
    let deal = Deal {
        deal_number: format!("D-{}", &deal_id[..8]),
        id: deal_id,
        status: DealStatus::Accepted,
        payment_info: PaymentInfo {
            payment_amount: terms.amount,
            transactions: Vec::new(),
        },
        milestones: Vec::new(),
        offer_content: OfferContent::default(),
        proof_submissions: Vec::new(),
    };

    Ok(AcceptedOffer {
        offer: accepted,
        deal,
    })
}

/// Append a counter-offer authored by the viewer.
///
/// The offer moves to Rejected-Countered and both viewed flags reset: new
/// terms must be re-viewed by the other party.
pub fn counter(offer: &Offer, viewer: Role, terms: CounterTerms) -> EngineResult<Offer> {
    ensure_can_act(offer, viewer, "counter")?;

    let mut updated = offer.clone();
    updated.counters.push(Counter {
        counter_by: viewer,
        counter_amount: terms.amount,
        counter_review_date: terms.review_date,
        counter_post_date: terms.post_date,
        description: terms.description,
        notes: terms.notes,
        deliverables: terms.deliverables,
    });
    updated.status = OfferStatus::RejectedCountered;
    updated.viewed_by_creator = false;
    updated.viewed_by_marketer = false;

    Ok(updated)
}

/// Reject the offer outright (terminal).
pub fn reject(offer: &Offer, viewer: Role) -> EngineResult<Offer> {
    ensure_can_act(offer, viewer, "reject")?;

    let mut updated = offer.clone();
    updated.status = OfferStatus::Rejected;
    Ok(updated)
}

/// Move the offer into the marketer's review queue.
///
/// Marketer-only. Idempotent: re-invoking while already in review is a no-op
/// (the UI disables the button; the engine does not treat it as an error).
pub fn mark_in_review(offer: &Offer, viewer: Role) -> EngineResult<Offer> {
    if viewer != Role::Marketer {
        return Err(EngineError::Forbidden(
            "only the marketer may move an offer into review".to_string(),
        ));
    }
    if offer.status == OfferStatus::InReview {
        return Ok(offer.clone());
    }
    if !offer.status.is_actionable() {
        return Err(EngineError::invalid_transition("review", offer.status));
    }

    let mut updated = offer.clone();
    updated.status = OfferStatus::InReview;
    Ok(updated)
}

/// Record that the receiving party has viewed the current terms.
///
/// Only the receiver (the party that did not author the latest counter) may
/// mark viewed; for the sender this is a no-op, not an error.
pub fn mark_viewed(offer: &Offer, viewer: Role) -> Offer {
    if viewer != offer.receiver() {
        return offer.clone();
    }

    let mut updated = offer.clone();
    match viewer {
        Role::Creator => updated.viewed_by_creator = true,
        Role::Marketer => updated.viewed_by_marketer = true,
    }
    updated
}
