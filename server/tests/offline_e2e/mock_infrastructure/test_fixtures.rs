//! Document fixtures shared across the offline suite
//!
//! Fixed timestamps keep the fixtures deterministic; the engines never read
//! the wall clock for decisions, only for stamping new records.

use chrono::{NaiveDate, NaiveDateTime};

use pact_core::{Deal, LedgerTransaction, Milestone, Offer, OfferContent, PaymentInfo};
use pact_types::{DealStatus, MilestoneStatus, OfferStatus, TransactionType, UsdAmount};

/// Fixed reference timestamp for fixture records
pub fn fixture_time(offset_secs: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        + chrono::Duration::seconds(offset_secs)
}

/// A freshly sent marketer offer with no counters
pub fn sent_offer(amount_cents: i64) -> Offer {
    Offer {
        id: "offer-1".to_string(),
        offer_name: "Spring campaign".to_string(),
        description: "Three short-form videos".to_string(),
        proposed_amount: UsdAmount::from_cents(amount_cents),
        deliverables: vec!["instagram".to_string(), "tiktok".to_string()],
        desired_review_date: NaiveDate::from_ymd_opt(2025, 3, 10),
        desired_post_date: NaiveDate::from_ymd_opt(2025, 3, 20),
        notes: String::new(),
        attachments: vec![],
        status: OfferStatus::Sent,
        counters: vec![],
        viewed_by_creator: false,
        viewed_by_marketer: false,
    }
}

/// An accepted deal with the given contract amount and nothing else
pub fn base_deal(payment_cents: i64) -> Deal {
    Deal {
        id: "deal-1".to_string(),
        deal_number: "D-0001".to_string(),
        status: DealStatus::Accepted,
        payment_info: PaymentInfo {
            payment_amount: UsdAmount::from_cents(payment_cents),
            transactions: vec![],
        },
        milestones: vec![],
        offer_content: OfferContent::default(),
        proof_submissions: vec![],
    }
}

/// A milestone fixture with the given escrow classification
pub fn milestone_with(
    id: &str,
    amount_cents: i64,
    bonus_cents: i64,
    status: MilestoneStatus,
) -> Milestone {
    Milestone {
        id: id.to_string(),
        name: format!("Milestone {}", id),
        amount: UsdAmount::from_cents(amount_cents),
        bonus: UsdAmount::from_cents(bonus_cents),
        due_date: None,
        description: String::new(),
        status,
        funded_at: None,
        completed_at: None,
        deliverables: vec![],
        feedback: vec![],
    }
}

/// A ledger transaction fixture
pub fn transaction(
    id: &str,
    tx_type: TransactionType,
    amount_cents: i64,
    milestone_id: Option<&str>,
) -> LedgerTransaction {
    LedgerTransaction {
        transaction_id: id.to_string(),
        tx_type,
        payment_amount: UsdAmount::from_cents(amount_cents),
        milestone_id: milestone_id.map(str::to_string),
        created_at: fixture_time(0),
    }
}
