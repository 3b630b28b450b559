//! Deal documents: payment ledger, milestones, proof submissions
//!
//! A deal is created when an offer is accepted. Its payment lifecycle is a
//! ledger of append-only transactions (escrow funding, first-half release,
//! final release) plus a list of milestones, each with its own funding and
//! review lifecycle.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use pact_types::{DealStatus, MilestoneStatus, ProofStatus, Role, TransactionType, UsdAmount};

/// A single payment-ledger event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    pub transaction_id: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub payment_amount: UsdAmount,
    /// Set for milestone-level escrow funding; absent for base-contract events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<String>,
    pub created_at: NaiveDateTime,
}

impl LedgerTransaction {
    /// Base-contract transactions are not tied to any milestone
    pub fn is_base_contract(&self) -> bool {
        self.milestone_id.is_none()
    }
}

/// Contracted amount and the transaction ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    /// Base contracted amount agreed at acceptance
    pub payment_amount: UsdAmount,
    /// Append-only, oldest first
    pub transactions: Vec<LedgerTransaction>,
}

/// A submission block attached to a milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
    pub content: String,
    pub files: Vec<String>,
    pub submitted_at: NaiveDateTime,
    pub submitted_by: Role,
}

/// A reviewer or counterparty comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub author: Role,
    pub message: String,
    pub created_at: NaiveDateTime,
}

/// A discrete unit of deliverable work with its own funding/review lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    pub amount: UsdAmount,
    pub bonus: UsdAmount,
    pub due_date: Option<NaiveDate>,
    pub description: String,
    pub status: MilestoneStatus,
    /// Set once when escrow funding happens; editing is locked from then on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funded_at: Option<NaiveDateTime>,
    /// Set once on first approval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>,
    pub deliverables: Vec<Deliverable>,
    pub feedback: Vec<Feedback>,
}

impl Milestone {
    /// Escrowed value of this milestone (base amount plus bonus)
    pub fn total_value(&self) -> UsdAmount {
        self.amount.saturating_add(self.bonus)
    }

    /// Editing and deletion are permitted only before escrow funding
    pub fn is_locked(&self) -> bool {
        self.funded_at.is_some()
    }
}

/// Creator-submitted evidence of completed work awaiting marketer review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofSubmission {
    pub id: String,
    pub attachments: Vec<String>,
    pub submitted_at: NaiveDateTime,
    pub submitted_by: Role,
    pub status: ProofStatus,
    pub feedback: Vec<Feedback>,
}

/// Feedback thread on the deal's offered content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferContent {
    pub feedback: Vec<Feedback>,
}

/// A deal between a creator and a marketer, created upon offer acceptance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub deal_number: String,
    pub status: DealStatus,
    pub payment_info: PaymentInfo,
    pub milestones: Vec<Milestone>,
    pub offer_content: OfferContent,
    pub proof_submissions: Vec<ProofSubmission>,
}

impl Deal {
    /// Whether the first-half release has already been recorded
    pub fn has_release_half(&self) -> bool {
        self.payment_info
            .transactions
            .iter()
            .any(|t| t.is_base_contract() && t.tx_type == TransactionType::ReleaseHalf)
    }

    /// Whether the final release has already been recorded
    pub fn has_release_final(&self) -> bool {
        self.payment_info
            .transactions
            .iter()
            .any(|t| t.is_base_contract() && t.tx_type == TransactionType::ReleaseFinal)
    }

    pub fn find_milestone(&self, milestone_id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == milestone_id)
    }

    pub fn find_proof(&self, proof_id: &str) -> Option<&ProofSubmission> {
        self.proof_submissions.iter().find(|p| p.id == proof_id)
    }
}
