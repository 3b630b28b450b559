//! Status enums for offers, deals, milestones, and payments
//!
//! Wire strings match the documents the client applications exchange with the
//! backend exactly ("Rejected-Countered", "release_half", ...), so these types
//! round-trip through serde without translation tables.

use serde::{Deserialize, Serialize};

// ============================================================================
// OFFER STATUS
// ============================================================================

/// Lifecycle status of an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferStatus {
    Draft,
    Sent,
    #[serde(rename = "Offer in Review")]
    InReview,
    Rejected,
    #[serde(rename = "Rejected-Countered")]
    RejectedCountered,
    Accepted,
    Cancelled,
    Deleted,
}

impl OfferStatus {
    /// Terminal offer states admit no further negotiation actions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OfferStatus::Accepted | OfferStatus::Rejected | OfferStatus::Cancelled
        )
    }

    /// An offer is actionable once sent and before reaching a terminal state
    pub fn is_actionable(&self) -> bool {
        !self.is_terminal() && !matches!(self, OfferStatus::Draft | OfferStatus::Deleted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Draft => "Draft",
            OfferStatus::Sent => "Sent",
            OfferStatus::InReview => "Offer in Review",
            OfferStatus::Rejected => "Rejected",
            OfferStatus::RejectedCountered => "Rejected-Countered",
            OfferStatus::Accepted => "Accepted",
            OfferStatus::Cancelled => "Cancelled",
            OfferStatus::Deleted => "Deleted",
        }
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OfferStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(OfferStatus::Draft),
            "Sent" => Ok(OfferStatus::Sent),
            "Offer in Review" => Ok(OfferStatus::InReview),
            "Rejected" => Ok(OfferStatus::Rejected),
            "Rejected-Countered" => Ok(OfferStatus::RejectedCountered),
            "Accepted" => Ok(OfferStatus::Accepted),
            "Cancelled" => Ok(OfferStatus::Cancelled),
            "Deleted" => Ok(OfferStatus::Deleted),
            _ => Err(format!("Unknown offer status: {}", s)),
        }
    }
}

// ============================================================================
// DEAL STATUS
// ============================================================================

/// Lifecycle status of a deal (created upon offer acceptance)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealStatus {
    Accepted,
    #[serde(rename = "In-Process")]
    InProcess,
    Cancellation,
    #[serde(rename = "Content for Approval Submitted")]
    ContentForApprovalSubmitted,
    #[serde(rename = "Content Approved")]
    ContentApproved,
    #[serde(rename = "Final Content Posted")]
    FinalContentPosted,
    #[serde(rename = "Completion Payment Issued")]
    CompletionPaymentIssued,
    Cancelled,
}

impl DealStatus {
    /// Check if this is a terminal (final) state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DealStatus::CompletionPaymentIssued | DealStatus::Cancelled
        )
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> Vec<DealStatus> {
        use DealStatus::*;
        match self {
            Accepted => vec![InProcess, ContentForApprovalSubmitted, Cancellation, Cancelled],
            InProcess => vec![ContentForApprovalSubmitted, Cancellation],
            Cancellation => vec![Cancelled, InProcess],
            ContentForApprovalSubmitted => vec![ContentApproved, InProcess, Cancellation],
            ContentApproved => vec![FinalContentPosted, Cancellation],
            FinalContentPosted => vec![CompletionPaymentIssued],
            CompletionPaymentIssued => vec![], // Terminal
            Cancelled => vec![],               // Terminal
        }
    }

    pub fn as_str(&self) -> &'static str {
        use DealStatus::*;
        match self {
            Accepted => "Accepted",
            InProcess => "In-Process",
            Cancellation => "Cancellation",
            ContentForApprovalSubmitted => "Content for Approval Submitted",
            ContentApproved => "Content Approved",
            FinalContentPosted => "Final Content Posted",
            CompletionPaymentIssued => "Completion Payment Issued",
            Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for DealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DealStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use DealStatus::*;
        match s {
            "Accepted" => Ok(Accepted),
            "In-Process" => Ok(InProcess),
            "Cancellation" => Ok(Cancellation),
            "Content for Approval Submitted" => Ok(ContentForApprovalSubmitted),
            "Content Approved" => Ok(ContentApproved),
            "Final Content Posted" => Ok(FinalContentPosted),
            "Completion Payment Issued" => Ok(CompletionPaymentIssued),
            "Cancelled" => Ok(Cancelled),
            _ => Err(format!("Unknown deal status: {}", s)),
        }
    }
}

// ============================================================================
// MILESTONE STATUS
// ============================================================================

/// Lifecycle status of a milestone within a deal
///
/// `Active` and `Paid` are two wire spellings of the same funded stage;
/// funding produces `Active`, both parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Pending,
    Proposed,
    Active,
    Paid,
    InReview,
    RevisionRequired,
    Completed,
}

impl MilestoneStatus {
    /// Escrow is held for milestones that are funded but not yet paid out
    pub fn is_escrowed(&self) -> bool {
        matches!(
            self,
            MilestoneStatus::Active
                | MilestoneStatus::InReview
                | MilestoneStatus::Paid
                | MilestoneStatus::RevisionRequired
        )
    }

    /// Paid-out milestones count toward earnings
    pub fn is_paid_out(&self) -> bool {
        matches!(self, MilestoneStatus::Completed | MilestoneStatus::Paid)
    }

    /// Remaining = not yet paid out (a funded milestone is both escrowed and
    /// remaining until it completes)
    pub fn is_remaining(&self) -> bool {
        matches!(
            self,
            MilestoneStatus::Pending
                | MilestoneStatus::Proposed
                | MilestoneStatus::Active
                | MilestoneStatus::InReview
                | MilestoneStatus::RevisionRequired
        )
    }

    /// The funded stage accepts work submissions
    pub fn accepts_submission(&self) -> bool {
        matches!(
            self,
            MilestoneStatus::Active | MilestoneStatus::Paid | MilestoneStatus::RevisionRequired
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneStatus::Pending => "pending",
            MilestoneStatus::Proposed => "proposed",
            MilestoneStatus::Active => "active",
            MilestoneStatus::Paid => "paid",
            MilestoneStatus::InReview => "in_review",
            MilestoneStatus::RevisionRequired => "revision_required",
            MilestoneStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MilestoneStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MilestoneStatus::Pending),
            "proposed" => Ok(MilestoneStatus::Proposed),
            "active" => Ok(MilestoneStatus::Active),
            "paid" => Ok(MilestoneStatus::Paid),
            "in_review" => Ok(MilestoneStatus::InReview),
            "revision_required" => Ok(MilestoneStatus::RevisionRequired),
            "completed" => Ok(MilestoneStatus::Completed),
            _ => Err(format!("Unknown milestone status: {}", s)),
        }
    }
}

// ============================================================================
// PROOF SUBMISSION STATUS
// ============================================================================

/// Review status of a proof-of-work submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofStatus {
    PendingReview,
    Approved,
    RevisionRequired,
}

impl ProofStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofStatus::PendingReview => "pending_review",
            ProofStatus::Approved => "approved",
            ProofStatus::RevisionRequired => "revision_required",
        }
    }
}

impl std::str::FromStr for ProofStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_review" => Ok(ProofStatus::PendingReview),
            "approved" => Ok(ProofStatus::Approved),
            "revision_required" => Ok(ProofStatus::RevisionRequired),
            _ => Err(format!("Unknown proof status: {}", s)),
        }
    }
}

// ============================================================================
// PAYMENT TRANSACTION TYPE
// ============================================================================

/// Type of a payment-ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Funds committed to the deal or a milestone, not yet released
    Escrow,
    /// First-half release of the base contract amount
    ReleaseHalf,
    /// Final release of the remaining balance
    ReleaseFinal,
}

impl TransactionType {
    pub fn is_release(&self) -> bool {
        matches!(
            self,
            TransactionType::ReleaseHalf | TransactionType::ReleaseFinal
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Escrow => "escrow",
            TransactionType::ReleaseHalf => "release_half",
            TransactionType::ReleaseFinal => "release_final",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "escrow" => Ok(TransactionType::Escrow),
            "release_half" => Ok(TransactionType::ReleaseHalf),
            "release_final" => Ok(TransactionType::ReleaseFinal),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

// ============================================================================
// REVIEW DECISION
// ============================================================================

/// Reviewer verdict on submitted work (milestones and proofs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approved,
    RevisionRequired,
}

impl ReviewDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewDecision::Approved => "approved",
            ReviewDecision::RevisionRequired => "revision_required",
        }
    }
}

impl std::str::FromStr for ReviewDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ReviewDecision::Approved),
            "revision_required" => Ok(ReviewDecision::RevisionRequired),
            _ => Err(format!("Unknown review decision: {}", s)),
        }
    }
}
