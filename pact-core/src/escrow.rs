//! Deal escrow engine
//!
//! Pure arithmetic over a deal's transaction ledger and milestone list, plus
//! the release gating and the deal content/cancellation workflow. The summary
//! figures here are shown to both parties on several screens; the numbers
//! must come out identical everywhere or the product breaks (double payment,
//! stuck deals), which is why this is one fold instead of per-screen math.

use chrono::Utc;
use uuid::Uuid;

use pact_types::{DealStatus, ProofStatus, Role, TransactionType, UsdAmount};

use crate::types::deal::{Deal, Feedback, LedgerTransaction, ProofSubmission};
use crate::types::errors::{EngineError, EngineResult};

/// Summary figures for a deal's payment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscrowSummary {
    /// Base contract value plus all milestone commitments
    pub project_price: UsdAmount,
    /// Funds committed but not yet released
    pub in_escrow: UsdAmount,
    pub milestones_paid_count: u32,
    pub milestones_paid_amount: UsdAmount,
    pub milestones_remaining_count: u32,
    pub milestones_remaining_amount: UsdAmount,
    /// Everything released to the creator so far
    pub total_earnings: UsdAmount,
}

#[derive(Debug, Clone, Copy, Default)]
struct SummaryAccumulator {
    in_escrow: i64,
    earnings: i64,
    paid_count: u32,
    paid_cents: i64,
    remaining_count: u32,
    remaining_cents: i64,
}

/// Compute the escrow summary for a deal.
///
/// Single pure fold over the ledger and the milestone list. Accumulators are
/// signed and the floor-at-zero is applied once at the end, so the result
/// does not depend on transaction order.
///
/// Releases subtract from the same accumulator the escrow adds feed,
/// whether the escrow came from the base contract or a milestone; there is
/// no per-bucket tag. This mirrors the shipped accounting exactly; the
/// canonical fixtures in the offline suite pin these outputs.
pub fn summarize(deal: &Deal) -> EscrowSummary {
    let base = deal.payment_info.payment_amount;

    // A cancelled deal zeroes every derived figure; only the contracted
    // price survives for display.
    if deal.status == DealStatus::Cancelled {
        return EscrowSummary {
            project_price: base,
            in_escrow: UsdAmount::ZERO,
            milestones_paid_count: 0,
            milestones_paid_amount: UsdAmount::ZERO,
            milestones_remaining_count: 0,
            milestones_remaining_amount: UsdAmount::ZERO,
            total_earnings: UsdAmount::ZERO,
        };
    }

    let after_ledger = deal
        .payment_info
        .transactions
        .iter()
        .filter(|t| t.is_base_contract())
        .fold(SummaryAccumulator::default(), |mut acc, t| {
            match t.tx_type {
                TransactionType::Escrow => acc.in_escrow += t.payment_amount.cents(),
                TransactionType::ReleaseHalf | TransactionType::ReleaseFinal => {
                    acc.earnings += t.payment_amount.cents();
                    acc.in_escrow -= t.payment_amount.cents();
                }
            }
            acc
        });

    let acc = deal
        .milestones
        .iter()
        .fold(after_ledger, |mut acc, m| {
            let value = m.total_value().cents();
            if m.status.is_escrowed() {
                acc.in_escrow += value;
            }
            if m.status.is_paid_out() {
                acc.paid_count += 1;
                acc.paid_cents += value;
                acc.in_escrow -= value;
                acc.earnings += value;
            }
            if m.status.is_remaining() {
                acc.remaining_count += 1;
                acc.remaining_cents += value;
            }
            acc
        });

    EscrowSummary {
        project_price: UsdAmount::from_cents(base.cents() + acc.paid_cents + acc.remaining_cents),
        in_escrow: UsdAmount::from_cents(acc.in_escrow.max(0)),
        milestones_paid_count: acc.paid_count,
        milestones_paid_amount: UsdAmount::from_cents(acc.paid_cents),
        milestones_remaining_count: acc.remaining_count,
        milestones_remaining_amount: UsdAmount::from_cents(acc.remaining_cents),
        total_earnings: UsdAmount::from_cents(acc.earnings.max(0)),
    }
}

/// First-half release is available until it happens, while the deal is in
/// the accepted or content-submitted stage.
pub fn can_release_first_half(deal: &Deal) -> bool {
    matches!(
        deal.status,
        DealStatus::Accepted | DealStatus::ContentForApprovalSubmitted
    ) && !deal.has_release_half()
}

/// The final release strictly requires a prior first-half release.
pub fn can_release_final(deal: &Deal) -> bool {
    deal.has_release_half()
}

fn ledger_entry(tx_type: TransactionType, amount: UsdAmount) -> LedgerTransaction {
    LedgerTransaction {
        transaction_id: Uuid::new_v4().to_string(),
        tx_type,
        payment_amount: amount,
        milestone_id: None,
        created_at: Utc::now().naive_utc(),
    }
}

/// Release the first half (50%) of the base contract amount.
pub fn release_first_half(deal: &Deal) -> EngineResult<Deal> {
    if !can_release_first_half(deal) {
        return Err(EngineError::invalid_transition(
            "release first half",
            deal.status,
        ));
    }

    let half = UsdAmount::from_cents(deal.payment_info.payment_amount.cents() / 2);

    let mut updated = deal.clone();
    updated
        .payment_info
        .transactions
        .push(ledger_entry(TransactionType::ReleaseHalf, half));
    Ok(updated)
}

/// Release the remaining balance of the base contract amount.
///
/// Gated on the first-half release having already occurred; without it the
/// caller gets `PrerequisiteNotMet`, surfaced to the user rather than
/// silently allowed.
pub fn release_final(deal: &Deal) -> EngineResult<Deal> {
    if !can_release_final(deal) {
        return Err(EngineError::PrerequisiteNotMet(
            "the first-half release must occur before the final release".to_string(),
        ));
    }

    let released: i64 = deal
        .payment_info
        .transactions
        .iter()
        .filter(|t| t.is_base_contract() && t.tx_type.is_release())
        .map(|t| t.payment_amount.cents())
        .sum();
    let remaining =
        UsdAmount::from_cents((deal.payment_info.payment_amount.cents() - released).max(0));

    let mut updated = deal.clone();
    updated
        .payment_info
        .transactions
        .push(ledger_entry(TransactionType::ReleaseFinal, remaining));
    Ok(updated)
}

// ============================================================================
// DEAL CONTENT WORKFLOW
// ============================================================================

fn ensure_transition(deal: &Deal, to: DealStatus, action: &'static str) -> EngineResult<()> {
    if !deal.status.valid_transitions().contains(&to) {
        return Err(EngineError::invalid_transition(action, deal.status));
    }
    Ok(())
}

/// Creator submits proof-of-work for the marketer to review.
pub fn submit_proof(
    deal: &Deal,
    actor: Role,
    attachments: Vec<String>,
) -> EngineResult<Deal> {
    if actor != Role::Creator {
        return Err(EngineError::Forbidden(
            "only the creator may submit proof of work".to_string(),
        ));
    }
    if attachments.is_empty() {
        return Err(EngineError::ValidationError(
            "a proof submission needs at least one attachment".to_string(),
        ));
    }
    ensure_transition(deal, DealStatus::ContentForApprovalSubmitted, "submit proof")?;

    let mut updated = deal.clone();
    updated.proof_submissions.push(ProofSubmission {
        id: Uuid::new_v4().to_string(),
        attachments,
        submitted_at: Utc::now().naive_utc(),
        submitted_by: actor,
        status: ProofStatus::PendingReview,
        feedback: Vec::new(),
    });
    updated.status = DealStatus::ContentForApprovalSubmitted;
    Ok(updated)
}

/// Marketer reviews a pending proof submission.
///
/// Approval moves the deal to Content Approved; a revision request records
/// the feedback on the proof and puts the deal back in process.
pub fn review_proof(
    deal: &Deal,
    actor: Role,
    proof_id: &str,
    decision: pact_types::ReviewDecision,
    feedback: Option<String>,
) -> EngineResult<Deal> {
    if actor != Role::Marketer {
        return Err(EngineError::Forbidden(
            "only the marketer may review proof submissions".to_string(),
        ));
    }

    let proof = deal
        .find_proof(proof_id)
        .ok_or_else(|| EngineError::ValidationError(format!("unknown proof: {}", proof_id)))?;
    if proof.status != ProofStatus::PendingReview {
        return Err(EngineError::invalid_transition(
            "review proof",
            proof.status.as_str(),
        ));
    }

    let target = match decision {
        pact_types::ReviewDecision::Approved => DealStatus::ContentApproved,
        pact_types::ReviewDecision::RevisionRequired => DealStatus::InProcess,
    };
    ensure_transition(deal, target, "review proof")?;

    let mut updated = deal.clone();
    if let Some(proof) = updated
        .proof_submissions
        .iter_mut()
        .find(|p| p.id == proof_id)
    {
        match decision {
            pact_types::ReviewDecision::Approved => {
                proof.status = ProofStatus::Approved;
            }
            pact_types::ReviewDecision::RevisionRequired => {
                proof.status = ProofStatus::RevisionRequired;
                if let Some(message) = feedback {
                    proof.feedback.push(Feedback {
                        author: actor,
                        message,
                        created_at: Utc::now().naive_utc(),
                    });
                }
            }
        }
    }
    updated.status = target;
    Ok(updated)
}

/// Creator marks the approved content as posted on the agreed platform.
pub fn mark_final_posted(deal: &Deal, actor: Role) -> EngineResult<Deal> {
    if actor != Role::Creator {
        return Err(EngineError::Forbidden(
            "only the creator may mark content as posted".to_string(),
        ));
    }
    ensure_transition(deal, DealStatus::FinalContentPosted, "mark final posted")?;

    let mut updated = deal.clone();
    updated.status = DealStatus::FinalContentPosted;
    Ok(updated)
}

/// Marketer approves the final posted content and releases the remaining
/// balance in one step.
///
/// This is where the final-proof gate lives: without a prior first-half
/// release the whole action fails with `PrerequisiteNotMet` and nothing
/// changes, neither the status nor the ledger.
pub fn issue_completion_payment(deal: &Deal, actor: Role) -> EngineResult<Deal> {
    if actor != Role::Marketer {
        return Err(EngineError::Forbidden(
            "only the marketer may issue the completion payment".to_string(),
        ));
    }
    ensure_transition(
        deal,
        DealStatus::CompletionPaymentIssued,
        "issue completion payment",
    )?;

    let mut updated = release_final(deal)?;

    // The outstanding final proof rides along with the payment approval
    if let Some(proof) = updated
        .proof_submissions
        .iter_mut()
        .rev()
        .find(|p| p.status == ProofStatus::PendingReview)
    {
        proof.status = ProofStatus::Approved;
    }

    updated.status = DealStatus::CompletionPaymentIssued;
    Ok(updated)
}

// ============================================================================
// CANCELLATION
// ============================================================================

/// Either party opens a cancellation request.
pub fn request_cancellation(deal: &Deal) -> EngineResult<Deal> {
    ensure_transition(deal, DealStatus::Cancellation, "request cancellation")?;

    let mut updated = deal.clone();
    updated.status = DealStatus::Cancellation;
    Ok(updated)
}

/// Confirm a pending cancellation request (terminal).
pub fn confirm_cancellation(deal: &Deal) -> EngineResult<Deal> {
    if deal.status != DealStatus::Cancellation && deal.status != DealStatus::Accepted {
        return Err(EngineError::invalid_transition(
            "confirm cancellation",
            deal.status,
        ));
    }

    let mut updated = deal.clone();
    updated.status = DealStatus::Cancelled;
    Ok(updated)
}

/// Withdraw a pending cancellation request and resume the deal.
pub fn withdraw_cancellation(deal: &Deal) -> EngineResult<Deal> {
    if deal.status != DealStatus::Cancellation {
        return Err(EngineError::invalid_transition(
            "withdraw cancellation",
            deal.status,
        ));
    }

    let mut updated = deal.clone();
    updated.status = DealStatus::InProcess;
    Ok(updated)
}
