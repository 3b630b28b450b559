//! Deal Workflow Tests
//!
//! The deal status machine (content submission → approval → posting →
//! completion payment, plus the cancellation branch), driven both through
//! the engine operations and as random walks over the transition table.

use std::collections::HashSet;

use pact_core::escrow::{
    confirm_cancellation, issue_completion_payment, mark_final_posted, release_first_half,
    request_cancellation, review_proof, submit_proof, withdraw_cancellation,
};
use pact_core::EngineError;
use pact_types::{DealStatus, ProofStatus, ReviewDecision, Role};

use crate::mock_infrastructure::{base_deal, DeterministicRng};

// ============================================================================
// STATUS MACHINE INVARIANTS
// ============================================================================

const ALL_STATES: [DealStatus; 8] = [
    DealStatus::Accepted,
    DealStatus::InProcess,
    DealStatus::Cancellation,
    DealStatus::ContentForApprovalSubmitted,
    DealStatus::ContentApproved,
    DealStatus::FinalContentPosted,
    DealStatus::CompletionPaymentIssued,
    DealStatus::Cancelled,
];

#[test]
fn test_terminal_states_have_no_transitions() {
    for state in ALL_STATES {
        if state.is_terminal() {
            assert!(
                state.valid_transitions().is_empty(),
                "Terminal state {:?} should have no transitions",
                state
            );
        } else {
            assert!(
                !state.valid_transitions().is_empty(),
                "Non-terminal state {:?} should have transitions",
                state
            );
        }
    }
}

#[test]
fn test_all_states_reachable_from_accepted() {
    let mut visited = HashSet::new();
    let mut queue = vec![DealStatus::Accepted];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }
        for next in state.valid_transitions() {
            if !visited.contains(&next) {
                queue.push(next);
            }
        }
    }

    for state in ALL_STATES {
        assert!(
            visited.contains(&state),
            "State {:?} should be reachable from Accepted",
            state
        );
    }
}

#[test]
fn test_random_walks_end_terminal() {
    let mut rng = DeterministicRng::with_name("deal_walks");

    for _ in 0..100 {
        let mut status = DealStatus::Accepted;
        let mut steps = 0;

        while !status.is_terminal() {
            let options = status.valid_transitions();
            let idx = rng.gen_range(options.len() as u64) as usize;
            status = options[idx];

            steps += 1;
            assert!(steps < 100, "walk should terminate, stuck at {:?}", status);
        }

        assert!(status.is_terminal());
    }
}

// ============================================================================
// CONTENT FLOW
// ============================================================================

#[test]
fn test_full_happy_path_to_completion() {
    let deal = base_deal(100_000);

    // Marketer funds the first half while the deal is accepted
    let deal = release_first_half(&deal).unwrap();

    // Creator submits, marketer approves
    let deal = submit_proof(&deal, Role::Creator, vec!["final.mp4".to_string()]).unwrap();
    assert_eq!(deal.status, DealStatus::ContentForApprovalSubmitted);

    let proof_id = deal.proof_submissions[0].id.clone();
    let deal = review_proof(&deal, Role::Marketer, &proof_id, ReviewDecision::Approved, None)
        .unwrap();
    assert_eq!(deal.status, DealStatus::ContentApproved);

    // Creator posts, marketer completes (final release rides along)
    let deal = mark_final_posted(&deal, Role::Creator).unwrap();
    let deal = issue_completion_payment(&deal, Role::Marketer).unwrap();

    assert_eq!(deal.status, DealStatus::CompletionPaymentIssued);
    assert!(deal.status.is_terminal());
    assert!(deal.has_release_half());
    assert!(deal.has_release_final());
}

#[test]
fn test_completion_blocked_without_first_half() {
    let deal = base_deal(100_000);
    let deal = submit_proof(&deal, Role::Creator, vec!["final.mp4".to_string()]).unwrap();
    let proof_id = deal.proof_submissions[0].id.clone();
    let deal = review_proof(&deal, Role::Marketer, &proof_id, ReviewDecision::Approved, None)
        .unwrap();
    let deal = mark_final_posted(&deal, Role::Creator).unwrap();

    let before = deal.clone();
    let err = issue_completion_payment(&deal, Role::Marketer).unwrap_err();
    assert!(matches!(err, EngineError::PrerequisiteNotMet(_)));

    // The refused action changed nothing: no status move, no ledger entry
    assert_eq!(deal, before);
    assert_eq!(deal.status, DealStatus::FinalContentPosted);
    assert!(!deal.has_release_final());
}

#[test]
fn test_revision_loop_returns_to_in_process() {
    let deal = base_deal(100_000);
    let deal = submit_proof(&deal, Role::Creator, vec!["draft.mp4".to_string()]).unwrap();
    let proof_id = deal.proof_submissions[0].id.clone();

    let deal = review_proof(
        &deal,
        Role::Marketer,
        &proof_id,
        ReviewDecision::RevisionRequired,
        Some("Wrong aspect ratio".to_string()),
    )
    .unwrap();
    assert_eq!(deal.status, DealStatus::InProcess);
    assert_eq!(
        deal.proof_submissions[0].status,
        ProofStatus::RevisionRequired
    );

    // Creator resubmits and the cycle continues
    let deal = submit_proof(&deal, Role::Creator, vec!["draft-v2.mp4".to_string()]).unwrap();
    assert_eq!(deal.status, DealStatus::ContentForApprovalSubmitted);
    assert_eq!(deal.proof_submissions.len(), 2);
}

#[test]
fn test_completion_approves_the_pending_final_proof() {
    let deal = base_deal(100_000);
    let deal = release_first_half(&deal).unwrap();
    let deal = submit_proof(&deal, Role::Creator, vec!["final.mp4".to_string()]).unwrap();
    let proof_id = deal.proof_submissions[0].id.clone();
    let deal = review_proof(&deal, Role::Marketer, &proof_id, ReviewDecision::Approved, None)
        .unwrap();
    let deal = mark_final_posted(&deal, Role::Creator).unwrap();

    // A second, final proof submitted while posting is pending review
    let mut deal = deal;
    deal.status = DealStatus::FinalContentPosted;
    deal.proof_submissions.push(pact_core::ProofSubmission {
        id: "proof-final".to_string(),
        attachments: vec!["posted-link".to_string()],
        submitted_at: crate::mock_infrastructure::fixture_time(10),
        submitted_by: Role::Creator,
        status: ProofStatus::PendingReview,
        feedback: vec![],
    });

    let done = issue_completion_payment(&deal, Role::Marketer).unwrap();
    let final_proof = done.find_proof("proof-final").unwrap();
    assert_eq!(final_proof.status, ProofStatus::Approved);
}

// ============================================================================
// CANCELLATION BRANCH
// ============================================================================

#[test]
fn test_cancellation_round_trip() {
    let deal = base_deal(100_000);

    let requested = request_cancellation(&deal).unwrap();
    assert_eq!(requested.status, DealStatus::Cancellation);

    // Withdrawing resumes the deal
    let resumed = withdraw_cancellation(&requested).unwrap();
    assert_eq!(resumed.status, DealStatus::InProcess);

    // Confirming ends it
    let requested = request_cancellation(&resumed).unwrap();
    let cancelled = confirm_cancellation(&requested).unwrap();
    assert_eq!(cancelled.status, DealStatus::Cancelled);
    assert!(cancelled.status.is_terminal());
}

#[test]
fn test_no_workflow_from_terminal_states() {
    let mut cancelled = base_deal(100_000);
    cancelled.status = DealStatus::Cancelled;

    assert!(submit_proof(&cancelled, Role::Creator, vec!["x".to_string()]).is_err());
    assert!(request_cancellation(&cancelled).is_err());
    assert!(mark_final_posted(&cancelled, Role::Creator).is_err());
    assert!(issue_completion_payment(&cancelled, Role::Marketer).is_err());
}
