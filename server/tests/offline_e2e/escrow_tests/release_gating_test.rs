//! Release Gating Tests
//!
//! The payment-release invariant: the final release strictly requires a
//! prior first-half release, and the first half can only happen once.

use pact_core::escrow::{
    can_release_final, can_release_first_half, release_final, release_first_half,
};
use pact_core::EngineError;
use pact_types::{DealStatus, TransactionType, UsdAmount};

use crate::mock_infrastructure::{base_deal, transaction};

#[test]
fn test_first_half_allowed_from_accepted_and_content_submitted() {
    let mut deal = base_deal(100_000);
    assert!(can_release_first_half(&deal));

    deal.status = DealStatus::ContentForApprovalSubmitted;
    assert!(can_release_first_half(&deal));

    for status in [
        DealStatus::InProcess,
        DealStatus::ContentApproved,
        DealStatus::FinalContentPosted,
        DealStatus::Cancelled,
    ] {
        deal.status = status;
        assert!(
            !can_release_first_half(&deal),
            "first half should be blocked from {:?}",
            status
        );
    }
}

#[test]
fn test_first_half_happens_only_once() {
    let deal = base_deal(100_000);
    let released = release_first_half(&deal).unwrap();

    assert_eq!(released.payment_info.transactions.len(), 1);
    let tx = &released.payment_info.transactions[0];
    assert_eq!(tx.tx_type, TransactionType::ReleaseHalf);
    assert_eq!(tx.payment_amount, UsdAmount::from_cents(50_000));
    assert!(tx.milestone_id.is_none());

    assert!(!can_release_first_half(&released));
    assert!(matches!(
        release_first_half(&released),
        Err(EngineError::InvalidTransition { .. })
    ));
}

#[test]
fn test_final_requires_prior_half_release() {
    let deal = base_deal(100_000);
    assert!(!can_release_final(&deal));

    let err = release_final(&deal).unwrap_err();
    assert!(matches!(err, EngineError::PrerequisiteNotMet(_)));
    // Nothing was appended by the failed attempt
    assert!(deal.payment_info.transactions.is_empty());

    let half = release_first_half(&deal).unwrap();
    assert!(can_release_final(&half));

    let full = release_final(&half).unwrap();
    assert_eq!(full.payment_info.transactions.len(), 2);
    assert_eq!(
        full.payment_info.transactions[1].tx_type,
        TransactionType::ReleaseFinal
    );
    assert_eq!(
        full.payment_info.transactions[1].payment_amount,
        UsdAmount::from_cents(50_000)
    );
}

#[test]
fn test_milestone_level_release_does_not_satisfy_the_gate() {
    // A release_half tied to a milestone is not the base-contract first-half
    let mut deal = base_deal(100_000);
    deal.payment_info.transactions.push(transaction(
        "t1",
        TransactionType::ReleaseHalf,
        20_000,
        Some("m1"),
    ));

    assert!(!can_release_final(&deal));
    assert!(matches!(
        release_final(&deal),
        Err(EngineError::PrerequisiteNotMet(_))
    ));
}

#[test]
fn test_releases_split_the_full_contract_amount() {
    for amount in [100_000_i64, 100_001, 99_999, 1] {
        let deal = base_deal(amount);
        let half = release_first_half(&deal).unwrap();
        let full = release_final(&half).unwrap();

        let released: i64 = full
            .payment_info
            .transactions
            .iter()
            .map(|t| t.payment_amount.cents())
            .sum();
        assert_eq!(released, amount, "releases must sum to {}", amount);
    }
}
