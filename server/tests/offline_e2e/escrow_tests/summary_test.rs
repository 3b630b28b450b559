//! Escrow Summary Tests
//!
//! Canonical fixtures pinning the ledger arithmetic. The accounting folds
//! base-contract escrow and milestone escrow into one accumulator that
//! releases subtract from, with the floor-at-zero applied once at the end;
//! these outputs are the reference for any future product clarification.

use rand::seq::SliceRandom;

use pact_core::escrow::summarize;
use pact_types::{DealStatus, MilestoneStatus, TransactionType, UsdAmount};

use crate::mock_infrastructure::{base_deal, milestone_with, transaction, DeterministicRng};

#[test]
fn test_empty_deal() {
    let deal = base_deal(100_000);
    let summary = summarize(&deal);

    assert_eq!(summary.project_price, UsdAmount::from_cents(100_000));
    assert_eq!(summary.in_escrow, UsdAmount::ZERO);
    assert_eq!(summary.total_earnings, UsdAmount::ZERO);
    assert_eq!(summary.milestones_paid_count, 0);
    assert_eq!(summary.milestones_remaining_count, 0);
}

#[test]
fn test_canonical_fixture_completed_milestone() {
    // paymentAmount=1000, one milestone {amount:200, bonus:0, completed},
    // no transactions
    let mut deal = base_deal(100_000);
    deal.milestones
        .push(milestone_with("m1", 20_000, 0, MilestoneStatus::Completed));

    let summary = summarize(&deal);
    assert_eq!(summary.milestones_paid_amount, UsdAmount::from_cents(20_000));
    assert_eq!(summary.milestones_paid_count, 1);
    assert_eq!(summary.project_price, UsdAmount::from_cents(120_000));
    assert_eq!(summary.in_escrow, UsdAmount::ZERO);
    assert_eq!(summary.total_earnings, UsdAmount::from_cents(20_000));
}

#[test]
fn test_summarize_is_pure() {
    let mut deal = base_deal(100_000);
    deal.milestones
        .push(milestone_with("m1", 30_000, 5_000, MilestoneStatus::Active));
    deal.payment_info
        .transactions
        .push(transaction("t1", TransactionType::Escrow, 100_000, None));

    let first = summarize(&deal);
    let second = summarize(&deal);
    assert_eq!(first, second);
}

#[test]
fn test_mixed_ledger_and_milestones() {
    let mut deal = base_deal(100_000);
    deal.payment_info
        .transactions
        .push(transaction("t1", TransactionType::Escrow, 100_000, None));
    deal.payment_info.transactions.push(transaction(
        "t2",
        TransactionType::ReleaseHalf,
        50_000,
        None,
    ));
    deal.milestones
        .push(milestone_with("m1", 30_000, 0, MilestoneStatus::Active));
    deal.milestones
        .push(milestone_with("m2", 20_000, 0, MilestoneStatus::Completed));

    let summary = summarize(&deal);
    // escrow: 1000 - 500 (release) + 300 (active) - 200 + 200 (paid adds then
    // subtracts its own escrow line) = 600
    assert_eq!(summary.in_escrow, UsdAmount::from_cents(60_000));
    assert_eq!(summary.total_earnings, UsdAmount::from_cents(70_000));
    assert_eq!(summary.milestones_paid_count, 1);
    assert_eq!(summary.milestones_paid_amount, UsdAmount::from_cents(20_000));
    assert_eq!(summary.milestones_remaining_count, 1);
    assert_eq!(
        summary.milestones_remaining_amount,
        UsdAmount::from_cents(30_000)
    );
    assert_eq!(summary.project_price, UsdAmount::from_cents(150_000));
}

#[test]
fn test_milestone_tagged_transactions_ignored_in_base_sums() {
    let mut deal = base_deal(100_000);
    // Escrow and release rows tied to a milestone do not feed the
    // base-contract accumulators; the milestone status does
    deal.payment_info.transactions.push(transaction(
        "t1",
        TransactionType::Escrow,
        30_000,
        Some("m1"),
    ));
    deal.payment_info.transactions.push(transaction(
        "t2",
        TransactionType::ReleaseHalf,
        15_000,
        Some("m1"),
    ));
    deal.milestones
        .push(milestone_with("m1", 30_000, 0, MilestoneStatus::Active));

    let summary = summarize(&deal);
    assert_eq!(summary.in_escrow, UsdAmount::from_cents(30_000));
    assert_eq!(summary.total_earnings, UsdAmount::ZERO);
}

#[test]
fn test_bonus_counts_toward_every_figure() {
    let mut deal = base_deal(100_000);
    deal.milestones
        .push(milestone_with("m1", 20_000, 5_000, MilestoneStatus::Completed));

    let summary = summarize(&deal);
    assert_eq!(summary.milestones_paid_amount, UsdAmount::from_cents(25_000));
    assert_eq!(summary.total_earnings, UsdAmount::from_cents(25_000));
    assert_eq!(summary.project_price, UsdAmount::from_cents(125_000));
}

#[test]
fn test_paid_status_is_escrowed_and_paid_out() {
    // The legacy "paid" spelling both adds and removes its escrow line and
    // counts as paid out, but not as remaining
    let mut deal = base_deal(100_000);
    deal.milestones
        .push(milestone_with("m1", 20_000, 0, MilestoneStatus::Paid));

    let summary = summarize(&deal);
    assert_eq!(summary.in_escrow, UsdAmount::ZERO);
    assert_eq!(summary.milestones_paid_count, 1);
    assert_eq!(summary.milestones_remaining_count, 0);
    assert_eq!(summary.total_earnings, UsdAmount::from_cents(20_000));
}

#[test]
fn test_cancelled_deal_zeroes_derived_totals() {
    let mut deal = base_deal(100_000);
    deal.payment_info
        .transactions
        .push(transaction("t1", TransactionType::Escrow, 100_000, None));
    deal.milestones
        .push(milestone_with("m1", 20_000, 0, MilestoneStatus::Completed));
    deal.status = DealStatus::Cancelled;

    let summary = summarize(&deal);
    assert_eq!(summary.project_price, UsdAmount::from_cents(100_000));
    assert_eq!(summary.in_escrow, UsdAmount::ZERO);
    assert_eq!(summary.total_earnings, UsdAmount::ZERO);
    assert_eq!(summary.milestones_paid_count, 0);
    assert_eq!(summary.milestones_remaining_count, 0);
}

#[test]
fn test_floor_at_zero_is_a_final_clamp() {
    // Releases larger than anything escrowed: earnings accrue in full,
    // escrow clamps to zero at the end instead of going negative
    let mut deal = base_deal(100_000);
    deal.payment_info.transactions.push(transaction(
        "t1",
        TransactionType::ReleaseHalf,
        50_000,
        None,
    ));
    deal.payment_info.transactions.push(transaction(
        "t2",
        TransactionType::ReleaseFinal,
        50_000,
        None,
    ));
    deal.milestones
        .push(milestone_with("m1", 30_000, 0, MilestoneStatus::Active));

    let summary = summarize(&deal);
    // Signed accumulation: -500 - 500 + 300 = -700 → clamped to 0
    assert_eq!(summary.in_escrow, UsdAmount::ZERO);
    assert_eq!(summary.total_earnings, UsdAmount::from_cents(100_000));
}

#[test]
fn test_summary_is_order_independent() {
    let mut rng = DeterministicRng::with_name("summary_order");

    let transactions = vec![
        transaction("t1", TransactionType::Escrow, 100_000, None),
        transaction("t2", TransactionType::ReleaseHalf, 50_000, None),
        transaction("t3", TransactionType::Escrow, 20_000, None),
        transaction("t4", TransactionType::ReleaseFinal, 50_000, None),
    ];

    let mut deal = base_deal(100_000);
    deal.payment_info.transactions = transactions.clone();
    deal.milestones
        .push(milestone_with("m1", 30_000, 0, MilestoneStatus::InReview));
    let reference = summarize(&deal);

    for _ in 0..20 {
        let mut shuffled = transactions.clone();
        shuffled.shuffle(&mut rng);
        let mut permuted = deal.clone();
        permuted.payment_info.transactions = shuffled;

        assert_eq!(summarize(&permuted), reference);
    }
}
