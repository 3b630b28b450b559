//! Display Status Tests
//!
//! The ordered label rules: Draft > Deleted > Rejected > Accepted >
//! Rejected-Countered > In Review > Viewed > Sent/Received > raw status.

use pact_core::display::display_status;
use pact_core::negotiation::{counter, mark_in_review, mark_viewed, CounterTerms};
use pact_types::{OfferStatus, Role, UsdAmount};

use crate::mock_infrastructure::sent_offer;

#[test]
fn test_status_precedence_order() {
    let cases = [
        (OfferStatus::Draft, "Draft"),
        (OfferStatus::Deleted, "Offer Deleted"),
        (OfferStatus::Rejected, "Offer Rejected"),
        (OfferStatus::Accepted, "Offer Accepted"),
        (OfferStatus::RejectedCountered, "Offer Rejected-Countered"),
        (OfferStatus::InReview, "Offer in Review"),
    ];

    for (status, expected) in cases {
        let mut offer = sent_offer(50_000);
        offer.status = status;
        // Viewed flags must not override any of these
        offer.viewed_by_creator = true;
        offer.viewed_by_marketer = true;

        for role in [Role::Creator, Role::Marketer] {
            assert_eq!(
                display_status(&offer, role),
                expected,
                "label for {:?} as seen by {:?}",
                status,
                role
            );
        }
    }
}

#[test]
fn test_viewed_beats_sent_but_not_in_review() {
    let offer = sent_offer(50_000);

    // Receiver views → label flips to Viewed by Creator
    let viewed = mark_viewed(&offer, Role::Creator);
    assert_eq!(display_status(&viewed, Role::Marketer), "Viewed by Creator");

    // Moving to review wins over the viewed flag
    let reviewing = mark_in_review(&viewed, Role::Marketer).unwrap();
    assert_eq!(display_status(&reviewing, Role::Marketer), "Offer in Review");
}

#[test]
fn test_sent_received_depends_on_viewer() {
    let offer = sent_offer(50_000);
    assert_eq!(display_status(&offer, Role::Marketer), "Offer Sent");
    assert_eq!(display_status(&offer, Role::Creator), "Offer Received");
}

#[test]
fn test_counter_chain_updates_receiver_label() {
    let offer = sent_offer(50_000);
    let countered = counter(
        &offer,
        Role::Creator,
        CounterTerms {
            amount: Some(UsdAmount::from_cents(60_000)),
            ..CounterTerms::default()
        },
    )
    .unwrap();

    // The countered status outranks viewed/sent labels
    assert_eq!(
        display_status(&countered, Role::Marketer),
        "Offer Rejected-Countered"
    );

    // The viewed label (on a plain Sent offer) names the current receiver
    let mut sent_again = countered.clone();
    sent_again.status = OfferStatus::Sent;
    let viewed = mark_viewed(&sent_again, Role::Marketer);
    assert_eq!(display_status(&viewed, Role::Creator), "Viewed by Marketer");
}

#[test]
fn test_unmatched_status_falls_back_to_raw_string() {
    let mut offer = sent_offer(50_000);
    offer.status = OfferStatus::Cancelled;
    assert_eq!(display_status(&offer, Role::Creator), "Cancelled");
}
