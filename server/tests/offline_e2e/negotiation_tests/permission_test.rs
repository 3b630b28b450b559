//! Permission Derivation Tests
//!
//! Who may act on an offer, derived from the counter chain and the status:
//! - No counters: the creator only (offers are marketer-issued)
//! - With counters: whoever did not author the latest counter
//! - Terminal statuses: nobody, ever

use pact_core::negotiation::{accept, action_permissions, counter, reject, CounterTerms};
use pact_core::EngineError;
use pact_types::{OfferStatus, Role, UsdAmount};

use crate::mock_infrastructure::{sent_offer, DeterministicRng};

#[test]
fn test_empty_counter_chain_grants_creator_only() {
    let offer = sent_offer(50_000);

    assert!(action_permissions(&offer, Role::Creator).can_act);
    assert!(!action_permissions(&offer, Role::Marketer).can_act);
}

#[test]
fn test_turn_belongs_to_non_author_of_latest_counter() {
    let offer = sent_offer(50_000);
    let step1 = counter(
        &offer,
        Role::Creator,
        CounterTerms {
            amount: Some(UsdAmount::from_cents(60_000)),
            ..CounterTerms::default()
        },
    )
    .unwrap();

    assert!(!action_permissions(&step1, Role::Creator).can_act);
    assert!(action_permissions(&step1, Role::Marketer).can_act);
}

#[test]
fn test_terminal_statuses_grant_nobody() {
    for status in [
        OfferStatus::Accepted,
        OfferStatus::Rejected,
        OfferStatus::Cancelled,
    ] {
        let mut offer = sent_offer(50_000);
        offer.status = status;

        for role in [Role::Creator, Role::Marketer] {
            assert!(
                !action_permissions(&offer, role).can_act,
                "{:?} should not act on a {:?} offer",
                role,
                status
            );
        }
    }
}

#[test]
fn test_terminal_attempts_are_idempotent() {
    // Repeated attempts against a terminal offer keep failing and never
    // mutate the document
    let mut offer = sent_offer(50_000);
    offer.status = OfferStatus::Rejected;
    let before = offer.clone();

    for _ in 0..3 {
        assert!(matches!(
            accept(&offer, Role::Creator),
            Err(EngineError::InvalidTransition { .. })
        ));
        assert!(matches!(
            reject(&offer, Role::Creator),
            Err(EngineError::InvalidTransition { .. })
        ));
        assert_eq!(offer, before);
    }
}

#[test]
fn test_out_of_turn_actions_are_forbidden() {
    let offer = sent_offer(50_000);

    assert!(matches!(
        accept(&offer, Role::Marketer),
        Err(EngineError::Forbidden(_))
    ));
    assert!(matches!(
        reject(&offer, Role::Marketer),
        Err(EngineError::Forbidden(_))
    ));
}

#[test]
fn test_turn_alternates_over_random_chains() {
    let mut rng = DeterministicRng::with_name("negotiation_chains");

    for _ in 0..50 {
        let mut offer = sent_offer(50_000);
        let mut expected_actor = Role::Creator;

        let chain_length = 1 + rng.gen_range(6);
        for _ in 0..chain_length {
            assert!(action_permissions(&offer, expected_actor).can_act);
            assert!(!action_permissions(&offer, expected_actor.counterpart()).can_act);

            let amount = 10_000 + rng.gen_range(90_000) as i64;
            offer = counter(
                &offer,
                expected_actor,
                CounterTerms {
                    amount: Some(UsdAmount::from_cents(amount)),
                    ..CounterTerms::default()
                },
            )
            .unwrap();

            expected_actor = expected_actor.counterpart();
        }

        // The chain always ends with the counterparty of the last author
        // holding the turn
        assert!(action_permissions(&offer, expected_actor).can_act);
    }
}
