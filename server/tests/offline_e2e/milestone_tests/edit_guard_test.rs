//! Milestone Edit Guard Tests
//!
//! Edit and delete are allowed only while fundedAt is unset; the guard
//! follows funding, not status.

use pact_core::milestone::{create, ensure_deletable, edit, fund, MilestoneDraft, MilestoneEdit};
use pact_core::EngineError;
use pact_types::{MilestoneStatus, UsdAmount};

fn milestone() -> pact_core::Milestone {
    create(MilestoneDraft {
        name: "Cut".to_string(),
        amount: UsdAmount::from_dollars(250.0),
        bonus: UsdAmount::ZERO,
        due_date: None,
        description: String::new(),
    })
    .unwrap()
}

#[test]
fn test_unfunded_milestones_editable_regardless_of_status() {
    for status in [
        MilestoneStatus::Pending,
        MilestoneStatus::Proposed,
        MilestoneStatus::Active,
        MilestoneStatus::InReview,
        MilestoneStatus::RevisionRequired,
        MilestoneStatus::Completed,
    ] {
        let mut m = milestone();
        m.status = status;
        // fundedAt unset: both operations allowed whatever the status says
        assert!(
            edit(&m, MilestoneEdit::default()).is_ok(),
            "edit should pass for unfunded {:?}",
            status
        );
        assert!(
            ensure_deletable(&m).is_ok(),
            "delete should pass for unfunded {:?}",
            status
        );
    }
}

#[test]
fn test_funded_milestones_locked_regardless_of_status() {
    for status in [
        MilestoneStatus::Pending,
        MilestoneStatus::Active,
        MilestoneStatus::InReview,
        MilestoneStatus::Completed,
    ] {
        let mut m = fund(&milestone()).unwrap();
        m.status = status;

        assert!(
            matches!(
                edit(&m, MilestoneEdit::default()),
                Err(EngineError::Forbidden(_))
            ),
            "edit should be forbidden for funded {:?}",
            status
        );
        assert!(
            matches!(ensure_deletable(&m), Err(EngineError::Forbidden(_))),
            "delete should be forbidden for funded {:?}",
            status
        );
    }
}

#[test]
fn test_edit_applies_partial_fields() {
    let m = milestone();
    let edited = edit(
        &m,
        MilestoneEdit {
            name: Some("Final cut".to_string()),
            amount: Some(UsdAmount::from_dollars(400.0)),
            ..MilestoneEdit::default()
        },
    )
    .unwrap();

    assert_eq!(edited.name, "Final cut");
    assert_eq!(edited.amount, UsdAmount::from_cents(40_000));
    // Untouched fields survive
    assert_eq!(edited.bonus, m.bonus);
    assert_eq!(edited.description, m.description);
}

#[test]
fn test_edit_enforces_amount_floor() {
    let m = milestone();
    assert!(matches!(
        edit(
            &m,
            MilestoneEdit {
                amount: Some(UsdAmount::from_dollars(99.0)),
                ..MilestoneEdit::default()
            }
        ),
        Err(EngineError::ValidationError(_))
    ));

    // The boundary itself is accepted
    assert!(edit(
        &m,
        MilestoneEdit {
            amount: Some(UsdAmount::from_dollars(100.0)),
            ..MilestoneEdit::default()
        }
    )
    .is_ok());
}
