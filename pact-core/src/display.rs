//! Display-status derivation
//!
//! The status label shown for an offer depends on more than the raw status:
//! viewed flags, the counter chain, and the viewer's own role all feed in.
//! The precedence rules are encoded as an explicit ordered rule table
//! evaluated top-to-bottom (first match wins) so they stay auditable and
//! testable in isolation:
//!
//! Draft > Deleted > Rejected > Accepted > Rejected-Countered > In Review
//! > Viewed > Sent/Received > raw status.

use pact_types::{OfferStatus, Role};

use crate::types::offer::Offer;

type Predicate = fn(&Offer, Role) -> bool;
type LabelFn = fn(&Offer, Role) -> String;

struct DisplayRule {
    applies: Predicate,
    label: LabelFn,
}

const DISPLAY_RULES: &[DisplayRule] = &[
    DisplayRule {
        applies: |o, _| o.status == OfferStatus::Draft,
        label: |_, _| "Draft".to_string(),
    },
    DisplayRule {
        applies: |o, _| o.status == OfferStatus::Deleted,
        label: |_, _| "Offer Deleted".to_string(),
    },
    DisplayRule {
        applies: |o, _| o.status == OfferStatus::Rejected,
        label: |_, _| "Offer Rejected".to_string(),
    },
    DisplayRule {
        applies: |o, _| o.status == OfferStatus::Accepted,
        label: |_, _| "Offer Accepted".to_string(),
    },
    DisplayRule {
        applies: |o, _| o.status == OfferStatus::RejectedCountered,
        label: |_, _| "Offer Rejected-Countered".to_string(),
    },
    // In Review is never overridden by viewed flags, so it sits above them
    DisplayRule {
        applies: |o, _| o.status == OfferStatus::InReview,
        label: |_, _| "Offer in Review".to_string(),
    },
    DisplayRule {
        applies: |o, _| o.viewed_by(o.receiver()),
        label: |o, _| format!("Viewed by {}", o.receiver().display_name()),
    },
    DisplayRule {
        applies: |o, _| o.status == OfferStatus::Sent,
        label: |o, viewer| {
            if viewer == o.receiver() {
                "Offer Received".to_string()
            } else {
                "Offer Sent".to_string()
            }
        },
    },
];

/// Derive the status label for an offer as seen by the given party.
pub fn display_status(offer: &Offer, viewer: Role) -> String {
    for rule in DISPLAY_RULES {
        if (rule.applies)(offer, viewer) {
            return (rule.label)(offer, viewer);
        }
    }
    // No rule matched: fall back to the raw status string
    offer.status.as_str().to_string()
}
