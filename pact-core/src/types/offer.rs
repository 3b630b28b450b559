//! Offer and counter-offer documents
//!
//! The offer is a server-owned record; the engines receive a transient copy,
//! validate an action against it, and return an updated copy for the caller
//! to persist. Counters are append-only: the latest counter always determines
//! the current terms and which party must act next.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pact_types::{OfferStatus, Role, UsdAmount};

/// An offer from a marketer to a creator, with its counter history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub offer_name: String,
    pub description: String,
    pub proposed_amount: UsdAmount,
    /// Platform tags the work is delivered on ("instagram", "tiktok", ...)
    pub deliverables: Vec<String>,
    pub desired_review_date: Option<NaiveDate>,
    pub desired_post_date: Option<NaiveDate>,
    pub notes: String,
    /// File references (upload mechanics are out of scope)
    pub attachments: Vec<String>,
    pub status: OfferStatus,
    /// Append-only counter chain, oldest first
    pub counters: Vec<Counter>,
    pub viewed_by_creator: bool,
    pub viewed_by_marketer: bool,
}

impl Offer {
    /// The most recent counter, if any
    pub fn latest_counter(&self) -> Option<&Counter> {
        self.counters.last()
    }

    /// The party expected to act (and view) next: whoever did NOT author the
    /// latest counter. With no counters the offer is marketer-issued, so the
    /// creator is the receiver.
    pub fn receiver(&self) -> Role {
        match self.latest_counter() {
            Some(counter) => counter.counter_by.counterpart(),
            None => Role::Creator,
        }
    }

    /// Whether the given party has marked the current terms as viewed
    pub fn viewed_by(&self, role: Role) -> bool {
        match role {
            Role::Creator => self.viewed_by_creator,
            Role::Marketer => self.viewed_by_marketer,
        }
    }
}

/// A revised set of terms proposed by one party, immutable once appended
///
/// Term fields are optional; an unset field falls back to the original
/// offer's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    pub counter_by: Role,
    pub counter_amount: Option<UsdAmount>,
    pub counter_review_date: Option<NaiveDate>,
    pub counter_post_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub deliverables: Option<Vec<String>>,
}

/// The effective terms of an offer after applying its counter chain
///
/// Each `changed` flag compares the effective value against the ORIGINAL
/// offer (not the previous counter); this is the "Change Requested" diff
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Terms {
    pub amount: UsdAmount,
    pub review_date: Option<NaiveDate>,
    pub post_date: Option<NaiveDate>,
    pub description: String,
    pub notes: String,
    pub deliverables: Vec<String>,
    pub changed: TermChanges,
}

/// Per-field diff of the effective terms against the original offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermChanges {
    pub amount: bool,
    pub review_date: bool,
    pub post_date: bool,
    pub description: bool,
    pub notes: bool,
    pub deliverables: bool,
}

impl TermChanges {
    /// True if any field differs from the original offer
    pub fn any(&self) -> bool {
        self.amount
            || self.review_date
            || self.post_date
            || self.description
            || self.notes
            || self.deliverables
    }
}
