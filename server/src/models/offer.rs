//! Offer model and related database operations

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pact_core::{Counter, Offer};
use pact_types::{OfferStatus, Role, UsdAmount};

use crate::models::{from_json_list, to_json_list};
use crate::schema::{offer_counters, offers};

/// Offer row - column order MUST match schema.rs exactly.
/// Diesel's Queryable trait requires fields in the same order as the table
/// columns.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
#[diesel(table_name = offers)]
pub struct OfferRecord {
    pub id: String,
    pub creator_id: String,
    pub marketer_id: String,
    pub offer_name: String,
    pub description: String,
    pub proposed_amount: i64,
    pub deliverables: String,
    pub desired_review_date: Option<NaiveDate>,
    pub desired_post_date: Option<NaiveDate>,
    pub notes: String,
    pub attachments: String,
    pub status: String,
    pub viewed_by_creator: bool,
    pub viewed_by_marketer: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = offers)]
pub struct NewOfferRecord {
    pub id: String,
    pub creator_id: String,
    pub marketer_id: String,
    pub offer_name: String,
    pub description: String,
    pub proposed_amount: i64,
    pub deliverables: String,
    pub desired_review_date: Option<NaiveDate>,
    pub desired_post_date: Option<NaiveDate>,
    pub notes: String,
    pub attachments: String,
    pub status: String,
    pub viewed_by_creator: bool,
    pub viewed_by_marketer: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl OfferRecord {
    /// Create a new offer in the database
    pub fn create(conn: &mut SqliteConnection, new_offer: NewOfferRecord) -> Result<OfferRecord> {
        let offer_id = new_offer.id.clone();

        diesel::insert_into(offers::table)
            .values(&new_offer)
            .execute(conn)
            .map_err(|e| {
                tracing::error!("Diesel insert error for offer {}: {:?}", offer_id, e);
                anyhow::anyhow!("Failed to insert offer: {}", e)
            })?;

        offers::table
            .filter(offers::id.eq(offer_id))
            .first(conn)
            .context("Failed to retrieve created offer")
    }

    /// Find offer by ID
    pub fn find_by_id(conn: &mut SqliteConnection, offer_id: &str) -> Result<Option<OfferRecord>> {
        offers::table
            .filter(offers::id.eq(offer_id))
            .first(conn)
            .optional()
            .context(format!("Failed to query offer {}", offer_id))
    }

    /// Find all offers a party is involved in, newest first
    pub fn find_by_party(conn: &mut SqliteConnection, party_id: &str) -> Result<Vec<OfferRecord>> {
        offers::table
            .filter(
                offers::creator_id
                    .eq(party_id)
                    .or(offers::marketer_id.eq(party_id)),
            )
            .order(offers::created_at.desc())
            .load(conn)
            .context(format!("Failed to load offers for party {}", party_id))
    }

    /// Load the offer document (row plus counter chain) the engines consume
    pub fn load_document(
        conn: &mut SqliteConnection,
        offer_id: &str,
    ) -> Result<Option<Offer>> {
        let record = match Self::find_by_id(conn, offer_id)? {
            Some(record) => record,
            None => return Ok(None),
        };
        let counters = CounterRecord::find_by_offer(conn, offer_id)?;
        record.into_document(counters).map(Some)
    }

    /// Persist an engine-produced document: scalar fields on the row plus any
    /// counters appended beyond what is already stored
    pub fn apply_document(conn: &mut SqliteConnection, document: &Offer) -> Result<()> {
        diesel::update(offers::table.filter(offers::id.eq(&document.id)))
            .set((
                offers::status.eq(document.status.as_str()),
                offers::viewed_by_creator.eq(document.viewed_by_creator),
                offers::viewed_by_marketer.eq(document.viewed_by_marketer),
                offers::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)
            .context(format!("Failed to update offer {}", document.id))?;

        let stored: i64 = offer_counters::table
            .filter(offer_counters::offer_id.eq(&document.id))
            .count()
            .get_result(conn)
            .context("Failed to count stored counters")?;

        // The counter chain is append-only: anything past the stored prefix
        // is new
        for counter in document.counters.iter().skip(stored as usize) {
            CounterRecord::append(conn, &document.id, counter)?;
        }

        Ok(())
    }

    /// Convert the row (plus its counters) into the engine document
    pub fn into_document(self, counters: Vec<CounterRecord>) -> Result<Offer> {
        let status = self
            .status
            .parse::<OfferStatus>()
            .map_err(anyhow::Error::msg)?;

        let counters = counters
            .into_iter()
            .map(|c| c.into_counter())
            .collect::<Result<Vec<_>>>()?;

        Ok(Offer {
            id: self.id,
            offer_name: self.offer_name,
            description: self.description,
            proposed_amount: UsdAmount::from_cents(self.proposed_amount),
            deliverables: from_json_list(&self.deliverables)?,
            desired_review_date: self.desired_review_date,
            desired_post_date: self.desired_post_date,
            notes: self.notes,
            attachments: from_json_list(&self.attachments)?,
            status,
            counters,
            viewed_by_creator: self.viewed_by_creator,
            viewed_by_marketer: self.viewed_by_marketer,
        })
    }
}

/// Counter row - immutable once inserted, ordered by created_at
#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
#[diesel(table_name = offer_counters)]
pub struct CounterRecord {
    pub id: String,
    pub offer_id: String,
    pub counter_by: String,
    pub counter_amount: Option<i64>,
    pub counter_review_date: Option<NaiveDate>,
    pub counter_post_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub deliverables: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = offer_counters)]
pub struct NewCounterRecord {
    pub id: String,
    pub offer_id: String,
    pub counter_by: String,
    pub counter_amount: Option<i64>,
    pub counter_review_date: Option<NaiveDate>,
    pub counter_post_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub deliverables: Option<String>,
    pub created_at: NaiveDateTime,
}

impl CounterRecord {
    /// All counters for an offer, oldest first (the chain order)
    pub fn find_by_offer(
        conn: &mut SqliteConnection,
        offer_id: &str,
    ) -> Result<Vec<CounterRecord>> {
        offer_counters::table
            .filter(offer_counters::offer_id.eq(offer_id))
            .order(offer_counters::created_at.asc())
            .load(conn)
            .context(format!("Failed to load counters for offer {}", offer_id))
    }

    /// Append a counter from the engine document
    pub fn append(conn: &mut SqliteConnection, offer_id: &str, counter: &Counter) -> Result<()> {
        let new_counter = NewCounterRecord {
            id: Uuid::new_v4().to_string(),
            offer_id: offer_id.to_string(),
            counter_by: counter.counter_by.as_str().to_string(),
            counter_amount: counter.counter_amount.map(|a| a.cents()),
            counter_review_date: counter.counter_review_date,
            counter_post_date: counter.counter_post_date,
            description: counter.description.clone(),
            notes: counter.notes.clone(),
            deliverables: counter
                .deliverables
                .as_ref()
                .map(|d| to_json_list(d))
                .transpose()?,
            created_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(offer_counters::table)
            .values(&new_counter)
            .execute(conn)
            .context(format!("Failed to insert counter for offer {}", offer_id))?;
        Ok(())
    }

    /// Convert the row into the engine counter
    pub fn into_counter(self) -> Result<Counter> {
        let counter_by = self.counter_by.parse::<Role>().map_err(anyhow::Error::msg)?;
        Ok(Counter {
            counter_by,
            counter_amount: self.counter_amount.map(UsdAmount::from_cents),
            counter_review_date: self.counter_review_date,
            counter_post_date: self.counter_post_date,
            description: self.description,
            notes: self.notes,
            deliverables: self
                .deliverables
                .as_deref()
                .map(from_json_list)
                .transpose()?,
        })
    }
}
