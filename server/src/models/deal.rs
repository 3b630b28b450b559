//! Deal model and document assembly
//!
//! A deal document spans four tables: the deal row, its transaction ledger,
//! its milestones, and its proof submissions. Loading assembles all of them
//! into the pact-core document; applying an engine result writes back the
//! scalar fields, appends new ledger entries, and upserts proofs. Milestones
//! are written through their own model by the milestone handlers.

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use pact_core::{Deal, OfferContent, PaymentInfo};
use pact_types::{DealStatus, UsdAmount};

use crate::models::milestone::MilestoneRecord;
use crate::models::proof::ProofRecord;
use crate::models::transaction::TransactionRecord;
use crate::models::{from_json_list, to_json_list};
use crate::schema::deals;

/// Deal row - column order MUST match schema.rs exactly
#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
#[diesel(table_name = deals)]
pub struct DealRecord {
    pub id: String,
    pub deal_number: String,
    pub offer_id: String,
    pub creator_id: String,
    pub marketer_id: String,
    pub status: String,
    pub payment_amount: i64,
    pub offer_feedback: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = deals)]
pub struct NewDealRecord {
    pub id: String,
    pub deal_number: String,
    pub offer_id: String,
    pub creator_id: String,
    pub marketer_id: String,
    pub status: String,
    pub payment_amount: i64,
    pub offer_feedback: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl DealRecord {
    /// Insert the deal produced by accepting an offer
    pub fn create_from_document(
        conn: &mut SqliteConnection,
        offer_id: &str,
        creator_id: &str,
        marketer_id: &str,
        deal: &Deal,
    ) -> Result<DealRecord> {
        let now = Utc::now().naive_utc();
        let new_deal = NewDealRecord {
            id: deal.id.clone(),
            deal_number: deal.deal_number.clone(),
            offer_id: offer_id.to_string(),
            creator_id: creator_id.to_string(),
            marketer_id: marketer_id.to_string(),
            status: deal.status.as_str().to_string(),
            payment_amount: deal.payment_info.payment_amount.cents(),
            offer_feedback: to_json_list(&deal.offer_content.feedback)?,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(deals::table)
            .values(&new_deal)
            .execute(conn)
            .map_err(|e| {
                tracing::error!("Diesel insert error for deal {}: {:?}", deal.id, e);
                anyhow::anyhow!("Failed to insert deal: {}", e)
            })?;

        deals::table
            .filter(deals::id.eq(&deal.id))
            .first(conn)
            .context("Failed to retrieve created deal")
    }

    /// Find deal by ID
    pub fn find_by_id(conn: &mut SqliteConnection, deal_id: &str) -> Result<Option<DealRecord>> {
        deals::table
            .filter(deals::id.eq(deal_id))
            .first(conn)
            .optional()
            .context(format!("Failed to query deal {}", deal_id))
    }

    /// Load the full deal document the engines consume
    pub fn load_document(conn: &mut SqliteConnection, deal_id: &str) -> Result<Option<Deal>> {
        let record = match Self::find_by_id(conn, deal_id)? {
            Some(record) => record,
            None => return Ok(None),
        };

        let transactions = TransactionRecord::find_by_deal(conn, deal_id)?
            .into_iter()
            .map(|t| t.into_ledger())
            .collect::<Result<Vec<_>>>()?;
        let milestones = MilestoneRecord::find_by_deal(conn, deal_id)?
            .into_iter()
            .map(|m| m.into_document())
            .collect::<Result<Vec<_>>>()?;
        let proofs = ProofRecord::find_by_deal(conn, deal_id)?
            .into_iter()
            .map(|p| p.into_document())
            .collect::<Result<Vec<_>>>()?;

        let status = record
            .status
            .parse::<DealStatus>()
            .map_err(anyhow::Error::msg)?;

        Ok(Some(Deal {
            id: record.id,
            deal_number: record.deal_number,
            status,
            payment_info: PaymentInfo {
                payment_amount: UsdAmount::from_cents(record.payment_amount),
                transactions,
            },
            milestones,
            offer_content: OfferContent {
                feedback: from_json_list(&record.offer_feedback)?,
            },
            proof_submissions: proofs,
        }))
    }

    /// Persist an engine-produced deal document.
    ///
    /// Writes the scalar fields, appends ledger entries not yet stored (the
    /// ledger is append-only, so the diff is everything past the stored
    /// prefix), and upserts proof submissions. Milestone changes go through
    /// `MilestoneRecord` directly.
    pub fn apply_document(conn: &mut SqliteConnection, deal: &Deal) -> Result<()> {
        diesel::update(deals::table.filter(deals::id.eq(&deal.id)))
            .set((
                deals::status.eq(deal.status.as_str()),
                deals::offer_feedback.eq(to_json_list(&deal.offer_content.feedback)?),
                deals::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)
            .context(format!("Failed to update deal {}", deal.id))?;

        let stored: i64 = crate::schema::payment_transactions::table
            .filter(crate::schema::payment_transactions::deal_id.eq(&deal.id))
            .count()
            .get_result(conn)
            .context("Failed to count stored transactions")?;

        for transaction in deal.payment_info.transactions.iter().skip(stored as usize) {
            TransactionRecord::append(conn, &deal.id, transaction)?;
        }

        for proof in &deal.proof_submissions {
            ProofRecord::upsert(conn, &deal.id, proof)?;
        }

        Ok(())
    }
}
