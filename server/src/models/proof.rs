//! Proof submission model

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use pact_core::ProofSubmission;
use pact_types::{ProofStatus, Role};

use crate::models::{from_json_list, to_json_list};
use crate::schema::proof_submissions;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
#[diesel(table_name = proof_submissions)]
pub struct ProofRecord {
    pub id: String,
    pub deal_id: String,
    pub attachments: String,
    pub submitted_at: NaiveDateTime,
    pub submitted_by: String,
    pub status: String,
    pub feedback: String,
}

#[derive(Insertable)]
#[diesel(table_name = proof_submissions)]
pub struct NewProofRecord {
    pub id: String,
    pub deal_id: String,
    pub attachments: String,
    pub submitted_at: NaiveDateTime,
    pub submitted_by: String,
    pub status: String,
    pub feedback: String,
}

impl ProofRecord {
    /// All proof submissions of a deal, oldest first
    pub fn find_by_deal(conn: &mut SqliteConnection, deal_id: &str) -> Result<Vec<ProofRecord>> {
        proof_submissions::table
            .filter(proof_submissions::deal_id.eq(deal_id))
            .order(proof_submissions::submitted_at.asc())
            .load(conn)
            .context(format!("Failed to load proofs for deal {}", deal_id))
    }

    /// Insert a new proof or update the review outcome of a stored one
    pub fn upsert(
        conn: &mut SqliteConnection,
        deal_id: &str,
        proof: &ProofSubmission,
    ) -> Result<()> {
        let exists: i64 = proof_submissions::table
            .filter(proof_submissions::id.eq(&proof.id))
            .count()
            .get_result(conn)
            .context("Failed to check proof existence")?;

        if exists > 0 {
            diesel::update(proof_submissions::table.filter(proof_submissions::id.eq(&proof.id)))
                .set((
                    proof_submissions::status.eq(proof.status.as_str()),
                    proof_submissions::feedback.eq(to_json_list(&proof.feedback)?),
                ))
                .execute(conn)
                .context(format!("Failed to update proof {}", proof.id))?;
        } else {
            let new_proof = NewProofRecord {
                id: proof.id.clone(),
                deal_id: deal_id.to_string(),
                attachments: to_json_list(&proof.attachments)?,
                submitted_at: proof.submitted_at,
                submitted_by: proof.submitted_by.as_str().to_string(),
                status: proof.status.as_str().to_string(),
                feedback: to_json_list(&proof.feedback)?,
            };
            diesel::insert_into(proof_submissions::table)
                .values(&new_proof)
                .execute(conn)
                .context(format!("Failed to insert proof {}", proof.id))?;
        }
        Ok(())
    }

    /// Convert the row into the engine document
    pub fn into_document(self) -> Result<ProofSubmission> {
        let submitted_by = self
            .submitted_by
            .parse::<Role>()
            .map_err(anyhow::Error::msg)?;
        let status = self
            .status
            .parse::<ProofStatus>()
            .map_err(anyhow::Error::msg)?;
        Ok(ProofSubmission {
            id: self.id,
            attachments: from_json_list(&self.attachments)?,
            submitted_at: self.submitted_at,
            submitted_by,
            status,
            feedback: from_json_list(&self.feedback)?,
        })
    }
}
