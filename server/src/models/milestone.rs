//! Milestone model and related database operations

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use pact_core::Milestone;
use pact_types::{MilestoneStatus, UsdAmount};

use crate::models::{from_json_list, to_json_list};
use crate::schema::milestones;

/// Milestone row - column order MUST match schema.rs exactly
#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
#[diesel(table_name = milestones)]
pub struct MilestoneRecord {
    pub id: String,
    pub deal_id: String,
    pub name: String,
    pub amount: i64,
    pub bonus: i64,
    pub due_date: Option<NaiveDate>,
    pub description: String,
    pub status: String,
    pub funded_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub deliverables: String,
    pub feedback: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = milestones)]
pub struct NewMilestoneRecord {
    pub id: String,
    pub deal_id: String,
    pub name: String,
    pub amount: i64,
    pub bonus: i64,
    pub due_date: Option<NaiveDate>,
    pub description: String,
    pub status: String,
    pub funded_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub deliverables: String,
    pub feedback: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl MilestoneRecord {
    /// Insert a milestone produced by the engine
    pub fn create(
        conn: &mut SqliteConnection,
        deal_id: &str,
        milestone: &Milestone,
    ) -> Result<MilestoneRecord> {
        let now = Utc::now().naive_utc();
        let new_milestone = NewMilestoneRecord {
            id: milestone.id.clone(),
            deal_id: deal_id.to_string(),
            name: milestone.name.clone(),
            amount: milestone.amount.cents(),
            bonus: milestone.bonus.cents(),
            due_date: milestone.due_date,
            description: milestone.description.clone(),
            status: milestone.status.as_str().to_string(),
            funded_at: milestone.funded_at,
            completed_at: milestone.completed_at,
            deliverables: to_json_list(&milestone.deliverables)?,
            feedback: to_json_list(&milestone.feedback)?,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(milestones::table)
            .values(&new_milestone)
            .execute(conn)
            .context(format!(
                "Failed to insert milestone {} for deal {}",
                milestone.id, deal_id
            ))?;

        milestones::table
            .filter(milestones::id.eq(&milestone.id))
            .first(conn)
            .context("Failed to retrieve created milestone")
    }

    /// Find milestone by ID
    pub fn find_by_id(
        conn: &mut SqliteConnection,
        milestone_id: &str,
    ) -> Result<Option<MilestoneRecord>> {
        milestones::table
            .filter(milestones::id.eq(milestone_id))
            .first(conn)
            .optional()
            .context(format!("Failed to query milestone {}", milestone_id))
    }

    /// All milestones of a deal, oldest first
    pub fn find_by_deal(
        conn: &mut SqliteConnection,
        deal_id: &str,
    ) -> Result<Vec<MilestoneRecord>> {
        milestones::table
            .filter(milestones::deal_id.eq(deal_id))
            .order(milestones::created_at.asc())
            .load(conn)
            .context(format!("Failed to load milestones for deal {}", deal_id))
    }

    /// Persist an engine-produced milestone document over the stored row
    pub fn apply_document(conn: &mut SqliteConnection, milestone: &Milestone) -> Result<()> {
        diesel::update(milestones::table.filter(milestones::id.eq(&milestone.id)))
            .set((
                milestones::name.eq(&milestone.name),
                milestones::amount.eq(milestone.amount.cents()),
                milestones::bonus.eq(milestone.bonus.cents()),
                milestones::due_date.eq(milestone.due_date),
                milestones::description.eq(&milestone.description),
                milestones::status.eq(milestone.status.as_str()),
                milestones::funded_at.eq(milestone.funded_at),
                milestones::completed_at.eq(milestone.completed_at),
                milestones::deliverables.eq(to_json_list(&milestone.deliverables)?),
                milestones::feedback.eq(to_json_list(&milestone.feedback)?),
                milestones::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)
            .context(format!("Failed to update milestone {}", milestone.id))?;
        Ok(())
    }

    /// Delete an (unfunded) milestone; the lock is enforced by the engine
    /// before this is reached
    pub fn delete(conn: &mut SqliteConnection, milestone_id: &str) -> Result<()> {
        diesel::delete(milestones::table.filter(milestones::id.eq(milestone_id)))
            .execute(conn)
            .context(format!("Failed to delete milestone {}", milestone_id))?;
        Ok(())
    }

    /// Convert the row into the engine document
    pub fn into_document(self) -> Result<Milestone> {
        let status = self
            .status
            .parse::<MilestoneStatus>()
            .map_err(anyhow::Error::msg)?;
        Ok(Milestone {
            id: self.id,
            name: self.name,
            amount: UsdAmount::from_cents(self.amount),
            bonus: UsdAmount::from_cents(self.bonus),
            due_date: self.due_date,
            description: self.description,
            status,
            funded_at: self.funded_at,
            completed_at: self.completed_at,
            deliverables: from_json_list(&self.deliverables)?,
            feedback: from_json_list(&self.feedback)?,
        })
    }
}
