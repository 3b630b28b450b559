//! Payment-ledger transaction model
//!
//! The ledger is append-only: rows are inserted when an engine operation
//! produces a new transaction and are never updated or deleted.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use pact_core::LedgerTransaction;
use pact_types::{TransactionType, UsdAmount};

use crate::schema::payment_transactions;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
#[diesel(table_name = payment_transactions)]
pub struct TransactionRecord {
    pub id: String,
    pub deal_id: String,
    pub tx_type: String,
    pub payment_amount: i64,
    pub milestone_id: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = payment_transactions)]
pub struct NewTransactionRecord {
    pub id: String,
    pub deal_id: String,
    pub tx_type: String,
    pub payment_amount: i64,
    pub milestone_id: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TransactionRecord {
    /// All transactions for a deal, oldest first (ledger order)
    pub fn find_by_deal(
        conn: &mut SqliteConnection,
        deal_id: &str,
    ) -> Result<Vec<TransactionRecord>> {
        payment_transactions::table
            .filter(payment_transactions::deal_id.eq(deal_id))
            .order(payment_transactions::created_at.asc())
            .load(conn)
            .context(format!("Failed to load transactions for deal {}", deal_id))
    }

    /// Append a ledger entry produced by an engine operation
    pub fn append(
        conn: &mut SqliteConnection,
        deal_id: &str,
        transaction: &LedgerTransaction,
    ) -> Result<()> {
        let new_transaction = NewTransactionRecord {
            id: transaction.transaction_id.clone(),
            deal_id: deal_id.to_string(),
            tx_type: transaction.tx_type.as_str().to_string(),
            payment_amount: transaction.payment_amount.cents(),
            milestone_id: transaction.milestone_id.clone(),
            created_at: transaction.created_at,
        };

        diesel::insert_into(payment_transactions::table)
            .values(&new_transaction)
            .execute(conn)
            .context(format!(
                "Failed to insert transaction {} for deal {}",
                transaction.transaction_id, deal_id
            ))?;
        Ok(())
    }

    /// Convert the row into the engine ledger entry
    pub fn into_ledger(self) -> Result<LedgerTransaction> {
        let tx_type = self
            .tx_type
            .parse::<TransactionType>()
            .map_err(anyhow::Error::msg)?;
        Ok(LedgerTransaction {
            transaction_id: self.id,
            tx_type,
            payment_amount: UsdAmount::from_cents(self.payment_amount),
            milestone_id: self.milestone_id,
            created_at: self.created_at,
        })
    }
}
