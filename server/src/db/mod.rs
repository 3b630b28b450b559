//! Database pool and schema bootstrap

use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sql_query;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Connection customizer applying the SQLite pragmas every connection needs
#[derive(Debug, Clone, Copy)]
struct SqlitePragmaCustomizer;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmaCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        // Wait up to 5 seconds for locks instead of failing immediately
        sql_query("PRAGMA busy_timeout = 5000;")
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;

        sql_query("PRAGMA foreign_keys = ON;")
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;

        // Balance between safety and performance
        sql_query("PRAGMA synchronous = NORMAL;")
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;

        // Use RAM for temporary tables/indexes
        sql_query("PRAGMA temp_store = MEMORY;")
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;

        Ok(())
    }
}

/// Create the database connection pool
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    let pool = r2d2::Pool::builder()
        .max_size(10)
        .connection_timeout(std::time::Duration::from_secs(30))
        .connection_customizer(Box::new(SqlitePragmaCustomizer))
        .build(manager)
        .context("Failed to create database connection pool")?;

    Ok(pool)
}

const SCHEMA_SQL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS offers (
        id TEXT PRIMARY KEY NOT NULL,
        creator_id TEXT NOT NULL,
        marketer_id TEXT NOT NULL,
        offer_name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        proposed_amount BIGINT NOT NULL,
        deliverables TEXT NOT NULL DEFAULT '[]',
        desired_review_date DATE,
        desired_post_date DATE,
        notes TEXT NOT NULL DEFAULT '',
        attachments TEXT NOT NULL DEFAULT '[]',
        status TEXT NOT NULL,
        viewed_by_creator BOOLEAN NOT NULL DEFAULT 0,
        viewed_by_marketer BOOLEAN NOT NULL DEFAULT 0,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS offer_counters (
        id TEXT PRIMARY KEY NOT NULL,
        offer_id TEXT NOT NULL REFERENCES offers(id),
        counter_by TEXT NOT NULL,
        counter_amount BIGINT,
        counter_review_date DATE,
        counter_post_date DATE,
        description TEXT,
        notes TEXT,
        deliverables TEXT,
        created_at TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS deals (
        id TEXT PRIMARY KEY NOT NULL,
        deal_number TEXT NOT NULL,
        offer_id TEXT NOT NULL REFERENCES offers(id),
        creator_id TEXT NOT NULL,
        marketer_id TEXT NOT NULL,
        status TEXT NOT NULL,
        payment_amount BIGINT NOT NULL,
        offer_feedback TEXT NOT NULL DEFAULT '[]',
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS payment_transactions (
        id TEXT PRIMARY KEY NOT NULL,
        deal_id TEXT NOT NULL REFERENCES deals(id),
        tx_type TEXT NOT NULL,
        payment_amount BIGINT NOT NULL,
        milestone_id TEXT,
        created_at TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS milestones (
        id TEXT PRIMARY KEY NOT NULL,
        deal_id TEXT NOT NULL REFERENCES deals(id),
        name TEXT NOT NULL,
        amount BIGINT NOT NULL,
        bonus BIGINT NOT NULL DEFAULT 0,
        due_date DATE,
        description TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL,
        funded_at TIMESTAMP,
        completed_at TIMESTAMP,
        deliverables TEXT NOT NULL DEFAULT '[]',
        feedback TEXT NOT NULL DEFAULT '[]',
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS proof_submissions (
        id TEXT PRIMARY KEY NOT NULL,
        deal_id TEXT NOT NULL REFERENCES deals(id),
        attachments TEXT NOT NULL DEFAULT '[]',
        submitted_at TIMESTAMP NOT NULL,
        submitted_by TEXT NOT NULL,
        status TEXT NOT NULL,
        feedback TEXT NOT NULL DEFAULT '[]'
    )",
];

/// Create the tables if they do not exist yet.
///
/// Idempotent; called once at startup so a fresh deployment comes up without
/// a separate migration step.
pub fn init_schema(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().context("Failed to get DB connection")?;

    for statement in SCHEMA_SQL {
        sql_query(*statement)
            .execute(&mut conn)
            .with_context(|| format!("Failed to apply schema statement: {}", &statement[..40]))?;
    }

    tracing::info!("Database schema ready ({} tables)", SCHEMA_SQL.len());
    Ok(())
}
