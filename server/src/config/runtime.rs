//! Runtime configuration: bind address and database location

use std::env;

/// Default HTTP bind address.
///
/// Override via PACT_BIND_ADDR environment variable.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default SQLite database path.
///
/// Override via DATABASE_URL environment variable.
pub const DEFAULT_DATABASE_URL: &str = "pact.db";

/// Get the configured HTTP bind address
pub fn get_bind_addr() -> String {
    env::var("PACT_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Get the configured database URL
pub fn get_database_url() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}
