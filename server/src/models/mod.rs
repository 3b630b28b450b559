//! Database models
//!
//! Row structs mirror `schema.rs` column-for-column; list-valued document
//! fields (deliverables, attachments, feedback) live in JSON TEXT columns.
//! Each model converts to and from the pact-core document types the engines
//! operate on.

pub mod deal;
pub mod milestone;
pub mod offer;
pub mod proof;
pub mod transaction;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Parse a JSON list column, treating an empty column as an empty list
pub(crate) fn from_json_list<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).context("Failed to parse JSON list column")
}

/// Serialize a list into its JSON column representation
pub(crate) fn to_json_list<T: Serialize>(items: &[T]) -> Result<String> {
    serde_json::to_string(items).context("Failed to serialize JSON list column")
}
