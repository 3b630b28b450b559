//! Configuration modules for the PACT server

pub mod limits;
pub mod runtime;

pub use limits::{get_min_milestone_amount, DEFAULT_MIN_MILESTONE_AMOUNT_CENTS};
pub use runtime::{get_bind_addr, get_database_url};
