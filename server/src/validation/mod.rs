//! Input validation modules
//!
//! Domain validation that runs before engine operations, producing
//! field-level feedback the client can render next to the form inputs.

pub mod milestone;

pub use milestone::{format_validation_error, validate_milestone_fields, MilestoneValidation};
