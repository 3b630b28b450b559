//! Milestone field validation
//!
//! Collects every violation instead of stopping at the first one, so the
//! client can highlight all invalid form fields in a single round trip. The
//! engine re-checks the hard invariants before any state change; this layer
//! exists for the richer feedback.

use pact_types::UsdAmount;

use crate::config::get_min_milestone_amount;

/// Maximum milestone name length
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum milestone description length
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

/// Milestone validation result
#[derive(Debug)]
pub struct MilestoneValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Validate the user-editable milestone fields
///
/// # Arguments
/// * `name` - Milestone name (required, bounded length)
/// * `amount` - Base amount (at least the configured minimum)
/// * `bonus` - Optional bonus (never negative)
/// * `description` - Free text (bounded length)
pub fn validate_milestone_fields(
    name: &str,
    amount: UsdAmount,
    bonus: UsdAmount,
    description: &str,
) -> MilestoneValidation {
    let mut errors = Vec::new();
    let minimum = get_min_milestone_amount();

    if name.trim().is_empty() {
        errors.push("Milestone name is required".to_string());
    } else if name.len() > MAX_NAME_LENGTH {
        errors.push(format!(
            "Milestone name cannot exceed {} characters",
            MAX_NAME_LENGTH
        ));
    }

    if amount < minimum {
        errors.push(format!(
            "Milestone amount must be at least {}",
            minimum.display()
        ));
    }

    if bonus.cents() < 0 {
        errors.push("Bonus cannot be negative".to_string());
    }

    if description.len() > MAX_DESCRIPTION_LENGTH {
        errors.push(format!(
            "Description cannot exceed {} characters",
            MAX_DESCRIPTION_LENGTH
        ));
    }

    MilestoneValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Format validation result as a user-friendly error message
pub fn format_validation_error(validation: &MilestoneValidation) -> String {
    validation.errors.join("; ")
}
