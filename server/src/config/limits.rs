//! Milestone amount limits
//!
//! The engine enforces the hard product floor (100 currency units); a
//! deployment may raise the minimum via environment variable but never
//! lower it below the floor.

use std::env;

use pact_types::UsdAmount;

/// Hard floor for milestone amounts: 100 currency units in cents.
/// Matches `pact_core::milestone::MIN_MILESTONE_AMOUNT`.
pub const DEFAULT_MIN_MILESTONE_AMOUNT_CENTS: i64 = 10_000;

/// Upper sanity bound for a configured minimum ($100,000).
/// Above this, the configuration is almost certainly a unit mistake.
pub const MAX_CONFIGURABLE_MIN_CENTS: i64 = 10_000_000;

/// Get the configured minimum milestone amount.
///
/// Reads MIN_MILESTONE_AMOUNT_CENTS, falling back to the product floor.
/// Values outside the valid bounds are clamped with a warning.
pub fn get_min_milestone_amount() -> UsdAmount {
    let cents = env::var("MIN_MILESTONE_AMOUNT_CENTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(|cents: i64| {
            if cents < DEFAULT_MIN_MILESTONE_AMOUNT_CENTS {
                tracing::warn!(
                    cents = cents,
                    floor = DEFAULT_MIN_MILESTONE_AMOUNT_CENTS,
                    "MIN_MILESTONE_AMOUNT_CENTS below product floor, using floor"
                );
                DEFAULT_MIN_MILESTONE_AMOUNT_CENTS
            } else if cents > MAX_CONFIGURABLE_MIN_CENTS {
                tracing::warn!(
                    cents = cents,
                    max = MAX_CONFIGURABLE_MIN_CENTS,
                    "MIN_MILESTONE_AMOUNT_CENTS above maximum, using maximum"
                );
                MAX_CONFIGURABLE_MIN_CENTS
            } else {
                cents
            }
        })
        .unwrap_or(DEFAULT_MIN_MILESTONE_AMOUNT_CENTS);

    UsdAmount::from_cents(cents)
}
