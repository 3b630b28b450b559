//! Telemetry module for PACT
//!
//! Structured logging via tracing-subscriber. The log filter comes from
//! RUST_LOG, defaulting to info with the noisier dependency targets capped.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging.
///
/// Call once at startup, before anything logs.
pub fn init_telemetry() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,diesel=warn".into());

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
