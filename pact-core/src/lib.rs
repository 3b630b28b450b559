//! PACT Core Engines
//!
//! Pure business logic for the PACT deal-making marketplace: the offer
//! negotiation state machine, the deal escrow ledger arithmetic, and the
//! per-milestone lifecycle. Everything in this crate is synchronous,
//! side-effect free computation over plain documents; persistence and
//! transport live in the server crate.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  pact-core (this crate)                                      │
//! │  ├─ types        offer/deal/milestone documents (wire shape) │
//! │  ├─ negotiation  offer counter chain, permissions, accept    │
//! │  ├─ escrow       ledger summary, release gating, deal flow   │
//! │  ├─ milestone    fund → submit → review lifecycle            │
//! │  ├─ display      priority-ordered status labels              │
//! │  └─ overlay      optimistic milestone-status overlay         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations take a document by reference and return an updated copy (or a
//! typed [`EngineError`]); the caller persists the result and treats the
//! backend's response as the source of truth afterwards.

pub mod display;
pub mod escrow;
pub mod milestone;
pub mod negotiation;
pub mod overlay;
pub mod types;

pub use types::errors::{EngineError, EngineResult};
pub use types::{deal::*, offer::*};
