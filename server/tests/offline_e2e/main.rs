//! Offline E2E Test Suite for the PACT deal-making backend
//!
//! ## Purpose
//! Deterministic engine-level testing with zero external dependencies: no
//! network, no database, no clock coupling. Every business rule the client
//! screens depend on is pinned here.
//!
//! ## Test Categories
//! - **Negotiation Tests**: permissions, counter chains, display status
//! - **Escrow Tests**: ledger summary arithmetic, release gating, deal flow
//! - **Milestone Tests**: lifecycle transitions, the funded-edit lock
//!
//! ## Running Tests
//! ```bash
//! # Run the whole offline suite
//! cargo test --package server --test offline_e2e
//!
//! # Run a specific category
//! cargo test --package server --test offline_e2e escrow_tests
//! ```
//!
//! ## Success Criteria
//! - Zero external dependencies
//! - Deterministic (same results every run)

pub mod milestone_tests;
pub mod mock_infrastructure;

// Re-export common test utilities
pub use mock_infrastructure::*;
