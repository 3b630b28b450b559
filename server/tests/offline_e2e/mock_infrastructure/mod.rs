//! Shared test infrastructure: deterministic RNG and document fixtures

pub mod deterministic_rng;
pub mod test_fixtures;

pub use deterministic_rng::DeterministicRng;
pub use test_fixtures::*;
