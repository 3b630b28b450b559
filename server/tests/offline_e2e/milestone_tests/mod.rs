//! Milestone lifecycle tests

pub mod edit_guard_test;
