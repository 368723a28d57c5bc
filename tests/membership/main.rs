//! Membership Integration Tests
//!
//! Party and session membership through the coordinator: the exclusion
//! invariants, party role invariants and the party operations.

#[path = "../common/mod.rs"]
mod common;

mod party_policy;
