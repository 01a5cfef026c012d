//! Test fixtures
//!
//! Reusable submission builders for unit and integration tests.

pub mod builders;

pub use builders::{ContactInputBuilder, PatientInputBuilder};
