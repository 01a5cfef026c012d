//! Abstraction layers for ambient dependencies
//!
//! Trait-based seams so the validation core stays pure and testable.

pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};
