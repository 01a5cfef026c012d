//! Patient-intake validation engine
//!
//! Two pure layers composed with stillwater's `Validation`, so every
//! violation is collected in one pass rather than stopping at the first:
//!
//! - **Field schema** ([`fields`]): presence, type, and format of each field
//! - **Business rules** ([`rules`]): primary contact, guardian, billing
//!
//! [`validate_patient`] runs both and returns one ordered violation list. Each
//! violation carries a [`FieldPath`] such as `contacts[0].phone` for UI binding.

pub mod age;
pub mod fields;
pub mod formats;
pub mod path;
pub mod pipeline;
pub mod rules;
pub mod violation;

use stillwater::Validation;

pub use age::age_on;
pub use path::{FieldPath, PathSegment};
pub use pipeline::{validate_patient, IntakeValidation, IntakeValidator, ValidationReport};
pub use rules::RuleSettings;
pub use violation::{Violation, ViolationKind};

/// Result of a single check: a value, or every violation it found
pub type FieldValidation<T> = Validation<T, Vec<Violation>>;
