//! # Clinic Intake
//!
//! Validation engine for patient intake submissions.
//!
//! An untyped record (as produced by a form or an import file) passes through
//! two layers: a field schema validator that checks shape and formats, then a
//! business rule engine that checks cross-field invariants. Every failure is
//! collected; nothing short-circuits inside a layer.
//!
//! ## Usage
//!
//! ```bash
//! clinic-intake validate patient.json [--today 2026-10-18] [--format json]
//! ```
//!
//! ## Modules
//!
//! - `abstractions` - Trait-based abstractions for external dependencies (the clock)
//! - `app` - Binary-side logging, fatal error handling, and record loading
//! - `config` - Layered configuration for rule thresholds and logging
//! - `error` - Operational error type with codes and exit statuses
//! - `patient` - Typed patient record produced by the field layer
//! - `validation` - Field layer, business rules, and the composed pipeline
//! - `testing` - Testing utilities and fixtures
pub mod abstractions;
pub mod app;
pub mod config;
pub mod error;
pub mod patient;
pub mod validation;

pub mod testing;


pub use error::IntakeError;
pub use patient::PatientRecord;
pub use validation::{
    validate_patient, FieldPath, IntakeValidation, IntakeValidator, RuleSettings,
    ValidationReport, Violation, ViolationKind,
};
