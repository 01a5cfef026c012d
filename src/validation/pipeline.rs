//! Intake pipeline: field layer, then business rules, then one result
//!
//! ```
//! use chrono::NaiveDate;
//! use clinic_intake::abstractions::FixedClock;
//! use clinic_intake::validation::IntakeValidator;
//! use serde_json::json;
//! use stillwater::Validation;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let validator = IntakeValidator::with_clock(FixedClock::new(today));
//!
//! let input = json!({
//!     "firstName": "Irene",
//!     "lastName": "Soto",
//!     "birthDate": "1985-07-02",
//!     "contacts": [{
//!         "name": "Irene Soto",
//!         "relationship": "self",
//!         "phone": "611223344",
//!         "email": "irene@example.es",
//!         "isPrimary": true
//!     }]
//! });
//!
//! match validator.validate(&input).unwrap() {
//!     Validation::Success(record) => assert_eq!(record.last_name, "Soto"),
//!     Validation::Failure(violations) => panic!("{:?}", violations),
//! }
//! ```

use super::fields::validate_fields;
use super::path::FieldPath;
use super::rules::{evaluate_rules, RuleSettings};
use super::violation::Violation;
use crate::abstractions::{Clock, SystemClock};
use crate::error::IntakeError;
use crate::patient::PatientRecord;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use stillwater::Validation;
use tracing::debug;

/// Outcome of validating one submission.
///
/// `Failure` always holds at least one violation.
pub type IntakeValidation = Validation<PatientRecord, Vec<Violation>>;

fn describe_json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Validate one submission against an explicit evaluation date.
///
/// Returns `Err` only when `input` is not an object at all. Every rule failure
/// is reported inside the returned [`IntakeValidation`].
pub fn validate_patient(
    input: &Value,
    settings: &RuleSettings,
    today: NaiveDate,
) -> Result<IntakeValidation, IntakeError> {
    let object = input
        .as_object()
        .ok_or_else(|| IntakeError::not_an_object(describe_json_kind(input)))?;

    let result = validate_fields(object).and_then(|record| {
        evaluate_rules(&record, settings, today).map(|()| record)
    });

    match &result {
        Validation::Success(record) => debug!(
            "Patient record accepted ({} contacts)",
            record.contacts.len()
        ),
        Validation::Failure(violations) => {
            debug!("Patient record rejected with {} violations", violations.len())
        }
    }

    Ok(result)
}

/// Reusable validator bundling rule settings with a date source
#[derive(Debug, Clone)]
pub struct IntakeValidator<C = SystemClock> {
    settings: RuleSettings,
    clock: C,
}

impl IntakeValidator<SystemClock> {
    /// Validator with default rules evaluated against the local date
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for IntakeValidator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> IntakeValidator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            settings: RuleSettings::default(),
            clock,
        }
    }

    pub fn with_settings(mut self, settings: RuleSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    /// Validate one submission, reading today's date from the clock once
    pub fn validate(&self, input: &Value) -> Result<IntakeValidation, IntakeError> {
        let today = self.clock.today();
        debug!("Validating patient intake record as of {}", today);
        validate_patient(input, &self.settings, today)
    }
}

/// Serializable summary of an [`IntakeValidation`] for UI and CLI consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<PatientRecord>,
    pub violations: Vec<Violation>,
}

impl From<IntakeValidation> for ValidationReport {
    fn from(result: IntakeValidation) -> Self {
        match result {
            Validation::Success(record) => Self {
                valid: true,
                record: Some(record),
                violations: Vec::new(),
            },
            Validation::Failure(violations) => Self {
                valid: false,
                record: None,
                violations,
            },
        }
    }
}

impl ValidationReport {
    /// Violations whose path is `path` or lies beneath it
    pub fn violations_at<'a>(
        &'a self,
        path: &'a FieldPath,
    ) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.path.starts_with(path))
    }
}
