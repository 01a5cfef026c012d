//! Business rule engine
//!
//! Whole-record invariants over a typed [`PatientRecord`]. Each rule re-checks
//! the fields it reads instead of trusting the field layer, so it can also be
//! pointed at records assembled elsewhere.
//!
//! Contact-level rules report a single violation on `contacts`; the billing
//! rule reports one violation per blank field at that field's own path.

use super::age::age_on;
use super::formats::is_blank;
use super::path::FieldPath;
use super::violation::Violation;
use super::FieldValidation;
use crate::patient::{Contact, PatientRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stillwater::validation::ValidateAll;
use stillwater::Validation;
use tracing::trace;

/// Age below which the guardian rule applies
pub const DEFAULT_MINOR_AGE_THRESHOLD: u32 = 14;

/// Relationships that satisfy the guardian rule
pub const DEFAULT_GUARDIAN_RELATIONSHIPS: &[&str] = &["parent", "guardian"];

/// Tunables for the business rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSettings {
    pub minor_age_threshold: u32,
    pub guardian_relationships: Vec<String>,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            minor_age_threshold: DEFAULT_MINOR_AGE_THRESHOLD,
            guardian_relationships: DEFAULT_GUARDIAN_RELATIONSHIPS
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }
}

impl RuleSettings {
    fn is_guardian_relationship(&self, relationship: &str) -> bool {
        self.guardian_relationships
            .iter()
            .any(|candidate| candidate == relationship)
    }
}

/// Exactly one contact must be primary. Zero and many share one message.
pub fn check_primary_contact(record: &PatientRecord) -> FieldValidation<()> {
    let primaries = record.primary_contacts().count();
    trace!("Primary contacts: {}", primaries);

    if primaries == 1 {
        Validation::success(())
    } else {
        Validation::failure(vec![Violation::primary_contact(FieldPath::field(
            "contacts",
        ))])
    }
}

fn is_qualifying_guardian(contact: &Contact, settings: &RuleSettings) -> bool {
    settings.is_guardian_relationship(&contact.relationship)
        && !is_blank(&contact.name)
        && (!is_blank(&contact.email) || !is_blank(&contact.phone))
}

/// Minors need at least one reachable parent or guardian contact
pub fn check_guardian(
    record: &PatientRecord,
    settings: &RuleSettings,
    today: NaiveDate,
) -> FieldValidation<()> {
    let age = age_on(record.birth_date, today);
    let threshold = i64::from(settings.minor_age_threshold);
    trace!("Computed age {} on {} (threshold {})", age, today, threshold);

    if i64::from(age) >= threshold {
        return Validation::success(());
    }

    if record
        .contacts
        .iter()
        .any(|contact| is_qualifying_guardian(contact, settings))
    {
        Validation::success(())
    } else {
        Validation::failure(vec![Violation::guardian_required(
            FieldPath::field("contacts"),
            settings.minor_age_threshold,
        )])
    }
}

/// With billing enabled, each required billing field is checked on its own
pub fn check_billing(record: &PatientRecord) -> FieldValidation<()> {
    if !record.billing_enabled {
        return Validation::success(());
    }

    let violations: Vec<Violation> = record
        .billing
        .required_fields()
        .iter()
        .filter(|(_, value)| value.map_or(true, is_blank))
        .map(|(key, _)| Violation::billing_required(FieldPath::field(*key)))
        .collect();

    if violations.is_empty() {
        Validation::success(())
    } else {
        Validation::failure(violations)
    }
}

/// Evaluate every business rule and accumulate their violations
pub fn evaluate_rules(
    record: &PatientRecord,
    settings: &RuleSettings,
    today: NaiveDate,
) -> FieldValidation<()> {
    (
        check_primary_contact(record),
        check_guardian(record, settings, today),
        check_billing(record),
    )
        .validate_all()
        .map(|_| ())
}
