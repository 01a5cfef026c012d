//! Violation taxonomy and the fixed message set

use super::path::FieldPath;
use serde::Serialize;
use std::fmt;

/// Category of a reported rule failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    /// Required field absent or blank
    MissingField,
    /// Field present but unparseable or malformed
    InvalidFormat,
    /// Required collection has no elements
    EmptyCollection,
    /// Not exactly one contact flagged as primary
    PrimaryContactInvariant,
    /// Patient under the minor threshold without a qualifying guardian contact
    GuardianRequired,
    /// Billing enabled but a billing field is blank
    BillingFieldRequired,
}

impl ViolationKind {
    /// Whether this kind comes from the business rule engine
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::PrimaryContactInvariant | Self::GuardianRequired | Self::BillingFieldRequired
        )
    }
}

/// One reported rule failure, scoped to a field path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: FieldPath,
    #[serde(rename = "code")]
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(path: FieldPath, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }

    pub fn missing(path: FieldPath) -> Self {
        Self::new(path, ViolationKind::MissingField, "This field is required")
    }

    pub fn invalid(path: FieldPath, message: impl Into<String>) -> Self {
        Self::new(path, ViolationKind::InvalidFormat, message)
    }

    pub fn empty_collection(path: FieldPath) -> Self {
        Self::new(
            path,
            ViolationKind::EmptyCollection,
            "At least one contact is required",
        )
    }

    pub fn primary_contact(path: FieldPath) -> Self {
        Self::new(
            path,
            ViolationKind::PrimaryContactInvariant,
            "Exactly one contact must be marked as primary",
        )
    }

    pub fn guardian_required(path: FieldPath, minor_age_threshold: u32) -> Self {
        Self::new(
            path,
            ViolationKind::GuardianRequired,
            format!(
                "Patients under {} need a parent or guardian contact with a name and an email or phone",
                minor_age_threshold
            ),
        )
    }

    pub fn billing_required(path: FieldPath) -> Self {
        Self::new(
            path,
            ViolationKind::BillingFieldRequired,
            "This field is required when billing is enabled",
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for Violation {}
