//! Typed patient record produced by the field layer
//!
//! These types only exist after the field schema validator has accepted an
//! input. String values are kept exactly as submitted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Patient record ready for the business rule engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: Option<String>,
    pub notes: Option<String>,
    /// Caller-supplied flag. Never reconciled with the computed age.
    pub is_minor: bool,
    pub contacts: Vec<Contact>,
    pub address: Address,
    pub identity: IdentityDocument,
    pub billing_enabled: bool,
    pub billing: Billing,
}

impl PatientRecord {
    /// Contacts flagged as primary
    pub fn primary_contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().filter(|c| c.is_primary)
    }

    pub fn emergency_contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().filter(|c| c.is_emergency)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Option<String>,
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub email: String,
    pub whatsapp: Option<String>,
    pub is_primary: bool,
    pub is_emergency: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityDocument {
    pub document_type: Option<String>,
    pub document_number: Option<String>,
}

/// Billing details; all optional until `billingEnabled` is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub name: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
}

impl Billing {
    /// Fields that become mandatory when billing is enabled, keyed by their
    /// form input name
    pub fn required_fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("billingName", self.name.as_deref()),
            ("billingDocumentNumber", self.document_number.as_deref()),
            ("billingStreet", self.street.as_deref()),
            ("billingCity", self.city.as_deref()),
            ("billingPostalCode", self.postal_code.as_deref()),
        ]
    }
}
