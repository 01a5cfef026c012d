//! Test data builders for intake submissions
//!
//! Builders produce untyped `serde_json::Value` submissions, the same shape a
//! form handler would pass to the validator.

use serde_json::{json, Map, Value};

/// Builder for one contact entry
#[derive(Debug, Clone)]
pub struct ContactInputBuilder {
    fields: Map<String, Value>,
}

impl Default for ContactInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactInputBuilder {
    /// A valid, non-primary parent contact
    pub fn new() -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), json!("contact-1"));
        fields.insert("name".to_string(), json!("Elena Castro"));
        fields.insert("relationship".to_string(), json!("parent"));
        fields.insert("phone".to_string(), json!("611223344"));
        fields.insert("email".to_string(), json!("elena.castro@example.es"));
        fields.insert("isPrimary".to_string(), json!(false));
        fields.insert("isEmergency".to_string(), json!(false));
        Self { fields }
    }

    /// Set any key to any value, including malformed ones
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Drop a key entirely
    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with("id", json!(id))
    }

    pub fn with_name(self, name: &str) -> Self {
        self.with("name", json!(name))
    }

    pub fn with_relationship(self, relationship: &str) -> Self {
        self.with("relationship", json!(relationship))
    }

    pub fn with_phone(self, phone: &str) -> Self {
        self.with("phone", json!(phone))
    }

    pub fn with_email(self, email: &str) -> Self {
        self.with("email", json!(email))
    }

    pub fn primary(self) -> Self {
        self.with("isPrimary", json!(true))
    }

    pub fn emergency(self) -> Self {
        self.with("isEmergency", json!(true))
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Builder for a whole patient submission
#[derive(Debug, Clone)]
pub struct PatientInputBuilder {
    fields: Map<String, Value>,
    contacts: Vec<Value>,
}

impl Default for PatientInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientInputBuilder {
    /// A valid adult patient with one primary contact
    pub fn new() -> Self {
        let mut fields = Map::new();
        fields.insert("firstName".to_string(), json!("Javier"));
        fields.insert("lastName".to_string(), json!("Castro"));
        fields.insert("birthDate".to_string(), json!("1984-05-20"));
        Self {
            fields,
            contacts: vec![ContactInputBuilder::new()
                .with_relationship("spouse")
                .primary()
                .build()],
        }
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn with_birth_date(self, birth_date: &str) -> Self {
        self.with("birthDate", json!(birth_date))
    }

    /// Replace the contact list
    pub fn with_contacts(mut self, contacts: Vec<Value>) -> Self {
        self.contacts = contacts;
        self
    }

    pub fn add_contact(mut self, contact: Value) -> Self {
        self.contacts.push(contact);
        self
    }

    /// Enable billing with every required billing field filled in
    pub fn with_complete_billing(self) -> Self {
        self.with("billingEnabled", json!(true))
            .with("billingName", json!("Javier Castro"))
            .with("billingDocumentType", json!("DNI"))
            .with("billingDocumentNumber", json!("12345678Z"))
            .with("billingStreet", json!("Calle de Alcala 10"))
            .with("billingCity", json!("Madrid"))
            .with("billingPostalCode", json!("28014"))
            .with("billingEmail", json!("facturas@example.es"))
    }

    pub fn build(self) -> Value {
        let mut fields = self.fields;
        fields.insert("contacts".to_string(), Value::Array(self.contacts));
        Value::Object(fields)
    }
}
