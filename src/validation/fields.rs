//! Field schema validator
//!
//! Checks presence, type, and format of every field independently of the
//! others and turns an untyped input object into a [`PatientRecord`]. Every
//! check runs regardless of earlier failures; violations are concatenated in
//! field declaration order.

use super::formats::{is_blank, is_email, is_spanish_mobile, parse_calendar_date, parse_form_bool};
use super::path::FieldPath;
use super::violation::Violation;
use super::FieldValidation;
use crate::patient::{Address, Billing, Contact, IdentityDocument, PatientRecord};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use stillwater::validation::ValidateAll;
use stillwater::Validation;

type Object = Map<String, Value>;

/// Absent keys and explicit `null` are treated the same
fn lookup<'a>(object: &'a Object, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn fail<T>(violation: Violation) -> FieldValidation<T> {
    Validation::failure(vec![violation])
}

fn expected_text(found: &Value) -> &'static str {
    match found {
        Value::Number(_) => "Expected text, found a number",
        _ => "Expected text",
    }
}

/// Required text: absent, null, or blank after trimming is `MissingField`
pub fn required_string(object: &Object, key: &str, parent: &FieldPath) -> FieldValidation<String> {
    let path = parent.push_key(key);
    match lookup(object, key) {
        None => fail(Violation::missing(path)),
        Some(Value::String(s)) if is_blank(s) => fail(Violation::missing(path)),
        Some(Value::String(s)) => Validation::success(s.clone()),
        Some(other) => fail(Violation::invalid(path, expected_text(other))),
    }
}

pub fn optional_string(
    object: &Object,
    key: &str,
    parent: &FieldPath,
) -> FieldValidation<Option<String>> {
    match lookup(object, key) {
        None => Validation::success(None),
        Some(Value::String(s)) => Validation::success(Some(s.clone())),
        Some(other) => fail(Violation::invalid(parent.push_key(key), expected_text(other))),
    }
}

/// Boolean flag with form-encoding coercion; absent means `false`
pub fn form_bool(object: &Object, key: &str, parent: &FieldPath) -> FieldValidation<bool> {
    let parsed = match lookup(object, key) {
        None => Some(false),
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Some(Value::String(s)) => parse_form_bool(s),
        Some(_) => None,
    };

    match parsed {
        Some(flag) => Validation::success(flag),
        None => fail(Violation::invalid(
            parent.push_key(key),
            "Expected a boolean value",
        )),
    }
}

pub fn birth_date(object: &Object, parent: &FieldPath) -> FieldValidation<NaiveDate> {
    let path = parent.push_key("birthDate");
    required_string(object, "birthDate", parent).and_then(|raw| match parse_calendar_date(&raw) {
        Some(date) => Validation::success(date),
        None => fail(Violation::invalid(path, "Invalid date")),
    })
}

fn phone(object: &Object, parent: &FieldPath) -> FieldValidation<String> {
    let path = parent.push_key("phone");
    required_string(object, "phone", parent).and_then(|raw| {
        if is_spanish_mobile(&raw) {
            Validation::success(raw)
        } else {
            fail(Violation::invalid(path, "Invalid phone number"))
        }
    })
}

fn required_email(object: &Object, key: &str, parent: &FieldPath) -> FieldValidation<String> {
    let path = parent.push_key(key);
    required_string(object, key, parent).and_then(|raw| {
        if is_email(&raw) {
            Validation::success(raw)
        } else {
            fail(Violation::invalid(path, "Invalid email address"))
        }
    })
}

/// Optional email; blank values skip the format check
fn optional_email(
    object: &Object,
    key: &str,
    parent: &FieldPath,
) -> FieldValidation<Option<String>> {
    let path = parent.push_key(key);
    optional_string(object, key, parent).and_then(|raw| match raw {
        Some(email) if !is_blank(&email) && !is_email(&email) => {
            fail(Violation::invalid(path, "Invalid email address"))
        }
        other => Validation::success(other),
    })
}

/// Opaque caller-supplied identifier; numbers are kept as their decimal text
fn contact_id(object: &Object, parent: &FieldPath) -> FieldValidation<Option<String>> {
    match lookup(object, "id") {
        None => Validation::success(None),
        Some(Value::String(s)) => Validation::success(Some(s.clone())),
        Some(Value::Number(n)) => Validation::success(Some(n.to_string())),
        Some(_) => fail(Violation::invalid(
            parent.push_key("id"),
            "Expected a text or numeric identifier",
        )),
    }
}

/// Validate one entry of the `contacts` array located at `path`
pub fn validate_contact(value: &Value, path: &FieldPath) -> FieldValidation<Contact> {
    let Some(object) = value.as_object() else {
        return fail(Violation::invalid(path.clone(), "Expected a contact object"));
    };

    (
        contact_id(object, path),
        required_string(object, "name", path),
        required_string(object, "relationship", path),
        phone(object, path),
        required_email(object, "email", path),
        optional_string(object, "whatsapp", path),
        form_bool(object, "isPrimary", path),
        form_bool(object, "isEmergency", path),
    )
        .validate_all()
        .map(
            |(id, name, relationship, phone, email, whatsapp, is_primary, is_emergency)| Contact {
                id,
                name,
                relationship,
                phone,
                email,
                whatsapp,
                is_primary,
                is_emergency,
            },
        )
}

/// Validate the `contacts` collection, accumulating errors across all entries
pub fn validate_contacts(object: &Object, parent: &FieldPath) -> FieldValidation<Vec<Contact>> {
    let path = parent.push_key("contacts");
    match lookup(object, "contacts") {
        None => fail(Violation::missing(path)),
        Some(Value::Array(items)) if items.is_empty() => fail(Violation::empty_collection(path)),
        Some(Value::Array(items)) => Validation::all_vec(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| validate_contact(item, &path.push_index(index)))
                .collect(),
        ),
        Some(_) => fail(Violation::invalid(path, "Expected a list of contacts")),
    }
}

fn validate_address(object: &Object, parent: &FieldPath) -> FieldValidation<Address> {
    (
        optional_string(object, "street", parent),
        optional_string(object, "city", parent),
        optional_string(object, "postalCode", parent),
        optional_string(object, "province", parent),
        optional_string(object, "country", parent),
    )
        .validate_all()
        .map(|(street, city, postal_code, province, country)| Address {
            street,
            city,
            postal_code,
            province,
            country,
        })
}

fn validate_identity(object: &Object, parent: &FieldPath) -> FieldValidation<IdentityDocument> {
    (
        optional_string(object, "documentType", parent),
        optional_string(object, "documentNumber", parent),
    )
        .validate_all()
        .map(|(document_type, document_number)| IdentityDocument {
            document_type,
            document_number,
        })
}

/// Billing group shape only; the conditional requirement is a business rule
fn validate_billing(object: &Object, parent: &FieldPath) -> FieldValidation<(bool, Billing)> {
    (
        form_bool(object, "billingEnabled", parent),
        optional_string(object, "billingName", parent),
        optional_string(object, "billingDocumentType", parent),
        optional_string(object, "billingDocumentNumber", parent),
        optional_string(object, "billingStreet", parent),
        optional_string(object, "billingCity", parent),
        optional_string(object, "billingPostalCode", parent),
        optional_string(object, "billingProvince", parent),
        optional_string(object, "billingCountry", parent),
        optional_email(object, "billingEmail", parent),
    )
        .validate_all()
        .map(
            |(
                enabled,
                name,
                document_type,
                document_number,
                street,
                city,
                postal_code,
                province,
                country,
                email,
            )| {
                (
                    enabled,
                    Billing {
                        name,
                        document_type,
                        document_number,
                        street,
                        city,
                        postal_code,
                        province,
                        country,
                        email,
                    },
                )
            },
        )
}

/// Run every field-level check over a record object.
///
/// Unknown keys are ignored.
pub fn validate_fields(object: &Object) -> FieldValidation<PatientRecord> {
    let root = FieldPath::root();

    let basics = (
        required_string(object, "firstName", &root),
        required_string(object, "lastName", &root),
        birth_date(object, &root),
        optional_string(object, "gender", &root),
        optional_string(object, "notes", &root),
        form_bool(object, "isMinor", &root),
    )
        .validate_all();

    (
        basics,
        validate_contacts(object, &root),
        validate_address(object, &root),
        validate_identity(object, &root),
        validate_billing(object, &root),
    )
        .validate_all()
        .map(
            |(
                (first_name, last_name, birth_date, gender, notes, is_minor),
                contacts,
                address,
                identity,
                (billing_enabled, billing),
            )| PatientRecord {
                first_name,
                last_name,
                birth_date,
                gender,
                notes,
                is_minor,
                contacts,
                address,
                identity,
                billing_enabled,
                billing,
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ViolationKind;
    use serde_json::json;

    fn object(value: Value) -> Object {
        value.as_object().cloned().expect("test input must be an object")
    }

    fn valid_contact() -> Value {
        json!({
            "id": "c-1",
            "name": "Marta Ruiz",
            "relationship": "parent",
            "phone": "+34611223344",
            "email": "marta@example.es",
            "isPrimary": true
        })
    }

    fn valid_input() -> Value {
        json!({
            "firstName": "Pablo",
            "lastName": "Ruiz",
            "birthDate": "1990-04-12",
            "contacts": [valid_contact()]
        })
    }

    fn errors<T: std::fmt::Debug>(result: FieldValidation<T>) -> Vec<Violation> {
        match result {
            Validation::Failure(errors) => errors,
            Validation::Success(value) => panic!("Expected validation failure, got {:?}", value),
        }
    }

    #[test]
    fn test_valid_input_produces_typed_record() {
        let result = validate_fields(&object(valid_input()));
        match result {
            Validation::Success(record) => {
                assert_eq!(record.first_name, "Pablo");
                assert_eq!(
                    record.birth_date,
                    NaiveDate::from_ymd_opt(1990, 4, 12).unwrap()
                );
                assert_eq!(record.contacts.len(), 1);
                assert!(record.contacts[0].is_primary);
                assert!(!record.contacts[0].is_emergency);
                assert!(!record.is_minor);
                assert!(!record.billing_enabled);
            }
            Validation::Failure(errors) => panic!("Unexpected failure: {:?}", errors),
        }
    }

    #[test]
    fn test_required_string_missing_null_and_blank() {
        let obj = object(json!({"a": null, "b": "   ", "c": 5}));
        let root = FieldPath::root();

        for key in ["a", "b", "missing"] {
            let errs = errors(required_string(&obj, key, &root));
            assert_eq!(errs.len(), 1);
            assert_eq!(errs[0].kind, ViolationKind::MissingField);
            assert_eq!(errs[0].path.to_string(), key);
        }

        let errs = errors(required_string(&obj, "c", &root));
        assert_eq!(errs[0].kind, ViolationKind::InvalidFormat);
        assert_eq!(errs[0].message, "Expected text, found a number");
    }

    #[test]
    fn test_optional_string_rejects_numbers_with_hint() {
        let obj = object(json!({"postalCode": 28001, "city": true}));
        let root = FieldPath::root();

        let errs = errors(optional_string(&obj, "postalCode", &root));
        assert_eq!(errs[0].message, "Expected text, found a number");

        let errs = errors(optional_string(&obj, "city", &root));
        assert_eq!(errs[0].message, "Expected text");
    }

    #[test]
    fn test_required_string_keeps_value_verbatim() {
        let obj = object(json!({"name": "  Ana  "}));
        let result = required_string(&obj, "name", &FieldPath::root());
        assert_eq!(result, Validation::Success("  Ana  ".to_string()));
    }

    #[test]
    fn test_form_bool_coercion() {
        let obj = object(json!({
            "a": true,
            "b": "on",
            "c": "false",
            "d": 1,
            "e": "sometimes",
            "f": [true]
        }));
        let root = FieldPath::root();

        assert_eq!(form_bool(&obj, "a", &root), Validation::Success(true));
        assert_eq!(form_bool(&obj, "b", &root), Validation::Success(true));
        assert_eq!(form_bool(&obj, "c", &root), Validation::Success(false));
        assert_eq!(form_bool(&obj, "d", &root), Validation::Success(true));
        assert_eq!(form_bool(&obj, "absent", &root), Validation::Success(false));
        assert!(form_bool(&obj, "e", &root).is_failure());
        assert!(form_bool(&obj, "f", &root).is_failure());
    }

    #[test]
    fn test_birth_date_invalid_format() {
        let obj = object(json!({"birthDate": "31/12/2010"}));
        let errs = errors(birth_date(&obj, &FieldPath::root()));
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ViolationKind::InvalidFormat);
        assert_eq!(errs[0].path.to_string(), "birthDate");
    }

    #[test]
    fn test_birth_date_missing_is_missing_field() {
        let errs = errors(birth_date(&object(json!({})), &FieldPath::root()));
        assert_eq!(errs[0].kind, ViolationKind::MissingField);
    }

    #[test]
    fn test_contacts_missing_empty_and_wrong_type() {
        let root = FieldPath::root();

        let errs = errors(validate_contacts(&object(json!({})), &root));
        assert_eq!(errs[0].kind, ViolationKind::MissingField);

        let errs = errors(validate_contacts(&object(json!({"contacts": []})), &root));
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ViolationKind::EmptyCollection);
        assert_eq!(errs[0].path.to_string(), "contacts");

        let errs = errors(validate_contacts(
            &object(json!({"contacts": "Marta"})),
            &root,
        ));
        assert_eq!(errs[0].kind, ViolationKind::InvalidFormat);
    }

    #[test]
    fn test_contact_errors_are_indexed() {
        let mut second = valid_contact();
        second["phone"] = json!("511223344");
        second["email"] = json!("not-an-email");
        let obj = object(json!({"contacts": [valid_contact(), second, "oops"]}));

        let errs = errors(validate_contacts(&obj, &FieldPath::root()));
        let paths: Vec<String> = errs.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(
            paths,
            vec!["contacts[1].phone", "contacts[1].email", "contacts[2]"]
        );
        assert!(errs.iter().all(|e| e.kind == ViolationKind::InvalidFormat));
    }

    #[test]
    fn test_contact_numeric_id_is_kept_as_text() {
        let mut contact = valid_contact();
        contact["id"] = json!(42);
        match validate_contact(&contact, &FieldPath::field("contacts").push_index(0)) {
            Validation::Success(c) => assert_eq!(c.id.as_deref(), Some("42")),
            Validation::Failure(errs) => panic!("Unexpected failure: {:?}", errs),
        }
    }

    #[test]
    fn test_billing_email_blank_is_not_checked() {
        let mut input = valid_input();
        input["billingEmail"] = json!("  ");
        assert!(validate_fields(&object(input.clone())).is_success());

        input["billingEmail"] = json!("billing@");
        let errs = errors(validate_fields(&object(input)));
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path.to_string(), "billingEmail");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut input = valid_input();
        input["favouriteColour"] = json!({"nested": [1, 2, 3]});
        assert!(validate_fields(&object(input)).is_success());
    }

    #[test]
    fn test_collects_all_field_errors_in_declaration_order() {
        let input = json!({
            "firstName": "",
            "birthDate": "yesterday",
            "isMinor": "perhaps",
            "contacts": [{"name": "Ana", "relationship": "aunt", "phone": "61122334"}],
            "postalCode": 28001
        });

        let errs = errors(validate_fields(&object(input)));
        let summary: Vec<(String, ViolationKind)> = errs
            .iter()
            .map(|e| (e.path.to_string(), e.kind))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("firstName".to_string(), ViolationKind::MissingField),
                ("lastName".to_string(), ViolationKind::MissingField),
                ("birthDate".to_string(), ViolationKind::InvalidFormat),
                ("isMinor".to_string(), ViolationKind::InvalidFormat),
                ("contacts[0].phone".to_string(), ViolationKind::InvalidFormat),
                ("contacts[0].email".to_string(), ViolationKind::MissingField),
                ("postalCode".to_string(), ViolationKind::InvalidFormat),
            ]
        );
    }
}
