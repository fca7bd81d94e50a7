use crate::{company, employee};

#[test]
fn registry_number_requires_exactly_14_digits() {
    assert!(company::validate_registry_number("12345678000190").is_ok());
    assert!(company::validate_registry_number("1234567800019").is_err());
    assert!(company::validate_registry_number("123456780001901").is_err());
    assert!(company::validate_registry_number("1234567800019a").is_err());
    assert!(company::validate_registry_number("").is_err());
}

#[test]
fn ssn_requires_exactly_11_digits() {
    assert!(employee::validate_social_security_number("12345678901").is_ok());
    assert!(employee::validate_social_security_number("1234567890").is_err());
    assert!(employee::validate_social_security_number("123456789012").is_err());
    assert!(employee::validate_social_security_number("12345-78901").is_err());
}

#[test]
fn name_and_address_must_not_be_blank() {
    assert!(company::validate_name("Acme").is_ok());
    assert!(company::validate_name("   ").is_err());
    assert!(company::validate_address("1 Main St").is_ok());
    assert!(company::validate_address("").is_err());
    assert!(employee::validate_name("Bob").is_ok());
    assert!(employee::validate_name("").is_err());
}

#[test]
fn email_structural_check() {
    assert!(employee::validate_email("bob@example.com").is_ok());
    assert!(employee::validate_email("bob.smith@mail.example.org").is_ok());
    assert!(employee::validate_email("bob").is_err());
    assert!(employee::validate_email("@example.com").is_err());
    assert!(employee::validate_email("bob@").is_err());
    assert!(employee::validate_email("bob@localhost").is_err());
    assert!(employee::validate_email("bob@.com").is_err());
    assert!(employee::validate_email("a@b@c.com").is_err());
}

#[test]
fn company_model_serializes_camel_case() {
    let now = chrono::Utc::now().fixed_offset();
    let m = company::Model {
        id: uuid::Uuid::new_v4(),
        name: "Acme".into(),
        national_registry_of_legal_entity: "12345678000190".into(),
        address: "1 Main St".into(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };
    let v = serde_json::to_value(&m).unwrap();
    assert!(v.get("nationalRegistryOfLegalEntity").is_some());
    assert!(v.get("createdAt").is_some());
    assert!(v["deletedAt"].is_null());
}
