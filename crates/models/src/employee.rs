use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// An employee record. Soft-delete semantics mirror `company`: the social
/// security number is unique among active rows only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub social_security_number: String,
    pub email: String,
    pub address: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::company_employee::Entity")]
    CompanyEmployee,
}

impl Related<super::company_employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanyEmployee.def()
    }
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        super::company_employee::Relation::Company.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::company_employee::Relation::Employee.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name must not be empty".into()));
    }
    Ok(())
}

pub fn validate_address(address: &str) -> Result<(), ModelError> {
    if address.trim().is_empty() {
        return Err(ModelError::Validation("address must not be empty".into()));
    }
    Ok(())
}

/// Social security number: exactly 11 digits.
pub fn validate_social_security_number(value: &str) -> Result<(), ModelError> {
    if value.len() != 11 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModelError::Validation(
            "socialSecurityNumber must be exactly 11 digits".into(),
        ));
    }
    Ok(())
}

/// Structural email check: one `@`, non-empty local part, dotted domain.
pub fn validate_email(value: &str) -> Result<(), ModelError> {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    let ok = !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if !ok {
        return Err(ModelError::Validation("email is not a valid address".into()));
    }
    Ok(())
}
