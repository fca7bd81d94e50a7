use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// A company record. `deleted_at` set means the row is soft-deleted and
/// invisible to every lookup; the registry number stays reserved only while
/// the row is active (partial unique index in the schema).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub national_registry_of_legal_entity: String,
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

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        super::company_employee::Relation::Employee.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::company_employee::Relation::Company.def().rev())
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

/// National registry of legal entity: exactly 14 digits.
pub fn validate_registry_number(value: &str) -> Result<(), ModelError> {
    if value.len() != 14 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModelError::Validation(
            "nationalRegistryOfLegalEntity must be exactly 14 digits".into(),
        ));
    }
    Ok(())
}
