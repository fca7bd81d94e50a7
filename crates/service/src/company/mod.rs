pub mod repository;
pub mod service;

pub use repository::{CompanyRepository, NewCompany, SeaOrmCompanyRepository};
pub use service::{CompanyService, CreateCompany, UpdateCompany};

use serde::Serialize;
use uuid::Uuid;

/// A company with its member employees, one level deep. This is the shape
/// every operation returns; it is refetched after each write rather than
/// mutated in place.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyAggregate {
    #[serde(flatten)]
    pub company: models::company::Model,
    pub employees: Vec<models::employee::Model>,
}

impl CompanyAggregate {
    pub fn employee_ids(&self) -> Vec<Uuid> {
        self.employees.iter().map(|e| e.id).collect()
    }

    pub fn has_employee(&self, id: Uuid) -> bool {
        self.employees.iter().any(|e| e.id == id)
    }
}
