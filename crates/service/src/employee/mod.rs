pub mod repository;
pub mod service;

pub use repository::{EmployeeRepository, NewEmployee, SeaOrmEmployeeRepository};
pub use service::{CreateEmployee, EmployeeService, UpdateEmployee};

use serde::Serialize;
use uuid::Uuid;

/// An employee with the companies it belongs to, one level deep. Inverse
/// view of the same join relation `CompanyAggregate` exposes.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeAggregate {
    #[serde(flatten)]
    pub employee: models::employee::Model,
    pub companies: Vec<models::company::Model>,
}

impl EmployeeAggregate {
    pub fn company_ids(&self) -> Vec<Uuid> {
        self.companies.iter().map(|c| c.id).collect()
    }

    pub fn has_company(&self, id: Uuid) -> bool {
        self.companies.iter().any(|c| c.id == id)
    }
}
