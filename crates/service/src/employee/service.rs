use std::sync::Arc;

use sea_orm::SqlErr;
use tracing::{info, instrument};
use uuid::Uuid;

use super::repository::{EmployeeRepository, NewEmployee};
use super::EmployeeAggregate;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

#[derive(Debug, Clone, Default)]
pub struct CreateEmployee {
    pub name: String,
    pub social_security_number: String,
    pub email: String,
    pub address: String,
    pub companies: Vec<Uuid>,
}

/// Partial update; the SSN and memberships are not reachable through here.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Relationship manager for employees; mirror of `CompanyService` with
/// companies as the associated side.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: Arc<R>,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_employees(
        &self,
        window: Option<Pagination>,
    ) -> Result<Vec<EmployeeAggregate>, ServiceError> {
        self.repo.find(window).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    pub async fn get_employee(&self, id: Uuid) -> Result<Option<EmployeeAggregate>, ServiceError> {
        self.repo.find_one(id).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    #[instrument(skip(self, input))]
    pub async fn create_employee(&self, input: CreateEmployee) -> Result<EmployeeAggregate, ServiceError> {
        let CreateEmployee { name, social_security_number, email, address, companies } = input;
        let row = NewEmployee { name, social_security_number, email, address };
        match self.repo.create(row, &companies).await {
            Ok(created) => {
                info!(id = %created.employee.id, members = created.companies.len(), "employee_created");
                Ok(created)
            }
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(ServiceError::Duplicate("Employee")),
                _ => Err(ServiceError::Db(e.to_string())),
            },
        }
    }

    pub async fn update_employee(
        &self,
        mut target: EmployeeAggregate,
        changes: UpdateEmployee,
    ) -> Result<EmployeeAggregate, ServiceError> {
        if let Some(name) = changes.name {
            target.employee.name = name;
        }
        if let Some(email) = changes.email {
            target.employee.email = email;
        }
        if let Some(address) = changes.address {
            target.employee.address = address;
        }
        let members = target.company_ids();
        self.repo
            .save(target.employee, &members)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    /// Pure append, same contract as the company side.
    pub async fn add_company_to_employee(
        &self,
        target: EmployeeAggregate,
        company_ids: &[Uuid],
    ) -> Result<EmployeeAggregate, ServiceError> {
        let mut members = target.company_ids();
        members.extend_from_slice(company_ids);
        self.repo
            .save(target.employee, &members)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    /// Set difference by id; non-members are a silent no-op at this layer.
    pub async fn remove_company_from_employee(
        &self,
        target: EmployeeAggregate,
        company_ids: &[Uuid],
    ) -> Result<EmployeeAggregate, ServiceError> {
        let members: Vec<Uuid> = target
            .company_ids()
            .into_iter()
            .filter(|id| !company_ids.contains(id))
            .collect();
        self.repo
            .save(target.employee, &members)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    pub async fn remove_employee(&self, target: EmployeeAggregate) -> Result<EmployeeAggregate, ServiceError> {
        let removed = self
            .repo
            .soft_remove(target.employee)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        info!(id = %removed.employee.id, "employee_soft_deleted");
        Ok(removed)
    }
}
