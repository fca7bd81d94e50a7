use std::sync::Arc;

use sea_orm::SqlErr;
use tracing::{info, instrument};
use uuid::Uuid;

use super::repository::{CompanyRepository, NewCompany};
use super::CompanyAggregate;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Fields accepted on create. Employee ids are attached as given, never
/// pre-checked for existence; the persistence layer resolves them and a bad
/// id surfaces as an opaque FK violation.
#[derive(Debug, Clone, Default)]
pub struct CreateCompany {
    pub name: String,
    pub national_registry_of_legal_entity: String,
    pub address: String,
    pub employees: Vec<Uuid>,
}

/// Partial update: unset fields stay untouched. Identifier and membership
/// fields never travel through this path.
#[derive(Debug, Clone, Default)]
pub struct UpdateCompany {
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Relationship manager for companies: lifecycle plus the company side of
/// the company/employee association.
pub struct CompanyService<R: CompanyRepository> {
    repo: Arc<R>,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_companies(
        &self,
        window: Option<Pagination>,
    ) -> Result<Vec<CompanyAggregate>, ServiceError> {
        self.repo.find(window).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    /// Not-found is a sentinel here, not an error; the boundary decides what
    /// an absent company means.
    pub async fn get_company(&self, id: Uuid) -> Result<Option<CompanyAggregate>, ServiceError> {
        self.repo.find_one(id).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    #[instrument(skip(self, input))]
    pub async fn create_company(&self, input: CreateCompany) -> Result<CompanyAggregate, ServiceError> {
        let CreateCompany { name, national_registry_of_legal_entity, address, employees } = input;
        let row = NewCompany { name, national_registry_of_legal_entity, address };
        match self.repo.create(row, &employees).await {
            Ok(created) => {
                info!(id = %created.company.id, members = created.employees.len(), "company_created");
                Ok(created)
            }
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(ServiceError::Duplicate("Company")),
                _ => Err(ServiceError::Db(e.to_string())),
            },
        }
    }

    pub async fn update_company(
        &self,
        mut target: CompanyAggregate,
        changes: UpdateCompany,
    ) -> Result<CompanyAggregate, ServiceError> {
        if let Some(name) = changes.name {
            target.company.name = name;
        }
        if let Some(address) = changes.address {
            target.company.address = address;
        }
        let members = target.employee_ids();
        self.repo
            .save(target.company, &members)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    /// Pure append: an already-present id is not rejected here; the save
    /// reconcile collapses it into the existing link.
    pub async fn add_employee_to_company(
        &self,
        target: CompanyAggregate,
        employee_ids: &[Uuid],
    ) -> Result<CompanyAggregate, ServiceError> {
        let mut members = target.employee_ids();
        members.extend_from_slice(employee_ids);
        self.repo
            .save(target.company, &members)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    /// Set difference by id; an id that is not a member is a silent no-op at
    /// this layer. The membership guard lives at the HTTP boundary.
    pub async fn remove_employee_from_company(
        &self,
        target: CompanyAggregate,
        employee_ids: &[Uuid],
    ) -> Result<CompanyAggregate, ServiceError> {
        let members: Vec<Uuid> = target
            .employee_ids()
            .into_iter()
            .filter(|id| !employee_ids.contains(id))
            .collect();
        self.repo
            .save(target.company, &members)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    pub async fn remove_company(&self, target: CompanyAggregate) -> Result<CompanyAggregate, ServiceError> {
        let removed = self
            .repo
            .soft_remove(target.company)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        info!(id = %removed.company.id, "company_soft_deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::*;
    use crate::company::SeaOrmCompanyRepository;
    use crate::employee::{CreateEmployee, EmployeeService, SeaOrmEmployeeRepository};
    use crate::require_db;

    fn digits(n: u32) -> String {
        format!("{:0width$}", Uuid::new_v4().as_u128() % 10u128.pow(n), width = n as usize)
    }

    fn company_input() -> CreateCompany {
        CreateCompany {
            name: "Acme Logistics".into(),
            national_registry_of_legal_entity: digits(14),
            address: "12 Dock Road".into(),
            employees: vec![],
        }
    }

    fn services(
        db: &sea_orm::DatabaseConnection,
    ) -> (CompanyService<SeaOrmCompanyRepository>, EmployeeService<SeaOrmEmployeeRepository>) {
        (
            CompanyService::new(Arc::new(SeaOrmCompanyRepository::new(db.clone()))),
            EmployeeService::new(Arc::new(SeaOrmEmployeeRepository::new(db.clone()))),
        )
    }

    async fn hire(svc: &EmployeeService<SeaOrmEmployeeRepository>, name: &str) -> Uuid {
        let e = svc
            .create_employee(CreateEmployee {
                name: name.into(),
                social_security_number: digits(11),
                email: format!("{}_{}@example.com", name.to_lowercase(), digits(4)),
                address: "9 Hill Street".into(),
                companies: vec![],
            })
            .await
            .expect("create employee");
        e.employee.id
    }

    #[tokio::test]
    async fn create_returns_input_fields_with_fresh_timestamps() -> anyhow::Result<()> {
        let db = require_db!();
        let (companies, _) = services(&db);

        let input = company_input();
        let created = companies.create_company(input.clone()).await?;
        assert_eq!(created.company.name, input.name);
        assert_eq!(
            created.company.national_registry_of_legal_entity,
            input.national_registry_of_legal_entity
        );
        assert_eq!(created.company.address, input.address);
        assert!(created.company.deleted_at.is_none());
        assert_eq!(created.company.created_at, created.company.updated_at);
        assert!(created.employees.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_registry_is_rejected_until_soft_deleted() -> anyhow::Result<()> {
        let db = require_db!();
        let (companies, _) = services(&db);

        let input = company_input();
        let first = companies.create_company(input.clone()).await?;

        let second = companies.create_company(input.clone()).await;
        assert!(matches!(second, Err(ServiceError::Duplicate("Company"))));

        // Soft-deleting the first frees the registry number
        companies.remove_company(first).await?;
        let third = companies.create_company(input).await?;
        assert!(third.company.deleted_at.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn soft_deleted_company_is_invisible() -> anyhow::Result<()> {
        let db = require_db!();
        let (companies, _) = services(&db);

        let created = companies.create_company(company_input()).await?;
        let id = created.company.id;
        let updated_before = created.company.updated_at;

        let removed = companies.remove_company(created).await?;
        let deleted_at = removed.company.deleted_at.expect("deleted_at set");
        assert!(deleted_at > updated_before);

        assert!(companies.get_company(id).await?.is_none());
        assert!(companies
            .list_companies(None)
            .await?
            .iter()
            .all(|c| c.company.id != id));
        Ok(())
    }

    #[tokio::test]
    async fn membership_round_trip() -> anyhow::Result<()> {
        let db = require_db!();
        let (companies, employees) = services(&db);

        let company = companies.create_company(company_input()).await?;
        let id = company.company.id;
        let e1 = hire(&employees, "Alice").await;
        let e2 = hire(&employees, "Bruno").await;

        let after_add = companies.add_employee_to_company(company, &[e1, e2]).await?;
        assert!(after_add.has_employee(e1) && after_add.has_employee(e2));

        // Appending an existing member again collapses into the same link
        let after_dup = companies.add_employee_to_company(after_add, &[e1]).await?;
        assert_eq!(after_dup.employees.iter().filter(|e| e.id == e1).count(), 1);

        let after_remove = companies.remove_employee_from_company(after_dup, &[e1]).await?;
        assert!(!after_remove.has_employee(e1));
        assert!(after_remove.has_employee(e2));

        let refetched = companies.get_company(id).await?.expect("company");
        assert_eq!(refetched.employee_ids(), vec![e2]);
        Ok(())
    }

    #[tokio::test]
    async fn removing_a_nonmember_is_a_noop() -> anyhow::Result<()> {
        let db = require_db!();
        let (companies, employees) = services(&db);

        let company = companies.create_company(company_input()).await?;
        let member = hire(&employees, "Carla").await;
        let stranger = hire(&employees, "Diego").await;

        let with_member = companies.add_employee_to_company(company, &[member]).await?;
        let unchanged = companies
            .remove_employee_from_company(with_member, &[stranger])
            .await?;
        assert_eq!(unchanged.employee_ids(), vec![member]);
        Ok(())
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_alone() -> anyhow::Result<()> {
        let db = require_db!();
        let (companies, employees) = services(&db);

        let company = companies.create_company(company_input()).await?;
        let member = hire(&employees, "Elena").await;
        let company = companies.add_employee_to_company(company, &[member]).await?;

        let address_before = company.company.address.clone();
        let registry_before = company.company.national_registry_of_legal_entity.clone();
        let updated_before = company.company.updated_at;

        let renamed = companies
            .update_company(company, UpdateCompany { name: Some("Acme Worldwide".into()), address: None })
            .await?;
        assert_eq!(renamed.company.name, "Acme Worldwide");
        assert_eq!(renamed.company.address, address_before);
        assert_eq!(renamed.company.national_registry_of_legal_entity, registry_before);
        assert_eq!(renamed.employee_ids(), vec![member]);
        assert!(renamed.company.updated_at > updated_before);
        Ok(())
    }

    #[tokio::test]
    async fn pagination_windows_do_not_overlap() -> anyhow::Result<()> {
        let db = require_db!();
        let (companies, _) = services(&db);

        for _ in 0..4 {
            companies.create_company(company_input()).await?;
        }

        let page0 = companies.list_companies(Some(Pagination::new(0, 2))).await?;
        let page1 = companies.list_companies(Some(Pagination::new(1, 2))).await?;
        assert!(page0.len() <= 2 && page1.len() <= 2);
        for c in &page1 {
            assert!(page0.iter().all(|p| p.company.id != c.company.id));
        }
        Ok(())
    }
}
