use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    LoaderTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use models::{company, company_employee, employee};

use super::CompanyAggregate;
use crate::pagination::Pagination;

/// Columns persisted on create; id and timestamps are generated by the
/// repository.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub national_registry_of_legal_entity: String,
    pub address: String,
}

/// Persistence gateway for companies. Raw `DbErr` crosses this seam
/// untranslated; the service above owns the domain mapping.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Active companies in insertion order, windowed when requested.
    async fn find(&self, window: Option<Pagination>) -> Result<Vec<CompanyAggregate>, DbErr>;
    async fn find_one(&self, id: Uuid) -> Result<Option<CompanyAggregate>, DbErr>;
    /// Insert the row and its association links in one transaction. Ids are
    /// attached as given; a nonexistent employee id is an FK violation.
    async fn create(&self, row: NewCompany, employee_ids: &[Uuid]) -> Result<CompanyAggregate, DbErr>;
    /// Update mutable columns and reconcile the join table to exactly
    /// `member_ids`, in one transaction. Returns the refetched aggregate.
    async fn save(&self, row: company::Model, member_ids: &[Uuid]) -> Result<CompanyAggregate, DbErr>;
    /// Set `deleted_at`, keeping the row and its association rows.
    async fn soft_remove(&self, row: company::Model) -> Result<CompanyAggregate, DbErr>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCompanyRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_members(&self, rows: Vec<company::Model>) -> Result<Vec<CompanyAggregate>, DbErr> {
        let members = rows
            .load_many_to_many(
                employee::Entity::find().filter(employee::Column::DeletedAt.is_null()),
                company_employee::Entity,
                &self.db,
            )
            .await?;
        Ok(rows
            .into_iter()
            .zip(members)
            .map(|(company, employees)| CompanyAggregate { company, employees })
            .collect())
    }

    async fn refetch(&self, id: Uuid) -> Result<CompanyAggregate, DbErr> {
        self.find_one(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("company {id} missing after write")))
    }
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn find(&self, window: Option<Pagination>) -> Result<Vec<CompanyAggregate>, DbErr> {
        let mut query = company::Entity::find()
            .filter(company::Column::DeletedAt.is_null())
            .order_by_asc(company::Column::CreatedAt);
        if let Some(w) = window {
            query = query.offset(w.offset()).limit(w.limit());
        }
        let rows = query.all(&self.db).await?;
        self.with_members(rows).await
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<CompanyAggregate>, DbErr> {
        let row = company::Entity::find_by_id(id)
            .filter(company::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        match row {
            Some(row) => Ok(self.with_members(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, row: NewCompany, employee_ids: &[Uuid]) -> Result<CompanyAggregate, DbErr> {
        let id = Uuid::new_v4();
        let now = Utc::now().into();

        let txn = self.db.begin().await?;
        company::ActiveModel {
            id: Set(id),
            name: Set(row.name),
            national_registry_of_legal_entity: Set(row.national_registry_of_legal_entity),
            address: Set(row.address),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&txn)
        .await?;

        // Duplicate ids in the input collapse to a single link
        let mut seen = HashSet::new();
        let links: Vec<company_employee::ActiveModel> = employee_ids
            .iter()
            .filter(|e| seen.insert(**e))
            .map(|e| company_employee::ActiveModel { company_id: Set(id), employee_id: Set(*e) })
            .collect();
        if !links.is_empty() {
            company_employee::Entity::insert_many(links).exec(&txn).await?;
        }
        txn.commit().await?;

        self.refetch(id).await
    }

    async fn save(&self, row: company::Model, member_ids: &[Uuid]) -> Result<CompanyAggregate, DbErr> {
        let id = row.id;
        let desired: HashSet<Uuid> = member_ids.iter().copied().collect();

        let txn = self.db.begin().await?;
        let current: HashSet<Uuid> = company_employee::Entity::find()
            .filter(company_employee::Column::CompanyId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|link| link.employee_id)
            .collect();

        let mut am = row.into_active_model();
        am.reset(company::Column::Name);
        am.reset(company::Column::Address);
        am.updated_at = Set(Utc::now().into());
        am.update(&txn).await?;

        let to_drop: Vec<Uuid> = current.difference(&desired).copied().collect();
        if !to_drop.is_empty() {
            company_employee::Entity::delete_many()
                .filter(company_employee::Column::CompanyId.eq(id))
                .filter(company_employee::Column::EmployeeId.is_in(to_drop))
                .exec(&txn)
                .await?;
        }
        let to_add: Vec<company_employee::ActiveModel> = desired
            .difference(&current)
            .map(|e| company_employee::ActiveModel { company_id: Set(id), employee_id: Set(*e) })
            .collect();
        if !to_add.is_empty() {
            company_employee::Entity::insert_many(to_add).exec(&txn).await?;
        }
        txn.commit().await?;

        self.refetch(id).await
    }

    async fn soft_remove(&self, row: company::Model) -> Result<CompanyAggregate, DbErr> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let mut am = row.into_active_model();
        am.deleted_at = Set(Some(now));
        am.updated_at = Set(now);
        let deleted = am.update(&self.db).await?;

        // Association rows survive the soft delete; return them on the result
        self.with_members(vec![deleted])
            .await?
            .pop()
            .ok_or_else(|| DbErr::RecordNotFound("soft-removed company missing".into()))
    }
}
