use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    LoaderTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use models::{company, company_employee, employee};

use super::EmployeeAggregate;
use crate::pagination::Pagination;

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub social_security_number: String,
    pub email: String,
    pub address: String,
}

/// Persistence gateway for employees; mirror of `CompanyRepository` across
/// the join relation.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find(&self, window: Option<Pagination>) -> Result<Vec<EmployeeAggregate>, DbErr>;
    async fn find_one(&self, id: Uuid) -> Result<Option<EmployeeAggregate>, DbErr>;
    async fn create(&self, row: NewEmployee, company_ids: &[Uuid]) -> Result<EmployeeAggregate, DbErr>;
    async fn save(&self, row: employee::Model, member_ids: &[Uuid]) -> Result<EmployeeAggregate, DbErr>;
    async fn soft_remove(&self, row: employee::Model) -> Result<EmployeeAggregate, DbErr>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmEmployeeRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_members(&self, rows: Vec<employee::Model>) -> Result<Vec<EmployeeAggregate>, DbErr> {
        let members = rows
            .load_many_to_many(
                company::Entity::find().filter(company::Column::DeletedAt.is_null()),
                company_employee::Entity,
                &self.db,
            )
            .await?;
        Ok(rows
            .into_iter()
            .zip(members)
            .map(|(employee, companies)| EmployeeAggregate { employee, companies })
            .collect())
    }

    async fn refetch(&self, id: Uuid) -> Result<EmployeeAggregate, DbErr> {
        self.find_one(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("employee {id} missing after write")))
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn find(&self, window: Option<Pagination>) -> Result<Vec<EmployeeAggregate>, DbErr> {
        let mut query = employee::Entity::find()
            .filter(employee::Column::DeletedAt.is_null())
            .order_by_asc(employee::Column::CreatedAt);
        if let Some(w) = window {
            query = query.offset(w.offset()).limit(w.limit());
        }
        let rows = query.all(&self.db).await?;
        self.with_members(rows).await
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<EmployeeAggregate>, DbErr> {
        let row = employee::Entity::find_by_id(id)
            .filter(employee::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        match row {
            Some(row) => Ok(self.with_members(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, row: NewEmployee, company_ids: &[Uuid]) -> Result<EmployeeAggregate, DbErr> {
        let id = Uuid::new_v4();
        let now = Utc::now().into();

        let txn = self.db.begin().await?;
        employee::ActiveModel {
            id: Set(id),
            name: Set(row.name),
            social_security_number: Set(row.social_security_number),
            email: Set(row.email),
            address: Set(row.address),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&txn)
        .await?;

        let mut seen = HashSet::new();
        let links: Vec<company_employee::ActiveModel> = company_ids
            .iter()
            .filter(|c| seen.insert(**c))
            .map(|c| company_employee::ActiveModel { company_id: Set(*c), employee_id: Set(id) })
            .collect();
        if !links.is_empty() {
            company_employee::Entity::insert_many(links).exec(&txn).await?;
        }
        txn.commit().await?;

        self.refetch(id).await
    }

    async fn save(&self, row: employee::Model, member_ids: &[Uuid]) -> Result<EmployeeAggregate, DbErr> {
        let id = row.id;
        let desired: HashSet<Uuid> = member_ids.iter().copied().collect();

        let txn = self.db.begin().await?;
        let current: HashSet<Uuid> = company_employee::Entity::find()
            .filter(company_employee::Column::EmployeeId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|link| link.company_id)
            .collect();

        let mut am = row.into_active_model();
        am.reset(employee::Column::Name);
        am.reset(employee::Column::Email);
        am.reset(employee::Column::Address);
        am.updated_at = Set(Utc::now().into());
        am.update(&txn).await?;

        let to_drop: Vec<Uuid> = current.difference(&desired).copied().collect();
        if !to_drop.is_empty() {
            company_employee::Entity::delete_many()
                .filter(company_employee::Column::EmployeeId.eq(id))
                .filter(company_employee::Column::CompanyId.is_in(to_drop))
                .exec(&txn)
                .await?;
        }
        let to_add: Vec<company_employee::ActiveModel> = desired
            .difference(&current)
            .map(|c| company_employee::ActiveModel { company_id: Set(*c), employee_id: Set(id) })
            .collect();
        if !to_add.is_empty() {
            company_employee::Entity::insert_many(to_add).exec(&txn).await?;
        }
        txn.commit().await?;

        self.refetch(id).await
    }

    async fn soft_remove(&self, row: employee::Model) -> Result<EmployeeAggregate, DbErr> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let mut am = row.into_active_model();
        am.deleted_at = Set(Some(now));
        am.updated_at = Set(now);
        let deleted = am.update(&self.db).await?;

        self.with_members(vec![deleted])
            .await?
            .pop()
            .ok_or_else(|| DbErr::RecordNotFound("soft-removed employee missing".into()))
    }
}
