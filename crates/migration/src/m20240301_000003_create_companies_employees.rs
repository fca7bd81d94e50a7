//! Create the `companies_employees` join table.
//!
//! Composite primary key keeps membership a set; FKs cascade so a hard
//! delete of either side (never issued by the API) cleans up its links.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompaniesEmployees::Table)
                    .if_not_exists()
                    .col(uuid(CompaniesEmployees::CompanyId).not_null())
                    .col(uuid(CompaniesEmployees::EmployeeId).not_null())
                    .primary_key(
                        Index::create()
                            .col(CompaniesEmployees::CompanyId)
                            .col(CompaniesEmployees::EmployeeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companies_employees_company")
                            .from(CompaniesEmployees::Table, CompaniesEmployees::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companies_employees_employee")
                            .from(CompaniesEmployees::Table, CompaniesEmployees::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CompaniesEmployees::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CompaniesEmployees { Table, CompanyId, EmployeeId }

#[derive(DeriveIden)]
enum Companies { Table, Id }

#[derive(DeriveIden)]
enum Employees { Table, Id }
