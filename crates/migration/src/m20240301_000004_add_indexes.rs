use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // Natural keys are unique among active rows only; a soft-deleted row
        // frees the value for reuse. The schema builder has no partial-index
        // support, so these go through raw SQL.
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS uniq_companies_registry_active \
             ON companies (national_registry_of_legal_entity) WHERE deleted_at IS NULL",
        )
        .await?;
        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS uniq_employees_ssn_active \
             ON employees (social_security_number) WHERE deleted_at IS NULL",
        )
        .await?;

        // Join table: the composite PK covers company_id lookups; the
        // employee side needs its own index.
        manager
            .create_index(
                Index::create()
                    .name("idx_companies_employees_employee")
                    .table(CompaniesEmployees::Table)
                    .col(CompaniesEmployees::EmployeeId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Listing orders by insertion time
        manager
            .create_index(
                Index::create()
                    .name("idx_companies_created_at")
                    .table(Companies::Table)
                    .col(Companies::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_employees_created_at")
                    .table(Employees::Table)
                    .col(Employees::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared("DROP INDEX IF EXISTS uniq_companies_registry_active").await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS uniq_employees_ssn_active").await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_companies_employees_employee")
                    .table(CompaniesEmployees::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_companies_created_at").table(Companies::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employees_created_at").table(Employees::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Companies { Table, CreatedAt }

#[derive(DeriveIden)]
enum Employees { Table, CreatedAt }

#[derive(DeriveIden)]
enum CompaniesEmployees { Table, EmployeeId }
