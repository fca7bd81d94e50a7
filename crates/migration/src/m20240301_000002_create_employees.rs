//! Create `employees` table.
//!
//! Mirrors `companies` soft-delete semantics; SSN uniqueness is a partial
//! index added by the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(uuid(Employees::Id).primary_key())
                    .col(string_len(Employees::Name, 255).not_null())
                    .col(string_len(Employees::SocialSecurityNumber, 11).not_null())
                    .col(string_len(Employees::Email, 254).not_null())
                    .col(text(Employees::Address).not_null())
                    .col(timestamp_with_time_zone(Employees::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Employees::UpdatedAt).not_null())
                    .col(
                        ColumnDef::new(Employees::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employees::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employees { Table, Id, Name, SocialSecurityNumber, Email, Address, CreatedAt, UpdatedAt, DeletedAt }
