//! Create `companies` table.
//!
//! Soft-deleted rows keep their data; `deleted_at` is the marker. The
//! registry-number uniqueness is a partial index added by the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(uuid(Companies::Id).primary_key())
                    .col(string_len(Companies::Name, 255).not_null())
                    .col(string_len(Companies::NationalRegistryOfLegalEntity, 14).not_null())
                    .col(text(Companies::Address).not_null())
                    .col(timestamp_with_time_zone(Companies::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Companies::UpdatedAt).not_null())
                    // Explicitly define nullable deleted_at to avoid conflicting NULL/NOT NULL
                    .col(
                        ColumnDef::new(Companies::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Companies::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Companies { Table, Id, Name, NationalRegistryOfLegalEntity, Address, CreatedAt, UpdatedAt, DeletedAt }
