//! Create `subscription` table.
//!
//! Dates carry month-year granularity; rows are stored normalized to the
//! first day of the month. `end_date` is nullable: NULL means still active.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscription::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscription::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(Subscription::ServiceName).not_null())
                    .col(integer(Subscription::Price).not_null())
                    .col(uuid(Subscription::UserId).not_null())
                    .col(date(Subscription::StartDate).not_null())
                    // Explicitly define nullable end_date to avoid conflicting NULL/NOT NULL
                    .col(ColumnDef::new(Subscription::EndDate).date().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscription::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Subscription { Table, Id, ServiceName, Price, UserId, StartDate, EndDate }
