//! Create crash_reports table.

use sea_orm_migration::prelude::*;

use super::m20240301_000003_create_games::Games;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CrashReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CrashReports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CrashReports::GameId).integer().not_null())
                    .col(ColumnDef::new(CrashReports::Traceback).text().not_null())
                    .col(
                        ColumnDef::new(CrashReports::DistinctId)
                            .string_len(24)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CrashReports::Version)
                            .string_len(14)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CrashReports::Os)
                            .string_len(14)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CrashReports::Uuid)
                            .string_len(24)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(CrashReports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CrashReports::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_crash_reports_game")
                            .from(CrashReports::Table, CrashReports::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_crash_reports_game_id")
                    .table(CrashReports::Table)
                    .col(CrashReports::GameId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CrashReports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CrashReports {
    Table,
    Id,
    GameId,
    Traceback,
    DistinctId,
    Version,
    Os,
    Uuid,
    CreatedAt,
    UpdatedAt,
}
