//! Create releases table.

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
                    .table(Releases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Releases::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Releases::GameId).integer().not_null())
                    .col(ColumnDef::new(Releases::Version).string_len(14).not_null())
                    .col(
                        ColumnDef::new(Releases::LoveVersion)
                            .string_len(14)
                            .not_null()
                            .default("0.8.0"),
                    )
                    .col(ColumnDef::new(Releases::Changelog).text())
                    .col(
                        ColumnDef::new(Releases::Uuid)
                            .string_len(24)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Releases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Releases::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_releases_game")
                            .from(Releases::Table, Releases::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_releases_game_version")
                    .table(Releases::Table)
                    .col(Releases::GameId)
                    .col(Releases::Version)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_releases_created_at")
                    .table(Releases::Table)
                    .col(Releases::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Releases::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Releases {
    Table,
    Id,
    GameId,
    Version,
    LoveVersion,
    Changelog,
    Uuid,
    CreatedAt,
    UpdatedAt,
}
