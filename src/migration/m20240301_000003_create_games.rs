//! Create games table.
//!
//! A user cannot own two games with the same slug.

use sea_orm_migration::prelude::*;

use super::m20240301_000001_create_users::Users;
use super::m20240301_000002_create_frameworks::Frameworks;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::OwnerId).integer().not_null())
                    .col(ColumnDef::new(Games::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Games::Slug).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Games::Uuid)
                            .string_len(24)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Games::FrameworkId).integer().not_null())
                    .col(
                        ColumnDef::new(Games::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_owner")
                            .from(Games::Table, Games::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_framework")
                            .from(Games::Table, Games::FrameworkId)
                            .to(Frameworks::Table, Frameworks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_owner_slug")
                    .table(Games::Table)
                    .col(Games::OwnerId)
                    .col(Games::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_framework_id")
                    .table(Games::Table)
                    .col(Games::FrameworkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Games {
    Table,
    Id,
    OwnerId,
    Name,
    Slug,
    Uuid,
    FrameworkId,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}
