//! Database queries for releases.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entity::release::{self, ActiveModel, Entity as Release};
use crate::error::{AppError, AppResult};
use crate::models::ReleaseUpdate;
use crate::services::identifier::assign_identifier;

use super::DbPool;

impl DbPool {
    /// Insert a new release, assigning its public identifier.
    ///
    /// `version` is stored as given; callers pick it (usually via the version policy).
    /// A preset `uuid` is inserted as-is.
    pub async fn insert_release(
        &self,
        game_id: i32,
        version: &str,
        love_version: &str,
        changelog: Option<&str>,
        uuid: Option<&str>,
    ) -> AppResult<release::Model> {
        let conn = self.connection();
        let now = Utc::now();

        assign_identifier(
            uuid,
            |uuid| {
                let model = ActiveModel {
                    game_id: Set(game_id),
                    version: Set(version.to_string()),
                    love_version: Set(love_version.to_string()),
                    changelog: Set(changelog.map(str::to_string)),
                    uuid: Set(uuid),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                async move {
                    model
                        .insert(conn)
                        .await
                        .map_err(|e| AppError::from_db("Failed to insert release", e))
                }
            },
            |uuid| self.release_uuid_taken(uuid),
        )
        .await
    }

    /// Check whether a public identifier is already used by a release.
    pub async fn release_uuid_taken(&self, uuid: String) -> AppResult<bool> {
        let count = Release::find()
            .filter(release::Column::Uuid.eq(uuid))
            .count(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to check release identifier", e))?;

        Ok(count > 0)
    }

    /// Get a release by ID.
    pub async fn get_release_by_id(&self, id: i32) -> AppResult<Option<release::Model>> {
        Release::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get release", e))
    }

    /// Get a release by its public identifier.
    pub async fn get_release_by_uuid(&self, uuid: &str) -> AppResult<Option<release::Model>> {
        Release::find()
            .filter(release::Column::Uuid.eq(uuid))
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get release", e))
    }

    /// Get all releases for a game, newest first.
    ///
    /// Rows created in the same instant keep insertion order (higher id first).
    pub async fn get_releases_by_game_id(&self, game_id: i32) -> AppResult<Vec<release::Model>> {
        Release::find()
            .filter(release::Column::GameId.eq(game_id))
            .order_by_desc(release::Column::CreatedAt)
            .order_by_desc(release::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get releases for game", e))
    }

    /// Get the most recently created release of a game.
    pub async fn get_latest_release(&self, game_id: i32) -> AppResult<Option<release::Model>> {
        Release::find()
            .filter(release::Column::GameId.eq(game_id))
            .order_by_desc(release::Column::CreatedAt)
            .order_by_desc(release::Column::Id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get latest release", e))
    }

    /// Update release metadata. Version, game and identifier never change.
    pub async fn update_release(
        &self,
        id: i32,
        changes: &ReleaseUpdate,
    ) -> AppResult<release::Model> {
        let release = self
            .get_release_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Release {}", id)))?;

        let mut active: ActiveModel = release.into();
        if let Some(ref love_version) = changes.love_version {
            active.love_version = Set(love_version.clone());
        }
        if let Some(ref changelog) = changes.changelog {
            active.changelog = Set(changelog.clone());
        }
        active.updated_at = Set(Utc::now());

        active
            .update(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to update release", e))
    }

    /// Delete a release row. Its assets cascade.
    pub async fn delete_release(&self, id: i32) -> AppResult<bool> {
        let result = Release::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to delete release", e))?;

        Ok(result.rows_affected > 0)
    }
}
