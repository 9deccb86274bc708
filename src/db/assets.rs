//! Database queries for release assets.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::asset::{self, ActiveModel, Entity as Asset};
use crate::entity::release;
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Insert a new asset row for an already stored blob.
    pub async fn insert_asset(
        &self,
        release_id: i32,
        blob_path: &str,
        blob_size: i64,
        tag: &str,
    ) -> AppResult<asset::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            release_id: Set(release_id),
            blob_path: Set(blob_path.to_string()),
            blob_size: Set(blob_size),
            tag: Set(tag.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to insert asset", e))
    }

    /// Get an asset by ID.
    pub async fn get_asset_by_id(&self, id: i32) -> AppResult<Option<asset::Model>> {
        Asset::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get asset", e))
    }

    /// Get the asset stored under a blob path.
    pub async fn get_asset_by_blob_path(
        &self,
        blob_path: &str,
    ) -> AppResult<Option<asset::Model>> {
        Asset::find()
            .filter(asset::Column::BlobPath.eq(blob_path))
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get asset by blob path", e))
    }

    /// Get all assets of a release, newest first.
    pub async fn get_assets_by_release_id(&self, release_id: i32) -> AppResult<Vec<asset::Model>> {
        Asset::find()
            .filter(asset::Column::ReleaseId.eq(release_id))
            .order_by_desc(asset::Column::CreatedAt)
            .order_by_desc(asset::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get assets for release", e))
    }

    /// Get the current asset for a tag: the most recently created match.
    pub async fn find_asset_by_tag(
        &self,
        release_id: i32,
        tag: &str,
    ) -> AppResult<Option<asset::Model>> {
        Asset::find()
            .filter(asset::Column::ReleaseId.eq(release_id))
            .filter(asset::Column::Tag.eq(tag))
            .order_by_desc(asset::Column::CreatedAt)
            .order_by_desc(asset::Column::Id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get asset by tag", e))
    }

    /// Get every asset belonging to any release of a game.
    pub async fn get_assets_by_game_id(&self, game_id: i32) -> AppResult<Vec<asset::Model>> {
        Asset::find()
            .inner_join(release::Entity)
            .filter(release::Column::GameId.eq(game_id))
            .all(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get assets for game", e))
    }

    /// Delete an asset row.
    pub async fn delete_asset(&self, id: i32) -> AppResult<bool> {
        let result = Asset::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to delete asset", e))?;

        Ok(result.rows_affected > 0)
    }
}
