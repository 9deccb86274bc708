//! Database queries for games.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entity::game::{self, ActiveModel, Entity as Game};
use crate::error::{AppError, AppResult};
use crate::models::{GameUpdate, NewGame};
use crate::services::identifier::assign_identifier;

use super::DbPool;

impl DbPool {
    /// Insert a new game, assigning its public identifier.
    pub async fn insert_game(&self, owner_id: i32, new_game: &NewGame) -> AppResult<game::Model> {
        let conn = self.connection();
        let now = Utc::now();

        assign_identifier(
            new_game.uuid.as_deref(),
            |uuid| {
                let model = ActiveModel {
                    owner_id: Set(owner_id),
                    name: Set(new_game.name.clone()),
                    slug: Set(new_game.slug.clone()),
                    uuid: Set(uuid),
                    framework_id: Set(new_game.framework_id),
                    is_public: Set(new_game.is_public),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                async move {
                    model
                        .insert(conn)
                        .await
                        .map_err(|e| AppError::from_db("Failed to insert game", e))
                }
            },
            |uuid| self.game_uuid_taken(uuid),
        )
        .await
    }

    /// Check whether a public identifier is already used by a game.
    pub async fn game_uuid_taken(&self, uuid: String) -> AppResult<bool> {
        let count = Game::find()
            .filter(game::Column::Uuid.eq(uuid))
            .count(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to check game identifier", e))?;

        Ok(count > 0)
    }

    /// Get a game by ID.
    pub async fn get_game_by_id(&self, id: i32) -> AppResult<Option<game::Model>> {
        Game::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get game", e))
    }

    /// Get a game by its public identifier.
    pub async fn get_game_by_uuid(&self, uuid: &str) -> AppResult<Option<game::Model>> {
        Game::find()
            .filter(game::Column::Uuid.eq(uuid))
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get game", e))
    }

    /// Get a game by owner and slug.
    pub async fn get_game_by_slug(
        &self,
        owner_id: i32,
        slug: &str,
    ) -> AppResult<Option<game::Model>> {
        Game::find()
            .filter(game::Column::OwnerId.eq(owner_id))
            .filter(game::Column::Slug.eq(slug))
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get game", e))
    }

    /// List a user's games, newest first.
    pub async fn list_games_by_owner(&self, owner_id: i32) -> AppResult<Vec<game::Model>> {
        Game::find()
            .filter(game::Column::OwnerId.eq(owner_id))
            .order_by_desc(game::Column::CreatedAt)
            .order_by_desc(game::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to list games", e))
    }

    /// List public games, newest first.
    pub async fn list_public_games(&self) -> AppResult<Vec<game::Model>> {
        Game::find()
            .filter(game::Column::IsPublic.eq(true))
            .order_by_desc(game::Column::CreatedAt)
            .order_by_desc(game::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to list public games", e))
    }

    /// Update the mutable fields of a game. Identity and ownership never change.
    pub async fn update_game(&self, id: i32, changes: &GameUpdate) -> AppResult<game::Model> {
        let game = self
            .get_game_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Game {}", id)))?;

        let mut active: ActiveModel = game.into();
        if let Some(ref name) = changes.name {
            active.name = Set(name.clone());
        }
        if let Some(framework_id) = changes.framework_id {
            active.framework_id = Set(framework_id);
        }
        if let Some(is_public) = changes.is_public {
            active.is_public = Set(is_public);
        }
        active.updated_at = Set(Utc::now());

        active
            .update(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to update game", e))
    }

    /// Delete a game row. Releases, assets and crash reports cascade.
    pub async fn delete_game(&self, id: i32) -> AppResult<bool> {
        let result = Game::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to delete game", e))?;

        Ok(result.rows_affected > 0)
    }
}
