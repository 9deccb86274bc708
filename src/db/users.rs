//! Database operations for users.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::entity::user::{self, ActiveModel, Entity as User};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Insert a new user.
    pub async fn insert_user(&self, username: &str) -> AppResult<user::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            username: Set(username.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to insert user", e))
    }

    /// Get a user by ID.
    pub async fn get_user_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get user", e))
    }

    /// Get a user by username.
    pub async fn get_user_by_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get user", e))
    }

    /// Delete a user. Their games, releases, assets and crash reports cascade.
    pub async fn delete_user(&self, id: i32) -> AppResult<bool> {
        let result = User::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to delete user", e))?;

        Ok(result.rows_affected > 0)
    }
}
