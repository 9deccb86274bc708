//! Database operations for frameworks.
//!
//! Frameworks are reference data: created once, never updated.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::entity::framework::{self, ActiveModel, Entity as Framework};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Insert a new framework.
    pub async fn insert_framework(&self, name: &str) -> AppResult<framework::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to insert framework", e))
    }

    /// Get a framework by ID.
    pub async fn get_framework_by_id(&self, id: i32) -> AppResult<Option<framework::Model>> {
        Framework::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get framework", e))
    }

    /// List all frameworks by name.
    pub async fn list_frameworks(&self) -> AppResult<Vec<framework::Model>> {
        Framework::find()
            .order_by_asc(framework::Column::Name)
            .all(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to list frameworks", e))
    }

    /// Delete a framework. Games built on it cascade.
    pub async fn delete_framework(&self, id: i32) -> AppResult<bool> {
        let result = Framework::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to delete framework", e))?;

        Ok(result.rows_affected > 0)
    }
}
