//! Database queries for crash reports.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entity::crash_report::{self, ActiveModel, Entity as CrashReport};
use crate::error::{AppError, AppResult};
use crate::models::NewCrashReport;
use crate::services::identifier::{assign_unique, generate_id};

use super::DbPool;

impl DbPool {
    /// Insert a new crash report, assigning its public identifier.
    pub async fn insert_crash_report(
        &self,
        game_id: i32,
        report: &NewCrashReport,
    ) -> AppResult<crash_report::Model> {
        let conn = self.connection();
        let now = Utc::now();

        assign_unique(
            generate_id,
            |uuid| {
                let model = ActiveModel {
                    game_id: Set(game_id),
                    traceback: Set(report.traceback.clone()),
                    distinct_id: Set(report.distinct_id.clone()),
                    version: Set(report.version.clone()),
                    os: Set(report.os.clone()),
                    uuid: Set(uuid),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                async move {
                    model
                        .insert(conn)
                        .await
                        .map_err(|e| AppError::from_db("Failed to insert crash report", e))
                }
            },
            |uuid| self.crash_report_uuid_taken(uuid),
        )
        .await
    }

    /// Check whether a public identifier is already used by a crash report.
    pub async fn crash_report_uuid_taken(&self, uuid: String) -> AppResult<bool> {
        let count = CrashReport::find()
            .filter(crash_report::Column::Uuid.eq(uuid))
            .count(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to check crash report identifier", e))?;

        Ok(count > 0)
    }

    /// Get a crash report by its public identifier.
    pub async fn get_crash_report_by_uuid(
        &self,
        uuid: &str,
    ) -> AppResult<Option<crash_report::Model>> {
        CrashReport::find()
            .filter(crash_report::Column::Uuid.eq(uuid))
            .one(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to get crash report", e))
    }

    /// List crash reports for a game, newest first, with a total count.
    pub async fn list_crash_reports(
        &self,
        game_id: i32,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<crash_report::Model>, u64)> {
        let select = CrashReport::find().filter(crash_report::Column::GameId.eq(game_id));

        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to count crash reports", e))?;

        let reports = select
            .order_by_desc(crash_report::Column::CreatedAt)
            .order_by_desc(crash_report::Column::Id)
            .offset(offset)
            .limit(limit.clamp(1, 100))
            .all(self.connection())
            .await
            .map_err(|e| AppError::from_db("Failed to list crash reports", e))?;

        Ok((reports, total))
    }
}
