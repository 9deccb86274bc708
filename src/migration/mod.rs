//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_users;
mod m20240301_000002_create_frameworks;
mod m20240301_000003_create_games;
mod m20240301_000004_create_releases;
mod m20240301_000005_create_assets;
mod m20240301_000006_create_crash_reports;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_users::Migration),
            Box::new(m20240301_000002_create_frameworks::Migration),
            Box::new(m20240301_000003_create_games::Migration),
            Box::new(m20240301_000004_create_releases::Migration),
            Box::new(m20240301_000005_create_assets::Migration),
            Box::new(m20240301_000006_create_crash_reports::Migration),
        ]
    }
}
