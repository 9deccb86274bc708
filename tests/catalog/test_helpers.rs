//! Shared test helpers for catalog tests.

use std::sync::{Arc, Mutex};

use gamecast_lib::db::DbPool;
use gamecast_lib::entity::{framework, game, release, user};
use gamecast_lib::models::{NewGame, NewRelease, UploadedFile};
use gamecast_lib::services::analytics::{AnalyticsEvent, EventNotifier};
use gamecast_lib::services::catalog;
use gamecast_lib::services::storage::MemoryBlobStore;

/// Base URL of the in-memory blob store.
pub const BLOB_BASE_URL: &str = "https://blobs.test";

/// Public site URL used for download links.
pub const PUBLIC_URL: &str = "https://games.test";

/// Create a fresh in-memory database with the schema applied.
///
/// A single connection keeps every query on the same SQLite database.
pub async fn create_test_pool() -> DbPool {
    let pool = DbPool::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

pub fn create_test_storage() -> MemoryBlobStore {
    MemoryBlobStore::new(BLOB_BASE_URL)
}

/// Notifier that keeps every event for inspection.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventNotifier for RecordingNotifier {
    fn notify(&self, event: AnalyticsEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Everything a catalog test needs.
pub struct Fixture {
    pub pool: DbPool,
    pub storage: MemoryBlobStore,
    pub notifier: RecordingNotifier,
    pub owner: user::Model,
    pub framework: framework::Model,
}

impl Fixture {
    pub async fn new() -> Self {
        let pool = create_test_pool().await;
        let owner = pool.insert_user("stabyourself").await.unwrap();
        let framework = pool.insert_framework("LÖVE").await.unwrap();

        Self {
            pool,
            storage: create_test_storage(),
            notifier: RecordingNotifier::default(),
            owner,
            framework,
        }
    }

    pub async fn create_game(&self, slug: &str) -> game::Model {
        let new_game = NewGame::new(slug.to_uppercase(), slug, self.framework.id);
        catalog::create_game(&self.pool, &self.notifier, &self.owner, new_game)
            .await
            .unwrap()
    }

    pub async fn create_release(&self, game: &game::Model) -> release::Model {
        catalog::create_release(&self.pool, &self.notifier, game, NewRelease::default())
            .await
            .unwrap()
    }

    pub async fn create_release_with_version(
        &self,
        game: &game::Model,
        version: &str,
    ) -> release::Model {
        let new_release = NewRelease {
            version: Some(version.to_string()),
            ..Default::default()
        };
        catalog::create_release(&self.pool, &self.notifier, game, new_release)
            .await
            .unwrap()
    }
}

/// A small fake build.
pub fn build_file(filename: &str, size: usize) -> UploadedFile {
    UploadedFile::new(filename, vec![0x4c; size])
}

/// Whether a string is a 24 character lowercase hex identifier.
pub fn is_hex_id(value: &str) -> bool {
    value.len() == 24
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
