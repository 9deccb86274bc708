//! Catalog operations: the entry points request handlers call.
//!
//! Each operation validates its input, writes through [`DbPool`], and emits
//! analytics events after the write has committed.

use tracing::info;

use crate::db::DbPool;
use crate::entity::{asset, crash_report, game, release, user};
use crate::error::{AppError, AppResult};
use crate::models::{
    DownloadLink, GameUpdate, NewCrashReport, NewGame, NewRelease, Platform, ReleaseUpdate,
    UploadedFile,
};

use super::analytics::{AnalyticsEvent, CREATE_GAME, CREATE_RELEASE, EventNotifier};
use super::assets::{add_asset, asset_download_url, get_asset, remove_blobs};
use super::storage::BlobStore;
use super::versioning::next_version;

/// Register a game for `owner`.
pub async fn create_game(
    db: &DbPool,
    notifier: &dyn EventNotifier,
    owner: &user::Model,
    new_game: NewGame,
) -> AppResult<game::Model> {
    new_game.validate()?;

    let game = db.insert_game(owner.id, &new_game).await?;
    info!(game = %game.uuid, slug = %game.slug, owner = %owner.username, "Game created");

    notifier.notify(AnalyticsEvent::for_game(
        CREATE_GAME,
        owner.id,
        &owner.username,
        &game.slug,
    ));

    Ok(game)
}

/// Update a game's name, framework or visibility.
pub async fn update_game(
    db: &DbPool,
    game: &game::Model,
    changes: GameUpdate,
) -> AppResult<game::Model> {
    changes.validate()?;
    db.update_game(game.id, &changes).await
}

/// Publish a release of `game`.
///
/// Without an explicit version the next minor version after the game's most
/// recent release is used.
pub async fn create_release(
    db: &DbPool,
    notifier: &dyn EventNotifier,
    game: &game::Model,
    new_release: NewRelease,
) -> AppResult<release::Model> {
    new_release.validate()?;

    let owner = db
        .get_user_by_id(game.owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Owner of game {}", game.uuid)))?;

    let version = match new_release.version {
        Some(ref version) => version.clone(),
        None => next_version(&db.get_releases_by_game_id(game.id).await?)?,
    };

    let release = db
        .insert_release(
            game.id,
            &version,
            new_release.love_version(),
            new_release.changelog.as_deref(),
            new_release.uuid.as_deref(),
        )
        .await?;
    info!(
        game = %game.uuid,
        release = %release.uuid,
        version = %release.version,
        "Release created"
    );

    notifier.notify(AnalyticsEvent::for_game(
        CREATE_RELEASE,
        owner.id,
        &owner.username,
        &game.slug,
    ));

    Ok(release)
}

/// Update a release's runtime version or changelog.
pub async fn update_release(
    db: &DbPool,
    release: &release::Model,
    changes: ReleaseUpdate,
) -> AppResult<release::Model> {
    changes.validate()?;
    db.update_release(release.id, &changes).await
}

/// Attach a platform build to a release.
pub async fn upload_build(
    db: &DbPool,
    storage: &dyn BlobStore,
    game: &game::Model,
    release: &release::Model,
    platform: Platform,
    upload: UploadedFile,
) -> AppResult<asset::Model> {
    add_asset(db, storage, game, release, upload, platform.tag()).await
}

/// Store a crash report sent by a game client.
pub async fn record_crash_report(
    db: &DbPool,
    game: &game::Model,
    report: NewCrashReport,
) -> AppResult<crash_report::Model> {
    report.validate()?;

    let report = db.insert_crash_report(game.id, &report).await?;
    info!(game = %game.uuid, report = %report.uuid, os = %report.os, "Crash report recorded");

    Ok(report)
}

/// Per-platform download links for a game, Windows first.
pub fn download_links(public_url: &str, game: &game::Model) -> Vec<DownloadLink> {
    let base = public_url.trim_end_matches('/');
    Platform::ALL
        .iter()
        .map(|platform| DownloadLink {
            label: platform.label().to_string(),
            url: format!("{}/download/{}/{}", base, game.uuid, platform.slug()),
        })
        .collect()
}

/// URL of the latest release's build for a platform.
///
/// `None` when the game has no releases or the latest release has no build
/// for the platform.
pub async fn resolve_download(
    db: &DbPool,
    storage: &dyn BlobStore,
    game: &game::Model,
    platform: Platform,
) -> AppResult<Option<String>> {
    let Some(release) = db.get_latest_release(game.id).await? else {
        return Ok(None);
    };

    let asset = get_asset(db, &release, platform.tag()).await?;
    Ok(asset.map(|asset| asset_download_url(storage, &asset)))
}

/// Delete a release, its assets and their blobs.
///
/// Blob deletion is best effort; the row is deleted regardless.
pub async fn delete_release(
    db: &DbPool,
    storage: &dyn BlobStore,
    release: &release::Model,
) -> AppResult<()> {
    let assets = db.get_assets_by_release_id(release.id).await?;
    remove_blobs(storage, &assets).await;

    if !db.delete_release(release.id).await? {
        return Err(AppError::NotFound(format!("Release {}", release.uuid)));
    }
    info!(release = %release.uuid, assets = assets.len(), "Release deleted");
    Ok(())
}

/// Delete a game with all releases, assets, crash reports and blobs.
pub async fn delete_game(
    db: &DbPool,
    storage: &dyn BlobStore,
    game: &game::Model,
) -> AppResult<()> {
    let assets = db.get_assets_by_game_id(game.id).await?;
    remove_blobs(storage, &assets).await;

    if !db.delete_game(game.id).await? {
        return Err(AppError::NotFound(format!("Game {}", game.uuid)));
    }
    info!(game = %game.uuid, assets = assets.len(), "Game deleted");
    Ok(())
}
