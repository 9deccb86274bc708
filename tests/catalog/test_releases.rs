//! Release creation, version policy and deletion.

use gamecast_lib::error::AppError;
use gamecast_lib::models::{NewRelease, Platform, ReleaseUpdate};
use gamecast_lib::services::catalog;
use gamecast_lib::services::storage::BlobStore;
use gamecast_lib::services::versioning::next_version;

use super::test_helpers::*;

#[tokio::test]
async fn test_first_release_is_0_1_0() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;

    let release = fx.create_release(&game).await;

    assert_eq!(release.version, "0.1.0");
    assert_eq!(release.love_version, "0.8.0");
    assert!(is_hex_id(&release.uuid));
}

#[tokio::test]
async fn test_versions_bump_minor() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;

    let versions: Vec<String> = {
        let mut versions = Vec::new();
        for _ in 0..3 {
            versions.push(fx.create_release(&game).await.version);
        }
        versions
    };

    assert_eq!(versions, vec!["0.1.0", "0.2.0", "0.3.0"]);
}

#[tokio::test]
async fn test_next_version_from_stored_releases() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;

    let releases = fx.pool.get_releases_by_game_id(game.id).await.unwrap();
    assert_eq!(next_version(&releases).unwrap(), "0.1.0");

    fx.create_release_with_version(&game, "0.1.0").await;
    fx.create_release_with_version(&game, "0.2.0").await;

    let releases = fx.pool.get_releases_by_game_id(game.id).await.unwrap();
    assert_eq!(next_version(&releases).unwrap(), "0.3.0");
}

#[tokio::test]
async fn test_patch_carried_over() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    fx.create_release_with_version(&game, "1.4.2").await;

    let release = fx.create_release(&game).await;

    assert_eq!(release.version, "1.5.2");
}

#[tokio::test]
async fn test_malformed_latest_version() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    fx.create_release_with_version(&game, "beta").await;

    let result =
        catalog::create_release(&fx.pool, &fx.notifier, &game, NewRelease::default()).await;

    assert!(matches!(result, Err(AppError::MalformedVersion(v)) if v == "beta"));
}

#[tokio::test]
async fn test_duplicate_version_conflicts() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    fx.create_release_with_version(&game, "1.0.0").await;

    let result = catalog::create_release(
        &fx.pool,
        &fx.notifier,
        &game,
        NewRelease {
            version: Some("1.0.0".to_string()),
            ..Default::default()
        },
    )
    .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_version_with_path_separator_rejected() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;

    let result = catalog::create_release(
        &fx.pool,
        &fx.notifier,
        &game,
        NewRelease {
            version: Some("1.0/../../other-game".to_string()),
            ..Default::default()
        },
    )
    .await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
    assert!(fx.pool.get_releases_by_game_id(game.id).await.unwrap().is_empty());
    assert_eq!(fx.notifier.events().len(), 1);
}

#[tokio::test]
async fn test_create_release_notifies_owner() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;

    fx.create_release(&game).await;

    let events = fx.notifier.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].name, "Create Release");
    assert_eq!(events[1].user_id, fx.owner.id);
    assert_eq!(events[1].properties["game"], "mari0");
    assert_eq!(events[1].properties["distinct_id"], "stabyourself");
}

#[tokio::test]
async fn test_releases_listed_newest_first() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let first = fx.create_release(&game).await;
    let second = fx.create_release(&game).await;

    let releases = fx.pool.get_releases_by_game_id(game.id).await.unwrap();
    let ids: Vec<i32> = releases.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let latest = fx.pool.get_latest_release(game.id).await.unwrap().unwrap();
    assert_eq!(latest.id, second.id);
}

#[tokio::test]
async fn test_update_release_changelog() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;
    assert!(release.changelog.is_none());

    let updated = catalog::update_release(
        &fx.pool,
        &release,
        ReleaseUpdate {
            love_version: Some("0.9.0".to_string()),
            changelog: Some(Some("Portal gun fixes".to_string())),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.version, release.version);
    assert_eq!(updated.uuid, release.uuid);
    assert_eq!(updated.love_version, "0.9.0");
    assert_eq!(updated.changelog.as_deref(), Some("Portal gun fixes"));

    let cleared = catalog::update_release(
        &fx.pool,
        &updated,
        ReleaseUpdate {
            changelog: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(cleared.changelog.is_none());
    assert_eq!(cleared.love_version, "0.9.0");
}

#[tokio::test]
async fn test_delete_release_removes_assets_and_blobs() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;
    let asset = catalog::upload_build(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        Platform::Windows,
        build_file("mari0.exe", 64),
    )
    .await
    .unwrap();
    assert!(fx.storage.contains(&asset.blob_path).await);

    catalog::delete_release(&fx.pool, &fx.storage, &release)
        .await
        .unwrap();

    assert!(fx.pool.get_release_by_id(release.id).await.unwrap().is_none());
    assert!(fx.pool.get_asset_by_id(asset.id).await.unwrap().is_none());
    assert!(!fx.storage.contains(&asset.blob_path).await);
    assert!(matches!(
        fx.storage.size(&asset.blob_path).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_game_cascades() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;
    catalog::upload_build(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        Platform::Osx,
        build_file("mari0.zip", 32),
    )
    .await
    .unwrap();

    catalog::delete_game(&fx.pool, &fx.storage, &game)
        .await
        .unwrap();

    assert!(fx.pool.get_game_by_id(game.id).await.unwrap().is_none());
    assert!(fx.pool.get_release_by_uuid(&release.uuid).await.unwrap().is_none());
    assert!(fx.storage.is_empty().await);

    let again = catalog::delete_game(&fx.pool, &fx.storage, &game).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}
