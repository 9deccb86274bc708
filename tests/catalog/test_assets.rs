//! Asset upload and resolution.

use gamecast_lib::error::AppError;
use gamecast_lib::models::{Platform, UploadedFile};
use gamecast_lib::services::appcast;
use gamecast_lib::services::assets::{add_asset, get_asset, remove_asset};
use gamecast_lib::services::catalog;
use gamecast_lib::services::storage::BlobStore;

use super::test_helpers::*;

#[tokio::test]
async fn test_add_then_get_asset() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;

    add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("mari0.zip", 128),
        "osx",
    )
    .await
    .unwrap();

    let asset = get_asset(&fx.pool, &release, "osx").await.unwrap().unwrap();
    let prefix = format!("{}/{}/", game.uuid, release.version);
    assert!(asset.blob_path.starts_with(&prefix), "{}", asset.blob_path);
    assert_eq!(asset.blob_path, format!("{}mari0.zip", prefix));
    assert_eq!(asset.blob_size, 128);
    assert_eq!(fx.storage.size(&asset.blob_path).await.unwrap(), 128);
}

#[tokio::test]
async fn test_missing_tag_is_none() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;

    assert!(get_asset(&fx.pool, &release, "exe").await.unwrap().is_none());
}

#[tokio::test]
async fn test_upload_keeps_only_file_name() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;

    let asset = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("../../builds/win/Mari0.exe", 16),
        "exe",
    )
    .await
    .unwrap();

    assert_eq!(
        asset.blob_path,
        format!("{}/{}/Mari0.exe", game.uuid, release.version)
    );
}

#[tokio::test]
async fn test_newest_asset_wins_for_duplicate_tag() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;

    let older = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("mari0-old.exe", 10),
        "exe",
    )
    .await
    .unwrap();
    let newer = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("mari0-new.exe", 20),
        "exe",
    )
    .await
    .unwrap();
    assert_ne!(older.id, newer.id);

    let current = get_asset(&fx.pool, &release, "exe").await.unwrap().unwrap();
    assert_eq!(current.id, newer.id);
    assert_eq!(current.blob_size, 20);

    remove_asset(&fx.pool, &fx.storage, &newer).await.unwrap();
    let current = get_asset(&fx.pool, &release, "exe").await.unwrap().unwrap();
    assert_eq!(current.id, older.id);
    assert!(!fx.storage.contains(&newer.blob_path).await);
}

#[tokio::test]
async fn test_reupload_same_file_name_conflicts() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;

    let first = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("mari0.exe", 10),
        "exe",
    )
    .await
    .unwrap();

    let again = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("mari0.exe", 20),
        "exe",
    )
    .await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    // The existing blob is untouched and still matches its row
    assert_eq!(fx.storage.size(&first.blob_path).await.unwrap(), 10);
    let current = get_asset(&fx.pool, &release, "exe").await.unwrap().unwrap();
    assert_eq!(current.id, first.id);
    assert_eq!(current.blob_size, 10);
}

#[tokio::test]
async fn test_removing_newer_build_restores_older_blob() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;

    let older = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("mari0.exe", 10),
        "exe",
    )
    .await
    .unwrap();
    let rejected = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("builds/mari0.exe", 20),
        "exe",
    )
    .await;
    assert!(rejected.is_err());
    let newer = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("mari0-fixed.exe", 20),
        "exe",
    )
    .await
    .unwrap();

    remove_asset(&fx.pool, &fx.storage, &newer).await.unwrap();

    let current = get_asset(&fx.pool, &release, "exe").await.unwrap().unwrap();
    assert_eq!(current.id, older.id);
    assert_eq!(
        fx.storage.size(&current.blob_path).await.unwrap(),
        current.blob_size
    );

    let feed = appcast(&fx.pool, &fx.storage, &game).await.unwrap();
    let file = &feed.items[0].platforms[0].files[0];
    assert_eq!(file.length, 10);
    assert!(file.url.ends_with("/mari0.exe"));
}

#[tokio::test]
async fn test_remove_asset_twice_is_not_found() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;
    let asset = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("mari0.zip", 8),
        "osx",
    )
    .await
    .unwrap();

    remove_asset(&fx.pool, &fx.storage, &asset).await.unwrap();
    let result = remove_asset(&fx.pool, &fx.storage, &asset).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_asset_from_other_game_rejected() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let other = fx.create_game("other").await;
    let release = fx.create_release(&other).await;

    let result = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("mari0.zip", 8),
        "osx",
    )
    .await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
    assert!(fx.storage.is_empty().await);
}

#[tokio::test]
async fn test_failed_insert_removes_blob() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;

    // The release row disappears between lookup and upload.
    fx.pool.delete_release(release.id).await.unwrap();

    let result = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("mari0.zip", 8),
        "osx",
    )
    .await;

    assert!(matches!(result, Err(AppError::ReferentialIntegrity(_))));
    assert!(fx.storage.is_empty().await);
}

#[tokio::test]
async fn test_tag_length_limit() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;

    let result = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        build_file("mari0.zip", 8),
        "a-tag-that-is-far-too-long",
    )
    .await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn test_empty_filename_rejected() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;

    let result = add_asset(
        &fx.pool,
        &fx.storage,
        &game,
        &release,
        UploadedFile::new("builds/", vec![1, 2, 3]),
        "osx",
    )
    .await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn test_resolve_download_uses_latest_release() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;

    assert!(
        catalog::resolve_download(&fx.pool, &fx.storage, &game, Platform::Windows)
            .await
            .unwrap()
            .is_none()
    );

    let first = fx.create_release(&game).await;
    catalog::upload_build(
        &fx.pool,
        &fx.storage,
        &game,
        &first,
        Platform::Windows,
        build_file("mari0.exe", 8),
    )
    .await
    .unwrap();
    let second = fx.create_release(&game).await;
    catalog::upload_build(
        &fx.pool,
        &fx.storage,
        &game,
        &second,
        Platform::Windows,
        build_file("mari0.exe", 9),
    )
    .await
    .unwrap();

    let url = catalog::resolve_download(&fx.pool, &fx.storage, &game, Platform::Windows)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        url,
        format!("http://blobs.test/{}/{}/mari0.exe", game.uuid, second.version)
    );

    // The latest release has no OSX build
    assert!(
        catalog::resolve_download(&fx.pool, &fx.storage, &game, Platform::Osx)
            .await
            .unwrap()
            .is_none()
    );
}
