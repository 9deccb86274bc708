//! Release assets: uploaded builds attached to a release under a tag.
//!
//! Blobs are stored under `{game_uuid}/{version}/{filename}`, and each key
//! belongs to exactly one asset row. A release may hold several assets with
//! the same tag; the most recently created one is the current asset for that
//! tag.

use tracing::{debug, info, warn};

use crate::db::DbPool;
use crate::entity::{asset, game, release};
use crate::error::{AppError, AppResult};
use crate::models::{UploadedFile, check_length, check_required, limits};

use super::storage::{BlobStore, content_type_for_extension};

/// Storage key for a release build.
///
/// Only the last path component of `filename` is used.
pub fn asset_key(game_uuid: &str, version: &str, filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    format!("{}/{}/{}", game_uuid, version, name)
}

/// Rewrite an `https://` URL to plain `http://`.
///
/// Older auto-update clients cannot speak TLS, so feed and download URLs are
/// served over http.
pub fn insecure_download_url(url: &str) -> String {
    match url.strip_prefix("https://") {
        Some(rest) => format!("http://{}", rest),
        None => url.to_string(),
    }
}

/// Upload a build and attach it to a release under `tag`.
///
/// A file name already uploaded for the release is a conflict; the existing
/// blob is never overwritten. The blob is written first; when the row cannot
/// be inserted the blob is removed again before the error is returned.
pub async fn add_asset(
    db: &DbPool,
    storage: &dyn BlobStore,
    game: &game::Model,
    release: &release::Model,
    upload: UploadedFile,
    tag: &str,
) -> AppResult<asset::Model> {
    if release.game_id != game.id {
        return Err(AppError::InvalidInput(format!(
            "Release {} does not belong to game {}",
            release.uuid, game.uuid
        )));
    }
    check_required("tag", tag)?;
    check_length("tag", tag, limits::TAG)?;
    check_required("filename", upload.basename())?;

    let key = asset_key(&game.uuid, &release.version, upload.basename());
    check_length("blob path", &key, limits::BLOB_PATH)?;

    if db.get_asset_by_blob_path(&key).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "'{}' is already uploaded for version {}",
            upload.basename(),
            release.version
        )));
    }

    let content_type = upload.content_type.clone().unwrap_or_else(|| {
        upload
            .extension()
            .map(|ext| content_type_for_extension(&ext))
            .unwrap_or("application/octet-stream")
            .to_string()
    });

    let stored = storage.put(&key, upload.data, Some(&content_type)).await?;

    match db.insert_asset(release.id, &stored.key, stored.size, tag).await {
        Ok(asset) => {
            info!(
                game = %game.uuid,
                version = %release.version,
                tag,
                size = stored.size,
                "Asset added"
            );
            Ok(asset)
        }
        // A concurrent upload of the same file name now owns the key.
        Err(err) if err.is_conflict() => Err(err),
        Err(err) => {
            if let Err(cleanup_err) = storage.delete(&stored.key).await {
                warn!(key = %stored.key, error = %cleanup_err, "Failed to remove orphaned blob");
            }
            Err(err)
        }
    }
}

/// Current asset of a release for a tag, if any.
pub async fn get_asset(
    db: &DbPool,
    release: &release::Model,
    tag: &str,
) -> AppResult<Option<asset::Model>> {
    let asset = db.find_asset_by_tag(release.id, tag).await?;
    debug!(release = %release.uuid, tag, found = asset.is_some(), "Asset lookup");
    Ok(asset)
}

/// Public URL of an asset, scheme forced to http.
pub fn asset_download_url(storage: &dyn BlobStore, asset: &asset::Model) -> String {
    insecure_download_url(&storage.public_url(&asset.blob_path))
}

/// Delete an asset's row and then its blob.
///
/// The blob is kept if another row references the same key.
pub async fn remove_asset(
    db: &DbPool,
    storage: &dyn BlobStore,
    asset: &asset::Model,
) -> AppResult<()> {
    if !db.delete_asset(asset.id).await? {
        return Err(AppError::NotFound(format!("Asset {}", asset.id)));
    }

    match db.get_asset_by_blob_path(&asset.blob_path).await? {
        Some(other) => {
            warn!(key = %asset.blob_path, asset = other.id, "Blob still referenced, keeping it");
        }
        None => storage.delete(&asset.blob_path).await?,
    }
    Ok(())
}

/// Delete the blobs behind `assets`, logging failures instead of returning them.
///
/// Callers pass assets whose rows are about to be deleted. Blob paths are
/// unique per row, so no surviving asset shares these keys.
pub async fn remove_blobs(storage: &dyn BlobStore, assets: &[asset::Model]) {
    for asset in assets {
        if let Err(e) = storage.delete(&asset.blob_path).await {
            warn!(key = %asset.blob_path, error = %e, "Failed to delete blob");
        }
    }
}
