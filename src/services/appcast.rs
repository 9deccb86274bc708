//! Appcast feed synthesis.

use tracing::debug;

use crate::db::DbPool;
use crate::entity::{asset, game, release};
use crate::error::AppResult;
use crate::models::{FeedDocument, FeedFile, PlatformEntry, ReleaseFeedItem};

use super::assets::{asset_download_url, get_asset};
use super::storage::BlobStore;

/// Asset tags that appear in the feed, with their platform name and arch.
/// Entries are emitted in this order.
pub const FEED_PLATFORMS: [(&str, &str, &str); 2] =
    [("osx", "macosx", "universal"), ("exe", "windows", "i386")];

/// Build the update feed for a game, newest release first.
pub async fn appcast(
    db: &DbPool,
    storage: &dyn BlobStore,
    game: &game::Model,
) -> AppResult<FeedDocument> {
    let releases = db.get_releases_by_game_id(game.id).await?;
    let mut items = Vec::with_capacity(releases.len());

    for release in &releases {
        let mut assets = Vec::with_capacity(FEED_PLATFORMS.len());
        for (tag, _, _) in FEED_PLATFORMS {
            if let Some(asset) = get_asset(db, release, tag).await? {
                assets.push(asset);
            }
        }
        items.push(feed_item(storage, game, release, &assets));
    }

    debug!(game = %game.uuid, items = items.len(), "Built appcast");

    Ok(FeedDocument {
        title: game.name.clone(),
        description: None,
        items,
    })
}

/// Fold one release and its current assets into a feed item.
///
/// Assets whose tag is not a feed platform are ignored.
pub fn feed_item(
    storage: &dyn BlobStore,
    game: &game::Model,
    release: &release::Model,
    assets: &[asset::Model],
) -> ReleaseFeedItem {
    let platforms = FEED_PLATFORMS
        .iter()
        .filter_map(|(tag, name, arch)| {
            let asset = assets.iter().find(|a| a.tag == *tag)?;
            Some(PlatformEntry {
                name: name.to_string(),
                arch: arch.to_string(),
                files: vec![FeedFile {
                    url: asset_download_url(storage, asset),
                    length: asset.blob_size,
                }],
            })
        })
        .collect();

    ReleaseFeedItem {
        title: format!("{} | Version {}", game.name, release.version),
        version: release.version.clone(),
        changelog: release.changelog.clone(),
        published: Some(release.created_at.to_rfc2822()),
        platforms,
    }
}
