//! Game creation, lookup, update and deletion.

use gamecast_lib::error::AppError;
use gamecast_lib::models::{GameUpdate, NewGame};
use gamecast_lib::services::catalog;

use super::test_helpers::*;

#[tokio::test]
async fn test_create_game_assigns_identifier() {
    let fx = Fixture::new().await;

    let game = fx.create_game("mari0").await;

    assert!(is_hex_id(&game.uuid), "{} is not a hex id", game.uuid);
    assert_eq!(game.owner_id, fx.owner.id);
    assert_eq!(game.framework_id, fx.framework.id);
    assert!(!game.is_public);
}

#[tokio::test]
async fn test_identifier_stable_across_reloads() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;

    let by_id = fx.pool.get_game_by_id(game.id).await.unwrap().unwrap();
    let by_uuid = fx.pool.get_game_by_uuid(&game.uuid).await.unwrap().unwrap();

    assert_eq!(by_id.uuid, game.uuid);
    assert_eq!(by_uuid.id, game.id);
}

#[tokio::test]
async fn test_identifiers_differ_between_games() {
    let fx = Fixture::new().await;

    let first = fx.create_game("first").await;
    let second = fx.create_game("second").await;

    assert_ne!(first.uuid, second.uuid);
}

#[tokio::test]
async fn test_create_game_notifies() {
    let fx = Fixture::new().await;

    fx.create_game("mari0").await;

    let events = fx.notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Create Game");
    assert_eq!(events[0].user_id, fx.owner.id);
    assert_eq!(events[0].properties["game"], "mari0");
    assert_eq!(events[0].properties["distinct_id"], "stabyourself");
}

#[tokio::test]
async fn test_duplicate_slug_per_owner_conflicts() {
    let fx = Fixture::new().await;
    fx.create_game("mari0").await;

    let result = catalog::create_game(
        &fx.pool,
        &fx.notifier,
        &fx.owner,
        NewGame::new("Mari0 again", "mari0", fx.framework.id),
    )
    .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(fx.notifier.events().len(), 1);
}

#[tokio::test]
async fn test_same_slug_for_different_owners() {
    let fx = Fixture::new().await;
    fx.create_game("mari0").await;
    let other = fx.pool.insert_user("someone-else").await.unwrap();

    let game = catalog::create_game(
        &fx.pool,
        &fx.notifier,
        &other,
        NewGame::new("Mari0", "mari0", fx.framework.id),
    )
    .await
    .unwrap();

    assert_eq!(game.owner_id, other.id);
}

#[tokio::test]
async fn test_invalid_slug_rejected() {
    let fx = Fixture::new().await;

    let result = catalog::create_game(
        &fx.pool,
        &fx.notifier,
        &fx.owner,
        NewGame::new("Mari0", "mari 0!", fx.framework.id),
    )
    .await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
    assert!(fx.notifier.events().is_empty());
}

#[tokio::test]
async fn test_unknown_framework_violates_integrity() {
    let fx = Fixture::new().await;

    let result = catalog::create_game(
        &fx.pool,
        &fx.notifier,
        &fx.owner,
        NewGame::new("Mari0", "mari0", fx.framework.id + 100),
    )
    .await;

    assert!(matches!(result, Err(AppError::ReferentialIntegrity(_))));
}

#[tokio::test]
async fn test_preset_identifier() {
    let fx = Fixture::new().await;
    let preset = "00112233445566778899aabb";

    let new_game = NewGame {
        uuid: Some(preset.to_string()),
        ..NewGame::new("Imported", "imported", fx.framework.id)
    };
    let game = catalog::create_game(&fx.pool, &fx.notifier, &fx.owner, new_game)
        .await
        .unwrap();
    assert_eq!(game.uuid, preset);

    let clash = NewGame {
        uuid: Some(preset.to_string()),
        ..NewGame::new("Imported 2", "imported-2", fx.framework.id)
    };
    let result = catalog::create_game(&fx.pool, &fx.notifier, &fx.owner, clash).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_update_game_keeps_identity() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;

    let updated = catalog::update_game(
        &fx.pool,
        &game,
        GameUpdate {
            name: Some("Mari0: Special Edition".to_string()),
            is_public: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.uuid, game.uuid);
    assert_eq!(updated.slug, "mari0");
    assert_eq!(updated.name, "Mari0: Special Edition");
    assert!(updated.is_public);
    assert!(updated.updated_at >= game.updated_at);
    assert_eq!(updated.created_at, game.created_at);
}

#[tokio::test]
async fn test_list_public_games() {
    let fx = Fixture::new().await;
    let hidden = fx.create_game("hidden").await;
    let shown = fx.create_game("shown").await;
    catalog::update_game(
        &fx.pool,
        &shown,
        GameUpdate {
            is_public: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let public = fx.pool.list_public_games().await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, shown.id);

    let owned = fx.pool.list_games_by_owner(fx.owner.id).await.unwrap();
    assert_eq!(owned.len(), 2);
    assert!(owned.iter().any(|g| g.id == hidden.id));
}

#[tokio::test]
async fn test_get_game_by_slug() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;

    let found = fx
        .pool
        .get_game_by_slug(fx.owner.id, "mari0")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.uuid, game.uuid);

    assert!(
        fx.pool
            .get_game_by_slug(fx.owner.id, "missing")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_download_links_for_stored_game() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;

    let links = catalog::download_links(PUBLIC_URL, &game);

    let labels: Vec<&str> = links.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["Windows", "OSX"]);
    for link in &links {
        assert!(!link.url.is_empty());
        assert!(link.url.contains(&game.uuid));
    }
}

#[tokio::test]
async fn test_delete_user_cascades_to_games() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;
    let release = fx.create_release(&game).await;

    assert!(fx.pool.delete_user(fx.owner.id).await.unwrap());

    assert!(fx.pool.get_game_by_id(game.id).await.unwrap().is_none());
    assert!(fx.pool.get_release_by_id(release.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_framework_cascades_to_games() {
    let fx = Fixture::new().await;
    let game = fx.create_game("mari0").await;

    assert!(fx.pool.delete_framework(fx.framework.id).await.unwrap());

    assert!(fx.pool.get_game_by_id(game.id).await.unwrap().is_none());
}
