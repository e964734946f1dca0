use crux_core::testing::AppTester;
use shared::capabilities::{StoreError, StoreKey, StoreOperation, StoreOutput};
use shared::{App, DirectoryResponse, Effect, Event, Model, UserRecord, PAGE_SIZE};

fn user(id: u64, name: &str) -> UserRecord {
    UserRecord {
        id,
        name: name.to_string(),
        surname: "Okafor".to_string(),
        avatar: format!("https://avatars.example.com/{id}.png"),
        age: 35,
        region: "NG".to_string(),
        birthday: "1990-11-23".to_string(),
        email: format!("user{id}@example.com"),
    }
}

fn directory(count: u64) -> DirectoryResponse {
    DirectoryResponse {
        results: (1..=count).map(|id| user(id, &format!("User{id}"))).collect(),
    }
}

fn loaded_app(count: u64) -> (AppTester<App, Effect>, Model) {
    let app = AppTester::<App, _>::default();
    let mut model = Model::default();
    app.update(Event::Start, &mut model);
    app.update(Event::DirectoryFetched(Ok(directory(count))), &mut model);
    (app, model)
}

/// Pulls the favorites blob out of a store write effect.
fn written_favorites(effects: &[Effect]) -> Option<(StoreKey, Vec<UserRecord>)> {
    effects.iter().find_map(|e| match e {
        Effect::Store(req) => match &req.operation {
            StoreOperation::Write { key, value } => {
                let parsed = serde_json::from_slice(value).expect("favorites blob is JSON");
                Some((key.clone(), parsed))
            }
            StoreOperation::Read { .. } => None,
        },
        _ => None,
    })
}

#[test]
fn favorites_load_from_the_store_at_startup() {
    let (app, mut model) = loaded_app(10);

    let blob = serde_json::to_vec(&vec![user(7, "User7"), user(7, "User7"), user(8, "User8")])
        .unwrap();
    let update = app.update(
        Event::FavoritesLoaded(Ok(StoreOutput::Read { value: Some(blob) })),
        &mut model,
    );
    assert!(update.effects.iter().any(|e| matches!(e, Effect::Render(_))));
    // Duplicate ids in the blob collapse on load.
    assert_eq!(model.favorites.len(), 2);
    assert!(model.is_favorite(7));
    assert!(model.is_favorite(8));
}

#[test]
fn an_absent_or_malformed_blob_means_no_favorites() {
    let (app, mut model) = loaded_app(3);

    app.update(
        Event::FavoritesLoaded(Ok(StoreOutput::Read { value: None })),
        &mut model,
    );
    assert!(model.favorites.is_empty());

    app.update(
        Event::FavoritesLoaded(Ok(StoreOutput::Read {
            value: Some(b"{{{ not json".to_vec()),
        })),
        &mut model,
    );
    assert!(model.favorites.is_empty());

    app.update(
        Event::FavoritesLoaded(Err(StoreError::Storage {
            message: "quota exceeded".to_string(),
        })),
        &mut model,
    );
    assert!(model.favorites.is_empty());
}

#[test]
fn toggling_a_favorite_writes_the_blob_through() {
    let (app, mut model) = loaded_app(5);

    let update = app.update(Event::FavoriteToggled { id: 3 }, &mut model);
    assert!(model.is_favorite(3));
    let (key, stored) = written_favorites(&update.effects).expect("a write-through");
    assert_eq!(key.as_str(), "favorite_users");
    assert_eq!(stored, model.favorites);
    assert!(update.effects.iter().any(|e| matches!(e, Effect::Render(_))));

    // Toggling again removes the user and persists the empty list.
    let update = app.update(Event::FavoriteToggled { id: 3 }, &mut model);
    assert!(model.favorites.is_empty());
    let (_, stored) = written_favorites(&update.effects).expect("a write-through");
    assert!(stored.is_empty());
}

#[test]
fn toggling_an_unknown_id_writes_nothing() {
    let (app, mut model) = loaded_app(3);
    let update = app.update(Event::FavoriteToggled { id: 44 }, &mut model);
    assert!(update.effects.is_empty());
    assert!(model.favorites.is_empty());
}

#[test]
fn favorites_mode_shows_saved_users_without_a_paginator() {
    let (app, mut model) = loaded_app(30);
    for id in 1..=15 {
        app.update(Event::FavoriteToggled { id }, &mut model);
    }

    app.update(Event::NavigateFavorites, &mut model);
    let view = app.view(&model);
    assert_eq!(view.cards.len(), PAGE_SIZE);
    assert!(view.cards.iter().all(|c| c.is_favorite));
    assert!(view.paginator.is_empty());
    assert!(!view.search_visible);
    assert_eq!(view.favorites_count, 15);
}

#[test]
fn removal_in_favorites_mode_shrinks_the_grid() {
    let (app, mut model) = loaded_app(5);
    app.update(Event::FavoriteToggled { id: 1 }, &mut model);
    app.update(Event::FavoriteToggled { id: 2 }, &mut model);
    app.update(Event::NavigateFavorites, &mut model);
    assert_eq!(app.view(&model).cards.len(), 2);

    app.update(Event::FavoriteToggled { id: 1 }, &mut model);
    let view = app.view(&model);
    assert_eq!(view.cards.len(), 1);
    assert_eq!(view.cards[0].id, 2);
}

#[test]
fn a_write_failure_keeps_the_in_memory_state() {
    let (app, mut model) = loaded_app(5);
    app.update(Event::FavoriteToggled { id: 2 }, &mut model);

    let update = app.update(
        Event::FavoritesWritten(Err(StoreError::Storage {
            message: "disk full".to_string(),
        })),
        &mut model,
    );
    assert!(update.effects.is_empty());
    assert!(model.is_favorite(2));
}

#[test]
fn a_favorite_from_storage_stays_usable_when_the_fetch_failed() {
    let app = AppTester::<App, _>::default();
    let mut model = Model::default();
    app.update(Event::Start, &mut model);

    let blob = serde_json::to_vec(&vec![user(7, "Keiko")]).unwrap();
    app.update(
        Event::FavoritesLoaded(Ok(StoreOutput::Read { value: Some(blob) })),
        &mut model,
    );
    app.update(Event::NavigateFavorites, &mut model);
    app.update(Event::DetailOpened { id: 7 }, &mut model);

    let view = app.view(&model);
    assert_eq!(view.cards.len(), 1);
    let detail = view.detail.expect("favorite resolves without the directory");
    assert_eq!(detail.full_name, "Keiko Okafor");
}
