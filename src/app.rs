use crate::capabilities::{Capabilities, StoreKey, StoreOutput};
use crate::event::Event;
use crate::model::{LoadStatus, Model, ToggleOutcome, UserRecord, ViewMode};
use crate::view::{PageControl, UserCard, UserDetail, ViewModel};
use crate::{directory_index_url, AppError, DirectoryResponse, ErrorKind, UserFacingError};
use crate::DIRECTORY_BASE_URL;

#[derive(Default)]
pub struct App;

impl App {
    fn request_directory(caps: &Capabilities) {
        let url = match directory_index_url(DIRECTORY_BASE_URL) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, "directory endpoint misconfigured");
                return;
            }
        };
        caps.http
            .get(url.as_str())
            .expect_json()
            .send(|result| Event::DirectoryFetched(digest_directory_response(result)));
    }

    fn persist_favorites(model: &Model, caps: &Capabilities) {
        match serde_json::to_vec(&model.favorites) {
            Ok(bytes) => caps
                .store
                .write(StoreKey::favorites(), bytes, Event::FavoritesWritten),
            Err(e) => tracing::error!(error = %e, "favorites serialization failed"),
        }
    }

    /// A missing or unreadable blob means no favorites, not an error.
    fn parse_favorites(value: Option<Vec<u8>>) -> Vec<UserRecord> {
        let Some(bytes) = value else {
            return Vec::new();
        };
        match serde_json::from_slice(&bytes) {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::debug!(error = %e, "stored favorites unreadable, starting empty");
                Vec::new()
            }
        }
    }

    fn build_cards(model: &Model) -> Vec<UserCard> {
        model
            .page_slice()
            .iter()
            .map(|user| UserCard {
                id: user.id,
                name: user.name.clone(),
                avatar: user.avatar.clone(),
                is_favorite: model.is_favorite(user.id),
            })
            .collect()
    }

    fn build_paginator(model: &Model) -> Vec<PageControl> {
        if model.mode == ViewMode::Favorites {
            return Vec::new();
        }
        let pages = model.total_pages();
        if pages <= 1 {
            return Vec::new();
        }
        (1..=pages)
            .map(|number| PageControl {
                number,
                is_current: number == model.current_page,
            })
            .collect()
    }

    fn build_detail(model: &Model) -> Option<UserDetail> {
        let id = model.selected?;
        let user = model.find_user(id)?;
        Some(UserDetail {
            id: user.id,
            avatar: user.avatar.clone(),
            full_name: user.full_name(),
            age: user.age,
            region: user.region.clone(),
            birthday: user.birthday.clone(),
            email: user.email.clone(),
        })
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        match event {
            Event::Start => {
                // The directory is fetched exactly once; there is no retry.
                if model.status != LoadStatus::Idle {
                    tracing::debug!("start ignored, directory load already underway");
                    return;
                }
                model.status = LoadStatus::Loading;
                Self::request_directory(caps);
                caps.store.read(StoreKey::favorites(), Event::FavoritesLoaded);
                caps.render.render();
            }

            Event::DirectoryFetched(Ok(response)) => {
                model.load(response.results);
                tracing::info!(count = model.users.len(), "directory loaded");
                caps.render.render();
            }
            Event::DirectoryFetched(Err(error)) => {
                tracing::error!(error = %error, "directory fetch failed");
                model.status = LoadStatus::Failed;
                model.last_error = Some(error);
                caps.render.render();
            }

            Event::FavoritesLoaded(result) => {
                let favorites = match result {
                    Ok(StoreOutput::Read { value }) => Self::parse_favorites(value),
                    Ok(StoreOutput::Written) => {
                        tracing::warn!("unexpected store output for favorites read");
                        return;
                    }
                    Err(error) => {
                        tracing::debug!(error = %error, "favorites unavailable, starting empty");
                        Vec::new()
                    }
                };
                model.set_favorites(favorites);
                caps.render.render();
            }
            Event::FavoritesWritten(Ok(_)) => {}
            Event::FavoritesWritten(Err(error)) => {
                // Keep the in-memory set; the next toggle rewrites the blob.
                tracing::warn!(error = %error, "favorites write failed");
            }

            Event::NavigateHome => {
                model.set_mode(ViewMode::Home);
                caps.render.render();
            }
            Event::NavigateFavorites => {
                model.set_mode(ViewMode::Favorites);
                caps.render.render();
            }
            Event::SearchSubmitted { query } => {
                // The search form is hidden in Favorites mode.
                if model.mode != ViewMode::Home {
                    tracing::debug!("search ignored outside Home mode");
                    return;
                }
                if model.search(&query) {
                    caps.render.render();
                }
            }
            Event::PageSelected { page } => {
                model.go_to_page(page);
                caps.render.render();
            }
            Event::FavoriteToggled { id } => match model.toggle_favorite(id) {
                ToggleOutcome::Added | ToggleOutcome::Removed => {
                    Self::persist_favorites(model, caps);
                    caps.render.render();
                }
                ToggleOutcome::NotFound => {
                    tracing::debug!(id, "favorite toggle for unknown user ignored");
                }
            },
            Event::DetailOpened { id } => {
                if model.open_detail(id) {
                    caps.render.render();
                } else {
                    tracing::debug!(id, "detail requested for unknown user ignored");
                }
            }
            Event::DetailClosed => {
                model.close_detail();
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        // Shells only see Loading until the fetch resolves either way.
        let status = match model.status {
            LoadStatus::Idle | LoadStatus::Loading => LoadStatus::Loading,
            other => other,
        };
        ViewModel {
            status,
            mode: model.mode,
            cards: Self::build_cards(model),
            paginator: Self::build_paginator(model),
            detail: Self::build_detail(model),
            search_visible: model.mode == ViewMode::Home,
            favorites_count: model.favorites.len(),
            error: model.last_error.as_ref().map(UserFacingError::from),
        }
    }
}

fn digest_directory_response(
    result: crux_http::Result<crux_http::Response<DirectoryResponse>>,
) -> Result<DirectoryResponse, AppError> {
    match result {
        Ok(mut response) => response.take_body().ok_or_else(|| {
            AppError::new(ErrorKind::Deserialization, "directory response had no body")
        }),
        Err(e) => Err(AppError::new(ErrorKind::Network, e.to_string())),
    }
}
