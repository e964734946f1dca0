use serde::{Deserialize, Serialize};

use crate::capabilities::StoreResult;
use crate::model::DirectoryResponse;
use crate::AppError;

/// Everything that can happen to the app, dispatched to the single
/// `update` transition function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Kicks off the one-time directory fetch and favorites load.
    Start,

    // Navigation & browsing
    NavigateHome,
    NavigateFavorites,
    SearchSubmitted { query: String },
    PageSelected { page: usize },
    FavoriteToggled { id: u64 },
    DetailOpened { id: u64 },
    DetailClosed,

    // Capability responses
    DirectoryFetched(Result<DirectoryResponse, AppError>),
    FavoritesLoaded(StoreResult),
    FavoritesWritten(StoreResult),
}
