use serde::{Deserialize, Serialize};

use crate::model::{LoadStatus, ViewMode};
use crate::UserFacingError;

/// One card in the grid for the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCard {
    pub id: u64,
    pub name: String,
    pub avatar: String,
    /// Filled vs outline favorite glyph.
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageControl {
    pub number: usize,
    pub is_current: bool,
}

/// Full field set for the detail view, populated on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
    pub id: u64,
    pub avatar: String,
    pub full_name: String,
    pub age: u32,
    pub region: String,
    pub birthday: String,
    pub email: String,
}

/// Everything a shell needs to paint one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub status: LoadStatus,
    pub mode: ViewMode,
    pub cards: Vec<UserCard>,
    /// Empty when suppressed: Favorites mode, or a single page.
    pub paginator: Vec<PageControl>,
    pub detail: Option<UserDetail>,
    /// The search form is hidden while browsing favorites.
    pub search_visible: bool,
    pub favorites_count: usize,
    pub error: Option<UserFacingError>,
}
