use serde::{Deserialize, Serialize};

use crate::{AppError, PAGE_SIZE};

/// A single directory entry, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub surname: String,
    pub avatar: String,
    pub age: u32,
    pub region: String,
    pub birthday: String,
    pub email: String,
}

impl UserRecord {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Wire shape of the directory index endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryResponse {
    pub results: Vec<UserRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Home,
    Favorites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    NotFound,
}

/// Central directory state. Mutated only through the operations below;
/// the view is a pure function of this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    /// Full directory, fetched once at startup.
    pub users: Vec<UserRecord>,
    /// Insertion-ordered favorites, unique by id, persisted write-through.
    pub favorites: Vec<UserRecord>,
    /// Transient name-filtered subset; cleared on navigation.
    pub search_results: Vec<UserRecord>,
    pub mode: ViewMode,
    /// 1-based. Out-of-range values resolve to an empty page, never a fault.
    pub current_page: usize,
    /// User shown in the detail view, if any.
    pub selected: Option<u64>,
    pub status: LoadStatus,
    pub last_error: Option<AppError>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            favorites: Vec::new(),
            search_results: Vec::new(),
            mode: ViewMode::Home,
            current_page: 1,
            selected: None,
            status: LoadStatus::Idle,
            last_error: None,
        }
    }
}

impl Model {
    /// Initializes the directory from the fetch result.
    pub fn load(&mut self, users: Vec<UserRecord>) {
        self.users = users;
        self.status = LoadStatus::Ready;
        self.last_error = None;
    }

    /// Replaces the favorites list, dropping duplicate ids while keeping
    /// insertion order.
    pub fn set_favorites(&mut self, favorites: Vec<UserRecord>) {
        self.favorites.clear();
        for user in favorites {
            if !self.is_favorite(user.id) {
                self.favorites.push(user);
            }
        }
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.search_results.clear();
        self.current_page = 1;
    }

    /// Filters the directory by case-insensitive name substring. An empty
    /// query (after trimming) is a no-op that leaves prior results intact.
    /// Returns whether a search was performed.
    pub fn search(&mut self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.search_results = self
            .users
            .iter()
            .filter(|user| user.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        self.current_page = 1;
        true
    }

    /// Jumps to a page without bounds checking; an out-of-range page
    /// renders empty.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Removes the user from favorites if present, otherwise adds the
    /// matching directory record. Unknown ids are a no-op.
    pub fn toggle_favorite(&mut self, id: u64) -> ToggleOutcome {
        if let Some(index) = self.favorites.iter().position(|user| user.id == id) {
            self.favorites.remove(index);
            return ToggleOutcome::Removed;
        }
        match self.users.iter().find(|user| user.id == id) {
            Some(user) => {
                self.favorites.push(user.clone());
                ToggleOutcome::Added
            }
            None => ToggleOutcome::NotFound,
        }
    }

    #[must_use]
    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.iter().any(|user| user.id == id)
    }

    /// Looks up a record in the directory, falling back to favorites so a
    /// persisted favorite stays resolvable when the directory never loaded.
    #[must_use]
    pub fn find_user(&self, id: u64) -> Option<&UserRecord> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .or_else(|| self.favorites.iter().find(|user| user.id == id))
    }

    /// Opens the detail view for a known user. Returns false (and changes
    /// nothing) when the id does not resolve.
    pub fn open_detail(&mut self, id: u64) -> bool {
        if self.find_user(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// The list pagination currently draws from: favorites in Favorites
    /// mode, otherwise search results when non-empty, otherwise the full
    /// directory.
    #[must_use]
    pub fn active_list(&self) -> &[UserRecord] {
        match self.mode {
            ViewMode::Favorites => &self.favorites,
            ViewMode::Home if !self.search_results.is_empty() => &self.search_results,
            ViewMode::Home => &self.users,
        }
    }

    /// The slice of the active list for the current page, clipped to the
    /// available length. Empty for any page that does not reach the list.
    #[must_use]
    pub fn page_slice(&self) -> &[UserRecord] {
        let list = self.active_list();
        let start = match self
            .current_page
            .checked_sub(1)
            .and_then(|page| page.checked_mul(PAGE_SIZE))
        {
            Some(start) if start < list.len() => start,
            _ => return &[],
        };
        let end = (start + PAGE_SIZE).min(list.len());
        &list[start..end]
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.active_list().len().div_ceil(PAGE_SIZE)
    }
}
