#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod capabilities;
pub mod event;
pub mod model;
pub mod view;

use serde::{Deserialize, Serialize};
use url::Url;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use event::Event;
pub use model::{DirectoryResponse, LoadStatus, Model, UserRecord, ViewMode};
pub use view::ViewModel;

/// Number of user cards shown per page.
pub const PAGE_SIZE: usize = 12;

pub const DIRECTORY_BASE_URL: &str = "https://lighthouse-user-api.herokuapp.com/";
pub const DIRECTORY_INDEX_PATH: &str = "api/v1/users/";

/// Storage key holding the serialized favorites list.
pub const FAVORITES_STORE_KEY: &str = "favorite_users";

/// Resolves the directory index endpoint against a base URL.
pub fn directory_index_url(base: &str) -> Result<Url, AppError> {
    let base = Url::parse(base)
        .map_err(|e| AppError::new(ErrorKind::Network, format!("invalid base URL: {e}")))?;
    base.join(DIRECTORY_INDEX_PATH)
        .map_err(|e| AppError::new(ErrorKind::Network, format!("invalid index path: {e}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Deserialization,
    Storage,
    NotFound,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Deserialization => "DESERIALIZATION_ERROR",
            Self::Storage => "STORAGE_ERROR",
            Self::NotFound => "NOT_FOUND",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Network => {
                "Unable to load the user directory. Please check your connection.".into()
            }
            ErrorKind::Deserialization => {
                "The directory service returned data we could not read.".into()
            }
            ErrorKind::Storage => "Unable to save your favorites on this device.".into(),
            ErrorKind::NotFound => "The requested user could not be found.".into(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)
    }
}

impl std::error::Error for AppError {}

/// Error surface handed to shells via the [`ViewModel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFacingError {
    pub message: String,
    pub error_code: String,
}

impl From<&AppError> for UserFacingError {
    fn from(e: &AppError) -> Self {
        Self {
            message: e.user_facing_message(),
            error_code: e.code().to_string(),
        }
    }
}
