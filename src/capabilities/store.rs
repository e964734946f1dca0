use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_KEY_LENGTH: usize = 128;
pub const MAX_VALUE_SIZE: usize = 1024 * 1024;

/// Validated storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreKey(String);

impl StoreKey {
    pub fn new(key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(StoreError::InvalidKey {
                key,
                reason: "key cannot be empty".to_string(),
            });
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(StoreError::InvalidKey {
                key: key.chars().take(32).collect(),
                reason: format!("key exceeds maximum length of {MAX_KEY_LENGTH} bytes"),
            });
        }
        if key.chars().any(char::is_control) {
            return Err(StoreError::InvalidKey {
                key: key.escape_default().to_string(),
                reason: "key contains control characters".to_string(),
            });
        }
        Ok(Self(key))
    }

    /// Key holding the serialized favorites list.
    #[must_use]
    pub fn favorites() -> Self {
        Self(crate::FAVORITES_STORE_KEY.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreOperation {
    Read {
        key: StoreKey,
    },
    Write {
        key: StoreKey,
        #[serde(with = "serde_bytes")]
        value: Vec<u8>,
    },
}

impl Operation for StoreOperation {
    type Output = StoreResult;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreOutput {
    /// Value read from storage; `None` when the key is absent.
    Read {
        #[serde(with = "serde_bytes")]
        value: Option<Vec<u8>>,
    },
    Written,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("value too large: {size} bytes exceeds maximum of {max} bytes")]
    ValueTooLarge { size: usize, max: usize },

    #[error("storage error: {message}")]
    Storage { message: String },
}

pub type StoreResult = Result<StoreOutput, StoreError>;

/// Durable key/value capability. Shells back it with whatever the platform
/// offers (localStorage on the web, a file elsewhere).
pub struct Store<Ev> {
    context: CapabilityContext<StoreOperation, Ev>,
}

impl<Ev> Capability<Ev> for Store<Ev> {
    type Operation = StoreOperation;
    type MappedSelf<MappedEv> = Store<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        Store::new(self.context.map_event(f))
    }
}

impl<Ev> Store<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<StoreOperation, Ev>) -> Self {
        Self { context }
    }

    /// Reads the value stored under `key`.
    pub fn read<F>(&self, key: StoreKey, make_event: F)
    where
        F: Fn(StoreResult) -> Ev + Send + Sync + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let response = context
                .request_from_shell(StoreOperation::Read { key })
                .await;
            context.update_app(make_event(response));
        });
    }

    /// Overwrites the value stored under `key` in full.
    pub fn write<F>(&self, key: StoreKey, value: Vec<u8>, make_event: F)
    where
        F: Fn(StoreResult) -> Ev + Send + Sync + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let response = if value.len() > MAX_VALUE_SIZE {
                Err(StoreError::ValueTooLarge {
                    size: value.len(),
                    max: MAX_VALUE_SIZE,
                })
            } else {
                context
                    .request_from_shell(StoreOperation::Write { key, value })
                    .await
            };
            context.update_app(make_event(response));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_rejects_empty_and_whitespace() {
        assert!(StoreKey::new("").is_err());
        assert!(StoreKey::new("   ").is_err());
    }

    #[test]
    fn key_rejects_control_characters() {
        assert!(StoreKey::new("key\0value").is_err());
        assert!(StoreKey::new("key\nvalue").is_err());
    }

    #[test]
    fn key_rejects_over_length() {
        let long = "k".repeat(MAX_KEY_LENGTH + 1);
        assert!(StoreKey::new(long).is_err());
    }

    #[test]
    fn key_accepts_valid() {
        let key = StoreKey::new("favorite_users").unwrap();
        assert_eq!(key.as_str(), "favorite_users");
    }

    #[test]
    fn favorites_key_matches_the_storage_boundary() {
        assert_eq!(StoreKey::favorites().as_str(), crate::FAVORITES_STORE_KEY);
        assert!(StoreKey::new(crate::FAVORITES_STORE_KEY).is_ok());
    }

    #[test]
    fn operations_round_trip_through_serde() {
        let op = StoreOperation::Write {
            key: StoreKey::favorites(),
            value: vec![1, 2, 3],
        };
        let bytes = serde_json::to_vec(&op).unwrap();
        let back: StoreOperation = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(op, back);
    }
}
