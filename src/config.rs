use std::sync::{Arc, PoisonError, RwLock};

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid connector configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Read-mostly configuration shared by concurrent login attempts.
///
/// Readers clone the inner `Arc`; writers swap it whole, so a reader never
/// observes a half-applied configuration. Writes are operator-driven and
/// rare, so a plain `RwLock` is enough.
pub struct ConfigSlot<T> {
    inner: RwLock<Arc<T>>,
}

impl<T> ConfigSlot<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(Arc::new(value)),
        }
    }

    pub fn current(&self) -> Arc<T> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T: DeserializeOwned> ConfigSlot<T> {
    /// Parses `raw` as JSON and replaces the active configuration. On a
    /// parse error the previous configuration stays in effect.
    pub fn replace_from_slice(&self, raw: &[u8]) -> Result<(), ConfigError> {
        let next: T = serde_json::from_slice(raw)?;
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(next);
        Ok(())
    }
}

impl<T: Default> Default for ConfigSlot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        key: String,
    }

    #[test]
    fn replace_swaps_the_active_value() {
        let slot = ConfigSlot::<Sample>::default();
        slot.replace_from_slice(br#"{"key":"first"}"#)
            .expect("valid payload");
        assert_eq!(slot.current().key, "first");

        slot.replace_from_slice(br#"{"key":"second"}"#)
            .expect("valid payload");
        assert_eq!(slot.current().key, "second");
    }

    #[test]
    fn malformed_payload_keeps_previous_value() {
        let slot = ConfigSlot::<Sample>::default();
        slot.replace_from_slice(br#"{"key":"kept"}"#)
            .expect("valid payload");

        let err = slot
            .replace_from_slice(b"{not json")
            .expect_err("malformed payload should fail");
        assert!(matches!(err, ConfigError::Malformed(_)));
        assert_eq!(slot.current().key, "kept");
    }
}
