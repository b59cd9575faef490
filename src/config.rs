//! Runtime configuration for the cart core

use crate::core::error::Error;
use crate::storage::{FileStore, LocalStore, MemoryStore};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable overriding [`CartConfig::guest_cart_key`]
pub const ENV_GUEST_CART_KEY: &str = "CANTEEN_GUEST_CART_KEY";
/// Environment variable overriding [`CartConfig::order_number_prefix`]
pub const ENV_ORDER_PREFIX: &str = "CANTEEN_ORDER_PREFIX";
/// Environment variable overriding [`CartConfig::merge_policy`]
pub const ENV_MERGE_POLICY: &str = "CANTEEN_MERGE_POLICY";
/// Environment variable setting [`CartConfig::storage_dir`]
pub const ENV_STORAGE_DIR: &str = "CANTEEN_STORAGE_DIR";

/// What happens to a guest cart when its owner signs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// The remote pending order replaces the in-memory guest cart
    #[default]
    DiscardGuest,
    /// Guest lines are folded into the remote cart, quantities summed by id
    SumQuantities,
}

impl MergePolicy {
    /// Converts the enum to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MergePolicy::DiscardGuest => "discard_guest",
            MergePolicy::SumQuantities => "sum_quantities",
        }
    }

    /// Converts a string to a MergePolicy enum
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "discard_guest" => Some(MergePolicy::DiscardGuest),
            "sum_quantities" => Some(MergePolicy::SumQuantities),
            _ => None,
        }
    }
}

/// Cart core settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Local storage key holding the guest cart
    pub guest_cart_key: String,
    /// Leading part of generated order numbers
    pub order_number_prefix: String,
    /// Guest cart handling at sign-in
    pub merge_policy: MergePolicy,
    /// Directory for the file-backed local store; in-memory when unset
    pub storage_dir: Option<PathBuf>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            guest_cart_key: "cart".to_string(),
            order_number_prefix: "ORD".to_string(),
            merge_policy: MergePolicy::default(),
            storage_dir: None,
        }
    }
}

impl CartConfig {
    /// Defaults overridden by any `CANTEEN_*` variables that are set
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Reads a JSON config file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("Invalid config {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(key) = lookup(ENV_GUEST_CART_KEY) {
            self.guest_cart_key = key;
        }
        if let Some(prefix) = lookup(ENV_ORDER_PREFIX) {
            self.order_number_prefix = prefix;
        }
        if let Some(policy) = lookup(ENV_MERGE_POLICY) {
            self.merge_policy = MergePolicy::from_str(&policy).ok_or_else(|| {
                Error::Config(format!("Invalid {} value: {}", ENV_MERGE_POLICY, policy))
            })?;
        }
        if let Some(dir) = lookup(ENV_STORAGE_DIR) {
            log::info!("{} set, using file storage at {}", ENV_STORAGE_DIR, dir);
            self.storage_dir = Some(PathBuf::from(dir));
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.guest_cart_key.trim().is_empty() {
            return Err(Error::Config("guest_cart_key must not be empty".into()));
        }
        if self.order_number_prefix.trim().is_empty() {
            return Err(Error::Config("order_number_prefix must not be empty".into()));
        }
        Ok(())
    }

    /// Opens the local store this config points at
    pub fn open_local_store(&self) -> Result<Arc<dyn LocalStore>> {
        match &self.storage_dir {
            Some(dir) => Ok(Arc::new(FileStore::open(dir)?)),
            None => Ok(Arc::new(MemoryStore::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::default().with_overrides(lookup(&[])).unwrap();
        assert_eq!(config.guest_cart_key, "cart");
        assert_eq!(config.order_number_prefix, "ORD");
        assert_eq!(config.merge_policy, MergePolicy::DiscardGuest);
        assert_eq!(config.storage_dir, None);
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::default()
            .with_overrides(lookup(&[
                (ENV_GUEST_CART_KEY, "canteen_cart"),
                (ENV_MERGE_POLICY, "sum_quantities"),
                (ENV_STORAGE_DIR, "/tmp/canteen"),
            ]))
            .unwrap();
        assert_eq!(config.guest_cart_key, "canteen_cart");
        assert_eq!(config.merge_policy, MergePolicy::SumQuantities);
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/canteen")));

        let bad = CartConfig::default().with_overrides(lookup(&[(ENV_MERGE_POLICY, "merge")]));
        assert!(matches!(bad, Err(Error::Config(_))));

        let empty = CartConfig::default().with_overrides(lookup(&[(ENV_ORDER_PREFIX, " ")]));
        assert!(matches!(empty, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canteen.json");
        std::fs::write(&path, r#"{"merge_policy":"sum_quantities"}"#).unwrap();

        let config = CartConfig::from_file(&path).unwrap();
        assert_eq!(config.merge_policy, MergePolicy::SumQuantities);
        assert_eq!(config.guest_cart_key, "cart");

        std::fs::write(&path, "merge_policy = 1").unwrap();
        assert!(matches!(CartConfig::from_file(&path), Err(Error::Config(_))));
        assert!(matches!(
            CartConfig::from_file(dir.path().join("missing.json")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_open_local_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = CartConfig {
            storage_dir: Some(dir.path().join("local")),
            ..CartConfig::default()
        };
        let store = config.open_local_store().unwrap();
        store.set("cart", "[]").unwrap();
        assert!(dir.path().join("local").join("cart.json").exists());
    }
}
