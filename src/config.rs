//! Configuration types for omeka-harvest

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for a harvest run
///
/// All remote-access fields are required; output locations and the page size
/// carry CollectionBuilder-friendly defaults. Construct directly, or from the
/// environment with [`Config::from_env`]. The struct is passed explicitly into
/// the harvester — no core logic reads the environment on its own.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Omeka S REST API, e.g. `https://example.org/api/`
    ///
    /// Relative resources (`items`, `media`) are joined onto this, so it
    /// should end with a trailing slash unless the API lives at the host root.
    pub api_base_url: String,

    /// API key identity, attached to every authenticated request
    pub key_identity: String,

    /// API key credential, attached to every authenticated request
    pub key_credential: String,

    /// Numeric identifier of the item set (collection) to harvest
    pub item_set_id: String,

    /// Items requested per listing page (default: 100)
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Destination of the metadata CSV (default: "_data/metadata.csv")
    ///
    /// Overwritten on every run.
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,

    /// Directory downloaded assets are stored under (default: "objects")
    ///
    /// Also the prefix recorded in each row's location fields, so the default
    /// keeps exports relative to the site root the way CollectionBuilder
    /// expects.
    #[serde(default = "default_objects_dir")]
    pub objects_dir: String,
}

impl Config {
    /// Build a configuration from the recognized environment variables:
    /// `API_BASE_URL`, `KEY_IDENTITY`, `KEY_CREDENTIAL`, `ITEM_SET_ID`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the first missing variable. Output
    /// locations and page size take their defaults.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_base_url: require_env("API_BASE_URL")?,
            key_identity: require_env("KEY_IDENTITY")?,
            key_credential: require_env("KEY_CREDENTIAL")?,
            item_set_id: require_env("ITEM_SET_ID")?,
            per_page: default_per_page(),
            csv_path: default_csv_path(),
            objects_dir: default_objects_dir(),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| Error::missing_env(key))
}

fn default_per_page() -> u32 {
    100
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("_data/metadata.csv")
}

fn default_objects_dir() -> String {
    "objects".to_string()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "API_BASE_URL",
        "KEY_IDENTITY",
        "KEY_CREDENTIAL",
        "ITEM_SET_ID",
    ];

    fn clear_vars() {
        for var in VARS {
            // SAFETY: env mutation is process-global; the #[serial] attribute
            // keeps these tests from racing each other.
            unsafe { std::env::remove_var(var) };
        }
    }

    fn set_all_vars() {
        for (var, value) in VARS.iter().zip([
            "https://example.org/api/",
            "identity",
            "credential",
            "7",
        ]) {
            // SAFETY: see clear_vars
            unsafe { std::env::set_var(var, value) };
        }
    }

    #[test]
    #[serial]
    fn from_env_reads_all_required_variables() {
        set_all_vars();

        let config = Config::from_env().unwrap();

        assert_eq!(config.api_base_url, "https://example.org/api/");
        assert_eq!(config.key_identity, "identity");
        assert_eq!(config.key_credential, "credential");
        assert_eq!(config.item_set_id, "7");
        clear_vars();
    }

    #[test]
    #[serial]
    fn from_env_fails_fast_on_missing_variable() {
        set_all_vars();
        // SAFETY: see clear_vars
        unsafe { std::env::remove_var("KEY_CREDENTIAL") };

        let err = Config::from_env().unwrap_err();
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("KEY_CREDENTIAL")),
            other => panic!("expected Config error, got {other:?}"),
        }
        clear_vars();
    }

    #[test]
    #[serial]
    fn from_env_applies_output_defaults() {
        set_all_vars();

        let config = Config::from_env().unwrap();

        assert_eq!(config.per_page, 100);
        assert_eq!(config.csv_path, PathBuf::from("_data/metadata.csv"));
        assert_eq!(config.objects_dir, "objects");
        clear_vars();
    }

    #[test]
    fn deserializes_with_defaulted_fields() {
        let config: Config = serde_json::from_str(
            r#"{
                "api_base_url": "https://example.org/api/",
                "key_identity": "id",
                "key_credential": "cred",
                "item_set_id": "3"
            }"#,
        )
        .unwrap();

        assert_eq!(config.per_page, 100);
        assert_eq!(config.objects_dir, "objects");
    }
}
