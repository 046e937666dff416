//! # omeka-harvest
//!
//! Harvests an Omeka S item set into a CollectionBuilder-ready metadata CSV,
//! mirroring each record's "large" thumbnail into a local objects directory.
//!
//! ## Design Philosophy
//!
//! omeka-harvest is designed to be:
//! - **Total** - loosely-typed property bags never fail a record; missing
//!   data becomes empty cells
//! - **Partial-progress friendly** - remote failures are logged and the run
//!   keeps whatever it has collected
//! - **Deterministic** - rows come out item-first, then per-item media
//!   blocks, in listing order
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//!
//! ## Quick Start
//!
//! ```no_run
//! use omeka_harvest::{Config, Harvester};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads API_BASE_URL, KEY_IDENTITY, KEY_CREDENTIAL, ITEM_SET_ID
//!     let config = Config::from_env()?;
//!
//!     let harvester = Harvester::new(config)?;
//!     let csv_path = harvester.run_to_csv().await?;
//!     println!("export written to {}", csv_path.display());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// CSV export writer
pub mod export;
/// Pure field extraction over property value lists
pub mod extract;
/// Asset retrieval (streamed downloads to disk)
pub mod fetch;
/// Collection walking and run orchestration
pub mod harvester;
/// Record normalization into export rows
pub mod normalize;
/// Raw API records and the normalized export row
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use fetch::AssetFetcher;
pub use harvester::Harvester;
pub use normalize::Normalizer;
pub use types::{DisplayTemplate, FIELD_NAMES, OutputRow, PropertyValue, RawRecord};

/// Helper function to run a complete harvest-and-export in one call.
///
/// Constructs a [`Harvester`] from `config`, walks the collection, and
/// writes the CSV at the configured path, returning that path.
///
/// # Errors
/// As [`Harvester::new`] and [`Harvester::run_to_csv`].
pub async fn harvest_to_csv(config: Config) -> Result<std::path::PathBuf> {
    Harvester::new(config)?.run_to_csv().await
}
