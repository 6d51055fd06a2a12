//! Layered store configuration
//!
//! Sources, highest priority first:
//! 1. Environment variables (`BORROWBOT_*`, `__` between sections)
//! 2. `borrowbot.toml` in the working directory, if present
//! 3. Built-in defaults
//!
//! `BORROWBOT_STORE__PATH` maps to `store.path`, and so on.

use std::path::PathBuf;

use ::config::{Config, ConfigBuilder, Environment, File};
use borrowbot_core::errors::{ExError, ExErrorKind};
use serde::Deserialize;

use crate::descriptor::{StoreDescriptor, DEFAULT_BUSY_TIMEOUT_MS};
use crate::errors::{config_error, Result};

/// The `[store]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file
    #[serde(default)]
    pub path: Option<PathBuf>,
    pub busy_timeout_ms: u64,
    pub read_only: bool,
}

impl StoreConfig {
    /// Load from `.env`, `borrowbot.toml` and the environment
    ///
    /// # Errors
    ///
    /// `Configuration` if a source is malformed.
    pub fn load() -> Result<Self> {
        // A missing .env is normal outside development
        dotenvy::dotenv().ok();
        Self::from_builder(
            Self::builder()?
                .add_source(File::with_name("borrowbot").required(false))
                .add_source(
                    Environment::with_prefix("BORROWBOT")
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    /// Builder seeded with the built-in defaults
    ///
    /// Callers (and tests) layer their own sources on top.
    ///
    /// # Errors
    ///
    /// `Configuration` if a default cannot be set.
    pub fn builder() -> Result<ConfigBuilder<::config::builder::DefaultState>> {
        Config::builder()
            .set_default("store.busy_timeout_ms", DEFAULT_BUSY_TIMEOUT_MS as i64)
            .and_then(|b| b.set_default("store.read_only", true))
            .map_err(config_error)
    }

    /// Extract the `[store]` section from a layered builder
    ///
    /// # Errors
    ///
    /// `Configuration` if a source is malformed or a value has the wrong type.
    pub fn from_builder(builder: ConfigBuilder<::config::builder::DefaultState>) -> Result<Self> {
        builder
            .build()
            .and_then(|cfg| cfg.get::<StoreConfig>("store"))
            .map_err(config_error)
    }

    /// Descriptor for the configured database
    ///
    /// # Errors
    ///
    /// `Configuration` when no database path is set.
    pub fn descriptor(&self) -> Result<StoreDescriptor> {
        let path = self.path.clone().ok_or_else(|| {
            ExError::new(ExErrorKind::Configuration)
                .with_op("store_descriptor")
                .with_field("store.path")
                .with_message("no database path configured")
        })?;
        let store = StoreDescriptor::new(path).with_busy_timeout_ms(self.busy_timeout_ms);
        Ok(if self.read_only { store } else { store.writable() })
    }
}
