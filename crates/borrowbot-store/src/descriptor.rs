//! Store-connection descriptor
//!
//! Opaque to the core: record construction only sees it through the
//! `KeyLookup` trait, and it is passed explicitly to every fetch.

use std::fmt;
use std::path::{Path, PathBuf};

/// Default wait on a locked database before a query fails
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Where and how to open the relational store
///
/// Every lookup or fetch opens its own connection from this and closes it
/// before returning.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreDescriptor {
    path: PathBuf,
    busy_timeout_ms: u64,
    read_only: bool,
}

impl StoreDescriptor {
    /// Read-only descriptor with the default busy timeout
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            read_only: true,
        }
    }

    pub fn with_busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }

    /// Allow writes (schema setup and fixtures only)
    pub fn writable(mut self) -> Self {
        self.read_only = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn busy_timeout_ms(&self) -> u64 {
        self.busy_timeout_ms
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }
}

// Path stays out of logs and error output
impl fmt::Debug for StoreDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreDescriptor")
            .field("busy_timeout_ms", &self.busy_timeout_ms)
            .field("read_only", &self.read_only)
            .finish_non_exhaustive()
    }
}
