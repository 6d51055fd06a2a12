//! Single-key lookup seam between record construction and a relational store

use super::fields::FieldMap;
use crate::errors::{RecordError, Result};

/// Where an entity kind lives in the relational store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Table name
    pub name: &'static str,
    /// Primary-key column
    pub key_column: &'static str,
    /// `ORDER BY` clause applied whenever rows of this table are listed
    pub order_by: &'static str,
}

/// Fetch exactly one row by primary key
///
/// Implemented by the store crate; the identifier-string source variant goes
/// through this trait so record construction never depends on a driver.
pub trait KeyLookup {
    /// Fetch the single row whose key column equals `key`.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::NotFound` unless exactly one row matches, and
    /// `ExErrorKind::Persistence` if the store cannot be queried.
    fn fetch_one(&self, table: &TableSpec, key: &str) -> Result<FieldMap>;
}

/// Lookup used when no store descriptor is configured
pub struct NoopKeyLookup;

impl KeyLookup for NoopKeyLookup {
    fn fetch_one(&self, table: &TableSpec, _key: &str) -> Result<FieldMap> {
        Err(RecordError::NotConfigured {
            op: format!("lookup:{}", table.name),
        }
        .into())
    }
}
