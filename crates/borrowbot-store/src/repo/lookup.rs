//! Single-key lookup
//!
//! Exactly one row must match; zero rows and duplicate keys both surface as
//! `NotFound` rather than silently picking a row.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use borrowbot_core::errors::RecordError;
use borrowbot_core::{log_op_end, log_op_error, log_op_start};
use borrowbot_core::{FieldMap, KeyLookup, Record, Source, TableSpec};
use rusqlite::Connection;

use super::row::row_to_fields;
use crate::db;
use crate::descriptor::StoreDescriptor;
use crate::errors::{from_rusqlite, Result};

impl KeyLookup for StoreDescriptor {
    fn fetch_one(&self, table: &TableSpec, key: &str) -> Result<FieldMap> {
        let conn = db::open(self)?;
        fetch_one_on(&conn, table, key)
    }
}

/// Fetch the single row of `table` keyed by `key` on an open connection
///
/// # Errors
///
/// `NotFound` unless exactly one row matches; `Persistence` on query failure.
pub fn fetch_one_on(conn: &Connection, table: &TableSpec, key: &str) -> Result<FieldMap> {
    let sql = format!(
        "SELECT * FROM {} WHERE {} = ?1",
        table.name, table.key_column
    );
    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let mut rows: Vec<FieldMap> = stmt
        .query_map([key], row_to_fields)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    match rows.pop() {
        Some(row) if rows.is_empty() => Ok(row),
        other => Err(RecordError::RecordNotFound {
            table: table.name.to_string(),
            key: key.to_string(),
            count: rows.len() + usize::from(other.is_some()),
        }
        .into()),
    }
}

/// Construct one record of kind `R` from its primary key
///
/// # Errors
///
/// `NotFound` unless exactly one row matches, `Persistence` if the store cannot
/// be opened or queried, plus any construction error of the row.
pub fn lookup<R: Record>(store: &StoreDescriptor, key: &str) -> Result<R> {
    log_op_start!("lookup", entity_kind = R::KIND, entity_key = key);
    let start = Instant::now();

    let record = R::materialize(Source::Key(key.to_string()), Some(store)).map_err(|e| {
        log_op_error!(
            "lookup",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            entity_kind = R::KIND
        );
        e
    })?;

    log_op_end!(
        "lookup",
        duration_ms = start.elapsed().as_millis() as u64,
        entity_kind = R::KIND
    );

    Ok(record)
}
