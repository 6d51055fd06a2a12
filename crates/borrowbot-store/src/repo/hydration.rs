//! Batched relationship hydration
//!
//! Fills the child relation of many parents with one query instead of one
//! query per parent. All rows are converted and partitioned before any
//! parent is touched, so a failure leaves every parent as it was.

#![allow(clippy::result_large_err)]

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use borrowbot_core::{log_op_end, log_op_error, log_op_start};
use borrowbot_core::{FieldMap, ParentRecord, Record, TableSpec};
use rusqlite::Connection;

use super::row::row_to_fields;
use crate::db;
use crate::descriptor::StoreDescriptor;
use crate::errors::{from_rusqlite, Result};

/// SQLite's bound-parameter ceiling (`SQLITE_MAX_VARIABLE_NUMBER`)
pub const MAX_BOUND_PARAMS: usize = 32_766;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct HydrateStats {
    rows: usize,
    queries: usize,
}

/// Attach each parent's children, fetched in one round-trip
///
/// Every parent ends up `Fetched`: parents without matching rows get an empty
/// collection. Any previously attached collection is replaced. With no
/// parents, no connection is opened.
///
/// # Errors
///
/// `Persistence` if the store cannot be opened or queried, or any
/// construction error of a child row. Parents are unmodified on error.
pub fn hydrate_children<'p, P: ParentRecord>(
    parents: &'p mut [P],
    store: &StoreDescriptor,
) -> Result<&'p mut [P]> {
    log_op_start!(
        "hydrate_children",
        entity_kind = P::KIND,
        parent_count = parents.len()
    );
    let start = Instant::now();

    let stats = hydrate_children_impl(parents, store, MAX_BOUND_PARAMS).map_err(|e| {
        log_op_error!(
            "hydrate_children",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            entity_kind = P::KIND
        );
        e
    })?;

    log_op_end!(
        "hydrate_children",
        duration_ms = start.elapsed().as_millis() as u64,
        parent_count = parents.len(),
        row_count = stats.rows,
        query_count = stats.queries
    );

    Ok(parents)
}

fn hydrate_children_impl<P: ParentRecord>(
    parents: &mut [P],
    store: &StoreDescriptor,
    chunk_size: usize,
) -> Result<HydrateStats> {
    if parents.is_empty() {
        return Ok(HydrateStats::default());
    }

    // Distinct keys in first-seen order
    let mut seen = HashSet::new();
    let keys: Vec<String> = parents
        .iter()
        .map(|p| p.key().to_string())
        .filter(|k| seen.insert(k.clone()))
        .collect();

    let conn = db::open(store)?;
    let child_table = <P::Child as Record>::TABLE;
    let mut rows = Vec::new();
    let mut queries = 0;
    for chunk in keys.chunks(chunk_size.max(1)) {
        rows.extend(query_children(
            &conn,
            &child_table,
            P::CHILD_LINK_COLUMN,
            chunk,
        )?);
        queries += 1;
    }
    drop(conn);

    let row_count = rows.len();
    let mut partitions: HashMap<String, Vec<P::Child>> = HashMap::new();
    for row in &rows {
        let child = <P::Child as Record>::from_fields(row)?;
        partitions
            .entry(P::child_link(&child).to_string())
            .or_default()
            .push(child);
    }

    for parent in parents.iter_mut() {
        let children = partitions.get(parent.key()).cloned().unwrap_or_default();
        parent.attach_children(children);
    }

    Ok(HydrateStats {
        rows: row_count,
        queries,
    })
}

/// Children of a single parent, without a parent entity
///
/// # Errors
///
/// `Persistence` if the store cannot be opened or queried, or any
/// construction error of a child row.
pub fn fetch_children<P: ParentRecord>(
    store: &StoreDescriptor,
    parent_key: &str,
) -> Result<Vec<P::Child>> {
    log_op_start!("fetch_children", entity_kind = P::KIND, entity_key = parent_key);
    let start = Instant::now();

    let result = fetch_children_impl::<P>(store, parent_key).map_err(|e| {
        log_op_error!(
            "fetch_children",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            entity_kind = P::KIND
        );
        e
    })?;

    log_op_end!(
        "fetch_children",
        duration_ms = start.elapsed().as_millis() as u64,
        row_count = result.len()
    );

    Ok(result)
}

fn fetch_children_impl<P: ParentRecord>(
    store: &StoreDescriptor,
    parent_key: &str,
) -> Result<Vec<P::Child>> {
    let conn = db::open(store)?;
    let rows = query_children(
        &conn,
        &<P::Child as Record>::TABLE,
        P::CHILD_LINK_COLUMN,
        &[parent_key.to_string()],
    )?;
    rows.iter().map(<P::Child as Record>::from_fields).collect()
}

/// Rows of `table` whose `link_column` is one of `keys`
///
/// One key uses an equality filter, several an `IN` list. Both orderings
/// follow the table's `order_by`.
fn query_children(
    conn: &Connection,
    table: &TableSpec,
    link_column: &str,
    keys: &[String],
) -> Result<Vec<FieldMap>> {
    let filter = if keys.len() == 1 {
        format!("{} = ?1", link_column)
    } else {
        let placeholders: Vec<String> = (1..=keys.len()).map(|i| format!("?{}", i)).collect();
        format!("{} IN ({})", link_column, placeholders.join(", "))
    };
    let sql = format!(
        "SELECT * FROM {} WHERE {} ORDER BY {}",
        table.name, filter, table.order_by
    );

    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(keys.iter()), row_to_fields)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}
