//! Database connection management
//!
//! Provides utilities for opening and managing SQLite connections

#![allow(clippy::result_large_err)]

use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::descriptor::StoreDescriptor;
use crate::errors::{from_rusqlite, Result};

/// Open a fresh connection for one lookup or fetch
pub fn open(store: &StoreDescriptor) -> Result<Connection> {
    let flags = if store.read_only() {
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI
    } else {
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
    };
    let conn = Connection::open_with_flags(store.path(), flags).map_err(from_rusqlite)?;
    configure(&conn, store)?;
    Ok(conn)
}

/// Apply the descriptor's timeout policy
pub fn configure(conn: &Connection, store: &StoreDescriptor) -> Result<()> {
    conn.busy_timeout(Duration::from_millis(store.busy_timeout_ms()))
        .map_err(from_rusqlite)?;

    if !store.read_only() {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(from_rusqlite)?;
    }

    Ok(())
}
