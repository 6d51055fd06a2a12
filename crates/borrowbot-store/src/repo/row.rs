//! Result-set rows as field maps
//!
//! Columns are taken by name, so `SELECT *` rows feed straight into the
//! tabular-row construction path.

use borrowbot_core::{FieldMap, FieldValue};
use rusqlite::types::ValueRef;
use rusqlite::Row;

/// Convert one row into a [`FieldMap`] keyed by column name
///
/// Blobs are read as lossy UTF-8 text; no table read here stores binary data.
pub fn row_to_fields(row: &Row<'_>) -> rusqlite::Result<FieldMap> {
    let stmt: &rusqlite::Statement<'_> = row.as_ref();
    let mut fields = FieldMap::new();
    for (idx, name) in stmt.column_names().into_iter().enumerate() {
        let value = match row.get_ref(idx)? {
            ValueRef::Null => FieldValue::Null,
            ValueRef::Integer(i) => FieldValue::Integer(i),
            ValueRef::Real(f) => FieldValue::Real(f),
            ValueRef::Text(t) | ValueRef::Blob(t) => {
                FieldValue::Text(String::from_utf8_lossy(t).into_owned())
            }
        };
        fields.insert(name, value);
    }
    Ok(fields)
}
