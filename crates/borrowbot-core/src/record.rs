//! Record construction protocol
//!
//! Every entity kind normalizes its sources into the same attribute set.
//! [`Record::materialize`] is the single dispatcher over the four source
//! variants; per-kind code only supplies the field mapping and API mapping.

use chrono::{DateTime, Utc};

use crate::errors::{RecordError, Result};
use crate::model::Relation;
use crate::source::{FieldMap, KeyLookup, Source, TableSpec};

/// API object type of entity kinds the content API never returns
///
/// Uninhabited: a `Source::Api` cannot be built for these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoApiShape {}

/// A materializable domain record
pub trait Record: Sized {
    /// External API object this kind can be built from
    type Api: ?Sized;

    /// Entity kind name, used in errors and logs
    const KIND: &'static str;

    /// Table holding rows of this kind
    const TABLE: TableSpec;

    /// Build from a keyword map or a table row.
    ///
    /// # Errors
    ///
    /// `MissingField` / `InvalidField` for absent or malformed required keys.
    fn from_fields(fields: &FieldMap) -> Result<Self>;

    /// Build from an external API object.
    ///
    /// # Errors
    ///
    /// `InvalidField` if the object carries an unrepresentable value.
    fn from_api(api: &Self::Api) -> Result<Self>;

    /// Primary key
    fn key(&self) -> &str;

    /// When the record was retrieved from its upstream source
    fn retrieved_at(&self) -> DateTime<Utc>;

    /// Build from whichever source variant the caller holds
    ///
    /// `lookup` is only consulted for `Source::Key`.
    ///
    /// # Errors
    ///
    /// `Configuration` for a key source without a lookup, `NotFound` when the
    /// key does not select exactly one row, plus the errors of
    /// [`Record::from_fields`] and [`Record::from_api`].
    fn materialize(source: Source<'_, Self::Api>, lookup: Option<&dyn KeyLookup>) -> Result<Self> {
        let variant = source.variant();
        let record = match source {
            Source::Fields(fields) | Source::Row(fields) => Self::from_fields(&fields),
            Source::Key(key) => match lookup {
                None => Err(RecordError::NotConfigured {
                    op: format!("lookup:{}", Self::TABLE.name),
                }
                .into()),
                Some(lookup) => lookup
                    .fetch_one(&Self::TABLE, &key)
                    .and_then(|row| Self::from_fields(&row)),
            },
            Source::Api(api) => Self::from_api(api),
        };

        match &record {
            Ok(r) => tracing::debug!(
                entity_kind = Self::KIND,
                source = variant,
                entity_key = r.key(),
                "record materialized"
            ),
            Err(e) => tracing::debug!(
                entity_kind = Self::KIND,
                source = variant,
                err.code = e.code(),
                "record materialization failed"
            ),
        }
        record
    }
}

/// A record owning a one-to-many relationship to another record kind
pub trait ParentRecord: Record {
    type Child: Record + Clone;

    /// Child column holding the parent's key
    const CHILD_LINK_COLUMN: &'static str;

    /// Parent key a child points at
    fn child_link(child: &Self::Child) -> &str;

    fn children(&self) -> &Relation<Self::Child>;

    /// Replace the relationship with a fetched collection
    fn attach_children(&mut self, children: Vec<Self::Child>);
}
