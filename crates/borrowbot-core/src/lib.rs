//! Borrowbot Core - entity construction kernel
//!
//! This crate provides the domain records of the lending forum and the
//! protocol that builds them, including:
//! - Submission, comment, loan and user entities with read-only accessors
//! - Source classification over keyword fields, table rows, keys and API objects
//! - The key-lookup seam implemented by the store crate
//! - The parent/child relationship used for batched comment hydration
//! - Consistency validation with hard invariants and soft warnings
//!
//! No I/O happens here; see `borrowbot-store` for the SQLite side.

pub mod api;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod record;
pub mod source;
pub mod validation;

pub use borrowbot_core_types::schema;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, RecordError, Result};
pub use model::{
    Author, Comment, Loan, LoanConfirmation, LoanRequest, LoanResponse, PaymentChannels,
    Relation, Submission, User,
};
pub use record::{NoApiShape, ParentRecord, Record};
pub use source::{FieldMap, FieldValue, KeyLookup, NoopKeyLookup, Source, TableSpec};
pub use validation::{ConsistencyWarning, Validate, ValidationReport};
