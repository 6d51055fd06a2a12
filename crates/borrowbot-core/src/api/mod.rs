//! External content-retrieval API objects
//!
//! Entities read these objects through the accessor traits below and never
//! mutate them. The author relation is the only fallible accessor: it fails
//! for deleted and suspended accounts, which are expected conditions.

pub mod listing;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::errors::{RecordError, Result};
use crate::model::Author;
use crate::source::fields::epoch_seconds;

pub use listing::{ListingAuthor, ListingComment, ListingSubmission, Thing};

/// Fullname prefix of comments
pub const COMMENT_PREFIX: &str = "t1_";
/// Fullname prefix of submissions
pub const SUBMISSION_PREFIX: &str = "t3_";

/// Why an author relation could not be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorLookupError {
    #[error("author account was deleted")]
    Deleted,
    #[error("author account is suspended")]
    Suspended,
    #[error("author unavailable: {0}")]
    Unavailable(String),
}

/// Author relation of an API object
pub trait ApiAuthor {
    /// Display name
    fn name(&self) -> std::result::Result<String, AuthorLookupError>;
    /// Account fullname (`t2_...`)
    fn fullname(&self) -> std::result::Result<String, AuthorLookupError>;
}

/// Submission as exposed by the content API
pub trait ApiSubmission {
    /// Bare id, without the `t3_` prefix
    fn id(&self) -> &str;
    /// Creation time in fractional unix seconds
    fn created_utc(&self) -> f64;
    fn score(&self) -> i64;
    fn num_comments(&self) -> i64;
    fn url(&self) -> &str;
    fn upvote_ratio(&self) -> f64;
    fn permalink(&self) -> &str;
    fn subreddit_name(&self) -> &str;
    fn subreddit_id(&self) -> &str;
    fn title(&self) -> &str;
    fn selftext(&self) -> &str;
    fn author(&self) -> Option<&dyn ApiAuthor>;
}

/// Comment as exposed by the content API
pub trait ApiComment {
    /// Bare id, without the `t1_` prefix
    fn id(&self) -> &str;
    fn created_utc(&self) -> f64;
    fn score(&self) -> i64;
    fn subreddit_name(&self) -> &str;
    fn subreddit_id(&self) -> &str;
    /// Fullname of the owning submission
    fn link_id(&self) -> &str;
    /// Fullname of the parent comment or submission
    fn parent_id(&self) -> &str;
    fn body(&self) -> &str;
    fn author(&self) -> Option<&dyn ApiAuthor>;
}

/// Resolve the author relation into a name/id pair
///
/// Both halves come from the same relation and resolve together: if either
/// lookup fails with an [`AuthorLookupError`], or the relation is absent, the
/// result is `None`.
pub fn resolve_author(author: Option<&dyn ApiAuthor>) -> Option<Author> {
    let author = author?;
    match author.name().and_then(|name| Ok((name, author.fullname()?))) {
        Ok((name, id)) => Some(Author::new(name, id)),
        Err(reason) => {
            tracing::debug!(%reason, "author relation unavailable");
            None
        }
    }
}

/// Prefix a bare API id with its type tag
pub fn fullname(prefix: &str, id: &str) -> String {
    if id.starts_with(prefix) {
        id.to_string()
    } else {
        format!("{}{}", prefix, id)
    }
}

pub(crate) fn created_at(entity: &str, secs: f64) -> Result<DateTime<Utc>> {
    epoch_seconds(secs).ok_or_else(|| {
        RecordError::InvalidField {
            entity: entity.to_string(),
            field: "created_utc".to_string(),
            expected: "unix timestamp".to_string(),
            found: format!("real {}", secs),
        }
        .into()
    })
}
