use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Author;
use crate::api::{self, ApiComment, COMMENT_PREFIX};
use crate::errors::Result;
use crate::record::Record;
use crate::source::{FieldMap, TableSpec};

/// A comment on a submission
///
/// The owning submission is referenced by key (`link_id`) only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    comment_id: String,
    retrieved_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    score: i64,
    subreddit_name: String,
    subreddit_id: String,
    parent_submission_id: String,
    parent_comment_id: String,
    body_text: String,
    author: Option<Author>,
}

impl Comment {
    pub fn comment_id(&self) -> &str {
        &self.comment_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn subreddit_name(&self) -> &str {
        &self.subreddit_name
    }

    pub fn subreddit_id(&self) -> &str {
        &self.subreddit_id
    }

    /// Fullname of the submission this comment belongs to
    pub fn parent_submission_id(&self) -> &str {
        &self.parent_submission_id
    }

    /// Fullname of the direct parent: a `t1_` comment or the `t3_` submission
    pub fn parent_comment_id(&self) -> &str {
        &self.parent_comment_id
    }

    /// Whether this comment replies directly to the submission
    pub fn is_top_level(&self) -> bool {
        self.parent_comment_id == self.parent_submission_id
    }

    pub fn body_text(&self) -> &str {
        &self.body_text
    }

    pub fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().map(Author::name)
    }

    pub fn author_id(&self) -> Option<&str> {
        self.author.as_ref().map(Author::id)
    }
}

impl Record for Comment {
    type Api = dyn ApiComment;

    const KIND: &'static str = "comment";

    const TABLE: TableSpec = TableSpec {
        name: "comments",
        key_column: "comment_id",
        order_by: "creation_datetime, comment_id",
    };

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        let r = fields.reader(Self::KIND);
        let comment_id = r.text("comment_id")?;
        Ok(Self {
            retrieved_at: r.opt_timestamp("retrieval_datetime")?.unwrap_or_else(Utc::now),
            created_at: r.timestamp("creation_datetime")?,
            score: r.integer("score")?,
            subreddit_name: r.text("subreddit_name")?,
            subreddit_id: r.text("subreddit_id")?,
            parent_submission_id: r.text("link_id")?,
            parent_comment_id: r.text("parent_id")?,
            body_text: r.text("text")?,
            author: Author::from_reader(&r, &comment_id)?,
            comment_id,
        })
    }

    fn from_api(api: &Self::Api) -> Result<Self> {
        Ok(Self {
            comment_id: api::fullname(COMMENT_PREFIX, api.id()),
            retrieved_at: Utc::now(),
            created_at: api::created_at(Self::KIND, api.created_utc())?,
            score: api.score(),
            subreddit_name: api.subreddit_name().to_string(),
            subreddit_id: api.subreddit_id().to_string(),
            parent_submission_id: api.link_id().to_string(),
            parent_comment_id: api.parent_id().to_string(),
            body_text: api.body().to_string(),
            author: api::resolve_author(api.author()),
        })
    }

    fn key(&self) -> &str {
        &self.comment_id
    }

    fn retrieved_at(&self) -> DateTime<Utc> {
        self.retrieved_at
    }
}
