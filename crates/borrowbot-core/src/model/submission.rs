use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, Comment, Relation};
use crate::api::{self, ApiSubmission, SUBMISSION_PREFIX};
use crate::errors::Result;
use crate::record::{ParentRecord, Record};
use crate::source::{FieldMap, TableSpec};

/// A forum submission and, once hydrated, its comments
///
/// Constructible from keyword fields, a `submissions` row, a `t3_` key, or an
/// API submission object. Fields are fixed at construction; only the comment
/// relationship can be replaced afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    submission_id: String,
    retrieved_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    score: i64,
    comment_count: i64,
    url: String,
    upvote_ratio: f64,
    permalink: String,
    subreddit_name: String,
    subreddit_id: String,
    title: String,
    body_text: String,
    author: Option<Author>,
    #[serde(default)]
    comments: Relation<Comment>,
}

impl Submission {
    pub fn submission_id(&self) -> &str {
        &self.submission_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Comment counter as stored upstream (may undercount)
    pub fn comment_count(&self) -> i64 {
        self.comment_count
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn upvote_ratio(&self) -> f64 {
        self.upvote_ratio
    }

    pub fn permalink(&self) -> &str {
        &self.permalink
    }

    pub fn subreddit_name(&self) -> &str {
        &self.subreddit_name
    }

    pub fn subreddit_id(&self) -> &str {
        &self.subreddit_id
    }

    pub fn title(&self) -> &str {
        &self.title
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

    pub fn comments(&self) -> &Relation<Comment> {
        &self.comments
    }

    /// Attach comments supplied by the caller (not validated)
    pub fn set_comments(&mut self, comments: Vec<Comment>) {
        self.comments = Relation::Fetched(comments);
    }
}

impl Record for Submission {
    type Api = dyn ApiSubmission;

    const KIND: &'static str = "submission";

    const TABLE: TableSpec = TableSpec {
        name: "submissions",
        key_column: "submission_id",
        order_by: "creation_datetime, submission_id",
    };

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        let r = fields.reader(Self::KIND);
        let submission_id = r.text("submission_id")?;
        Ok(Self {
            retrieved_at: r.opt_timestamp("retrieval_datetime")?.unwrap_or_else(Utc::now),
            created_at: r.timestamp("creation_datetime")?,
            score: r.integer("score")?,
            comment_count: r.integer("num_comments")?,
            url: r.text("url")?,
            upvote_ratio: r.real("upvote_ratio")?,
            permalink: r.text("permalink")?,
            subreddit_name: r.text("subreddit_name")?,
            subreddit_id: r.text("subreddit_id")?,
            title: r.text("title")?,
            body_text: r.text("text")?,
            author: Author::from_reader(&r, &submission_id)?,
            comments: Relation::Unfetched,
            submission_id,
        })
    }

    fn from_api(api: &Self::Api) -> Result<Self> {
        Ok(Self {
            submission_id: api::fullname(SUBMISSION_PREFIX, api.id()),
            retrieved_at: Utc::now(),
            created_at: api::created_at(Self::KIND, api.created_utc())?,
            score: api.score(),
            comment_count: api.num_comments(),
            url: api.url().to_string(),
            upvote_ratio: api.upvote_ratio(),
            permalink: api.permalink().to_string(),
            subreddit_name: api.subreddit_name().to_string(),
            subreddit_id: api.subreddit_id().to_string(),
            title: api.title().to_string(),
            body_text: api.selftext().to_string(),
            author: api::resolve_author(api.author()),
            comments: Relation::Unfetched,
        })
    }

    fn key(&self) -> &str {
        &self.submission_id
    }

    fn retrieved_at(&self) -> DateTime<Utc> {
        self.retrieved_at
    }
}

impl ParentRecord for Submission {
    type Child = Comment;

    const CHILD_LINK_COLUMN: &'static str = "link_id";

    fn child_link(child: &Comment) -> &str {
        child.parent_submission_id()
    }

    fn children(&self) -> &Relation<Comment> {
        &self.comments
    }

    fn attach_children(&mut self, children: Vec<Comment>) {
        self.set_comments(children);
    }
}
