#![allow(dead_code)]

use std::collections::HashMap;

use borrowbot_core::api::{ApiAuthor, ApiComment, ApiSubmission, AuthorLookupError};
use borrowbot_core::errors::{RecordError, Result};
use borrowbot_core::{FieldMap, KeyLookup, TableSpec};
use chrono::{DateTime, TimeZone, Utc};

/// 2019-03-01 12:30:00 UTC
pub const CREATED_SECS: i64 = 1_551_443_400;

pub fn created_at() -> DateTime<Utc> {
    Utc.timestamp_opt(CREATED_SECS, 0).unwrap()
}

pub fn retrieved_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 3, 2, 8, 0, 0).unwrap()
}

/// Keyword fields of a submission `t3_{id}` authored by alice
pub fn submission_fields(id: &str, num_comments: i64) -> FieldMap {
    FieldMap::new()
        .with("submission_id", format!("t3_{}", id))
        .with("creation_datetime", created_at())
        .with("score", 12)
        .with("num_comments", num_comments)
        .with("url", format!("https://forum.test/r/borrow/{}", id))
        .with("upvote_ratio", 0.93)
        .with("permalink", format!("/r/borrow/comments/{}/", id))
        .with("subreddit_name", "borrow")
        .with("subreddit_id", "t5_2sfoe")
        .with("title", "[REQ] ($100) - (#Springfield, IL, USA), (Repay $120)")
        .with("text", "Need help until payday")
        .with("author_name", "alice")
        .with("author_id", "t2_alice")
}

/// Keyword fields of a top-level comment on `link`
pub fn comment_fields(id: &str, link: &str, created: DateTime<Utc>) -> FieldMap {
    FieldMap::new()
        .with("comment_id", id)
        .with("creation_datetime", created)
        .with("score", 1)
        .with("subreddit_name", "borrow")
        .with("subreddit_id", "t5_2sfoe")
        .with("link_id", link)
        .with("parent_id", link)
        .with("text", "$loan 100")
        .with("author_name", "bob")
        .with("author_id", "t2_bob")
}

pub fn loan_request_fields(id: &str) -> FieldMap {
    FieldMap::new()
        .with("request_id", id)
        .with("source_submission_id", "t3_abc")
        .with("req_datetime", created_at())
        .with("insertion_datetime", "2019-03-01 12:31:05")
        .with("return_date", "2019-03-29")
        .with("borrower_id", "t2_alice")
        .with("borrower_location", "Springfield, IL, USA")
        .with("principal_amt", "100.00")
        .with("repay_amt", "120.00")
        .with("prearranged", 0)
        .with("takes_paypal", 1)
        .with("takes_venmo", 0)
        .with("takes_zelle", 1)
}

/// Author relation with independently scripted lookups
#[derive(Debug, Clone)]
pub struct FakeAuthor {
    pub name: std::result::Result<String, AuthorLookupError>,
    pub fullname: std::result::Result<String, AuthorLookupError>,
}

impl FakeAuthor {
    pub fn ok(name: &str, fullname: &str) -> Self {
        Self {
            name: Ok(name.to_string()),
            fullname: Ok(fullname.to_string()),
        }
    }

    pub fn deleted() -> Self {
        Self {
            name: Err(AuthorLookupError::Deleted),
            fullname: Err(AuthorLookupError::Deleted),
        }
    }

    pub fn suspended(name: &str) -> Self {
        Self {
            name: Ok(name.to_string()),
            fullname: Err(AuthorLookupError::Suspended),
        }
    }
}

impl ApiAuthor for FakeAuthor {
    fn name(&self) -> std::result::Result<String, AuthorLookupError> {
        self.name.clone()
    }
    fn fullname(&self) -> std::result::Result<String, AuthorLookupError> {
        self.fullname.clone()
    }
}

/// API-side twin of [`submission_fields`]
pub struct FakeSubmission {
    pub id: String,
    pub created_utc: f64,
    pub num_comments: i64,
    pub author: Option<FakeAuthor>,
}

impl FakeSubmission {
    pub fn new(id: &str, num_comments: i64) -> Self {
        Self {
            id: id.to_string(),
            created_utc: CREATED_SECS as f64,
            num_comments,
            author: Some(FakeAuthor::ok("alice", "t2_alice")),
        }
    }
}

impl ApiSubmission for FakeSubmission {
    fn id(&self) -> &str {
        &self.id
    }
    fn created_utc(&self) -> f64 {
        self.created_utc
    }
    fn score(&self) -> i64 {
        12
    }
    fn num_comments(&self) -> i64 {
        self.num_comments
    }
    fn url(&self) -> &str {
        "https://forum.test/r/borrow/abc"
    }
    fn upvote_ratio(&self) -> f64 {
        0.93
    }
    fn permalink(&self) -> &str {
        "/r/borrow/comments/abc/"
    }
    fn subreddit_name(&self) -> &str {
        "borrow"
    }
    fn subreddit_id(&self) -> &str {
        "t5_2sfoe"
    }
    fn title(&self) -> &str {
        "[REQ] ($100) - (#Springfield, IL, USA), (Repay $120)"
    }
    fn selftext(&self) -> &str {
        "Need help until payday"
    }
    fn author(&self) -> Option<&dyn ApiAuthor> {
        self.author.as_ref().map(|a| a as &dyn ApiAuthor)
    }
}

pub struct FakeComment {
    pub id: String,
    pub link_id: String,
    pub author: Option<FakeAuthor>,
}

impl ApiComment for FakeComment {
    fn id(&self) -> &str {
        &self.id
    }
    fn created_utc(&self) -> f64 {
        CREATED_SECS as f64
    }
    fn score(&self) -> i64 {
        1
    }
    fn subreddit_name(&self) -> &str {
        "borrow"
    }
    fn subreddit_id(&self) -> &str {
        "t5_2sfoe"
    }
    fn link_id(&self) -> &str {
        &self.link_id
    }
    fn parent_id(&self) -> &str {
        &self.link_id
    }
    fn body(&self) -> &str {
        "$loan 100"
    }
    fn author(&self) -> Option<&dyn ApiAuthor> {
        self.author.as_ref().map(|a| a as &dyn ApiAuthor)
    }
}

/// In-memory key lookup keyed by (table, key)
#[derive(Default)]
pub struct MemoryLookup {
    rows: HashMap<(&'static str, String), Vec<FieldMap>>,
}

impl MemoryLookup {
    pub fn insert(&mut self, table: &TableSpec, key: &str, row: FieldMap) {
        self.rows
            .entry((table.name, key.to_string()))
            .or_default()
            .push(row);
    }
}

impl KeyLookup for MemoryLookup {
    fn fetch_one(&self, table: &TableSpec, key: &str) -> Result<FieldMap> {
        match self.rows.get(&(table.name, key.to_string())).map(Vec::as_slice) {
            Some([row]) => Ok(row.clone()),
            other => Err(RecordError::RecordNotFound {
                table: table.name.to_string(),
                key: key.to_string(),
                count: other.map_or(0, <[FieldMap]>::len),
            }
            .into()),
        }
    }
}
