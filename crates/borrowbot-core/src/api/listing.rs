//! Listing JSON as returned by the content API (`{"kind": "t3", "data": {...}}`)

use serde::Deserialize;

use super::{ApiAuthor, ApiComment, ApiSubmission, AuthorLookupError};
use crate::errors::Result;

/// Name the API substitutes for removed accounts
const DELETED_AUTHOR: &str = "[deleted]";

/// One listing child, discriminated by its fullname kind
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Thing {
    #[serde(rename = "t3")]
    Submission(ListingSubmission),
    #[serde(rename = "t1")]
    Comment(ListingComment),
}

impl Thing {
    /// Parse a single listing child
    ///
    /// # Errors
    ///
    /// `Serialization` if the JSON is malformed or of an unsupported kind.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Author columns flattened into every listing object
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListingAuthor {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub author_fullname: Option<String>,
}

impl ApiAuthor for ListingAuthor {
    fn name(&self) -> std::result::Result<String, AuthorLookupError> {
        match self.author.as_deref() {
            None => Err(AuthorLookupError::Unavailable("no author".to_string())),
            Some(DELETED_AUTHOR) => Err(AuthorLookupError::Deleted),
            Some(name) => Ok(name.to_string()),
        }
    }

    // Suspended accounts keep their name but lose the fullname
    fn fullname(&self) -> std::result::Result<String, AuthorLookupError> {
        self.name()?;
        self.author_fullname
            .clone()
            .ok_or(AuthorLookupError::Suspended)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingSubmission {
    pub id: String,
    pub created_utc: f64,
    pub score: i64,
    pub num_comments: i64,
    pub url: String,
    pub upvote_ratio: f64,
    pub permalink: String,
    pub subreddit: String,
    pub subreddit_id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(flatten)]
    pub author: ListingAuthor,
}

impl ApiSubmission for ListingSubmission {
    fn id(&self) -> &str {
        &self.id
    }
    fn created_utc(&self) -> f64 {
        self.created_utc
    }
    fn score(&self) -> i64 {
        self.score
    }
    fn num_comments(&self) -> i64 {
        self.num_comments
    }
    fn url(&self) -> &str {
        &self.url
    }
    fn upvote_ratio(&self) -> f64 {
        self.upvote_ratio
    }
    fn permalink(&self) -> &str {
        &self.permalink
    }
    fn subreddit_name(&self) -> &str {
        &self.subreddit
    }
    fn subreddit_id(&self) -> &str {
        &self.subreddit_id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn selftext(&self) -> &str {
        &self.selftext
    }
    fn author(&self) -> Option<&dyn ApiAuthor> {
        Some(&self.author)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingComment {
    pub id: String,
    pub created_utc: f64,
    pub score: i64,
    pub subreddit: String,
    pub subreddit_id: String,
    pub link_id: String,
    pub parent_id: String,
    #[serde(default)]
    pub body: String,
    #[serde(flatten)]
    pub author: ListingAuthor,
}

impl ApiComment for ListingComment {
    fn id(&self) -> &str {
        &self.id
    }
    fn created_utc(&self) -> f64 {
        self.created_utc
    }
    fn score(&self) -> i64 {
        self.score
    }
    fn subreddit_name(&self) -> &str {
        &self.subreddit
    }
    fn subreddit_id(&self) -> &str {
        &self.subreddit_id
    }
    fn link_id(&self) -> &str {
        &self.link_id
    }
    fn parent_id(&self) -> &str {
        &self.parent_id
    }
    fn body(&self) -> &str {
        &self.body
    }
    fn author(&self) -> Option<&dyn ApiAuthor> {
        Some(&self.author)
    }
}
