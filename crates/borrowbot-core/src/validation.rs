//! Post-construction consistency checks
//!
//! Hard invariants fail with `InvariantViolation`. Checks against upstream
//! counters that are known to lag are reported as [`ConsistencyWarning`]s in
//! the returned [`ValidationReport`] and never fail validation.

use thiserror::Error;

use crate::errors::{RecordError, Result};
use crate::model::{
    Author, Comment, Loan, LoanConfirmation, LoanRequest, LoanResponse, Submission, User,
};
use crate::record::Record;

/// Non-fatal inconsistency between stored and observed data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyWarning {
    /// Stored comment counter differs from the hydrated comment count
    #[error("submission {submission_id} stores {stored} comments but {hydrated} were hydrated")]
    ChildCountMismatch {
        submission_id: String,
        stored: i64,
        hydrated: usize,
    },

    /// Hydrated comment timestamp precedes its submission
    #[error("comment {comment_id} was created before submission {submission_id}")]
    CommentPredatesSubmission {
        submission_id: String,
        comment_id: String,
    },
}

/// Outcome of a validation pass that found no hard violation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<ConsistencyWarning>,
}

impl ValidationReport {
    pub fn is_consistent(&self) -> bool {
        self.warnings.is_empty()
    }

    fn push(&mut self, warning: ConsistencyWarning) {
        tracing::warn!(warning = %warning, "consistency warning");
        self.warnings.push(warning);
    }
}

/// Consistency checks for a constructed entity
pub trait Validate {
    /// # Errors
    ///
    /// `InvariantViolation` on the first hard violation found.
    fn validate(&self) -> Result<ValidationReport>;
}

/// Blank author name or id, as `(field)`
pub fn find_blank_author_field(author: Option<&Author>) -> Option<&'static str> {
    let author = author?;
    if author.name().trim().is_empty() {
        Some("author_name")
    } else if author.id().trim().is_empty() {
        Some("author_id")
    } else {
        None
    }
}

/// Hydrated comments whose `link_id` names a different submission
///
/// Returns list of (comment_id, link_id) tuples
pub fn find_foreign_comments(submission: &Submission) -> Vec<(String, String)> {
    submission
        .comments()
        .iter()
        .filter(|c| c.parent_submission_id() != submission.submission_id())
        .map(|c| (c.comment_id().to_string(), c.parent_submission_id().to_string()))
        .collect()
}

fn check_author<R: Record>(record: &R, author: Option<&Author>) -> Result<()> {
    match find_blank_author_field(author) {
        Some(field) => Err(RecordError::BlankAuthor {
            entity: R::KIND.to_string(),
            key: record.key().to_string(),
            field: field.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

impl Validate for Submission {
    fn validate(&self) -> Result<ValidationReport> {
        check_author(self, self.author())?;

        let mut report = ValidationReport::default();
        let Some(comments) = self.comments().as_slice() else {
            return Ok(report);
        };

        if let Some((child_key, link)) = find_foreign_comments(self).into_iter().next() {
            return Err(RecordError::ForeignChild {
                parent_key: self.submission_id().to_string(),
                child_key,
                link,
            }
            .into());
        }
        for comment in comments {
            comment.validate()?;
        }

        // Upstream counter lags behind the real thread
        if i64::try_from(comments.len()).ok() != Some(self.comment_count()) {
            report.push(ConsistencyWarning::ChildCountMismatch {
                submission_id: self.submission_id().to_string(),
                stored: self.comment_count(),
                hydrated: comments.len(),
            });
        }
        for comment in comments {
            if comment.created_at() < self.created_at() {
                report.push(ConsistencyWarning::CommentPredatesSubmission {
                    submission_id: self.submission_id().to_string(),
                    comment_id: comment.comment_id().to_string(),
                });
            }
        }
        Ok(report)
    }
}

impl Validate for Comment {
    fn validate(&self) -> Result<ValidationReport> {
        check_author(self, self.author())?;
        Ok(ValidationReport::default())
    }
}

macro_rules! validate_fields_only {
    ($($kind:ty),* $(,)?) => {
        $(
            impl Validate for $kind {
                fn validate(&self) -> Result<ValidationReport> {
                    Ok(ValidationReport::default())
                }
            }
        )*
    };
}

// No author fields and no relationships
validate_fields_only!(LoanRequest, LoanResponse, Loan, LoanConfirmation, User);
