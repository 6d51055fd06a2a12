//! Entity kinds
//!
//! Each kind implements [`Record`](crate::record::Record). Only
//! [`Submission`] owns a relationship.

pub mod author;
pub mod comment;
pub mod loan;
pub mod loan_confirmation;
pub mod loan_request;
pub mod loan_response;
pub mod relation;
pub mod submission;
pub mod user;

pub use author::Author;
pub use comment::Comment;
pub use loan::Loan;
pub use loan_confirmation::LoanConfirmation;
pub use loan_request::{LoanRequest, PaymentChannels};
pub use loan_response::LoanResponse;
pub use relation::Relation;
pub use submission::Submission;
pub use user::User;
