use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::record::{NoApiShape, Record};
use crate::source::{FieldMap, TableSpec};

/// Borrower acknowledgement that a loan arrived
///
/// Shares its key with the [`Loan`](super::Loan) it confirms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanConfirmation {
    loan_id: String,
    retrieved_at: DateTime<Utc>,
    amount: Decimal,
    lender_id: String,
    borrower_id: String,
    loan_request_id: String,
    source_comment_id: String,
}

impl LoanConfirmation {
    pub fn loan_id(&self) -> &str {
        &self.loan_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn lender_id(&self) -> &str {
        &self.lender_id
    }

    pub fn borrower_id(&self) -> &str {
        &self.borrower_id
    }

    pub fn loan_request_id(&self) -> &str {
        &self.loan_request_id
    }

    pub fn source_comment_id(&self) -> &str {
        &self.source_comment_id
    }
}

impl Record for LoanConfirmation {
    type Api = NoApiShape;

    const KIND: &'static str = "loan_confirmation";

    const TABLE: TableSpec = TableSpec {
        name: "loan_confirmations",
        key_column: "loan_id",
        order_by: "loan_id",
    };

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        let r = fields.reader(Self::KIND);
        Ok(Self {
            loan_id: r.text("loan_id")?,
            retrieved_at: r.opt_timestamp("retrieval_datetime")?.unwrap_or_else(Utc::now),
            amount: r.decimal("amount")?,
            lender_id: r.text("lender_id")?,
            borrower_id: r.text("borrower_id")?,
            loan_request_id: r.text("loan_request_id")?,
            source_comment_id: r.text("source_comment_id")?,
        })
    }

    fn from_api(api: &Self::Api) -> Result<Self> {
        match *api {}
    }

    fn key(&self) -> &str {
        &self.loan_id
    }

    fn retrieved_at(&self) -> DateTime<Utc> {
        self.retrieved_at
    }
}
