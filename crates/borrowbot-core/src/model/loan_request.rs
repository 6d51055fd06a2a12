use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::record::{NoApiShape, Record};
use crate::source::{FieldMap, FieldReader, TableSpec};

/// Payment services a borrower accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentChannels {
    pub paypal: bool,
    pub venmo: bool,
    pub zelle: bool,
}

impl PaymentChannels {
    fn from_reader(r: &FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            paypal: r.boolean("takes_paypal")?,
            venmo: r.boolean("takes_venmo")?,
            zelle: r.boolean("takes_zelle")?,
        })
    }

    pub fn any(&self) -> bool {
        self.paypal || self.venmo || self.zelle
    }
}

/// A parsed `[REQ]` submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    request_id: String,
    retrieved_at: DateTime<Utc>,
    source_submission_id: String,
    requested_at: DateTime<Utc>,
    inserted_at: DateTime<Utc>,
    due_date: NaiveDate,
    borrower_id: String,
    borrower_location: String,
    principal_amount: Decimal,
    repay_amount: Decimal,
    prearranged: bool,
    payment_channels: PaymentChannels,
}

impl LoanRequest {
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn source_submission_id(&self) -> &str {
        &self.source_submission_id
    }

    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    pub fn inserted_at(&self) -> DateTime<Utc> {
        self.inserted_at
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn borrower_id(&self) -> &str {
        &self.borrower_id
    }

    pub fn borrower_location(&self) -> &str {
        &self.borrower_location
    }

    pub fn principal_amount(&self) -> Decimal {
        self.principal_amount
    }

    pub fn repay_amount(&self) -> Decimal {
        self.repay_amount
    }

    /// Repayment over principal; never negative for a well-formed request
    pub fn interest(&self) -> Decimal {
        self.repay_amount - self.principal_amount
    }

    pub fn prearranged(&self) -> bool {
        self.prearranged
    }

    pub fn payment_channels(&self) -> PaymentChannels {
        self.payment_channels
    }
}

impl Record for LoanRequest {
    type Api = NoApiShape;

    const KIND: &'static str = "loan_request";

    const TABLE: TableSpec = TableSpec {
        name: "loan_requests",
        key_column: "request_id",
        order_by: "req_datetime, request_id",
    };

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        let r = fields.reader(Self::KIND);
        Ok(Self {
            request_id: r.text("request_id")?,
            retrieved_at: r.opt_timestamp("retrieval_datetime")?.unwrap_or_else(Utc::now),
            source_submission_id: r.text("source_submission_id")?,
            requested_at: r.timestamp("req_datetime")?,
            inserted_at: r.timestamp("insertion_datetime")?,
            due_date: r.date("return_date")?,
            borrower_id: r.text("borrower_id")?,
            borrower_location: r.text("borrower_location")?,
            principal_amount: r.decimal("principal_amt")?,
            repay_amount: r.decimal("repay_amt")?,
            prearranged: r.boolean("prearranged")?,
            payment_channels: PaymentChannels::from_reader(&r)?,
        })
    }

    fn from_api(api: &Self::Api) -> Result<Self> {
        match *api {}
    }

    fn key(&self) -> &str {
        &self.request_id
    }

    fn retrieved_at(&self) -> DateTime<Utc> {
        self.retrieved_at
    }
}
