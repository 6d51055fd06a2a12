use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::record::{NoApiShape, Record};
use crate::source::{FieldMap, TableSpec};

/// One `user_lookup` row: account id to display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    user_id: String,
    user_name: String,
    retrieved_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            retrieved_at: Utc::now(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }
}

impl Record for User {
    type Api = NoApiShape;

    const KIND: &'static str = "user";

    const TABLE: TableSpec = TableSpec {
        name: "user_lookup",
        key_column: "user_id",
        order_by: "user_id",
    };

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        let r = fields.reader(Self::KIND);
        Ok(Self {
            user_id: r.text("user_id")?,
            user_name: r.text("user_name")?,
            retrieved_at: r.opt_timestamp("retrieval_datetime")?.unwrap_or_else(Utc::now),
        })
    }

    fn from_api(api: &Self::Api) -> Result<Self> {
        match *api {}
    }

    fn key(&self) -> &str {
        &self.user_id
    }

    fn retrieved_at(&self) -> DateTime<Utc> {
        self.retrieved_at
    }
}
