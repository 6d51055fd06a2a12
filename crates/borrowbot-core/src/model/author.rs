use serde::{Deserialize, Serialize};

use crate::errors::{RecordError, Result};
use crate::source::FieldReader;

/// Display name and account id of a content author
///
/// Both halves come from the same lookup, so an entity either has an author
/// with both populated or no author at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    name: String,
    id: String,
}

impl Author {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Read the optional `author_name` / `author_id` pair
    ///
    /// # Errors
    ///
    /// `InvariantViolation` when exactly one of the two is present.
    pub(crate) fn from_reader(reader: &FieldReader<'_>, key: &str) -> Result<Option<Self>> {
        match (
            reader.opt_text("author_name")?,
            reader.opt_text("author_id")?,
        ) {
            (Some(name), Some(id)) => Ok(Some(Self { name, id })),
            (None, None) => Ok(None),
            _ => Err(RecordError::UnpairedAuthor {
                entity: reader.entity().to_string(),
                key: key.to_string(),
            }
            .into()),
        }
    }
}
