//! Construction sources
//!
//! An entity is built from exactly one of four input shapes. Callers that
//! already know the shape build a [`Source`] directly; callers holding
//! untyped input go through [`Source::classify`].

pub mod fields;
pub mod lookup;
pub mod value;

pub use fields::{FieldMap, FieldReader};
pub use lookup::{KeyLookup, NoopKeyLookup, TableSpec};
pub use value::FieldValue;

use crate::errors::{RecordError, Result};

/// The four mutually exclusive construction inputs
///
/// `A` is the external-API object type the entity accepts.
pub enum Source<'a, A: ?Sized> {
    /// Keyword mapping supplying every attribute directly
    Fields(FieldMap),
    /// One row pulled from a result set
    Row(FieldMap),
    /// Bare primary key, resolved through a [`KeyLookup`]
    Key(String),
    /// Object from the external content-retrieval API
    Api(&'a A),
}

impl<'a, A: ?Sized> Source<'a, A> {
    /// Resolve untyped input into exactly one variant
    ///
    /// - keyword map alone → `Fields`
    /// - JSON string → `Key`
    /// - JSON object of scalars → `Row`
    ///
    /// # Errors
    ///
    /// `InvalidSource` when both or neither inputs are given, when the value is
    /// any other JSON shape, or when a row column holds a nested value.
    pub fn classify(
        init: Option<serde_json::Value>,
        fields: Option<FieldMap>,
    ) -> Result<Self> {
        match (init, fields) {
            (None, Some(fields)) => Ok(Source::Fields(fields)),
            (None, None) => Err(invalid("no construction input supplied")),
            (Some(_), Some(_)) => Err(invalid(
                "source value and keyword fields are mutually exclusive",
            )),
            (Some(serde_json::Value::String(key)), None) => Ok(Source::Key(key)),
            (Some(serde_json::Value::Object(columns)), None) => {
                let mut row = FieldMap::new();
                for (name, value) in columns {
                    let value = FieldValue::from_json(value).ok_or_else(|| {
                        invalid(&format!("column '{}' holds a nested value", name))
                    })?;
                    row.insert(name, value);
                }
                Ok(Source::Row(row))
            }
            (Some(other), None) => Err(invalid(&format!(
                "unrecognized source value of JSON type {}",
                json_type(&other)
            ))),
        }
    }

    /// Variant name, for logging
    pub fn variant(&self) -> &'static str {
        match self {
            Source::Fields(_) => "fields",
            Source::Row(_) => "row",
            Source::Key(_) => "key",
            Source::Api(_) => "api",
        }
    }
}

fn invalid(reason: &str) -> crate::errors::ExError {
    RecordError::InvalidSource {
        reason: reason.to_string(),
    }
    .into()
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use serde_json::json;

    type Plain = Source<'static, ()>;

    #[test]
    fn test_classify_keyword_fields() {
        let fields = FieldMap::new().with("user_id", "t2_a");
        let source = Plain::classify(None, Some(fields)).unwrap();
        assert_eq!(source.variant(), "fields");
    }

    #[test]
    fn test_classify_string_is_key() {
        let source = Plain::classify(Some(json!("t3_abc")), None).unwrap();
        assert!(matches!(source, Source::Key(ref k) if k == "t3_abc"));
    }

    #[test]
    fn test_classify_object_is_row() {
        let source = Plain::classify(Some(json!({"score": 3, "text": null})), None).unwrap();
        match source {
            Source::Row(row) => {
                assert_eq!(row.get("score"), Some(&FieldValue::Integer(3)));
                assert_eq!(row.get("text"), Some(&FieldValue::Null));
            }
            other => panic!("expected row, got {}", other.variant()),
        }
    }

    #[test]
    fn test_classify_rejects_ambiguous_and_unknown_input() {
        let cases = vec![
            (None, None),
            (Some(json!("t3_abc")), Some(FieldMap::new())),
            (Some(json!(42)), None),
            (Some(json!(["t3_abc"])), None),
            (Some(json!({"nested": {"a": 1}})), None),
        ];
        for (init, fields) in cases {
            let err = Plain::classify(init, fields).err().expect("should fail");
            assert_eq!(err.kind(), ExErrorKind::InvalidSource);
        }
    }
}
