use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value::FieldValue;
use crate::errors::{RecordError, Result};

/// Name → value mapping backing the keyword and tabular-row sources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMap {
    values: BTreeMap<String, FieldValue>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }

    /// Typed accessor whose errors name `entity`
    pub fn reader(&self, entity: &'static str) -> FieldReader<'_> {
        FieldReader { entity, map: self }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Typed view over a [`FieldMap`] for one entity kind
///
/// `require_*`-style getters (the unprefixed ones) treat an absent key and an
/// explicit null alike as `MissingField`; `opt_*` getters map both to `None`.
/// A value of the wrong shape is always `InvalidField`.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    entity: &'static str,
    map: &'a FieldMap,
}

impl<'a> FieldReader<'a> {
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    fn present(&self, key: &str) -> Option<&'a FieldValue> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn required(&self, key: &str) -> Result<&'a FieldValue> {
        self.present(key).ok_or_else(|| {
            RecordError::MissingField {
                entity: self.entity.to_string(),
                field: key.to_string(),
            }
            .into()
        })
    }

    fn invalid(&self, key: &str, expected: &str) -> crate::errors::ExError {
        RecordError::InvalidField {
            entity: self.entity.to_string(),
            field: key.to_string(),
            expected: expected.to_string(),
            found: self
                .map
                .get(key)
                .map_or("nothing", FieldValue::type_name)
                .to_string(),
        }
        .into()
    }

    pub fn text(&self, key: &str) -> Result<String> {
        match self.required(key)? {
            FieldValue::Text(s) => Ok(s.clone()),
            _ => Err(self.invalid(key, "text")),
        }
    }

    pub fn opt_text(&self, key: &str) -> Result<Option<String>> {
        match self.present(key) {
            None => Ok(None),
            Some(FieldValue::Text(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid(key, "text")),
        }
    }

    pub fn integer(&self, key: &str) -> Result<i64> {
        match self.required(key)? {
            FieldValue::Integer(i) => Ok(*i),
            _ => Err(self.invalid(key, "integer")),
        }
    }

    pub fn real(&self, key: &str) -> Result<f64> {
        match self.required(key)? {
            FieldValue::Real(f) => Ok(*f),
            FieldValue::Integer(i) => Ok(*i as f64),
            _ => Err(self.invalid(key, "real")),
        }
    }

    pub fn boolean(&self, key: &str) -> Result<bool> {
        match self.required(key)? {
            FieldValue::Bool(b) => Ok(*b),
            FieldValue::Integer(0) => Ok(false),
            FieldValue::Integer(1) => Ok(true),
            _ => Err(self.invalid(key, "bool")),
        }
    }

    pub fn decimal(&self, key: &str) -> Result<Decimal> {
        let parsed = match self.required(key)? {
            FieldValue::Integer(i) => Some(Decimal::from(*i)),
            FieldValue::Real(f) => Decimal::try_from(*f).ok(),
            FieldValue::Text(s) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        };
        parsed.ok_or_else(|| self.invalid(key, "decimal"))
    }

    pub fn timestamp(&self, key: &str) -> Result<DateTime<Utc>> {
        let value = self.required(key)?;
        to_timestamp(value).ok_or_else(|| self.invalid(key, "timestamp"))
    }

    pub fn opt_timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => to_timestamp(value)
                .map(Some)
                .ok_or_else(|| self.invalid(key, "timestamp")),
        }
    }

    pub fn date(&self, key: &str) -> Result<NaiveDate> {
        let parsed = match self.required(key)? {
            FieldValue::Date(d) => Some(*d),
            FieldValue::Timestamp(ts) => Some(ts.date_naive()),
            FieldValue::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        };
        parsed.ok_or_else(|| self.invalid(key, "date"))
    }
}

/// Accepts native timestamps, unix seconds, RFC 3339 and naive UTC text
/// (`YYYY-MM-DD HH:MM:SS[.f]`, with a space or `T` separator)
fn to_timestamp(value: &FieldValue) -> Option<DateTime<Utc>> {
    match value {
        FieldValue::Timestamp(ts) => Some(*ts),
        FieldValue::Integer(secs) => DateTime::from_timestamp(*secs, 0),
        FieldValue::Real(secs) => epoch_seconds(*secs),
        FieldValue::Text(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
                        .iter()
                        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                        .map(|naive| Utc.from_utc_datetime(&naive))
                })
        }
        _ => None,
    }
}

/// Convert fractional unix seconds into a UTC timestamp
pub(crate) fn epoch_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}
