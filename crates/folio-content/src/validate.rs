//! Validation of entry data against a collection schema.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::{FieldIssue, IssueKind};
use crate::schema::{CollectionSchema, FieldSpec, FieldType};

/// A field value that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Date(DateTime<Utc>),
    Number(serde_yaml::Number),
    Boolean(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// An entry whose data satisfied its collection schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEntry {
    /// Collection the entry belongs to
    pub collection: String,

    /// Normalized values for the declared fields that were present
    pub data: BTreeMap<String, FieldValue>,

    /// Markdown body, empty for data collections
    pub body: String,
}

impl ValidatedEntry {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.data.get(field)
    }

    /// Convert the validated values into a typed record.
    ///
    /// Dates are handed to the record as RFC 3339 strings. Integers stay
    /// integers, so integer record fields decode.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let value = serde_json::to_value(&self.data)?;
        serde_json::from_value(value)
    }
}

/// Check `data` against `schema`, collecting every issue in field order.
pub(crate) fn check_fields(
    schema: &CollectionSchema,
    data: &Mapping,
) -> Result<BTreeMap<String, FieldValue>, Vec<FieldIssue>> {
    let mut values = BTreeMap::new();
    let mut issues = Vec::new();

    for field in schema.fields() {
        let name: &str = &field.name;
        match data.get(name) {
            None if field.required => issues.push(FieldIssue::new(name, IssueKind::Missing)),
            None => {}
            Some(value) => match check_value(field, value) {
                Ok(v) => {
                    values.insert(name.to_string(), v);
                }
                Err(kind) => issues.push(FieldIssue::new(name, kind)),
            },
        }
    }

    for key in data.keys() {
        let declared = key.as_str().is_some_and(|k| schema.field(k).is_some());
        if !declared {
            tracing::debug!("Ignoring undeclared field {:?}", key);
        }
    }

    if issues.is_empty() {
        Ok(values)
    } else {
        Err(issues)
    }
}

fn check_value(field: &FieldSpec, value: &Value) -> Result<FieldValue, IssueKind> {
    let mismatch = || IssueKind::TypeMismatch {
        expected: field.field_type,
        found: yaml_type_name(value),
    };

    match field.field_type {
        FieldType::Text => {
            let text = value.as_str().ok_or_else(mismatch)?;
            if field.required && text.trim().is_empty() {
                return Err(IssueKind::EmptyText);
            }
            Ok(FieldValue::Text(text.to_string()))
        }
        FieldType::Date => {
            let raw = value.as_str().ok_or_else(mismatch)?;
            parse_date(raw)
                .map(FieldValue::Date)
                .ok_or_else(|| IssueKind::InvalidDate(raw.to_string()))
        }
        FieldType::Number => match value {
            Value::Number(n) => Ok(FieldValue::Number(n.clone())),
            _ => Err(mismatch()),
        },
        FieldType::Boolean => value.as_bool().map(FieldValue::Boolean).ok_or_else(mismatch),
    }
}

/// Parse the date forms accepted in frontmatter.
///
/// Timestamps without an offset, and bare dates, are taken as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn yaml_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "text",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
