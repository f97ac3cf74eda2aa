//! Error types for schema definition and content validation.

use std::fmt;

use crate::schema::FieldType;

/// Errors raised while declaring collections. These abort configuration load.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaDefinitionError {
    #[error("Collection name must not be empty")]
    EmptyName,

    #[error("Collection already defined: {0}")]
    DuplicateCollection(String),

    #[error("Field name must not be empty")]
    EmptyFieldName,

    #[error("Field defined more than once: {0}")]
    DuplicateField(String),

    #[error("Unsupported field type {type_name:?} for field {field} (expected text, date, number or boolean)")]
    UnsupportedType { field: String, type_name: String },
}

/// A content entry failed its collection's schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContentValidationError {
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("{collection}: invalid frontmatter: {message}")]
    Frontmatter { collection: String, message: String },

    #[error("{collection}: entry does not match its record type: {message}")]
    Decode { collection: String, message: String },

    #[error("{}", describe_issues(.collection, .issues))]
    Invalid {
        collection: String,
        issues: Vec<FieldIssue>,
    },
}

impl ContentValidationError {
    /// Field issues, empty for errors that are not about individual fields.
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            Self::Invalid { issues, .. } => issues,
            _ => &[],
        }
    }
}

fn describe_issues(collection: &str, issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{collection}: {issue}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: String,
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// What was wrong with a field.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// A required field was absent.
    Missing,

    /// The YAML value had the wrong shape.
    TypeMismatch {
        expected: FieldType,
        found: &'static str,
    },

    /// A string that does not parse as a date.
    InvalidDate(String),

    /// A required text field that is blank.
    EmptyText,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("missing required field"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::InvalidDate(value) => write!(f, "expected date, found {value:?}"),
            Self::EmptyText => f.write_str("must not be empty"),
        }
    }
}
