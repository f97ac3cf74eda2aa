//! Collection schema types.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaDefinitionError;

/// The closed set of field types a collection can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Date,
    Number,
    Boolean,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldType {
    /// Look up a type by name, case-insensitively. `string` and `bool` are aliases.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "text" | "string" => Some(Self::Text),
            "date" => Some(Self::Date),
            "number" => Some(Self::Number),
            "boolean" | "bool" => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// How entries of a collection are stored on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Documents with YAML frontmatter followed by a markdown body.
    #[default]
    Content,

    /// Plain YAML documents without a body.
    Data,
}

/// A single field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: Cow<'static, str>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name: Cow::Borrowed(name),
            field_type,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name: Cow::Borrowed(name),
            field_type,
            required: false,
        }
    }
}

/// An untyped field declaration, as read from a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub type_name: String,
    pub optional: bool,
}

/// The validation contract for one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSchema {
    kind: CollectionKind,
    fields: Vec<FieldSpec>,
}

impl CollectionSchema {
    /// Start building a schema of the given kind.
    pub fn builder(kind: CollectionKind) -> SchemaBuilder {
        SchemaBuilder {
            kind,
            fields: Vec::new(),
        }
    }

    /// Build a schema from a fixed field list.
    pub fn from_fields(
        kind: CollectionKind,
        fields: &[FieldSpec],
    ) -> Result<Self, SchemaDefinitionError> {
        let mut builder = Self::builder(kind);
        builder.fields.extend_from_slice(fields);
        builder.build()
    }

    /// Build a schema from untyped declarations.
    ///
    /// Type names outside the supported set are rejected.
    pub fn from_decls<I>(kind: CollectionKind, decls: I) -> Result<Self, SchemaDefinitionError>
    where
        I: IntoIterator<Item = FieldDecl>,
    {
        let mut builder = Self::builder(kind);
        for decl in decls {
            let Some(field_type) = FieldType::parse(&decl.type_name) else {
                return Err(SchemaDefinitionError::UnsupportedType {
                    field: decl.name,
                    type_name: decl.type_name,
                });
            };
            builder.fields.push(FieldSpec {
                name: Cow::Owned(decl.name),
                field_type,
                required: !decl.optional,
            });
        }
        builder.build()
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Incremental schema construction.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    kind: CollectionKind,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(FieldSpec {
            name: Cow::Owned(name.into()),
            field_type,
            required: true,
        });
        self
    }

    /// Add an optional field.
    pub fn optional(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(FieldSpec {
            name: Cow::Owned(name.into()),
            field_type,
            required: false,
        });
        self
    }

    /// Check field names and produce the schema.
    pub fn build(self) -> Result<CollectionSchema, SchemaDefinitionError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(SchemaDefinitionError::EmptyFieldName);
            }
            if !seen.insert(&*field.name) {
                return Err(SchemaDefinitionError::DuplicateField(field.name.to_string()));
            }
        }

        Ok(CollectionSchema {
            kind: self.kind,
            fields: self.fields,
        })
    }
}
