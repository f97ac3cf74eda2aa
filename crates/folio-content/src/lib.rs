//! Content collection schemas and frontmatter validation.
//!
//! This crate declares named content collections, each with a typed field
//! schema, and validates the frontmatter of content entries against them.
//! The built-in `blog` collection is available through [`collections`].

pub mod entry;
pub mod error;
pub mod frontmatter;
pub mod registry;
pub mod schema;
pub mod validate;

pub use entry::{collections, BlogPost, CollectionEntry};
pub use error::{ContentValidationError, FieldIssue, IssueKind, SchemaDefinitionError};
pub use frontmatter::{parse_data, split_frontmatter, FrontmatterError};
pub use registry::{CollectionRegistry, DuplicatePolicy};
pub use schema::{CollectionKind, CollectionSchema, FieldDecl, FieldSpec, FieldType, SchemaBuilder};
pub use validate::{parse_date, FieldValue, ValidatedEntry};
