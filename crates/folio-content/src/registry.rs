//! Collection registry.
//!
//! Maps collection names to their schemas and validates entries against
//! them. A registry is an ordinary value: build one, then hand it to
//! whatever reads content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::entry::CollectionEntry;
use crate::error::{ContentValidationError, SchemaDefinitionError};
use crate::frontmatter::{parse_data, split_frontmatter};
use crate::schema::{CollectionKind, CollectionSchema};
use crate::validate::{check_fields, ValidatedEntry};

/// What `define` does when a name is already registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Any redefinition is an error.
    #[default]
    Reject,

    /// Redefining with an identical schema is a no-op; anything else is an error.
    AllowIdentical,

    /// The later definition wins.
    Replace,
}

/// A registry of collection schemas.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CollectionRegistry {
    /// Schemas by collection name
    collections: BTreeMap<String, CollectionSchema>,

    #[serde(skip)]
    policy: DuplicatePolicy,
}

impl CollectionRegistry {
    /// Create a new empty registry that rejects redefinitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty registry with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            collections: BTreeMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register `schema` under `name`.
    pub fn define(
        &mut self,
        name: &str,
        schema: CollectionSchema,
    ) -> Result<&CollectionSchema, SchemaDefinitionError> {
        if name.trim().is_empty() {
            return Err(SchemaDefinitionError::EmptyName);
        }

        if let Some(existing) = self.collections.get(name) {
            match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(SchemaDefinitionError::DuplicateCollection(name.to_string()));
                }
                DuplicatePolicy::AllowIdentical if *existing != schema => {
                    return Err(SchemaDefinitionError::DuplicateCollection(name.to_string()));
                }
                DuplicatePolicy::AllowIdentical => {
                    tracing::debug!("Collection {} redefined with identical schema", name);
                }
                DuplicatePolicy::Replace => {
                    tracing::warn!("Replacing schema for collection {}", name);
                }
            }
        } else {
            tracing::debug!(
                "Defined collection {} with {} fields",
                name,
                schema.fields().len()
            );
        }

        self.collections.insert(name.to_string(), schema);
        Ok(&self.collections[name])
    }

    /// Register a statically typed collection.
    pub fn define_entry<T: CollectionEntry>(
        &mut self,
    ) -> Result<&CollectionSchema, SchemaDefinitionError> {
        let schema = CollectionSchema::from_fields(T::KIND, T::FIELDS)?;
        self.define(T::NAME, schema)
    }

    /// Look up a collection by name.
    pub fn get(&self, name: &str) -> Option<&CollectionSchema> {
        self.collections.get(name)
    }

    /// Check if a collection exists.
    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Get all registered collection names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.collections.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CollectionSchema)> {
        self.collections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Validate already-extracted entry data.
    pub fn validate(
        &self,
        collection: &str,
        data: &Mapping,
        body: &str,
    ) -> Result<ValidatedEntry, ContentValidationError> {
        let schema = self
            .get(collection)
            .ok_or_else(|| ContentValidationError::UnknownCollection(collection.to_string()))?;

        let data = check_fields(schema, data).map_err(|issues| {
            ContentValidationError::Invalid {
                collection: collection.to_string(),
                issues,
            }
        })?;

        Ok(ValidatedEntry {
            collection: collection.to_string(),
            data,
            body: body.to_string(),
        })
    }

    /// Validate a raw entry file.
    ///
    /// Content collections read the frontmatter block. A document without
    /// one has no fields. Data collections read the whole document.
    pub fn validate_source(
        &self,
        collection: &str,
        source: &str,
    ) -> Result<ValidatedEntry, ContentValidationError> {
        let schema = self
            .get(collection)
            .ok_or_else(|| ContentValidationError::UnknownCollection(collection.to_string()))?;

        let frontmatter_error = |e: crate::frontmatter::FrontmatterError| {
            ContentValidationError::Frontmatter {
                collection: collection.to_string(),
                message: e.to_string(),
            }
        };

        match schema.kind() {
            CollectionKind::Content => {
                let (data, body) = split_frontmatter(source).map_err(frontmatter_error)?;
                self.validate(collection, &data.unwrap_or_default(), body)
            }
            CollectionKind::Data => {
                let data = parse_data(source).map_err(frontmatter_error)?;
                self.validate(collection, &data, "")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FieldIssue, IssueKind};
    use crate::schema::FieldType;
    use pretty_assertions::assert_eq;

    fn notes() -> CollectionSchema {
        CollectionSchema::builder(CollectionKind::Data)
            .field("title", FieldType::Text)
            .optional("rating", FieldType::Number)
            .build()
            .unwrap()
    }

    fn notes_v2() -> CollectionSchema {
        CollectionSchema::builder(CollectionKind::Data)
            .field("title", FieldType::Text)
            .build()
            .unwrap()
    }

    #[test]
    fn defines_and_looks_up() {
        let mut registry = CollectionRegistry::new();
        registry.define("notes", notes()).unwrap();

        assert!(registry.contains("notes"));
        assert_eq!(registry.get("notes"), Some(&notes()));
        assert_eq!(registry.names(), vec!["notes"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rejects_empty_name() {
        let mut registry = CollectionRegistry::new();

        assert_eq!(
            registry.define(" ", notes()),
            Err(SchemaDefinitionError::EmptyName)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn reject_policy_refuses_any_redefinition() {
        let mut registry = CollectionRegistry::new();
        registry.define("notes", notes()).unwrap();

        assert_eq!(
            registry.define("notes", notes()),
            Err(SchemaDefinitionError::DuplicateCollection("notes".to_string()))
        );
    }

    #[test]
    fn allow_identical_policy_is_idempotent() {
        let mut once = CollectionRegistry::with_policy(DuplicatePolicy::AllowIdentical);
        once.define("notes", notes()).unwrap();

        let mut twice = CollectionRegistry::with_policy(DuplicatePolicy::AllowIdentical);
        twice.define("notes", notes()).unwrap();
        twice.define("notes", notes()).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn allow_identical_policy_refuses_different_shape() {
        let mut registry = CollectionRegistry::with_policy(DuplicatePolicy::AllowIdentical);
        registry.define("notes", notes()).unwrap();

        assert_eq!(
            registry.define("notes", notes_v2()),
            Err(SchemaDefinitionError::DuplicateCollection("notes".to_string()))
        );
        assert_eq!(registry.get("notes"), Some(&notes()));
    }

    #[test]
    fn replace_policy_overrides() {
        let mut registry = CollectionRegistry::with_policy(DuplicatePolicy::Replace);
        registry.define("notes", notes()).unwrap();
        registry.define("notes", notes_v2()).unwrap();

        assert_eq!(registry.get("notes"), Some(&notes_v2()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registries_are_independent() {
        let mut first = CollectionRegistry::new();
        let second = CollectionRegistry::new();
        first.define("notes", notes()).unwrap();

        assert!(first.contains("notes"));
        assert!(!second.contains("notes"));
    }

    #[test]
    fn unknown_collection_fails_validation() {
        let registry = CollectionRegistry::new();

        let result = registry.validate_source("notes", "title: x");

        assert_eq!(
            result,
            Err(ContentValidationError::UnknownCollection("notes".to_string()))
        );
    }

    #[test]
    fn validates_data_collection_source() {
        let mut registry = CollectionRegistry::new();
        registry.define("notes", notes()).unwrap();

        let entry = registry
            .validate_source("notes", "title: Reading list\nrating: 3\n")
            .unwrap();

        assert_eq!(entry.collection, "notes");
        assert_eq!(entry.get("rating").and_then(|v| v.as_number()), Some(3.0));
        assert_eq!(entry.body, "");
    }

    #[test]
    fn reports_frontmatter_errors_with_collection() {
        let mut registry = CollectionRegistry::new();
        registry.define("notes", notes()).unwrap();

        let err = registry.validate_source("notes", "- a\n- b\n").unwrap_err();

        assert!(matches!(err, ContentValidationError::Frontmatter { .. }));
        assert!(err.to_string().starts_with("notes: invalid frontmatter"));
    }

    #[test]
    fn content_without_frontmatter_has_no_fields() {
        let mut registry = CollectionRegistry::new();
        let schema = CollectionSchema::builder(CollectionKind::Content)
            .field("title", FieldType::Text)
            .build()
            .unwrap();
        registry.define("pages", schema).unwrap();

        let err = registry.validate_source("pages", "# Heading\n").unwrap_err();

        assert_eq!(err.issues(), &[FieldIssue::new("title", IssueKind::Missing)]);
    }
}
