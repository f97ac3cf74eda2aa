//! Statically typed collection records.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ContentValidationError, SchemaDefinitionError};
use crate::registry::CollectionRegistry;
use crate::schema::{CollectionKind, FieldSpec, FieldType};

/// A record type bound to a named collection.
///
/// `FIELDS` must describe the same shape the `Deserialize` impl expects,
/// using the serialized field names.
pub trait CollectionEntry: DeserializeOwned {
    const NAME: &'static str;
    const KIND: CollectionKind;
    const FIELDS: &'static [FieldSpec];

    /// Validate `source` against this collection in `registry` and decode it.
    fn load(registry: &CollectionRegistry, source: &str) -> Result<Self, ContentValidationError> {
        let entry = registry.validate_source(Self::NAME, source)?;
        entry
            .to_typed()
            .map_err(|e| ContentValidationError::Decode {
                collection: Self::NAME.to_string(),
                message: e.to_string(),
            })
    }
}

/// Frontmatter of a blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,

    #[serde(default)]
    pub pub_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub description: Option<String>,
}

impl CollectionEntry for BlogPost {
    const NAME: &'static str = "blog";
    const KIND: CollectionKind = CollectionKind::Content;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("title", FieldType::Text),
        FieldSpec::optional("pubDate", FieldType::Date),
        FieldSpec::optional("description", FieldType::Text),
    ];
}

/// The site's collections: a fresh registry holding `blog`.
pub fn collections() -> Result<CollectionRegistry, SchemaDefinitionError> {
    let mut registry = CollectionRegistry::new();
    registry.define_entry::<BlogPost>()?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FieldIssue, IssueKind};
    use crate::validate::FieldValue;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn blog() -> CollectionRegistry {
        collections().unwrap()
    }

    #[test]
    fn registry_contains_blog() {
        let registry = blog();
        let schema = registry.get("blog").unwrap();

        assert_eq!(registry.names(), vec!["blog"]);
        assert_eq!(schema.kind(), CollectionKind::Content);
        assert_eq!(schema.fields(), BlogPost::FIELDS);
    }

    #[test]
    fn full_entry_validates() {
        let source = "---\ntitle: Hello\npubDate: 2024-01-01\ndescription: intro\n---\nBody text\n";

        let entry = blog().validate_source("blog", source).unwrap();

        assert_eq!(entry.get("title"), Some(&FieldValue::Text("Hello".to_string())));
        assert_eq!(
            entry.get("pubDate").and_then(FieldValue::as_date),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            entry.get("description").and_then(FieldValue::as_text),
            Some("intro")
        );
        assert_eq!(entry.body, "Body text\n");
    }

    #[test]
    fn missing_title_is_reported() {
        let source = "---\npubDate: 2024-01-01\n---\n";

        let err = blog().validate_source("blog", source).unwrap_err();

        assert_eq!(err.issues(), &[FieldIssue::new("title", IssueKind::Missing)]);
        assert_eq!(err.to_string(), "blog: title: missing required field");
    }

    #[test]
    fn bad_date_is_reported() {
        let source = "---\ntitle: Hello\npubDate: not-a-date\n---\n";

        let err = blog().validate_source("blog", source).unwrap_err();

        assert_eq!(
            err.issues(),
            &[FieldIssue::new(
                "pubDate",
                IssueKind::InvalidDate("not-a-date".to_string())
            )]
        );
    }

    #[test]
    fn optional_fields_may_be_omitted() {
        let source = "---\ntitle: Hello\n---\n";

        let entry = blog().validate_source("blog", source).unwrap();

        assert_eq!(entry.data.len(), 1);
    }

    #[test]
    fn title_must_be_text() {
        let source = "---\ntitle: 42\n---\n";

        let err = blog().validate_source("blog", source).unwrap_err();

        assert_eq!(
            err.issues(),
            &[FieldIssue::new(
                "title",
                IssueKind::TypeMismatch {
                    expected: FieldType::Text,
                    found: "number",
                }
            )]
        );
    }

    #[test]
    fn description_must_be_text() {
        let source = "---\ntitle: Hello\ndescription: [a, b]\n---\n";

        let err = blog().validate_source("blog", source).unwrap_err();

        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].field, "description");
    }

    #[test]
    fn loads_typed_post() {
        let source = "---\ntitle: Hello\npubDate: 2024-01-01T09:00:00Z\nauthor: someone\n---\n# Hello\n";

        let post = BlogPost::load(&blog(), source).unwrap();

        assert_eq!(
            post,
            BlogPost {
                title: "Hello".to_string(),
                pub_date: Some(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()),
                description: None,
            }
        );
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Note {
        title: String,
        rating: Option<u32>,
    }

    impl CollectionEntry for Note {
        const NAME: &'static str = "notes";
        const KIND: CollectionKind = CollectionKind::Data;
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::required("title", FieldType::Text),
            FieldSpec::optional("rating", FieldType::Number),
        ];
    }

    #[test]
    fn loads_integer_number_field() {
        let mut registry = blog();
        registry.define_entry::<Note>().unwrap();

        let note = Note::load(&registry, "title: Reading list\nrating: 3\n").unwrap();

        assert_eq!(
            note,
            Note {
                title: "Reading list".to_string(),
                rating: Some(3),
            }
        );
    }

    #[test]
    fn post_with_byte_order_mark_validates() {
        let source = "\u{feff}---\ntitle: Hello\n---\nBody\n";

        let post = BlogPost::load(&blog(), source).unwrap();

        assert_eq!(post.title, "Hello");
    }

    #[test]
    fn blog_is_defined_once() {
        let mut registry = blog();

        assert_eq!(
            registry.define_entry::<BlogPost>(),
            Err(SchemaDefinitionError::DuplicateCollection("blog".to_string()))
        );
    }
}
