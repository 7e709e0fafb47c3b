//! Tag extraction from provider state
//!
//! A resource's tags live in the `tags` attribute of its state, but nothing
//! guarantees the state exists, is a map, or stores tags as strings. Each
//! step is checked and reported with its own [`ExtractionError`] variant.

use crate::error::ExtractionError;
use crate::types::{Resource, Tags};
use crate::value::{StateValue, ValueKind};
use std::collections::BTreeMap;

/// Name of the state attribute holding tags
pub const TAGS_ATTRIBUTE: &str = "tags";

/// Extract the tag mapping from a resource's state
///
/// Only a map whose every value is a string is accepted; the resource
/// itself is left untouched.
pub fn extract_tags(resource: &Resource) -> Result<Tags, ExtractionError> {
    let object = resource
        .object
        .as_ref()
        .ok_or(ExtractionError::NilResource)?;

    let state = object.state.as_ref().ok_or(ExtractionError::NilState)?;

    if !state.can_iterate_elements() {
        return Err(ExtractionError::NotIterable {
            found: state.type_name(),
        });
    }

    let tags = state
        .attribute(TAGS_ATTRIBUTE)
        .ok_or(ExtractionError::TagsAttributeMissing)?;

    string_tags(tags).ok_or_else(|| ExtractionError::UnsupportedTagType {
        found: tags.type_name(),
    })
}

/// Coerce a map whose elements are all strings
fn string_tags(tags: &StateValue) -> Option<Tags> {
    if !tags.can_iterate_elements() {
        return None;
    }
    match tags.element_kind() {
        Some(ValueKind::String) => tags.as_string_map(),
        // An empty map has no element kind
        None if tags.as_value_map().is_some_and(BTreeMap::is_empty) => Some(Tags::new()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_tags(tags: StateValue) -> Resource {
        Resource::new("aws_instance", "i-1").with_state(StateValue::map([
            ("id", StateValue::from("i-1")),
            ("tags", tags),
        ]))
    }

    #[test]
    fn test_extract_string_map() {
        let r = with_tags(StateValue::string_map([("env", "prod"), ("team", "core")]));
        let tags = extract_tags(&r).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("env").map(String::as_str), Some("prod"));
        assert_eq!(tags.get("team").map(String::as_str), Some("core"));
    }

    #[test]
    fn test_extract_empty_map() {
        let r = with_tags(StateValue::Map(BTreeMap::new()));
        assert!(extract_tags(&r).unwrap().is_empty());
    }

    #[test]
    fn test_does_not_mutate_resource() {
        let r = with_tags(StateValue::string_map([("env", "prod")]));
        let before = r.clone();
        let _ = extract_tags(&r);
        assert_eq!(r, before);
        assert!(r.tags.is_none());
    }

    #[test]
    fn test_nil_resource() {
        let r = Resource::detached("aws_instance", "i-1");
        assert_eq!(extract_tags(&r), Err(ExtractionError::NilResource));
    }

    #[test]
    fn test_nil_state() {
        let r = Resource::new("aws_instance", "i-1");
        assert_eq!(extract_tags(&r), Err(ExtractionError::NilState));
    }

    #[test]
    fn test_not_iterable() {
        for (state, found) in [
            (StateValue::Unknown, "unknown"),
            (StateValue::Null, "null"),
            (StateValue::from("i-1"), "string"),
            (StateValue::Number(1.0), "number"),
            (StateValue::List(vec![StateValue::from("a")]), "list of string"),
        ] {
            let r = Resource::new("aws_instance", "i-1").with_state(state);
            assert_eq!(
                extract_tags(&r),
                Err(ExtractionError::NotIterable {
                    found: found.to_string()
                })
            );
        }
    }

    #[test]
    fn test_tags_attribute_missing() {
        let r = Resource::new("aws_instance", "i-1")
            .with_state(StateValue::map([("id", StateValue::from("i-1"))]));
        assert_eq!(extract_tags(&r), Err(ExtractionError::TagsAttributeMissing));
    }

    #[test]
    fn test_unsupported_tag_types() {
        for (tags, found) in [
            (StateValue::List(vec![StateValue::from("env")]), "list of string"),
            (StateValue::Number(42.0), "number"),
            (StateValue::Null, "null"),
            (StateValue::Unknown, "unknown"),
            (
                StateValue::map([("env", StateValue::Unknown)]),
                "map of unknown",
            ),
            (
                StateValue::map([("count", StateValue::Number(1.0))]),
                "map of number",
            ),
            (
                StateValue::map([
                    ("env", StateValue::from("prod")),
                    ("count", StateValue::Number(1.0)),
                ]),
                "map of dynamic",
            ),
        ] {
            assert_eq!(
                extract_tags(&with_tags(tags)),
                Err(ExtractionError::UnsupportedTagType {
                    found: found.to_string()
                })
            );
        }
    }

    #[test]
    fn test_values_are_not_trimmed_or_normalized() {
        let r = with_tags(StateValue::string_map([("Env", " Prod ")]));
        let tags = extract_tags(&r).unwrap();
        assert_eq!(tags.get("Env").map(String::as_str), Some(" Prod "));
        assert!(!tags.contains_key("env"));
    }
}
