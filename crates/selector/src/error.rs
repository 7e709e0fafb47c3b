//! Error types for tag extraction.
//!
//! Matching never fails, so extraction is the only fallible step in a
//! filtering pass. Every variant names exactly which defensive check the
//! resource's state did not pass.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fieldless classification of an [`ExtractionError`], used for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExtractionErrorKind {
    /// The provider object backing the resource is absent
    NilResource,
    /// The resource reports no state
    NilState,
    /// The state cannot be decomposed into attributes
    NotIterable,
    /// The state has no `tags` attribute
    TagsAttributeMissing,
    /// The `tags` attribute is not a string-to-string map
    UnsupportedTagType,
}

impl ExtractionErrorKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::NilResource,
        Self::NilState,
        Self::NotIterable,
        Self::TagsAttributeMissing,
        Self::UnsupportedTagType,
    ];

    /// Short, stable label for summaries and JSON output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NilResource => "nil_resource",
            Self::NilState => "nil_state",
            Self::NotIterable => "not_iterable",
            Self::TagsAttributeMissing => "tags_attribute_missing",
            Self::UnsupportedTagType => "unsupported_tag_type",
        }
    }
}

/// Reasons tags could not be extracted from a resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The provider object backing the resource is absent
    #[error("resource is nil")]
    NilResource,

    /// The resource reports no state (e.g., not yet refreshed)
    #[error("state is nil")]
    NilState,

    /// The state is a scalar, a list, null or a placeholder
    #[error("cannot iterate state of type {found}")]
    NotIterable {
        /// Friendly type name of the state value
        found: String,
    },

    /// The state is a map without a `tags` key
    #[error("attribute not found: tags")]
    TagsAttributeMissing,

    /// `tags` exists but is not a map of string to string
    #[error("unsupported tags type: {found}")]
    UnsupportedTagType {
        /// Friendly type name of the `tags` attribute
        found: String,
    },
}

impl ExtractionError {
    /// Get the fieldless kind of this error.
    pub fn kind(&self) -> ExtractionErrorKind {
        match self {
            Self::NilResource => ExtractionErrorKind::NilResource,
            Self::NilState => ExtractionErrorKind::NilState,
            Self::NotIterable { .. } => ExtractionErrorKind::NotIterable,
            Self::TagsAttributeMissing => ExtractionErrorKind::TagsAttributeMissing,
            Self::UnsupportedTagType { .. } => ExtractionErrorKind::UnsupportedTagType,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            ExtractionError::NilResource.kind(),
            ExtractionErrorKind::NilResource
        );
        assert_eq!(
            ExtractionError::NotIterable {
                found: "string".into()
            }
            .kind(),
            ExtractionErrorKind::NotIterable
        );
        assert_eq!(
            ExtractionError::UnsupportedTagType {
                found: "list of string".into()
            }
            .kind(),
            ExtractionErrorKind::UnsupportedTagType
        );
    }

    #[test]
    fn test_display_includes_found_type() {
        let err = ExtractionError::UnsupportedTagType {
            found: "map of number".into(),
        };
        assert_eq!(err.to_string(), "unsupported tags type: map of number");
        assert_eq!(ExtractionError::NilState.to_string(), "state is nil");
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = ExtractionErrorKind::ALL.iter().map(|k| k.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), ExtractionErrorKind::ALL.len());
    }
}
