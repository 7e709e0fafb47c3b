//! Filter specification
//!
//! A [`FilterSpec`] is built once from configuration before filtering and is
//! only read afterwards. It holds one [`TypeFilter`] per resource type of
//! interest; resource types without an entry are never selected.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Expected value of a tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagValue {
    /// Any value, the key only has to be present
    Any,
    /// This exact value (case-sensitive, no trimming)
    Exact(String),
}

impl TagValue {
    /// Check if an actual tag value satisfies this expectation
    pub fn accepts(&self, actual: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected == actual,
        }
    }
}

/// A single key/value constraint on a resource's tags
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagPredicate {
    pub key: String,
    pub value: TagValue,
}

impl TagPredicate {
    /// Predicate requiring `key` to carry exactly `value`
    pub fn exact(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: TagValue::Exact(value.into()),
        }
    }

    /// Predicate requiring `key` to be present with any value
    pub fn any(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: TagValue::Any,
        }
    }
}

impl fmt::Display for TagPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TagValue::Any => write!(f, "{}=*", self.key),
            TagValue::Exact(value) => write!(f, "{}={}", self.key, value),
        }
    }
}

/// Criteria for one resource type
///
/// An empty identifier set or an empty predicate list means that criterion
/// is absent. With both absent every resource of the type is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    /// Identifiers to select; empty means no identifier criterion
    pub ids: BTreeSet<String>,
    /// Tag constraints, all of which must hold; empty means no tag criterion
    pub tags: Vec<TagPredicate>,
}

impl TypeFilter {
    /// Filter selecting every resource of the type
    pub fn any() -> Self {
        Self::default()
    }

    /// Add identifiers to the allow-list (builder pattern)
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Require a tag with an exact value (builder pattern)
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(TagPredicate::exact(key, value));
        self
    }

    /// Require a tag key with any value (builder pattern)
    pub fn with_tag_key(mut self, key: impl Into<String>) -> Self {
        self.tags.push(TagPredicate::any(key));
        self
    }

    /// Whether an identifier criterion is present
    pub fn has_id_criterion(&self) -> bool {
        !self.ids.is_empty()
    }

    /// Whether a tag criterion is present
    pub fn has_tag_criterion(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Whether this filter selects every resource of its type
    pub fn is_unconstrained(&self) -> bool {
        !self.has_id_criterion() && !self.has_tag_criterion()
    }

    /// Human-readable summary of the criteria
    pub fn description(&self) -> String {
        let mut parts = Vec::new();
        if self.has_id_criterion() {
            let ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
            parts.push(format!("id in [{}]", ids.join(", ")));
        }
        if self.has_tag_criterion() {
            let tags: Vec<String> = self.tags.iter().map(ToString::to_string).collect();
            parts.push(format!("tags [{}]", tags.join(", ")));
        }
        if parts.is_empty() {
            "all".to_string()
        } else {
            parts.join(" AND ")
        }
    }
}

/// Deletion criteria for every resource type of interest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    types: BTreeMap<String, TypeFilter>,
}

impl FilterSpec {
    /// Create an empty spec, which selects nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the filter for a resource type (builder pattern)
    pub fn with_type(mut self, resource_type: impl Into<String>, filter: TypeFilter) -> Self {
        self.insert(resource_type, filter);
        self
    }

    /// Add or replace the filter for a resource type
    pub fn insert(&mut self, resource_type: impl Into<String>, filter: TypeFilter) {
        self.types.insert(resource_type.into(), filter);
    }

    /// Get the filter for a resource type
    pub fn get(&self, resource_type: &str) -> Option<&TypeFilter> {
        self.types.get(resource_type)
    }

    /// Resource types named in the spec, sorted
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Iterate over every (type, filter) entry, sorted by type
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeFilter)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of resource types in the spec
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the spec names no resource type
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<(String, TypeFilter)> for FilterSpec {
    fn from_iter<I: IntoIterator<Item = (String, TypeFilter)>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}
