//! Core types for resource selection

use crate::value::StateValue;
use std::collections::BTreeMap;
use std::fmt;

/// Tag key to tag value, ordered by key
pub type Tags = BTreeMap<String, String>;

/// Provider-side object backing a discovered resource
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceObject {
    /// Provider-reported attributes; `None` if never refreshed
    pub state: Option<StateValue>,
}

impl ResourceObject {
    /// Create an object carrying the given state
    pub fn with_state(state: StateValue) -> Self {
        Self { state: Some(state) }
    }
}

/// One discovered cloud resource
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Resource kind (e.g., "aws_instance")
    pub resource_type: String,
    /// Provider-assigned identifier, unique within its type
    pub id: String,
    /// Region the resource lives in, for display only
    pub region: Option<String>,
    /// Backing provider object, absent if discovery could not attach one
    pub object: Option<ResourceObject>,
    /// Extracted tags
    ///
    /// `None` until extraction runs, and whenever it failed. Extraction
    /// never leaves a partial mapping here.
    pub tags: Option<Tags>,
}

impl Resource {
    /// Create a resource with an attached provider object but no state
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            region: None,
            object: Some(ResourceObject::default()),
            tags: None,
        }
    }

    /// Create a resource whose provider object is missing
    pub fn detached(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            object: None,
            ..Self::new(resource_type, id)
        }
    }

    /// Set the provider-reported state (builder pattern)
    pub fn with_state(mut self, state: StateValue) -> Self {
        self.object = Some(ResourceObject::with_state(state));
        self
    }

    /// Set the region (builder pattern)
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Get the provider-reported state, if both object and state exist
    pub fn state(&self) -> Option<&StateValue> {
        self.object.as_ref().and_then(|o| o.state.as_ref())
    }

    /// Look up an extracted tag value
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.as_ref()?.get(key).map(String::as_str)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.id)
    }
}

/// Options for a filtering pass
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Number of worker threads for per-resource work
    pub jobs: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self { jobs: 1 }
    }
}

impl FilterOptions {
    /// Options for a pass on `jobs` threads
    pub fn with_jobs(jobs: usize) -> Self {
        Self { jobs: jobs.max(1) }
    }
}

/// Counters collected during one filtering pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// Resources visited
    pub visited: usize,
    /// Resources that matched
    pub matched: usize,
    /// Resources whose tags could not be extracted, by reason
    pub extraction_failures: BTreeMap<crate::error::ExtractionErrorKind, usize>,
}

impl FilterSummary {
    /// Total number of extraction failures
    pub fn total_failures(&self) -> usize {
        self.extraction_failures.values().sum()
    }

    /// Resources visited but not selected
    pub fn unmatched(&self) -> usize {
        self.visited - self.matched
    }
}

/// Result of a filtering pass
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Matched resources, in original relative order
    pub matched: Vec<Resource>,
    /// Pass statistics
    pub summary: FilterSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resource_has_object_without_state() {
        let r = Resource::new("aws_instance", "i-1");
        assert!(r.object.is_some());
        assert!(r.state().is_none());
        assert!(r.tags.is_none());
        assert_eq!(r.to_string(), "aws_instance/i-1");
    }

    #[test]
    fn test_detached_resource() {
        let r = Resource::detached("aws_instance", "i-1");
        assert!(r.object.is_none());
        assert!(r.state().is_none());
    }

    #[test]
    fn test_with_state_and_region() {
        let r = Resource::new("aws_vpc", "vpc-1")
            .with_region("eu-west-1")
            .with_state(StateValue::map([("id", StateValue::from("vpc-1"))]));
        assert_eq!(r.region.as_deref(), Some("eu-west-1"));
        assert!(r.state().is_some_and(StateValue::can_iterate_elements));
    }

    #[test]
    fn test_tag_lookup() {
        let mut r = Resource::new("aws_vpc", "vpc-1");
        assert_eq!(r.tag("env"), None);
        r.tags = Some(Tags::from([("env".to_string(), "prod".to_string())]));
        assert_eq!(r.tag("env"), Some("prod"));
        assert_eq!(r.tag("team"), None);
    }

    #[test]
    fn test_filter_options_jobs_floor() {
        assert_eq!(FilterOptions::default().jobs, 1);
        assert_eq!(FilterOptions::with_jobs(0).jobs, 1);
        assert_eq!(FilterOptions::with_jobs(8).jobs, 8);
    }

    #[test]
    fn test_summary_totals() {
        let mut summary = FilterSummary {
            visited: 5,
            matched: 2,
            ..Default::default()
        };
        summary
            .extraction_failures
            .insert(crate::error::ExtractionErrorKind::NilState, 2);
        summary
            .extraction_failures
            .insert(crate::error::ExtractionErrorKind::NotIterable, 1);
        assert_eq!(summary.total_failures(), 3);
        assert_eq!(summary.unmatched(), 3);
    }
}
