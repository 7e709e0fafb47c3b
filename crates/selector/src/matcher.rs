//! Matching a resource against filter criteria
//!
//! Matching is total: every resource/filter pair yields a definite answer.
//! Criteria present in a [`TypeFilter`] are combined with AND; a criterion
//! that is absent counts as satisfied.

use crate::spec::{FilterSpec, TagPredicate, TypeFilter};
use crate::types::Resource;

/// Check if a resource satisfies the criteria for its type
///
/// The caller is responsible for picking the filter that belongs to the
/// resource's type; see [`FilterSpec::matches`] for the lookup.
pub fn matches(resource: &Resource, filter: &TypeFilter) -> bool {
    matches_ids(resource, filter) && matches_tags(resource, &filter.tags)
}

fn matches_ids(resource: &Resource, filter: &TypeFilter) -> bool {
    !filter.has_id_criterion() || filter.ids.contains(&resource.id)
}

fn matches_tags(resource: &Resource, predicates: &[TagPredicate]) -> bool {
    if predicates.is_empty() {
        return true;
    }

    // No extracted tags can never satisfy a tag criterion
    let Some(tags) = resource.tags.as_ref() else {
        return false;
    };

    predicates.iter().all(|predicate| {
        tags.get(&predicate.key)
            .is_some_and(|actual| predicate.value.accepts(actual))
    })
}

impl FilterSpec {
    /// Check if a resource is selected by this spec
    ///
    /// Resource types without an entry are never selected.
    pub fn matches(&self, resource: &Resource) -> bool {
        self.get(&resource.resource_type)
            .is_some_and(|filter| matches(resource, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tags;

    fn resource(resource_type: &str, id: &str, tags: Option<&[(&str, &str)]>) -> Resource {
        let mut r = Resource::new(resource_type, id);
        r.tags = tags.map(|pairs| {
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<Tags>()
        });
        r
    }

    #[test]
    fn test_unconstrained_matches_everything_of_type() {
        let filter = TypeFilter::any();
        assert!(matches(&resource("ec2", "i-1", None), &filter));
        assert!(matches(&resource("ec2", "i-2", Some(&[])), &filter));
        assert!(matches(&resource("ec2", "i-3", Some(&[("env", "dev")])), &filter));
    }

    #[test]
    fn test_type_absent_from_spec_never_matches() {
        let spec = FilterSpec::new().with_type("ec2", TypeFilter::any());
        assert!(spec.matches(&resource("ec2", "i-1", None)));
        assert!(!spec.matches(&resource("s3", "bucket", None)));
        assert!(!FilterSpec::new().matches(&resource("ec2", "i-1", None)));
    }

    #[test]
    fn test_id_criterion_exact_membership() {
        let filter = TypeFilter::any().with_ids(["i-1", "i-22"]);
        assert!(matches(&resource("ec2", "i-1", None), &filter));
        assert!(matches(&resource("ec2", "i-22", None), &filter));
        assert!(!matches(&resource("ec2", "i-2", None), &filter));
        assert!(!matches(&resource("ec2", "i-10", None), &filter));
        assert!(!matches(&resource("ec2", "I-1", None), &filter));
        assert!(!matches(&resource("ec2", " i-1", None), &filter));
    }

    #[test]
    fn test_literal_tag_predicate() {
        let filter = TypeFilter::any().with_tag("env", "prod");
        assert!(matches(&resource("ec2", "i-1", Some(&[("env", "prod")])), &filter));
        assert!(!matches(&resource("ec2", "i-1", Some(&[("env", "dev")])), &filter));
        assert!(!matches(&resource("ec2", "i-1", Some(&[("env", "Prod")])), &filter));
        assert!(!matches(&resource("ec2", "i-1", Some(&[("env", "prod ")])), &filter));
        assert!(!matches(&resource("ec2", "i-1", Some(&[("Env", "prod")])), &filter));
        assert!(!matches(&resource("ec2", "i-1", Some(&[])), &filter));
    }

    #[test]
    fn test_wildcard_tag_predicate() {
        let filter = TypeFilter::any().with_tag_key("owner");
        assert!(matches(&resource("ec2", "i-1", Some(&[("owner", "alice")])), &filter));
        assert!(matches(&resource("ec2", "i-1", Some(&[("owner", "")])), &filter));
        assert!(!matches(&resource("ec2", "i-1", Some(&[("team", "core")])), &filter));
    }

    #[test]
    fn test_all_tag_predicates_must_hold() {
        let filter = TypeFilter::any().with_tag("env", "prod").with_tag_key("owner");
        assert!(matches(
            &resource("ec2", "i-1", Some(&[("env", "prod"), ("owner", "bob")])),
            &filter
        ));
        assert!(!matches(&resource("ec2", "i-1", Some(&[("env", "prod")])), &filter));
        assert!(!matches(&resource("ec2", "i-1", Some(&[("owner", "bob")])), &filter));
    }

    #[test]
    fn test_missing_tags_never_satisfy_tag_criterion() {
        let filter = TypeFilter::any().with_tag_key("owner");
        assert!(!matches(&resource("ec2", "i-1", None), &filter));
    }

    #[test]
    fn test_missing_tags_still_match_by_id() {
        let filter = TypeFilter::any().with_ids(["i-1"]);
        assert!(matches(&resource("ec2", "i-1", None), &filter));
    }

    #[test]
    fn test_ids_and_tags_combined_with_and() {
        let filter = TypeFilter::any().with_ids(["i-1"]).with_tag("env", "prod");
        assert!(matches(&resource("ec2", "i-1", Some(&[("env", "prod")])), &filter));
        assert!(!matches(&resource("ec2", "i-1", Some(&[("env", "dev")])), &filter));
        assert!(!matches(&resource("ec2", "i-2", Some(&[("env", "prod")])), &filter));
        assert!(!matches(&resource("ec2", "i-1", None), &filter));
    }

    #[test]
    fn test_matching_is_repeatable() {
        let spec = FilterSpec::new().with_type("ec2", TypeFilter::any().with_tag("env", "prod"));
        let r = resource("ec2", "i-1", Some(&[("env", "prod")]));
        let before = r.clone();
        let first = spec.matches(&r);
        for _ in 0..10 {
            assert_eq!(spec.matches(&r), first);
        }
        assert_eq!(r, before);
    }
}
