//! # Selector
//!
//! Select cloud resources for deletion from a heterogeneous inventory.
//!
//! Resources arrive with provider-specific state that has no fixed schema.
//! This crate extracts tags from that state defensively and matches each
//! resource against per-type criteria, so a separate deletion stage only
//! ever sees the resources a user asked for.
//!
//! ## Core Concepts
//!
//! - **StateValue**: The dynamically-typed provider state tree
//! - **Resource**: One discovered cloud object (type, id, state, tags)
//! - **FilterSpec**: Criteria per resource type (identifiers, tag predicates)
//! - **Engine**: Extracts tags, matches, and keeps the selected resources in order
//!
//! ## Example
//!
//! ```
//! use selector::{apply, FilterSpec, Resource, StateValue, TypeFilter};
//!
//! let inventory = vec![
//!     Resource::new("aws_instance", "i-1").with_state(StateValue::map([
//!         ("tags", StateValue::string_map([("env", "prod")])),
//!     ])),
//!     Resource::new("aws_instance", "i-2").with_state(StateValue::map([
//!         ("tags", StateValue::string_map([("env", "dev")])),
//!     ])),
//!     // No state: tags cannot be extracted, so tag criteria never hold
//!     Resource::new("aws_instance", "i-3"),
//! ];
//!
//! let spec = FilterSpec::new()
//!     .with_type("aws_instance", TypeFilter::any().with_tag("env", "prod"));
//!
//! let matched = apply(inventory, &spec);
//! assert_eq!(matched.len(), 1);
//! assert_eq!(matched[0].id, "i-1");
//! ```
//!
//! ## Failure Handling
//!
//! Matching never fails. Tag extraction can, and when it does the engine
//! reports the resource to a [`DiagnosticsSink`] and treats it as having no
//! tags: it can still be selected by identifier, never by tag.

pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod spec;
pub mod tags;
pub mod types;
pub mod value;

// Re-export main types at crate root
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticsSink, LogSink, NoDiagnostics};
pub use engine::{apply, apply_with};
pub use error::{ExtractionError, ExtractionErrorKind};
pub use matcher::matches;
pub use spec::{FilterSpec, TagPredicate, TagValue, TypeFilter};
pub use tags::{TAGS_ATTRIBUTE, extract_tags};
pub use types::{FilterOptions, FilterOutcome, FilterSummary, Resource, ResourceObject, Tags};
pub use value::{StateValue, ValueKind};
