//! Filtering engine - runs extraction and matching over a whole inventory

use crate::diagnostics::{Diagnostic, DiagnosticsSink, LogSink};
use crate::error::ExtractionErrorKind;
use crate::spec::FilterSpec;
use crate::tags::extract_tags;
use crate::types::{FilterOptions, FilterOutcome, FilterSummary, Resource};
use rayon::prelude::*;

/// Select the resources matching `spec`, in their original relative order
///
/// Extraction failures are logged at debug level and the affected resources
/// are matched as having no tags.
pub fn apply(resources: Vec<Resource>, spec: &FilterSpec) -> Vec<Resource> {
    apply_with(resources, spec, &LogSink, &FilterOptions::default()).matched
}

/// Select matching resources, reporting to `sink` and collecting statistics
///
/// # Arguments
/// * `resources` - The inventory, in discovery order
/// * `spec` - Criteria per resource type
/// * `sink` - Receives one diagnostic per resource whose tags could not be extracted
/// * `options` - Parallelism for the per-resource work
///
/// With `jobs > 1` every call builds its own thread pool and drops it on
/// return. Callers filtering many small batches should merge them into one
/// call or keep `jobs` at 1.
pub fn apply_with(
    resources: Vec<Resource>,
    spec: &FilterSpec,
    sink: &dyn DiagnosticsSink,
    options: &FilterOptions,
) -> FilterOutcome {
    let visited = resources.len();

    let evaluated = if options.jobs > 1 && visited > 1 {
        evaluate_parallel(resources, spec, sink, options.jobs)
    } else {
        evaluate_sequential(resources, spec, sink)
    };

    let mut summary = FilterSummary {
        visited,
        ..Default::default()
    };
    let mut matched = Vec::new();

    for evaluation in evaluated {
        if let Some(kind) = evaluation.failure {
            *summary.extraction_failures.entry(kind).or_default() += 1;
        }
        if evaluation.matched {
            matched.push(evaluation.resource);
        }
    }
    summary.matched = matched.len();

    log::debug!(
        "Filtered {} resources: {} matched, {} unmatched, {} without extractable tags",
        summary.visited,
        summary.matched,
        summary.unmatched(),
        summary.total_failures()
    );

    FilterOutcome { matched, summary }
}

/// Outcome for one resource, with tags attached if extraction succeeded
struct Evaluation {
    resource: Resource,
    matched: bool,
    failure: Option<ExtractionErrorKind>,
}

fn evaluate_sequential(
    resources: Vec<Resource>,
    spec: &FilterSpec,
    sink: &dyn DiagnosticsSink,
) -> Vec<Evaluation> {
    resources
        .into_iter()
        .map(|resource| evaluate(resource, spec, sink))
        .collect()
}

/// Evaluate resources on a pool built for this call only
///
/// `collect` on an indexed parallel iterator keeps input order, so the
/// caller sees the same sequence as the sequential pass.
fn evaluate_parallel(
    resources: Vec<Resource>,
    spec: &FilterSpec,
    sink: &dyn DiagnosticsSink,
    jobs: usize,
) -> Vec<Evaluation> {
    let pool = match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool,
        Err(e) => {
            log::warn!("Failed to create thread pool ({e}), filtering sequentially");
            return evaluate_sequential(resources, spec, sink);
        }
    };

    pool.install(|| {
        resources
            .into_par_iter()
            .map(|resource| evaluate(resource, spec, sink))
            .collect()
    })
}

/// Extract tags, then match a single resource
fn evaluate(mut resource: Resource, spec: &FilterSpec, sink: &dyn DiagnosticsSink) -> Evaluation {
    let failure = match extract_tags(&resource) {
        Ok(tags) => {
            resource.tags = Some(tags);
            None
        }
        Err(error) => {
            let kind = error.kind();
            sink.record(Diagnostic::extraction_failed(
                resource.resource_type.clone(),
                resource.id.clone(),
                error,
            ));
            resource.tags = None;
            Some(kind)
        }
    };

    let matched = spec.matches(&resource);

    Evaluation {
        resource,
        matched,
        failure,
    }
}
