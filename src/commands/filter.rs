//! `sweep filter` - print the inventory resources selected by a filter file

use anyhow::Result;
use colored::Colorize;
use selector::{ExtractionErrorKind, FilterOptions, FilterOutcome, LogSink, Resource};

use super::{ResourceRecord, print_json};
use crate::Context;
use crate::cli::{FilterArgs, OutputFormat};
use crate::config::FilterConfig;
use crate::{inventory, paths, ui};

pub fn run(ctx: &Context, args: FilterArgs) -> Result<()> {
    let outcome = select(&args)?;

    match args.format {
        OutputFormat::Json => print_json(&records(&outcome)),
        OutputFormat::Table => {
            print_table(ctx, &outcome, args.show_tags);
            Ok(())
        }
    }
}

/// Load the filter file and inventory named by `args`, then run the selection
fn select(args: &FilterArgs) -> Result<FilterOutcome> {
    let config_path = paths::resolve_filter_file(args.config.as_deref())?;
    let spec = FilterConfig::load(&config_path)?.to_spec();
    let resources = inventory::load(&args.inventory)?;

    let jobs = args.jobs.unwrap_or_else(default_jobs);
    log::info!(
        "Filtering {} resources against {} resource type(s) with {} job(s)",
        resources.len(),
        spec.len(),
        jobs
    );

    Ok(selector::apply_with(
        resources,
        &spec,
        &LogSink,
        &FilterOptions::with_jobs(jobs),
    ))
}

/// Output records for the matched resources, in match order
fn records(outcome: &FilterOutcome) -> Vec<ResourceRecord> {
    outcome
        .matched
        .iter()
        .map(ResourceRecord::from_resource)
        .collect()
}

/// Default parallelism: one job per available CPU
fn default_jobs() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

fn print_table(ctx: &Context, outcome: &FilterOutcome, show_tags: bool) {
    let matched = &outcome.matched;

    if !matched.is_empty() {
        if !ctx.quiet {
            ui::header("Matched Resources");
        }
        let type_width = ui::column_width(matched.iter().map(|r| r.resource_type.as_str()));
        let id_width = ui::column_width(matched.iter().map(|r| r.id.as_str()));
        for resource in matched {
            print_row(resource, type_width, id_width, show_tags);
        }
    }

    if ctx.quiet {
        return;
    }

    let summary = &outcome.summary;
    println!();
    if summary.matched == 0 {
        ui::info(&format!(
            "No resources matched ({} checked)",
            ui::count(summary.visited, "resource", "resources")
        ));
    } else {
        ui::success(&format!(
            "{} of {} matched",
            summary.matched.to_string().bold(),
            ui::count(summary.visited, "resource", "resources")
        ));
    }

    let failures = summary.total_failures();
    if failures > 0 {
        ui::warn(&format!(
            "{} without extractable tags (they can only match by id or type)",
            ui::count(failures, "resource", "resources")
        ));
        if ctx.verbose > 0 {
            for kind in ExtractionErrorKind::ALL {
                if let Some(n) = summary.extraction_failures.get(&kind) {
                    ui::kv(kind.label(), &n.to_string());
                }
            }
        } else {
            ui::dim("Run with -vv to see each resource");
        }
    }
}

fn print_row(resource: &Resource, type_width: usize, id_width: usize, show_tags: bool) {
    let region = resource.region.as_deref().unwrap_or("");
    let resource_type = format!("{:<type_width$}", resource.resource_type);
    println!(
        "  {}  {:<id_width$}  {}",
        resource_type.cyan(),
        resource.id,
        region.dimmed()
    );
    if show_tags {
        match &resource.tags {
            Some(tags) => ui::dim(&format!("    {}", ui::format_tags(tags))),
            None => ui::dim("    (tags unavailable)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::write_json;
    use std::fs;
    use std::path::PathBuf;

    const FILTER: &str = "aws_instance:\n  tags:\n    env: prod\naws_iam_user:\n  ids: [ci-bot]\n";

    const INVENTORY: &str = r#"[
  { "type": "aws_instance", "id": "i-1", "region": "eu-west-1",
    "state": { "tags": { "env": "prod" } } },
  { "type": "aws_instance", "id": "i-2", "state": { "tags": { "env": "dev" } } },
  { "type": "aws_instance", "id": "i-3" },
  { "type": "aws_iam_user", "id": "ci-bot" },
  { "type": "aws_vpc", "id": "vpc-1", "state": { "tags": { "env": "prod" } } },
  { "type": "aws_instance", "id": "i-4", "state": { "tags": { "env": "prod", "team": "core" } } }
]"#;

    fn write_fixtures(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
        let config = dir.path().join("filter.yml");
        let inventory = dir.path().join("inventory.json");
        fs::write(&config, FILTER).unwrap();
        fs::write(&inventory, INVENTORY).unwrap();
        (config, inventory)
    }

    fn args(config: PathBuf, inventory: PathBuf, jobs: usize) -> FilterArgs {
        FilterArgs {
            config: Some(config),
            inventory,
            format: OutputFormat::Json,
            jobs: Some(jobs),
            show_tags: true,
        }
    }

    #[test]
    fn test_select_keeps_inventory_order() {
        let dir = tempfile::tempdir().unwrap();
        let (config, inventory) = write_fixtures(&dir);

        for jobs in [1, 4] {
            let outcome = select(&args(config.clone(), inventory.clone(), jobs)).unwrap();
            let ids: Vec<&str> = outcome.matched.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(ids, ["i-1", "ci-bot", "i-4"], "jobs = {jobs}");

            assert_eq!(outcome.summary.visited, 6);
            assert_eq!(outcome.summary.matched, 3);
            assert_eq!(
                outcome
                    .summary
                    .extraction_failures
                    .get(&ExtractionErrorKind::NilState),
                Some(&2)
            );
        }
    }

    #[test]
    fn test_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let (config, inventory) = write_fixtures(&dir);

        let outcome = select(&args(config, inventory, 2)).unwrap();
        let mut out = Vec::new();
        write_json(&mut out, &records(&outcome)).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {
                    "type": "aws_instance",
                    "id": "i-1",
                    "region": "eu-west-1",
                    "tags": { "env": "prod" }
                },
                { "type": "aws_iam_user", "id": "ci-bot" },
                {
                    "type": "aws_instance",
                    "id": "i-4",
                    "tags": { "env": "prod", "team": "core" }
                }
            ])
        );
    }

    #[test]
    fn test_empty_selection_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let (config, _) = write_fixtures(&dir);
        let inventory = dir.path().join("empty.json");
        fs::write(&inventory, "[]").unwrap();

        let outcome = select(&args(config, inventory, 1)).unwrap();
        assert!(outcome.matched.is_empty());
        assert!(records(&outcome).is_empty());
    }

    #[test]
    fn test_run_missing_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let (config, _) = write_fixtures(&dir);
        let ctx = Context {
            verbose: 0,
            quiet: true,
        };

        let err = run(&ctx, args(config, dir.path().join("missing.json"), 1)).unwrap_err();
        assert!(err.to_string().contains("Could not read inventory file"));
    }

    #[test]
    fn test_default_jobs_positive() {
        assert!(default_jobs() >= 1);
    }
}
