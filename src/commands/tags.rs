//! `sweep tags` - preview tag extraction for every resource in an inventory

use anyhow::Result;
use colored::Colorize;
use selector::{ExtractionError, Resource, Tags, extract_tags};

use super::{ResourceRecord, print_json};
use crate::Context;
use crate::cli::{OutputFormat, TagsArgs};
use crate::{inventory, ui};

/// A resource with the outcome of extracting its tags
type Preview = (Resource, Result<Tags, ExtractionError>);

pub fn run(ctx: &Context, args: TagsArgs) -> Result<()> {
    let previews = preview(&args)?;

    match args.format {
        OutputFormat::Json => print_json(&records(&previews)),
        OutputFormat::Table => {
            print_table(ctx, &previews);
            Ok(())
        }
    }
}

/// Load the inventory and extract tags from each resource of the requested type
fn preview(args: &TagsArgs) -> Result<Vec<Preview>> {
    let previews = inventory::load(&args.inventory)?
        .into_iter()
        .filter(|r| {
            args.resource_type
                .as_deref()
                .is_none_or(|t| r.resource_type == t)
        })
        .map(|r| {
            let tags = extract_tags(&r);
            (r, tags)
        })
        .collect();
    Ok(previews)
}

fn records(previews: &[Preview]) -> Vec<ResourceRecord> {
    previews
        .iter()
        .map(|(r, tags)| preview_record(r, tags))
        .collect()
}

/// Output record carrying either the extracted tags or the failure reason
fn preview_record(resource: &Resource, tags: &Result<Tags, ExtractionError>) -> ResourceRecord {
    let mut record = ResourceRecord::from_resource(resource);
    match tags {
        Ok(tags) => record.tags = Some(tags.clone()),
        Err(e) => record.error = Some(e.to_string()),
    }
    record
}

fn print_table(ctx: &Context, previews: &[Preview]) {
    if !ctx.quiet {
        ui::header("Resource Tags");
    }

    let names: Vec<String> = previews.iter().map(|(r, _)| r.to_string()).collect();
    let width = ui::column_width(names.iter().map(String::as_str));

    for (name, (_, tags)) in names.iter().zip(previews) {
        let name = format!("{name:<width$}");
        match tags {
            Ok(tags) => println!("  {}  {}", name, ui::format_tags(tags)),
            Err(e) => println!("  {}  {}", name, e.to_string().red()),
        }
    }

    if ctx.quiet {
        return;
    }

    let failed = previews.iter().filter(|(_, tags)| tags.is_err()).count();
    println!();
    ui::info(&format!(
        "{} with extractable tags, {} without",
        ui::count(previews.len() - failed, "resource", "resources"),
        failed
    ));
}
