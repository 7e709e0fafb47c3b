use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::Context;
use crate::config::FilterConfig;
use crate::{paths, ui};

pub fn run(ctx: &Context, config: Option<&Path>) -> Result<()> {
    let path = paths::resolve_filter_file(config)?;
    let spec = FilterConfig::load(&path)?.to_spec();

    if ctx.quiet {
        return Ok(());
    }

    ui::header("Filter");
    ui::kv("file", &path.display().to_string());
    ui::kv("types", &spec.len().to_string());

    if spec.is_empty() {
        println!();
        ui::warn("Filter selects nothing: no resource types are listed");
        return Ok(());
    }

    ui::section("Criteria");
    let width = ui::column_width(spec.types());
    for (resource_type, filter) in spec.iter() {
        let name = format!("{resource_type:<width$}");
        println!("  {}  {}", name.cyan(), filter.description());
    }

    println!();
    ui::success("Filter file is valid");
    Ok(())
}
