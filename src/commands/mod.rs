pub mod filter;
pub mod tags;
pub mod validate;

use anyhow::Result;
use selector::{Resource, Tags};
use serde::Serialize;
use std::io::{self, Write};

/// JSON shape of one resource in command output
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ResourceRecord {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResourceRecord {
    /// Record for a resource, with whatever tags are attached to it
    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            resource_type: resource.resource_type.clone(),
            id: resource.id.clone(),
            region: resource.region.clone(),
            tags: resource.tags.clone(),
            error: None,
        }
    }
}

/// Print records as a pretty JSON array
pub fn print_json(records: &[ResourceRecord]) -> Result<()> {
    write_json(&mut io::stdout().lock(), records)
}

/// Write records as a pretty JSON array followed by a newline
pub fn write_json(out: &mut impl Write, records: &[ResourceRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, records)?;
    writeln!(out)?;
    Ok(())
}
