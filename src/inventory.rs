//! Inventory snapshot loading
//!
//! Discovery runs elsewhere and writes a JSON array of records:
//!
//! ```json
//! [
//!   { "type": "aws_instance", "id": "i-1", "region": "eu-west-1",
//!     "state": { "id": "i-1", "tags": { "env": "prod" } } },
//!   { "type": "aws_iam_user", "id": "ci-bot" }
//! ]
//! ```
//!
//! A missing or null `state` means the resource was never refreshed.

use anyhow::{Context, Result, bail};
use selector::{Resource, StateValue};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Path meaning "read from standard input"
pub const STDIN_PATH: &str = "-";

/// One inventory record as written by discovery
#[derive(Debug, Deserialize)]
struct InventoryRecord {
    #[serde(rename = "type")]
    resource_type: String,
    id: String,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    state: Option<serde_json::Value>,
}

impl InventoryRecord {
    fn into_resource(self) -> Resource {
        let mut resource = Resource::new(self.resource_type, self.id);
        resource.region = self.region;
        match self.state {
            None | Some(serde_json::Value::Null) => resource,
            Some(state) => resource.with_state(StateValue::from(state)),
        }
    }
}

/// Load an inventory snapshot from a file, or stdin for `-`
pub fn load(path: &Path) -> Result<Vec<Resource>> {
    let content = if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Could not read inventory from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Could not read inventory file: {}", path.display()))?
    };

    let resources = parse(&content)
        .with_context(|| format!("Invalid inventory: {}", path.display()))?;
    log::debug!("Loaded {} resources from {}", resources.len(), path.display());
    Ok(resources)
}

/// Parse inventory JSON into resources, keeping record order
pub fn parse(content: &str) -> Result<Vec<Resource>> {
    let records: Vec<InventoryRecord> =
        serde_json::from_str(content).context("Inventory must be a JSON array of records")?;

    for (index, record) in records.iter().enumerate() {
        if record.resource_type.is_empty() {
            bail!("Record {} has an empty type", index);
        }
        if record.id.is_empty() {
            bail!("Record {} ({}) has an empty id", index, record.resource_type);
        }
    }

    Ok(records.into_iter().map(InventoryRecord::into_resource).collect())
}
