//! Filter configuration loading
//!
//! A filter file maps resource types to the criteria for that type:
//!
//! ```yaml
//! aws_instance:
//!   ids: [i-1, i-2]
//!   tags:
//!     env: prod
//!     owner: ~        # any value, the key just has to be present
//! aws_iam_user:       # every resource of this type
//! aws_vpc:
//!   tag_keys: [team]  # same as `team: ~`, usable from TOML
//! ```
//!
//! YAML, JSON and TOML are accepted, chosen by file extension.

use anyhow::{Context, Result, bail};
use selector::{FilterSpec, TypeFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

// ============================================================================
// Format Detection
// ============================================================================

/// Supported filter file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .with_context(|| format!("Filter file has no extension: {}", path.display()))?;

        match ext.as_str() {
            "yml" | "yaml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => bail!(
                "Unsupported filter file extension '.{}' (expected .yml, .yaml, .json or .toml)",
                other
            ),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Yaml => write!(f, "YAML"),
            ConfigFormat::Json => write!(f, "JSON"),
            ConfigFormat::Toml => write!(f, "TOML"),
        }
    }
}

// ============================================================================
// File Schema
// ============================================================================

/// Filter file contents, keyed by resource type
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterConfig {
    pub types: BTreeMap<String, Option<TypeEntry>>,
}

/// Criteria for one resource type as written in the filter file
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    /// Identifiers to select
    #[serde(default)]
    pub ids: Vec<String>,

    /// Tag constraints; a null value accepts any value
    #[serde(default)]
    pub tags: BTreeMap<String, Option<String>>,

    /// Tag keys that must be present, with any value
    #[serde(default)]
    pub tag_keys: Vec<String>,
}

impl FilterConfig {
    /// Load and validate a filter file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read filter file: {}", path.display()))?;
        let format = ConfigFormat::from_path(path)?;

        let config = Self::parse(&content, format)
            .with_context(|| format!("Invalid {} in filter file: {}", format, path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid filter file: {}", path.display()))?;

        log::debug!(
            "Loaded filter for {} resource type(s) from {}",
            config.types.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse filter file contents in the given format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        // An empty, comment-only or `~` YAML document is null, not a map
        if format == ConfigFormat::Yaml && content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = match format {
            ConfigFormat::Yaml => {
                serde_yaml::from_str::<Option<Self>>(content)?.unwrap_or_default()
            }
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (resource_type, entry) in &self.types {
            if resource_type.trim().is_empty() {
                bail!("Resource type name cannot be empty");
            }
            if let Some(entry) = entry {
                entry
                    .validate()
                    .with_context(|| format!("Invalid entry for '{}'", resource_type))?;
            }
        }
        Ok(())
    }

    /// Build the immutable filter specification
    pub fn to_spec(&self) -> FilterSpec {
        self.types
            .iter()
            .map(|(resource_type, entry)| {
                let filter = entry.as_ref().map(TypeEntry::to_filter).unwrap_or_default();
                (resource_type.clone(), filter)
            })
            .collect()
    }
}

impl TypeEntry {
    /// Validate a single type entry
    pub fn validate(&self) -> Result<()> {
        if self.ids.iter().any(|id| id.is_empty()) {
            bail!("Identifiers cannot be empty");
        }
        if self.tags.keys().chain(&self.tag_keys).any(|k| k.is_empty()) {
            bail!("Tag keys cannot be empty");
        }
        if let Some(key) = self.tag_keys.iter().find(|k| self.tags.contains_key(*k)) {
            bail!("Tag key '{}' is listed in both 'tags' and 'tag_keys'", key);
        }
        Ok(())
    }

    /// Convert to the filter used for matching
    pub fn to_filter(&self) -> TypeFilter {
        let mut filter = TypeFilter::any().with_ids(self.ids.iter().cloned());
        for (key, value) in &self.tags {
            filter = match value {
                Some(value) => filter.with_tag(key.clone(), value.clone()),
                None => filter.with_tag_key(key.clone()),
            };
        }
        for key in &self.tag_keys {
            filter = filter.with_tag_key(key.clone());
        }
        filter
    }
}

// ============================================================================
// Tests
// ============================================================================
