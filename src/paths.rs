//! Path resolution for sweep
//!
//! # Environment Variables
//!
//! - `SWEEP_CONFIG` - Filter file to use when none is given on the command line
//! - `SWEEP_CONFIG_DIR` - Override the config directory
//!
//! # Path Resolution Priority
//!
//! For config_dir():
//! 1. `SWEEP_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/sweep` (if set)
//! 3. Platform default:
//!    - Windows: `%APPDATA%\sweep`
//!    - macOS/Linux: `~/.config/sweep`
//!
//! For default_filter_file():
//! 1. `SWEEP_CONFIG` environment variable
//! 2. The first existing `filter.{yml,yaml,json,toml}` in config_dir()

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

/// Environment variable for the filter file override
pub const ENV_CONFIG: &str = "SWEEP_CONFIG";

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "SWEEP_CONFIG_DIR";

/// File stem of the default filter file
pub const FILTER_FILE_STEM: &str = "filter";

/// Extensions probed for the default filter file, in order
pub const FILTER_FILE_EXTENSIONS: [&str; 4] = ["yml", "yaml", "json", "toml"];

/// Get the sweep config directory path
///
/// Priority:
/// 1. `SWEEP_CONFIG_DIR` env var
/// 2. `XDG_CONFIG_HOME/sweep`
/// 3. Platform default
pub fn config_dir() -> Result<PathBuf> {
    // 1. Check environment variable override
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    // 2. Check XDG_CONFIG_HOME
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join("sweep");
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    // 3. Platform default
    #[cfg(windows)]
    {
        if let Some(app_data) = dirs::config_dir() {
            let path = app_data.join("sweep");
            log::debug!("Using Windows config dir: {}", path.display());
            return Ok(path);
        }
    }

    // Unix default: ~/.config/sweep
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join("sweep");
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Resolve the filter file to load
///
/// An explicit path wins; otherwise `SWEEP_CONFIG`, then the first
/// `filter.*` file found in the config directory.
pub fn resolve_filter_file(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(expand(&path.to_string_lossy()));
    }

    if let Ok(file) = std::env::var(ENV_CONFIG) {
        let path = expand(&file);
        log::debug!("Using filter file from {}: {}", ENV_CONFIG, path.display());
        return Ok(path);
    }

    let dir = config_dir()?;
    find_filter_file(&dir).with_context(|| {
        format!(
            "No filter file given and none found in {} (expected {}.{{{}}})",
            dir.display(),
            FILTER_FILE_STEM,
            FILTER_FILE_EXTENSIONS.join(",")
        )
    })
}

/// Find the first `filter.<ext>` file in a directory
fn find_filter_file(dir: &Path) -> Result<PathBuf> {
    for ext in FILTER_FILE_EXTENSIONS {
        let candidate = dir.join(format!("{FILTER_FILE_STEM}.{ext}"));
        if candidate.is_file() {
            log::debug!("Using filter file: {}", candidate.display());
            return Ok(candidate);
        }
    }
    bail!("no filter file in {}", dir.display())
}

/// Expand ~ and environment variables in a path string.
///
/// Unknown variables are left as written.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

// ============================================================================
// Tests
// ============================================================================
