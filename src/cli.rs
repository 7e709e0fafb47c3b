use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sweep")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Select cloud resources for deletion by type, id and tags", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the resources of an inventory that match a filter file
    Filter(FilterArgs),

    /// Preview which resources carry extractable tags
    Tags(TagsArgs),

    /// Check a filter file and show its criteria
    Validate {
        /// Filter file (defaults to $SWEEP_CONFIG or <config dir>/filter.*)
        config: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON array, suitable for a deletion stage
    Json,
}

// ============================================================================
// Filter
// ============================================================================

#[derive(Parser)]
pub struct FilterArgs {
    /// Filter file (defaults to $SWEEP_CONFIG or <config dir>/filter.*)
    pub config: Option<PathBuf>,

    /// Inventory snapshot (JSON), or - for stdin
    #[arg(short, long)]
    pub inventory: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Number of parallel jobs (defaults to available CPUs)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Show the extracted tags of each matched resource
    #[arg(long)]
    pub show_tags: bool,
}

// ============================================================================
// Tags
// ============================================================================

#[derive(Parser)]
pub struct TagsArgs {
    /// Inventory snapshot (JSON), or - for stdin
    #[arg(short, long)]
    pub inventory: PathBuf,

    /// Only show resources of this type
    #[arg(short = 't', long = "type")]
    pub resource_type: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}
