//! CLI subcommand definitions

use clap::Subcommand;

/// Main CLI commands
#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Commands {
    /// Estimate the cost of the given usage (default)
    Estimate,
    /// Show per-unit prices for the selected model
    Prices {
        /// Show every model instead of only the selected one
        #[arg(short, long)]
        all: bool,
    },
    /// List supported models
    Models,
    /// Print a link that reproduces the current calculator settings
    Share {
        /// Also copy the link to the system clipboard
        #[arg(long)]
        copy: bool,
        /// Page the link points to (default: config share_base_url or http://localhost:8080/)
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },
    /// Interactive calculator: edit fields and watch the total update
    Repl,
}
