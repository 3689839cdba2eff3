//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Snippet Collector - Extract marked CSS snippets from theme style sheets
#[derive(Parser, Debug)]
#[command(name = "snip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Extract snippets from every configured source
    ///
    /// Examples:
    ///   snip extract                         # Prompt for new snippet names
    ///   snip extract --yes                   # Use declared names, no prompts
    ///   snip extract --source theme.css --name minimal
    Extract {
        /// Configuration file
        #[arg(short, long, env = "SNIP_CONFIG", default_value = "snippets.toml")]
        config: PathBuf,

        /// Never prompt; use declared names and decline ambiguous matches
        #[arg(short, long)]
        yes: bool,

        /// With --yes, accept ambiguous matches instead of declining them
        #[arg(long, requires = "yes")]
        accept_ambiguous: bool,

        /// Remove index entries whose blocks are gone
        #[arg(long)]
        prune: bool,

        /// Show what would be written without touching any file
        #[arg(long)]
        dry_run: bool,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show indexed snippets and whether their files exist
    Status {
        /// Configuration file
        #[arg(short, long, env = "SNIP_CONFIG", default_value = "snippets.toml")]
        config: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

/// A single source given on the command line instead of the config file.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SourceArgs {
    /// Style sheet to extract from
    #[arg(long = "source", value_name = "PATH")]
    pub path: Option<String>,

    /// Collection name for the source
    #[arg(long, requires = "path", default_value = "my-theme")]
    pub name: String,

    /// Author written to snippet descriptions
    #[arg(long, requires = "path", default_value = "Unknown Author")]
    pub author: String,

    /// License written to snippet descriptions
    #[arg(long, requires = "path", default_value = "MIT")]
    pub license: String,

    /// Upstream repository URL
    #[arg(long, requires = "path", default_value = "")]
    pub repo_url: String,
}
