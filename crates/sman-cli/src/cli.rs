use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "sman")]
#[command(about = "A personal command-snippet manager")]
#[command(version)]
pub struct Cli {
    /// Config file (overrides SMAN_CONFIG environment variable)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Snippet directory (overrides config file and SMAN_SNIPPET_DIR)
    #[arg(short = 'd', long, global = true)]
    pub snippet_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand)]
pub enum Commands {
    /// List and search snippets
    ///
    /// PATTERN is a regular expression matched against snippet name,
    /// description and command.
    ///
    /// Examples:
    ///   sman ls add            list snippets matching "add"
    ///   sman ls -f docker      list all snippets in file "docker"
    ///   sman ls -t net+debug   list snippets tagged both net and debug
    #[command(visible_alias = "l")]
    Ls {
        #[command(flatten)]
        filter: FilterArgs,

        /// Produce tab-separated machine-readable output
        #[arg(long, conflicts_with = "json")]
        porcelain: bool,

        /// Output as JSON for machine processing
        #[arg(long)]
        json: bool,
    },

    /// Show a snippet with its placeholders
    Show {
        /// Snippet name
        name: String,

        /// File the snippet lives in
        #[arg(short, long, default_value = "")]
        file: String,
    },

    /// Fill in a snippet's placeholders and execute it
    ///
    /// Examples:
    ///   sman run add_user -i user=alice
    ///   sman run -f docker logs -y
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        filter: FilterArgs,

        /// Placeholder value as NAME=VALUE (repeatable)
        #[arg(short, long = "input", value_name = "NAME=VALUE")]
        inputs: Vec<String>,

        /// Execute without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Print the final command instead of executing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Create the snippet directory and a default config file
    Init {
        /// Snippet directory to create (defaults to the configured one)
        path: Option<PathBuf>,
    },

    /// Generate shell completions
    #[cfg(feature = "completions")]
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// Snippet selection shared by `ls` and `run`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Regular expression matched against name, command and description
    #[arg(default_value = "")]
    pub pattern: String,

    /// Only snippets from this file
    #[arg(short, long, default_value = "")]
    pub file: String,

    /// Tag expression: "a+b" means a AND b, "a,b" means a OR b
    #[arg(short, long, default_value = "")]
    pub tags: String,
}
