//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::application::Operation;

/// Checkbox tree model: tri-state selection, expansion and flattening for tree views
#[derive(Parser, Debug)]
#[command(name = "checktree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Directory searched for a local .checktree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Tree input file plus operations applied in order before output.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Tree input (.json or .toml)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Operation: expand:ID, collapse:ID, check:ID, uncheck:ID, remove:ID,
    /// add:PARENT=JSON, expand-all, collapse-all
    #[arg(short = 'o', long = "op")]
    pub ops: Vec<Operation>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the visible rows with check markers
    Flat {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the full structure, ignoring expansion
    Tree {
        #[command(flatten)]
        input: InputArgs,
    },

    /// List checked node ids
    Checked {
        #[command(flatten)]
        input: InputArgs,
    },

    /// List expanded node ids
    Expanded {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the visible rows as JSON snapshots
    Json {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Show config file locations
    Path,
    /// Print a commented template config
    Template,
}
