//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Build trees from flat JSON records and query them
#[derive(Parser, Debug)]
#[command(name = "treekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every tree of the forest
    Tree {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List leaf nodes
    Leaves {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show the depth of each tree
    Depth {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show the node count of each tree
    Size {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List nodes at a given distance below the roots
    Level {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Number of edges below the root (root = 0)
        depth: usize,
    },

    /// Show a node with its parent, depth and siblings
    Find {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Key of the node
        key: String,
    },

    /// Show the lowest common ancestor of two nodes
    Lca {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Key of the first node
        first: String,
        /// Key of the second node
        second: String,
    },

    /// Show the path between two nodes
    Path {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Key of the start node
        from: String,
        /// Key of the end node
        to: String,
    },

    /// Show all root-to-leaf paths
    Paths {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Serialize each tree as nested JSON
    Json {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Remove all leaves once and show what remains
    Trim {
        /// JSON array of records
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Configuration management
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
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
