//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::TraversalOrder;

/// Bounded-arity trees: build, walk, render and heapify
#[derive(Parser, Debug)]
#[command(name = "karytree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, env = "KARYTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the values of one traversal
    Walk {
        /// Traversal order
        #[arg(short, long, value_enum, default_value_t = WalkOrder::Bfs)]
        order: WalkOrder,

        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Show tree as outline
    Show {
        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Move smaller values towards the root, then show the tree
    Heapify {
        /// Sift swapped values all the way down (full min-heap)
        #[arg(long)]
        sift_down: bool,

        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Print every traversal of the sample trees
    Demo,

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
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show global config file location
    Path,
}

/// Tree given on the command line as a root value plus parent:child edges.
#[derive(Args, Debug, Clone, Default)]
pub struct TreeArgs {
    /// Root value
    #[arg(short, long, allow_negative_numbers = true)]
    pub root: Option<f64>,

    /// Edge as parent:child, attached in the given order
    #[arg(short, long = "edge", value_parser = parse_edge, allow_hyphen_values = true)]
    pub edges: Vec<(f64, f64)>,

    /// Maximum children per node (default from config)
    #[arg(short = 'k', long)]
    pub arity: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    Pre,
    Post,
    In,
    Bfs,
    Dfs,
    Heap,
}

impl WalkOrder {
    /// Structural order, `None` for the value-ordered heap walk.
    pub fn traversal(self) -> Option<TraversalOrder> {
        match self {
            WalkOrder::Pre => Some(TraversalOrder::PreOrder),
            WalkOrder::Post => Some(TraversalOrder::PostOrder),
            WalkOrder::In => Some(TraversalOrder::InOrder),
            WalkOrder::Bfs => Some(TraversalOrder::BreadthFirst),
            WalkOrder::Dfs => Some(TraversalOrder::DepthFirst),
            WalkOrder::Heap => None,
        }
    }
}

pub fn parse_edge(s: &str) -> Result<(f64, f64), String> {
    let (parent, child) = s
        .split_once(':')
        .ok_or_else(|| format!("expected parent:child, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid value '{v}': {e}"))
    };
    Ok((parse(parent)?, parse(child)?))
}
