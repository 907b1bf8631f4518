use std::fmt::Display;
use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, TreeArgs, WalkOrder};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{Complex, HeapifyMode, Node, NodeId, Tree};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");

    match &cli.command {
        Some(Commands::Walk { order, tree }) => _walk(&settings, *order, tree),
        Some(Commands::Show { tree }) => _show(&settings, tree),
        Some(Commands::Heapify { sift_down, tree }) => _heapify(&settings, *sift_down, tree),
        Some(Commands::Demo) => _demo(&settings),
        Some(Commands::Config { command }) => _config(&settings, command),
        Some(Commands::Completion { shell }) => {
            _completion(*shell);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Builds a tree from a root value and parent:child edges, in argument order.
#[instrument(level = "debug", skip(settings))]
pub fn build_tree(settings: &Settings, args: &TreeArgs) -> CliResult<Tree<f64>> {
    let mut tree = Tree::new(args.arity.unwrap_or(settings.max_children))?;
    if let Some(root) = args.root {
        tree.set_root(Node::new(root));
    }
    for &(parent, child) in &args.edges {
        tree.add_child(&parent, child)?;
    }
    Ok(tree)
}

fn join_values<'a, T, I>(nodes: I, separator: &str) -> String
where
    T: Display + 'a,
    I: Iterator<Item = (NodeId, &'a Node<T>)>,
{
    nodes.map(|(_, node)| node.value()).join(separator)
}

/// Values of one traversal joined by `separator`.
pub fn traversal_line<T: PartialOrd + Display>(
    tree: &Tree<T>,
    order: WalkOrder,
    separator: &str,
) -> CliResult<String> {
    let line = match order.traversal() {
        Some(traversal) => join_values(tree.walk(traversal)?, separator),
        None => join_values(tree.heap(), separator),
    };
    Ok(line)
}

fn _walk(settings: &Settings, order: WalkOrder, args: &TreeArgs) -> CliResult<()> {
    let tree = build_tree(settings, args)?;
    output::info(&traversal_line(&tree, order, &settings.separator)?);
    Ok(())
}

fn _show(settings: &Settings, args: &TreeArgs) -> CliResult<()> {
    let tree = build_tree(settings, args)?;
    print!("{}", tree);
    Ok(())
}

fn _heapify(settings: &Settings, sift_down: bool, args: &TreeArgs) -> CliResult<()> {
    let mut tree = build_tree(settings, args)?;
    let mode = if sift_down {
        HeapifyMode::SiftDown
    } else {
        settings.heapify_mode
    };
    tree.heapify_with(mode);
    output::header(&format!("Heapified ({mode})"));
    print!("{}", tree);
    output::action(
        "bfs",
        &traversal_line(&tree, WalkOrder::Bfs, &settings.separator)?,
    );
    Ok(())
}

fn print_traversals<T: PartialOrd + Display>(title: &str, tree: &Tree<T>, separator: &str) {
    output::header(&format!("#### {title} ####"));
    print!("{}", tree);
    for (label, order) in [
        ("pre-order", WalkOrder::Pre),
        ("post-order", WalkOrder::Post),
        ("in-order", WalkOrder::In),
        ("bfs", WalkOrder::Bfs),
        ("dfs", WalkOrder::Dfs),
        ("heap", WalkOrder::Heap),
    ] {
        match traversal_line(tree, order, separator) {
            Ok(line) => output::action(label, &line),
            Err(e) => output::warning(&format!("{label}: {e}")),
        }
    }
    output::action("default", &join_values(tree.into_iter(), separator));
    println!();
}

/// Sample trees: binary and 3-ary trees of `f64` and of `Complex`.
#[derive(Debug)]
pub struct DemoTrees {
    pub binary: Tree<f64>,
    pub three_ary: Tree<f64>,
    pub complex: Tree<Complex>,
    pub three_ary_complex: Tree<Complex>,
}

fn sample_tree<T>(max_children: usize, root: T, edges: &[(T, T)]) -> CliResult<Tree<T>>
where
    T: PartialEq + Display + Copy,
{
    let mut tree = Tree::new(max_children)?;
    tree.set_root(Node::new(root));
    for &(parent, child) in edges {
        tree.add_child(&parent, child)?;
    }
    Ok(tree)
}

pub fn demo_trees() -> CliResult<DemoTrees> {
    let c = Complex::new;
    Ok(DemoTrees {
        binary: sample_tree(
            2,
            1.1,
            &[(1.1, 1.2), (1.1, 1.3), (1.2, 1.4), (1.2, 1.5), (1.3, 1.6)],
        )?,
        three_ary: sample_tree(
            3,
            1.1,
            &[(1.1, 1.2), (1.1, 1.3), (1.1, 1.4), (1.2, 1.5), (1.3, 1.6)],
        )?,
        complex: sample_tree(
            2,
            c(1.0, 1.0),
            &[
                (c(1.0, 1.0), c(2.0, 3.0)),
                (c(1.0, 1.0), c(3.0, 4.0)),
                (c(2.0, 3.0), c(4.0, 5.0)),
                (c(2.0, 3.0), c(5.0, 6.0)),
                (c(3.0, 4.0), c(6.0, 7.0)),
            ],
        )?,
        three_ary_complex: sample_tree(
            3,
            c(1.0, 1.0),
            &[
                (c(1.0, 1.0), c(2.0, 3.0)),
                (c(1.0, 1.0), c(3.0, 4.0)),
                (c(1.0, 1.0), c(4.0, 5.0)),
                (c(2.0, 3.0), c(5.0, 6.0)),
                (c(3.0, 4.0), c(6.0, 7.0)),
            ],
        )?,
    })
}

fn _demo(settings: &Settings) -> CliResult<()> {
    let demo = demo_trees()?;
    print_traversals("Double Tree", &demo.binary, &settings.separator);
    print_traversals("3-ary Double Tree", &demo.three_ary, &settings.separator);
    print_traversals("Complex Tree", &demo.complex, &settings.separator);
    print_traversals(
        "3-ary Complex Tree",
        &demo.three_ary_complex,
        &settings.separator,
    );
    Ok(())
}

fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => print!("{}", settings.to_toml()?),
        ConfigCommands::Template => print!("{}", Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory on this platform"),
        },
    }
    Ok(())
}

fn _completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, name, &mut io::stdout());
}
