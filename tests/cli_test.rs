//! Command-line tree building and traversal output

use clap::Parser;
use rstest::rstest;

use karytree::cli::args::{Cli, Commands, TreeArgs, WalkOrder};
use karytree::cli::commands::{build_tree, demo_trees, traversal_line};
use karytree::cli::CliError;
use karytree::config::Settings;
use karytree::exitcode;
use karytree::TreeError;

fn sample_args() -> TreeArgs {
    TreeArgs {
        root: Some(1.0),
        edges: vec![(1.0, 2.0), (1.0, 3.0), (2.0, 4.0), (2.0, 5.0), (3.0, 6.0)],
        arity: None,
    }
}

// ============================================================
// Argument parsing
// ============================================================

#[test]
fn given_walk_arguments_when_parsed_then_edges_in_order() {
    let cli = Cli::try_parse_from([
        "karytree", "walk", "-o", "post", "-r", "1", "-e", "1:2", "--edge", "1:-3",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Walk { order, tree }) => {
            assert_eq!(order, WalkOrder::Post);
            assert_eq!(tree.root, Some(1.0));
            assert_eq!(tree.edges, vec![(1.0, 2.0), (1.0, -3.0)]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn given_verbosity_flags_when_parsed_then_counted() {
    let cli = Cli::try_parse_from(["karytree", "-dd", "demo"]).unwrap();
    assert_eq!(cli.debug, 2);
    assert!(matches!(cli.command, Some(Commands::Demo)));
}

// ============================================================
// Traversal output
// ============================================================

#[rstest]
#[case::pre(WalkOrder::Pre, "1, 2, 4, 5, 3, 6")]
#[case::post(WalkOrder::Post, "4, 5, 2, 6, 3, 1")]
#[case::in_order(WalkOrder::In, "4, 2, 5, 1, 6, 3")]
#[case::bfs(WalkOrder::Bfs, "1, 2, 3, 4, 5, 6")]
#[case::dfs(WalkOrder::Dfs, "1, 2, 4, 5, 3, 6")]
#[case::heap(WalkOrder::Heap, "1, 2, 3, 4, 5, 6")]
fn given_sample_edges_when_walking_then_line_matches(
    #[case] order: WalkOrder,
    #[case] expected: &str,
) {
    let settings = Settings::default();
    let tree = build_tree(&settings, &sample_args()).unwrap();
    assert_eq!(
        traversal_line(&tree, order, &settings.separator).unwrap(),
        expected
    );
}

#[test]
fn given_custom_separator_when_walking_then_used() {
    let tree = build_tree(&Settings::default(), &sample_args()).unwrap();
    assert_eq!(
        traversal_line(&tree, WalkOrder::Bfs, " ").unwrap(),
        "1 2 3 4 5 6"
    );
}

#[test]
fn given_arity_argument_when_building_then_overrides_settings() {
    let settings = Settings {
        max_children: 3,
        ..Settings::default()
    };
    let args = TreeArgs {
        arity: Some(2),
        ..sample_args()
    };
    let tree = build_tree(&settings, &args).unwrap();
    assert_eq!(tree.max_children(), 2);
    assert!(traversal_line(&tree, WalkOrder::In, ", ").is_ok());
}

#[test]
fn given_three_ary_settings_when_walking_in_order_then_fails() {
    let settings = Settings {
        max_children: 3,
        ..Settings::default()
    };
    let tree = build_tree(&settings, &sample_args()).unwrap();
    let err = traversal_line(&tree, WalkOrder::In, ", ").unwrap_err();
    assert!(matches!(
        err,
        CliError::Tree(TreeError::InOrderRequiresBinary { max_children: 3 })
    ));
}

// ============================================================
// Build failures
// ============================================================

#[test]
fn given_edges_without_root_when_building_then_no_root() {
    let args = TreeArgs {
        root: None,
        ..sample_args()
    };
    let err = build_tree(&Settings::default(), &args).unwrap_err();
    assert!(matches!(err, CliError::Tree(TreeError::NoRoot)));
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_third_child_on_binary_tree_when_building_then_capacity_exceeded() {
    let mut args = sample_args();
    args.edges.push((1.0, 7.0));
    let err = build_tree(&Settings::default(), &args).unwrap_err();
    assert!(matches!(
        err,
        CliError::Tree(TreeError::CapacityExceeded { max_children: 2 })
    ));
}

#[test]
fn given_root_only_when_building_then_single_node() {
    let args = TreeArgs {
        root: Some(-2.5),
        edges: Vec::new(),
        arity: None,
    };
    let tree = build_tree(&Settings::default(), &args).unwrap();
    assert_eq!(
        traversal_line(&tree, WalkOrder::Post, ", ").unwrap(),
        "-2.5"
    );
}

// ============================================================
// Demo trees
// ============================================================

#[test]
fn given_demo_trees_when_walking_then_sample_sequences() {
    let demo = demo_trees().unwrap();

    assert_eq!(
        traversal_line(&demo.binary, WalkOrder::In, ", ").unwrap(),
        "1.4, 1.2, 1.5, 1.1, 1.6, 1.3"
    );
    assert_eq!(
        traversal_line(&demo.three_ary, WalkOrder::Post, ", ").unwrap(),
        "1.5, 1.2, 1.6, 1.3, 1.4, 1.1"
    );
    assert_eq!(
        traversal_line(&demo.complex, WalkOrder::Bfs, ", ").unwrap(),
        "1 + 1i, 2 + 3i, 3 + 4i, 4 + 5i, 5 + 6i, 6 + 7i"
    );
    assert_eq!(
        traversal_line(&demo.complex, WalkOrder::In, ", ").unwrap(),
        "4 + 5i, 2 + 3i, 5 + 6i, 1 + 1i, 6 + 7i, 3 + 4i"
    );
    assert_eq!(
        traversal_line(&demo.three_ary_complex, WalkOrder::Pre, ", ").unwrap(),
        "1 + 1i, 2 + 3i, 5 + 6i, 3 + 4i, 6 + 7i, 4 + 5i"
    );
    assert!(traversal_line(&demo.three_ary_complex, WalkOrder::In, ", ").is_err());
}
