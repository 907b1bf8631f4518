//! Text rendering of a tree as an indented outline.

use std::fmt;

use termtree::Tree as TermTree;

use crate::domain::arena::{NodeId, Tree};

pub trait TermTreeRender {
    fn to_term_tree(&self) -> TermTree<String>;
}

impl<T: fmt::Display> TermTreeRender for Tree<T> {
    fn to_term_tree(&self) -> TermTree<String> {
        fn build_tree<T: fmt::Display>(tree: &Tree<T>, node_idx: NodeId) -> TermTree<String> {
            match tree.get_node(node_idx) {
                Some(node) => TermTree::new(node.value().to_string()).with_leaves(
                    node.children()
                        .iter()
                        .map(|&child_idx| build_tree(tree, child_idx)),
                ),
                None => TermTree::new(String::new()),
            }
        }

        match self.root() {
            Some(root_idx) => build_tree(self, root_idx),
            None => TermTree::new("Empty tree".to_string()),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_term_tree())
    }
}
