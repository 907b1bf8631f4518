//! Bounded-arity tree container.
//!
//! A [`Tree`] owns its nodes in an arena and limits how many children each
//! node may hold. It offers pre-order, post-order, in-order, breadth-first,
//! depth-first and value-ordered (heap) cursors, plus an in-place heapify.
//!
//! ```
//! use karytree::{Node, Tree};
//!
//! let mut tree = Tree::binary();
//! tree.set_root(Node::new(1));
//! tree.add_child(&1, 2).unwrap();
//! tree.add_child(&1, 3).unwrap();
//! tree.add_child(&2, 4).unwrap();
//!
//! let values: Vec<i32> = tree.post_order().map(|(_, node)| *node.value()).collect();
//! assert_eq!(values, vec![4, 2, 3, 1]);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    Complex, Cursor, HeapCursor, HeapifyMode, Node, NodeId, TermTreeRender, TraversalOrder, Tree,
    TreeError, TreeResult, DEFAULT_MAX_CHILDREN,
};
