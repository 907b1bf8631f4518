//! Stack/queue driven traversal cursors.
//!
//! One engine serves every structural order. The orders only differ in
//! which end of the frontier holds the current node and in how a node's
//! children are scheduled once it has been emitted.

use std::collections::VecDeque;
use std::fmt;

use tracing::{instrument, trace};

use crate::domain::arena::{Node, NodeId, Tree};
use crate::domain::error::{TreeError, TreeResult};

/// Visiting order of a [`Cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Node, then each child subtree left to right
    PreOrder,
    /// Each child subtree left to right, then node
    PostOrder,
    /// Left subtree, node, right subtree (binary trees only)
    InOrder,
    /// Level by level, left to right within a level
    BreadthFirst,
    /// LIFO stack walk from the root; same sequence as pre-order
    DepthFirst,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::PreOrder => "pre-order",
            TraversalOrder::PostOrder => "post-order",
            TraversalOrder::InOrder => "in-order",
            TraversalOrder::BreadthFirst => "bfs",
            TraversalOrder::DepthFirst => "dfs",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    idx: NodeId,
    /// Post-order only: children of this node are already on the frontier
    expanded: bool,
}

impl Frame {
    fn fresh(idx: NodeId) -> Self {
        Self {
            idx,
            expanded: false,
        }
    }
}

/// Single-pass cursor over the nodes of a [`Tree`].
///
/// The cursor points at its current node until [`Cursor::advance`] moves it
/// on. It also implements [`Iterator`], yielding `(NodeId, &Node<T>)`.
/// Two cursors compare equal only when both are exhausted.
pub struct Cursor<'a, T> {
    tree: &'a Tree<T>,
    order: TraversalOrder,
    frontier: VecDeque<Frame>,
}

impl<'a, T> Cursor<'a, T> {
    #[instrument(level = "trace", skip(tree))]
    pub(crate) fn new(tree: &'a Tree<T>, order: TraversalOrder) -> Self {
        match tree.root() {
            Some(root) => Self::from_node(tree, root, order),
            None => Self::end(tree, order),
        }
    }

    /// Cursor over the subtree rooted at `start`.
    pub(crate) fn from_node(tree: &'a Tree<T>, start: NodeId, order: TraversalOrder) -> Self {
        let mut cursor = Self::end(tree, order);
        match order {
            TraversalOrder::PreOrder
            | TraversalOrder::DepthFirst
            | TraversalOrder::BreadthFirst => cursor.frontier.push_back(Frame::fresh(start)),
            TraversalOrder::PostOrder => {
                cursor.frontier.push_back(Frame::fresh(start));
                cursor.expand_post_order();
            }
            TraversalOrder::InOrder => cursor.push_left_spine(start),
        }
        cursor
    }

    /// Exhausted sentinel for `order`.
    pub fn end(tree: &'a Tree<T>, order: TraversalOrder) -> Self {
        Self {
            tree,
            order,
            frontier: VecDeque::new(),
        }
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    pub fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    fn head(&self) -> Option<&Frame> {
        match self.order {
            TraversalOrder::BreadthFirst => self.frontier.front(),
            _ => self.frontier.back(),
        }
    }

    fn pop_head(&mut self) -> Option<Frame> {
        match self.order {
            TraversalOrder::BreadthFirst => self.frontier.pop_front(),
            _ => self.frontier.pop_back(),
        }
    }

    /// The node the cursor points at.
    pub fn current(&self) -> TreeResult<(NodeId, &'a Node<T>)> {
        let tree: &'a Tree<T> = self.tree;
        let frame = self.head().ok_or(TreeError::CursorExhausted)?;
        Ok((frame.idx, tree.node(frame.idx)))
    }

    /// Moves to the next node in order.
    pub fn advance(&mut self) -> TreeResult<()> {
        let tree = self.tree;
        let frame = self.pop_head().ok_or(TreeError::CursorExhausted)?;
        let children = tree.node(frame.idx).children();

        match self.order {
            TraversalOrder::PreOrder | TraversalOrder::DepthFirst => {
                // Push children in reverse order for left-to-right traversal
                for &child in children.iter().rev() {
                    self.frontier.push_back(Frame::fresh(child));
                }
            }
            TraversalOrder::BreadthFirst => {
                for &child in children {
                    self.frontier.push_back(Frame::fresh(child));
                }
            }
            TraversalOrder::PostOrder => self.expand_post_order(),
            TraversalOrder::InOrder => {
                if let Some(&right) = children.get(1) {
                    self.push_left_spine(right);
                }
            }
        }

        if self.is_exhausted() {
            trace!(order = %self.order, "cursor exhausted");
        }
        Ok(())
    }

    /// Expands unvisited nodes on top of the stack until the top is a node
    /// whose children have all been emitted.
    fn expand_post_order(&mut self) {
        let tree = self.tree;
        while let Some(top) = self.frontier.back_mut() {
            if top.expanded {
                break;
            }
            top.expanded = true;
            let children = tree.node(top.idx).children();
            for &child in children.iter().rev() {
                self.frontier.push_back(Frame::fresh(child));
            }
        }
    }

    /// Pushes `idx` and its chain of first children.
    fn push_left_spine(&mut self, idx: NodeId) {
        let tree = self.tree;
        let mut next = Some(idx);
        while let Some(current) = next {
            self.frontier.push_back(Frame::fresh(current));
            next = tree.node(current).children().first().copied();
        }
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = (NodeId, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current().ok()?;
        self.advance().ok()?;
        Some(item)
    }
}

/// Iterating a tree by reference walks it breadth-first.
impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = (NodeId, &'a Node<T>);
    type IntoIter = Cursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.bfs()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.is_exhausted() && other.is_exhausted()
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("order", &self.order)
            .field("pending", &self.frontier.len())
            .finish()
    }
}
