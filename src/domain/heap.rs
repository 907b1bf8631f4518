//! Heap-ordered cursor and the in-place heap transform.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::domain::arena::{Node, NodeId, Tree};
use crate::domain::cursor::{Cursor, TraversalOrder};
use crate::domain::error::{TreeError, TreeResult};

/// How [`Tree::heapify_with`] repairs a parent that is greater than a child.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeapifyMode {
    /// Swap parent and child once; a value pushed down is not corrected
    /// against its new children.
    #[default]
    SinglePass,
    /// Swap and keep sifting the pushed-down value, yielding a full min-heap.
    SiftDown,
}

impl fmt::Display for HeapifyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapifyMode::SinglePass => f.write_str("single-pass"),
            HeapifyMode::SiftDown => f.write_str("sift-down"),
        }
    }
}

/// Cursor emitting every reachable node in ascending value order.
///
/// All node indices are collected up front into an array kept as a binary
/// min-heap; advancing pops the minimum. The tree itself is not touched.
pub struct HeapCursor<'a, T> {
    tree: &'a Tree<T>,
    heap: Vec<NodeId>,
}

impl<'a, T: PartialOrd> HeapCursor<'a, T> {
    #[instrument(level = "trace", skip_all)]
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        let heap: Vec<NodeId> = tree.pre_order().map(|(idx, _)| idx).collect();
        let mut cursor = Self { tree, heap };
        for pos in (0..cursor.heap.len() / 2).rev() {
            cursor.sift_down(pos);
        }
        trace!(nodes = cursor.heap.len(), "heap built");
        cursor
    }

    /// Exhausted sentinel.
    pub fn end(tree: &'a Tree<T>) -> Self {
        Self {
            tree,
            heap: Vec::new(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of nodes not yet emitted, the current one included.
    pub fn remaining(&self) -> usize {
        self.heap.len()
    }

    /// The node holding the smallest remaining value.
    pub fn current(&self) -> TreeResult<(NodeId, &'a Node<T>)> {
        let tree: &'a Tree<T> = self.tree;
        let &idx = self.heap.first().ok_or(TreeError::CursorExhausted)?;
        Ok((idx, tree.node(idx)))
    }

    /// Drops the current minimum and restores the heap.
    pub fn advance(&mut self) -> TreeResult<()> {
        if self.heap.is_empty() {
            return Err(TreeError::CursorExhausted);
        }
        self.heap.swap_remove(0);
        self.sift_down(0);
        Ok(())
    }

    fn is_greater(&self, a: usize, b: usize) -> bool {
        self.tree.node(self.heap[a]).value() > self.tree.node(self.heap[b]).value()
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.is_greater(smallest, left) {
                smallest = left;
            }
            if right < len && self.is_greater(smallest, right) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.heap.swap(pos, smallest);
            pos = smallest;
        }
    }
}

impl<'a, T: PartialOrd> Iterator for HeapCursor<'a, T> {
    type Item = (NodeId, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current().ok()?;
        self.advance().ok()?;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T: PartialOrd> ExactSizeIterator for HeapCursor<'_, T> {}

impl<T> PartialEq for HeapCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.heap.is_empty() && other.heap.is_empty()
    }
}

impl<T> fmt::Debug for HeapCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapCursor")
            .field("pending", &self.heap.len())
            .finish()
    }
}

impl<T: PartialOrd> Tree<T> {
    pub fn heap(&self) -> HeapCursor<'_, T> {
        HeapCursor::new(self)
    }

    /// Moves smaller values towards the root with a single swap per edge.
    ///
    /// Children are processed before their parent. A value swapped down is
    /// not compared with its new children, so the result is not guaranteed
    /// to be a min-heap; use [`HeapifyMode::SiftDown`] for that.
    pub fn heapify(&mut self) {
        self.heapify_with(HeapifyMode::SinglePass);
    }

    pub fn heapify_with(&mut self, mode: HeapifyMode) {
        if let Some(root) = self.root() {
            self.heapify_from(root, mode);
        }
    }

    /// Heapifies the subtree rooted at `start`.
    #[instrument(level = "debug", skip(self))]
    pub fn heapify_from(&mut self, start: NodeId, mode: HeapifyMode) {
        if self.get_node(start).is_none() {
            return;
        }
        let order: Vec<NodeId> = Cursor::from_node(self, start, TraversalOrder::PostOrder)
            .map(|(idx, _)| idx)
            .collect();

        let mut swaps = 0usize;
        for parent in order {
            let children = self.node(parent).children().to_vec();
            for child in children {
                if self.node(parent).value() > self.node(child).value() {
                    self.swap_values(parent, child);
                    swaps += 1;
                    if mode == HeapifyMode::SiftDown {
                        swaps += self.sift_value_down(child);
                    }
                }
            }
        }
        debug!(swaps, "heapify done");
    }

    /// Swaps the value at `idx` with its smallest child until no child is smaller.
    fn sift_value_down(&mut self, mut idx: NodeId) -> usize {
        let mut swaps = 0;
        loop {
            let smallest = self.node(idx).children().iter().copied().reduce(|best, child| {
                if self.node(best).value() > self.node(child).value() {
                    child
                } else {
                    best
                }
            });
            match smallest {
                Some(child) if self.node(idx).value() > self.node(child).value() => {
                    self.swap_values(idx, child);
                    swaps += 1;
                    idx = child;
                }
                _ => return swaps,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tree: &Tree<i32>) -> Vec<i32> {
        tree.bfs().map(|(_, node)| *node.value()).collect()
    }

    fn three_level_chain() -> Tree<i32> {
        let mut tree = Tree::default();
        tree.set_root(Node::new(5));
        tree.add_child(&5, 2).unwrap();
        tree.add_child(&2, 3).unwrap();
        tree
    }

    #[test]
    fn given_single_pass_when_value_pushed_below_smaller_grandchild_then_violation_remains() {
        let mut tree = three_level_chain();
        tree.heapify();
        assert_eq!(values(&tree), vec![2, 5, 3]);
    }

    #[test]
    fn given_sift_down_when_value_pushed_below_smaller_grandchild_then_min_heap() {
        let mut tree = three_level_chain();
        tree.heapify_with(HeapifyMode::SiftDown);
        assert_eq!(values(&tree), vec![2, 3, 5]);
    }

    #[test]
    fn given_heap_cursor_then_exact_size() {
        let tree = three_level_chain();
        let mut cursor = tree.heap();
        assert_eq!(cursor.len(), 3);
        cursor.advance().unwrap();
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.current().map(|(_, n)| *n.value()), Ok(3));
    }

    #[test]
    fn given_nan_values_when_heap_walking_then_every_node_is_emitted() {
        let mut tree = Tree::default();
        tree.set_root(Node::new(1.0_f64));
        tree.add_child(&1.0, f64::NAN).unwrap();
        tree.add_child(&1.0, 0.5).unwrap();
        assert_eq!(tree.heap().count(), 3);
    }

    #[test]
    fn given_mode_when_displayed_then_kebab_case() {
        assert_eq!(HeapifyMode::SinglePass.to_string(), "single-pass");
        assert_eq!(HeapifyMode::SiftDown.to_string(), "sift-down");
    }
}
