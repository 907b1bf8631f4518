use std::any::{type_name, Any};
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use crate::domain::cursor::{Cursor, TraversalOrder};
use crate::domain::error::{TreeError, TreeResult};

/// Stable handle of a node inside the arena of the tree that created it.
pub type NodeId = Index;

/// Arity used by [`Tree::default`] and [`Tree::binary`].
pub const DEFAULT_MAX_CHILDREN: usize = 2;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Value stored in this node
    value: T,
    /// Indices of child nodes in the arena, in insertion order
    children: Vec<NodeId>,
}

impl<T> Node<T> {
    /// Creates a detached node without children.
    pub fn new(value: T) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    fn ensure_capacity(&self, max_children: usize) -> TreeResult<()> {
        if self.children.len() >= max_children {
            return Err(TreeError::CapacityExceeded { max_children });
        }
        Ok(())
    }

    /// Appends `child` unless the node already holds `max_children` children.
    ///
    /// The child list is left untouched on failure.
    pub(crate) fn attach_child(&mut self, child: NodeId, max_children: usize) -> TreeResult<()> {
        self.ensure_capacity(max_children)?;
        self.children.push(child);
        Ok(())
    }
}

/// Arena-based tree with a bounded number of children per node.
///
/// The tree owns every node it ever received. Nodes are addressed by
/// [`NodeId`] and can only be linked through the tree, so a node cannot be
/// shared between trees or attached under two parents.
///
/// Cursors borrow the tree immutably, which rules out structural mutation
/// while a traversal is in progress.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    /// Arena storage for all tree nodes
    arena: Arena<Node<T>>,
    /// Index of the root node, None for empty trees
    root: Option<NodeId>,
    /// Maximum number of children per node, fixed at construction
    max_children: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::binary()
    }
}

impl<T> Tree<T> {
    /// Creates an empty tree whose nodes may hold up to `max_children` children.
    pub fn new(max_children: usize) -> TreeResult<Self> {
        if max_children == 0 {
            return Err(TreeError::ZeroArity);
        }
        Ok(Self::with_arity(max_children))
    }

    /// Creates an empty tree allowing two children per node.
    pub fn binary() -> Self {
        Self::with_arity(DEFAULT_MAX_CHILDREN)
    }

    fn with_arity(max_children: usize) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            max_children,
        }
    }

    pub fn max_children(&self) -> usize {
        self.max_children
    }

    /// Makes `node` the root of the tree.
    ///
    /// A previous root is replaced without validation. Its subtree stays in
    /// the arena until the tree is dropped but is no longer reachable.
    #[instrument(level = "trace", skip_all)]
    pub fn set_root(&mut self, node: Node<T>) -> NodeId {
        let root_idx = self.arena.insert(node);
        if let Some(previous) = self.root.replace(root_idx) {
            debug!(?previous, "root replaced");
        }
        root_idx
    }

    pub fn add_root(&mut self, node: Node<T>) -> NodeId {
        self.set_root(node)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&Node<T>> {
        self.root.and_then(|idx| self.arena.get(idx))
    }

    pub fn get_node(&self, idx: NodeId) -> Option<&Node<T>> {
        self.arena.get(idx)
    }

    /// Node lookup for indices handed out by this tree's own cursors.
    pub(crate) fn node(&self, idx: NodeId) -> &Node<T> {
        &self.arena[idx]
    }

    pub(crate) fn node_mut(&mut self, idx: NodeId) -> &mut Node<T> {
        &mut self.arena[idx]
    }

    pub(crate) fn swap_values(&mut self, a: NodeId, b: NodeId) {
        if let (Some(first), Some(second)) = self.arena.get2_mut(a, b) {
            std::mem::swap(first.value_mut(), second.value_mut());
        }
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.pre_order().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels below and including the root, 0 for an empty tree.
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: NodeId) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Values of all leaf nodes, in pre-order.
    pub fn leaf_values(&self) -> Vec<&T> {
        self.pre_order()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.value())
            .collect()
    }

    pub fn pre_order(&self) -> Cursor<'_, T> {
        Cursor::new(self, TraversalOrder::PreOrder)
    }

    pub fn post_order(&self) -> Cursor<'_, T> {
        Cursor::new(self, TraversalOrder::PostOrder)
    }

    pub fn bfs(&self) -> Cursor<'_, T> {
        Cursor::new(self, TraversalOrder::BreadthFirst)
    }

    pub fn dfs(&self) -> Cursor<'_, T> {
        Cursor::new(self, TraversalOrder::DepthFirst)
    }

    /// In-order (left, node, right) cursor, only defined for binary trees.
    pub fn in_order(&self) -> TreeResult<Cursor<'_, T>> {
        self.walk(TraversalOrder::InOrder)
    }

    /// Cursor for any traversal order.
    ///
    /// Fails with [`TreeError::InOrderRequiresBinary`] when in-order is
    /// requested on a tree whose arity is not 2.
    pub fn walk(&self, order: TraversalOrder) -> TreeResult<Cursor<'_, T>> {
        if order == TraversalOrder::InOrder && self.max_children != 2 {
            return Err(TreeError::InOrderRequiresBinary {
                max_children: self.max_children,
            });
        }
        Ok(Cursor::new(self, order))
    }
}

impl<T: PartialEq + fmt::Display> Tree<T> {
    /// First node in pre-order whose value equals `value`.
    ///
    /// This is a full scan, so building a tree of n nodes through
    /// [`Tree::add_child`] costs O(n²) comparisons. A value index would make
    /// lookups O(1) at the price of requiring `T: Hash` or `T: Ord`.
    pub fn find_node(&self, value: &T) -> Option<NodeId> {
        self.pre_order()
            .find(|(_, node)| node.value() == value)
            .map(|(idx, _)| idx)
    }

    /// Attaches a new node holding `child` under the first node whose value
    /// equals `parent_value`.
    ///
    /// Checks run in order: root present, parent found, parent has room.
    /// Nothing is inserted when any of them fails.
    #[instrument(level = "trace", skip_all)]
    pub fn add_child(&mut self, parent_value: &T, child: T) -> TreeResult<NodeId> {
        if self.root.is_none() {
            return Err(TreeError::NoRoot);
        }
        let parent_idx = self
            .find_node(parent_value)
            .ok_or_else(|| TreeError::ParentNotFound {
                parent: parent_value.to_string(),
            })?;

        let max_children = self.max_children;
        self.node(parent_idx).ensure_capacity(max_children)?;

        let child_idx = self.arena.insert(Node::new(child));
        self.node_mut(parent_idx)
            .attach_child(child_idx, max_children)?;
        trace!(parent = %parent_value, child = %self.node(child_idx).value(), "attached child");
        Ok(child_idx)
    }

    /// Attaches `child` under the node whose value equals `parent`'s value.
    ///
    /// The lookup is by value, not identity: with duplicate values the first
    /// match in pre-order wins.
    ///
    /// Only the value of `child` is attached. Its child list refers to
    /// another arena position and is discarded, so a node cloned out of a
    /// tree arrives as a leaf.
    pub fn add_sub_node(&mut self, parent: &Node<T>, child: Node<T>) -> TreeResult<NodeId> {
        self.add_child(parent.value(), child.into_value())
    }
}

impl<T: PartialEq + fmt::Display + Any> Tree<T> {
    /// Like [`Tree::add_sub_node`] for a child whose value type is only
    /// checked at run time.
    ///
    /// Fails with [`TreeError::TypeMismatch`] when `U` is not `T`.
    pub fn add_foreign_sub_node<U: Any>(
        &mut self,
        parent: &Node<T>,
        child: Node<U>,
    ) -> TreeResult<NodeId> {
        let boxed: Box<dyn Any> = Box::new(child.into_value());
        match boxed.downcast::<T>() {
            Ok(value) => self.add_child(parent.value(), *value),
            Err(_) => Err(TreeError::TypeMismatch {
                expected: type_name::<T>(),
                found: type_name::<U>(),
            }),
        }
    }
}
