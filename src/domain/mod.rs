//! Domain layer: the tree container, its cursors and the heap transform
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod complex;
pub mod cursor;
pub mod display;
pub mod error;
pub mod heap;

pub use arena::{Node, NodeId, Tree, DEFAULT_MAX_CHILDREN};
pub use complex::Complex;
pub use cursor::{Cursor, TraversalOrder};
pub use display::TermTreeRender;
pub use error::{TreeError, TreeResult};
pub use heap::{HeapCursor, HeapifyMode};
