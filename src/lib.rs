//! Generic balanced binary search trees.
//!
//! Four engines implement the same `OrderedTree` contract: an avl tree and a red black tree,
//! each with and without parent references in its nodes. Engines without parent references
//! retrace through explicit ancestor stacks and stamp every structural change with a
//! generation number; their cursors use it to detect and repair stale positions.
//!
//! # Examples
//!
//! ```
//! use bbst::{LinkedRedBlackTree, OrderedTree, TreeCursor};
//!
//! let mut tree: LinkedRedBlackTree<&str> = LinkedRedBlackTree::default();
//! for word in "the quick brown fox".split(' ') {
//!     tree.insert(word);
//! }
//!
//! let mut cursor = tree.cursor();
//! assert_eq!(cursor.find(&tree, &"fox"), Some(&"fox"));
//! assert_eq!(cursor.next(&tree), Some(&"quick"));
//! assert_eq!(tree.iter().count(), 4);
//! ```

#[macro_use]
extern crate log;

mod bst;
mod entry;
pub mod arena;
pub mod avl_tree;
pub mod red_black_tree;

pub use crate::avl_tree::{AvlTree, LinkedAvlTree};
pub use crate::bst::{Compare, Dir, Iter, LinkedCursor, Natural, OrderedTree, StackCursor, TreeCursor, WithContext};
pub use crate::entry::Entry;
pub use crate::red_black_tree::{Color, LinkedRedBlackTree, RedBlackTree};
