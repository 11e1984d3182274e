//! Self-balancing binary search trees that use a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! `RedBlackTree` fixes colors along an explicit ancestor stack, while `LinkedRedBlackTree`
//! stores a parent reference in every node and walks it instead.

mod linked_tree;
mod node;
mod tree;

pub use self::linked_tree::LinkedRedBlackTree;
pub use self::tree::RedBlackTree;

use crate::arena::{Arena, Handle};
use crate::bst::node::BinaryNode;

/// Maximum height of a red black tree whose node count fits in a `usize`.
pub const RB_MAX_HEIGHT: usize = 128;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

fn is_red<N>(arena: &Arena<N>, node: Option<Handle>) -> bool
where
    N: BinaryNode<Mark = Color>,
{
    match node {
        None => false,
        Some(handle) => arena[handle].mark() == Color::Red,
    }
}

fn paint<N>(arena: &mut Arena<N>, handle: Handle, color: Color)
where
    N: BinaryNode<Mark = Color>,
{
    arena[handle].set_mark(color);
}
