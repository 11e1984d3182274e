//! Self-balancing binary search trees where the heights of the two child subtrees of any node
//! differ by at most one.
//!
//! `AvlTree` retraces insertions and deletions through an explicit ancestor stack, while
//! `LinkedAvlTree` stores a parent reference in every node and walks it instead. Both share
//! the rotation table below.

mod linked_tree;
mod node;
mod tree;

pub use self::linked_tree::LinkedAvlTree;
pub use self::tree::AvlTree;

use crate::arena::{Arena, Handle};
use crate::bst::node::{attach, rotate, BinaryNode, Dir};

/// Maximum height of an avl tree whose node count fits in a `usize`.
pub const AVL_MAX_HEIGHT: usize = 92;

/// Balance factor contribution of a subtree growing on side `dir`.
fn weight(dir: Dir) -> i8 {
    match dir {
        Dir::Left => -1,
        Dir::Right => 1,
    }
}

/// Restores the balance of `y`, whose `heavy` subtree is two levels taller than the other one.
///
/// Returns the root of the rebalanced subtree, which the caller splices into `y`'s former slot,
/// and whether the subtree ended up shorter than it was before the imbalance.
fn rebalance<N>(arena: &mut Arena<N>, y: Handle, heavy: Dir) -> (Handle, bool)
where
    N: BinaryNode<Mark = i8>,
{
    let light = heavy.opposite();
    let sign = weight(heavy);
    let x = arena[y]
        .link(heavy)
        .expect("Expected the heavy side of an unbalanced node to be `Some`.");

    if arena[x].mark() == -sign {
        trace!("Double rotation toward {:?} at {:?}.", light, y);
        let r = rotate(arena, x, heavy);
        attach(arena, y, heavy, Some(r));
        rotate(arena, y, light);
        let (x_balance, y_balance) = match arena[r].mark() {
            balance if balance == sign => (0, -sign),
            0 => (0, 0),
            _ => (sign, 0),
        };
        arena[x].set_mark(x_balance);
        arena[y].set_mark(y_balance);
        arena[r].set_mark(0);
        (r, true)
    } else {
        trace!("Single rotation toward {:?} at {:?}.", light, y);
        rotate(arena, y, light);
        if arena[x].mark() == 0 {
            arena[x].set_mark(-sign);
            arena[y].set_mark(sign);
            (x, false)
        } else {
            arena[x].set_mark(0);
            arena[y].set_mark(0);
            (x, true)
        }
    }
}
