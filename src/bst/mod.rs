//! Plumbing shared by every balanced tree: ordering, node links, cursors, and structural copy.

mod compare;
mod copy;
mod cursor;
pub(crate) mod node;
pub(crate) mod raw;
#[cfg(test)]
pub(crate) mod verify;

pub use self::compare::{Compare, Natural, WithContext};
pub use self::cursor::{LinkedCursor, StackCursor};
pub use self::node::Dir;
pub(crate) use self::copy::{copy_linked, copy_stacked};

use crate::bst::node::BinaryNode;
use crate::bst::raw::RawTree;
use std::mem;

/// The ordered-container contract implemented by every tree in this crate.
///
/// Items are ordered solely by the tree's comparator and keys are unique. Copying a tree is
/// `Clone::clone`.
pub trait OrderedTree: RawTree + Sized {
    type Cursor: TreeCursor<Self>;

    /// Returns the number of items in the tree.
    fn count(&self) -> usize {
        self.arena().len()
    }

    /// Returns `true` if the tree holds no items.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns the stored item comparing equal to `item`, if any.
    fn find(&self, item: &Self::Item) -> Option<&Self::Item> {
        self.locate(item).map(|handle| self.arena()[handle].item())
    }

    /// Inserts `item`. Returns `false`, leaving the tree unchanged, if an equal item is
    /// already present.
    fn insert(&mut self, item: Self::Item) -> bool {
        self.insert_raw(item).1.is_none()
    }

    /// Inserts `item`, overwriting an equal item in place. Returns the overwritten item, or
    /// `None` if `item` was freshly inserted.
    fn replace(&mut self, item: Self::Item) -> Option<Self::Item> {
        let (handle, rejected) = self.insert_raw(item);
        let item = rejected?;
        Some(mem::replace(self.arena_mut()[handle].item_mut(), item))
    }

    /// Removes and returns the item comparing equal to `item`, if any.
    fn delete(&mut self, item: &Self::Item) -> Option<Self::Item>;

    /// Returns a fresh, unpositioned cursor for this tree.
    fn cursor(&self) -> Self::Cursor;

    /// Returns an iterator over the items in ascending order.
    fn iter(&self) -> Iter<'_, Self> {
        Iter {
            tree: self,
            cursor: self.cursor(),
            remaining: self.count(),
        }
    }
}

/// A detached position inside a tree.
///
/// A cursor does not borrow its tree; every call receives it instead. Any number of cursors
/// may be kept across mutations of the tree they walk. A cursor must only be used with the
/// tree that created it. Copying a cursor is `Clone::clone`, and the copy moves independently.
pub trait TreeCursor<R>: Clone
where
    R: OrderedTree,
{
    /// Moves to the smallest item.
    fn first<'a>(&mut self, tree: &'a R) -> Option<&'a R::Item>;

    /// Moves to the largest item.
    fn last<'a>(&mut self, tree: &'a R) -> Option<&'a R::Item>;

    /// Moves to the item comparing equal to `item`. Leaves the cursor unpositioned on a miss.
    fn find<'a>(&mut self, tree: &'a R, item: &R::Item) -> Option<&'a R::Item>;

    /// Moves to the in-order successor. An unpositioned cursor moves to the first item;
    /// stepping past the last item leaves the cursor unpositioned.
    fn next<'a>(&mut self, tree: &'a R) -> Option<&'a R::Item>;

    /// Moves to the in-order predecessor. An unpositioned cursor moves to the last item;
    /// stepping past the first item leaves the cursor unpositioned.
    fn prev<'a>(&mut self, tree: &'a R) -> Option<&'a R::Item>;

    /// Returns the item under the cursor without moving.
    fn current<'a>(&self, tree: &'a R) -> Option<&'a R::Item>;

    /// Overwrites the item under the cursor and returns the old one. The new item must compare
    /// equal to the old one.
    fn replace(&mut self, tree: &mut R, item: R::Item) -> Option<R::Item>;

    /// Inserts `item` through the tree and moves onto the node holding its key, whether it was
    /// created or already present. Returns `true` if the item was inserted.
    fn insert(&mut self, tree: &mut R, item: R::Item) -> bool;
}

/// An iterator over the items of an `OrderedTree` in ascending order.
pub struct Iter<'a, R>
where
    R: OrderedTree,
{
    tree: &'a R,
    cursor: R::Cursor,
    remaining: usize,
}

impl<'a, R> Iterator for Iter<'a, R>
where
    R: OrderedTree,
{
    type Item = &'a R::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.cursor.next(self.tree)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, R> ExactSizeIterator for Iter<'a, R> where R: OrderedTree {}
