use crate::arena::{Arena, Handle};
use crate::bst::node::{BinaryNode, Dir};
use std::cmp::Ordering;

/// Node-level access shared by every tree engine.
///
/// Lives in a private module: it is nameable inside the crate only, which keeps cursors and
/// the structural copy generic without exposing arena internals to callers.
pub trait RawTree {
    type Item;
    type Node: BinaryNode<Item = Self::Item>;

    /// Upper bound on the number of ancestors any node can have.
    const MAX_HEIGHT: usize;

    fn arena(&self) -> &Arena<Self::Node>;

    fn arena_mut(&mut self) -> &mut Arena<Self::Node>;

    fn root(&self) -> Option<Handle>;

    fn order(&self, a: &Self::Item, b: &Self::Item) -> Ordering;

    /// Attaches `item` and rebalances. Returns the handle of the node holding the key, plus
    /// `item` itself when an equal key was already present and the tree was left unchanged.
    fn insert_raw(&mut self, item: Self::Item) -> (Handle, Option<Self::Item>);

    fn locate(&self, item: &Self::Item) -> Option<Handle> {
        let arena = self.arena();
        let mut curr = self.root();
        while let Some(handle) = curr {
            let node = &arena[handle];
            match self.order(item, node.item()) {
                Ordering::Equal => return Some(handle),
                ordering => curr = node.link(Dir::of(ordering)),
            }
        }
        None
    }
}

/// A tree whose nodes carry no parent references and which stamps every structural change.
pub trait Versioned: RawTree {
    fn generation(&self) -> u64;
}
