use crate::arena::Handle;
use crate::bst::node::{BinaryNode, Dir, LinkedNode};
use crate::bst::raw::{RawTree, Versioned};
use crate::bst::{OrderedTree, TreeCursor};
use std::cmp::Ordering;
use std::mem;

/// A cursor for trees whose nodes carry no parent references.
///
/// The cursor caches the ancestors of its current node together with the tree's generation at
/// the time they were recorded. When a later step observes a newer generation it rebuilds the
/// ancestor stack by descending from the root with the current node's item, so the current
/// node survives any rebalancing that happens elsewhere in the tree.
#[derive(Clone, Debug, Default)]
pub struct StackCursor {
    node: Option<Handle>,
    stack: Vec<Handle>,
    generation: Option<u64>,
    poisoned: bool,
}

impl StackCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once a step found the node under the cursor deleted behind its back,
    /// even if its slot was reused by a later insertion. A poisoned cursor stays put until it
    /// is repositioned with `first`, `last`, `find` or `insert`.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Moves to the position of `other`, which must walk the same tree. The two cursors step
    /// independently afterwards.
    pub fn copy_from(&mut self, other: &Self) {
        self.clone_from(other);
    }

    fn reset<R>(&mut self, tree: &R)
    where
        R: Versioned,
    {
        self.node = None;
        self.stack.clear();
        self.stack.reserve(R::MAX_HEIGHT);
        self.generation = Some(tree.generation());
        self.poisoned = false;
    }

    fn poison(&mut self) {
        debug!("Cursor lost its node to a deletion.");
        self.node = None;
        self.stack.clear();
        self.poisoned = true;
    }

    fn sync<R>(&mut self, tree: &R)
    where
        R: Versioned,
    {
        if self.generation == Some(tree.generation()) {
            return;
        }
        self.generation = Some(tree.generation());
        let node = match self.node {
            Some(node) => node,
            None => return,
        };

        debug!("Resynchronizing cursor at generation {}.", tree.generation());
        self.stack.clear();
        let arena = tree.arena();
        let target = match arena.get(node) {
            Some(target) => target.item(),
            None => return self.poison(),
        };
        let mut curr = tree.root();
        loop {
            let handle = match curr {
                Some(handle) => handle,
                None => return self.poison(),
            };
            if handle == node {
                return;
            }
            match tree.order(target, arena[handle].item()) {
                Ordering::Equal => return self.poison(),
                ordering => {
                    self.stack.push(handle);
                    curr = arena[handle].link(Dir::of(ordering));
                },
            }
        }
    }

    fn extreme<'a, R>(&mut self, tree: &'a R, dir: Dir) -> Option<&'a R::Item>
    where
        R: Versioned,
    {
        self.reset(tree);
        let arena = tree.arena();
        let mut curr = tree.root()?;
        while let Some(next) = arena[curr].link(dir) {
            self.stack.push(curr);
            curr = next;
        }
        self.node = Some(curr);
        Some(arena[curr].item())
    }

    fn step<'a, R>(&mut self, tree: &'a R, dir: Dir) -> Option<&'a R::Item>
    where
        R: Versioned,
    {
        self.sync(tree);
        if self.poisoned {
            return None;
        }
        let arena = tree.arena();
        let mut curr = match self.node {
            Some(curr) => curr,
            None => return self.extreme(tree, dir.opposite()),
        };

        if let Some(next) = arena[curr].link(dir) {
            self.stack.push(curr);
            curr = next;
            while let Some(next) = arena[curr].link(dir.opposite()) {
                self.stack.push(curr);
                curr = next;
            }
        } else {
            loop {
                let child = curr;
                curr = match self.stack.pop() {
                    Some(parent) => parent,
                    None => {
                        self.node = None;
                        return None;
                    },
                };
                if arena[curr].link(dir) != Some(child) {
                    break;
                }
            }
        }
        self.node = Some(curr);
        Some(arena[curr].item())
    }
}

impl<R> TreeCursor<R> for StackCursor
where
    R: OrderedTree + Versioned,
{
    fn first<'a>(&mut self, tree: &'a R) -> Option<&'a R::Item> {
        self.extreme(tree, Dir::Left)
    }

    fn last<'a>(&mut self, tree: &'a R) -> Option<&'a R::Item> {
        self.extreme(tree, Dir::Right)
    }

    fn find<'a>(&mut self, tree: &'a R, item: &R::Item) -> Option<&'a R::Item> {
        self.reset(tree);
        let arena = tree.arena();
        let mut curr = tree.root();
        while let Some(handle) = curr {
            let node = &arena[handle];
            match tree.order(item, node.item()) {
                Ordering::Equal => {
                    self.node = Some(handle);
                    return Some(node.item());
                },
                ordering => {
                    self.stack.push(handle);
                    curr = node.link(Dir::of(ordering));
                },
            }
        }
        self.stack.clear();
        None
    }

    fn next<'a>(&mut self, tree: &'a R) -> Option<&'a R::Item> {
        self.step(tree, Dir::Right)
    }

    fn prev<'a>(&mut self, tree: &'a R) -> Option<&'a R::Item> {
        self.step(tree, Dir::Left)
    }

    fn current<'a>(&self, tree: &'a R) -> Option<&'a R::Item> {
        let node = self.node?;
        tree.arena().get(node).map(|node| node.item())
    }

    fn replace(&mut self, tree: &mut R, item: R::Item) -> Option<R::Item> {
        let node = self.node?;
        let node = tree.arena_mut().get_mut(node)?;
        Some(mem::replace(node.item_mut(), item))
    }

    fn insert(&mut self, tree: &mut R, item: R::Item) -> bool {
        let (handle, rejected) = tree.insert_raw(item);
        self.node = Some(handle);
        self.stack.clear();
        self.generation = None;
        self.poisoned = false;
        rejected.is_none()
    }

}

/// A cursor for trees whose nodes know their parent.
///
/// Ancestors are recovered live from parent references, so the cursor only remembers its
/// current node and never goes stale through rebalancing.
#[derive(Clone, Debug, Default)]
pub struct LinkedCursor {
    node: Option<Handle>,
    poisoned: bool,
}

impl LinkedCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once a step found the node under the cursor deleted behind its back.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    pub fn copy_from(&mut self, other: &Self) {
        self.clone_from(other);
    }

    fn extreme<'a, R>(&mut self, tree: &'a R, dir: Dir) -> Option<&'a R::Item>
    where
        R: RawTree,
    {
        self.poisoned = false;
        self.node = None;
        let arena = tree.arena();
        let mut curr = tree.root()?;
        while let Some(next) = arena[curr].link(dir) {
            curr = next;
        }
        self.node = Some(curr);
        Some(arena[curr].item())
    }

    fn step<'a, R>(&mut self, tree: &'a R, dir: Dir) -> Option<&'a R::Item>
    where
        R: RawTree,
        R::Node: LinkedNode,
    {
        if self.poisoned {
            return None;
        }
        let arena = tree.arena();
        let mut curr = match self.node {
            Some(curr) => curr,
            None => return self.extreme(tree, dir.opposite()),
        };
        if !arena.contains(curr) {
            debug!("Cursor lost its node to a deletion.");
            self.node = None;
            self.poisoned = true;
            return None;
        }

        if let Some(next) = arena[curr].link(dir) {
            curr = next;
            while let Some(next) = arena[curr].link(dir.opposite()) {
                curr = next;
            }
        } else {
            loop {
                let child = curr;
                curr = match arena[curr].parent() {
                    Some(parent) => parent,
                    None => {
                        self.node = None;
                        return None;
                    },
                };
                if arena[curr].link(dir) != Some(child) {
                    break;
                }
            }
        }
        self.node = Some(curr);
        Some(arena[curr].item())
    }
}

impl<R> TreeCursor<R> for LinkedCursor
where
    R: OrderedTree,
    R::Node: LinkedNode,
{
    fn first<'a>(&mut self, tree: &'a R) -> Option<&'a R::Item> {
        self.extreme(tree, Dir::Left)
    }

    fn last<'a>(&mut self, tree: &'a R) -> Option<&'a R::Item> {
        self.extreme(tree, Dir::Right)
    }

    fn find<'a>(&mut self, tree: &'a R, item: &R::Item) -> Option<&'a R::Item> {
        self.poisoned = false;
        self.node = tree.locate(item);
        self.current(tree)
    }

    fn next<'a>(&mut self, tree: &'a R) -> Option<&'a R::Item> {
        self.step(tree, Dir::Right)
    }

    fn prev<'a>(&mut self, tree: &'a R) -> Option<&'a R::Item> {
        self.step(tree, Dir::Left)
    }

    fn current<'a>(&self, tree: &'a R) -> Option<&'a R::Item> {
        let node = self.node?;
        tree.arena().get(node).map(|node| node.item())
    }

    fn replace(&mut self, tree: &mut R, item: R::Item) -> Option<R::Item> {
        let node = self.node?;
        let node = tree.arena_mut().get_mut(node)?;
        Some(mem::replace(node.item_mut(), item))
    }

    fn insert(&mut self, tree: &mut R, item: R::Item) -> bool {
        let (handle, rejected) = tree.insert_raw(item);
        self.node = Some(handle);
        self.poisoned = false;
        rejected.is_none()
    }

}
