use crate::arena::{Arena, Handle};
use std::cmp::Ordering;

/// The side of a node a child hangs from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Dir {
    Left,
    Right,
}

impl Dir {
    pub fn opposite(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    /// Direction a descent takes after comparing the target against a node.
    pub(crate) fn of(ordering: Ordering) -> Dir {
        match ordering {
            Ordering::Greater => Dir::Right,
            _ => Dir::Left,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Dir::Left => 0,
            Dir::Right => 1,
        }
    }
}

/// The place a subtree hangs from: the tree's root pointer or a child link of some node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slot {
    Root,
    Child(Handle, Dir),
}

impl Slot {
    /// Slot below the last `(node, direction)` pair of a descent path.
    pub fn below(parent: Option<&(Handle, Dir)>) -> Slot {
        match parent {
            None => Slot::Root,
            Some(&(handle, dir)) => Slot::Child(handle, dir),
        }
    }
}

/// Storage shape shared by all tree nodes.
pub trait BinaryNode {
    type Item;
    /// Balance annotation: a balance factor or a color.
    type Mark: Copy;

    fn from_parts(item: Self::Item, mark: Self::Mark) -> Self;

    fn item(&self) -> &Self::Item;

    fn item_mut(&mut self) -> &mut Self::Item;

    fn into_item(self) -> Self::Item;

    fn link(&self, dir: Dir) -> Option<Handle>;

    fn set_link(&mut self, dir: Dir, child: Option<Handle>);

    fn mark(&self) -> Self::Mark;

    fn set_mark(&mut self, mark: Self::Mark);

    /// Records the node's parent. Nodes without a back reference ignore it.
    fn set_parent(&mut self, _parent: Option<Handle>) {}
}

/// A node that knows its parent.
pub trait LinkedNode: BinaryNode {
    fn parent(&self) -> Option<Handle>;
}

/// Hangs `child` below `parent` and points the child back at it.
pub fn attach<N>(arena: &mut Arena<N>, parent: Handle, dir: Dir, child: Option<Handle>)
where
    N: BinaryNode,
{
    arena[parent].set_link(dir, child);
    if let Some(child) = child {
        arena[child].set_parent(Some(parent));
    }
}

/// Stores `child` in `slot`.
pub fn splice<N>(arena: &mut Arena<N>, root: &mut Option<Handle>, slot: Slot, child: Option<Handle>)
where
    N: BinaryNode,
{
    match slot {
        Slot::Root => {
            *root = child;
            if let Some(child) = child {
                arena[child].set_parent(None);
            }
        },
        Slot::Child(parent, dir) => attach(arena, parent, dir, child),
    }
}

/// Rotates the subtree rooted at `top` so that `top` sinks to its `dir` side and its child on
/// the opposite side rises. Returns the new subtree root, which the caller must splice into
/// `top`'s former slot.
pub fn rotate<N>(arena: &mut Arena<N>, top: Handle, dir: Dir) -> Handle
where
    N: BinaryNode,
{
    let child = arena[top]
        .link(dir.opposite())
        .expect("Expected the rising child of a rotation to be `Some`.");
    let inner = arena[child].link(dir);
    attach(arena, top, dir.opposite(), inner);
    attach(arena, child, dir, Some(top));
    child
}

/// Follows `dir` links from `handle` as far as they go.
pub fn extreme<N>(arena: &Arena<N>, mut handle: Handle, dir: Dir) -> Handle
where
    N: BinaryNode,
{
    while let Some(next) = arena[handle].link(dir) {
        handle = next;
    }
    handle
}

/// Slot that currently holds `handle`, found through its parent reference.
pub fn slot_of<N>(arena: &Arena<N>, handle: Handle) -> Slot
where
    N: LinkedNode,
{
    match arena[handle].parent() {
        None => Slot::Root,
        Some(parent) if arena[parent].link(Dir::Left) == Some(handle) => Slot::Child(parent, Dir::Left),
        Some(parent) => Slot::Child(parent, Dir::Right),
    }
}

/// Unlinks `target` from a tree without parent references.
///
/// `path` must hold the ancestors of `target`, each with the direction taken below it. The
/// node replacing `target` inherits its children and mark, and `target` receives the
/// replacement's former mark. On return `path` ends at the node that structurally lost a child.
pub fn unlink_stacked<N>(
    arena: &mut Arena<N>,
    root: &mut Option<Handle>,
    path: &mut Vec<(Handle, Dir)>,
    target: Handle,
) where
    N: BinaryNode,
{
    let slot = Slot::below(path.last());
    let left = arena[target].link(Dir::Left);
    let right = match arena[target].link(Dir::Right) {
        Some(right) => right,
        None => {
            splice(arena, root, slot, left);
            return;
        },
    };

    if arena[right].link(Dir::Left).is_none() {
        attach(arena, right, Dir::Left, left);
        swap_marks(arena, target, right);
        splice(arena, root, slot, Some(right));
        path.push((right, Dir::Right));
        return;
    }

    let index = path.len();
    path.push((target, Dir::Right));
    let mut parent = right;
    let successor = loop {
        path.push((parent, Dir::Left));
        let next = arena[parent]
            .link(Dir::Left)
            .expect("Expected a left child while searching for the successor.");
        if arena[next].link(Dir::Left).is_none() {
            break next;
        }
        parent = next;
    };
    let successor_right = arena[successor].link(Dir::Right);
    attach(arena, parent, Dir::Left, successor_right);
    attach(arena, successor, Dir::Left, left);
    attach(arena, successor, Dir::Right, Some(right));
    swap_marks(arena, target, successor);
    splice(arena, root, slot, Some(successor));
    path[index] = (successor, Dir::Right);
}

/// Unlinks `target` from a tree with parent references.
///
/// Mirrors `unlink_stacked`, but discovers ancestors through parent links. Returns the node
/// that structurally lost a child together with the side it lost it on, or `None` when the
/// root slot itself changed.
pub fn unlink_linked<N>(arena: &mut Arena<N>, root: &mut Option<Handle>, target: Handle) -> Option<(Handle, Dir)>
where
    N: LinkedNode,
{
    let slot = slot_of(arena, target);
    let left = arena[target].link(Dir::Left);
    let right = match arena[target].link(Dir::Right) {
        Some(right) => right,
        None => {
            splice(arena, root, slot, left);
            return match slot {
                Slot::Root => None,
                Slot::Child(parent, dir) => Some((parent, dir)),
            };
        },
    };

    if arena[right].link(Dir::Left).is_none() {
        attach(arena, right, Dir::Left, left);
        swap_marks(arena, target, right);
        splice(arena, root, slot, Some(right));
        return Some((right, Dir::Right));
    }

    let successor = extreme(arena, right, Dir::Left);
    let parent = arena[successor]
        .parent()
        .expect("Expected the successor to have a parent.");
    let successor_right = arena[successor].link(Dir::Right);
    attach(arena, parent, Dir::Left, successor_right);
    attach(arena, successor, Dir::Left, left);
    attach(arena, successor, Dir::Right, Some(right));
    swap_marks(arena, target, successor);
    splice(arena, root, slot, Some(successor));
    Some((parent, Dir::Left))
}

fn swap_marks<N>(arena: &mut Arena<N>, a: Handle, b: Handle)
where
    N: BinaryNode,
{
    let mark = arena[a].mark();
    let other = arena[b].mark();
    arena[a].set_mark(other);
    arena[b].set_mark(mark);
}
