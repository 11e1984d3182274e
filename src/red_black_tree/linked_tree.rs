use crate::arena::{Arena, Handle};
use crate::bst::node::{attach, rotate, slot_of, splice, unlink_linked, BinaryNode, Dir, Slot};
use crate::bst::raw::RawTree;
use crate::bst::{copy_linked, Compare, LinkedCursor, Natural, OrderedTree, WithContext};
use crate::red_black_tree::node::LinkedNode;
use crate::red_black_tree::{is_red, paint, Color, RB_MAX_HEIGHT};
use std::cmp::Ordering;

/// A red black tree whose nodes reference their parents.
pub struct LinkedRedBlackTree<T, C = Natural> {
    arena: Arena<LinkedNode<T>>,
    root: Option<Handle>,
    comparator: C,
}

impl<T, C> LinkedRedBlackTree<T, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `LinkedRedBlackTree<T, C>` ordered by `comparator`.
    pub fn new(comparator: C) -> Self {
        Self::with_capacity(comparator, 0)
    }

    /// Constructs a new, empty `LinkedRedBlackTree<T, C>` with room for `capacity` nodes.
    pub fn with_capacity(comparator: C, capacity: usize) -> Self {
        LinkedRedBlackTree {
            arena: Arena::with_capacity(capacity),
            root: None,
            comparator,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    fn side_of(&self, parent: Handle, child: Handle) -> Dir {
        if self.arena[parent].link(Dir::Left) == Some(child) {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    fn fix_insert(&mut self, mut curr: Handle) {
        loop {
            let parent = match self.arena[curr].parent {
                Some(parent) if is_red(&self.arena, Some(parent)) => parent,
                _ => break,
            };
            let grandparent = self.arena[parent]
                .parent
                .expect("Expected a red node to have a parent.");
            let dir = self.side_of(grandparent, parent);
            let uncle = self.arena[grandparent].link(dir.opposite());

            if let Some(uncle) = uncle.filter(|&uncle| is_red(&self.arena, Some(uncle))) {
                paint(&mut self.arena, parent, Color::Black);
                paint(&mut self.arena, uncle, Color::Black);
                paint(&mut self.arena, grandparent, Color::Red);
                trace!("Pushed a red violation up to {:?}.", grandparent);
                curr = grandparent;
                continue;
            }

            let pivot = if self.arena[parent].link(dir) == Some(curr) {
                parent
            } else {
                let pivot = rotate(&mut self.arena, parent, dir);
                attach(&mut self.arena, grandparent, dir, Some(pivot));
                pivot
            };
            let slot = slot_of(&self.arena, grandparent);
            paint(&mut self.arena, grandparent, Color::Red);
            paint(&mut self.arena, pivot, Color::Black);
            trace!("Rotating {:?} toward {:?} after insertion.", grandparent, dir.opposite());
            let top = rotate(&mut self.arena, grandparent, dir.opposite());
            splice(&mut self.arena, &mut self.root, slot, Some(top));
            break;
        }

        if let Some(root) = self.root {
            paint(&mut self.arena, root, Color::Black);
        }
    }

    /// Restores the black height below `start`, whose child on the given side is one black node
    /// short. `None` stands for the root slot.
    fn fix_delete(&mut self, mut start: Option<(Handle, Dir)>) {
        loop {
            let short = match start {
                None => self.root,
                Some((parent, dir)) => self.arena[parent].link(dir),
            };
            if let Some(short) = short.filter(|&short| is_red(&self.arena, Some(short))) {
                paint(&mut self.arena, short, Color::Black);
                return;
            }
            let (parent, dir) = match start {
                None => return,
                Some(start) => start,
            };

            let mut sibling = self.sibling(parent, dir);
            if is_red(&self.arena, Some(sibling)) {
                trace!("Red sibling below {:?}.", parent);
                paint(&mut self.arena, sibling, Color::Black);
                paint(&mut self.arena, parent, Color::Red);
                let slot = slot_of(&self.arena, parent);
                let top = rotate(&mut self.arena, parent, dir);
                splice(&mut self.arena, &mut self.root, slot, Some(top));
                sibling = self.sibling(parent, dir);
            }

            let near = self.arena[sibling].link(dir);
            let far = self.arena[sibling].link(dir.opposite());
            if !is_red(&self.arena, near) && !is_red(&self.arena, far) {
                paint(&mut self.arena, sibling, Color::Red);
                start = match slot_of(&self.arena, parent) {
                    Slot::Root => None,
                    Slot::Child(grandparent, dir) => Some((grandparent, dir)),
                };
                continue;
            }

            if !is_red(&self.arena, far) {
                let pivot = rotate(&mut self.arena, sibling, dir.opposite());
                paint(&mut self.arena, pivot, Color::Black);
                paint(&mut self.arena, sibling, Color::Red);
                attach(&mut self.arena, parent, dir.opposite(), Some(pivot));
                sibling = pivot;
            }
            let color = self.arena[parent].color;
            paint(&mut self.arena, sibling, color);
            paint(&mut self.arena, parent, Color::Black);
            let far = self.arena[sibling]
                .link(dir.opposite())
                .expect("Expected the far nephew to be `Some`.");
            paint(&mut self.arena, far, Color::Black);
            let slot = slot_of(&self.arena, parent);
            let top = rotate(&mut self.arena, parent, dir);
            splice(&mut self.arena, &mut self.root, slot, Some(top));
            return;
        }
    }

    fn sibling(&self, parent: Handle, dir: Dir) -> Handle {
        self.arena[parent]
            .link(dir.opposite())
            .expect("Expected the sibling of a black-short subtree to be `Some`.")
    }
}

impl<T, F, X> LinkedRedBlackTree<T, WithContext<F, X>>
where
    F: Fn(&T, &T, &X) -> Ordering,
{
    pub fn with_context(func: F, context: X) -> Self {
        Self::new(WithContext::new(func, context))
    }
}

impl<T, C> RawTree for LinkedRedBlackTree<T, C>
where
    C: Compare<T>,
{
    type Item = T;
    type Node = LinkedNode<T>;

    const MAX_HEIGHT: usize = RB_MAX_HEIGHT;

    fn arena(&self) -> &Arena<LinkedNode<T>> {
        &self.arena
    }

    fn arena_mut(&mut self) -> &mut Arena<LinkedNode<T>> {
        &mut self.arena
    }

    fn root(&self) -> Option<Handle> {
        self.root
    }

    fn order(&self, a: &T, b: &T) -> Ordering {
        self.comparator.compare(a, b)
    }

    fn insert_raw(&mut self, item: T) -> (Handle, Option<T>) {
        let mut parent = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            match self.comparator.compare(&item, &node.item) {
                Ordering::Equal => return (handle, Some(item)),
                ordering => {
                    let dir = Dir::of(ordering);
                    parent = Some((handle, dir));
                    curr = node.link(dir);
                },
            }
        }

        let new = self.arena.allocate(LinkedNode::new(item));
        splice(&mut self.arena, &mut self.root, Slot::below(parent.as_ref()), Some(new));
        self.fix_insert(new);
        (new, None)
    }
}

impl<T, C> OrderedTree for LinkedRedBlackTree<T, C>
where
    C: Compare<T>,
{
    type Cursor = LinkedCursor;

    fn delete(&mut self, item: &T) -> Option<T> {
        let target = self.locate(item)?;
        let start = unlink_linked(&mut self.arena, &mut self.root, target);
        if self.arena[target].color == Color::Black {
            self.fix_delete(start);
        }
        Some(self.arena.free(target).into_item())
    }

    fn cursor(&self) -> LinkedCursor {
        LinkedCursor::new()
    }
}

impl<T, C> Clone for LinkedRedBlackTree<T, C>
where
    T: Clone,
    C: Compare<T> + Clone,
{
    fn clone(&self) -> Self {
        let (arena, root) = copy_linked(&self.arena, self.root);
        LinkedRedBlackTree {
            arena,
            root,
            comparator: self.comparator.clone(),
        }
    }
}

impl<T> Default for LinkedRedBlackTree<T, Natural>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new(Natural)
    }
}
