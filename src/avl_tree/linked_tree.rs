use crate::arena::{Arena, Handle};
use crate::avl_tree::node::LinkedNode;
use crate::avl_tree::{rebalance, weight, AVL_MAX_HEIGHT};
use crate::bst::node::{slot_of, splice, unlink_linked, BinaryNode, Dir, Slot};
use crate::bst::raw::RawTree;
use crate::bst::{copy_linked, Compare, LinkedCursor, Natural, OrderedTree, WithContext};
use std::cmp::Ordering;

/// An avl tree whose nodes reference their parents.
///
/// Rebalancing walks parent references instead of a recorded path, so cursors never need to
/// resynchronize.
///
/// # Examples
///
/// ```
/// use bbst::{LinkedAvlTree, OrderedTree, TreeCursor};
///
/// let mut tree: LinkedAvlTree<u32> = LinkedAvlTree::default();
/// for key in &[4, 2, 6] {
///     tree.insert(*key);
/// }
///
/// let mut cursor = tree.cursor();
/// assert_eq!(cursor.last(&tree), Some(&6));
/// tree.delete(&4);
/// assert_eq!(cursor.prev(&tree), Some(&2));
/// ```
pub struct LinkedAvlTree<T, C = Natural> {
    arena: Arena<LinkedNode<T>>,
    root: Option<Handle>,
    comparator: C,
}

impl<T, C> LinkedAvlTree<T, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `LinkedAvlTree<T, C>` ordered by `comparator`.
    pub fn new(comparator: C) -> Self {
        Self::with_capacity(comparator, 0)
    }

    /// Constructs a new, empty `LinkedAvlTree<T, C>` with room for `capacity` nodes.
    pub fn with_capacity(comparator: C, capacity: usize) -> Self {
        LinkedAvlTree {
            arena: Arena::with_capacity(capacity),
            root: None,
            comparator,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }
}

impl<T, F, X> LinkedAvlTree<T, WithContext<F, X>>
where
    F: Fn(&T, &T, &X) -> Ordering,
{
    pub fn with_context(func: F, context: X) -> Self {
        Self::new(WithContext::new(func, context))
    }
}

impl<T, C> RawTree for LinkedAvlTree<T, C>
where
    C: Compare<T>,
{
    type Item = T;
    type Node = LinkedNode<T>;

    const MAX_HEIGHT: usize = AVL_MAX_HEIGHT;

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
        let mut top = self.root;
        let mut parent = None;
        let mut curr = self.root;

        while let Some(handle) = curr {
            let node = &self.arena[handle];
            let ordering = self.comparator.compare(&item, &node.item);
            if ordering == Ordering::Equal {
                return (handle, Some(item));
            }
            if node.balance != 0 {
                top = Some(handle);
            }
            let dir = Dir::of(ordering);
            parent = Some((handle, dir));
            curr = node.link(dir);
        }

        let new = self.arena.allocate(LinkedNode::new(item, None));
        splice(&mut self.arena, &mut self.root, Slot::below(parent.as_ref()), Some(new));
        let top = match top {
            Some(top) => top,
            None => return (new, None),
        };

        let mut curr = new;
        while curr != top {
            let parent = self.arena[curr]
                .parent
                .expect("Expected every node below the rebalancing point to have a parent.");
            let dir = if self.arena[parent].link(Dir::Left) == Some(curr) {
                Dir::Left
            } else {
                Dir::Right
            };
            self.arena[parent].balance += weight(dir);
            curr = parent;
        }

        let balance = self.arena[top].balance;
        if balance.abs() == 2 {
            let slot = slot_of(&self.arena, top);
            let heavy = if balance < 0 { Dir::Left } else { Dir::Right };
            let (subtree, _) = rebalance(&mut self.arena, top, heavy);
            splice(&mut self.arena, &mut self.root, slot, Some(subtree));
        }
        (new, None)
    }
}

impl<T, C> OrderedTree for LinkedAvlTree<T, C>
where
    C: Compare<T>,
{
    type Cursor = LinkedCursor;

    fn delete(&mut self, item: &T) -> Option<T> {
        let target = self.locate(item)?;
        let mut next = unlink_linked(&mut self.arena, &mut self.root, target);

        while let Some((y, dir)) = next {
            let slot = slot_of(&self.arena, y);
            next = match slot {
                Slot::Root => None,
                Slot::Child(parent, dir) => Some((parent, dir)),
            };

            let balance = self.arena[y].balance - weight(dir);
            self.arena[y].balance = balance;
            if balance.abs() == 1 {
                break;
            }
            if balance.abs() == 2 {
                let (subtree, shrunk) = rebalance(&mut self.arena, y, dir.opposite());
                splice(&mut self.arena, &mut self.root, slot, Some(subtree));
                if !shrunk {
                    break;
                }
            }
        }

        Some(self.arena.free(target).into_item())
    }

    fn cursor(&self) -> LinkedCursor {
        LinkedCursor::new()
    }
}

impl<T, C> Clone for LinkedAvlTree<T, C>
where
    T: Clone,
    C: Compare<T> + Clone,
{
    fn clone(&self) -> Self {
        let (arena, root) = copy_linked(&self.arena, self.root);
        LinkedAvlTree {
            arena,
            root,
            comparator: self.comparator.clone(),
        }
    }
}

impl<T> Default for LinkedAvlTree<T, Natural>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new(Natural)
    }
}
