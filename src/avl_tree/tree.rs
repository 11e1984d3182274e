use crate::arena::{Arena, Handle};
use crate::avl_tree::node::Node;
use crate::avl_tree::{rebalance, weight, AVL_MAX_HEIGHT};
use crate::bst::node::{splice, unlink_stacked, BinaryNode, Dir, Slot};
use crate::bst::raw::{RawTree, Versioned};
use crate::bst::{copy_stacked, Compare, Natural, OrderedTree, StackCursor, WithContext};
use std::cmp::Ordering;

/// An avl tree whose nodes carry no parent references.
///
/// Every mutation records the path it descends and retraces it to fix balance factors. A
/// generation counter stamps each structural change so that cursors can detect when their
/// cached ancestor stack went stale.
///
/// # Examples
///
/// ```
/// use bbst::{AvlTree, OrderedTree, TreeCursor};
///
/// let mut tree: AvlTree<u32> = AvlTree::default();
/// assert!(tree.insert(3));
/// assert!(tree.insert(1));
/// assert!(!tree.insert(3));
///
/// assert_eq!(tree.count(), 2);
/// assert_eq!(tree.find(&1), Some(&1));
///
/// let mut cursor = tree.cursor();
/// assert_eq!(cursor.first(&tree), Some(&1));
/// assert_eq!(cursor.next(&tree), Some(&3));
///
/// assert_eq!(tree.delete(&1), Some(1));
/// assert_eq!(cursor.current(&tree), Some(&3));
/// assert_eq!(cursor.prev(&tree), None);
/// ```
pub struct AvlTree<T, C = Natural> {
    arena: Arena<Node<T>>,
    root: Option<Handle>,
    comparator: C,
    generation: u64,
}

impl<T, C> AvlTree<T, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `AvlTree<T, C>` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bbst::{AvlTree, OrderedTree};
    ///
    /// let mut tree: AvlTree<u32, _> = AvlTree::new(|a: &u32, b: &u32| b.cmp(a));
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&2, &1]);
    /// ```
    pub fn new(comparator: C) -> Self {
        Self::with_capacity(comparator, 0)
    }

    /// Constructs a new, empty `AvlTree<T, C>` with room for `capacity` nodes.
    pub fn with_capacity(comparator: C, capacity: usize) -> Self {
        AvlTree {
            arena: Arena::with_capacity(capacity),
            root: None,
            comparator,
            generation: 0,
        }
    }

    /// Returns the number of structural changes made to the tree so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }
}

impl<T, F, X> AvlTree<T, WithContext<F, X>>
where
    F: Fn(&T, &T, &X) -> Ordering,
{
    /// Constructs a new, empty `AvlTree` ordered by `func`, which receives `context` on every
    /// comparison.
    pub fn with_context(func: F, context: X) -> Self {
        Self::new(WithContext::new(func, context))
    }
}

impl<T, C> RawTree for AvlTree<T, C>
where
    C: Compare<T>,
{
    type Item = T;
    type Node = Node<T>;

    const MAX_HEIGHT: usize = AVL_MAX_HEIGHT;

    fn arena(&self) -> &Arena<Node<T>> {
        &self.arena
    }

    fn arena_mut(&mut self) -> &mut Arena<Node<T>> {
        &mut self.arena
    }

    fn root(&self) -> Option<Handle> {
        self.root
    }

    fn order(&self, a: &T, b: &T) -> Ordering {
        self.comparator.compare(a, b)
    }

    fn insert_raw(&mut self, item: T) -> (Handle, Option<T>) {
        // `top` is the deepest node on the path with a non-zero balance factor: the only node
        // that can become unbalanced. `dirs` holds the directions taken from it onward.
        let mut top = self.root;
        let mut top_slot = Slot::Root;
        let mut dirs = Vec::with_capacity(AVL_MAX_HEIGHT);
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
                top_slot = Slot::below(parent.as_ref());
                dirs.clear();
            }
            let dir = Dir::of(ordering);
            dirs.push(dir);
            parent = Some((handle, dir));
            curr = node.link(dir);
        }

        let new = self.arena.allocate(Node::new(item));
        splice(&mut self.arena, &mut self.root, Slot::below(parent.as_ref()), Some(new));
        self.generation += 1;

        let top = match top {
            Some(top) => top,
            None => return (new, None),
        };
        let mut curr = top;
        for &dir in &dirs {
            let node = &mut self.arena[curr];
            node.balance += weight(dir);
            if let Some(next) = node.link(dir) {
                curr = next;
            }
        }

        let balance = self.arena[top].balance;
        if balance.abs() == 2 {
            let heavy = if balance < 0 { Dir::Left } else { Dir::Right };
            let (subtree, _) = rebalance(&mut self.arena, top, heavy);
            splice(&mut self.arena, &mut self.root, top_slot, Some(subtree));
        }
        (new, None)
    }
}

impl<T, C> Versioned for AvlTree<T, C>
where
    C: Compare<T>,
{
    fn generation(&self) -> u64 {
        self.generation
    }
}

impl<T, C> OrderedTree for AvlTree<T, C>
where
    C: Compare<T>,
{
    type Cursor = StackCursor;

    fn delete(&mut self, item: &T) -> Option<T> {
        let mut path = Vec::with_capacity(AVL_MAX_HEIGHT);
        let mut curr = self.root;
        let target = loop {
            let handle = curr?;
            let node = &self.arena[handle];
            match self.comparator.compare(item, &node.item) {
                Ordering::Equal => break handle,
                ordering => {
                    let dir = Dir::of(ordering);
                    path.push((handle, dir));
                    curr = node.link(dir);
                },
            }
        };

        unlink_stacked(&mut self.arena, &mut self.root, &mut path, target);

        // each popped node lost height on side `dir`
        while let Some((y, dir)) = path.pop() {
            let balance = self.arena[y].balance - weight(dir);
            self.arena[y].balance = balance;
            if balance.abs() == 1 {
                break;
            }
            if balance.abs() == 2 {
                let (subtree, shrunk) = rebalance(&mut self.arena, y, dir.opposite());
                splice(&mut self.arena, &mut self.root, Slot::below(path.last()), Some(subtree));
                if !shrunk {
                    break;
                }
            }
        }

        self.generation += 1;
        Some(self.arena.free(target).into_item())
    }

    fn cursor(&self) -> StackCursor {
        StackCursor::new()
    }
}

impl<T, C> Clone for AvlTree<T, C>
where
    T: Clone,
    C: Compare<T> + Clone,
{
    fn clone(&self) -> Self {
        let (arena, root) = copy_stacked(&self.arena, self.root, AVL_MAX_HEIGHT);
        AvlTree {
            arena,
            root,
            comparator: self.comparator.clone(),
            generation: 0,
        }
    }
}

impl<T> Default for AvlTree<T, Natural>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new(Natural)
    }
}
