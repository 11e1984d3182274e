use crate::arena::{Arena, Handle};
use crate::bst::node::{attach, rotate, splice, unlink_stacked, BinaryNode, Dir, Slot};
use crate::bst::raw::{RawTree, Versioned};
use crate::bst::{copy_stacked, Compare, Natural, OrderedTree, StackCursor, WithContext};
use crate::red_black_tree::node::Node;
use crate::red_black_tree::{is_red, paint, Color, RB_MAX_HEIGHT};
use std::cmp::Ordering;

/// A red black tree whose nodes carry no parent references.
///
/// Insertions and deletions record the path they descend and fix colors bottom-up along it.
/// Each structural change bumps a generation counter that cursors use to detect stale
/// ancestor stacks.
///
/// # Examples
///
/// ```
/// use bbst::{OrderedTree, RedBlackTree, TreeCursor};
///
/// let mut tree: RedBlackTree<u32> = RedBlackTree::default();
/// for key in 0..10 {
///     tree.insert(key);
/// }
/// assert_eq!(tree.delete(&4), Some(4));
///
/// let mut cursor = tree.cursor();
/// assert_eq!(cursor.find(&tree, &3), Some(&3));
/// assert_eq!(cursor.next(&tree), Some(&5));
/// ```
pub struct RedBlackTree<T, C = Natural> {
    arena: Arena<Node<T>>,
    root: Option<Handle>,
    comparator: C,
    generation: u64,
}

impl<T, C> RedBlackTree<T, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `RedBlackTree<T, C>` ordered by `comparator`.
    pub fn new(comparator: C) -> Self {
        Self::with_capacity(comparator, 0)
    }

    /// Constructs a new, empty `RedBlackTree<T, C>` with room for `capacity` nodes.
    pub fn with_capacity(comparator: C, capacity: usize) -> Self {
        RedBlackTree {
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

    fn fix_insert(&mut self, path: &mut Vec<(Handle, Dir)>) {
        while path.len() >= 2 {
            let len = path.len();
            let (parent, parent_dir) = path[len - 1];
            if !is_red(&self.arena, Some(parent)) {
                break;
            }
            let (grandparent, dir) = path[len - 2];
            let uncle = self.arena[grandparent].link(dir.opposite());

            if let Some(uncle) = uncle.filter(|&uncle| is_red(&self.arena, Some(uncle))) {
                paint(&mut self.arena, parent, Color::Black);
                paint(&mut self.arena, uncle, Color::Black);
                paint(&mut self.arena, grandparent, Color::Red);
                trace!("Pushed a red violation up to {:?}.", grandparent);
                path.truncate(len - 2);
                continue;
            }

            let pivot = if parent_dir == dir {
                parent
            } else {
                let pivot = rotate(&mut self.arena, parent, dir);
                attach(&mut self.arena, grandparent, dir, Some(pivot));
                pivot
            };
            paint(&mut self.arena, grandparent, Color::Red);
            paint(&mut self.arena, pivot, Color::Black);
            trace!("Rotating {:?} toward {:?} after insertion.", grandparent, dir.opposite());
            let top = rotate(&mut self.arena, grandparent, dir.opposite());
            splice(&mut self.arena, &mut self.root, Slot::below(path.iter().rev().nth(2)), Some(top));
            break;
        }

        if let Some(root) = self.root {
            paint(&mut self.arena, root, Color::Black);
        }
    }

    /// Restores the black height below the last node of `path`, whose child on the recorded
    /// side is one black node short.
    fn fix_delete(&mut self, path: &mut Vec<(Handle, Dir)>) {
        loop {
            let short = match path.last() {
                None => self.root,
                Some(&(parent, dir)) => self.arena[parent].link(dir),
            };
            if let Some(short) = short.filter(|&short| is_red(&self.arena, Some(short))) {
                paint(&mut self.arena, short, Color::Black);
                return;
            }
            let (parent, dir) = match path.last() {
                None => return,
                Some(&last) => last,
            };

            let mut sibling = self.sibling(parent, dir);
            if is_red(&self.arena, Some(sibling)) {
                trace!("Red sibling below {:?}.", parent);
                paint(&mut self.arena, sibling, Color::Black);
                paint(&mut self.arena, parent, Color::Red);
                let top = rotate(&mut self.arena, parent, dir);
                splice(&mut self.arena, &mut self.root, Slot::below(path.iter().rev().nth(1)), Some(top));
                let len = path.len();
                path[len - 1] = (top, dir);
                path.push((parent, dir));
                sibling = self.sibling(parent, dir);
            }

            let near = self.arena[sibling].link(dir);
            let far = self.arena[sibling].link(dir.opposite());
            if !is_red(&self.arena, near) && !is_red(&self.arena, far) {
                paint(&mut self.arena, sibling, Color::Red);
                path.pop();
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
            let top = rotate(&mut self.arena, parent, dir);
            splice(&mut self.arena, &mut self.root, Slot::below(path.iter().rev().nth(1)), Some(top));
            return;
        }
    }

    fn sibling(&self, parent: Handle, dir: Dir) -> Handle {
        self.arena[parent]
            .link(dir.opposite())
            .expect("Expected the sibling of a black-short subtree to be `Some`.")
    }
}

impl<T, F, X> RedBlackTree<T, WithContext<F, X>>
where
    F: Fn(&T, &T, &X) -> Ordering,
{
    /// Constructs a new, empty `RedBlackTree` ordered by `func`, which receives `context` on
    /// every comparison.
    pub fn with_context(func: F, context: X) -> Self {
        Self::new(WithContext::new(func, context))
    }
}

impl<T, C> RawTree for RedBlackTree<T, C>
where
    C: Compare<T>,
{
    type Item = T;
    type Node = Node<T>;

    const MAX_HEIGHT: usize = RB_MAX_HEIGHT;

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
        let mut path = Vec::with_capacity(RB_MAX_HEIGHT);
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            match self.comparator.compare(&item, &node.item) {
                Ordering::Equal => return (handle, Some(item)),
                ordering => {
                    let dir = Dir::of(ordering);
                    path.push((handle, dir));
                    curr = node.link(dir);
                },
            }
        }

        let new = self.arena.allocate(Node::new(item));
        splice(&mut self.arena, &mut self.root, Slot::below(path.last()), Some(new));
        self.generation += 1;
        self.fix_insert(&mut path);
        (new, None)
    }
}

impl<T, C> Versioned for RedBlackTree<T, C>
where
    C: Compare<T>,
{
    fn generation(&self) -> u64 {
        self.generation
    }
}

impl<T, C> OrderedTree for RedBlackTree<T, C>
where
    C: Compare<T>,
{
    type Cursor = StackCursor;

    fn delete(&mut self, item: &T) -> Option<T> {
        let mut path = Vec::with_capacity(RB_MAX_HEIGHT);
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
        if self.arena[target].color == Color::Black {
            self.fix_delete(&mut path);
        }

        self.generation += 1;
        Some(self.arena.free(target).into_item())
    }

    fn cursor(&self) -> StackCursor {
        StackCursor::new()
    }
}

impl<T, C> Clone for RedBlackTree<T, C>
where
    T: Clone,
    C: Compare<T> + Clone,
{
    fn clone(&self) -> Self {
        let (arena, root) = copy_stacked(&self.arena, self.root, RB_MAX_HEIGHT);
        RedBlackTree {
            arena,
            root,
            comparator: self.comparator.clone(),
            generation: 0,
        }
    }
}

impl<T> Default for RedBlackTree<T, Natural>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new(Natural)
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackTree;
    use crate::bst::verify;
    use crate::bst::{OrderedTree, TreeCursor};
    use crate::red_black_tree::Color;

    fn build(keys: &[usize]) -> RedBlackTree<usize> {
        let mut tree = RedBlackTree::default();
        for &key in keys {
            assert!(tree.insert(key));
        }
        tree
    }

    #[test]
    fn test_insert_scenario() {
        let tree = build(&[10, 5, 15, 1, 7]);
        verify::check_red_black(&tree);
        assert_eq!(
            verify::shape(&tree),
            vec![
                (10, Color::Black, true, true),
                (5, Color::Black, true, true),
                (1, Color::Red, false, false),
                (7, Color::Red, false, false),
                (15, Color::Black, false, false),
            ],
        );
    }

    #[test]
    fn test_insert_rotations() {
        // inner grandchild, rotated twice
        let tree = build(&[3, 1, 2]);
        assert_eq!(
            verify::shape(&tree),
            vec![
                (2, Color::Black, true, true),
                (1, Color::Red, false, false),
                (3, Color::Red, false, false),
            ],
        );

        let tree = build(&[1, 2, 3]);
        assert_eq!(verify::shape(&tree)[0], (2, Color::Black, true, true));
    }

    #[test]
    fn test_delete_reverse() {
        let mut tree = build(&(0..15).collect::<Vec<usize>>());
        for key in (0..15).rev() {
            assert_eq!(tree.delete(&key), Some(key));
            verify::check_red_black(&tree);
            assert_eq!(verify::items(&tree), (0..key).collect::<Vec<usize>>());
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn test_insert_delete_orders() {
        for order in verify::insertion_orders(100) {
            let mut tree = RedBlackTree::default();
            for &key in &order {
                tree.insert(key);
                verify::check_red_black(&tree);
            }
            let deletions = vec![order.clone(), order.iter().rev().cloned().collect()];
            for deletion in deletions {
                let mut tree = tree.clone();
                for key in &deletion {
                    assert_eq!(tree.delete(key), Some(*key));
                    verify::check_red_black(&tree);
                }
                assert!(tree.is_empty());
            }
        }
    }

    #[test]
    fn test_delete_missing() {
        let mut tree = build(&[2, 4, 6]);
        assert_eq!(tree.delete(&5), None);
        assert_eq!(tree.generation(), 3);
        assert_eq!(tree.count(), 3);
    }

    #[test]
    fn test_clone() {
        let tree = build(&(0..20).collect::<Vec<usize>>());
        let mut copy = tree.clone();
        assert_eq!(verify::shape(&copy), verify::shape(&tree));
        for key in 0..10 {
            copy.delete(&key);
        }
        verify::check_red_black(&copy);
        assert_eq!(tree.count(), 20);
    }

    #[test]
    fn test_cursor_insert() {
        let mut tree = build(&[10, 20, 30]);
        let mut cursor = tree.cursor();
        assert!(cursor.insert(&mut tree, 25));
        assert_eq!(cursor.current(&tree), Some(&25));
        assert_eq!(cursor.next(&tree), Some(&30));

        assert!(!cursor.insert(&mut tree, 10));
        assert_eq!(cursor.prev(&tree), None);
        assert_eq!(cursor.next(&tree), Some(&10));
    }

    #[test]
    fn test_cursor_walk_during_deletes() {
        let mut tree = build(&(0..50).collect::<Vec<usize>>());
        let mut cursor = tree.cursor();
        let mut seen = Vec::new();
        let mut curr = cursor.first(&tree).cloned();
        while let Some(key) = curr {
            seen.push(key);
            if key + 1 < 50 && key % 3 == 0 {
                tree.delete(&(key + 1));
            }
            curr = cursor.next(&tree).cloned();
        }
        let expected: Vec<usize> = (0..50).filter(|key| key % 3 != 1).collect();
        assert_eq!(seen, expected);
        verify::check_red_black(&tree);
    }
}
