//! Structural checks used by the test suites.

use crate::arena::Handle;
use crate::bst::node::{BinaryNode, Dir, LinkedNode};
use crate::bst::raw::RawTree;
use crate::bst::OrderedTree;
use crate::red_black_tree::Color;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Asserts in-order ordering and that the reachable node count matches `count()`.
pub fn check_order<R>(tree: &R)
where
    R: OrderedTree,
{
    let arena = tree.arena();
    let mut stack: Vec<Handle> = Vec::new();
    let mut curr = tree.root();
    let mut prev: Option<Handle> = None;
    let mut reachable = 0;
    while curr.is_some() || !stack.is_empty() {
        while let Some(handle) = curr {
            stack.push(handle);
            curr = arena[handle].link(Dir::Left);
        }
        let handle = stack.pop().unwrap();
        if let Some(prev) = prev {
            assert_eq!(
                tree.order(arena[prev].item(), arena[handle].item()),
                Ordering::Less,
                "tree out of order",
            );
        }
        prev = Some(handle);
        reachable += 1;
        curr = arena[handle].link(Dir::Right);
    }
    assert_eq!(reachable, tree.count());
}

/// Asserts that every balance factor equals the height difference of its subtrees and lies in
/// `{-1, 0, 1}`.
pub fn check_avl<R>(tree: &R)
where
    R: OrderedTree,
    R::Node: BinaryNode<Mark = i8>,
{
    fn height<R>(tree: &R, node: Option<Handle>) -> i32
    where
        R: RawTree,
        R::Node: BinaryNode<Mark = i8>,
    {
        let handle = match node {
            Some(handle) => handle,
            None => return 0,
        };
        let left = height(tree, tree.arena()[handle].link(Dir::Left));
        let right = height(tree, tree.arena()[handle].link(Dir::Right));
        let balance = tree.arena()[handle].mark();
        assert_eq!(i32::from(balance), right - left, "stale balance factor");
        assert!(balance.abs() <= 1, "unbalanced node");
        1 + left.max(right)
    }

    check_order(tree);
    height(tree, tree.root());
}

/// Asserts the red-black rules: black root, no red node with a red child, equal black height.
pub fn check_red_black<R>(tree: &R)
where
    R: OrderedTree,
    R::Node: BinaryNode<Mark = Color>,
{
    fn is_red<R>(tree: &R, node: Option<Handle>) -> bool
    where
        R: RawTree,
        R::Node: BinaryNode<Mark = Color>,
    {
        node.map_or(false, |handle| tree.arena()[handle].mark() == Color::Red)
    }

    fn black_height<R>(tree: &R, node: Option<Handle>) -> usize
    where
        R: RawTree,
        R::Node: BinaryNode<Mark = Color>,
    {
        let handle = match node {
            Some(handle) => handle,
            None => return 0,
        };
        let left = tree.arena()[handle].link(Dir::Left);
        let right = tree.arena()[handle].link(Dir::Right);
        if is_red(tree, Some(handle)) {
            assert!(!is_red(tree, left) && !is_red(tree, right), "red node with a red child");
        }
        let left_height = black_height(tree, left);
        assert_eq!(left_height, black_height(tree, right), "unequal black heights");
        left_height + if is_red(tree, Some(handle)) { 0 } else { 1 }
    }

    check_order(tree);
    assert!(!is_red(tree, tree.root()), "red root");
    black_height(tree, tree.root());
}

/// Asserts that every child points back at its parent and the root has none.
pub fn check_parents<R>(tree: &R)
where
    R: OrderedTree,
    R::Node: LinkedNode,
{
    let arena = tree.arena();
    let mut stack = Vec::new();
    if let Some(root) = tree.root() {
        assert_eq!(arena[root].parent(), None, "root with a parent");
        stack.push(root);
    }
    while let Some(handle) = stack.pop() {
        for &dir in &[Dir::Left, Dir::Right] {
            if let Some(child) = arena[handle].link(dir) {
                assert_eq!(arena[child].parent(), Some(handle), "broken parent reference");
                stack.push(child);
            }
        }
    }
}

/// Pre-order listing of items, marks and child presence.
pub fn shape<R>(tree: &R) -> Vec<(R::Item, <R::Node as BinaryNode>::Mark, bool, bool)>
where
    R: OrderedTree,
    R::Item: Clone,
    <R::Node as BinaryNode>::Mark: Debug + PartialEq,
{
    let arena = tree.arena();
    let mut ret = Vec::new();
    let mut stack: Vec<Handle> = tree.root().into_iter().collect();
    while let Some(handle) = stack.pop() {
        let node = &arena[handle];
        let left = node.link(Dir::Left);
        let right = node.link(Dir::Right);
        ret.push((node.item().clone(), node.mark(), left.is_some(), right.is_some()));
        stack.extend(right);
        stack.extend(left);
    }
    ret
}

/// Clones the items in ascending order.
pub fn items<R>(tree: &R) -> Vec<R::Item>
where
    R: OrderedTree,
    R::Item: Clone,
{
    tree.iter().cloned().collect()
}

/// Insertion orders used by the structural tests.
pub fn insertion_orders(size: usize) -> Vec<Vec<usize>> {
    fn balanced(min: usize, max: usize, ret: &mut Vec<usize>) {
        if min >= max {
            return;
        }
        let mid = (min + max) / 2;
        ret.push(mid);
        balanced(min, mid, ret);
        balanced(mid + 1, max, ret);
    }

    let ascending: Vec<usize> = (0..size).collect();
    let descending: Vec<usize> = (0..size).rev().collect();
    let mut balanced_order = Vec::new();
    balanced(0, size, &mut balanced_order);
    let zig_zag = (0..size)
        .map(|i| if i % 2 == 0 { i / 2 } else { size - 1 - i / 2 })
        .collect();
    let shifted = (0..size).map(|i| (i + size / 2) % size).collect();
    let scrambled = (0..size).map(|i| (i * 7919) % size).collect();
    vec![ascending, descending, balanced_order, zig_zag, shifted, scrambled]
}
