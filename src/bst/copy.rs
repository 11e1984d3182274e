use crate::arena::{Arena, Handle};
use crate::bst::node::{attach, BinaryNode, Dir, LinkedNode};

fn duplicate<N>(source: &Arena<N>, handle: Handle) -> N
where
    N: BinaryNode,
    N::Item: Clone,
{
    let node = &source[handle];
    N::from_parts(node.item().clone(), node.mark())
}

/// Duplicates the tree rooted at `root` in pre-order, tracking pending subtrees on an explicit
/// stack that never holds more than `max_height + 1` entries.
pub fn copy_stacked<N>(source: &Arena<N>, root: Option<Handle>, max_height: usize) -> (Arena<N>, Option<Handle>)
where
    N: BinaryNode,
    N::Item: Clone,
{
    let mut arena = Arena::with_capacity(source.len());
    let root = match root {
        Some(root) => root,
        None => return (arena, None),
    };
    let copy_root = arena.allocate(duplicate(source, root));
    let mut stack = Vec::with_capacity(max_height + 1);
    stack.push((root, copy_root));

    while let Some((original, copy)) = stack.pop() {
        for &dir in &[Dir::Right, Dir::Left] {
            if let Some(child) = source[original].link(dir) {
                let child_copy = arena.allocate(duplicate(source, child));
                attach(&mut arena, copy, dir, Some(child_copy));
                stack.push((child, child_copy));
            }
        }
    }

    debug!("Copied a tree of {} nodes.", arena.len());
    (arena, Some(copy_root))
}

/// Duplicates the tree rooted at `root` without any auxiliary stack, backtracking through the
/// parent references of both the source and the copy.
pub fn copy_linked<N>(source: &Arena<N>, root: Option<Handle>) -> (Arena<N>, Option<Handle>)
where
    N: LinkedNode,
    N::Item: Clone,
{
    let mut arena = Arena::with_capacity(source.len());
    let root = match root {
        Some(root) => root,
        None => return (arena, None),
    };
    let copy_root = arena.allocate(duplicate(source, root));
    let mut original = root;
    let mut copy = copy_root;

    'descend: loop {
        while let Some(left) = source[original].link(Dir::Left) {
            let left_copy = arena.allocate(duplicate(source, left));
            attach(&mut arena, copy, Dir::Left, Some(left_copy));
            original = left;
            copy = left_copy;
        }

        loop {
            if let Some(right) = source[original].link(Dir::Right) {
                let right_copy = arena.allocate(duplicate(source, right));
                attach(&mut arena, copy, Dir::Right, Some(right_copy));
                original = right;
                copy = right_copy;
                continue 'descend;
            }

            // climb until arriving from a left child, whose parent's right side is still pending
            loop {
                let child = original;
                original = match source[original].parent() {
                    Some(parent) => parent,
                    None => break 'descend,
                };
                copy = arena[copy]
                    .parent()
                    .expect("Expected the copy to mirror the source's parent chain.");
                if source[original].link(Dir::Left) == Some(child) {
                    break;
                }
            }
        }
    }

    debug!("Copied a tree of {} nodes.", arena.len());
    (arena, Some(copy_root))
}
