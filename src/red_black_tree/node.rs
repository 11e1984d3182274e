use crate::arena::Handle;
use crate::bst::node::{self, BinaryNode, Dir};
use crate::red_black_tree::Color;

/// A struct representing an internal node of a red black tree.
pub struct Node<T> {
    pub item: T,
    pub links: [Option<Handle>; 2],
    pub color: Color,
}

/// A red black tree node that also references its parent.
pub struct LinkedNode<T> {
    pub item: T,
    pub links: [Option<Handle>; 2],
    pub parent: Option<Handle>,
    pub color: Color,
}

impl<T> Node<T> {
    pub fn new(item: T) -> Self {
        Node {
            item,
            links: [None, None],
            color: Color::Red,
        }
    }
}

impl<T> LinkedNode<T> {
    pub fn new(item: T) -> Self {
        LinkedNode {
            item,
            links: [None, None],
            parent: None,
            color: Color::Red,
        }
    }
}

impl<T> BinaryNode for Node<T> {
    type Item = T;
    type Mark = Color;

    fn from_parts(item: T, color: Color) -> Self {
        Node {
            item,
            links: [None, None],
            color,
        }
    }

    fn item(&self) -> &T {
        &self.item
    }

    fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    fn into_item(self) -> T {
        self.item
    }

    fn link(&self, dir: Dir) -> Option<Handle> {
        self.links[dir.index()]
    }

    fn set_link(&mut self, dir: Dir, child: Option<Handle>) {
        self.links[dir.index()] = child;
    }

    fn mark(&self) -> Color {
        self.color
    }

    fn set_mark(&mut self, color: Color) {
        self.color = color;
    }
}

impl<T> BinaryNode for LinkedNode<T> {
    type Item = T;
    type Mark = Color;

    fn from_parts(item: T, color: Color) -> Self {
        LinkedNode {
            color,
            ..LinkedNode::new(item)
        }
    }

    fn item(&self) -> &T {
        &self.item
    }

    fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    fn into_item(self) -> T {
        self.item
    }

    fn link(&self, dir: Dir) -> Option<Handle> {
        self.links[dir.index()]
    }

    fn set_link(&mut self, dir: Dir, child: Option<Handle>) {
        self.links[dir.index()] = child;
    }

    fn mark(&self) -> Color {
        self.color
    }

    fn set_mark(&mut self, color: Color) {
        self.color = color;
    }

    fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }
}

impl<T> node::LinkedNode for LinkedNode<T> {
    fn parent(&self) -> Option<Handle> {
        self.parent
    }
}
