use crate::arena::Handle;
use crate::bst::node::{self, BinaryNode, Dir};

/// A node of an avl tree without a parent reference.
pub struct Node<T> {
    pub item: T,
    pub links: [Option<Handle>; 2],
    /// Height of the right subtree minus height of the left subtree.
    pub balance: i8,
}

/// A node of an avl tree that also references its parent.
pub struct LinkedNode<T> {
    pub item: T,
    pub links: [Option<Handle>; 2],
    pub parent: Option<Handle>,
    pub balance: i8,
}

impl<T> Node<T> {
    pub fn new(item: T) -> Self {
        Node {
            item,
            links: [None, None],
            balance: 0,
        }
    }
}

impl<T> LinkedNode<T> {
    pub fn new(item: T, parent: Option<Handle>) -> Self {
        LinkedNode {
            item,
            links: [None, None],
            parent,
            balance: 0,
        }
    }
}

impl<T> BinaryNode for Node<T> {
    type Item = T;
    type Mark = i8;

    fn from_parts(item: T, balance: i8) -> Self {
        Node {
            balance,
            ..Node::new(item)
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

    fn mark(&self) -> i8 {
        self.balance
    }

    fn set_mark(&mut self, balance: i8) {
        self.balance = balance;
    }
}

impl<T> BinaryNode for LinkedNode<T> {
    type Item = T;
    type Mark = i8;

    fn from_parts(item: T, balance: i8) -> Self {
        LinkedNode {
            balance,
            ..LinkedNode::new(item, None)
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

    fn mark(&self) -> i8 {
        self.balance
    }

    fn set_mark(&mut self, balance: i8) {
        self.balance = balance;
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
