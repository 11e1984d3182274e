//! Slab allocator that names its objects by stable integer handles.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A struct representing a slot of an `Arena<T>`.
///
/// A handle stays valid until the object it names is freed. Freed slots are recycled, but
/// every free bumps the slot's stamp, so a handle that outlives its object never names the
/// object that later reuses the slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    index: usize,
    stamp: u64,
}

impl Handle {
    /// Returns the position of the slot inside the arena.
    pub fn index(self) -> usize {
        self.index
    }
}

enum Block<T> {
    Occupied { value: T, stamp: u64 },
    Vacant { next: Option<usize>, stamp: u64 },
}

/// A growable allocator for a single type of object.
///
/// Objects are stored in one `Vec` and addressed by `Handle`s rather than references, which
/// lets tree nodes point at their children and parents without ownership cycles. Freed slots
/// form an intrusive free list and are handed out again before the vector grows.
///
/// # Examples
///
/// ```
/// use bbst::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.get(x).is_none());
///
/// let y = arena.allocate(3);
/// assert_eq!(x.index(), y.index());
/// assert!(arena.get(x).is_none());
/// ```
pub struct Arena<T> {
    head: Option<usize>,
    blocks: Vec<Block<T>>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty `Arena<T>` with room for `capacity` objects before it has to
    /// reallocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use bbst::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::with_capacity(1024);
    /// assert!(arena.capacity() >= 1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            head: None,
            blocks: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns its handle.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied { value, stamp: 0 });
                Handle {
                    index: self.blocks.len() - 1,
                    stamp: 0,
                }
            },
            Some(index) => {
                let (next, stamp) = match self.blocks[index] {
                    Block::Vacant { next, stamp } => (next, stamp),
                    Block::Occupied { .. } => panic!("Expected a vacant block at the head of the free list."),
                };
                self.blocks[index] = Block::Occupied { value, stamp };
                self.head = next;
                Handle { index, stamp }
            },
        }
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` names an invalid or vacant slot, or a slot that has been reused
    /// since the handle was issued.
    pub fn free(&mut self, handle: Handle) -> T {
        match self.blocks.get(handle.index) {
            Some(Block::Occupied { stamp, .. }) if *stamp == handle.stamp => {},
            Some(Block::Occupied { .. }) => panic!("Error: attempting to free a reused block."),
            Some(Block::Vacant { .. }) => panic!("Error: attempting to free vacant block."),
            None => panic!("Error: attempting to free invalid block."),
        }
        let vacant = Block::Vacant {
            next: self.head,
            stamp: handle.stamp.wrapping_add(1),
        };
        match mem::replace(&mut self.blocks[handle.index], vacant) {
            Block::Occupied { value, .. } => {
                self.len -= 1;
                self.head = Some(handle.index);
                value
            },
            Block::Vacant { .. } => unreachable!(),
        }
    }

    /// Returns `true` if `handle` names a live object.
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Returns an immutable reference to an object in the arena. Returns `None` if the handle
    /// does not name a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use bbst::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.blocks.get(handle.index) {
            Some(Block::Occupied { value, stamp }) if *stamp == handle.stamp => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None` if the handle
    /// does not name a live object.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.blocks.get_mut(handle.index) {
            Some(Block::Occupied { value, stamp }) if *stamp == handle.stamp => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of objects the arena can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.blocks.capacity()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
