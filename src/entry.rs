use std::cmp::Ordering;

/// A key paired with a payload, ordered and compared by its key alone.
///
/// Storing entries in a tree ordered by `Natural` turns it into a map: `find` and `delete`
/// take a lookup entry whose value is ignored, and `replace` swaps in a new payload under the
/// same key.
///
/// # Examples
///
/// ```
/// use bbst::{AvlTree, Entry, OrderedTree};
///
/// let mut map: AvlTree<_> = AvlTree::default();
/// map.insert(Entry::new("cpu", 10));
/// assert_eq!(map.replace(Entry::new("cpu", 25)), Some(Entry::new("cpu", 10)));
/// assert_eq!(map.find(&Entry::new("cpu", 0)).map(|entry| entry.value), Some(25));
/// ```
#[derive(Clone, Debug)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> Ord for Entry<K, V>
where
    K: Ord,
{
    fn cmp(&self, other: &Entry<K, V>) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K, V> PartialOrd for Entry<K, V>
where
    K: Ord,
{
    fn partial_cmp(&self, other: &Entry<K, V>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, V> PartialEq for Entry<K, V>
where
    K: Ord,
{
    fn eq(&self, other: &Entry<K, V>) -> bool {
        self.key == other.key
    }
}

impl<K, V> Eq for Entry<K, V> where K: Ord {}
