use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 10_000;

macro_rules! bst_tests {
    ($($module_name:ident: $type_name:ident,)*) => {
        $(
            mod $module_name {
                use bbst::{$type_name, Entry, OrderedTree, TreeCursor};
                use rand::Rng;
                use std::cmp::Ordering;
                use super::{BTreeSet, NUM_OF_OPERATIONS};

                #[test]
                fn int_test_random_operations() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut tree = $type_name::default();
                    let mut expected = BTreeSet::new();

                    for _ in 0..NUM_OF_OPERATIONS {
                        let key = rng.gen_range(0, NUM_OF_OPERATIONS as u32);
                        assert_eq!(tree.insert(key), expected.insert(key));
                    }
                    assert_eq!(tree.count(), expected.len());
                    assert_eq!(
                        tree.iter().collect::<Vec<&u32>>(),
                        expected.iter().collect::<Vec<&u32>>(),
                    );

                    for _ in 0..NUM_OF_OPERATIONS {
                        let key = rng.gen_range(0, NUM_OF_OPERATIONS as u32);
                        let removed = expected.remove(&key);
                        assert_eq!(tree.delete(&key), if removed { Some(key) } else { None });
                        assert_eq!(tree.find(&key), None);
                    }
                    assert_eq!(tree.count(), expected.len());
                    assert_eq!(
                        tree.iter().collect::<Vec<&u32>>(),
                        expected.iter().collect::<Vec<&u32>>(),
                    );
                }

                #[test]
                fn int_test_cursor_traversal() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut keys: Vec<u32> = (0..1000).collect();
                    rng.shuffle(&mut keys);

                    let mut tree = $type_name::default();
                    for key in &keys {
                        tree.insert(*key);
                    }

                    let mut cursor = tree.cursor();
                    let mut forward = Vec::new();
                    while let Some(&key) = cursor.next(&tree) {
                        forward.push(key);
                    }
                    assert_eq!(forward, (0..1000).collect::<Vec<u32>>());
                    assert_eq!(cursor.current(&tree), None);

                    let mut backward = Vec::new();
                    while let Some(&key) = cursor.prev(&tree) {
                        backward.push(key);
                    }
                    assert_eq!(backward, (0..1000).rev().collect::<Vec<u32>>());

                    assert_eq!(cursor.first(&tree), Some(&0));
                    assert_eq!(cursor.prev(&tree), None);
                    assert_eq!(cursor.last(&tree), Some(&999));
                    assert_eq!(cursor.next(&tree), None);
                    assert_eq!(cursor.find(&tree, &1000), None);
                    assert_eq!(cursor.current(&tree), None);
                }

                #[test]
                fn int_test_empty() {
                    let mut tree: $type_name<u32> = $type_name::default();
                    let mut cursor = tree.cursor();
                    assert_eq!(tree.count(), 0);
                    assert_eq!(tree.delete(&1), None);
                    assert_eq!(cursor.first(&tree), None);
                    assert_eq!(cursor.last(&tree), None);
                    assert_eq!(cursor.next(&tree), None);
                    assert_eq!(cursor.prev(&tree), None);
                    assert_eq!(tree.iter().next(), None);
                }

                #[test]
                fn int_test_replace() {
                    let mut tree = $type_name::default();
                    tree.insert(Entry::new("gpu", 15));
                    tree.insert(Entry::new("ram", 20));
                    tree.insert(Entry::new("cpu", 10));

                    let old = tree.replace(Entry::new("cpu", 25)).map(Entry::into_pair);
                    assert_eq!(old, Some(("cpu", 10)));
                    assert_eq!(tree.count(), 3);
                    assert_eq!(tree.replace(Entry::new("ssd", 30)), None);
                    assert_eq!(tree.count(), 4);

                    let mut cursor = tree.cursor();
                    cursor.find(&tree, &Entry::new("gpu", 0));
                    let old = cursor.replace(&mut tree, Entry::new("gpu", 16)).map(Entry::into_pair);
                    assert_eq!(old, Some(("gpu", 15)));

                    let pairs: Vec<(&str, i32)> = tree.iter().cloned().map(Entry::into_pair).collect();
                    assert_eq!(pairs, vec![("cpu", 25), ("gpu", 16), ("ram", 20), ("ssd", 30)]);
                }

                #[test]
                fn int_test_cursors_survive_deletes() {
                    let mut tree = $type_name::default();
                    for key in 0..200u32 {
                        tree.insert(key);
                    }

                    let mut cursors: Vec<_> = (0..10).map(|_| tree.cursor()).collect();
                    for (index, cursor) in cursors.iter_mut().enumerate() {
                        let key = index as u32 * 20 + 10;
                        assert_eq!(cursor.find(&tree, &key), Some(&key));
                    }

                    for key in (0..200u32).filter(|key| key % 20 != 10) {
                        if key % 2 == 1 {
                            tree.delete(&key);
                        }
                    }

                    for (index, cursor) in cursors.iter_mut().enumerate() {
                        let key = index as u32 * 20 + 10;
                        assert_eq!(cursor.current(&tree), Some(&key));
                        assert!(!cursor.is_poisoned());
                        assert_eq!(cursor.next(&tree), Some(&(key + 2)));
                        assert_eq!(cursor.prev(&tree), Some(&key));
                        assert_eq!(cursor.prev(&tree), Some(&(key - 2)));
                    }
                }

                #[test]
                fn int_test_cursor_copy() {
                    let mut tree = $type_name::default();
                    for key in 0..10u32 {
                        tree.insert(key);
                    }

                    let mut cursor = tree.cursor();
                    cursor.find(&tree, &4);
                    let mut other = tree.cursor();
                    other.copy_from(&cursor);
                    assert_eq!(other.next(&tree), Some(&5));
                    assert_eq!(cursor.current(&tree), Some(&4));

                    tree.delete(&5);
                    assert_eq!(cursor.next(&tree), Some(&6));
                }

                #[test]
                fn int_test_cursors_agree_after_unrelated_delete() {
                    let mut tree = $type_name::default();
                    for key in 0..64u32 {
                        tree.insert(key);
                    }

                    let mut a = tree.cursor();
                    let mut b = tree.cursor();
                    assert_eq!(a.find(&tree, &20), Some(&20));
                    assert_eq!(b.find(&tree, &20), Some(&20));

                    tree.delete(&40);
                    assert_eq!(a.current(&tree), b.current(&tree));
                    for _ in 0..5 {
                        assert_eq!(a.next(&tree), b.next(&tree));
                    }
                    assert_eq!(a.current(&tree), Some(&25));

                    for key in 0..16u32 {
                        tree.delete(&key);
                    }
                    for _ in 0..8 {
                        assert_eq!(a.prev(&tree), b.prev(&tree));
                    }
                    assert_eq!(a.current(&tree), Some(&17));
                    assert_eq!(b.current(&tree), Some(&17));
                }

                #[test]
                fn int_test_cursor_poisoned_after_slot_reuse() {
                    let mut tree = $type_name::default();
                    for key in 0..8u32 {
                        tree.insert(key);
                    }

                    let mut cursor = tree.cursor();
                    assert_eq!(cursor.find(&tree, &3), Some(&3));
                    assert_eq!(tree.delete(&3), Some(3));
                    assert!(tree.insert(100));

                    assert_eq!(cursor.current(&tree), None);
                    assert_eq!(cursor.next(&tree), None);
                    assert!(cursor.is_poisoned());
                    assert_eq!(cursor.prev(&tree), None);

                    assert_eq!(cursor.find(&tree, &100), Some(&100));
                    assert!(!cursor.is_poisoned());
                }

                #[test]
                fn int_test_copy() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut tree = $type_name::default();
                    for _ in 0..1000 {
                        tree.insert(rng.gen::<u32>());
                    }

                    let mut copy = tree.clone();
                    assert_eq!(
                        copy.iter().collect::<Vec<&u32>>(),
                        tree.iter().collect::<Vec<&u32>>(),
                    );

                    let keys: Vec<u32> = tree.iter().cloned().collect();
                    for key in keys.iter().step_by(3) {
                        assert_eq!(copy.delete(key), Some(*key));
                    }
                    assert_eq!(tree.count(), keys.len());
                    assert_eq!(copy.count(), keys.len() - (keys.len() + 2) / 3);
                    for key in &keys {
                        assert_eq!(tree.find(key), Some(key));
                    }
                }

                #[test]
                fn int_test_custom_order() {
                    let mut tree: $type_name<String, _> = $type_name::new(|a: &String, b: &String| {
                        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
                    });
                    for word in "a tree of the words in some order".split(' ') {
                        tree.insert(word.to_string());
                    }
                    let words: Vec<&str> = tree.iter().map(|word| word.as_str()).collect();
                    assert_eq!(words, vec!["a", "in", "of", "the", "some", "tree", "order", "words"]);

                    let mut by_suffix: $type_name<u32, _> = $type_name::with_context(
                        |a: &u32, b: &u32, modulus: &u32| match (a % modulus).cmp(&(b % modulus)) {
                            Ordering::Equal => a.cmp(b),
                            ordering => ordering,
                        },
                        10,
                    );
                    for key in &[21, 13, 11, 32] {
                        by_suffix.insert(*key);
                    }
                    assert_eq!(by_suffix.iter().collect::<Vec<&u32>>(), vec![&11, &21, &32, &13]);
                }
            }
        )*
    }
}

bst_tests!(
    avl_tree: AvlTree,
    linked_avl_tree: LinkedAvlTree,
    red_black_tree: RedBlackTree,
    linked_red_black_tree: LinkedRedBlackTree,
);
