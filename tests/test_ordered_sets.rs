use ordered_sets::{OrderedSet, SplaySet, TreapSet};
use rand::{Rng, SeedableRng, XorShiftRng};
use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

const NUM_OF_OPERATIONS: usize = 100_000;
const KEY_RANGE: i32 = 2_000;

fn assert_matches_btreeset<S: OrderedSet<i32>>(set: &mut S) {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(-KEY_RANGE, KEY_RANGE);
        match rng.gen_range(1, 7) {
            1 => assert_eq!(set.insert(key), expected.insert(key)),
            2 => assert_eq!(set.remove(&key), expected.take(&key)),
            3 => assert_eq!(set.contains(&key), expected.contains(&key)),
            4 => assert_eq!(set.predecessor(&key), expected.range(..key).next_back()),
            5 => assert_eq!(
                set.successor(&key),
                expected.range((Excluded(key), Unbounded)).next(),
            ),
            _ => {
                let hi = key + rng.gen_range(0, 100);
                assert_eq!(
                    set.range(&key, &hi),
                    expected.range(key..=hi).collect::<Vec<&i32>>(),
                );
            },
        }
        assert_eq!(set.len(), expected.len());
    }

    let lo = i32::min_value();
    let hi = i32::max_value();
    assert_eq!(set.range(&lo, &hi), expected.iter().collect::<Vec<&i32>>());
}

#[test]
fn int_test_splayset() {
    assert_matches_btreeset(&mut SplaySet::new());
}

#[test]
fn int_test_treapset() {
    assert_matches_btreeset(&mut TreapSet::new());
}

#[test]
fn int_test_seeded_treapset() {
    assert_matches_btreeset(&mut TreapSet::with_seed([7, 11, 13, 17]).unwrap());
}

fn assert_scenario<S: OrderedSet<i32>>(set: &mut S) {
    for key in &[5, 3, 8, 1, 4] {
        assert!(set.insert(*key));
    }
    assert!(set.contains(&3));
    assert_eq!(set.predecessor(&4), Some(&3));
    assert_eq!(set.successor(&4), Some(&5));
    assert_eq!(set.range(&2, &6), vec![&3, &4, &5]);

    assert_eq!(set.remove(&5), Some(5));
    assert_eq!(set.successor(&4), Some(&8));
    assert!(!set.contains(&5));

    assert_eq!(set.predecessor(&1), None);
    assert_eq!(set.successor(&8), None);
    assert!(set.range(&6, &2).is_empty());
    assert_eq!(set.len(), 4);
}

#[test]
fn int_test_scenario() {
    assert_scenario(&mut SplaySet::new());
    assert_scenario(&mut TreapSet::new());
}

fn assert_reinsert_is_idempotent<S: OrderedSet<i32>>(set: &mut S) {
    for key in 0..100 {
        set.insert(key * 2);
    }
    let before = set.range(&0, &200).into_iter().cloned().collect::<Vec<i32>>();
    for key in 0..100 {
        assert!(!set.insert(key * 2));
    }
    let after = set.range(&0, &200).into_iter().cloned().collect::<Vec<i32>>();
    assert_eq!(before, after);
    assert_eq!(set.len(), 100);
    assert_eq!(set.predecessor(&51), Some(&50));
    assert_eq!(set.successor(&51), Some(&52));
}

#[test]
fn int_test_reinsert_is_idempotent() {
    assert_reinsert_is_idempotent(&mut SplaySet::new());
    assert_reinsert_is_idempotent(&mut TreapSet::new());
}

#[test]
fn int_test_sorted_workloads() {
    // sorted inserts are the worst case for an unbalanced tree
    let mut splay = SplaySet::new();
    let mut treap = TreapSet::new();
    for key in 0..50_000 {
        splay.insert(key);
        treap.insert(key);
        assert!(splay.contains(&key));
    }
    for key in (0..50_000).rev() {
        assert_eq!(splay.remove(&key), Some(key));
        assert_eq!(treap.remove(&key), Some(key));
    }
    assert!(splay.is_empty());
    assert!(treap.is_empty());
}
