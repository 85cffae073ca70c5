use bstmap::{BstMap, Error};
use quickcheck_macros::quickcheck;

use std::collections::{HashMap, HashSet};

use crate::Op;

/// Applies a set of operations to a map and a hashmap, checking the tree's ordering after every
/// one. This way we can ensure that after a random smattering of inserts and deletes we have the
/// same set of keys in both.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut BstMap<K, V>, map: &mut HashMap<K, V>)
where
    K: std::hash::Hash + Eq + Clone + Ord + std::fmt::Debug,
    V: std::fmt::Debug + PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(k.clone(), v.clone());
                map.insert(k.clone(), v.clone());
            }
            Op::Remove(k) => {
                assert_eq!(bst.delete(k).ok(), map.remove(k));
            }
        }
        assert_eq!(bst.check_invariants(), Ok(()));
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut bst = BstMap::new();
    let mut map = HashMap::new();

    do_ops(&ops, &mut bst, &mut map);
    bst.len() == map.len() && map.keys().all(|key| bst.find(key) == map.get(key))
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut bst = BstMap::new();
    for x in &xs {
        bst.insert(*x, *x);
    }

    xs.iter().all(|x| bst.get(x) == Ok(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut bst = BstMap::new();
    for x in &xs {
        bst.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| bst.get(x) == Err(Error::KeyNotFound) && !bst.contains_key(x))
}

#[quickcheck]
fn round_trip(xs: HashSet<i16>) -> bool {
    let bst: BstMap<_, _> = xs.iter().map(|x| (*x, i32::from(*x) * 3)).collect();

    bst.len() == xs.len() && xs.iter().all(|x| bst.get(x) == Ok(&(i32::from(*x) * 3)))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut bst = BstMap::new();
    for x in &xs {
        bst.insert(*x, *x);
    }
    for delete in &deletes {
        let _ = bst.remove(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    bst.check_invariants().is_ok()
        && deletes.iter().all(|x| !bst.contains_key(x))
        && still_present.iter().all(|x| bst.contains_key(x))
}

#[quickcheck]
fn delete_then_reinsert(xs: Vec<(i8, u8)>, key: i8, value: u8) -> bool {
    let mut bst: BstMap<_, _> = xs.into_iter().collect();
    let _ = bst.remove(&key);
    let absent = bst.get(&key) == Err(Error::KeyNotFound);

    bst.insert(key, value);
    absent && bst.get(&key) == Ok(&value) && bst.check_invariants().is_ok()
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<(i8, u8)>) -> bool {
    let bst: BstMap<_, _> = xs.iter().copied().collect();

    let mut expected: Vec<_> = xs.iter().map(|(k, _)| *k).collect();
    expected.sort_unstable();
    expected.dedup();

    bst.keys().copied().eq(expected)
}
