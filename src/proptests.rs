// proptests.rs - Model-based property tests
use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Op {
    Emplace(u16, i32),
    TryEmplace(u16, i32),
    Remove(u16),
    EraseAt(usize),
    EraseRange(usize, usize),
    SwapValues(u16, u16),
    SwapElements(u16, u16),
    Sort,
    SortDesc,
    EmplaceSorted(u16, i32),
    Clear,
}

fn key() -> impl Strategy<Value = u16> {
    0u16..64
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (key(), any::<i32>()).prop_map(|(k, v)| Op::Emplace(k, v)),
        2 => (key(), any::<i32>()).prop_map(|(k, v)| Op::TryEmplace(k, v)),
        3 => key().prop_map(Op::Remove),
        1 => (0usize..80).prop_map(Op::EraseAt),
        1 => (0usize..80, 0usize..8).prop_map(|(s, n)| Op::EraseRange(s, n)),
        1 => (key(), key()).prop_map(|(a, b)| Op::SwapValues(a, b)),
        1 => (key(), key()).prop_map(|(a, b)| Op::SwapElements(a, b)),
        1 => Just(Op::Sort),
        1 => Just(Op::SortDesc),
        2 => (key(), -50i32..50).prop_map(|(k, v)| Op::EmplaceSorted(k, v)),
        1 => Just(Op::Clear),
    ]
}

/// Every stored key maps back through dense, and agrees with the model.
fn check_against_model(set: &SparseSet<i32, u16>, model: &BTreeMap<u16, i32>) {
    crate::debug_assert_consistent!(set);
    assert!(set.validate().is_ok());
    assert_eq!(set.len(), model.len());
    for (&key, &value) in model {
        let slot = set.find(key).expect("model key missing from set");
        assert_eq!(set.sparse_index(slot), key);
        assert_eq!(set.at(key), Ok(&value));
    }
    for key in set.keys() {
        assert!(model.contains_key(key));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_operations_match_model(ops in proptest::collection::vec(op(), 0..120)) {
        let mut set: SparseSet<i32, u16> = SparseSet::with_config(SparseSetConfig::paranoid());
        let mut model: BTreeMap<u16, i32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Emplace(k, v) => {
                    if !model.contains_key(&k) {
                        set.emplace(k, v);
                        model.insert(k, v);
                    }
                }
                Op::TryEmplace(k, v) => {
                    let (slot, inserted) = set.try_emplace(k, v);
                    prop_assert_eq!(inserted, !model.contains_key(&k));
                    model.entry(k).or_insert(v);
                    prop_assert_eq!(set.values()[slot], model[&k]);
                }
                Op::Remove(k) => {
                    prop_assert_eq!(set.remove(k), model.remove(&k));
                }
                Op::EraseAt(position) => {
                    if position < set.len() {
                        let k = set.sparse_index(position);
                        set.erase_at(position);
                        model.remove(&k);
                    }
                }
                Op::EraseRange(start, n) => {
                    let start = start.min(set.len());
                    let end = (start + n).min(set.len());
                    let doomed: Vec<u16> = set.keys()[start..end].to_vec();
                    set.erase_range(start..end);
                    for k in doomed {
                        model.remove(&k);
                    }
                }
                Op::SwapValues(a, b) => {
                    let swapped = set.try_swap_values(a, b);
                    prop_assert_eq!(
                        swapped,
                        a != b && model.contains_key(&a) && model.contains_key(&b)
                    );
                    if swapped {
                        let (va, vb) = (model[&a], model[&b]);
                        model.insert(a, vb);
                        model.insert(b, va);
                    }
                }
                Op::SwapElements(a, b) => {
                    if set.try_swap_elements(a, b) {
                        let (va, vb) = (model[&a], model[&b]);
                        model.insert(a, vb);
                        model.insert(b, va);
                    }
                }
                Op::Sort => {
                    set.sort();
                    prop_assert!(set.is_sorted());
                }
                Op::SortDesc => {
                    set.sort_by(|a, b| b.cmp(a));
                    prop_assert!(set.is_sorted_by(|a, b| b.cmp(a)));
                }
                Op::EmplaceSorted(k, v) => {
                    // Sorted insertion is only meaningful while the set is ascending.
                    if set.is_sorted() && !model.contains_key(&k) {
                        set.emplace_sorted(k, v);
                        model.insert(k, v);
                        prop_assert!(set.is_sorted());
                    }
                }
                Op::Clear => {
                    set.clear();
                    model.clear();
                }
            }
            check_against_model(&set, &model);
        }
    }

    #[test]
    fn prop_erase_moves_only_last(keys in proptest::collection::btree_set(0u16..200, 1..40), pick in any::<prop::sample::Index>()) {
        let keys: Vec<u16> = keys.into_iter().collect();
        let mut set: SparseSet<u32, u16> = keys.iter().map(|&k| (k, k as u32 * 3)).collect();
        let victim = keys[pick.index(keys.len())];
        let victim_slot = set.find(victim).unwrap();
        let last_key = *set.keys().last().unwrap();
        let before: Vec<(u16, usize)> = set.keys().iter().map(|&k| (k, set.find(k).unwrap())).collect();

        set.erase(victim);

        prop_assert!(!set.contains(victim));
        for (k, slot) in before {
            if k == victim {
                continue;
            }
            if k == last_key {
                prop_assert_eq!(set.find(k), Some(victim_slot));
            } else {
                prop_assert_eq!(set.find(k), Some(slot));
            }
            prop_assert_eq!(set[k], k as u32 * 3);
        }
    }

    #[test]
    fn prop_sort_keeps_pairs(pairs in proptest::collection::btree_map(0u16..300, any::<i16>(), 0..150)) {
        let mut set: SparseSet<i16, u16> = pairs.iter().map(|(&k, &v)| (k, v)).collect();
        set.sort();
        prop_assert!(set.is_sorted());
        prop_assert_eq!(set.len(), pairs.len());
        for (&k, &v) in &pairs {
            prop_assert_eq!(set.at(k), Ok(&v));
        }
    }

    #[test]
    fn prop_emplace_sorted_stays_sorted(
        pairs in proptest::collection::btree_map(0u16..300, any::<i16>(), 0..100),
        extra in proptest::collection::vec((300u16..400, any::<i16>()), 0..20),
    ) {
        let mut set: SparseSet<i16, u16> = pairs.into_iter().collect();
        set.sort();
        for (k, v) in extra {
            let (_, inserted) = set.try_emplace_sorted(k, v);
            if inserted {
                prop_assert_eq!(set[k], v);
            }
            prop_assert!(set.is_sorted());
        }
        prop_assert!(set.validate().is_ok());
    }
}
