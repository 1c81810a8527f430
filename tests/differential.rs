use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound::{self, Excluded, Included, Unbounded};

use compactmap::{
    CompactError, CompactHashMap, CompactMap, CompactSet, Config, Equivalence, NaturalOrder, Store,
};
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

/// Routes the crate's `trace!`/`debug!` output to the test harness when
/// `RUST_LOG` asks for it.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn key() -> impl Strategy<Value = u8> {
    // small key space so that inserts collide with stored keys
    0u8..64
}

fn config() -> impl Strategy<Value = Config> {
    (0usize..8, prop_oneof![Just(0.0f32), Just(0.5), Just(1.0)])
        .prop_map(|(capacity, alignment)| Config::new().capacity(capacity).alignment(alignment))
}

fn bound() -> impl Strategy<Value = Bound<u8>> {
    prop_oneof![
        key().prop_map(Included),
        key().prop_map(Excluded),
        Just(Unbounded),
    ]
}

fn inverted(low: Bound<u8>, high: Bound<u8>) -> bool {
    matches!(
        (low, high),
        (Included(l) | Excluded(l), Included(h) | Excluded(h)) if l > h
    )
}

fn in_bounds(key: u8, low: Bound<u8>, high: Bound<u8>) -> bool {
    let above = match low {
        Included(l) => key >= l,
        Excluded(l) => key > l,
        Unbounded => true,
    };
    let below = match high {
        Included(h) => key <= h,
        Excluded(h) => key < h,
        Unbounded => true,
    };
    above && below
}

/// Whether a nested bound may be set on a view over `(low, high)`: an
/// inclusive one must be inside it, an exclusive one may sit on its ends.
fn admits(bound: Bound<u8>, low: Bound<u8>, high: Bound<u8>) -> bool {
    match bound {
        Unbounded => true,
        Included(key) => in_bounds(key, low, high),
        Excluded(key) => {
            let above = match low {
                Included(l) | Excluded(l) => key >= l,
                Unbounded => true,
            };
            let below = match high {
                Included(h) | Excluded(h) => key <= h,
                Unbounded => true,
            };
            above && below
        }
    }
}

/// Hashes by residue mod 4, so every key shares its hash with a quarter of
/// the key space.
#[derive(Debug, Clone, Copy, Default)]
struct Mod4;

impl Equivalence<u8> for Mod4 {
    fn hash(&self, item: &u8) -> u64 {
        u64::from(item % 4)
    }

    fn equals(&self, a: &u8, b: &u8) -> bool {
        a == b
    }
}

#[derive(Debug, Clone)]
enum MapOp {
    Insert(u8, u16),
    Remove(u8),
    Get(u8),
    PopFirst,
    PopLast,
    RemoveIndex(usize),
    Navigate(u8),
    Range(u8, u8),
    ClearRange(u8, u8),
    Compact,
}

fn map_op() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        6 => (key(), any::<u16>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key().prop_map(MapOp::Remove),
        2 => key().prop_map(MapOp::Get),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
        1 => (0usize..80).prop_map(MapOp::RemoveIndex),
        2 => key().prop_map(MapOp::Navigate),
        2 => (key(), key()).prop_map(|(a, b)| MapOp::Range(a.min(b), a.max(b))),
        1 => (key(), key()).prop_map(|(a, b)| MapOp::ClearRange(a.min(b), a.max(b))),
        1 => Just(MapOp::Compact),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn map_matches_btreemap(config in config(), ops in proptest::collection::vec(map_op(), 1..300)) {
        init_logging();
        let mut map: CompactMap<u8, u16> = CompactMap::with_config(&config, NaturalOrder).unwrap();
        let mut model: BTreeMap<u8, u16> = BTreeMap::new();

        for op in &ops {
            match *op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v), "insert({})", k);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(map.get(&k), model.get(&k), "get({})", k);
                    prop_assert_eq!(map.rank(&k), model.range(..k).count());
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(map.pop_first(), model.pop_first());
                }
                MapOp::PopLast => {
                    prop_assert_eq!(map.pop_last(), model.pop_last());
                }
                MapOp::RemoveIndex(index) => {
                    let expected = model.keys().nth(index).copied();
                    let removed = map.remove_index(index);
                    prop_assert_eq!(removed.map(|(k, _)| k), expected);
                    if let Some(k) = expected {
                        model.remove(&k);
                    }
                }
                MapOp::Navigate(k) => {
                    prop_assert_eq!(map.floor(&k), model.range(..=k).next_back());
                    prop_assert_eq!(map.lower(&k), model.range(..k).next_back());
                    prop_assert_eq!(map.ceiling(&k), model.range(k..).next());
                    prop_assert_eq!(map.higher(&k), model.range((Excluded(k), Unbounded)).next());
                }
                MapOp::Range(lo, hi) => {
                    let view = map.range(Included(lo), Excluded(hi)).unwrap();
                    prop_assert_eq!(view.len(), model.range(lo..hi).count());
                    prop_assert!(view.iter().eq(model.range(lo..hi)));
                    let desc = view.descending();
                    prop_assert!(desc.iter().eq(model.range(lo..hi).rev()));
                    prop_assert_eq!(desc.first(), model.range(lo..hi).next_back());
                }
                MapOp::ClearRange(lo, hi) => {
                    map.range_mut(Excluded(lo), Included(hi)).unwrap().clear();
                    model.retain(|k, _| *k <= lo || *k > hi);
                }
                MapOp::Compact => {
                    map.compact();
                    prop_assert_eq!(map.capacity(), map.len());
                }
            }
            prop_assert_eq!(map.len(), model.len());
        }
        prop_assert!(map.iter().eq(model.iter()));
        prop_assert!(map.keys().rev().eq(model.keys().rev()));
    }

    #[test]
    fn set_matches_btreeset(
        config in config(),
        values in proptest::collection::vec((any::<bool>(), key()), 1..300),
    ) {
        let mut set: CompactSet<u8> = CompactSet::with_config(&config, NaturalOrder).unwrap();
        let mut model = BTreeSet::new();

        for &(insert, v) in &values {
            if insert {
                prop_assert_eq!(set.insert(v), model.insert(v));
            } else {
                prop_assert_eq!(set.remove(&v), model.remove(&v));
            }
            prop_assert_eq!(set.first(), model.first());
            prop_assert_eq!(set.last(), model.last());
            prop_assert_eq!(set.contains(&v), model.contains(&v));
        }
        prop_assert!(set.as_slice().iter().eq(model.iter()));

        let rebuilt: CompactSet<u8> = values.iter().map(|&(_, v)| v).collect();
        let expected: BTreeSet<u8> = values.iter().map(|&(_, v)| v).collect();
        prop_assert!(rebuilt.iter().eq(expected.iter()));
    }

    #[test]
    fn hash_map_matches_hashmap(ops in proptest::collection::vec((0u8..3, key(), any::<u16>()), 1..300)) {
        let mut map: CompactHashMap<u8, u16> = CompactHashMap::new();
        let mut model: HashMap<u8, u16> = HashMap::new();

        for &(kind, k, v) in &ops {
            match kind {
                0 => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v));
                }
                1 => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                }
                _ => {
                    prop_assert_eq!(map.get(&k), model.get(&k));
                }
            }
            prop_assert_eq!(map.len(), model.len());
        }
        let mut contents: Vec<(u8, u16)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        contents.sort_unstable();
        let mut expected: Vec<(u8, u16)> = model.into_iter().collect();
        expected.sort_unstable();
        prop_assert_eq!(contents, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn cursor_removes_a_whole_view(
        config in config(),
        entries in proptest::collection::vec((key(), any::<u16>()), 0..120),
        low in bound(),
        high in bound(),
        descending in any::<bool>(),
    ) {
        prop_assume!(!inverted(low, high));
        let mut map: CompactMap<u8, u16> = CompactMap::with_config(&config, NaturalOrder).unwrap();
        map.extend(entries.iter().copied());
        let model: BTreeMap<u8, u16> = entries.iter().copied().collect();

        let mut expected: Vec<(u8, u16)> = model
            .iter()
            .filter(|(k, _)| in_bounds(**k, low, high))
            .map(|(k, v)| (*k, *v))
            .collect();
        if descending {
            expected.reverse();
        }

        let view = map.range_mut(low, high).unwrap();
        let mut view = if descending { view.descending() } else { view };
        let mut walked = Vec::new();
        let mut cursor = view.cursor_mut();
        while let Some((&k, &v)) = cursor.next() {
            walked.push((k, v));
            prop_assert!(cursor.remove().is_ok());
        }
        prop_assert_eq!(cursor.remaining(), 0);
        prop_assert_eq!(cursor.remove(), Err(CompactError::NoCurrent));
        prop_assert_eq!(walked, expected);
        prop_assert_eq!(view.len(), 0);
        prop_assert!(view.is_empty());
        prop_assert_eq!(view.first(), None);

        let rest = model.iter().filter(|(k, _)| !in_bounds(**k, low, high));
        prop_assert!(map.iter().eq(rest));
    }

    #[test]
    fn nested_views_match_btreemap(
        config in config(),
        entries in proptest::collection::vec((key(), any::<u16>()), 0..120),
        outer_low in bound(),
        outer_high in bound(),
        from in bound(),
        to in bound(),
        descending in any::<bool>(),
        target in key(),
    ) {
        prop_assume!(!inverted(outer_low, outer_high));
        let mut map: CompactMap<u8, u16> = CompactMap::with_config(&config, NaturalOrder).unwrap();
        map.extend(entries.iter().copied());
        let model: BTreeMap<u8, u16> = entries.iter().copied().collect();

        let base = map.range(outer_low, outer_high).unwrap();
        let base = if descending { base.descending() } else { base };

        // contents of a window in the base view's order
        let in_view_order = |low: Bound<u8>, high: Bound<u8>| {
            let mut entries: Vec<(u8, u16)> = model
                .iter()
                .filter(|(k, _)| in_bounds(**k, outer_low, outer_high) && in_bounds(**k, low, high))
                .map(|(k, v)| (*k, *v))
                .collect();
            if descending {
                entries.reverse();
            }
            entries
        };
        let expected = in_view_order(Unbounded, Unbounded);
        let copied = |item: Option<(&u8, &u16)>| item.map(|(k, v)| (*k, *v));
        prop_assert!(base.iter().map(|(k, v)| (*k, *v)).eq(expected.iter().copied()));
        prop_assert_eq!(base.len(), expected.len());
        prop_assert_eq!(copied(base.first()), expected.first().copied());
        prop_assert_eq!(copied(base.last()), expected.last().copied());

        // navigation follows view order: "before" means larger on a descending view
        let before = |k: u8| if descending { k > target } else { k < target };
        let after = |k: u8| if descending { k < target } else { k > target };
        prop_assert_eq!(copied(base.lower(&target)), expected.iter().copied().filter(|e| before(e.0)).last());
        prop_assert_eq!(copied(base.floor(&target)), expected.iter().copied().filter(|e| !after(e.0)).last());
        prop_assert_eq!(copied(base.ceiling(&target)), expected.iter().copied().find(|e| !before(e.0)));
        prop_assert_eq!(copied(base.higher(&target)), expected.iter().copied().find(|e| after(e.0)));

        // nested bounds are given in view order
        let (low, high) = if descending { (to, from) } else { (from, to) };
        let effective_low = if low == Unbounded { outer_low } else { low };
        let effective_high = if high == Unbounded { outer_high } else { high };
        let nested = base.range(from, to);
        if !admits(low, outer_low, outer_high) || !admits(high, outer_low, outer_high) {
            prop_assert_eq!(nested.err(), Some(CompactError::OutOfRange));
        } else if inverted(effective_low, effective_high) {
            prop_assert_eq!(nested.err(), Some(CompactError::InvalidRange));
        } else {
            let nested = nested.unwrap();
            let inner = in_view_order(low, high);
            prop_assert_eq!(nested.direction(), base.direction());
            prop_assert!(nested.iter().map(|(k, v)| (*k, *v)).eq(inner.iter().copied()));
            prop_assert_eq!(nested.len(), inner.len());
            prop_assert_eq!(nested.in_range(&target), in_bounds(target, effective_low, effective_high));
        }
    }

    #[test]
    fn colliding_hash_map_matches_hashmap(
        ops in proptest::collection::vec((0u8..4, key(), any::<u16>()), 1..300),
    ) {
        let mut map: CompactHashMap<u8, u16, Mod4> = CompactHashMap::with_hasher(Mod4);
        let mut model: HashMap<u8, u16> = HashMap::new();

        for &(kind, k, v) in &ops {
            match kind {
                0 | 1 => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v), "insert({})", k);
                }
                2 => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k), "remove({})", k);
                }
                _ => {
                    prop_assert_eq!(map.get(&k), model.get(&k), "get({})", k);
                    prop_assert_eq!(map.contains_key(&k), model.contains_key(&k));
                }
            }
            prop_assert_eq!(map.len(), model.len());
            let hashes: Vec<u8> = map.keys().map(|k| k % 4).collect();
            prop_assert!(hashes.windows(2).all(|pair| pair[0] <= pair[1]), "hash order {:?}", hashes);
        }
        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
    }

    #[test]
    fn store_matches_vec(
        capacity in 0usize..8,
        alignment in prop_oneof![Just(0.0f32), Just(0.3), Just(0.5), Just(1.0)],
        ops in proptest::collection::vec(
            (any::<bool>(), any::<usize>(), proptest::collection::vec(any::<u8>(), 0..6)),
            1..200,
        ),
    ) {
        init_logging();
        let config = Config::new().capacity(capacity).alignment(alignment);
        let mut store: Store<u8> = Store::with_config(&config).unwrap();
        let mut model: Vec<u8> = Vec::new();

        for (insert, seed, values) in ops {
            let index = seed % (model.len() + 1);
            if insert {
                store.insert_many(index, values.clone());
                model.splice(index..index, values);
            } else {
                let count = values.len().min(model.len() - index);
                store.remove(index, count);
                model.drain(index..index + count);
            }
            prop_assert_eq!(store.as_slice(), model.as_slice());
            prop_assert!(store.capacity() >= store.len());
        }
    }
}

#[test]
fn append_replaces_equal_keys() {
    let mut left: CompactMap<u8, &str> = [(1, "a"), (3, "c")].into();
    let mut right: CompactMap<u8, &str> = [(2, "b"), (3, "C")].into();
    left.append(&mut right);
    assert!(right.is_empty());
    assert_eq!(
        left.into_iter().collect::<Vec<_>>(),
        [(1, "a"), (2, "b"), (3, "C")]
    );
}
