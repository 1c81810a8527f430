#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use std::ops::Bound;

use compactmap::{CompactError, CompactMap as TestMap, Config, NaturalOrder};
use std::collections::BTreeMap as BeeMap;

#[derive(Debug, Arbitrary)]
enum Command {
    Append { other: Vec<(u8, u8)> },
    Clear,
    ContainsKey { key: u8 },
    FirstKeyValue,
    Get { key: u8 },
    GetIndex { index: usize },
    GetMut { key: u8, value: u8 },
    GetIndexMut { index: usize, value: u8 },
    Insert { key: u8, value: u8 },
    Iter,
    LastKeyValue,
    PopFirst,
    PopLast,
    RemoveIndex { index: usize },
    Range { start: MyBound, end: MyBound },
    RangeInsert { start: MyBound, end: MyBound, key: u8, value: u8 },
    RangeClear { start: MyBound, end: MyBound },
    DescendingPop { start: MyBound, end: MyBound },
    Remove { key: u8 },
    Retain { threshold: u8 },
    ValuesMut,
    Entry { key: u8, value: u8 },
    FirstEntry,
    Navigate { key: u8 },
    Rank { key: u8 },
    Compact,
    Allocate { capacity: u8 },
    CursorRemoveOdd,
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum MyBound {
    Included(u8),
    Excluded(u8),
    Unbounded,
}

impl From<MyBound> for Bound<u8> {
    fn from(b: MyBound) -> Self {
        match b {
            MyBound::Included(x) => Bound::Included(x),
            MyBound::Excluded(x) => Bound::Excluded(x),
            MyBound::Unbounded => Bound::Unbounded,
        }
    }
}

fn inverted(start: Bound<u8>, end: Bound<u8>) -> bool {
    matches!(
        (start, end),
        (Bound::Included(s) | Bound::Excluded(s), Bound::Included(e) | Bound::Excluded(e)) if s > e
    )
}

/// BTreeMap panics on `(Excluded(x), Excluded(x))`; that window is simply empty here.
fn model_range(model: &BeeMap<u8, u8>, start: Bound<u8>, end: Bound<u8>) -> Vec<(u8, u8)> {
    match (start, end) {
        (Bound::Excluded(s), Bound::Excluded(e)) if s == e => Vec::new(),
        _ => model.range((start, end)).map(|(k, v)| (*k, *v)).collect(),
    }
}

fn in_bounds(key: u8, start: Bound<u8>, end: Bound<u8>) -> bool {
    let above = match start {
        Bound::Included(s) => key >= s,
        Bound::Excluded(s) => key > s,
        Bound::Unbounded => true,
    };
    let below = match end {
        Bound::Included(e) => key <= e,
        Bound::Excluded(e) => key < e,
        Bound::Unbounded => true,
    };
    above && below
}

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);
    let Ok(alignment) = unstructured.int_in_range(0u8..=4) else {
        return;
    };
    let Ok(commands) = Vec::<Command>::arbitrary(&mut unstructured) else {
        return;
    };

    let config = Config::new().alignment(f32::from(alignment) / 4.0);
    let Ok(mut map) = TestMap::<u8, u8>::with_config(&config, NaturalOrder) else {
        return;
    };
    let mut btree_map: BeeMap<u8, u8> = BeeMap::new();

    for command in commands {
        if std::env::var("RUST_BACKTRACE").is_ok() {
            println!("{command:?}");
        }

        match command {
            Command::Append { other } => {
                let mut other_map: TestMap<u8, u8> = other.iter().copied().collect();
                map.append(&mut other_map);
                assert!(other_map.is_empty());
                btree_map.extend(other);
            }
            Command::Clear => {
                map.clear();
                btree_map.clear();
            }
            Command::ContainsKey { key } => {
                assert_eq!(map.contains_key(&key), btree_map.contains_key(&key));
            }
            Command::FirstKeyValue => {
                assert_eq!(map.first_key_value(), btree_map.first_key_value());
                assert_eq!(
                    map.first_key().ok(),
                    btree_map.keys().next()
                );
            }
            Command::Get { key } => {
                assert_eq!(map.get(&key), btree_map.get(&key));
                assert_eq!(map.position(&key), btree_map.keys().position(|k| *k == key));
            }
            Command::GetIndex { index } => {
                assert_eq!(map.get_index(index), btree_map.iter().nth(index));
            }
            Command::GetMut { key, value } => {
                let ours = map.get_mut(&key).map(|v| *v = value).is_some();
                let theirs = btree_map.get_mut(&key).map(|v| *v = value).is_some();
                assert_eq!(ours, theirs);
            }
            Command::GetIndexMut { index, value } => {
                let ours = map.get_index_mut(index).map(|(_, v)| *v = value).is_some();
                let theirs = btree_map.values_mut().nth(index).map(|v| *v = value).is_some();
                assert_eq!(ours, theirs);
            }
            Command::Insert { key, value } => {
                assert_eq!(map.insert(key, value), btree_map.insert(key, value));
            }
            Command::Iter => {
                assert!(map.iter().eq(btree_map.iter()));
                assert!(map.iter().rev().eq(btree_map.iter().rev()));
                assert!(map.descending().iter().eq(btree_map.iter().rev()));
            }
            Command::LastKeyValue => {
                assert_eq!(map.last_key_value(), btree_map.last_key_value());
            }
            Command::PopFirst => {
                assert_eq!(map.pop_first(), btree_map.pop_first());
            }
            Command::PopLast => {
                assert_eq!(map.pop_last(), btree_map.pop_last());
            }
            Command::RemoveIndex { index } => {
                let key = btree_map.keys().nth(index).copied();
                let removed = map.remove_index(index);
                assert_eq!(removed.map(|(k, _)| k), key);
                if let Some(key) = key {
                    assert_eq!(removed.map(|(_, v)| v), btree_map.remove(&key));
                }
            }
            Command::Range { start, end } => {
                let (start, end) = (start.into(), end.into());
                match map.range(start, end) {
                    Err(err) => {
                        assert!(inverted(start, end));
                        assert_eq!(err, CompactError::InvalidRange);
                    }
                    Ok(view) => {
                        let expected = model_range(&btree_map, start, end);
                        let got: Vec<_> = view.iter().map(|(k, v)| (*k, *v)).collect();
                        assert_eq!(got, expected);
                        assert_eq!(view.len(), expected.len());
                    }
                }
            }
            Command::RangeInsert { start, end, key, value } => {
                let (start, end) = (start.into(), end.into());
                if let Ok(mut view) = map.range_mut(start, end) {
                    match view.insert(key, value) {
                        Ok(old) => {
                            assert!(in_bounds(key, start, end));
                            assert_eq!(old, btree_map.insert(key, value));
                        }
                        Err(err) => {
                            assert!(!in_bounds(key, start, end));
                            assert_eq!(err, CompactError::OutOfRange);
                        }
                    }
                }
            }
            Command::RangeClear { start, end } => {
                let (start, end) = (start.into(), end.into());
                if let Ok(mut view) = map.range_mut(start, end) {
                    view.clear();
                    btree_map.retain(|k, _| !in_bounds(*k, start, end));
                }
            }
            Command::DescendingPop { start, end } => {
                let (start, end) = (start.into(), end.into());
                if let Ok(view) = map.range_mut(start, end) {
                    let mut view = view.descending();
                    let expected = model_range(&btree_map, start, end).pop();
                    assert_eq!(view.pop_first(), expected);
                    if let Some((key, _)) = expected {
                        btree_map.remove(&key);
                    }
                }
            }
            Command::Remove { key } => {
                assert_eq!(map.remove(&key), btree_map.remove(&key));
            }
            Command::Retain { threshold } => {
                map.retain(|k, v| *k <= threshold || *v > threshold);
                btree_map.retain(|k, v| *k <= threshold || *v > threshold);
            }
            Command::ValuesMut => {
                map.values_mut().for_each(|v| *v = v.wrapping_add(1));
                btree_map.values_mut().for_each(|v| *v = v.wrapping_add(1));
            }
            Command::Entry { key, value } => {
                *map.entry(key).or_insert(value) ^= 1;
                *btree_map.entry(key).or_insert(value) ^= 1;
            }
            Command::FirstEntry => {
                if let Some(entry) = map.first_entry() {
                    let key = *entry.key();
                    assert_eq!(Some(entry.remove()), btree_map.remove(&key));
                } else {
                    assert!(btree_map.is_empty());
                }
            }
            Command::Navigate { key } => {
                assert_eq!(map.floor(&key), btree_map.range(..=key).next_back());
                assert_eq!(map.lower(&key), btree_map.range(..key).next_back());
                assert_eq!(map.ceiling(&key), btree_map.range(key..).next());
                assert_eq!(
                    map.higher_key(&key),
                    btree_map.range((Bound::Excluded(key), Bound::Unbounded)).next().map(|(k, _)| k)
                );
            }
            Command::Rank { key } => {
                assert_eq!(map.rank(&key), btree_map.range(..key).count());
            }
            Command::Compact => {
                map.compact();
                assert_eq!(map.capacity(), map.len());
            }
            Command::Allocate { capacity } => {
                map.allocate(usize::from(capacity));
                assert!(map.capacity() >= usize::from(capacity));
            }
            Command::CursorRemoveOdd => {
                let mut cursor = map.cursor_mut();
                while let Some((_, &value)) = cursor.next() {
                    if value % 2 == 1 {
                        assert!(cursor.remove().is_ok());
                    }
                }
                btree_map.retain(|_, v| *v % 2 == 0);
            }
        }

        assert_eq!(map.len(), btree_map.len());
        assert!(map.iter().eq(btree_map.iter()));
    }
});
