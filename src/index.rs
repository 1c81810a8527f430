//! Binary search over an indexed run and the navigation identities derived
//! from it.
//!
//! Searches report `Ok(index)` for a hit and `Err(insertion_point)` for a
//! miss, the convention of `slice::binary_search`. Comparisons take logical
//! indices, so the same search serves key arrays, self-keyed value arrays and
//! hash-ordered runs alike.

use std::cmp::Ordering;

/// Binary search with `compare_at(i)` comparing the sought key against slot `i`.
pub fn compare_search<F>(len: usize, mut compare_at: F) -> Result<usize, usize>
where
    F: FnMut(usize) -> Ordering,
{
    let mut low = 0;
    let mut high = len;
    while low < high {
        let mid = low + (high - low) / 2;
        match compare_at(mid) {
            Ordering::Less => high = mid,
            Ordering::Greater => low = mid + 1,
            Ordering::Equal => return Ok(mid),
        }
    }
    Err(low)
}

/// Search for hash-ordered runs.
///
/// `compare_at` compares hashes only; once it hits, `equals` is tried on that slot
/// and then on its neighbours to the left and to the right for as long as
/// they still compare equal. Runs of colliding hashes are scanned linearly
/// without limit. A miss inside a run reports the hit position as the
/// insertion point, which keeps the hash order intact.
pub fn equals_search<F, E>(len: usize, mut compare_at: F, mut equals: E) -> Result<usize, usize>
where
    F: FnMut(usize) -> Ordering,
    E: FnMut(usize) -> bool,
{
    let hit = compare_search(len, &mut compare_at)?;
    if equals(hit) {
        return Ok(hit);
    }
    for next in (0..hit).rev() {
        if compare_at(next) != Ordering::Equal {
            break;
        }
        if equals(next) {
            return Ok(next);
        }
    }
    for next in hit + 1..len {
        if compare_at(next) != Ordering::Equal {
            break;
        }
        if equals(next) {
            return Ok(next);
        }
    }
    Err(hit)
}

/// Greatest index strictly below the key; `None` stands for `-1`.
#[inline]
pub fn lower(found: Result<usize, usize>) -> Option<usize> {
    match found {
        Ok(index) | Err(index) => index.checked_sub(1),
    }
}

/// Greatest index at or below the key; `None` stands for `-1`.
#[inline]
pub fn floor(found: Result<usize, usize>) -> Option<usize> {
    match found {
        Ok(index) => Some(index),
        Err(index) => index.checked_sub(1),
    }
}

/// Least index at or above the key; `len` when there is none.
#[inline]
pub fn ceiling(found: Result<usize, usize>) -> usize {
    match found {
        Ok(index) | Err(index) => index,
    }
}

/// Least index strictly above the key; `len` when there is none.
#[inline]
pub fn higher(found: Result<usize, usize>) -> usize {
    match found {
        Ok(index) => index + 1,
        Err(index) => index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(items: &[i32], key: i32) -> Result<usize, usize> {
        compare_search(items.len(), |i| key.cmp(&items[i]))
    }

    #[test]
    fn compare_search_matches_slice() {
        let items = [1, 3, 5, 7, 9];
        for key in 0..11 {
            assert_eq!(search(&items, key), items.binary_search(&key), "key {key}");
        }
        assert_eq!(search(&[], 4), Err(0));
    }

    #[test]
    fn navigation_identities() {
        let items = [10, 20, 30];
        // present key
        let found = search(&items, 20);
        assert_eq!(lower(found), Some(0));
        assert_eq!(floor(found), Some(1));
        assert_eq!(ceiling(found), 1);
        assert_eq!(higher(found), 2);
        // absent key between slots
        let found = search(&items, 25);
        assert_eq!(lower(found), Some(1));
        assert_eq!(floor(found), Some(1));
        assert_eq!(ceiling(found), 2);
        assert_eq!(higher(found), 2);
        // sentinels at both ends
        let found = search(&items, 5);
        assert_eq!(lower(found), None);
        assert_eq!(floor(found), None);
        assert_eq!(ceiling(found), 0);
        let found = search(&items, 30);
        assert_eq!(higher(found), items.len());
        assert_eq!(lower(search(&items, 10)), None);
    }

    #[test]
    fn equals_search_walks_collision_run() {
        // (hash, id) sorted by hash only
        let items = [(1, 'a'), (2, 'b'), (2, 'c'), (2, 'd'), (3, 'e')];
        let find = |hash: i32, id: char| {
            equals_search(items.len(), |i| hash.cmp(&items[i].0), |i| items[i].1 == id)
        };
        assert_eq!(find(2, 'b'), Ok(1));
        assert_eq!(find(2, 'c'), Ok(2));
        assert_eq!(find(2, 'd'), Ok(3));
        assert_eq!(find(1, 'a'), Ok(0));
        // same hash, no equal element: insertion point inside the run
        let miss = find(2, 'z').unwrap_err();
        assert!((1..=3).contains(&miss));
        assert_eq!(find(4, 'x'), Err(5));
        assert_eq!(find(0, 'x'), Err(0));
    }
}
