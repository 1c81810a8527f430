//! Hash-ordered collections.
//!
//! [`Hashed`] keeps its entries sorted by the hash of their key. A lookup
//! binary-searches the hash and then tries `equals` across the run of entries
//! that share it, so colliding keys cost a linear scan of their run. Keys are
//! not cached with their hash: every step of the search hashes the stored key
//! again, so a lookup costs O(log n) hash computations plus the run scan.
//! Iteration follows hash order, which is stable for a given hasher but
//! otherwise arbitrary.

use std::borrow::Borrow;
use std::fmt;

use crate::config::Config;
use crate::error::CompactError;
use crate::index;
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::slots::{ItemSlots, OnEqual, PairSlots, SetSlots, Slots};
use crate::strategy::{Equivalence, KeyOf, StdHash};
use crate::window::Direction;

pub struct Hashed<L, S = StdHash> {
    slots: L,
    hasher: S,
}

/// Set of `T` in hash order.
pub type CompactHashSet<T, S = StdHash> = Hashed<SetSlots<T>, S>;

/// Map from `K` to `V` in hash order of the keys.
pub type CompactHashMap<K, V, S = StdHash> = Hashed<PairSlots<K, V>, S>;

/// Values keyed by the part `X` reads out of them, in hash order of the keys.
pub type CompactItemHashMap<V, X, S = StdHash> = Hashed<ItemSlots<V, X>, S>;

fn lookup<L, S, Q>(slots: &L, hasher: &S, key: &Q) -> Result<usize, usize>
where
    L: Slots,
    L::Key: Borrow<Q>,
    S: Equivalence<Q>,
    Q: ?Sized,
{
    let hash = hasher.hash(key);
    index::equals_search(
        slots.len(),
        |i| hash.cmp(&hasher.hash(slots.key(i).borrow())),
        |i| hasher.equals(key, slots.key(i).borrow()),
    )
}

impl<L: Slots, S> Hashed<L, S> {
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.len() == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn allocate(&mut self, capacity: usize) {
        self.slots.allocate(capacity);
    }

    pub fn compact(&mut self) {
        self.slots.compact();
    }

    pub fn alignment(&self) -> f32 {
        self.slots.alignment()
    }

    pub fn set_alignment(&mut self, alignment: f32) -> Result<(), CompactError> {
        self.slots.set_alignment(alignment)
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn iter(&self) -> Iter<'_, L> {
        Iter::new(&self.slots, 0..self.len(), Direction::Ascending)
    }

    pub fn keys(&self) -> Keys<'_, L> {
        Keys::new(&self.slots, 0..self.len(), Direction::Ascending)
    }

    pub fn values(&self) -> Values<'_, L> {
        Values::new(&self.slots, 0..self.len(), Direction::Ascending)
    }

    fn retain_entries<F>(&mut self, keep: F)
    where
        F: FnMut(&mut L::Entry) -> bool,
    {
        let mut entries = self.slots.drain_all();
        entries.retain_mut(keep);
        self.slots.extend_back(entries);
    }
}

impl<L, S> Hashed<L, S>
where
    L: Slots,
    S: Equivalence<L::Key>,
{
    fn locate<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        L::Key: Borrow<Q>,
        S: Equivalence<Q>,
        Q: ?Sized,
    {
        lookup(&self.slots, &self.hasher, key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        L::Key: Borrow<Q>,
        S: Equivalence<Q>,
        Q: ?Sized,
    {
        self.locate(key).is_ok()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&L::Value>
    where
        L::Key: Borrow<Q>,
        S: Equivalence<Q>,
        Q: ?Sized,
    {
        let index = self.locate(key).ok()?;
        Some(self.slots.value(index))
    }

    pub fn find<Q>(&self, key: &Q) -> Option<L::Item<'_>>
    where
        L::Key: Borrow<Q>,
        S: Equivalence<Q>,
        Q: ?Sized,
    {
        let index = self.locate(key).ok()?;
        Some(self.slots.item(index))
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<L::Entry>
    where
        L::Key: Borrow<Q>,
        S: Equivalence<Q>,
        Q: ?Sized,
    {
        let index = self.locate(key).ok()?;
        self.slots.take(index)
    }

    fn put(&mut self, entry: L::Entry) -> Option<L::Entry> {
        match self.locate(self.slots.entry_key(&entry)) {
            Ok(index) => Some(self.slots.replace(index, entry)),
            Err(index) => {
                self.slots.insert(index, entry);
                None
            }
        }
    }

    /// Stores every entry. An entry equal to a stored or an earlier one
    /// replaces it or is dropped as `on_equal` says.
    fn load<I: IntoIterator<Item = L::Entry>>(&mut self, entries: I, on_equal: OnEqual) {
        if !self.is_empty() {
            for entry in entries {
                match self.locate(self.slots.entry_key(&entry)) {
                    Ok(index) => {
                        if on_equal == OnEqual::Replace {
                            self.slots.replace(index, entry);
                        }
                    }
                    Err(index) => self.slots.insert(index, entry),
                }
            }
            return;
        }
        let (slots, hasher) = (&self.slots, &self.hasher);
        let mut hashed: Vec<(u64, L::Entry)> = entries
            .into_iter()
            .map(|entry| (hasher.hash(slots.entry_key(&entry)), entry))
            .collect();
        hashed.sort_by_key(|(hash, _)| *hash);

        let mut sorted: Vec<(u64, L::Entry)> = Vec::with_capacity(hashed.len());
        let mut run = 0;
        for (hash, entry) in hashed {
            if sorted.last().is_none_or(|(last, _)| *last != hash) {
                run = sorted.len();
            }
            let key = slots.entry_key(&entry);
            let equal = sorted[run..]
                .iter()
                .position(|(_, stored)| hasher.equals(slots.entry_key(stored), key));
            match equal {
                Some(offset) => {
                    if on_equal == OnEqual::Replace {
                        sorted[run + offset].1 = entry;
                    }
                }
                None => sorted.push((hash, entry)),
            }
        }
        let entries = sorted.into_iter().map(|(_, entry)| entry).collect();
        self.slots.extend_back(entries);
    }

    /// Moves every entry of `other` into `self`, leaving `other` empty.
    pub fn append(&mut self, other: &mut Self) {
        let entries = other.slots.drain_all();
        self.load(entries, OnEqual::Replace);
    }
}

// --- Set ---

impl<T> Hashed<SetSlots<T>> {
    pub fn new() -> Self {
        Hashed {
            slots: SetSlots::new(),
            hasher: StdHash::default(),
        }
    }
}

impl<T, S: Equivalence<T>> Hashed<SetSlots<T>, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Hashed {
            slots: SetSlots::new(),
            hasher,
        }
    }

    pub fn with_config(config: &Config, hasher: S) -> Result<Self, CompactError> {
        Ok(Hashed {
            slots: SetSlots::with_config(config)?,
            hasher,
        })
    }

    /// Adds `value`; returns `false` and keeps the stored element if an equal
    /// one is present.
    pub fn insert(&mut self, value: T) -> bool {
        match self.locate(&value) {
            Ok(_) => false,
            Err(index) => {
                self.slots.insert(index, value);
                true
            }
        }
    }

    pub fn replace(&mut self, value: T) -> Option<T> {
        self.put(value)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        S: Equivalence<Q>,
        Q: ?Sized,
    {
        self.contains_key(value)
    }

    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        S: Equivalence<Q>,
        Q: ?Sized,
    {
        self.remove_entry(value).is_some()
    }

    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        S: Equivalence<Q>,
        Q: ?Sized,
    {
        self.remove_entry(value)
    }

    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        self.retain_entries(|value| keep(value));
    }
}

impl<T, S: Default> Default for Hashed<SetSlots<T>, S> {
    fn default() -> Self {
        Hashed {
            slots: SetSlots::new(),
            hasher: S::default(),
        }
    }
}

impl<T, S: Equivalence<T>> Extend<T> for Hashed<SetSlots<T>, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.load(iter, OnEqual::Keep);
    }
}

impl<T, S: Equivalence<T> + Default> FromIterator<T> for Hashed<SetSlots<T>, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.load(iter, OnEqual::Keep);
        set
    }
}

impl<T: std::hash::Hash + Eq, const N: usize> From<[T; N]> for Hashed<SetSlots<T>> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T, S: Equivalence<T>> PartialEq for Hashed<SetSlots<T>, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|value| other.contains(value))
    }
}

impl<T, S: Equivalence<T>> Eq for Hashed<SetSlots<T>, S> {}

// --- Map ---

impl<K, V> Hashed<PairSlots<K, V>> {
    pub fn new() -> Self {
        Hashed {
            slots: PairSlots::new(),
            hasher: StdHash::default(),
        }
    }
}

impl<K, V, S: Equivalence<K>> Hashed<PairSlots<K, V>, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Hashed {
            slots: PairSlots::new(),
            hasher,
        }
    }

    pub fn with_config(config: &Config, hasher: S) -> Result<Self, CompactError> {
        Ok(Hashed {
            slots: PairSlots::with_config(config)?,
            hasher,
        })
    }

    /// Maps `key` to `value`, returning the value it replaced. The stored
    /// key is kept.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.locate(&key) {
            Ok(index) => Some(self.slots.replace_value(index, value)),
            Err(index) => {
                self.slots.insert(index, (key, value));
                None
            }
        }
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        S: Equivalence<Q>,
        Q: ?Sized,
    {
        self.find(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        S: Equivalence<Q>,
        Q: ?Sized,
    {
        let index = self.locate(key).ok()?;
        Some(self.slots.value_mut(index))
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        S: Equivalence<Q>,
        Q: ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let (keys, values) = self.slots.split_mut();
        IterMut::new(keys, values)
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut::new(self.slots.values_mut())
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.slots.values().contains(value)
    }

    pub fn retain<F: FnMut(&K, &mut V) -> bool>(&mut self, mut keep: F) {
        self.retain_entries(|(key, value)| keep(key, value));
    }
}

impl<K, V, S: Default> Default for Hashed<PairSlots<K, V>, S> {
    fn default() -> Self {
        Hashed {
            slots: PairSlots::new(),
            hasher: S::default(),
        }
    }
}

impl<K, V, S: Equivalence<K>> Extend<(K, V)> for Hashed<PairSlots<K, V>, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.load(iter, OnEqual::Replace);
    }
}

impl<K, V, S: Equivalence<K> + Default> FromIterator<(K, V)> for Hashed<PairSlots<K, V>, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.load(iter, OnEqual::Replace);
        map
    }
}

impl<K: std::hash::Hash + Eq, V, const N: usize> From<[(K, V); N]> for Hashed<PairSlots<K, V>> {
    fn from(items: [(K, V); N]) -> Self {
        items.into_iter().collect()
    }
}

impl<K, V: PartialEq, S: Equivalence<K>> PartialEq for Hashed<PairSlots<K, V>, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V: Eq, S: Equivalence<K>> Eq for Hashed<PairSlots<K, V>, S> {}

// --- Self-keyed map ---

impl<V, X: KeyOf<V>> Hashed<ItemSlots<V, X>> {
    pub fn new(extract: X) -> Self {
        Hashed {
            slots: ItemSlots::new(extract),
            hasher: StdHash::default(),
        }
    }
}

impl<V, X, S> Hashed<ItemSlots<V, X>, S>
where
    X: KeyOf<V>,
    S: Equivalence<X::Key>,
{
    pub fn with_hasher(extract: X, hasher: S) -> Self {
        Hashed {
            slots: ItemSlots::new(extract),
            hasher,
        }
    }

    pub fn with_config(config: &Config, extract: X, hasher: S) -> Result<Self, CompactError> {
        Ok(Hashed {
            slots: ItemSlots::with_extractor(config, extract)?,
            hasher,
        })
    }

    /// Stores `value` under its own key, replacing and returning a value with
    /// an equal key.
    pub fn insert(&mut self, value: V) -> Option<V> {
        self.put(value)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        X::Key: Borrow<Q>,
        S: Equivalence<Q>,
        Q: ?Sized,
    {
        self.remove_entry(key)
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.slots.as_slice().contains(value)
    }

    pub fn retain<F: FnMut(&V) -> bool>(&mut self, mut keep: F) {
        self.retain_entries(|value| keep(value));
    }

    pub fn extractor(&self) -> &X {
        self.slots.extractor()
    }
}

impl<V, X, S> Extend<V> for Hashed<ItemSlots<V, X>, S>
where
    X: KeyOf<V>,
    S: Equivalence<X::Key>,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.load(iter, OnEqual::Replace);
    }
}

impl<V, X, S> FromIterator<V> for Hashed<ItemSlots<V, X>, S>
where
    X: KeyOf<V> + Default,
    S: Equivalence<X::Key> + Default,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut map = Self::with_hasher(X::default(), S::default());
        map.load(iter, OnEqual::Replace);
        map
    }
}

impl<V: PartialEq, X, S> PartialEq for Hashed<ItemSlots<V, X>, S>
where
    X: KeyOf<V>,
    S: Equivalence<X::Key>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<V: Eq, X, S> Eq for Hashed<ItemSlots<V, X>, S>
where
    X: KeyOf<V>,
    S: Equivalence<X::Key>,
{
}

// --- Shared impls ---

impl<L: Clone, S: Clone> Clone for Hashed<L, S> {
    fn clone(&self) -> Self {
        Hashed {
            slots: self.slots.clone(),
            hasher: self.hasher.clone(),
        }
    }
}

impl<L: fmt::Debug, S> fmt::Debug for Hashed<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slots.fmt(f)
    }
}

impl<L: Slots, S> IntoIterator for Hashed<L, S> {
    type Item = L::Entry;
    type IntoIter = IntoIter<L::Entry>;

    fn into_iter(mut self) -> IntoIter<L::Entry> {
        IntoIter::new(self.slots.drain_all())
    }
}

impl<'a, L: Slots, S> IntoIterator for &'a Hashed<L, S> {
    type Item = L::Item<'a>;
    type IntoIter = Iter<'a, L>;

    fn into_iter(self) -> Iter<'a, L> {
        self.iter()
    }
}
