//! Storage layouts shared by the ordered and hashed collections.
//!
//! A layout decides how entries are spread over [`Store`]s and how a key is
//! read back from a position. The search and navigation logic above it only
//! ever sees positions and keys, so every collection kind is one of three
//! layouts combined with either a comparator or an equivalence.

use std::fmt;

use crate::config::Config;
use crate::error::CompactError;
use crate::store::Store;
use crate::strategy::KeyOf;

/// What a bulk load does with an entry whose key is already present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OnEqual {
    /// The incoming entry wins, as with map inserts.
    Replace,
    /// The entry already there wins, as with set inserts.
    Keep,
}

/// Positional access to the entries of a collection.
///
/// Positions are logical, `0..len()`. Methods taking a position panic when it
/// is out of bounds, as slice indexing does; the collections only pass
/// positions produced by a search.
pub trait Slots {
    type Key;
    type Value;
    /// What leaves the collection on removal and enters it on insertion.
    type Entry;
    /// What iteration yields for one position.
    type Item<'a>
    where
        Self: 'a;

    fn len(&self) -> usize;

    fn key(&self, index: usize) -> &Self::Key;

    fn value(&self, index: usize) -> &Self::Value;

    fn item(&self, index: usize) -> Self::Item<'_>;

    fn entry_key<'a>(&self, entry: &'a Self::Entry) -> &'a Self::Key;

    fn insert(&mut self, index: usize, entry: Self::Entry);

    /// Overwrites the entry at `index`, returning the previous one.
    fn replace(&mut self, index: usize, entry: Self::Entry) -> Self::Entry;

    fn take(&mut self, index: usize) -> Option<Self::Entry>;

    /// Drops the entries at `[index, index + count)`.
    fn remove(&mut self, index: usize, count: usize);

    fn clear(&mut self);

    /// Moves every entry out in position order.
    fn drain_all(&mut self) -> Vec<Self::Entry>;

    /// Appends `entries` behind the last position as one run.
    fn extend_back(&mut self, entries: Vec<Self::Entry>);

    fn capacity(&self) -> usize;

    fn allocate(&mut self, capacity: usize);

    fn compact(&mut self);

    fn alignment(&self) -> f32;

    fn set_alignment(&mut self, alignment: f32) -> Result<(), CompactError>;
}

/// Elements that are their own keys.
pub struct SetSlots<T> {
    items: Store<T>,
}

impl<T> SetSlots<T> {
    pub(crate) fn new() -> Self {
        SetSlots { items: Store::new() }
    }

    pub(crate) fn with_config(config: &Config) -> Result<Self, CompactError> {
        Ok(SetSlots {
            items: Store::with_config(config)?,
        })
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }
}

impl<T> Slots for SetSlots<T> {
    type Key = T;
    type Value = T;
    type Entry = T;
    type Item<'a>
        = &'a T
    where
        Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    fn key(&self, index: usize) -> &T {
        &self.items.as_slice()[index]
    }

    #[inline]
    fn value(&self, index: usize) -> &T {
        &self.items.as_slice()[index]
    }

    #[inline]
    fn item(&self, index: usize) -> &T {
        &self.items.as_slice()[index]
    }

    #[inline]
    fn entry_key<'a>(&self, entry: &'a T) -> &'a T {
        entry
    }

    fn insert(&mut self, index: usize, entry: T) {
        self.items.insert(index, entry);
    }

    fn replace(&mut self, index: usize, entry: T) -> T {
        std::mem::replace(&mut self.items.as_mut_slice()[index], entry)
    }

    fn take(&mut self, index: usize) -> Option<T> {
        self.items.take(index)
    }

    fn remove(&mut self, index: usize, count: usize) {
        self.items.remove(index, count);
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn drain_all(&mut self) -> Vec<T> {
        self.items.drain_all()
    }

    fn extend_back(&mut self, entries: Vec<T>) {
        let len = self.items.len();
        self.items.insert_many(len, entries);
    }

    fn capacity(&self) -> usize {
        self.items.capacity()
    }

    fn allocate(&mut self, capacity: usize) {
        self.items.allocate(capacity);
    }

    fn compact(&mut self) {
        self.items.compact();
    }

    fn alignment(&self) -> f32 {
        self.items.alignment()
    }

    fn set_alignment(&mut self, alignment: f32) -> Result<(), CompactError> {
        self.items.set_alignment(alignment)
    }
}

/// Keys and values in two stores of equal length, moved in lockstep.
pub struct PairSlots<K, V> {
    keys: Store<K>,
    values: Store<V>,
}

impl<K, V> PairSlots<K, V> {
    pub(crate) fn new() -> Self {
        PairSlots {
            keys: Store::new(),
            values: Store::new(),
        }
    }

    pub(crate) fn with_config(config: &Config) -> Result<Self, CompactError> {
        Ok(PairSlots {
            keys: Store::with_config(config)?,
            values: Store::with_config(config)?,
        })
    }

    pub(crate) fn keys(&self) -> &[K] {
        self.keys.as_slice()
    }

    pub(crate) fn values(&self) -> &[V] {
        self.values.as_slice()
    }

    pub(crate) fn values_mut(&mut self) -> &mut [V] {
        self.values.as_mut_slice()
    }

    pub(crate) fn value_mut(&mut self, index: usize) -> &mut V {
        &mut self.values.as_mut_slice()[index]
    }

    pub(crate) fn key_value_mut(&mut self, index: usize) -> (&K, &mut V) {
        (&self.keys.as_slice()[index], &mut self.values.as_mut_slice()[index])
    }

    pub(crate) fn split_mut(&mut self) -> (&[K], &mut [V]) {
        (self.keys.as_slice(), self.values.as_mut_slice())
    }

    /// Swaps in a new value at `index`, keeping the stored key.
    pub(crate) fn replace_value(&mut self, index: usize, value: V) -> V {
        std::mem::replace(self.value_mut(index), value)
    }
}

impl<K, V> Slots for PairSlots<K, V> {
    type Key = K;
    type Value = V;
    type Entry = (K, V);
    type Item<'a>
        = (&'a K, &'a V)
    where
        Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    fn key(&self, index: usize) -> &K {
        &self.keys.as_slice()[index]
    }

    #[inline]
    fn value(&self, index: usize) -> &V {
        &self.values.as_slice()[index]
    }

    #[inline]
    fn item(&self, index: usize) -> (&K, &V) {
        (self.key(index), self.value(index))
    }

    #[inline]
    fn entry_key<'a>(&self, entry: &'a (K, V)) -> &'a K {
        &entry.0
    }

    fn insert(&mut self, index: usize, (key, value): (K, V)) {
        self.keys.insert(index, key);
        self.values.insert(index, value);
    }

    fn replace(&mut self, index: usize, (key, value): (K, V)) -> (K, V) {
        let key = std::mem::replace(&mut self.keys.as_mut_slice()[index], key);
        (key, self.replace_value(index, value))
    }

    fn take(&mut self, index: usize) -> Option<(K, V)> {
        let key = self.keys.take(index)?;
        let value = self.values.take(index)?;
        Some((key, value))
    }

    fn remove(&mut self, index: usize, count: usize) {
        self.keys.remove(index, count);
        self.values.remove(index, count);
    }

    fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
    }

    fn drain_all(&mut self) -> Vec<(K, V)> {
        let keys = self.keys.drain_all();
        let values = self.values.drain_all();
        keys.into_iter().zip(values).collect()
    }

    fn extend_back(&mut self, entries: Vec<(K, V)>) {
        let len = self.keys.len();
        let (keys, values): (Vec<K>, Vec<V>) = entries.into_iter().unzip();
        self.keys.insert_many(len, keys);
        self.values.insert_many(len, values);
    }

    fn capacity(&self) -> usize {
        self.keys.capacity()
    }

    fn allocate(&mut self, capacity: usize) {
        self.keys.allocate(capacity);
        self.values.allocate(capacity);
    }

    fn compact(&mut self) {
        self.keys.compact();
        self.values.compact();
    }

    fn alignment(&self) -> f32 {
        self.keys.alignment()
    }

    fn set_alignment(&mut self, alignment: f32) -> Result<(), CompactError> {
        self.keys.set_alignment(alignment)?;
        self.values.set_alignment(alignment)
    }
}

/// Values that carry their own key, read out by a [`KeyOf`] extractor.
pub struct ItemSlots<V, X> {
    items: Store<V>,
    extract: X,
}

impl<V, X> ItemSlots<V, X> {
    pub(crate) fn new(extract: X) -> Self {
        ItemSlots {
            items: Store::new(),
            extract,
        }
    }

    pub(crate) fn with_extractor(config: &Config, extract: X) -> Result<Self, CompactError> {
        Ok(ItemSlots {
            items: Store::with_config(config)?,
            extract,
        })
    }

    pub(crate) fn extractor(&self) -> &X {
        &self.extract
    }

    pub(crate) fn as_slice(&self) -> &[V] {
        self.items.as_slice()
    }
}

impl<V, X: KeyOf<V>> Slots for ItemSlots<V, X> {
    type Key = X::Key;
    type Value = V;
    type Entry = V;
    type Item<'a>
        = (&'a X::Key, &'a V)
    where
        Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    fn key(&self, index: usize) -> &X::Key {
        self.extract.key_of(&self.items.as_slice()[index])
    }

    #[inline]
    fn value(&self, index: usize) -> &V {
        &self.items.as_slice()[index]
    }

    #[inline]
    fn item(&self, index: usize) -> (&X::Key, &V) {
        let value = &self.items.as_slice()[index];
        (self.extract.key_of(value), value)
    }

    #[inline]
    fn entry_key<'a>(&self, entry: &'a V) -> &'a X::Key {
        self.extract.key_of(entry)
    }

    fn insert(&mut self, index: usize, entry: V) {
        self.items.insert(index, entry);
    }

    fn replace(&mut self, index: usize, entry: V) -> V {
        std::mem::replace(&mut self.items.as_mut_slice()[index], entry)
    }

    fn take(&mut self, index: usize) -> Option<V> {
        self.items.take(index)
    }

    fn remove(&mut self, index: usize, count: usize) {
        self.items.remove(index, count);
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn drain_all(&mut self) -> Vec<V> {
        self.items.drain_all()
    }

    fn extend_back(&mut self, entries: Vec<V>) {
        let len = self.items.len();
        self.items.insert_many(len, entries);
    }

    fn capacity(&self) -> usize {
        self.items.capacity()
    }

    fn allocate(&mut self, capacity: usize) {
        self.items.allocate(capacity);
    }

    fn compact(&mut self) {
        self.items.compact();
    }

    fn alignment(&self) -> f32 {
        self.items.alignment()
    }

    fn set_alignment(&mut self, alignment: f32) -> Result<(), CompactError> {
        self.items.set_alignment(alignment)
    }
}

impl<T: Clone> Clone for SetSlots<T> {
    fn clone(&self) -> Self {
        SetSlots {
            items: self.items.clone(),
        }
    }
}

impl<K: Clone, V: Clone> Clone for PairSlots<K, V> {
    fn clone(&self) -> Self {
        PairSlots {
            keys: self.keys.clone(),
            values: self.values.clone(),
        }
    }
}

impl<V: Clone, X: Clone> Clone for ItemSlots<V, X> {
    fn clone(&self) -> Self {
        ItemSlots {
            items: self.items.clone(),
            extract: self.extract.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SetSlots<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.as_slice()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for PairSlots<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.keys.as_slice().iter().zip(self.values.as_slice()))
            .finish()
    }
}

impl<V: fmt::Debug, X> fmt::Debug for ItemSlots<V, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.as_slice()).finish()
    }
}
