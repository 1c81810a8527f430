//! Sorted collections with navigation and range views.
//!
//! [`Ordered`] keeps its entries sorted by a [`Comparator`] in the stores of a
//! layout `L`. Lookups are a binary search over the key positions; inserting
//! or removing shifts only the shorter side of the store. The three public
//! aliases pick a layout:
//!
//! - [`CompactSet`]: one store of elements.
//! - [`CompactMap`]: parallel key and value stores.
//! - [`CompactItemMap`]: one store of values that embed their key.
//!
//! ```
//! use compactmap::CompactSet;
//! use std::ops::Bound::{Excluded, Included};
//!
//! let set: CompactSet<i32> = [5, 1, 3, 2, 4].into();
//! assert_eq!(set.floor(&3), Some(&3));
//! assert_eq!(set.lower(&3), Some(&2));
//! let view = set.range(Included(2), Excluded(4)).unwrap();
//! assert_eq!(view.iter().copied().collect::<Vec<_>>(), [2, 3]);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::ops::Bound;

use crate::config::Config;
use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::error::CompactError;
use crate::index;
use crate::iter::{CursorMut, IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::slots::{ItemSlots, OnEqual, PairSlots, SetSlots, Slots};
use crate::strategy::{Comparator, KeyOf, NaturalOrder};
use crate::view::{RangeView, View, ViewMut};
use crate::window::{Direction, Window, search};

pub struct Ordered<L, C = NaturalOrder> {
    pub(crate) slots: L,
    pub(crate) order: C,
}

/// Sorted set of `T`.
pub type CompactSet<T, C = NaturalOrder> = Ordered<SetSlots<T>, C>;

/// Sorted map from `K` to `V`.
pub type CompactMap<K, V, C = NaturalOrder> = Ordered<PairSlots<K, V>, C>;

/// Sorted collection of values keyed by the part `X` reads out of them.
pub type CompactItemMap<V, X, C = NaturalOrder> = Ordered<ItemSlots<V, X>, C>;

impl<L: Slots, C> Ordered<L, C> {
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

    /// Makes room for at least `capacity` entries.
    pub fn allocate(&mut self, capacity: usize) {
        self.slots.allocate(capacity);
    }

    /// Releases unused capacity.
    pub fn compact(&mut self) {
        self.slots.compact();
    }

    pub fn alignment(&self) -> f32 {
        self.slots.alignment()
    }

    pub fn set_alignment(&mut self, alignment: f32) -> Result<(), CompactError> {
        self.slots.set_alignment(alignment)
    }

    pub fn comparator(&self) -> &C {
        &self.order
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

    /// Entry at sorted position `index`.
    pub fn get_index(&self, index: usize) -> Option<L::Item<'_>> {
        (index < self.len()).then(|| self.slots.item(index))
    }

    pub fn first(&self) -> Option<L::Item<'_>> {
        self.get_index(0)
    }

    pub fn last(&self) -> Option<L::Item<'_>> {
        self.get_index(self.len().checked_sub(1)?)
    }

    /// Smallest key, or [`CompactError::Empty`].
    pub fn first_key(&self) -> Result<&L::Key, CompactError> {
        if self.is_empty() {
            return Err(CompactError::Empty);
        }
        Ok(self.slots.key(0))
    }

    /// Largest key, or [`CompactError::Empty`].
    pub fn last_key(&self) -> Result<&L::Key, CompactError> {
        let last = self.len().checked_sub(1).ok_or(CompactError::Empty)?;
        Ok(self.slots.key(last))
    }

    pub fn pop_first(&mut self) -> Option<L::Entry> {
        self.slots.take(0)
    }

    pub fn pop_last(&mut self) -> Option<L::Entry> {
        let last = self.len().checked_sub(1)?;
        self.slots.take(last)
    }

    /// Removes the entry at sorted position `index`.
    pub fn remove_index(&mut self, index: usize) -> Option<L::Entry> {
        self.slots.take(index)
    }

    /// Cursor over all entries, smallest key first.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, L> {
        let len = self.len();
        CursorMut::new(&mut self.slots, 0..len, Direction::Ascending)
    }

    /// Cursor over all entries, largest key first.
    pub fn cursor_mut_back(&mut self) -> CursorMut<'_, L> {
        let len = self.len();
        CursorMut::new(&mut self.slots, 0..len, Direction::Descending)
    }

    /// Keeps the entries for which `keep` returns `true`, in one pass.
    fn retain_entries<F>(&mut self, keep: F)
    where
        F: FnMut(&mut L::Entry) -> bool,
    {
        let mut entries = self.slots.drain_all();
        entries.retain_mut(keep);
        self.slots.extend_back(entries);
    }
}

impl<L, C> Ordered<L, C>
where
    L: Slots,
    C: Comparator<L::Key>,
{
    fn locate<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        search(&self.slots, &self.order, key)
    }

    fn item_at(&self, index: Option<usize>) -> Option<L::Item<'_>> {
        index.map(|i| self.slots.item(i))
    }

    fn key_at(&self, index: Option<usize>) -> Option<&L::Key> {
        index.map(|i| self.slots.key(i))
    }

    /// Sorted position of `key`, if stored.
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.locate(key).ok()
    }

    /// Number of stored keys that order before `key`.
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        index::ceiling(self.locate(key))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.locate(key).is_ok()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&L::Value>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let index = self.locate(key).ok()?;
        Some(self.slots.value(index))
    }

    /// The whole entry stored under `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<L::Item<'_>>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.item_at(self.locate(key).ok())
    }

    /// Entry with the greatest key strictly less than `key`.
    pub fn lower<Q>(&self, key: &Q) -> Option<L::Item<'_>>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.item_at(index::lower(self.locate(key)))
    }

    /// Entry with the greatest key less than or equal to `key`.
    pub fn floor<Q>(&self, key: &Q) -> Option<L::Item<'_>>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.item_at(index::floor(self.locate(key)))
    }

    /// Entry with the least key greater than or equal to `key`.
    pub fn ceiling<Q>(&self, key: &Q) -> Option<L::Item<'_>>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.get_index(index::ceiling(self.locate(key)))
    }

    /// Entry with the least key strictly greater than `key`.
    pub fn higher<Q>(&self, key: &Q) -> Option<L::Item<'_>>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.get_index(index::higher(self.locate(key)))
    }

    pub fn lower_key<Q>(&self, key: &Q) -> Option<&L::Key>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.key_at(index::lower(self.locate(key)))
    }

    pub fn floor_key<Q>(&self, key: &Q) -> Option<&L::Key>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.key_at(index::floor(self.locate(key)))
    }

    pub fn ceiling_key<Q>(&self, key: &Q) -> Option<&L::Key>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let index = index::ceiling(self.locate(key));
        self.key_at((index < self.len()).then_some(index))
    }

    pub fn higher_key<Q>(&self, key: &Q) -> Option<&L::Key>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let index = index::higher(self.locate(key));
        self.key_at((index < self.len()).then_some(index))
    }

    /// Removes and returns the entry stored under `key`.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<L::Entry>
    where
        L::Key: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let index = self.locate(key).ok()?;
        self.slots.take(index)
    }

    /// View of the keys between `low` and `high`.
    ///
    /// Fails with [`CompactError::InvalidRange`] when `low` orders after
    /// `high`. Equal bounds give an empty view unless both are inclusive.
    pub fn range(
        &self,
        low: Bound<L::Key>,
        high: Bound<L::Key>,
    ) -> Result<View<'_, L, C>, CompactError> {
        let window = Window::new(low, high, Direction::Ascending, &self.order)?;
        Ok(RangeView::new(self, window))
    }

    pub fn range_mut(
        &mut self,
        low: Bound<L::Key>,
        high: Bound<L::Key>,
    ) -> Result<ViewMut<'_, L, C>, CompactError> {
        let window = Window::new(low, high, Direction::Ascending, &self.order)?;
        Ok(RangeView::new(self, window))
    }

    /// View of the keys up to `high`.
    pub fn head(&self, high: Bound<L::Key>) -> View<'_, L, C> {
        RangeView::new(self, Window::head(high, Direction::Ascending))
    }

    pub fn head_mut(&mut self, high: Bound<L::Key>) -> ViewMut<'_, L, C> {
        RangeView::new(self, Window::head(high, Direction::Ascending))
    }

    /// View of the keys from `low` on.
    pub fn tail(&self, low: Bound<L::Key>) -> View<'_, L, C> {
        RangeView::new(self, Window::tail(low, Direction::Ascending))
    }

    pub fn tail_mut(&mut self, low: Bound<L::Key>) -> ViewMut<'_, L, C> {
        RangeView::new(self, Window::tail(low, Direction::Ascending))
    }

    /// The whole collection, largest key first.
    pub fn descending(&self) -> View<'_, L, C> {
        RangeView::new(self, Window::full(Direction::Descending))
    }

    pub fn descending_mut(&mut self) -> ViewMut<'_, L, C> {
        RangeView::new(self, Window::full(Direction::Descending))
    }

    /// Stores `entry`, replacing and returning one with an equal key.
    fn put(&mut self, entry: L::Entry) -> Option<L::Entry> {
        match self.locate(self.slots.entry_key(&entry)) {
            Ok(index) => Some(self.slots.replace(index, entry)),
            Err(index) => {
                self.slots.insert(index, entry);
                None
            }
        }
    }

    /// Stores every entry. An entry whose key equals a stored or an earlier
    /// entry's key replaces it under [`OnEqual::Replace`] and is dropped under
    /// [`OnEqual::Keep`].
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
        let mut entries: Vec<L::Entry> = entries.into_iter().collect();
        let (slots, order) = (&self.slots, &self.order);
        // stable, so equal keys keep their arrival order
        entries.sort_by(|a, b| order.compare(slots.entry_key(a), slots.entry_key(b)));
        let mut sorted: Vec<L::Entry> = Vec::with_capacity(entries.len());
        for entry in entries {
            match sorted.last_mut() {
                Some(last) if order.compare(slots.entry_key(last), slots.entry_key(&entry)).is_eq() => {
                    if on_equal == OnEqual::Replace {
                        *last = entry;
                    }
                }
                _ => sorted.push(entry),
            }
        }
        self.slots.extend_back(sorted);
    }

    /// Moves every entry of `other` into `self`, leaving `other` empty.
    /// Entries of `other` replace those of `self` with equal keys.
    pub fn append(&mut self, other: &mut Self) {
        let entries = other.slots.drain_all();
        self.load(entries, OnEqual::Replace);
    }
}

// --- Set ---

impl<T> Ordered<SetSlots<T>> {
    pub fn new() -> Self {
        Ordered {
            slots: SetSlots::new(),
            order: NaturalOrder,
        }
    }
}

impl<T, C: Comparator<T>> Ordered<SetSlots<T>, C> {
    pub fn with_comparator(order: C) -> Self {
        Ordered {
            slots: SetSlots::new(),
            order,
        }
    }

    pub fn with_config(config: &Config, order: C) -> Result<Self, CompactError> {
        Ok(Ordered {
            slots: SetSlots::with_config(config)?,
            order,
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

    /// Adds `value`, replacing and returning an equal stored element.
    pub fn replace(&mut self, value: T) -> Option<T> {
        self.put(value)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.contains_key(value)
    }

    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.remove_entry(value).is_some()
    }

    /// Removes and returns the element equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.remove_entry(value)
    }

    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        self.retain_entries(|value| keep(value));
    }

    pub fn as_slice(&self) -> &[T] {
        self.slots.as_slice()
    }
}

impl<T, C: Default> Default for Ordered<SetSlots<T>, C> {
    fn default() -> Self {
        Ordered {
            slots: SetSlots::new(),
            order: C::default(),
        }
    }
}

impl<T, C: Comparator<T>> Extend<T> for Ordered<SetSlots<T>, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.load(iter, OnEqual::Keep);
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for Ordered<SetSlots<T>, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.load(iter, OnEqual::Keep);
        set
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for Ordered<SetSlots<T>> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T: PartialEq, C> PartialEq for Ordered<SetSlots<T>, C> {
    fn eq(&self, other: &Self) -> bool {
        self.slots.as_slice() == other.slots.as_slice()
    }
}

impl<T: Eq, C> Eq for Ordered<SetSlots<T>, C> {}

// --- Map ---

impl<K, V> Ordered<PairSlots<K, V>> {
    pub fn new() -> Self {
        Ordered {
            slots: PairSlots::new(),
            order: NaturalOrder,
        }
    }
}

impl<K, V, C: Comparator<K>> Ordered<PairSlots<K, V>, C> {
    pub fn with_comparator(order: C) -> Self {
        Ordered {
            slots: PairSlots::new(),
            order,
        }
    }

    pub fn with_config(config: &Config, order: C) -> Result<Self, CompactError> {
        Ok(Ordered {
            slots: PairSlots::with_config(config)?,
            order,
        })
    }

    /// Maps `key` to `value`. If the key was present its value is replaced
    /// and returned; the stored key is kept.
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
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let index = self.locate(key).ok()?;
        Some(self.slots.value_mut(index))
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C> {
        match self.locate(&key) {
            Ok(index) => Entry::Occupied(OccupiedEntry::new(self, index)),
            Err(index) => Entry::Vacant(VacantEntry::new(self, key, index)),
        }
    }

    pub fn first_entry(&mut self) -> Option<OccupiedEntry<'_, K, V, C>> {
        if self.is_empty() {
            return None;
        }
        Some(OccupiedEntry::new(self, 0))
    }

    pub fn last_entry(&mut self) -> Option<OccupiedEntry<'_, K, V, C>> {
        let last = self.len().checked_sub(1)?;
        Some(OccupiedEntry::new(self, last))
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.first()
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.last()
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        if index < self.len() {
            Some(self.slots.key_value_mut(index))
        } else {
            None
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let (keys, values) = self.slots.split_mut();
        IterMut::new(keys, values)
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut::new(self.slots.values_mut())
    }

    /// Linear scan of the values.
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

impl<K, V, C: Default> Default for Ordered<PairSlots<K, V>, C> {
    fn default() -> Self {
        Ordered {
            slots: PairSlots::new(),
            order: C::default(),
        }
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for Ordered<PairSlots<K, V>, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.load(iter, OnEqual::Replace);
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for Ordered<PairSlots<K, V>, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.load(iter, OnEqual::Replace);
        map
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for Ordered<PairSlots<K, V>> {
    fn from(items: [(K, V); N]) -> Self {
        items.into_iter().collect()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for Ordered<PairSlots<K, V>, C> {
    fn eq(&self, other: &Self) -> bool {
        self.slots.keys() == other.slots.keys() && self.slots.values() == other.slots.values()
    }
}

impl<K: Eq, V: Eq, C> Eq for Ordered<PairSlots<K, V>, C> {}

// --- Self-keyed map ---

impl<V, X: KeyOf<V>> Ordered<ItemSlots<V, X>> {
    pub fn new(extract: X) -> Self {
        Ordered {
            slots: ItemSlots::new(extract),
            order: NaturalOrder,
        }
    }
}

impl<V, X, C> Ordered<ItemSlots<V, X>, C>
where
    X: KeyOf<V>,
    C: Comparator<X::Key>,
{
    pub fn with_comparator(extract: X, order: C) -> Self {
        Ordered {
            slots: ItemSlots::new(extract),
            order,
        }
    }

    pub fn with_config(config: &Config, extract: X, order: C) -> Result<Self, CompactError> {
        Ok(Ordered {
            slots: ItemSlots::with_extractor(config, extract)?,
            order,
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
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.remove_entry(key)
    }

    /// Linear scan of the values.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.slots.as_slice().contains(value)
    }

    /// Keeps the values for which `keep` returns `true`. Only shared access
    /// is given out, since changing a value could change its key.
    pub fn retain<F: FnMut(&V) -> bool>(&mut self, mut keep: F) {
        self.retain_entries(|value| keep(value));
    }

    pub fn as_slice(&self) -> &[V] {
        self.slots.as_slice()
    }

    pub fn extractor(&self) -> &X {
        self.slots.extractor()
    }
}

impl<V, X, C> Extend<V> for Ordered<ItemSlots<V, X>, C>
where
    X: KeyOf<V>,
    C: Comparator<X::Key>,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.load(iter, OnEqual::Replace);
    }
}

impl<V, X, C> FromIterator<V> for Ordered<ItemSlots<V, X>, C>
where
    X: KeyOf<V> + Default,
    C: Comparator<X::Key> + Default,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut map = Self::with_comparator(X::default(), C::default());
        map.load(iter, OnEqual::Replace);
        map
    }
}

impl<V: PartialEq, X, C> PartialEq for Ordered<ItemSlots<V, X>, C> {
    fn eq(&self, other: &Self) -> bool {
        self.slots.as_slice() == other.slots.as_slice()
    }
}

impl<V: Eq, X, C> Eq for Ordered<ItemSlots<V, X>, C> {}

// --- Shared impls ---

impl<L: Clone, C: Clone> Clone for Ordered<L, C> {
    fn clone(&self) -> Self {
        Ordered {
            slots: self.slots.clone(),
            order: self.order.clone(),
        }
    }
}

impl<L: fmt::Debug, C> fmt::Debug for Ordered<L, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slots.fmt(f)
    }
}

impl<L: Slots, C> IntoIterator for Ordered<L, C> {
    type Item = L::Entry;
    type IntoIter = IntoIter<L::Entry>;

    fn into_iter(mut self) -> IntoIter<L::Entry> {
        IntoIter::new(self.slots.drain_all())
    }
}

impl<'a, L: Slots, C> IntoIterator for &'a Ordered<L, C> {
    type Item = L::Item<'a>;
    type IntoIter = Iter<'a, L>;

    fn into_iter(self) -> Iter<'a, L> {
        self.iter()
    }
}
