//! Bounded, optionally descending views of an ordered collection.
//!
//! A [`RangeView`] pairs a reference to the collection with a key window.
//! Shared views ([`View`]) navigate and iterate; mutable ones ([`ViewMut`])
//! can also insert keys inside their bounds, remove, clear and hand out a
//! [`CursorMut`]. Positions are recomputed from the bounds on every call,
//! so a mutable view stays correct across its own mutations.
//!
//! Navigation is logical: on a descending view `first` is the largest key in
//! range and `lower` looks for larger keys.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::ops::{Bound, Deref, DerefMut, Range};

use crate::error::CompactError;
use crate::iter::{CursorMut, Iter, Keys, Values};
use crate::ordered::Ordered;
use crate::slots::{ItemSlots, PairSlots, SetSlots, Slots};
use crate::strategy::{Comparator, KeyOf};
use crate::window::{Direction, Window, search};

/// A window over an ordered collection reached through `D`.
pub struct RangeView<D, K> {
    data: D,
    window: Window<K>,
}

/// Read-only view.
pub type View<'a, L, C> = RangeView<&'a Ordered<L, C>, <L as Slots>::Key>;

/// View that can also change the collection inside its bounds.
pub type ViewMut<'a, L, C> = RangeView<&'a mut Ordered<L, C>, <L as Slots>::Key>;

/// The comparator of a view, applied in the view's direction.
pub struct ViewOrder<'a, C> {
    order: &'a C,
    direction: Direction,
}

impl<C> ViewOrder<'_, C> {
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for ViewOrder<'_, C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        match self.direction {
            Direction::Ascending => self.order.compare(a, b),
            Direction::Descending => self.order.compare(b, a),
        }
    }
}

impl<D, K> RangeView<D, K> {
    pub(crate) fn new(data: D, window: Window<K>) -> Self {
        RangeView { data, window }
    }

    pub fn direction(&self) -> Direction {
        self.window.direction()
    }

    /// The same view iterated and navigated the other way round.
    pub fn descending(self) -> Self {
        RangeView {
            data: self.data,
            window: self.window.reversed(),
        }
    }
}

impl<D, K, L, C> RangeView<D, K>
where
    D: Deref<Target = Ordered<L, C>>,
    L: Slots<Key = K>,
    C: Comparator<K>,
{
    fn span(&self) -> Range<usize> {
        self.window.span(&self.data.slots, &self.data.order)
    }

    fn item<'s>(&'s self, index: Option<usize>) -> Option<L::Item<'s>>
    where
        L: 's, C: 's,
    {
        index.map(|i| self.data.slots.item(i))
    }

    fn key<'s>(&'s self, index: Option<usize>) -> Option<&'s K>
    where
        L: 's, C: 's,
    {
        index.map(|i| self.data.slots.key(i))
    }

    fn first_index(&self) -> Option<usize> {
        let (slots, order) = (&self.data.slots, &self.data.order);
        match self.direction() {
            Direction::Ascending => self.window.lowest(slots, order),
            Direction::Descending => self.window.highest(slots, order),
        }
    }

    fn last_index(&self) -> Option<usize> {
        let (slots, order) = (&self.data.slots, &self.data.order);
        match self.direction() {
            Direction::Ascending => self.window.highest(slots, order),
            Direction::Descending => self.window.lowest(slots, order),
        }
    }

    fn lower_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let (slots, order) = (&self.data.slots, &self.data.order);
        match self.direction() {
            Direction::Ascending => self.window.lower(slots, order, key),
            Direction::Descending => self.window.higher(slots, order, key),
        }
    }

    fn floor_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let (slots, order) = (&self.data.slots, &self.data.order);
        match self.direction() {
            Direction::Ascending => self.window.floor(slots, order, key),
            Direction::Descending => self.window.ceiling(slots, order, key),
        }
    }

    fn ceiling_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let (slots, order) = (&self.data.slots, &self.data.order);
        match self.direction() {
            Direction::Ascending => self.window.ceiling(slots, order, key),
            Direction::Descending => self.window.floor(slots, order, key),
        }
    }

    fn higher_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let (slots, order) = (&self.data.slots, &self.data.order);
        match self.direction() {
            Direction::Ascending => self.window.higher(slots, order, key),
            Direction::Descending => self.window.lower(slots, order, key),
        }
    }

    /// Position of `key` if it is stored and inside the bounds.
    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        if !self.window.contains(key, &self.data.order) {
            return None;
        }
        search(&self.data.slots, &self.data.order, key).ok()
    }

    /// Logical bounds `(from, to)` as physical `(low, high)`.
    fn physical(&self, from: Bound<K>, to: Bound<K>) -> (Bound<K>, Bound<K>) {
        match self.direction() {
            Direction::Ascending => (from, to),
            Direction::Descending => (to, from),
        }
    }

    pub fn len(&self) -> usize {
        self.span().len()
    }

    pub fn is_empty(&self) -> bool {
        self.span().is_empty()
    }

    pub fn comparator<'s>(&'s self) -> ViewOrder<'s, C>
    where
        L: 's, C: 's,
        C: 's,
    {
        ViewOrder {
            order: &self.data.order,
            direction: self.direction(),
        }
    }

    /// Whether `key` lies inside the bounds, stored or not.
    pub fn in_range<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.window.contains(key, &self.data.order)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.position(key).is_some()
    }

    pub fn get<'s, Q>(&'s self, key: &Q) -> Option<&'s L::Value>
    where
        L: 's, C: 's,
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.position(key).map(|i| self.data.slots.value(i))
    }

    pub fn find<'s, Q>(&'s self, key: &Q) -> Option<L::Item<'s>>
    where
        L: 's, C: 's,
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.item(self.position(key))
    }

    pub fn first<'s>(&'s self) -> Option<L::Item<'s>>
    where
        L: 's, C: 's,
    {
        self.item(self.first_index())
    }

    pub fn last<'s>(&'s self) -> Option<L::Item<'s>>
    where
        L: 's, C: 's,
    {
        self.item(self.last_index())
    }

    pub fn first_key<'s>(&'s self) -> Result<&'s K, CompactError>
    where
        L: 's, C: 's,
    {
        self.key(self.first_index()).ok_or(CompactError::Empty)
    }

    pub fn last_key<'s>(&'s self) -> Result<&'s K, CompactError>
    where
        L: 's, C: 's,
    {
        self.key(self.last_index()).ok_or(CompactError::Empty)
    }

    /// Nearest entry before `key` in view order.
    pub fn lower<'s, Q>(&'s self, key: &Q) -> Option<L::Item<'s>>
    where
        L: 's, C: 's,
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.item(self.lower_index(key))
    }

    pub fn floor<'s, Q>(&'s self, key: &Q) -> Option<L::Item<'s>>
    where
        L: 's, C: 's,
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.item(self.floor_index(key))
    }

    pub fn ceiling<'s, Q>(&'s self, key: &Q) -> Option<L::Item<'s>>
    where
        L: 's, C: 's,
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.item(self.ceiling_index(key))
    }

    /// Nearest entry after `key` in view order.
    pub fn higher<'s, Q>(&'s self, key: &Q) -> Option<L::Item<'s>>
    where
        L: 's, C: 's,
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.item(self.higher_index(key))
    }

    pub fn lower_key<'s, Q>(&'s self, key: &Q) -> Option<&'s K>
    where
        L: 's, C: 's,
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.key(self.lower_index(key))
    }

    pub fn floor_key<'s, Q>(&'s self, key: &Q) -> Option<&'s K>
    where
        L: 's, C: 's,
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.key(self.floor_index(key))
    }

    pub fn ceiling_key<'s, Q>(&'s self, key: &Q) -> Option<&'s K>
    where
        L: 's, C: 's,
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.key(self.ceiling_index(key))
    }

    pub fn higher_key<'s, Q>(&'s self, key: &Q) -> Option<&'s K>
    where
        L: 's, C: 's,
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.key(self.higher_index(key))
    }

    pub fn iter<'s>(&'s self) -> Iter<'s, L>
    where
        L: 's, C: 's,
    {
        Iter::new(&self.data.slots, self.span(), self.direction())
    }

    pub fn keys<'s>(&'s self) -> Keys<'s, L>
    where
        L: 's, C: 's,
    {
        Keys::new(&self.data.slots, self.span(), self.direction())
    }

    pub fn values<'s>(&'s self) -> Values<'s, L>
    where
        L: 's, C: 's,
    {
        Values::new(&self.data.slots, self.span(), self.direction())
    }

    /// Nested view between `from` and `to`, given in view order.
    ///
    /// Set bounds must lie inside this view, otherwise
    /// [`CompactError::OutOfRange`]; an unbounded side keeps this view's
    /// bound.
    pub fn range<'s>(
        &'s self,
        from: Bound<K>,
        to: Bound<K>,
    ) -> Result<View<'s, L, C>, CompactError>
    where
        L: 's, C: 's,
        C: 's,
        K: Clone,
    {
        let (low, high) = self.physical(from, to);
        let window = self.window.narrow(low, high, &self.data.order)?;
        Ok(RangeView::new(&*self.data, window))
    }

    /// Nested view of the keys before `to` in view order.
    pub fn head<'s>(&'s self, to: Bound<K>) -> Result<View<'s, L, C>, CompactError>
    where
        L: 's, C: 's,
        C: 's,
        K: Clone,
    {
        self.range(Bound::Unbounded, to)
    }

    /// Nested view of the keys from `from` on in view order.
    pub fn tail<'s>(&'s self, from: Bound<K>) -> Result<View<'s, L, C>, CompactError>
    where
        L: 's, C: 's,
        C: 's,
        K: Clone,
    {
        self.range(from, Bound::Unbounded)
    }
}

impl<D, K, L, C> RangeView<D, K>
where
    D: DerefMut<Target = Ordered<L, C>>,
    L: Slots<Key = K>,
    C: Comparator<K>,
{
    fn take(&mut self, index: Option<usize>) -> Option<L::Entry> {
        self.data.slots.take(index?)
    }

    pub fn pop_first(&mut self) -> Option<L::Entry> {
        let index = self.first_index();
        self.take(index)
    }

    pub fn pop_last(&mut self) -> Option<L::Entry> {
        let index = self.last_index();
        self.take(index)
    }

    /// Removes `key` if it is stored inside the bounds.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<L::Entry>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let index = self.position(key);
        self.take(index)
    }

    /// Removes every entry inside the bounds as one span.
    pub fn clear(&mut self) {
        let span = self.span();
        self.data.slots.remove(span.start, span.len());
    }

    /// Cursor over the entries inside the bounds, in view order.
    pub fn cursor_mut<'s>(&'s mut self) -> CursorMut<'s, L>
    where
        L: 's, C: 's,
    {
        let span = self.span();
        let direction = self.direction();
        CursorMut::new(&mut self.data.slots, span, direction)
    }

    /// Mutable form of [`range`](Self::range).
    pub fn range_mut<'s>(
        &'s mut self,
        from: Bound<K>,
        to: Bound<K>,
    ) -> Result<ViewMut<'s, L, C>, CompactError>
    where
        L: 's, C: 's,
        C: 's,
        K: Clone,
    {
        let (low, high) = self.physical(from, to);
        let window = self.window.narrow(low, high, &self.data.order)?;
        Ok(RangeView::new(&mut *self.data, window))
    }

    pub fn head_mut<'s>(&'s mut self, to: Bound<K>) -> Result<ViewMut<'s, L, C>, CompactError>
    where
        L: 's, C: 's,
        C: 's,
        K: Clone,
    {
        self.range_mut(Bound::Unbounded, to)
    }

    pub fn tail_mut<'s>(&'s mut self, from: Bound<K>) -> Result<ViewMut<'s, L, C>, CompactError>
    where
        L: 's, C: 's,
        C: 's,
        K: Clone,
    {
        self.range_mut(from, Bound::Unbounded)
    }

    fn admit(&self, key: &K) -> Result<(), CompactError> {
        if self.window.contains(key, &self.data.order) {
            Ok(())
        } else {
            Err(CompactError::OutOfRange)
        }
    }
}

impl<'a, T, C: Comparator<T>> RangeView<&'a mut Ordered<SetSlots<T>, C>, T> {
    /// Adds `value` if absent; fails with [`CompactError::OutOfRange`] when it
    /// lies outside the bounds.
    pub fn insert(&mut self, value: T) -> Result<bool, CompactError> {
        self.admit(&value)?;
        Ok(self.data.insert(value))
    }
}

impl<'a, K, V, C: Comparator<K>> RangeView<&'a mut Ordered<PairSlots<K, V>, C>, K> {
    /// Maps `key` to `value`; fails with [`CompactError::OutOfRange`] when the
    /// key lies outside the bounds.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, CompactError> {
        self.admit(&key)?;
        Ok(self.data.insert(key, value))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let index = self.position(key)?;
        Some(self.data.slots.value_mut(index))
    }
}

impl<'a, V, X, C> RangeView<&'a mut Ordered<ItemSlots<V, X>, C>, X::Key>
where
    X: KeyOf<V>,
    C: Comparator<X::Key>,
{
    /// Stores `value` under its own key, replacing an equal one; fails with
    /// [`CompactError::OutOfRange`] when the key lies outside the bounds.
    pub fn insert(&mut self, value: V) -> Result<Option<V>, CompactError> {
        self.admit(self.data.slots.entry_key(&value))?;
        Ok(self.data.insert(value))
    }
}

impl<'v, D, K, L, C> IntoIterator for &'v RangeView<D, K>
where
    D: Deref<Target = Ordered<L, C>>,
    L: Slots<Key = K> + 'v,
    C: Comparator<K> + 'v,
{
    type Item = L::Item<'v>;
    type IntoIter = Iter<'v, L>;

    fn into_iter(self) -> Iter<'v, L> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::ops::Bound::{Excluded, Included, Unbounded};

    use crate::error::CompactError;
    use crate::ordered::{CompactMap, CompactSet};
    use crate::strategy::Comparator;
    use crate::window::Direction;

    fn digits() -> CompactSet<i32> {
        (1..=9).collect()
    }

    #[test]
    fn nested_views_stay_in_bounds() {
        let set = digits();
        let view = set.range(Included(2), Excluded(8)).unwrap();
        assert_eq!(view.len(), 6);
        assert_eq!(view.first_key(), Ok(&2));
        assert_eq!(view.last_key(), Ok(&7));
        assert!(view.in_range(&7));
        assert!(!view.in_range(&8));
        assert!(!view.contains_key(&8));
        assert_eq!(view.get(&8), None);

        let inner = view.range(Included(3), Included(5)).unwrap();
        assert_eq!(inner.iter().copied().collect::<Vec<_>>(), [3, 4, 5]);
        assert_eq!(inner.ceiling(&0), Some(&3));
        assert_eq!(inner.floor(&9), Some(&5));
        assert_eq!(inner.higher(&5), None);

        let tail = view.tail(Excluded(5)).unwrap();
        assert_eq!(tail.keys().copied().collect::<Vec<_>>(), [6, 7]);
        assert_eq!(
            view.range(Included(1), Unbounded).err(),
            Some(CompactError::OutOfRange)
        );
        assert_eq!(
            view.range(Included(6), Included(3)).err(),
            Some(CompactError::InvalidRange)
        );
    }

    #[test]
    fn descending_views_navigate_backwards() {
        let set = digits();
        let desc = set.descending();
        assert_eq!(desc.direction(), Direction::Descending);
        assert_eq!(desc.first(), Some(&9));
        assert_eq!(desc.last_key(), Ok(&1));
        assert_eq!(desc.lower(&5), Some(&6));
        assert_eq!(desc.higher(&5), Some(&4));
        assert_eq!(desc.floor_key(&5), Some(&5));
        assert_eq!(desc.comparator().compare(&1, &2), Ordering::Greater);

        let part = desc.range(Included(7), Excluded(3)).unwrap();
        assert_eq!(part.iter().copied().collect::<Vec<_>>(), [7, 6, 5, 4]);
        let head = part.head(Included(6)).unwrap();
        assert_eq!(head.keys().copied().collect::<Vec<_>>(), [7, 6]);
        let ascending = part.descending();
        assert_eq!((&ascending).into_iter().copied().collect::<Vec<_>>(), [4, 5, 6, 7]);
    }

    #[test]
    fn mutable_view_rejects_keys_outside() {
        let mut map: CompactMap<i32, &str> = [(5, "five"), (10, "ten"), (20, "twenty")].into();
        let mut view = map.range_mut(Included(10), Excluded(20)).unwrap();
        assert_eq!(view.insert(15, "fifteen"), Ok(None));
        assert_eq!(view.insert(10, "TEN"), Ok(Some("ten")));
        assert_eq!(view.insert(20, "x"), Err(CompactError::OutOfRange));
        assert_eq!(view.insert(4, "x"), Err(CompactError::OutOfRange));
        *view.get_mut(&15).unwrap() = "15";
        assert_eq!(view.get_mut(&5), None);
        assert_eq!(view.remove_entry(&5), None);
        assert_eq!(view.len(), 2);

        let mut inner = view.head_mut(Excluded(12)).unwrap();
        assert_eq!(inner.insert(11, "eleven"), Ok(None));
        assert_eq!(inner.insert(13, "x"), Err(CompactError::OutOfRange));

        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            [(&5, &"five"), (&10, &"TEN"), (&11, &"eleven"), (&15, &"15"), (&20, &"twenty")]
        );
    }

    #[test]
    fn pops_follow_view_order() {
        let mut set = digits();
        let mut view = set.range_mut(Included(3), Included(6)).unwrap();
        assert_eq!(view.pop_first(), Some(3));
        assert_eq!(view.pop_last(), Some(6));
        let mut desc = view.descending();
        assert_eq!(desc.pop_first(), Some(5));
        assert_eq!(desc.pop_first(), Some(4));
        assert_eq!(desc.pop_first(), None);
        assert_eq!(desc.first_key(), Err(CompactError::Empty));
        assert_eq!(set.as_slice(), [1, 2, 7, 8, 9]);
    }

    #[test]
    fn clear_removes_only_the_span() {
        let mut set = digits();
        set.range_mut(Excluded(3), Included(6)).unwrap().clear();
        assert_eq!(set.as_slice(), [1, 2, 3, 7, 8, 9]);
        set.tail_mut(Excluded(100)).clear();
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn cursor_walks_a_descending_view() {
        let mut set = digits();
        let mut view = set.range_mut(Included(2), Included(8)).unwrap().descending();
        let mut cursor = view.cursor_mut();
        let mut seen = Vec::new();
        while let Some(&value) = cursor.next() {
            seen.push(value);
            if value % 2 == 0 {
                cursor.remove().unwrap();
            }
        }
        assert_eq!(seen, [8, 7, 6, 5, 4, 3, 2]);
        assert_eq!(set.as_slice(), [1, 3, 5, 7, 9]);
    }
}
