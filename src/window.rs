//! Key bounds of a sub-range view and the index arithmetic that clamps
//! navigation to them.
//!
//! A [`Window`] is stored in ascending key order whatever its direction; the
//! direction only decides how views built on it map logical navigation
//! (first, lower, ...) onto the physical lowest/highest and lower/higher
//! positions computed here.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::ops::{Bound, Range};

use tracing::debug;

use crate::error::CompactError;
use crate::index;
use crate::slots::Slots;
use crate::strategy::Comparator;

/// Iteration and navigation direction of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// Binary search of `key` among the keys of `slots`.
pub(crate) fn search<L, C, Q>(slots: &L, order: &C, key: &Q) -> Result<usize, usize>
where
    L: Slots,
    L::Key: Borrow<Q>,
    C: Comparator<Q>,
    Q: ?Sized,
{
    index::compare_search(slots.len(), |i| order.compare(key, slots.key(i).borrow()))
}

fn compare<C: Comparator<Q>, Q: ?Sized>(order: &C, a: &Q, b: &Q) -> Ordering {
    order.compare(a, b)
}

pub(crate) struct Window<K> {
    low: Bound<K>,
    high: Bound<K>,
    direction: Direction,
}

impl<K> Window<K> {
    pub(crate) fn full(direction: Direction) -> Self {
        Window {
            low: Bound::Unbounded,
            high: Bound::Unbounded,
            direction,
        }
    }

    /// Window with only an upper bound, which cannot be inverted.
    pub(crate) fn head(high: Bound<K>, direction: Direction) -> Self {
        Window {
            low: Bound::Unbounded,
            high,
            direction,
        }
    }

    pub(crate) fn tail(low: Bound<K>, direction: Direction) -> Self {
        Window {
            low,
            high: Bound::Unbounded,
            direction,
        }
    }

    /// Fails with [`CompactError::InvalidRange`] when both bounds are set and
    /// `low` orders after `high`. Equal bounds are accepted whatever their
    /// inclusivity; an exclusive one just leaves the window empty.
    pub(crate) fn new<C>(
        low: Bound<K>,
        high: Bound<K>,
        direction: Direction,
        order: &C,
    ) -> Result<Self, CompactError>
    where
        C: Comparator<K>,
    {
        if let (Bound::Included(l) | Bound::Excluded(l), Bound::Included(h) | Bound::Excluded(h)) =
            (&low, &high)
        {
            if compare(order, l, h) == Ordering::Greater {
                debug!("rejected view: low bound orders after high bound");
                return Err(CompactError::InvalidRange);
            }
        }
        Ok(Window {
            low,
            high,
            direction,
        })
    }

    #[inline]
    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn reversed(mut self) -> Self {
        self.direction = self.direction.reverse();
        self
    }

    /// Whether `key` lies below the low bound.
    pub(crate) fn too_low<Q, C>(&self, key: &Q, order: &C) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        match &self.low {
            Bound::Unbounded => false,
            Bound::Included(low) => compare(order, key, low.borrow()) == Ordering::Less,
            Bound::Excluded(low) => compare(order, key, low.borrow()) != Ordering::Greater,
        }
    }

    /// Whether `key` lies above the high bound.
    pub(crate) fn too_high<Q, C>(&self, key: &Q, order: &C) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        match &self.high {
            Bound::Unbounded => false,
            Bound::Included(high) => compare(order, key, high.borrow()) == Ordering::Greater,
            Bound::Excluded(high) => compare(order, key, high.borrow()) != Ordering::Less,
        }
    }

    pub(crate) fn contains<Q, C>(&self, key: &Q, order: &C) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        !self.too_low(key, order) && !self.too_high(key, order)
    }

    /// Like [`contains`](Self::contains) with both bounds taken as inclusive.
    fn encloses<C: Comparator<K>>(&self, key: &K, order: &C) -> bool {
        let above_low = match &self.low {
            Bound::Unbounded => true,
            Bound::Included(low) | Bound::Excluded(low) => {
                compare(order, key, low) != Ordering::Less
            }
        };
        let below_high = match &self.high {
            Bound::Unbounded => true,
            Bound::Included(high) | Bound::Excluded(high) => {
                compare(order, key, high) != Ordering::Greater
            }
        };
        above_low && below_high
    }

    /// A bound of a nested window must lie in this one: an inclusive bound
    /// inside it, an exclusive one inside its closure.
    fn admits<C: Comparator<K>>(&self, bound: &Bound<K>, order: &C) -> bool {
        match bound {
            Bound::Unbounded => true,
            Bound::Included(key) => self.contains(key, order),
            Bound::Excluded(key) => self.encloses(key, order),
        }
    }

    /// Nested window with the given physical bounds; an unbounded side keeps
    /// this window's bound on that side.
    pub(crate) fn narrow<C>(
        &self,
        low: Bound<K>,
        high: Bound<K>,
        order: &C,
    ) -> Result<Self, CompactError>
    where
        K: Clone,
        C: Comparator<K>,
    {
        if !self.admits(&low, order) || !self.admits(&high, order) {
            debug!("rejected nested view: bound outside the enclosing view");
            return Err(CompactError::OutOfRange);
        }
        let low = match low {
            Bound::Unbounded => self.low.clone(),
            bound => bound,
        };
        let high = match high {
            Bound::Unbounded => self.high.clone(),
            bound => bound,
        };
        Window::new(low, high, self.direction, order)
    }

    /// Position of the smallest key inside the window.
    pub(crate) fn lowest<L, C>(&self, slots: &L, order: &C) -> Option<usize>
    where
        L: Slots<Key = K>,
        C: Comparator<K>,
    {
        let index = match &self.low {
            Bound::Unbounded => 0,
            Bound::Included(key) => index::ceiling(search(slots, order, key)),
            Bound::Excluded(key) => index::higher(search(slots, order, key)),
        };
        (index < slots.len() && !self.too_high(slots.key(index), order)).then_some(index)
    }

    /// Position of the largest key inside the window.
    pub(crate) fn highest<L, C>(&self, slots: &L, order: &C) -> Option<usize>
    where
        L: Slots<Key = K>,
        C: Comparator<K>,
    {
        let index = match &self.high {
            Bound::Unbounded => slots.len().checked_sub(1),
            Bound::Included(key) => index::floor(search(slots, order, key)),
            Bound::Excluded(key) => index::lower(search(slots, order, key)),
        };
        index.filter(|&i| !self.too_low(slots.key(i), order))
    }

    /// Positions covered by the window, empty when it holds no key.
    pub(crate) fn span<L, C>(&self, slots: &L, order: &C) -> Range<usize>
    where
        L: Slots<Key = K>,
        C: Comparator<K>,
    {
        match (self.lowest(slots, order), self.highest(slots, order)) {
            (Some(low), Some(high)) if low <= high => low..high + 1,
            _ => 0..0,
        }
    }

    pub(crate) fn lower<L, C, Q>(&self, slots: &L, order: &C, key: &Q) -> Option<usize>
    where
        L: Slots<Key = K>,
        K: Borrow<Q>,
        C: Comparator<K> + Comparator<Q>,
        Q: ?Sized,
    {
        if self.too_high(key, order) {
            return self.highest(slots, order);
        }
        index::lower(search(slots, order, key)).filter(|&i| !self.too_low::<K, C>(slots.key(i), order))
    }

    pub(crate) fn floor<L, C, Q>(&self, slots: &L, order: &C, key: &Q) -> Option<usize>
    where
        L: Slots<Key = K>,
        K: Borrow<Q>,
        C: Comparator<K> + Comparator<Q>,
        Q: ?Sized,
    {
        if self.too_high(key, order) {
            return self.highest(slots, order);
        }
        index::floor(search(slots, order, key)).filter(|&i| !self.too_low::<K, C>(slots.key(i), order))
    }

    pub(crate) fn ceiling<L, C, Q>(&self, slots: &L, order: &C, key: &Q) -> Option<usize>
    where
        L: Slots<Key = K>,
        K: Borrow<Q>,
        C: Comparator<K> + Comparator<Q>,
        Q: ?Sized,
    {
        if self.too_low(key, order) {
            return self.lowest(slots, order);
        }
        let index = index::ceiling(search(slots, order, key));
        (index < slots.len() && !self.too_high::<K, C>(slots.key(index), order)).then_some(index)
    }

    pub(crate) fn higher<L, C, Q>(&self, slots: &L, order: &C, key: &Q) -> Option<usize>
    where
        L: Slots<Key = K>,
        K: Borrow<Q>,
        C: Comparator<K> + Comparator<Q>,
        Q: ?Sized,
    {
        if self.too_low(key, order) {
            return self.lowest(slots, order);
        }
        let index = index::higher(search(slots, order, key));
        (index < slots.len() && !self.too_high::<K, C>(slots.key(index), order)).then_some(index)
    }
}

impl<K: Clone> Clone for Window<K> {
    fn clone(&self) -> Self {
        Window {
            low: self.low.clone(),
            high: self.high.clone(),
            direction: self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::SetSlots;
    use crate::strategy::NaturalOrder;

    fn slots(items: &[i32]) -> SetSlots<i32> {
        let mut slots = SetSlots::new();
        for (i, item) in items.iter().enumerate() {
            slots.insert(i, *item);
        }
        slots
    }

    fn window(low: Bound<i32>, high: Bound<i32>) -> Window<i32> {
        Window::new(low, high, Direction::Ascending, &NaturalOrder).unwrap()
    }

    #[test]
    fn rejects_inverted_bounds() {
        let inverted = Window::new(
            Bound::Included(4),
            Bound::Excluded(2),
            Direction::Ascending,
            &NaturalOrder,
        );
        assert_eq!(inverted.err(), Some(CompactError::InvalidRange));
        // equal exclusive bounds make an empty window, not an error
        let empty = window(Bound::Excluded(3), Bound::Excluded(3));
        assert_eq!(empty.span(&slots(&[1, 2, 3, 4]), &NaturalOrder), 0..0);
    }

    #[test]
    fn bound_predicates() {
        let w = window(Bound::Included(2), Bound::Excluded(4));
        let order = NaturalOrder;
        assert!(w.too_low(&1, &order));
        assert!(!w.too_low(&2, &order));
        assert!(w.too_high(&4, &order));
        assert!(!w.too_high(&3, &order));
        assert!(!Window::<i32>::full(Direction::Ascending).too_high(&i32::MAX, &order));
    }

    #[test]
    fn clamps_navigation() {
        let data = slots(&[1, 2, 3, 4, 5]);
        let order = NaturalOrder;
        let w = window(Bound::Included(2), Bound::Excluded(4));
        assert_eq!(w.span(&data, &order), 1..3);
        assert_eq!(w.lowest(&data, &order), Some(1));
        assert_eq!(w.highest(&data, &order), Some(2));
        assert_eq!(w.lower(&data, &order, &2), None);
        assert_eq!(w.lower(&data, &order, &9), Some(2));
        assert_eq!(w.floor(&data, &order, &3), Some(2));
        assert_eq!(w.ceiling(&data, &order, &0), Some(1));
        assert_eq!(w.ceiling(&data, &order, &4), None);
        assert_eq!(w.higher(&data, &order, &2), Some(2));
        assert_eq!(w.higher(&data, &order, &3), None);
    }

    #[test]
    fn window_between_keys_is_empty() {
        let data = slots(&[10, 20, 30]);
        let w = window(Bound::Excluded(10), Bound::Excluded(20));
        assert_eq!(w.lowest(&data, &NaturalOrder), None);
        assert_eq!(w.highest(&data, &NaturalOrder), None);
        assert_eq!(w.span(&data, &NaturalOrder).len(), 0);
    }

    #[test]
    fn nested_windows_stay_inside() {
        let order = NaturalOrder;
        let outer = window(Bound::Included(2), Bound::Excluded(8));
        let inner = outer
            .narrow(Bound::Excluded(2), Bound::Unbounded, &order)
            .unwrap();
        assert!(inner.too_low(&2, &order));
        assert!(inner.too_high(&8, &order));
        // exclusive bound on the closure of the outer window is fine
        assert!(outer.narrow(Bound::Unbounded, Bound::Excluded(8), &order).is_ok());
        assert_eq!(
            outer.narrow(Bound::Included(8), Bound::Unbounded, &order).err(),
            Some(CompactError::OutOfRange)
        );
        assert_eq!(
            outer.narrow(Bound::Included(1), Bound::Unbounded, &order).err(),
            Some(CompactError::OutOfRange)
        );
    }
}
