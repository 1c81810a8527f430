//! Iterators over index ranges of a collection or a view.
//!
//! Borrowing iterators read positions straight out of the backing stores.
//! [`CursorMut`] additionally lets the caller remove the entry it just
//! returned, shrinking its own remaining range to match.

use std::iter::FusedIterator;
use std::ops::Range;

use crate::error::CompactError;
use crate::slots::Slots;
use crate::window::Direction;

#[inline]
fn step(range: &mut Range<usize>, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Ascending => range.next(),
        Direction::Descending => range.next_back(),
    }
}

#[inline]
fn step_back(range: &mut Range<usize>, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Ascending => range.next_back(),
        Direction::Descending => range.next(),
    }
}

/// Entries of a collection or view in iteration order.
pub struct Iter<'a, L> {
    slots: &'a L,
    range: Range<usize>,
    direction: Direction,
}

impl<'a, L> Iter<'a, L> {
    pub(crate) fn new(slots: &'a L, range: Range<usize>, direction: Direction) -> Self {
        Iter {
            slots,
            range,
            direction,
        }
    }
}

impl<'a, L: Slots> Iterator for Iter<'a, L> {
    type Item = L::Item<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = step(&mut self.range, self.direction)?;
        let slots = self.slots;
        Some(slots.item(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<'a, L: Slots> DoubleEndedIterator for Iter<'a, L> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = step_back(&mut self.range, self.direction)?;
        let slots = self.slots;
        Some(slots.item(index))
    }
}

impl<L: Slots> ExactSizeIterator for Iter<'_, L> {}

impl<L: Slots> FusedIterator for Iter<'_, L> {}

impl<L> Clone for Iter<'_, L> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots,
            range: self.range.clone(),
            direction: self.direction,
        }
    }
}

pub struct Keys<'a, L> {
    slots: &'a L,
    range: Range<usize>,
    direction: Direction,
}

impl<'a, L> Keys<'a, L> {
    pub(crate) fn new(slots: &'a L, range: Range<usize>, direction: Direction) -> Self {
        Keys {
            slots,
            range,
            direction,
        }
    }
}

impl<'a, L: Slots> Iterator for Keys<'a, L> {
    type Item = &'a L::Key;

    fn next(&mut self) -> Option<Self::Item> {
        let index = step(&mut self.range, self.direction)?;
        let slots = self.slots;
        Some(slots.key(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<'a, L: Slots> DoubleEndedIterator for Keys<'a, L> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = step_back(&mut self.range, self.direction)?;
        let slots = self.slots;
        Some(slots.key(index))
    }
}

impl<L: Slots> ExactSizeIterator for Keys<'_, L> {}

pub struct Values<'a, L> {
    slots: &'a L,
    range: Range<usize>,
    direction: Direction,
}

impl<'a, L> Values<'a, L> {
    pub(crate) fn new(slots: &'a L, range: Range<usize>, direction: Direction) -> Self {
        Values {
            slots,
            range,
            direction,
        }
    }
}

impl<'a, L: Slots> Iterator for Values<'a, L> {
    type Item = &'a L::Value;

    fn next(&mut self) -> Option<Self::Item> {
        let index = step(&mut self.range, self.direction)?;
        let slots = self.slots;
        Some(slots.value(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<'a, L: Slots> DoubleEndedIterator for Values<'a, L> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = step_back(&mut self.range, self.direction)?;
        let slots = self.slots;
        Some(slots.value(index))
    }
}

impl<L: Slots> ExactSizeIterator for Values<'_, L> {}

/// Keys with mutable values of a map, in position order.
pub struct IterMut<'a, K, V>(std::iter::Zip<std::slice::Iter<'a, K>, std::slice::IterMut<'a, V>>);

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(keys: &'a [K], values: &'a mut [V]) -> Self {
        IterMut(keys.iter().zip(values.iter_mut()))
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

pub struct ValuesMut<'a, V>(std::slice::IterMut<'a, V>);

impl<'a, V> ValuesMut<'a, V> {
    pub(crate) fn new(values: &'a mut [V]) -> Self {
        ValuesMut(values.iter_mut())
    }
}

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> DoubleEndedIterator for ValuesMut<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<V> ExactSizeIterator for ValuesMut<'_, V> {}

/// Owning iterator; entries come out in position order.
pub struct IntoIter<E>(std::vec::IntoIter<E>);

impl<E> IntoIter<E> {
    pub(crate) fn new(entries: Vec<E>) -> Self {
        IntoIter(entries.into_iter())
    }
}

impl<E> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<E> DoubleEndedIterator for IntoIter<E> {
    fn next_back(&mut self) -> Option<E> {
        self.0.next_back()
    }
}

impl<E> ExactSizeIterator for IntoIter<E> {}

/// Walks a range of positions and can remove the entry it returned last.
///
/// Removal closes the gap in the backing store; the cursor moves its own
/// remaining range along with it so the walk continues at the element that
/// followed the removed one.
pub struct CursorMut<'a, L> {
    slots: &'a mut L,
    range: Range<usize>,
    current: Option<usize>,
    direction: Direction,
}

impl<'a, L: Slots> CursorMut<'a, L> {
    pub(crate) fn new(slots: &'a mut L, range: Range<usize>, direction: Direction) -> Self {
        CursorMut {
            slots,
            range,
            current: None,
            direction,
        }
    }

    /// Advances and returns the next entry.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<L::Item<'_>> {
        let index = step(&mut self.range, self.direction);
        self.current = index;
        Some(self.slots.item(index?))
    }

    /// Entry returned by the last call to [`next`](Self::next), if it is
    /// still there.
    pub fn current(&self) -> Option<L::Item<'_>> {
        self.current.map(|index| self.slots.item(index))
    }

    /// Number of entries `next` has yet to return.
    pub fn remaining(&self) -> usize {
        self.range.len()
    }

    /// Removes the entry returned by the last call to `next`.
    ///
    /// Fails with [`CompactError::NoCurrent`] before the first `next`, after
    /// the walk ended, or when that entry was already removed.
    pub fn remove(&mut self) -> Result<L::Entry, CompactError> {
        let index = self.current.take().ok_or(CompactError::NoCurrent)?;
        let entry = self.slots.take(index).ok_or(CompactError::NoCurrent)?;
        // Descending walks only have positions below `index` left, which
        // the removal does not move.
        if self.direction == Direction::Ascending {
            self.range.start -= 1;
            self.range.end -= 1;
        }
        Ok(entry)
    }
}
