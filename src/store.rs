//! Contiguous backing store with a floating used region.
//!
//! A `Store<T>` owns a buffer of `capacity` slots of which the run
//! `[from, from + len)` is initialised. Insertions and removals move whichever
//! side of the affected position is shorter, using the free margin on that
//! side, so their cost is bounded by the distance to the nearer end rather
//! than by the length of the store. When neither margin suffices the region is
//! re-seated inside the buffer, or the buffer grows by half and the region is
//! placed according to `alignment`.

use std::fmt;
use std::mem::MaybeUninit;
use std::ptr;

use tracing::trace;

use crate::config::{Config, check_alignment};
use crate::error::CompactError;

pub struct Store<T> {
    buf: Box<[MaybeUninit<T>]>,
    from: usize,
    len: usize,
    alignment: f32,
}

fn uninit_buffer<T>(capacity: usize) -> Box<[MaybeUninit<T>]> {
    std::iter::repeat_with(MaybeUninit::uninit)
        .take(capacity)
        .collect()
}

/// Capacity needed to hold `required` slots: unchanged if it already fits,
/// otherwise the larger of one and a half times the current capacity and
/// `required`.
fn grown_capacity(capacity: usize, required: usize) -> usize {
    if capacity >= required {
        return capacity;
    }
    let grown = capacity.saturating_add(capacity >> 1);
    grown.max(required)
}

impl<T> Store<T> {
    pub fn new() -> Self {
        Store {
            buf: uninit_buffer(0),
            from: 0,
            len: 0,
            alignment: 0.5,
        }
    }

    pub fn with_config(config: &Config) -> Result<Self, CompactError> {
        config.validate()?;
        let mut store = Store::new();
        store.alignment = config.alignment;
        store.allocate(config.capacity);
        Ok(store)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Offset of the used region inside the buffer.
    #[inline]
    pub fn start(&self) -> usize {
        self.from
    }

    #[inline]
    pub fn alignment(&self) -> f32 {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: f32) -> Result<(), CompactError> {
        check_alignment(alignment)?;
        self.alignment = alignment;
        Ok(())
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[from, from + len)` is initialised and inside `buf`.
        unsafe { std::slice::from_raw_parts(self.base().add(self.from), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for `as_slice`, with unique access through `&mut self`.
        unsafe { std::slice::from_raw_parts_mut(self.base_mut().add(self.from), self.len) }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, value: T) -> Option<T> {
        self.get_mut(index).map(|slot| std::mem::replace(slot, value))
    }

    /// Inserts `value` so that it ends up at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        if let Err(err) = self.try_insert(index, value) {
            panic!("{err}");
        }
    }

    /// Checked form of [`insert`](Self::insert).
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), CompactError> {
        self.check_insert(index, 1)?;
        self.open_gap(index, 1);
        // SAFETY: `open_gap` left slot `from + index` free and inside `buf`.
        unsafe { ptr::write(self.base_mut().add(self.from + index), value) };
        self.len += 1;
        Ok(())
    }

    /// Inserts all of `values` as one run starting at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_many(&mut self, index: usize, values: Vec<T>) {
        if let Err(err) = self.try_insert_many(index, values) {
            panic!("{err}");
        }
    }

    /// Checked form of [`insert_many`](Self::insert_many).
    pub fn try_insert_many(&mut self, index: usize, mut values: Vec<T>) -> Result<(), CompactError> {
        let count = values.len();
        self.check_insert(index, count)?;
        if count == 0 {
            return Ok(());
        }
        self.open_gap(index, count);
        // SAFETY: the gap holds exactly `count` free slots; ownership of the
        // elements moves out of `values`, whose length is reset before drop.
        unsafe {
            ptr::copy_nonoverlapping(
                values.as_ptr(),
                self.base_mut().add(self.from + index),
                count,
            );
            values.set_len(0);
        }
        self.len += count;
        Ok(())
    }

    /// Drops the `count` elements starting at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index + count > len`.
    pub fn remove(&mut self, index: usize, count: usize) {
        if let Err(err) = self.try_remove(index, count) {
            panic!("{err}");
        }
    }

    /// Checked form of [`remove`](Self::remove).
    pub fn try_remove(&mut self, index: usize, count: usize) -> Result<(), CompactError> {
        self.check_span(index, count)?;
        if count == 0 {
            return Ok(());
        }
        let len = self.len;
        // A panicking destructor leaks the rest instead of dropping twice.
        self.len = 0;
        // SAFETY: the span was checked against the initialised region.
        unsafe {
            let span = std::slice::from_raw_parts_mut(
                self.base_mut().add(self.from + index),
                count,
            );
            ptr::drop_in_place(span);
        }
        self.close_gap(index, count, len);
        Ok(())
    }

    /// Moves the element at `index` out of the store.
    pub fn take(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: `index` is inside the initialised region; the slot is
        // excluded from it by `close_gap` right after the read.
        let value = unsafe { ptr::read(self.base().add(self.from + index)) };
        let len = self.len;
        self.close_gap(index, 1, len);
        Some(value)
    }

    pub fn clear(&mut self) {
        self.remove(0, self.len);
    }

    /// Moves every element out, leaving the store empty but keeping its buffer.
    pub fn drain_all(&mut self) -> Vec<T> {
        let len = self.len;
        let mut out = Vec::with_capacity(len);
        // SAFETY: the whole region moves into `out`; `len` is zeroed so the
        // store no longer considers those slots initialised.
        unsafe {
            ptr::copy_nonoverlapping(self.base().add(self.from), out.as_mut_ptr(), len);
            out.set_len(len);
        }
        self.len = 0;
        self.from = self.seat(self.capacity());
        out
    }

    /// Ensures room for at least `capacity` elements without changing content.
    pub fn allocate(&mut self, capacity: usize) {
        let target = grown_capacity(self.capacity(), capacity);
        self.resize(target);
    }

    /// Shrinks the buffer to exactly the number of stored elements.
    pub fn compact(&mut self) {
        trace!(len = self.len, capacity = self.capacity(), "compacting store");
        self.resize(self.len);
    }

    // --- internals ---

    #[inline]
    fn base(&self) -> *const T {
        self.buf.as_ptr() as *const T
    }

    #[inline]
    fn base_mut(&mut self) -> *mut T {
        self.buf.as_mut_ptr() as *mut T
    }

    /// Start offset for a region that leaves `space` free slots in total.
    fn seat(&self, space: usize) -> usize {
        ((space as f64 * self.alignment as f64) as usize).min(space)
    }

    fn check_insert(&self, index: usize, count: usize) -> Result<(), CompactError> {
        if index > self.len || self.len.checked_add(count).is_none() {
            return Err(CompactError::IndexOutOfBounds {
                index,
                count,
                len: self.len,
            });
        }
        Ok(())
    }

    fn check_span(&self, index: usize, count: usize) -> Result<(), CompactError> {
        match index.checked_add(count) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(CompactError::IndexOutOfBounds {
                index,
                count,
                len: self.len,
            }),
        }
    }

    /// Reallocates to `capacity` slots (which must hold `len`) and re-seats
    /// the region.
    fn resize(&mut self, capacity: usize) {
        if capacity == self.capacity() {
            return;
        }
        let len = self.len;
        let from = self.seat(capacity - len);
        let mut buf = uninit_buffer::<T>(capacity);
        // SAFETY: disjoint buffers, both ranges in bounds; the old buffer is
        // dropped as `MaybeUninit` so the moved elements are not dropped.
        unsafe {
            ptr::copy_nonoverlapping(
                self.base().add(self.from),
                buf.as_mut_ptr().add(from) as *mut T,
                len,
            );
        }
        trace!(len, from, capacity, "store resized");
        self.buf = buf;
        self.from = from;
    }

    /// Rearranges the region so that logical slots `[index, index + count)`
    /// are free, keeping `len` unchanged. The caller fills the gap and then
    /// adds `count` to `len`.
    fn open_gap(&mut self, index: usize, count: usize) {
        let from = self.from;
        let len = self.len;
        let back = len - index;
        let len2 = len + count;
        let capacity = self.capacity();
        let capacity2 = grown_capacity(capacity, len2);

        if capacity2 != capacity {
            let from2 = self.seat(capacity2 - len2);
            let mut buf = uninit_buffer::<T>(capacity2);
            // SAFETY: disjoint buffers; both parts land inside the new one.
            unsafe {
                let dst = buf.as_mut_ptr() as *mut T;
                ptr::copy_nonoverlapping(self.base().add(from), dst.add(from2), index);
                ptr::copy_nonoverlapping(
                    self.base().add(from + index),
                    dst.add(from2 + index + count),
                    back,
                );
            }
            trace!(len = len2, from = from2, capacity = capacity2, "store grown");
            self.buf = buf;
            self.from = from2;
            return;
        }

        let front_fits = from >= count;
        let back_fits = from + len2 <= capacity;
        let prefer_back = index > len / 2;

        // SAFETY (all branches): source and destination ranges lie inside
        // `buf`; `ptr::copy` tolerates overlap.
        unsafe {
            let base = self.base_mut();
            if back_fits && (prefer_back || !front_fits) {
                ptr::copy(base.add(from + index), base.add(from + index + count), back);
                return;
            }
            if front_fits {
                ptr::copy(base.add(from), base.add(from - count), index);
                self.from = from - count;
                return;
            }

            let from2 = self.seat(capacity - len2);
            if from2 < from {
                ptr::copy(base.add(from), base.add(from2), index);
                ptr::copy(base.add(from + index), base.add(from2 + index + count), back);
            } else {
                ptr::copy(base.add(from + index), base.add(from2 + index + count), back);
                ptr::copy(base.add(from), base.add(from2), index);
            }
            trace!(len = len2, from = from2, capacity, "store re-seated");
            self.from = from2;
        }
    }

    /// Closes the now-vacant logical slots `[index, index + count)` of a
    /// region that held `len` elements, moving the shorter side.
    fn close_gap(&mut self, index: usize, count: usize, len: usize) {
        let from = self.from;
        let len2 = len - count;
        if len2 == 0 {
            self.from = self.seat(self.capacity());
        } else if index > len2 / 2 {
            // SAFETY: the back part `[index + count, len)` moves down over the
            // vacant slots; all inside `buf`.
            unsafe {
                let base = self.base_mut();
                ptr::copy(base.add(from + index + count), base.add(from + index), len2 - index);
            }
        } else {
            // SAFETY: the front part `[0, index)` moves up over the vacant
            // slots; all inside `buf`.
            unsafe {
                let base = self.base_mut();
                ptr::copy(base.add(from), base.add(from + count), index);
            }
            self.from = from + count;
        }
        self.len = len2;
    }
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Store::new()
    }
}

impl<T> Drop for Store<T> {
    fn drop(&mut self) {
        // SAFETY: exactly the initialised region is dropped, once.
        unsafe { ptr::drop_in_place(self.as_mut_slice() as *mut [T]) };
    }
}

impl<T: Clone> Clone for Store<T> {
    fn clone(&self) -> Self {
        let mut out: Store<T> = Store {
            buf: uninit_buffer(self.capacity()),
            from: self.from,
            len: 0,
            alignment: self.alignment,
        };
        for (i, item) in self.as_slice().iter().enumerate() {
            // SAFETY: same capacity and offset as `self`; `len` tracks the
            // written prefix so a panicking `clone` drops only those.
            unsafe { ptr::write(out.base_mut().add(out.from + i), item.clone()) };
            out.len = i + 1;
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
