//! Ordering, hashing and key-extraction capabilities injected into collections.
//!
//! Ordered collections take a [`Comparator`], hashed ones an
//! [`Equivalence`], and self-keyed maps a [`KeyOf`] that reads the key out of
//! a stored value. All three are plain values chosen at construction, so a
//! collection's behaviour is fixed by its type parameters rather than by
//! subclassing.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash};
use std::marker::PhantomData;

/// A total order over `T`.
///
/// Must stay consistent for as long as a collection using it holds elements.
/// Closures `Fn(&T, &T) -> Ordering` implement it directly.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The order given by `T: Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The inverse of another comparator, for collections sorted largest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Hash and equality over `T`.
///
/// `equals(a, b)` must imply `hash(a) == hash(b)`. Hashed collections sort by
/// hash and resolve collisions with `equals`.
pub trait Equivalence<T: ?Sized> {
    fn hash(&self, item: &T) -> u64;
    fn equals(&self, a: &T, b: &T) -> bool;
}

/// `Hash` + `Eq` through a `BuildHasher`.
///
/// The default hasher has fixed keys, so element order of hashed collections
/// is reproducible between runs.
#[derive(Debug, Clone, Default)]
pub struct StdHash<S = BuildHasherDefault<DefaultHasher>> {
    build: S,
}

impl<S> StdHash<S> {
    pub fn with_hasher(build: S) -> Self {
        StdHash { build }
    }
}

impl<T: Hash + Eq + ?Sized, S: BuildHasher> Equivalence<T> for StdHash<S> {
    #[inline]
    fn hash(&self, item: &T) -> u64 {
        self.build.hash_one(item)
    }

    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Reads the key embedded in a stored value.
///
/// Closures `Fn(&V) -> &K` implement it directly.
pub trait KeyOf<V> {
    type Key;

    fn key_of<'a>(&self, value: &'a V) -> &'a Self::Key;
}

/// Adapter that turns a key-reading function into a [`KeyOf`].
pub struct KeyFn<K, F> {
    read: F,
    _key: PhantomData<fn(&K)>,
}

impl<K, F> KeyFn<K, F> {
    pub fn new<V>(read: F) -> Self
    where
        F: for<'a> Fn(&'a V) -> &'a K,
    {
        KeyFn {
            read,
            _key: PhantomData,
        }
    }
}

impl<K, F: Clone> Clone for KeyFn<K, F> {
    fn clone(&self) -> Self {
        KeyFn {
            read: self.read.clone(),
            _key: PhantomData,
        }
    }
}

impl<K, F> fmt::Debug for KeyFn<K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyFn")
    }
}

impl<V, K, F> KeyOf<V> for KeyFn<K, F>
where
    F: for<'a> Fn(&'a V) -> &'a K,
{
    type Key = K;

    #[inline]
    fn key_of<'a>(&self, value: &'a V) -> &'a K {
        (self.read)(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparators() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(Comparator::<str>::compare(&NaturalOrder, "b", "a"), Ordering::Greater);
        assert_eq!(Reversed(NaturalOrder).compare(&1, &2), Ordering::Greater);

        let by_len = |a: &String, b: &String| a.len().cmp(&b.len());
        assert_eq!(by_len.compare(&"aa".to_string(), &"b".to_string()), Ordering::Greater);
    }

    #[test]
    fn std_hash_is_stable() {
        let a: StdHash = StdHash::default();
        let b: StdHash = StdHash::default();
        assert_eq!(Equivalence::<str>::hash(&a, "key"), Equivalence::<str>::hash(&b, "key"));
        assert!(Equivalence::<i32>::equals(&a, &3, &3));
        assert!(!Equivalence::<i32>::equals(&a, &3, &4));
    }

    #[test]
    fn key_fn() {
        let first = KeyFn::new(|pair: &(u32, String)| &pair.0);
        assert_eq!(*first.key_of(&(7, "seven".to_string())), 7);
    }
}
