//! In-place access to a single key of a [`CompactMap`].

use crate::ordered::CompactMap;
use crate::slots::Slots;

pub enum Entry<'a, K: 'a, V: 'a, C: 'a> {
    Vacant(VacantEntry<'a, K, V, C>),
    Occupied(OccupiedEntry<'a, K, V, C>),
}

/// A key that is not stored yet, with its insertion point.
pub struct VacantEntry<'a, K: 'a, V: 'a, C: 'a> {
    map: &'a mut CompactMap<K, V, C>,
    key: K,
    index: usize,
}

/// A stored key and its position.
pub struct OccupiedEntry<'a, K: 'a, V: 'a, C: 'a> {
    map: &'a mut CompactMap<K, V, C>,
    index: usize,
}

impl<'a, K, V, C> VacantEntry<'a, K, V, C> {
    pub(crate) fn new(map: &'a mut CompactMap<K, V, C>, key: K, index: usize) -> Self {
        VacantEntry { map, key, index }
    }

    pub fn insert(self, value: V) -> &'a mut V {
        let VacantEntry { map, key, index } = self;
        map.slots.insert(index, (key, value));
        map.slots.value_mut(index)
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn into_key(self) -> K {
        self.key
    }
}

impl<'a, K, V, C> OccupiedEntry<'a, K, V, C> {
    pub(crate) fn new(map: &'a mut CompactMap<K, V, C>, index: usize) -> Self {
        OccupiedEntry { map, index }
    }

    pub fn get(&self) -> &V {
        self.map.slots.value(self.index)
    }

    pub fn get_mut(&mut self) -> &mut V {
        self.map.slots.value_mut(self.index)
    }

    pub fn into_mut(self) -> &'a mut V {
        self.map.slots.value_mut(self.index)
    }

    pub fn key(&self) -> &K {
        self.map.slots.key(self.index)
    }

    /// Sorted position of the entry.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    pub fn remove_entry(self) -> (K, V) {
        let OccupiedEntry { map, index } = self;
        let len = map.slots.len();
        match map.slots.take(index) {
            Some(entry) => entry,
            None => unreachable!("entry position {index} outside map of length {len}"),
        }
    }

    /// Replaces the value, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        self.map.slots.replace_value(self.index, value)
    }
}

impl<'a, K, V, C> Entry<'a, K, V, C> {
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default(&entry.key);
                entry.insert(value)
            }
        }
    }

    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }

    pub fn and_modify<F: FnOnce(&mut V)>(self, modify: F) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                modify(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::CompactMap;

    #[test]
    fn counts_words() {
        let mut counts: CompactMap<&str, u32> = CompactMap::new();
        for word in "b a b c b a".split(' ') {
            *counts.entry(word).or_insert(0) += 1;
        }
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![(&"a", &2), (&"b", &3), (&"c", &1)]);
    }

    #[test]
    fn modify_insert_remove() {
        let mut map: CompactMap<u8, String> = CompactMap::new();
        map.entry(1).or_insert_with(|| "one".to_string());
        map.entry(1).and_modify(|value| value.push('!')).or_default();
        map.entry(2).and_modify(|value| value.push('?')).or_default();
        assert_eq!(map.get(&1).map(String::as_str), Some("one!"));
        assert_eq!(map.get(&2).map(String::as_str), Some(""));

        if let crate::Entry::Occupied(mut entry) = map.entry(2) {
            assert_eq!(entry.key(), &2);
            assert_eq!(entry.insert("two".to_string()), "");
            assert_eq!(entry.index(), 1);
            assert_eq!(entry.remove(), "two");
        }
        assert_eq!(map.len(), 1);
        assert_eq!(map.first_entry().map(|entry| entry.remove_entry()), Some((1, "one!".to_string())));
        assert!(map.is_empty());
        assert_eq!(map.entry(9).or_insert_with_key(|key| key.to_string()), "9");
    }
}
