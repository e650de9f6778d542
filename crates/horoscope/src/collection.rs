//! Ordered entity list with keyed lookup over the same storage.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// An entity addressable by a key.
pub trait Keyed {
    type Key: Copy + Eq + Hash + Debug;

    fn key(&self) -> Self::Key;
}

/// One owned `Vec` of entities plus a key → index map into it.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySet<T: Keyed> {
    items: Vec<T>,
    index: HashMap<T::Key, usize>,
}

impl<T: Keyed> EntitySet<T> {
    /// Build from entities in order. Returns the first repeated key on conflict.
    pub fn try_from_vec(items: Vec<T>) -> Result<Self, T::Key> {
        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.key(), i).is_some() {
                return Err(item.key());
            }
        }
        Ok(Self { items, index })
    }

    /// All entities in insertion order.
    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, key: T::Key) -> Option<&T> {
        self.index.get(&key).map(|&i| &self.items[i])
    }

    pub fn contains(&self, key: T::Key) -> bool {
        self.index.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Keyed> Default for EntitySet<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<'a, T: Keyed> IntoIterator for &'a EntitySet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Keyed + Serialize> Serialize for EntitySet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}
