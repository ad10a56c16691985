//! Insertion-ordered map
//!
//! `OrderedMap` keeps unique keys in the order they were first inserted and
//! converts to and from a "plain object": a map keyed by the string form of
//! each key. On the wire the plain object is a JSON object whose member order
//! matches insertion order.

use indexmap::{Equivalent, IndexMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};
use std::hash::Hash;

/// Unique-key map that iterates in insertion order
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    inner: IndexMap<K, V>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Hash + Eq,
{
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    /// Create a map from an optional sequence of pairs
    ///
    /// `None` and an empty sequence both produce an empty map. A key that
    /// appears twice keeps its first position and its last value.
    pub fn from_entries<I>(entries: Option<I>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        entries.map(|e| e.into_iter().collect()).unwrap_or_default()
    }

    /// Insert a value, returning the previous one for that key
    ///
    /// Re-inserting an existing key updates the value in place.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.inner.get(key)
    }

    /// Remove a key, keeping the relative order of the remaining entries
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.inner.shift_remove(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.inner.contains_key(key)
    }

    /// Convert to a plain object keyed by each key's string form
    ///
    /// Keys whose string forms collide overwrite one another; the last one
    /// iterated wins.
    pub fn to_plain_object(&self) -> OrderedMap<String, V>
    where
        K: Display,
        V: Clone,
    {
        self.inner
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Build a map from a plain object, inserting in the object's order
    pub fn from_plain_object(object: OrderedMap<String, V>) -> Self
    where
        K: From<String>,
    {
        object
            .into_iter()
            .map(|(k, v)| (K::from(k), v))
            .collect()
    }
}

impl<K, V> OrderedMap<K, V> {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.inner.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, K, V> {
        self.inner.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, K, V> {
        self.inner.values()
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            inner: IndexMap::default(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

/// Equality compares the set of pairs; order is not considered.
impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K: Hash + Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<K: Display, V: Serialize> Serialize for OrderedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Same collision rule as `to_plain_object`, without cloning values.
        let plain: IndexMap<String, &V> = self
            .inner
            .iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        plain.serialize(serializer)
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::deserialize(deserializer).map(|inner| Self { inner })
    }
}
