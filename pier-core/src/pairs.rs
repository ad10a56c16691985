//! `key=value` list codec
//!
//! Environment variables, build arguments and CLI parameters travel as flat
//! lists of `key=value` strings. These helpers convert between that form and
//! an [`OrderedMap`].

use std::fmt::Display;
use std::hash::Hash;

use crate::ordered_map::OrderedMap;

/// Render each entry as `key=value`, in iteration order
///
/// A missing or empty map yields an empty list.
pub fn to_pairs<K, V>(map: Option<&OrderedMap<K, V>>) -> Vec<String>
where
    K: Display + Hash + Eq,
    V: Display,
{
    map.map(|m| m.iter().map(|(k, v)| format!("{}={}", k, v)).collect())
        .unwrap_or_default()
}

/// Parse a list of `key=value` strings
///
/// Each entry is split on its first `=`. An entry without `=` is kept with
/// an empty value instead of failing the whole list, so callers may see
/// partial results. A missing or empty list yields an empty map.
pub fn from_pairs<S: AsRef<str>>(pairs: Option<&[S]>) -> OrderedMap<String, String> {
    pairs
        .unwrap_or_default()
        .iter()
        .map(|entry| {
            let entry = entry.as_ref();
            match split_pair(entry) {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (entry.to_string(), String::new()),
            }
        })
        .collect()
}

/// Strictly split one `key=value` entry on its first `=`
pub fn split_pair(entry: &str) -> Option<(&str, &str)> {
    entry.split_once('=')
}
