//! Ordered keyed container
//!
//! A `Table` is a single structure for list-like and map-like data. Keys are
//! either integer indexes or string names, entries keep insertion order, and
//! string keys that spell a canonical decimal integer are stored as indexes,
//! so `"0"` and `0` address the same entry.

use std::fmt;

use indexmap::IndexMap;

use super::Value;

/// Key of a table entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Integer index
    Index(i64),
    /// String name
    Name(String),
}

impl Key {
    /// Returns the index if this is an integer key.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }
}

/// Parses `s` as an index only when it is written the canonical way:
/// no sign on zero, no leading zeros, no `+`, no whitespace.
fn canonical_index(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut chars = digits.chars();
    match chars.next() {
        Some('0') if digits.len() == 1 && digits.len() == s.len() => return Some(0),
        Some('1'..='9') => {}
        _ => return None,
    }
    if !chars.all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Index(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Index(i.into())
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        match i64::try_from(i) {
            Ok(i) => Key::Index(i),
            Err(_) => Key::Name(i.to_string()),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match canonical_index(s) {
            Some(i) => Key::Index(i),
            None => Key::Name(s.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match canonical_index(&s) {
            Some(i) => Key::Index(i),
            None => Key::Name(s),
        }
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::from(s.as_str())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(s) => write!(f, "{}", s),
        }
    }
}

/// Ordered mapping of [`Key`] to [`Value`].
#[derive(Debug, Clone, Default)]
pub struct Table {
    entries: IndexMap<Key, Value>,
    /// Index used by the next `push`
    next_index: i64,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list-like table with indexes `0..n`.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut table = Self::new();
        for item in items {
            table.push(item);
        }
        table
    }

    /// Inserts or replaces an entry, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        if let Key::Index(i) = key {
            if i >= self.next_index {
                self.next_index = i.saturating_add(1);
            }
        }
        self.entries.insert(key, value.into())
    }

    /// Appends at the next free integer index and returns the key used.
    pub fn push(&mut self, value: impl Into<Value>) -> Key {
        let key = Key::Index(self.next_index);
        self.insert(key.clone(), value);
        key
    }

    /// Builder form of [`Table::insert`].
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the entry only when it exists and is not null.
    pub fn get_present(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key).filter(|v| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// True when the keys are exactly `0, 1, .., n-1` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(pos, key)| key.as_index() == i64::try_from(pos).ok())
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().zip(other.entries.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Table {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}
