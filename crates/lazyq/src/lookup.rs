//! Keyed lookups built from a sequence.
//!
//! A [`Dictionary`] is the eager end of a pipeline: building it consumes the
//! sequence once. Missing keys and duplicate keys are errors, never silent
//! defaults or overwrites.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{QueryError, Result};

/// Map from keys to values that remembers insertion order.
///
/// Built by [`Sequence::to_dictionary`](crate::Sequence::to_dictionary) and
/// [`Sequence::to_dictionary_with`](crate::Sequence::to_dictionary_with).
///
/// # Example
///
/// ```
/// use lazyq::{from_vec, Sequence, QueryError};
///
/// let scores = from_vec(vec![("Alice", 50), ("Bob", 40), ("Cathy", 45)]);
/// let by_name = scores.to_dictionary_with(|s| s.0, |s| s.1).unwrap();
///
/// assert_eq!(*by_name.get("Bob").unwrap(), 40);
/// assert!(matches!(by_name.get("Dave"), Err(QueryError::KeyNotFound { .. })));
/// ```
#[derive(Debug, Clone)]
pub struct Dictionary<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Dictionary<K, V> {
    fn default() -> Self {
        Dictionary {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K, V> Dictionary<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Dictionary::default()
    }

    /// Inserts a new entry.
    ///
    /// Fails with [`QueryError::DuplicateKey`] if `key` is already present;
    /// the existing entry is kept.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if self.index.contains_key(&key) {
            tracing::debug!(key = ?key, "duplicate dictionary key");
            return Err(QueryError::DuplicateKey {
                key: format!("{key:?}"),
            });
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        Ok(())
    }

    /// Returns the value for `key`.
    ///
    /// Fails with [`QueryError::KeyNotFound`] if there is no such key.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.try_get(key).ok_or_else(|| QueryError::KeyNotFound {
            key: format!("{key:?}"),
        })
    }

    /// Returns the value for `key`, or `None` if there is no such key.
    pub fn try_get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }
}

impl<K, V> Dictionary<K, V> {
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Sequence;
    use crate::source::from_vec;

    #[derive(Debug, Clone, PartialEq)]
    struct ScoreRecord {
        name: String,
        score: u32,
        gender: u8,
    }

    fn score_records() -> Vec<ScoreRecord> {
        vec![
            ScoreRecord {
                name: "Alice".into(),
                score: 50,
                gender: 1,
            },
            ScoreRecord {
                name: "Bob".into(),
                score: 40,
                gender: 2,
            },
            ScoreRecord {
                name: "Cathy".into(),
                score: 45,
                gender: 1,
            },
        ]
    }

    #[test]
    fn name_to_score() {
        let dict = from_vec(score_records())
            .to_dictionary_with(|r| r.name.clone(), |r| r.score)
            .unwrap();

        assert_eq!(*dict.get("Bob").unwrap(), 40);
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn name_to_record() {
        let dict = from_vec(score_records())
            .to_dictionary(|r| r.name.clone())
            .unwrap();

        let bob = dict.get("Bob").unwrap();
        assert_eq!(bob.score, 40);
        assert_eq!(bob.gender, 2);
    }

    #[test]
    fn missing_key_is_an_error() {
        let dict = from_vec(score_records())
            .to_dictionary(|r| r.name.clone())
            .unwrap();

        let err = dict.get("Dave").unwrap_err();
        assert!(matches!(err, QueryError::KeyNotFound { ref key } if key == "\"Dave\""));
        assert!(dict.try_get("Dave").is_none());
        assert!(!dict.contains_key("Dave"));
    }

    #[test]
    fn duplicate_key_is_an_error() {
        let err = from_vec(score_records())
            .to_dictionary(|r| r.gender)
            .unwrap_err();

        assert!(matches!(err, QueryError::DuplicateKey { ref key } if key == "1"));
    }

    #[test]
    fn keeps_insertion_order() {
        let dict = from_vec(score_records())
            .to_dictionary_with(|r| r.name.clone(), |r| r.score)
            .unwrap();

        let keys: Vec<&String> = dict.keys().collect();
        assert_eq!(keys, ["Alice", "Bob", "Cathy"]);
        let scores: Vec<u32> = dict.iter().map(|(_, v)| *v).collect();
        assert_eq!(scores, vec![50, 40, 45]);
    }
}
