//! Map Operations Module
//!
//! Provides the map value carried by `Term::Map`.
//!
//! Maps keep their pairs in insertion order so that a decoded map re-encodes
//! with the same pair order it arrived with. Keys are unique: building a map
//! from a pair list keeps the first position of a repeated key and the value of
//! its last occurrence, which is how the runtime treats duplicate keys in an
//! external map.
//!
//! Equality and hashing ignore pair order, as map equality in Erlang does.

/*
 * %CopyrightBegin%
 *
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright Lee Barney 2025. All Rights Reserved.
 *
 * This file is derived from work copyrighted by Ericsson AB 1996-2025.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * %CopyrightEnd%
 */

use crate::term::Term;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Map data structure
#[derive(Clone, Debug, Default)]
pub struct Map {
    /// Key-value pairs in insertion order, keys unique
    pairs: Vec<(Term, Term)>,
}

impl Map {
    /// Create a new empty map
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Number of key-value pairs
    pub fn size(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn is_key(&self, key: &Term) -> bool {
        self.find_index(key).is_some()
    }

    /// Get a value by key
    pub fn get(&self, key: &Term) -> Option<&Term> {
        self.find_index(key).map(|idx| &self.pairs[idx].1)
    }

    /// Find a key-value pair
    pub fn find(&self, key: &Term) -> Option<(&Term, &Term)> {
        self.find_index(key).map(|idx| {
            let (k, v) = &self.pairs[idx];
            (k, v)
        })
    }

    /// Put a key-value pair into the map
    ///
    /// An existing key keeps its position and gets the new value; the previous
    /// value is returned.
    pub fn put(&mut self, key: Term, value: Term) -> Option<Term> {
        match self.find_index(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.pairs[idx].1, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &Term) -> Option<Term> {
        self.find_index(key).map(|idx| self.pairs.remove(idx).1)
    }

    pub fn keys(&self) -> Vec<&Term> {
        self.pairs.iter().map(|(k, _)| k).collect()
    }

    pub fn values(&self) -> Vec<&Term> {
        self.pairs.iter().map(|(_, v)| v).collect()
    }

    /// Pairs in map order
    pub fn iter(&self) -> impl Iterator<Item = (&Term, &Term)> + '_ {
        self.pairs.iter().map(|(k, v)| (k, v))
    }

    /// Convert the map to a list of (key, value) pairs
    pub fn to_list(&self) -> Vec<(Term, Term)> {
        self.pairs.clone()
    }

    /// Consume the map, returning its pairs
    pub fn into_list(self) -> Vec<(Term, Term)> {
        self.pairs
    }

    /// Create a map from a list of (key, value) pairs
    ///
    /// A repeated key stays at the position of its first occurrence and takes
    /// the value of its last one.
    pub fn from_list(pairs: Vec<(Term, Term)>) -> Self {
        let mut slot_of: HashMap<Term, usize> = HashMap::with_capacity(pairs.len());
        let mut unique: Vec<(Term, Term)> = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            match slot_of.get(&key) {
                Some(&slot) => unique[slot].1 = value,
                None => {
                    slot_of.insert(key.clone(), unique.len());
                    unique.push((key, value));
                }
            }
        }
        Self { pairs: unique }
    }

    fn find_index(&self, key: &Term) -> Option<usize> {
        self.pairs.iter().position(|(k, _)| k == key)
    }
}

/// Maps up to this size compare by linear lookup
const LINEAR_EQ_LIMIT: usize = 16;

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        if self.size() != other.size() {
            return false;
        }
        if self.pairs == other.pairs {
            return true;
        }
        if self.size() <= LINEAR_EQ_LIMIT {
            return self
                .pairs
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v));
        }
        let index: HashMap<&Term, &Term> = other.pairs.iter().map(|(k, v)| (k, v)).collect();
        self.pairs
            .iter()
            .all(|(k, v)| index.get(k).is_some_and(|ov| *ov == v))
    }
}

impl Eq for Map {}

impl Hash for Map {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let combined = self.pairs.iter().fold(0u64, |acc, pair| {
            let mut hasher = DefaultHasher::new();
            pair.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        self.size().hash(state);
        combined.hash(state);
    }
}

impl FromIterator<(Term, Term)> for Map {
    fn from_iter<I: IntoIterator<Item = (Term, Term)>>(iter: I) -> Self {
        Self::from_list(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Term {
        Term::integer(v)
    }

    fn atom(name: &str) -> Term {
        Term::atom(name).unwrap()
    }

    #[test]
    fn test_map_creation() {
        let map = Map::new();
        assert!(map.is_empty());
        assert_eq!(map.size(), 0);
        assert_eq!(Map::default(), map);
    }

    #[test]
    fn test_map_put_and_get() {
        let mut map = Map::new();
        assert_eq!(map.put(int(42), int(100)), None);
        assert_eq!(map.size(), 1);
        assert!(map.is_key(&int(42)));
        assert_eq!(map.get(&int(42)), Some(&int(100)));

        assert_eq!(map.put(int(42), int(200)), Some(int(100)));
        assert_eq!(map.get(&int(42)), Some(&int(200)));
        assert_eq!(map.size(), 1);
    }

    #[test]
    fn test_map_remove_and_find() {
        let mut map = Map::new();
        map.put(atom("a"), int(1));
        assert_eq!(map.find(&atom("a")), Some((&atom("a"), &int(1))));
        assert_eq!(map.remove(&atom("a")), Some(int(1)));
        assert_eq!(map.remove(&atom("a")), None);
        assert_eq!(map.find(&atom("a")), None);
    }

    #[test]
    fn test_map_from_list_duplicates() {
        let map = Map::from_list(vec![
            (atom("a"), int(1)),
            (atom("b"), int(2)),
            (atom("a"), int(3)),
            (atom("c"), int(4)),
            (atom("b"), int(5)),
        ]);
        assert_eq!(
            map.to_list(),
            vec![
                (atom("a"), int(3)),
                (atom("b"), int(5)),
                (atom("c"), int(4)),
            ]
        );
    }

    #[test]
    fn test_map_keys_values_iter() {
        let map: Map = vec![(int(1), int(10)), (int(2), int(20))].into_iter().collect();
        assert_eq!(map.keys(), vec![&int(1), &int(2)]);
        assert_eq!(map.values(), vec![&int(10), &int(20)]);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(&int(1), &int(10)), (&int(2), &int(20))]);
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let a = Map::from_list(vec![(int(1), int(10)), (int(2), int(20))]);
        let b = Map::from_list(vec![(int(2), int(20)), (int(1), int(10))]);
        assert_eq!(a, b);

        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());

        let c = Map::from_list(vec![(int(1), int(10)), (int(2), int(21))]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_large_map_equality_ignores_order() {
        let forward: Vec<(Term, Term)> = (0..1000).map(|i| (int(i), int(i * 2))).collect();
        let backward: Vec<(Term, Term)> = forward.iter().rev().cloned().collect();
        let a = Map::from_list(forward.clone());
        let b = Map::from_list(backward);
        assert_eq!(a, b);

        let mut changed = forward;
        changed[500].1 = int(-1);
        assert_ne!(a, Map::from_list(changed));

        let mut other_key = a.clone();
        other_key.remove(&int(999));
        other_key.put(int(1000), int(1998));
        assert_ne!(a, other_key);
    }

    #[test]
    fn test_map_tuple_keys() {
        let mut map = Map::new();
        let key = Term::tuple(vec![int(1), int(2)]).unwrap();
        map.put(key.clone(), int(100));
        assert_eq!(map.get(&key), Some(&int(100)));
    }
}
