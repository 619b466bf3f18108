//! A hash map using separate chaining.
//!
//! Each bucket holds a chain of entries whose keys hash to it. Once the
//! average chain length reaches [`LOAD_THRESHOLD`], the number of buckets
//! doubles and every entry is rehashed into the new bucket array.

use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt::Debug,
    hash::{BuildHasher, Hash, Hasher},
    mem,
};

use log::debug;

pub const INITIAL_CAPACITY: usize = 10;
pub const LOAD_THRESHOLD: usize = 10;

#[derive(Clone)]
pub struct HashTable<K, V, S = RandomState> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    hasher: S,
}

impl<K: Hash + Eq, V> HashTable<K, V> {
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> Default for HashTable<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashTable<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            buckets: empty_buckets(INITIAL_CAPACITY),
            len: 0,
            hasher,
        }
    }

    /// Associates `value` with `key`, returning the value it replaces.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];

        if let Some((_, existing)) = bucket.iter_mut().find(|(k, _)| *k == key) {
            return Some(mem::replace(existing, value));
        }

        bucket.push((key, value));
        self.len += 1;
        if self.len >= LOAD_THRESHOLD * self.capacity() {
            self.rehash(self.capacity() * 2);
        }
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes `key`, returning the value it was associated with.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|(k, _)| k.borrow() == key)?;
        let (_, value) = bucket.swap_remove(position);
        self.len -= 1;
        Some(value)
    }

    fn bucket_index<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        let mut hasher = self.hasher.build_hasher();
        key.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }

    fn rehash(&mut self, capacity: usize) {
        debug!(
            "rehashing {} entries from {} to {} buckets",
            self.len,
            self.buckets.len(),
            capacity
        );

        let old = mem::replace(&mut self.buckets, empty_buckets(capacity));
        for (key, value) in old.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.buckets[index].push((key, value));
        }
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Scans every entry; this is linear in the size of the table.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Removes every entry but keeps the current number of buckets.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Iterates bucket by bucket, in no particular key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets.iter().flatten().map(|(k, v)| (k, v))
    }

    /// Length of the longest chain.
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl<K: Debug, V: Debug, S> Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for HashTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for HashTable<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Vec<(K, V)>> {
    (0..capacity).map(|_| Vec::new()).collect()
}
