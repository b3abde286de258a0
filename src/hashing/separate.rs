//! # Separate Chaining Hash Map
//!
//! A **ChainedMap** stores `(K, V)` pairs in an array of buckets, each bucket a `Vec` of the
//! entries whose keys hash to that index. It supports:
//! - **Generic** key-value pairs (`K: Hash + Eq, V`), looked up through any borrowed form of `K`.
//! - **Insert-or-update**, **lookup**, **delete** with expected **O(1)** average cost.
//! - **Growth by doubling** once `len / bucket_count` exceeds the load threshold (0.75 by default).
//!   The table never shrinks, not even when every entry is deleted.
//! - **Configurable** bucket count, threshold and hasher through [`ChainedMapBuilder`].
//! - A read-only bucket dump ([`ChainedMap::observe`]) for inspection and display.
//!
//! Not thread safe. Wrap the whole table in a lock if it must be shared; a resize touches every
//! bucket and needs exclusive access.
//!
//! ```rust
//! use chainmap::ChainedMap;
//!
//! let mut ages = ChainedMap::new();
//! ages.insert("John", 45);
//! ages.insert("John", 50);
//! assert_eq!(ages.lookup("John"), Some(&50));
//! assert_eq!(ages.len(), 1);
//! assert!(ages.delete("John"));
//! assert!(!ages.delete("John"));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

use log::{debug, trace, warn};

use super::fnv::FnvBuildHasher;
use crate::error::{Error, Result};

/// Bucket count used by [`ChainedMap::new`].
pub const DEFAULT_BUCKET_COUNT: usize = 15;

/// Load factor above which an insert doubles the bucket count.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Colliding entries, in insertion order.
type Bucket<K, V> = Vec<Entry<K, V>>;

/// A separate-chaining hash map that doubles its bucket array when it gets too full.
#[derive(Debug, Clone)]
pub struct ChainedMap<K, V, S = FnvBuildHasher> {
    buckets: Vec<Bucket<K, V>>,
    /// Number of stored entries across all buckets.
    len: usize,
    /// Always equal to `buckets.len()` and never zero.
    bucket_count: usize,
    max_load_factor: f64,
    build_hasher: S,
}

/// Configures and validates a [`ChainedMap`] before it is created.
///
/// ```rust
/// use chainmap::ChainedMapBuilder;
///
/// let map = ChainedMapBuilder::new()
///     .bucket_count(64)
///     .max_load_factor(0.5)
///     .seed(42)
///     .build::<String, u32>()
///     .unwrap();
/// assert_eq!(map.bucket_count(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct ChainedMapBuilder<S = FnvBuildHasher> {
    bucket_count: usize,
    max_load_factor: f64,
    hasher: S,
}

impl Default for ChainedMapBuilder<FnvBuildHasher> {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hasher: FnvBuildHasher::new(),
        }
    }
}

impl ChainedMapBuilder<FnvBuildHasher> {
    /// Creates a builder with 15 buckets, a 0.75 threshold and unseeded FNV-1a.
    pub fn new() -> Self {
        Default::default()
    }

    /// Seeds the default FNV-1a hasher. Two maps built with the same seed place keys identically.
    pub fn seed(mut self, seed: u64) -> Self {
        self.hasher = FnvBuildHasher::with_seed(seed);
        self
    }
}

impl<S: BuildHasher> ChainedMapBuilder<S> {
    /// Sets the initial number of buckets. Must be at least 1; checked by [`build`](Self::build).
    pub fn bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    /// Sets the growth threshold. Must be positive and finite; checked by [`build`](Self::build).
    pub fn max_load_factor(mut self, lf: f64) -> Self {
        self.max_load_factor = lf;
        self
    }

    /// Replaces the hasher builder. It is created once and kept for the table's lifetime.
    pub fn hasher<T: BuildHasher>(self, hasher: T) -> ChainedMapBuilder<T> {
        ChainedMapBuilder {
            bucket_count: self.bucket_count,
            max_load_factor: self.max_load_factor,
            hasher,
        }
    }

    /// Validates the configuration and builds an empty map.
    ///
    /// # Errors
    /// * [`Error::InvalidBucketCount`] if the bucket count is zero.
    /// * [`Error::InvalidLoadFactor`] if the threshold is not a positive finite number.
    pub fn build<K: Hash + Eq, V>(self) -> Result<ChainedMap<K, V, S>> {
        if self.bucket_count < 1 {
            return Err(Error::InvalidBucketCount(self.bucket_count));
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(Error::InvalidLoadFactor(self.max_load_factor));
        }
        Ok(ChainedMap::from_parts(
            self.bucket_count,
            self.max_load_factor,
            self.hasher,
        ))
    }
}

impl<K: Hash + Eq, V> ChainedMap<K, V> {
    /// Creates an empty map with 15 buckets and the default hasher.
    pub fn new() -> Self {
        Self::from_parts(
            DEFAULT_BUCKET_COUNT,
            DEFAULT_MAX_LOAD_FACTOR,
            FnvBuildHasher::new(),
        )
    }

    /// Creates an empty map with `bucket_count` buckets.
    ///
    /// # Errors
    /// [`Error::InvalidBucketCount`] if `bucket_count` is zero.
    pub fn with_bucket_count(bucket_count: usize) -> Result<Self> {
        ChainedMapBuilder::new().bucket_count(bucket_count).build()
    }
}

impl<K: Hash + Eq, V> Default for ChainedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainedMap<K, V, S> {
    /// Callers must have validated `bucket_count >= 1`.
    fn from_parts(bucket_count: usize, max_load_factor: f64, build_hasher: S) -> Self {
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Vec::new);
        trace!(
            "created chained map with {} buckets, max load factor {}",
            bucket_count,
            max_load_factor
        );

        ChainedMap {
            buckets,
            len: 0,
            bucket_count,
            max_load_factor,
            build_hasher,
        }
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets. Only ever grows.
    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Returns the growth threshold.
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Returns `len / bucket_count`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.bucket_count as f64
    }

    /// Returns the hasher builder this map was created with.
    pub fn hasher(&self) -> &S {
        &self.build_hasher
    }

    /// Removes every entry. The bucket count is left as is.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Iterates over all key-value pairs. The order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|entry| (&entry.key, &entry.value)))
    }

    /// Returns a read-only view of every bucket, in index order, empty buckets included.
    pub fn observe(&self) -> impl Iterator<Item = BucketView<'_, K, V>> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .map(|(index, entries)| BucketView { index, entries })
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ChainedMap<K, V, S> {
    /// Returns the bucket `key` belongs in under the current bucket count.
    /// The result changes whenever the table grows.
    pub fn compute_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        let mut hasher = self.build_hasher.build_hasher();
        key.hash(&mut hasher);
        (hasher.finish() % self.bucket_count as u64) as usize
    }

    /// Inserts `value` under `key`.
    ///
    /// An existing entry is updated in place and its previous value returned; the entry count
    /// does not change and no growth check runs. A new entry is appended to its bucket, after
    /// which the table doubles if the load factor exceeds the threshold.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.compute_index(&key);
        let bucket = &mut self.buckets[index];

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }

        bucket.push(Entry { key, value });
        self.len += 1;

        if self.load_factor() > self.max_load_factor {
            self.grow();
        }
        None
    }

    /// Returns a reference to the value stored under `key`, if any.
    pub fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.compute_index(key);
        self.buckets[index]
            .iter()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value stored under `key`, if any.
    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.compute_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    /// Returns true if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup(key).is_some()
    }

    /// Removes `key` and returns its value. The remaining entries of the bucket keep their order.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.compute_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|entry| entry.key.borrow() == key)?;
        let entry = bucket.remove(position);
        self.len -= 1;
        Some(entry.value)
    }

    /// Removes `key`, returning whether it was present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Doubles the bucket count and rehashes every entry into a fresh bucket array.
    ///
    /// Entries are placed through `append_unchecked`, which skips the key comparison and the
    /// load check: keys are already unique and growth cannot nest.
    fn grow(&mut self) {
        let old_count = self.bucket_count;
        let Some(new_count) = old_count.checked_mul(2) else {
            warn!(
                "chained map cannot grow past {} buckets; load factor is now {:.3}",
                old_count,
                self.load_factor()
            );
            return;
        };

        let mut new_buckets = Vec::with_capacity(new_count);
        new_buckets.resize_with(new_count, Vec::new);
        let old_buckets = std::mem::replace(&mut self.buckets, new_buckets);
        let old_len = self.len;

        self.bucket_count = new_count;
        self.len = 0;
        for entry in old_buckets.into_iter().flatten() {
            self.append_unchecked(entry);
        }
        debug_assert_eq!(self.len, old_len);

        debug!(
            "grew chained map from {} to {} buckets, rehashed {} entries",
            old_count, new_count, old_len
        );
    }

    fn append_unchecked(&mut self, entry: Entry<K, V>) {
        let index = self.compute_index(&entry.key);
        self.buckets[index].push(entry);
        self.len += 1;
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for ChainedMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for ChainedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ChainedMap::new();
        map.extend(iter);
        map
    }
}

/// Prints one line per bucket, like `Bucket 3: [("John", 50)]`.
impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Display for ChainedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for view in self.observe() {
            writeln!(f, "{}", view)?;
        }
        Ok(())
    }
}

/// A borrowed snapshot of one bucket, produced by [`ChainedMap::observe`].
#[derive(Debug)]
pub struct BucketView<'a, K, V> {
    index: usize,
    entries: &'a [Entry<K, V>],
}

impl<'a, K, V> BucketView<'a, K, V> {
    /// Position of this bucket in the bucket array.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of entries chained in this bucket.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in chain order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a K, &'a V)> {
        self.entries.iter().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Display for BucketView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bucket {}: [", self.index)?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({:?}, {:?})", key, value)?;
        }
        write!(f, "]")
    }
}
