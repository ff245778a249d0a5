use crate::{
    DEFAULT_CAPACITY,
    bucket_store::BucketStore,
    chain_list::{ChainList, ChainNode},
    hashing::{HashFn, KeyHasher, hash_function_1},
    prime::{next_prime, prime_at_least},
};
use std::{fmt, mem};

/// A string-keyed hash table using separate chaining.
///
/// Each bucket owns a [`ChainList`]; colliding keys share a chain. The table doubles (to the next
/// prime) before an insert whenever the load factor has reached [`Self::MAX_LOAD_FACTOR`].
#[derive(Clone)]
pub struct ChainedMap<V, H = HashFn> {
    /// One chain per bucket
    buckets: BucketStore<ChainList<V>>,
    /// Current number of entries across all chains
    size: usize,
    /// Strategy mapping keys to buckets
    hasher: H,
}

impl<V> ChainedMap<V> {
    /// Creates a map with at least `capacity` buckets, hashing with [`hash_function_1`]
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let hasher: HashFn = hash_function_1;
        Self::with_hasher(capacity, hasher)
    }
}

impl<V> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V, H, K> Extend<(K, V)> for ChainedMap<V, H>
where
    H: KeyHasher,
    K: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<V, H> fmt::Debug for ChainedMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedMap")
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<V, H> ChainedMap<V, H>
where
    H: KeyHasher,
{
    /// Load factor at or above which `put` grows the table first
    pub const MAX_LOAD_FACTOR: f64 = 1.0;

    /// Creates a map with at least `capacity` buckets using the given hash strategy.
    ///
    /// The capacity is rounded up with [`next_prime`].
    pub fn with_hasher(capacity: usize, hasher: H) -> Self {
        Self { buckets: empty_table(next_prime(capacity)), size: 0, hasher }
    }

    /// Gets the bucket index for a key
    #[allow(clippy::arithmetic_side_effects)]
    fn bucket_index(&self, key: &str) -> usize {
        self.hasher.hash_key(key) % self.capacity()
    }

    /// Gets the chain a key belongs to
    fn chain(&self, key: &str) -> Option<&ChainList<V>> {
        self.buckets.get(self.bucket_index(key)).ok()
    }

    /// Inserts a key-value pair, replacing any entry with the same key.
    ///
    /// The new entry goes to the front of its chain.
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        if self.table_load() >= Self::MAX_LOAD_FACTOR {
            self.resize_table(self.capacity().saturating_mul(2));
        }

        let key = key.into();
        let index = self.bucket_index(&key);
        let Ok(chain) = self.buckets.get_mut(index) else {
            return;
        };

        if chain.remove(&key) {
            self.size = self.size.saturating_sub(1);
        }
        chain.insert(key, value);
        self.size = self.size.saturating_add(1);
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?.contains(key).map(ChainNode::value)
    }

    /// Returns true if the map holds an entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.chain(key).is_some_and(|chain| chain.contains(key).is_some())
    }

    /// Removes a key from its chain.
    ///
    /// Returns false, leaving the size untouched, if the key is absent.
    pub fn remove(&mut self, key: &str) -> bool {
        let index = self.bucket_index(key);
        let removed = self.buckets.get_mut(index).is_ok_and(|chain| chain.remove(key));
        if removed {
            self.size = self.size.saturating_sub(1);
        }
        removed
    }

    /// Rebuilds the table with at least `new_capacity` buckets.
    ///
    /// A zero target is ignored. Otherwise the capacity is rounded up to a prime and every entry
    /// is put again, bucket by bucket.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            log::debug!("ignoring resize to {new_capacity} buckets");
            return;
        }

        let new_capacity = prime_at_least(new_capacity);
        log::debug!(
            "resizing chained table from {} to {new_capacity} buckets ({} entries)",
            self.capacity(),
            self.size
        );

        let old = mem::replace(&mut self.buckets, empty_table(new_capacity));
        self.size = 0;

        for (key, value) in old.into_iter().flatten() {
            self.put(key, value);
        }
    }

    /// Returns the current load factor, which may exceed 1
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Returns the number of buckets with an empty chain
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Returns every key-value pair, bucket by bucket, front to back within each chain
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.buckets
            .iter()
            .flatten()
            .map(|node| (node.key().to_owned(), node.value().clone()))
            .collect()
    }

    /// Clears the hash map, keeping its capacity
    pub fn clear(&mut self) {
        log::trace!("clearing chained table of {} buckets", self.capacity());
        self.buckets = empty_table(self.capacity());
        self.size = 0;
    }
}

impl<V, H> ChainedMap<V, H> {
    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }
}

/// Creates a table of `capacity` empty chains
fn empty_table<V>(capacity: usize) -> BucketStore<ChainList<V>> {
    BucketStore::repeat_with(capacity, ChainList::new)
}
