use crate::{
    DEFAULT_CAPACITY,
    bucket_store::BucketStore,
    hashing::{HashFn, KeyHasher, hash_function_1},
    prime::{next_prime, prime_at_least},
};
use std::{fmt, mem};

/// A key-value pair stored in an open-addressing slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
    /// Flag indicating whether this entry has been deleted (tombstone)
    tombstone: bool,
}

impl<V> Entry<V> {
    /// Creates a live entry
    fn new(key: String, value: V) -> Self {
        Self { key, value, tombstone: false }
    }

    /// Returns the entry's key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the entry's value
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns true if the entry has been logically deleted
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        self.tombstone
    }
}

/// A slot is either empty (`None`) or holds an entry, live or tombstoned
type Slot<V> = Option<Entry<V>>;

/// Where a probe sequence ended
enum Probe {
    /// A live entry with the key sits at this index
    Live(usize),
    /// The key is absent and a new entry belongs at this index
    Vacant(usize),
    /// Every probed slot was live with a different key
    Exhausted,
}

/// A string-keyed hash table using quadratic probing.
///
/// Slots are probed at `h, h + 1, h + 4, h + 9, ...` modulo a prime capacity. Removal leaves a
/// tombstone in place so later keys on the same probe path stay reachable; tombstones are reused
/// by insertion and dropped when the table is rebuilt. The table doubles (to the next prime)
/// before an insert whenever the load factor has reached [`Self::MAX_LOAD_FACTOR`].
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct OpenAddressingMap<V, H = HashFn> {
    /// The slots storing the entries
    buckets: BucketStore<Slot<V>>,
    /// Current number of live entries
    size: usize,
    /// Strategy mapping keys to home slots
    hasher: H,
}

impl<V> OpenAddressingMap<V> {
    /// Creates a map with at least `capacity` slots, hashing with [`hash_function_1`]
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let hasher: HashFn = hash_function_1;
        Self::with_hasher(capacity, hasher)
    }
}

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V, H, K> Extend<(K, V)> for OpenAddressingMap<V, H>
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

impl<V, H> fmt::Debug for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<V, H> OpenAddressingMap<V, H>
where
    H: KeyHasher,
{
    /// Load factor at or above which `put` grows the table first
    pub const MAX_LOAD_FACTOR: f64 = 0.5;

    /// Creates a map with at least `capacity` slots using the given hash strategy.
    ///
    /// The capacity is rounded up with [`next_prime`], so it is always an odd prime.
    pub fn with_hasher(capacity: usize, hasher: H) -> Self {
        Self { buckets: empty_table(next_prime(capacity)), size: 0, hasher }
    }

    /// Gets the home slot for a key
    #[allow(clippy::arithmetic_side_effects)]
    fn home_index(&self, key: &str) -> usize {
        self.hasher.hash_key(key) % self.capacity()
    }

    /// Walks the quadratic probe sequence for `key`.
    ///
    /// Stops at a live match or at the first empty slot. The first tombstone seen is remembered
    /// but only handed out for insertion once the key is known to be absent, so a live key
    /// sitting past a tombstone is updated in place rather than stored twice. The walk is capped at
    /// `capacity` steps, which covers every slot the sequence can reach over a prime modulus.
    #[allow(clippy::arithmetic_side_effects)]
    fn probe(&self, key: &str) -> Probe {
        let capacity = self.capacity();
        let mut index = self.home_index(key);
        let mut first_tombstone = None;

        for step in 0..capacity {
            // h + i^2 is reached from h + (i-1)^2 by adding 2i - 1
            if step > 0 {
                index = (index + (2 * step - 1) % capacity) % capacity;
            }

            match self.buckets.get(index) {
                Ok(None) => return Probe::Vacant(first_tombstone.unwrap_or(index)),
                Ok(Some(entry)) if entry.tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Ok(Some(entry)) if entry.key == key => return Probe::Live(index),
                Ok(Some(_)) => {}
                Err(_) => break,
            }
        }

        first_tombstone.map_or(Probe::Exhausted, Probe::Vacant)
    }

    /// Inserts a key-value pair, replacing the value if the key is already present
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        if self.table_load() >= Self::MAX_LOAD_FACTOR {
            self.resize_table(self.capacity().saturating_mul(2));
        }

        let key = key.into();
        match self.probe(&key) {
            Probe::Live(index) => {
                if let Ok(Some(entry)) = self.buckets.get_mut(index) {
                    entry.value = value;
                }
            }
            Probe::Vacant(index) => {
                if self.buckets.set(index, Some(Entry::new(key, value))).is_ok() {
                    self.size = self.size.saturating_add(1);
                }
            }
            Probe::Exhausted => {
                log::warn!(
                    "no free slot for key {key:?} (size {}, capacity {})",
                    self.size,
                    self.capacity()
                );
            }
        }
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.probe(key) {
            Probe::Live(index) => self.buckets.get(index).ok()?.as_ref().map(Entry::value),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Returns true if the map holds a live entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self.probe(key), Probe::Live(_))
    }

    /// Removes a key by turning its entry into a tombstone.
    ///
    /// Returns false, leaving the map untouched, if the key is absent.
    pub fn remove(&mut self, key: &str) -> bool {
        let Probe::Live(index) = self.probe(key) else {
            return false;
        };
        match self.buckets.get_mut(index) {
            Ok(Some(entry)) => {
                entry.tombstone = true;
                self.size = self.size.saturating_sub(1);
                true
            }
            Ok(None) | Err(_) => false,
        }
    }

    /// Rebuilds the table with at least `new_capacity` slots.
    ///
    /// Requests below the current size are ignored. Otherwise the capacity is rounded up to a
    /// prime and every live entry is put again, dropping all tombstones. Repopulation goes
    /// through [`Self::put`], so a target at or just above the current size grows the table
    /// again while it refills.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            log::debug!(
                "ignoring resize to {new_capacity}: below current size {}",
                self.size
            );
            return;
        }

        let new_capacity = prime_at_least(new_capacity);
        log::debug!(
            "resizing open addressing table from {} to {new_capacity} slots ({} live entries)",
            self.capacity(),
            self.size
        );

        let old = mem::replace(&mut self.buckets, empty_table(new_capacity));
        self.size = 0;

        for entry in old.into_iter().flatten().filter(|entry| !entry.tombstone) {
            self.put(entry.key, entry.value);
        }
    }

    /// Returns the current load factor of the hash map
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Returns the number of slots without a live entry, tombstones included
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.capacity().saturating_sub(self.size)
    }

    /// Returns every live key-value pair in slot order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter()
            .flatten()
            .filter(|entry| !entry.tombstone)
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    /// Clears the hash map, keeping its capacity
    pub fn clear(&mut self) {
        log::trace!("clearing open addressing table of {} slots", self.capacity());
        self.buckets = empty_table(self.capacity());
        self.size = 0;
    }
}

impl<V, H> OpenAddressingMap<V, H> {
    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns an iterator over the raw slots in index order.
    ///
    /// Empty slots yield `None` and tombstoned entries are yielded as-is; check
    /// [`Entry::is_tombstone`] to keep only live entries.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: &self.buckets, index: 0 }
    }
}

/// Creates a table of `capacity` empty slots
fn empty_table<V>(capacity: usize) -> BucketStore<Slot<V>> {
    BucketStore::repeat_with(capacity, || None)
}

/// Iterator over the raw slots of an [`OpenAddressingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Reference to the slots in the hash map
    buckets: &'a BucketStore<Slot<V>>,
    /// Current position in the iteration
    index: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = Option<&'a Entry<V>>;

    fn next(&mut self) -> Option<Self::Item> {
        // The bounds error marks the end of the table
        let slot = self.buckets.get(self.index).ok()?;
        self.index = self.index.saturating_add(1);
        Some(slot.as_ref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buckets.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V, H> IntoIterator for &'a OpenAddressingMap<V, H> {
    type Item = Option<&'a Entry<V>>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hashing::hash_function_2, prime::is_prime};
    use proptest::prelude::*;

    /// Index of the slot holding `key`, live or tombstoned
    fn slot_of<V, H>(map: &OpenAddressingMap<V, H>, key: &str) -> Option<usize> {
        map.iter().position(|slot| slot.is_some_and(|entry| entry.key() == key))
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = OpenAddressingMap::new(11);
        map.put("key1", 1);
        map.put("key2", 2);
        map.put("key3", 3);

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), Some(&3));
        assert_eq!(map.get("key4"), None);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_update_does_not_grow() {
        let mut map = OpenAddressingMap::new(101);
        map.put("key1", 10);
        map.put("key2", 20);
        map.put("key1", 30);

        assert_eq!(map.get("key1"), Some(&30));
        assert_eq!(map.len(), 2);
        assert_eq!(map.empty_buckets(), 99);
        assert!((map.table_load() - 2.0 / 101.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_construction_rounds_to_prime() {
        let mut map = OpenAddressingMap::new(20);
        map.put("key1", 10);

        assert_eq!(map.len(), 1);
        assert_eq!(map.capacity(), 23);
        assert_eq!(map.get("key1"), Some(&10));

        map.resize_table(30);
        assert_eq!(map.capacity(), 31);
        assert_eq!(map.get("key1"), Some(&10));
        assert!(map.contains_key("key1"));
    }

    #[test]
    fn test_remove_leaves_tombstone() {
        let mut map = OpenAddressingMap::new(11);
        map.put("key1", 1);
        let index = slot_of(&map, "key1");

        assert!(map.remove("key1"));
        assert!(!map.contains_key("key1"));
        assert_eq!(map.get("key1"), None);
        assert_eq!(map.len(), 0);
        assert_eq!(map.empty_buckets(), 11);

        let slot = index.and_then(|i| map.iter().nth(i)).flatten();
        assert!(slot.is_some_and(Entry::is_tombstone));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut map = OpenAddressingMap::new(53);
        map.put("key1", 10);
        let load = map.table_load();

        assert!(!map.remove("key4"));
        assert_eq!(map.len(), 1);
        assert!((map.table_load() - load).abs() < f64::EPSILON);

        assert!(map.remove("key1"));
        assert!(!map.remove("key1"));
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_tombstone_reused() {
        // Every key shares one home slot, so "b" must probe through "a"'s tombstone.
        let mut map = OpenAddressingMap::with_hasher(11, |_: &str| 3_usize);
        map.put("a", 1);
        map.remove("a");
        map.put("b", 2);

        assert!(!map.contains_key("a"));
        assert!(map.contains_key("b"));
        assert_eq!(map.len(), 1);
        assert_eq!(slot_of(&map, "b"), Some(3));
        assert_eq!(map.iter().flatten().count(), 1);
    }

    #[test]
    fn test_probe_skips_tombstones() {
        let mut map = OpenAddressingMap::with_hasher(11, |_: &str| 0_usize);
        map.put("a", 1);
        map.put("b", 2);
        map.put("c", 3);

        assert_eq!(slot_of(&map, "a"), Some(0));
        assert_eq!(slot_of(&map, "b"), Some(1));
        assert_eq!(slot_of(&map, "c"), Some(4));

        map.remove("b");
        assert_eq!(map.get("c"), Some(&3));
        assert!(map.contains_key("a"));
    }

    #[test]
    fn test_update_past_tombstone_keeps_keys_unique() {
        let mut map = OpenAddressingMap::with_hasher(11, |_: &str| 0_usize);
        map.put("a", 1);
        map.put("b", 2);
        map.remove("a");
        map.put("b", 20);

        assert_eq!(map.get("b"), Some(&20));
        assert_eq!(map.len(), 1);
        assert_eq!(map.iter().flatten().filter(|entry| entry.key() == "b").count(), 1);
    }

    #[test]
    fn test_lookup_terminates_without_empty_slots() {
        // One key per slot by first byte, then tombstone all three slots.
        let mut map = OpenAddressingMap::with_hasher(3, |key: &str| {
            usize::from(key.as_bytes().first().copied().unwrap_or(0))
        });
        for key in ["a", "b", "c"] {
            map.put(key, 1);
            map.remove(key);
        }
        assert!(map.iter().all(|slot| slot.is_some_and(Entry::is_tombstone)));

        assert_eq!(map.get("missing"), None);
        assert!(!map.remove("missing"));

        map.put("d", 4);
        assert_eq!(map.get("d"), Some(&4));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_resize_on_half_load() {
        let mut map = OpenAddressingMap::new(5);
        map.put("key1", 1);
        map.put("key2", 2);
        map.put("key3", 3);
        assert_eq!(map.capacity(), 5);

        // 3/5 >= 0.5, so the next put grows the table to next_prime(10)
        map.put("key4", 4);
        assert_eq!(map.capacity(), 11);
        for (i, key) in ["key1", "key2", "key3", "key4"].into_iter().enumerate() {
            assert_eq!(map.get(key), Some(&(i + 1)));
        }
    }

    #[test]
    fn test_resize_below_size_ignored() {
        let mut map = OpenAddressingMap::with_hasher(11, hash_function_2);
        for i in 1..6 {
            map.put(i.to_string(), (i * 10).to_string());
        }
        let before = map.get_keys_and_values();

        map.resize_table(2);

        assert_eq!(map.capacity(), 11);
        assert_eq!(map.len(), 5);
        assert_eq!(map.get_keys_and_values(), before);
    }

    #[test]
    fn test_resize_to_exact_size_grows_again() {
        let mut map = OpenAddressingMap::new(11);
        for i in 0..5 {
            map.put(format!("key{i}"), i);
        }

        // A 5 slot table cannot hold 5 entries under the load ceiling; refilling regrows it.
        map.resize_table(5);

        assert!(map.capacity() > 5);
        assert!(is_prime(map.capacity()));
        assert!(map.table_load() <= 0.5);
        assert_eq!(map.len(), 5);
        for i in 0..5 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }

    #[test]
    fn test_resize_drops_tombstones() {
        let mut map = OpenAddressingMap::new(11);
        map.put("a", 1);
        map.put("b", 2);
        map.remove("a");

        map.resize_table(11);

        assert_eq!(map.iter().flatten().count(), 1);
        assert!(map.iter().flatten().all(|entry| !entry.is_tombstone()));
    }

    #[test]
    fn test_clear() {
        let mut map = OpenAddressingMap::new(53);
        map.put("key1", 10);
        map.put("key2", 20);
        map.resize_table(100);
        assert_eq!(map.capacity(), 101);

        map.clear();

        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 101);
        assert_eq!(map.get("key1"), None);
        assert!(map.iter().all(|slot| slot.is_none()));
    }

    #[test]
    fn test_iter_yields_every_slot_and_restarts() {
        let mut map = OpenAddressingMap::new(7);
        map.put("a", 1);
        map.put("b", 2);
        map.remove("a");

        assert_eq!(map.iter().len(), 7);
        assert_eq!(map.iter().count(), 7);
        assert_eq!(map.iter().flatten().count(), 2);
        assert_eq!((&map).into_iter().flatten().filter(|e| !e.is_tombstone()).count(), 1);
    }

    #[test]
    fn test_put_many_example() {
        let mut map = OpenAddressingMap::new(53);
        for i in 0..150 {
            map.put(format!("str{i}"), i * 100);
            // The growth check runs before the insert, so one entry may sit past the half mark.
            assert!(map.len() * 2 <= map.capacity() + 1);
        }

        assert_eq!(map.len(), 150);
        assert!(is_prime(map.capacity()));
        assert_eq!(map.empty_buckets(), map.capacity() - 150);
    }

    #[test]
    fn test_contains_key_many() {
        let mut map = OpenAddressingMap::with_hasher(79, hash_function_2);
        let keys: Vec<usize> = (1..1000).step_by(20).collect();
        for key in &keys {
            map.put(key.to_string(), key * 42);
        }

        for key in &keys {
            assert!(map.contains_key(&key.to_string()));
            assert!(!map.contains_key(&(key + 1).to_string()));
        }
    }

    #[test]
    fn test_repeated_resizes_keep_contents() {
        let mut map = OpenAddressingMap::with_hasher(75, hash_function_2);
        let keys: Vec<usize> = (25..1000).step_by(13).collect();
        for key in &keys {
            map.put(key.to_string(), key * 42);
        }

        for capacity in (111..1000).step_by(117) {
            map.resize_table(capacity);
            assert!(map.table_load() <= 0.5);

            map.put("some key", 0);
            assert!(map.contains_key("some key"));
            map.remove("some key");

            for key in &keys {
                assert_eq!(map.get(&key.to_string()), Some(&(key * 42)));
                assert!(!map.contains_key(&(key + 1).to_string()));
            }
            assert_eq!(map.len(), keys.len());
        }
    }

    #[test]
    fn test_extend_and_default() {
        let mut map: OpenAddressingMap<i32> = OpenAddressingMap::default();
        map.extend([("a", 1), ("b", 2)]);

        assert_eq!(map.capacity(), DEFAULT_CAPACITY);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(format!("{map:?}"), "OpenAddressingMap { size: 2, capacity: 11, .. }");
    }

    #[test]
    fn test_accessors_need_no_hasher_bound() {
        fn describe<V, H>(map: &OpenAddressingMap<V, H>) -> (usize, usize, bool, String) {
            (map.len(), map.capacity(), map.is_empty(), format!("{map:?}"))
        }

        let mut map = OpenAddressingMap::with_hasher(4, hash_function_2);
        map.put("a", 1);

        assert_eq!(
            describe(&map),
            (1, 5, false, "OpenAddressingMap { size: 1, capacity: 5, .. }".to_string())
        );
    }

    proptest! {
        #[test]
        fn put_then_get_round_trips(
            pairs in proptest::collection::vec(("[a-z]{1,6}", any::<i64>()), 1..200),
        ) {
            let mut map = OpenAddressingMap::new(11);
            for (key, value) in &pairs {
                map.put(key.clone(), *value);
                prop_assert_eq!(map.get(key), Some(value));
                prop_assert!(map.len() * 2 <= map.capacity() + 1);
                prop_assert!(is_prime(map.capacity()));
            }
        }

        #[test]
        fn remove_matches_std_map(
            ops in proptest::collection::vec((any::<bool>(), "[a-d]{1,2}", any::<u8>()), 1..300),
        ) {
            let mut map = OpenAddressingMap::with_hasher(3, hash_function_1);
            let mut model = std::collections::HashMap::new();
            for (insert, key, value) in ops {
                if insert {
                    map.put(key.clone(), value);
                    model.insert(key, value);
                } else {
                    prop_assert_eq!(map.remove(&key), model.remove(&key).is_some());
                }
                prop_assert_eq!(map.len(), model.len());
            }
            for (key, value) in &model {
                prop_assert_eq!(map.get(key), Some(value));
            }
        }

        #[test]
        fn resize_preserves_contents(
            keys in proptest::collection::hash_set("[a-z0-9]{1,8}", 0..100),
            target in 0usize..400,
        ) {
            let mut map = OpenAddressingMap::new(11);
            for (i, key) in keys.iter().enumerate() {
                map.put(key.clone(), i);
            }
            let size = map.len();

            map.resize_table(target);

            prop_assert!(is_prime(map.capacity()));
            prop_assert_eq!(map.len(), size);
            for (i, key) in keys.iter().enumerate() {
                prop_assert_eq!(map.get(key), Some(&i));
            }
        }
    }
}
