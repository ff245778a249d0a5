//! Shared contract and utility traits for the map implementations

use crate::{ChainedMap, KeyHasher, OpenAddressingMap};

/// Operations common to every string-keyed map in this crate
pub trait StringMap<V> {
    /// Inserts or updates a key-value pair
    fn put(&mut self, key: String, value: V);

    /// Retrieve a value for a given key
    fn get(&self, key: &str) -> Option<&V>;

    /// Returns true if the map holds the given key
    fn contains_key(&self, key: &str) -> bool;

    /// Removes a key, returning whether it was present
    fn remove(&mut self, key: &str) -> bool;

    /// Rebuilds the table with at least `new_capacity` buckets
    fn resize_table(&mut self, new_capacity: usize);

    /// Returns the current load factor
    fn table_load(&self) -> f64;

    /// Returns the number of empty buckets
    fn empty_buckets(&self) -> usize;

    /// Returns every key-value pair
    fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone;

    /// Removes every entry, keeping the capacity
    fn clear(&mut self);

    /// Returns the number of entries
    fn len(&self) -> usize;

    /// Returns true if the map holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of buckets
    fn capacity(&self) -> usize;
}

/// Forwards every [`StringMap`] method to the inherent method of the same name
macro_rules! impl_string_map {
    ($map:ident) => {
        impl<V, H: KeyHasher> StringMap<V> for $map<V, H> {
            fn put(&mut self, key: String, value: V) {
                $map::put(self, key, value);
            }

            fn get(&self, key: &str) -> Option<&V> {
                $map::get(self, key)
            }

            fn contains_key(&self, key: &str) -> bool {
                $map::contains_key(self, key)
            }

            fn remove(&mut self, key: &str) -> bool {
                $map::remove(self, key)
            }

            fn resize_table(&mut self, new_capacity: usize) {
                $map::resize_table(self, new_capacity);
            }

            fn table_load(&self) -> f64 {
                $map::table_load(self)
            }

            fn empty_buckets(&self) -> usize {
                $map::empty_buckets(self)
            }

            fn get_keys_and_values(&self) -> Vec<(String, V)>
            where
                V: Clone,
            {
                $map::get_keys_and_values(self)
            }

            fn clear(&mut self) {
                $map::clear(self);
            }

            fn len(&self) -> usize {
                $map::len(self)
            }

            fn capacity(&self) -> usize {
                $map::capacity(self)
            }
        }
    };
}

impl_string_map!(OpenAddressingMap);
impl_string_map!(ChainedMap);

/// Extension trait for map implementations that provides additional utility methods
pub trait HashMapExtensions<V> {
    /// Returns the keys of the hash map as a Vec
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the hash map as a Vec
    fn values(&self) -> Vec<V>;
}

impl<V, M> HashMapExtensions<V> for M
where
    M: StringMap<V> + ?Sized,
    V: Clone,
{
    fn keys(&self) -> Vec<String> {
        self.get_keys_and_values().into_iter().map(|(k, _)| k).collect()
    }

    fn values(&self) -> Vec<V> {
        self.get_keys_and_values().into_iter().map(|(_, v)| v).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill<M: StringMap<i32>>(mut map: M) -> M {
        map.put("a".to_string(), 1);
        map.put("b".to_string(), 2);
        map.put("c".to_string(), 3);
        map
    }

    fn sorted_keys_and_values<M: StringMap<i32>>(map: &M) -> (Vec<String>, Vec<i32>) {
        let mut keys = map.keys();
        keys.sort();
        let mut values = map.values();
        values.sort_unstable();
        (keys, values)
    }

    #[test]
    fn test_keys_and_values() {
        let expected = (vec!["a".to_string(), "b".to_string(), "c".to_string()], vec![1, 2, 3]);

        assert_eq!(sorted_keys_and_values(&fill(OpenAddressingMap::new(11))), expected);
        assert_eq!(sorted_keys_and_values(&fill(ChainedMap::new(11))), expected);
    }

    #[test]
    fn test_contract_through_trait_object() {
        let mut maps: Vec<Box<dyn StringMap<i32>>> = vec![
            Box::new(OpenAddressingMap::<i32>::new(11)),
            Box::new(ChainedMap::<i32>::new(11)),
        ];

        for map in &mut maps {
            map.put("a".to_string(), 1);
            assert!(map.contains_key("a"));
            assert!(map.remove("a"));
            assert!(!map.remove("a"));
            assert!(map.is_empty());
            assert_eq!(map.empty_buckets(), 11);
        }
    }
}
