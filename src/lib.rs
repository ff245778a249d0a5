//! # primehash
//!
//! String-keyed hash maps built on prime-sized tables.
//!
//! This crate provides two hash map implementations behind one contract, [`StringMap`]:
//!
//! - `OpenAddressingMap`: quadratic probing with tombstone deletion, kept at most half full
//! - `ChainedMap`: separate chaining, one linked list per bucket, grown at a load factor of one
//!
//! Capacities are always prime. Hashing is a pluggable strategy: any `Fn(&str) -> usize` works,
//! and [`hash_function_1`] / [`hash_function_2`] are provided.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primehash::OpenAddressingMap;
//!
//! // Capacity is rounded up to the next prime
//! let mut map = OpenAddressingMap::new(20);
//! assert_eq!(map.capacity(), 23);
//!
//! // Insert values
//! map.put("apple", 1);
//! map.put("banana", 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple", 10);
//! assert_eq!(map.get("apple"), Some(&10));
//! assert_eq!(map.len(), 2);
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Custom Hashing
//!
//! ```rust
//! use primehash::ChainedMap;
//!
//! // Every key lands in the same bucket
//! let mut map = ChainedMap::with_hasher(11, |_: &str| 0_usize);
//! for key in ["a", "b", "c", "d", "e"] {
//!     map.put(key, key.len());
//! }
//!
//! assert_eq!(map.len(), 5);
//! assert_eq!(map.empty_buckets(), 10);
//! assert!(map.contains_key("c"));
//! ```

/// Growable bucket array backing both tables
mod bucket_store;
/// Singly linked list used for separate chaining
mod chain_list;
/// Module implementing the separate-chaining hash map
mod chained_map;
/// Error types for the backing containers
mod error;
/// Hash strategies
mod hashing;
/// Most-frequent-value search
mod mode;
/// Module implementing the quadratic-probing hash map
mod open_addressing_map;
/// Prime sizing helpers
pub mod prime;
/// Shared contract and utility traits for the hash maps
mod utils;

pub use bucket_store::BucketStore;
pub use chain_list::{ChainList, ChainNode};
pub use chained_map::ChainedMap;
pub use error::{Error, Result};
pub use hashing::{HashFn, KeyHasher, hash_function_1, hash_function_2};
pub use mode::find_mode;
pub use open_addressing_map::{Entry, Iter, OpenAddressingMap};
pub use utils::{HashMapExtensions, StringMap};

/// Capacity requested by `Default` implementations
pub const DEFAULT_CAPACITY: usize = 11;
