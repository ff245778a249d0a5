//! Growable bucket array backing both map layouts

use crate::error::{Error, Result};
use std::slice;
use std::vec;

/// A growable, indexable sequence with bounds-checked access.
///
/// Out-of-range reads and writes return [`Error::OutOfBounds`] instead of panicking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketStore<T> {
    /// The stored items, in index order
    items: Vec<T>,
}

impl<T> BucketStore<T> {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates a store of `len` items, each produced by `fill`
    pub fn repeat_with<F>(len: usize, mut fill: F) -> Self
    where
        F: FnMut() -> T,
    {
        let mut store = Self { items: Vec::with_capacity(len) };
        for _ in 0..len {
            store.push(fill());
        }
        store
    }

    /// Appends an item to the end of the store
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Returns the number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the store holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a reference to the item at `index`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.items.len();
        self.items.get(index).ok_or(Error::OutOfBounds { index, len })
    }

    /// Returns a mutable reference to the item at `index`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.items.len();
        self.items.get_mut(index).ok_or(Error::OutOfBounds { index, len })
    }

    /// Replaces the item at `index`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index >= len()`; the store is left unchanged.
    pub fn set(&mut self, index: usize, item: T) -> Result<()> {
        *self.get_mut(index)? = item;
        Ok(())
    }

    /// Returns an iterator over the items in index order
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for BucketStore<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a BucketStore<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
