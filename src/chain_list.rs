//! Singly linked list used as a separate-chaining bucket

use std::fmt;

/// A node in a [`ChainList`]
pub struct ChainNode<V> {
    /// The key stored in this node
    key: String,
    /// The value associated with the key
    value: V,
    /// The following node, if any
    next: Option<Box<ChainNode<V>>>,
}

impl<V> ChainNode<V> {
    /// Returns the node's key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the node's value
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainNode<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainNode")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// A forward list of key-value nodes.
///
/// The list does not enforce key uniqueness on its own; [`crate::ChainedMap`] removes an existing
/// key before inserting it again.
pub struct ChainList<V> {
    /// First node of the list
    head: Option<Box<ChainNode<V>>>,
    /// Number of nodes in the list
    length: usize,
}

impl<V> ChainList<V> {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self { head: None, length: 0 }
    }

    /// Returns the number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the list holds no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Inserts a node at the front of the list
    pub fn insert(&mut self, key: String, value: V) {
        let next = self.head.take();
        self.head = Some(Box::new(ChainNode { key, value, next }));
        self.length = self.length.saturating_add(1);
    }

    /// Removes the first node with the given key, returning whether a node was removed
    pub fn remove(&mut self, key: &str) -> bool {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|node| node.key != key) {
            if let Some(node) = link {
                link = &mut node.next;
            }
        }

        match link.take() {
            Some(mut removed) => {
                *link = removed.next.take();
                self.length = self.length.saturating_sub(1);
                true
            }
            None => false,
        }
    }

    /// Returns the first node with the given key
    #[must_use]
    pub fn contains(&self, key: &str) -> Option<&ChainNode<V>> {
        self.iter().find(|node| node.key == key)
    }

    /// Returns an iterator over the nodes, front to back
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { next: self.head.as_deref() }
    }
}

impl<V> Default for ChainList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for ChainList<V> {
    fn clone(&self) -> Self {
        // Rebuild back to front so head insertion restores the original order.
        let mut nodes: Vec<&ChainNode<V>> = self.iter().collect();
        let mut list = Self::new();
        while let Some(node) = nodes.pop() {
            list.insert(node.key.clone(), node.value.clone());
        }
        list
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|node| (&node.key, &node.value))).finish()
    }
}

impl<V> Drop for ChainList<V> {
    fn drop(&mut self) {
        // Unlink iteratively; the default recursive drop can overflow the stack on long chains.
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

/// Borrowing iterator over the nodes of a [`ChainList`]
#[derive(Debug)]
pub struct Iter<'a, V> {
    /// The node to yield next
    next: Option<&'a ChainNode<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a ChainNode<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            node
        })
    }
}

/// Owning iterator over the key-value pairs of a [`ChainList`]
#[derive(Debug)]
pub struct IntoIter<V> {
    /// The list being drained
    list: ChainList<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.list.head.take().map(|mut node| {
            self.list.head = node.next.take();
            self.list.length = self.list.length.saturating_sub(1);
            (node.key, node.value)
        })
    }
}

impl<V> IntoIterator for ChainList<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, V> IntoIterator for &'a ChainList<V> {
    type Item = &'a ChainNode<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
