//! Recency List Module
//!
//! Tracks insertion order for sliding eviction using an arena-backed
//! doubly linked list.

use generational_arena::{Arena, Index};

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<Index>,
    next: Option<Index>,
}

// == Recency List ==
/// Orders keys from oldest to newest.
///
/// Append, unlink by handle and pop-oldest are all O(1). Callers keep the
/// `Index` returned by [`RecencyList::push_newest`] to unlink a key later.
/// Internal to the crate so arena handles never reach the public API.
#[derive(Debug)]
pub(crate) struct RecencyList<K> {
    nodes: Arena<Node<K>>,
    /// Least recent end, next eviction victim
    oldest: Option<Index>,
    /// Most recent end
    newest: Option<Index>,
}

impl<K> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RecencyList<K> {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            oldest: None,
            newest: None,
        }
    }

    // == Push Newest ==
    /// Appends a key at the most recent end and returns its handle.
    pub fn push_newest(&mut self, key: K) -> Index {
        let index = self.nodes.insert(Node {
            key,
            prev: self.newest,
            next: None,
        });

        match self.newest.and_then(|newest| self.nodes.get_mut(newest)) {
            Some(node) => node.next = Some(index),
            None => self.oldest = Some(index),
        }
        self.newest = Some(index);

        index
    }

    // == Unlink ==
    /// Removes the node behind `index`, returning its key.
    ///
    /// Returns None for a stale handle.
    pub fn unlink(&mut self, index: Index) -> Option<K> {
        let node = self.nodes.remove(index)?;

        match node.prev.and_then(|prev| self.nodes.get_mut(prev)) {
            Some(prev) => prev.next = node.next,
            None => self.oldest = node.next,
        }
        match node.next.and_then(|next| self.nodes.get_mut(next)) {
            Some(next) => next.prev = node.prev,
            None => self.newest = node.prev,
        }

        Some(node.key)
    }

    // == Pop Oldest ==
    /// Returns and removes the least recent key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_oldest(&mut self) -> Option<K> {
        let oldest = self.oldest?;
        self.unlink(oldest)
    }

    // == Peek Oldest ==
    /// Returns the least recent key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.oldest
            .and_then(|index| self.nodes.get(index))
            .map(|node| &node.key)
    }

    // == Length ==
    /// Returns the number of keys in the list.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    // == Is Empty ==
    /// Returns true if the list holds no keys.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // == Clear ==
    /// Removes all keys.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.oldest = None;
        self.newest = None;
    }

    // == Iterate ==
    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        let mut cursor = self.oldest;
        std::iter::from_fn(move || {
            let node = self.nodes.get(cursor?)?;
            cursor = node.next;
            Some(&node.key)
        })
    }
}
