//! Ordered, duplicate-free item collections.

use std::fmt::Debug;
use std::ops::Deref;

use crate::error::{Result, SelectionError};

/// An ordered sequence of unique item ids.
///
/// Position is derived from order; nothing is indexed on the side. Derefs to
/// `[T]` so it can be handed straight to the functions in
/// [`controller`](crate::controller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: PartialEq + Debug> Collection<T> {
    /// Build a collection, rejecting repeated ids.
    pub fn new(items: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut collection = Self::empty();
        for item in items {
            collection.push(item)?;
        }
        Ok(collection)
    }

    /// Append an item to the end.
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.items.contains(&item) {
            return Err(SelectionError::duplicate(&item));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove an item. Returns true if it was present.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.position(item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Check if an item is present.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Index of an item in the ordering.
    pub fn position(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }
}

impl<T> Collection<T> {
    /// Create an empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Deref for Collection<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
