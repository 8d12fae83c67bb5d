use std::collections::HashSet;
use std::fmt;
use std::ops::{Deref, Index};
use std::slice::Iter;
use std::vec::IntoIter;

use crate::domain::entity::Entity;

/// An ordered collection of entities with automatic deduplication.
/// Provides O(1) duplicate checking based on the entity id while preserving
/// insertion order. First-seen wins; later duplicates are dropped silently,
/// never replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySet<T: Entity> {
    items: Vec<T>,
    ids: HashSet<T::Id>,
}

impl<T: Entity> EntitySet<T> {
    /// Creates a new empty set
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Creates a new set with the specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            ids: HashSet::with_capacity(capacity),
        }
    }

    /// Inserts an entity into the set (ignores duplicates)
    /// Returns: true if the entity was actually inserted, false if it was a duplicate
    pub fn insert(&mut self, item: T) -> bool {
        if self.ids.insert(item.id()) {
            self.items.push(item);
            true
        } else {
            false
        }
    }

    /// Alias for insert() providing Vec-like API
    pub fn push(&mut self, item: T) -> bool {
        self.insert(item)
    }

    /// Appends a freshly fetched page, dropping items whose id is already
    /// present. Existing order is never disturbed and the order of novel
    /// incoming items is preserved. O(existing + new).
    /// Returns the number of items actually appended.
    pub fn merge_page(&mut self, page: Vec<T>) -> usize {
        let mut appended = 0;
        for item in page {
            if self.insert(item) {
                appended += 1;
            }
        }
        appended
    }

    /// Checks if an id is contained in the set
    pub fn contains(&self, id: &T::Id) -> bool {
        self.ids.contains(id)
    }

    /// Gets an entity by index
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Gets an entity by index, mutably. The id must not be changed through
    /// this reference; it is exposed for in-place engagement toggles.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Finds an entity by id, mutably. Same id-stability caveat as `get_mut`.
    pub fn find_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        if !self.ids.contains(id) {
            return None;
        }
        self.items.iter_mut().find(|item| &item.id() == id)
    }

    /// Gets the first entity
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Gets the last entity
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns a reference to the internal Vec (read-only)
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Retains entities matching a predicate
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut i = 0;
        while i < self.items.len() {
            if f(&self.items[i]) {
                i += 1;
            } else {
                let removed = self.items.remove(i);
                self.ids.remove(&removed.id());
            }
        }
        debug_assert_eq!(self.items.len(), self.ids.len());
    }

    /// Clears all entities
    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }
}

// === Standard library trait implementations ===

impl<T: Entity> Default for EntitySet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Deref for EntitySet<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T: Entity> Index<usize> for EntitySet<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<T: Entity> AsRef<[T]> for EntitySet<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<T: Entity> IntoIterator for EntitySet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T: Entity> IntoIterator for &'a EntitySet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Entity> FromIterator<T> for EntitySet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut items = Self::new();
        for item in iter {
            items.insert(item);
        }
        items
    }
}

impl<T: Entity> Extend<T> for EntitySet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Entity> fmt::Display for EntitySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntitySet[{} items]", self.len())
    }
}
