use alloc::vec::Vec;

use crate::cost::Cost;

/// Receive `(cost, item)` pairs and keep every item tied for the minimum.
///
/// An empty sequence has a minimum of [`Cost::INFINITE`]. Infinite-cost
/// pairs are never retained. A strictly smaller cost discards everything
/// kept so far; an equal cost appends; a larger cost is ignored. Items are
/// yielded in the order they were accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinSequence<T> {
    min: Cost,
    items: Vec<T>,
    max_keep: Option<usize>,
}

impl<T> MinSequence<T> {
    pub fn new() -> Self {
        Self {
            min: Cost::INFINITE,
            items: Vec::new(),
            max_keep: None,
        }
    }

    /// Keep at most `max_keep` tied items; later ties at the same cost are
    /// dropped, while a strictly smaller cost still replaces the contents.
    pub fn with_max_keep(max_keep: usize) -> Self {
        Self {
            max_keep: Some(max_keep),
            ..Self::new()
        }
    }

    /// Offer one item at the given cost.
    pub fn update(&mut self, cost: Cost, item: T) {
        if cost.is_infinite() || cost > self.min {
            return;
        }
        if cost < self.min {
            self.min = cost;
            self.items.clear();
        } else if self.max_keep.is_some_and(|cap| self.items.len() >= cap) {
            return;
        }
        self.items.push(item);
    }

    /// Current minimum cost.
    #[inline]
    pub fn min(&self) -> Cost {
        self.min
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for MinSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<(Cost, T)> for MinSequence<T> {
    fn extend<I: IntoIterator<Item = (Cost, T)>>(&mut self, iter: I) {
        for (cost, item) in iter {
            self.update(cost, item);
        }
    }
}

impl<T> FromIterator<(Cost, T)> for MinSequence<T> {
    fn from_iter<I: IntoIterator<Item = (Cost, T)>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T> IntoIterator for MinSequence<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a MinSequence<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
