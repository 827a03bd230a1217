use serde::{Deserialize, Serialize};

use super::item_pos;
use crate::error::SeqError;

/// An ordered list which allows duplicates and addresses its elements by 0-based index.
///
/// Every mutation keeps the indices contiguous: removing an element shifts all later elements
/// one position towards the front, inserting shifts them towards the back.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "Vec<T>", into = "Vec<T>")]
#[serde(bound(serialize = "T: Clone + Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct OrderedList<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> OrderedList<T> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn out_of_range(&self, index: usize) -> SeqError {
        SeqError::OutOfRange {
            index,
            len: self.items.len(),
        }
    }

    /// Returns the element at `index`
    pub fn get(&self, index: usize) -> Result<&T, SeqError> {
        self.items.get(index).ok_or(self.out_of_range(index))
    }

    /// Replaces the element at `index` with `value` and returns the previous element.
    ///
    /// The list never grows through `set()`, an index past the last element is an error.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, SeqError> {
        let err = self.out_of_range(index);
        let slot = self.items.get_mut(index).ok_or(err)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Appends `value` at the end of the list
    #[inline]
    pub fn append(&mut self, value: T) {
        self.items.push(value);
    }

    /// Inserts `value` at `index`, shifting the element at `index` and all later elements back by
    /// one. Indices past the end of the list append `value`.
    pub fn insert(&mut self, index: usize, value: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, value);
    }

    /// Appends all elements of `other` in their order, consuming `other`
    pub fn extend(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    /// Removes and returns the last element
    pub fn pop_last(&mut self) -> Result<T, SeqError> {
        self.items.pop().ok_or(SeqError::Empty)
    }

    /// Removes and returns the element at `index`.
    ///
    /// On an empty list every index is out of range.
    pub fn pop_at(&mut self, index: usize) -> Result<T, SeqError> {
        if index >= self.items.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.items.remove(index))
    }

    /// Removes all elements
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> OrderedList<T> {
    /// Appends all elements of `other` in their order, cloning them
    pub fn extend_from(&mut self, other: &Self) {
        self.items.extend_from_slice(&other.items);
    }
}

impl<T: PartialEq + std::fmt::Debug> OrderedList<T> {
    /// Returns the position of the first element which equals `value`
    pub fn index_of(&self, value: &T) -> Result<usize, SeqError> {
        item_pos(&self.items, value).ok_or_else(|| SeqError::not_found(value))
    }

    /// Returns true if at least one element equals `value`
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        item_pos(&self.items, value).is_some()
    }

    /// Removes and returns the first element which equals `value`
    pub fn remove(&mut self, value: &T) -> Result<T, SeqError> {
        let pos = self.index_of(value)?;
        Ok(self.items.remove(pos))
    }
}

impl<T> From<Vec<T>> for OrderedList<T> {
    #[inline]
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> From<OrderedList<T>> for Vec<T> {
    #[inline]
    fn from(l: OrderedList<T>) -> Self {
        l.items
    }
}

impl<T> FromIterator<T> for OrderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for OrderedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: std::fmt::Display> std::fmt::Display for OrderedList<T> {
    /// Renders the list as `[a, b, c]`, or `[]` for an empty list.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, it) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{it}")?;
        }
        write!(f, "]")
    }
}
