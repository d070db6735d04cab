use alloc::boxed::Box;
use alloc::collections::btree_set;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::collection::{MutableRange, RangeView};
use crate::element::Element;
use crate::error::RangeError;
use crate::increment::Increment;
use crate::range_set::RangeSet;
use crate::render;

/// Orders elements by [`Element::cmp_total`] so floats can live in a `BTreeSet`.
#[derive(Clone, Copy)]
struct Key<T: Element>(T);

impl<T: Element> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.cmp_total(&other.0) == Ordering::Equal
    }
}

impl<T: Element> Eq for Key<T> {}

impl<T: Element> PartialOrd for Key<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Element> Ord for Key<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp_total(&other.0)
    }
}

/// A range whose elements were computed once and stored.
///
/// Construction walks the range the same way [`RangeSet`] does and keeps every
/// visited value in an ordered set. After that, membership is exact and
/// logarithmic, [`len`](MaterializedRangeSet::len) is constant-time and
/// iteration is ascending. Unlike the lazy view this is an ordinary mutable
/// set.
///
/// Two materialized ranges are equal when they hold the same elements. A
/// materialized range never compares equal to a [`RangeSet`].
///
/// # Examples
/// ```
/// use lazy_range_set::MaterializedRangeSet;
///
/// let mut range = MaterializedRangeSet::of(0, 5).unwrap();
/// assert!(range.contains(&3));
/// assert!(!range.contains(&7));
///
/// range.remove(&3);
/// range.insert(10);
/// assert_eq!(range.to_string(), "[0, 1, 2, 4, 10]");
/// ```
#[derive(Clone)]
pub struct MaterializedRangeSet<T: Element> {
    elements: BTreeSet<Key<T>>,
}

impl<T: Element> MaterializedRangeSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            elements: BTreeSet::new(),
        }
    }

    /// Materializes `start..end` stepping by the default increment of `T`.
    ///
    /// # Errors
    /// Same as [`RangeSet::of`].
    pub fn of(start: T, end: T) -> Result<Self, RangeError> {
        Ok(RangeSet::of(start, end)?.materialize())
    }

    /// Materializes `start..end` stepping with `step`.
    pub fn of_with<F>(start: T, end: T, step: F) -> Result<Self, RangeError>
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self::with_increment(start, end, Increment::custom(step))
    }

    pub fn with_increment(start: T, end: T, increment: Increment<T>) -> Result<Self, RangeError> {
        Ok(RangeSet::with_increment(start, end, increment)?.materialize())
    }

    /// Materializes `start..end`, visiting at most `limit` elements.
    ///
    /// # Errors
    /// - [`RangeError::InvalidRange`] or [`RangeError::InvalidArgument`] for bad bounds
    /// - [`RangeError::WalkLimitExceeded`] if the walk does not finish within `limit` elements
    ///
    /// ```
    /// use lazy_range_set::{Increment, MaterializedRangeSet, RangeError};
    ///
    /// // an increment that never moves would walk forever
    /// let stuck = MaterializedRangeSet::with_limit(0, 10, Increment::custom(|x| x), 100);
    /// assert_eq!(stuck, Err(RangeError::WalkLimitExceeded { limit: 100 }));
    /// ```
    pub fn with_limit(
        start: T,
        end: T,
        increment: Increment<T>,
        limit: usize,
    ) -> Result<Self, RangeError> {
        RangeSet::with_increment(start, end, increment)?.materialize_bounded(limit)
    }

    /// Stores every value yielded by `walk`, failing once more than `limit` are visited.
    pub(crate) fn from_walk<I>(walk: I, limit: Option<usize>) -> Result<Self, RangeError>
    where
        I: Iterator<Item = T>,
    {
        let mut elements = BTreeSet::new();
        for (visited, value) in walk.enumerate() {
            if let Some(limit) = limit {
                if visited >= limit {
                    log::debug!("materialization stopped at {value}: more than {limit} elements");
                    return Err(RangeError::WalkLimitExceeded { limit });
                }
            }
            elements.insert(Key(value));
        }
        log::trace!("materialized {} elements", elements.len());
        Ok(Self { elements })
    }

    /// Constant-time cardinality.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Exact membership test.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.elements.contains(&Key(*value))
    }

    pub fn contains_all<I>(&self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        values.into_iter().all(|value| self.contains(value.borrow()))
    }

    /// Ascending iterator over the stored elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.elements.iter(),
        }
    }

    /// Smallest element.
    pub fn first(&self) -> Option<T> {
        self.elements.first().map(|key| key.0)
    }

    /// Largest element.
    pub fn last(&self) -> Option<T> {
        self.elements.last().map(|key| key.0)
    }

    /// Adds `value`. Returns `true` if it was not present.
    pub fn insert(&mut self, value: T) -> bool {
        self.elements.insert(Key(value))
    }

    /// Removes `value`. Returns `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.elements.remove(&Key(*value))
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Adds every value. Returns `true` if anything was added.
    pub fn insert_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        values
            .into_iter()
            .fold(false, |changed, value| self.insert(value) | changed)
    }

    /// Removes every value. Returns `true` if anything was removed.
    pub fn remove_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        values
            .into_iter()
            .fold(false, |changed, value| self.remove(value.borrow()) | changed)
    }

    /// Keeps only the elements found in `values`. Returns `true` if anything was removed.
    pub fn retain_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let keep: BTreeSet<Key<T>> = values
            .into_iter()
            .map(|value| {
                let value: &T = value.borrow();
                Key(*value)
            })
            .collect();
        let before = self.elements.len();
        self.elements.retain(|key| keep.contains(key));
        self.elements.len() != before
    }

    /// Orders by [`len`](MaterializedRangeSet::len) only.
    pub fn cmp_len<R>(&self, other: &R) -> Ordering
    where
        R: RangeView<T> + ?Sized,
    {
        self.len().cmp(&other.len())
    }

    /// Copies the elements, ascending, into a boxed slice.
    pub fn to_array(&self) -> Box<[T]> {
        self.to_vec().into_boxed_slice()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T: Element> RangeView<T> for MaterializedRangeSet<T> {
    type Iter<'a> = Iter<'a, T>;

    fn len(&self) -> usize {
        MaterializedRangeSet::len(self)
    }

    fn is_empty(&self) -> bool {
        MaterializedRangeSet::is_empty(self)
    }

    fn contains(&self, value: &T) -> bool {
        MaterializedRangeSet::contains(self, value)
    }

    fn iter(&self) -> Self::Iter<'_> {
        MaterializedRangeSet::iter(self)
    }

    fn to_array(&self) -> Result<Box<[T]>, RangeError> {
        Ok(MaterializedRangeSet::to_array(self))
    }
}

impl<T: Element> MutableRange<T> for MaterializedRangeSet<T> {
    fn insert(&mut self, value: T) -> Result<bool, RangeError> {
        Ok(MaterializedRangeSet::insert(self, value))
    }

    fn remove(&mut self, value: &T) -> Result<bool, RangeError> {
        Ok(MaterializedRangeSet::remove(self, value))
    }

    fn clear(&mut self) {
        MaterializedRangeSet::clear(self);
    }

    fn insert_all<I>(&mut self, values: I) -> Result<bool, RangeError>
    where
        I: IntoIterator<Item = T>,
    {
        Ok(MaterializedRangeSet::insert_all(self, values))
    }

    fn remove_all<I>(&mut self, values: I) -> Result<bool, RangeError>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Ok(MaterializedRangeSet::remove_all(self, values))
    }

    fn retain_all<I>(&mut self, values: I) -> Result<bool, RangeError>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Ok(MaterializedRangeSet::retain_all(self, values))
    }
}

impl<T: Element> Default for MaterializedRangeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> PartialEq for MaterializedRangeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Element> Eq for MaterializedRangeSet<T> {}

impl<T: Element> Hash for MaterializedRangeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for value in self.iter() {
            value.hash_element(state);
        }
    }
}

impl<T: Element> fmt::Debug for MaterializedRangeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Element> fmt::Display for MaterializedRangeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::write_list(f, self.iter())
    }
}

impl<T: Element> FromIterator<T> for MaterializedRangeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().map(Key).collect(),
        }
    }
}

impl<T: Element> Extend<T> for MaterializedRangeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter.into_iter().map(Key));
    }
}

impl<T: Element> From<&RangeSet<T>> for MaterializedRangeSet<T> {
    fn from(range: &RangeSet<T>) -> Self {
        range.materialize()
    }
}

impl<'a, T: Element> IntoIterator for &'a MaterializedRangeSet<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Element> IntoIterator for MaterializedRangeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.elements.into_iter(),
        }
    }
}

/// Ascending borrowing iterator over a [`MaterializedRangeSet`].
#[derive(Clone)]
pub struct Iter<'a, T: Element> {
    inner: btree_set::Iter<'a, Key<T>>,
}

impl<T: Element> Iterator for Iter<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|key| key.0)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T: Element> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().map(|key| key.0)
    }
}

impl<T: Element> ExactSizeIterator for Iter<'_, T> {}

impl<T: Element> FusedIterator for Iter<'_, T> {}

impl<T: Element> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Ascending owning iterator over a [`MaterializedRangeSet`].
pub struct IntoIter<T: Element> {
    inner: btree_set::IntoIter<Key<T>>,
}

impl<T: Element> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|key| key.0)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T: Element> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().map(|key| key.0)
    }
}

impl<T: Element> ExactSizeIterator for IntoIter<T> {}

impl<T: Element> FusedIterator for IntoIter<T> {}

impl<T: Element> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").finish_non_exhaustive()
    }
}
