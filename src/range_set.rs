use alloc::boxed::Box;
use alloc::string::ToString;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::collection::{MutableRange, RangeView};
use crate::element::Element;
use crate::error::{RangeError, READ_ONLY};
use crate::increment::Increment;
use crate::materialized::MaterializedRangeSet;
use crate::render;

/// Checks that `start <= end`, rejecting bounds that do not compare at all.
pub(crate) fn check_bounds<T: Element>(start: T, end: T) -> Result<(), RangeError> {
    match start.partial_cmp(&end) {
        None => Err(RangeError::InvalidArgument("range bounds must be comparable")),
        Some(Ordering::Greater) => Err(RangeError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        }),
        Some(_) => Ok(()),
    }
}

/// A half-open range `start..end` whose elements are produced on demand.
///
/// The range stores only its bounds and its [`Increment`]. Elements are the
/// values visited by applying the increment repeatedly from `start` while they
/// stay below `end`; they are never stored.
///
/// The view is read-only: every [`MutableRange`] entry point fails with
/// [`RangeError::UnsupportedOperation`], except [`clear`](RangeSet::clear)
/// which collapses the range to empty.
///
/// # Examples
/// ```
/// use lazy_range_set::RangeSet;
///
/// let range = RangeSet::of(0, 5).unwrap();
/// assert_eq!(range.len(), 5);
/// assert_eq!(range.to_string(), "[0, 1, 2, 3, 4]");
///
/// let evens = RangeSet::of_with(0u32, 10, |x| x + 2).unwrap();
/// assert_eq!(evens.iter().collect::<Vec<_>>(), vec![0, 2, 4, 6, 8]);
///
/// let floats = RangeSet::of(0.0, 0.5).unwrap();
/// assert_eq!(floats.to_string(), "[0.0, 0.1, 0.2, 0.3, 0.4]");
/// ```
#[derive(Clone)]
pub struct RangeSet<T: Element> {
    start: T,
    end: T,
    increment: Increment<T>,
}

impl<T: Element> RangeSet<T> {
    #[inline]
    fn from_parts(start: T, end: T, increment: Increment<T>) -> Self {
        log::trace!("created range {start}..{end} stepping by {increment:?}");
        Self {
            start,
            end,
            increment,
        }
    }

    /// Creates a range stepping by the default increment of `T`.
    ///
    /// # Errors
    /// - [`RangeError::InvalidRange`] if `start > end`
    /// - [`RangeError::InvalidArgument`] if the bounds do not compare (`NaN`)
    /// - [`RangeError::UnsupportedType`] if `T` has no default increment
    pub fn of(start: T, end: T) -> Result<Self, RangeError> {
        Self::builder().start(start).end(end).build()
    }

    /// Creates a range stepping with `step`.
    ///
    /// # Errors
    /// Same bound checks as [`of`](RangeSet::of).
    pub fn of_with<F>(start: T, end: T, step: F) -> Result<Self, RangeError>
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self::with_increment(start, end, Increment::custom(step))
    }

    /// Creates a range from an explicit [`Increment`].
    pub fn with_increment(start: T, end: T, increment: Increment<T>) -> Result<Self, RangeError> {
        check_bounds(start, end)?;
        Ok(Self::from_parts(start, end, increment))
    }

    pub fn builder() -> RangeSetBuilder<T> {
        RangeSetBuilder::new()
    }

    /// Returns the inclusive lower bound.
    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    /// Returns the exclusive upper bound.
    #[inline]
    pub fn end(&self) -> T {
        self.end
    }

    #[inline]
    pub fn increment(&self) -> &Increment<T> {
        &self.increment
    }

    /// Counts the elements by walking the range.
    ///
    /// Agrees with [`iter`](RangeSet::iter) by construction. Takes time linear
    /// in the number of elements and never returns if the increment never
    /// reaches `end`.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if the walk visits nothing.
    ///
    /// This is the first guard of the walk used by [`len`](RangeSet::len), so
    /// `is_empty() == (len() == 0)` holds for any increment.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.iter().has_next()
    }

    /// Liberal membership test: `value >= start || value < end`.
    ///
    /// Step alignment is not checked, and because the two bounds are joined
    /// with "or", every value that compares with the bounds is accepted. The
    /// materialized view tests exact membership instead. Use
    /// [`contains_stepped`](RangeSet::contains_stepped) for an exact answer
    /// on the lazy view.
    ///
    /// ```
    /// use lazy_range_set::RangeSet;
    ///
    /// let range = RangeSet::of_with(0, 10, |x| x + 3).unwrap();
    /// assert!(range.contains(&4));
    /// assert!(range.contains(&42));
    /// assert!(!range.contains_stepped(&4));
    /// ```
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        *value >= self.start || *value < self.end
    }

    /// Exact membership test: walks the range looking for `value`.
    pub fn contains_stepped(&self, value: &T) -> bool {
        self.iter().any(|element| element == *value)
    }

    /// Conjunction of [`contains`](RangeSet::contains) over `values`.
    pub fn contains_all<I>(&self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        values.into_iter().all(|value| self.contains(value.borrow()))
    }

    /// Returns an iterator that walks the range from `start`.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cursor: self.start,
            end: self.end,
            increment: &self.increment,
        }
    }

    /// Orders by [`len`](RangeSet::len) only.
    pub fn cmp_len<R>(&self, other: &R) -> Ordering
    where
        R: RangeView<T> + ?Sized,
    {
        self.len().cmp(&other.len())
    }

    /// Always fails: the lazy view does not materialize into arrays.
    pub fn to_array(&self) -> Result<Box<[T]>, RangeError> {
        Err(RangeError::ArrayConversionUnsupported)
    }

    /// Collapses the range to empty by moving `start` onto `end`.
    pub fn clear(&mut self) {
        log::debug!("clearing range {}..{}", self.start, self.end);
        self.start = self.end;
    }

    /// Walks the range once and stores every visited element.
    ///
    /// Never returns if the increment never reaches `end`; see
    /// [`materialize_bounded`](RangeSet::materialize_bounded).
    pub fn materialize(&self) -> MaterializedRangeSet<T> {
        self.iter().collect()
    }

    /// Like [`materialize`](RangeSet::materialize), giving up after `limit` elements.
    ///
    /// # Errors
    /// Returns [`RangeError::WalkLimitExceeded`] if the walk visits more than
    /// `limit` elements.
    pub fn materialize_bounded(&self, limit: usize) -> Result<MaterializedRangeSet<T>, RangeError> {
        MaterializedRangeSet::from_walk(self.iter(), Some(limit))
    }

    fn reject<R>(&self, operation: &str) -> Result<R, RangeError> {
        log::trace!("rejected {operation} on read-only range {}..{}", self.start, self.end);
        Err(RangeError::UnsupportedOperation(READ_ONLY))
    }
}

impl<T: Element> RangeView<T> for RangeSet<T> {
    type Iter<'a> = Iter<'a, T>;

    fn len(&self) -> usize {
        RangeSet::len(self)
    }

    fn is_empty(&self) -> bool {
        RangeSet::is_empty(self)
    }

    fn contains(&self, value: &T) -> bool {
        RangeSet::contains(self, value)
    }

    fn iter(&self) -> Self::Iter<'_> {
        RangeSet::iter(self)
    }

    fn to_array(&self) -> Result<Box<[T]>, RangeError> {
        RangeSet::to_array(self)
    }
}

impl<T: Element> MutableRange<T> for RangeSet<T> {
    fn insert(&mut self, _value: T) -> Result<bool, RangeError> {
        self.reject("insert")
    }

    fn remove(&mut self, _value: &T) -> Result<bool, RangeError> {
        self.reject("remove")
    }

    fn clear(&mut self) {
        RangeSet::clear(self);
    }

    fn insert_all<I>(&mut self, _values: I) -> Result<bool, RangeError>
    where
        I: IntoIterator<Item = T>,
    {
        self.reject("insert_all")
    }

    fn remove_all<I>(&mut self, _values: I) -> Result<bool, RangeError>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.reject("remove_all")
    }

    fn retain_all<I>(&mut self, _values: I) -> Result<bool, RangeError>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.reject("retain_all")
    }
}

impl<T: Element> PartialEq for RangeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.increment == other.increment
    }
}

// Bounds are never NaN, so equality is reflexive.
impl<T: Element> Eq for RangeSet<T> {}

impl<T: Element> Hash for RangeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash_element(state);
        self.end.hash_element(state);
        self.increment.hash(state);
    }
}

impl<T: Element> fmt::Debug for RangeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSet")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("increment", &self.increment)
            .finish()
    }
}

impl<T: Element> fmt::Display for RangeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::write_list(f, self.iter())
    }
}

impl<'a, T: Element> IntoIterator for &'a RangeSet<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Element> IntoIterator for RangeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            cursor: self.start,
            end: self.end,
            increment: self.increment,
        }
    }
}

/// Borrowing iterator over a [`RangeSet`].
///
/// Yields the cursor, then advances it with the increment, while the cursor is
/// below `end`. Once exhausted it stays exhausted.
#[derive(Clone)]
pub struct Iter<'a, T: Element> {
    cursor: T,
    end: T,
    increment: &'a Increment<T>,
}

impl<T: Element> Iter<'_, T> {
    #[inline]
    pub fn has_next(&self) -> bool {
        self.cursor < self.end
    }

    /// Like `next`, but reports exhaustion as [`RangeError::NoSuchElement`].
    pub fn try_next(&mut self) -> Result<T, RangeError> {
        self.next().ok_or(RangeError::NoSuchElement)
    }
}

impl<T: Element> Iterator for Iter<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if !self.has_next() {
            return None;
        }
        let current = self.cursor;
        self.cursor = self.increment.apply(current);
        Some(current)
    }
}

impl<T: Element> FusedIterator for Iter<'_, T> {}

impl<T: Element> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("cursor", &self.cursor)
            .field("end", &self.end)
            .finish()
    }
}

/// Owning iterator over a [`RangeSet`].
#[derive(Clone)]
pub struct IntoIter<T: Element> {
    cursor: T,
    end: T,
    increment: Increment<T>,
}

impl<T: Element> IntoIter<T> {
    #[inline]
    pub fn has_next(&self) -> bool {
        self.cursor < self.end
    }

    /// Like `next`, but reports exhaustion as [`RangeError::NoSuchElement`].
    pub fn try_next(&mut self) -> Result<T, RangeError> {
        self.next().ok_or(RangeError::NoSuchElement)
    }
}

impl<T: Element> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if !self.has_next() {
            return None;
        }
        let current = self.cursor;
        self.cursor = self.increment.apply(current);
        Some(current)
    }
}

impl<T: Element> FusedIterator for IntoIter<T> {}

impl<T: Element> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("cursor", &self.cursor)
            .field("end", &self.end)
            .finish()
    }
}

/// Step-by-step construction of a [`RangeSet`].
///
/// ```
/// use lazy_range_set::{RangeError, RangeSet};
///
/// let range = RangeSet::builder().start(1i64).end(4).build().unwrap();
/// assert_eq!(range.to_string(), "[1, 2, 3]");
///
/// let missing = RangeSet::<i64>::builder().start(1).build();
/// assert!(matches!(missing, Err(RangeError::InvalidArgument(_))));
/// ```
pub struct RangeSetBuilder<T: Element> {
    start: Option<T>,
    end: Option<T>,
    increment: Option<Increment<T>>,
}

impl<T: Element> RangeSetBuilder<T> {
    pub fn new() -> Self {
        Self {
            start: None,
            end: None,
            increment: None,
        }
    }

    pub fn start(mut self, start: T) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: T) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the increment. Without one, the default increment of `T` is used.
    pub fn increment(mut self, increment: Increment<T>) -> Self {
        self.increment = Some(increment);
        self
    }

    pub fn step_with<F>(self, step: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.increment(Increment::custom(step))
    }

    /// Validates the parts and builds the range.
    ///
    /// # Errors
    /// - [`RangeError::InvalidArgument`] if a bound is missing or `NaN`
    /// - [`RangeError::InvalidRange`] if `start > end`
    /// - [`RangeError::UnsupportedType`] if no increment was set and `T` has no default
    pub fn build(self) -> Result<RangeSet<T>, RangeError> {
        let start = self
            .start
            .ok_or(RangeError::InvalidArgument("range start is required"))?;
        let end = self
            .end
            .ok_or(RangeError::InvalidArgument("range end is required"))?;
        check_bounds(start, end)?;
        let increment = match self.increment {
            Some(increment) => increment,
            None => Increment::default_for()?,
        };
        Ok(RangeSet::from_parts(start, end, increment))
    }
}

impl<T: Element> Default for RangeSetBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> fmt::Debug for RangeSetBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSetBuilder")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("increment", &self.increment)
            .finish()
    }
}
