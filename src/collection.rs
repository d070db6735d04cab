use alloc::boxed::Box;
use core::borrow::Borrow;
use core::cmp::Ordering;

use crate::element::Element;
use crate::error::RangeError;

/// Read-only capabilities shared by every range.
pub trait RangeView<T: Element> {
    /// Iterator over the elements, in visiting order.
    type Iter<'a>: Iterator<Item = T>
    where
        Self: 'a;

    /// Number of elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool;

    /// Membership test. What counts as a member depends on the view.
    fn contains(&self, value: &T) -> bool;

    /// Returns `true` if every value is [`contains`](RangeView::contains)ed.
    fn contains_all<I>(&self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        values.into_iter().all(|value| self.contains(value.borrow()))
    }

    fn iter(&self) -> Self::Iter<'_>;

    /// Copies the elements into a boxed slice, if the view supports it.
    fn to_array(&self) -> Result<Box<[T]>, RangeError>;

    /// Orders two ranges by cardinality only.
    ///
    /// Ranges with the same number of elements are order-equal even when
    /// their contents differ.
    fn cmp_len<R>(&self, other: &R) -> Ordering
    where
        R: RangeView<T> + ?Sized,
    {
        self.len().cmp(&other.len())
    }
}

/// Mutating capabilities.
///
/// Each method reports whether the collection changed. Views that are
/// read-only return [`RangeError::UnsupportedOperation`].
pub trait MutableRange<T: Element>: RangeView<T> {
    fn insert(&mut self, value: T) -> Result<bool, RangeError>;

    fn remove(&mut self, value: &T) -> Result<bool, RangeError>;

    /// Removes every element. Never fails.
    fn clear(&mut self);

    fn insert_all<I>(&mut self, values: I) -> Result<bool, RangeError>
    where
        I: IntoIterator<Item = T>;

    fn remove_all<I>(&mut self, values: I) -> Result<bool, RangeError>
    where
        I: IntoIterator,
        I::Item: Borrow<T>;

    /// Keeps only the elements that appear in `values`.
    fn retain_all<I>(&mut self, values: I) -> Result<bool, RangeError>
    where
        I: IntoIterator,
        I::Item: Borrow<T>;
}
