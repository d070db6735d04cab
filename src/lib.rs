#![no_std]
#![doc = include_str!("../README.md")]
//!
//! # Quick Start
//!
//! ```rust
//! use lazy_range_set::RangeSet;
//!
//! // 0 until 5, stepping by the default increment of i32
//! let range = RangeSet::of(0, 5).unwrap();
//!
//! assert_eq!(range.start(), 0);
//! assert_eq!(range.end(), 5);
//! assert_eq!(range.len(), 5);
//! assert_eq!(range.to_string(), "[0, 1, 2, 3, 4]");
//!
//! // Iterate over the range
//! for i in &range {
//!     println!("{}", i);
//! }
//! ```
//!
//! # Default Increments
//!
//! `i32` and `i64` step by exactly one. `f32` and `f64` step by `0.1`, which
//! drifts as it accumulates; floats are rendered with a single fractional
//! digit, which hides the drift. Any other element type needs an explicit
//! increment:
//!
//! ```rust
//! use lazy_range_set::{RangeError, RangeSet};
//!
//! let floats = RangeSet::of(0.0f32, 0.5).unwrap();
//! assert_eq!(floats.to_string(), "[0.0, 0.1, 0.2, 0.3, 0.4]");
//!
//! assert!(matches!(RangeSet::of(0u8, 5), Err(RangeError::UnsupportedType { .. })));
//!
//! let bytes = RangeSet::of_with(0u8, 5, |x| x + 1).unwrap();
//! assert_eq!(bytes.len(), 5);
//! ```
//!
//! # Lazy and Materialized Views
//!
//! [`RangeSet`] stores only its bounds and increment and is read-only.
//! [`MaterializedRangeSet`] walks the range once, stores the elements and
//! behaves like an ordinary mutable set afterwards.
//!
//! ```rust
//! use lazy_range_set::{MaterializedRangeSet, MutableRange, RangeError, RangeSet};
//!
//! let mut lazy = RangeSet::of(0, 3).unwrap();
//! assert_eq!(
//!     lazy.insert(7),
//!     Err(RangeError::UnsupportedOperation("range is read-only"))
//! );
//!
//! let mut eager: MaterializedRangeSet<i32> = lazy.materialize();
//! assert_eq!(MutableRange::insert(&mut eager, 7), Ok(true));
//! assert_eq!(eager.to_string(), "[0, 1, 2, 7]");
//!
//! // clear is the one mutation the lazy view accepts
//! lazy.clear();
//! assert!(lazy.is_empty());
//! ```

extern crate alloc;

mod collection;
mod element;
mod error;
mod increment;
mod materialized;
mod range_set;
mod render;

pub use collection::{MutableRange, RangeView};
pub use element::{
    Element, NumericKind, DEFAULT_FLOAT_STEP, DEFAULT_INTEGER_STEP, FLOAT_FRACTION_DIGITS,
};
pub use error::{RangeError, READ_ONLY};
pub use increment::{Increment, StepFn};
pub use materialized::{
    IntoIter as MaterializedIntoIter, Iter as MaterializedIter, MaterializedRangeSet,
};
pub use range_set::{IntoIter, Iter, RangeSet, RangeSetBuilder};

#[cfg(test)]
#[path = "tests/range_set_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/materialized_tests.rs"]
mod materialized_tests;
