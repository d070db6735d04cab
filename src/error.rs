use alloc::string::String;

use thiserror::Error;

/// Message carried by [`RangeError::UnsupportedOperation`] when a lazy range is asked to mutate.
pub const READ_ONLY: &str = "range is read-only";

/// Errors produced while building or using a range.
///
/// Every error is raised synchronously by the call that caused it. Nothing is
/// retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The start bound is greater than the end bound.
    #[error("starting value {start} can not be bigger than ending value {end}")]
    InvalidRange { start: String, end: String },

    /// A required argument was absent or unusable (e.g. a missing or `NaN` bound).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// No increment was supplied and the element type has no default step.
    #[error("element type `{type_name}` has no default increment")]
    UnsupportedType { type_name: &'static str },

    /// A mutation was attempted on a view that does not allow it.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// An iterator was advanced past its last element.
    #[error("no more elements in range")]
    NoSuchElement,

    /// Array conversion was requested on a view that never materializes its elements.
    #[error("unsupported operation: range can not be converted to an array")]
    ArrayConversionUnsupported,

    /// A materialization walk visited more elements than it was allowed to.
    #[error("range walk exceeded the limit of {limit} elements")]
    WalkLimitExceeded { limit: usize },
}
