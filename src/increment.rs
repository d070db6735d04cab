use alloc::sync::Arc;
use core::any::type_name;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::element::{Element, NumericKind};
use crate::error::RangeError;

/// Shared step function of a custom increment.
pub type StepFn<T> = dyn Fn(T) -> T + Send + Sync;

/// Rule producing the next element of a range from the current one.
///
/// Equality is identity-based: two default increments are equal when they
/// belong to the same [`NumericKind`], two custom increments are equal only
/// when they share the same function allocation. Cloning an increment keeps
/// its identity.
///
/// A custom function must be pure for a range to be read from several threads.
/// Nothing enforces this.
#[derive(Clone)]
pub enum Increment<T: Element> {
    /// Adds the resolved default step of the element kind.
    Default { kind: NumericKind, step: T },
    /// Calls a caller-supplied function.
    Custom(Arc<StepFn<T>>),
}

impl<T: Element> Increment<T> {
    /// Looks up the default increment of `T`.
    ///
    /// # Errors
    /// Returns [`RangeError::UnsupportedType`] when `T` has no default kind.
    ///
    /// ```
    /// use lazy_range_set::{Increment, RangeError};
    ///
    /// assert_eq!(Increment::<i32>::default_for().unwrap().apply(41), 42);
    /// assert!(matches!(
    ///     Increment::<u8>::default_for(),
    ///     Err(RangeError::UnsupportedType { .. })
    /// ));
    /// ```
    pub fn default_for() -> Result<Self, RangeError> {
        let unsupported = || RangeError::UnsupportedType {
            type_name: type_name::<T>(),
        };
        let kind = T::KIND.ok_or_else(unsupported)?;
        let step = kind.default_step::<T>().ok_or_else(unsupported)?;
        Ok(Increment::Default { kind, step })
    }

    /// Wraps a step function.
    pub fn custom<F>(step: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Increment::Custom(Arc::new(step))
    }

    /// Wraps an already shared step function, keeping its identity.
    pub fn from_shared(step: Arc<StepFn<T>>) -> Self {
        Increment::Custom(step)
    }

    /// Produces the value that follows `value`.
    #[inline]
    pub fn apply(&self, value: T) -> T {
        match self {
            Increment::Default { step, .. } => value + *step,
            Increment::Custom(step) => step(value),
        }
    }

    /// Returns the kind of a default increment, `None` for a custom one.
    pub fn kind(&self) -> Option<NumericKind> {
        match self {
            Increment::Default { kind, .. } => Some(*kind),
            Increment::Custom(_) => None,
        }
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        matches!(self, Increment::Default { .. })
    }

    fn identity(step: &Arc<StepFn<T>>) -> *const () {
        Arc::as_ptr(step) as *const ()
    }
}

impl<T: Element> PartialEq for Increment<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Increment::Default { kind: a, .. }, Increment::Default { kind: b, .. }) => a == b,
            (Increment::Custom(a), Increment::Custom(b)) => {
                core::ptr::eq(Self::identity(a), Self::identity(b))
            }
            _ => false,
        }
    }
}

impl<T: Element> Eq for Increment<T> {}

impl<T: Element> Hash for Increment<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Increment::Default { kind, .. } => {
                state.write_u8(0);
                kind.hash(state);
            }
            Increment::Custom(step) => {
                state.write_u8(1);
                (Self::identity(step) as usize).hash(state);
            }
        }
    }
}

impl<T: Element> fmt::Debug for Increment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Increment::Default { kind, step } => f
                .debug_struct("Default")
                .field("kind", kind)
                .field("step", step)
                .finish(),
            Increment::Custom(step) => f.debug_tuple("Custom").field(&Self::identity(step)).finish(),
        }
    }
}
