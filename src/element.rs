use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use num_traits::{FromPrimitive, Num};

/// Step added by the default increment of integral kinds.
pub const DEFAULT_INTEGER_STEP: u8 = 1;

/// Step added by the default increment of floating-point kinds.
///
/// Repeated addition of `0.1` drifts away from the exact decimal values. The
/// drift is not corrected; rendering with [`FLOAT_FRACTION_DIGITS`] hides it.
pub const DEFAULT_FLOAT_STEP: f64 = 0.1;

/// Number of fractional digits used when rendering floating-point elements.
pub const FLOAT_FRACTION_DIGITS: usize = 1;

/// The numeric kinds that have a default increment.
///
/// This is the only place where the element type decides behavior. The kind is
/// looked up once, when a range is built, and the resolved step is stored in
/// the range; walking a range never inspects the kind again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    I32,
    I64,
    F32,
    F64,
}

impl NumericKind {
    /// Returns `true` for the floating-point kinds.
    #[inline]
    pub const fn is_floating(self) -> bool {
        matches!(self, NumericKind::F32 | NumericKind::F64)
    }

    /// Returns the Rust name of the primitive behind this kind.
    pub const fn name(self) -> &'static str {
        match self {
            NumericKind::I32 => "i32",
            NumericKind::I64 => "i64",
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
        }
    }

    /// Resolves the default step of this kind as a value of `T`.
    ///
    /// Integral kinds step by exactly one; floating kinds step by
    /// [`DEFAULT_FLOAT_STEP`] converted to `T` (so `0.1f32` for `f32`).
    ///
    /// ```
    /// use lazy_range_set::NumericKind;
    ///
    /// assert_eq!(NumericKind::I64.default_step::<i64>(), Some(1));
    /// assert_eq!(NumericKind::F32.default_step::<f32>(), Some(0.1f32));
    /// ```
    pub fn default_step<T: Element>(self) -> Option<T> {
        if self.is_floating() {
            T::from_f64(DEFAULT_FLOAT_STEP)
        } else {
            T::from_u8(DEFAULT_INTEGER_STEP)
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for types that can be stored in a range.
///
/// Any ordered numeric type can be an element when the range is given an
/// explicit increment. Only the types whose [`KIND`](Element::KIND) is set
/// (`i32`, `i64`, `f32`, `f64`) can be built without one.
///
/// Implementors must keep [`cmp_total`](Element::cmp_total) and
/// [`hash_element`](Element::hash_element) consistent with `PartialEq` for
/// every value that compares equal to itself.
pub trait Element:
    Copy + PartialOrd + Num + FromPrimitive + fmt::Display + fmt::Debug + 'static
{
    /// The default-increment kind of this type, if it has one.
    const KIND: Option<NumericKind> = None;

    /// Total order used by the materialized backing store.
    fn cmp_total(&self, other: &Self) -> Ordering;

    /// Feeds this value into `state`.
    fn hash_element<H: Hasher>(&self, state: &mut H);
}

macro_rules! impl_integer_element {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl Element for $ty {
                const KIND: Option<NumericKind> = $kind;

                #[inline]
                fn cmp_total(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }

                #[inline]
                fn hash_element<H: Hasher>(&self, state: &mut H) {
                    Hash::hash(self, state);
                }
            }
        )*
    };
}

macro_rules! impl_float_element {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl Element for $ty {
                const KIND: Option<NumericKind> = $kind;

                #[inline]
                fn cmp_total(&self, other: &Self) -> Ordering {
                    // -0.0 and 0.0 are equal under PartialEq, so they must be equal here too
                    let canonical = |v: $ty| if v == 0.0 { 0.0 } else { v };
                    canonical(*self).total_cmp(&canonical(*other))
                }

                #[inline]
                fn hash_element<H: Hasher>(&self, state: &mut H) {
                    let value = if *self == 0.0 { 0.0 } else { *self };
                    value.to_bits().hash(state);
                }
            }
        )*
    };
}

impl_integer_element! {
    i32 => Some(NumericKind::I32),
    i64 => Some(NumericKind::I64),
    i8 => None,
    i16 => None,
    i128 => None,
    isize => None,
    u8 => None,
    u16 => None,
    u32 => None,
    u64 => None,
    u128 => None,
    usize => None,
}

impl_float_element! {
    f32 => Some(NumericKind::F32),
    f64 => Some(NumericKind::F64),
}
