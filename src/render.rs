use core::fmt::{self, Write};

use crate::element::{Element, FLOAT_FRACTION_DIGITS};

/// Writes one element, fixing floating kinds to [`FLOAT_FRACTION_DIGITS`] digits.
///
/// Formatting goes through `core::fmt`, so the decimal point is always `.`.
#[inline]
pub(crate) fn write_element<T: Element>(f: &mut fmt::Formatter<'_>, value: &T) -> fmt::Result {
    match T::KIND {
        Some(kind) if kind.is_floating() => write!(f, "{:.*}", FLOAT_FRACTION_DIGITS, value),
        _ => write!(f, "{value}"),
    }
}

/// Writes `[e0, e1, ..., en]`, or `[]` when `values` is empty.
pub(crate) fn write_list<T, I>(f: &mut fmt::Formatter<'_>, values: I) -> fmt::Result
where
    T: Element,
    I: IntoIterator<Item = T>,
{
    f.write_char('[')?;
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_element(f, &value)?;
    }
    f.write_char(']')
}
