extern crate alloc;
extern crate std;

use crate::{Increment, MutableRange, NumericKind, RangeError, RangeSet, RangeView, READ_ONLY};
use alloc::format;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash<T: Hash>(t: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    t.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_of_valid_range() {
    let r = RangeSet::of(2, 5).unwrap();
    assert_eq!(r.start(), 2);
    assert_eq!(r.end(), 5);
    assert_eq!(r.len(), 3);
}

#[test]
fn test_of_rejects_start_after_end() {
    let err = RangeSet::of(5, 2).unwrap_err();
    assert_eq!(
        err,
        RangeError::InvalidRange {
            start: "5".to_string(),
            end: "2".to_string()
        }
    );
}

#[test]
fn test_of_with_rejects_start_after_end() {
    let r = RangeSet::of_with(5u64, 2, |x| x + 1);
    assert!(matches!(r, Err(RangeError::InvalidRange { .. })));
}

#[test]
fn test_of_rejects_nan_bounds() {
    assert_eq!(
        RangeSet::of(f64::NAN, 1.0).unwrap_err(),
        RangeError::InvalidArgument("range bounds must be comparable")
    );
    assert!(matches!(
        RangeSet::of(0.0f32, f32::NAN),
        Err(RangeError::InvalidArgument(_))
    ));
}

#[test]
fn test_of_unsupported_type() {
    let err = RangeSet::of(0u8, 5).unwrap_err();
    assert_eq!(err, RangeError::UnsupportedType { type_name: "u8" });

    let err = RangeSet::of(0usize, 5).unwrap_err();
    assert!(matches!(err, RangeError::UnsupportedType { .. }));
}

#[test]
fn test_invalid_range_reported_before_unsupported_type() {
    assert!(matches!(
        RangeSet::of(9u16, 1),
        Err(RangeError::InvalidRange { .. })
    ));
}

#[test]
fn test_unsupported_type_with_explicit_increment() {
    let r = RangeSet::of_with(250u8, 255, |x| x + 1).unwrap();
    assert_eq!(r.iter().collect::<Vec<_>>(), vec![250, 251, 252, 253, 254]);
}

#[test]
fn test_builder() {
    let r = RangeSet::builder().start(0i64).end(3).build().unwrap();
    assert_eq!(r.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(r.increment().kind(), Some(NumericKind::I64));

    let r = RangeSet::builder()
        .start(1u32)
        .end(100)
        .step_with(|x| x * 3)
        .build()
        .unwrap();
    assert_eq!(r.iter().collect::<Vec<_>>(), vec![1, 3, 9, 27, 81]);
}

#[test]
fn test_builder_missing_bounds() {
    assert_eq!(
        RangeSet::<i32>::builder().end(3).build().unwrap_err(),
        RangeError::InvalidArgument("range start is required")
    );
    assert_eq!(
        RangeSet::<i32>::builder().start(3).build().unwrap_err(),
        RangeError::InvalidArgument("range end is required")
    );
}

#[test]
fn test_builder_without_increment_needs_default() {
    let r = RangeSet::<u32>::builder().start(0).end(3).build();
    assert!(matches!(r, Err(RangeError::UnsupportedType { .. })));
}

#[test]
fn test_error_messages() {
    let err = RangeSet::of(5, 2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "starting value 5 can not be bigger than ending value 2"
    );
    assert_eq!(
        RangeError::UnsupportedOperation(READ_ONLY).to_string(),
        "unsupported operation: range is read-only"
    );
}

// =============================================================================
// Default Increment Tests
// =============================================================================

#[test]
fn test_default_increment_discrete() {
    let r = RangeSet::of(0, 5).unwrap();
    assert_eq!(r.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    assert_eq!(r.to_string(), "[0, 1, 2, 3, 4]");
}

#[test]
fn test_default_increment_i64_near_max() {
    let r = RangeSet::of(i64::MAX - 3, i64::MAX).unwrap();
    assert_eq!(
        r.iter().collect::<Vec<_>>(),
        vec![i64::MAX - 3, i64::MAX - 2, i64::MAX - 1]
    );
}

#[test]
fn test_default_increment_float_rendering() {
    let r = RangeSet::of(0.0, 0.5).unwrap();
    assert_eq!(r.len(), 5);
    assert_eq!(r.to_string(), "[0.0, 0.1, 0.2, 0.3, 0.4]");

    let r = RangeSet::of(0.0f32, 0.5).unwrap();
    assert_eq!(r.len(), 5);
    assert_eq!(r.to_string(), "[0.0, 0.1, 0.2, 0.3, 0.4]");
}

#[test]
fn test_default_increment_float_drift() {
    // 0.1 summed ten times stays just below 1.0, so the walk visits one extra element
    let r = RangeSet::of(0.0, 1.0).unwrap();
    assert_eq!(r.len(), 11);
    assert!(r.to_string().ends_with("0.8, 0.9, 1.0]"));
}

#[test]
fn test_default_increment_kinds() {
    assert_eq!(Increment::<i32>::default_for().unwrap().kind(), Some(NumericKind::I32));
    assert_eq!(Increment::<i64>::default_for().unwrap().kind(), Some(NumericKind::I64));
    assert_eq!(Increment::<f32>::default_for().unwrap().kind(), Some(NumericKind::F32));
    assert_eq!(Increment::<f64>::default_for().unwrap().kind(), Some(NumericKind::F64));
    assert!(Increment::<i16>::default_for().is_err());

    assert!(NumericKind::F64.is_floating());
    assert!(!NumericKind::I32.is_floating());
    assert_eq!(NumericKind::F32.to_string(), "f32");
}

#[test]
fn test_integer_rendering_advances() {
    let r = RangeSet::of(7i64, 10).unwrap();
    assert_eq!(r.to_string(), "[7, 8, 9]");
}

// =============================================================================
// Empty Range Tests
// =============================================================================

#[test]
fn test_empty_range() {
    let r = RangeSet::of(3, 3).unwrap();
    assert!(r.is_empty());
    assert_eq!(r.len(), 0);
    assert_eq!(r.to_string(), "[]");
    assert_eq!(r.iter().next(), None);
}

#[test]
fn test_single_element_range() {
    let r = RangeSet::of(42, 43).unwrap();
    assert!(!r.is_empty());
    assert_eq!(r.len(), 1);
    assert_eq!(r.to_string(), "[42]");
}

#[test]
fn test_overshooting_increment() {
    let r = RangeSet::of_with(0, 5, |x| x + 100).unwrap();
    assert_eq!(r.len(), 1);
    assert!(!r.is_empty());
    assert_eq!(r.to_string(), "[0]");
}

// =============================================================================
// Iterator Tests
// =============================================================================

#[test]
fn test_iteration_by_ref() {
    let r = RangeSet::of(0, 3).unwrap();
    let collected: Vec<_> = (&r).into_iter().collect();
    assert_eq!(collected, vec![0, 1, 2]);

    // Every iterator restarts from start
    let collected2: Vec<_> = (&r).into_iter().collect();
    assert_eq!(collected2, vec![0, 1, 2]);
}

#[test]
fn test_iteration_owned() {
    let r = RangeSet::of_with(1i64, 20, |x| x * 2).unwrap();
    let collected: Vec<_> = r.into_iter().collect();
    assert_eq!(collected, vec![1, 2, 4, 8, 16]);
}

#[test]
fn test_iterator_has_next_and_try_next() {
    let r = RangeSet::of(0, 2).unwrap();
    let mut it = r.iter();
    assert!(it.has_next());
    assert_eq!(it.try_next(), Ok(0));
    assert_eq!(it.try_next(), Ok(1));
    assert!(!it.has_next());
    assert_eq!(it.try_next(), Err(RangeError::NoSuchElement));
    assert_eq!(it.next(), None);

    let mut owned = r.into_iter();
    owned.next();
    owned.next();
    assert_eq!(owned.try_next(), Err(RangeError::NoSuchElement));
}

#[test]
fn test_non_monotonic_increment() {
    // steps back from 4 to 1, then jumps past the end
    let r = RangeSet::of_with(0, 10, |x| match x {
        4 => 1,
        1 => 30,
        _ => x + 2,
    })
    .unwrap();
    assert_eq!(r.iter().collect::<Vec<_>>(), vec![0, 2, 4, 1]);
    assert_eq!(r.len(), 4);
    assert_eq!(r.to_string(), "[0, 2, 4, 1]");
}

// =============================================================================
// Membership Tests
// =============================================================================

#[test]
fn test_contains_is_bound_test() {
    let r = RangeSet::of_with(0, 10, |x| x + 3).unwrap();

    // aligned values
    assert!(r.contains(&0));
    assert!(r.contains(&9));
    // unaligned values are still accepted
    assert!(r.contains(&4));
    // the bounds are joined with "or", so values outside the span pass too
    assert!(r.contains(&-5));
    assert!(r.contains(&10));
    assert!(r.contains(&1000));
}

#[test]
fn test_contains_nan() {
    let r = RangeSet::of(0.0, 1.0).unwrap();
    assert!(!r.contains(&f64::NAN));
}

#[test]
fn test_contains_stepped() {
    let r = RangeSet::of_with(0, 10, |x| x + 3).unwrap();
    assert!(r.contains_stepped(&0));
    assert!(r.contains_stepped(&9));
    assert!(!r.contains_stepped(&4));
    assert!(!r.contains_stepped(&10));
    assert!(!r.contains_stepped(&12));
}

#[test]
fn test_contains_all() {
    let r = RangeSet::of(0, 10).unwrap();
    assert!(r.contains_all([1, 2, 3]));
    assert!(r.contains_all(&[4, 5]));
    assert!(r.contains_all(Vec::<i32>::new()));
    assert!(RangeView::contains_all(&r, [7, 8]));
}

// =============================================================================
// Read-only Tests
// =============================================================================

#[test]
fn test_mutation_rejected() {
    let mut r = RangeSet::of(0, 5).unwrap();
    let read_only = Err(RangeError::UnsupportedOperation(READ_ONLY));

    assert_eq!(r.insert(7), read_only);
    assert_eq!(r.remove(&1), read_only);
    assert_eq!(r.insert_all([8, 9]), read_only);
    assert_eq!(r.remove_all([1, 2]), read_only);
    assert_eq!(r.retain_all([1, 2]), read_only);

    // nothing changed
    assert_eq!(r.to_string(), "[0, 1, 2, 3, 4]");
}

#[test]
fn test_clear_collapses_range() {
    let mut r = RangeSet::of(0, 5).unwrap();
    r.clear();
    assert!(r.is_empty());
    assert_eq!(r.len(), 0);
    assert_eq!(r.start(), 5);
    assert_eq!(r.end(), 5);
    assert_eq!(r.to_string(), "[]");

    let mut r = RangeSet::of(1.0, 2.0).unwrap();
    MutableRange::clear(&mut r);
    assert!(r.is_empty());
}

#[test]
fn test_to_array_unsupported() {
    let r = RangeSet::of(0, 5).unwrap();
    assert_eq!(r.to_array(), Err(RangeError::ArrayConversionUnsupported));
    assert_eq!(
        RangeView::to_array(&r),
        Err(RangeError::ArrayConversionUnsupported)
    );
    assert_ne!(
        RangeError::ArrayConversionUnsupported,
        RangeError::UnsupportedOperation(READ_ONLY)
    );
}

// =============================================================================
// Ordering Tests
// =============================================================================

#[test]
fn test_cmp_len() {
    let five = RangeSet::of(0, 5).unwrap();
    let three = RangeSet::of(0, 3).unwrap();
    assert_eq!(five.cmp_len(&three), Ordering::Greater);
    assert_eq!(three.cmp_len(&five), Ordering::Less);
}

#[test]
fn test_cmp_len_equal_but_not_equal() {
    let a = RangeSet::of(0, 3).unwrap();
    let b = RangeSet::of(10, 13).unwrap();
    assert_eq!(a.cmp_len(&b), Ordering::Equal);
    assert_ne!(a, b);
}

#[test]
fn test_cmp_len_across_views() {
    let lazy = RangeSet::of(0, 4).unwrap();
    let eager = RangeSet::of(0, 2).unwrap().materialize();
    assert_eq!(lazy.cmp_len(&eager), Ordering::Greater);
    assert_eq!(eager.cmp_len(&lazy), Ordering::Less);
}

// =============================================================================
// Equality and Hash Tests
// =============================================================================

#[test]
fn test_equality_default_increment() {
    let a = RangeSet::of(10, 20).unwrap();
    let b = RangeSet::of(10, 20).unwrap();
    let c = RangeSet::of(10, 21).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(hash(&a), hash(&b));
}

#[test]
fn test_equality_custom_increment_identity() {
    let a = RangeSet::of_with(0, 10, |x| x + 1).unwrap();
    let b = RangeSet::of_with(0, 10, |x| x + 1).unwrap();
    // same contents, distinct functions
    assert_ne!(a, b);
    // not equal to the default increment either
    assert_ne!(a, RangeSet::of(0, 10).unwrap());

    // clones share the function
    let cloned = a.clone();
    assert_eq!(a, cloned);
    assert_eq!(hash(&a), hash(&cloned));
}

#[test]
fn test_equality_shared_increment() {
    let step: Arc<crate::StepFn<i32>> = Arc::new(|x: i32| x + 2);
    let a = RangeSet::with_increment(0, 10, Increment::from_shared(step.clone())).unwrap();
    let b = RangeSet::with_increment(0, 10, Increment::from_shared(step)).unwrap();
    assert_eq!(a, b);
    assert_eq!(hash(&a), hash(&b));
}

#[test]
fn test_float_equality_and_hash() {
    let a = RangeSet::of(0.0, 1.0).unwrap();
    let b = RangeSet::of(-0.0, 1.0).unwrap();
    assert_eq!(a, b);
    assert_eq!(hash(&a), hash(&b));
}

#[test]
fn test_debug_format() {
    let r = RangeSet::of(10, 20).unwrap();
    let debug_str = format!("{:?}", r);
    assert!(debug_str.contains("RangeSet"));
    assert!(debug_str.contains("start: 10"));
    assert!(debug_str.contains("end: 20"));
    assert!(debug_str.contains("I32"));
}

// =============================================================================
// Property-Based Tests
// =============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn len_matches_iteration(start in -1000i32..1000, len in 0i32..500, step in 1i32..20) {
            let r = RangeSet::of_with(start, start + len, move |x| x + step).unwrap();
            prop_assert_eq!(r.len(), r.iter().count());
            prop_assert_eq!(r.is_empty(), r.len() == 0);
        }

        #[test]
        fn default_matches_std_range(start in -1000i64..1000, len in 0i64..500) {
            let r = RangeSet::of(start, start + len).unwrap();
            let expected: Vec<i64> = (start..start + len).collect();
            prop_assert_eq!(r.iter().collect::<Vec<_>>(), expected);
            prop_assert_eq!(r.len(), len as usize);
        }

        #[test]
        fn of_rejects_reversed_bounds(start in -1000i32..1000, gap in 1i32..1000) {
            let r = RangeSet::of(start + gap, start);
            prop_assert!(
                matches!(r, Err(RangeError::InvalidRange { .. })),
                "expected InvalidRange"
            );
        }

        #[test]
        fn rendering_lists_every_element(start in -100i32..100, len in 0i32..50) {
            let r = RangeSet::of(start, start + len).unwrap();
            let rendered = r.to_string();
            prop_assert!(rendered.starts_with('[') && rendered.ends_with(']'));
            let inner = &rendered[1..rendered.len() - 1];
            let count = if inner.is_empty() { 0 } else { inner.split(", ").count() };
            prop_assert_eq!(count, r.len());
        }

        #[test]
        fn float_rendering_has_one_fraction_digit(start in 0u32..100, len in 0u32..30) {
            let start = start as f64;
            let r = RangeSet::of(start, start + len as f64 / 10.0).unwrap();
            let rendered = r.to_string();
            let inner = &rendered[1..rendered.len() - 1];
            for part in inner.split(", ").filter(|part| !part.is_empty()) {
                let (_, fraction) = part.split_once('.').unwrap();
                prop_assert_eq!(fraction.len(), 1);
            }
        }

        #[test]
        fn cmp_len_agrees_with_len(a in 0i32..200, b in 0i32..200) {
            let ra = RangeSet::of(0, a).unwrap();
            let rb = RangeSet::of(0, b).unwrap();
            prop_assert_eq!(ra.cmp_len(&rb), a.cmp(&b));
        }

        #[test]
        fn contains_stepped_implies_contains(start in -100i32..100, len in 0i32..100, value in -300i32..300) {
            let r = RangeSet::of_with(start, start + len, |x| x + 7).unwrap();
            if r.contains_stepped(&value) {
                prop_assert!(r.contains(&value));
            }
        }
    }
}
