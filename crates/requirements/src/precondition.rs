//! Fail-fast checks on arguments passed to the API itself
//!
//! These guard programmer errors in *using* the library (a blank name, a
//! reversed range). They panic in both modes and are never accumulated.

use std::cmp::Ordering;
use std::fmt;

/// Panics unless `name` is non-empty and carries no surrounding whitespace.
#[track_caller]
pub(crate) fn require_name(name: &str, parameter: &str) {
    assert!(!name.trim().is_empty(), "{parameter} may not be empty");
    assert!(
        name.trim() == name,
        "{parameter} may not contain leading or trailing whitespace. Actual: {name:?}"
    );
}

/// Panics unless `start <= end`. Bounds without an ordering, such as `NaN`,
/// are rejected as incomparable.
#[track_caller]
pub(crate) fn require_ordered<T>(start: &T, start_name: &str, end: &T, end_name: &str)
where
    T: PartialOrd + fmt::Debug + ?Sized,
{
    match start.partial_cmp(end) {
        Some(Ordering::Less | Ordering::Equal) => {}
        Some(Ordering::Greater) => panic!(
            "{end_name} must be greater than or equal to {start_name}.\n{end_name}: {end:?}\n{start_name}: {start:?}"
        ),
        None => panic!(
            "{start_name} and {end_name} must be comparable.\n{start_name}: {start:?}\n{end_name}: {end:?}"
        ),
    }
}

/// Panics if `value` is empty.
#[track_caller]
pub(crate) fn require_non_empty(value: &str, parameter: &str) {
    assert!(!value.is_empty(), "{parameter} may not be empty");
}
