//! Chain semantics: accumulation, no-op absorption, `and` blocks and modes.

use nebula_requirements::prelude::*;
use nebula_requirements::validators::SizeValidator;
use rstest::rstest;

// ============================================================================
// ACCUMULATION
// ============================================================================

#[test]
fn failures_are_kept_in_call_order() {
    let validator = validate_that(7_i32, "x").is_greater_than(10).is_less_than(5);

    let messages: Vec<_> = validator.failures().iter().map(|f| f.message().to_owned()).collect();
    assert_eq!(messages, ["x must be greater than 10.", "x must be less than 5."]);
}

#[test]
fn into_result_wraps_several_failures() {
    let error = validate_that(-4_i32, "offset")
        .is_positive()
        .is_multiple_of(3)
        .into_result()
        .unwrap_err();

    assert!(matches!(error, RequirementError::Multiple(_)));
    assert_eq!(error.failures().len(), 2);
    assert!(error.to_string().starts_with("2 requirements failed:\n\noffset must be positive."));
}

#[test]
fn passing_chain_has_no_error() {
    let validator = validate_that("ok", "status").is_not_empty().starts_with("o");

    assert!(validator.error().is_none());
    assert!(validator.into_result().is_ok());
}

// ============================================================================
// NO-OP ABSORPTION
// ============================================================================

#[test]
fn missing_value_reports_once() {
    let validator = validate_that(None::<Vec<u8>>, "payload")
        .is_not_null()
        .is_not_empty()
        .contains(0)
        .does_not_contain_duplicates();

    assert_eq!(validator.failures().len(), 1);
    assert_eq!(validator.failures()[0].kind(), FailureKind::NullValue);
    assert!(validator.is_no_op());
    assert!(validator.value().is_none());
}

#[test]
fn derived_values_of_a_no_op_are_no_ops() {
    let validator = validate_that(None::<&str>, "name").is_not_null();
    let length = validator.length().is_greater_than(100);

    assert!(length.is_no_op());
    assert_eq!(validator.failures().len(), 1);
}

#[test]
fn failed_conversion_keeps_parent_usable() {
    let text = validate_that("not an ip", "peer");
    let address = text.as_inet_address().is_loopback();
    let text = text.is_not_empty().ends_with(".2");

    assert!(address.is_no_op());
    assert!(!text.is_no_op());
    assert_eq!(text.failures().len(), 2);
}

// ============================================================================
// AND BLOCKS
// ============================================================================

#[test]
fn and_block_collects_every_failure_in_throwing_mode() {
    let error = require_that(150_i32, "percent")
        .and(|p| p.is_less_than_or_equal_to(100).is_multiple_of(7))
        .err()
        .unwrap();

    assert_eq!(error.failures().len(), 2);
}

#[test]
fn throwing_chain_stops_at_first_failure() {
    fn check(port: i32) -> Result<(), RequirementError> {
        require_that(port, "port").is_positive()?.is_less_than(65_536)?;
        Ok(())
    }

    let error = check(-1).unwrap_err();
    assert_eq!(error.failures().len(), 1);
    assert_eq!(error.kind(), Some(FailureKind::InvalidArgument));
}

#[test]
fn and_block_in_validating_mode_continues_the_chain() {
    let validator = validate_that(vec![3, 1], "ranks")
        .and(|r| r.is_sorted().does_not_contain(3))
        .is_empty();

    assert_eq!(validator.failures().len(), 3);
}

// ============================================================================
// SIZE BOUNDARIES
// ============================================================================

#[rstest]
#[case::at_least_equal(|s: SizeValidator| s.is_greater_than_or_equal_to(3), true)]
#[case::at_least_more(|s: SizeValidator| s.is_greater_than_or_equal_to(4), false)]
#[case::above_equal(|s: SizeValidator| s.is_greater_than(3), false)]
#[case::above_less(|s: SizeValidator| s.is_greater_than(2), true)]
#[case::at_most_equal(|s: SizeValidator| s.is_less_than_or_equal_to(3), true)]
#[case::below_equal(|s: SizeValidator| s.is_less_than(3), false)]
#[case::between_closed(|s: SizeValidator| s.is_between_closed(3, 3), true)]
#[case::between_open(|s: SizeValidator| s.is_between(1, 3), false)]
fn size_boundaries(#[case] check: fn(SizeValidator) -> SizeValidator, #[case] passes: bool) {
    let size = validate_that(vec!['a', 'b', 'c'], "letters").size();
    assert_eq!(!check(size).has_failures(), passes);
}

#[test]
fn size_failure_reports_actual() {
    let size = validate_that(vec![1, 2, 3], "items").size().is_greater_than_or_equal_to(4);
    assert_eq!(size.failures()[0].context_value("Actual"), Some("3"));
}

// ============================================================================
// MULTIPLE OF ZERO
// ============================================================================

#[rstest]
#[case(0)]
#[case(1)]
#[case(-12)]
fn multiple_of_zero(#[case] actual: i64) {
    assert!(validate_that(actual, "n").is_multiple_of(0).has_failures());
    assert!(!validate_that(actual, "n").is_not_multiple_of(0).has_failures());
}

// ============================================================================
// ARGUMENT PRECONDITIONS
// ============================================================================

#[test]
#[should_panic(expected = "end must be greater than or equal to start")]
fn reversed_range_panics() {
    let _ = validate_that(5_i32, "n").is_between(10, 1);
}

#[test]
#[should_panic(expected = "start and end must be comparable")]
fn nan_bound_panics() {
    let _ = validate_that(0.5_f64, "ratio").is_between(f64::NAN, 1.0);
}

#[test]
#[should_panic(expected = "may not contain leading or trailing whitespace")]
fn padded_bound_name_panics() {
    let _ = require_that(5_i32, "n").is_less_than_named(3, "max ");
}
