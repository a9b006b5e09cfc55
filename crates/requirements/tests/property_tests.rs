//! Property-based tests for nebula-requirements.

use std::collections::HashSet;

use nebula_requirements::prelude::*;
use proptest::prelude::*;

// ============================================================================
// MODES AGREE: require_that(x).p() is Ok iff validate_that(x).p() is clean
// ============================================================================

proptest! {
    #[test]
    fn modes_agree_on_ranges(n in any::<i64>(), start in -1_000i64..1_000, span in 0i64..500) {
        let end = start + span;
        let thrown = require_that(n, "n").is_between(start, end).is_ok();
        let collected = !validate_that(n, "n").is_between(start, end).has_failures();

        prop_assert_eq!(thrown, collected);
        prop_assert_eq!(collected, (start..end).contains(&n));
    }

    #[test]
    fn modes_agree_on_text(s in ".{0,20}") {
        let thrown = require_that(s.as_str(), "s").is_trimmed().is_ok();
        let collected = !validate_that(s.as_str(), "s").is_trimmed().has_failures();

        prop_assert_eq!(thrown, collected);
        prop_assert_eq!(collected, s.trim() == s);
    }

    #[test]
    fn thrown_error_is_first_collected_failure(n in any::<i32>()) {
        let collected = validate_that(n, "n").is_positive().is_multiple_of(4);
        match require_that(n, "n").is_positive().and_then(|v| v.is_multiple_of(4)) {
            Ok(_) => prop_assert!(!collected.has_failures()),
            Err(error) => prop_assert_eq!(error.to_string(), collected.messages()[0].clone()),
        }
    }
}

// ============================================================================
// MULTIPLE-OF LAWS
// ============================================================================

proptest! {
    #[test]
    fn products_are_multiples(n in -10_000i64..10_000, factor in 1i64..100) {
        prop_assert!(!validate_that(n * factor, "n").is_multiple_of(factor).has_failures());
    }

    #[test]
    fn multiple_and_not_multiple_are_complementary(n in any::<i32>(), factor in any::<i32>()) {
        let multiple = validate_that(n, "n").is_multiple_of(factor).has_failures();
        let not_multiple = validate_that(n, "n").is_not_multiple_of(factor).has_failures();

        prop_assert_ne!(multiple, not_multiple);
    }
}

// ============================================================================
// COLLECTIONS
// ============================================================================

proptest! {
    #[test]
    fn order_does_not_matter_for_contains_exactly(v in prop::collection::vec(any::<u8>(), 0..20)) {
        let reversed: Vec<u8> = v.iter().rev().copied().collect();
        prop_assert!(!validate_that(v, "v").contains_exactly(reversed).has_failures());
    }

    #[test]
    fn duplicates_match_set_size(v in prop::collection::vec(0u8..8, 0..12)) {
        let distinct = v.iter().collect::<HashSet<_>>().len() == v.len();
        let clean = !validate_that(v, "v").does_not_contain_duplicates().has_failures();

        prop_assert_eq!(clean, distinct);
    }

    #[test]
    fn size_reports_length(v in prop::collection::vec(any::<char>(), 0..16)) {
        let len = v.len();
        prop_assert!(!validate_that(v, "v").size().is_equal_to(len).has_failures());
    }
}

// ============================================================================
// NO-OP ABSORPTION
// ============================================================================

proptest! {
    #[test]
    fn missing_value_yields_one_failure(factor in any::<i64>(), bound in any::<i64>()) {
        let validator = validate_that(None::<i64>, "n")
            .is_not_null()
            .is_multiple_of(factor)
            .is_greater_than(bound)
            .is_positive();

        prop_assert_eq!(validator.failures().len(), 1);
        prop_assert_eq!(validator.failures()[0].kind(), FailureKind::NullValue);
    }
}
