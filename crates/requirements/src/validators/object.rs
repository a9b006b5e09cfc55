//! Values with no more specific category

use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use crate::binding::Binding;
use crate::error::Failure;
use crate::mode::{Mode, Validating};
use crate::precondition;
use crate::validation::{Validation, equality_context};

/// Validates any value. Equality, membership and (for `PartialOrd` values)
/// ordering come from the blanket validation traits.
pub struct ObjectValidator<T, M = Validating> {
    binding: Binding<T>,
    mode: PhantomData<M>,
}

impl_validation!([T,] ObjectValidator[T,] => T);

/// Validator bound through `validate_comparable`; ordering predicates come
/// from [`ComparableValidation`](crate::validation::ComparableValidation).
pub type ComparableValidator<T, M = Validating> = ObjectValidator<T, M>;

impl<'r, T, M> ObjectValidator<&'r T, M>
where
    T: fmt::Debug + ?Sized,
    M: Mode,
{
    /// Requires the reference to point at `other` itself, not merely an equal
    /// value.
    ///
    /// # Panics
    ///
    /// Panics if `other_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_same_object_as(self, other: &T, other_name: &str) -> M::Out<Self> {
        precondition::require_name(other_name, "other_name");
        self.binding.check(|name, actual, config| {
            (!ptr::eq(*actual, other)).then(|| {
                Failure::invalid_argument(format!("{name} must be the same object as {other_name}."))
                    .with_entries(equality_context(config, *actual, other_name, other))
            })
        });
        self.settle()
    }

    /// Requires the reference to point anywhere but at `other`.
    ///
    /// # Panics
    ///
    /// Panics if `other_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_not_same_object_as(self, other: &T, other_name: &str) -> M::Out<Self> {
        precondition::require_name(other_name, "other_name");
        self.binding.check(|name, actual, config| {
            ptr::eq(*actual, other).then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not be the same object as {other_name}."
                ))
                .with_context("Actual", config.render(*actual))
            })
        });
        self.settle()
    }
}

#[cfg(test)]
mod tests {
    use crate::requirements::{validate_comparable, validate_object};
    use crate::validation::{ComparableValidation, ObjectValidation, Validation};

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_equal_structs_pass() {
        let validator = validate_object(Point { x: 1, y: 2 }, "point").is_equal_to(Point { x: 1, y: 2 });
        assert!(!validator.has_failures());
    }

    #[test]
    fn test_unequal_structs_carry_a_diff() {
        let validator = validate_object(Point { x: 1, y: 2 }, "point").is_equal_to(Point { x: 1, y: 3 });

        let failure = &validator.failures()[0];
        assert_eq!(failure.message(), "point had an unexpected value.");
        assert!(failure.context_value("Diff").is_some());
    }

    #[test]
    fn test_is_one_of() {
        let validator = validate_object("b", "letter")
            .is_one_of(["a", "b"])
            .is_not_one_of(["b", "c"]);

        assert_eq!(validator.messages().len(), 1);
        assert!(validator.messages()[0].starts_with("letter may not be one of [\"b\", \"c\"]."));
    }

    #[test]
    fn test_same_object() {
        let shared = Point { x: 0, y: 0 };
        let copy = Point { x: 0, y: 0 };

        let validator = validate_object(&shared, "shared")
            .is_same_object_as(&shared, "itself")
            .is_same_object_as(&copy, "copy");

        let failures = validator.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message(), "shared must be the same object as copy.");
        assert!(failures[0].context_value("Actual.address").is_some());
    }

    #[test]
    fn test_comparable_named_bound() {
        let validator = validate_comparable('q', "grade").is_less_than_or_equal_to_named('f', "lowest");

        let failure = &validator.failures()[0];
        assert_eq!(failure.message(), "grade must be less than or equal to lowest.");
        assert_eq!(failure.context_value("Maximum"), Some("'f'"));
    }
}
