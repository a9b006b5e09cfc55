//! Values that may be absent

use std::fmt;
use std::marker::PhantomData;

use crate::binding::Binding;
use crate::error::Failure;
use crate::mode::{Mode, Validating};
use crate::subject::Subject;
use crate::validation::Validation;

/// Validates an `Option<T>`.
///
/// [`is_not_null`](Self::is_not_null) unwraps into the validator of `T`; on
/// `None` it records a single null-value failure and hands back a no-op, so
/// the rest of the chain stays silent.
pub struct OptionValidator<T, M = Validating> {
    binding: Binding<Option<T>>,
    mode: PhantomData<M>,
}

impl_validation!([T,] OptionValidator[T,] => Option<T>);

impl<T, M> OptionValidator<T, M>
where
    T: Subject,
    M: Mode,
{
    /// Requires the value to be `None`.
    pub fn is_null(self) -> M::Out<Self>
    where
        T: fmt::Debug,
    {
        self.binding.check(|name, actual, config| {
            actual.is_some().then(|| {
                Failure::invalid_argument(format!("{name} must be null."))
                    .with_context("Actual", config.render(actual))
            })
        });
        self.settle()
    }

    /// Requires a value and continues with the validator of its category.
    pub fn is_not_null(self) -> M::Out<T::Validator<M>> {
        let mut binding = self.binding;
        if let Some(None) = binding.actual() {
            let message = format!("{} may not be null.", binding.name());
            binding.abandon(Failure::null_value(message));
        }
        let inner = binding.and_then(|value| value.map(Subject::into_actual));
        M::settle(<T::Validator<M> as Validation>::from_binding(inner))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::FailureKind;
    use crate::requirements::{require_that, validate_that};
    use crate::validation::{ComparableValidation, Validation};

    #[test]
    fn test_present_value_unwraps() {
        let validator = validate_that(Some(4_i32), "count").is_not_null().is_positive().is_less_than(3);

        assert_eq!(validator.value(), Some(&4));
        assert_eq!(validator.messages().len(), 1);
    }

    #[test]
    fn test_missing_value_yields_one_failure() {
        let validator = validate_that(None::<i32>, "count")
            .is_not_null()
            .is_positive()
            .is_less_than(3)
            .is_multiple_of(2);

        let failures = validator.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].kind(), FailureKind::NullValue);
        assert_eq!(failures[0].message(), "count may not be null.");
        assert!(validator.is_no_op());
    }

    #[test]
    fn test_is_null() {
        let validator = validate_that(Some("x"), "token").is_null();
        assert_eq!(validator.failures()[0].message(), "token must be null.");
    }

    #[test]
    fn test_throwing_missing_value() {
        let error = require_that(None::<String>, "owner").is_not_null().err();
        assert_eq!(error.and_then(|e| e.kind()), Some(FailureKind::NullValue));
    }
}
