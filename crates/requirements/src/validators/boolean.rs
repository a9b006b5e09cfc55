//! Booleans

use std::marker::PhantomData;

use crate::binding::Binding;
use crate::error::Failure;
use crate::mode::{Mode, Validating};
use crate::validation::Validation;

/// Validates a `bool`. Equality failures on booleans never carry a diff.
pub struct BooleanValidator<M = Validating> {
    binding: Binding<bool>,
    mode: PhantomData<M>,
}

impl_validation!([] BooleanValidator[] => bool);

impl<M: Mode> BooleanValidator<M> {
    /// Requires `true`.
    pub fn is_true(self) -> M::Out<Self> {
        self.binding.check(|name, actual, _| {
            (!actual).then(|| Failure::invalid_argument(format!("{name} must be true.")))
        });
        self.settle()
    }

    /// Requires `false`.
    pub fn is_false(self) -> M::Out<Self> {
        self.binding.check(|name, actual, _| {
            actual.then(|| Failure::invalid_argument(format!("{name} must be false.")))
        });
        self.settle()
    }
}

#[cfg(test)]
mod tests {
    use crate::requirements::{require_that, validate_that};
    use crate::validation::{ObjectValidation, Validation};

    #[test]
    fn test_is_true() {
        assert!(!validate_that(true, "enabled").is_true().has_failures());
        assert!(require_that(true, "enabled").is_false().is_err());
    }

    #[test]
    fn test_boolean_equality_is_not_diffed() {
        let validator = validate_that(true, "enabled").is_equal_to(false);

        let failure = &validator.failures()[0];
        assert_eq!(failure.to_string(), "enabled had an unexpected value.\nActual  : true\nExpected: false");
    }
}
