//! Integers, floats and decimals

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use num_traits::{Float, ToPrimitive, Zero};

use crate::binding::Binding;
use crate::error::Failure;
use crate::mode::{Mode, Validating};
use crate::precondition;
use crate::validation::Validation;

// ============================================================================
// NUMERIC
// ============================================================================

/// A number the sign, multiple and whole-number predicates understand.
pub trait Numeric: Copy + PartialOrd + fmt::Debug + Zero + ToPrimitive {
    /// Returns `true` if the value has no fractional part.
    fn is_whole(self) -> bool;

    /// Returns `true` for a float `NaN`.
    fn is_nan(self) -> bool {
        false
    }
}

macro_rules! impl_numeric_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn is_whole(self) -> bool {
                    true
                }
            }
        )*
    };
}

macro_rules! impl_numeric_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn is_whole(self) -> bool {
                    self.is_finite() && self.fract() == 0.0
                }

                #[inline]
                fn is_nan(self) -> bool {
                    <$t>::is_nan(self)
                }
            }
        )*
    };
}

impl_numeric_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_numeric_float!(f32, f64);

#[cfg(feature = "decimal")]
impl Numeric for rust_decimal::Decimal {
    fn is_whole(self) -> bool {
        self.fract().is_zero()
    }
}

/// `actual` is a multiple of `factor` when `actual / factor` has no
/// fractional part, evaluated in `f64`. A zero factor divides nothing.
fn is_multiple<N: Numeric>(actual: N, factor: N) -> bool {
    let (Some(actual), Some(factor)) = (actual.to_f64(), factor.to_f64()) else {
        return false;
    };
    factor != 0.0 && (actual / factor) % 1.0 == 0.0
}

// ============================================================================
// NUMBER VALIDATOR
// ============================================================================

/// Validates a number.
pub struct NumberValidator<N, M = Validating> {
    binding: Binding<N>,
    mode: PhantomData<M>,
}

impl_validation!([N,] NumberValidator[N,] => N);

impl<N, M> NumberValidator<N, M>
where
    N: Numeric,
    M: Mode,
{
    fn require(self, holds: impl FnOnce(N) -> bool, requirement: &str) -> M::Out<Self> {
        self.binding.check(|name, actual, config| {
            (!holds(*actual)).then(|| {
                Failure::invalid_argument(format!("{name} {requirement}."))
                    .with_context("Actual", config.render(actual))
            })
        });
        self.settle()
    }

    /// Requires `value < 0`.
    pub fn is_negative(self) -> M::Out<Self> {
        self.require(|n| n < N::zero(), "must be negative")
    }

    /// Requires `value >= 0`. `NaN` passes.
    pub fn is_not_negative(self) -> M::Out<Self> {
        self.require(|n| n.partial_cmp(&N::zero()) != Some(Ordering::Less), "may not be negative")
    }

    /// Requires `value == 0`.
    pub fn is_zero(self) -> M::Out<Self> {
        self.require(|n| n.is_zero(), "must be zero")
    }

    /// Requires `value != 0`.
    pub fn is_not_zero(self) -> M::Out<Self> {
        self.require(|n| !n.is_zero(), "may not be zero")
    }

    /// Requires `value > 0`.
    pub fn is_positive(self) -> M::Out<Self> {
        self.require(|n| n > N::zero(), "must be positive")
    }

    /// Requires `value <= 0`. `NaN` passes.
    pub fn is_not_positive(self) -> M::Out<Self> {
        self.require(|n| n.partial_cmp(&N::zero()) != Some(Ordering::Greater), "may not be positive")
    }

    /// Requires the value to be a multiple of `factor`. A zero factor always
    /// fails.
    pub fn is_multiple_of(self, factor: N) -> M::Out<Self> {
        self.binding.check(|name, actual, config| {
            (!is_multiple(*actual, factor)).then(|| {
                Failure::invalid_argument(format!(
                    "{name} must be a multiple of {}.",
                    config.render(&factor)
                ))
                .with_context("Actual", config.render(actual))
            })
        });
        self.settle()
    }

    /// Like [`is_multiple_of`](Self::is_multiple_of), naming the factor.
    ///
    /// # Panics
    ///
    /// Panics if `factor_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_multiple_of_named(self, factor: N, factor_name: &str) -> M::Out<Self> {
        precondition::require_name(factor_name, "factor_name");
        self.binding.check(|name, actual, config| {
            (!is_multiple(*actual, factor)).then(|| {
                Failure::invalid_argument(format!("{name} must be a multiple of {factor_name}."))
                    .with_context("Actual", config.render(actual))
                    .with_context(factor_name, config.render(&factor))
            })
        });
        self.settle()
    }

    /// Requires the value not to be a multiple of `factor`. A zero factor
    /// always passes.
    pub fn is_not_multiple_of(self, factor: N) -> M::Out<Self> {
        self.binding.check(|name, actual, config| {
            is_multiple(*actual, factor).then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not be a multiple of {}.",
                    config.render(&factor)
                ))
                .with_context("Actual", config.render(actual))
            })
        });
        self.settle()
    }

    /// Requires a value without a fractional part.
    pub fn is_whole_number(self) -> M::Out<Self> {
        self.require(Numeric::is_whole, "must be a whole number")
    }

    /// Requires a value with a fractional part.
    pub fn is_not_whole_number(self) -> M::Out<Self> {
        self.require(|n| !n.is_whole(), "may not be a whole number")
    }

    /// Requires a value other than `NaN`.
    pub fn is_number(self) -> M::Out<Self> {
        self.require(|n| !Numeric::is_nan(n), "must be a well-defined number")
    }

    /// Requires `NaN`.
    pub fn is_not_number(self) -> M::Out<Self> {
        self.require(Numeric::is_nan, "may not be a well-defined number")
    }
}

impl<N, M> NumberValidator<N, M>
where
    N: Numeric + Float,
    M: Mode,
{
    /// Requires a value that is neither infinite nor `NaN`.
    pub fn is_finite(self) -> M::Out<Self> {
        self.require(Float::is_finite, "must be a finite number")
    }

    /// Requires positive or negative infinity.
    pub fn is_infinite(self) -> M::Out<Self> {
        self.require(Float::is_infinite, "must be an infinite number")
    }
}

#[cfg(feature = "decimal")]
impl<M: Mode> NumberValidator<rust_decimal::Decimal, M> {
    /// Validates the number of significant digits as `NAME.precision()`.
    pub fn precision(&self) -> M::Out<NumberValidator<u32, M>> {
        let derived = self.binding.derive_with(".precision()", |decimal| {
            let mantissa = decimal.mantissa().unsigned_abs();
            if mantissa == 0 { 1 } else { mantissa.ilog10() + 1 }
        });
        M::settle(NumberValidator::<u32, M>::from_binding(derived))
    }

    /// Validates the number of digits after the decimal point as
    /// `NAME.scale()`.
    pub fn scale(&self) -> M::Out<NumberValidator<u32, M>> {
        let derived = self.binding.derive_with(".scale()", |decimal| decimal.scale());
        M::settle(NumberValidator::<u32, M>::from_binding(derived))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::{require_that, validate_that};
    use rstest::rstest;

    #[rstest]
    #[case(10, 5, true)]
    #[case(10, 3, false)]
    #[case(0, 7, true)]
    #[case(-9, 3, true)]
    #[case(0, 0, false)]
    #[case(6, 0, false)]
    fn test_is_multiple(#[case] actual: i64, #[case] factor: i64, #[case] expected: bool) {
        assert_eq!(is_multiple(actual, factor), expected);
    }

    #[test]
    fn test_sign_predicates() {
        let validator = validate_that(-3_i32, "delta").is_negative().is_not_positive().is_positive();

        assert_eq!(validator.failures().len(), 1);
        assert_eq!(validator.failures()[0].message(), "delta must be positive.");
        assert_eq!(validator.failures()[0].context_value("Actual"), Some("-3"));
    }

    #[test]
    fn test_whole_numbers() {
        let validator = validate_that(2.5_f64, "ratio").is_not_whole_number().is_whole_number();
        assert_eq!(validator.messages().len(), 1);

        assert!(!validate_that(f64::INFINITY, "inf").is_whole_number().failures().is_empty());
    }

    #[test]
    fn test_nan() {
        let validator = validate_that(f64::NAN, "x").is_not_number().is_number().is_finite();

        let messages: Vec<_> = validator.failures().iter().map(|f| f.message().to_owned()).collect();
        assert_eq!(messages, ["x must be a well-defined number.", "x must be a finite number."]);
    }

    #[test]
    fn test_throwing_multiple_of() {
        let error = require_that(7_u32, "batch").is_multiple_of(2).err();
        assert_eq!(
            error.map(|e| e.to_string()),
            Some("batch must be a multiple of 2.\nActual: 7".to_owned())
        );
    }

    #[cfg(feature = "decimal")]
    #[test]
    fn test_decimal_precision_and_scale() {
        use crate::validation::{ComparableValidation, ObjectValidation};
        use rust_decimal::Decimal;

        let price = Decimal::new(12345, 2);
        let validator = validate_that(price, "price");
        let _ = validator.precision().is_equal_to(5_u32);
        let _ = validator.scale().is_less_than_or_equal_to(1);

        let failures = validator.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message(), "price.scale() must be less than or equal to 1.");
    }
}
