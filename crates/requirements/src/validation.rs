//! The surface shared by every validator
//!
//! [`Validation`] exposes the bound value and the terminal operations of a
//! chain. [`ObjectValidation`] and [`ComparableValidation`] are blanket
//! extensions: any validator whose value is `Debug` gets the equality and
//! membership predicates, and any validator whose value is also
//! `PartialOrd` gets the ordering predicates.

use std::fmt;

use crate::binding::Binding;
use crate::config::{Configuration, EqualityMethod, type_key};
use crate::diff::{ContextGenerator, Identity};
use crate::error::{ContextEntry, Failure, RequirementError};
use crate::mode::{Mode, Validating};
use crate::precondition;
use crate::validators::StringValidator;

/// What a predicate on `V` returns: `V` when validating,
/// `Result<V, RequirementError>` when throwing.
pub type Outcome<V> = <<V as Validation>::Mode as Mode>::Out<V>;

// ============================================================================
// VALIDATION
// ============================================================================

/// A validator: a [`Binding`] plus an execution [`Mode`].
pub trait Validation: Sized {
    /// Type of the bound value.
    type Value;

    /// Execution mode of this validator.
    type Mode: Mode;

    /// The same validator in [`Validating`] mode, handed to [`and`](Self::and)
    /// blocks.
    type Collecting: Validation<Value = Self::Value, Mode = Validating>;

    /// The underlying binding.
    fn binding(&self) -> &Binding<Self::Value>;

    /// Consumes the validator, returning its binding.
    fn into_binding(self) -> Binding<Self::Value>;

    /// Wraps a binding.
    fn from_binding(binding: Binding<Self::Value>) -> Self;

    /// Switches to [`Validating`] mode, keeping binding and sink.
    fn into_collecting(self) -> Self::Collecting {
        <Self::Collecting as Validation>::from_binding(self.into_binding())
    }

    /// Switches back from [`Validating`] mode.
    fn from_collecting(collecting: Self::Collecting) -> Self {
        Self::from_binding(collecting.into_binding())
    }

    /// Name used in messages.
    fn name(&self) -> &str {
        self.binding().name()
    }

    /// The bound value, `None` once the chain became a no-op.
    fn value(&self) -> Option<&Self::Value> {
        self.binding().actual()
    }

    /// Consumes the validator, returning the value.
    fn into_value(self) -> Option<Self::Value> {
        self.into_binding().into_actual()
    }

    /// Returns `true` if every further check is skipped.
    fn is_no_op(&self) -> bool {
        self.binding().is_no_op()
    }

    /// Returns `true` if any failure is pending in the chain.
    fn has_failures(&self) -> bool {
        !self.binding().failures().is_empty()
    }

    /// Pending failures, in the order they were recorded.
    fn failures(&self) -> Vec<Failure> {
        self.binding().failures().snapshot()
    }

    /// Rendered pending failures, message and context.
    fn messages(&self) -> Vec<String> {
        self.failures().iter().map(ToString::to_string).collect()
    }

    /// The error the pending failures amount to, after the configured
    /// transformer. Failures stay pending.
    fn error(&self) -> Option<RequirementError> {
        let config = self.binding().config();
        RequirementError::from_failures(self.failures()).map(|error| config.transform(error))
    }

    /// Returns `Err` if any failure is pending.
    ///
    /// # Errors
    ///
    /// The single failure, or [`RequirementError::Multiple`] when several
    /// checks failed.
    fn into_result(self) -> Result<(), RequirementError> {
        match self.error() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Adds `name: value` to every failure this chain records from now on,
    /// replacing an earlier entry called `name`.
    ///
    /// ```
    /// use nebula_requirements::prelude::*;
    ///
    /// let validator = validate_that(0_i32, "retries")
    ///     .with_context("job", "nightly-backup")
    ///     .is_positive();
    ///
    /// assert_eq!(validator.failures()[0].context_value("job"), Some("\"nightly-backup\""));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or padded with whitespace.
    #[track_caller]
    fn with_context<C: fmt::Debug + ?Sized>(self, name: &str, value: &C) -> Self {
        precondition::require_name(name, "name");
        let binding = self.binding();
        binding.set_context(name, binding.config().render(value));
        self
    }

    /// Stops adding the entry called `name` to later failures.
    fn without_context(self, name: &str) -> Self {
        self.binding().remove_context(name);
        self
    }

    /// Runs a block of checks that all execute even if earlier ones fail.
    ///
    /// In throwing mode the failures of the block are raised together once
    /// the block returns.
    fn and<F>(self, checks: F) -> Outcome<Self>
    where
        F: FnOnce(Self::Collecting) -> Self::Collecting,
    {
        Self::from_collecting(checks(self.into_collecting())).settle()
    }

    /// Applies the mode to the failures recorded so far.
    #[doc(hidden)]
    fn settle(self) -> Outcome<Self> {
        <Self::Mode as Mode>::settle(self)
    }
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// Returns `true` if `actual` equals `expected` under the configured method.
pub(crate) fn equals<A, E>(config: &Configuration, actual: &A, expected: &E) -> bool
where
    A: PartialEq<E> + fmt::Debug + ?Sized,
    E: fmt::Debug + ?Sized,
{
    match config.equality_method() {
        EqualityMethod::PartialEq => actual == expected,
        EqualityMethod::Rendered => config.render(actual) == config.render(expected),
    }
}

/// Context of an equality failure: a diff when the renderings differ, type
/// or address otherwise. Booleans are never diffed.
pub(crate) fn equality_context<A, E>(
    config: &Configuration,
    actual: &A,
    expected_name: &str,
    expected: &E,
) -> Vec<ContextEntry>
where
    A: fmt::Debug + ?Sized,
    E: fmt::Debug + ?Sized,
{
    ContextGenerator::new(config)
        .actual("Actual", config.render(actual))
        .expected(expected_name, config.render(expected))
        .diffable(type_key::<A>() != "bool")
        .identities(Identity::of(actual), Identity::of(expected))
        .build()
}

/// Direction of an ordering check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bound {
    Below,
    AtMost,
    Above,
    AtLeast,
}

impl Bound {
    pub(crate) fn holds<T: PartialOrd + ?Sized>(self, actual: &T, bound: &T) -> bool {
        match self {
            Self::Below => actual < bound,
            Self::AtMost => actual <= bound,
            Self::Above => actual > bound,
            Self::AtLeast => actual >= bound,
        }
    }

    fn relation(self) -> &'static str {
        match self {
            Self::Below => "must be less than",
            Self::AtMost => "must be less than or equal to",
            Self::Above => "must be greater than",
            Self::AtLeast => "must be greater than or equal to",
        }
    }

    /// Context label of a named bound.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Below => "Exclusive maximum",
            Self::AtMost => "Maximum",
            Self::Above => "Exclusive minimum",
            Self::AtLeast => "Minimum",
        }
    }
}

fn check_bound<T>(binding: &Binding<T>, bound: T, bound_name: Option<&str>, direction: Bound)
where
    T: PartialOrd + fmt::Debug,
{
    binding.check(|name, actual, config| {
        if direction.holds(actual, &bound) {
            return None;
        }
        let rendered = config.render(&bound);
        let relation = direction.relation();
        let failure = match bound_name {
            None => Failure::invalid_argument(format!("{name} {relation} {rendered}."))
                .with_context("Actual", config.render(actual)),
            Some(bound_name) => Failure::invalid_argument(format!("{name} {relation} {bound_name}."))
                .with_context("Actual", config.render(actual))
                .with_context(direction.label(), rendered),
        };
        Some(failure)
    });
}

fn check_range<T>(binding: &Binding<T>, start: T, end: T, end_inclusive: bool)
where
    T: PartialOrd + fmt::Debug,
{
    binding.check(|name, actual, config| {
        let below_end = if end_inclusive { *actual <= end } else { *actual < end };
        if *actual >= start && below_end {
            return None;
        }
        let close = if end_inclusive { ']' } else { ')' };
        Some(
            Failure::invalid_argument(format!(
                "{name} must be between [{}, {}{close}.",
                config.render(&start),
                config.render(&end)
            ))
            .with_context("Actual", config.render(actual)),
        )
    });
}

// ============================================================================
// OBJECT VALIDATION
// ============================================================================

/// Equality and membership predicates, available on every validator whose
/// value implements `Debug`.
pub trait ObjectValidation: Validation<Value: fmt::Debug> {
    /// Requires the value to equal `expected`.
    ///
    /// When the renderings differ the failure carries a diff; when they are
    /// identical it reports the types, or failing that the addresses.
    fn is_equal_to<E>(self, expected: E) -> Outcome<Self>
    where
        Self::Value: PartialEq<E>,
        E: fmt::Debug,
    {
        self.binding().check(|name, actual, config| {
            (!equals(config, actual, &expected)).then(|| {
                Failure::invalid_argument(format!("{name} had an unexpected value."))
                    .with_entries(equality_context(config, actual, "Expected", &expected))
            })
        });
        self.settle()
    }

    /// Requires the value to equal the value called `expected_name`.
    ///
    /// # Panics
    ///
    /// Panics if `expected_name` is empty or padded with whitespace.
    #[track_caller]
    fn is_equal_to_named<E>(self, expected: E, expected_name: &str) -> Outcome<Self>
    where
        Self::Value: PartialEq<E>,
        E: fmt::Debug,
    {
        precondition::require_name(expected_name, "expected_name");
        self.binding().check(|name, actual, config| {
            (!equals(config, actual, &expected)).then(|| {
                Failure::invalid_argument(format!("{name} must be equal to {expected_name}."))
                    .with_entries(equality_context(config, actual, expected_name, &expected))
            })
        });
        self.settle()
    }

    /// Requires the value to differ from `unwanted`.
    fn is_not_equal_to<E>(self, unwanted: E) -> Outcome<Self>
    where
        Self::Value: PartialEq<E>,
        E: fmt::Debug,
    {
        self.binding().check(|name, actual, config| {
            equals(config, actual, &unwanted).then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not be equal to {}.",
                    config.render(&unwanted)
                ))
                .with_context("Actual", config.render(actual))
            })
        });
        self.settle()
    }

    /// Requires the value to differ from the value called `unwanted_name`.
    ///
    /// # Panics
    ///
    /// Panics if `unwanted_name` is empty or padded with whitespace.
    #[track_caller]
    fn is_not_equal_to_named<E>(self, unwanted: E, unwanted_name: &str) -> Outcome<Self>
    where
        Self::Value: PartialEq<E>,
        E: fmt::Debug,
    {
        precondition::require_name(unwanted_name, "unwanted_name");
        self.binding().check(|name, actual, config| {
            equals(config, actual, &unwanted).then(|| {
                Failure::invalid_argument(format!("{name} may not be equal to {unwanted_name}."))
                    .with_context("Actual", config.render(actual))
            })
        });
        self.settle()
    }

    /// Requires the value to equal one of `candidates`.
    fn is_one_of<I>(self, candidates: I) -> Outcome<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Debug,
        Self::Value: PartialEq<I::Item>,
    {
        let candidates: Vec<I::Item> = candidates.into_iter().collect();
        self.binding().check(|name, actual, config| {
            (!candidates.iter().any(|c| equals(config, actual, c))).then(|| {
                Failure::invalid_argument(format!(
                    "{name} must be one of {}.",
                    config.render(&candidates)
                ))
                .with_context("Actual", config.render(actual))
            })
        });
        self.settle()
    }

    /// Requires the value to equal none of `candidates`.
    fn is_not_one_of<I>(self, candidates: I) -> Outcome<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Debug,
        Self::Value: PartialEq<I::Item>,
    {
        let candidates: Vec<I::Item> = candidates.into_iter().collect();
        self.binding().check(|name, actual, config| {
            candidates.iter().any(|c| equals(config, actual, c)).then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not be one of {}.",
                    config.render(&candidates)
                ))
                .with_context("Actual", config.render(actual))
            })
        });
        self.settle()
    }

    /// Validates the rendered value as `NAME.as_string()`.
    fn as_string(&self) -> <Self::Mode as Mode>::Out<StringValidator<'static, Self::Mode>> {
        let binding = self.binding();
        let config = binding.config();
        let derived = binding.derive_with(".as_string()", |actual| config.render(actual).into());
        <Self::Mode as Mode>::settle(StringValidator::<'static, Self::Mode>::from_binding(derived))
    }
}

impl<V> ObjectValidation for V
where
    V: Validation,
    V::Value: fmt::Debug,
{
}

// ============================================================================
// COMPARABLE VALIDATION
// ============================================================================

/// Ordering predicates, available on every validator whose value implements
/// `PartialOrd` and `Debug`.
///
/// Values that are unordered relative to a bound (`NaN`) fail every bound
/// check.
pub trait ComparableValidation: ObjectValidation<Value: PartialOrd> {
    /// Requires `value < bound`.
    fn is_less_than(self, bound: Self::Value) -> Outcome<Self> {
        check_bound(self.binding(), bound, None, Bound::Below);
        self.settle()
    }

    /// Requires `value < bound`, naming the bound in the message.
    #[track_caller]
    fn is_less_than_named(self, bound: Self::Value, bound_name: &str) -> Outcome<Self> {
        precondition::require_name(bound_name, "bound_name");
        check_bound(self.binding(), bound, Some(bound_name), Bound::Below);
        self.settle()
    }

    /// Requires `value <= bound`.
    fn is_less_than_or_equal_to(self, bound: Self::Value) -> Outcome<Self> {
        check_bound(self.binding(), bound, None, Bound::AtMost);
        self.settle()
    }

    /// Requires `value <= bound`, naming the bound in the message.
    #[track_caller]
    fn is_less_than_or_equal_to_named(self, bound: Self::Value, bound_name: &str) -> Outcome<Self> {
        precondition::require_name(bound_name, "bound_name");
        check_bound(self.binding(), bound, Some(bound_name), Bound::AtMost);
        self.settle()
    }

    /// Requires `value > bound`.
    fn is_greater_than(self, bound: Self::Value) -> Outcome<Self> {
        check_bound(self.binding(), bound, None, Bound::Above);
        self.settle()
    }

    /// Requires `value > bound`, naming the bound in the message.
    #[track_caller]
    fn is_greater_than_named(self, bound: Self::Value, bound_name: &str) -> Outcome<Self> {
        precondition::require_name(bound_name, "bound_name");
        check_bound(self.binding(), bound, Some(bound_name), Bound::Above);
        self.settle()
    }

    /// Requires `value >= bound`.
    fn is_greater_than_or_equal_to(self, bound: Self::Value) -> Outcome<Self> {
        check_bound(self.binding(), bound, None, Bound::AtLeast);
        self.settle()
    }

    /// Requires `value >= bound`, naming the bound in the message.
    #[track_caller]
    fn is_greater_than_or_equal_to_named(
        self,
        bound: Self::Value,
        bound_name: &str,
    ) -> Outcome<Self> {
        precondition::require_name(bound_name, "bound_name");
        check_bound(self.binding(), bound, Some(bound_name), Bound::AtLeast);
        self.settle()
    }

    /// Requires `start <= value < end`.
    ///
    /// # Panics
    ///
    /// Panics if `end < start` or the bounds do not compare, as with `NaN`.
    #[track_caller]
    fn is_between(self, start: Self::Value, end: Self::Value) -> Outcome<Self> {
        precondition::require_ordered(&start, "start", &end, "end");
        check_range(self.binding(), start, end, false);
        self.settle()
    }

    /// Requires `start <= value <= end`.
    ///
    /// # Panics
    ///
    /// Panics if `end < start` or the bounds do not compare, as with `NaN`.
    #[track_caller]
    fn is_between_closed(self, start: Self::Value, end: Self::Value) -> Outcome<Self> {
        precondition::require_ordered(&start, "start", &end, "end");
        check_range(self.binding(), start, end, true);
        self.settle()
    }

    /// Requires the value to compare as equal to `other`, which may differ
    /// from `==` (`0.0` and `-0.0`, for instance).
    fn is_comparable_to(self, other: Self::Value) -> Outcome<Self> {
        self.binding().check(|name, actual, config| {
            (actual.partial_cmp(&other) != Some(std::cmp::Ordering::Equal)).then(|| {
                Failure::invalid_argument(format!(
                    "{name} must be comparable to {}.",
                    config.render(&other)
                ))
                .with_context("Actual", config.render(actual))
            })
        });
        self.settle()
    }

    /// Requires the value not to compare as equal to `other`.
    fn is_not_comparable_to(self, other: Self::Value) -> Outcome<Self> {
        self.binding().check(|name, actual, config| {
            (actual.partial_cmp(&other) == Some(std::cmp::Ordering::Equal)).then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not be comparable to {}.",
                    config.render(&other)
                ))
                .with_context("Actual", config.render(actual))
            })
        });
        self.settle()
    }
}

impl<V> ComparableValidation for V
where
    V: ObjectValidation,
    V::Value: PartialOrd,
{
}
