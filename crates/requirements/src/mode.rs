//! Execution modes: collect failures, or return them as errors
//!
//! Every validator is generic over a [`Mode`]. Predicates are written once
//! and finish with [`Mode::settle`], which decides what the caller gets back:
//!
//! - [`Validating`] returns the validator itself; failures stay in the sink
//!   until a terminal call reads them.
//! - [`Throwing`] drains the sink and returns `Err` if anything failed, so a
//!   chain halts at the first `?`.

use std::fmt;
use std::sync::Arc;

use crate::error::RequirementError;
use crate::validation::Validation;

mod sealed {
    pub trait Sealed {}
}

/// Policy applied after every predicate and derived-value step.
pub trait Mode: sealed::Sealed + fmt::Debug + Sized + 'static {
    /// What a predicate returns for a validator of type `V`.
    type Out<V>;

    /// Interprets the failures recorded so far.
    fn settle<V: Validation>(validator: V) -> Self::Out<V>;
}

/// Failure-collecting mode used by `validate_that`.
#[derive(Debug)]
pub enum Validating {}

/// Fail-fast mode used by `require_that`.
#[derive(Debug)]
pub enum Throwing {}

impl sealed::Sealed for Validating {}
impl sealed::Sealed for Throwing {}

impl Mode for Validating {
    type Out<V> = V;

    #[inline]
    fn settle<V: Validation>(validator: V) -> V {
        validator
    }
}

impl Mode for Throwing {
    type Out<V> = Result<V, RequirementError>;

    fn settle<V: Validation>(validator: V) -> Result<V, RequirementError> {
        let config = Arc::clone(validator.binding().config());
        let pending = validator.binding().failures().take();
        match RequirementError::from_failures(pending) {
            None => Ok(validator),
            Some(error) => Err(config.transform(error)),
        }
    }
}
