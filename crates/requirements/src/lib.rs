//! # nebula-requirements
//!
//! Fluent preconditions for function arguments and internal state.
//!
//! ## Quick Start
//!
//! ```
//! use nebula_requirements::prelude::*;
//!
//! // Throwing: the first failure comes back as `Err`.
//! fn set_port(port: u16) -> Result<u16, RequirementError> {
//!     require_that(port, "port").is_greater_than_or_equal_to(1024)?;
//!     Ok(port)
//! }
//! assert!(set_port(80).is_err());
//!
//! // Validating: every failure is collected.
//! let name = validate_that("  ", "name").trim().is_not_empty();
//! let _ = name.length().is_less_than_or_equal_to(32);
//! assert_eq!(name.messages(), ["name.trim() may not be empty."]);
//! ```
//!
//! ## Modes
//!
//! Every validator is generic over a [`Mode`](mode::Mode):
//!
//! - `require_that` returns a [`Throwing`](mode::Throwing) validator whose
//!   predicates return `Result`, so `?` stops at the first failure;
//! - `validate_that` returns a [`Validating`](mode::Validating) validator
//!   whose predicates return the validator itself. Failures accumulate until
//!   [`failures`](validation::Validation::failures),
//!   [`messages`](validation::Validation::messages) or
//!   [`into_result`](validation::Validation::into_result) reads them.
//!
//! A missing value or a failed conversion is reported once. The chain then
//! continues as a no-op, so no cascade of follow-up failures is produced.
//!
//! [`with_context`](validation::Validation::with_context) attaches extra
//! `name: value` entries to every later failure of a chain.
//!
//! ## Categories
//!
//! - **Object**: [`ObjectValidator`](validators::ObjectValidator), plus
//!   equality and membership on every validator via
//!   [`ObjectValidation`](validation::ObjectValidation)
//! - **Comparable**: ordering on every `PartialOrd` value via
//!   [`ComparableValidation`](validation::ComparableValidation)
//! - **Number**: [`NumberValidator`](validators::NumberValidator)
//! - **Boolean**: [`BooleanValidator`](validators::BooleanValidator)
//! - **String**: [`StringValidator`](validators::StringValidator)
//! - **Collection / Array**: [`ContainerValidator`](validators::ContainerValidator);
//!   hash sets and hash map views are unordered
//! - **Map**: [`MapValidator`](validators::MapValidator)
//! - **Size**: [`SizeValidator`](validators::SizeValidator)
//! - **Path**: [`PathValidator`](validators::PathValidator)
//! - **Network**: `UriValidator`, `UrlValidator` (feature `network`),
//!   [`InetAddressValidator`](validators::InetAddressValidator)
//! - **Optional**: [`OptionValidator`](validators::OptionValidator)

// `RequirementError` carries a whole `Failure` in its single-failure variants.
#![allow(clippy::large_enum_variant)]

pub mod binding;
pub mod config;
pub mod diff;
pub mod error;
pub mod mode;
pub mod pluralizer;
mod precondition;
pub mod prelude;
pub mod requirements;
pub mod sink;
pub mod subject;
pub mod validation;
pub mod validators;

pub use config::{Configuration, ConfigurationBuilder, EqualityMethod};
pub use diff::{ContextGenerator, Identity};
pub use error::{ContextEntry, Failure, FailureKind, RequirementError};
pub use requirements::{
    Requirements, require_comparable, require_object, require_that, validate_comparable,
    validate_object, validate_that,
};
