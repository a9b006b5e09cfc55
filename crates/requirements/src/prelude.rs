//! Prelude module for convenient imports.
//!
//! `use nebula_requirements::prelude::*;` brings in the entry points, the
//! validation traits that carry the shared predicates, and the error types.
//!
//! # Examples
//!
//! ```
//! use nebula_requirements::prelude::*;
//!
//! let tags = validate_that(vec!["rust", "rust"], "tags").does_not_contain_duplicates();
//! assert!(tags.has_failures());
//! ```

// ============================================================================
// ENTRY POINTS
// ============================================================================

pub use crate::requirements::{
    Requirements, require_comparable, require_object, require_that, validate_comparable,
    validate_object, validate_that,
};

// ============================================================================
// TRAITS: terminal operations and shared predicates
// ============================================================================

pub use crate::subject::Subject;
pub use crate::validation::{ComparableValidation, ObjectValidation, Outcome, Validation};

// ============================================================================
// ERRORS AND CONFIGURATION
// ============================================================================

pub use crate::config::{Configuration, EqualityMethod};
pub use crate::error::{Failure, FailureKind, RequirementError};
pub use crate::mode::{Mode, Throwing, Validating};
