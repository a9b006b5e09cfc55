//! Entry points
//!
//! The free functions bind against the process-wide configuration;
//! [`Requirements`] carries its own.
//!
//! ```
//! use nebula_requirements::prelude::*;
//!
//! fn connect(host: &str, port: u16) -> Result<(), RequirementError> {
//!     require_that(host, "host").is_not_blank()?;
//!     require_that(port, "port").is_greater_than_or_equal_to(1024)?;
//!     Ok(())
//! }
//!
//! assert!(connect("db.internal", 5432).is_ok());
//! assert_eq!(
//!     connect("db.internal", 80).unwrap_err().to_string(),
//!     "port must be greater than or equal to 1024.\nActual: 80"
//! );
//! ```

use std::fmt;
use std::sync::Arc;

use crate::binding::Binding;
use crate::config::Configuration;
use crate::error::ContextEntry;
use crate::mode::{Throwing, Validating};
use crate::precondition;
use crate::subject::Subject;
use crate::validation::Validation;
use crate::validators::{ComparableValidator, ObjectValidator};

/// Entry points bound to one configuration.
///
/// ```
/// use nebula_requirements::prelude::*;
///
/// let requirements = Requirements::with_configuration(
///     Configuration::builder().diff_enabled(false).build(),
/// );
/// let validator = requirements.validate_that("cat", "animal").is_equal_to("cut");
///
/// assert_eq!(validator.messages(), ["animal had an unexpected value.\nActual  : cat\nExpected: cut"]);
/// ```
#[derive(Debug, Clone)]
pub struct Requirements {
    config: Arc<Configuration>,
    context: Vec<ContextEntry>,
}

impl Default for Requirements {
    fn default() -> Self {
        Self::new()
    }
}

impl Requirements {
    /// Binds to the process-wide configuration as it is now.
    pub fn new() -> Self {
        Self {
            config: Configuration::global(),
            context: Vec::new(),
        }
    }

    /// Binds to `config`.
    pub fn with_configuration(config: Configuration) -> Self {
        Self {
            config: Arc::new(config),
            context: Vec::new(),
        }
    }

    /// The configuration every chain started here captures.
    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.config
    }

    /// Adds `name: value` to the failures of every chain started from the
    /// returned instance, replacing an earlier entry called `name`.
    ///
    /// ```
    /// use nebula_requirements::prelude::*;
    ///
    /// let requirements = Requirements::new().with_context("tenant", &7);
    /// let validator = requirements.validate_that("", "label").is_not_empty();
    ///
    /// assert_eq!(validator.messages(), ["label may not be empty.\ntenant: 7"]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or padded with whitespace.
    #[track_caller]
    #[must_use]
    pub fn with_context<C: fmt::Debug + ?Sized>(mut self, name: &str, value: &C) -> Self {
        precondition::require_name(name, "name");
        let entry = ContextEntry::new(name, self.config.render(value));
        match self.context.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => *existing = entry,
            None => self.context.push(entry),
        }
        self
    }

    /// Drops the entry called `name` from later chains.
    #[must_use]
    pub fn without_context(mut self, name: &str) -> Self {
        self.context.retain(|entry| entry.name != name);
        self
    }

    /// Context entries every chain started here begins with.
    pub fn context(&self) -> &[ContextEntry] {
        &self.context
    }

    #[track_caller]
    fn bind<T>(&self, value: T, name: &str) -> Binding<T> {
        let binding = Binding::new(name, value, Arc::clone(&self.config));
        for entry in &self.context {
            binding.set_context(entry.name.as_str(), entry.value.as_str());
        }
        binding
    }

    /// Starts a chain that collects failures.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or padded with whitespace.
    #[track_caller]
    pub fn validate_that<S: Subject>(&self, value: S, name: &str) -> S::Validator<Validating> {
        Validation::from_binding(self.bind(value.into_actual(), name))
    }

    /// Starts a chain whose first failure is returned as `Err`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or padded with whitespace.
    #[track_caller]
    pub fn require_that<S: Subject>(&self, value: S, name: &str) -> S::Validator<Throwing> {
        Validation::from_binding(self.bind(value.into_actual(), name))
    }

    /// Starts a collecting chain over any `Debug` value.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or padded with whitespace.
    #[track_caller]
    pub fn validate_object<T: fmt::Debug>(&self, value: T, name: &str) -> ObjectValidator<T> {
        Validation::from_binding(self.bind(value, name))
    }

    /// Starts a throwing chain over any `Debug` value.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or padded with whitespace.
    #[track_caller]
    pub fn require_object<T: fmt::Debug>(&self, value: T, name: &str) -> ObjectValidator<T, Throwing> {
        Validation::from_binding(self.bind(value, name))
    }

    /// Starts a collecting chain over an ordered value.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or padded with whitespace.
    #[track_caller]
    pub fn validate_comparable<T>(&self, value: T, name: &str) -> ComparableValidator<T>
    where
        T: PartialOrd + fmt::Debug,
    {
        Validation::from_binding(self.bind(value, name))
    }

    /// Starts a throwing chain over an ordered value.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or padded with whitespace.
    #[track_caller]
    pub fn require_comparable<T>(&self, value: T, name: &str) -> ComparableValidator<T, Throwing>
    where
        T: PartialOrd + fmt::Debug,
    {
        Validation::from_binding(self.bind(value, name))
    }
}

/// Starts a chain that collects failures, using the global configuration.
///
/// # Panics
///
/// Panics if `name` is empty or padded with whitespace.
#[track_caller]
pub fn validate_that<S: Subject>(value: S, name: &str) -> S::Validator<Validating> {
    Requirements::new().validate_that(value, name)
}

/// Starts a chain whose first failure is returned as `Err`, using the global
/// configuration.
///
/// # Panics
///
/// Panics if `name` is empty or padded with whitespace.
#[track_caller]
pub fn require_that<S: Subject>(value: S, name: &str) -> S::Validator<Throwing> {
    Requirements::new().require_that(value, name)
}

/// Collecting chain over any `Debug` value.
#[track_caller]
pub fn validate_object<T: fmt::Debug>(value: T, name: &str) -> ObjectValidator<T> {
    Requirements::new().validate_object(value, name)
}

/// Throwing chain over any `Debug` value.
#[track_caller]
pub fn require_object<T: fmt::Debug>(value: T, name: &str) -> ObjectValidator<T, Throwing> {
    Requirements::new().require_object(value, name)
}

/// Collecting chain over an ordered value.
#[track_caller]
pub fn validate_comparable<T: PartialOrd + fmt::Debug>(value: T, name: &str) -> ComparableValidator<T> {
    Requirements::new().validate_comparable(value, name)
}

/// Throwing chain over an ordered value.
#[track_caller]
pub fn require_comparable<T: PartialOrd + fmt::Debug>(
    value: T,
    name: &str,
) -> ComparableValidator<T, Throwing> {
    Requirements::new().require_comparable(value, name)
}
