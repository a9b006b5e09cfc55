//! The value a validator wraps, and the no-op state

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use crate::config::Configuration;
use crate::error::{ContextEntry, Failure};
use crate::precondition;
use crate::sink::FailureSink;

/// A named value bound to a configuration and a failure sink.
///
/// `actual` is `None` once the binding is a no-op: a missing value or a
/// failed conversion has already been reported, and every further check is
/// skipped so one root cause yields one failure.
///
/// Context entries attached to the binding are appended to every failure it
/// records, after the failure's own entries. Derived bindings start with a
/// copy of them.
pub struct Binding<T> {
    name: String,
    actual: Option<T>,
    config: Arc<Configuration>,
    failures: FailureSink,
    context: RefCell<Vec<ContextEntry>>,
}

impl<T> Binding<T> {
    /// Binds `actual` under `name` with a fresh sink.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or has leading or trailing whitespace.
    #[track_caller]
    pub fn new(name: impl Into<String>, actual: T, config: Arc<Configuration>) -> Self {
        let name = name.into();
        precondition::require_name(&name, "name");
        Self {
            name,
            actual: Some(actual),
            config,
            failures: FailureSink::new(),
            context: RefCell::default(),
        }
    }

    /// Name used in messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound value, `None` for a no-op.
    pub fn actual(&self) -> Option<&T> {
        self.actual.as_ref()
    }

    /// Consumes the binding, returning the value.
    pub fn into_actual(self) -> Option<T> {
        self.actual
    }

    /// Configuration captured when the chain was bound.
    pub fn config(&self) -> &Arc<Configuration> {
        &self.config
    }

    /// The sink shared by this chain.
    pub fn failures(&self) -> &FailureSink {
        &self.failures
    }

    /// Context entries appended to every failure of this binding.
    pub fn context(&self) -> Vec<ContextEntry> {
        self.context.borrow().clone()
    }

    /// Attaches `name: value`, replacing an entry with the same name.
    pub fn set_context(&self, name: impl Into<String>, value: impl Into<String>) {
        let entry = ContextEntry::new(name, value);
        let mut context = self.context.borrow_mut();
        match context.iter_mut().find(|existing| existing.name == entry.name) {
            Some(existing) => *existing = entry,
            None => context.push(entry),
        }
    }

    /// Detaches the entry called `name`, if any.
    pub fn remove_context(&self, name: &str) {
        self.context.borrow_mut().retain(|entry| entry.name != name);
    }

    /// Appends the binding's context to `failure`, skipping names the failure
    /// already carries.
    fn contextualize(&self, mut failure: Failure) -> Failure {
        for entry in self.context.borrow().iter() {
            if failure.context_value(&entry.name).is_none() {
                failure = failure.with_context(entry.name.as_str(), entry.value.as_str());
            }
        }
        failure
    }

    /// Returns `true` once every check on this binding is skipped.
    pub fn is_no_op(&self) -> bool {
        self.actual.is_none()
    }

    /// Runs `predicate` against the value, recording the failure it returns.
    ///
    /// Skipped entirely for a no-op.
    pub fn check(&self, predicate: impl FnOnce(&str, &T, &Configuration) -> Option<Failure>) {
        if let Some(actual) = &self.actual
            && let Some(failure) = predicate(&self.name, actual, &self.config)
        {
            self.record(failure);
        }
    }

    /// Records a failure without evaluating anything.
    pub fn record(&self, failure: Failure) {
        self.failures.record(self.contextualize(failure));
    }

    /// Records the failure that makes this binding unusable and turns it
    /// into a no-op.
    pub fn abandon(&mut self, failure: Failure) {
        self.record(failure);
        self.actual = None;
        tracing::trace!(name = %self.name, "binding is now a no-op");
    }

    /// A binding for a value derived from this one, sharing sink and
    /// configuration.
    pub fn derive<U>(&self, name: impl Into<String>, actual: Option<U>) -> Binding<U> {
        Binding {
            name: name.into(),
            actual,
            config: Arc::clone(&self.config),
            failures: self.failures.clone(),
            context: RefCell::new(self.context()),
        }
    }

    /// Derives `NAME{suffix}` from a view of the value; no-op stays no-op.
    pub fn derive_with<U>(&self, suffix: &str, derive: impl FnOnce(&T) -> U) -> Binding<U> {
        self.derive(format!("{}{suffix}", self.name), self.actual.as_ref().map(derive))
    }

    /// Replaces the value and appends `suffix` to the name in one step.
    pub fn rename_map<U>(self, suffix: &str, map: impl FnOnce(T) -> U) -> Binding<U> {
        Binding {
            name: format!("{}{suffix}", self.name),
            actual: self.actual.map(map),
            config: self.config,
            failures: self.failures,
            context: self.context,
        }
    }

    /// Replaces the value, keeping the name.
    pub fn map<U>(self, map: impl FnOnce(T) -> U) -> Binding<U> {
        Binding {
            name: self.name,
            actual: self.actual.map(map),
            config: self.config,
            failures: self.failures,
            context: self.context,
        }
    }

    /// Replaces the value with a fallible projection; `None` becomes a no-op.
    pub fn and_then<U>(self, map: impl FnOnce(T) -> Option<U>) -> Binding<U> {
        Binding {
            name: self.name,
            actual: self.actual.and_then(map),
            config: self.config,
            failures: self.failures,
            context: self.context,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("actual", &self.actual)
            .field("context", &self.context.borrow())
            .field("failures", &self.failures.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind<T>(actual: T) -> Binding<T> {
        Binding::new("value", actual, Arc::default())
    }

    #[test]
    fn test_check_records_failure() {
        let binding = bind(3);
        binding.check(|name, actual, _| {
            (*actual < 5).then(|| Failure::invalid_argument(format!("{name} is small.")))
        });

        assert_eq!(binding.failures().snapshot()[0].message(), "value is small.");
    }

    #[test]
    fn test_no_op_skips_checks() {
        let mut binding = bind(3);
        binding.abandon(Failure::null_value("value may not be null."));
        binding.check(|_, _, _| panic!("no-op bindings never evaluate"));

        assert!(binding.is_no_op());
        assert_eq!(binding.failures().len(), 1);
    }

    #[test]
    fn test_derived_binding_shares_sink() {
        let binding = bind("abc");
        let length = binding.derive_with(".length()", |text| text.len());

        assert_eq!(length.name(), "value.length()");
        assert_eq!(length.actual(), Some(&3));
        assert!(length.failures().shares_with(binding.failures()));
    }

    #[test]
    fn test_rename_map() {
        let trimmed = bind(" a ").rename_map(".trim()", str::trim);
        assert_eq!(trimmed.name(), "value.trim()");
        assert_eq!(trimmed.actual(), Some(&"a"));
    }

    #[test]
    fn test_context_is_appended_to_failures() {
        let binding = bind(3);
        binding.set_context("request", "42");
        binding.set_context("request", "43");
        binding.check(|_, _, _| Some(Failure::invalid_argument("small.").with_context("Actual", "3")));

        let failure = &binding.failures().snapshot()[0];
        let names: Vec<_> = failure.context().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Actual", "request"]);
        assert_eq!(failure.context_value("request"), Some("43"));
    }

    #[test]
    fn test_failure_entries_win_over_context() {
        let binding = bind(3);
        binding.set_context("Actual", "shadowed");
        binding.check(|_, _, _| Some(Failure::invalid_argument("small.").with_context("Actual", "3")));

        let failure = &binding.failures().snapshot()[0];
        assert_eq!(failure.context().len(), 1);
        assert_eq!(failure.context_value("Actual"), Some("3"));
    }

    #[test]
    fn test_derived_binding_copies_context() {
        let binding = bind("abc");
        binding.set_context("tenant", "acme");
        let length = binding.derive_with(".length()", |text| text.len());
        length.remove_context("tenant");

        assert!(length.context().is_empty());
        assert_eq!(binding.context().len(), 1);
    }

    #[test]
    #[should_panic(expected = "name may not be empty")]
    fn test_empty_name_panics() {
        let _ = Binding::new("", 1, Arc::default());
    }
}
