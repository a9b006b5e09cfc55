//! Immutable, copy-on-write configuration consulted by every chain
//!
//! A chain captures an `Arc<Configuration>` when it is bound, so replacing
//! the process-wide default never changes the messages of a chain that is
//! already running.
//!
//! ```
//! use nebula_requirements::Configuration;
//!
//! let quiet = Configuration::default()
//!     .to_builder()
//!     .diff_enabled(false)
//!     .string_converter::<u64>(|_| "<redacted>".to_owned())
//!     .build();
//!
//! assert!(!quiet.diff_enabled());
//! assert_eq!(quiet.render(&42_u64), "<redacted>");
//! assert!(Configuration::default().diff_enabled());
//! ```

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::error::RequirementError;

/// Renders a value of one declared type.
///
/// Converters receive the value as `&dyn Debug`; string subjects are handed
/// over as their raw text.
pub type StringConverter = Arc<dyn Fn(&dyn fmt::Debug) -> String + Send + Sync>;

/// Rewrites an error before a chain returns or reports it.
pub type ErrorTransformer = Arc<dyn Fn(RequirementError) -> RequirementError + Send + Sync>;

// ---------------------------------------------------------------------------
// Process-wide default (ArcSwap: lock-free reads, atomic replacement)
// ---------------------------------------------------------------------------

static GLOBAL_CONFIGURATION: LazyLock<ArcSwap<Configuration>> =
    LazyLock::new(|| ArcSwap::from_pointee(Configuration::default()));

// ============================================================================
// EQUALITY METHOD
// ============================================================================

/// How `is_equal_to` decides that two values are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EqualityMethod {
    /// `actual == expected`.
    #[default]
    PartialEq,
    /// The rendered representations are identical. `NaN` equals `NaN`, and
    /// identity-based `PartialEq` impls are bypassed.
    Rendered,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Settings shared by every validator of a chain.
#[derive(Clone)]
pub struct Configuration {
    converters: Arc<HashMap<&'static str, StringConverter>>,
    diff_enabled: bool,
    equality_method: EqualityMethod,
    error_transformer: Option<ErrorTransformer>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            converters: Arc::default(),
            diff_enabled: true,
            equality_method: EqualityMethod::default(),
            error_transformer: None,
        }
    }
}

impl Configuration {
    /// Starts from the built-in defaults.
    pub fn builder() -> ConfigurationBuilder {
        Self::default().to_builder()
    }

    /// Starts a builder from this configuration. `self` is left untouched.
    pub fn to_builder(&self) -> ConfigurationBuilder {
        ConfigurationBuilder {
            config: self.clone(),
        }
    }

    /// The process-wide default used by `validate_that` and `require_that`.
    pub fn global() -> Arc<Self> {
        GLOBAL_CONFIGURATION.load_full()
    }

    /// Replaces the process-wide default.
    ///
    /// Chains that are already bound keep the configuration they captured.
    pub fn set_global(config: Self) {
        GLOBAL_CONFIGURATION.store(Arc::new(config));
        tracing::debug!("global requirements configuration replaced");
    }

    /// Atomically derives a new process-wide default from the current one.
    ///
    /// `update` may run more than once under contention.
    pub fn update_global(update: impl Fn(ConfigurationBuilder) -> ConfigurationBuilder) {
        GLOBAL_CONFIGURATION.rcu(|current| Arc::new(update(current.to_builder()).build()));
        tracing::debug!("global requirements configuration updated");
    }

    /// Whether equality failures carry a diff.
    pub fn diff_enabled(&self) -> bool {
        self.diff_enabled
    }

    /// Strategy used by `is_equal_to` and `is_not_equal_to`.
    pub fn equality_method(&self) -> EqualityMethod {
        self.equality_method
    }

    /// Renders a value with the converter registered for `T`, falling back to
    /// its `Debug` representation.
    pub fn render<T: fmt::Debug + ?Sized>(&self, value: &T) -> String {
        match self.converters.get(type_key::<T>()) {
            Some(converter) => converter(&value),
            None => format!("{value:?}"),
        }
    }

    /// Renders text belonging to a string subject: raw, unless a converter is
    /// registered for `str`.
    pub fn render_text(&self, text: &str) -> String {
        match self.converters.get(type_key::<str>()) {
            Some(converter) => converter(&RawText(text)),
            None => text.to_owned(),
        }
    }

    /// Runs the configured error transformer, if any.
    pub fn transform(&self, error: RequirementError) -> RequirementError {
        match &self.error_transformer {
            Some(transform) => transform(error),
            None => error,
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut converters: Vec<_> = self.converters.keys().collect();
        converters.sort_unstable();
        f.debug_struct("Configuration")
            .field("converters", &converters)
            .field("diff_enabled", &self.diff_enabled)
            .field("equality_method", &self.equality_method)
            .field("error_transformer", &self.error_transformer.is_some())
            .finish()
    }
}

/// Converter lookup key: the type name with reference prefixes stripped, so
/// `&&str`, `&str` and `str` share one converter.
pub(crate) fn type_key<T: ?Sized>() -> &'static str {
    let mut name = type_name::<T>();
    while let Some(rest) = name.strip_prefix('&') {
        name = rest.trim_start_matches("mut ");
    }
    name
}

/// Hands raw text to a converter through `Debug`.
struct RawText<'a>(&'a str);

impl fmt::Debug for RawText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds a new [`Configuration`]; the source configuration is never mutated.
#[derive(Clone)]
#[must_use = "builder methods must be chained or built"]
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl ConfigurationBuilder {
    /// Overrides how values of type `T` are rendered in messages and context.
    pub fn string_converter<T: ?Sized>(
        mut self,
        converter: impl Fn(&dyn fmt::Debug) -> String + Send + Sync + 'static,
    ) -> Self {
        Arc::make_mut(&mut self.config.converters).insert(type_key::<T>(), Arc::new(converter));
        self
    }

    /// Restores the `Debug` rendering for `T`.
    pub fn remove_string_converter<T: ?Sized>(mut self) -> Self {
        Arc::make_mut(&mut self.config.converters).remove(type_key::<T>());
        self
    }

    /// Toggles the diff generator.
    pub fn diff_enabled(mut self, enabled: bool) -> Self {
        self.config.diff_enabled = enabled;
        self
    }

    /// Selects the equality strategy.
    pub fn equality_method(mut self, method: EqualityMethod) -> Self {
        self.config.equality_method = method;
        self
    }

    /// Installs an error transformer.
    pub fn error_transformer(
        mut self,
        transform: impl Fn(RequirementError) -> RequirementError + Send + Sync + 'static,
    ) -> Self {
        self.config.error_transformer = Some(Arc::new(transform));
        self
    }

    /// Removes the error transformer.
    pub fn clear_error_transformer(mut self) -> Self {
        self.config.error_transformer = None;
        self
    }

    /// Finishes the configuration.
    pub fn build(self) -> Configuration {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Failure;

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert!(config.diff_enabled());
        assert_eq!(config.equality_method(), EqualityMethod::PartialEq);
        assert_eq!(config.render(&vec![1, 2]), "[1, 2]");
        assert_eq!(config.render("text"), "\"text\"");
        assert_eq!(config.render_text("text"), "text");
    }

    #[test]
    fn test_builder_is_copy_on_write() {
        let original = Configuration::default();
        let updated = original
            .to_builder()
            .diff_enabled(false)
            .equality_method(EqualityMethod::Rendered)
            .build();

        assert!(original.diff_enabled());
        assert!(!updated.diff_enabled());
        assert_eq!(updated.equality_method(), EqualityMethod::Rendered);
    }

    #[test]
    fn test_converter_ignores_reference_depth() {
        let config = Configuration::builder()
            .string_converter::<i32>(|value| format!("<{value:?}>"))
            .build();

        assert_eq!(config.render(&7), "<7>");
        assert_eq!(config.render(&&7), "<7>");
        assert_eq!(config.render(&7_i64), "7");
    }

    #[test]
    fn test_text_converter_sees_raw_text() {
        let config = Configuration::builder()
            .string_converter::<str>(|value| format!("{value:?}").to_uppercase())
            .build();

        assert_eq!(config.render_text("shout"), "SHOUT");
    }

    #[test]
    fn test_remove_converter() {
        let with = Configuration::builder()
            .string_converter::<u8>(|_| "byte".to_owned())
            .build();
        let without = with.to_builder().remove_string_converter::<u8>().build();

        assert_eq!(with.render(&1_u8), "byte");
        assert_eq!(without.render(&1_u8), "1");
    }

    #[test]
    fn test_transform() {
        let config = Configuration::builder()
            .error_transformer(|error| {
                RequirementError::from(Failure::invalid_argument(format!("wrapped: {error}")))
            })
            .build();

        let error = config.transform(Failure::invalid_argument("x.").into());
        assert_eq!(error.to_string(), "wrapped: x.");

        let plain = config.to_builder().clear_error_transformer().build();
        assert_eq!(plain.transform(Failure::invalid_argument("x.").into()).to_string(), "x.");
    }

    #[test]
    fn test_type_key() {
        assert_eq!(type_key::<&&str>(), "str");
        assert_eq!(type_key::<&mut i32>(), "i32");
    }
}
