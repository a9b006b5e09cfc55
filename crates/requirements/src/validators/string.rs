//! Strings
//!
//! String subjects are shown as raw text, not through `Debug`, so a
//! multi-line value diffs line by line instead of as one escaped literal.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::io;
use std::marker::PhantomData;
use std::net::{IpAddr, ToSocketAddrs};

use regex::Regex;

use crate::binding::Binding;
use crate::config::{Configuration, EqualityMethod};
use crate::diff::ContextGenerator;
use crate::error::{ContextEntry, Failure};
use crate::mode::{Mode, Validating};
use crate::pluralizer::Pluralizer;
use crate::precondition;
use crate::validation::Validation;
use crate::validators::{InetAddressValidator, SizeValidator};

/// Validates a string.
pub struct StringValidator<'a, M = Validating> {
    binding: Binding<Cow<'a, str>>,
    mode: PhantomData<M>,
}

impl_validation!(['a,] StringValidator['a,] => Cow<'a, str>);

fn equals_text(config: &Configuration, actual: &str, expected: &str) -> bool {
    match config.equality_method() {
        EqualityMethod::PartialEq => actual == expected,
        EqualityMethod::Rendered => config.render_text(actual) == config.render_text(expected),
    }
}

fn text_context(config: &Configuration, actual: &str, expected_name: &str, expected: &str) -> Vec<ContextEntry> {
    ContextGenerator::new(config)
        .actual("Actual", config.render_text(actual))
        .expected(expected_name, config.render_text(expected))
        .build()
}

fn trim(text: Cow<'_, str>) -> Cow<'_, str> {
    match text {
        Cow::Borrowed(text) => Cow::Borrowed(text.trim()),
        Cow::Owned(text) if text.trim().len() == text.len() => Cow::Owned(text),
        Cow::Owned(text) => Cow::Owned(text.trim().to_owned()),
    }
}

/// RFC 1123 host name syntax: dot-separated labels of ASCII letters, digits
/// and inner hyphens, with an optional trailing dot.
fn is_hostname(text: &str) -> bool {
    let host = text.strip_suffix('.').unwrap_or(text);
    !host.is_empty()
        && host.len() <= 253
        && host.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
}

/// Parses an IP literal, or resolves a host name to its first address.
fn resolve(text: &str) -> io::Result<IpAddr> {
    let literal = text
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(text);
    if let Ok(address) = literal.parse::<IpAddr>() {
        return Ok(address);
    }
    if !is_hostname(text) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "neither an IP address nor a host name",
        ));
    }
    tracing::trace!(host = text, "resolving host name");
    (text, 0)
        .to_socket_addrs()?
        .next()
        .map(|socket| socket.ip())
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "host name has no addresses"))
}

impl<'a, M: Mode> StringValidator<'a, M> {
    fn require(self, holds: impl FnOnce(&str) -> bool, requirement: impl FnOnce(&str) -> String) -> M::Out<Self> {
        self.binding.check(|name, actual, config| {
            (!holds(&**actual)).then(|| {
                Failure::invalid_argument(requirement(name)).with_context("Actual", config.render_text(actual))
            })
        });
        self.settle()
    }

    /// Requires `""`.
    pub fn is_empty(self) -> M::Out<Self> {
        self.require(str::is_empty, |name| format!("{name} must be empty."))
    }

    /// Requires at least one character.
    pub fn is_not_empty(self) -> M::Out<Self> {
        self.binding.check(|name, actual, _| {
            actual
                .is_empty()
                .then(|| Failure::invalid_argument(format!("{name} may not be empty.")))
        });
        self.settle()
    }

    /// Requires nothing but whitespace.
    pub fn is_blank(self) -> M::Out<Self> {
        self.require(|text| text.trim().is_empty(), |name| format!("{name} must be blank."))
    }

    /// Requires at least one non-whitespace character.
    pub fn is_not_blank(self) -> M::Out<Self> {
        self.require(|text| !text.trim().is_empty(), |name| format!("{name} may not be blank."))
    }

    /// Requires no leading or trailing whitespace.
    pub fn is_trimmed(self) -> M::Out<Self> {
        self.require(
            |text| text.trim() == text,
            |name| format!("{name} may not contain leading or trailing whitespace."),
        )
    }

    /// Requires no whitespace anywhere.
    pub fn does_not_contain_whitespace(self) -> M::Out<Self> {
        self.require(
            |text| !text.chars().any(char::is_whitespace),
            |name| format!("{name} may not contain whitespace."),
        )
    }

    /// Continues with the trimmed text as `NAME.trim()`.
    pub fn trim(self) -> M::Out<Self> {
        let binding = self.binding.rename_map(".trim()", trim);
        M::settle(Self::from_binding(binding))
    }

    /// Requires the text to start with `prefix`.
    pub fn starts_with(self, prefix: &str) -> M::Out<Self> {
        self.require(
            |text| text.starts_with(prefix),
            |name| format!("{name} must start with {prefix:?}."),
        )
    }

    /// Requires the text not to start with `prefix`.
    pub fn does_not_start_with(self, prefix: &str) -> M::Out<Self> {
        self.require(
            |text| !text.starts_with(prefix),
            |name| format!("{name} may not start with {prefix:?}."),
        )
    }

    /// Requires the text to end with `suffix`.
    pub fn ends_with(self, suffix: &str) -> M::Out<Self> {
        self.require(
            |text| text.ends_with(suffix),
            |name| format!("{name} must end with {suffix:?}."),
        )
    }

    /// Requires the text not to end with `suffix`.
    pub fn does_not_end_with(self, suffix: &str) -> M::Out<Self> {
        self.require(
            |text| !text.ends_with(suffix),
            |name| format!("{name} may not end with {suffix:?}."),
        )
    }

    /// Requires `needle` somewhere in the text.
    pub fn contains(self, needle: &str) -> M::Out<Self> {
        self.require(
            |text| text.contains(needle),
            |name| format!("{name} must contain {needle:?}."),
        )
    }

    /// Requires `needle` nowhere in the text.
    pub fn does_not_contain(self, needle: &str) -> M::Out<Self> {
        self.require(
            |text| !text.contains(needle),
            |name| format!("{name} may not contain {needle:?}."),
        )
    }

    /// Requires a match of `pattern` anywhere in the text. Anchor the
    /// pattern to match the whole text.
    pub fn matches(self, pattern: &Regex) -> M::Out<Self> {
        self.require(
            |text| pattern.is_match(text),
            |name| format!("{name} must match {}.", pattern.as_str()),
        )
    }

    /// Requires the text to equal `expected`, diffing line by line.
    pub fn is_equal_to(self, expected: impl AsRef<str>) -> M::Out<Self> {
        let expected = expected.as_ref();
        self.binding.check(|name, actual, config| {
            (!equals_text(config, actual, expected)).then(|| {
                Failure::invalid_argument(format!("{name} had an unexpected value."))
                    .with_entries(text_context(config, actual, "Expected", expected))
            })
        });
        self.settle()
    }

    /// Requires the text to equal the text called `expected_name`.
    ///
    /// # Panics
    ///
    /// Panics if `expected_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_equal_to_named(self, expected: impl AsRef<str>, expected_name: &str) -> M::Out<Self> {
        precondition::require_name(expected_name, "expected_name");
        let expected = expected.as_ref();
        self.binding.check(|name, actual, config| {
            (!equals_text(config, actual, expected)).then(|| {
                Failure::invalid_argument(format!("{name} must be equal to {expected_name}."))
                    .with_entries(text_context(config, actual, expected_name, expected))
            })
        });
        self.settle()
    }

    /// Requires the text to differ from `unwanted`.
    pub fn is_not_equal_to(self, unwanted: impl AsRef<str>) -> M::Out<Self> {
        let unwanted = unwanted.as_ref();
        self.binding.check(|name, actual, config| {
            equals_text(config, actual, unwanted).then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not be equal to {}.",
                    config.render_text(unwanted)
                ))
                .with_context("Actual", config.render_text(actual))
            })
        });
        self.settle()
    }

    /// Requires the text to differ from the text called `unwanted_name`.
    ///
    /// # Panics
    ///
    /// Panics if `unwanted_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_not_equal_to_named(self, unwanted: impl AsRef<str>, unwanted_name: &str) -> M::Out<Self> {
        precondition::require_name(unwanted_name, "unwanted_name");
        let unwanted = unwanted.as_ref();
        self.binding.check(|name, actual, config| {
            equals_text(config, actual, unwanted).then(|| {
                Failure::invalid_argument(format!("{name} may not be equal to {unwanted_name}."))
                    .with_context("Actual", config.render_text(actual))
            })
        });
        self.settle()
    }

    /// Validates the number of characters as `NAME.length()`.
    pub fn length(&self) -> M::Out<SizeValidator<M>> {
        let config = self.binding.config();
        let rendered = self.binding.actual().map(|text| config.render_text(text)).unwrap_or_default();
        let length = self.binding.derive_with(".length()", |text| text.chars().count());
        M::settle(SizeValidator::<M>::new(length, self.binding.name(), rendered, Pluralizer::Character))
    }

    /// Converts the text, recording `NAME {problem}.` with the parse error as
    /// cause when it fails. A failed conversion continues as a no-op.
    fn parse_as<U, E>(&self, parse: impl FnOnce(&str) -> Result<U, E>, problem: &str) -> Binding<U>
    where
        E: StdError + Send + Sync + 'static,
    {
        let name = self.binding.name();
        let parsed = self.binding.actual().and_then(|text| match parse(text) {
            Ok(value) => Some(value),
            Err(cause) => {
                let config = self.binding.config();
                self.binding.record(
                    Failure::invalid_argument(format!("{name} {problem}."))
                        .with_context("Actual", config.render_text(text))
                        .with_cause(cause),
                );
                None
            }
        });
        self.binding.derive(name, parsed)
    }

    /// Continues with the IP address the text names.
    ///
    /// IP literals are parsed directly. Anything else that looks like a host
    /// name is resolved through the system resolver, which may block.
    pub fn as_inet_address(&self) -> M::Out<InetAddressValidator<M>> {
        let address = self.parse_as(resolve, "must contain a valid IP address or hostname");
        M::settle(InetAddressValidator::<M>::from_binding(address))
    }
}

#[cfg(feature = "network")]
impl<M: Mode> StringValidator<'_, M> {
    /// Continues with the text parsed as a URL.
    pub fn as_url(&self) -> M::Out<crate::validators::UrlValidator<M>> {
        let url = self.parse_as(url::Url::parse, "is not a valid URL");
        M::settle(crate::validators::UrlValidator::<M>::from_binding(url))
    }

    /// Continues with the text parsed as a URI.
    pub fn as_uri(&self) -> M::Out<crate::validators::UriValidator<M>> {
        let uri = self.parse_as(|text| text.parse::<http::Uri>(), "is not a valid URI");
        M::settle(crate::validators::UriValidator::<M>::from_binding(uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::validate_that;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_raw_text_in_context() {
        let validator = validate_that("abc", "code").starts_with("x");

        assert_eq!(validator.messages(), ["code must start with \"x\".\nActual: abc"]);
    }

    #[test]
    fn test_trim_is_renamed() {
        let validator = validate_that("  ", "title").trim().is_not_empty();
        assert_eq!(validator.failures()[0].message(), "title.trim() may not be empty.");
    }

    #[test]
    fn test_trim_keeps_owned_text() {
        assert_eq!(trim(Cow::Owned(" x ".to_owned())), "x");
        assert_eq!(trim(Cow::Borrowed("y")), "y");
    }

    #[test]
    fn test_blank_and_whitespace() {
        let validator = validate_that(String::from("a b"), "slug")
            .is_not_blank()
            .is_trimmed()
            .does_not_contain_whitespace();

        assert_eq!(validator.failures()[0].message(), "slug may not contain whitespace.");
        assert_eq!(validator.failures().len(), 1);
    }

    #[test]
    fn test_matches() {
        let pattern = Regex::new(r"^[a-z]+$").unwrap();
        let validator = validate_that("Hello", "word").matches(&pattern);

        assert_eq!(validator.failures()[0].message(), "word must match ^[a-z]+$.");
    }

    #[test]
    fn test_multi_line_equality() {
        let validator = validate_that("first\nsecond", "text").is_equal_to("first\nsecnd");

        let names: Vec<_> = validator.failures()[0]
            .context()
            .iter()
            .map(|entry| entry.name.clone())
            .collect();
        assert_eq!(names, ["Actual@1", "Expected@1", "Actual@2", "Diff", "Expected@2"]);
    }

    #[test]
    fn test_length() {
        let validator = validate_that("héllo", "word");
        let _ = validator.length().is_less_than_or_equal_to(4);

        let failure = &validator.failures()[0];
        assert_eq!(failure.message(), "word may not contain more than 4 characters.");
        assert_eq!(failure.context_value("Actual"), Some("5"));
        assert_eq!(failure.context_value("word"), Some("héllo"));
    }

    #[test]
    fn test_hostname_syntax() {
        assert!(is_hostname("example.com"));
        assert!(is_hostname("localhost"));
        assert!(is_hostname("example.com."));
        assert!(!is_hostname("-bad.com"));
        assert!(!is_hostname("not a host"));
        assert!(!is_hostname(""));
    }

    #[test]
    fn test_inet_address_literal() {
        let address = validate_that("[::1]", "peer").as_inet_address().is_ip_v6();
        assert!(!address.has_failures());
    }

    #[test]
    fn test_invalid_inet_address_is_one_failure() {
        let address = validate_that("not an address", "peer").as_inet_address().is_ip_v4().is_loopback();

        let failures = address.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message(), "peer must contain a valid IP address or hostname.");
        assert!(failures[0].cause().is_some());
        assert!(address.is_no_op());
    }

    #[cfg(feature = "network")]
    #[test]
    fn test_throwing_invalid_url() {
        use crate::requirements::require_that;

        let error = require_that("::not a url::", "endpoint").as_url().err();
        assert_eq!(
            error.map(|e| e.failures()[0].message().to_owned()),
            Some("endpoint is not a valid URL.".to_owned())
        );
    }
}
