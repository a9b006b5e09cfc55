//! Failure records and the error surfaced by throwing chains
//!
//! A [`Failure`] describes one unmet requirement: what kind of violation it
//! was, a one-line message, ordered diagnostic context and an optional cause.
//! [`RequirementError`] is what callers see when failures are raised instead
//! of collected.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

/// Shared, type-erased cause attached to a failure.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

// ============================================================================
// FAILURE KIND
// ============================================================================

/// Category of a recorded failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailureKind {
    /// The value was present but did not satisfy the requirement.
    InvalidArgument,
    /// A value was required but absent.
    NullValue,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => f.write_str("invalid argument"),
            Self::NullValue => f.write_str("null value"),
        }
    }
}

// ============================================================================
// CONTEXT ENTRY
// ============================================================================

/// One `name: value` line of diagnostic context.
///
/// An entry with an empty name is rendered as its bare value; the diff
/// generator uses this for the `[...]` marker of collapsed lines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContextEntry {
    /// Label, e.g. `Actual`, `Expected@3`, `Minimum`.
    pub name: String,
    /// Rendered value.
    pub value: String,
}

impl ContextEntry {
    /// Creates a named entry.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates an unnamed entry, rendered without a `name: ` prefix.
    pub fn bare(value: impl Into<String>) -> Self {
        Self::new(String::new(), value)
    }
}

// ============================================================================
// FAILURE
// ============================================================================

/// A single unmet requirement.
///
/// Built once by a predicate with the `with_*` methods, then sealed into the
/// chain's failure sink.
///
/// # Examples
///
/// ```
/// use nebula_requirements::{Failure, FailureKind};
///
/// let failure = Failure::invalid_argument("age must be positive.")
///     .with_context("Actual", "-3");
///
/// assert_eq!(failure.kind(), FailureKind::InvalidArgument);
/// assert_eq!(failure.to_string(), "age must be positive.\nActual: -3");
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Failure {
    kind: FailureKind,
    message: String,
    context: SmallVec<[ContextEntry; 4]>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_cause"))]
    cause: Option<Cause>,
}

impl Failure {
    /// Creates a failure with no context.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "failure message may not be empty");
        Self {
            kind,
            message,
            context: SmallVec::new(),
            cause: None,
        }
    }

    /// Creates an [`FailureKind::InvalidArgument`] failure.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidArgument, message)
    }

    /// Creates a [`FailureKind::NullValue`] failure.
    pub fn null_value(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NullValue, message)
    }

    /// Appends a context entry.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_context(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push(ContextEntry::new(name, value));
        self
    }

    /// Appends several context entries in order.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_entries(mut self, entries: impl IntoIterator<Item = ContextEntry>) -> Self {
        self.context.extend(entries);
        self
    }

    /// Attaches the error that caused this failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_cause(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Failure category.
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The message line, without context.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Context entries in insertion order.
    pub fn context(&self) -> &[ContextEntry] {
        &self.context
    }

    /// Value of the first context entry with the given name.
    pub fn context_value(&self, name: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.as_str())
    }

    /// The wrapped cause, if the failure came from a conversion or I/O error.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("context", &self.context)
            .field("cause", &self.cause.as_ref().map(ToString::to_string))
            .finish()
    }
}

/// Renders the message, then one `Key: value` line per context entry.
///
/// Keys are left-aligned to the longest key of this failure. There is no
/// trailing newline.
impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        let width = self
            .context
            .iter()
            .map(|entry| entry.name.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &self.context {
            if entry.name.is_empty() {
                write!(f, "\n{}", entry.value)?;
            } else {
                write!(f, "\n{:<width$}: {}", entry.name, entry.value)?;
            }
        }
        Ok(())
    }
}

impl StdError for Failure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn StdError + 'static))
    }
}

#[cfg(feature = "serde")]
fn serialize_cause<S: serde::Serializer>(
    cause: &Option<Cause>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match cause {
        Some(cause) => serializer.serialize_some(&cause.to_string()),
        None => serializer.serialize_none(),
    }
}

// ============================================================================
// REQUIREMENT ERROR
// ============================================================================

/// Error returned by throwing chains and by the terminal operations of
/// validating chains.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum RequirementError {
    /// A single value-contract violation.
    #[error(transparent)]
    InvalidArgument(Failure),

    /// A required value was absent.
    #[error(transparent)]
    NullValue(Failure),

    /// More than one failure was pending when the chain was settled.
    #[error("{}", render_multiple(.0))]
    Multiple(Vec<Failure>),

    /// Error substituted by a configured error transformer.
    #[error(transparent)]
    Custom(Arc<dyn StdError + Send + Sync + 'static>),
}

impl RequirementError {
    /// Wraps pending failures: `None` when there are none, the matching
    /// single variant for one, [`Multiple`](Self::Multiple) otherwise.
    pub fn from_failures(mut failures: Vec<Failure>) -> Option<Self> {
        match failures.len() {
            0 => None,
            1 => failures.pop().map(Self::from),
            _ => Some(Self::Multiple(failures)),
        }
    }

    /// Wraps an arbitrary error, for use inside error transformers.
    pub fn custom(error: impl StdError + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(error))
    }

    /// The failures carried by this error. Empty for [`Custom`](Self::Custom).
    pub fn failures(&self) -> &[Failure] {
        match self {
            Self::InvalidArgument(failure) | Self::NullValue(failure) => {
                std::slice::from_ref(failure)
            }
            Self::Multiple(failures) => failures,
            Self::Custom(_) => &[],
        }
    }

    /// Kind of the single failure, `None` for composite or custom errors.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::InvalidArgument(_) => Some(FailureKind::InvalidArgument),
            Self::NullValue(_) => Some(FailureKind::NullValue),
            Self::Multiple(_) | Self::Custom(_) => None,
        }
    }
}

impl From<Failure> for RequirementError {
    fn from(failure: Failure) -> Self {
        match failure.kind() {
            FailureKind::InvalidArgument => Self::InvalidArgument(failure),
            FailureKind::NullValue => Self::NullValue(failure),
        }
    }
}

fn render_multiple(failures: &[Failure]) -> String {
    let mut out = format!("{} requirements failed:", failures.len());
    for failure in failures {
        out.push_str("\n\n");
        out.push_str(&failure.to_string());
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
