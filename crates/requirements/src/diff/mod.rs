//! Actual-vs-expected context for equality failures
//!
//! [`ContextGenerator`] turns two rendered values into ordered context
//! entries:
//!
//! - single-line values: `Actual`, then `Diff` when the lines differ, then
//!   `Expected`;
//! - multi-line values: numbered `Actual@N` / `Diff` / `Expected@N` rows,
//!   with long runs of identical interior lines collapsed into `[...]`;
//! - lists given through [`ContextGenerator::elements`]: indexed
//!   `Actual[i]` / `Diff` / `Expected[i]` rows, collapsed the same way.
//!
//! ```
//! use nebula_requirements::{Configuration, ContextGenerator};
//!
//! let config = Configuration::default();
//! let entries = ContextGenerator::new(&config)
//!     .actual("Actual", "cat")
//!     .expected("Expected", "cut")
//!     .build();
//!
//! let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
//! assert_eq!(names, ["Actual", "Diff", "Expected"]);
//! ```

mod lines;

use std::any::type_name;

use crate::config::Configuration;
use crate::error::ContextEntry;

use self::lines::{DiffRow, diff_chars, diff_lines, diff_rows};

/// Value of the entry that replaces a run of collapsed lines.
pub const SKIP_MARKER: &str = "[...]";

/// Shortest run of identical interior rows that gets collapsed.
const MIN_COLLAPSED_LINES: usize = 3;

/// Distinguishes values whose renderings are identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    type_name: &'static str,
    address: String,
}

impl Identity {
    /// Captures the static type and storage address of `value`.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self {
            type_name: type_name::<T>(),
            address: format!("{value:p}"),
        }
    }
}

/// Builds the context of an equality failure.
#[derive(Debug)]
#[must_use = "builder methods must be chained or built"]
pub struct ContextGenerator<'c> {
    config: &'c Configuration,
    actual_name: String,
    actual: String,
    expected_name: String,
    expected: String,
    diffable: bool,
    identities: Option<(Identity, Identity)>,
    elements: Option<(Vec<String>, Vec<String>)>,
}

impl<'c> ContextGenerator<'c> {
    /// Starts an empty generator.
    pub fn new(config: &'c Configuration) -> Self {
        Self {
            config,
            actual_name: "Actual".to_owned(),
            actual: String::new(),
            expected_name: "Expected".to_owned(),
            expected: String::new(),
            diffable: true,
            identities: None,
            elements: None,
        }
    }

    /// The rendered actual value.
    pub fn actual(mut self, name: impl Into<String>, rendered: impl Into<String>) -> Self {
        self.actual_name = name.into();
        self.actual = rendered.into();
        self
    }

    /// The rendered expected value.
    pub fn expected(mut self, name: impl Into<String>, rendered: impl Into<String>) -> Self {
        self.expected_name = name.into();
        self.expected = rendered.into();
        self
    }

    /// Disables the diff for this pair. Booleans are never diffed.
    pub fn diffable(mut self, diffable: bool) -> Self {
        self.diffable = diffable;
        self
    }

    /// Identities reported when both renderings are identical.
    pub fn identities(mut self, actual: Identity, expected: Identity) -> Self {
        self.identities = Some((actual, expected));
        self
    }

    /// Per-element renderings of two lists. The lists are then aligned
    /// element by element rather than as one line of text.
    pub fn elements(mut self, actual: Vec<String>, expected: Vec<String>) -> Self {
        self.elements = Some((actual, expected));
        self
    }

    /// Produces the context entries.
    pub fn build(self) -> Vec<ContextEntry> {
        let mut entries = Vec::new();
        if !self.diffable || !self.config.diff_enabled() || self.actual == self.expected {
            entries.push(ContextEntry::new(&self.actual_name, &self.actual));
            entries.push(ContextEntry::new(&self.expected_name, &self.expected));
        } else if let Some((actual, expected)) = &self.elements {
            let actual: Vec<&str> = actual.iter().map(String::as_str).collect();
            let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
            let rows = diff_rows(&actual, &expected);
            self.aligned(&mut entries, &rows, |name, index| format!("{name}[{index}]"), 0);
        } else if !self.actual.contains('\n') && !self.expected.contains('\n') {
            self.single_line(&mut entries);
        } else {
            let rows = diff_lines(&self.actual, &self.expected);
            self.aligned(&mut entries, &rows, |name, line| format!("{name}@{line}"), 1);
        }

        if self.actual == self.expected
            && let Some((actual, expected)) = &self.identities
        {
            if actual.type_name != expected.type_name {
                entries.push(ContextEntry::new(format!("{}.type", self.actual_name), actual.type_name));
                entries.push(ContextEntry::new(
                    format!("{}.type", self.expected_name),
                    expected.type_name,
                ));
            } else if actual.address != expected.address {
                entries.push(ContextEntry::new(
                    format!("{}.address", self.actual_name),
                    &actual.address,
                ));
                entries.push(ContextEntry::new(
                    format!("{}.address", self.expected_name),
                    &expected.address,
                ));
            }
        }
        entries
    }

    fn single_line(&self, entries: &mut Vec<ContextEntry>) {
        let row = diff_chars(&self.actual, &self.expected);
        entries.push(ContextEntry::new(&self.actual_name, row.actual.unwrap_or_default()));
        if let Some(diff) = row.diff {
            entries.push(ContextEntry::new("Diff", diff));
        }
        entries.push(ContextEntry::new(&self.expected_name, row.expected.unwrap_or_default()));
    }

    /// Emits aligned rows labelled by `label(name, position)`, counting
    /// positions from `first` on each side.
    fn aligned(
        &self,
        entries: &mut Vec<ContextEntry>,
        rows: &[DiffRow],
        label: fn(&str, usize) -> String,
        first: usize,
    ) {
        let last = rows.len().saturating_sub(1);
        let mut actual_position = first;
        let mut expected_position = first;

        let mut index = 0;
        while index < rows.len() {
            let row = &rows[index];
            if row.is_equal() && index != 0 && index != last {
                let run = rows[index..last].iter().take_while(|r| r.is_equal()).count();
                if run >= MIN_COLLAPSED_LINES {
                    actual_position += run;
                    expected_position += run;
                    entries.push(ContextEntry::bare(SKIP_MARKER));
                    index += run;
                    continue;
                }
            }

            match &row.actual {
                Some(value) => {
                    entries.push(ContextEntry::new(label(&self.actual_name, actual_position), value));
                    actual_position += 1;
                }
                None => entries.push(ContextEntry::new(&self.actual_name, "")),
            }
            if let Some(diff) = &row.diff {
                entries.push(ContextEntry::new("Diff", diff));
            }
            match &row.expected {
                Some(value) => {
                    entries.push(ContextEntry::new(label(&self.expected_name, expected_position), value));
                    expected_position += 1;
                }
                None => entries.push(ContextEntry::new(&self.expected_name, "")),
            }
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(entries: &[ContextEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_single_line_diff() {
        let config = Configuration::default();
        let entries = ContextGenerator::new(&config)
            .actual("Actual", "5")
            .expected("Expected", "6")
            .build();

        assert_eq!(names(&entries), ["Actual", "Diff", "Expected"]);
        assert_eq!(entries[1].value, "-+");
    }

    #[test]
    fn test_diff_disabled() {
        let config = Configuration::builder().diff_enabled(false).build();
        let entries = ContextGenerator::new(&config)
            .actual("Actual", "5")
            .expected("Expected", "6")
            .build();

        assert_eq!(
            entries,
            [ContextEntry::new("Actual", "5"), ContextEntry::new("Expected", "6")]
        );
    }

    #[test]
    fn test_booleans_are_not_diffed() {
        let config = Configuration::default();
        let entries = ContextGenerator::new(&config)
            .actual("Actual", "true")
            .expected("Expected", "false")
            .diffable(false)
            .build();

        assert_eq!(names(&entries), ["Actual", "Expected"]);
    }

    #[test]
    fn test_collapses_identical_interior_lines() {
        let actual: Vec<String> = (1..=10).map(|i| format!("line {i}")).collect();
        let mut expected = actual.clone();
        expected[0] = "first".to_owned();
        expected[9] = "last".to_owned();

        let config = Configuration::default();
        let entries = ContextGenerator::new(&config)
            .actual("Actual", actual.join("\n"))
            .expected("Expected", expected.join("\n"))
            .build();

        assert_eq!(
            names(&entries),
            [
                "Actual@1", "Diff", "Expected@1", "", "Actual@10", "Diff", "Expected@10"
            ]
        );
        assert_eq!(entries[3].value, SKIP_MARKER);
    }

    #[test]
    fn test_short_runs_are_kept() {
        let config = Configuration::default();
        let entries = ContextGenerator::new(&config)
            .actual("Actual", "a\nsame\nsame\nz")
            .expected("Expected", "b\nsame\nsame\ny")
            .build();

        assert!(entries.iter().all(|e| e.value != SKIP_MARKER));
        assert!(names(&entries).contains(&"Actual@3"));
    }

    #[test]
    fn test_padding_lines_are_unnumbered() {
        let config = Configuration::default();
        let entries = ContextGenerator::new(&config)
            .actual("Actual", "a\nb")
            .expected("Expected", "a\nb\nc")
            .build();

        assert_eq!(
            names(&entries),
            ["Actual@1", "Expected@1", "Actual@2", "Expected@2", "Actual", "Diff", "Expected@3"]
        );
    }

    #[test]
    fn test_lists_are_aligned_per_element() {
        let actual: Vec<String> = (0..8).map(|i| i.to_string()).collect();
        let mut expected = actual.clone();
        expected.remove(6);

        let config = Configuration::default();
        let entries = ContextGenerator::new(&config)
            .actual("Actual", format!("{actual:?}"))
            .expected("Expected", format!("{expected:?}"))
            .elements(actual, expected)
            .build();

        assert_eq!(
            names(&entries),
            ["Actual[0]", "Expected[0]", "", "Actual[6]", "Diff", "Expected", "Actual[7]", "Expected[6]"]
        );
        assert_eq!(entries[2].value, SKIP_MARKER);
    }

    #[test]
    fn test_equal_lists_skip_the_element_view() {
        let config = Configuration::default();
        let entries = ContextGenerator::new(&config)
            .actual("Actual", "[1]")
            .expected("Expected", "[1]")
            .elements(vec!["1".to_owned()], vec!["1".to_owned()])
            .build();

        assert_eq!(names(&entries), ["Actual", "Expected"]);
    }

    #[test]
    fn test_identity_escalation_on_type() {
        let config = Configuration::default();
        let entries = ContextGenerator::new(&config)
            .actual("Actual", "1")
            .expected("Expected", "1")
            .identities(Identity::of(&1_u8), Identity::of(&1_i64))
            .build();

        assert_eq!(
            names(&entries),
            ["Actual", "Expected", "Actual.type", "Expected.type"]
        );
        assert_eq!(entries[2].value, "u8");
    }

    #[test]
    fn test_identity_escalation_on_address() {
        let a = String::from("x");
        let b = String::from("x");
        let config = Configuration::default();
        let entries = ContextGenerator::new(&config)
            .actual("Actual", "x")
            .expected("Expected", "x")
            .identities(Identity::of(&a), Identity::of(&b))
            .build();

        assert_eq!(
            names(&entries),
            ["Actual", "Expected", "Actual.address", "Expected.address"]
        );
    }
}
