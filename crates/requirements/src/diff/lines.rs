//! Line-aligned text diff with per-character markers

use similar::{Algorithm, DiffOp, capture_diff_slices};

/// Fills the column of a character that exists only on the other side.
const PADDING: char = ' ';

const DELETED: char = '-';
const INSERTED: char = '+';
const UNCHANGED: char = ' ';

/// One aligned row of a line diff.
///
/// `None` on a side means the row only exists on the other side. `diff` is
/// `None` exactly when both sides are present and identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiffRow {
    pub(crate) actual: Option<String>,
    pub(crate) diff: Option<String>,
    pub(crate) expected: Option<String>,
}

impl DiffRow {
    fn equal(line: &str) -> Self {
        Self {
            actual: Some(line.to_owned()),
            diff: None,
            expected: Some(line.to_owned()),
        }
    }

    fn deleted(line: &str) -> Self {
        Self {
            actual: Some(line.to_owned()),
            diff: Some(repeat(DELETED, line)),
            expected: None,
        }
    }

    fn inserted(line: &str) -> Self {
        Self {
            actual: None,
            diff: Some(repeat(INSERTED, line)),
            expected: Some(line.to_owned()),
        }
    }

    pub(crate) fn is_equal(&self) -> bool {
        self.diff.is_none()
    }
}

fn repeat(marker: char, line: &str) -> String {
    std::iter::repeat_n(marker, line.chars().count()).collect()
}

/// Aligns the lines of two texts.
///
/// Substituted line pairs get a character-level diff; surplus lines of an
/// uneven substitution are reported as pure deletions or insertions.
pub(crate) fn diff_lines(actual: &str, expected: &str) -> Vec<DiffRow> {
    let old: Vec<&str> = actual.split('\n').collect();
    let new: Vec<&str> = expected.split('\n').collect();
    diff_rows(&old, &new)
}

/// Aligns two sequences of rendered items, lines or list elements.
pub(crate) fn diff_rows(old: &[&str], new: &[&str]) -> Vec<DiffRow> {
    let mut rows = Vec::with_capacity(old.len().max(new.len()));
    let mut ops = capture_diff_slices(Algorithm::Myers, old, new).into_iter().peekable();
    while let Some(op) = ops.next() {
        // A deletion directly followed by an insertion is a substitution.
        let op = match (op, ops.peek()) {
            (
                DiffOp::Delete {
                    old_index, old_len, ..
                },
                Some(&DiffOp::Insert {
                    new_index, new_len, ..
                }),
            ) => {
                ops.next();
                DiffOp::Replace {
                    old_index,
                    old_len,
                    new_index,
                    new_len,
                }
            }
            (op, _) => op,
        };
        match op {
            DiffOp::Equal { old_index, len, .. } => {
                rows.extend(old[old_index..old_index + len].iter().map(|line| DiffRow::equal(line)));
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                rows.extend(
                    old[old_index..old_index + old_len]
                        .iter()
                        .map(|line| DiffRow::deleted(line)),
                );
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                rows.extend(
                    new[new_index..new_index + new_len]
                        .iter()
                        .map(|line| DiffRow::inserted(line)),
                );
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                let removed = &old[old_index..old_index + old_len];
                let added = &new[new_index..new_index + new_len];
                for offset in 0..old_len.max(new_len) {
                    let row = match (removed.get(offset), added.get(offset)) {
                        (Some(a), Some(e)) => diff_chars(a, e),
                        (Some(a), None) => DiffRow::deleted(a),
                        (None, Some(e)) => DiffRow::inserted(e),
                        (None, None) => unreachable!("offset is below the longer side"),
                    };
                    rows.push(row);
                }
            }
        }
    }
    rows
}

/// Character-level diff of one line pair.
///
/// Both sides are padded so that every column of the marker line lines up
/// with the character it describes.
pub(crate) fn diff_chars(actual: &str, expected: &str) -> DiffRow {
    if actual == expected {
        return DiffRow::equal(actual);
    }

    let old: Vec<char> = actual.chars().collect();
    let new: Vec<char> = expected.chars().collect();

    let mut actual_row = String::with_capacity(actual.len());
    let mut marker_row = String::with_capacity(actual.len().max(expected.len()));
    let mut expected_row = String::with_capacity(expected.len());
    for op in capture_diff_slices(Algorithm::Myers, &old, &new) {
        let (deleted, inserted, kept): (&[char], &[char], &[char]) = match op {
            DiffOp::Equal { old_index, len, .. } => (&[], &[], &old[old_index..old_index + len]),
            DiffOp::Delete {
                old_index, old_len, ..
            } => (&old[old_index..old_index + old_len], &[], &[]),
            DiffOp::Insert {
                new_index, new_len, ..
            } => (&[], &new[new_index..new_index + new_len], &[]),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => (
                &old[old_index..old_index + old_len],
                &new[new_index..new_index + new_len],
                &[],
            ),
        };
        for &c in deleted {
            actual_row.push(c);
            marker_row.push(DELETED);
            expected_row.push(PADDING);
        }
        for &c in inserted {
            actual_row.push(PADDING);
            marker_row.push(INSERTED);
            expected_row.push(c);
        }
        for &c in kept {
            actual_row.push(c);
            marker_row.push(UNCHANGED);
            expected_row.push(c);
        }
    }

    DiffRow {
        actual: Some(actual_row),
        diff: Some(marker_row),
        expected: Some(expected_row),
    }
}
