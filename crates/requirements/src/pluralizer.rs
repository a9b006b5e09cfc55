//! Singular/plural nouns for size messages

use std::fmt;

/// What a container holds, used to phrase size and element messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pluralizer {
    /// Characters of a string.
    Character,
    /// Elements of a collection or array.
    Element,
    /// Entries of a map.
    Entry,
    /// Keys of a map.
    Key,
    /// Values of a map.
    Value,
}

impl Pluralizer {
    /// Noun for `count` items: singular for exactly one, plural otherwise.
    ///
    /// Callers pass the threshold of a check, not the actual size, so that
    /// "must contain at least 1 element" reads correctly.
    pub fn name_of(self, count: usize) -> &'static str {
        let (singular, plural) = match self {
            Self::Character => ("character", "characters"),
            Self::Element => ("element", "elements"),
            Self::Entry => ("entry", "entries"),
            Self::Key => ("key", "keys"),
            Self::Value => ("value", "values"),
        };
        if count == 1 { singular } else { plural }
    }
}

impl fmt::Display for Pluralizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_of(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Pluralizer::Element, 0, "elements")]
    #[case(Pluralizer::Element, 1, "element")]
    #[case(Pluralizer::Element, 2, "elements")]
    #[case(Pluralizer::Entry, 1, "entry")]
    #[case(Pluralizer::Entry, 5, "entries")]
    #[case(Pluralizer::Character, 3, "characters")]
    #[case(Pluralizer::Key, 1, "key")]
    #[case(Pluralizer::Value, 2, "values")]
    fn test_name_of(#[case] pluralizer: Pluralizer, #[case] count: usize, #[case] expected: &str) {
        assert_eq!(pluralizer.name_of(count), expected);
    }
}
