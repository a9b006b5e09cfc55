//! Maps, validated as a list of entries

use std::fmt;
use std::marker::PhantomData;

use crate::binding::Binding;
use crate::config::Configuration;
use crate::error::Failure;
use crate::mode::{Mode, Validating};
use crate::pluralizer::Pluralizer;
use crate::validation::{Validation, equals};
use crate::validators::{CollectionKind, ContainerKind, ContainerValidator, SizeValidator};

/// Validates a map.
///
/// Entries are kept in the map's iteration order. `C` is the kind of the
/// views: `keys()`, `values()` and `entries()` continue as container
/// validators of that kind on the same sink. Equality always compares
/// entries as a set.
pub struct MapValidator<K, V, C = CollectionKind, M = Validating> {
    binding: Binding<Vec<(K, V)>>,
    mode: PhantomData<(C, M)>,
}

impl_validation!([K, V, C,] MapValidator[K, V, C,] => Vec<(K, V)>);

/// Renders entries as `{k: v, ...}`.
struct Entries<'a, K, V>(&'a [(K, V)]);

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entries<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter().map(|(k, v)| (k, v))).finish()
    }
}

/// Renders entries in iteration order, or sorted by rendered key for
/// unordered kinds.
fn render_entries<C, K, V>(config: &Configuration, entries: &[(K, V)]) -> String
where
    C: ContainerKind,
    K: fmt::Debug,
    V: fmt::Debug,
{
    let mut pairs: Vec<(&K, &V)> = entries.iter().map(|(k, v)| (k, v)).collect();
    if !C::ORDERED {
        pairs.sort_by_cached_key(|(k, _)| config.render(*k));
    }
    config.render(&Entries(&pairs))
}

/// Entries of `from` without an equal entry in `among`.
fn absent_entries<'a, K1, V1, K2, V2>(
    config: &Configuration,
    from: &'a [(K1, V1)],
    among: &[(K2, V2)],
    matches: impl Fn(&Configuration, &(K1, V1), &(K2, V2)) -> bool,
) -> Vec<&'a (K1, V1)> {
    from.iter().filter(|a| !among.iter().any(|b| matches(config, a, b))).collect()
}

fn same_entry<K1, V1, K2, V2>(config: &Configuration, a: &(K1, V1), b: &(K2, V2)) -> bool
where
    K1: PartialEq<K2> + fmt::Debug,
    V1: PartialEq<V2> + fmt::Debug,
    K2: fmt::Debug,
    V2: fmt::Debug,
{
    equals(config, &a.0, &b.0) && equals(config, &a.1, &b.1)
}

impl<K, V, C, M> MapValidator<K, V, C, M>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: ContainerKind,
    M: Mode,
{
    /// Requires the same entries as `expected`, in any order.
    pub fn is_equal_to<I, K2, V2>(self, expected: I) -> M::Out<Self>
    where
        I: IntoIterator<Item = (K2, V2)>,
        K: PartialEq<K2>,
        V: PartialEq<V2>,
        K2: fmt::Debug,
        V2: fmt::Debug,
    {
        let expected: Vec<(K2, V2)> = expected.into_iter().collect();
        self.binding.check(|name, actual, config| {
            let missing = absent_entries(config, &expected, actual, |c, x, a| same_entry(c, a, x));
            let unwanted = absent_entries(config, actual, &expected, same_entry);
            if missing.is_empty() && unwanted.is_empty() && actual.len() == expected.len() {
                return None;
            }
            let missing: Vec<(&K2, &V2)> = missing.into_iter().map(|(k, v)| (k, v)).collect();
            let unwanted: Vec<(&K, &V)> = unwanted.into_iter().map(|(k, v)| (k, v)).collect();
            Some(
                Failure::invalid_argument(format!("{name} had an unexpected value."))
                    .with_context("Actual", render_entries::<C, _, _>(config, actual))
                    .with_context("Expected", render_entries::<C, _, _>(config, &expected))
                    .with_context("Missing", render_entries::<C, _, _>(config, &missing))
                    .with_context("Unwanted", render_entries::<C, _, _>(config, &unwanted)),
            )
        });
        self.settle()
    }

    /// Requires the entries to differ from `unwanted` as a set.
    pub fn is_not_equal_to<I, K2, V2>(self, unwanted: I) -> M::Out<Self>
    where
        I: IntoIterator<Item = (K2, V2)>,
        K: PartialEq<K2>,
        V: PartialEq<V2>,
        K2: fmt::Debug,
        V2: fmt::Debug,
    {
        let unwanted: Vec<(K2, V2)> = unwanted.into_iter().collect();
        self.binding.check(|name, actual, config| {
            let same = actual.len() == unwanted.len()
                && absent_entries(config, &unwanted, actual, |c, x, a| same_entry(c, a, x)).is_empty()
                && absent_entries(config, actual, &unwanted, same_entry).is_empty();
            same.then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not be equal to {}.",
                    render_entries::<C, _, _>(config, &unwanted)
                ))
                .with_context("Actual", render_entries::<C, _, _>(config, actual))
            })
        });
        self.settle()
    }

    /// Requires no entries.
    pub fn is_empty(self) -> M::Out<Self> {
        self.binding.check(|name, actual, config| {
            (!actual.is_empty()).then(|| {
                Failure::invalid_argument(format!("{name} must be empty."))
                    .with_context("Actual", render_entries::<C, _, _>(config, actual))
            })
        });
        self.settle()
    }

    /// Requires at least one entry.
    pub fn is_not_empty(self) -> M::Out<Self> {
        self.binding.check(|name, actual, _| {
            actual
                .is_empty()
                .then(|| Failure::invalid_argument(format!("{name} may not be empty.")))
        });
        self.settle()
    }

    /// Validates the keys as `NAME.keys()`.
    pub fn keys(&self) -> M::Out<ContainerValidator<K, C, M>>
    where
        K: Clone,
    {
        let keys = self.binding.derive_with(".keys()", |entries| {
            entries.iter().map(|(k, _)| k.clone()).collect()
        });
        M::settle(ContainerValidator::<K, C, M>::with_pluralizer(keys, Pluralizer::Key))
    }

    /// Validates the values as `NAME.values()`.
    pub fn values(&self) -> M::Out<ContainerValidator<V, C, M>>
    where
        V: Clone,
    {
        let values = self.binding.derive_with(".values()", |entries| {
            entries.iter().map(|(_, v)| v.clone()).collect()
        });
        M::settle(ContainerValidator::<V, C, M>::with_pluralizer(values, Pluralizer::Value))
    }

    /// Validates the `(key, value)` pairs as `NAME.entries()`.
    pub fn entries(&self) -> M::Out<ContainerValidator<(K, V), C, M>>
    where
        K: Clone,
        V: Clone,
    {
        let entries = self.binding.derive_with(".entries()", Clone::clone);
        M::settle(ContainerValidator::<(K, V), C, M>::with_pluralizer(entries, Pluralizer::Entry))
    }

    /// Validates the number of entries as `NAME.size()`.
    pub fn size(&self) -> M::Out<SizeValidator<M>> {
        let config = self.binding.config();
        let rendered = self
            .binding
            .actual()
            .map(|actual| render_entries::<C, _, _>(config, actual))
            .unwrap_or_default();
        let size = self.binding.derive_with(".size()", Vec::len);
        M::settle(SizeValidator::<M>::new(size, self.binding.name(), rendered, Pluralizer::Entry))
    }
}
