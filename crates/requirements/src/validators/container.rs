//! Collections and arrays
//!
//! All containers share one engine over `Vec<E>`. The kind marker decides
//! whether the size is called `size()` or `length()`, which representation
//! switch is available, and whether element order is significant.
//!
//! Unordered kinds (hash sets and hash map views) compare as multisets and
//! render their elements sorted by rendering, so messages do not depend on
//! hashing order.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::binding::Binding;
use crate::config::Configuration;
use crate::diff::{ContextGenerator, Identity};
use crate::error::{ContextEntry, Failure};
use crate::mode::{Mode, Validating};
use crate::pluralizer::Pluralizer;
use crate::precondition;
use crate::validation::{Validation, equals};
use crate::validators::SizeValidator;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::CollectionKind {}
    impl Sealed for super::UnorderedKind {}
    impl Sealed for super::ArrayKind {}
}

/// Kind of a container: decides naming and whether order is significant.
pub trait ContainerKind: sealed::Sealed {
    /// `true` if two containers with the same elements in a different order
    /// differ.
    const ORDERED: bool;
}

/// Marker for ordered collections (`Vec`, `VecDeque`, `BTreeSet`, views of a
/// `BTreeMap`).
#[derive(Debug)]
pub enum CollectionKind {}

/// Marker for collections without a defined order (`HashSet`, views of a
/// `HashMap`).
#[derive(Debug)]
pub enum UnorderedKind {}

/// Marker for arrays and slices.
#[derive(Debug)]
pub enum ArrayKind {}

impl ContainerKind for CollectionKind {
    const ORDERED: bool = true;
}

impl ContainerKind for UnorderedKind {
    const ORDERED: bool = false;
}

impl ContainerKind for ArrayKind {
    const ORDERED: bool = true;
}

/// Validates the elements of a collection or array.
pub struct ContainerValidator<E, K, M = Validating> {
    binding: Binding<Vec<E>>,
    pluralizer: Pluralizer,
    marker: PhantomData<(K, M)>,
}

/// Validator for collections.
pub type CollectionValidator<E, M = Validating> = ContainerValidator<E, CollectionKind, M>;

/// Validator for collections without a defined order.
pub type UnorderedCollectionValidator<E, M = Validating> = ContainerValidator<E, UnorderedKind, M>;

/// Validator for arrays and slices.
pub type ArrayValidator<E, M = Validating> = ContainerValidator<E, ArrayKind, M>;

impl<E, K, M> ContainerValidator<E, K, M> {
    pub(crate) fn with_pluralizer(binding: Binding<Vec<E>>, pluralizer: Pluralizer) -> Self {
        Self {
            binding,
            pluralizer,
            marker: PhantomData,
        }
    }

    fn rekind<K2, M2>(self) -> ContainerValidator<E, K2, M2> {
        ContainerValidator::with_pluralizer(self.binding, self.pluralizer)
    }
}

impl<E: fmt::Debug, K, M> fmt::Debug for ContainerValidator<E, K, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContainerValidator").field(&self.binding).finish()
    }
}

impl<E, K, M: Mode> Validation for ContainerValidator<E, K, M> {
    type Value = Vec<E>;
    type Mode = M;
    type Collecting = ContainerValidator<E, K, Validating>;

    fn binding(&self) -> &Binding<Vec<E>> {
        &self.binding
    }

    fn into_binding(self) -> Binding<Vec<E>> {
        self.binding
    }

    fn from_binding(binding: Binding<Vec<E>>) -> Self {
        Self::with_pluralizer(binding, Pluralizer::Element)
    }

    fn into_collecting(self) -> Self::Collecting {
        self.rekind()
    }

    fn from_collecting(collecting: Self::Collecting) -> Self {
        collecting.rekind()
    }
}

/// Elements of `from` that equal no element of `among`, in order.
fn absent<'a, A, B>(from: &'a [A], among: &[B], matches: impl Fn(&A, &B) -> bool) -> Vec<&'a A> {
    from.iter().filter(|a| !among.iter().any(|b| matches(a, b))).collect()
}

/// Renders every element on its own, sorted for unordered kinds.
fn rendered_elements<K: ContainerKind, T: fmt::Debug>(
    config: &Configuration,
    elements: &[T],
) -> Vec<String> {
    let mut rendered: Vec<String> = elements.iter().map(|e| config.render(e)).collect();
    if !K::ORDERED {
        rendered.sort();
    }
    rendered
}

/// Renders a list of elements. Unordered kinds render as a sorted set.
#[allow(clippy::ptr_arg)]
fn render_list<K: ContainerKind, T: fmt::Debug>(
    config: &Configuration,
    list: &Vec<T>,
) -> String {
    if K::ORDERED {
        config.render(list)
    } else {
        format!("{{{}}}", rendered_elements::<K, T>(config, list).join(", "))
    }
}

/// Returns `true` if both lists hold equal elements, position by position for
/// ordered kinds and as multisets otherwise.
fn same_elements<A, B>(config: &Configuration, actual: &[A], expected: &[B], ordered: bool) -> bool
where
    A: PartialEq<B> + fmt::Debug,
    B: fmt::Debug,
{
    if actual.len() != expected.len() {
        return false;
    }
    if ordered {
        return actual.iter().zip(expected).all(|(a, b)| equals(config, a, b));
    }
    let mut used = vec![false; expected.len()];
    actual.iter().all(|a| {
        let found = (0..expected.len()).find(|&index| !used[index] && equals(config, a, &expected[index]));
        match found {
            Some(index) => {
                used[index] = true;
                true
            }
            None => false,
        }
    })
}

/// Context of a failed list equality: an element-wise diff of both lists.
#[allow(clippy::ptr_arg)]
fn list_equality_context<K, A, B>(
    config: &Configuration,
    actual: &Vec<A>,
    expected_name: &str,
    expected: &Vec<B>,
) -> Vec<ContextEntry>
where
    K: ContainerKind,
    A: fmt::Debug,
    B: fmt::Debug,
{
    ContextGenerator::new(config)
        .actual("Actual", render_list::<K, A>(config, actual))
        .expected(expected_name, render_list::<K, B>(config, expected))
        .elements(
            rendered_elements::<K, A>(config, actual),
            rendered_elements::<K, B>(config, expected),
        )
        .identities(Identity::of(actual), Identity::of(expected))
        .build()
}

impl<E, K, M> ContainerValidator<E, K, M>
where
    E: fmt::Debug,
    K: ContainerKind,
    M: Mode,
{
    /// Requires the same elements as `expected`. Order matters unless the
    /// container is unordered.
    pub fn is_equal_to<I>(self, expected: I) -> M::Out<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Debug,
        E: PartialEq<I::Item>,
    {
        let expected: Vec<I::Item> = expected.into_iter().collect();
        self.binding.check(|name, actual, config| {
            (!same_elements(config, actual, &expected, K::ORDERED)).then(|| {
                Failure::invalid_argument(format!("{name} had an unexpected value."))
                    .with_entries(list_equality_context::<K, _, _>(config, actual, "Expected", &expected))
            })
        });
        self.settle()
    }

    /// Requires the same elements as the list called `expected_name`.
    ///
    /// # Panics
    ///
    /// Panics if `expected_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_equal_to_named<I>(self, expected: I, expected_name: &str) -> M::Out<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Debug,
        E: PartialEq<I::Item>,
    {
        precondition::require_name(expected_name, "expected_name");
        let expected: Vec<I::Item> = expected.into_iter().collect();
        self.binding.check(|name, actual, config| {
            (!same_elements(config, actual, &expected, K::ORDERED)).then(|| {
                Failure::invalid_argument(format!("{name} must be equal to {expected_name}."))
                    .with_entries(list_equality_context::<K, _, _>(
                        config,
                        actual,
                        expected_name,
                        &expected,
                    ))
            })
        });
        self.settle()
    }

    /// Requires the elements to differ from `unwanted`.
    pub fn is_not_equal_to<I>(self, unwanted: I) -> M::Out<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Debug,
        E: PartialEq<I::Item>,
    {
        let unwanted: Vec<I::Item> = unwanted.into_iter().collect();
        self.binding.check(|name, actual, config| {
            same_elements(config, actual, &unwanted, K::ORDERED).then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not be equal to {}.",
                    render_list::<K, _>(config, &unwanted)
                ))
                .with_context("Actual", render_list::<K, _>(config, actual))
            })
        });
        self.settle()
    }

    /// Requires the elements to differ from the list called `unwanted_name`.
    ///
    /// # Panics
    ///
    /// Panics if `unwanted_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_not_equal_to_named<I>(self, unwanted: I, unwanted_name: &str) -> M::Out<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Debug,
        E: PartialEq<I::Item>,
    {
        precondition::require_name(unwanted_name, "unwanted_name");
        let unwanted: Vec<I::Item> = unwanted.into_iter().collect();
        self.binding.check(|name, actual, config| {
            same_elements(config, actual, &unwanted, K::ORDERED).then(|| {
                Failure::invalid_argument(format!("{name} may not be equal to {unwanted_name}."))
                    .with_context("Actual", render_list::<K, _>(config, actual))
            })
        });
        self.settle()
    }

    /// Requires no elements.
    pub fn is_empty(self) -> M::Out<Self> {
        self.binding.check(|name, actual, config| {
            (!actual.is_empty()).then(|| {
                Failure::invalid_argument(format!("{name} must be empty."))
                    .with_context("Actual", render_list::<K, _>(config, actual))
            })
        });
        self.settle()
    }

    /// Requires at least one element.
    pub fn is_not_empty(self) -> M::Out<Self> {
        self.binding.check(|name, actual, _| {
            actual
                .is_empty()
                .then(|| Failure::invalid_argument(format!("{name} may not be empty.")))
        });
        self.settle()
    }

    /// Requires an element equal to `element`.
    pub fn contains<Q>(self, element: Q) -> M::Out<Self>
    where
        E: PartialEq<Q>,
        Q: fmt::Debug,
    {
        self.binding.check(|name, actual, config| {
            (!actual.iter().any(|e| equals(config, e, &element))).then(|| {
                Failure::invalid_argument(format!("{name} must contain {}.", config.render(&element)))
                    .with_context("Actual", render_list::<K, _>(config, actual))
            })
        });
        self.settle()
    }

    /// Requires no element equal to `element`.
    pub fn does_not_contain<Q>(self, element: Q) -> M::Out<Self>
    where
        E: PartialEq<Q>,
        Q: fmt::Debug,
    {
        self.binding.check(|name, actual, config| {
            actual.iter().any(|e| equals(config, e, &element)).then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not contain {}.",
                    config.render(&element)
                ))
                .with_context("Actual", render_list::<K, _>(config, actual))
            })
        });
        self.settle()
    }

    /// Requires the same elements as `expected`, in any order.
    pub fn contains_exactly<I>(self, expected: I) -> M::Out<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Debug,
        E: PartialEq<I::Item>,
    {
        let expected: Vec<I::Item> = expected.into_iter().collect();
        self.binding.check(|name, actual, config| {
            let missing = absent(&expected, actual, |x, a| equals(config, a, x));
            let unwanted = absent(actual, &expected, |a, x| equals(config, a, x));
            if missing.is_empty() && unwanted.is_empty() {
                return None;
            }
            Some(
                Failure::invalid_argument(format!(
                    "{name} must consist of the same elements as {}.",
                    config.render(&expected)
                ))
                .with_context("Actual", render_list::<K, _>(config, actual))
                .with_context("Missing", render_list::<K, _>(config, &missing))
                .with_context("Unwanted", render_list::<K, _>(config, &unwanted)),
            )
        });
        self.settle()
    }

    /// Requires the elements to differ from `unwanted` as a set.
    pub fn does_not_contain_exactly<I>(self, unwanted: I) -> M::Out<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Debug,
        E: PartialEq<I::Item>,
    {
        let unwanted: Vec<I::Item> = unwanted.into_iter().collect();
        self.binding.check(|name, actual, config| {
            let same = absent(&unwanted, actual, |x, a| equals(config, a, x)).is_empty()
                && absent(actual, &unwanted, |a, x| equals(config, a, x)).is_empty();
            same.then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not consist of the same elements as {}.",
                    config.render(&unwanted)
                ))
                .with_context("Actual", render_list::<K, _>(config, actual))
            })
        });
        self.settle()
    }

    /// Requires at least one element of `expected`.
    pub fn contains_any<I>(self, expected: I) -> M::Out<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Debug,
        E: PartialEq<I::Item>,
    {
        let expected: Vec<I::Item> = expected.into_iter().collect();
        let noun = self.pluralizer;
        self.binding.check(|name, actual, config| {
            let found = actual.iter().any(|a| expected.iter().any(|x| equals(config, a, x)));
            (!found).then(|| {
                Failure::invalid_argument(format!(
                    "{name} must contain any {noun} in {}.",
                    config.render(&expected)
                ))
                .with_context("Actual", render_list::<K, _>(config, actual))
            })
        });
        self.settle()
    }

    /// Requires none of the elements of `unwanted`.
    pub fn does_not_contain_any<I>(self, unwanted: I) -> M::Out<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Debug,
        E: PartialEq<I::Item>,
    {
        let unwanted: Vec<I::Item> = unwanted.into_iter().collect();
        let noun = self.pluralizer;
        self.binding.check(|name, actual, config| {
            let found: Vec<&E> = actual
                .iter()
                .filter(|a| unwanted.iter().any(|x| equals(config, *a, x)))
                .collect();
            (!found.is_empty()).then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not contain any {noun} in {}.",
                    config.render(&unwanted)
                ))
                .with_context("Actual", render_list::<K, _>(config, actual))
                .with_context("Unwanted", render_list::<K, _>(config, &found))
            })
        });
        self.settle()
    }

    /// Requires every element of `expected`.
    pub fn contains_all<I>(self, expected: I) -> M::Out<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Debug,
        E: PartialEq<I::Item>,
    {
        let expected: Vec<I::Item> = expected.into_iter().collect();
        let noun = self.pluralizer;
        self.binding.check(|name, actual, config| {
            let missing = absent(&expected, actual, |x, a| equals(config, a, x));
            (!missing.is_empty()).then(|| {
                Failure::invalid_argument(format!(
                    "{name} must contain all the {} in {}.",
                    noun.name_of(2),
                    config.render(&expected)
                ))
                .with_context("Actual", render_list::<K, _>(config, actual))
                .with_context("Missing", render_list::<K, _>(config, &missing))
            })
        });
        self.settle()
    }

    /// Requires at least one element of `unwanted` to be absent.
    pub fn does_not_contain_all<I>(self, unwanted: I) -> M::Out<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Debug,
        E: PartialEq<I::Item>,
    {
        let unwanted: Vec<I::Item> = unwanted.into_iter().collect();
        let noun = self.pluralizer;
        self.binding.check(|name, actual, config| {
            absent(&unwanted, actual, |x, a| equals(config, a, x)).is_empty().then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not contain all {} in {}.",
                    noun.name_of(2),
                    config.render(&unwanted)
                ))
                .with_context("Actual", render_list::<K, _>(config, actual))
            })
        });
        self.settle()
    }

    /// Requires every element to occur once.
    pub fn does_not_contain_duplicates(self) -> M::Out<Self>
    where
        E: PartialEq,
    {
        let noun = self.pluralizer;
        self.binding.check(|name, actual, config| {
            let mut duplicates: Vec<&E> = Vec::new();
            for (index, element) in actual.iter().enumerate() {
                if actual[..index].contains(element) && !duplicates.contains(&element) {
                    duplicates.push(element);
                }
            }
            (!duplicates.is_empty()).then(|| {
                Failure::invalid_argument(format!(
                    "{name} may not contain duplicate {}.",
                    noun.name_of(2)
                ))
                .with_context("Actual", render_list::<K, _>(config, actual))
                .with_context("Duplicates", render_list::<K, _>(config, &duplicates))
            })
        });
        self.settle()
    }

    fn check_sorted(&self)
    where
        E: PartialOrd + Clone,
    {
        self.binding.check(|name, actual, config| {
            if actual.windows(2).all(|pair| pair[0] <= pair[1]) {
                return None;
            }
            let mut sorted = actual.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
            Some(
                Failure::invalid_argument(format!("{name} must be sorted."))
                    .with_context("Actual", config.render(actual))
                    .with_context("Expected", config.render(&sorted)),
            )
        });
    }

    fn size_named(&self, suffix: &str) -> M::Out<SizeValidator<M>> {
        let config = self.binding.config();
        let rendered = self
            .binding
            .actual()
            .map(|actual| render_list::<K, _>(config, actual))
            .unwrap_or_default();
        let size = self.binding.derive_with(suffix, Vec::len);
        M::settle(SizeValidator::<M>::new(size, self.binding.name(), rendered, self.pluralizer))
    }
}

impl<E: fmt::Debug, M: Mode> ContainerValidator<E, CollectionKind, M> {
    /// Validates the number of elements as `NAME.size()`.
    pub fn size(&self) -> M::Out<SizeValidator<M>> {
        self.size_named(".size()")
    }

    /// Requires ascending order. Incomparable neighbours count as unsorted.
    pub fn is_sorted(self) -> M::Out<Self>
    where
        E: PartialOrd + Clone,
    {
        self.check_sorted();
        self.settle()
    }

    /// Continues with the same elements as an array.
    pub fn as_array(self) -> M::Out<ArrayValidator<E, M>> {
        M::settle(self.rekind::<ArrayKind, M>())
    }
}

impl<E: fmt::Debug, M: Mode> ContainerValidator<E, ArrayKind, M> {
    /// Validates the number of elements as `NAME.length()`.
    pub fn length(&self) -> M::Out<SizeValidator<M>> {
        self.size_named(".length()")
    }

    /// Requires ascending order. Incomparable neighbours count as unsorted.
    pub fn is_sorted(self) -> M::Out<Self>
    where
        E: PartialOrd + Clone,
    {
        self.check_sorted();
        self.settle()
    }

    /// Continues with the same elements as a collection.
    pub fn as_collection(self) -> M::Out<CollectionValidator<E, M>> {
        M::settle(self.rekind::<CollectionKind, M>())
    }
}

impl<E: fmt::Debug, M: Mode> ContainerValidator<E, UnorderedKind, M> {
    /// Validates the number of elements as `NAME.size()`.
    pub fn size(&self) -> M::Out<SizeValidator<M>> {
        self.size_named(".size()")
    }
}
