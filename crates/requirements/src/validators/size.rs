//! Sizes of strings, collections, arrays and maps
//!
//! A size validator is always derived from its container. Messages name the
//! container ("items must contain at least 3 elements.") rather than the
//! size itself.

use std::fmt;
use std::marker::PhantomData;

use crate::binding::Binding;
use crate::error::Failure;
use crate::mode::{Mode, Validating};
use crate::pluralizer::Pluralizer;
use crate::precondition;
use crate::validation::{Bound, Validation};

/// Validates the size of a container.
pub struct SizeValidator<M = Validating> {
    binding: Binding<usize>,
    container: Container,
    mode: PhantomData<M>,
}

/// How the container is named and shown in size messages.
#[derive(Debug, Clone)]
struct Container {
    name: String,
    rendered: String,
    pluralizer: Pluralizer,
}

impl<M> fmt::Debug for SizeValidator<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeValidator")
            .field("container", &self.container.name)
            .field("binding", &self.binding)
            .finish()
    }
}

impl<M: Mode> SizeValidator<M> {
    pub(crate) fn new(
        binding: Binding<usize>,
        container: &str,
        rendered: String,
        pluralizer: Pluralizer,
    ) -> Self {
        Self {
            binding,
            container: Container {
                name: container.to_owned(),
                rendered,
                pluralizer,
            },
            mode: PhantomData,
        }
    }

    /// Records a failure unless `holds(size)`.
    ///
    /// The container itself is only shown when it is not empty.
    fn require(
        self,
        holds: impl FnOnce(usize) -> bool,
        message: impl FnOnce(&Container) -> String,
        bound: Option<(&str, usize)>,
    ) -> M::Out<Self> {
        self.binding.check(|_, &size, config| {
            if holds(size) {
                return None;
            }
            let container = &self.container;
            let mut failure = Failure::invalid_argument(message(container))
                .with_context("Actual", config.render(&size));
            if let Some((label, bound)) = bound {
                failure = failure.with_context(label, config.render(&bound));
            }
            if size > 0 {
                failure = failure.with_context(&container.name, container.rendered.clone());
            }
            Some(failure)
        });
        self.settle()
    }

    fn compare(self, bound: usize, bound_name: Option<&str>, direction: Bound) -> M::Out<Self> {
        let verb = match direction {
            Bound::AtLeast => "must contain at least",
            Bound::Above => "must contain more than",
            Bound::AtMost => "may not contain more than",
            Bound::Below => "must contain less than",
        };
        let message = |c: &Container| match bound_name {
            None => format!("{} {verb} {bound} {}.", c.name, c.pluralizer.name_of(bound)),
            Some(bound_name) => format!("{} {verb} {bound_name} {}.", c.name, c.pluralizer.name_of(2)),
        };
        let labelled = bound_name.map(|_| (direction.label(), bound));
        self.require(|size| direction.holds(&size, &bound), message, labelled)
    }

    /// Requires `size >= bound`.
    pub fn is_greater_than_or_equal_to(self, bound: usize) -> M::Out<Self> {
        self.compare(bound, None, Bound::AtLeast)
    }

    /// Requires `size >= bound`, naming the bound.
    ///
    /// # Panics
    ///
    /// Panics if `bound_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_greater_than_or_equal_to_named(self, bound: usize, bound_name: &str) -> M::Out<Self> {
        precondition::require_name(bound_name, "bound_name");
        self.compare(bound, Some(bound_name), Bound::AtLeast)
    }

    /// Requires `size > bound`.
    pub fn is_greater_than(self, bound: usize) -> M::Out<Self> {
        self.compare(bound, None, Bound::Above)
    }

    /// Requires `size > bound`, naming the bound.
    ///
    /// # Panics
    ///
    /// Panics if `bound_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_greater_than_named(self, bound: usize, bound_name: &str) -> M::Out<Self> {
        precondition::require_name(bound_name, "bound_name");
        self.compare(bound, Some(bound_name), Bound::Above)
    }

    /// Requires `size <= bound`.
    pub fn is_less_than_or_equal_to(self, bound: usize) -> M::Out<Self> {
        self.compare(bound, None, Bound::AtMost)
    }

    /// Requires `size <= bound`, naming the bound.
    ///
    /// # Panics
    ///
    /// Panics if `bound_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_less_than_or_equal_to_named(self, bound: usize, bound_name: &str) -> M::Out<Self> {
        precondition::require_name(bound_name, "bound_name");
        self.compare(bound, Some(bound_name), Bound::AtMost)
    }

    /// Requires `size < bound`.
    pub fn is_less_than(self, bound: usize) -> M::Out<Self> {
        self.compare(bound, None, Bound::Below)
    }

    /// Requires `size < bound`, naming the bound.
    ///
    /// # Panics
    ///
    /// Panics if `bound_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_less_than_named(self, bound: usize, bound_name: &str) -> M::Out<Self> {
        precondition::require_name(bound_name, "bound_name");
        self.compare(bound, Some(bound_name), Bound::Below)
    }

    /// Requires `start <= size < end`.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    #[track_caller]
    pub fn is_between(self, start: usize, end: usize) -> M::Out<Self> {
        precondition::require_ordered(&start, "start", &end, "end");
        self.require(
            |size| (start..end).contains(&size),
            |c| format!("{} must contain [{start}, {end}) {}.", c.name, c.pluralizer.name_of(2)),
            None,
        )
    }

    /// Requires `start <= size <= end`.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    #[track_caller]
    pub fn is_between_closed(self, start: usize, end: usize) -> M::Out<Self> {
        precondition::require_ordered(&start, "start", &end, "end");
        self.require(
            |size| (start..=end).contains(&size),
            |c| format!("{} must contain [{start}, {end}] {}.", c.name, c.pluralizer.name_of(2)),
            None,
        )
    }

    /// Requires `size == expected`.
    pub fn is_equal_to(self, expected: usize) -> M::Out<Self> {
        self.require(
            |size| size == expected,
            |c| format!("{} must contain {expected} {}.", c.name, c.pluralizer.name_of(expected)),
            None,
        )
    }

    /// Requires `size == expected`, naming the expected size.
    ///
    /// # Panics
    ///
    /// Panics if `expected_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_equal_to_named(self, expected: usize, expected_name: &str) -> M::Out<Self> {
        precondition::require_name(expected_name, "expected_name");
        self.require(
            |size| size == expected,
            |c| format!("{} must contain {expected_name} {}.", c.name, c.pluralizer.name_of(2)),
            Some((expected_name, expected)),
        )
    }

    /// Requires `size != unwanted`.
    pub fn is_not_equal_to(self, unwanted: usize) -> M::Out<Self> {
        self.require(
            |size| size != unwanted,
            |c| format!("{} may not contain {unwanted} {}.", c.name, c.pluralizer.name_of(unwanted)),
            None,
        )
    }

    /// Requires `size != unwanted`, naming the unwanted size.
    ///
    /// # Panics
    ///
    /// Panics if `unwanted_name` is empty or padded with whitespace.
    #[track_caller]
    pub fn is_not_equal_to_named(self, unwanted: usize, unwanted_name: &str) -> M::Out<Self> {
        precondition::require_name(unwanted_name, "unwanted_name");
        self.require(
            |size| size != unwanted,
            |c| format!("{} may not contain {unwanted_name} {}.", c.name, c.pluralizer.name_of(2)),
            Some((unwanted_name, unwanted)),
        )
    }

    /// Requires an empty container.
    pub fn is_zero(self) -> M::Out<Self> {
        self.require(|size| size == 0, |c| format!("{} must be empty.", c.name), None)
    }

    /// Requires a non-empty container.
    pub fn is_not_zero(self) -> M::Out<Self> {
        self.is_positive()
    }

    /// Requires a non-empty container.
    pub fn is_positive(self) -> M::Out<Self> {
        self.require(
            |size| size > 0,
            |c| format!("{} must contain at least one {}.", c.name, c.pluralizer),
            None,
        )
    }

    /// Requires an empty container.
    pub fn is_not_positive(self) -> M::Out<Self> {
        self.is_zero()
    }
}

impl<M: Mode> Validation for SizeValidator<M> {
    type Value = usize;
    type Mode = M;
    type Collecting = SizeValidator<Validating>;

    fn binding(&self) -> &Binding<usize> {
        &self.binding
    }

    fn into_binding(self) -> Binding<usize> {
        self.binding
    }

    /// A size known only by its own binding: the container is named after
    /// the size, and not rendered.
    fn from_binding(binding: Binding<usize>) -> Self {
        let name = binding.name().to_owned();
        Self {
            binding,
            container: Container {
                name,
                rendered: String::new(),
                pluralizer: Pluralizer::Element,
            },
            mode: PhantomData,
        }
    }

    fn into_collecting(self) -> SizeValidator<Validating> {
        SizeValidator {
            binding: self.binding,
            container: self.container,
            mode: PhantomData,
        }
    }

    fn from_collecting(collecting: SizeValidator<Validating>) -> Self {
        SizeValidator {
            binding: collecting.binding,
            container: collecting.container,
            mode: PhantomData,
        }
    }
}
