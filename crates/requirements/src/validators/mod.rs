//! Validators, one per category of value
//!
//! Every validator is a [`Binding`](crate::binding::Binding) plus a mode
//! marker. Predicates that make sense for every category live on the
//! blanket traits in [`crate::validation`]; the types here add what is
//! specific to their category.

/// Implements `Validation` and `Debug` for a validator made of a binding and
/// a mode marker.
macro_rules! impl_validation {
    ([$($generics:tt)*] $ty:ident [$($args:tt)*] => $value:ty) => {
        impl<$($generics)* M: $crate::mode::Mode> $crate::validation::Validation
            for $ty<$($args)* M>
        {
            type Value = $value;
            type Mode = M;
            type Collecting = $ty<$($args)* $crate::mode::Validating>;

            fn binding(&self) -> &$crate::binding::Binding<$value> {
                &self.binding
            }

            fn into_binding(self) -> $crate::binding::Binding<$value> {
                self.binding
            }

            fn from_binding(binding: $crate::binding::Binding<$value>) -> Self {
                Self {
                    binding,
                    mode: ::std::marker::PhantomData,
                }
            }
        }

        impl<$($generics)* M> ::std::fmt::Debug for $ty<$($args)* M>
        where
            $value: ::std::fmt::Debug,
        {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_tuple(stringify!($ty)).field(&self.binding).finish()
            }
        }
    };
}

mod boolean;
mod container;
mod inet;
mod map;
mod number;
mod object;
mod optional;
mod path;
mod size;
mod string;
#[cfg(feature = "network")]
mod uri;

pub use boolean::BooleanValidator;
pub use container::{
    ArrayKind, ArrayValidator, CollectionKind, CollectionValidator, ContainerKind,
    ContainerValidator, UnorderedCollectionValidator, UnorderedKind,
};
pub use inet::InetAddressValidator;
pub use map::MapValidator;
pub use number::{NumberValidator, Numeric};
pub use object::{ComparableValidator, ObjectValidator};
pub use optional::OptionValidator;
pub use path::PathValidator;
pub use size::SizeValidator;
pub use string::StringValidator;
#[cfg(feature = "network")]
pub use uri::{UriValidator, UrlValidator};
