//! Which validator a value gets
//!
//! `validate_that(value, name)` picks the validator from the static type of
//! `value` through [`Subject`]. Types without an impl go through
//! `validate_object` or `validate_comparable` instead.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::mode::Mode;
use crate::validation::Validation;
use crate::validators::{
    ArrayValidator, BooleanValidator, CollectionKind, ContainerValidator, InetAddressValidator,
    MapValidator, NumberValidator, ObjectValidator, OptionValidator, PathValidator,
    StringValidator, UnorderedKind,
};

/// A value with a dedicated validator.
pub trait Subject: Sized {
    /// The form the validator holds the value in.
    type Actual;

    /// The validator for this type in mode `M`.
    type Validator<M: Mode>: Validation<Value = Self::Actual, Mode = M>;

    /// Converts the value into the form the validator holds.
    fn into_actual(self) -> Self::Actual;
}

// ============================================================================
// SCALARS
// ============================================================================

macro_rules! number_subject {
    ($($t:ty),* $(,)?) => {
        $(
            impl Subject for $t {
                type Actual = $t;
                type Validator<M: Mode> = NumberValidator<$t, M>;

                #[inline]
                fn into_actual(self) -> $t {
                    self
                }
            }
        )*
    };
}

number_subject!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

#[cfg(feature = "decimal")]
number_subject!(rust_decimal::Decimal);

impl Subject for bool {
    type Actual = Self;
    type Validator<M: Mode> = BooleanValidator<M>;

    fn into_actual(self) -> Self {
        self
    }
}

macro_rules! object_subject {
    ($($t:ty),* $(,)?) => {
        $(
            impl Subject for $t {
                type Actual = $t;
                type Validator<M: Mode> = ObjectValidator<$t, M>;

                fn into_actual(self) -> $t {
                    self
                }
            }
        )*
    };
}

object_subject!(char, Duration);

// ============================================================================
// TEXT
// ============================================================================

impl<'a> Subject for &'a str {
    type Actual = Cow<'a, str>;
    type Validator<M: Mode> = StringValidator<'a, M>;

    fn into_actual(self) -> Cow<'a, str> {
        Cow::Borrowed(self)
    }
}

impl<'a> Subject for &'a String {
    type Actual = Cow<'a, str>;
    type Validator<M: Mode> = StringValidator<'a, M>;

    fn into_actual(self) -> Cow<'a, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Subject for String {
    type Actual = Cow<'static, str>;
    type Validator<M: Mode> = StringValidator<'static, M>;

    fn into_actual(self) -> Cow<'static, str> {
        Cow::Owned(self)
    }
}

impl<'a> Subject for Cow<'a, str> {
    type Actual = Self;
    type Validator<M: Mode> = StringValidator<'a, M>;

    fn into_actual(self) -> Self {
        self
    }
}

// ============================================================================
// COLLECTIONS AND ARRAYS
// ============================================================================

macro_rules! collection_subject {
    ($($collection:ident => $kind:ty),* $(,)?) => {
        $(
            impl<T> Subject for $collection<T> {
                type Actual = Vec<T>;
                type Validator<M: Mode> = ContainerValidator<T, $kind, M>;

                fn into_actual(self) -> Vec<T> {
                    self.into_iter().collect()
                }
            }

            impl<'a, T> Subject for &'a $collection<T> {
                type Actual = Vec<&'a T>;
                type Validator<M: Mode> = ContainerValidator<&'a T, $kind, M>;

                fn into_actual(self) -> Vec<&'a T> {
                    self.iter().collect()
                }
            }
        )*
    };
}

collection_subject!(
    Vec => CollectionKind,
    VecDeque => CollectionKind,
    HashSet => UnorderedKind,
    BTreeSet => CollectionKind,
);

impl<T, const N: usize> Subject for [T; N] {
    type Actual = Vec<T>;
    type Validator<M: Mode> = ArrayValidator<T, M>;

    fn into_actual(self) -> Vec<T> {
        self.into()
    }
}

impl<'a, T, const N: usize> Subject for &'a [T; N] {
    type Actual = Vec<&'a T>;
    type Validator<M: Mode> = ArrayValidator<&'a T, M>;

    fn into_actual(self) -> Vec<&'a T> {
        self.iter().collect()
    }
}

impl<'a, T> Subject for &'a [T] {
    type Actual = Vec<&'a T>;
    type Validator<M: Mode> = ArrayValidator<&'a T, M>;

    fn into_actual(self) -> Vec<&'a T> {
        self.iter().collect()
    }
}

// ============================================================================
// MAPS
// ============================================================================

macro_rules! map_subject {
    ($($map:ident => $kind:ty),* $(,)?) => {
        $(
            impl<K, V> Subject for $map<K, V> {
                type Actual = Vec<(K, V)>;
                type Validator<M: Mode> = MapValidator<K, V, $kind, M>;

                fn into_actual(self) -> Vec<(K, V)> {
                    self.into_iter().collect()
                }
            }

            impl<'a, K, V> Subject for &'a $map<K, V> {
                type Actual = Vec<(&'a K, &'a V)>;
                type Validator<M: Mode> = MapValidator<&'a K, &'a V, $kind, M>;

                fn into_actual(self) -> Vec<(&'a K, &'a V)> {
                    self.iter().collect()
                }
            }
        )*
    };
}

map_subject!(HashMap => UnorderedKind, BTreeMap => CollectionKind);

// ============================================================================
// PATHS AND NETWORK
// ============================================================================

impl<'a> Subject for &'a Path {
    type Actual = Cow<'a, Path>;
    type Validator<M: Mode> = PathValidator<'a, M>;

    fn into_actual(self) -> Cow<'a, Path> {
        Cow::Borrowed(self)
    }
}

impl<'a> Subject for &'a PathBuf {
    type Actual = Cow<'a, Path>;
    type Validator<M: Mode> = PathValidator<'a, M>;

    fn into_actual(self) -> Cow<'a, Path> {
        Cow::Borrowed(self.as_path())
    }
}

impl Subject for PathBuf {
    type Actual = Cow<'static, Path>;
    type Validator<M: Mode> = PathValidator<'static, M>;

    fn into_actual(self) -> Cow<'static, Path> {
        Cow::Owned(self)
    }
}

macro_rules! address_subject {
    ($($t:ty),* $(,)?) => {
        $(
            impl Subject for $t {
                type Actual = IpAddr;
                type Validator<M: Mode> = InetAddressValidator<M>;

                fn into_actual(self) -> IpAddr {
                    self.into()
                }
            }
        )*
    };
}

address_subject!(IpAddr, Ipv4Addr, Ipv6Addr);

#[cfg(feature = "network")]
impl Subject for url::Url {
    type Actual = Self;
    type Validator<M: Mode> = crate::validators::UrlValidator<M>;

    fn into_actual(self) -> Self {
        self
    }
}

#[cfg(feature = "network")]
impl Subject for http::Uri {
    type Actual = Self;
    type Validator<M: Mode> = crate::validators::UriValidator<M>;

    fn into_actual(self) -> Self {
        self
    }
}

// ============================================================================
// OPTIONAL
// ============================================================================

impl<T: Subject> Subject for Option<T> {
    type Actual = Self;
    type Validator<M: Mode> = OptionValidator<T, M>;

    fn into_actual(self) -> Self {
        self
    }
}
