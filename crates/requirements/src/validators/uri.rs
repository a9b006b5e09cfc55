//! URIs (`http::Uri`) and URLs (`url::Url`)

use std::marker::PhantomData;

use crate::binding::Binding;
use crate::error::Failure;
use crate::mode::{Mode, Validating};
use crate::precondition;
use crate::validation::Validation;

/// Validates a URI reference.
pub struct UriValidator<M = Validating> {
    binding: Binding<http::Uri>,
    mode: PhantomData<M>,
}

impl_validation!([] UriValidator[] => http::Uri);

/// Validates an absolute URL.
pub struct UrlValidator<M = Validating> {
    binding: Binding<url::Url>,
    mode: PhantomData<M>,
}

impl_validation!([] UrlValidator[] => url::Url);

impl<M: Mode> UriValidator<M> {
    /// Requires a scheme.
    pub fn is_absolute(self) -> M::Out<Self> {
        self.binding.check(|name, actual, _| {
            actual.scheme().is_none().then(|| {
                Failure::invalid_argument(format!("{name} must be an absolute URI."))
                    .with_context("Actual", actual.to_string())
            })
        });
        self.settle()
    }

    /// Continues with the URI parsed as a URL. Relative references fail.
    pub fn as_url(&self) -> M::Out<UrlValidator<M>> {
        let name = self.binding.name();
        let url = self.binding.actual().and_then(|uri| {
            let text = uri.to_string();
            match url::Url::parse(&text) {
                Ok(url) => Some(url),
                Err(cause) => {
                    self.binding.record(
                        Failure::invalid_argument(format!("{name} is not a valid URL."))
                            .with_context("Actual", text)
                            .with_cause(cause),
                    );
                    None
                }
            }
        });
        M::settle(UrlValidator::<M>::from_binding(self.binding.derive(name, url)))
    }
}

impl<M: Mode> UrlValidator<M> {
    /// Requires the given scheme, compared case-insensitively.
    ///
    /// # Panics
    ///
    /// Panics if `scheme` is empty.
    #[track_caller]
    pub fn has_scheme(self, scheme: &str) -> M::Out<Self> {
        precondition::require_non_empty(scheme, "scheme");
        self.binding.check(|name, actual, _| {
            (!actual.scheme().eq_ignore_ascii_case(scheme)).then(|| {
                Failure::invalid_argument(format!("{name} must use the {scheme:?} scheme."))
                    .with_context("Actual", actual.as_str())
            })
        });
        self.settle()
    }

    /// Continues with the URL as a URI.
    pub fn as_uri(&self) -> M::Out<UriValidator<M>> {
        let name = self.binding.name();
        let uri = self.binding.actual().and_then(|url| match url.as_str().parse::<http::Uri>() {
            Ok(uri) => Some(uri),
            Err(cause) => {
                self.binding.record(
                    Failure::invalid_argument(format!("{name} is not a valid URI."))
                        .with_context("Actual", url.as_str())
                        .with_cause(cause),
                );
                None
            }
        });
        M::settle(UriValidator::<M>::from_binding(self.binding.derive(name, uri)))
    }
}
