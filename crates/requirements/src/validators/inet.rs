//! IP addresses

use std::marker::PhantomData;
use std::net::IpAddr;

use crate::binding::Binding;
use crate::error::Failure;
use crate::mode::{Mode, Validating};
use crate::validation::Validation;

/// Validates an IP address.
pub struct InetAddressValidator<M = Validating> {
    binding: Binding<IpAddr>,
    mode: PhantomData<M>,
}

impl_validation!([] InetAddressValidator[] => IpAddr);

impl<M: Mode> InetAddressValidator<M> {
    fn require(self, holds: impl FnOnce(&IpAddr) -> bool, requirement: &str) -> M::Out<Self> {
        self.binding.check(|name, actual, _| {
            (!holds(actual)).then(|| {
                Failure::invalid_argument(format!("{name} {requirement}."))
                    .with_context("Actual", actual.to_string())
            })
        });
        self.settle()
    }

    /// Requires an IPv4 address.
    pub fn is_ip_v4(self) -> M::Out<Self> {
        self.require(IpAddr::is_ipv4, "must be an IP v4 address")
    }

    /// Requires an IPv6 address.
    pub fn is_ip_v6(self) -> M::Out<Self> {
        self.require(IpAddr::is_ipv6, "must be an IP v6 address")
    }

    /// Requires a loopback address.
    pub fn is_loopback(self) -> M::Out<Self> {
        self.require(IpAddr::is_loopback, "must be a loopback address")
    }
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, Ipv6Addr};

    use crate::requirements::validate_that;
    use crate::validation::Validation;

    #[test]
    fn test_address_family() {
        let validator = validate_that(Ipv4Addr::LOCALHOST, "bind").is_ip_v4().is_loopback().is_ip_v6();

        assert_eq!(validator.messages(), ["bind must be an IP v6 address.\nActual: 127.0.0.1"]);
    }

    #[test]
    fn test_ipv6_loopback() {
        let validator = validate_that(Ipv6Addr::UNSPECIFIED, "bind").is_loopback();
        assert_eq!(validator.failures()[0].message(), "bind must be a loopback address.");
    }
}
