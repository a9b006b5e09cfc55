//! Process-wide configuration.
//!
//! Kept in its own test binary with a single test: every other test file
//! relies on the built-in defaults.

use nebula_requirements::prelude::*;

#[derive(Debug, thiserror::Error)]
#[error("rejected: {0}")]
struct Rejected(String);

#[test]
fn global_configuration_lifecycle() {
    let before = validate_that(7_i32, "pin");

    Configuration::update_global(|builder| builder.string_converter::<i32>(|_| "****".to_owned()));

    // A chain keeps the configuration it was bound with.
    let before = before.is_less_than(5);
    assert_eq!(before.messages(), ["pin must be less than 5.\nActual: 7"]);

    let after = validate_that(7_i32, "pin").is_less_than(5);
    assert_eq!(after.messages(), ["pin must be less than ****.\nActual: ****"]);

    Configuration::update_global(|builder| {
        builder.error_transformer(|error| RequirementError::custom(Rejected(error.to_string())))
    });

    let error = require_that(-1_i32, "count").is_not_negative().unwrap_err();
    assert!(matches!(error, RequirementError::Custom(_)));
    assert_eq!(error.to_string(), "rejected: count may not be negative.\nActual: ****");
    assert!(error.failures().is_empty());

    let error = validate_that("", "label").is_not_empty().error();
    assert!(matches!(error, Some(RequirementError::Custom(_))));

    Configuration::set_global(Configuration::default());
    assert!(Configuration::global().diff_enabled());

    let error = require_that(-1_i32, "count").is_not_negative().unwrap_err();
    assert!(matches!(error, RequirementError::InvalidArgument(_)));
}
