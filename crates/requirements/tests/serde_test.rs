//! `Serialize` output of failures.

use nebula_requirements::prelude::*;
use serde_json::json;

#[test]
fn failure_serializes_with_ordered_context() {
    let validator = validate_that(3_i32, "workers").is_greater_than_or_equal_to(4);
    let value = serde_json::to_value(&validator.failures()[0]).unwrap();

    assert_eq!(
        value,
        json!({
            "kind": "invalid_argument",
            "message": "workers must be greater than or equal to 4.",
            "context": [{ "name": "Actual", "value": "3" }],
            "cause": null,
        })
    );
}

#[test]
fn cause_serializes_as_text() {
    let validator = validate_that("not an ip", "peer");
    let _ = validator.as_inet_address();
    let value = serde_json::to_value(&validator.failures()[0]).unwrap();

    assert!(value["cause"].is_string());
}
