//! Tracing events emitted while chains run.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use nebula_requirements::prelude::*;
use tracing::Level;

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber that records every level into the returned
/// buffer.
fn capture(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn recorded_failures_are_logged_at_debug() {
    let output = capture(|| {
        let _ = validate_that(-1_i32, "offset").is_not_negative();
    });

    assert!(output.contains("DEBUG"), "{output}");
    assert!(output.contains("requirement failed"), "{output}");
    assert!(output.contains("kind=InvalidArgument"), "{output}");
    assert!(output.contains("offset may not be negative."), "{output}");
}

#[test]
fn passing_checks_log_nothing() {
    let output = capture(|| {
        let _ = validate_that(1_i32, "offset").is_not_negative();
    });

    assert!(!output.contains("requirement failed"), "{output}");
}

#[test]
fn missing_value_turns_the_chain_into_a_no_op() {
    let output = capture(|| {
        let _ = validate_that(None::<u8>, "retries").is_not_null();
    });

    assert!(output.contains("TRACE"), "{output}");
    assert!(output.contains("binding is now a no-op"), "{output}");
    assert!(output.contains("retries"), "{output}");
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn replacing_the_global_configuration_is_logged() {
    let output = capture(|| Configuration::set_global(Configuration::default()));

    assert!(output.contains("global requirements configuration replaced"), "{output}");
}
