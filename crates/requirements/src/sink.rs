//! Failure accumulator shared by a chain and every validator derived from it

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Failure;

/// Ordered, append-only list of failures behind a cheap shared handle.
///
/// Cloning a sink yields another handle to the same list, which is how
/// `collection.size()` or `text.length()` report into the parent chain.
/// The handle is `!Send`; a chain belongs to one thread.
#[derive(Debug, Clone, Default)]
pub struct FailureSink {
    failures: Rc<RefCell<Vec<Failure>>>,
}

impl FailureSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a failure.
    pub fn record(&self, failure: Failure) {
        tracing::debug!(
            kind = ?failure.kind(),
            reason = failure.message(),
            "requirement failed"
        );
        self.failures.borrow_mut().push(failure);
    }

    /// Number of failures recorded so far.
    pub fn len(&self) -> usize {
        self.failures.borrow().len()
    }

    /// Returns `true` if nothing has failed.
    pub fn is_empty(&self) -> bool {
        self.failures.borrow().is_empty()
    }

    /// Copy of the recorded failures, in order.
    pub fn snapshot(&self) -> Vec<Failure> {
        self.failures.borrow().clone()
    }

    /// Removes and returns every recorded failure.
    pub fn take(&self) -> Vec<Failure> {
        std::mem::take(&mut *self.failures.borrow_mut())
    }

    /// Returns `true` if both handles point at the same list.
    pub fn shares_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.failures, &other.failures)
    }
}
