#![forbid(unsafe_code)]

//! Fluent checks over a fixed snapshot of recorded calls.
//!
//! A [`CallAssertion`] is a read-only view: it holds the records it was
//! built over and never re-reads the log. Fetch a fresh view from
//! `Proxy::expect` to observe calls made after this one was constructed.
//!
//! Count checks compare the snapshot size; argument checks scan the
//! snapshot for at least one matching record:
//!
//! - [`with_args`](CallAssertion::with_args) matches each expected value
//!   independently, anywhere among a record's positional arguments, so
//!   `(b, a)` and `(a, b, c)` both satisfy `with_args(a, b)`.
//! - [`with_args_strict`](CallAssertion::with_args_strict) requires exact
//!   arity and index-wise equality.

use std::sync::Arc;

use crate::error::{CountCheck, ExpectationError};
use crate::invocation::Invocation;
use crate::value::{CallArgs, Value};

/// Assertion surface over a snapshot of invocation records.
#[derive(Clone, Debug)]
pub struct CallAssertion {
    records: Vec<Arc<Invocation>>,
}

impl CallAssertion {
    pub(crate) fn new(records: Vec<Arc<Invocation>>) -> Self {
        Self { records }
    }

    /// Number of records in the snapshot.
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    fn count_error(&self, check: CountCheck) -> ExpectationError {
        ExpectationError::Count {
            check,
            actual: self.records.len(),
        }
    }

    /// The call happened exactly `expected` times.
    pub fn times(&self, expected: usize) -> Result<(), ExpectationError> {
        if self.records.len() != expected {
            return Err(self.count_error(CountCheck::Times));
        }
        Ok(())
    }

    /// Shorthand for `times(1)`.
    pub fn once(&self) -> Result<(), ExpectationError> {
        self.times(1)
    }

    /// Shorthand for `times(2)`.
    pub fn twice(&self) -> Result<(), ExpectationError> {
        self.times(2)
    }

    /// Shorthand for `times(0)`.
    pub fn never(&self) -> Result<(), ExpectationError> {
        self.times(0)
    }

    /// The call happened fewer than `limit` times.
    pub fn lt(&self, limit: usize) -> Result<(), ExpectationError> {
        if self.records.len() >= limit {
            return Err(self.count_error(CountCheck::Lt));
        }
        Ok(())
    }

    /// The call happened at most `limit` times.
    pub fn lte(&self, limit: usize) -> Result<(), ExpectationError> {
        if self.records.len() > limit {
            return Err(self.count_error(CountCheck::Lte));
        }
        Ok(())
    }

    /// The call happened more than `floor` times.
    pub fn gt(&self, floor: usize) -> Result<(), ExpectationError> {
        if self.records.len() <= floor {
            return Err(self.count_error(CountCheck::Gt));
        }
        Ok(())
    }

    /// The call happened at least `floor` times.
    pub fn gte(&self, floor: usize) -> Result<(), ExpectationError> {
        if self.records.len() < floor {
            return Err(self.count_error(CountCheck::Gte));
        }
        Ok(())
    }

    /// Some record carries `expected` among its positional arguments.
    pub fn with_arg(&self, expected: impl Into<Value>) -> Result<(), ExpectationError> {
        let expected = expected.into();
        if self
            .records
            .iter()
            .any(|record| record.positional().contains(&expected))
        {
            return Ok(());
        }
        Err(ExpectationError::NoMatchingInvocation)
    }

    /// Some record carries every positional value of `expected`, in any
    /// order; records with extra arguments still match.
    pub fn with_args(&self, expected: &CallArgs) -> Result<(), ExpectationError> {
        let wanted = expected.positional();
        if self.records.iter().any(|record| {
            wanted
                .iter()
                .all(|value| record.positional().contains(value))
        }) {
            return Ok(());
        }
        Err(ExpectationError::NoMatchingInvocation)
    }

    /// Some record's positional arguments equal `expected` index-wise, with
    /// exact arity.
    pub fn with_args_strict(&self, expected: &CallArgs) -> Result<(), ExpectationError> {
        if self
            .records
            .iter()
            .any(|record| record.positional() == expected.positional())
        {
            return Ok(());
        }
        Err(ExpectationError::NoMatchingInvocation)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(calls: &[CallArgs]) -> CallAssertion {
        CallAssertion::new(
            calls
                .iter()
                .map(|args| Arc::new(Invocation::new("m", args.clone())))
                .collect(),
        )
    }

    #[test]
    fn exact_count_checks() {
        let view = snapshot(&[crate::args![1i64], crate::args![2i64]]);
        assert!(view.times(2).is_ok());
        assert!(view.twice().is_ok());
        assert!(view.once().is_err());
        assert!(view.never().is_err());

        let err = view.times(3).unwrap_err();
        assert_eq!(err.to_string(), "times assertion error. times=2");
    }

    #[test]
    fn empty_snapshot_never_passes_once() {
        let view = snapshot(&[]);
        assert!(view.never().is_ok());
        let err = view.once().unwrap_err();
        assert_eq!(err.to_string(), "times assertion error. times=0");
    }

    #[test]
    fn range_checks() {
        let view = snapshot(&[crate::args![], crate::args![], crate::args![]]);
        assert!(view.lt(4).is_ok());
        assert!(view.lte(3).is_ok());
        assert!(view.gt(2).is_ok());
        assert!(view.gte(3).is_ok());

        assert!(view.lt(3).is_err());
        assert!(view.lte(2).is_err());
        assert!(view.gt(3).is_err());
        assert!(view.gte(4).is_err());
        assert_eq!(
            view.lt(3).unwrap_err().to_string(),
            "lt assertion error. times=3"
        );
    }

    #[test]
    fn with_arg_scans_all_records_and_positions() {
        let view = snapshot(&[crate::args!["alice", 1i64], crate::args!["bob"]]);
        assert!(view.with_arg("bob").is_ok());
        assert!(view.with_arg(1i64).is_ok());
        assert!(view.with_arg("carol").is_err());
        assert_eq!(
            view.with_arg("carol").unwrap_err(),
            ExpectationError::NoMatchingInvocation
        );
    }

    #[test]
    fn with_args_is_order_independent_and_allows_extras() {
        let view = snapshot(&[crate::args!["b", "a", "c"]]);
        assert!(view.with_args(&crate::args!["a", "b"]).is_ok());
        assert!(view.with_args(&crate::args!["c"]).is_ok());
        assert!(view.with_args(&crate::args!["a", "d"]).is_err());
    }

    #[test]
    fn with_args_requires_one_record_to_hold_all() {
        // "a" and "b" appear across records but never together.
        let view = snapshot(&[crate::args!["a"], crate::args!["b"]]);
        assert!(view.with_args(&crate::args!["a", "b"]).is_err());
    }

    #[test]
    fn with_args_strict_is_order_sensitive() {
        let view = snapshot(&[crate::args!["a", "b"]]);
        assert!(view.with_args_strict(&crate::args!["a", "b"]).is_ok());
        assert!(view.with_args_strict(&crate::args!["b", "a"]).is_err());
    }

    #[test]
    fn with_args_strict_requires_exact_arity() {
        let view = snapshot(&[crate::args!["a", "b", "c"]]);
        assert!(view.with_args_strict(&crate::args!["a", "b"]).is_err());
        assert!(view.with_args(&crate::args!["a", "b"]).is_ok());
    }

    #[test]
    fn with_args_strict_on_empty_call() {
        let view = snapshot(&[crate::args![]]);
        assert!(view.with_args_strict(&crate::args![]).is_ok());
        assert!(view.with_args_strict(&crate::args!["a"]).is_err());
    }
}
