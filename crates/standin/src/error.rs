#![forbid(unsafe_code)]

//! Error types: expectation failures and call failures.
//!
//! Two separate taxonomies, never mixed:
//!
//! - [`ExpectationError`] is what an assertion returns when call history
//!   does not satisfy it. Count-based variants carry the observed count in
//!   their message (`times={n}`); nothing in the crate catches these.
//! - [`Failure`] is the error a proxied call produces, whether the wrapped
//!   target genuinely failed or a `to_raise` stub simulated failure. It is
//!   cheaply cloneable so a configured failure can be raised once per
//!   matching call.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::value::Value;

/// Result of one proxied call.
pub type CallResult = Result<Value, Failure>;

// ---------------------------------------------------------------------------
// Expectation errors
// ---------------------------------------------------------------------------

/// Which count comparison an assertion performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountCheck {
    Times,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl fmt::Display for CountCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CountCheck::Times => "times",
            CountCheck::Lt => "lt",
            CountCheck::Lte => "lte",
            CountCheck::Gt => "gt",
            CountCheck::Gte => "gte",
        };
        f.write_str(name)
    }
}

/// An unmet call-history assertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpectationError {
    /// A count comparison failed; `actual` is the recorded call count.
    #[error("{check} assertion error. times={actual}")]
    Count { check: CountCheck, actual: usize },

    /// No recorded invocation satisfied an argument matcher.
    #[error("invocation matching arguments not found")]
    NoMatchingInvocation,

    /// A per-index query addressed a call that was never recorded.
    #[error("invocation index {index} out of range. recorded={recorded}")]
    InvocationOutOfRange { index: usize, recorded: usize },
}

// ---------------------------------------------------------------------------
// Call failures
// ---------------------------------------------------------------------------

/// A failure produced by a proxied call.
///
/// Wraps any error type behind an `Arc`, so the same configured failure can
/// be returned for every matching call without requiring `Clone` of the
/// underlying error. A stubbed failure is indistinguishable from the target
/// genuinely failing.
#[derive(Clone)]
pub struct Failure(Arc<dyn StdError + Send + Sync>);

impl Failure {
    /// Wrap an existing error.
    #[must_use]
    pub fn new(err: impl StdError + Send + Sync + 'static) -> Self {
        Failure(Arc::new(err))
    }

    /// A failure carrying only a message.
    #[must_use]
    pub fn message(msg: impl Into<String>) -> Self {
        Failure(Arc::new(MessageError(msg.into())))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failure({:?})", self.0)
    }
}

impl StdError for Failure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.0.as_ref())
    }
}

/// Message-only error used by [`Failure::message`].
#[derive(Debug, Error)]
#[error("{0}")]
struct MessageError(String);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
