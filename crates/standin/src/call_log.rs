#![forbid(unsafe_code)]

//! The invocation ledger: per-method call history and its query views.
//!
//! [`CallLog`] owns every record produced through a proxy, keyed by method
//! name and insertion-ordered within each method. [`CallHistory`] is the
//! snapshot view handed to callers: asking for an untouched method yields an
//! empty history (so `never()` is assertable), and records made after the
//! view was fetched are not visible through it.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::assertion::CallAssertion;
use crate::error::ExpectationError;
use crate::invocation::Invocation;

// ---------------------------------------------------------------------------
// CallLog
// ---------------------------------------------------------------------------

/// Ordered per-method ledger of recorded invocations.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: FxHashMap<String, Vec<Arc<Invocation>>>,
}

impl CallLog {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its method's sequence, creating the sequence on
    /// first use.
    pub fn notify(&mut self, invocation: Invocation) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "standin::call_log",
            method = invocation.method(),
            args = invocation.args().len(),
            "recorded invocation"
        );
        self.calls
            .entry(invocation.method().to_string())
            .or_default()
            .push(Arc::new(invocation));
    }

    /// Snapshot view of one method's history. An unknown name yields an
    /// empty view, not an error.
    #[must_use]
    pub fn for_method(&self, method: &str) -> CallHistory {
        CallHistory {
            records: self.calls.get(method).cloned().unwrap_or_default(),
        }
    }

    /// Discard all recorded history for all methods.
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    /// True when nothing has been recorded since construction or the last
    /// [`reset`](CallLog::reset).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Human-readable per-method call counts, sorted by method name.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.calls.is_empty() {
            return "no calls recorded".to_string();
        }
        let mut names: Vec<&str> = self.calls.keys().map(String::as_str).collect();
        names.sort_unstable();
        let mut out = String::new();
        for name in names {
            let count = self.calls[name].len();
            out.push_str(&format!("{name}: times={count}\n"));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// CallHistory
// ---------------------------------------------------------------------------

/// Snapshot of one method's recorded calls.
#[derive(Clone, Debug)]
pub struct CallHistory {
    records: Vec<Arc<Invocation>>,
}

impl CallHistory {
    /// Assertion surface over every record in the snapshot.
    #[must_use]
    pub fn called(&self) -> CallAssertion {
        CallAssertion::new(self.records.clone())
    }

    /// Assertion surface over the single record at zero-based call `index`.
    pub fn invocation(&self, index: usize) -> Result<CallAssertion, ExpectationError> {
        match self.records.get(index) {
            Some(record) => Ok(CallAssertion::new(vec![record.clone()])),
            None => Err(ExpectationError::InvocationOutOfRange {
                index,
                recorded: self.records.len(),
            }),
        }
    }

    /// Number of recorded calls in the snapshot.
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// The raw records, for custom inspection.
    #[must_use]
    pub fn records(&self) -> &[Arc<Invocation>] {
        &self.records
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
