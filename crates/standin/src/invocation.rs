#![forbid(unsafe_code)]

//! One recorded call.

use std::collections::BTreeMap;

use crate::value::{CallArgs, Value};

/// Immutable snapshot of a single proxied call: the method name and the
/// exact arguments the caller supplied. Created once at call time and never
/// mutated; the call log clears records only wholesale via `reset`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Invocation {
    method: String,
    args: CallArgs,
}

impl Invocation {
    /// Snapshot a call.
    #[must_use]
    pub fn new(method: impl Into<String>, args: CallArgs) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// The invoked method's name.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The full argument list.
    #[must_use]
    pub fn args(&self) -> &CallArgs {
        &self.args
    }

    /// Positional arguments in call order.
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        self.args.positional()
    }

    /// Named arguments.
    #[must_use]
    pub fn named(&self) -> &BTreeMap<String, Value> {
        self.args.named()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_preserves_name_and_args() {
        let inv = Invocation::new("greet", crate::args!["alice"]);
        assert_eq!(inv.method(), "greet");
        assert_eq!(inv.positional(), &[Value::from("alice")]);
        assert!(inv.named().is_empty());
    }

    #[test]
    fn named_args_are_visible() {
        let call = crate::args![10i64].with_named("memo", "rent");
        let inv = Invocation::new("pay", call);
        assert_eq!(inv.named()["memo"], Value::from("rent"));
        assert_eq!(inv.args().len(), 2);
    }
}
