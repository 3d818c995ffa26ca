#![forbid(unsafe_code)]

//! The composition root: one wrapped target, one call log, one stub table.
//!
//! A [`Proxy`] does not reflect over its target; the host has no dynamic
//! member access. Instead it exposes a single interception entry point,
//! [`Proxy::call`], and callers that want a drop-in double declare a thin
//! wrapper type whose methods each route through it:
//!
//! ```
//! use standin::{args, wrap, CallResult, Proxy, Value};
//!
//! struct Person {
//!     name: String,
//! }
//!
//! impl Person {
//!     fn greet(&self, other: &str) -> String {
//!         format!("hello {other}")
//!     }
//! }
//!
//! struct PersonDouble {
//!     proxy: Proxy<Person>,
//! }
//!
//! impl PersonDouble {
//!     fn greet(&mut self, other: &str) -> CallResult {
//!         self.proxy.call("greet", args![other], |person, call| {
//!             let other = call.positional()[0].as_str().unwrap_or_default();
//!             Ok(Value::from(person.greet(other)))
//!         })
//!     }
//! }
//!
//! let mut bob = PersonDouble { proxy: wrap(Person { name: "bob".into() }) };
//! assert_eq!(bob.greet("alice").unwrap(), Value::from("hello alice"));
//! bob.proxy.expect("greet").called().once().unwrap();
//! # let _ = &bob.proxy.target().name;
//! ```
//!
//! Plain data members of the target pass straight through `Deref` (or
//! [`Proxy::target`]) with no recording; only calls routed through
//! [`Proxy::call`] are visible to expectations. Calls made on a raw,
//! unwrapped value are invisible to every proxy.

use std::ops::Deref;

use crate::call_log::{CallHistory, CallLog};
use crate::error::CallResult;
use crate::invocation::Invocation;
use crate::setup::{Action, MethodSetup, Setup};
use crate::value::CallArgs;

/// Wrap a target for recording and stubbing. The sole entry point.
#[must_use]
pub fn wrap<T>(target: T) -> Proxy<T> {
    Proxy::new(target)
}

/// Transparent recording/stubbing wrapper around one target value.
#[derive(Debug)]
pub struct Proxy<T> {
    target: T,
    log: CallLog,
    setup: Setup,
}

impl<T> Proxy<T> {
    /// See [`wrap`].
    #[must_use]
    pub fn new(target: T) -> Self {
        Self {
            target,
            log: CallLog::new(),
            setup: Setup::new(),
        }
    }

    /// Route one method call through the engine.
    ///
    /// `original` is the continuation that invokes the real method on the
    /// target; whether and when it runs depends on the action configured
    /// for `(method, args)`:
    ///
    /// 1. The stub table picks the action — the innermost `when` scope
    ///    matching the arguments by value, else the method default, else
    ///    the original behavior.
    /// 2. The invocation is recorded *before* the action runs, so a call
    ///    that fails (or whose stub consults other proxies) is already
    ///    visible in the history.
    /// 3. The action executes and its result is returned unchanged.
    ///
    /// The borrow of `self` precludes re-entering the same proxy from
    /// inside a stub; stubs that re-enter *another* proxy (via
    /// `Rc<RefCell<..>>`) have their nested calls recorded in full before
    /// the outer call returns.
    pub fn call<F>(&mut self, method: &str, args: CallArgs, mut original: F) -> CallResult
    where
        F: FnMut(&mut T, &CallArgs) -> CallResult,
    {
        let action = self.setup.resolve(method, &args);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "standin::proxy",
            method,
            action = action.kind(),
            "resolved action"
        );
        self.log.notify(Invocation::new(method, args.clone()));
        match action {
            Action::Original => original(&mut self.target, &args),
            Action::Replace(body) => body(&args),
            Action::Return(value) => {
                original(&mut self.target, &args)?;
                Ok(value)
            }
            Action::Raise(failure) => Err(failure),
            Action::Intercept(inspector) => {
                inspector(&args);
                original(&mut self.target, &args)
            }
        }
    }

    /// Snapshot view of `method`'s recorded calls; empty for a method never
    /// routed through this proxy.
    #[must_use]
    pub fn expect(&self, method: &str) -> CallHistory {
        self.log.for_method(method)
    }

    /// The stub table for `method`, created on first use.
    pub fn setup(&mut self, method: &str) -> &mut MethodSetup {
        self.setup.method(method)
    }

    /// Discard all recorded history. Configured stubs are untouched.
    pub fn reset(&mut self) {
        self.log.reset();
    }

    /// The full call log, for summaries and custom inspection.
    #[must_use]
    pub fn calls(&self) -> &CallLog {
        &self.log
    }

    /// The wrapped target.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutable access to the wrapped target. Later mutations are respected:
    /// [`Proxy::call`] always hands the continuation the target's current
    /// state.
    #[must_use]
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Unwrap, discarding history and stubs.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.target
    }
}

impl<T> Deref for Proxy<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.target
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::Failure;
    use crate::value::Value;

    /// Toy target with observable state.
    #[derive(Debug, Default)]
    struct Counter {
        total: i64,
        label: &'static str,
    }

    impl Counter {
        fn add(&mut self, amount: i64) -> i64 {
            self.total += amount;
            self.total
        }
    }

    fn add_call(proxy: &mut Proxy<Counter>, amount: i64) -> CallResult {
        proxy.call("add", crate::args![amount], |counter, call| {
            let amount = call.positional()[0].as_i64().unwrap_or(0);
            Ok(Value::from(counter.add(amount)))
        })
    }

    #[test]
    fn original_behavior_passes_through() {
        let mut proxy = wrap(Counter::default());
        assert_eq!(add_call(&mut proxy, 2).unwrap(), Value::from(2i64));
        assert_eq!(add_call(&mut proxy, 3).unwrap(), Value::from(5i64));
        assert_eq!(proxy.target().total, 5);
        proxy.expect("add").called().twice().unwrap();
    }

    #[test]
    fn return_override_still_runs_the_original() {
        let mut proxy = wrap(Counter::default());
        proxy.setup("add").to_return(99i64);
        assert_eq!(add_call(&mut proxy, 2).unwrap(), Value::from(99i64));
        // Side effect happened even though the value was overridden.
        assert_eq!(proxy.target().total, 2);
    }

    #[test]
    fn raise_skips_the_original_but_records_the_call() {
        let mut proxy = wrap(Counter::default());
        proxy.setup("add").to_raise(Failure::message("boom"));
        let err = add_call(&mut proxy, 2).unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(proxy.target().total, 0);
        proxy.expect("add").called().once().unwrap();
    }

    #[test]
    fn replace_skips_the_original() {
        let mut proxy = wrap(Counter::default());
        proxy
            .setup("add")
            .to_do_this(|call| Ok(call.positional()[0].clone()));
        assert_eq!(add_call(&mut proxy, 7).unwrap(), Value::from(7i64));
        assert_eq!(proxy.target().total, 0);
    }

    #[test]
    fn intercept_runs_before_the_original() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let seen = order.clone();
        let mut proxy = wrap(Counter::default());
        proxy.setup("add").to_intercept_with(move |call| {
            seen.borrow_mut()
                .push(format!("inspect {:?}", call.positional()[0]));
        });

        let result = proxy.call("add", crate::args![4i64], |counter, call| {
            order.borrow_mut().push("original".to_string());
            Ok(Value::from(
                counter.add(call.positional()[0].as_i64().unwrap_or(0)),
            ))
        });

        assert_eq!(result.unwrap(), Value::from(4i64));
        assert_eq!(
            order.borrow().as_slice(),
            ["inspect Int(4)".to_string(), "original".to_string()]
        );
        assert_eq!(proxy.target().total, 4);
    }

    #[test]
    fn failing_original_propagates_through_return_override() {
        let mut proxy = wrap(Counter::default());
        proxy.setup("add").to_return(99i64);
        let err = proxy
            .call("add", crate::args![1i64], |_, _| {
                Err(Failure::message("target broke"))
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "target broke");
        proxy.expect("add").called().once().unwrap();
    }

    #[test]
    fn target_mutation_is_respected_by_later_calls() {
        let mut proxy = wrap(Counter::default());
        proxy.target_mut().total = 100;
        assert_eq!(add_call(&mut proxy, 1).unwrap(), Value::from(101i64));
    }

    #[test]
    fn plain_members_pass_through_deref_without_recording() {
        let mut proxy = wrap(Counter {
            total: 0,
            label: "bob",
        });
        assert_eq!(proxy.label, "bob");
        proxy.target_mut().label = "alice";
        assert_eq!(proxy.label, "alice");
        assert!(proxy.calls().is_empty());
    }

    #[test]
    fn reset_clears_history_but_not_stubs() {
        let mut proxy = wrap(Counter::default());
        proxy.setup("add").to_return(42i64);
        add_call(&mut proxy, 1).unwrap();
        proxy.reset();
        proxy.expect("add").called().never().unwrap();
        // Stub survives the reset.
        assert_eq!(add_call(&mut proxy, 1).unwrap(), Value::from(42i64));
    }

    #[test]
    fn into_inner_returns_the_target() {
        let mut proxy = wrap(Counter::default());
        add_call(&mut proxy, 3).unwrap();
        let counter = proxy.into_inner();
        assert_eq!(counter.total, 3);
    }
}
