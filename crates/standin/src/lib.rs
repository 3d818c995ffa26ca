#![forbid(unsafe_code)]

//! Transparent test doubles: call recording, fluent expectations, and
//! per-argument stubbing.
//!
//! `standin` wraps a concrete value in a [`Proxy`] that forwards method
//! calls to the original while recording every routed invocation. Tests
//! then assert on the history (`expect`) or override behavior per method
//! (`setup`), optionally pinned to exact argument values (`when`).
//!
//! # Role of each module
//! - [`proxy`]: the composition root — resolves the configured action,
//!   records the call, runs the action with the original method as the
//!   continuation.
//! - [`call_log`]: the invocation ledger and its snapshot views.
//! - [`assertion`]: fluent count and argument checks over a snapshot.
//! - [`setup`]: per-method actions with fingerprint-keyed `when` scopes.
//! - [`fingerprint`]: BLAKE3 keys mapping equal argument lists to equal
//!   keys.
//! - [`value`]: the uniform `Value`/`CallArgs` argument model.
//! - [`invocation`], [`error`]: the record type and the two error
//!   taxonomies (unmet expectations vs. call failures).
//!
//! # Example
//!
//! ```
//! use standin::{args, wrap, Failure, Value};
//!
//! struct Person {
//!     name: String,
//! }
//!
//! impl Person {
//!     fn greet(&self, other: &str) -> String {
//!         format!("hello {other}, i am {}", self.name)
//!     }
//! }
//!
//! let mut bob = wrap(Person { name: "bob".into() });
//!
//! // Stub: calls with "grumpy" fail, everything else passes through.
//! bob.setup("greet")
//!     .when(args!["grumpy"])
//!     .to_raise(Failure::message("boom"));
//!
//! let greet = |person: &mut Person, call: &standin::CallArgs| {
//!     let other = call.positional()[0].as_str().unwrap_or_default();
//!     Ok(Value::from(person.greet(other)))
//! };
//!
//! let out = bob.call("greet", args!["alice"], greet).unwrap();
//! assert_eq!(out, Value::from("hello alice, i am bob"));
//! assert!(bob.call("greet", args!["grumpy"], greet).is_err());
//!
//! // Both calls were recorded, the failing one included.
//! bob.expect("greet").called().twice().unwrap();
//! bob.expect("greet").invocation(0).unwrap().with_arg("alice").unwrap();
//! ```
//!
//! # Model
//!
//! Single-threaded and synchronous by design: one proxy exclusively owns
//! its target, ledger, and stub table, and nothing locks or suspends.
//! Stubs are plain (non-`Send`) closures, so they may capture
//! `Rc<RefCell<...>>` state — including other proxies.
//!
//! # Feature flags
//! - `serde`: export recorded invocations (lossy for opaque values).
//! - `tracing`: debug-level events for action resolution and recording.

pub mod assertion;
pub mod call_log;
pub mod error;
pub mod fingerprint;
pub mod invocation;
pub mod proxy;
pub mod setup;
pub mod value;

pub use assertion::CallAssertion;
pub use call_log::{CallHistory, CallLog};
pub use error::{CallResult, CountCheck, ExpectationError, Failure};
pub use fingerprint::{Fingerprint, fingerprint};
pub use invocation::Invocation;
pub use proxy::{Proxy, wrap};
pub use setup::{Action, InspectFn, MethodSetup, ReplaceFn, Setup};
pub use value::{CallArgs, OpaqueValue, Value};
