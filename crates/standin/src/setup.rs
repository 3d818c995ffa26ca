#![forbid(unsafe_code)]

//! Per-method stubbing: what happens when a proxied method is invoked.
//!
//! Every method starts out [`Action::Original`]: the call goes straight to
//! the wrapped target. `to_*` configurators replace that default, and
//! [`when`](MethodSetup::when) opens a nested scope that applies only to
//! calls whose arguments fingerprint to the given values — a specific scope
//! always wins over the method-wide default. Scopes are full setup tables
//! themselves, so a `when` scope can carry further `when` scopes.
//!
//! Action closures are deliberately not `Send`/`Sync`; the whole engine is
//! single-threaded, and this lets a stub capture `Rc<RefCell<...>>` state or
//! another proxy.

use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{CallResult, Failure};
use crate::fingerprint::{Fingerprint, fingerprint};
use crate::value::{CallArgs, Value};

/// Full replacement body: receives the call's arguments, produces its
/// result; the original method is never invoked.
pub type ReplaceFn = Arc<dyn Fn(&CallArgs) -> CallResult>;

/// Argument inspector: runs for its side effects only.
pub type InspectFn = Arc<dyn Fn(&CallArgs)>;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// What a resolved call does.
#[derive(Clone)]
pub enum Action {
    /// Invoke the original method and return its result unchanged.
    Original,
    /// Invoke the replacement instead of the original.
    Replace(ReplaceFn),
    /// Invoke the original for its side effects, discard its value, and
    /// return this one instead. A failure from the original still
    /// propagates.
    Return(Value),
    /// Fail without invoking the original.
    Raise(Failure),
    /// Invoke the inspector (result ignored), then the original, returning
    /// the original's result.
    Intercept(InspectFn),
}

impl Action {
    /// Stable lowercase name, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Original => "original",
            Action::Replace(_) => "replace",
            Action::Return(_) => "return",
            Action::Raise(_) => "raise",
            Action::Intercept(_) => "intercept",
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Original => f.write_str("Original"),
            Action::Replace(_) => f.write_str("Replace(..)"),
            Action::Return(value) => f.debug_tuple("Return").field(value).finish(),
            Action::Raise(failure) => f.debug_tuple("Raise").field(failure).finish(),
            Action::Intercept(_) => f.write_str("Intercept(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// MethodSetup
// ---------------------------------------------------------------------------

/// Stub table for one method (or one `when` scope of one): a default
/// action plus fingerprint-keyed nested scopes.
#[derive(Debug)]
pub struct MethodSetup {
    default: Action,
    specifics: FxHashMap<Fingerprint, MethodSetup>,
}

impl Default for MethodSetup {
    fn default() -> Self {
        Self {
            default: Action::Original,
            specifics: FxHashMap::default(),
        }
    }
}

impl MethodSetup {
    /// Replace this scope's default with a full method replacement.
    pub fn to_do_this(&mut self, body: impl Fn(&CallArgs) -> CallResult + 'static) {
        self.default = Action::Replace(Arc::new(body));
    }

    /// Replace this scope's default: still invoke the original for its side
    /// effects, but return `value`.
    pub fn to_return(&mut self, value: impl Into<Value>) {
        self.default = Action::Return(value.into());
    }

    /// Replace this scope's default: fail with `failure` instead of
    /// invoking the original.
    pub fn to_raise(&mut self, failure: Failure) {
        self.default = Action::Raise(failure);
    }

    /// Replace this scope's default: run `inspector` on the arguments, then
    /// invoke the original and return its result.
    pub fn to_intercept_with(&mut self, inspector: impl Fn(&CallArgs) + 'static) {
        self.default = Action::Intercept(Arc::new(inspector));
    }

    /// Open a fresh scope for calls whose arguments equal `args` by value.
    ///
    /// Configure the returned scope with the same `to_*` methods; it takes
    /// priority over this scope's default for matching calls. Calling
    /// `when` again with equal arguments replaces the previous scope.
    pub fn when(&mut self, args: CallArgs) -> &mut MethodSetup {
        let key = fingerprint(&args);
        match self.specifics.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.insert(MethodSetup::default());
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(MethodSetup::default()),
        }
    }

    /// The action applying to a call with `args`: the innermost matching
    /// `when` scope's default, or this scope's default.
    #[must_use]
    pub fn resolve(&self, args: &CallArgs) -> Action {
        self.resolve_key(fingerprint(args))
    }

    fn resolve_key(&self, key: Fingerprint) -> Action {
        if let Some(scope) = self.specifics.get(&key) {
            return scope.resolve_key(key);
        }
        self.default.clone()
    }
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

/// Stub tables for every configured method of one proxy.
#[derive(Debug, Default)]
pub struct Setup {
    methods: FxHashMap<String, MethodSetup>,
}

impl Setup {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stub table for `method`, created on first use.
    pub fn method(&mut self, method: &str) -> &mut MethodSetup {
        self.methods.entry(method.to_string()).or_default()
    }

    /// The action applying to a call; an entirely unconfigured method is
    /// [`Action::Original`].
    #[must_use]
    pub fn resolve(&self, method: &str, args: &CallArgs) -> Action {
        self.methods
            .get(method)
            .map_or(Action::Original, |setup| setup.resolve(args))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
