#![forbid(unsafe_code)]

//! Uniform value model for recorded call arguments.
//!
//! Every argument that flows through a proxy is normalized into a [`Value`],
//! and a whole call is a [`CallArgs`]: ordered positional values plus a
//! name-keyed map of named values. Matching and fingerprinting both rely on
//! the equality rules defined here:
//!
//! - Floats compare by bit pattern, so `NaN` matches `NaN` and `0.0` does
//!   not match `-0.0`. This keeps argument matching consistent with the
//!   fingerprint, which hashes the same bits.
//! - Integers are normalized at construction: any unsigned value that fits
//!   in `i64` becomes [`Value::Int`], so the same mathematical value always
//!   lands in the same variant.
//! - [`Value::Opaque`] carries a shared reference with identity equality; an
//!   opaque value matches only clones of itself.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A single argument value with structural equality.
#[derive(Clone, Debug)]
pub enum Value {
    /// The absence of a value (a `()` argument or return).
    Unit,
    Bool(bool),
    /// Signed integer; all integers that fit in `i64` normalize here.
    Int(i64),
    /// Unsigned integer above `i64::MAX`.
    Uint(u64),
    /// Floating point; equality and hashing use the bit pattern.
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// Reference-identity value; matches only clones of the same allocation.
    Opaque(OpaqueValue),
}

impl Value {
    /// Wrap a shared reference as an identity-matched value.
    ///
    /// Two [`Value::Opaque`] values are equal iff they point at the same
    /// allocation, so callers that want a later assertion to match must
    /// clone the same `Arc` at the call site and at the assertion site.
    #[must_use]
    pub fn opaque(value: Arc<dyn Any>) -> Self {
        Value::Opaque(OpaqueValue(value))
    }

    /// The string payload, if this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The signed integer payload, if this is a [`Value::Int`].
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The float payload, if this is a [`Value::Float`].
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// The bool payload, if this is a [`Value::Bool`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The opaque payload, if this is a [`Value::Opaque`].
    #[must_use]
    pub fn as_opaque(&self) -> Option<&OpaqueValue> {
        match self {
            Value::Opaque(o) => Some(o),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Uint(v),
        }
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::from(v as u64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Unit => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(entries) => serializer.collect_map(entries),
            // Identity values have no portable representation; export the
            // address tag used by their Debug form.
            Value::Opaque(o) => serializer.serialize_str(&format!("<opaque@{:#x}>", o.addr())),
        }
    }
}

// ---------------------------------------------------------------------------
// OpaqueValue
// ---------------------------------------------------------------------------

/// A shared reference compared by identity rather than by structure.
#[derive(Clone)]
pub struct OpaqueValue(Arc<dyn Any>);

impl OpaqueValue {
    /// Address of the referenced allocation; stable for the lifetime of the
    /// `Arc` family this value was cloned from.
    #[must_use]
    pub fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    /// Borrow the payload as a concrete type, if it is one.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for OpaqueValue {}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque(@{:#x})", self.addr())
    }
}

// ---------------------------------------------------------------------------
// CallArgs
// ---------------------------------------------------------------------------

/// The full argument list of one call: positional values in order, plus
/// named values keyed by name.
///
/// Named values live in a `BTreeMap` so their encoding order is canonical
/// for fingerprinting regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CallArgs {
    positional: Vec<Value>,
    named: BTreeMap<String, Value>,
}

impl CallArgs {
    /// An empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional value.
    pub fn push(&mut self, value: Value) {
        self.positional.push(value);
    }

    /// Builder form of [`CallArgs::push`].
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Builder: set a named value, replacing any prior value for `name`.
    #[must_use]
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Positional values in call order.
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Named values, keyed by name.
    #[must_use]
    pub fn named(&self) -> &BTreeMap<String, Value> {
        &self.named
    }

    /// Total number of values, positional and named.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// True when no values were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// Build a [`CallArgs`] from positional expressions.
///
/// Each expression is converted with [`Value::from`]; chain
/// [`CallArgs::with_named`] for named values.
///
/// ```
/// use standin::{args, Value};
///
/// let call = args!["alice", 25.0].with_named("memo", "rent");
/// assert_eq!(call.positional()[0], Value::from("alice"));
/// assert_eq!(call.named()["memo"], Value::from("rent"));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::value::CallArgs::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut call = $crate::value::CallArgs::new();
        $(call.push($crate::value::Value::from($value));)+
        call
    }};
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
