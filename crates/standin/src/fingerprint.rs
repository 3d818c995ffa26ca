#![forbid(unsafe_code)]

//! Argument fingerprinting for equality-based dispatch.
//!
//! [`fingerprint`] maps an argument list to a fixed-size key: equal argument
//! lists (positional values in order, named values by name) always produce
//! equal keys, and distinct lists collide only with BLAKE3's negligible
//! probability. The stubbing tables key their per-argument scopes on these
//! fingerprints.
//!
//! The encoding is canonical and domain-separated: every value is hashed
//! with a variant tag and, where needed, a length prefix, so `["ab"]` and
//! `["a", "b"]` cannot collide structurally. Identity values hash the
//! address of their allocation, matching their equality semantics.

use std::fmt;

use crate::value::{CallArgs, Value};

/// Encoding version folded into every key; bump on layout changes.
const DOMAIN: &[u8] = b"standin.args.v1";

/// Hex-prefixed rendering, mirroring checksum-style keys elsewhere.
const HEX_PREFIX: &str = "b3:";

// Variant tags for the canonical encoding.
const TAG_UNIT: u8 = 0x00;
const TAG_BOOL: u8 = 0x01;
const TAG_INT: u8 = 0x02;
const TAG_UINT: u8 = 0x03;
const TAG_FLOAT: u8 = 0x04;
const TAG_STR: u8 = 0x05;
const TAG_BYTES: u8 = 0x06;
const TAG_LIST: u8 = 0x07;
const TAG_MAP: u8 = 0x08;
const TAG_OPAQUE: u8 = 0x09;
const TAG_POSITIONAL: u8 = 0xa0;
const TAG_NAMED: u8 = 0xa1;

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// 32-byte key identifying an argument list by value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex rendering with the `b3:` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(HEX_PREFIX.len() + 64);
        out.push_str(HEX_PREFIX);
        for byte in self.0 {
            out.push_str(&format!("{byte:02x}"));
        }
        out
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Eight hex chars are enough to tell keys apart in logs.
        write!(
            f,
            "Fingerprint({}{:02x}{:02x}{:02x}{:02x})",
            HEX_PREFIX, self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Compute the fingerprint of an argument list.
#[must_use]
pub fn fingerprint(args: &CallArgs) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DOMAIN);

    hasher.update(&[TAG_POSITIONAL]);
    hash_len(&mut hasher, args.positional().len());
    for value in args.positional() {
        hash_value(&mut hasher, value);
    }

    hasher.update(&[TAG_NAMED]);
    hash_len(&mut hasher, args.named().len());
    for (name, value) in args.named() {
        hash_len(&mut hasher, name.len());
        hasher.update(name.as_bytes());
        hash_value(&mut hasher, value);
    }

    Fingerprint(*hasher.finalize().as_bytes())
}

fn hash_len(hasher: &mut blake3::Hasher, len: usize) {
    hasher.update(&(len as u64).to_le_bytes());
}

fn hash_value(hasher: &mut blake3::Hasher, value: &Value) {
    match value {
        Value::Unit => {
            hasher.update(&[TAG_UNIT]);
        }
        Value::Bool(b) => {
            hasher.update(&[TAG_BOOL, u8::from(*b)]);
        }
        Value::Int(i) => {
            hasher.update(&[TAG_INT]);
            hasher.update(&i.to_le_bytes());
        }
        Value::Uint(u) => {
            hasher.update(&[TAG_UINT]);
            hasher.update(&u.to_le_bytes());
        }
        Value::Float(x) => {
            hasher.update(&[TAG_FLOAT]);
            hasher.update(&x.to_bits().to_le_bytes());
        }
        Value::Str(s) => {
            hasher.update(&[TAG_STR]);
            hash_len(hasher, s.len());
            hasher.update(s.as_bytes());
        }
        Value::Bytes(b) => {
            hasher.update(&[TAG_BYTES]);
            hash_len(hasher, b.len());
            hasher.update(b);
        }
        Value::List(items) => {
            hasher.update(&[TAG_LIST]);
            hash_len(hasher, items.len());
            for item in items {
                hash_value(hasher, item);
            }
        }
        Value::Map(entries) => {
            hasher.update(&[TAG_MAP]);
            hash_len(hasher, entries.len());
            for (key, item) in entries {
                hash_len(hasher, key.len());
                hasher.update(key.as_bytes());
                hash_value(hasher, item);
            }
        }
        Value::Opaque(o) => {
            hasher.update(&[TAG_OPAQUE]);
            hasher.update(&(o.addr() as u64).to_le_bytes());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
