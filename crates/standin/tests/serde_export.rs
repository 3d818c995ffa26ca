#![forbid(unsafe_code)]
#![cfg(feature = "serde")]

//! Exporting recorded invocations as JSON (requires `--features serde`).

use std::sync::Arc;

use standin::{Value, args, wrap};

#[derive(Debug, Default)]
struct Gate;

impl Gate {
    fn admit(&self, _who: &str) -> bool {
        true
    }
}

#[test]
fn recorded_invocations_serialize_to_json() {
    let mut gate = wrap(Gate);
    gate.call(
        "admit",
        args!["alice", 2i64].with_named("ticket", "vip"),
        |target, call| {
            Ok(Value::from(
                target.admit(call.positional()[0].as_str().unwrap_or_default()),
            ))
        },
    )
    .unwrap();

    let history = gate.expect("admit");
    let exported: Vec<&standin::Invocation> =
        history.records().iter().map(|r| r.as_ref()).collect();
    let json = serde_json::to_value(&exported).unwrap();

    assert_eq!(json[0]["method"], "admit");
    assert_eq!(json[0]["args"]["positional"][0], "alice");
    assert_eq!(json[0]["args"]["positional"][1], 2);
    assert_eq!(json[0]["args"]["named"]["ticket"], "vip");
}

#[test]
fn opaque_values_export_as_address_tags() {
    let mut gate = wrap(Gate);
    let badge = Arc::new(41i64);
    gate.call("admit", args![Value::opaque(badge)], |_, _| {
        Ok(Value::from(true))
    })
    .unwrap();

    let history = gate.expect("admit");
    let json = serde_json::to_value(history.records()[0].as_ref()).unwrap();
    let tag = json["args"]["positional"][0].as_str().unwrap();
    assert!(tag.starts_with("<opaque@0x"));
}
