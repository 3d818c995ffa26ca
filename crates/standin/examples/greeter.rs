//! Minimal double: record a greeting, stub one argument, inspect history.
//!
//! Run: `cargo run -p standin --example greeter`

use standin::{Failure, Value, args, wrap};

struct Person {
    name: String,
}

impl Person {
    fn greet(&self, other: &str) -> String {
        format!("hello {other}, i am {}", self.name)
    }
}

fn main() {
    let mut bob = wrap(Person { name: "bob".into() });

    // Calls with "grumpy" fail; everything else passes through.
    bob.setup("greet")
        .when(args!["grumpy"])
        .to_raise(Failure::message("boom"));

    let greet = |person: &mut Person, call: &standin::CallArgs| {
        let other = call.positional()[0].as_str().unwrap_or_default();
        Ok(Value::from(person.greet(other)))
    };

    println!("{:?}", bob.call("greet", args!["alice"], greet));
    println!("{:?}", bob.call("greet", args!["grumpy"], greet));

    println!("--- history ---");
    print!("{}", bob.calls().summary());
    bob.expect("greet").called().twice().expect("two greetings");
}
