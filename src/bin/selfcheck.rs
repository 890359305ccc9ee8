// Scenario fixture for the integration tests: exercises process-level
// behavior (exit codes, bail, depth overflow) that cannot be observed
// in-process.
// Usage: cargo run --bin selfcheck <scenario>

use std::env;
use std::process;

use tapkit::Tap;

fn main() {
    let scenario = env::args().nth(1).unwrap_or_default();
    let mut tap = Tap::new();
    match scenario.as_str() {
        "all-pass" => all_pass(&mut tap),
        "mixed" => mixed(&mut tap),
        "bail" => tap.bail("early abort requested"),
        "deep" => nest(&mut tap, 1),
        other => {
            eprintln!("unknown scenario: {:?}", other);
            process::exit(2);
        }
    }
    if tap.tally().failed > 0 {
        process::exit(1);
    }
}

fn all_pass(tap: &mut Tap) {
    tap.plan(2);
    tap.is_int(1, 1, "one is one");
    tap.is_str("foo", "foo", "foo is foo");
}

fn mixed(tap: &mut Tap) {
    tap.plan(-1);
    tap.ok(true, "first");
    tap.is_int(1, 0, "one is zero");
    tap.subtest("inner", |t| {
        t.pass("reached");
    });
    tap.done_testing(-1);
}

fn nest(tap: &mut Tap, depth: usize) {
    tap.subtest(&format!("level {}", depth), |t| {
        t.pass("entered");
        nest(t, depth + 1);
    });
}
