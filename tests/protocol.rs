//! Protocol-level behavior: plan lines, sequence numbers, finalization,
//! and closing diagnostics, all captured through a buffer sink.

use tapkit::{BufferSink, Plan, Tap};

fn tap() -> Tap<BufferSink> {
    Tap::with_sink(BufferSink::new())
}

#[test]
fn planned_run_emits_plan_line_and_clean_diagnostics() {
    let mut t = tap();
    t.plan(2);
    t.ok(true, "first");
    t.ok(true, "second");

    let sink = t.into_sink();
    assert_eq!(sink.protocol(), "ok 1 - first\nok 2 - second\n1..2\n");
    assert_eq!(sink.diagnostic(), "");
}

#[test]
fn plan_of_two_with_one_failure() {
    let mut t = tap();
    t.plan(2);
    t.ok(true, "");
    t.ok(false, "");

    let tally = t.tally();
    assert_eq!((tally.passed, tally.failed), (1, 1));

    let sink = t.into_sink();
    assert_eq!(sink.protocol(), "ok 1\nnot ok 2\n1..2\n");
    assert!(sink.diagnostic().contains("#   Failed test at"));
    assert!(sink.diagnostic().contains("tests/protocol.rs"));
    assert!(sink
        .diagnostic()
        .contains("# Looks like you failed 1 test of 2\n"));
}

#[test]
fn unknown_plan_counts_what_actually_ran() {
    let mut t = tap();
    t.plan(-1);
    for i in 0..3 {
        t.ok(true, &format!("check {}", i));
    }
    t.done_testing(-1);

    let sink = t.into_sink();
    assert!(sink.protocol().ends_with("1..3\n"));
    assert_eq!(sink.diagnostic(), "");
}

#[test]
fn explicit_plan_at_finalize_reports_the_mismatch() {
    let mut t = tap();
    t.plan(-1);
    t.ok(true, "only one");
    t.done_testing(3);

    let sink = t.into_sink();
    assert_eq!(sink.protocol(), "ok 1 - only one\n1..1\n");
    assert!(sink
        .diagnostic()
        .contains("# Looks like you planned 3 tests but run 1\n"));
}

#[test]
fn done_testing_after_auto_finalize_is_silent() {
    let mut t = tap();
    t.plan(1);
    t.ok(true, "solo");
    t.done_testing(-1);

    assert_eq!(t.into_sink().protocol(), "ok 1 - solo\n1..1\n");
}

#[test]
fn replanning_discards_prior_counts() {
    let mut t = tap();
    t.plan(-1);
    t.ok(true, "stale");
    t.plan(1);
    t.ok(true, "fresh");

    // The sequence restarts after the re-plan and the plan line only
    // counts the fresh check.
    let sink = t.into_sink();
    assert_eq!(sink.protocol(), "ok 1 - stale\nok 1 - fresh\n1..1\n");
}

#[test]
fn plan_accepts_the_enum_form() {
    let mut t = tap();
    t.plan(Plan::Count(1));
    t.pass("explicit enum plan");

    assert!(t.into_sink().protocol().ends_with("1..1\n"));
}

#[test]
fn failed_check_quotes_its_label() {
    let mut t = tap();
    t.plan(-1);
    t.fail("broken thing");
    t.done_testing(-1);

    let sink = t.into_sink();
    assert!(sink
        .diagnostic()
        .contains("#   Failed test \"broken thing\" at"));
}

#[test]
fn diag_writes_an_indented_comment() {
    let mut t = tap();
    t.plan(-1);
    t.diag("top note");
    t.subtest("scoped", |s| {
        s.diag("nested note");
        s.pass("present");
    });
    t.done_testing(-1);

    let diag = t.into_sink().diagnostic().to_owned();
    assert!(diag.contains("# top note\n"));
    assert!(diag.contains("    # nested note\n"));
}

#[test]
fn check_supports_negation() {
    let mut t = tap();
    t.plan(2);
    assert!(t.check(false, true, "negated failure passes"));
    assert!(!t.check(true, true, "negated success fails"));

    let sink = t.into_sink();
    assert!(sink.protocol().starts_with("ok 1"));
    assert!(sink.protocol().contains("not ok 2"));
}
