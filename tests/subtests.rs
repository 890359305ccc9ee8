//! Subtest orchestration: folding, indentation, sequence locality, and
//! the empty-subtest failure.

use tapkit::{BufferSink, Tap};

fn tap() -> Tap<BufferSink> {
    Tap::with_sink(BufferSink::new())
}

#[test]
fn subtest_folds_into_a_single_parent_check() {
    let mut t = tap();
    t.plan(-1);
    t.subtest("inner", |s| {
        s.ok(true, "a");
        s.ok(true, "b");
    });
    t.done_testing(-1);

    let sink = t.into_sink();
    assert_eq!(
        sink.protocol(),
        "    ok 1 - a\n    ok 2 - b\n    1..2\nok 1 - inner\n1..1\n"
    );
    assert_eq!(sink.diagnostic(), "");
}

#[test]
fn one_failing_check_fails_the_whole_subtest() {
    let mut t = tap();
    t.plan(1);
    t.subtest("broken", |s| {
        s.ok(true, "fine");
        s.ok(false, "not fine");
        s.ok(true, "fine again");
    });

    let sink = t.into_sink();
    assert!(sink.protocol().contains("not ok 1 - broken\n"));
    // The sublevel's own diagnostics carry the sublevel's indent.
    assert!(sink.diagnostic().contains("    #   Failed test"));
    assert!(sink
        .diagnostic()
        .contains("    # Looks like you failed 1 test of 3\n"));
    assert!(sink.diagnostic().contains("#   Failed test \"broken\" at"));
}

#[test]
fn empty_subtest_fails_in_the_parent() {
    let mut t = tap();
    t.plan(1);
    t.subtest("hollow", |_| {});

    let sink = t.into_sink();
    assert!(sink.protocol().contains("    1..0\n"));
    assert!(sink
        .protocol()
        .contains("not ok 1 - No tests run for subtest \"hollow\"\n"));
    assert!(sink
        .diagnostic()
        .contains("No tests run for subtest \"hollow\""));
}

#[test]
fn sequence_numbers_are_local_to_each_level() {
    let mut t = tap();
    t.plan(-1);
    t.ok(true, "outer one");
    t.ok(true, "outer two");
    t.subtest("fresh numbering", |s| {
        s.ok(true, "starts at one");
    });
    t.done_testing(-1);

    let sink = t.into_sink();
    assert!(sink.protocol().contains("    ok 1 - starts at one\n"));
    assert!(sink.protocol().contains("ok 3 - fresh numbering\n"));
    assert!(sink.protocol().ends_with("1..3\n"));
}

#[test]
fn subtests_nest_and_indent_per_level() {
    let mut t = tap();
    t.plan(1);
    t.subtest("outer", |a| {
        a.subtest("middle", |b| {
            b.pass("leaf");
        });
    });

    let sink = t.into_sink();
    assert!(sink.protocol().contains("        ok 1 - leaf\n"));
    assert!(sink.protocol().contains("        1..1\n"));
    assert!(sink.protocol().contains("    ok 1 - middle\n"));
    assert!(sink.protocol().contains("ok 1 - outer\n"));
}

#[test]
fn a_body_with_its_own_concrete_plan_finalizes_once() {
    let mut t = tap();
    t.plan(1);
    t.subtest("self planned", |s| {
        s.plan(2);
        s.ok(true, "a");
        s.ok(true, "b");
    });

    let sink = t.into_sink();
    // Exactly one sublevel plan line even though the body hit its plan
    // before the orchestrator's own finalize.
    assert_eq!(sink.protocol().matches("    1..2\n").count(), 1);
    assert!(sink.protocol().contains("ok 1 - self planned\n"));
}

#[test]
fn nesting_to_the_configured_bound_succeeds() {
    let mut t = Tap::with_max_depth(BufferSink::new(), 3);
    t.plan(1);
    t.subtest("one", |a| {
        a.subtest("two", |b| {
            b.pass("deepest allowed");
        });
    });

    assert!(t.tally().all_passed());
}

#[test]
fn subtest_outcome_feeds_the_parent_tally() {
    let mut t = tap();
    t.plan(-1);
    t.subtest("good", |s| {
        s.pass("yes");
    });
    t.subtest("bad", |s| {
        s.fail("no");
    });
    t.done_testing(-1);

    let tally = t.tally();
    assert_eq!((tally.run, tally.passed, tally.failed), (2, 1, 1));
}
