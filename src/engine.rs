//! The TAP engine: assertion recording, finalization, and subtests.
//!
//! A [`Tap`] value owns the nesting stack and the output sink for one test
//! run. Every check, typed or raw, funnels through [`Tap::record`], which
//! updates the current level's counters, emits the `ok` / `not ok` line,
//! and auto-finalizes the level the moment it reaches a concrete plan.
//!
//! Source locations on failure diagnostics come from `#[track_caller]` on
//! the public entry points; callers never pass file and line explicitly.

use std::panic::Location;
use std::process;

use crate::context::{ContextStack, Plan, TestLevel};
use crate::error::TapError;
use crate::sink::{OutputSink, StandardSink};

/// Spaces of indentation per nesting depth.
const INDENT: usize = 4;

/// A single test run: the context stack plus the output sink.
///
/// The engine is strictly synchronous and single-threaded; exclusive
/// access is enforced by the `&mut` receivers.
pub struct Tap<S: OutputSink = StandardSink> {
    stack: ContextStack,
    sink: S,
}

impl Tap<StandardSink> {
    /// Engine writing TAP to stdout and diagnostics to stderr.
    pub fn new() -> Self {
        Self::with_sink(StandardSink::default())
    }
}

impl Default for Tap<StandardSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: OutputSink> Tap<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            stack: ContextStack::new(),
            sink,
        }
    }

    /// Engine with a nesting bound other than [`MAX_DEPTH`](crate::context::MAX_DEPTH).
    pub fn with_max_depth(sink: S, max_depth: usize) -> Self {
        Self {
            stack: ContextStack::with_max_depth(max_depth),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Current nesting depth; 0 at the root.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Snapshot of the current level's counters.
    pub fn tally(&self) -> TestLevel {
        *self.stack.top()
    }

    // ========================================================================
    // PLANNING AND FINALIZATION
    // ========================================================================

    /// Declare how many checks the current level expects. Accepts a
    /// [`Plan`] or a raw count with the TAP sign convention (negative
    /// means unknown). Re-declaring mid-level discards prior counts.
    pub fn plan(&mut self, plan: impl Into<Plan>) {
        self.stack.set_plan(plan.into());
    }

    /// Explicitly finalize the current level: emit the plan line and the
    /// closing diagnostics. Pass an unknown plan to adopt however many
    /// checks actually ran. A no-op on an already finalized level.
    pub fn done_testing(&mut self, plan: impl Into<Plan>) {
        if self.stack.top().finalized {
            return;
        }
        self.finalize(plan.into());
    }

    fn finalize(&mut self, plan: Plan) {
        let planned = match plan {
            Plan::Unknown => self.stack.top().run,
            Plan::Count(n) => n,
        };
        self.stack.top_mut().planned = Plan::Count(planned);

        let level = *self.stack.top();
        let line = format!("{}1..{}", self.indent(), level.run);
        self.emit_plan(&line);
        if level.run != planned {
            self.diag(&format!(
                "Looks like you planned {} tests but run {}",
                planned, level.run
            ));
        }
        if level.failed > 0 {
            self.diag(&format!(
                "Looks like you failed {} test of {}",
                level.failed, level.run
            ));
        }
        self.stack.top_mut().finalized = true;
    }

    // ========================================================================
    // THE RECORD FUNNEL
    // ========================================================================

    /// Record one check: count it, emit the result line, and auto-finalize
    /// the level when it reaches a concrete plan. Returns the effective
    /// result so comparators can decide whether to emit got/expected
    /// diagnostics.
    pub(crate) fn record(
        &mut self,
        outcome: bool,
        negate: bool,
        location: &Location<'_>,
        label: &str,
    ) -> bool {
        let passed = outcome != negate;

        let seq = {
            let top = self.stack.top_mut();
            top.run += 1;
            if passed {
                top.passed += 1;
            } else {
                top.failed += 1;
            }
            top.run
        };

        let mut line = format!(
            "{}{}ok {}",
            self.indent(),
            if passed { "" } else { "not " },
            seq
        );
        if !label.is_empty() {
            line.push_str(" - ");
            line.push_str(label);
        }
        self.emit_result(passed, &line);

        if !passed {
            let quoted = if label.is_empty() {
                String::new()
            } else {
                format!(" \"{}\"", label)
            };
            self.diag(&format!(
                "  Failed test{} at {} line {}",
                quoted,
                location.file(),
                location.line()
            ));
        }

        let top = *self.stack.top();
        if let Plan::Count(n) = top.planned {
            if top.run == n && !top.finalized {
                self.finalize(Plan::Count(n));
            }
        }

        passed
    }

    // ========================================================================
    // RAW CHECKS
    // ========================================================================

    /// Record the result of an arbitrary boolean check. With `negate` the
    /// outcome is inverted before it is counted.
    #[track_caller]
    pub fn check(&mut self, outcome: bool, negate: bool, label: &str) -> bool {
        self.record(outcome, negate, Location::caller(), label)
    }

    /// Record the result of an arbitrary boolean check.
    #[track_caller]
    pub fn ok(&mut self, outcome: bool, label: &str) -> bool {
        self.record(outcome, false, Location::caller(), label)
    }

    /// Record an unconditional pass.
    #[track_caller]
    pub fn pass(&mut self, label: &str) -> bool {
        self.record(true, false, Location::caller(), label)
    }

    /// Record an unconditional failure.
    #[track_caller]
    pub fn fail(&mut self, label: &str) -> bool {
        self.record(false, false, Location::caller(), label)
    }

    // ========================================================================
    // SUBTESTS
    // ========================================================================

    /// Run `body` as an independent nested test and fold its aggregate
    /// outcome into a single check at the current level. A subtest that
    /// runs zero checks records as a failure in its parent. Nesting past
    /// the depth bound aborts the run.
    #[track_caller]
    pub fn subtest<F>(&mut self, label: &str, body: F) -> bool
    where
        F: FnOnce(&mut Self),
    {
        let location = Location::caller();

        if let Err(err) = self.stack.enter() {
            self.fatal(err);
        }
        self.stack.set_plan(Plan::Unknown);

        body(self);

        if !self.stack.top().finalized {
            self.finalize(Plan::Unknown);
        }
        let sub = match self.stack.leave() {
            Ok(level) => level,
            Err(err) => self.fatal(err),
        };

        if sub.run == 0 {
            let label = format!("No tests run for subtest \"{}\"", label);
            self.record(false, false, location, &label)
        } else {
            self.record(sub.all_passed(), false, location, label)
        }
    }

    // ========================================================================
    // DIAGNOSTICS AND ABORT
    // ========================================================================

    /// Write an indented `# `-prefixed comment to the diagnostic stream.
    pub fn diag(&mut self, message: &str) {
        let line = format!("{}# {}", self.indent(), message);
        if let Err(source) = self.sink.diag(&line) {
            self.fatal(TapError::Io {
                stream: "diagnostic",
                source,
            });
        }
    }

    /// Emit an aligned got/expected pair after a failed comparison. With
    /// `negate` there is no single expected value to show, so the expected
    /// line reads "anything else".
    pub(crate) fn report_values(&mut self, negate: bool, got: &str, expected: &str) {
        self.diag(&format!("    {:>8}: {}", "got", got));
        if negate {
            self.diag(&format!("    {:>8}: anything else", "expected"));
        } else {
            self.diag(&format!("    {:>8}: {}", "expected", expected));
        }
    }

    /// Abort the whole run: write the reason to the diagnostic stream and
    /// terminate the process. Nothing is unwound.
    pub fn bail(&mut self, why: &str) -> ! {
        let _ = self.sink.diag(why);
        process::exit(255);
    }

    fn fatal(&mut self, err: TapError) -> ! {
        let why = err.to_string();
        self.bail(&why)
    }

    // ========================================================================
    // PRIVATE HELPERS
    // ========================================================================

    fn indent(&self) -> String {
        " ".repeat(INDENT * self.stack.depth())
    }

    fn emit_result(&mut self, passed: bool, line: &str) {
        if let Err(source) = self.sink.result(passed, line) {
            self.fatal(TapError::Io {
                stream: "protocol",
                source,
            });
        }
    }

    fn emit_plan(&mut self, line: &str) {
        if let Err(source) = self.sink.plan(line) {
            self.fatal(TapError::Io {
                stream: "protocol",
                source,
            });
        }
    }
}
