//! Per-level check counters and the bounded nesting stack.
//!
//! Every nesting depth owns one [`TestLevel`]: how many checks were
//! planned, how many ran, and how they split into passed and failed.
//! The [`ContextStack`] keeps one level per depth, with the root scope at
//! index 0, and enforces the maximum subtest depth. The stack is owned by
//! the engine and threaded through every call rather than living in
//! process-wide state, which keeps the depth bound testable on its own.

use crate::error::TapError;

/// Default bound on nesting depth, counting the root scope.
pub const MAX_DEPTH: usize = 10;

/// Declared expectation for how many checks a level will run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Determine the plan from however many checks actually run.
    Unknown,
    /// Exactly this many checks are expected.
    Count(u32),
}

impl From<i32> for Plan {
    /// Preserves the TAP sign convention: any negative count means the
    /// plan is unknown.
    fn from(n: i32) -> Self {
        if n < 0 {
            Plan::Unknown
        } else {
            Plan::Count(n as u32)
        }
    }
}

/// Counters for one nesting depth.
///
/// `run == passed + failed` holds at all times. `finalized` guards the
/// plan line against double emission when a level reaches a concrete plan
/// and the caller later finalizes again.
#[derive(Debug, Clone, Copy)]
pub struct TestLevel {
    pub planned: Plan,
    pub run: u32,
    pub passed: u32,
    pub failed: u32,
    pub finalized: bool,
}

impl TestLevel {
    fn fresh() -> Self {
        Self {
            planned: Plan::Unknown,
            run: 0,
            passed: 0,
            failed: 0,
            finalized: false,
        }
    }

    /// True when every check that ran on this level passed.
    pub fn all_passed(&self) -> bool {
        self.run == self.passed
    }
}

/// Fixed-capacity stack of [`TestLevel`]s indexed by nesting depth.
///
/// The root level always exists; `enter`/`leave` bracket each subtest.
#[derive(Debug)]
pub struct ContextStack {
    levels: Vec<TestLevel>,
    max_depth: usize,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::with_max_depth(MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        assert!(max_depth >= 1, "the stack needs room for the root level");
        let mut levels = Vec::with_capacity(max_depth);
        levels.push(TestLevel::fresh());
        Self { levels, max_depth }
    }

    /// Current nesting depth; 0 at the root.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn top(&self) -> &TestLevel {
        self.levels.last().expect("the root level always exists")
    }

    pub fn top_mut(&mut self) -> &mut TestLevel {
        self.levels.last_mut().expect("the root level always exists")
    }

    /// Push a fresh level with zeroed counters and an unknown plan.
    pub fn enter(&mut self) -> Result<(), TapError> {
        if self.levels.len() == self.max_depth {
            return Err(TapError::DepthExceeded {
                max: self.max_depth,
            });
        }
        self.levels.push(TestLevel::fresh());
        Ok(())
    }

    /// Pop the current level and hand its final tallies to the caller.
    pub fn leave(&mut self) -> Result<TestLevel, TapError> {
        if self.levels.len() == 1 {
            return Err(TapError::RootUnderflow);
        }
        Ok(self.levels.pop().expect("the stack holds more than the root"))
    }

    /// Declare (or re-declare) the plan for the current level, discarding
    /// any counts it has accumulated so far.
    pub fn set_plan(&mut self, plan: Plan) {
        let top = self.top_mut();
        top.planned = plan;
        top.run = 0;
        top.passed = 0;
        top.failed = 0;
        top.finalized = false;
    }
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}
