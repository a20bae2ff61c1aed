//! Termination guard for iterate-to-fixpoint passes
//!
//! A pass that rewrites its own output can oscillate when two rules feed
//! each other. The guard counts iterations and forces termination at a
//! bound instead of letting the pipeline spin.

/// Outcome of observing one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Output differed from input; iterate again
    Running,
    /// Output equalled input; the pass reached its fixpoint
    Converged,
    /// The bound was hit while output still changed
    MaxIterationsExceeded,
}

/// Default iteration bound for iterate-to-fixpoint passes
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Counts pass iterations and decides when to stop.
///
/// `observe` drives the state machine: equal input and output means
/// [`GuardState::Converged`]; a changed output either keeps
/// [`GuardState::Running`] or, at the bound,
/// [`GuardState::MaxIterationsExceeded`]. The caller keeps the last
/// produced text in every terminal state.
#[derive(Debug)]
pub struct LoopGuard {
    max_iterations: usize,
    iterations: usize,
    state: GuardState,
}

impl LoopGuard {
    /// Creates a guard with the given bound; a bound of zero is clamped to one
    pub fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations: max_iterations.max(1),
            iterations: 0,
            state: GuardState::Running,
        }
    }

    /// Records one application of the pass and returns the new state
    pub fn observe(&mut self, before: &str, after: &str) -> GuardState {
        debug_assert_eq!(self.state, GuardState::Running, "guard observed after stop");
        self.iterations += 1;
        self.state = if before == after {
            GuardState::Converged
        } else if self.iterations >= self.max_iterations {
            GuardState::MaxIterationsExceeded
        } else {
            GuardState::Running
        };
        self.state
    }

    /// Iterations observed so far
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Current state
    pub fn state(&self) -> GuardState {
        self.state
    }
}

impl Default for LoopGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}
