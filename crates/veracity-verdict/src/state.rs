//! The debate state machine
//!
//! Within one claim the roles are strictly ordered: advocate before
//! challenger before reconciler. Disagreement beyond the spread threshold
//! loops challenge/reconcile until the rounds budget is spent.

/// Current phase of a debate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebateState {
    /// Waiting for the advocate's initial position
    Advocate,
    /// Waiting for the challenger's opposing review
    Challenge,
    /// Waiting for the reconciler's final position
    Reconcile,
    /// Debate finished
    Done,
}

/// Tracks debate progression for one claim
#[derive(Debug, Clone)]
pub struct Debate {
    state: DebateState,
    rounds: u32,
    max_rounds: u32,
    spread_threshold: u8,
}

impl Debate {
    /// Start a debate in the advocate phase
    pub fn new(max_rounds: u32, spread_threshold: u8) -> Self {
        Self {
            state: DebateState::Advocate,
            rounds: 0,
            max_rounds,
            spread_threshold,
        }
    }

    /// Current phase
    pub fn state(&self) -> DebateState {
        self.state
    }

    /// Rounds consumed so far (the advocate pass counts as one)
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Record the advocate's position
    pub fn advocated(&mut self) {
        debug_assert_eq!(self.state, DebateState::Advocate);
        self.rounds = 1;
        self.state = DebateState::Challenge;
    }

    /// Record the challenger's position
    pub fn challenged(&mut self) {
        debug_assert_eq!(self.state, DebateState::Challenge);
        self.state = DebateState::Reconcile;
    }

    /// Record the reconciler's position given the advocate/challenger spread
    ///
    /// Disagreement beyond the threshold re-enters the challenge phase while
    /// rounds remain; otherwise the debate is done.
    pub fn reconciled(&mut self, spread: u8) {
        debug_assert_eq!(self.state, DebateState::Reconcile);
        self.rounds += 1;
        self.state = if spread > self.spread_threshold && self.rounds < self.max_rounds {
            DebateState::Challenge
        } else {
            DebateState::Done
        };
    }

    /// End the debate early (budget, cancellation, failure)
    pub fn finish(&mut self) {
        self.state = DebateState::Done;
    }
}
