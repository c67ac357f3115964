//! Per-operation lifecycle tracking with last-request-wins tokens.

use tracing::debug;

/// The asynchronous operations the session drives, tracked independently
/// so an upload in flight never blocks a concurrent query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Full dataset (re)load, including the mapping where applicable.
    DatasetLoad,
    /// Query-by-example submission.
    Query,
    /// Multi-file dataset upload.
    DatasetUpload,
    /// Wholesale mapper replacement.
    MapperUpload,
}

impl Operation {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            Operation::DatasetLoad => 0,
            Operation::Query => 1,
            Operation::DatasetUpload => 2,
            Operation::MapperUpload => 3,
        }
    }
}

/// Lifecycle state of one operation kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationState {
    /// Nothing in flight, nothing to report.
    #[default]
    Idle,
    /// A request was issued and has not resolved.
    Submitting,
    /// The most recent request succeeded; holds the status line to show.
    Succeeded(String),
    /// The most recent request failed; holds the status line to show.
    Failed(String),
}

impl OperationState {
    /// Returns true while a request is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self, OperationState::Submitting)
    }

    /// Returns true in a terminal (succeeded/failed) state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperationState::Succeeded(_) | OperationState::Failed(_)
        )
    }
}

/// Handle identifying one issued request.
///
/// Tokens are monotonically increasing per operation kind; only the
/// completion carrying the newest token for its kind may mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    op: Operation,
    seq: u64,
}

impl RequestToken {
    /// Returns the operation this token belongs to.
    pub fn operation(&self) -> Operation {
        self.op
    }
}

/// What became of a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Completion {
    /// The completion carried the current token and was applied.
    Applied,
    /// The completion belonged to a superseded request and was dropped
    /// without touching any state.
    Stale,
}

impl Completion {
    /// Returns true if the completion was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied)
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    seq: u64,
    state: OperationState,
}

/// Tracks every operation kind's lifecycle and issued tokens.
#[derive(Debug, Clone, Default)]
pub struct OperationTracker {
    slots: [Slot; Operation::COUNT],
}

impl OperationTracker {
    /// Creates a tracker with every operation idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new token for `op` and transitions it to `Submitting`.
    ///
    /// Re-entrant: beginning while a request is already in flight
    /// supersedes it, making the earlier request's completion stale.
    pub fn begin(&mut self, op: Operation) -> RequestToken {
        let slot = &mut self.slots[op.index()];
        slot.seq += 1;
        slot.state = OperationState::Submitting;
        RequestToken { op, seq: slot.seq }
    }

    /// Resolves `token` against the newest issued token for its kind.
    ///
    /// A current token moves the operation to the given terminal state and
    /// reports `Applied`; a superseded one leaves all state untouched and
    /// reports `Stale`.
    pub fn finish(&mut self, token: RequestToken, state: OperationState) -> Completion {
        let slot = &mut self.slots[token.op.index()];
        if token.seq != slot.seq {
            debug!(op = ?token.op, "dropping stale completion");
            return Completion::Stale;
        }

        slot.state = state;
        Completion::Applied
    }

    /// Returns the current state of `op`.
    pub fn state(&self, op: Operation) -> &OperationState {
        &self.slots[op.index()].state
    }

    /// Resets a terminal state back to `Idle` once it has been displayed.
    /// In-flight operations are left alone.
    pub fn acknowledge(&mut self, op: Operation) {
        let slot = &mut self.slots[op.index()];
        if slot.state.is_terminal() {
            slot.state = OperationState::Idle;
        }
    }
}
