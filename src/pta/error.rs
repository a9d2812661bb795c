use thiserror::Error;

/// Failures raised while constructing a [`super::Pta`]. All are detected
/// eagerly at construction time; a `Pta` that exists is valid.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum PtaError {
    #[error("initial location is not a member of the location set")]
    InitialLocationNotDeclared,

    #[error("transition map has no entry for a declared location")]
    MissingTransitions,

    #[error("invariant map has no entry for a declared location")]
    MissingInvariant,

    #[error("a guard or invariant references undeclared clock index {clock}")]
    UndeclaredClockInInvariant { clock: usize },
}

/// Failures raised by the Region-MDP driver while scheduling, as opposed to
/// at construction time. These leave the driver's state unchanged; they are
/// caller bugs (picking a disabled action, delaying backwards), not
/// reflections of the automaton's own dynamics.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SchedulerError {
    #[error("action is not enabled in the current state")]
    ActionNotEnabled,

    #[error("delay must be non-negative, got {0}")]
    NegativeDelay(String),
}
