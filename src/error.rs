use thiserror::Error;

/// Fatal failures of round generation. All of these abort the build
/// before anything is appended to the history.
#[derive(Debug, Error)]
pub enum RoundError {
    /// Malformed roster or override input, reported before any cost
    /// computation starts.
    #[error("invalid input: {0}")]
    Validation(String),

    /// No active players, so there is nothing to pair.
    #[error("no active players in the roster")]
    EmptyRound,

    /// An append that would break the round numbering. Round numbers
    /// must increase by exactly one.
    #[error("round {got} does not follow round {last}")]
    HistoryOrder { last: u32, got: u32 },

    /// The solver finished without a solution. The all-self-paired
    /// assignment is always feasible, so this signals a bug rather
    /// than bad input.
    #[error("solver found no feasible pairing for {players} players; this should be impossible since self-pairing is always available")]
    SolverInfeasible { players: usize },

    /// The solver ran past its configured time budget. No partial
    /// result is kept; retrying is up to the caller.
    #[error("solver exceeded its time budget of {budget_ms} ms")]
    SolverTimeout { budget_ms: u64 },
}
