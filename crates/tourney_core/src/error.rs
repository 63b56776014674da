//! Error types for tournament operations

use thiserror::Error;

use crate::types::ParticipantId;

/// Errors raised by pairing, round and tournament operations.
///
/// None of these are retried internally. The caller decides whether to
/// abort or ask the operator again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    /// Fewer than two participants are available to pair.
    #[error("at least 2 participants are needed to pair a round, found {found}")]
    InsufficientParticipants { found: usize },

    /// A round cannot close while some of its matches have no result.
    #[error("round {round} still has {pending} unplayed match(es)")]
    RoundIncomplete { round: u32, pending: usize },

    /// The match already has a result; the original result is kept.
    #[error("result for round {round}, board {board} was already recorded")]
    MatchAlreadyRecorded { round: u32, board: usize },

    /// The tournament has finished and accepts no further round operations.
    #[error("tournament is already completed")]
    TournamentAlreadyCompleted,

    /// A new round was requested while the previous one is still open.
    #[error("round {round} is still in progress")]
    RoundInProgress { round: u32 },

    /// Every scheduled round has already been played.
    #[error("all {total_rounds} round(s) have already been played")]
    RoundLimitReached { total_rounds: u32 },

    /// A result or close was requested but no round is open.
    #[error("no round is currently open")]
    NoOpenRound,

    /// The board number does not exist in the open round.
    #[error("round {round} has no board {board}")]
    UnknownMatch { round: u32, board: usize },

    /// Participants cannot be added once pairing has begun.
    #[error("the roster is frozen once the first round is generated")]
    RosterFrozen,

    #[error("participant '{0}' is already enrolled")]
    DuplicateParticipant(ParticipantId),

    #[error("participant '{0}' is not enrolled in this tournament")]
    UnknownParticipant(ParticipantId),

    /// A fixed round count must schedule at least one round.
    #[error("a tournament needs at least one round")]
    InvalidRoundCount,

    /// A persisted record violates a tournament invariant.
    #[error("corrupt tournament record: {0}")]
    CorruptRecord(String),
}

/// Result type for tournament operations.
pub type Result<T> = std::result::Result<T, TournamentError>;

/// A numeric score that is negative or not a multiple of one half.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid score {0}: scores are non-negative multiples of 0.5")]
pub struct InvalidScore(pub f64);

/// Operator input that does not name a match outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized outcome '{0}', expected 1, 2 or draw")]
pub struct ParseOutcomeError(pub String);
