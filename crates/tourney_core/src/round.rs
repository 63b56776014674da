//! Matches and rounds

use chrono::{DateTime, Utc};

use crate::error::{Result, TournamentError};
use crate::pairing::PairingPlan;
use crate::types::{MatchScore, Outcome, ParticipantId};

/// A scheduled contest between two distinct participants.
///
/// The result is unset until played and can be recorded exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    first: ParticipantId,
    second: ParticipantId,
    result: Option<MatchScore>,
}

impl Match {
    pub(crate) fn new(first: ParticipantId, second: ParticipantId) -> Self {
        debug_assert_ne!(first, second, "a match needs two distinct participants");
        Self {
            first,
            second,
            result: None,
        }
    }

    pub(crate) fn played(first: ParticipantId, second: ParticipantId, result: MatchScore) -> Self {
        Self {
            first,
            second,
            result: Some(result),
        }
    }

    pub fn first(&self) -> &ParticipantId {
        &self.first
    }

    pub fn second(&self) -> &ParticipantId {
        &self.second
    }

    pub fn result(&self) -> Option<MatchScore> {
        self.result
    }

    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }

    pub fn involves(&self, id: &ParticipantId) -> bool {
        &self.first == id || &self.second == id
    }

    /// Set the result unless one is already recorded. Returns whether it was set.
    pub(crate) fn record(&mut self, outcome: Outcome) -> bool {
        if self.result.is_some() {
            return false;
        }
        self.result = Some(outcome.scores());
        true
    }

    /// The other side of the match, if `id` plays in it.
    pub fn opponent_of(&self, id: &ParticipantId) -> Option<&ParticipantId> {
        if &self.first == id {
            Some(&self.second)
        } else if &self.second == id {
            Some(&self.first)
        } else {
            None
        }
    }
}

/// An ordered set of disjoint matches played together, plus timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    number: u32,
    name: String,
    matches: Vec<Match>,
    bye: Option<ParticipantId>,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
}

impl Round {
    /// Build round `number` from a pairing plan, one match per pairing.
    pub(crate) fn from_plan(number: u32, plan: &PairingPlan, start_time: DateTime<Utc>) -> Self {
        let matches = plan
            .pairings
            .iter()
            .map(|pairing| {
                let (first, second) = pairing.players();
                Match::new(first.clone(), second.clone())
            })
            .collect();

        Self {
            number,
            name: format!("Round {number}"),
            matches,
            bye: plan.bye.clone(),
            start_time,
            end_time: None,
        }
    }

    pub(crate) fn restore(
        number: u32,
        name: String,
        matches: Vec<Match>,
        bye: Option<ParticipantId>,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            number,
            name,
            matches,
            bye,
            start_time,
            end_time,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Look up a match by its 1-based board number.
    pub fn board(&self, board: usize) -> Option<&Match> {
        board.checked_sub(1).and_then(|index| self.matches.get(index))
    }

    pub fn bye(&self) -> Option<&ParticipantId> {
        self.bye.as_ref()
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn is_closed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Number of matches still waiting for a result.
    pub fn pending_matches(&self) -> usize {
        self.matches.iter().filter(|game| !game.is_played()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.pending_matches() == 0
    }

    /// Everyone scheduled this round, including the bye.
    pub fn participants(&self) -> impl Iterator<Item = &ParticipantId> {
        self.matches
            .iter()
            .flat_map(|game| [&game.first, &game.second])
            .chain(self.bye.as_ref())
    }

    /// Record the outcome of the match on `board` (1-based).
    ///
    /// A match that already has a result is left untouched and the call
    /// fails with `MatchAlreadyRecorded`.
    pub(crate) fn record_result(&mut self, board: usize, outcome: Outcome) -> Result<&Match> {
        let round = self.number;
        let game = board
            .checked_sub(1)
            .and_then(|index| self.matches.get_mut(index))
            .ok_or(TournamentError::UnknownMatch { round, board })?;

        if !game.record(outcome) {
            return Err(TournamentError::MatchAlreadyRecorded { round, board });
        }
        Ok(game)
    }

    /// Close the round. Every match must have a result.
    pub(crate) fn close(&mut self, end_time: DateTime<Utc>) -> Result<()> {
        let pending = self.pending_matches();
        if pending > 0 {
            return Err(TournamentError::RoundIncomplete {
                round: self.number,
                pending,
            });
        }
        self.end_time = Some(end_time);
        Ok(())
    }
}

#[cfg(test)]
#[path = "round_tests.rs"]
mod round_tests;
