//! Tournament state machine.
//!
//! A tournament moves `NotStarted -> InProgress -> Completed`. Round 1 is
//! generated from the frozen roster, then each round is played to
//! completion (every result recorded, round closed) before the next one is
//! paired. A paused tournament is simply an `InProgress` tournament that was
//! saved between two of these calls.
//!
//! `current_round` is the number of the round that is open, or that will be
//! opened next. Rounds numbered below it are closed.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, TournamentError};
use crate::pairing::{self, PairingHistory};
use crate::participant::{Participant, ParticipantSnapshot};
use crate::round::Round;
use crate::types::{MatchScore, Outcome, ParticipantId, Score};

/// Lifecycle status of a tournament
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentStatus::NotStarted => write!(f, "not started"),
            TournamentStatus::InProgress => write!(f, "in progress"),
            TournamentStatus::Completed => write!(f, "completed"),
        }
    }
}

/// How many rounds a tournament schedules for its participant count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundCount {
    /// `n - 1` rounds, enough for every pair to meet once.
    #[default]
    RoundRobin,
    /// `max(4, ceil(log2(n)))` rounds.
    Swiss,
    /// A fixed number of rounds.
    Fixed(u32),
}

impl RoundCount {
    pub fn total_rounds(self, participants: usize) -> u32 {
        match self {
            RoundCount::RoundRobin => {
                u32::try_from(participants.saturating_sub(1)).unwrap_or(u32::MAX)
            }
            RoundCount::Swiss => {
                let mut rounds = 0;
                while (1usize << rounds) < participants {
                    rounds += 1;
                }
                rounds.max(4)
            }
            RoundCount::Fixed(rounds) => rounds,
        }
    }
}

impl fmt::Display for RoundCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundCount::RoundRobin => write!(f, "round-robin"),
            RoundCount::Swiss => write!(f, "swiss"),
            RoundCount::Fixed(rounds) => write!(f, "{rounds}"),
        }
    }
}

impl FromStr for RoundCount {
    type Err = TournamentError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "round-robin" | "roundrobin" | "rr" => Ok(RoundCount::RoundRobin),
            "swiss" => Ok(RoundCount::Swiss),
            other => match other.parse::<u32>() {
                Ok(rounds) if rounds > 0 => Ok(RoundCount::Fixed(rounds)),
                _ => Err(TournamentError::InvalidRoundCount),
            },
        }
    }
}

/// Descriptive fields passed through to storage and reports untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentDetails {
    pub name: String,
    pub location: String,
    pub description: String,
}

impl TournamentDetails {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// What happens after a round closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundProgress {
    /// The given round is next to be paired.
    NextRound(u32),
    /// That was the final round; the tournament is completed.
    Completed,
}

/// A multi-round tournament and all of its rounds and participants.
#[derive(Debug, Clone, PartialEq)]
pub struct Tournament {
    pub(crate) details: TournamentDetails,
    pub(crate) participants: Vec<Participant>,
    pub(crate) rounds: Vec<Round>,
    pub(crate) round_count: RoundCount,
    pub(crate) total_rounds: u32,
    pub(crate) current_round: u32,
    pub(crate) status: TournamentStatus,
    pub(crate) start_date: Option<DateTime<Utc>>,
    pub(crate) end_date: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Create a tournament that has not started yet.
    ///
    /// # Errors
    /// `DuplicateParticipant` if two snapshots share an id, and
    /// `InvalidRoundCount` for `RoundCount::Fixed(0)`.
    pub fn new(
        details: TournamentDetails,
        roster: impl IntoIterator<Item = ParticipantSnapshot>,
        round_count: RoundCount,
    ) -> Result<Self> {
        if round_count == RoundCount::Fixed(0) {
            return Err(TournamentError::InvalidRoundCount);
        }

        let mut tournament = Self {
            details,
            participants: Vec::new(),
            rounds: Vec::new(),
            round_count,
            total_rounds: round_count.total_rounds(0),
            current_round: 1,
            status: TournamentStatus::NotStarted,
            start_date: None,
            end_date: None,
        };
        for snapshot in roster {
            tournament.enroll(snapshot)?;
        }
        Ok(tournament)
    }

    /// Add a participant before the first round is generated.
    pub fn enroll(&mut self, snapshot: ParticipantSnapshot) -> Result<()> {
        if self.status != TournamentStatus::NotStarted {
            return Err(TournamentError::RosterFrozen);
        }
        if self.participant(&snapshot.id).is_some() {
            return Err(TournamentError::DuplicateParticipant(snapshot.id));
        }

        self.participants.push(Participant::enroll(snapshot));
        self.total_rounds = self.round_count.total_rounds(self.participants.len());
        Ok(())
    }

    /// Pair and open the next round.
    ///
    /// The bye participant, if any, is credited half a point immediately.
    /// The first call freezes the roster and moves the tournament to
    /// `InProgress`.
    pub fn start_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Round> {
        self.ensure_not_completed()?;
        if let Some(open) = self.open_round() {
            return Err(TournamentError::RoundInProgress {
                round: open.number(),
            });
        }
        if self.participants.len() < 2 {
            return Err(TournamentError::InsufficientParticipants {
                found: self.participants.len(),
            });
        }
        if self.current_round > self.total_rounds {
            return Err(TournamentError::RoundLimitReached {
                total_rounds: self.total_rounds,
            });
        }

        let plan = pairing::generate_pairings(&self.participants, &self.history(), rng)?;
        let now = Utc::now();

        if self.status == TournamentStatus::NotStarted {
            self.status = TournamentStatus::InProgress;
            self.start_date = Some(now);
        }
        if let Some(bye) = &plan.bye {
            self.participant_mut(bye)?.credit(Score::HALF);
            info!(round = self.current_round, participant = %bye, "bye credited");
        }

        info!(
            tournament = %self.details.name,
            round = self.current_round,
            total_rounds = self.total_rounds,
            matches = plan.pairings.len(),
            rematches = plan.rematch_count(),
            "round started"
        );

        let index = self.rounds.len();
        self.rounds.push(Round::from_plan(self.current_round, &plan, now));
        Ok(&self.rounds[index])
    }

    /// Record the outcome of a match in the open round.
    ///
    /// Both participants are credited and each gains the other as an
    /// opponent. Recording a match twice fails with `MatchAlreadyRecorded`
    /// and changes nothing.
    pub fn record_result(&mut self, board: usize, outcome: Outcome) -> Result<MatchScore> {
        self.ensure_not_completed()?;
        let round = self
            .rounds
            .last_mut()
            .filter(|round| !round.is_closed())
            .ok_or(TournamentError::NoOpenRound)?;

        let round_number = round.number();
        let game = round.record_result(board, outcome)?;
        let (first, second) = (game.first().clone(), game.second().clone());
        let score = outcome.scores();

        self.apply_result(&first, &second, score)?;
        debug!(round = round_number, board, %first, %second, %outcome, "result recorded");
        Ok(score)
    }

    /// Close the open round once every match has a result.
    ///
    /// Closing the final round completes the tournament and stamps its end
    /// date; the caller is expected to persist it.
    pub fn close_round(&mut self) -> Result<RoundProgress> {
        self.ensure_not_completed()?;
        let round = self
            .rounds
            .last_mut()
            .filter(|round| !round.is_closed())
            .ok_or(TournamentError::NoOpenRound)?;

        let now = Utc::now();
        round.close(now)?;
        info!(round = round.number(), "round closed");

        self.current_round += 1;
        if self.current_round > self.total_rounds {
            self.status = TournamentStatus::Completed;
            self.end_date = Some(now);
            info!(tournament = %self.details.name, "tournament completed");
            Ok(RoundProgress::Completed)
        } else {
            Ok(RoundProgress::NextRound(self.current_round))
        }
    }

    /// Participants ordered by score, highest first. Ties keep roster order.
    pub fn standings(&self) -> Vec<&Participant> {
        let mut standings: Vec<&Participant> = self.participants.iter().collect();
        standings.sort_by(|a, b| b.score().cmp(&a.score()));
        standings
    }

    /// Pairs that have met in any played match so far.
    pub fn history(&self) -> PairingHistory {
        PairingHistory::from_rounds(&self.rounds)
    }

    pub fn details(&self) -> &TournamentDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id() == id)
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// The round currently being played, if one is open.
    pub fn open_round(&self) -> Option<&Round> {
        self.rounds.last().filter(|round| !round.is_closed())
    }

    pub fn round_count(&self) -> RoundCount {
        self.round_count
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == TournamentStatus::Completed
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    fn ensure_not_completed(&self) -> Result<()> {
        if self.is_completed() {
            return Err(TournamentError::TournamentAlreadyCompleted);
        }
        Ok(())
    }

    fn participant_mut(&mut self, id: &ParticipantId) -> Result<&mut Participant> {
        self.participants
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| TournamentError::UnknownParticipant(id.clone()))
    }

    /// The only place, besides the bye, where scores and opponents change.
    pub(crate) fn apply_result(
        &mut self,
        first: &ParticipantId,
        second: &ParticipantId,
        score: MatchScore,
    ) -> Result<()> {
        let player = self.participant_mut(first)?;
        player.credit(score.first());
        player.add_opponent(second);

        let player = self.participant_mut(second)?;
        player.credit(score.second());
        player.add_opponent(first);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tournament_tests.rs"]
mod tournament_tests;
