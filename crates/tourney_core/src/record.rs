//! Persisted tournament record format.
//!
//! Participants are stored with their score but without opponents. Matches
//! are stored as `[[participant, score], [participant, score]]` with a
//! `null` score while unplayed. Loading replays the stored matches to
//! rebuild every participant's opponents, and checks the record against the
//! tournament invariants before anything is resumed.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TournamentError};
use crate::participant::Participant;
use crate::round::{Match, Round};
use crate::tournament::{RoundCount, Tournament, TournamentDetails, TournamentStatus};
use crate::types::{MatchScore, ParticipantId, Score};

/// One side of a stored match: participant reference and score if played.
pub type MatchSide = (ParticipantId, Option<Score>);

/// A stored match: both sides in board order.
pub type MatchRecord = (MatchSide, MatchSide);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub id: ParticipantId,
    pub name: String,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub name: String,
    pub number: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bye: Option<ParticipantId>,
    pub matches: Vec<MatchRecord>,
}

/// Serialized form of a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub round_count: RoundCount,
    pub total_rounds: u32,
    pub current_round: u32,
    pub status: TournamentStatus,
    pub participants: Vec<ParticipantRecord>,
    pub rounds: Vec<RoundRecord>,
}

impl From<&Tournament> for TournamentRecord {
    fn from(tournament: &Tournament) -> Self {
        let details = tournament.details();
        Self {
            name: details.name.clone(),
            location: details.location.clone(),
            description: details.description.clone(),
            start_date: tournament.start_date(),
            end_date: tournament.end_date(),
            round_count: tournament.round_count(),
            total_rounds: tournament.total_rounds(),
            current_round: tournament.current_round(),
            status: tournament.status(),
            participants: tournament
                .participants()
                .iter()
                .map(|participant| ParticipantRecord {
                    id: participant.id().clone(),
                    name: participant.name().to_string(),
                    score: participant.score(),
                })
                .collect(),
            rounds: tournament.rounds().iter().map(round_record).collect(),
        }
    }
}

fn round_record(round: &Round) -> RoundRecord {
    RoundRecord {
        name: round.name().to_string(),
        number: round.number(),
        start_time: round.start_time(),
        end_time: round.end_time(),
        bye: round.bye().cloned(),
        matches: round
            .matches()
            .iter()
            .map(|game| {
                let result = game.result();
                (
                    (game.first().clone(), result.map(|r| r.first())),
                    (game.second().clone(), result.map(|r| r.second())),
                )
            })
            .collect(),
    }
}

impl TryFrom<TournamentRecord> for Tournament {
    type Error = TournamentError;

    fn try_from(record: TournamentRecord) -> Result<Self> {
        let participants = restore_participants(&record.participants)?;
        let known: HashSet<&ParticipantId> = participants.iter().map(Participant::id).collect();

        let mut rounds = Vec::with_capacity(record.rounds.len());
        for (index, stored) in record.rounds.iter().enumerate() {
            let is_last = index + 1 == record.rounds.len();
            rounds.push(restore_round(index, stored, is_last, &known)?);
        }

        check_progress(&record, &rounds)?;

        let mut tournament = Tournament {
            details: TournamentDetails {
                name: record.name,
                location: record.location,
                description: record.description,
            },
            participants,
            rounds,
            round_count: record.round_count,
            total_rounds: record.total_rounds,
            current_round: record.current_round,
            status: record.status,
            start_date: record.start_date,
            end_date: record.end_date,
        };
        replay_opponents(&mut tournament)?;
        Ok(tournament)
    }
}

impl Tournament {
    pub fn to_record(&self) -> TournamentRecord {
        TournamentRecord::from(self)
    }

    /// Rebuild a tournament from its stored record, deriving every
    /// participant's opponents from the stored match history.
    pub fn from_record(record: TournamentRecord) -> Result<Self> {
        Self::try_from(record)
    }
}

fn corrupt(message: impl Into<String>) -> TournamentError {
    TournamentError::CorruptRecord(message.into())
}

fn restore_participants(records: &[ParticipantRecord]) -> Result<Vec<Participant>> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|record| {
            if !seen.insert(&record.id) {
                return Err(TournamentError::DuplicateParticipant(record.id.clone()));
            }
            Ok(Participant::with_score(
                record.id.clone(),
                record.name.clone(),
                record.score,
            ))
        })
        .collect()
}

fn restore_round(
    index: usize,
    stored: &RoundRecord,
    is_last: bool,
    known: &HashSet<&ParticipantId>,
) -> Result<Round> {
    let expected = u32::try_from(index + 1).map_err(|_| corrupt("too many rounds"))?;
    if stored.number != expected {
        return Err(corrupt(format!(
            "round {} is stored at position {expected}",
            stored.number
        )));
    }
    if stored.end_time.is_none() && !is_last {
        return Err(corrupt(format!(
            "round {} is open but is not the latest round",
            stored.number
        )));
    }

    let mut scheduled = HashSet::new();
    let mut matches = Vec::with_capacity(stored.matches.len());
    for ((first, first_score), (second, second_score)) in &stored.matches {
        for id in [first, second] {
            if !known.contains(id) {
                return Err(TournamentError::UnknownParticipant(id.clone()));
            }
            if !scheduled.insert(id) {
                return Err(corrupt(format!(
                    "'{id}' plays twice in round {}",
                    stored.number
                )));
            }
        }

        let game = match (first_score, second_score) {
            (None, None) => Match::new(first.clone(), second.clone()),
            (Some(a), Some(b)) => {
                let score = MatchScore::new(*a, *b).ok_or_else(|| {
                    corrupt(format!(
                        "match {first} vs {second} in round {} scores {a}-{b}",
                        stored.number
                    ))
                })?;
                Match::played(first.clone(), second.clone(), score)
            }
            _ => {
                return Err(corrupt(format!(
                    "match {first} vs {second} in round {} is half recorded",
                    stored.number
                )));
            }
        };
        matches.push(game);
    }

    if let Some(bye) = &stored.bye {
        if !known.contains(bye) {
            return Err(TournamentError::UnknownParticipant(bye.clone()));
        }
        if scheduled.contains(bye) {
            return Err(corrupt(format!(
                "bye '{bye}' also plays in round {}",
                stored.number
            )));
        }
    }

    let seated = scheduled.len() + usize::from(stored.bye.is_some());
    if seated != known.len() {
        return Err(corrupt(format!(
            "round {} seats {seated} of {} participants",
            stored.number,
            known.len()
        )));
    }

    let round = Round::restore(
        stored.number,
        stored.name.clone(),
        matches,
        stored.bye.clone(),
        stored.start_time,
        stored.end_time,
    );
    if round.is_closed() && !round.is_complete() {
        return Err(corrupt(format!(
            "round {} is closed with unplayed matches",
            stored.number
        )));
    }
    Ok(round)
}

fn check_progress(record: &TournamentRecord, rounds: &[Round]) -> Result<()> {
    let expected_rounds = record.round_count.total_rounds(record.participants.len());
    if record.total_rounds != expected_rounds {
        return Err(corrupt(format!(
            "{} rounds stored but {} schedules {expected_rounds} for {} participants",
            record.total_rounds,
            record.round_count,
            record.participants.len()
        )));
    }

    let current = record.current_round;
    if current == 0 || current > record.total_rounds.saturating_add(1) {
        return Err(corrupt(format!(
            "current round {current} is outside 1..={}",
            record.total_rounds.saturating_add(1)
        )));
    }

    let open = rounds.last().is_some_and(|round| !round.is_closed());
    let closed = rounds.len() - usize::from(open);
    if closed + 1 != current as usize {
        return Err(corrupt(format!(
            "{closed} closed round(s) do not match current round {current}"
        )));
    }

    let consistent = match record.status {
        TournamentStatus::NotStarted => rounds.is_empty(),
        TournamentStatus::InProgress => current <= record.total_rounds,
        TournamentStatus::Completed => !open && current == record.total_rounds.saturating_add(1),
    };
    if !consistent {
        return Err(corrupt(format!(
            "status '{}' does not match {} stored round(s)",
            record.status,
            rounds.len()
        )));
    }
    if record.status == TournamentStatus::Completed && record.end_date.is_none() {
        return Err(corrupt("completed tournament has no end date"));
    }
    Ok(())
}

/// Replay every played match to rebuild opponents, and check that each
/// stored score equals the points earned from matches and byes.
fn replay_opponents(tournament: &mut Tournament) -> Result<()> {
    let mut earned: BTreeMap<ParticipantId, Score> = BTreeMap::new();
    let mut meetings = Vec::new();

    for round in &tournament.rounds {
        if let Some(bye) = round.bye() {
            *earned.entry(bye.clone()).or_default() += Score::HALF;
        }
        for game in round.matches() {
            if let Some(result) = game.result() {
                *earned.entry(game.first().clone()).or_default() += result.first();
                *earned.entry(game.second().clone()).or_default() += result.second();
                meetings.push((game.first().clone(), game.second().clone()));
            }
        }
    }

    for participant in &mut tournament.participants {
        let expected = earned.get(participant.id()).copied().unwrap_or_default();
        if participant.score() != expected {
            return Err(corrupt(format!(
                "'{}' has score {} but earned {expected}",
                participant.id(),
                participant.score()
            )));
        }
    }

    for (first, second) in &meetings {
        for participant in &mut tournament.participants {
            if participant.id() == first {
                participant.add_opponent(second);
            } else if participant.id() == second {
                participant.add_opponent(first);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
