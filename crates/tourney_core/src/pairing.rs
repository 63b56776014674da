//! Pairing engine: ranked pairing with rematch avoidance.
//!
//! Participants are shuffled, then sorted by score (highest first), so ties
//! are broken randomly. The ranked list is walked top to bottom and each
//! unpaired participant takes the nearest unpaired participant below it that
//! it has not played yet. When everyone below has already been played, the
//! nearest one is taken anyway (a forced rematch) rather than leaving two
//! participants unpaired. With an odd pool the one participant left over gets
//! the bye.
//!
//! This is a greedy, local heuristic. It does not backtrack across the whole
//! pool to minimize the total number of rematches.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::warn;

use crate::error::{Result, TournamentError};
use crate::participant::Participant;
use crate::round::Round;
use crate::types::ParticipantId;

/// Set of unordered participant pairs that have already played each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingHistory {
    played: HashSet<(ParticipantId, ParticipantId)>,
}

impl PairingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the history from every played match of the given rounds.
    pub fn from_rounds<'a>(rounds: impl IntoIterator<Item = &'a Round>) -> Self {
        let mut history = Self::new();
        for round in rounds {
            for game in round.matches().iter().filter(|game| game.is_played()) {
                history.record(game.first(), game.second());
            }
        }
        history
    }

    pub fn record(&mut self, a: &ParticipantId, b: &ParticipantId) {
        self.played.insert(pair_key(a, b));
    }

    /// Order-insensitive lookup.
    pub fn contains(&self, a: &ParticipantId, b: &ParticipantId) -> bool {
        self.played.contains(&pair_key(a, b))
    }

    pub fn len(&self) -> usize {
        self.played.len()
    }

    pub fn is_empty(&self) -> bool {
        self.played.is_empty()
    }
}

fn pair_key(a: &ParticipantId, b: &ParticipantId) -> (ParticipantId, ParticipantId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// One pairing produced for a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pairing {
    /// The two participants have not met before.
    Fresh {
        first: ParticipantId,
        second: ParticipantId,
    },
    /// No unplayed opponent was available, so a previous pairing repeats.
    ForcedRematch {
        first: ParticipantId,
        second: ParticipantId,
    },
}

impl Pairing {
    pub fn players(&self) -> (&ParticipantId, &ParticipantId) {
        match self {
            Pairing::Fresh { first, second } | Pairing::ForcedRematch { first, second } => {
                (first, second)
            }
        }
    }

    pub fn is_rematch(&self) -> bool {
        matches!(self, Pairing::ForcedRematch { .. })
    }

    pub fn involves(&self, id: &ParticipantId) -> bool {
        let (first, second) = self.players();
        first == id || second == id
    }
}

/// Pairings for one round plus the participant receiving the bye, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingPlan {
    pub pairings: Vec<Pairing>,
    pub bye: Option<ParticipantId>,
}

impl PairingPlan {
    pub fn rematch_count(&self) -> usize {
        self.pairings.iter().filter(|p| p.is_rematch()).count()
    }
}

/// Randomize tie order, then sort by score, highest first.
pub fn rank<'a, R: Rng + ?Sized>(
    participants: &'a [Participant],
    rng: &mut R,
) -> Vec<&'a Participant> {
    let mut ranked: Vec<&Participant> = participants.iter().collect();
    ranked.shuffle(rng);
    // Stable sort keeps the shuffled order among equal scores
    ranked.sort_by(|a, b| b.score().cmp(&a.score()));
    ranked
}

/// Generate the pairings for the next round.
///
/// # Arguments
/// * `participants` - The full pool with current scores
/// * `history` - Pairs that have already played in earlier rounds
/// * `rng` - Source of the random tie-break; seed it for reproducible pairings
///
/// # Errors
/// `InsufficientParticipants` when the pool has fewer than two participants.
pub fn generate_pairings<R: Rng + ?Sized>(
    participants: &[Participant],
    history: &PairingHistory,
    rng: &mut R,
) -> Result<PairingPlan> {
    if participants.len() < 2 {
        return Err(TournamentError::InsufficientParticipants {
            found: participants.len(),
        });
    }

    let ranked = rank(participants, rng);
    let mut paired = vec![false; ranked.len()];
    let mut plan = PairingPlan {
        pairings: Vec::with_capacity(ranked.len() / 2),
        bye: None,
    };

    for index in 0..ranked.len() {
        if paired[index] {
            continue;
        }
        paired[index] = true;
        let first = ranked[index].id().clone();

        match find_opponent(&ranked, &paired, index, history) {
            Some(Opponent::Fresh(other)) => {
                paired[other] = true;
                plan.pairings.push(Pairing::Fresh {
                    first,
                    second: ranked[other].id().clone(),
                });
            }
            Some(Opponent::Rematch(other)) => {
                paired[other] = true;
                let second = ranked[other].id().clone();
                warn!(%first, %second, "no unplayed opponent left, forcing a rematch");
                plan.pairings.push(Pairing::ForcedRematch { first, second });
            }
            // Only the last unpaired participant of an odd pool ends up here
            None => plan.bye = Some(first),
        }
    }

    Ok(plan)
}

enum Opponent {
    Fresh(usize),
    Rematch(usize),
}

/// Two-phase search below `from`: the nearest unplayed opponent, otherwise
/// the nearest available one.
fn find_opponent(
    ranked: &[&Participant],
    paired: &[bool],
    from: usize,
    history: &PairingHistory,
) -> Option<Opponent> {
    let player = ranked[from].id();
    let mut available = (from + 1..ranked.len()).filter(|&candidate| !paired[candidate]);
    let nearest = available.clone().next()?;

    match available.find(|&candidate| !history.contains(player, ranked[candidate].id())) {
        Some(candidate) => Some(Opponent::Fresh(candidate)),
        None => Some(Opponent::Rematch(nearest)),
    }
}

#[cfg(test)]
#[path = "pairing_tests.rs"]
mod pairing_tests;
