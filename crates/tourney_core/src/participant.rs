//! Participant records enrolled in a tournament

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{ParticipantId, Score};

/// Identity copied from the external player registry at enrollment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSnapshot {
    pub id: ParticipantId,
    pub name: String,
}

impl ParticipantSnapshot {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A participant's standing within one tournament.
///
/// `score` and `opponents` are only changed by the tournament's result and
/// bye bookkeeping. `opponents` never shrinks and never contains the
/// participant's own id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    score: Score,
    opponents: BTreeSet<ParticipantId>,
}

impl Participant {
    /// Enroll a registry snapshot with a zero score and no opponents.
    pub fn enroll(snapshot: ParticipantSnapshot) -> Self {
        Self::with_score(snapshot.id, snapshot.name, Score::ZERO)
    }

    pub(crate) fn with_score(id: ParticipantId, name: String, score: Score) -> Self {
        Self {
            id,
            name,
            score,
            opponents: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Ids of everyone this participant has played in the tournament.
    pub fn opponents(&self) -> &BTreeSet<ParticipantId> {
        &self.opponents
    }

    pub fn has_faced(&self, other: &ParticipantId) -> bool {
        self.opponents.contains(other)
    }

    pub fn snapshot(&self) -> ParticipantSnapshot {
        ParticipantSnapshot::new(self.id.clone(), self.name.clone())
    }

    pub(crate) fn credit(&mut self, points: Score) {
        self.score += points;
    }

    pub(crate) fn add_opponent(&mut self, opponent: &ParticipantId) {
        debug_assert_ne!(&self.id, opponent, "a participant cannot face itself");
        if opponent != &self.id {
            self.opponents.insert(opponent.clone());
        }
    }
}
