//! Core value types: participant ids, half-point scores and match outcomes.

use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidScore, ParseOutcomeError};

/// Opaque participant identifier, copied from the external player registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Tournament score counted in half points.
///
/// Every credit in a tournament is 0, 0.5 or 1, so keeping the count of
/// half points makes all arithmetic exact. Serialized as a decimal number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "f64", try_from = "f64")]
pub struct Score {
    half_points: u32,
}

impl Score {
    pub const ZERO: Score = Score { half_points: 0 };
    pub const HALF: Score = Score { half_points: 1 };
    pub const ONE: Score = Score { half_points: 2 };

    pub const fn from_half_points(half_points: u32) -> Self {
        Self { half_points }
    }

    pub const fn half_points(self) -> u32 {
        self.half_points
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.half_points) / 2.0
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score::from_half_points(self.half_points + rhs.half_points)
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        self.half_points += rhs.half_points;
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> f64 {
        score.as_f64()
    }
}

impl TryFrom<f64> for Score {
    type Error = InvalidScore;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let doubled = value * 2.0;
        if !value.is_finite() || value < 0.0 || doubled.fract() != 0.0 || doubled > f64::from(u32::MAX)
        {
            return Err(InvalidScore(value));
        }
        Ok(Score::from_half_points(doubled as u32))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.half_points / 2;
        if self.half_points % 2 == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.5")
        }
    }
}

/// Outcome of a single match, as reported by the result-reporting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Player1Wins,
    Player2Wins,
    Draw,
}

impl Outcome {
    /// Score pair awarded for this outcome (first player, second player).
    pub fn scores(self) -> MatchScore {
        match self {
            Outcome::Player1Wins => MatchScore::new_unchecked(Score::ONE, Score::ZERO),
            Outcome::Player2Wins => MatchScore::new_unchecked(Score::ZERO, Score::ONE),
            Outcome::Draw => MatchScore::new_unchecked(Score::HALF, Score::HALF),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Player1Wins => write!(f, "1-0"),
            Outcome::Player2Wins => write!(f, "0-1"),
            Outcome::Draw => write!(f, "1/2"),
        }
    }
}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "1" | "1-0" => Ok(Outcome::Player1Wins),
            "2" | "0-1" => Ok(Outcome::Player2Wins),
            "0" | "d" | "draw" | "1/2" => Ok(Outcome::Draw),
            _ => Err(ParseOutcomeError(value.to_string())),
        }
    }
}

/// Recorded score pair of a played match. The two sides always sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchScore {
    first: Score,
    second: Score,
}

impl MatchScore {
    /// Builds a score pair, rejecting pairs that do not sum to exactly one.
    pub fn new(first: Score, second: Score) -> Option<Self> {
        (first + second == Score::ONE).then_some(Self { first, second })
    }

    const fn new_unchecked(first: Score, second: Score) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> Score {
        self.first
    }

    pub fn second(&self) -> Score {
        self.second
    }

    pub fn outcome(&self) -> Outcome {
        match self.first.cmp(&self.second) {
            std::cmp::Ordering::Greater => Outcome::Player1Wins,
            std::cmp::Ordering::Less => Outcome::Player2Wins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}
