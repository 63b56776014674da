//! Pairing and round-progression engine for multi-round tournaments.
//!
//! This crate provides:
//! - Ranked pairing with rematch avoidance and a forced-rematch fallback
//! - The round lifecycle (start, record results, close)
//! - A tournament state machine that runs rounds to completion
//! - A JSON record format and an atomic file store for pause/resume
//!
//! # Usage
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tourney_core::{Outcome, ParticipantSnapshot, RoundCount, Tournament, TournamentDetails};
//!
//! let roster = ["ada", "bob", "cyd", "dee"].map(|id| ParticipantSnapshot::new(id, id));
//! let mut tournament =
//!     Tournament::new(TournamentDetails::named("Club night"), roster, RoundCount::RoundRobin)?;
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! tournament.start_round(&mut rng)?;
//! tournament.record_result(1, Outcome::Player1Wins)?;
//! tournament.record_result(2, Outcome::Draw)?;
//! tournament.close_round()?;
//! # Ok::<(), tourney_core::TournamentError>(())
//! ```

pub mod error;
pub mod pairing;
pub mod participant;
pub mod record;
pub mod round;
pub mod store;
pub mod tournament;
pub mod types;

pub use error::*;
pub use pairing::*;
pub use participant::*;
pub use record::*;
pub use round::*;
pub use store::*;
pub use tournament::*;
pub use types::*;
