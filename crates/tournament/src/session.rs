//! Interactive round loop
//!
//! A session drives one tournament from wherever it was left: it opens the
//! next round if none is open, asks the operator for every pending result,
//! closes the round and moves on. The tournament is saved after each of
//! those steps, so quitting (or losing stdin) at any prompt loses nothing.

use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use rand::rngs::StdRng;
use tourney_core::{
    Outcome, ParticipantSnapshot, RoundCount, RoundProgress, Tournament, TournamentDetails,
    TournamentError, TournamentStore,
};
use tracing::info;

use crate::report;

/// Create a tournament and save its first state.
///
/// Nothing is written unless the roster can be paired and no tournament
/// with the same name is stored yet.
pub fn create_tournament(
    store: &TournamentStore,
    details: TournamentDetails,
    roster: Vec<ParticipantSnapshot>,
    round_count: RoundCount,
) -> anyhow::Result<Tournament> {
    if store.path_for(&details.name).exists() {
        bail!(
            "A tournament named '{}' already exists; use `resume` to continue it",
            details.name
        );
    }
    if roster.len() < 2 {
        return Err(TournamentError::InsufficientParticipants {
            found: roster.len(),
        })
        .context("A tournament needs at least two players");
    }

    let tournament =
        Tournament::new(details, roster, round_count).context("Failed to create tournament")?;
    let path = store
        .save(&tournament)
        .with_context(|| format!("Failed to save tournament '{}'", tournament.name()))?;
    info!(
        path = %path.display(),
        participants = tournament.participants().len(),
        total_rounds = tournament.total_rounds(),
        "tournament created"
    );
    Ok(tournament)
}

/// Why a session returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every round has been played.
    Completed,
    /// The operator quit (or input ran out) with rounds left to play.
    Paused,
}

pub struct Session<R, W> {
    store: TournamentStore,
    rng: StdRng,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(store: TournamentStore, rng: StdRng, input: R, output: W) -> Self {
        Self {
            store,
            rng,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Play rounds until the tournament completes or the operator quits.
    pub fn run(&mut self, tournament: &mut Tournament) -> anyhow::Result<SessionEnd> {
        while !tournament.is_completed() {
            if tournament.open_round().is_none() {
                tournament
                    .start_round(&mut self.rng)
                    .context("Failed to start the next round")?;
                self.save(tournament)?;
            }

            let pending = {
                let round = tournament.open_round().context("No open round to play")?;
                writeln!(self.output, "{}", report::round_summary(tournament, round))?;
                round
                    .matches()
                    .iter()
                    .enumerate()
                    .filter(|(_, game)| !game.is_played())
                    .map(|(index, _)| index + 1)
                    .collect::<Vec<_>>()
            };

            for board in pending {
                let Some(outcome) = self.prompt(tournament, board)? else {
                    self.save(tournament)?;
                    writeln!(
                        self.output,
                        "Paused. Resume with: tournament resume \"{}\"",
                        tournament.name()
                    )?;
                    return Ok(SessionEnd::Paused);
                };
                tournament.record_result(board, outcome)?;
                self.save(tournament)?;
            }

            let progress = tournament.close_round()?;
            self.save(tournament)?;
            writeln!(self.output, "{}", report::standings_table(tournament))?;
            if let RoundProgress::NextRound(next) = progress {
                info!(tournament = %tournament.name(), next, "round finished");
            }
        }

        writeln!(self.output, "{}", report::tournament_report(tournament))?;
        Ok(SessionEnd::Completed)
    }

    /// Ask for one board's result. `None` means the operator wants to stop.
    fn prompt(&mut self, tournament: &Tournament, board: usize) -> anyhow::Result<Option<Outcome>> {
        let round = tournament.open_round().context("No open round to play")?;
        let game = round
            .board(board)
            .with_context(|| format!("Board {board} does not exist"))?;
        let first = tournament.participant(game.first()).map_or("?", |p| p.name());
        let second = tournament.participant(game.second()).map_or("?", |p| p.name());

        loop {
            write!(
                self.output,
                "Board {board}: {first} vs {second} [1 = first wins, 2 = second wins, d = draw, q = quit]: "
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            let answer = line.trim();
            if matches!(answer.to_lowercase().as_str(), "q" | "quit") {
                return Ok(None);
            }
            match answer.parse::<Outcome>() {
                Ok(outcome) => return Ok(Some(outcome)),
                Err(e) => writeln!(self.output, "Invalid result: {e}")?,
            }
        }
    }

    fn save(&self, tournament: &Tournament) -> anyhow::Result<()> {
        self.store
            .save(tournament)
            .with_context(|| format!("Failed to save tournament '{}'", tournament.name()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
