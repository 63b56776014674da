//! End-to-end tournament lifecycle tests
//!
//! These drive a tournament the way the command-line driver does: start a
//! round, report each result, close the round, save between steps, and
//! resume from the store.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;
use tourney_core::{
    Outcome, ParticipantSnapshot, RoundCount, RoundProgress, Score, Tournament,
    TournamentDetails, TournamentError, TournamentStatus, TournamentStore,
};

fn five_players() -> Vec<ParticipantSnapshot> {
    ["A", "B", "C", "D", "E"]
        .iter()
        .map(|id| ParticipantSnapshot::new(*id, format!("Player {id}")))
        .collect()
}

// =============================================================================
// Five participant walkthrough
// =============================================================================

#[test]
fn test_five_player_first_two_rounds() {
    let mut tournament = Tournament::new(
        TournamentDetails::named("Five"),
        five_players(),
        RoundCount::RoundRobin,
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    let round = tournament.start_round(&mut rng).unwrap().clone();
    assert_eq!(round.matches().len(), 2);
    let bye = round.bye().cloned().expect("five players leave one bye");
    assert_eq!(tournament.participant(&bye).unwrap().score(), Score::HALF);

    tournament.record_result(1, Outcome::Player1Wins).unwrap();
    tournament.record_result(2, Outcome::Draw).unwrap();
    assert_eq!(tournament.close_round().unwrap(), RoundProgress::NextRound(2));

    let second = tournament.start_round(&mut rng).unwrap().clone();
    assert_eq!(second.matches().len(), 2);
    for game in second.matches() {
        let rematch = round
            .matches()
            .iter()
            .any(|earlier| earlier.involves(game.first()) && earlier.involves(game.second()));
        assert!(!rematch, "round 2 repeats {} vs {}", game.first(), game.second());
    }
}

#[test]
fn test_five_player_tournament_runs_to_completion() {
    let mut tournament = Tournament::new(
        TournamentDetails::named("Five"),
        five_players(),
        RoundCount::RoundRobin,
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let mut byes = 0;

    loop {
        let round = tournament.start_round(&mut rng).unwrap();
        byes += usize::from(round.bye().is_some());
        let boards = round.matches().len();
        for board in 1..=boards {
            tournament.record_result(board, Outcome::Draw).unwrap();
        }
        if tournament.close_round().unwrap() == RoundProgress::Completed {
            break;
        }
    }

    assert_eq!(tournament.status(), TournamentStatus::Completed);
    assert_eq!(tournament.rounds().len(), 4);
    assert_eq!(byes, 4);

    // Every round hands out exactly two points in draws plus half a point for the bye
    let total: u32 = tournament
        .participants()
        .iter()
        .map(|p| p.score().half_points())
        .sum();
    assert_eq!(total, 4 * (2 * 2 + 1));
}

// =============================================================================
// Pause and resume
// =============================================================================

#[test]
fn test_resume_mid_round_from_store() {
    let dir = TempDir::new().unwrap();
    let store = TournamentStore::new(dir.path());
    let mut rng = StdRng::seed_from_u64(99);

    let mut tournament = Tournament::new(
        TournamentDetails {
            name: "Weekend Swiss".to_string(),
            location: "Club".to_string(),
            description: String::new(),
        },
        (0..8).map(|i| ParticipantSnapshot::new(format!("p{i}"), format!("Player {i}"))),
        RoundCount::Swiss,
    )
    .unwrap();
    assert_eq!(tournament.total_rounds(), 4);

    tournament.start_round(&mut rng).unwrap();
    for board in 1..=4 {
        tournament.record_result(board, Outcome::Player1Wins).unwrap();
    }
    tournament.close_round().unwrap();
    tournament.start_round(&mut rng).unwrap();
    tournament.record_result(1, Outcome::Player2Wins).unwrap();
    store.save(&tournament).unwrap();

    // Operator quits here; a new process picks the tournament back up
    let mut resumed = store.load("Weekend Swiss").unwrap();
    assert_eq!(resumed, tournament);
    assert_eq!(resumed.current_round(), 2);
    assert_eq!(resumed.open_round().unwrap().pending_matches(), 3);
    // Round 1 gave everyone one opponent; the one recorded round 2 game adds a second
    let twice = resumed
        .participants()
        .iter()
        .filter(|p| p.opponents().len() == 2)
        .count();
    let once = resumed
        .participants()
        .iter()
        .filter(|p| p.opponents().len() == 1)
        .count();
    assert_eq!((twice, once), (2, 6));

    assert_eq!(
        resumed.record_result(1, Outcome::Draw).unwrap_err(),
        TournamentError::MatchAlreadyRecorded { round: 2, board: 1 }
    );
    for board in 2..=4 {
        resumed.record_result(board, Outcome::Draw).unwrap();
    }
    assert_eq!(resumed.close_round().unwrap(), RoundProgress::NextRound(3));
    store.save(&resumed).unwrap();

    let summary = store.in_progress().unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].current_round, 3);
}

#[test]
fn test_completed_tournament_is_not_resumable() {
    let dir = TempDir::new().unwrap();
    let store = TournamentStore::new(dir.path());
    let mut tournament = Tournament::new(
        TournamentDetails::named("Duel"),
        [ParticipantSnapshot::new("x", "X"), ParticipantSnapshot::new("y", "Y")],
        RoundCount::Fixed(2),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..2 {
        tournament.start_round(&mut rng).unwrap();
        tournament.record_result(1, Outcome::Player1Wins).unwrap();
        tournament.close_round().unwrap();
    }
    store.save(&tournament).unwrap();

    let mut loaded = store.load("Duel").unwrap();
    assert!(loaded.is_completed());
    assert!(store.in_progress().unwrap().is_empty());
    assert_eq!(
        loaded.start_round(&mut rng).unwrap_err(),
        TournamentError::TournamentAlreadyCompleted
    );
    // Two players, two rounds: the second round is a forced rematch
    assert_eq!(loaded.rounds()[1].matches().len(), 1);
}
