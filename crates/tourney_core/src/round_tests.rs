use super::*;
use crate::pairing::{Pairing, PairingHistory};
use crate::types::Score;

fn id(value: &str) -> ParticipantId {
    ParticipantId::new(value)
}

fn sample_round() -> Round {
    let plan = PairingPlan {
        pairings: vec![
            Pairing::Fresh {
                first: id("a"),
                second: id("b"),
            },
            Pairing::ForcedRematch {
                first: id("c"),
                second: id("d"),
            },
        ],
        bye: Some(id("e")),
    };
    Round::from_plan(2, &plan, Utc::now())
}

#[test]
fn test_round_from_plan() {
    let round = sample_round();

    assert_eq!(round.number(), 2);
    assert_eq!(round.name(), "Round 2");
    assert_eq!(round.matches().len(), 2);
    assert_eq!(round.bye(), Some(&id("e")));
    assert_eq!(round.pending_matches(), 2);
    assert!(!round.is_closed());
    assert_eq!(round.participants().count(), 5);
}

#[test]
fn test_record_result_sets_scores() {
    let mut round = sample_round();

    let game = round.record_result(1, Outcome::Player2Wins).unwrap();
    let result = game.result().unwrap();

    assert_eq!(result.first(), Score::ZERO);
    assert_eq!(result.second(), Score::ONE);
    assert_eq!(round.pending_matches(), 1);
}

#[test]
fn test_record_result_twice_keeps_original() {
    let mut round = sample_round();
    round.record_result(2, Outcome::Draw).unwrap();

    let err = round.record_result(2, Outcome::Player1Wins).unwrap_err();

    assert_eq!(
        err,
        TournamentError::MatchAlreadyRecorded { round: 2, board: 2 }
    );
    assert_eq!(
        round.board(2).and_then(Match::result).map(|r| r.outcome()),
        Some(Outcome::Draw)
    );
}

#[test]
fn test_record_result_unknown_board() {
    let mut round = sample_round();

    assert_eq!(
        round.record_result(0, Outcome::Draw).unwrap_err(),
        TournamentError::UnknownMatch { round: 2, board: 0 }
    );
    assert_eq!(
        round.record_result(3, Outcome::Draw).unwrap_err(),
        TournamentError::UnknownMatch { round: 2, board: 3 }
    );
}

#[test]
fn test_close_requires_all_results() {
    let mut round = sample_round();
    round.record_result(1, Outcome::Player1Wins).unwrap();

    assert_eq!(
        round.close(Utc::now()).unwrap_err(),
        TournamentError::RoundIncomplete {
            round: 2,
            pending: 1
        }
    );
    assert!(round.end_time().is_none());

    round.record_result(2, Outcome::Draw).unwrap();
    round.close(Utc::now()).unwrap();
    assert!(round.is_closed());
}

#[test]
fn test_opponent_of() {
    let game = Match::new(id("a"), id("b"));
    assert_eq!(game.opponent_of(&id("a")), Some(&id("b")));
    assert_eq!(game.opponent_of(&id("b")), Some(&id("a")));
    assert_eq!(game.opponent_of(&id("c")), None);
}

#[test]
fn test_match_records_once() {
    let mut game = Match::new(id("a"), id("b"));
    assert!(game.record(Outcome::Player2Wins));
    assert!(!game.record(Outcome::Player1Wins));
    assert_eq!(game.result().unwrap().second(), Score::ONE);
}

#[test]
fn test_history_ignores_unplayed_matches() {
    let mut round = sample_round();
    round.record_result(1, Outcome::Draw).unwrap();

    let history = PairingHistory::from_rounds([&round]);

    assert!(history.contains(&id("b"), &id("a")));
    assert!(!history.contains(&id("c"), &id("d")));
}
