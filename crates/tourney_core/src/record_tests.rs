use super::*;
use crate::participant::ParticipantSnapshot;
use crate::types::Outcome;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn played_tournament(rounds_to_play: u32) -> Tournament {
    let roster = ["a", "b", "c", "d", "e"].map(|id| ParticipantSnapshot::new(id, id.to_uppercase()));
    let mut tournament = Tournament::new(
        TournamentDetails {
            name: "Spring Open".to_string(),
            location: "Riga".to_string(),
            description: "Rapid".to_string(),
        },
        roster,
        RoundCount::RoundRobin,
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(21);
    let outcomes = [Outcome::Player1Wins, Outcome::Draw, Outcome::Player2Wins];

    for _ in 0..rounds_to_play {
        tournament.start_round(&mut rng).unwrap();
        let boards = tournament.open_round().unwrap().matches().len();
        for board in 1..=boards {
            tournament
                .record_result(board, outcomes[board % outcomes.len()])
                .unwrap();
        }
        tournament.close_round().unwrap();
    }
    tournament
}

#[test]
fn test_record_keeps_pass_through_fields() {
    let record = played_tournament(1).to_record();

    assert_eq!(record.name, "Spring Open");
    assert_eq!(record.location, "Riga");
    assert_eq!(record.description, "Rapid");
    assert_eq!(record.total_rounds, 4);
    assert_eq!(record.current_round, 2);
    assert_eq!(record.status, TournamentStatus::InProgress);
    assert_eq!(record.rounds.len(), 1);
    assert_eq!(record.rounds[0].matches.len(), 2);
}

#[test]
fn test_match_encoding_is_nested_pairs() {
    let record = played_tournament(1).to_record();
    let json = serde_json::to_value(&record.rounds[0].matches[0]).unwrap();

    let sides = json.as_array().unwrap();
    assert_eq!(sides.len(), 2);
    for side in sides {
        let side = side.as_array().unwrap();
        assert!(side[0].is_string());
        assert!(side[1].is_number());
    }
}

#[test]
fn test_participants_stored_without_opponents() {
    let record = played_tournament(2).to_record();
    let json = serde_json::to_value(&record).unwrap();

    let participant = &json["participants"][0];
    assert!(participant.get("opponents").is_none());
    assert!(participant.get("score").is_some());
}

#[test]
fn test_round_trip_rebuilds_opponents_and_standings() {
    let tournament = played_tournament(3);
    let json = serde_json::to_string_pretty(&tournament.to_record()).unwrap();

    let record: TournamentRecord = serde_json::from_str(&json).unwrap();
    let restored = Tournament::from_record(record).unwrap();

    for participant in tournament.participants() {
        let reloaded = restored.participant(participant.id()).unwrap();
        assert_eq!(reloaded.opponents(), participant.opponents());
        assert_eq!(reloaded.score(), participant.score());
    }
    let before: Vec<_> = tournament.standings().iter().map(|p| p.id().clone()).collect();
    let after: Vec<_> = restored.standings().iter().map(|p| p.id().clone()).collect();
    assert_eq!(before, after);
    assert_eq!(restored, tournament);
}

#[test]
fn test_open_round_survives_round_trip() {
    let mut tournament = played_tournament(1);
    tournament.start_round(&mut StdRng::seed_from_u64(5)).unwrap();
    tournament.record_result(1, Outcome::Draw).unwrap();

    let restored = Tournament::from_record(tournament.to_record()).unwrap();

    let open = restored.open_round().unwrap();
    assert_eq!(open.number(), 2);
    assert_eq!(open.pending_matches(), 1);
    assert_eq!(restored, tournament);
}

#[test]
fn test_rejects_unknown_participant() {
    let mut record = played_tournament(1).to_record();
    record.rounds[0].matches[0].0.0 = ParticipantId::new("ghost");

    assert_eq!(
        Tournament::from_record(record).unwrap_err(),
        TournamentError::UnknownParticipant(ParticipantId::new("ghost"))
    );
}

#[test]
fn test_rejects_scores_not_summing_to_one() {
    let mut record = played_tournament(1).to_record();
    record.rounds[0].matches[0].0.1 = Some(Score::ONE);
    record.rounds[0].matches[0].1.1 = Some(Score::ONE);

    assert!(matches!(
        Tournament::from_record(record),
        Err(TournamentError::CorruptRecord(_))
    ));
}

#[test]
fn test_rejects_tampered_score() {
    let mut record = played_tournament(2).to_record();
    record.participants[0].score = record.participants[0].score + Score::ONE;

    assert!(matches!(
        Tournament::from_record(record),
        Err(TournamentError::CorruptRecord(_))
    ));
}

#[test]
fn test_rejects_inconsistent_round_counter() {
    let mut record = played_tournament(2).to_record();
    record.current_round = 1;

    assert!(matches!(
        Tournament::from_record(record),
        Err(TournamentError::CorruptRecord(_))
    ));
}

#[test]
fn test_rejects_closed_round_with_pending_match() {
    let mut record = played_tournament(1).to_record();
    record.rounds[0].matches[0].0.1 = None;
    record.rounds[0].matches[0].1.1 = None;

    assert!(matches!(
        Tournament::from_record(record),
        Err(TournamentError::CorruptRecord(_))
    ));
}

#[test]
fn test_rejects_total_rounds_not_matching_round_count() {
    let mut record = played_tournament(1).to_record();
    record.total_rounds = 6;

    assert!(matches!(
        Tournament::from_record(record),
        Err(TournamentError::CorruptRecord(_))
    ));
}

#[test]
fn test_rejects_round_missing_a_participant() {
    let mut record = played_tournament(1).to_record();
    let bye = record.rounds[0].bye.take().unwrap();
    let bye_index = record.participants.iter().position(|p| p.id == bye).unwrap();
    record.participants[bye_index].score = Score::ZERO;

    let err = Tournament::from_record(record).unwrap_err();
    assert!(matches!(err, TournamentError::CorruptRecord(message) if message.contains("seats 4 of 5")));
}

#[test]
fn test_rejects_completed_without_end_date() {
    let mut record = played_tournament(4).to_record();
    assert_eq!(record.status, TournamentStatus::Completed);
    record.end_date = None;

    let err = Tournament::from_record(record).unwrap_err();
    assert_eq!(
        err,
        TournamentError::CorruptRecord("completed tournament has no end date".to_string())
    );
}
