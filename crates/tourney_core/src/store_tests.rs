use super::*;
use crate::participant::ParticipantSnapshot;
use crate::tournament::{RoundCount, TournamentDetails};
use crate::types::Outcome;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

fn new_tournament(name: &str) -> Tournament {
    let roster = ["a", "b", "c", "d"].map(|id| ParticipantSnapshot::new(id, id));
    Tournament::new(TournamentDetails::named(name), roster, RoundCount::RoundRobin).unwrap()
}

#[test]
fn test_slug() {
    assert_eq!(slug("Spring Open 2024"), "spring-open-2024");
    assert_eq!(slug("  Échecs & Mat!  "), "checs-mat");
    assert_eq!(slug("???"), "tournament");
}

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let store = TournamentStore::new(dir.path());
    let mut tournament = new_tournament("Club Night");
    tournament.start_round(&mut StdRng::seed_from_u64(1)).unwrap();
    tournament.record_result(1, Outcome::Player1Wins).unwrap();

    let path = store.save(&tournament).unwrap();
    assert_eq!(path, dir.path().join("club-night.json"));
    assert!(!dir.path().join("club-night.json.tmp").exists());

    let loaded = store.load("Club Night").unwrap();
    assert_eq!(loaded, tournament);
}

#[test]
fn test_load_missing() {
    let dir = TempDir::new().unwrap();
    let store = TournamentStore::new(dir.path());

    assert!(matches!(
        store.load("Nope"),
        Err(StoreError::NotFound(name)) if name == "Nope"
    ));
}

#[test]
fn test_load_reports_corrupt_record_once() {
    let dir = TempDir::new().unwrap();
    let store = TournamentStore::new(dir.path());
    let path = store.save(&new_tournament("Tampered")).unwrap();

    let mut json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    json["current_round"] = serde_json::json!(3);
    std::fs::write(&path, json.to_string()).unwrap();

    let err = store.load("Tampered").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Tournament(TournamentError::CorruptRecord(_))
    ));
    let message = err.to_string();
    assert!(message.starts_with("corrupt tournament record: "), "{message}");
    assert_eq!(message.matches("record").count(), 1, "{message}");
}

#[test]
fn test_save_creates_directory() {
    let dir = TempDir::new().unwrap();
    let store = TournamentStore::new(dir.path().join("nested").join("data"));

    store.save(&new_tournament("Nested")).unwrap();

    assert!(store.path_for("Nested").exists());
}

#[test]
fn test_failed_save_keeps_previous_file() {
    let dir = TempDir::new().unwrap();
    let store = TournamentStore::new(dir.path());
    let tournament = new_tournament("Stable");
    store.save(&tournament).unwrap();

    // A directory in the way of the temp file makes the next save fail
    fs::create_dir(dir.path().join("stable.json.tmp")).unwrap();
    let mut changed = tournament.clone();
    changed.start_round(&mut StdRng::seed_from_u64(2)).unwrap();
    assert!(matches!(store.save(&changed), Err(StoreError::Io(_))));

    let loaded = store.load("Stable").unwrap();
    assert_eq!(loaded, tournament);
}

#[test]
fn test_list_and_in_progress() {
    let dir = TempDir::new().unwrap();
    let store = TournamentStore::new(dir.path());
    let mut rng = StdRng::seed_from_u64(3);

    store.save(&new_tournament("Beta")).unwrap();

    let mut finished = Tournament::new(
        TournamentDetails::named("Alpha"),
        [ParticipantSnapshot::new("x", "X"), ParticipantSnapshot::new("y", "Y")],
        RoundCount::RoundRobin,
    )
    .unwrap();
    finished.start_round(&mut rng).unwrap();
    finished.record_result(1, Outcome::Draw).unwrap();
    finished.close_round().unwrap();
    store.save(&finished).unwrap();

    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let all = store.list().unwrap();
    let names: Vec<_> = all.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
    assert_eq!(all[0].status, TournamentStatus::Completed);
    assert_eq!(all[1].participants, 4);

    let resumable = store.in_progress().unwrap();
    assert_eq!(resumable.len(), 1);
    assert_eq!(resumable[0].name, "Beta");
}

#[test]
fn test_list_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = TournamentStore::new(dir.path().join("absent"));
    assert!(store.list().unwrap().is_empty());
}
