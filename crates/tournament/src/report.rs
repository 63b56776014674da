//! Text reports for operators

use chrono::{DateTime, Local, Utc};
use tourney_core::{ParticipantId, Round, StoredTournament, Tournament};

use crate::registry::RegistryEntry;

/// Standings table, highest score first.
pub fn standings_table(tournament: &Tournament) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "{:<4} {:<12} {:<28} {:>6}\n",
        "#", "ID", "Name", "Score"
    ));
    report.push_str(&"-".repeat(53));
    report.push('\n');

    for (rank, participant) in tournament.standings().iter().enumerate() {
        report.push_str(&format!(
            "{:<4} {:<12} {:<28} {:>6}\n",
            rank + 1,
            participant.id().as_str(),
            participant.name(),
            participant.score().to_string()
        ));
    }
    report
}

/// One line per board, plus the bye if there is one.
pub fn round_summary(tournament: &Tournament, round: &Round) -> String {
    let name_of = |id: &ParticipantId| {
        tournament
            .participant(id)
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| id.to_string())
    };

    let mut report = String::new();
    let status = if round.is_closed() { "closed" } else { "open" };
    report.push_str(&format!("--- {} ({status}) ---\n", round.name()));

    for (index, game) in round.matches().iter().enumerate() {
        let result = game
            .result()
            .map(|score| score.outcome().to_string())
            .unwrap_or_else(|| "pending".to_string());
        report.push_str(&format!(
            "Board {:<3} {:<28} vs {:<28} {}\n",
            index + 1,
            name_of(game.first()),
            name_of(game.second()),
            result
        ));
    }
    if let Some(bye) = round.bye() {
        report.push_str(&format!("Bye: {}\n", name_of(bye)));
    }
    report
}

/// Full report: header, every round, then standings.
pub fn tournament_report(tournament: &Tournament) -> String {
    let details = tournament.details();
    let mut report = String::new();
    report.push_str(&format!("=== Tournament: {} ===\n\n", details.name));
    if !details.location.is_empty() {
        report.push_str(&format!("Location: {}\n", details.location));
    }
    if !details.description.is_empty() {
        report.push_str(&format!("Description: {}\n", details.description));
    }
    report.push_str(&format!(
        "Status: {} ({} rounds, {})\n",
        tournament.status(),
        tournament.total_rounds(),
        tournament.round_count()
    ));
    if let Some(start) = tournament.start_date() {
        report.push_str(&format!("Started: {}\n", local_time(start)));
    }
    if let Some(end) = tournament.end_date() {
        report.push_str(&format!("Finished: {}\n", local_time(end)));
    }
    report.push('\n');

    for round in tournament.rounds() {
        report.push_str(&round_summary(tournament, round));
        report.push('\n');
    }

    report.push_str("Standings:\n");
    report.push_str(&standings_table(tournament));
    report
}

fn local_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Table of stored tournaments.
pub fn tournament_list(stored: &[StoredTournament]) -> String {
    if stored.is_empty() {
        return "No stored tournaments.\n".to_string();
    }

    let mut report = String::new();
    report.push_str(&format!(
        "{:<30} {:<12} {:>7} {:>8}\n",
        "Name", "Status", "Round", "Players"
    ));
    report.push_str(&"-".repeat(60));
    report.push('\n');
    for entry in stored {
        report.push_str(&format!(
            "{:<30} {:<12} {:>7} {:>8}\n",
            entry.name,
            entry.status.to_string(),
            format!("{}/{}", entry.current_round.min(entry.total_rounds), entry.total_rounds),
            entry.participants
        ));
    }
    report
}

/// Every registry player, sorted by last name then first name.
pub fn player_list(entries: &[RegistryEntry]) -> String {
    if entries.is_empty() {
        return "No registered players.\n".to_string();
    }

    let mut sorted: Vec<&RegistryEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        a.last_name
            .to_lowercase()
            .cmp(&b.last_name.to_lowercase())
            .then_with(|| a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase()))
    });

    let mut report = String::new();
    report.push_str(&format!("{:<32} {:<12} {:<12}\n", "Name", "Birthdate", "ID"));
    report.push_str(&"-".repeat(58));
    report.push('\n');
    for entry in sorted {
        report.push_str(&format!(
            "{:<32} {:<12} {:<12}\n",
            entry.display_name(),
            entry.birthdate.as_deref().unwrap_or("-"),
            entry.id.as_deref().unwrap_or("-")
        ));
    }
    report
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
