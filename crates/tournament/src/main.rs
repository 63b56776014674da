//! Tournament CLI
//!
//! Create, resume and inspect pairing tournaments.

use std::io;

use anyhow::{Context, bail};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tourney_core::{Tournament, TournamentDetails, TournamentStore};
use tournament::{
    AppConfig, Cli, Command, Session, SessionEnd, create_tournament, registry, report,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug {
        "tournament=debug,tourney_core=debug"
    } else {
        "tournament=info,tourney_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = cli.apply(AppConfig::load(&cli.config)?);
    let store = TournamentStore::new(&config.data_dir);

    match cli.command {
        Command::New {
            name,
            location,
            description,
            rounds,
            players,
            registry: registry_file,
        } => {
            let registry_path = registry_file.unwrap_or_else(|| config.players_file.clone());
            let roster = registry::select(registry::load_registry(&registry_path)?, &players)?;

            let details = TournamentDetails {
                name,
                location,
                description,
            };
            let round_count = rounds.unwrap_or(config.round_count);
            let mut tournament = create_tournament(&store, details, roster, round_count)?;
            play(&store, &config, &mut tournament)
        }
        Command::Resume { name } => {
            let mut tournament = store
                .load(&name)
                .with_context(|| format!("Failed to load tournament '{name}'"))?;
            if tournament.is_completed() {
                bail!("Tournament '{name}' is already completed; use `report` to view it");
            }
            play(&store, &config, &mut tournament)
        }
        Command::List => {
            let stored = store.list().context("Failed to list tournaments")?;
            print!("{}", report::tournament_list(&stored));
            Ok(())
        }
        Command::Players { registry: registry_file } => {
            let registry_path = registry_file.unwrap_or_else(|| config.players_file.clone());
            let entries = registry::load_entries(&registry_path)?;
            print!("{}", report::player_list(&entries));
            Ok(())
        }
        Command::Report { name } => {
            let tournament = store
                .load(&name)
                .with_context(|| format!("Failed to load tournament '{name}'"))?;
            print!("{}", report::tournament_report(&tournament));
            Ok(())
        }
    }
}

fn play(store: &TournamentStore, config: &AppConfig, tournament: &mut Tournament) -> anyhow::Result<()> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let stdin = io::stdin();
    let mut session = Session::new(store.clone(), rng, stdin.lock(), io::stdout().lock());

    match session.run(tournament)? {
        SessionEnd::Completed => info!(tournament = %tournament.name(), "all rounds played"),
        SessionEnd::Paused => info!(
            tournament = %tournament.name(),
            round = tournament.current_round(),
            "tournament paused"
        ),
    }
    Ok(())
}
