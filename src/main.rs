//! dialogue-replay - run dialogue lines through the substitution engine
//!
//! Loads character folders from an assets directory, applies a roster
//! snapshot, and rewrites every line read from stdin as the game would
//! before showing it.

use clap::Parser;
use dialogue_customizer::core::error::Result;
use dialogue_customizer::core::CustomizerConfig;
use dialogue_customizer::host::{DialogueSession, InMemoryHost, RosterEvent};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dialogue-replay", about = "Rewrite dialogue lines with customized names")]
struct Args {
    /// Directory containing one folder per character
    #[arg(long)]
    assets: PathBuf,

    /// Optional TOML configuration overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Roster snapshot as a JSON array indexed by real id, e.g. "[2,-1,0]"
    #[arg(long)]
    roster: Option<String>,

    /// Local id of the speaking character
    #[arg(long)]
    speaker: Option<i32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dialogue_customizer=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CustomizerConfig::from_file(path)?,
        None => CustomizerConfig::default(),
    };

    let (session, failures) = DialogueSession::from_assets(config, &args.assets)?;
    for failure in &failures {
        tracing::warn!("{} has no customization: {}", failure.folder, failure.error);
    }

    let mut host = InMemoryHost::new();
    session.hand_off_skills(&mut host);
    session.on_character_data_ready(&mut host);

    if let Some(roster) = &args.roster {
        let snapshot: Vec<i32> = serde_json::from_str(roster)?;
        host.set_roster(snapshot);
        session.on_roster_event(RosterEvent::GameDataInitialized, &host);
    }
    host.ready_actions();

    if let Some(speaker) = args.speaker {
        session.on_normal_dialogue(speaker);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        writeln!(stdout, "{}", session.about_to_show_line(&line, &host))?;
    }

    Ok(())
}
