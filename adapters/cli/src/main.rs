#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Sequence Memory game in a terminal.

mod config;
mod terminal;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use sequence_memory_controller::SequenceGame;
use sequence_memory_core::Event;
use sequence_memory_rendering::{FrameInput, Presentation, RenderingBackend, Scene};
use sequence_memory_world::SymbolSource;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use self::{
    config::{GameConfig, TimingOverrides},
    terminal::TerminalBackend,
};

const TITLE: &str = "Sequence Memory";

/// Watch the pads flash, then repeat the sequence.
#[derive(Debug, Parser)]
#[command(name = "sequence-memory", version, about)]
struct CliArgs {
    /// TOML file providing seed and timing settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for the symbol generator; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Time each pad stays lit during playback.
    #[arg(long, value_name = "MS")]
    flash_ms: Option<u64>,
    /// Dark interval between highlights.
    #[arg(long, value_name = "MS")]
    gap_ms: Option<u64>,
    /// Pause between a completed round and the next playback.
    #[arg(long, value_name = "MS")]
    round_pause_ms: Option<u64>,
    /// Interval between input polls and redraws.
    #[arg(long, value_name = "MS", default_value_t = 16)]
    frame_ms: u64,
}

impl CliArgs {
    fn timing_overrides(&self) -> TimingOverrides {
        TimingOverrides {
            flash_ms: self.flash_ms,
            gap_ms: self.gap_ms,
            round_pause_ms: self.round_pause_ms,
        }
    }
}

/// Entry point for the Sequence Memory command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    config.apply(args.seed, args.timing_overrides());

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, timing = ?config.timing, "starting game");

    let mut game = SequenceGame::seeded(seed, config.timing);
    let backend = TerminalBackend::new(Duration::from_millis(args.frame_ms.max(1)));
    let presentation = Presentation::new(TITLE, Scene::default());
    backend.run(presentation, move |dt, input, scene| {
        update(&mut game, dt, input, scene);
    })
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Advances the game by the frame's elapsed time, then applies the frame's
/// input and refreshes the scene.
fn update<S: SymbolSource>(
    game: &mut SequenceGame<S>,
    dt: Duration,
    input: FrameInput,
    scene: &mut Scene,
) {
    let mut events = Vec::new();
    game.advance(dt, &mut events);
    if input.restart {
        game.restart(&mut events);
    } else if input.start {
        game.start(&mut events);
    }
    if let Some(symbol) = input.selection {
        game.select(symbol, &mut events);
    }

    for event in &events {
        match event {
            Event::TimeAdvanced { .. } => {}
            Event::SelectionRejected { .. } | Event::RoundCompleted { .. } => {
                info!(?event, "round resolved");
            }
            _ => debug!(?event),
        }
    }

    *scene = Scene::new(game.phase(), game.level(), game.active_symbol());
}
