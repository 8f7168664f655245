#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Sequence Memory.

mod symbols;

use std::time::Duration;

use sequence_memory_core::{Command, Event, GamePhase, Level, RoundId, Symbol};
use tracing::{debug, info};

pub use symbols::{ScriptedSymbols, SeededSymbols, SymbolSource, DEFAULT_SEED};

/// Pad currently lit during playback together with its sequence position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Highlight {
    index: usize,
    symbol: Symbol,
}

/// Represents the authoritative Sequence Memory game state.
#[derive(Debug)]
pub struct World<S = SeededSymbols> {
    source: S,
    phase: GamePhase,
    target: Vec<Symbol>,
    input: Vec<Symbol>,
    level: Level,
    highlight: Option<Highlight>,
    round: RoundId,
    advance_pending: bool,
}

impl World<SeededSymbols> {
    /// Creates a new idle world drawing symbols from the default seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Creates a new idle world drawing symbols from the provided seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(SeededSymbols::new(seed))
    }
}

impl Default for World<SeededSymbols> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SymbolSource> World<S> {
    /// Creates a new idle world drawing symbols from `source`.
    #[must_use]
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            phase: GamePhase::Idle,
            target: Vec::new(),
            input: Vec::new(),
            level: Level::ZERO,
            highlight: None,
            round: RoundId::default(),
            advance_pending: false,
        }
    }

    fn begin_game(&mut self, out_events: &mut Vec<Event>) {
        self.target.clear();
        self.input.clear();
        self.level = Level::ZERO;
        self.highlight = None;
        self.advance_pending = false;
        self.round = self.round.next();
        info!(round = self.round.get(), "game started");
        out_events.push(Event::GameStarted { round: self.round });

        self.append_symbol(out_events);
        self.enter_playback(Duration::ZERO, out_events);
    }

    fn append_symbol(&mut self, out_events: &mut Vec<Event>) {
        let symbol = self.source.next_symbol();
        self.target.push(symbol);
        self.level = self.level.next();
        out_events.push(Event::SymbolAppended {
            symbol,
            level: self.level,
        });
    }

    fn enter_playback(&mut self, overshoot: Duration, out_events: &mut Vec<Event>) {
        self.set_phase(GamePhase::Playback, out_events);
        out_events.push(Event::PlaybackStarted {
            round: self.round,
            length: self.target.len(),
            overshoot,
        });
    }

    fn set_phase(&mut self, phase: GamePhase, out_events: &mut Vec<Event>) {
        if self.phase == phase {
            return;
        }
        let from = self.phase;
        self.phase = phase;
        out_events.push(Event::PhaseChanged { from, to: phase });
    }

    fn select(&mut self, symbol: Symbol, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Input {
            debug!(%symbol, phase = ?self.phase, "selection ignored outside input phase");
            return;
        }

        let position = self.input.len();
        let Some(expected) = self.target.get(position).copied() else {
            return;
        };
        self.input.push(symbol);

        if symbol != expected {
            info!(
                level = self.level.get(),
                position,
                %expected,
                received = %symbol,
                "game over"
            );
            out_events.push(Event::SelectionRejected {
                expected,
                received: symbol,
                position,
            });
            self.set_phase(GamePhase::GameOver, out_events);
            return;
        }

        out_events.push(Event::SelectionAccepted { symbol, position });

        if self.input.len() == self.target.len() {
            self.advance_pending = true;
            debug!(level = self.level.get(), "round completed");
            out_events.push(Event::RoundCompleted {
                round: self.round,
                level: self.level,
            });
            self.set_phase(GamePhase::Playback, out_events);
        }
    }

    fn is_presenting(&self, round: RoundId) -> bool {
        self.phase == GamePhase::Playback && round == self.round && !self.advance_pending
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply<S: SymbolSource>(world: &mut World<S>, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Start => {
            if world.phase.accepts_start() {
                world.begin_game(out_events);
            } else {
                debug!(phase = ?world.phase, "start ignored while a game is in progress");
            }
        }
        Command::Restart => world.begin_game(out_events),
        Command::Select { symbol } => world.select(symbol, out_events),
        Command::Tick { dt } => out_events.push(Event::TimeAdvanced { dt }),
        Command::ShowHighlight { round, index } => {
            if !world.is_presenting(round) {
                debug!(round = round.get(), index, "stale highlight discarded");
                return;
            }
            let Some(symbol) = world.target.get(index).copied() else {
                return;
            };
            world.highlight = Some(Highlight { index, symbol });
            out_events.push(Event::HighlightShown {
                round,
                index,
                symbol,
            });
        }
        Command::ClearHighlight { round, index } => {
            if !world.is_presenting(round) {
                debug!(round = round.get(), index, "stale highlight clear discarded");
                return;
            }
            if world.highlight.map(|highlight| highlight.index) != Some(index) {
                return;
            }
            world.highlight = None;
            out_events.push(Event::HighlightCleared { round, index });
        }
        Command::FinishPlayback { round } => {
            if !world.is_presenting(round) {
                debug!(round = round.get(), "stale playback completion discarded");
                return;
            }
            world.highlight = None;
            world.input.clear();
            world.set_phase(GamePhase::Input, out_events);
        }
        Command::AdvanceRound { round, overshoot } => {
            if round != world.round || !world.advance_pending {
                debug!(round = round.get(), "stale round advance discarded");
                return;
            }
            world.advance_pending = false;
            world.input.clear();
            world.round = world.round.next();
            world.append_symbol(out_events);
            world.enter_playback(overshoot, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use sequence_memory_core::{GamePhase, Level, RoundId, Status, Symbol};

    /// Current phase of the state machine.
    #[must_use]
    pub fn phase<S>(world: &World<S>) -> GamePhase {
        world.phase
    }

    /// Current level, equal to the target length once a game has started.
    #[must_use]
    pub fn level<S>(world: &World<S>) -> Level {
        world.level
    }

    /// Pad currently lit by playback, if any.
    #[must_use]
    pub fn active_symbol<S>(world: &World<S>) -> Option<Symbol> {
        world.highlight.map(|highlight| highlight.symbol)
    }

    /// Sequence the player must repeat.
    #[must_use]
    pub fn target_sequence<S>(world: &World<S>) -> &[Symbol] {
        &world.target
    }

    /// Selections registered during the current input phase.
    #[must_use]
    pub fn player_input<S>(world: &World<S>) -> &[Symbol] {
        &world.input
    }

    /// Generation token of the current playback.
    #[must_use]
    pub fn round<S>(world: &World<S>) -> RoundId {
        world.round
    }

    /// Reports whether a completed round is waiting for its advance.
    #[must_use]
    pub fn awaiting_round_advance<S>(world: &World<S>) -> bool {
        world.advance_pending
    }

    /// Status descriptor derived from the phase and level.
    #[must_use]
    pub fn status<S>(world: &World<S>) -> Status {
        Status::new(world.phase, world.level)
    }
}
