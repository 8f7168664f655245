#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Presentation-facing controller for the Sequence Memory game.
//!
//! [`SequenceGame`] owns the authoritative world together with the playback
//! and round pacing systems. Each call submits one command and then keeps
//! feeding the resulting events to the systems, applying whatever commands
//! they emit, until the simulation settles. Every event produced along the
//! way is appended to the caller's buffer in the order it occurred.

use std::time::Duration;

use sequence_memory_core::{Command, Event, GamePhase, Level, RoundId, Status, Symbol, Timing};
use sequence_memory_system_playback::{self as playback, Playback};
use sequence_memory_system_round_pacing::{self as round_pacing, RoundPacing};
use sequence_memory_world::{self as world, query, SeededSymbols, SymbolSource, World};

/// Sequence memory game driven by explicit commands and simulated time.
#[derive(Debug)]
pub struct SequenceGame<S = SeededSymbols> {
    world: World<S>,
    playback: Playback,
    pacing: RoundPacing,
    timing: Timing,
}

impl SequenceGame<SeededSymbols> {
    /// Creates an idle game using the default seed and timing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_world(World::new(), Timing::default())
    }

    /// Creates an idle game whose symbols are drawn from `seed`.
    #[must_use]
    pub fn seeded(seed: u64, timing: Timing) -> Self {
        Self::with_world(World::with_seed(seed), timing)
    }
}

impl Default for SequenceGame<SeededSymbols> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SymbolSource> SequenceGame<S> {
    /// Wraps an existing world using the provided timing.
    #[must_use]
    pub fn with_world(world: World<S>, timing: Timing) -> Self {
        Self {
            world,
            playback: Playback::new(playback::Config::new(timing.flash, timing.gap)),
            pacing: RoundPacing::new(round_pacing::Config::new(timing.round_pause)),
            timing,
        }
    }

    /// Starts a game from idle or after a game over; ignored mid-game.
    pub fn start(&mut self, out_events: &mut Vec<Event>) {
        self.submit(Command::Start, out_events);
    }

    /// Abandons the current game, discarding any pending timers, and starts anew.
    pub fn restart(&mut self, out_events: &mut Vec<Event>) {
        self.submit(Command::Restart, out_events);
    }

    /// Registers a pad selection; ignored outside the input phase.
    pub fn select(&mut self, symbol: Symbol, out_events: &mut Vec<Event>) {
        self.submit(Command::Select { symbol }, out_events);
    }

    /// Advances simulated time, firing every timer that falls due.
    pub fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.submit(Command::Tick { dt }, out_events);
    }

    /// Applies `command` and settles every follow-up command the systems emit.
    pub fn submit(&mut self, command: Command, out_events: &mut Vec<Event>) {
        let mut pending = vec![command];
        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            self.playback.handle(&events, &mut pending);
            self.pacing.handle(&events, &mut pending);
            out_events.extend(events);
        }
    }

    /// Current phase of the state machine.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        query::phase(&self.world)
    }

    /// Current level.
    #[must_use]
    pub fn level(&self) -> Level {
        query::level(&self.world)
    }

    /// Pad currently lit by playback, if any.
    #[must_use]
    pub fn active_symbol(&self) -> Option<Symbol> {
        query::active_symbol(&self.world)
    }

    /// Status descriptor; its `Display` form is the status line.
    #[must_use]
    pub fn status(&self) -> Status {
        query::status(&self.world)
    }

    /// Sequence the player must repeat.
    #[must_use]
    pub fn target_sequence(&self) -> &[Symbol] {
        query::target_sequence(&self.world)
    }

    /// Selections registered during the current input phase.
    #[must_use]
    pub fn player_input(&self) -> &[Symbol] {
        query::player_input(&self.world)
    }

    /// Generation token of the current playback.
    #[must_use]
    pub fn round(&self) -> RoundId {
        query::round(&self.world)
    }

    /// Durations used by the timer systems.
    #[must_use]
    pub fn timing(&self) -> Timing {
        self.timing
    }
}
