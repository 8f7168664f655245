#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic playback system responsible for pacing highlight commands.
//!
//! Each [`Event::PlaybackStarted`] opens a presentation owned by the announced
//! round. Simulated time from [`Event::TimeAdvanced`] then drives a strictly
//! serial chain of lit and dark intervals, one pair per symbol, before the
//! system hands control to the player with [`Command::FinishPlayback`]. A new
//! presentation or game replaces the previous chain outright, and every
//! command carries the round it was scheduled for so the world can discard
//! anything emitted on behalf of a superseded round. Time the world reports as
//! already overdue when a presentation starts is spent on it immediately.

use std::time::Duration;

use sequence_memory_core::{Command, Event, RoundId, DEFAULT_FLASH_DURATION, DEFAULT_GAP_DURATION};

/// Configuration parameters required to construct the playback system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    flash: Duration,
    gap: Duration,
}

impl Config {
    /// Creates a new configuration using the provided lit and dark durations.
    #[must_use]
    pub const fn new(flash: Duration, gap: Duration) -> Self {
        Self { flash, gap }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_FLASH_DURATION, DEFAULT_GAP_DURATION)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Lit,
    Dark,
}

#[derive(Clone, Copy, Debug)]
struct Presentation {
    round: RoundId,
    length: usize,
    index: usize,
    stage: Stage,
    accumulator: Duration,
}

/// Pure system that presents the target sequence one pulse at a time.
#[derive(Debug)]
pub struct Playback {
    flash: Duration,
    gap: Duration,
    active: Option<Presentation>,
}

impl Playback {
    /// Creates a new playback system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            flash: config.flash,
            gap: config.gap,
            active: None,
        }
    }

    /// Reports whether a presentation chain is currently pending.
    #[must_use]
    pub fn is_presenting(&self) -> bool {
        self.active.is_some()
    }

    /// Consumes world events in order and emits highlight commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::GameStarted { .. } => self.active = None,
                Event::PlaybackStarted {
                    round,
                    length,
                    overshoot,
                } => self.begin(*round, *length, *overshoot, out),
                Event::TimeAdvanced { dt } => self.advance(*dt, out),
                _ => {}
            }
        }
    }

    fn begin(
        &mut self,
        round: RoundId,
        length: usize,
        overshoot: Duration,
        out: &mut Vec<Command>,
    ) {
        if length == 0 {
            self.active = None;
            out.push(Command::FinishPlayback { round });
            return;
        }

        self.active = Some(Presentation {
            round,
            length,
            index: 0,
            stage: Stage::Lit,
            accumulator: Duration::ZERO,
        });
        out.push(Command::ShowHighlight { round, index: 0 });
        self.advance(overshoot, out);
    }

    fn advance(&mut self, dt: Duration, out: &mut Vec<Command>) {
        let Some(mut presentation) = self.active.take() else {
            return;
        };
        presentation.accumulator = presentation.accumulator.saturating_add(dt);
        let round = presentation.round;

        loop {
            match presentation.stage {
                Stage::Lit => {
                    if presentation.accumulator < self.flash {
                        break;
                    }
                    presentation.accumulator -= self.flash;
                    presentation.stage = Stage::Dark;
                    out.push(Command::ClearHighlight {
                        round,
                        index: presentation.index,
                    });
                }
                Stage::Dark => {
                    if presentation.accumulator < self.gap {
                        break;
                    }
                    presentation.accumulator -= self.gap;
                    let next = presentation.index + 1;
                    if next >= presentation.length {
                        out.push(Command::FinishPlayback { round });
                        return;
                    }
                    presentation.index = next;
                    presentation.stage = Stage::Lit;
                    out.push(Command::ShowHighlight { round, index: next });
                }
            }
        }

        self.active = Some(presentation);
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
