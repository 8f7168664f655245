#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that inserts a pause between a completed round and the next one.
//!
//! When a tick overruns the pause, the surplus travels with
//! [`Command::AdvanceRound`] so the next presentation starts already advanced.

use std::time::Duration;

use sequence_memory_core::{Command, Event, RoundId, DEFAULT_ROUND_PAUSE};

/// Configuration parameters required to construct the round pacing system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pause: Duration,
}

impl Config {
    /// Creates a new configuration using the provided pause.
    #[must_use]
    pub const fn new(pause: Duration) -> Self {
        Self { pause }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_ROUND_PAUSE)
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingAdvance {
    round: RoundId,
    accumulator: Duration,
}

/// Emits [`Command::AdvanceRound`] once the configured pause has elapsed.
#[derive(Debug)]
pub struct RoundPacing {
    pause: Duration,
    pending: Option<PendingAdvance>,
}

impl RoundPacing {
    /// Creates a new pacing system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            pause: config.pause,
            pending: None,
        }
    }

    /// Round whose advance is still waiting for the pause to elapse.
    #[must_use]
    pub fn pending_round(&self) -> Option<RoundId> {
        self.pending.map(|pending| pending.round)
    }

    /// Consumes world events in order and emits round advance commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::GameStarted { .. } => self.pending = None,
                Event::RoundCompleted { round, .. } => {
                    if self.pause.is_zero() {
                        self.pending = None;
                        out.push(Command::AdvanceRound {
                            round: *round,
                            overshoot: Duration::ZERO,
                        });
                    } else {
                        self.pending = Some(PendingAdvance {
                            round: *round,
                            accumulator: Duration::ZERO,
                        });
                    }
                }
                Event::TimeAdvanced { dt } => self.advance(*dt, out),
                _ => {}
            }
        }
    }

    fn advance(&mut self, dt: Duration, out: &mut Vec<Command>) {
        let Some(mut pending) = self.pending.take() else {
            return;
        };
        pending.accumulator = pending.accumulator.saturating_add(dt);
        if pending.accumulator >= self.pause {
            out.push(Command::AdvanceRound {
                round: pending.round,
                overshoot: pending.accumulator - self.pause,
            });
        } else {
            self.pending = Some(pending);
        }
    }
}

impl Default for RoundPacing {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sequence_memory_core::Level;

    #[test]
    fn zero_pause_advances_immediately() {
        let mut pacing = RoundPacing::new(Config::new(Duration::ZERO));
        let round = RoundId::new(2);
        let mut commands = Vec::new();
        pacing.handle(
            &[Event::RoundCompleted {
                round,
                level: Level::new(1),
            }],
            &mut commands,
        );
        assert_eq!(
            commands,
            vec![Command::AdvanceRound {
                round,
                overshoot: Duration::ZERO,
            }]
        );
        assert_eq!(pacing.pending_round(), None);
    }
}
