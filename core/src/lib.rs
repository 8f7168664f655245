#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Sequence Memory engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams and respond
//! exclusively with new command batches. Time only exists as the durations
//! carried by [`Command::Tick`].

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of pads the player chooses from.
pub const ALPHABET_SIZE: usize = 4;

/// Time a pad stays lit while the sequence is presented.
pub const DEFAULT_FLASH_DURATION: Duration = Duration::from_millis(350);

/// Dark interval inserted after each highlight before the next one begins.
pub const DEFAULT_GAP_DURATION: Duration = Duration::from_millis(250);

/// Pause between a correctly repeated round and the presentation of the next.
pub const DEFAULT_ROUND_PAUSE: Duration = Duration::from_millis(800);

/// One of the four pads that compose the game board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    /// Upper-left pad.
    Green,
    /// Upper-right pad.
    Red,
    /// Lower-left pad.
    Yellow,
    /// Lower-right pad.
    Blue,
}

impl Symbol {
    /// Every symbol in canonical board order.
    pub const ALL: [Symbol; ALPHABET_SIZE] =
        [Symbol::Green, Symbol::Red, Symbol::Yellow, Symbol::Blue];

    /// Zero-based position of the symbol within [`Symbol::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Green => 0,
            Self::Red => 1,
            Self::Yellow => 2,
            Self::Blue => 3,
        }
    }

    /// Looks up the symbol stored at the provided board position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lowercase human-readable name of the pad.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reported when text cannot be interpreted as a [`Symbol`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("`{input}` does not name a pad; expected green, red, yellow, blue or 1-4")]
pub struct ParseSymbolError {
    input: String,
}

impl ParseSymbolError {
    /// Text that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Symbol {
    type Err = ParseSymbolError;

    /// Accepts the pad name, its initial letter, or its 1-based board number.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let symbol = match normalized.as_str() {
            "green" | "g" | "1" => Some(Self::Green),
            "red" | "r" | "2" => Some(Self::Red),
            "yellow" | "y" | "3" => Some(Self::Yellow),
            "blue" | "b" | "4" => Some(Self::Blue),
            _ => None,
        };
        symbol.ok_or_else(|| ParseSymbolError {
            input: value.trim().to_owned(),
        })
    }
}

/// Phases of the game state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game has been started yet.
    #[default]
    Idle,
    /// The target sequence is being presented; selections are ignored.
    Playback,
    /// The player is repeating the target sequence.
    Input,
    /// The player made a mistake; only a new start is accepted.
    GameOver,
}

impl GamePhase {
    /// Reports whether a new game may be started from this phase.
    #[must_use]
    pub const fn accepts_start(self) -> bool {
        matches!(self, Self::Idle | Self::GameOver)
    }
}

/// Number of symbols the player must currently repeat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level(u32);

impl Level {
    /// Level reported before the first round begins.
    pub const ZERO: Self = Self(0);

    /// Creates a new level wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Level reached after one more successful round.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generation token assigned every time the world enters playback.
///
/// Timer-driven commands carry the token that was current when they were
/// scheduled. The world discards commands whose token has been superseded,
/// so a restart invalidates every pending highlight or round advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoundId(u32);

impl RoundId {
    /// Creates a new round identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Identifier allocated to the generation following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Human-facing status derived purely from the phase and level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Status {
    phase: GamePhase,
    level: Level,
}

impl Status {
    /// Creates a status descriptor for the provided phase and level.
    #[must_use]
    pub const fn new(phase: GamePhase, level: Level) -> Self {
        Self { phase, level }
    }

    /// Phase the status was derived from.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Level the status was derived from.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            GamePhase::Idle => f.write_str("Press Start to Play!"),
            GamePhase::Playback => f.write_str("Watch carefully..."),
            GamePhase::Input => write!(f, "Level {} - Your Turn!", self.level),
            GamePhase::GameOver => write!(f, "Game Over! You reached level {}.", self.level),
        }
    }
}

/// Durations that pace the presentation and round transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timing {
    /// Time each highlight stays lit.
    pub flash: Duration,
    /// Dark interval following each highlight.
    pub gap: Duration,
    /// Pause between a completed round and the next presentation.
    pub round_pause: Duration,
}

impl Timing {
    /// Creates a timing descriptor from explicit durations.
    #[must_use]
    pub const fn new(flash: Duration, gap: Duration, round_pause: Duration) -> Self {
        Self {
            flash,
            gap,
            round_pause,
        }
    }

    /// Simulated time needed to present a sequence of the provided length.
    #[must_use]
    pub fn playback_duration(&self, length: usize) -> Duration {
        let pulse = self.flash.saturating_add(self.gap);
        let pulses = u32::try_from(length).unwrap_or(u32::MAX);
        pulse.saturating_mul(pulses)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(
            DEFAULT_FLASH_DURATION,
            DEFAULT_GAP_DURATION,
            DEFAULT_ROUND_PAUSE,
        )
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Begins a new game. Ignored while a game is in progress.
    Start,
    /// Abandons any game in progress and begins a new one.
    Restart,
    /// Registers a pad selection made by the player.
    Select {
        /// Pad the player chose.
        symbol: Symbol,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Lights the pad stored at `index` of the target sequence.
    ShowHighlight {
        /// Playback generation that scheduled the highlight.
        round: RoundId,
        /// Position within the target sequence to present.
        index: usize,
    },
    /// Turns off the highlight previously shown for `index`.
    ClearHighlight {
        /// Playback generation that scheduled the highlight.
        round: RoundId,
        /// Position within the target sequence that was presented.
        index: usize,
    },
    /// Ends the presentation and hands control to the player.
    FinishPlayback {
        /// Playback generation that completed.
        round: RoundId,
    },
    /// Extends the sequence after a completed round and replays it.
    AdvanceRound {
        /// Generation in which the player completed the round.
        round: RoundId,
        /// Time by which the tick that ended the pause overran it.
        overshoot: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a fresh game replaced whatever state existed before.
    GameStarted {
        /// Generation allocated to the first playback of the game.
        round: RoundId,
    },
    /// Confirms that a symbol was appended to the target sequence.
    SymbolAppended {
        /// Symbol drawn for the new position.
        symbol: Symbol,
        /// Level reached after the append.
        level: Level,
    },
    /// Requests that the full target sequence be presented from the start.
    PlaybackStarted {
        /// Generation owning the presentation.
        round: RoundId,
        /// Number of symbols to present.
        length: usize,
        /// Simulated time that already elapsed since the presentation was due.
        overshoot: Duration,
    },
    /// Confirms that a pad was lit.
    HighlightShown {
        /// Generation owning the presentation.
        round: RoundId,
        /// Position within the target sequence.
        index: usize,
        /// Pad that was lit.
        symbol: Symbol,
    },
    /// Confirms that the lit pad went dark.
    HighlightCleared {
        /// Generation owning the presentation.
        round: RoundId,
        /// Position within the target sequence.
        index: usize,
    },
    /// Announces a transition of the state machine.
    PhaseChanged {
        /// Phase active before the transition.
        from: GamePhase,
        /// Phase active after the transition.
        to: GamePhase,
    },
    /// Confirms that a selection matched the target sequence.
    SelectionAccepted {
        /// Pad the player chose.
        symbol: Symbol,
        /// Zero-based position the selection was checked against.
        position: usize,
    },
    /// Reports that a selection diverged from the target sequence.
    SelectionRejected {
        /// Pad stored in the target sequence at `position`.
        expected: Symbol,
        /// Pad the player chose.
        received: Symbol,
        /// Zero-based position the selection was checked against.
        position: usize,
    },
    /// Reports that the player repeated the entire target sequence.
    RoundCompleted {
        /// Generation whose sequence was repeated.
        round: RoundId,
        /// Level that was completed.
        level: Level,
    },
}

#[cfg(test)]
mod tests {
    use super::{GamePhase, Level, RoundId, Status, Symbol, Timing};
    use serde::{de::DeserializeOwned, Serialize};
    use std::time::Duration;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn symbol_indices_follow_board_order() {
        for (index, symbol) in Symbol::ALL.iter().enumerate() {
            assert_eq!(symbol.index(), index);
            assert_eq!(Symbol::from_index(index), Some(*symbol));
        }
        assert_eq!(Symbol::from_index(4), None);
    }

    #[test]
    fn symbol_parses_names_initials_and_numbers() {
        assert_eq!("green".parse::<Symbol>(), Ok(Symbol::Green));
        assert_eq!(" R ".parse::<Symbol>(), Ok(Symbol::Red));
        assert_eq!("Yellow".parse::<Symbol>(), Ok(Symbol::Yellow));
        assert_eq!("4".parse::<Symbol>(), Ok(Symbol::Blue));
    }

    #[test]
    fn symbol_parse_rejects_unknown_pads() {
        let error = "purple".parse::<Symbol>().expect_err("purple is not a pad");
        assert_eq!(error.input(), "purple");
        assert!(error.to_string().contains("purple"));
    }

    #[test]
    fn symbol_round_trips_through_bincode() {
        assert_round_trip(&Symbol::Yellow);
    }

    #[test]
    fn level_and_round_round_trip_through_bincode() {
        assert_round_trip(&Level::new(7));
        assert_round_trip(&RoundId::new(3));
    }

    #[test]
    fn status_text_matches_phase() {
        let level = Level::new(4);
        assert_eq!(
            Status::new(GamePhase::Idle, Level::ZERO).to_string(),
            "Press Start to Play!"
        );
        assert_eq!(
            Status::new(GamePhase::Playback, level).to_string(),
            "Watch carefully..."
        );
        assert_eq!(
            Status::new(GamePhase::Input, level).to_string(),
            "Level 4 - Your Turn!"
        );
        assert_eq!(
            Status::new(GamePhase::GameOver, level).to_string(),
            "Game Over! You reached level 4."
        );
    }

    #[test]
    fn only_idle_and_game_over_accept_start() {
        assert!(GamePhase::Idle.accepts_start());
        assert!(GamePhase::GameOver.accepts_start());
        assert!(!GamePhase::Playback.accepts_start());
        assert!(!GamePhase::Input.accepts_start());
    }

    #[test]
    fn playback_duration_sums_flash_and_gap_per_symbol() {
        let timing = Timing::default();
        assert_eq!(timing.playback_duration(0), Duration::ZERO);
        assert_eq!(timing.playback_duration(3), Duration::from_millis(1_800));
    }
}
