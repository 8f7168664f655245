#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Sequence Memory adapters.

use anyhow::Result as AnyResult;
use sequence_memory_core::{GamePhase, Level, Status, Symbol};
use std::time::Duration;

/// Fraction of full intensity used to draw a pad that is not lit.
pub const UNLIT_INTENSITY: f32 = 0.6;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with its alpha channel replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Base color painted for a pad.
#[must_use]
pub fn pad_color(symbol: Symbol) -> Color {
    match symbol {
        Symbol::Green => Color::from_rgb_u8(0x00, 0xa7, 0x4a),
        Symbol::Red => Color::from_rgb_u8(0x9f, 0x0f, 0x17),
        Symbol::Yellow => Color::from_rgb_u8(0xcc, 0xa7, 0x07),
        Symbol::Blue => Color::from_rgb_u8(0x09, 0x4a, 0x8f),
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Whether the player pressed the start button on this frame.
    pub start: bool,
    /// Whether the player asked to abandon the current game and begin anew.
    pub restart: bool,
    /// Pad the player selected on this frame, if any.
    pub selection: Option<Symbol>,
    /// Whether the player asked to leave the game.
    pub quit: bool,
}

impl FrameInput {
    /// Reports whether the frame carries no player action.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Presentation of a single pad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PadPresentation {
    /// Pad being described.
    pub symbol: Symbol,
    /// Color to paint, already dimmed when the pad is not lit.
    pub color: Color,
    /// Whether the pad is currently highlighted.
    pub lit: bool,
}

impl PadPresentation {
    /// Creates a pad descriptor, dimming the base color when not lit.
    #[must_use]
    pub fn new(symbol: Symbol, lit: bool) -> Self {
        let base = pad_color(symbol);
        let color = if lit {
            base
        } else {
            base.with_alpha(UNLIT_INTENSITY)
        };
        Self { symbol, color, lit }
    }
}

/// Scene description combining the pads and the central control panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Pads in board order.
    pub pads: Vec<PadPresentation>,
    /// Status line shown in the control panel.
    pub status: String,
    /// Phase the scene was derived from.
    pub phase: GamePhase,
    /// Level shown in the control panel while a game is running.
    pub level: Level,
    /// Whether the start button is offered instead of the level display.
    pub start_available: bool,
}

impl Scene {
    /// Derives a scene from the observable game state.
    #[must_use]
    pub fn new(phase: GamePhase, level: Level, active: Option<Symbol>) -> Self {
        let pads = Symbol::ALL
            .iter()
            .map(|symbol| PadPresentation::new(*symbol, active == Some(*symbol)))
            .collect();
        Self {
            pads,
            status: Status::new(phase, level).to_string(),
            phase,
            level,
            start_available: phase.accepts_start(),
        }
    }

    /// Pad currently lit, if any.
    #[must_use]
    pub fn lit_pad(&self) -> Option<Symbol> {
        self.pads.iter().find(|pad| pad.lit).map(|pad| pad.symbol)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(GamePhase::Idle, Level::ZERO, None)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown by the backend.
    pub title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Sequence Memory scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the real frame delta and
    /// the input captured by the adapter, and rewrites the scene before it is
    /// presented.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}
