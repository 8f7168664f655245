//! Line-oriented terminal backend.
//!
//! A background thread reads whitespace-separated tokens from stdin and
//! forwards them over a channel; the main thread owns the game, consumes at
//! most one token per frame and redraws only when the scene changed.

use std::{
    fmt::Write as _,
    io::{self, BufRead, Write},
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use sequence_memory_core::{ParseSymbolError, Symbol};
use sequence_memory_rendering::{Color, FrameInput, Presentation, RenderingBackend, Scene};
use tracing::{debug, warn};

/// Amount lit pads are lightened by to mimic their glow.
const GLOW: f32 = 0.35;

pub(crate) const HELP: &str =
    "Commands: start (s), restart, quit (q); pads: green/red/yellow/blue, g/r/y/b or 1-4.";

/// Rendering backend that draws scenes as ANSI-coloured text.
#[derive(Debug)]
pub(crate) struct TerminalBackend {
    frame_interval: Duration,
}

impl TerminalBackend {
    /// Creates a backend that polls for input and redraws every `frame_interval`.
    pub(crate) fn new(frame_interval: Duration) -> Self {
        Self { frame_interval }
    }
}

impl RenderingBackend for TerminalBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let _reader = thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || forward_input(io::stdin().lock(), &sender))
            .context("failed to spawn stdin reader thread")?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{}", presentation.title)?;
        writeln!(out, "{HELP}")?;

        let mut scene = presentation.scene;
        write!(out, "{}", render_scene(&scene))?;
        out.flush()?;

        let mut last_frame = Instant::now();
        loop {
            thread::sleep(self.frame_interval);
            let now = Instant::now();
            let dt = now.duration_since(last_frame);
            last_frame = now;

            let input = next_input(&receiver);
            if input.quit {
                debug!("quit requested");
                break;
            }
            if !input.is_empty() {
                debug!(?input, "player input");
            }

            let previous = scene.clone();
            update_scene(dt, input, &mut scene);
            if scene != previous {
                write!(out, "{}", render_scene(&scene))?;
                out.flush()?;
            }
        }

        Ok(())
    }
}

fn next_input(receiver: &Receiver<FrameInput>) -> FrameInput {
    match receiver.try_recv() {
        Ok(input) => input,
        Err(TryRecvError::Empty) => FrameInput::default(),
        Err(TryRecvError::Disconnected) => FrameInput {
            quit: true,
            ..FrameInput::default()
        },
    }
}

fn forward_input(reader: impl BufRead, sender: &Sender<FrameInput>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!(%error, "failed to read from stdin");
                return;
            }
        };

        for token in line.split_whitespace() {
            match parse_token(token) {
                Ok(input) => {
                    if sender.send(input).is_err() || input.quit {
                        return;
                    }
                }
                Err(error) => warn!(%error, "ignoring input"),
            }
        }
    }
}

/// Interprets a single whitespace-free token typed by the player.
pub(crate) fn parse_token(token: &str) -> Result<FrameInput, ParseSymbolError> {
    let input = match token.to_ascii_lowercase().as_str() {
        "start" | "s" => FrameInput {
            start: true,
            ..FrameInput::default()
        },
        "restart" => FrameInput {
            restart: true,
            ..FrameInput::default()
        },
        "quit" | "q" | "exit" => FrameInput {
            quit: true,
            ..FrameInput::default()
        },
        _ => FrameInput {
            selection: Some(token.parse::<Symbol>()?),
            ..FrameInput::default()
        },
    };
    Ok(input)
}

/// Renders the scene as a 2x2 board followed by the control panel.
pub(crate) fn render_scene(scene: &Scene) -> String {
    let mut rendered = String::from("\n");
    for row in scene.pads.chunks(2) {
        for pad in row {
            let label = if pad.lit {
                pad.symbol.name().to_ascii_uppercase()
            } else {
                pad.symbol.name().to_owned()
            };
            let color = if pad.lit {
                pad.color.lighten(GLOW)
            } else {
                pad.color
            };
            let _ = write!(rendered, "{} {label:^8} \x1b[0m ", background(color));
        }
        rendered.push('\n');
    }

    let _ = writeln!(rendered, "{}", scene.status);
    if scene.start_available {
        rendered.push_str("[start]\n");
    } else {
        let _ = writeln!(rendered, "Level: {}", scene.level);
    }
    rendered
}

fn background(color: Color) -> String {
    let channel = |value: f32| (value * color.alpha).clamp(0.0, 1.0).mul_add(255.0, 0.5) as u8;
    format!(
        "\x1b[48;2;{};{};{}m",
        channel(color.red),
        channel(color.green),
        channel(color.blue)
    )
}
