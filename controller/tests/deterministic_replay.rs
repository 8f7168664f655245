use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use sequence_memory_controller::SequenceGame;
use sequence_memory_core::{Command, Event, GamePhase, Level, RoundId, Symbol, Timing};
use sequence_memory_world::{SeededSymbols, World};

#[test]
fn deterministic_replay_produces_identical_log() {
    let first = replay(0x5eed, scripted_commands());
    let second = replay(0x5eed, scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.target.len(), first.level.get() as usize);
    assert_eq!(first.phase, GamePhase::Input);
    assert!(first
        .events
        .iter()
        .any(|record| matches!(record, EventRecord::PhaseChanged { to: GamePhase::Input, .. })));
}

#[test]
fn different_seeds_produce_different_sequences() {
    let sequences: Vec<Vec<Symbol>> = (0..8u64)
        .map(|seed| {
            let mut game = SequenceGame::with_world(World::with_seed(seed), Timing::default());
            let mut events = Vec::new();
            for _ in 0..6 {
                game.restart(&mut events);
            }
            events
                .iter()
                .filter_map(|event| match event {
                    Event::SymbolAppended { symbol, .. } => Some(*symbol),
                    _ => None,
                })
                .collect()
        })
        .collect();

    assert!(
        sequences.windows(2).any(|pair| pair[0] != pair[1]),
        "seeds should influence the drawn symbols"
    );
}

fn replay(seed: u64, commands: Vec<Command>) -> ReplayOutcome {
    let world: World<SeededSymbols> = World::with_seed(seed);
    let mut game = SequenceGame::with_world(world, Timing::default());
    let mut events = Vec::new();

    for command in commands {
        game.submit(command, &mut events);
    }

    ReplayOutcome {
        target: game.target_sequence().to_vec(),
        level: game.level(),
        phase: game.phase(),
        events: events.iter().map(EventRecord::from).collect(),
    }
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = vec![Command::Start];
    commands.extend((0..30).map(|_| Command::Tick {
        dt: Duration::from_millis(40),
    }));
    commands.push(Command::Select {
        symbol: Symbol::Green,
    });
    commands.extend((0..30).map(|_| Command::Tick {
        dt: Duration::from_millis(40),
    }));
    commands.push(Command::Start);
    commands.push(Command::Tick {
        dt: Duration::from_millis(1_000),
    });
    commands
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    target: Vec<Symbol>,
    level: Level,
    phase: GamePhase,
    events: Vec<EventRecord>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum EventRecord {
    TimeAdvanced { dt_micros: u128 },
    Highlight { round: RoundId, index: usize, lit: bool },
    PhaseChanged { from: GamePhase, to: GamePhase },
    Appended { symbol: Symbol, level: Level },
    Other,
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        match event {
            Event::TimeAdvanced { dt } => Self::TimeAdvanced {
                dt_micros: dt.as_micros(),
            },
            Event::HighlightShown { round, index, .. } => Self::Highlight {
                round: *round,
                index: *index,
                lit: true,
            },
            Event::HighlightCleared { round, index } => Self::Highlight {
                round: *round,
                index: *index,
                lit: false,
            },
            Event::PhaseChanged { from, to } => Self::PhaseChanged {
                from: *from,
                to: *to,
            },
            Event::SymbolAppended { symbol, level } => Self::Appended {
                symbol: *symbol,
                level: *level,
            },
            _ => Self::Other,
        }
    }
}
