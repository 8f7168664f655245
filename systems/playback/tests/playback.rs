use std::time::Duration;

use sequence_memory_core::{Command, Event, GamePhase, RoundId, Symbol};
use sequence_memory_system_playback::{Config, Playback};
use sequence_memory_world::{self as world, query, ScriptedSymbols, World};

const FLASH: Duration = Duration::from_millis(350);
const GAP: Duration = Duration::from_millis(250);

fn started(round: RoundId, length: usize) -> Event {
    Event::PlaybackStarted {
        round,
        length,
        overshoot: Duration::ZERO,
    }
}

#[test]
fn highlights_follow_flash_and_gap_cadence() {
    let mut playback = Playback::new(Config::new(FLASH, GAP));
    let round = RoundId::new(1);
    let mut timeline = Vec::new();
    let mut now = Duration::ZERO;

    let mut commands = Vec::new();
    playback.handle(&[started(round, 3)], &mut commands);
    timeline.extend(commands.drain(..).map(|command| (now, command)));

    let step = Duration::from_millis(50);
    while now < Duration::from_secs(3) {
        now += step;
        playback.handle(&[Event::TimeAdvanced { dt: step }], &mut commands);
        timeline.extend(commands.drain(..).map(|command| (now, command)));
    }

    let ms = Duration::from_millis;
    assert_eq!(
        timeline,
        vec![
            (ms(0), Command::ShowHighlight { round, index: 0 }),
            (ms(350), Command::ClearHighlight { round, index: 0 }),
            (ms(600), Command::ShowHighlight { round, index: 1 }),
            (ms(950), Command::ClearHighlight { round, index: 1 }),
            (ms(1_200), Command::ShowHighlight { round, index: 2 }),
            (ms(1_550), Command::ClearHighlight { round, index: 2 }),
            (ms(1_800), Command::FinishPlayback { round }),
        ]
    );
    assert!(!playback.is_presenting());
}

#[test]
fn coarse_tick_fires_every_due_transition_in_order() {
    let mut playback = Playback::new(Config::new(FLASH, GAP));
    let round = RoundId::new(9);
    let mut commands = Vec::new();
    playback.handle(
        &[
            started(round, 2),
            Event::TimeAdvanced {
                dt: Duration::from_millis(1_000),
            },
        ],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::ShowHighlight { round, index: 0 },
            Command::ClearHighlight { round, index: 0 },
            Command::ShowHighlight { round, index: 1 },
            Command::ClearHighlight { round, index: 1 },
        ]
    );
    assert!(playback.is_presenting());

    commands.clear();
    playback.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_millis(200),
        }],
        &mut commands,
    );
    assert_eq!(commands, vec![Command::FinishPlayback { round }]);
}

#[test]
fn overdue_presentation_catches_up_on_start() {
    let mut playback = Playback::new(Config::new(FLASH, GAP));
    let round = RoundId::new(4);
    let mut commands = Vec::new();
    playback.handle(
        &[Event::PlaybackStarted {
            round,
            length: 2,
            overshoot: Duration::from_millis(700),
        }],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::ShowHighlight { round, index: 0 },
            Command::ClearHighlight { round, index: 0 },
            Command::ShowHighlight { round, index: 1 },
        ]
    );

    commands.clear();
    playback.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_millis(250),
        }],
        &mut commands,
    );
    assert_eq!(commands, vec![Command::ClearHighlight { round, index: 1 }]);
}

#[test]
fn new_presentation_replaces_pending_chain() {
    let mut playback = Playback::new(Config::new(FLASH, GAP));
    let first = RoundId::new(1);
    let second = RoundId::new(2);
    let mut commands = Vec::new();
    playback.handle(
        &[
            started(first, 4),
            Event::TimeAdvanced {
                dt: Duration::from_millis(100),
            },
            started(second, 1),
            Event::TimeAdvanced {
                dt: Duration::from_millis(600),
            },
        ],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::ShowHighlight {
                round: first,
                index: 0
            },
            Command::ShowHighlight {
                round: second,
                index: 0
            },
            Command::ClearHighlight {
                round: second,
                index: 0
            },
            Command::FinishPlayback { round: second },
        ]
    );
}

#[test]
fn game_start_cancels_pending_chain() {
    let mut playback = Playback::default();
    let mut commands = Vec::new();
    playback.handle(
        &[started(RoundId::new(3), 5)],
        &mut commands,
    );
    assert!(playback.is_presenting());

    commands.clear();
    playback.handle(
        &[
            Event::GameStarted {
                round: RoundId::new(4),
            },
            Event::TimeAdvanced {
                dt: Duration::from_secs(10),
            },
        ],
        &mut commands,
    );
    assert!(commands.is_empty());
    assert!(!playback.is_presenting());
}

#[test]
fn world_observes_highlights_and_enters_input() {
    let mut world = World::with_source(ScriptedSymbols::new([Symbol::Red]));
    let mut playback = Playback::new(Config::new(FLASH, GAP));
    let mut active_log = Vec::new();

    drive(&mut world, &mut playback, Command::Start);
    active_log.push(query::active_symbol(&world));

    for _ in 0..12 {
        drive(
            &mut world,
            &mut playback,
            Command::Tick {
                dt: Duration::from_millis(50),
            },
        );
        active_log.push(query::active_symbol(&world));
    }

    let lit = active_log.iter().filter(|active| active.is_some()).count();
    assert_eq!(lit, 7, "lit for 350ms sampled every 50ms: {active_log:?}");
    assert_eq!(query::phase(&world), GamePhase::Input);
    assert!(query::player_input(&world).is_empty());
}

fn drive(world: &mut World<ScriptedSymbols>, playback: &mut Playback, command: Command) {
    let mut pending = vec![command];
    while !pending.is_empty() {
        let mut events = Vec::new();
        for command in pending.drain(..) {
            world::apply(world, command, &mut events);
        }
        playback.handle(&events, &mut pending);
    }
}
