//! Headless frame driver: fixed-rate ticks fed from a scripted input file
//! (or idle input), with an optional JSONL event log and final snapshot.

use crate::config::GameplayConfig;
use crate::game::{GameSession, SessionEvent};
use crate::input::{ActionState, InputCollector};
use crate::scripted_input::ScriptedInputPlayer;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Ticks simulated when neither a script nor --max-ticks bounds the run.
const DEFAULT_MAX_TICKS: u64 = 600;

/// Driver options collected from the command line.
pub struct RunOptions {
    pub script: Option<PathBuf>,
    pub event_log: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
    pub max_ticks: Option<u64>,
    pub tick_rate: f32,
}

#[derive(Serialize)]
struct LogRecord<'a> {
    tick: u64,
    kind: &'a str,
    payload: &'a SessionEvent,
}

struct EventLog {
    file: File,
}

impl EventLog {
    fn create(path: &PathBuf) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create event log {}", path.display()))?;
        Ok(Self { file })
    }

    fn write(&mut self, tick: u64, event: &SessionEvent) -> Result<()> {
        let record = LogRecord {
            tick,
            kind: event.kind(),
            payload: event,
        };
        let line = serde_json::to_string(&record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

/// Run a headless session to completion.
pub fn run(config: &GameplayConfig, options: RunOptions) -> Result<()> {
    let collector = InputCollector::new(config);
    let mut session = GameSession::new();

    let mut script = match &options.script {
        Some(path) => Some(
            ScriptedInputPlayer::from_path(path)
                .with_context(|| format!("failed to load script {}", path.display()))?,
        ),
        None => None,
    };
    let mut log = match &options.event_log {
        Some(path) => Some(EventLog::create(path)?),
        None => None,
    };

    let dt = 1.0 / options.tick_rate;
    let max_ticks = options.max_ticks.unwrap_or(DEFAULT_MAX_TICKS);

    info!(blocks = session.world().len(), "session started");
    if let Some(log) = log.as_mut() {
        let started = SessionEvent::WorldStarted {
            blocks: session.world().len(),
        };
        log.write(0, &started)?;
    }

    let mut ticks = 0u64;
    while ticks < max_ticks {
        let actions = match script.as_mut() {
            Some(player) => {
                if player.finished() {
                    break;
                }
                let frame = player.advance(dt);
                let mut actions = collector.collect(&frame.held, &frame.tapped, frame.look);
                // Craft requests come from the (scripted) crafting menu, not
                // from key bindings.
                actions.craft_planks = frame.craft_planks;
                actions.craft_door = frame.craft_door;
                actions
            }
            None => ActionState::default(),
        };

        let events = session.tick(dt, &actions);
        ticks += 1;

        for event in &events {
            info!(kind = event.kind(), tick = session.tick_count(), "session event");
            if let Some(log) = log.as_mut() {
                log.write(session.tick_count(), event)?;
            }
        }
    }

    info!(ticks, "session finished");

    if let Some(path) = &options.snapshot {
        let snapshot = session.snapshot();
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        info!(path = %path.display(), "snapshot written");
    }

    Ok(())
}
