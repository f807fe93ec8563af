#![warn(missing_docs)]
//! Deterministic testing surfaces: session event logging and fixture worlds.

use anyhow::Result;
use glam::IVec3;
use grovecraft_core::{BlockKind, BlockType};
use grovecraft_world::WorldGrid;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One session event captured by headless runs.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Simulation tick when the event occurred.
    pub tick: u64,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Structured event payload.
    pub payload: serde_json::Value,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

/// A bare grass plane spanning x, z in [-half_extent, half_extent]; handy
/// for kinematics and placement tests that don't want trees in the way.
pub fn flat_world(half_extent: i32) -> WorldGrid {
    let mut grid = WorldGrid::new();
    for x in -half_extent..=half_extent {
        for z in -half_extent..=half_extent {
            grid.add(IVec3::new(x, 0, z), BlockKind::Grass);
        }
    }
    grid
}

/// A flat plane with a single closed door standing on it.
pub fn door_world(half_extent: i32, door_cell: IVec3) -> WorldGrid {
    let mut grid = flat_world(half_extent);
    grid.add(door_cell, BlockKind::from_type(BlockType::Door));
    grid
}
