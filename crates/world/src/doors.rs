//! Timed door auto-close.
//!
//! Runs once per tick: every open door whose open timestamp is at least
//! `DOOR_AUTO_CLOSE_MS` in the past is closed. The sweep is idempotent and
//! order-independent across doors.

use crate::grid::WorldGrid;
use grovecraft_core::BlockId;

/// How long a door stays open before closing on its own.
pub const DOOR_AUTO_CLOSE_MS: u64 = 3000;

/// Close every expired door; returns how many were closed.
pub fn close_expired_doors(world: &mut WorldGrid, now_ms: u64) -> usize {
    let expired: Vec<BlockId> = world
        .doors()
        .filter_map(|block| {
            let opened_at = block.kind.door()?.opened_at_ms()?;
            (now_ms.saturating_sub(opened_at) >= DOOR_AUTO_CLOSE_MS).then_some(block.id)
        })
        .collect();

    for &id in &expired {
        if let Some(door) = world.get_mut(id).and_then(|block| block.kind.door_mut()) {
            door.close();
            tracing::debug!(id = id.0, "door auto-closed");
        }
    }

    expired.len()
}
