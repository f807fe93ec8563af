//! Player interactions: break, place, and door toggling.
//!
//! Each operation is a short transaction over the grid and inventory. A
//! missed target or unmet precondition is a silent rejection reported
//! through the outcome enum, never an error; the grid's `UnknownBlockId`
//! cannot fire here because every removed id was just resolved.
//!
//! Targeting treats every block as a full cube, open doors included; only
//! movement collision lets the player through an open doorway.

use crate::grid::WorldGrid;
use glam::{IVec3, Vec3};
use grovecraft_core::{BlockId, BlockKind, BlockType, Inventory};
use grovecraft_physics::{resolve_target, Aabb, PlayerPose, INTERACT_REACH, MINE_REACH};

// Placement must not bury the player: the candidate cell center is rejected
// inside this half-extent box around the eye.
const PLAYER_CLEARANCE: Vec3 = Vec3::new(0.6, 1.8, 0.6);

// Doors are matched loosely around the rounded hit point; their visual
// geometry does not fill the cell, so exact cell equality would miss.
const DOOR_MATCH_TOLERANCE: f32 = 1.5;

/// Result of a break action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakOutcome {
    /// A block was removed from the world.
    Removed {
        /// Type of the removed block; collectible types were added to the
        /// inventory.
        block_type: BlockType,
    },
    /// No block within reach.
    NoTarget,
}

/// Result of a place action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// A block was added to the world and the inventory decremented.
    Placed {
        /// Id of the new block.
        block_id: BlockId,
        /// Cell the block was placed into.
        cell: IVec3,
    },
    /// No inventory slot is selected.
    NothingSelected,
    /// The selected type has a zero count.
    OutOfStock,
    /// No block within reach to place against.
    NoTarget,
    /// The candidate cell already holds a block.
    CellOccupied,
    /// The candidate cell overlaps the player.
    TooClose,
}

/// Result of a door-toggle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The door was opened at the given game time.
    Opened(BlockId),
    /// The door was closed.
    Closed(BlockId),
    /// No door within reach.
    NoTarget,
}

/// Break the block the player is looking at.
pub fn break_block(
    world: &mut WorldGrid,
    inventory: &mut Inventory,
    pose: &PlayerPose,
) -> BreakOutcome {
    let Some(hit) = resolve_target(
        pose.position,
        pose.forward(),
        MINE_REACH,
        world.blocks().map(|block| (block.id, block.position)),
    ) else {
        tracing::debug!("break: no block in range");
        return BreakOutcome::NoTarget;
    };

    let block = match world.remove(hit.block_id) {
        Ok(block) => block,
        Err(err) => {
            tracing::error!(%err, "resolved break target vanished before removal");
            return BreakOutcome::NoTarget;
        }
    };

    let block_type = block.kind.block_type();
    if block_type.collectible() {
        inventory.add(block_type, 1);
    }
    tracing::debug!(
        kind = block_type.name(),
        x = block.position.x,
        y = block.position.y,
        z = block.position.z,
        "broke block"
    );
    BreakOutcome::Removed { block_type }
}

/// Place one unit of the selected type against the targeted block face.
pub fn place_block(
    world: &mut WorldGrid,
    inventory: &mut Inventory,
    pose: &PlayerPose,
) -> PlaceOutcome {
    let Some(selected) = inventory.selected() else {
        return PlaceOutcome::NothingSelected;
    };
    if !inventory.has(selected, 1) {
        return PlaceOutcome::OutOfStock;
    }

    let Some(hit) = resolve_target(
        pose.position,
        pose.forward(),
        MINE_REACH,
        world.blocks().map(|block| (block.id, block.position)),
    ) else {
        tracing::debug!("place: no block in range");
        return PlaceOutcome::NoTarget;
    };

    let cell = hit.block_pos + hit.face_normal;
    if world.occupied(cell) {
        tracing::debug!(x = cell.x, y = cell.y, z = cell.z, "place: cell occupied");
        return PlaceOutcome::CellOccupied;
    }

    let player_volume = Aabb::from_center_half_extents(pose.position, PLAYER_CLEARANCE);
    if player_volume.contains(cell.as_vec3()) {
        tracing::debug!(x = cell.x, y = cell.y, z = cell.z, "place: would bury player");
        return PlaceOutcome::TooClose;
    }

    let block_id = world.add(cell, BlockKind::from_type(selected));
    inventory.remove(selected, 1);
    tracing::debug!(
        kind = selected.name(),
        x = cell.x,
        y = cell.y,
        z = cell.z,
        "placed block"
    );
    PlaceOutcome::Placed { block_id, cell }
}

/// Toggle the door the player is looking at.
pub fn toggle_door(world: &mut WorldGrid, pose: &PlayerPose, now_ms: u64) -> ToggleOutcome {
    let Some(hit) = resolve_target(
        pose.position,
        pose.forward(),
        INTERACT_REACH,
        world.doors().map(|block| (block.id, block.position)),
    ) else {
        tracing::debug!("toggle: no door in range");
        return ToggleOutcome::NoTarget;
    };

    // Match the door nearest the rounded hit point rather than trusting the
    // exact cell, mirroring the loose geometry of rendered doors.
    let target = hit.hit_pos.round();
    let Some(door_id) = world
        .doors()
        .find(|block| {
            let delta = (block.position.as_vec3() - target).abs();
            delta.x < DOOR_MATCH_TOLERANCE
                && delta.y < DOOR_MATCH_TOLERANCE
                && delta.z < DOOR_MATCH_TOLERANCE
        })
        .map(|block| block.id)
    else {
        tracing::debug!("toggle: hit point matched no door");
        return ToggleOutcome::NoTarget;
    };

    let Some(door) = world
        .get_mut(door_id)
        .and_then(|block| block.kind.door_mut())
    else {
        return ToggleOutcome::NoTarget;
    };

    if door.toggle(now_ms) {
        tracing::debug!(id = door_id.0, "door opened");
        ToggleOutcome::Opened(door_id)
    } else {
        tracing::debug!(id = door_id.0, "door closed");
        ToggleOutcome::Closed(door_id)
    }
}
