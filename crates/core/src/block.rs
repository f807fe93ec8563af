//! Block primitives: the closed block-type set, door sub-state, and the
//! world-grid block record.

use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a placed block. Ids are assigned sequentially by the
/// world grid and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

/// The closed set of block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Ground plane material. Destructible but never collectible.
    Grass,
    /// Tree trunk material.
    Wood,
    /// Crafted from wood, used for building and door crafting.
    Planks,
    /// Tree canopy material.
    Leaves,
    /// Interactive block with open/closed state.
    Door,
}

impl BlockType {
    /// Whether breaking a block of this type yields an inventory item.
    pub fn collectible(self) -> bool {
        !matches!(self, BlockType::Grass)
    }

    /// Display name for logs and the (external) HUD.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Grass => "Grass",
            BlockType::Wood => "Wood",
            BlockType::Planks => "Planks",
            BlockType::Leaves => "Leaves",
            BlockType::Door => "Door",
        }
    }
}

/// Open/closed state of a door block.
///
/// The open timestamp is tracked in game-clock milliseconds and is `Some` if
/// and only if the door is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorState {
    open: bool,
    opened_at_ms: Option<u64>,
}

impl DoorState {
    /// A freshly placed door starts closed.
    pub fn new() -> Self {
        Self {
            open: false,
            opened_at_ms: None,
        }
    }

    /// Whether the door is currently open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Game-clock time at which the door was opened, if it is open.
    pub fn opened_at_ms(&self) -> Option<u64> {
        self.opened_at_ms
    }

    /// Flip the door state, stamping the open time on open and clearing it
    /// on close. Returns the new open flag.
    pub fn toggle(&mut self, now_ms: u64) -> bool {
        self.open = !self.open;
        self.opened_at_ms = self.open.then_some(now_ms);
        self.open
    }

    /// Close the door unconditionally (used by the auto-close sweep).
    pub fn close(&mut self) {
        self.open = false;
        self.opened_at_ms = None;
    }
}

impl Default for DoorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Block payload: plain solid types carry nothing, doors carry their state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Grass block.
    Grass,
    /// Wood block.
    Wood,
    /// Planks block.
    Planks,
    /// Leaves block.
    Leaves,
    /// Door block with its open/closed state.
    Door(DoorState),
}

impl BlockKind {
    /// Build the kind placed for a given inventory type. Doors start closed.
    pub fn from_type(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Grass => BlockKind::Grass,
            BlockType::Wood => BlockKind::Wood,
            BlockType::Planks => BlockKind::Planks,
            BlockType::Leaves => BlockKind::Leaves,
            BlockType::Door => BlockKind::Door(DoorState::new()),
        }
    }

    /// The type tag of this kind.
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Grass => BlockType::Grass,
            BlockKind::Wood => BlockType::Wood,
            BlockKind::Planks => BlockType::Planks,
            BlockKind::Leaves => BlockType::Leaves,
            BlockKind::Door(_) => BlockType::Door,
        }
    }

    /// Door state, when this is a door.
    pub fn door(&self) -> Option<&DoorState> {
        match self {
            BlockKind::Door(state) => Some(state),
            _ => None,
        }
    }

    /// Mutable door state, when this is a door.
    pub fn door_mut(&mut self) -> Option<&mut DoorState> {
        match self {
            BlockKind::Door(state) => Some(state),
            _ => None,
        }
    }

    /// Whether the player can walk through this block. Only open doors are
    /// passable; every other kind blocks movement.
    pub fn passable(&self) -> bool {
        matches!(self, BlockKind::Door(state) if state.is_open())
    }
}

/// A placed block in the world grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    /// Storage identifier.
    pub id: BlockId,
    /// Grid cell; the block occupies the unit cube centered here.
    pub position: IVec3,
    /// Type and per-type state.
    pub kind: BlockKind,
}
