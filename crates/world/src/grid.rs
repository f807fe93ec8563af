//! In-memory block storage.
//!
//! A flat id-keyed store: O(1) id lookup through the map, with a separate
//! insertion-ordered id list so linear scans (targeting, collision views,
//! door sweeps) iterate deterministically. The grid does not enforce cell
//! uniqueness; callers check occupancy before placing.

use glam::IVec3;
use grovecraft_core::{Block, BlockId, BlockKind};
use std::collections::HashMap;
use thiserror::Error;

/// Storage-level failures. Gameplay rejections are never routed through
/// this; an unknown id indicates a caller bug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The id is not present in the grid.
    #[error("unknown block id {0}")]
    UnknownBlockId(u32),
}

/// The mutable set of placed blocks.
#[derive(Debug, Clone, Default)]
pub struct WorldGrid {
    blocks: HashMap<BlockId, Block>,
    order: Vec<BlockId>,
    next_id: u32,
}

impl WorldGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks currently stored.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true when no blocks are stored.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert a block, returning its freshly assigned id. Ids are sequential
    /// and never reused within a session.
    pub fn add(&mut self, position: IVec3, kind: BlockKind) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.insert(id, Block { id, position, kind });
        self.order.push(id);
        id
    }

    /// Remove a block by id, returning it.
    pub fn remove(&mut self, id: BlockId) -> Result<Block, WorldError> {
        let block = self
            .blocks
            .remove(&id)
            .ok_or(WorldError::UnknownBlockId(id.0))?;
        // Linear at this world scale (a few thousand blocks).
        self.order.retain(|&other| other != id);
        Ok(block)
    }

    /// Fetch a block by id.
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    /// Fetch a block mutably by id (door state updates).
    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.get_mut(&id)
    }

    /// Iterate all blocks in insertion order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.order.iter().filter_map(|id| self.blocks.get(id))
    }

    /// Iterate door blocks in insertion order.
    pub fn doors(&self) -> impl Iterator<Item = &Block> {
        self.blocks().filter(|block| block.kind.door().is_some())
    }

    /// Whether any block occupies the exact cell.
    pub fn occupied(&self, cell: IVec3) -> bool {
        self.blocks().any(|block| block.position == cell)
    }
}
