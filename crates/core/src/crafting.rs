//! Crafting system - recipes for turning collected blocks into new ones.

use crate::block::BlockType;
use crate::inventory::Inventory;

/// A crafting recipe that transforms input items into output items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    /// Items required as input (block type and count).
    pub inputs: &'static [(BlockType, u32)],
    /// Block type produced as output.
    pub output: BlockType,
    /// Number of output items produced.
    pub output_count: u32,
}

/// 1 Wood -> 4 Planks.
pub const PLANKS_FROM_WOOD: Recipe = Recipe {
    inputs: &[(BlockType::Wood, 1)],
    output: BlockType::Planks,
    output_count: 4,
};

/// 2 Planks -> 1 Door.
pub const DOOR_FROM_PLANKS: Recipe = Recipe {
    inputs: &[(BlockType::Planks, 2)],
    output: BlockType::Door,
    output_count: 1,
};

/// Every recipe the crafting menu offers, in display order.
pub const ALL_RECIPES: &[Recipe] = &[PLANKS_FROM_WOOD, DOOR_FROM_PLANKS];

impl Recipe {
    /// Check whether the inventory holds every input.
    pub fn can_craft(&self, inventory: &Inventory) -> bool {
        self.inputs
            .iter()
            .all(|&(block_type, count)| inventory.has(block_type, count))
    }

    /// Craft once: consume the inputs and add the output as one logical
    /// step. When any input is missing, nothing changes and `false` is
    /// returned.
    pub fn craft(&self, inventory: &mut Inventory) -> bool {
        if !self.can_craft(inventory) {
            return false;
        }

        for &(block_type, count) in self.inputs {
            // Cannot fail: can_craft just verified every input.
            inventory.remove(block_type, count);
        }
        inventory.add(self.output, self.output_count);
        true
    }
}
