//! Session inventory.
//!
//! Holds at most one entry per block type; an entry disappears when its count
//! reaches zero. The selected type drives block placement and is
//! auto-assigned on pickup when nothing is selected.

use crate::block::BlockType;
use serde::{Deserialize, Serialize};

/// A single inventory line: a block type and how many the player holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    /// The held block type.
    pub block_type: BlockType,
    /// Number held; always > 0 while the entry exists.
    pub count: u32,
}

/// Player inventory plus the active selection.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entries: Vec<ItemEntry>,
    selected: Option<BlockType>,
}

impl Inventory {
    /// Create an empty inventory with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in pickup order.
    pub fn entries(&self) -> &[ItemEntry] {
        &self.entries
    }

    /// Count held for a type (0 when absent).
    pub fn count(&self, block_type: BlockType) -> u32 {
        self.entries
            .iter()
            .find(|entry| entry.block_type == block_type)
            .map_or(0, |entry| entry.count)
    }

    /// Whether at least `amount` of `block_type` is held.
    pub fn has(&self, block_type: BlockType, amount: u32) -> bool {
        self.count(block_type) >= amount
    }

    /// True when no entries exist.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The currently selected type, if any.
    pub fn selected(&self) -> Option<BlockType> {
        self.selected
    }

    /// Set or clear the selection directly.
    pub fn select(&mut self, block_type: Option<BlockType>) {
        self.selected = block_type;
    }

    /// Select the type held in the given entry slot (0-based). Out-of-range
    /// slots leave the selection unchanged.
    pub fn select_slot(&mut self, slot: usize) -> Option<BlockType> {
        let block_type = self.entries.get(slot)?.block_type;
        self.selected = Some(block_type);
        Some(block_type)
    }

    /// Add `amount` of a type, merging into the existing entry. When nothing
    /// is selected the just-modified type becomes the selection.
    pub fn add(&mut self, block_type: BlockType, amount: u32) {
        if amount == 0 {
            return;
        }

        match self
            .entries
            .iter_mut()
            .find(|entry| entry.block_type == block_type)
        {
            Some(entry) => entry.count += amount,
            None => self.entries.push(ItemEntry { block_type, count: amount }),
        }

        if self.selected.is_none() {
            self.selected = Some(block_type);
        }
    }

    /// Remove `amount` of a type. Refuses silently (returns `false`, state
    /// unchanged) when fewer than `amount` are held; removes the entry
    /// entirely when its count reaches zero.
    pub fn remove(&mut self, block_type: BlockType, amount: u32) -> bool {
        let Some(index) = self
            .entries
            .iter()
            .position(|entry| entry.block_type == block_type)
        else {
            return false;
        };

        let entry = &mut self.entries[index];
        if entry.count < amount {
            return false;
        }

        entry.count -= amount;
        if entry.count == 0 {
            self.entries.remove(index);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merges_into_single_entry() {
        let mut inv = Inventory::new();
        inv.add(BlockType::Wood, 1);
        inv.add(BlockType::Wood, 2);

        assert_eq!(inv.entries().len(), 1);
        assert_eq!(inv.count(BlockType::Wood), 3);
    }

    #[test]
    fn first_pickup_auto_selects() {
        let mut inv = Inventory::new();
        assert_eq!(inv.selected(), None);

        inv.add(BlockType::Wood, 1);
        assert_eq!(inv.selected(), Some(BlockType::Wood));

        // An explicit selection is not overridden by later pickups.
        inv.add(BlockType::Planks, 4);
        assert_eq!(inv.selected(), Some(BlockType::Wood));
    }

    #[test]
    fn cleared_selection_reassigns_on_next_pickup() {
        let mut inv = Inventory::new();
        inv.add(BlockType::Wood, 1);
        inv.select(None);

        inv.add(BlockType::Planks, 1);
        assert_eq!(inv.selected(), Some(BlockType::Planks));
    }

    #[test]
    fn remove_refuses_when_short() {
        let mut inv = Inventory::new();
        inv.add(BlockType::Planks, 2);

        assert!(!inv.remove(BlockType::Planks, 3));
        assert_eq!(inv.count(BlockType::Planks), 2);
        assert!(!inv.remove(BlockType::Wood, 1));
    }

    #[test]
    fn entry_disappears_at_zero() {
        let mut inv = Inventory::new();
        inv.add(BlockType::Wood, 2);

        assert!(inv.remove(BlockType::Wood, 2));
        assert!(inv.is_empty());
        assert_eq!(inv.count(BlockType::Wood), 0);
    }

    #[test]
    fn select_slot_uses_pickup_order() {
        let mut inv = Inventory::new();
        inv.add(BlockType::Wood, 1);
        inv.add(BlockType::Planks, 1);

        assert_eq!(inv.select_slot(1), Some(BlockType::Planks));
        assert_eq!(inv.selected(), Some(BlockType::Planks));
        assert_eq!(inv.select_slot(5), None);
        assert_eq!(inv.selected(), Some(BlockType::Planks));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn block_type() -> impl Strategy<Value = BlockType> {
            prop_oneof![
                Just(BlockType::Grass),
                Just(BlockType::Wood),
                Just(BlockType::Planks),
                Just(BlockType::Leaves),
                Just(BlockType::Door),
            ]
        }

        proptest! {
            // Arbitrary add/remove interleavings keep every entry positive
            // and at most one entry per type.
            #[test]
            fn entries_stay_positive_and_unique(
                ops in prop::collection::vec((block_type(), 0u32..5, prop::bool::ANY), 0..64)
            ) {
                let mut inv = Inventory::new();
                for (block_type, amount, is_add) in ops {
                    if is_add {
                        inv.add(block_type, amount);
                    } else {
                        inv.remove(block_type, amount);
                    }

                    for entry in inv.entries() {
                        prop_assert!(entry.count > 0);
                    }
                    let types: std::collections::HashSet<_> =
                        inv.entries().iter().map(|e| e.block_type).collect();
                    prop_assert_eq!(types.len(), inv.entries().len());
                }
            }
        }
    }
}
