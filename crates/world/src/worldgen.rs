//! World generation: a flat grass plane with a fixed stand of trees.
//!
//! Generation is a deterministic one-shot producer: the same block set every
//! session, fully formed before the first physics tick.

use crate::grid::WorldGrid;
use glam::IVec3;
use grovecraft_core::BlockKind;

/// The grass plane spans x, z in [-WORLD_HALF_EXTENT, WORLD_HALF_EXTENT].
pub const WORLD_HALF_EXTENT: i32 = 20;

/// Trunk base (x, z) of every tree.
pub const TREE_POSITIONS: [(i32, i32); 10] = [
    (5, 8),
    (-3, 5),
    (8, -6),
    (-7, -4),
    (12, 3),
    (-10, 8),
    (6, -10),
    (-8, 12),
    (15, -2),
    (-5, -9),
];

const TRUNK_TOP: i32 = 4;
const CANOPY_BOTTOM: i32 = 5;
const CANOPY_TOP: i32 = 6;
const CAPSTONE_Y: i32 = 7;

/// Produce the starting world.
pub fn generate_world() -> WorldGrid {
    let mut grid = WorldGrid::new();

    for x in -WORLD_HALF_EXTENT..=WORLD_HALF_EXTENT {
        for z in -WORLD_HALF_EXTENT..=WORLD_HALF_EXTENT {
            grid.add(IVec3::new(x, 0, z), BlockKind::Grass);
        }
    }

    for &(tx, tz) in &TREE_POSITIONS {
        generate_tree(&mut grid, tx, tz);
    }

    grid
}

fn generate_tree(grid: &mut WorldGrid, tx: i32, tz: i32) {
    for y in 1..=TRUNK_TOP {
        grid.add(IVec3::new(tx, y, tz), BlockKind::Wood);
    }

    for x in -1..=1 {
        for z in -1..=1 {
            for y in CANOPY_BOTTOM..=CANOPY_TOP {
                // The canopy's top-center cell is left open for the capstone.
                if x == 0 && z == 0 && y == CANOPY_TOP {
                    continue;
                }
                grid.add(IVec3::new(tx + x, y, tz + z), BlockKind::Leaves);
            }
        }
    }

    grid.add(IVec3::new(tx, CAPSTONE_Y, tz), BlockKind::Leaves);
}

#[cfg(test)]
mod tests {
    use super::*;
    use grovecraft_core::BlockType;

    #[test]
    fn generation_is_deterministic() {
        let a = generate_world();
        let b = generate_world();

        let blocks_a: Vec<_> = a.blocks().map(|bl| (bl.position, bl.kind)).collect();
        let blocks_b: Vec<_> = b.blocks().map(|bl| (bl.position, bl.kind)).collect();
        assert_eq!(blocks_a, blocks_b);
    }

    #[test]
    fn block_census() {
        let world = generate_world();

        let count_of = |block_type: BlockType| {
            world
                .blocks()
                .filter(|b| b.kind.block_type() == block_type)
                .count()
        };

        // 41x41 plane.
        assert_eq!(count_of(BlockType::Grass), 1681);
        // 4-block trunks.
        assert_eq!(count_of(BlockType::Wood), 40);
        // 3x3x2 canopy minus the open top-center, plus a capstone, per tree.
        assert_eq!(count_of(BlockType::Leaves), 180);
        assert_eq!(world.len(), 1901);
    }

    #[test]
    fn trees_sit_on_the_plane() {
        let world = generate_world();

        for &(tx, tz) in &TREE_POSITIONS {
            assert!(world.occupied(IVec3::new(tx, 0, tz)), "grass under trunk");
            assert!(world.occupied(IVec3::new(tx, 1, tz)), "trunk base");
            assert!(world.occupied(IVec3::new(tx, CAPSTONE_Y, tz)), "capstone");
            assert!(
                !world.occupied(IVec3::new(tx, CAPSTONE_Y + 1, tz)),
                "nothing above the capstone"
            );
        }
    }

    #[test]
    fn no_doors_in_a_fresh_world() {
        let world = generate_world();
        assert_eq!(world.doors().count(), 0);
    }
}
