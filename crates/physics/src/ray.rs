//! Block targeting: which block face does the view ray hit first?
//!
//! Candidate blocks are unit cubes centered on their integer grid cell
//! (half-extent 0.5 per axis). The resolver runs a slab test per candidate
//! and keeps the nearest positive entry distance, so callers get the hit
//! block, the world-space hit point, and the entry face's outward normal.
//! Doors are targeted as full cubes regardless of open state.

use glam::{IVec3, Vec3};
use grovecraft_core::BlockId;

/// Reach used for door interaction.
pub const INTERACT_REACH: f32 = 5.0;

/// Reach used for mining and placing.
pub const MINE_REACH: f32 = 10.0;

const BLOCK_HALF_EXTENT: f32 = 0.5;

/// Result of resolving the view ray against a set of candidate blocks.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// The block that was hit.
    pub block_id: BlockId,
    /// Grid cell of the hit block.
    pub block_pos: IVec3,
    /// Outward normal of the entry face (one of the six axis unit vectors).
    pub face_normal: IVec3,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// World-space position of the hit point.
    pub hit_pos: Vec3,
}

/// Find the nearest block surface intersected by the ray within
/// `max_distance`.
///
/// Ties on distance resolve to the first candidate in iteration order, which
/// is deterministic for the world grid's insertion-ordered iteration.
pub fn resolve_target<I>(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    candidates: I,
) -> Option<RayHit>
where
    I: IntoIterator<Item = (BlockId, IVec3)>,
{
    let mut best: Option<RayHit> = None;

    for (block_id, block_pos) in candidates {
        let Some((distance, face_normal)) = ray_box_entry(origin, direction, block_pos) else {
            continue;
        };
        if distance > max_distance {
            continue;
        }
        if best.as_ref().is_some_and(|hit| hit.distance <= distance) {
            continue;
        }
        best = Some(RayHit {
            block_id,
            block_pos,
            face_normal,
            distance,
            hit_pos: origin + direction * distance,
        });
    }

    best
}

/// Slab test against the unit cube centered at `cell`. Returns the positive
/// entry distance and the entry face's outward normal, or `None` when the
/// ray misses or starts inside the cube.
fn ray_box_entry(origin: Vec3, direction: Vec3, cell: IVec3) -> Option<(f32, IVec3)> {
    let center = cell.as_vec3();
    let min = center - Vec3::splat(BLOCK_HALF_EXTENT);
    let max = center + Vec3::splat(BLOCK_HALF_EXTENT);

    let mut t_entry = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut entry_axis = 0;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];

        if d == 0.0 {
            // Parallel to this slab: either always inside it or never.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

        if near > t_entry {
            t_entry = near;
            entry_axis = axis;
        }
        t_exit = t_exit.min(far);

        if t_entry > t_exit {
            return None;
        }
    }

    if t_entry <= 0.0 {
        return None;
    }

    let mut face_normal = IVec3::ZERO;
    face_normal[entry_axis] = if direction[entry_axis] > 0.0 { -1 } else { 1 };

    Some((t_entry, face_normal))
}
