//! First-person player controller: look, walk, jump, fall.
//!
//! The pose tracks the eye position (1 unit = 1 block edge). Per tick the
//! controller applies look input, horizontal intent with wall collision,
//! gravity, and ground snapping against the caller-provided collider view.
//! Collision is discrete per-frame checking, adequate at the target frame
//! rate.

use glam::{IVec3, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Horizontal walk speed in units per second.
pub const MOVE_SPEED: f32 = 10.0;

/// Vertical acceleration in units per second squared.
pub const GRAVITY: f32 = -25.0;

/// Upward velocity applied on jump.
pub const JUMP_SPEED: f32 = 8.0;

/// Eye height above the feet.
pub const EYE_HEIGHT: f32 = 1.8;

/// Horizontal collision radius of the player.
pub const PLAYER_RADIUS: f32 = 0.3;

/// Eye position on session start.
pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 3.0, 10.0);

// Collision tuning. The wall scan looks at the torso band only, so floor
// blocks never obstruct walking; the ground scan uses a wider footprint so
// the player can stand on block edges.
const WALL_DISTANCE: f32 = 0.5 + PLAYER_RADIUS;
const TORSO_BAND_MARGIN: f32 = 0.2;
const FOOT_SCAN_RADIUS: f32 = 0.7;
const STEP_UP_ALLOWANCE: f32 = 0.5;
const GROUND_SNAP_EPSILON: f32 = 0.01;
// Eye level over the default ground plane when no supporting block is found.
const DEFAULT_GROUND_LEVEL: f32 = 2.0;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// A block the kinematics pass may collide with. Passable colliders (open
/// doors) never block walking but still count as standing support.
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    /// Grid cell of the block.
    pub position: IVec3,
    /// Whether the player can walk through the block.
    pub passable: bool,
}

/// Eye position and view angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    /// Eye position in world units.
    pub position: Vec3,
    /// Horizontal view angle in radians.
    pub yaw: f32,
    /// Vertical view angle in radians, clamped just inside straight up/down.
    pub pitch: f32,
}

impl PlayerPose {
    /// Full look direction, used as the targeting ray.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Yaw-projected forward vector (y = 0), used for walking.
    pub fn horizontal_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Yaw-projected right vector (y = 0).
    pub fn horizontal_right(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, self.yaw.cos())
    }
}

/// Per-tick input consumed by the controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementInput {
    /// Strafe intent: positive right, negative left.
    pub move_x: f32,
    /// Walk intent: positive forward, negative backward.
    pub move_z: f32,
    /// Jump was pressed this frame.
    pub jump: bool,
    /// Creative descend modifier is held.
    pub descend: bool,
    /// Look delta in radians (yaw, pitch), already sensitivity-scaled.
    pub look_delta: (f32, f32),
}

/// Integrates the player pose against the block grid every tick.
#[derive(Debug, Clone)]
pub struct PlayerController {
    pose: PlayerPose,
    vertical_velocity: f32,
    grounded: bool,
}

impl PlayerController {
    /// Create a controller at the spawn pose, falling until the first
    /// ground snap.
    pub fn new() -> Self {
        Self {
            pose: PlayerPose {
                position: SPAWN_POSITION,
                yaw: -FRAC_PI_2,
                pitch: 0.0,
            },
            vertical_velocity: 0.0,
            grounded: false,
        }
    }

    /// Current pose.
    pub fn pose(&self) -> &PlayerPose {
        &self.pose
    }

    /// Whether the player stood on a surface at the end of the last tick.
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Teleport back to spawn and reset velocity (start of a new world).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance one tick.
    pub fn tick(&mut self, dt: f32, input: &MovementInput, colliders: &[Collider]) {
        self.apply_look(input.look_delta);

        if input.jump && self.grounded {
            self.vertical_velocity = JUMP_SPEED;
            self.grounded = false;
        }

        self.step_horizontal(dt, input, colliders);

        // Gravity integration.
        self.vertical_velocity += GRAVITY * dt;
        self.pose.position.y += self.vertical_velocity * dt;

        self.resolve_ground(colliders);

        // Creative descend: sink at walk speed while forcing the grounded
        // flag, a retained compatibility quirk.
        if input.descend {
            self.vertical_velocity = 0.0;
            self.grounded = true;
            self.pose.position.y -= MOVE_SPEED * dt;
        }
    }

    fn apply_look(&mut self, (yaw_delta, pitch_delta): (f32, f32)) {
        self.pose.yaw += yaw_delta;
        self.pose.pitch = (self.pose.pitch + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    fn step_horizontal(&mut self, dt: f32, input: &MovementInput, colliders: &[Collider]) {
        let intent = self.pose.horizontal_forward() * input.move_z
            + self.pose.horizontal_right() * input.move_x;
        if intent.length_squared() == 0.0 {
            return;
        }

        let step = intent.normalize() * MOVE_SPEED * dt;
        let old_x = self.pose.position.x;
        let old_z = self.pose.position.z;
        self.pose.position.x += step.x;
        self.pose.position.z += step.z;

        if self.hits_wall(colliders) {
            // Cancel the whole step; no axis-separated sliding.
            self.pose.position.x = old_x;
            self.pose.position.z = old_z;
        }
    }

    fn hits_wall(&self, colliders: &[Collider]) -> bool {
        let eye = self.pose.position;
        let feet = eye.y - EYE_HEIGHT;

        colliders.iter().any(|collider| {
            if collider.passable {
                return false;
            }
            // Torso band only: the floor block underfoot never blocks.
            let block_y = collider.position.y as f32;
            if block_y <= feet + TORSO_BAND_MARGIN || block_y > eye.y + TORSO_BAND_MARGIN {
                return false;
            }
            let dx = eye.x - collider.position.x as f32;
            let dz = eye.z - collider.position.z as f32;
            dx * dx + dz * dz < WALL_DISTANCE * WALL_DISTANCE
        })
    }

    fn resolve_ground(&mut self, colliders: &[Collider]) {
        let eye = self.pose.position;
        let feet = eye.y - EYE_HEIGHT;

        let mut ground_level = DEFAULT_GROUND_LEVEL;
        for collider in colliders {
            let dx = eye.x - collider.position.x as f32;
            let dz = eye.z - collider.position.z as f32;
            if dx * dx + dz * dz >= FOOT_SCAN_RADIUS * FOOT_SCAN_RADIUS {
                continue;
            }

            let surface = collider.position.y as f32 + 0.5;
            let eye_level = surface + EYE_HEIGHT;
            if surface <= feet + STEP_UP_ALLOWANCE && eye_level > ground_level {
                ground_level = eye_level;
            }
        }

        if self.pose.position.y <= ground_level + GROUND_SNAP_EPSILON {
            self.pose.position.y = ground_level;
            self.vertical_velocity = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn solid(x: i32, y: i32, z: i32) -> Collider {
        Collider {
            position: IVec3::new(x, y, z),
            passable: false,
        }
    }

    /// 5x5 floor of blocks at y = 0 centered under the spawn column.
    fn floor() -> Vec<Collider> {
        let mut colliders = Vec::new();
        for x in -2..=2 {
            for z in 8..=12 {
                colliders.push(solid(x, 0, z));
            }
        }
        colliders
    }

    fn settle(controller: &mut PlayerController, colliders: &[Collider]) {
        for _ in 0..120 {
            controller.tick(DT, &MovementInput::default(), colliders);
        }
        assert!(controller.grounded());
    }

    #[test]
    fn falls_until_snapped_to_floor() {
        let colliders = floor();
        let mut controller = PlayerController::new();
        assert!(!controller.grounded());

        settle(&mut controller, &colliders);
        // Standing on a block at y = 0: surface 0.5, eye 1.8 above it.
        assert_eq!(controller.pose().position.y, 2.3);
    }

    #[test]
    fn ground_snap_is_idempotent() {
        let colliders = floor();
        let mut controller = PlayerController::new();
        settle(&mut controller, &colliders);

        let settled_y = controller.pose().position.y;
        for _ in 0..100 {
            controller.tick(DT, &MovementInput::default(), &colliders);
            assert_eq!(controller.pose().position.y, settled_y);
            assert!(controller.grounded());
        }
    }

    #[test]
    fn jump_rises_then_lands() {
        let colliders = floor();
        let mut controller = PlayerController::new();
        settle(&mut controller, &colliders);

        let input = MovementInput {
            jump: true,
            ..Default::default()
        };
        controller.tick(DT, &input, &colliders);
        assert!(!controller.grounded());
        assert!(controller.pose().position.y > 2.3);

        settle(&mut controller, &colliders);
        assert_eq!(controller.pose().position.y, 2.3);
    }

    #[test]
    fn jump_does_nothing_while_airborne() {
        let mut controller = PlayerController::new();
        let input = MovementInput {
            jump: true,
            ..Default::default()
        };
        // No colliders: free fall from spawn toward the default ground level.
        controller.tick(DT, &input, &[]);
        assert!(controller.pose().position.y < SPAWN_POSITION.y);
    }

    #[test]
    fn wall_blocks_forward_motion() {
        let mut colliders = floor();
        // Two-block wall one cell ahead of the spawn column (facing -Z).
        colliders.push(solid(0, 1, 9));
        colliders.push(solid(0, 2, 9));

        let mut controller = PlayerController::new();
        settle(&mut controller, &colliders);

        let input = MovementInput {
            move_z: 1.0,
            ..Default::default()
        };
        for _ in 0..60 {
            controller.tick(DT, &input, &colliders);
        }

        // One full second of walking would cover 10 units; the wall keeps
        // the player outside the combined radius.
        let z = controller.pose().position.z;
        assert!(z > 9.0 + WALL_DISTANCE - 0.01, "stopped at z = {z}");
        assert!(controller.pose().position.x.abs() < 1e-4);
    }

    #[test]
    fn motion_parallel_to_wall_is_unobstructed() {
        let mut colliders = floor();
        colliders.push(solid(0, 1, 9));
        colliders.push(solid(0, 2, 9));

        let mut controller = PlayerController::new();
        settle(&mut controller, &colliders);

        let input = MovementInput {
            move_x: 1.0,
            ..Default::default()
        };
        for _ in 0..30 {
            controller.tick(DT, &input, &colliders);
        }
        assert!(controller.pose().position.x.abs() > 2.0);
    }

    #[test]
    fn floor_blocks_never_block_walking() {
        let colliders = floor();
        let mut controller = PlayerController::new();
        settle(&mut controller, &colliders);

        let input = MovementInput {
            move_x: 1.0,
            ..Default::default()
        };
        for _ in 0..12 {
            controller.tick(DT, &input, &colliders);
        }
        let moved = controller.pose().position.x.abs();
        assert!((moved - 2.0).abs() < 1e-3, "moved {moved}");
    }

    #[test]
    fn open_door_collider_is_passable() {
        let mut colliders = floor();
        colliders.push(Collider {
            position: IVec3::new(0, 1, 9),
            passable: true,
        });
        colliders.push(Collider {
            position: IVec3::new(0, 2, 9),
            passable: true,
        });

        let mut controller = PlayerController::new();
        settle(&mut controller, &colliders);

        let input = MovementInput {
            move_z: 1.0,
            ..Default::default()
        };
        for _ in 0..12 {
            controller.tick(DT, &input, &colliders);
        }
        assert!(controller.pose().position.z < 9.0);
    }

    #[test]
    fn knee_high_block_blocks_walking_but_allows_jump_up() {
        let mut colliders = floor();
        colliders.push(solid(0, 1, 9));

        let mut controller = PlayerController::new();
        settle(&mut controller, &colliders);

        // Walking straight in is stopped by the torso band.
        let walk = MovementInput {
            move_z: 1.0,
            ..Default::default()
        };
        for _ in 0..30 {
            controller.tick(DT, &walk, &colliders);
        }
        assert_eq!(controller.pose().position.y, 2.3);
        assert!(controller.pose().position.z > 9.7);

        // Jumping while holding forward clears the band and lands on top.
        let jump_walk = MovementInput {
            move_z: 1.0,
            jump: true,
            ..Default::default()
        };
        controller.tick(DT, &jump_walk, &colliders);
        for _ in 0..5 {
            controller.tick(DT, &walk, &colliders);
        }
        settle(&mut controller, &colliders);
        assert_eq!(controller.pose().position.y, 3.3);
    }

    #[test]
    fn descend_modifier_sinks_while_grounded_flag_holds() {
        let mut controller = PlayerController::new();
        let input = MovementInput {
            descend: true,
            ..Default::default()
        };

        let start_y = controller.pose().position.y;
        controller.tick(DT, &input, &[]);

        assert!(controller.grounded());
        let dropped = start_y - controller.pose().position.y;
        assert!(dropped >= MOVE_SPEED * DT);
    }

    #[test]
    fn pitch_stays_clamped() {
        let mut controller = PlayerController::new();
        let input = MovementInput {
            look_delta: (0.0, 1.0),
            ..Default::default()
        };
        for _ in 0..10 {
            controller.tick(DT, &input, &[]);
        }
        assert!(controller.pose().pitch < FRAC_PI_2);

        let down = MovementInput {
            look_delta: (0.0, -1.0),
            ..Default::default()
        };
        for _ in 0..20 {
            controller.tick(DT, &down, &[]);
        }
        assert!(controller.pose().pitch > -FRAC_PI_2);
    }
}
