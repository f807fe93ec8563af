//! Game session state - world, inventory, player, and the per-tick loop.

use crate::input::ActionState;
use grovecraft_core::{
    BlockId, BlockType, GameClock, Inventory, ItemEntry, Recipe, DOOR_FROM_PLANKS,
    PLANKS_FROM_WOOD,
};
use grovecraft_physics::{Collider, MovementInput, PlayerController};
use grovecraft_world::{
    break_block, close_expired_doors, generate_world, place_block, toggle_door, BreakOutcome,
    PlaceOutcome, ToggleOutcome, WorldGrid,
};
use serde::Serialize;

/// Observable things that happened during a tick, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    WorldStarted { blocks: usize },
    BlockBroken { block_type: BlockType },
    BlockPlaced { block_type: BlockType, cell: [i32; 3] },
    DoorOpened { id: u32 },
    DoorClosed { id: u32 },
    DoorsAutoClosed { count: usize },
    Crafted { output: BlockType, count: u32 },
    SlotSelected { block_type: BlockType },
}

impl SessionEvent {
    /// Short label for event-log records.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::WorldStarted { .. } => "WorldStarted",
            SessionEvent::BlockBroken { .. } => "BlockBroken",
            SessionEvent::BlockPlaced { .. } => "BlockPlaced",
            SessionEvent::DoorOpened { .. } => "DoorOpened",
            SessionEvent::DoorClosed { .. } => "DoorClosed",
            SessionEvent::DoorsAutoClosed { .. } => "DoorsAutoClosed",
            SessionEvent::Crafted { .. } => "Crafted",
            SessionEvent::SlotSelected { .. } => "SlotSelected",
        }
    }
}

/// Read-only view of one block for the render/UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct BlockSnapshot {
    pub id: u32,
    pub position: [i32; 3],
    pub block_type: BlockType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
}

/// Read-only view of the player pose.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub grounded: bool,
}

/// Read-only view of the whole session, serialized for the render layer and
/// for headless inspection.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub tick: u64,
    pub elapsed_ms: u64,
    pub blocks: Vec<BlockSnapshot>,
    pub player: PlayerSnapshot,
    pub inventory: Vec<ItemEntry>,
    pub selected: Option<BlockType>,
    pub crafting_open: bool,
}

/// Owns all mutable game state and advances it one frame at a time.
pub struct GameSession {
    world: WorldGrid,
    inventory: Inventory,
    player: PlayerController,
    clock: GameClock,
    crafting_open: bool,
    tick: u64,
}

impl GameSession {
    /// Create a session with a freshly generated world.
    pub fn new() -> Self {
        Self {
            world: generate_world(),
            inventory: Inventory::new(),
            player: PlayerController::new(),
            clock: GameClock::new(),
            crafting_open: false,
            tick: 0,
        }
    }

    /// Regenerate the world and clear all session state (new game).
    pub fn restart(&mut self) {
        self.world = generate_world();
        self.inventory = Inventory::new();
        self.player.reset();
        self.clock = GameClock::new();
        self.crafting_open = false;
        tracing::info!(blocks = self.world.len(), "world restarted");
    }

    /// Number of ticks advanced so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// The block grid.
    pub fn world(&self) -> &WorldGrid {
        &self.world
    }

    /// The session inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// The player controller.
    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    /// Whether the crafting menu is showing.
    pub fn crafting_open(&self) -> bool {
        self.crafting_open
    }

    /// Advance the simulation by one frame: kinematics, the door sweep, then
    /// any discrete actions.
    pub fn tick(&mut self, dt: f32, actions: &ActionState) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        self.tick += 1;
        self.clock.advance(dt);

        if actions.restart {
            self.restart();
            events.push(SessionEvent::WorldStarted {
                blocks: self.world.len(),
            });
        }

        self.step_player(dt, actions);

        let closed = close_expired_doors(&mut self.world, self.clock.now_ms());
        if closed > 0 {
            events.push(SessionEvent::DoorsAutoClosed { count: closed });
        }

        self.apply_discrete_actions(actions, &mut events);
        events
    }

    fn step_player(&mut self, dt: f32, actions: &ActionState) {
        let movement = MovementInput {
            move_x: actions.move_x,
            move_z: actions.move_z,
            jump: actions.jump,
            descend: actions.descend,
            look_delta: actions.look_delta,
        };
        // Open doors stay in the view as passable support; everything else
        // is solid.
        let colliders: Vec<Collider> = self
            .world
            .blocks()
            .map(|block| Collider {
                position: block.position,
                passable: block.kind.passable(),
            })
            .collect();
        self.player.tick(dt, &movement, &colliders);
    }

    fn apply_discrete_actions(&mut self, actions: &ActionState, events: &mut Vec<SessionEvent>) {
        if let Some(slot) = actions.select_slot {
            if let Some(block_type) = self.inventory.select_slot(usize::from(slot) - 1) {
                events.push(SessionEvent::SlotSelected { block_type });
            }
        }

        if actions.toggle_crafting {
            self.crafting_open = !self.crafting_open;
        }

        if actions.break_block {
            if let BreakOutcome::Removed { block_type } =
                break_block(&mut self.world, &mut self.inventory, self.player.pose())
            {
                events.push(SessionEvent::BlockBroken { block_type });
            }
        }

        if actions.place_block {
            let selected = self.inventory.selected();
            if let PlaceOutcome::Placed { cell, .. } =
                place_block(&mut self.world, &mut self.inventory, self.player.pose())
            {
                if let Some(block_type) = selected {
                    events.push(SessionEvent::BlockPlaced {
                        block_type,
                        cell: cell.to_array(),
                    });
                }
            }
        }

        if actions.interact {
            match toggle_door(&mut self.world, self.player.pose(), self.clock.now_ms()) {
                ToggleOutcome::Opened(BlockId(id)) => {
                    events.push(SessionEvent::DoorOpened { id })
                }
                ToggleOutcome::Closed(BlockId(id)) => {
                    events.push(SessionEvent::DoorClosed { id })
                }
                ToggleOutcome::NoTarget => {}
            }
        }

        if actions.craft_planks {
            self.craft(&PLANKS_FROM_WOOD, events);
        }
        if actions.craft_door {
            self.craft(&DOOR_FROM_PLANKS, events);
        }
    }

    fn craft(&mut self, recipe: &Recipe, events: &mut Vec<SessionEvent>) {
        if recipe.craft(&mut self.inventory) {
            events.push(SessionEvent::Crafted {
                output: recipe.output,
                count: recipe.output_count,
            });
        } else {
            tracing::debug!(output = recipe.output.name(), "craft rejected");
        }
    }

    /// Snapshot the observable session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let pose = self.player.pose();
        SessionSnapshot {
            tick: self.tick,
            elapsed_ms: self.clock.now_ms(),
            blocks: self
                .world
                .blocks()
                .map(|block| BlockSnapshot {
                    id: block.id.0,
                    position: block.position.to_array(),
                    block_type: block.kind.block_type(),
                    open: block.kind.door().map(|door| door.is_open()),
                })
                .collect(),
            player: PlayerSnapshot {
                position: pose.position.to_array(),
                yaw: pose.yaw,
                pitch: pose.pitch,
                grounded: self.player.grounded(),
            },
            inventory: self.inventory.entries().to_vec(),
            selected: self.inventory.selected(),
            crafting_open: self.crafting_open,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn idle() -> ActionState {
        ActionState::default()
    }

    fn settle(session: &mut GameSession) {
        for _ in 0..120 {
            session.tick(DT, &idle());
        }
        assert!(session.player().grounded());
    }

    #[test]
    fn fresh_session_has_the_generated_world() {
        let session = GameSession::new();
        assert_eq!(session.world().len(), 1901);
        assert!(session.inventory().is_empty());
        assert!(!session.crafting_open());
    }

    #[test]
    fn player_lands_on_the_grass_plane() {
        let mut session = GameSession::new();
        settle(&mut session);
        assert_eq!(session.player().pose().position.y, 2.3);
    }

    #[test]
    fn restart_resets_everything() {
        let mut session = GameSession::new();
        settle(&mut session);

        // Mutate some state first.
        let mut actions = idle();
        actions.look_delta = (0.0, -0.9);
        session.tick(DT, &actions);
        let mut actions = idle();
        actions.break_block = true;
        let events = session.tick(DT, &actions);
        assert!(matches!(events[0], SessionEvent::BlockBroken { .. }));
        assert_eq!(session.world().len(), 1900);

        let mut actions = idle();
        actions.restart = true;
        let events = session.tick(DT, &actions);
        assert_eq!(events[0], SessionEvent::WorldStarted { blocks: 1901 });
        assert_eq!(session.world().len(), 1901);
        assert!(session.inventory().is_empty());
    }

    #[test]
    fn crafting_menu_toggles() {
        let mut session = GameSession::new();
        let mut actions = idle();
        actions.toggle_crafting = true;

        session.tick(DT, &actions);
        assert!(session.crafting_open());
        session.tick(DT, &actions);
        assert!(!session.crafting_open());
    }

    #[test]
    fn break_look_down_collects_nothing_from_grass() {
        let mut session = GameSession::new();
        settle(&mut session);

        // Pitch steeply down, then break: the grass plane is the target.
        let mut look = idle();
        look.look_delta = (0.0, -0.9);
        session.tick(DT, &look);

        let mut break_action = idle();
        break_action.break_block = true;
        let events = session.tick(DT, &break_action);

        assert_eq!(
            events,
            vec![SessionEvent::BlockBroken {
                block_type: BlockType::Grass
            }]
        );
        assert!(session.inventory().is_empty());
        assert_eq!(session.world().len(), 1900);
    }

    #[test]
    fn craft_requests_flow_through_the_recipes() {
        let mut session = GameSession::new();
        // No wood: rejected silently.
        let mut actions = idle();
        actions.craft_planks = true;
        assert!(session.tick(DT, &actions).is_empty());

        // Snapshot stays consistent either way.
        let snapshot = session.snapshot();
        assert_eq!(snapshot.blocks.len(), session.world().len());
        assert!(snapshot.inventory.is_empty());
    }

    #[test]
    fn snapshot_reflects_door_state() {
        let mut session = GameSession::new();
        let open_doors = |snapshot: &SessionSnapshot| {
            snapshot
                .blocks
                .iter()
                .filter(|b| b.open == Some(true))
                .count()
        };
        assert_eq!(open_doors(&session.snapshot()), 0);
        // Grass and trees carry no door flag at all.
        assert!(session.snapshot().blocks.iter().all(|b| b.block_type
            != BlockType::Door
            || b.open.is_some()));
    }
}
