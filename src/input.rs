use crate::config::{BindingOverrides, GameplayConfig};
use std::collections::HashMap;
use tracing::warn;

/// Everything the simulation can be asked to do through the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    Descend,
    Break,
    Place,
    Interact,
    ToggleCrafting,
    SelectSlot(u8),
    Restart,
}

const SLOT_COUNT: u8 = 5;

fn all_actions() -> Vec<Action> {
    let mut actions = vec![
        Action::MoveForward,
        Action::MoveBackward,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Descend,
        Action::Break,
        Action::Place,
        Action::Interact,
        Action::ToggleCrafting,
        Action::Restart,
    ];
    for slot in 1..=SLOT_COUNT {
        actions.push(Action::SelectSlot(slot));
    }
    actions
}

fn action_name(action: Action) -> String {
    match action {
        Action::MoveForward => "move_forward".into(),
        Action::MoveBackward => "move_backward".into(),
        Action::MoveLeft => "move_left".into(),
        Action::MoveRight => "move_right".into(),
        Action::Jump => "jump".into(),
        Action::Descend => "descend".into(),
        Action::Break => "break".into(),
        Action::Place => "place".into(),
        Action::Interact => "interact".into(),
        Action::ToggleCrafting => "toggle_crafting".into(),
        Action::SelectSlot(slot) => format!("slot_{slot}"),
        Action::Restart => "restart".into(),
    }
}

fn default_bindings(action: Action) -> Vec<&'static str> {
    match action {
        Action::MoveForward => vec!["KeyW"],
        Action::MoveBackward => vec!["KeyS"],
        Action::MoveLeft => vec!["KeyA"],
        Action::MoveRight => vec!["KeyD"],
        Action::Jump => vec!["Space"],
        Action::Descend => vec!["ShiftLeft"],
        Action::Break => vec!["MouseLeft"],
        Action::Place => vec!["KeyE"],
        Action::Interact => vec!["KeyF"],
        Action::ToggleCrafting => vec!["KeyC"],
        Action::SelectSlot(1) => vec!["Digit1"],
        Action::SelectSlot(2) => vec!["Digit2"],
        Action::SelectSlot(3) => vec!["Digit3"],
        Action::SelectSlot(4) => vec!["Digit4"],
        Action::SelectSlot(5) => vec!["Digit5"],
        Action::SelectSlot(_) => vec![],
        Action::Restart => vec!["KeyR"],
    }
}

/// Key-name to action table. Key names are portable strings ("KeyW",
/// "Space", "MouseLeft"); the excluded frontend maps its windowing backend
/// onto these, and scripted sessions use them directly.
#[derive(Debug, Clone)]
pub struct Bindings {
    map: HashMap<Action, Vec<String>>,
}

impl Bindings {
    pub fn from_config(config: &GameplayConfig) -> Self {
        let mut map = HashMap::new();
        for action in all_actions() {
            let keys = default_bindings(action)
                .into_iter()
                .map(str::to_owned)
                .collect();
            map.insert(action, keys);
        }

        apply_overrides(&mut map, &config.bindings);
        Self { map }
    }

    fn is_bound(&self, action: Action, key: &str) -> bool {
        self.map
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|bound| bound == key))
    }

    fn any_bound(&self, action: Action, keys: &[String]) -> bool {
        keys.iter().any(|key| self.is_bound(action, key))
    }
}

fn apply_overrides(map: &mut HashMap<Action, Vec<String>>, overrides: &BindingOverrides) {
    for (name, keys) in &overrides.0 {
        let Some(action) = all_actions()
            .into_iter()
            .find(|&action| action_name(action) == *name)
        else {
            warn!("Unknown action '{name}' in binding overrides");
            continue;
        };
        map.insert(action, keys.clone());
    }
}

/// Flattened per-frame input handed to the session: held movement intent
/// plus edge-triggered discrete actions.
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    pub move_x: f32,
    pub move_z: f32,
    pub jump: bool,
    pub descend: bool,
    pub look_delta: (f32, f32),
    pub break_block: bool,
    pub place_block: bool,
    pub interact: bool,
    pub toggle_crafting: bool,
    pub select_slot: Option<u8>,
    pub craft_planks: bool,
    pub craft_door: bool,
    pub restart: bool,
}

/// Folds raw key events into an `ActionState` using the binding table and
/// the configured look sensitivity.
#[derive(Debug, Clone)]
pub struct InputCollector {
    bindings: Bindings,
    sensitivity: f32,
    invert_y: bool,
}

impl InputCollector {
    pub fn new(config: &GameplayConfig) -> Self {
        Self {
            bindings: Bindings::from_config(config),
            sensitivity: config.mouse_sensitivity,
            invert_y: config.invert_y,
        }
    }

    /// Build the frame's action state. `held` keys contribute continuous
    /// intent, `tapped` keys contribute one-shot actions, and `look` is the
    /// raw mouse-style delta in counts.
    pub fn collect(&self, held: &[String], tapped: &[String], look: (f32, f32)) -> ActionState {
        let bindings = &self.bindings;
        let mut state = ActionState {
            move_z: axis(
                bindings.any_bound(Action::MoveForward, held),
                bindings.any_bound(Action::MoveBackward, held),
            ),
            move_x: axis(
                bindings.any_bound(Action::MoveRight, held),
                bindings.any_bound(Action::MoveLeft, held),
            ),
            descend: bindings.any_bound(Action::Descend, held),
            jump: bindings.any_bound(Action::Jump, tapped),
            break_block: bindings.any_bound(Action::Break, tapped),
            place_block: bindings.any_bound(Action::Place, tapped),
            interact: bindings.any_bound(Action::Interact, tapped),
            toggle_crafting: bindings.any_bound(Action::ToggleCrafting, tapped),
            restart: bindings.any_bound(Action::Restart, tapped),
            ..Default::default()
        };

        for slot in 1..=SLOT_COUNT {
            if bindings.any_bound(Action::SelectSlot(slot), tapped) {
                state.select_slot = Some(slot);
                break;
            }
        }

        let pitch_sign = if self.invert_y { 1.0 } else { -1.0 };
        state.look_delta = (
            look.0 * self.sensitivity,
            look.1 * self.sensitivity * pitch_sign,
        );

        state
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}
