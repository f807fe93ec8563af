use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/gameplay.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Radians of view rotation per unit of look input.
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
    pub bindings: BindingOverrides,
}

/// Per-action key lists that replace the defaults, keyed by action name
/// (e.g. `move_forward = ["KeyW", "ArrowUp"]`).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct BindingOverrides(pub HashMap<String, Vec<String>>);

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            // 0.002 rad per count keeps a full mouse sweep near a half turn.
            mouse_sensitivity: 0.002,
            invert_y: false,
            bindings: BindingOverrides::default(),
        }
    }
}

impl GameplayConfig {
    /// Load gameplay configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on
    /// errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<GameplayConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    GameplayConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                GameplayConfig::default()
            }
        }
    }
}
