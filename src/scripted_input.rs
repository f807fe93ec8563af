use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

/// One timed slice of scripted input. `keys` are held for the whole step;
/// `tap` keys and `craft` fire once when the step begins. Look values are
/// raw per-tick deltas, scaled by the configured sensitivity like real
/// mouse input.
#[derive(Debug, Clone, Deserialize, Default)]
struct ScriptedStep {
    duration: f32,
    #[serde(default)]
    keys: Vec<String>,
    #[serde(default)]
    tap: Vec<String>,
    #[serde(default)]
    look_x: f32,
    #[serde(default)]
    look_y: f32,
    #[serde(default)]
    craft: Option<String>,
}

/// What the script asks for on a single tick.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrame {
    pub held: Vec<String>,
    pub tapped: Vec<String>,
    pub look: (f32, f32),
    pub craft_planks: bool,
    pub craft_door: bool,
}

pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    entered_step: bool,
    finished: bool,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let file: ScriptedInputFile = serde_json::from_str(&contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
            entered_step: false,
            finished: false,
        })
    }

    /// True once every step's duration has elapsed.
    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn advance(&mut self, dt: f32) -> ScriptedFrame {
        if self.finished {
            return ScriptedFrame::default();
        }

        let entering = !self.entered_step;
        self.entered_step = true;

        let step = self.steps[self.index].clone();
        let mut frame = ScriptedFrame {
            held: step.keys.clone(),
            look: (step.look_x, step.look_y),
            ..Default::default()
        };
        if entering {
            frame.tapped = step.tap.clone();
            match step.craft.as_deref() {
                Some("planks") => frame.craft_planks = true,
                Some("door") => frame.craft_door = true,
                Some(other) => tracing::warn!("unknown craft target '{other}' in script"),
                None => {}
            }
        }

        self.time_in_step += dt;
        while self.time_in_step >= self.steps[self.index].duration {
            self.time_in_step -= self.steps[self.index].duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
                self.entered_step = false;
            } else {
                self.finished = true;
                break;
            }
        }

        frame
    }
}
