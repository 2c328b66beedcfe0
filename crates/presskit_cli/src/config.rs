//! Scene file handling
//!
//! A scene file is TOML with three parts:
//! - `[assets]` - image paths and their pixel sizes
//! - `[[button]]` - buttons to place
//! - `[[step]]` - a timed touch script to replay

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use presskit_core::{Point, Size};
use presskit_platform::{TouchEvent, TouchPhase};

/// Root of a scene file
#[derive(Debug, Deserialize, Serialize)]
pub struct SceneConfig {
    /// Asset path -> [width, height]
    #[serde(default)]
    pub assets: BTreeMap<String, [f32; 2]>,
    #[serde(default, rename = "button")]
    pub buttons: Vec<ButtonConfig>,
    #[serde(default, rename = "step")]
    pub steps: Vec<StepConfig>,
}

/// One button in the scene
#[derive(Debug, Deserialize, Serialize)]
pub struct ButtonConfig {
    pub name: String,
    pub idle: String,
    #[serde(default)]
    pub pressed: Option<String>,
    #[serde(default)]
    pub dragout: Option<String>,
    pub position: [f32; 2],
    #[serde(default)]
    pub expand: Option<[f32; 2]>,
    #[serde(default)]
    pub safe: Option<[f32; 2]>,
    /// Long-press hold time in seconds
    #[serde(default)]
    pub long_press: Option<f32>,
    /// Render order, higher is on top
    #[serde(default)]
    pub z: i32,
}

/// One scripted touch event
#[derive(Debug, Deserialize, Serialize)]
pub struct StepConfig {
    /// Seconds from the start of the replay
    pub at: f32,
    pub phase: StepPhase,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

impl SceneConfig {
    /// Load a scene file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse scene file: {}", path.display()))
    }

    /// Parse scene TOML
    pub fn parse(content: &str) -> Result<Self> {
        let scene: SceneConfig = toml::from_str(content)?;
        Ok(scene)
    }

    /// Collect every problem that would make a replay misleading
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut seen = BTreeMap::new();
        for (index, button) in self.buttons.iter().enumerate() {
            if let Some(first) = seen.insert(button.name.as_str(), index) {
                problems.push(format!(
                    "button '{}' defined twice (entries {} and {})",
                    button.name, first, index
                ));
            }

            let images = std::iter::once(&button.idle)
                .chain(button.pressed.iter())
                .chain(button.dragout.iter());
            for asset in images {
                if !self.assets.contains_key(asset) {
                    problems.push(format!(
                        "button '{}' uses unknown asset '{}'",
                        button.name, asset
                    ));
                }
            }

            if let Some(secs) = button.long_press {
                if secs <= 0.0 || Duration::try_from_secs_f32(secs).is_err() {
                    problems.push(format!(
                        "button '{}' has invalid long_press {}",
                        button.name, secs
                    ));
                }
            }
        }

        let mut last = 0.0f32;
        for (index, step) in self.steps.iter().enumerate() {
            if Duration::try_from_secs_f32(step.at).is_err() {
                problems.push(format!("step {} has invalid time {}", index, step.at));
            } else if step.at < last {
                problems.push(format!(
                    "step {} at {}s is earlier than the previous step at {}s",
                    index, step.at, last
                ));
            } else {
                last = step.at;
            }
        }

        problems
    }
}

impl ButtonConfig {
    pub fn position(&self) -> Point {
        Point::new(self.position[0], self.position[1])
    }

    pub fn expand(&self) -> Option<Size> {
        self.expand.map(|[w, h]| Size::new(w, h))
    }

    pub fn safe(&self) -> Option<Size> {
        self.safe.map(|[w, h]| Size::new(w, h))
    }

    /// Long-press hold time, if any
    pub fn long_press(&self) -> Result<Option<Duration>> {
        self.long_press
            .map(|secs| {
                Duration::try_from_secs_f32(secs).map_err(|err| {
                    anyhow!("button '{}': invalid long_press {}: {}", self.name, secs, err)
                })
            })
            .transpose()
    }
}

impl StepConfig {
    pub fn at(&self) -> Result<Duration> {
        Duration::try_from_secs_f32(self.at)
            .map_err(|err| anyhow!("invalid step time {}: {}", self.at, err))
    }

    pub fn touch(&self) -> TouchEvent {
        let phase = match self.phase {
            StepPhase::Began => TouchPhase::Began,
            StepPhase::Moved => TouchPhase::Moved,
            StepPhase::Ended => TouchPhase::Ended,
            StepPhase::Cancelled => TouchPhase::Cancelled,
        };
        TouchEvent::new(self.id, phase, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"
[assets]
"btn/idle.png" = [100.0, 40.0]
"btn/pressed.png" = [100.0, 40.0]

[[button]]
name = "tap"
idle = "btn/idle.png"
pressed = "btn/pressed.png"
position = [200.0, 100.0]
expand = [150.0, 60.0]

[[button]]
name = "hold"
idle = "btn/idle.png"
position = [500.0, 100.0]
long_press = 0.5
z = 2

[[step]]
at = 0.0
phase = "began"
x = 200.0
y = 100.0

[[step]]
at = 0.1
phase = "ended"
x = 200.0
y = 100.0
"#;

    #[test]
    fn test_parse_scene() {
        let scene = SceneConfig::parse(SCENE).unwrap();
        assert_eq!(scene.assets.len(), 2);
        assert_eq!(scene.buttons.len(), 2);
        assert_eq!(scene.buttons[0].expand(), Some(Size::new(150.0, 60.0)));
        assert_eq!(scene.buttons[0].z, 0);
        assert_eq!(
            scene.buttons[1].long_press().unwrap(),
            Some(Duration::from_millis(500))
        );
        assert_eq!(scene.buttons[0].long_press().unwrap(), None);
        assert_eq!(scene.steps[1].phase, StepPhase::Ended);
        assert_eq!(scene.steps[1].touch().phase, TouchPhase::Ended);
        assert!(scene.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_problems() {
        let scene = SceneConfig::parse(
            r#"
[[button]]
name = "a"
idle = "missing.png"
position = [0.0, 0.0]
long_press = -1.0

[[button]]
name = "a"
idle = "missing.png"
position = [0.0, 0.0]

[[step]]
at = 1.0
phase = "began"

[[step]]
at = 0.5
phase = "ended"
"#,
        )
        .unwrap();

        let problems = scene.validate();
        assert_eq!(problems.len(), 5, "{problems:#?}");
        assert!(problems.iter().any(|p| p.contains("defined twice")));
        assert!(problems.iter().any(|p| p.contains("invalid long_press")));
        assert!(problems.iter().any(|p| p.contains("earlier than")));
    }

    #[test]
    fn test_out_of_range_times_reported() {
        let scene = SceneConfig::parse(
            r#"
[assets]
"idle.png" = [10.0, 10.0]

[[button]]
name = "slow"
idle = "idle.png"
position = [0.0, 0.0]
long_press = 1e30

[[step]]
at = 1e30
phase = "began"
"#,
        )
        .unwrap();

        let problems = scene.validate();
        assert_eq!(problems.len(), 2, "{problems:#?}");
        assert!(problems[0].contains("invalid long_press"));
        assert!(problems[1].contains("invalid time"));
        assert!(scene.buttons[0].long_press().is_err());
        assert!(scene.steps[0].at().is_err());
    }

    #[test]
    fn test_unknown_phase_rejected() {
        let result = SceneConfig::parse(
            r#"
[[step]]
at = 0.0
phase = "hover"
"#,
        );
        assert!(result.is_err());
    }
}
