//! Headless replay of a scene's touch script

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Result};
use presskit_core::{Size, SpriteArena};
use presskit_platform::TouchEvent;
use presskit_widgets::prelude::*;
use tracing::{debug, info};

use crate::config::SceneConfig;

/// A press observed during replay
#[derive(Debug, Clone, PartialEq)]
pub struct Emitted {
    /// Script time the press was published at
    pub at: Duration,
    /// Button name from the scene file
    pub button: String,
    /// Bus event name
    pub event: &'static str,
}

/// Scene wired up and ready to receive events
pub struct Replay {
    ctx: WidgetContext,
    stage: Stage,
    log: Arc<Mutex<Vec<PressNotification>>>,
    now: Duration,
    tick: Duration,
}

impl Replay {
    /// Build the scene described by `config`
    ///
    /// Fails if the scene does not pass [`SceneConfig::validate`].
    pub fn new(config: &SceneConfig, tick: Duration) -> Result<Self> {
        if tick.is_zero() {
            bail!("Frame tick must be greater than zero");
        }
        let problems = config.validate();
        if let Some(first) = problems.first() {
            bail!("Invalid scene ({} problem(s)): {}", problems.len(), first);
        }

        let mut arena = SpriteArena::new();
        for (path, [w, h]) in &config.assets {
            arena.register_asset(path.clone(), Size::new(*w, *h));
        }
        let mut ctx = WidgetContext::new(arena);

        let log = Arc::new(Mutex::new(Vec::new()));
        for event in [PRESSED_EVENT, LONG_PRESSED_EVENT] {
            let log = log.clone();
            ctx.subscribe(event, move |e: &PressNotification| {
                if let Ok(mut log) = log.lock() {
                    log.push(*e);
                }
            });
        }

        let mut stage = Stage::new();
        for entry in &config.buttons {
            let mut builder = button()
                .name(entry.name.clone())
                .idle(entry.idle.clone())
                .position(entry.position());
            if let Some(asset) = &entry.pressed {
                builder = builder.pressed(asset.clone());
            }
            if let Some(asset) = &entry.dragout {
                builder = builder.dragout(asset.clone());
            }
            if let Some(size) = entry.expand() {
                builder = builder.expand_zone(size);
            }
            if let Some(size) = entry.safe() {
                builder = builder.safe_zone(size);
            }
            if let Some(duration) = entry.long_press()? {
                builder = builder.long_press(duration);
            }

            let built = builder.build(&mut ctx);
            debug!(
                name = %entry.name,
                content = ?built.content_size(&ctx),
                expand = ?built.expand_zone(&ctx),
                safe = ?built.safe_zone(&ctx),
                "button placed"
            );
            stage.insert(built, entry.z);
        }

        Ok(Self {
            ctx,
            stage,
            log,
            now: Duration::ZERO,
            tick,
        })
    }

    /// Current script time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// The routed buttons
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Step frames until `at`, landing on it exactly
    pub fn advance_to(&mut self, at: Duration) -> Vec<Emitted> {
        while self.now < at {
            let dt = self.tick.min(at - self.now);
            self.stage.update(&mut self.ctx, dt);
            self.now += dt;
        }
        self.drain()
    }

    /// Deliver one touch at the current time
    pub fn touch(&mut self, touch: &TouchEvent) -> Vec<Emitted> {
        let claimed = self.stage.dispatch(&mut self.ctx, touch);
        debug!(
            at = ?self.now,
            touch = touch.id,
            phase = ?touch.phase,
            button = claimed.and_then(|id| self.ctx.widget_name(id)),
            "touch"
        );
        self.drain()
    }

    /// Run a whole script
    pub fn run(&mut self, config: &SceneConfig) -> Result<Vec<Emitted>> {
        let mut emitted = Vec::new();
        for step in &config.steps {
            emitted.extend(self.advance_to(step.at()?));
            emitted.extend(self.touch(&step.touch()));
        }
        Ok(emitted)
    }

    fn drain(&mut self) -> Vec<Emitted> {
        let pending = match self.log.lock() {
            Ok(mut log) => std::mem::take(&mut *log),
            Err(_) => return Vec::new(),
        };

        pending
            .into_iter()
            .map(|n| {
                let emitted = Emitted {
                    at: self.now,
                    button: self
                        .ctx
                        .widget_name(n.sender)
                        .unwrap_or("<unnamed>")
                        .to_string(),
                    event: n.kind.event_name(),
                };
                info!(
                    at = emitted.at.as_secs_f32(),
                    button = %emitted.button,
                    event = emitted.event,
                    "press"
                );
                emitted
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(scene: &str) -> Vec<Emitted> {
        let config = SceneConfig::parse(scene).unwrap();
        assert!(config.validate().is_empty(), "{:?}", config.validate());
        Replay::new(&config, Duration::from_millis(16))
            .unwrap()
            .run(&config)
            .unwrap()
    }

    const BUTTONS: &str = r#"
[assets]
"idle.png" = [100.0, 40.0]

[[button]]
name = "tap"
idle = "idle.png"
position = [100.0, 100.0]
safe = [200.0, 80.0]

[[button]]
name = "hold"
idle = "idle.png"
position = [400.0, 100.0]
long_press = 0.5
"#;

    #[test]
    fn test_tap_emits_press() {
        let scene = format!(
            "{BUTTONS}
[[step]]
at = 0.0
phase = \"began\"
x = 100.0
y = 100.0

[[step]]
at = 0.1
phase = \"ended\"
x = 100.0
y = 100.0
"
        );
        let emitted = replay(&scene);
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].button, "tap");
        assert_eq!(emitted[0].event, PRESSED_EVENT);
    }

    #[test]
    fn test_hold_classified_by_duration() {
        let scene = format!(
            "{BUTTONS}
[[step]]
at = 0.0
phase = \"began\"
id = 1
x = 400.0
y = 100.0

[[step]]
at = 0.2
phase = \"ended\"
id = 1
x = 400.0
y = 100.0

[[step]]
at = 1.0
phase = \"began\"
id = 2
x = 400.0
y = 100.0

[[step]]
at = 1.8
phase = \"ended\"
id = 2
x = 400.0
y = 100.0
"
        );
        let events: Vec<_> = replay(&scene).into_iter().map(|e| e.event).collect();
        assert_eq!(events, vec![PRESSED_EVENT, LONG_PRESSED_EVENT]);
    }

    #[test]
    fn test_drag_past_safe_zone_abandons() {
        let scene = format!(
            "{BUTTONS}
[[step]]
at = 0.0
phase = \"began\"
x = 100.0
y = 100.0

[[step]]
at = 0.1
phase = \"moved\"
x = 250.0
y = 100.0

[[step]]
at = 0.2
phase = \"moved\"
x = 100.0
y = 100.0

[[step]]
at = 0.3
phase = \"ended\"
x = 100.0
y = 100.0
"
        );
        assert!(replay(&scene).is_empty());
    }

    #[test]
    fn test_advance_lands_on_step_time() {
        let config = SceneConfig::parse(BUTTONS).unwrap();
        let mut replay = Replay::new(&config, Duration::from_millis(16)).unwrap();
        replay.advance_to(Duration::from_millis(250));
        assert_eq!(replay.now(), Duration::from_millis(250));
        assert_eq!(replay.stage().len(), 2);
    }

    #[test]
    fn test_invalid_scene_rejected() {
        let scene = BUTTONS.replace("long_press = 0.5", "long_press = 1e30");
        let config = SceneConfig::parse(&scene).unwrap();
        let err = Replay::new(&config, Duration::from_millis(16))
            .err()
            .unwrap();
        assert!(err.to_string().contains("invalid long_press"), "{err}");
    }

    #[test]
    fn test_zero_tick_rejected() {
        let config = SceneConfig::parse(BUTTONS).unwrap();
        assert!(Replay::new(&config, Duration::ZERO).is_err());
    }

    #[test]
    fn test_demo_scene() {
        let emitted = replay(include_str!("../../../demos/two_buttons.toml"));
        let summary: Vec<_> = emitted
            .iter()
            .map(|e| (e.button.as_str(), e.event))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("plain", PRESSED_EVENT),
                ("plain", PRESSED_EVENT),
                ("hold", LONG_PRESSED_EVENT),
                ("hold", PRESSED_EVENT),
            ]
        );
    }
}
