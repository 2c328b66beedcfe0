//! Display-state registry
//!
//! Maps each [`ButtonState`] to a visual handle and keeps exactly one
//! distinct visual visible. Pressed and dragged-out default to the idle
//! visual until they are set explicitly, so several states may share one
//! handle. A visual is only detached from the scene once no state refers to
//! it anymore.

use presskit_core::{SceneHost, Size, VisualId};

/// Interaction/display state of a button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonState {
    #[default]
    Idle,
    Pressed,
    DraggedOut,
}

impl ButtonState {
    pub const ALL: [ButtonState; 3] = [
        ButtonState::Idle,
        ButtonState::Pressed,
        ButtonState::DraggedOut,
    ];

    fn index(self) -> usize {
        match self {
            ButtonState::Idle => 0,
            ButtonState::Pressed => 1,
            ButtonState::DraggedOut => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    visual: Option<VisualId>,
    /// Set explicitly rather than seeded from idle
    explicit: bool,
}

/// Per-state visuals of one button
#[derive(Clone, Debug, Default)]
pub struct DisplayStates {
    slots: [Slot; 3],
    current: ButtonState,
}

impl DisplayStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently displayed state
    pub fn current(&self) -> ButtonState {
        self.current
    }

    /// Visual installed for a state
    pub fn visual(&self, state: ButtonState) -> Option<VisualId> {
        self.slots[state.index()].visual
    }

    /// Install a visual for a state
    ///
    /// Setting the idle visual also seeds every state that has no visual of
    /// its own. The replaced visual is detached unless another state still
    /// shows it.
    pub fn set_visual(&mut self, state: ButtonState, visual: VisualId, scene: &mut dyn SceneHost) {
        let mut replaced: Vec<VisualId> = Vec::with_capacity(3);

        let slot = &mut self.slots[state.index()];
        if let Some(old) = slot.visual.replace(visual) {
            replaced.push(old);
        }
        slot.explicit = true;

        if state == ButtonState::Idle {
            for seeded in [ButtonState::Pressed, ButtonState::DraggedOut] {
                let slot = &mut self.slots[seeded.index()];
                if !slot.explicit {
                    if let Some(old) = slot.visual.replace(visual) {
                        replaced.push(old);
                    }
                }
            }
        }

        scene.attach(visual);

        replaced.sort();
        replaced.dedup();
        for old in replaced {
            if old != visual && !self.is_referenced(old) {
                tracing::debug!(?old, ?state, "detaching replaced visual");
                scene.detach(old);
            }
        }

        self.sync_visibility(scene);
    }

    /// Show the visual of `state` and hide every other visual
    pub fn switch_to(&mut self, state: ButtonState, scene: &mut dyn SceneHost) {
        self.current = state;
        self.sync_visibility(scene);
    }

    /// Size of the idle visual, zero if there is none
    pub fn content_size(&self, scene: &dyn SceneHost) -> Size {
        self.visual(ButtonState::Idle)
            .and_then(|v| scene.size_of(v))
            .unwrap_or(Size::ZERO)
    }

    /// Detach every visual and forget all slots
    pub fn detach_all(&mut self, scene: &mut dyn SceneHost) {
        let mut visuals: Vec<VisualId> = self.slots.iter().filter_map(|s| s.visual).collect();
        visuals.sort();
        visuals.dedup();
        for visual in visuals {
            scene.detach(visual);
        }
        self.slots = Default::default();
        self.current = ButtonState::Idle;
    }

    fn is_referenced(&self, visual: VisualId) -> bool {
        self.slots.iter().any(|s| s.visual == Some(visual))
    }

    fn sync_visibility(&self, scene: &mut dyn SceneHost) {
        let target = self.visual(self.current);
        for visual in self.slots.iter().filter_map(|s| s.visual) {
            scene.set_visible(visual, Some(visual) == target);
        }
    }
}
