//! Widget Context - owns the collaborators widgets talk to
//!
//! The WidgetContext provides:
//! - Widget registration (stable [`WidgetId`]s)
//! - The scene host that owns every visual
//! - The press event bus
//! - Frame timers for long-press countdowns
//!
//! Widgets are held by the caller and borrow the context for each call, so
//! the whole pipeline can be driven from a test without any host runtime.

use std::time::Duration;

use presskit_core::{EventBus, SceneHost, SpriteArena, SubscriptionId, TimerQueue};
use slotmap::SlotMap;

use crate::emit::PressNotification;
use crate::widget::WidgetId;

/// Per-widget data stored in the context
#[derive(Debug)]
struct WidgetData {
    /// Debug label
    name: Option<String>,
}

/// The main widget context
pub struct WidgetContext {
    /// Host scene graph
    pub(crate) scene: Box<dyn SceneHost>,
    /// Press event bus
    pub events: EventBus<PressNotification>,
    /// Frame timers keyed by owning widget
    pub timers: TimerQueue<WidgetId>,
    widgets: SlotMap<WidgetId, WidgetData>,
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self::new(SpriteArena::new())
    }
}

impl WidgetContext {
    /// Create a context over a scene host
    pub fn new(scene: impl SceneHost + 'static) -> Self {
        Self {
            scene: Box::new(scene),
            events: EventBus::new(),
            timers: TimerQueue::new(),
            widgets: SlotMap::with_key(),
        }
    }

    // =========================================================================
    // Widget Registration
    // =========================================================================

    /// Register a new widget and get its ID
    pub fn register_widget(&mut self) -> WidgetId {
        self.widgets.insert(WidgetData { name: None })
    }

    /// Register a widget with a debug label
    pub fn register_named(&mut self, name: impl Into<String>) -> WidgetId {
        self.widgets.insert(WidgetData {
            name: Some(name.into()),
        })
    }

    /// Unregister a widget and cancel every timer it owns
    pub fn unregister_widget(&mut self, id: WidgetId) {
        if self.widgets.remove(id).is_some() {
            let cancelled = self.timers.cancel_owner(id);
            tracing::debug!(?id, cancelled, "widget unregistered");
        }
    }

    /// Check if a widget is registered
    pub fn is_registered(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    /// Debug label of a widget
    pub fn widget_name(&self, id: WidgetId) -> Option<&str> {
        self.widgets.get(id).and_then(|d| d.name.as_deref())
    }

    /// Number of registered widgets
    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// The scene host
    pub fn scene(&self) -> &dyn SceneHost {
        self.scene.as_ref()
    }

    /// Mutable access to the scene host
    pub fn scene_mut(&mut self) -> &mut dyn SceneHost {
        self.scene.as_mut()
    }

    /// Subscribe to press notifications published under `name`
    pub fn subscribe<F>(&mut self, name: &'static str, callback: F) -> SubscriptionId
    where
        F: FnMut(&PressNotification) + Send + 'static,
    {
        self.events.subscribe(name, callback)
    }

    /// Advance frame time; returns how many timers elapsed
    ///
    /// Elapsed timers are delivered when each widget runs its `update`.
    pub fn advance(&mut self, dt: Duration) -> usize {
        self.timers.advance(dt)
    }
}
