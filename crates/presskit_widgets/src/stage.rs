//! Single-touch routing across buttons
//!
//! A [`Stage`] owns a set of buttons with a render order and routes platform
//! touch events to them. A new touch is offered to buttons from the top of
//! the render order down, and the first button that accepts it claims it.
//! Every later event for that touch goes to the claimant only. A button
//! holds at most one touch at a time.

use std::time::Duration;

use presskit_platform::{Event, TouchEvent, TouchPhase};
use rustc_hash::FxHashMap;

use crate::button::Button;
use crate::context::WidgetContext;
use crate::widget::WidgetId;

struct Entry {
    button: Button,
    z: i32,
}

/// Owns buttons and routes touches to them
#[derive(Default)]
pub struct Stage {
    /// Sorted by descending z; insertion order breaks ties (later on top)
    entries: Vec<Entry>,
    /// Touch id -> claiming button
    claims: FxHashMap<u64, WidgetId>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a button at render order `z` (higher is on top)
    pub fn insert(&mut self, button: Button, z: i32) -> WidgetId {
        let id = button.id();
        let at = self
            .entries
            .iter()
            .position(|e| e.z <= z)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, Entry { button, z });
        id
    }

    /// Remove a button, dropping any touch it held
    ///
    /// The button is handed back still registered; call
    /// [`Button::destroy`] to release it.
    #[must_use]
    pub fn remove(&mut self, ctx: &mut WidgetContext, id: WidgetId) -> Option<Button> {
        let index = self.entries.iter().position(|e| e.button.id() == id)?;
        let mut entry = self.entries.remove(index);

        if let Some(touch) = self.claim_of(id) {
            self.claims.remove(&touch);
            entry.button.touch_cancelled(ctx);
        }
        Some(entry.button)
    }

    /// Borrow a button
    pub fn get(&self, id: WidgetId) -> Option<&Button> {
        self.entries
            .iter()
            .find(|e| e.button.id() == id)
            .map(|e| &e.button)
    }

    /// Mutably borrow a button
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Button> {
        self.entries
            .iter_mut()
            .find(|e| e.button.id() == id)
            .map(|e| &mut e.button)
    }

    /// Buttons from top to bottom
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.entries.iter().map(|e| &e.button)
    }

    /// Number of buttons
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the stage has no buttons
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Button currently holding a touch
    pub fn claimant(&self, touch: u64) -> Option<WidgetId> {
        self.claims.get(&touch).copied()
    }

    /// Route a platform event; returns the button that consumed it
    pub fn handle_event(&mut self, ctx: &mut WidgetContext, event: &Event) -> Option<WidgetId> {
        match event {
            Event::Touch(touch) => self.dispatch(ctx, touch),
            Event::Frame { dt } => {
                self.update(ctx, *dt);
                None
            }
        }
    }

    /// Route a touch event; returns the button that consumed it
    pub fn dispatch(&mut self, ctx: &mut WidgetContext, touch: &TouchEvent) -> Option<WidgetId> {
        if touch.phase == TouchPhase::Began {
            return self.offer(ctx, touch);
        }

        let Some(owner) = self.claimant(touch.id) else {
            tracing::trace!(touch = touch.id, phase = ?touch.phase, "unclaimed touch ignored");
            return None;
        };
        if touch.phase.is_terminal() {
            self.claims.remove(&touch.id);
        }

        let button = self.get_mut(owner)?;
        button.handle_touch(ctx, touch);
        Some(owner)
    }

    /// Advance frame time and deliver elapsed timers to every button
    pub fn update(&mut self, ctx: &mut WidgetContext, dt: Duration) {
        ctx.advance(dt);
        for entry in &mut self.entries {
            entry.button.update(ctx);
        }
    }

    fn offer(&mut self, ctx: &mut WidgetContext, touch: &TouchEvent) -> Option<WidgetId> {
        if let Some(previous) = self.claims.remove(&touch.id) {
            // Platform reused an id without ending it; drop the stale session
            if let Some(button) = self.get_mut(previous) {
                button.touch_cancelled(ctx);
            }
        }

        for index in 0..self.entries.len() {
            let id = self.entries[index].button.id();
            if self.claim_of(id).is_some() {
                continue;
            }
            if self.entries[index].button.handle_touch(ctx, touch) {
                tracing::debug!(touch = touch.id, button = ?id, "touch claimed");
                self.claims.insert(touch.id, id);
                return Some(id);
            }
        }
        None
    }

    fn claim_of(&self, id: WidgetId) -> Option<u64> {
        self.claims
            .iter()
            .find(|(_, owner)| **owner == id)
            .map(|(touch, _)| *touch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::button;
    use crate::emit::{PressNotification, PRESSED_EVENT};
    use presskit_core::{Point, Size, SpriteArena};
    use std::sync::{Arc, Mutex};

    fn ctx() -> WidgetContext {
        WidgetContext::new(SpriteArena::new().with_asset("idle.png", Size::new(100.0, 40.0)))
    }

    fn make(ctx: &mut WidgetContext, at: Point) -> Button {
        button().idle("idle.png").position(at).build(ctx)
    }

    fn record(ctx: &mut WidgetContext) -> Arc<Mutex<Vec<WidgetId>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let l = log.clone();
        ctx.subscribe(PRESSED_EVENT, move |e: &PressNotification| {
            l.lock().unwrap().push(e.sender)
        });
        log
    }

    #[test]
    fn test_topmost_button_claims() {
        let mut ctx = ctx();
        let log = record(&mut ctx);
        let mut stage = Stage::new();
        let below = stage.insert(make(&mut ctx, Point::new(100.0, 100.0)), 0);
        let above = stage.insert(make(&mut ctx, Point::new(120.0, 100.0)), 1);

        assert_eq!(stage.dispatch(&mut ctx, &TouchEvent::began(1, 110.0, 100.0)), Some(above));
        assert!(stage.get(above).unwrap().is_pressed());
        assert!(!stage.get(below).unwrap().is_pressed());

        stage.dispatch(&mut ctx, &TouchEvent::ended(1, 110.0, 100.0));
        assert_eq!(*log.lock().unwrap(), vec![above]);
        assert_eq!(stage.claimant(1), None);
    }

    #[test]
    fn test_unclaimed_touch_is_dropped() {
        let mut ctx = ctx();
        let mut stage = Stage::new();
        stage.insert(make(&mut ctx, Point::new(100.0, 100.0)), 0);

        assert_eq!(stage.dispatch(&mut ctx, &TouchEvent::began(1, 500.0, 500.0)), None);
        assert_eq!(stage.dispatch(&mut ctx, &TouchEvent::moved(1, 100.0, 100.0)), None);
        assert_eq!(stage.dispatch(&mut ctx, &TouchEvent::ended(1, 100.0, 100.0)), None);
    }

    #[test]
    fn test_one_touch_per_button() {
        let mut ctx = ctx();
        let mut stage = Stage::new();
        let only = stage.insert(make(&mut ctx, Point::new(100.0, 100.0)), 0);

        assert_eq!(stage.dispatch(&mut ctx, &TouchEvent::began(1, 100.0, 100.0)), Some(only));
        assert_eq!(stage.dispatch(&mut ctx, &TouchEvent::began(2, 100.0, 100.0)), None);

        // The second finger lifting does not complete the first press
        assert_eq!(stage.dispatch(&mut ctx, &TouchEvent::ended(2, 100.0, 100.0)), None);
        assert!(stage.get(only).unwrap().is_pressed());
    }

    #[test]
    fn test_same_z_later_insert_on_top() {
        let mut ctx = ctx();
        let mut stage = Stage::new();
        let first = stage.insert(make(&mut ctx, Point::new(100.0, 100.0)), 0);
        let second = stage.insert(make(&mut ctx, Point::new(100.0, 100.0)), 0);

        let order: Vec<_> = stage.buttons().map(|b| b.id()).collect();
        assert_eq!(order, vec![second, first]);
    }

    #[test]
    fn test_frame_event_drives_long_press() {
        let mut ctx = ctx();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        ctx.subscribe(crate::emit::LONG_PRESSED_EVENT, move |e: &PressNotification| {
            s.lock().unwrap().push(e.kind)
        });

        let mut stage = Stage::new();
        let held = button()
            .idle("idle.png")
            .position(Point::new(100.0, 100.0))
            .long_press(Duration::from_millis(300))
            .build(&mut ctx);
        stage.insert(held, 0);

        stage.handle_event(&mut ctx, &TouchEvent::began(4, 100.0, 100.0).into());
        for _ in 0..20 {
            stage.handle_event(
                &mut ctx,
                &Event::Frame {
                    dt: Duration::from_millis(16),
                },
            );
        }
        stage.handle_event(&mut ctx, &TouchEvent::ended(4, 100.0, 100.0).into());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_drops_claim() {
        let mut ctx = ctx();
        let mut stage = Stage::new();
        let id = stage.insert(make(&mut ctx, Point::new(100.0, 100.0)), 0);
        stage.dispatch(&mut ctx, &TouchEvent::began(9, 100.0, 100.0));

        let removed = stage.remove(&mut ctx, id).unwrap();
        assert!(!removed.is_pressed());
        assert_eq!(stage.claimant(9), None);
        assert!(stage.is_empty());
    }

    #[test]
    fn test_removed_button_destroy_frees_timers() {
        let mut ctx = ctx();
        let mut stage = Stage::new();
        let held = button()
            .idle("idle.png")
            .position(Point::new(100.0, 100.0))
            .long_press(Duration::from_millis(300))
            .build(&mut ctx);
        let id = stage.insert(held, 0);
        // Pressed directly, so the stage holds no claim to cancel
        assert!(stage
            .get_mut(id)
            .unwrap()
            .touch_began(&mut ctx, Point::new(100.0, 100.0)));
        ctx.advance(Duration::from_millis(400));

        let removed = stage.remove(&mut ctx, id).unwrap();
        assert!(ctx.is_registered(id));
        assert_eq!(ctx.timers.len(), 1);
        removed.destroy(&mut ctx);

        assert!(!ctx.is_registered(id));
        assert!(ctx.timers.is_empty());
        assert_eq!(ctx.widget_count(), 0);
    }
}
