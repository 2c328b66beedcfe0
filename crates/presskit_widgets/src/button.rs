//! Touch button widget
//!
//! The Button widget provides:
//! - Three display states: idle, pressed, dragged-out
//! - Hit testing against base, expand and safe zones
//! - A press notification when a touch is released while pressed
//! - Pluggable press classification (plain or long-press)
//!
//! # State machine
//!
//! | state | event | point | next |
//! |---|---|---|---|
//! | any | began | base ∪ expand | `Pressed` (touch accepted) |
//! | any | began | elsewhere | unchanged (touch rejected) |
//! | pressed/dragged-out | moved | base ∪ expand | `Pressed` |
//! | pressed/dragged-out | moved | safe only | `DraggedOut` |
//! | pressed/dragged-out | moved | outside safe | `Idle` (abandoned) |
//! | `Pressed` | ended | any | `Idle`, press emitted |
//! | dragged-out/idle | ended | any | `Idle` |
//! | any | cancelled | - | `Idle` |
//!
//! # Example
//!
//! ```rust
//! use presskit_core::{Point, Size, SpriteArena};
//! use presskit_widgets::prelude::*;
//!
//! let arena = SpriteArena::new().with_asset("btn/idle.png", Size::new(100.0, 40.0));
//! let mut ctx = WidgetContext::new(arena);
//!
//! let mut ok = button()
//!     .idle("btn/idle.png")
//!     .position(Point::new(200.0, 100.0))
//!     .expand_zone(Size::new(150.0, 60.0))
//!     .build(&mut ctx);
//!
//! assert!(ok.touch_began(&mut ctx, Point::new(200.0, 100.0)));
//! assert!(ok.is_pressed());
//! ok.touch_ended(&mut ctx, Point::new(200.0, 100.0));
//! assert!(!ok.is_pressed());
//! ```

use std::time::Duration;

use presskit_core::{Point, Size, VisualId};
use presskit_platform::{TouchEvent, TouchPhase};

use crate::context::WidgetContext;
use crate::display::{ButtonState, DisplayStates};
use crate::emit::{emit, PressHandler, PressNotification};
use crate::press::{LongPress, PressKind, PressStrategy, PressTimers, ShortPress};
use crate::widget::WidgetId;
use crate::zone::Zones;

/// Touch button widget
///
/// A button does not release anything on drop: its visuals, timers and
/// registration live in the [`WidgetContext`]. Retire it with
/// [`Button::destroy`].
pub struct Button {
    /// Widget ID
    id: WidgetId,
    /// Center of the button in parent space
    position: Point,
    zones: Zones,
    display: DisplayStates,
    strategy: Box<dyn PressStrategy>,
    handler: Option<Box<dyn PressHandler>>,
}

impl Button {
    /// Create a plain button with no visuals
    pub fn new(ctx: &mut WidgetContext) -> Self {
        Self::with_strategy(ctx, ShortPress)
    }

    /// Create a long-press button with no visuals
    pub fn long_press(ctx: &mut WidgetContext, duration: Duration) -> Self {
        Self::with_strategy(ctx, LongPress::new(duration))
    }

    /// Create a button with a custom press strategy
    pub fn with_strategy(ctx: &mut WidgetContext, strategy: impl PressStrategy + 'static) -> Self {
        let id = ctx.register_widget();
        Self::from_parts(id, Box::new(strategy))
    }

    /// Create a plain button from three image assets
    pub fn with_images(
        ctx: &mut WidgetContext,
        idle: &str,
        pressed: &str,
        dragout: &str,
    ) -> Self {
        let mut button = Self::new(ctx);
        button
            .set_idle_image(ctx, idle)
            .set_pressed_image(ctx, pressed)
            .set_dragout_image(ctx, dragout);
        button
    }

    fn from_parts(id: WidgetId, strategy: Box<dyn PressStrategy>) -> Self {
        Self {
            id,
            position: Point::ZERO,
            zones: Zones::new(),
            display: DisplayStates::new(),
            strategy,
            handler: None,
        }
    }

    /// Get the widget ID
    pub fn id(&self) -> WidgetId {
        self.id
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Load and install the idle image
    ///
    /// The idle image defines the content size. It also becomes the pressed
    /// and dragged-out image until those are set. A load failure leaves the
    /// button unchanged.
    pub fn set_idle_image(&mut self, ctx: &mut WidgetContext, asset: &str) -> &mut Self {
        self.install(ctx, ButtonState::Idle, asset)
    }

    /// Load and install the pressed image
    pub fn set_pressed_image(&mut self, ctx: &mut WidgetContext, asset: &str) -> &mut Self {
        self.install(ctx, ButtonState::Pressed, asset)
    }

    /// Load and install the dragged-out image
    pub fn set_dragout_image(&mut self, ctx: &mut WidgetContext, asset: &str) -> &mut Self {
        self.install(ctx, ButtonState::DraggedOut, asset)
    }

    /// Install an already loaded visual for a state
    pub fn set_visual(
        &mut self,
        ctx: &mut WidgetContext,
        state: ButtonState,
        visual: VisualId,
    ) -> &mut Self {
        self.display.set_visual(state, visual, ctx.scene.as_mut());
        self
    }

    fn install(&mut self, ctx: &mut WidgetContext, state: ButtonState, asset: &str) -> &mut Self {
        match ctx.scene.load(asset) {
            Ok(visual) => {
                tracing::debug!(id = ?self.id, ?state, asset, "image installed");
                self.display.set_visual(state, visual, ctx.scene.as_mut());
            }
            Err(err) => {
                tracing::warn!(id = ?self.id, ?state, %err, "image not installed");
            }
        }
        self
    }

    /// Set the press-acceptance zone (never smaller than the content)
    pub fn set_expand_zone(&mut self, size: Size) -> &mut Self {
        self.zones.set_expand(size);
        self
    }

    /// Set the drag-tolerance zone (never smaller than the content)
    pub fn set_safe_zone(&mut self, size: Size) -> &mut Self {
        self.zones.set_safe(size);
        self
    }

    /// Move the button; hit testing uses the position at the time of each touch
    pub fn set_position(&mut self, position: Point) -> &mut Self {
        self.position = position;
        self
    }

    /// Attach the handler called after each press is published
    pub fn set_press_handler(&mut self, handler: impl PressHandler + 'static) -> &mut Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Remove the press handler
    pub fn clear_press_handler(&mut self) -> &mut Self {
        self.handler = None;
        self
    }

    /// Change the long-press hold time
    ///
    /// Returns false for buttons without a long-press strategy.
    pub fn set_press_duration(&mut self, duration: Duration) -> bool {
        self.strategy.set_press_duration(duration)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Content size (idle image size, zero without one)
    pub fn content_size(&self, ctx: &WidgetContext) -> Size {
        self.display.content_size(ctx.scene.as_ref())
    }

    /// Effective expand zone size
    pub fn expand_zone(&self, ctx: &WidgetContext) -> Size {
        self.zones.expand(self.content_size(ctx))
    }

    /// Effective safe zone size
    pub fn safe_zone(&self, ctx: &WidgetContext) -> Size {
        self.zones.safe(self.content_size(ctx))
    }

    /// Current position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Idle visual handle
    pub fn idle_visual(&self) -> Option<VisualId> {
        self.display.visual(ButtonState::Idle)
    }

    /// Pressed visual handle
    pub fn pressed_visual(&self) -> Option<VisualId> {
        self.display.visual(ButtonState::Pressed)
    }

    /// Dragged-out visual handle
    pub fn dragout_visual(&self) -> Option<VisualId> {
        self.display.visual(ButtonState::DraggedOut)
    }

    /// Current interaction state
    pub fn state(&self) -> ButtonState {
        self.display.current()
    }

    /// Whether the button is currently pressed
    pub fn is_pressed(&self) -> bool {
        self.state() == ButtonState::Pressed
    }

    /// Whether a pressed touch has been dragged out
    pub fn is_dragged_out(&self) -> bool {
        self.state() == ButtonState::DraggedOut
    }

    /// Long-press hold time, if this is a long-press button
    pub fn press_duration(&self) -> Option<Duration> {
        self.strategy.press_duration()
    }

    /// Event name a press of this button is announced under
    ///
    /// Long-press buttons may still emit short presses; this is the name of
    /// the press the variant exists for.
    pub fn event_name(&self) -> &'static str {
        match self.press_duration() {
            Some(_) => PressKind::Long.event_name(),
            None => PressKind::Short.event_name(),
        }
    }

    // =========================================================================
    // Touch handling
    // =========================================================================

    /// A touch started; returns whether the button claims it
    pub fn touch_began(&mut self, ctx: &mut WidgetContext, point: Point) -> bool {
        let content = self.content_size(ctx);
        if !self.zones.accepts(self.position, content, point) {
            tracing::trace!(id = ?self.id, ?point, "touch rejected");
            return false;
        }

        self.switch(ctx, ButtonState::Pressed);
        self.strategy
            .on_accepted(&mut PressTimers::new(&mut ctx.timers, self.id));
        true
    }

    /// A claimed touch moved
    pub fn touch_moved(&mut self, ctx: &mut WidgetContext, point: Point) {
        if self.state() == ButtonState::Idle {
            return;
        }

        let content = self.content_size(ctx);
        if self.zones.accepts(self.position, content, point) {
            self.switch(ctx, ButtonState::Pressed);
        } else if self.zones.tolerates(self.position, content, point) {
            self.switch(ctx, ButtonState::DraggedOut);
        } else {
            tracing::debug!(id = ?self.id, ?point, "touch left safe zone");
            self.strategy
                .on_abandoned(&mut PressTimers::new(&mut ctx.timers, self.id));
            self.switch(ctx, ButtonState::Idle);
        }
    }

    /// A claimed touch ended
    ///
    /// Fires only if the button is still pressed; the release point itself
    /// is not tested.
    pub fn touch_ended(
        &mut self,
        ctx: &mut WidgetContext,
        point: Point,
    ) -> Option<PressNotification> {
        let mut timers = PressTimers::new(&mut ctx.timers, self.id);
        let notification = if self.is_pressed() {
            let kind = self.strategy.on_released(&mut timers);
            Some(emit(
                &mut ctx.events,
                self.handler.as_deref_mut(),
                self.id,
                kind,
            ))
        } else {
            tracing::trace!(id = ?self.id, ?point, state = ?self.state(), "released without press");
            self.strategy.on_abandoned(&mut timers);
            None
        };

        self.switch(ctx, ButtonState::Idle);
        notification
    }

    /// A claimed touch was cancelled by the system
    pub fn touch_cancelled(&mut self, ctx: &mut WidgetContext) {
        self.strategy
            .on_abandoned(&mut PressTimers::new(&mut ctx.timers, self.id));
        self.switch(ctx, ButtonState::Idle);
    }

    /// Feed a platform touch event; returns whether it was consumed
    pub fn handle_touch(&mut self, ctx: &mut WidgetContext, touch: &TouchEvent) -> bool {
        let point = Point::new(touch.x, touch.y);
        match touch.phase {
            TouchPhase::Began => self.touch_began(ctx, point),
            TouchPhase::Moved => {
                self.touch_moved(ctx, point);
                true
            }
            TouchPhase::Ended => {
                self.touch_ended(ctx, point);
                true
            }
            TouchPhase::Cancelled => {
                self.touch_cancelled(ctx);
                true
            }
        }
    }

    /// Deliver elapsed timers (call each frame after `WidgetContext::advance`)
    pub fn update(&mut self, ctx: &mut WidgetContext) {
        for timer in ctx.timers.take_elapsed(self.id) {
            self.strategy.on_elapsed(timer);
        }
    }

    /// Whether a long-press countdown is running
    pub fn is_counting(&self) -> bool {
        self.strategy.is_counting()
    }

    /// Release visuals, cancel timers and unregister the widget
    pub fn destroy(mut self, ctx: &mut WidgetContext) {
        self.display.detach_all(ctx.scene.as_mut());
        ctx.unregister_widget(self.id);
    }

    fn switch(&mut self, ctx: &mut WidgetContext, next: ButtonState) {
        let prev = self.display.current();
        self.display.switch_to(next, ctx.scene.as_mut());
        if prev != next {
            tracing::debug!(id = ?self.id, ?prev, ?next, "button state changed");
        }
    }
}

/// Create a button builder
pub fn button() -> ButtonBuilder {
    ButtonBuilder::default()
}

/// Builder for creating buttons
#[derive(Default)]
pub struct ButtonBuilder {
    name: Option<String>,
    idle: Option<String>,
    pressed: Option<String>,
    dragout: Option<String>,
    position: Point,
    expand: Option<Size>,
    safe: Option<Size>,
    long_press: Option<Duration>,
    handler: Option<Box<dyn PressHandler>>,
}

impl ButtonBuilder {
    /// Debug label registered with the context
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Idle image asset
    pub fn idle(mut self, asset: impl Into<String>) -> Self {
        self.idle = Some(asset.into());
        self
    }

    /// Pressed image asset
    pub fn pressed(mut self, asset: impl Into<String>) -> Self {
        self.pressed = Some(asset.into());
        self
    }

    /// Dragged-out image asset
    pub fn dragout(mut self, asset: impl Into<String>) -> Self {
        self.dragout = Some(asset.into());
        self
    }

    /// Center position
    pub fn position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Expand zone size
    pub fn expand_zone(mut self, size: Size) -> Self {
        self.expand = Some(size);
        self
    }

    /// Safe zone size
    pub fn safe_zone(mut self, size: Size) -> Self {
        self.safe = Some(size);
        self
    }

    /// Make this a long-press button with the given hold time
    pub fn long_press(mut self, duration: Duration) -> Self {
        self.long_press = Some(duration);
        self
    }

    /// Press handler
    pub fn on_press(mut self, handler: impl PressHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Build the button widget
    pub fn build(self, ctx: &mut WidgetContext) -> Button {
        let id = match self.name {
            Some(name) => ctx.register_named(name),
            None => ctx.register_widget(),
        };
        let strategy: Box<dyn PressStrategy> = match self.long_press {
            Some(duration) => Box::new(LongPress::new(duration)),
            None => Box::new(ShortPress),
        };

        let mut button = Button::from_parts(id, strategy);
        button.set_position(self.position);
        if let Some(asset) = &self.idle {
            button.set_idle_image(ctx, asset);
        }
        if let Some(asset) = &self.pressed {
            button.set_pressed_image(ctx, asset);
        }
        if let Some(asset) = &self.dragout {
            button.set_dragout_image(ctx, asset);
        }
        if let Some(size) = self.expand {
            button.set_expand_zone(size);
        }
        if let Some(size) = self.safe {
            button.set_safe_zone(size);
        }
        button.handler = self.handler;
        button
    }
}
