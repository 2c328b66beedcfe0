//! Presskit Widget Library
//!
//! Touch buttons with zone-based hit testing and long-press detection.
//!
//! # Architecture
//!
//! 1. **Zones**: each button is hit tested against a base rect (its idle
//!    image), a forgiving expand rect that accepts new touches, and a wider
//!    safe rect that keeps a pressed touch alive while the finger drifts.
//!
//! 2. **Display states**: idle, pressed and dragged-out each map to a visual
//!    handle in the host scene; exactly one is shown at a time.
//!
//! 3. **Press strategies**: the touch state machine is shared by all
//!    buttons. Classification of a completed press is delegated to a
//!    [`PressStrategy`] (plain or long-press).
//!
//! 4. **Emission**: a completed press is published on the context's event
//!    bus and then passed to the button's own [`PressHandler`].
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use presskit_core::{Point, Size, SpriteArena};
//! use presskit_widgets::prelude::*;
//!
//! let arena = SpriteArena::new().with_asset("btn/idle.png", Size::new(100.0, 40.0));
//! let mut ctx = WidgetContext::new(arena);
//! ctx.subscribe(LONG_PRESSED_EVENT, |e| println!("long press from {:?}", e.sender));
//!
//! let mut hold = button()
//!     .idle("btn/idle.png")
//!     .position(Point::new(100.0, 100.0))
//!     .long_press(Duration::from_secs(1))
//!     .build(&mut ctx);
//!
//! hold.touch_began(&mut ctx, Point::new(100.0, 100.0));
//! ctx.advance(Duration::from_secs(1));
//! hold.update(&mut ctx);
//!
//! let sent = hold.touch_ended(&mut ctx, Point::new(100.0, 100.0)).unwrap();
//! assert_eq!(sent.kind, PressKind::Long);
//! ```

pub mod button;
pub mod context;
pub mod display;
pub mod emit;
pub mod press;
pub mod stage;
pub mod widget;
pub mod zone;

pub use button::{button, Button, ButtonBuilder};
pub use context::WidgetContext;
pub use display::{ButtonState, DisplayStates};
pub use emit::{emit, PressHandler, PressNotification, LONG_PRESSED_EVENT, PRESSED_EVENT};
pub use press::{LongPress, PressKind, PressStrategy, PressTimers, ShortPress, DEFAULT_LONG_PRESS};
pub use stage::Stage;
pub use widget::WidgetId;
pub use zone::{compute_zone, contains_point, ZoneKind, Zones};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::button::{button, Button, ButtonBuilder};
    pub use crate::context::WidgetContext;
    pub use crate::display::ButtonState;
    pub use crate::emit::{PressHandler, PressNotification, LONG_PRESSED_EVENT, PRESSED_EVENT};
    pub use crate::press::{LongPress, PressKind, ShortPress};
    pub use crate::stage::Stage;
    pub use crate::widget::WidgetId;
}
