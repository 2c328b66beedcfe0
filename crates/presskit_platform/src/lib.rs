//! Presskit Platform Types
//!
//! Platform-agnostic input events consumed by the widget layer. Backends
//! translate their native touch callbacks into [`TouchEvent`] values and
//! emit a [`Event::Frame`] once per rendered frame.

mod event;
mod input;

pub use event::Event;
pub use input::{TouchEvent, TouchPhase};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::event::Event;
    pub use crate::input::{TouchEvent, TouchPhase};
}
