//! Platform events

use std::time::Duration;

use crate::input::TouchEvent;

/// Events the host feeds into the widget layer
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Touch input
    Touch(TouchEvent),
    /// Frame tick
    ///
    /// Sent once per frame with the time since the previous tick. Timers
    /// only advance on frame events.
    Frame {
        /// Time elapsed since the last frame
        dt: Duration,
    },
}

impl From<TouchEvent> for Event {
    fn from(touch: TouchEvent) -> Self {
        Event::Touch(touch)
    }
}
