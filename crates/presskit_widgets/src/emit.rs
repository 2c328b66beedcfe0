//! Press notifications
//!
//! A completed press is published on the context's [`EventBus`] first and
//! then handed to the button's own [`PressHandler`], always in that order.

use presskit_core::{BusEvent, EventBus};

use crate::press::PressKind;
use crate::widget::WidgetId;

/// Event name for a short press
pub const PRESSED_EVENT: &str = "button_pressed_event";

/// Event name for a long press
pub const LONG_PRESSED_EVENT: &str = "button_long_pressed_event";

impl PressKind {
    /// Bus event name for this classification
    pub fn event_name(self) -> &'static str {
        match self {
            PressKind::Short => PRESSED_EVENT,
            PressKind::Long => LONG_PRESSED_EVENT,
        }
    }
}

/// Payload published when a button is pressed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PressNotification {
    /// The button that was pressed
    pub sender: WidgetId,
    /// Short or long press
    pub kind: PressKind,
}

impl BusEvent for PressNotification {
    fn name(&self) -> &'static str {
        self.kind.event_name()
    }
}

/// Capability invoked directly by a button after it publishes a press
pub trait PressHandler: Send {
    fn on_press(&mut self, event: &PressNotification);
}

impl<F> PressHandler for F
where
    F: FnMut(&PressNotification) + Send,
{
    fn on_press(&mut self, event: &PressNotification) {
        self(event)
    }
}

/// Publish a press, then invoke the direct handler
pub fn emit(
    bus: &mut EventBus<PressNotification>,
    handler: Option<&mut (dyn PressHandler + 'static)>,
    sender: WidgetId,
    kind: PressKind,
) -> PressNotification {
    let notification = PressNotification { sender, kind };
    let delivered = bus.publish(&notification);
    tracing::debug!(?sender, event = kind.event_name(), delivered, "press emitted");

    if let Some(handler) = handler {
        handler.on_press(&notification);
    }
    notification
}
