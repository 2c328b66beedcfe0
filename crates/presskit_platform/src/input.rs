//! Touch input types

/// Lifecycle phase of a single touch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger went down
    Began,
    /// Finger moved while down
    Moved,
    /// Finger lifted
    Ended,
    /// The system took the touch away (e.g., an OS gesture)
    Cancelled,
}

impl TouchPhase {
    /// Whether this phase closes the touch
    pub fn is_terminal(self) -> bool {
        matches!(self, TouchPhase::Ended | TouchPhase::Cancelled)
    }
}

/// A touch event delivered by the platform
///
/// Positions are already expressed in the coordinate frame the widgets hit
/// test in. The position of a cancelled touch is not meaningful.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    /// Identifier stable for the lifetime of one touch
    pub id: u64,
    /// Lifecycle phase
    pub phase: TouchPhase,
    /// X position
    pub x: f32,
    /// Y position
    pub y: f32,
}

impl TouchEvent {
    /// Create a touch event
    pub fn new(id: u64, phase: TouchPhase, x: f32, y: f32) -> Self {
        Self { id, phase, x, y }
    }

    /// A touch started
    pub fn began(id: u64, x: f32, y: f32) -> Self {
        Self::new(id, TouchPhase::Began, x, y)
    }

    /// A touch moved
    pub fn moved(id: u64, x: f32, y: f32) -> Self {
        Self::new(id, TouchPhase::Moved, x, y)
    }

    /// A touch ended
    pub fn ended(id: u64, x: f32, y: f32) -> Self {
        Self::new(id, TouchPhase::Ended, x, y)
    }

    /// A touch was cancelled
    pub fn cancelled(id: u64) -> Self {
        Self::new(id, TouchPhase::Cancelled, 0.0, 0.0)
    }

    /// Position as an `(x, y)` pair
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(!TouchPhase::Began.is_terminal());
        assert!(!TouchPhase::Moved.is_terminal());
        assert!(TouchPhase::Ended.is_terminal());
        assert!(TouchPhase::Cancelled.is_terminal());
    }

    #[test]
    fn test_constructors() {
        let e = TouchEvent::moved(7, 1.5, -2.0);
        assert_eq!(e.id, 7);
        assert_eq!(e.phase, TouchPhase::Moved);
        assert_eq!(e.position(), (1.5, -2.0));
        assert_eq!(TouchEvent::cancelled(3).phase, TouchPhase::Cancelled);
    }
}
