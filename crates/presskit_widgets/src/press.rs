//! Press strategies
//!
//! A [`Button`](crate::Button) runs the same touch state machine for every
//! variant and defers the press classification to a [`PressStrategy`]. The
//! state machine calls the hooks at three points:
//!
//! - `on_accepted` when a touch is claimed
//! - `on_released` when a touch ends while pressed
//! - `on_abandoned` when a touch is dropped without a press
//!
//! [`ShortPress`] always reports a short press. [`LongPress`] starts a
//! countdown when the touch is claimed and reports a long press if the
//! countdown elapsed before release.

use std::time::Duration;

use presskit_core::{TimerId, TimerQueue};

use crate::widget::WidgetId;

/// Default hold time for a long press
pub const DEFAULT_LONG_PRESS: Duration = Duration::from_secs(2);

/// Classification of a completed press
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PressKind {
    Short,
    Long,
}

/// Timer access scoped to one widget
pub struct PressTimers<'a> {
    queue: &'a mut TimerQueue<WidgetId>,
    owner: WidgetId,
}

impl<'a> PressTimers<'a> {
    pub fn new(queue: &'a mut TimerQueue<WidgetId>, owner: WidgetId) -> Self {
        Self { queue, owner }
    }

    /// Schedule a one-shot countdown for the owning widget
    pub fn start(&mut self, delay: Duration) -> TimerId {
        self.queue.schedule(self.owner, delay)
    }

    /// Cancel a countdown; unknown or elapsed ids are ignored
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.cancel(id)
    }
}

/// Hook points a button calls during a touch session
pub trait PressStrategy: Send {
    /// A touch was claimed and the button entered `Pressed`
    fn on_accepted(&mut self, timers: &mut PressTimers<'_>);

    /// The touch ended while `Pressed`
    fn on_released(&mut self, timers: &mut PressTimers<'_>) -> PressKind;

    /// The touch was dropped without a press
    fn on_abandoned(&mut self, timers: &mut PressTimers<'_>);

    /// A timer owned by this button elapsed
    fn on_elapsed(&mut self, _timer: TimerId) {}

    /// Hold time required for a long press, if this strategy has one
    fn press_duration(&self) -> Option<Duration> {
        None
    }

    /// Change the hold time. Returns false if the strategy has none.
    fn set_press_duration(&mut self, _duration: Duration) -> bool {
        false
    }

    /// Whether a countdown is currently running
    fn is_counting(&self) -> bool {
        false
    }
}

/// Every completed press is short
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortPress;

impl PressStrategy for ShortPress {
    fn on_accepted(&mut self, _timers: &mut PressTimers<'_>) {}

    fn on_released(&mut self, _timers: &mut PressTimers<'_>) -> PressKind {
        PressKind::Short
    }

    fn on_abandoned(&mut self, _timers: &mut PressTimers<'_>) {}
}

/// Reclassifies a press as long once it has been held for `duration`
#[derive(Clone, Debug)]
pub struct LongPress {
    duration: Duration,
    countdown: Option<TimerId>,
    long_touch_reached: bool,
}

impl LongPress {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            countdown: None,
            long_touch_reached: false,
        }
    }

    /// Whether the hold time has been reached in the current touch
    pub fn long_touch_reached(&self) -> bool {
        self.long_touch_reached
    }

    fn reset(&mut self, timers: &mut PressTimers<'_>) {
        if let Some(id) = self.countdown.take() {
            timers.cancel(id);
        }
        self.long_touch_reached = false;
    }
}

impl Default for LongPress {
    fn default() -> Self {
        Self::new(DEFAULT_LONG_PRESS)
    }
}

impl PressStrategy for LongPress {
    fn on_accepted(&mut self, timers: &mut PressTimers<'_>) {
        self.reset(timers);
        self.countdown = Some(timers.start(self.duration));
    }

    fn on_released(&mut self, timers: &mut PressTimers<'_>) -> PressKind {
        let kind = if self.long_touch_reached {
            PressKind::Long
        } else {
            PressKind::Short
        };
        self.reset(timers);
        kind
    }

    fn on_abandoned(&mut self, timers: &mut PressTimers<'_>) {
        self.reset(timers);
    }

    fn on_elapsed(&mut self, timer: TimerId) {
        if self.countdown == Some(timer) {
            self.countdown = None;
            self.long_touch_reached = true;
            tracing::debug!(?timer, "long press reached");
        }
    }

    fn press_duration(&self) -> Option<Duration> {
        Some(self.duration)
    }

    fn set_press_duration(&mut self, duration: Duration) -> bool {
        self.duration = duration;
        true
    }

    fn is_counting(&self) -> bool {
        self.countdown.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> WidgetId {
        let mut ids = slotmap::SlotMap::<WidgetId, ()>::with_key();
        ids.insert(())
    }

    fn deliver(queue: &mut TimerQueue<WidgetId>, owner: WidgetId, strategy: &mut dyn PressStrategy) {
        for id in queue.take_elapsed(owner) {
            strategy.on_elapsed(id);
        }
    }

    #[test]
    fn test_short_press_strategy() {
        let mut queue = TimerQueue::new();
        let id = owner();
        let mut strategy = ShortPress;
        let mut timers = PressTimers::new(&mut queue, id);

        strategy.on_accepted(&mut timers);
        assert_eq!(strategy.on_released(&mut timers), PressKind::Short);
        assert!(queue.is_empty());
        assert_eq!(strategy.press_duration(), None);
    }

    #[test]
    fn test_long_press_before_and_after_duration() {
        let mut queue = TimerQueue::new();
        let id = owner();
        let mut strategy = LongPress::new(Duration::from_secs(1));

        strategy.on_accepted(&mut PressTimers::new(&mut queue, id));
        queue.advance(Duration::from_millis(999));
        deliver(&mut queue, id, &mut strategy);
        assert!(!strategy.long_touch_reached());
        assert_eq!(
            strategy.on_released(&mut PressTimers::new(&mut queue, id)),
            PressKind::Short
        );
        assert!(queue.is_empty());

        strategy.on_accepted(&mut PressTimers::new(&mut queue, id));
        queue.advance(Duration::from_secs(1));
        deliver(&mut queue, id, &mut strategy);
        assert!(strategy.long_touch_reached());
        assert!(!strategy.is_counting());
        assert_eq!(
            strategy.on_released(&mut PressTimers::new(&mut queue, id)),
            PressKind::Long
        );
        assert!(!strategy.long_touch_reached());
    }

    #[test]
    fn test_abandon_cancels_countdown() {
        let mut queue = TimerQueue::new();
        let id = owner();
        let mut strategy = LongPress::default();

        strategy.on_accepted(&mut PressTimers::new(&mut queue, id));
        assert!(strategy.is_counting());
        strategy.on_abandoned(&mut PressTimers::new(&mut queue, id));
        assert!(!strategy.is_counting());
        assert!(queue.is_empty());

        queue.advance(DEFAULT_LONG_PRESS * 2);
        deliver(&mut queue, id, &mut strategy);
        assert!(!strategy.long_touch_reached());
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut queue = TimerQueue::new();
        let id = owner();
        let mut strategy = LongPress::new(Duration::from_millis(10));
        let stale = queue.schedule(id, Duration::ZERO);

        strategy.on_accepted(&mut PressTimers::new(&mut queue, id));
        strategy.on_elapsed(stale);
        assert!(!strategy.long_touch_reached());
        assert!(strategy.is_counting());
    }

    #[test]
    fn test_reaccept_keeps_single_countdown() {
        let mut queue = TimerQueue::new();
        let id = owner();
        let mut strategy = LongPress::default();

        strategy.on_accepted(&mut PressTimers::new(&mut queue, id));
        strategy.on_accepted(&mut PressTimers::new(&mut queue, id));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_set_press_duration() {
        let mut strategy = LongPress::default();
        assert_eq!(strategy.press_duration(), Some(DEFAULT_LONG_PRESS));
        assert!(strategy.set_press_duration(Duration::from_millis(500)));
        assert_eq!(strategy.press_duration(), Some(Duration::from_millis(500)));

        let mut short = ShortPress;
        assert!(!short.set_press_duration(Duration::from_millis(500)));
    }
}
