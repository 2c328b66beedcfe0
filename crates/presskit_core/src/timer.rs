//! One-shot frame timers
//!
//! A [`TimerQueue`] holds deferred actions keyed by [`TimerId`]. Time only
//! moves when the host calls [`TimerQueue::advance`] once per frame, so a
//! timer can only elapse at a tick boundary. Elapsed timers are parked per
//! owner until the owner collects them with [`TimerQueue::take_elapsed`].
//!
//! Cancelling removes a timer whether it is still pending or already parked,
//! which means an owner that cancels before collecting never observes the
//! elapse.

use std::time::Duration;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a scheduled one-shot timer
    pub struct TimerId;
}

/// Batch of timers returned from a tick
pub type ElapsedTimers = SmallVec<[TimerId; 4]>;

#[derive(Clone, Copy, Debug)]
struct Pending<K> {
    owner: K,
    deadline: Duration,
}

/// Frame-driven queue of one-shot timers
pub struct TimerQueue<K: Copy + Eq + std::hash::Hash> {
    timers: SlotMap<TimerId, Pending<K>>,
    /// Elapsed timers waiting for their owner, in deadline order
    elapsed: FxHashMap<K, ElapsedTimers>,
    now: Duration,
}

impl<K: Copy + Eq + std::hash::Hash + std::fmt::Debug> TimerQueue<K> {
    /// Create an empty queue at time zero
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            elapsed: FxHashMap::default(),
            now: Duration::ZERO,
        }
    }

    /// Schedule a one-shot timer that elapses `delay` after the current time
    pub fn schedule(&mut self, owner: K, delay: Duration) -> TimerId {
        let deadline = self.now.saturating_add(delay);
        let id = self.timers.insert(Pending { owner, deadline });
        tracing::debug!(?id, ?owner, ?delay, "timer scheduled");
        id
    }

    /// Cancel a timer
    ///
    /// Returns false if the timer was never scheduled, already collected or
    /// already cancelled. Cancelling is always safe.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(pending) = self.timers.remove(id) else {
            return false;
        };
        if let Some(parked) = self.elapsed.get_mut(&pending.owner) {
            parked.retain(|t| *t != id);
            if parked.is_empty() {
                self.elapsed.remove(&pending.owner);
            }
        }
        tracing::debug!(?id, owner = ?pending.owner, "timer cancelled");
        true
    }

    /// Cancel every timer belonging to `owner`
    pub fn cancel_owner(&mut self, owner: K) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, pending| pending.owner != owner);
        self.elapsed.remove(&owner);
        before - self.timers.len()
    }

    /// Whether a timer is still scheduled and not yet collected
    pub fn is_live(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of live timers (pending or parked)
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// True if no timers are live
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance time by `dt` and park every timer whose deadline has passed
    ///
    /// Returns how many timers elapsed during this tick.
    pub fn advance(&mut self, dt: Duration) -> usize {
        self.now = self.now.saturating_add(dt);
        let now = self.now;

        let mut due: Vec<(TimerId, Pending<K>)> = self
            .timers
            .iter()
            .filter(|(id, pending)| {
                pending.deadline <= now && !self.is_parked(pending.owner, *id)
            })
            .map(|(id, pending)| (id, *pending))
            .collect();
        due.sort_by_key(|(_, pending)| pending.deadline);

        for (id, pending) in &due {
            tracing::debug!(?id, owner = ?pending.owner, "timer elapsed");
            self.elapsed.entry(pending.owner).or_default().push(*id);
        }
        due.len()
    }

    /// Collect and retire the elapsed timers of one owner
    pub fn take_elapsed(&mut self, owner: K) -> ElapsedTimers {
        let parked = self.elapsed.remove(&owner).unwrap_or_default();
        for id in &parked {
            self.timers.remove(*id);
        }
        parked
    }

    fn is_parked(&self, owner: K, id: TimerId) -> bool {
        self.elapsed
            .get(&owner)
            .is_some_and(|parked| parked.contains(&id))
    }
}

impl<K: Copy + Eq + std::hash::Hash + std::fmt::Debug> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
