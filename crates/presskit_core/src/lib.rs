//! Presskit Core Runtime
//!
//! Foundational pieces shared by the Presskit widget crates:
//!
//! - **Geometry**: `Point`, `Size` and `Rect` with inclusive hit testing
//! - **Scene Host**: handle-based access to the host's visuals
//! - **Event Bus**: named publish/subscribe, owned and passed explicitly
//! - **Frame Timers**: one-shot deferred actions advanced once per tick
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use presskit_core::timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let id = timers.schedule("button", Duration::from_secs(2));
//!
//! timers.advance(Duration::from_secs(1));
//! assert!(timers.take_elapsed("button").is_empty());
//!
//! timers.advance(Duration::from_secs(1));
//! assert_eq!(timers.take_elapsed("button").as_slice(), &[id]);
//! ```

pub mod error;
pub mod events;
pub mod geometry;
pub mod scene;
pub mod timer;

pub use error::{Result, SceneError};
pub use events::{BusEvent, EventBus, SubscriptionId};
pub use geometry::{Point, Rect, Size};
pub use scene::{SceneHost, SpriteArena, VisualId};
pub use timer::{ElapsedTimers, TimerId, TimerQueue};
