//! Logical time source for recency comparisons.
//!
//! The policy never interprets timestamps as wall-clock time. It only asks
//! whether one [`Tick`] is older than another, so any monotonically
//! non-decreasing counter is a valid [`Clock`].
//!
//! ## Key Components
//!
//! - [`Tick`]: Opaque, totally ordered timestamp. [`Tick::EPOCH`] sorts before
//!   every tick a clock hands out.
//! - [`LogicalClock`]: Counter that advances on every read. Strictly increasing.
//! - [`ManualClock`]: Host-driven clock for simulators and tests.
//!
//! ## Example Usage
//!
//! ```
//! use seglru::clock::{Clock, LogicalClock, ManualClock, Tick};
//!
//! let clock = LogicalClock::new();
//! let a = clock.now();
//! let b = clock.now();
//! assert!(Tick::EPOCH < a && a < b);
//!
//! let manual = ManualClock::new();
//! manual.advance(10);
//! assert_eq!(manual.now(), Tick::new(11));
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque logical timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(u64);

impl Tick {
    /// The logical epoch. Strictly older than any tick returned by a clock.
    pub const EPOCH: Tick = Tick(0);

    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_epoch(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Source of the current logical time.
///
/// Implementations must return values that never decrease across calls and
/// are never [`Tick::EPOCH`].
pub trait Clock {
    fn now(&self) -> Tick;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Tick {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    #[inline]
    fn now(&self) -> Tick {
        (**self).now()
    }
}

// ---------------------------------------------------------------------------
// LogicalClock
// ---------------------------------------------------------------------------

/// Counter clock: every call to [`now`](Clock::now) returns a fresh, larger tick.
///
/// Two touches never share a timestamp, so recency ties only arise from
/// [`Tick::EPOCH`] (invalidated entries) or from [`ManualClock`].
#[derive(Debug)]
pub struct LogicalClock {
    next: AtomicU64,
}

impl LogicalClock {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Returns the tick the next call to `now` will hand out, without consuming it.
    pub fn peek(&self) -> Tick {
        Tick(self.next.load(Ordering::Relaxed))
    }
}

impl Default for LogicalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for LogicalClock {
    #[inline]
    fn now(&self) -> Tick {
        // Saturates at u64::MAX rather than wrapping back past the epoch.
        let prev = self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |t| {
                Some(t.saturating_add(1))
            })
            .unwrap_or(u64::MAX);
        Tick(prev)
    }
}

// ---------------------------------------------------------------------------
// ManualClock
// ---------------------------------------------------------------------------

/// Clock that only moves when the host moves it.
///
/// Starts at tick 1. [`set`](Self::set) never moves time backwards.
#[derive(Debug)]
pub struct ManualClock {
    current: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates a clock at `start`. A start of 0 is bumped to 1.
    pub fn starting_at(start: u64) -> Self {
        Self {
            current: AtomicU64::new(start.max(1)),
        }
    }

    /// Moves time forward by `delta` ticks.
    pub fn advance(&self, delta: u64) {
        let _ = self
            .current
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |t| {
                Some(t.saturating_add(delta))
            });
    }

    /// Moves time to `tick` if it is ahead of the current time.
    pub fn set(&self, tick: u64) {
        self.current.fetch_max(tick, Ordering::Relaxed);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Tick {
        Tick(self.current.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_older_than_any_clock_tick() {
        assert!(Tick::EPOCH < LogicalClock::new().now());
        assert!(Tick::EPOCH < ManualClock::new().now());
        assert!(Tick::EPOCH < ManualClock::starting_at(0).now());
        assert!(Tick::default().is_epoch());
    }

    #[test]
    fn logical_clock_strictly_increases() {
        let clock = LogicalClock::new();
        let mut last = Tick::EPOCH;
        for _ in 0..100 {
            let t = clock.now();
            assert!(t > last);
            last = t;
        }
        assert_eq!(clock.peek(), Tick::new(101));
    }

    #[test]
    fn manual_clock_never_goes_backwards() {
        let clock = ManualClock::starting_at(50);
        clock.set(10);
        assert_eq!(clock.now(), Tick::new(50));
        clock.set(70);
        assert_eq!(clock.now(), Tick::new(70));
        clock.advance(5);
        assert_eq!(clock.now().get(), 75);
        // Reads alone do not advance it.
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn shared_clock_through_arc_and_ref() {
        let clock = Arc::new(LogicalClock::new());
        let by_ref = &*clock;
        let a = by_ref.now();
        let b = Clock::now(&clock);
        assert!(b > a);
    }

    #[test]
    fn tick_display() {
        assert_eq!(Tick::new(42).to_string(), "t42");
    }
}
