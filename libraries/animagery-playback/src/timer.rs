//! Explicit timers
//!
//! The controller never touches platform timers. It schedules entries in a
//! [`Scheduler`] against a [`Clock`], and the host calls
//! [`PlayerController::tick`](crate::PlayerController::tick) from its event
//! loop. Tests swap in a [`ManualClock`] and advance time by hand.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source
pub trait Clock: fmt::Debug {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at zero
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for deterministic tests
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the controller.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    /// Start a clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.micros
            .fetch_add(by.as_micros() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::SeqCst))
    }
}

/// Cancellation handle for a scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Scheduled<T> {
    handle: TimerHandle,
    deadline: Duration,
    payload: T,
}

/// One-shot timers carrying a payload
#[derive(Debug)]
pub struct Scheduler<T> {
    clock: Arc<dyn Clock>,
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler over `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current clock reading
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Fire `payload` once `delay` has elapsed
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            handle,
            deadline: self.clock.now() + delay,
            payload,
        });
        handle
    }

    /// Cancel a pending entry
    ///
    /// Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.handle != handle);
        self.pending.len() != before
    }

    /// Cancel everything
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Number of entries still waiting
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Earliest pending deadline, for hosts that sleep until the next tick
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|s| s.deadline).min()
    }

    /// Remove and return every entry whose deadline has passed
    ///
    /// Entries come back in deadline order.
    pub fn take_due(&mut self) -> Vec<(TimerHandle, T)> {
        let now = self.clock.now();
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.deadline <= now);
        self.pending = rest;

        due.sort_by_key(|s| s.deadline);
        due.into_iter().map(|s| (s.handle, s.payload)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> (ManualClock, Scheduler<&'static str>) {
        let clock = ManualClock::new();
        let scheduler = Scheduler::new(Arc::new(clock.clone()));
        (clock, scheduler)
    }

    #[test]
    fn fires_only_after_deadline() {
        let (clock, mut s) = scheduler();
        s.schedule(Duration::from_secs(3), "hide");

        clock.advance(Duration::from_millis(2999));
        assert!(s.take_due().is_empty());

        clock.advance(Duration::from_millis(1));
        let fired: Vec<_> = s.take_due().into_iter().map(|(_, p)| p).collect();
        assert_eq!(fired, vec!["hide"]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn cancelled_entries_never_fire() {
        let (clock, mut s) = scheduler();
        let handle = s.schedule(Duration::from_secs(1), "a");
        assert!(s.cancel(handle));
        assert!(!s.cancel(handle));

        clock.advance(Duration::from_secs(5));
        assert!(s.take_due().is_empty());
    }

    #[test]
    fn due_entries_in_deadline_order() {
        let (clock, mut s) = scheduler();
        s.schedule(Duration::from_secs(2), "late");
        s.schedule(Duration::from_secs(1), "early");
        s.schedule(Duration::from_secs(10), "pending");

        assert_eq!(s.next_deadline(), Some(Duration::from_secs(1)));

        clock.advance(Duration::from_secs(3));
        let fired: Vec<_> = s.take_due().into_iter().map(|(_, p)| p).collect();
        assert_eq!(fired, vec!["early", "late"]);
        assert_eq!(s.pending(), 1);
    }

    #[test]
    fn cancel_all_clears() {
        let (_clock, mut s) = scheduler();
        s.schedule(Duration::from_secs(1), "a");
        s.schedule(Duration::from_secs(2), "b");
        s.cancel_all();
        assert_eq!(s.pending(), 0);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(Duration::from_millis(1500));
        assert_eq!(other.now(), Duration::from_millis(1500));
    }
}
