//! Deferred task scheduling
//!
//! A [`TimerQueue`] holds tasks that become due at a fixed point on a
//! monotonic timeline. Time is expressed as a [`Duration`] measured from
//! an arbitrary epoch chosen by the owner, which keeps the queue fully
//! deterministic: nothing fires until the owner calls
//! [`TimerQueue::drain_due`] with the current time.
//!
//! # Example
//!
//! ```rust
//! use app_state::schedule::TimerQueue;
//! use std::time::Duration;
//!
//! let mut timers = TimerQueue::new();
//! let id = timers.schedule(Duration::ZERO, Duration::from_millis(100), "push");
//!
//! assert!(timers.drain_due(Duration::from_millis(50)).is_empty());
//! assert_eq!(timers.drain_due(Duration::from_millis(100)), vec!["push"]);
//! assert!(!timers.is_pending(id));
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Handle to a scheduled task, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric value of this handle
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    id: TimerId,
    due: Duration,
    task: T,
}

/// Queue of deferred tasks with cancellation
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    next_id: u64,
    pending: Vec<ScheduledTask<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Schedule `task` to become due `delay` after `now`
    pub fn schedule(&mut self, now: Duration, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let due = now.saturating_add(delay);
        tracing::trace!(%id, due_ms = due.as_millis() as u64, "timer scheduled");

        self.pending.push(ScheduledTask { id, due, task });
        id
    }

    /// Cancel a pending task, returning it if it had not fired yet
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let index = self.pending.iter().position(|t| t.id == id)?;
        tracing::trace!(%id, "timer cancelled");
        Some(self.pending.remove(index).task)
    }

    /// Cancel every pending task, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Check whether a task is still waiting to fire
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    /// Earliest due time among pending tasks
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|t| t.due).min()
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every task due at or before `now`
    ///
    /// Tasks are returned in due order; ties keep scheduling order.
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due <= now);
        self.pending = waiting;

        due.sort_by_key(|t| (t.due, t.id));
        due.into_iter().map(|t| t.task).collect()
    }
}
