//! Virtual-clock scheduler for one-shot deferred tasks.
//!
//! Nothing here runs on its own: the host event loop moves the clock with
//! [`Scheduler::pop_due`] and the manager executes whatever comes due.

use crate::toast::ToastId;
use std::collections::BTreeMap;
use std::time::Duration;

/// Work deferred by the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Duration elapsed; remove the toast
    AutoDismiss(ToastId),
    /// Exit interval elapsed; detach the node
    Detach(ToastId),
}

/// Handle to a scheduled task. Orders by due time, then scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerKey {
    due: Duration,
    seq: u64,
}

impl TimerKey {
    pub fn due(&self) -> Duration {
        self.due
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<TimerKey, Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once, `delay` from now
    pub fn schedule(&mut self, delay: Duration, task: Task) -> TimerKey {
        let key = TimerKey {
            due: self.now.saturating_add(delay),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(key, task);
        key
    }

    /// Drop a task that has not fired yet; returns whether it was pending
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.pending.remove(&key).is_some()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its due time. Returns `None` once nothing else is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerKey, Task)> {
        let (&key, _) = self.pending.first_key_value()?;
        if key.due > until {
            return None;
        }
        let task = self.pending.remove(&key)?;
        self.now = self.now.max(key.due);
        Some((key, task))
    }

    /// Move the clock to `to`; never moves backwards
    pub fn settle(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
