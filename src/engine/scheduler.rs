//! Single-threaded timer queue on a virtual clock.
//!
//! Tasks are plain values; the owner pops them when due and runs them one at
//! a time, so no two callbacks ever overlap. Tasks due at the same instant
//! run in the order they were scheduled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Timer<T> {
    due_ms: u64,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Timer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<T> Eq for Timer<T> {}

impl<T> PartialOrd for Timer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Timer<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

/// Deferred-callback queue keyed by virtual milliseconds.
#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Timer<T>>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `task` once `delay_ms` has elapsed.
    pub fn schedule(&mut self, delay_ms: u64, task: impl Into<T>) {
        let timer = Timer {
            due_ms: self.now_ms + delay_ms,
            seq: self.next_seq,
            task: task.into(),
        };
        self.next_seq += 1;
        self.queue.push(Reverse(timer));
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(t)| t.due_ms)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        if self.next_due()? > until_ms {
            return None;
        }
        let Reverse(timer) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(timer.task)
    }

    /// Move the clock forward to `now_ms` (never backward).
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
