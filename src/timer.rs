//! Scheduled callbacks on a logical clock.
//!
//! Every game session owns one `Timers` queue. Nothing outside the session can
//! reach it, so dropping the session drops every pending callback with it.
//! `clear()` bumps the epoch, which turns all outstanding handles inert.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    epoch: u64,
    seq: u64,
}

#[derive(Debug)]
struct Pending<E> {
    due: Duration,
    seq: u64,
    event: E,
}

#[derive(Debug)]
pub struct Timers<E> {
    now: Duration,
    epoch: u64,
    next_seq: u64,
    queue: Vec<Pending<E>>,
}

impl<E> Default for Timers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timers<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            epoch: 0,
            next_seq: 0,
            queue: Vec::new(),
        }
    }

    /// Time elapsed on this queue's clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Pending {
            due: self.now + delay,
            seq,
            event,
        });
        TimerHandle {
            epoch: self.epoch,
            seq,
        }
    }

    /// Returns true if the callback was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        if handle.epoch != self.epoch {
            return false;
        }
        let before = self.queue.len();
        self.queue.retain(|p| p.seq != handle.seq);
        self.queue.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        handle.epoch == self.epoch && self.queue.iter().any(|p| p.seq == handle.seq)
    }

    /// Drops every pending callback and invalidates all handles issued so far.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.epoch += 1;
    }

    /// Time until the earliest pending callback is due.
    pub fn until_next(&self) -> Option<Duration> {
        self.queue
            .iter()
            .map(|p| p.due.saturating_sub(self.now))
            .min()
    }

    /// Pops the earliest callback due at or before `until` and moves the clock
    /// to its due time, so anything the handler schedules is relative to when
    /// the callback was meant to run.
    pub fn fire_next(&mut self, until: Duration) -> Option<E> {
        let (index, _) = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.seq))?;
        let pending = self.queue.remove(index);
        self.now = self.now.max(pending.due);
        Some(pending.event)
    }

    /// Moves the clock to `until` once all due callbacks have fired.
    pub fn catch_up(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
