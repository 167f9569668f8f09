//! Virtual-clock timer queue.
//!
//! The player never reads the wall clock. The host advances the queue by the
//! time that has passed and the controller pops whatever came due, one timer
//! at a time, so a handler can cancel or re-arm timers before the next one is
//! considered. Cancelling a handle guarantees it never fires again.

use std::time::Duration;

/// Shortest period accepted for repeating timers; a zero period would fire
/// forever within a single advance.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct TimerEntry<K> {
    handle: TimerHandle,
    kind: K,
    deadline: Duration,
    period: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    now: Duration,
    next_id: u64,
    entries: Vec<TimerEntry<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<K: Copy> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position of the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn schedule_once(&mut self, after: Duration, kind: K) -> TimerHandle {
        self.push(after, None, kind)
    }

    /// First fire is one `period` from now.
    pub fn schedule_repeating(&mut self, period: Duration, kind: K) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        self.push(period, Some(period), kind)
    }

    fn push(
        &mut self,
        after: Duration,
        period: Option<Duration>,
        kind: K,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            handle,
            kind,
            deadline: self.now + after,
            period,
        });
        handle
    }

    /// Returns whether the handle was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        before != self.entries.len()
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    /// Pop the earliest timer due at or before `until`.
    ///
    /// The clock moves to that timer's deadline. Repeating timers are
    /// re-armed one period later; one-shot timers are removed. Ties fire in
    /// scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, K)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= until)
            .min_by_key(|(_, entry)| (entry.deadline, entry.handle))
            .map(|(index, _)| index)?;

        let entry = &self.entries[index];
        let fired = (entry.handle, entry.kind);
        let deadline = entry.deadline;
        let period = entry.period;
        self.now = self.now.max(deadline);

        match period {
            Some(period) => self.entries[index].deadline = deadline + period,
            None => {
                self.entries.swap_remove(index);
            }
        }

        Some(fired)
    }

    /// Move the clock forward without firing anything. Callers drain
    /// [`TimerQueue::pop_due`] first.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
