//! Frame-driven timers.
//!
//! Everything runs on the render thread, so "timers" are entries in a small
//! list keyed by a virtual millisecond clock. The frame loop advances the clock
//! and the owner drains due tasks one by one, which lets a firing task schedule
//! follow-up timers relative to the instant it fired.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    due: u64,
    interval: Option<u64>,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule_once(&mut self, delay_ms: u64, task: T) -> TimerId {
        self.insert(delay_ms, None, task)
    }

    /// A zero interval is bumped to 1 ms so a repeating timer can never fire
    /// forever within a single drain.
    pub fn schedule_repeating(&mut self, interval_ms: u64, task: T) -> TimerId {
        let interval_ms = interval_ms.max(1);
        self.insert(interval_ms, Some(interval_ms), task)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        before != self.entries.len()
    }

    #[cfg(test)]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Pops the earliest task due at or before `until`, moving the clock to its
    /// due time. Repeating entries are re-armed before the task is returned.
    pub fn pop_due(&mut self, until: u64) -> Option<T> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(position, _)| position)?;

        let entry = &mut self.entries[position];
        self.now = self.now.max(entry.due);
        let task = entry.task.clone();
        match entry.interval {
            Some(interval) => entry.due += interval,
            None => {
                self.entries.swap_remove(position);
            }
        }
        Some(task)
    }

    /// Moves the clock forward once every due task up to `until` was drained.
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }

    fn insert(&mut self, delay_ms: u64, interval: Option<u64>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now + delay_ms,
            interval,
            task,
        });
        id
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
