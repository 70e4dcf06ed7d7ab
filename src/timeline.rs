//! Deferred one-shot work keyed by absolute due time.
//!
//! The controller queues tasks with the current timestamp; whoever owns the
//! real clock drains `take_wakeups` to arm timers and calls `due` when they
//! fire. Tests simply call `due` with a synthetic time.

#[derive(Debug)]
pub struct Timeline<T> {
    queue: Vec<Scheduled<T>>,
    seq: u64,
    wakeups: Vec<u32>,
}

#[derive(Debug)]
struct Scheduled<T> {
    at: f64,
    seq: u64,
    task: T,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            queue: Vec::new(),
            seq: 0,
            wakeups: Vec::new(),
        }
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: f64, delay_ms: u32, task: T) {
        self.queue.push(Scheduled {
            at: now + f64::from(delay_ms),
            seq: self.seq,
            task,
        });
        self.seq += 1;
        self.wakeups.push(delay_ms);
    }

    /// Removes and returns every task due at `now`, earliest first; ties keep
    /// scheduling order. Whatever is still pending gets a fresh wakeup, so a
    /// timer that fires early never strands its task.
    pub fn due(&mut self, now: f64) -> Vec<T> {
        let (mut ready, pending): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|s| s.at <= now);
        self.queue = pending;
        if let Some(next) = self.next_due() {
            self.wakeups.push((next - now).ceil().max(1.0) as u32);
        }
        ready.sort_by(|a, b| a.at.total_cmp(&b.at).then(a.seq.cmp(&b.seq)));
        ready.into_iter().map(|s| s.task).collect()
    }

    /// Delays (ms) of tasks scheduled since the last call.
    pub fn take_wakeups(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.wakeups)
    }

    pub fn next_due(&self) -> Option<f64> {
        self.queue.iter().map(|s| s.at).min_by(f64::total_cmp)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
