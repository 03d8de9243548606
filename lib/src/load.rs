use std::collections::VecDeque;

/// Returned by the load and fps readouts when there is nothing to divide by.
pub const UNAVAILABLE: i32 = -1;

/// Rolling window of frame durations, for the diagnostic overlay only.
#[derive(Debug, Clone)]
pub struct LoadMonitor {
    samples: VecDeque<u64>,
    capacity: usize,
}

impl LoadMonitor {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, dt_ms: u64) {
        self.samples.push_back(dt_ms);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn average_ms(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let total: u64 = self.samples.iter().sum();
        Some(total as f64 / self.samples.len() as f64)
    }

    /// Mean frame time as a percentage of `budget_ms`, or [`UNAVAILABLE`].
    pub fn average_load_percent(&self, budget_ms: u64) -> i32 {
        match self.average_ms() {
            Some(avg) if budget_ms > 0 => (100.0 * avg / budget_ms as f64).round() as i32,
            _ => UNAVAILABLE,
        }
    }

    pub fn last(&self) -> Option<u64> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Frames per second a frame of `dt_ms` would sustain, or [`UNAVAILABLE`].
pub fn fps(dt_ms: u64) -> i32 {
    if dt_ms == 0 {
        return UNAVAILABLE;
    }
    (1000 / dt_ms) as i32
}
