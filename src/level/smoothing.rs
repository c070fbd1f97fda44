//! Fixed-window moving average.

use heapless::Deque;

/// Trailing window of the last `N` readings of one scalar channel.
///
/// The window starts full of zeros, so [`average`](Self::average) is
/// defined from the very first frame and ramps up from 0 instead of
/// jumping straight to the first reading.
#[derive(Clone, Debug)]
pub struct SmoothedSample<const N: usize> {
    values: Deque<f32, N>,
}

impl<const N: usize> SmoothedSample<N> {
    /// Create a window pre-filled with `N` zeros.
    pub fn new() -> Self {
        let mut values = Deque::new();
        while values.push_back(0.0).is_ok() {}
        Self { values }
    }

    /// Push a reading, evicting the oldest one, and return the new average.
    pub fn push(&mut self, value: f32) -> f32 {
        if self.values.is_full() {
            self.values.pop_front();
        }
        // Only a zero-capacity window can reject the sample.
        if self.values.push_back(value).is_err() {
            return self.average();
        }
        self.average()
    }

    /// Arithmetic mean of the current window contents.
    pub fn average(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.values.iter().sum();
        sum / self.values.len() as f32
    }

    /// Number of readings held (always `N`).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Window capacity.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for SmoothedSample<N> {
    fn default() -> Self {
        Self::new()
    }
}
