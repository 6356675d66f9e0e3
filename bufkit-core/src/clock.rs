//! Monotonic mark-and-delta clock.
//!
//! A thin wrapper over [`std::time::Instant`] for the common "mark a point,
//! ask how long since" pattern. The mark is taken at construction and can be
//! moved forward with [`Clock::update`].

use std::time::{Duration, Instant};

/// A monotonic clock holding one mark.
#[derive(Debug, Clone)]
pub struct Clock {
    mark: Instant,
}

impl Clock {
    /// Create a clock marked at the current instant.
    pub fn new() -> Self {
        Self {
            mark: Instant::now(),
        }
    }

    /// Move the mark to the current instant.
    pub fn update(&mut self) {
        self.mark = Instant::now();
    }

    /// Time elapsed since the mark.
    pub fn elapsed(&self) -> Duration {
        self.mark.elapsed()
    }

    /// Whole seconds elapsed since the mark.
    pub fn delta_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// Whole milliseconds elapsed since the mark.
    pub fn delta_millis(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Whole microseconds elapsed since the mark.
    pub fn delta_micros(&self) -> u64 {
        self.elapsed().as_micros() as u64
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas_are_monotonic() {
        let clock = Clock::new();
        let first = clock.delta_micros();
        std::thread::sleep(Duration::from_millis(2));
        let second = clock.delta_micros();
        assert!(second >= first);
        assert!(clock.delta_millis() >= 2);
    }

    #[test]
    fn test_update_resets_mark() {
        let mut clock = Clock::new();
        std::thread::sleep(Duration::from_millis(2));
        clock.update();
        assert!(clock.delta_millis() < 2);
    }

    #[test]
    fn test_delta_units_agree() {
        let clock = Clock::new();
        std::thread::sleep(Duration::from_millis(5));
        let micros = clock.delta_micros();
        let millis = clock.delta_millis();
        assert!(millis <= micros / 1000 + 1);
    }
}
