/*
 *  pacer.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */
use std::time::{Duration, Instant};

/// Deadline-based gate for partial refreshes. The animation loop ticks
/// much faster than the panel can refresh; the pacer says when a flush
/// is actually due.
pub struct Pacer {
    next_deadline: Instant,
    frame: Duration,
}

impl Pacer {
    /// Pacer with an explicit period; e-paper cadences sit well below 1Hz.
    pub fn from_period(period: Duration) -> Self {
        Self { next_deadline: Instant::now(), frame: period }
    }

    /// Returns true if we should flush now; if true, it also schedules the next deadline.
    #[inline]
    pub fn should_flush(&mut self) -> bool {
        let now = Instant::now();
        if now >= self.next_deadline {
            self.next_deadline = now + self.frame;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_flushes() {
        let mut pacer = Pacer::from_period(Duration::from_secs(3600));
        assert!(pacer.should_flush());
        assert!(!pacer.should_flush());
    }

    #[test]
    fn flushes_again_after_the_period() {
        let mut pacer = Pacer::from_period(Duration::from_millis(1));
        assert!(pacer.should_flush());
        std::thread::sleep(Duration::from_millis(5));
        assert!(pacer.should_flush());
    }
}
