/*
 *  touch.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  Background INT-line watcher. The GT1151 pulls its interrupt line low
 *  while a finger is down; a dedicated thread samples it so the render
 *  loop only pays for an I2C scan when a touch is plausible.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

use embedded_hal::digital::InputPin;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// How often the watcher samples the INT line.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Owns the poll thread. Dropping the watcher stops and joins it, so a
/// cancelled app loop cannot leak the thread.
pub struct TouchWatcher {
    touched: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TouchWatcher {
    /// Spawn the watcher, taking ownership of the INT pin.
    pub fn spawn<P>(mut int_pin: P) -> Self
    where
        P: InputPin + Send + 'static,
    {
        let touched = Arc::new(AtomicBool::new(false));
        let stop = Arc::new(AtomicBool::new(false));

        let touched_t = touched.clone();
        let stop_t = stop.clone();
        let handle = std::thread::Builder::new()
            .name("touch-poll".into())
            .spawn(move || {
                info!("Touch detection thread started");
                while !stop_t.load(Ordering::Relaxed) {
                    match int_pin.is_low() {
                        Ok(level) => touched_t.store(level, Ordering::Relaxed),
                        Err(e) => {
                            // a failed read shouldn't spin the thread hot
                            warn!("INT pin read failed: {:?}", e);
                        }
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                info!("Touch detection thread stopped");
            })
            .expect("spawn touch-poll thread");

        Self { touched, stop, handle: Some(handle) }
    }

    /// Is a finger (probably) down right now?
    pub fn is_touched(&self) -> bool {
        self.touched.load(Ordering::Relaxed)
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("touch-poll thread panicked");
            } else {
                debug!("touch-poll thread joined");
            }
        }
    }
}

impl Drop for TouchWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    /// Pin stub that reports a fixed level.
    struct StubPin {
        low: bool,
    }

    impl embedded_hal::digital::ErrorType for StubPin {
        type Error = Infallible;
    }

    impl InputPin for StubPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low)
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low)
        }
    }

    #[test]
    fn watcher_latches_pin_level() {
        let watcher = TouchWatcher::spawn(StubPin { low: true });
        std::thread::sleep(Duration::from_millis(30));
        assert!(watcher.is_touched());
    }

    #[test]
    fn watcher_reports_idle_line() {
        let watcher = TouchWatcher::spawn(StubPin { low: false });
        std::thread::sleep(Duration::from_millis(30));
        assert!(!watcher.is_touched());
    }

    #[test]
    fn drop_joins_the_thread() {
        let watcher = TouchWatcher::spawn(StubPin { low: false });
        drop(watcher);
        // reaching here without hanging is the assertion
    }
}
