use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    started_at: Instant,
    suppressed: u64,
}

/// Per-key rate limiter for repetitive log lines.
///
/// The first event for a key opens a window and is emitted; further events in
/// the same window are counted and dropped. The first event after the window
/// closes is emitted together with the number of events that were dropped.
#[derive(Debug)]
pub struct LogThrottle {
    interval: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl LogThrottle {
    pub fn new(interval: Duration) -> Self {
        LogThrottle {
            interval,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `Some(suppressed_count)` when a log for `key` should be emitted.
    pub fn should_emit(&self, key: &str) -> Option<u64> {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        let Some(window) = windows.get_mut(key) else {
            windows.insert(
                key.to_string(),
                Window {
                    started_at: now,
                    suppressed: 0,
                },
            );
            return Some(0);
        };

        if now.duration_since(window.started_at) < self.interval {
            window.suppressed += 1;
            return None;
        }
        let suppressed = window.suppressed;
        window.started_at = now;
        window.suppressed = 0;
        Some(suppressed)
    }
}
