//! Throttled progress reporting for long fills.
//!
//! A shared counter of completed cells feeds two consumers: a progress bar
//! on stderr (refreshed at most every 100 ms and once per percent of work)
//! and a structured log line (at most once a minute). Reporting is
//! best-effort; the critical section does O(1) work per cell.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::info;

const BAR_INTERVAL: Duration = Duration::from_millis(100);
const LOG_INTERVAL: Duration = Duration::from_secs(60);
const BAR_WIDTH: usize = 40;

pub struct Progress {
    total: usize,
    /// One percent of the work, rounded up to at least one cell.
    step: usize,
    bar: bool,
    state: Mutex<State>,
}

struct State {
    done: usize,
    drawn: usize,
    last_bar: Instant,
    last_log: Instant,
}

impl Progress {
    #[must_use]
    pub fn new(total: usize, bar: bool) -> Self {
        let now = Instant::now();
        Self {
            total,
            step: total / 100 + 1,
            bar,
            state: Mutex::new(State { done: 0, drawn: 0, last_bar: now, last_log: now }),
        }
    }

    /// Record one completed cell.
    pub fn tick(&self) {
        let mut st = self.state.lock();
        st.done += 1;
        let now = Instant::now();

        if self.bar
            && st.done - st.drawn >= self.step
            && now.duration_since(st.last_bar) >= BAR_INTERVAL
        {
            self.draw(st.done);
            st.drawn = st.done;
            st.last_bar = now;
        }

        if now.duration_since(st.last_log) >= LOG_INTERVAL {
            let done = st.done;
            st.last_log = now;
            info!(done, total = self.total, "computing similarity matrix");
        }
    }

    /// Draw the final bar state and terminate its line.
    pub fn finish(&self) {
        if self.bar {
            self.draw(self.total);
            eprintln!();
        }
    }

    fn draw(&self, done: usize) {
        let frac = done as f64 / self.total.max(1) as f64;
        let filled = (frac * BAR_WIDTH as f64) as usize;
        eprint!(
            "\r[{}{}] {:5.1}% ({}/{})",
            "=".repeat(filled.min(BAR_WIDTH)),
            " ".repeat(BAR_WIDTH.saturating_sub(filled)),
            frac * 100.0,
            done,
            self.total
        );
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_counts() {
        let p = Progress::new(10, false);
        for _ in 0..10 {
            p.tick();
        }
        assert_eq!(p.state.lock().done, 10);
    }

    #[test]
    fn test_step_is_at_least_one() {
        assert_eq!(Progress::new(0, false).step, 1);
        assert_eq!(Progress::new(50, false).step, 1);
        assert_eq!(Progress::new(1000, false).step, 11);
    }
}
