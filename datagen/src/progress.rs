use std::time::{Duration, Instant};

/// Tracks how far a run has come and what that implies for the rest.
pub struct Progress {
    started: Instant,
    total: u64,
    done: u64,
}
impl Progress {
    pub fn new(total: u64) -> Self {
        Self {
            started: Instant::now(),
            total,
            done: 0,
        }
    }

    pub fn finish_one(&mut self) -> u64 {
        self.done += 1;
        self.done
    }

    pub fn done(&self) -> u64 {
        self.done
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn estimated_remaining(&self) -> Duration {
        estimate_remaining(self.started.elapsed(), self.done, self.total)
    }
}

/// Average seconds per finished render, scaled by the renders still to go.
pub fn estimate_remaining(elapsed: Duration, done: u64, total: u64) -> Duration {
    if done == 0 || total <= done {
        return Duration::ZERO;
    }
    let per_render = elapsed.as_secs_f64() / done as f64;
    Duration::from_secs_f64(per_render * (total - done) as f64)
}

/// Clock-style `HH:MM:SS`, hours unbounded.
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}
