// Copyright @yucwang 2026

use std::fmt;
use std::time::{Duration, Instant};

/// Counts finished rows across all passes of a session.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    start: Instant,
    completed_rows: u64,
    total_rows: u64,
}

impl ProgressTracker {
    pub fn new(total_rows: u64) -> Self {
        Self { start: Instant::now(), completed_rows: 0, total_rows }
    }

    pub fn record_row(&mut self) {
        self.completed_rows = (self.completed_rows + 1).min(self.total_rows);
    }

    pub fn restart(&mut self) {
        self.start = Instant::now();
        self.completed_rows = 0;
    }

    pub fn completed_rows(&self) -> u64 {
        self.completed_rows
    }

    pub fn report(&self) -> ProgressReport {
        ProgressReport::new(self.completed_rows, self.total_rows, self.start.elapsed())
    }
}

/// Snapshot of session progress with linear time estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    pub completed: u64,
    pub total: u64,
    pub elapsed: Duration,
}

impl ProgressReport {
    pub fn new(completed: u64, total: u64, elapsed: Duration) -> Self {
        Self { completed, total, elapsed }
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed as f64 * 100.0 / self.total as f64
    }

    /// Projected total duration; zero until the first row has finished.
    pub fn expected_total(&self) -> Duration {
        if self.completed == 0 {
            return Duration::from_secs(0);
        }
        self.elapsed.mul_f64(self.total as f64 / self.completed as f64)
    }

    pub fn remaining(&self) -> Duration {
        self.expected_total().checked_sub(self.elapsed).unwrap_or_default()
    }
}

fn write_hms(f: &mut fmt::Formatter<'_>, d: Duration) -> fmt::Result {
    let secs = d.as_secs();
    write!(f, "{:3}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

/// `percent elapsed remaining total`, e.g. ` 12.50%   0:00:03   0:00:21   0:00:24`.
impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:6.2}% ", self.percent())?;
        write_hms(f, self.elapsed)?;
        write!(f, " ")?;
        write_hms(f, self.remaining())?;
        write!(f, " ")?;
        write_hms(f, self.expected_total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimates() {
        let report = ProgressReport::new(25, 100, Duration::from_secs(30));
        assert!((report.percent() - 25.0).abs() < 1e-9);
        assert_eq!(report.expected_total(), Duration::from_secs(120));
        assert_eq!(report.remaining(), Duration::from_secs(90));
    }

    #[test]
    fn test_format() {
        let report = ProgressReport::new(1, 8, Duration::from_secs(3725));
        assert_eq!(report.to_string(), " 12.50%   1:02:05   7:14:35   8:16:40");
    }

    #[test]
    fn test_no_rows_yet() {
        let report = ProgressReport::new(0, 10, Duration::from_secs(5));
        assert_eq!(report.expected_total(), Duration::from_secs(0));
        assert_eq!(report.remaining(), Duration::from_secs(0));
        assert_eq!(report.percent(), 0.0);
    }

    #[test]
    fn test_tracker_saturates() {
        let mut tracker = ProgressTracker::new(2);
        for _ in 0..5 {
            tracker.record_row();
        }
        assert_eq!(tracker.completed_rows(), 2);
        assert!((tracker.report().percent() - 100.0).abs() < 1e-9);
        tracker.restart();
        assert_eq!(tracker.completed_rows(), 0);
    }
}
