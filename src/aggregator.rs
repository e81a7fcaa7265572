use chrono::{DateTime, Duration, Local};

/// One per-frame snapshot of the running counts. Append order is time order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountSample {
    /// Unix timestamp in seconds
    pub timestamp: f64,
    pub in_count: u64,
    pub out_count: u64,
}

/// Buffers count samples over a fixed-duration window and decides when the
/// window has elapsed and a report should be flushed.
pub struct IntervalAggregator {
    interval: Duration,
    window_start: DateTime<Local>,
    samples: Vec<CountSample>,
}

impl IntervalAggregator {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            window_start: Local::now(),
            samples: Vec::new(),
        }
    }

    /// Appends a count sample. No deduplication or ordering checks; callers
    /// append once per processed frame in increasing timestamp order.
    pub fn add_sample(&mut self, timestamp: f64, in_count: u64, out_count: u64) {
        self.samples.push(CountSample {
            timestamp,
            in_count,
            out_count,
        });
    }

    /// True once the interval has elapsed since the window started. Pure
    /// and idempotent; calling it never changes state.
    pub fn should_export(&self) -> bool {
        self.should_export_at(Local::now())
    }

    fn should_export_at(&self, now: DateTime<Local>) -> bool {
        now - self.window_start >= self.interval
    }

    /// Starts the next window and clears the buffer. Must be called exactly
    /// once per export, after the export has been confirmed, or buffered
    /// samples are lost.
    pub fn reset(&mut self) {
        self.window_start = Local::now();
        self.samples.clear();
    }

    /// Buffered samples in insertion order
    pub fn samples(&self) -> &[CountSample] {
        &self.samples
    }

    pub fn window_start(&self) -> DateTime<Local> {
        self.window_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_export_false_when_new() {
        let aggregator = IntervalAggregator::new(Duration::minutes(60));
        assert!(!aggregator.should_export());
    }

    #[test]
    fn test_should_export_after_interval_elapses() {
        let aggregator = IntervalAggregator::new(Duration::minutes(60));
        let start = aggregator.window_start();
        assert!(!aggregator.should_export_at(start + Duration::minutes(59)));
        // Boundary is inclusive
        assert!(aggregator.should_export_at(start + Duration::minutes(60)));
        assert!(aggregator.should_export_at(start + Duration::minutes(61)));
    }

    #[test]
    fn test_should_export_is_idempotent() {
        let aggregator = IntervalAggregator::new(Duration::zero());
        assert!(aggregator.should_export());
        assert!(aggregator.should_export());
        assert!(aggregator.samples().is_empty());
    }

    #[test]
    fn test_samples_kept_in_insertion_order() {
        let mut aggregator = IntervalAggregator::new(Duration::minutes(1));
        aggregator.add_sample(1.0, 0, 0);
        aggregator.add_sample(2.0, 1, 0);
        aggregator.add_sample(3.0, 1, 2);

        let samples = aggregator.samples();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].timestamp, 1.0);
        assert_eq!(samples[1].in_count, 1);
        assert_eq!(samples[2].out_count, 2);
    }

    #[test]
    fn test_reset_clears_buffer_and_restarts_window() {
        let mut aggregator = IntervalAggregator::new(Duration::minutes(60));
        aggregator.add_sample(1.0, 1, 1);
        let first_start = aggregator.window_start();

        aggregator.reset();
        assert!(aggregator.samples().is_empty());
        assert!(aggregator.window_start() >= first_start);
        assert!(!aggregator.should_export());
    }
}
