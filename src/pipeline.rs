use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration as StdDuration;

use anyhow::Result;
use chrono::Local;

use crate::aggregator::IntervalAggregator;
use crate::config::PipelineConfig;
use crate::counter::LineCounter;
use crate::detector::Detector;
use crate::exporter::{CsvExporter, ReportRow};
use crate::progress::CountProgressTracker;
use crate::tracker::Tracker;
use crate::util::debug_println;
use crate::video_source::FrameSource;

/// Confidence is not yet folded into counts; reports carry a fixed value
const CONFIDENCE_PLACEHOLDER: f64 = 1.0;

/// Drives the counting pipeline: one frame at a time through detection,
/// tracking, line counting and interval aggregation, flushing a CSV report
/// whenever the interval elapses.
///
/// Each pipeline instance exclusively owns its counter, aggregator and
/// grand totals, so multiple instances (one per camera) run independently.
pub struct CountingPipeline {
    counter: LineCounter,
    aggregator: IntervalAggregator,
    exporter: CsvExporter,
    file_prefix: String,
    idle_wait: StdDuration,
    flush_on_exit: bool,
    cancel: Arc<AtomicBool>,
    total_in: u64,
    total_out: u64,
    exported: Vec<PathBuf>,
}

impl CountingPipeline {
    pub fn new(config: &PipelineConfig, exporter: CsvExporter, cancel: Arc<AtomicBool>) -> Self {
        Self {
            counter: LineCounter::new(config.line, config.max_stale_frames),
            aggregator: IntervalAggregator::new(config.interval),
            exporter,
            file_prefix: config.file_prefix.clone(),
            idle_wait: config.idle_wait,
            flush_on_exit: config.flush_on_exit,
            cancel,
            total_in: 0,
            total_out: 0,
            exported: Vec::new(),
        }
    }

    /// Runs the counting loop until the cancellation flag is set.
    ///
    /// A missing frame is an acquisition gap: the loop sleeps `idle_wait`
    /// and retries. Detector errors are not masked; they abort the run. An
    /// export failure also aborts, leaving the aggregator un-reset so the
    /// buffered window is not lost silently.
    pub async fn run<S, D, T>(
        &mut self,
        source: &mut S,
        detector: &mut D,
        tracker: &mut T,
    ) -> Result<()>
    where
        S: FrameSource,
        D: Detector,
        T: Tracker,
    {
        let mut progress = CountProgressTracker::new("counting");

        let result = loop {
            if self.cancel.load(Ordering::Relaxed) {
                break Ok(());
            }

            let Some(frame) = source.read() else {
                tokio::time::sleep(self.idle_wait).await;
                continue;
            };

            let detections = match detector.detect(&frame) {
                Ok(detections) => detections,
                Err(err) => break Err(err),
            };
            let tracks = tracker.update(&detections);
            self.counter.update(&tracks);

            let in_count = self.counter.in_count();
            let out_count = self.counter.out_count();
            let timestamp = Local::now().timestamp_millis() as f64 / 1000.0;
            self.aggregator.add_sample(timestamp, in_count, out_count);

            // The counter is monotone and never reset, so its latest
            // snapshot is the run-wide grand total
            self.total_in = in_count;
            self.total_out = out_count;

            progress.update_frame(in_count, out_count);
            debug_println(format_args!(
                "frame: {} tracks, in={} out={}",
                tracks.len(),
                in_count,
                out_count
            ));

            if self.aggregator.should_export() {
                match self.flush() {
                    Ok(Some(path)) => println!("Exported report to {}", path.display()),
                    Ok(None) => {}
                    Err(err) => break Err(err),
                }
            }
        };

        if result.is_ok() && self.flush_on_exit {
            if let Some(path) = self.flush()? {
                println!("Exported final report to {}", path.display());
            }
        }

        progress.finish();
        source.release();
        result
    }

    /// Builds one report row per buffered sample, embedding the grand
    /// totals as of export time into every row, writes the batch, then
    /// resets the aggregator. The reset only happens once the export has
    /// succeeded.
    fn flush(&mut self) -> Result<Option<PathBuf>> {
        if self.aggregator.samples().is_empty() {
            return Ok(None);
        }

        let rows: Vec<ReportRow> = self
            .aggregator
            .samples()
            .iter()
            .map(|sample| ReportRow {
                timestamp: sample.timestamp,
                in_count: sample.in_count,
                out_count: sample.out_count,
                total_in: self.total_in,
                total_out: self.total_out,
                confidence_mean: CONFIDENCE_PLACEHOLDER,
            })
            .collect();

        let path = self.exporter.export(&rows, &self.file_prefix)?;
        self.aggregator.reset();
        self.exported.push(path.clone());
        Ok(Some(path))
    }

    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    /// Paths of all reports exported so far, in export order
    pub fn exported(&self) -> &[PathBuf] {
        &self.exported
    }
}
