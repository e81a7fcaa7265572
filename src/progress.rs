use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Progress tracker for the counting loop. The frame total is unknown for a
/// live stream, so this is a spinner with running counts in the message.
pub struct CountProgressTracker {
    progress_bar: ProgressBar,
    start_time: Instant,
    processed_frames: u64,
}

impl CountProgressTracker {
    pub fn new(operation_name: &str) -> Self {
        let progress_bar = ProgressBar::new_spinner();

        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} frames | {msg}")
            .unwrap();

        progress_bar.set_style(style);
        progress_bar.set_message(format!("Processing {}", operation_name));

        Self {
            progress_bar,
            start_time: Instant::now(),
            processed_frames: 0,
        }
    }

    /// Advances the tracker by one frame and refreshes the count display
    pub fn update_frame(&mut self, in_count: u64, out_count: u64) {
        self.processed_frames += 1;
        self.progress_bar.inc(1);

        let elapsed = self.start_time.elapsed();
        let current_fps = self.processed_frames as f64 / elapsed.as_secs_f64();
        self.progress_bar.set_message(format!(
            "in: {} | out: {} | Speed: {:.1} fps",
            in_count, out_count, current_fps
        ));
    }

    /// Finishes the progress bar with a summary message
    pub fn finish(&self) {
        let total_time = self.start_time.elapsed();
        let avg_fps = self.processed_frames as f64 / total_time.as_secs_f64();
        self.progress_bar.finish_with_message(format!(
            "Completed! Frames: {} | Avg FPS: {:.1}",
            self.processed_frames, avg_fps
        ));
    }

    pub fn processed_frames(&self) -> u64 {
        self.processed_frames
    }
}
