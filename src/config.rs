use std::time::Duration as StdDuration;

use anyhow::{Context, Result, bail};
use chrono::Duration;

use crate::cli::Args;
use crate::geometry::{Line, Point};

/// Validated pipeline configuration derived from command line arguments
pub struct PipelineConfig {
    pub line: Line,
    pub interval: Duration,
    pub idle_wait: StdDuration,
    pub max_stale_frames: u64,
    pub flush_on_exit: bool,
    pub file_prefix: String,
}

/// Builds the pipeline configuration from command line arguments.
/// Configuration errors (degenerate line, non-positive interval) fail here,
/// at startup, not mid-stream.
pub fn build_pipeline_config(args: &Args) -> Result<PipelineConfig> {
    let start = parse_point(&args.line_start)
        .with_context(|| format!("invalid --line-start '{}'", args.line_start))?;
    let end = parse_point(&args.line_end)
        .with_context(|| format!("invalid --line-end '{}'", args.line_end))?;
    let line = Line::new(start, end)?;

    if args.interval_minutes <= 0 {
        bail!(
            "report interval must be positive, got {} minutes",
            args.interval_minutes
        );
    }

    Ok(PipelineConfig {
        line,
        interval: Duration::minutes(args.interval_minutes),
        idle_wait: StdDuration::from_millis(args.idle_wait_ms),
        max_stale_frames: args.max_stale_frames,
        flush_on_exit: args.flush_on_exit,
        file_prefix: args.file_prefix.clone(),
    })
}

/// Parses an "x,y" coordinate pair
fn parse_point(value: &str) -> Result<Point> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 2 {
        bail!("expected 'x,y', got '{}'", value);
    }
    let x: f32 = parts[0].trim().parse()?;
    let y: f32 = parts[1].trim().parse()?;
    Ok(Point::new(x, y))
}
