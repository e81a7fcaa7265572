use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

/// One exported report line. Totals are cumulative across the whole run,
/// not per-window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRow {
    /// Unix timestamp in seconds
    pub timestamp: f64,
    pub in_count: u64,
    pub out_count: u64,
    pub total_in: u64,
    pub total_out: u64,
    pub confidence_mean: f64,
}

/// Writes count reports as CSV files, one file per export.
pub struct CsvExporter {
    output_dir: PathBuf,
    /// Per-exporter sequence number appended to filenames so rapid
    /// successive exports within the same second never collide
    sequence: u64,
}

impl CsvExporter {
    /// Creates the output directory if needed; an unusable path fails here,
    /// at startup, rather than on the first export.
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("cannot create output directory {}", output_dir.display()))?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            sequence: 0,
        })
    }

    /// Writes the rows to a new timestamped CSV file and returns its path.
    pub fn export(&mut self, rows: &[ReportRow], file_prefix: &str) -> Result<PathBuf> {
        let date_str = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let filename = format!("{}_{}_{:04}.csv", file_prefix, date_str, self.sequence);
        let path = self.output_dir.join(filename);

        let file = File::create(&path)
            .with_context(|| format!("cannot create report file {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        writeln!(
            writer,
            "timestamp,in_count,out_count,total_in_day,total_out_day,confidence_mean"
        )?;
        for row in rows {
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                row.timestamp,
                row.in_count,
                row.out_count,
                row.total_in,
                row.total_out,
                row.confidence_mean
            )?;
        }
        writer.flush()?;

        self.sequence += 1;
        Ok(path)
    }
}
