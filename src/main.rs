use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;

use gatecount::cli::Args;
use gatecount::config;
use gatecount::detector::NullDetector;
use gatecount::exporter::CsvExporter;
use gatecount::pipeline::CountingPipeline;
use gatecount::tracker::CentroidTracker;
use gatecount::video_source::ImageDirSource;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = argh::from_env();

    let config = config::build_pipeline_config(&args)?;

    let mut source = ImageDirSource::new(Path::new(&args.source))?;
    let mut detector = NullDetector::new(&args.model, args.conf_threshold);
    let mut tracker = CentroidTracker::new(args.max_age, args.n_init, args.max_distance);
    let exporter = CsvExporter::new(Path::new(&args.output_dir))?;
    println!("Writing reports to: {}", args.output_dir);

    // Cooperative cancellation: the loop checks this flag once per
    // iteration boundary
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                println!("Interrupt received, stopping...");
                cancel.store(true, Ordering::Relaxed);
            }
        });
    }

    let mut pipeline = CountingPipeline::new(&config, exporter, cancel);
    pipeline.run(&mut source, &mut detector, &mut tracker).await?;

    println!(
        "Final totals: {} in / {} out across {} reports",
        pipeline.total_in(),
        pipeline.total_out(),
        pipeline.exported().len()
    );

    Ok(())
}
