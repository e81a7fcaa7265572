pub mod aggregator;
pub mod cli;
pub mod config;
pub mod counter;
pub mod detector;
pub mod exporter;
pub mod geometry;
pub mod pipeline;
pub mod progress;
pub mod tracker;
pub mod util;
pub mod video_source;
