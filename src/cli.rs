use argh::FromArgs;

/// People counter: counts line crossings in a video stream and exports
/// periodic CSV reports
#[derive(FromArgs, Debug)]
pub struct Args {
    /// source: directory of frame images to process
    #[argh(option, default = "String::from(\"./frames\")")]
    pub source: String,

    /// counting line start point as "x,y"
    #[argh(option, default = "String::from(\"0,360\")")]
    pub line_start: String,

    /// counting line end point as "x,y"
    #[argh(option, default = "String::from(\"1280,360\")")]
    pub line_end: String,

    /// report interval in minutes
    #[argh(option, default = "60")]
    pub interval_minutes: i64,

    /// output directory for CSV reports
    #[argh(option, default = "String::from(\"exports\")")]
    pub output_dir: String,

    /// report filename prefix
    #[argh(option, default = "String::from(\"report\")")]
    pub file_prefix: String,

    /// detector model name
    #[argh(option, default = "String::from(\"yolov8n\")")]
    pub model: String,

    /// detection confidence threshold
    #[argh(option, default = "0.5")]
    pub conf_threshold: f32,

    /// frames a track may go unmatched before it is dropped
    #[argh(option, default = "30")]
    pub max_age: u32,

    /// consecutive matches required before a track is reported
    #[argh(option, default = "3")]
    pub n_init: u32,

    /// maximum centroid distance in pixels for track association
    #[argh(option, default = "75.0")]
    pub max_distance: f32,

    /// frames an identity's last position is remembered after it disappears
    #[argh(option, default = "90")]
    pub max_stale_frames: u64,

    /// wait in milliseconds before retrying when no frame is available
    #[argh(option, default = "50")]
    pub idle_wait_ms: u64,

    /// export the open interval on shutdown instead of discarding it
    #[argh(switch)]
    pub flush_on_exit: bool,
}
