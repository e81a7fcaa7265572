use anyhow::Result;
use image::RgbImage;

/// A single detection: bounding box corners in frame-pixel coordinates plus
/// model confidence in [0, 1]. `x1 < x2` and `y1 < y2` are expected from
/// conforming detectors but not enforced here.
#[derive(Debug, Clone, Copy)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub confidence: f32,
}

/// Person detection capability. Implementations wrap a model backend; the
/// counting pipeline only depends on this contract.
pub trait Detector {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>>;
}

/// Placeholder detector that reports no detections. Stands in until a model
/// backend is wired up; the pipeline runs against the same contract either
/// way.
pub struct NullDetector {
    model_name: String,
    conf_threshold: f32,
}

impl NullDetector {
    pub fn new(model_name: &str, conf_threshold: f32) -> Self {
        Self {
            model_name: model_name.to_string(),
            conf_threshold,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn conf_threshold(&self) -> f32 {
        self.conf_threshold
    }
}

impl Detector for NullDetector {
    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<Detection>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_detector_returns_nothing() {
        let mut detector = NullDetector::new("yolov8n", 0.5);
        let frame = RgbImage::new(64, 64);
        let detections = detector.detect(&frame).unwrap();
        assert!(detections.is_empty());
        assert_eq!(detector.model_name(), "yolov8n");
        assert_eq!(detector.conf_threshold(), 0.5);
    }
}
