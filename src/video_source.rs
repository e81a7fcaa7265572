use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbImage;

use crate::util::debug_println;

/// Frame acquisition capability. `read` returns the next frame or `None`
/// when no frame is currently available (end of a file source, or a camera
/// gap); `release` frees the underlying resource and may be called more
/// than once.
pub trait FrameSource {
    fn read(&mut self) -> Option<RgbImage>;
    fn release(&mut self);
}

/// Frame source backed by a directory of image files, consumed in
/// lexicographic order. Useful for offline runs and tests; a camera-backed
/// source plugs in behind the same trait.
pub struct ImageDirSource {
    frames: Vec<PathBuf>,
    position: usize,
    released: bool,
}

impl ImageDirSource {
    /// Lists the directory up front; a missing or unreadable directory is a
    /// configuration error and fails here.
    pub fn new(dir: &Path) -> Result<Self> {
        let mut frames: Vec<PathBuf> = fs::read_dir(dir)
            .with_context(|| format!("cannot open frame directory {}", dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        frames.sort();
        Ok(Self {
            frames,
            position: 0,
            released: false,
        })
    }

    pub fn remaining(&self) -> usize {
        self.frames.len().saturating_sub(self.position)
    }
}

impl FrameSource for ImageDirSource {
    fn read(&mut self) -> Option<RgbImage> {
        if self.released {
            return None;
        }
        while self.position < self.frames.len() {
            let path = self.frames[self.position].clone();
            self.position += 1;
            match image::open(&path) {
                Ok(img) => return Some(img.to_rgb8()),
                Err(err) => {
                    // Unreadable file is an acquisition gap, not a failure
                    debug_println(format_args!(
                        "skipping unreadable frame {}: {}",
                        path.display(),
                        err
                    ));
                }
            }
        }
        None
    }

    fn release(&mut self) {
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_frame(dir: &Path, name: &str) {
        let img = RgbImage::new(8, 8);
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_reads_frames_in_order_then_none() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "frame_002.png");
        write_frame(dir.path(), "frame_001.png");

        let mut source = ImageDirSource::new(dir.path()).unwrap();
        assert_eq!(source.remaining(), 2);
        assert!(source.read().is_some());
        assert!(source.read().is_some());
        assert!(source.read().is_none());
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a_not_an_image.png"), b"junk").unwrap();
        write_frame(dir.path(), "frame_001.png");

        let mut source = ImageDirSource::new(dir.path()).unwrap();
        assert!(source.read().is_some());
        assert!(source.read().is_none());
    }

    #[test]
    fn test_release_is_idempotent_and_stops_reads() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "frame_001.png");

        let mut source = ImageDirSource::new(dir.path()).unwrap();
        source.release();
        source.release();
        assert!(source.read().is_none());
    }

    #[test]
    fn test_missing_directory_fails() {
        assert!(ImageDirSource::new(Path::new("/nonexistent/frames")).is_err());
    }
}
