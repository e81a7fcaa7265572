use std::collections::HashMap;

use crate::detector::Detection;
use crate::geometry::{self, Point};

/// A tracked object for one frame: a stable identity plus its bounding box.
/// Identity is unique while the track is live; ids may be recycled after a
/// track is dropped.
#[derive(Debug, Clone, Copy)]
pub struct TrackedObject {
    pub id: u64,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Multi-object tracking capability: associates per-frame detections with
/// stable identities. Identity stability for the same physical object is
/// this collaborator's contract.
pub trait Tracker {
    fn update(&mut self, detections: &[Detection]) -> Vec<TrackedObject>;
}

/// Internal per-track state
#[derive(Debug, Clone, Copy)]
struct Track {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    /// Consecutive frames matched since creation
    hits: u32,
    /// Consecutive frames without a match
    misses: u32,
}

impl Track {
    fn centroid(&self) -> Point {
        geometry::centroid(self.x1, self.y1, self.x2, self.y2)
    }
}

/// Greedy nearest-centroid tracker.
///
/// Each detection is matched to the closest live track centroid within
/// `max_distance`. Tracks unmatched for more than `max_age` frames are
/// dropped; tracks are only reported once they have been matched on
/// `n_init` consecutive frames, which suppresses one-frame detector noise.
pub struct CentroidTracker {
    tracks: HashMap<u64, Track>,
    next_id: u64,
    max_age: u32,
    n_init: u32,
    max_distance: f32,
}

impl CentroidTracker {
    pub fn new(max_age: u32, n_init: u32, max_distance: f32) -> Self {
        Self {
            tracks: HashMap::new(),
            next_id: 1,
            max_age,
            n_init,
            max_distance,
        }
    }

    /// Number of live tracks, confirmed or not
    pub fn active_tracks(&self) -> usize {
        self.tracks.len()
    }
}

impl Tracker for CentroidTracker {
    fn update(&mut self, detections: &[Detection]) -> Vec<TrackedObject> {
        let mut matched_tracks: Vec<u64> = Vec::new();
        let mut unmatched_detections: Vec<&Detection> = Vec::new();

        // Greedily match each detection to the nearest unclaimed track
        for det in detections {
            let det_centroid = geometry::centroid(det.x1, det.y1, det.x2, det.y2);
            let nearest = self
                .tracks
                .iter()
                .filter(|(id, _)| !matched_tracks.contains(id))
                .map(|(id, track)| {
                    let c = track.centroid();
                    let dx = c.x - det_centroid.x;
                    let dy = c.y - det_centroid.y;
                    (*id, (dx * dx + dy * dy).sqrt())
                })
                .filter(|(_, dist)| *dist <= self.max_distance)
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

            match nearest {
                Some((id, _)) => {
                    if let Some(track) = self.tracks.get_mut(&id) {
                        track.x1 = det.x1;
                        track.y1 = det.y1;
                        track.x2 = det.x2;
                        track.y2 = det.y2;
                        track.hits += 1;
                        track.misses = 0;
                    }
                    matched_tracks.push(id);
                }
                None => unmatched_detections.push(det),
            }
        }

        // Age out tracks that went unmatched this frame
        for (id, track) in self.tracks.iter_mut() {
            if !matched_tracks.contains(id) {
                track.misses += 1;
            }
        }
        let max_age = self.max_age;
        self.tracks.retain(|_, track| track.misses <= max_age);

        // Spawn new tracks for leftover detections
        for det in unmatched_detections {
            let id = self.next_id;
            self.next_id += 1;
            self.tracks.insert(
                id,
                Track {
                    x1: det.x1,
                    y1: det.y1,
                    x2: det.x2,
                    y2: det.y2,
                    hits: 1,
                    misses: 0,
                },
            );
        }

        // Report confirmed tracks that were seen this frame
        let mut out: Vec<TrackedObject> = self
            .tracks
            .iter()
            .filter(|(_, track)| track.misses == 0 && track.hits >= self.n_init)
            .map(|(id, track)| TrackedObject {
                id: *id,
                x1: track.x1,
                y1: track.y1,
                x2: track.x2,
                y2: track.y2,
            })
            .collect();
        out.sort_by_key(|t| t.id);
        out
    }
}
