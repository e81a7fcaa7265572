use std::collections::HashMap;

use crate::geometry::{self, Direction, Line, Point};
use crate::tracker::TrackedObject;

/// Last-known centroid for a tracked identity, tagged with the frame it was
/// last seen on so stale entries can be swept.
#[derive(Debug, Clone, Copy)]
struct IdentityState {
    centroid: Point,
    last_seen_frame: u64,
}

/// Counts objects crossing the line by comparing each identity's centroid
/// against its position on the previous frame.
pub struct LineCounter {
    line: Line,
    in_count: u64,
    out_count: u64,
    identities: HashMap<u64, IdentityState>,
    frame_index: u64,
    max_stale_frames: u64,
}

impl LineCounter {
    /// Creates a counter for the given line. `max_stale_frames` bounds how
    /// long an identity's last position is remembered after the tracker
    /// stops reporting it; this should mirror the tracker's max age so a
    /// recycled id never inherits the previous object's position.
    pub fn new(line: Line, max_stale_frames: u64) -> Self {
        Self {
            line,
            in_count: 0,
            out_count: 0,
            identities: HashMap::new(),
            frame_index: 0,
            max_stale_frames,
        }
    }

    /// Updates the counter with one frame of tracked objects.
    ///
    /// Each identity contributes at most one crossing per call since only
    /// its previous and current centroids are compared. Identities absent
    /// from `tracked_objects` keep their stored centroid until they
    /// reappear or age out.
    pub fn update(&mut self, tracked_objects: &[TrackedObject]) {
        self.frame_index += 1;

        for obj in tracked_objects {
            let curr = geometry::centroid(obj.x1, obj.y1, obj.x2, obj.y2);
            if let Some(state) = self.identities.get(&obj.id) {
                match geometry::crossing(&self.line, state.centroid, curr) {
                    Direction::Entering => self.in_count += 1,
                    Direction::Exiting => self.out_count += 1,
                    Direction::None => {}
                }
            }
            self.identities.insert(
                obj.id,
                IdentityState {
                    centroid: curr,
                    last_seen_frame: self.frame_index,
                },
            );
        }

        self.sweep_stale();
    }

    /// Drops identities not seen within the last `max_stale_frames` frames
    fn sweep_stale(&mut self) {
        let frame = self.frame_index;
        let max_stale = self.max_stale_frames;
        self.identities
            .retain(|_, state| frame - state.last_seen_frame <= max_stale);
    }

    pub fn in_count(&self) -> u64 {
        self.in_count
    }

    pub fn out_count(&self) -> u64 {
        self.out_count
    }

    /// Number of identities currently remembered
    pub fn tracked_identities(&self) -> usize {
        self.identities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_line() -> Line {
        Line::new(Point::new(0.0, 50.0), Point::new(100.0, 50.0)).unwrap()
    }

    fn object(id: u64, cx: f32, cy: f32) -> TrackedObject {
        // 10x10 box centered on (cx, cy)
        TrackedObject {
            id,
            x1: cx - 5.0,
            y1: cy - 5.0,
            x2: cx + 5.0,
            y2: cy + 5.0,
        }
    }

    #[test]
    fn test_empty_update_never_changes_counts() {
        let mut counter = LineCounter::new(test_line(), 30);
        counter.update(&[object(1, 50.0, 40.0)]);
        counter.update(&[]);
        counter.update(&[]);
        assert_eq!(counter.in_count(), 0);
        assert_eq!(counter.out_count(), 0);
    }

    #[test]
    fn test_single_crossing_increments_exactly_one_counter() {
        let mut counter = LineCounter::new(test_line(), 30);
        counter.update(&[object(1, 50.0, 40.0)]);
        counter.update(&[object(1, 50.0, 60.0)]);
        assert_eq!(counter.out_count(), 1);
        assert_eq!(counter.in_count(), 0);
    }

    #[test]
    fn test_reverse_crossing_increments_other_counter() {
        let mut counter = LineCounter::new(test_line(), 30);
        counter.update(&[object(1, 50.0, 60.0)]);
        counter.update(&[object(1, 50.0, 40.0)]);
        assert_eq!(counter.in_count(), 1);
        assert_eq!(counter.out_count(), 0);
    }

    #[test]
    fn test_same_side_movement_does_not_count() {
        let mut counter = LineCounter::new(test_line(), 30);
        counter.update(&[object(1, 50.0, 40.0)]);
        counter.update(&[object(1, 50.0, 45.0)]);
        assert_eq!(counter.in_count(), 0);
        assert_eq!(counter.out_count(), 0);
    }

    #[test]
    fn test_first_sighting_establishes_baseline_without_counting() {
        let mut counter = LineCounter::new(test_line(), 30);
        // First frame the identity appears already past the line; nothing
        // to compare against, so no count
        counter.update(&[object(1, 50.0, 60.0)]);
        assert_eq!(counter.in_count(), 0);
        assert_eq!(counter.out_count(), 0);
    }

    #[test]
    fn test_opposite_crossings_in_one_update() {
        let mut counter = LineCounter::new(test_line(), 30);
        counter.update(&[object(1, 50.0, 40.0), object(2, 50.0, 60.0)]);
        counter.update(&[object(1, 50.0, 60.0), object(2, 50.0, 40.0)]);
        assert_eq!(counter.in_count(), 1);
        assert_eq!(counter.out_count(), 1);
    }

    #[test]
    fn test_crossing_counted_once_across_many_frames() {
        let mut counter = LineCounter::new(test_line(), 30);
        let path = [30.0, 40.0, 45.0, 60.0, 70.0, 80.0];
        for y in path {
            counter.update(&[object(1, 50.0, y)]);
        }
        assert_eq!(counter.out_count(), 1);
        assert_eq!(counter.in_count(), 0);
    }

    #[test]
    fn test_absent_identity_keeps_centroid_until_stale() {
        let mut counter = LineCounter::new(test_line(), 3);
        counter.update(&[object(1, 50.0, 40.0)]);
        // Gone for two frames, within the stale bound
        counter.update(&[]);
        counter.update(&[]);
        assert_eq!(counter.tracked_identities(), 1);
        // Reappears on the far side: still counts, memory survived the gap
        counter.update(&[object(1, 50.0, 60.0)]);
        assert_eq!(counter.out_count(), 1);
    }

    #[test]
    fn test_stale_identity_is_swept() {
        let mut counter = LineCounter::new(test_line(), 2);
        counter.update(&[object(1, 50.0, 40.0)]);
        for _ in 0..3 {
            counter.update(&[]);
        }
        assert_eq!(counter.tracked_identities(), 0);
        // Reused id starts fresh: no crossing against the old position
        counter.update(&[object(1, 50.0, 60.0)]);
        assert_eq!(counter.in_count(), 0);
        assert_eq!(counter.out_count(), 0);
    }
}
