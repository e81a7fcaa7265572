use anyhow::{Result, bail};

/// A 2D point in frame-pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The counting line, defined by two distinct points in frame-pixel coordinates
#[derive(Debug, Clone, Copy)]
pub struct Line {
    start: Point,
    end: Point,
}

impl Line {
    /// Creates a counting line. A degenerate line (start == end) is a
    /// configuration error and is rejected here rather than mid-stream.
    pub fn new(start: Point, end: Point) -> Result<Self> {
        if start == end {
            bail!(
                "degenerate counting line: start and end are both ({}, {})",
                start.x,
                start.y
            );
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

/// The outcome of a single crossing test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Entering,
    Exiting,
    None,
}

/// Computes the centroid of an (x1, y1, x2, y2) bounding box
pub fn centroid(x1: f32, y1: f32, x2: f32, y2: f32) -> Point {
    Point::new((x1 + x2) / 2.0, (y1 + y2) / 2.0)
}

/// Tests whether a point moving from `prev` to `curr` crossed the line,
/// and in which direction.
///
/// The side of a point is the dot product of its offset from the line start
/// with the line's perpendicular vector. A sign change between the two
/// samples is a crossing. Points exactly on the line (side == 0) fall into
/// the non-strict branch, so a stationary point sitting on the line never
/// generates opposite-direction events on successive frames. The inequality
/// placement (`>=`/`<` vs `<=`/`>`) must stay exactly as written to keep
/// that property.
pub fn crossing(line: &Line, prev: Point, curr: Point) -> Direction {
    let dx = line.end().x - line.start().x;
    let dy = line.end().y - line.start().y;
    // Perpendicular to the line direction
    let px = -dy;
    let py = dx;

    let side = |q: Point| (q.x - line.start().x) * px + (q.y - line.start().y) * py;

    let s_prev = side(prev);
    let s_curr = side(curr);

    if s_prev >= 0.0 && s_curr < 0.0 {
        Direction::Entering
    } else if s_prev <= 0.0 && s_curr > 0.0 {
        Direction::Exiting
    } else {
        Direction::None
    }
}
