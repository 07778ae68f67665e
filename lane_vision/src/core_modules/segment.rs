// THEORY:
// The `segment` module holds the plain value types that flow through one frame of
// the lane pipeline. None of them carries behaviour beyond simple geometry; they are
// produced by the line detector, reduced by the aggregator and consumed by the
// overlay renderer, then dropped when the frame is done.
//
// Coordinates are stored as `f64` even though the Hough stage reports integers.
// That keeps malformed input (NaN, infinities) representable so that the
// aggregator and the renderer can reject it explicitly instead of never seeing it.

/// Pixel dimensions of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameGeometry {
    pub width: u32,
    pub height: u32,
}

impl FrameGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A straight line segment in image pixel space, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Builds a segment from the `[x1, y1, x2, y2]` layout line detectors emit.
    pub fn from_endpoints(endpoints: [i32; 4]) -> Self {
        let [x1, y1, x2, y2] = endpoints;
        Self::new(x1 as f64, y1 as f64, x2 as f64, y2 as f64)
    }

    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }

    /// Converts both endpoints to integer pixel positions.
    /// Returns `None` when a coordinate is non-finite or does not fit in `i32`.
    pub fn to_pixels(&self) -> Option<((i32, i32), (i32, i32))> {
        let x1 = to_pixel(self.x1)?;
        let y1 = to_pixel(self.y1)?;
        let x2 = to_pixel(self.x2)?;
        let y2 = to_pixel(self.y2)?;
        Some(((x1, y1), (x2, y2)))
    }
}

fn to_pixel(value: f64) -> Option<i32> {
    if !value.is_finite() || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return None;
    }
    Some(value as i32)
}

/// Which lane boundary a segment was bucketed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneSide {
    /// Strictly negative slope: the line rises toward the right of the image.
    Left,
    /// Zero or positive slope.
    Right,
}

impl LaneSide {
    pub fn of_slope(slope: f64) -> Self {
        if slope < 0.0 { LaneSide::Left } else { LaneSide::Right }
    }
}

/// One reconstructed lane boundary ready for the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneBoundary {
    pub side: LaneSide,
    pub segment: Segment,
}
