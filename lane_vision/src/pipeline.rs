// THEORY:
// The `pipeline` module is the top-level API of the lane engine. One call processes
// one frame: the detector turns the frame into raw segments, and the aggregator turns
// those into at most two lane boundaries. The result is a `LaneReport` the caller can
// draw and log.
//
// The detector is a trait so that the image backend (edge detection, masking, Hough)
// stays outside this crate. The pipeline holds no state between frames apart from the
// detector itself.

use tracing::debug;

use crate::core_modules::lane_aggregator::lane_aggregator;
use crate::core_modules::segment::{FrameGeometry, LaneBoundary, LaneSide, Segment};
use crate::error::Result;

// Re-export key data structures for the public API.
pub use crate::core_modules::line_fit::LineFit;
pub use crate::overlay::{DrawSummary, LineCanvas, OverlayStyle};

/// Raw output of the line-detection stage for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Detection {
    pub geometry: FrameGeometry,
    pub segments: Vec<Segment>,
}

/// Turns a frame into raw line segments.
pub trait SegmentDetector {
    type Frame;

    fn detect(&mut self, frame: &Self::Frame) -> Result<Detection>;
}

/// The per-frame outcome of the lane pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaneReport {
    pub geometry: FrameGeometry,
    pub raw_segment_count: usize,
    pub lanes: Vec<LaneBoundary>,
}

impl LaneReport {
    pub fn left(&self) -> Option<&Segment> {
        self.side(LaneSide::Left)
    }

    pub fn right(&self) -> Option<&Segment> {
        self.side(LaneSide::Right)
    }

    fn side(&self, side: LaneSide) -> Option<&Segment> {
        self.lanes.iter().find(|l| l.side == side).map(|l| &l.segment)
    }

    pub fn has_lanes(&self) -> bool {
        !self.lanes.is_empty()
    }
}

pub struct LanePipeline<D: SegmentDetector> {
    detector: D,
    frames_processed: u64,
}

impl<D: SegmentDetector> LanePipeline<D> {
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            frames_processed: 0,
        }
    }

    pub fn generate_report(&mut self, frame: &D::Frame) -> Result<LaneReport> {
        // Stage 1: edges and raw segments
        let detection = self.detector.detect(frame)?;

        // Stage 2: left/right aggregation
        let lanes = lane_aggregator::aggregate(detection.geometry.height, &detection.segments);

        self.frames_processed += 1;
        debug!(
            frame = self.frames_processed,
            segments = detection.segments.len(),
            lanes = lanes.len(),
            "frame processed"
        );

        Ok(LaneReport {
            geometry: detection.geometry,
            raw_segment_count: detection.segments.len(),
            lanes,
        })
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }
}
