// THEORY:
// This file is the entry point for the `lane_vision` library crate. It exposes the
// lane engine that the viewer binary drives: the per-frame `LanePipeline`, the lane
// aggregator at its core, the overlay drawing policy and the reconnecting frame
// source.
//
// The crate does not link any image library. Everything that touches pixels (edge
// detection, Hough, drawing, display, the camera itself) is reached through the
// traits defined here and implemented by the binary, which keeps every rule in this
// crate testable without a camera.

pub mod core_modules;
pub mod error;
pub mod frame_source;
pub mod overlay;
pub mod params;
pub mod pipeline;

pub use core_modules::segment::{FrameGeometry, LaneBoundary, LaneSide, Segment};
pub use error::{CaptureError, FitError, LaneVisionError};
