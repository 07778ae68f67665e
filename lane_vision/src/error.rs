//! Error types for lane_vision

use thiserror::Error;

/// Numeric failures of the fit-and-reconstruct step. Each one names the
/// division or conversion that could not be carried out.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FitError {
    #[error("vertical segment at x = {x}: slope is undefined")]
    VerticalSegment { x: f64 },

    #[error("averaged slope {slope} is too flat to intersect the lane rows")]
    FlatSlope { slope: f64 },

    #[error("segment has non-finite coordinates")]
    NonFinite,

    #[error("reconstructed coordinate {value} is outside the pixel range")]
    OutOfRange { value: f64 },
}

/// Frame acquisition failures. All of them are recoverable by reopening the device.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("Failed to open camera {index}: {reason}")]
    Open { index: i32, reason: String },

    #[error("Failed to read frame: {0}")]
    Read(String),

    #[error("Camera returned no frame")]
    NoFrame,
}

#[derive(Error, Debug)]
pub enum LaneVisionError {
    #[error("Fit error: {0}")]
    Fit(#[from] FitError),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Detection error: {0}")]
    Detection(String),

    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, LaneVisionError>;
