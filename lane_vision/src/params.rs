// THEORY:
// Every tunable in the lane pipeline is a literal constant collected here. There is
// no runtime configuration layer: the values were picked for a consumer webcam
// looking down a road or a taped floor, and changing them means recompiling.
//
// The constants are grouped by the stage that consumes them so that each module
// can `use crate::params::<stage>::*` and nothing else.

/// Frame acquisition.
pub mod camera {
    use std::time::Duration;

    pub const DEVICE_INDEX: i32 = 0;
    pub const FRAME_WIDTH: u32 = 640;
    pub const FRAME_HEIGHT: u32 = 480;
    /// Fixed pause between releasing a failed device and reopening it.
    pub const RECONNECT_DELAY: Duration = Duration::from_secs(1);
}

/// Edge and line detection (Canny + probabilistic Hough).
pub mod detection {
    pub const BLUR_KERNEL: i32 = 5;
    // tuned low for webcam contrast
    pub const CANNY_LOW: f64 = 30.0;
    pub const CANNY_HIGH: f64 = 120.0;
    pub const CANNY_APERTURE: i32 = 3;
    /// Fraction of the frame height where the region of interest starts.
    pub const ROI_TOP_RATIO: f64 = 0.5;
    pub const HOUGH_RHO: f64 = 2.0;
    pub const HOUGH_THETA: f64 = std::f64::consts::PI / 180.0;
    pub const HOUGH_THRESHOLD: i32 = 50;
    pub const HOUGH_MIN_LINE_LENGTH: f64 = 20.0;
    pub const HOUGH_MAX_LINE_GAP: f64 = 10.0;
}

/// Lane aggregation.
pub mod aggregation {
    /// Reconstructed lanes run from the bottom row up to 3/5 of the frame height.
    pub const HORIZON_NUMERATOR: u32 = 3;
    pub const HORIZON_DENOMINATOR: u32 = 5;
    /// Averaged slopes with a smaller magnitude are treated as horizontal.
    pub const DEGENERATE_SLOPE: f64 = 1e-9;
}

/// Overlay rendering, colours in BGR order.
pub mod overlay {
    pub const LANE_COLOR: [f64; 3] = [0.0, 255.0, 0.0];
    pub const LANE_THICKNESS: i32 = 5;
    pub const FRAME_WEIGHT: f64 = 0.8;
    pub const OVERLAY_WEIGHT: f64 = 1.0;
    pub const BLEND_GAMMA: f64 = 1.0;
}

/// Display window.
pub mod window {
    pub const TITLE: &str = "Lane Detection";
    pub const QUIT_KEY: char = 'q';
    pub const KEY_POLL_MS: i32 = 1;
}
