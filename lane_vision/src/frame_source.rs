// THEORY:
// The frame source hands the main loop one frame per call and hides every
// acquisition failure behind a bare reconnect loop. When the device fails to open,
// errors on read, or returns an empty frame, the handle is released, the loop sleeps
// for a fixed delay and then reopens the device with the same settings. It retries
// forever: there is no backoff growth and no failure cap.
//
// The device itself is abstracted behind two small traits so that the policy can be
// exercised without a camera:
// - `DeviceOpener` creates a device from `CaptureSettings`.
// - `FrameGrabber` reads frames from an open device and releases it.
//
// The source exclusively owns the current device and replaces it wholesale on failure.

use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::CaptureError;
use crate::params::camera::{DEVICE_INDEX, FRAME_HEIGHT, FRAME_WIDTH, RECONNECT_DELAY};

/// What to open and at which resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    pub device_index: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            device_index: DEVICE_INDEX,
            width: FRAME_WIDTH,
            height: FRAME_HEIGHT,
        }
    }
}

/// An open capture device.
pub trait FrameGrabber {
    type Frame;

    /// Reads the next frame. An empty read is reported as `CaptureError::NoFrame`.
    fn grab(&mut self) -> Result<Self::Frame, CaptureError>;

    /// Gives the underlying device back to the system.
    fn release(&mut self);
}

pub trait DeviceOpener {
    type Grabber: FrameGrabber;

    fn open(&mut self, settings: &CaptureSettings) -> Result<Self::Grabber, CaptureError>;
}

pub type FrameOf<O> = <<O as DeviceOpener>::Grabber as FrameGrabber>::Frame;

/// A frame source that never gives up on its device.
pub struct ReconnectingSource<O: DeviceOpener> {
    opener: O,
    settings: CaptureSettings,
    device: Option<O::Grabber>,
    retry_delay: Duration,
    reconnects: u64,
}

impl<O: DeviceOpener> ReconnectingSource<O> {
    /// Creates the source. The device is opened on the first call to `next_frame`.
    pub fn new(opener: O, settings: CaptureSettings) -> Self {
        Self {
            opener,
            settings,
            device: None,
            retry_delay: RECONNECT_DELAY,
            reconnects: 0,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn settings(&self) -> &CaptureSettings {
        &self.settings
    }

    /// Number of release-and-reopen cycles performed so far.
    pub fn reconnects(&self) -> u64 {
        self.reconnects
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    /// Blocks until a frame is available, reconnecting as often as needed.
    /// Every failed open or read costs exactly one `retry_delay` before the next open.
    pub fn next_frame(&mut self) -> FrameOf<O> {
        loop {
            let failure = match self.device.as_mut() {
                Some(device) => match device.grab() {
                    Ok(frame) => return frame,
                    Err(e) => e,
                },
                None => match self.opener.open(&self.settings) {
                    Ok(device) => {
                        info!(
                            "Camera {} opened at {}x{}",
                            self.settings.device_index, self.settings.width, self.settings.height
                        );
                        self.device = Some(device);
                        continue;
                    }
                    Err(e) => e,
                },
            };
            self.reconnect(&failure);
        }
    }

    fn reconnect(&mut self, failure: &CaptureError) {
        warn!(
            "Camera {} unavailable ({}), reconnecting in {:?}",
            self.settings.device_index, failure, self.retry_delay
        );
        self.release();
        thread::sleep(self.retry_delay);
        self.reconnects += 1;
    }

    /// Releases the current device, if any. The next `next_frame` reopens it.
    pub fn release(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.release();
        }
    }
}

impl<O: DeviceOpener> Drop for ReconnectingSource<O> {
    fn drop(&mut self) {
        self.release();
    }
}
