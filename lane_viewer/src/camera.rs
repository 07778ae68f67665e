//! OpenCV webcam device behind the library's frame-source traits.

use lane_vision::error::CaptureError;
use lane_vision::frame_source::{CaptureSettings, DeviceOpener, FrameGrabber};
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
};
use tracing::{debug, warn};

/// Windows webcams are opened through DirectShow.
#[cfg(windows)]
const CAPTURE_BACKEND: i32 = videoio::CAP_DSHOW;
#[cfg(not(windows))]
const CAPTURE_BACKEND: i32 = videoio::CAP_ANY;

pub struct OpenCvCamera {
    capture: VideoCapture,
}

impl FrameGrabber for OpenCvCamera {
    type Frame = Mat;

    fn grab(&mut self) -> Result<Mat, CaptureError> {
        let mut frame = Mat::default();
        let grabbed = self
            .capture
            .read(&mut frame)
            .map_err(|e| CaptureError::Read(e.message))?;
        if !grabbed || frame.empty() {
            return Err(CaptureError::NoFrame);
        }
        Ok(frame)
    }

    fn release(&mut self) {
        if let Err(e) = self.capture.release() {
            warn!("Failed to release camera: {}", e);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OpenCvOpener {
    backend: i32,
}

impl Default for OpenCvOpener {
    fn default() -> Self {
        Self {
            backend: CAPTURE_BACKEND,
        }
    }
}

impl DeviceOpener for OpenCvOpener {
    type Grabber = OpenCvCamera;

    fn open(&mut self, settings: &CaptureSettings) -> Result<OpenCvCamera, CaptureError> {
        let open_error = |reason: String| CaptureError::Open {
            index: settings.device_index,
            reason,
        };

        let mut capture = VideoCapture::new(settings.device_index, self.backend)
            .map_err(|e| open_error(e.message))?;
        if !capture.is_opened().map_err(|e| open_error(e.message))? {
            return Err(open_error("device did not open".to_string()));
        }

        // The driver may pick a different mode; the frame size is read per frame downstream.
        capture
            .set(CAP_PROP_FRAME_WIDTH, settings.width as f64)
            .map_err(|e| open_error(format!("Failed to set width: {}", e)))?;
        capture
            .set(CAP_PROP_FRAME_HEIGHT, settings.height as f64)
            .map_err(|e| open_error(format!("Failed to set height: {}", e)))?;

        debug!(
            "Requested {}x{} from camera {}",
            settings.width, settings.height, settings.device_index
        );
        Ok(OpenCvCamera { capture })
    }
}
