mod camera;
mod canvas;
mod detector;

use anyhow::{Context, Result};
use camera::OpenCvOpener;
use detector::CannyHoughDetector;
use lane_vision::frame_source::{CaptureSettings, ReconnectingSource};
use lane_vision::params::window;
use lane_vision::pipeline::{LanePipeline, OverlayStyle};
use opencv::highgui;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "lane_viewer=info,lane_vision=info";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    // --- 1. Camera & pipeline setup ---
    let settings = CaptureSettings::default();
    info!(
        "Lane viewer starting on camera {} at {}x{}, press '{}' to quit",
        settings.device_index,
        settings.width,
        settings.height,
        window::QUIT_KEY
    );
    let mut source = ReconnectingSource::new(OpenCvOpener::default(), settings);
    let mut pipeline = LanePipeline::new(CannyHoughDetector::default());
    let style = OverlayStyle::default();

    highgui::named_window(window::TITLE, highgui::WINDOW_AUTOSIZE)
        .context("Failed to create display window")?;

    // --- 2. Main loop ---
    loop {
        let frame = source.next_frame();

        let report = pipeline
            .generate_report(&frame)
            .context("Lane detection failed")?;
        let (output, summary) = canvas::render_overlay(&frame, &report, &style)?;
        if summary.skipped > 0 {
            debug!("Skipped {} malformed lane segment(s)", summary.skipped);
        }

        highgui::imshow(window::TITLE, &output)?;

        let key = highgui::wait_key(window::KEY_POLL_MS)?;
        if key & 0xFF == window::QUIT_KEY as i32 {
            break;
        }
    }

    // --- 3. Shutdown ---
    info!(
        "Quit requested after {} frames ({} reconnects)",
        pipeline.frames_processed(),
        source.reconnects()
    );
    source.release();
    highgui::destroy_all_windows()?;
    Ok(())
}
