//! Blocking capture loop feeding the tracker and the video hub.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::server::state::AppState;
use crate::vision::encode_jpeg;

/// Tick the pipeline until every camera stops producing frames.
///
/// Runs on a blocking thread. Each successful tick is composited and
/// published to the frame hub.
pub fn run_capture_loop(state: AppState, interval: Duration, jpeg_quality: u8) {
    info!(interval_ms = interval.as_millis() as u64, "Capture loop started");

    let mut frames = 0u32;
    let mut last_report = Instant::now();

    loop {
        let tick = state.pipeline.lock().tick();

        match tick {
            Ok(Some(output)) => {
                let recent = state.tracker.recent_log().len();
                match encode_jpeg(&output.composite(recent), jpeg_quality) {
                    Ok(jpeg) => state.frames.publish(jpeg),
                    Err(e) => warn!(error = %e, "Failed to encode composite frame"),
                }
            }
            Ok(None) => {
                error!("No camera is producing frames, stopping capture loop");
                break;
            }
            Err(e) => warn!(error = %e, "Tick failed"),
        }

        frames += 1;
        if last_report.elapsed() >= Duration::from_secs(10) {
            let fps = frames as f64 / last_report.elapsed().as_secs_f64();
            info!("Capture FPS: {:.1}", fps);
            frames = 0;
            last_report = Instant::now();
        }

        thread::sleep(interval);
    }
}
