use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use image::{Rgb, RgbImage};
use tool_inventory::{
    CameraSet, ColorDetector, ColorRange, Disconnected, MemorySink, SharedTracker, ToolTracker,
    TrackerPipeline, default_color_ranges,
};

const NEON_GREEN: Rgb<u8> = Rgb([57, 255, 20]);

/// 640x480 black frame with `n` 40x40 neon green squares in a row.
fn green_squares(n: usize) -> RgbImage {
    let mut frame = RgbImage::new(640, 480);
    for i in 0..n as u32 {
        let x0 = 40 + i * 100;
        for y in 100..140 {
            for x in x0..x0 + 40 {
                frame.put_pixel(x, y, NEON_GREEN);
            }
        }
    }
    frame
}

/// A camera that shows however many squares `count` currently says.
fn scripted_camera(count: Arc<AtomicUsize>) -> impl FnMut() -> Option<RgbImage> + Send {
    move || Some(green_squares(count.load(Ordering::SeqCst)))
}

fn ranges() -> Vec<ColorRange> {
    default_color_ranges()
        .into_iter()
        .filter(|r| r.name == "neon_green")
        .collect()
}

#[test]
fn test_end_to_end_remove_and_discard() {
    let field = Arc::new(AtomicUsize::new(3));
    let discard = Arc::new(AtomicUsize::new(0));
    let sink = MemorySink::new();

    let mut pipeline = TrackerPipeline::new(
        ColorDetector::default(),
        ranges(),
        CameraSet::new(
            scripted_camera(field.clone()),
            scripted_camera(discard.clone()),
            Disconnected,
        ),
        SharedTracker::new(ToolTracker::with_sink(sink.clone())),
    );

    pipeline.initialize().unwrap();
    let counts = pipeline.tracker().counts();
    assert_eq!(counts.get("neon_green").unwrap().total, 3);

    // Nothing moved.
    let output = pipeline.tick().unwrap().unwrap();
    assert!(output.entries.is_empty());
    assert_eq!(output.field_detections.count("neon_green"), 3);

    // One tool leaves the field.
    field.store(2, Ordering::SeqCst);
    let output = pipeline.tick().unwrap().unwrap();
    assert_eq!(
        output.entries[0].message,
        "neon_green: 1 removed from tool field. In field: 2, In use: 1"
    );

    // It lands in the discard area.
    discard.store(1, Ordering::SeqCst);
    let output = pipeline.tick().unwrap().unwrap();
    assert_eq!(
        output.entries[0].message,
        "neon_green: 1 discarded. In use: 0, Discarded: 1"
    );

    let tool = *pipeline.tracker().counts().get("neon_green").unwrap();
    assert_eq!((tool.in_field, tool.in_use, tool.discarded), (2, 0, 1));
    assert!(tool.is_settled());

    // Work view is disconnected and shown as a placeholder.
    assert_eq!(output.work.dimensions(), (640, 480));
    assert_eq!(output.composite(2).dimensions(), (640, 480));
}

#[test]
fn test_initialize_without_field_frame_fails() {
    let mut pipeline = TrackerPipeline::new(
        ColorDetector::default(),
        ranges(),
        CameraSet::new(Disconnected, Disconnected, Disconnected),
        SharedTracker::new(ToolTracker::with_sink(MemorySink::new())),
    );

    assert!(pipeline.initialize().is_err());
    assert!(!pipeline.tracker().is_initialized());
    assert!(pipeline.tick().unwrap().is_none());
}

#[test]
fn test_field_camera_coming_online_takes_baseline() {
    let field = Arc::new(AtomicUsize::new(2));
    let online = Arc::new(AtomicBool::new(false));
    let camera = {
        let (field, online) = (field.clone(), online.clone());
        move || {
            online
                .load(Ordering::SeqCst)
                .then(|| green_squares(field.load(Ordering::SeqCst)))
        }
    };
    let mut pipeline = TrackerPipeline::new(
        ColorDetector::default(),
        ranges(),
        CameraSet::new(
            camera,
            Disconnected,
            scripted_camera(Arc::new(AtomicUsize::new(1))),
        ),
        SharedTracker::new(ToolTracker::with_sink(MemorySink::new())),
    );

    // Startup with the field camera offline: no baseline yet.
    assert!(pipeline.initialize().is_err());
    let output = pipeline.tick().unwrap().unwrap();
    assert!(output.entries.is_empty());
    assert!(!pipeline.tracker().is_initialized());

    online.store(true, Ordering::SeqCst);
    pipeline.tick().unwrap().unwrap();
    assert!(pipeline.tracker().is_initialized());
    assert_eq!(pipeline.tracker().counts().get("neon_green").unwrap().total, 2);

    field.store(1, Ordering::SeqCst);
    let output = pipeline.tick().unwrap().unwrap();
    assert_eq!(
        output.entries[0].message,
        "neon_green: 1 removed from tool field. In field: 1, In use: 1"
    );
}

#[test]
fn test_small_blobs_are_ignored() {
    let mut frame = RgbImage::new(640, 480);
    // 20x20 = 400 pixels, under the area threshold
    for y in 10..30 {
        for x in 10..30 {
            frame.put_pixel(x, y, NEON_GREEN);
        }
    }
    let detections = ColorDetector::default().detect_frame(&frame, &ranges());
    assert_eq!(detections.count("neon_green"), 0);
}
