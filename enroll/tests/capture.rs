mod common;

use common::{
    Blind, BrokenCamera, CenterDetector, CountingPreview, FakeCamera, LeftEdgeDetector,
    RecordingMouth,
};
use enroll::{AbortSwitch, Angle, Capture, CaptureConfig, Detectors, EnrollError};
use image::Rgb;
use std::time::Duration;
use vision::CropName;

fn config(quota: u32) -> CaptureConfig {
    CaptureConfig {
        quota,
        frame_delay: Duration::ZERO,
        abort_key: None,
    }
}

fn crop_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn single_frontal_face_fills_the_quota_over_twenty_frames() {
    let dataset = tempfile::tempdir().unwrap();
    let mut camera = FakeCamera::new();
    let frames = camera.frames.clone();
    let stopped = camera.stopped.clone();
    let mut detectors = Detectors::new(Box::new(CenterDetector { count: 1 }), Box::new(Blind));
    let mouth = RecordingMouth::default();
    let mut preview = CountingPreview::new();
    let abort = AbortSwitch::new();

    let report = Capture {
        camera: &mut camera,
        detectors: &mut detectors,
        mouth: &mouth,
        preview: &mut preview,
        abort: &abort,
    }
    .run(7, dataset.path(), &config(20))
    .await
    .unwrap();

    assert_eq!(report.saved.len(), 20);
    assert!(!report.aborted);
    assert_eq!(*frames.lock().unwrap(), 20);
    assert!(*stopped.lock().unwrap());
    assert_eq!(mouth.said(), vec![Angle::Frontal.announcement()]);
    for (i, path) in report.saved.iter().enumerate() {
        let name = CropName::from_path(path).unwrap();
        assert_eq!(name.owner_id, 7);
        assert_eq!(name.sequence, i as u32 + 1);
        assert!(path.exists());
    }
    assert_eq!(crop_count(dataset.path()), 20);
}

#[tokio::test]
async fn never_writes_more_than_the_quota() {
    let dataset = tempfile::tempdir().unwrap();
    let mut camera = FakeCamera::new();
    let frames = camera.frames.clone();
    let mut detectors = Detectors::new(
        Box::new(CenterDetector { count: 3 }),
        Box::new(CenterDetector { count: 2 }),
    );
    let mouth = RecordingMouth::default();
    let mut preview = CountingPreview::new();
    let abort = AbortSwitch::new();

    let report = Capture {
        camera: &mut camera,
        detectors: &mut detectors,
        mouth: &mouth,
        preview: &mut preview,
        abort: &abort,
    }
    .run(1, dataset.path(), &config(20))
    .await
    .unwrap();

    // 3 frontal + 2 left + 2 right per frame, duplicates included
    assert_eq!(*frames.lock().unwrap(), 3);
    assert_eq!(report.saved.len(), 20);
    assert_eq!(crop_count(dataset.path()), 20);
    assert_eq!(report.angles.len(), 3);
    assert_eq!(
        mouth.said(),
        Angle::ALL.map(Angle::announcement).to_vec()
    );
}

#[tokio::test]
async fn operator_can_abort_a_faceless_session() {
    let dataset = tempfile::tempdir().unwrap();
    let mut camera = FakeCamera::new();
    let frames = camera.frames.clone();
    let mut detectors = Detectors::new(Box::new(Blind), Box::new(Blind));
    let mouth = RecordingMouth::default();
    let abort = AbortSwitch::new();
    let mut preview = CountingPreview::aborting_after(abort.clone(), 5);

    let report = Capture {
        camera: &mut camera,
        detectors: &mut detectors,
        mouth: &mouth,
        preview: &mut preview,
        abort: &abort,
    }
    .run(1, dataset.path(), &config(20))
    .await
    .unwrap();

    assert!(report.aborted);
    assert!(report.saved.is_empty());
    assert!(report.angles.is_empty());
    assert_eq!(*frames.lock().unwrap(), 5);
    assert!(mouth.said().is_empty());
    assert_eq!(crop_count(dataset.path()), 0);
}

#[tokio::test]
async fn right_profiles_are_found_on_the_mirrored_frame() {
    let dataset = tempfile::tempdir().unwrap();
    let mut camera = FakeCamera::new();
    let mut detectors = Detectors::new(Box::new(Blind), Box::new(LeftEdgeDetector));
    let mouth = RecordingMouth::default();
    let mut preview = CountingPreview::new();
    let shown = preview.shown.clone();
    let abort = AbortSwitch::new();

    let report = Capture {
        camera: &mut camera,
        detectors: &mut detectors,
        mouth: &mouth,
        preview: &mut preview,
        abort: &abort,
    }
    .run(3, dataset.path(), &config(2))
    .await
    .unwrap();

    assert_eq!(report.saved.len(), 2);
    assert!(report.angles.contains(Angle::LeftProfile));
    assert!(report.angles.contains(Angle::RightProfile));
    assert!(!report.angles.contains(Angle::Frontal));
    let right_crop = image::open(&report.saved[1]).unwrap();
    assert_eq!((right_crop.width(), right_crop.height()), (16, 32));

    let shown = shown.lock().unwrap();
    let frame = &shown[0];
    assert_eq!(*frame.get_pixel(0, 5), Rgb([0, 255, 0]));
    assert_eq!(*frame.get_pixel(63, 5), Rgb([255, 0, 0]));
}

#[tokio::test]
async fn camera_failure_ends_the_session() {
    let dataset = tempfile::tempdir().unwrap();
    let mut camera = BrokenCamera;
    let mut detectors = Detectors::new(Box::new(Blind), Box::new(Blind));
    let mouth = RecordingMouth::default();
    let mut preview = CountingPreview::new();
    let abort = AbortSwitch::new();

    let result = Capture {
        camera: &mut camera,
        detectors: &mut detectors,
        mouth: &mouth,
        preview: &mut preview,
        abort: &abort,
    }
    .run(1, dataset.path(), &config(20))
    .await;

    assert!(matches!(result, Err(EnrollError::Camera(_))));
}
