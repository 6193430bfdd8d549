//! Face capture session.
//!
//! Every frame goes through three detector passes: frontal, left profile,
//! and left profile again on a mirrored copy to catch right profiles. Every
//! rectangle from every pass is saved as a crop. Overlapping rectangles from
//! different passes are not merged, so one face seen by two passes uses two
//! samples of the quota.

use crate::abort::AbortSwitch;
use crate::angle::{Angle, AngleSet};
use crate::camera::Camera;
use crate::preview::{Preview, draw_box};
use crate::{EnrollError, Result};
use image::{GrayImage, imageops};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use vision::{CropName, DetectorParams, FaceDetector, FaceRect, SeetaDetector, crop};
use voice::Mouth;

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Crops to collect before the session ends on its own.
    pub quota: u32,
    /// Pause between frames.
    pub frame_delay: Duration,
    /// Stdin line that aborts the session; `None` disables the watcher.
    pub abort_key: Option<char>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            quota: 20,
            frame_delay: Duration::from_millis(100),
            abort_key: Some('q'),
        }
    }
}

/// The two cascades a session runs. The profile detector only recognises
/// faces turned one way, which is why right profiles are searched on a
/// mirrored frame.
pub struct Detectors {
    pub frontal: Box<dyn FaceDetector>,
    pub profile: Box<dyn FaceDetector>,
}

impl Detectors {
    pub fn new(frontal: Box<dyn FaceDetector>, profile: Box<dyn FaceDetector>) -> Self {
        Self { frontal, profile }
    }

    /// Load both SeetaFace models from disk.
    pub fn load(frontal: &Path, profile: &Path, params: &DetectorParams) -> Result<Self> {
        Ok(Self::new(
            Box::new(SeetaDetector::from_file(frontal, params)?),
            Box::new(SeetaDetector::from_file(profile, params)?),
        ))
    }

    fn scan(&mut self, gray: &GrayImage) -> [(Angle, Vec<FaceRect>); 3] {
        let bounds = gray.dimensions();
        let clip = |rects: Vec<FaceRect>| -> Vec<FaceRect> {
            rects.into_iter().filter_map(|r| r.clamp(bounds)).collect()
        };
        let mirrored = imageops::flip_horizontal(gray);
        let frontal = clip(self.frontal.detect(gray));
        let left = clip(self.profile.detect(gray));
        let right = clip(
            self.profile
                .detect(&mirrored)
                .into_iter()
                .map(|r| r.mirrored(bounds.0))
                .collect(),
        );
        [
            (Angle::Frontal, frontal),
            (Angle::LeftProfile, left),
            (Angle::RightProfile, right),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaptureReport {
    /// Crop files written, in capture order.
    pub saved: Vec<PathBuf>,
    pub angles: AngleSet,
    pub aborted: bool,
}

/// Collaborators borrowed for one capture session.
pub struct Capture<'a> {
    pub camera: &'a mut dyn Camera,
    pub detectors: &'a mut Detectors,
    pub mouth: &'a dyn Mouth,
    pub preview: &'a mut dyn Preview,
    pub abort: &'a AbortSwitch,
}

impl Capture<'_> {
    /// Collect up to `config.quota` crops of `owner_id` into `dataset_dir`.
    ///
    /// Runs until the quota is met or the abort switch is pressed; if no face
    /// ever shows up only the switch ends it. Camera and detector errors end
    /// the session immediately without stopping the camera.
    pub async fn run(
        &mut self,
        owner_id: u32,
        dataset_dir: &Path,
        config: &CaptureConfig,
    ) -> Result<CaptureReport> {
        let mut report = CaptureReport::default();
        let mut sample = 0u32;
        self.abort.reset();
        if let Some(key) = config.abort_key {
            self.abort.watch_stdin(key);
            info!(%key, "type the abort key and press Enter to stop capturing");
        }

        while sample < config.quota {
            let mut display = self.camera.frame().await?;
            let gray = imageops::grayscale(&display);
            let passes = self.detectors.scan(&gray);

            for (angle, rects) in &passes {
                if !rects.is_empty() && report.angles.insert(*angle) {
                    info!(?angle, "new angle covered");
                    self.mouth.speak(angle.announcement()).await;
                }
            }

            'passes: for (angle, rects) in &passes {
                for rect in rects {
                    if sample >= config.quota {
                        break 'passes;
                    }
                    sample += 1;
                    let path = dataset_dir.join(CropName::new(owner_id, sample).to_string());
                    crop(&gray, *rect)
                        .save(&path)
                        .map_err(|e| EnrollError::Crop {
                            path: path.clone(),
                            source: e,
                        })?;
                    draw_box(&mut display, *rect, angle.color());
                    report.saved.push(path);
                }
            }
            debug!(
                frontal = passes[0].1.len(),
                left = passes[1].1.len(),
                right = passes[2].1.len(),
                sample,
                "frame processed"
            );

            self.preview.show(&display)?;
            if self.abort.is_pressed() {
                info!(sample, "capture aborted by operator");
                report.aborted = true;
                break;
            }
            if sample >= config.quota {
                break;
            }
            tokio::time::sleep(config.frame_delay).await;
        }

        self.camera.stop().await;
        self.preview.close();
        info!(saved = report.saved.len(), angles = report.angles.len(), "capture finished");
        Ok(report)
    }
}
