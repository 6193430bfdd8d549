//! Crop file naming and training-set assembly.
//!
//! Crops are stored flat in one directory as `User.<owner>.<sequence>.jpg`.
//! The owner id embedded in the name is the label the recognizer learns.

use crate::face::{crop, FaceDetector};
use crate::{Result, VisionError};
use image::GrayImage;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

const PREFIX: &str = "User";

/// Identity of a stored crop: whose face it is and its place in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CropName {
    pub owner_id: u32,
    pub sequence: u32,
}

impl CropName {
    pub fn new(owner_id: u32, sequence: u32) -> Self {
        Self { owner_id, sequence }
    }

    /// Parse the file name component of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| VisionError::CropName(path.display().to_string()))?;
        name.parse()
    }
}

impl fmt::Display for CropName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}.{}.{}.jpg", self.owner_id, self.sequence)
    }
}

impl FromStr for CropName {
    type Err = VisionError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || VisionError::CropName(s.to_string());
        let mut fields = s.split('.');
        if fields.next() != Some(PREFIX) {
            return Err(invalid());
        }
        let owner_id = fields.next().and_then(|f| f.parse().ok()).ok_or_else(invalid)?;
        let sequence = fields.next().and_then(|f| f.parse().ok()).ok_or_else(invalid)?;
        Ok(Self { owner_id, sequence })
    }
}

/// Labeled face samples ready for training.
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    samples: Vec<(GrayImage, u32)>,
}

impl TrainingSet {
    pub fn push(&mut self, face: GrayImage, label: u32) {
        self.samples.push((face, label));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn faces(&self) -> impl Iterator<Item = &GrayImage> {
        self.samples.iter().map(|(face, _)| face)
    }

    pub fn labels(&self) -> impl Iterator<Item = u32> + '_ {
        self.samples.iter().map(|(_, label)| *label)
    }

    pub fn samples(&self) -> &[(GrayImage, u32)] {
        &self.samples
    }
}

/// Rebuild the full training set from every crop stored in `dir`.
///
/// Files that fail to decode or do not follow the crop naming convention are
/// skipped. Each crop goes through `detector` again and contributes one
/// sample per face found, so a crop with no redetected face contributes none.
pub fn build_training_set(dir: &Path, detector: &mut dyn FaceDetector) -> Result<TrainingSet> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let mut set = TrainingSet::default();
    let mut dropped = 0usize;
    for path in &paths {
        let image = match image::open(path) {
            Ok(img) => img.to_luma8(),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping undecodable file");
                continue;
            }
        };
        let name = match CropName::from_path(path) {
            Ok(name) => name,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unlabeled image");
                continue;
            }
        };
        let bounds = image.dimensions();
        let faces: Vec<_> = detector
            .detect(&image)
            .into_iter()
            .filter_map(|rect| rect.clamp(bounds))
            .collect();
        if faces.is_empty() {
            warn!(path = %path.display(), "no face redetected in crop");
            dropped += 1;
            continue;
        }
        for rect in faces {
            set.push(crop(&image, rect), name.owner_id);
        }
    }
    info!(
        files = paths.len(),
        samples = set.len(),
        dropped,
        "built training set"
    );
    Ok(set)
}
