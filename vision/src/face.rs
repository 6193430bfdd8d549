use crate::{Result, VisionError};
use image::{imageops, GrayImage};
use rustface::{create_detector_with_model, read_model, Detector, ImageData};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Axis-aligned face region in pixel coordinates of the image it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from possibly negative detector output, clipped to
    /// an image of `bounds` (width, height). Returns `None` when nothing of
    /// the rectangle lies inside the image.
    pub fn clipped(x: i32, y: i32, width: u32, height: u32, bounds: (u32, u32)) -> Option<Self> {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(width)).min(i64::from(bounds.0));
        let y1 = (i64::from(y) + i64::from(height)).min(i64::from(bounds.1));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self::new(
            x0 as u32,
            y0 as u32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        ))
    }

    /// Clip this rectangle to an image of `bounds` (width, height).
    pub fn clamp(self, bounds: (u32, u32)) -> Option<Self> {
        let x = i32::try_from(self.x).ok()?;
        let y = i32::try_from(self.y).ok()?;
        Self::clipped(x, y, self.width, self.height, bounds)
    }

    /// The same region seen in a horizontally mirrored image `image_width` wide.
    ///
    /// Mirroring is its own inverse, so this maps rectangles both into and out
    /// of a flipped frame.
    pub fn mirrored(self, image_width: u32) -> Self {
        let right = self.x.saturating_add(self.width).min(image_width);
        Self {
            x: image_width - right,
            ..self
        }
    }
}

/// Finds faces in a grayscale image.
pub trait FaceDetector {
    fn detect(&mut self, image: &GrayImage) -> Vec<FaceRect>;
}

impl<D: FaceDetector + ?Sized> FaceDetector for Box<D> {
    fn detect(&mut self, image: &GrayImage) -> Vec<FaceRect> {
        (**self).detect(image)
    }
}

/// Tuning applied to a SeetaFace detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorParams {
    pub min_face_size: u32,
    pub score_thresh: f64,
    pub pyramid_scale_factor: f32,
    pub slide_window_step: (u32, u32),
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            min_face_size: 40,
            score_thresh: 2.0,
            pyramid_scale_factor: 0.8,
            slide_window_step: (4, 4),
        }
    }
}

/// [`FaceDetector`] backed by a SeetaFace cascade loaded through `rustface`.
pub struct SeetaDetector {
    inner: Box<dyn Detector>,
}

impl SeetaDetector {
    /// Load a SeetaFace model file from disk.
    pub fn from_file(path: impl AsRef<Path>, params: &DetectorParams) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| VisionError::ModelFile {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "loaded detector model");
        Self::from_bytes(&bytes, params)
    }

    /// Build a detector from the raw bytes of a SeetaFace model.
    pub fn from_bytes(bytes: &[u8], params: &DetectorParams) -> Result<Self> {
        let model = read_model(Cursor::new(bytes)).map_err(|e| VisionError::Detector(e.to_string()))?;
        let mut inner = create_detector_with_model(model);
        inner.set_min_face_size(params.min_face_size);
        inner.set_score_thresh(params.score_thresh);
        inner.set_pyramid_scale_factor(params.pyramid_scale_factor);
        inner.set_slide_window_step(params.slide_window_step.0, params.slide_window_step.1);
        Ok(Self { inner })
    }
}

impl FaceDetector for SeetaDetector {
    fn detect(&mut self, image: &GrayImage) -> Vec<FaceRect> {
        let bounds = image.dimensions();
        let mut data = ImageData::new(image.as_raw(), bounds.0, bounds.1);
        self.inner
            .detect(&mut data)
            .into_iter()
            .filter_map(|face| {
                let bbox = face.bbox();
                FaceRect::clipped(bbox.x(), bbox.y(), bbox.width(), bbox.height(), bounds)
            })
            .collect()
    }
}

/// Copy the region `rect` out of `image`.
pub fn crop(image: &GrayImage, rect: FaceRect) -> GrayImage {
    imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image()
}
