//! Local binary pattern histogram (LBPH) face recognizer.
//!
//! Each face is reduced to radius-1, 8-neighbour binary patterns, split into
//! a grid of cells and summarised as one normalised 256-bin histogram per
//! cell. Prediction is a nearest-neighbour search over the training
//! histograms under the chi-square distance.

use crate::{Result, TrainingSet, VisionError};
use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BINS: usize = 256;

/// Clockwise from the top-left neighbour.
const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LbphParams {
    pub grid_x: u32,
    pub grid_y: u32,
    /// Predictions farther than this are reported as unknown.
    pub threshold: Option<f64>,
}

impl Default for LbphParams {
    fn default() -> Self {
        Self {
            grid_x: 8,
            grid_y: 8,
            threshold: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: u32,
    pub distance: f64,
}

/// Trained recognizer: one spatial histogram per training face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LbphModel {
    params: LbphParams,
    histograms: Vec<Vec<f32>>,
    labels: Vec<u32>,
}

impl LbphModel {
    /// Fit a model from scratch on every sample of `set`.
    pub fn train(set: &TrainingSet, params: LbphParams) -> Result<Self> {
        if set.is_empty() {
            return Err(VisionError::EmptyTrainingSet);
        }
        let grid_x = params.grid_x.max(1);
        let grid_y = params.grid_y.max(1);
        let histograms = set
            .faces()
            .map(|face| spatial_histogram(&lbp_image(face), grid_x, grid_y))
            .collect();
        Ok(Self {
            params: LbphParams {
                grid_x,
                grid_y,
                ..params
            },
            histograms,
            labels: set.labels().collect(),
        })
    }

    pub fn params(&self) -> &LbphParams {
        &self.params
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of the closest training face, if within the threshold.
    pub fn predict(&self, face: &GrayImage) -> Option<Prediction> {
        let query = spatial_histogram(&lbp_image(face), self.params.grid_x, self.params.grid_y);
        let best = self
            .histograms
            .iter()
            .zip(&self.labels)
            .map(|(hist, &label)| Prediction {
                label,
                distance: chi_square(hist, &query),
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))?;
        match self.params.threshold {
            Some(limit) if best.distance > limit => None,
            _ => Some(best),
        }
    }

    /// Serialise to YAML at `path`, replacing any previous model.
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&yaml)?)
    }
}

/// Binary pattern image; two pixels smaller than `image` in each dimension.
pub fn lbp_image(image: &GrayImage) -> GrayImage {
    let (w, h) = image.dimensions();
    if w < 3 || h < 3 {
        return GrayImage::new(0, 0);
    }
    GrayImage::from_fn(w - 2, h - 2, |x, y| {
        let (cx, cy) = (x as i32 + 1, y as i32 + 1);
        let center = image.get_pixel(cx as u32, cy as u32)[0];
        let code = NEIGHBOURS
            .iter()
            .enumerate()
            .fold(0u8, |code, (bit, (dx, dy))| {
                let neighbour = image.get_pixel((cx + dx) as u32, (cy + dy) as u32)[0];
                if neighbour >= center {
                    code | (1 << (7 - bit))
                } else {
                    code
                }
            });
        Luma([code])
    })
}

fn spatial_histogram(lbp: &GrayImage, grid_x: u32, grid_y: u32) -> Vec<f32> {
    let (w, h) = lbp.dimensions();
    let mut hist = vec![0f32; (grid_x * grid_y) as usize * BINS];
    for gy in 0..grid_y {
        let (y0, y1) = (gy * h / grid_y, (gy + 1) * h / grid_y);
        for gx in 0..grid_x {
            let (x0, x1) = (gx * w / grid_x, (gx + 1) * w / grid_x);
            let start = (gy * grid_x + gx) as usize * BINS;
            let cell = &mut hist[start..start + BINS];
            let mut count = 0u32;
            for y in y0..y1 {
                for x in x0..x1 {
                    cell[lbp.get_pixel(x, y)[0] as usize] += 1.0;
                    count += 1;
                }
            }
            if count > 0 {
                cell.iter_mut().for_each(|v| *v /= count as f32);
            }
        }
    }
    hist
}

fn chi_square(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&p, &q)| {
            let sum = f64::from(p) + f64::from(q);
            if sum > 0.0 {
                let diff = f64::from(p) - f64::from(q);
                2.0 * diff * diff / sum
            } else {
                0.0
            }
        })
        .sum()
}
