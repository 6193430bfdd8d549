//! Face detection, dataset labeling and recognizer training.
//!
//! Detection is reached through the [`FaceDetector`] trait so the capture
//! loop and the dataset labeler can run against SeetaFace models in
//! production and against fakes in tests.

pub mod dataset;
pub mod error;
pub mod face;
pub mod lbph;
pub mod train;

pub use dataset::{build_training_set, CropName, TrainingSet};
pub use error::{Result, VisionError};
pub use face::{crop, DetectorParams, FaceDetector, FaceRect, SeetaDetector};
pub use lbph::{LbphModel, LbphParams, Prediction};
pub use train::retrain;
