use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("failed to read detector model {path}: {source}")]
    ModelFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid detector model: {0}")]
    Detector(String),
    #[error("not a crop file name: {0:?}")]
    CropName(String),
    #[error("no faces to train on")]
    EmptyTrainingSet,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, VisionError>;
