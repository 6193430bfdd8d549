use crate::camera::CameraError;
use crate::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;
use vision::VisionError;

#[derive(Debug, Error)]
pub enum EnrollError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Vision(#[from] VisionError),
    #[error("failed to write crop {path}: {source}")]
    Crop {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to show preview: {0}")]
    Preview(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, EnrollError>;
