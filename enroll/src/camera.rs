use async_trait::async_trait;
use glob::glob;
use image::RgbImage;
use reqwest::Client;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CameraError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
    #[error("no frames match {0}")]
    NoFrames(String),
}

/// Source of colour frames for the capture loop.
#[async_trait]
pub trait Camera: Send {
    /// Block until the next frame is available.
    async fn frame(&mut self) -> Result<RgbImage, CameraError>;

    /// Release the device. Called once when a capture session ends normally.
    async fn stop(&mut self) {}
}

/// Grabs a JPEG still from an HTTP snapshot endpoint for every frame, such as
/// the `?action=snapshot` URL of an mjpg-streamer running on a Pi camera.
pub struct SnapshotCamera {
    url: String,
    client: Client,
}

impl SnapshotCamera {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Camera for SnapshotCamera {
    async fn frame(&mut self) -> Result<RgbImage, CameraError> {
        let bytes = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        debug!(bytes = bytes.len(), "snapshot received");
        Ok(image::load_from_memory(&bytes)?.to_rgb8())
    }
}

/// Replays image files matching a glob pattern as camera frames, wrapping
/// around at the end.
pub struct FileCamera {
    paths: Vec<PathBuf>,
    index: usize,
}

impl FileCamera {
    pub fn new(pattern: &str) -> Result<Self, CameraError> {
        let mut paths: Vec<PathBuf> = glob(pattern)?.filter_map(Result::ok).collect();
        if paths.is_empty() {
            return Err(CameraError::NoFrames(pattern.to_string()));
        }
        paths.sort();
        info!(frames = paths.len(), %pattern, "replaying frames from disk");
        Ok(Self { paths, index: 0 })
    }
}

#[async_trait]
impl Camera for FileCamera {
    async fn frame(&mut self) -> Result<RgbImage, CameraError> {
        let path = &self.paths[self.index % self.paths.len()];
        self.index = (self.index + 1) % self.paths.len();
        let bytes = fs::read(path).await?;
        Ok(image::load_from_memory(&bytes)?.to_rgb8())
    }
}
