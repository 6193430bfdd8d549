use image::{ImageResult, Rgb, RgbImage};
use std::path::PathBuf;
use tracing::debug;
use vision::FaceRect;

const BOX_THICKNESS: u32 = 2;

/// Live view of the annotated capture frames for the operator.
pub trait Preview {
    fn show(&mut self, frame: &RgbImage) -> ImageResult<()>;

    /// Tear the view down. Called once when a capture session ends normally.
    fn close(&mut self) {}
}

/// Overwrites a JPEG file with the latest frame. Point an image viewer that
/// reloads on change at it to watch the session.
pub struct FilePreview {
    path: PathBuf,
}

impl FilePreview {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Preview for FilePreview {
    fn show(&mut self, frame: &RgbImage) -> ImageResult<()> {
        frame.save(&self.path)
    }

    fn close(&mut self) {
        debug!(path = %self.path.display(), "preview closed");
    }
}

/// Discards every frame.
#[derive(Default)]
pub struct NoPreview;

impl Preview for NoPreview {
    fn show(&mut self, _frame: &RgbImage) -> ImageResult<()> {
        Ok(())
    }
}

/// Draw the outline of `rect` onto `frame`, clipped to the frame.
pub fn draw_box(frame: &mut RgbImage, rect: FaceRect, color: Rgb<u8>) {
    let Some(rect) = rect.clamp(frame.dimensions()) else {
        return;
    };
    let right = rect.x + rect.width - 1;
    let bottom = rect.y + rect.height - 1;
    for t in 0..BOX_THICKNESS.min(rect.width).min(rect.height) {
        for x in rect.x..=right {
            frame.put_pixel(x, rect.y + t, color);
            frame.put_pixel(x, bottom - t, color);
        }
        for y in rect.y..=bottom {
            frame.put_pixel(rect.x + t, y, color);
            frame.put_pixel(right - t, y, color);
        }
    }
}
