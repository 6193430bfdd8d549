#![allow(dead_code)]

use async_trait::async_trait;
use enroll::{AbortSwitch, Camera, CameraError, Preview};
use image::{GrayImage, ImageResult, Rgb, RgbImage};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use vision::{FaceDetector, FaceRect};
use voice::{Ear, HearingError, Mouth};

/// Textured frames so crops carry some structure for the recognizer.
pub struct FakeCamera {
    pub frames: Arc<Mutex<u32>>,
    pub stopped: Arc<Mutex<bool>>,
}

impl FakeCamera {
    pub fn new() -> Self {
        Self {
            frames: Arc::new(Mutex::new(0)),
            stopped: Arc::new(Mutex::new(false)),
        }
    }
}

#[async_trait]
impl Camera for FakeCamera {
    async fn frame(&mut self) -> Result<RgbImage, CameraError> {
        *self.frames.lock().unwrap() += 1;
        Ok(RgbImage::from_fn(64, 64, |x, y| {
            let v = ((x * 7 + y * 13) % 251) as u8;
            Rgb([v, v, v])
        }))
    }

    async fn stop(&mut self) {
        *self.stopped.lock().unwrap() = true;
    }
}

/// Camera that fails on the first frame.
pub struct BrokenCamera;

#[async_trait]
impl Camera for BrokenCamera {
    async fn frame(&mut self) -> Result<RgbImage, CameraError> {
        Err(CameraError::NoFrames("unplugged".into()))
    }
}

/// Finds `count` faces in the middle half of any image.
pub struct CenterDetector {
    pub count: usize,
}

impl FaceDetector for CenterDetector {
    fn detect(&mut self, image: &GrayImage) -> Vec<FaceRect> {
        let (w, h) = image.dimensions();
        vec![FaceRect::new(w / 4, h / 4, w / 2, h / 2); self.count]
    }
}

/// Finds one face near the left edge of any image.
pub struct LeftEdgeDetector;

impl FaceDetector for LeftEdgeDetector {
    fn detect(&mut self, image: &GrayImage) -> Vec<FaceRect> {
        let (_, h) = image.dimensions();
        vec![FaceRect::new(0, 0, 16, h / 2)]
    }
}

pub struct Blind;

impl FaceDetector for Blind {
    fn detect(&mut self, _image: &GrayImage) -> Vec<FaceRect> {
        Vec::new()
    }
}

/// Presses the abort switch once `limit` frames have been shown.
pub struct CountingPreview {
    pub shown: Arc<Mutex<Vec<RgbImage>>>,
    pub abort: Option<(AbortSwitch, usize)>,
}

impl CountingPreview {
    pub fn new() -> Self {
        Self {
            shown: Arc::new(Mutex::new(Vec::new())),
            abort: None,
        }
    }

    pub fn aborting_after(switch: AbortSwitch, limit: usize) -> Self {
        Self {
            abort: Some((switch, limit)),
            ..Self::new()
        }
    }
}

impl Preview for CountingPreview {
    fn show(&mut self, frame: &RgbImage) -> ImageResult<()> {
        let mut shown = self.shown.lock().unwrap();
        shown.push(frame.clone());
        if let Some((switch, limit)) = &self.abort {
            if shown.len() >= *limit {
                switch.press();
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMouth {
    pub said: Mutex<Vec<String>>,
}

impl RecordingMouth {
    pub fn said(&self) -> Vec<String> {
        self.said.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mouth for RecordingMouth {
    async fn speak(&self, text: &str) {
        self.said.lock().unwrap().push(text.to_string());
    }
}

pub struct ScriptedEar {
    answers: Mutex<VecDeque<Result<String, HearingError>>>,
}

impl ScriptedEar {
    pub fn new(answers: Vec<Result<String, HearingError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
        }
    }
}

#[async_trait]
impl Ear for ScriptedEar {
    async fn listen(&self) -> Result<String, HearingError> {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(HearingError::Unintelligible))
    }
}
