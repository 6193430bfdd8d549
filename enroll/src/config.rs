use crate::capture::CaptureConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use vision::{DetectorParams, LbphParams};

/// Detector used to re-find faces inside stored crops before training.
///
/// Defaults to the frontal model, unlike the classic labeller that
/// re-detects with the profile cascade. Crops come mostly from the frontal
/// pass, and the profile model is often a frontal model in disguise (see
/// `--profile-model`). `--relabel profile` gives the classic behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Relabel {
    #[default]
    Frontal,
    Profile,
}

/// Where enrollment keeps its files and how it captures and trains.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollConfig {
    pub dataset_dir: PathBuf,
    pub model_path: PathBuf,
    pub names_path: PathBuf,
    pub capture: CaptureConfig,
    pub relabel: Relabel,
    pub lbph: LbphParams,
}

impl Default for EnrollConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from("dataset"),
            model_path: PathBuf::from("trainer/trainer.yml"),
            names_path: PathBuf::from("names.txt"),
            capture: CaptureConfig::default(),
            relabel: Relabel::default(),
            lbph: LbphParams::default(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Enroll a person into the face recognizer by voice")]
pub struct Cli {
    /// Directory holding face crops
    #[arg(long, env = "ENROLL_DATASET", default_value = "dataset")]
    pub dataset: PathBuf,
    /// Trained recognizer output
    #[arg(long, env = "ENROLL_MODEL", default_value = "trainer/trainer.yml")]
    pub model: PathBuf,
    /// Identity store
    #[arg(long, env = "ENROLL_NAMES", default_value = "names.txt")]
    pub names: PathBuf,
    /// SeetaFace frontal face model
    #[arg(long, env = "FRONTAL_MODEL", default_value = "seeta_fd_frontal_v1.0.bin")]
    pub frontal_model: PathBuf,
    /// SeetaFace model for faces in (left) profile. No public SeetaFace
    /// profile model exists; if this file is a copy of the frontal model the
    /// left and right passes repeat frontal detection
    #[arg(long, env = "PROFILE_MODEL", default_value = "seeta_fd_profile.bin")]
    pub profile_model: PathBuf,
    #[arg(long, env = "ENROLL_MIN_FACE_SIZE", default_value_t = 40)]
    pub min_face_size: u32,
    #[arg(long, env = "ENROLL_SCORE_THRESH", default_value_t = 2.0)]
    pub score_thresh: f64,
    #[arg(long, env = "ENROLL_PYRAMID_SCALE", default_value_t = 0.8)]
    pub pyramid_scale: f32,
    #[arg(long, env = "ENROLL_SLIDE_STEP", default_value_t = 4)]
    pub slide_step: u32,
    /// Crops to collect per session
    #[arg(long, env = "ENROLL_QUOTA", default_value_t = 20)]
    pub quota: u32,
    /// Pause between frames in milliseconds
    #[arg(long, env = "ENROLL_FRAME_DELAY_MS", default_value_t = 100)]
    pub frame_delay_ms: u64,
    /// Line typed on stdin that stops capturing early
    #[arg(long, env = "ENROLL_ABORT_KEY", default_value = "q")]
    pub abort_key: char,
    #[arg(long, env = "ENROLL_RELABEL", value_enum, default_value_t = Relabel::Frontal)]
    pub relabel: Relabel,
    /// LBPH grid cells per side
    #[arg(long, env = "ENROLL_GRID", default_value_t = 8)]
    pub grid: u32,
    /// HTTP endpoint returning one JPEG still per request
    #[arg(long, env = "CAMERA_URL", default_value = "http://localhost:8080/?action=snapshot")]
    pub snapshot_url: String,
    /// Glob of image files to replay instead of the camera
    #[arg(long, env = "ENROLL_FRAMES")]
    pub frames: Option<String>,
    /// File the annotated frames are written to
    #[arg(long, env = "ENROLL_PREVIEW", default_value = "preview.jpg")]
    pub preview: PathBuf,
    #[arg(long, env = "ENROLL_NO_PREVIEW")]
    pub no_preview: bool,
    /// Coqui TTS endpoint; prompts are printed when unset
    #[arg(long, env = "COQUI_URL")]
    pub tts_url: Option<String>,
    #[arg(long, env = "SPEAKER")]
    pub speaker_id: Option<String>,
    #[arg(long, env = "LANGUAGE")]
    pub language_id: Option<String>,
    /// Command playing WAV audio from stdin
    #[arg(long, env = "AUDIO_PLAYER", default_value = "aplay -q -")]
    pub player: String,
    /// Whisper inference endpoint; answers are typed when unset
    #[arg(long, env = "WHISPER_URL")]
    pub asr_url: Option<String>,
    /// Command writing one recorded WAV utterance to stdout
    #[arg(long, env = "AUDIO_RECORDER")]
    pub recorder: Option<String>,
    /// Recording length when using the default recorder
    #[arg(long, env = "ENROLL_LISTEN_SECONDS", default_value_t = 5)]
    pub listen_seconds: u32,
}

impl Cli {
    pub fn detector_params(&self) -> DetectorParams {
        DetectorParams {
            min_face_size: self.min_face_size,
            score_thresh: self.score_thresh,
            pyramid_scale_factor: self.pyramid_scale,
            slide_window_step: (self.slide_step, self.slide_step),
        }
    }

    pub fn enroll_config(&self) -> EnrollConfig {
        EnrollConfig {
            dataset_dir: self.dataset.clone(),
            model_path: self.model.clone(),
            names_path: self.names.clone(),
            capture: CaptureConfig {
                quota: self.quota,
                frame_delay: Duration::from_millis(self.frame_delay_ms),
                abort_key: Some(self.abort_key),
            },
            relabel: self.relabel,
            lbph: LbphParams {
                grid_x: self.grid,
                grid_y: self.grid,
                ..LbphParams::default()
            },
        }
    }
}

/// Split a command line on whitespace.
pub fn command_words(command: &str) -> Vec<String> {
    command.split_whitespace().map(String::from).collect()
}
