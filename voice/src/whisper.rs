use crate::{Ear, HearingError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info};

/// Recorder command capturing `seconds` of 16 kHz mono WAV on stdout.
pub fn default_recorder(seconds: u32) -> Vec<String> {
    let seconds = seconds.to_string();
    [
        "arecord",
        "-q",
        "-f",
        "S16_LE",
        "-r",
        "16000",
        "-c",
        "1",
        "-d",
        seconds.as_str(),
        "-t",
        "wav",
        "-",
    ]
    .map(String::from)
    .to_vec()
}

#[derive(Deserialize)]
struct Inference {
    #[serde(default)]
    text: String,
}

/// [`Ear`] that records one utterance and transcribes it on a whisper.cpp
/// style `/inference` server.
#[derive(Clone)]
pub struct WhisperEar {
    url: String,
    client: Client,
    recorder: Vec<String>,
}

impl WhisperEar {
    /// Create a new client posting to `url` (e.g. `http://localhost:8178/inference`).
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
            recorder: default_recorder(5),
        }
    }

    /// Replace the recorder command. It must write a WAV file to stdout.
    pub fn with_recorder(mut self, recorder: Vec<String>) -> Self {
        self.recorder = recorder;
        self
    }

    async fn record(&self) -> Result<Vec<u8>, HearingError> {
        let (program, args) = self
            .recorder
            .split_first()
            .ok_or_else(|| HearingError::Microphone("no recorder configured".into()))?;
        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| HearingError::Microphone(e.to_string()))?;
        if !output.status.success() {
            return Err(HearingError::Microphone(format!(
                "recorder exited with {}",
                output.status
            )));
        }
        debug!(bytes = output.stdout.len(), "recorded utterance");
        Ok(output.stdout)
    }

    /// Transcribe a WAV recording.
    pub async fn transcribe(&self, wav: Vec<u8>) -> Result<String, HearingError> {
        let request = |e: reqwest::Error| HearingError::Request(e.to_string());
        let part = Part::bytes(wav)
            .file_name("utterance.wav")
            .mime_str("audio/wav")
            .map_err(request)?;
        let form = Form::new()
            .part("file", part)
            .text("response_format", "json");
        let body: Inference = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(request)?
            .json()
            .await
            .map_err(request)?;
        let text = body.text.trim();
        // whisper marks silence and noise with bracketed tags such as [BLANK_AUDIO]
        if text.is_empty() || (text.starts_with('[') && text.ends_with(']')) {
            return Err(HearingError::Unintelligible);
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl Ear for WhisperEar {
    async fn listen(&self) -> Result<String, HearingError> {
        info!("listening");
        let wav = self.record().await?;
        self.transcribe(wav).await
    }
}
