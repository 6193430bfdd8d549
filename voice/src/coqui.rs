use crate::Mouth;
use async_trait::async_trait;
use reqwest::Client;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("no audio player configured")]
    NoPlayer,
    #[error("audio player exited with {0}")]
    Player(std::process::ExitStatus),
}

/// Default command used to play WAV audio read from stdin.
pub fn default_player() -> Vec<String> {
    ["aplay", "-q", "-"].map(String::from).to_vec()
}

/// [`Mouth`] that synthesizes speech on a Coqui TTS server and plays it
/// through an external audio player.
#[derive(Clone)]
pub struct CoquiMouth {
    url: String,
    client: Client,
    speaker_id: Option<String>,
    language_id: Option<String>,
    player: Vec<String>,
}

impl CoquiMouth {
    /// Create a new client targeting `url` (e.g. `http://localhost:5002/api/tts`).
    ///
    /// Optional `speaker_id` selects the voice and `language_id` the language
    /// for multi-lingual models.
    pub fn new(
        url: impl Into<String>,
        speaker_id: Option<String>,
        language_id: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
            speaker_id,
            language_id,
            player: default_player(),
        }
    }

    /// Replace the player command. The WAV bytes are written to its stdin.
    pub fn with_player(mut self, player: Vec<String>) -> Self {
        self.player = player;
        self
    }

    /// Fetch WAV audio for `text`.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let query = [
            ("text", text),
            ("speaker_id", self.speaker_id.as_deref().unwrap_or("p123")),
            ("style_wav", ""),
            ("language_id", self.language_id.as_deref().unwrap_or("")),
        ];
        info!(url = %self.url, "requesting TTS");
        let resp = self
            .client
            .get(&self.url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.bytes().await?.to_vec())
    }

    /// Play `wav` and wait for the player to exit.
    pub async fn play(&self, wav: &[u8]) -> Result<(), SpeechError> {
        let (program, args) = self.player.split_first().ok_or(SpeechError::NoPlayer)?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(wav).await?;
        }
        let status = child.wait().await?;
        if !status.success() {
            return Err(SpeechError::Player(status));
        }
        debug!(bytes = wav.len(), "played speech");
        Ok(())
    }
}

#[async_trait]
impl Mouth for CoquiMouth {
    async fn speak(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        match self.synthesize(text).await {
            Ok(wav) if wav.is_empty() => error!(%text, "tts returned no audio"),
            Ok(wav) => {
                if let Err(e) = self.play(&wav).await {
                    error!(?e, "audio playback failed");
                }
            }
            Err(e) => error!(?e, "tts request failed"),
        }
    }
}
