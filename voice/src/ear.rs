use async_trait::async_trait;
use thiserror::Error;

/// Why an utterance produced no text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HearingError {
    /// Audio was captured but nothing intelligible was in it.
    #[error("could not understand audio")]
    Unintelligible,
    /// The transcription backend failed or could not be reached.
    #[error("{0}")]
    Request(String),
    /// Audio could not be captured.
    #[error("microphone: {0}")]
    Microphone(String),
}

/// Listens for a single utterance and transcribes it.
#[async_trait]
pub trait Ear: Send + Sync {
    /// Block until one utterance has been heard and return its transcript.
    async fn listen(&self) -> Result<String, HearingError>;
}
