use crate::{Ear, HearingError, Mouth};
use std::sync::Arc;
use tracing::{info, warn};

/// Question/answer exchange over a [`Mouth`] and an [`Ear`].
#[derive(Clone)]
pub struct VoiceChannel {
    mouth: Arc<dyn Mouth>,
    ear: Arc<dyn Ear>,
}

impl VoiceChannel {
    pub fn new(mouth: Arc<dyn Mouth>, ear: Arc<dyn Ear>) -> Self {
        Self { mouth, ear }
    }

    pub fn mouth(&self) -> &Arc<dyn Mouth> {
        &self.mouth
    }

    /// Speak `text` and wait until it has been said.
    pub async fn say(&self, text: &str) {
        self.mouth.speak(text).await;
    }

    /// Speak `prompt`, listen for one answer and read it back.
    ///
    /// Returns `None` after telling the operator what went wrong when the
    /// answer could not be transcribed. There are no retries.
    pub async fn ask(&self, prompt: &str) -> Option<String> {
        self.say(prompt).await;
        match self.ear.listen().await {
            Ok(answer) => {
                info!(%prompt, %answer, "heard answer");
                self.say(&format!("You said: {answer}")).await;
                Some(answer)
            }
            Err(HearingError::Unintelligible) => {
                warn!(%prompt, "answer was unintelligible");
                self.say("Could not understand audio").await;
                None
            }
            Err(HearingError::Request(e) | HearingError::Microphone(e)) => {
                warn!(%prompt, error = %e, "could not transcribe answer");
                self.say(&format!("Could not request results; {e}")).await;
                None
            }
        }
    }
}
