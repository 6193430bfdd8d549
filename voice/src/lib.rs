//! Spoken prompts and answers.
//!
//! A [`Mouth`] turns text into sound and an [`Ear`] turns one utterance into
//! text. [`VoiceChannel`] pairs them into the blocking question/answer
//! exchange used during enrollment.

pub mod channel;
pub mod coqui;
pub mod console;
pub mod ear;
pub mod mouth;
pub mod whisper;

pub use channel::VoiceChannel;
pub use coqui::{CoquiMouth, SpeechError};
pub use console::{ConsoleEar, ConsoleMouth};
pub use ear::{Ear, HearingError};
pub use mouth::Mouth;
pub use whisper::WhisperEar;
