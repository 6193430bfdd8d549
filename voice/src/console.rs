//! Text-only stand-ins used when no speech servers are configured.

use crate::{Ear, HearingError, Mouth};
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// [`Mouth`] that prints what it would say.
#[derive(Clone, Default)]
pub struct ConsoleMouth;

#[async_trait]
impl Mouth for ConsoleMouth {
    async fn speak(&self, text: &str) {
        println!("{text}");
    }
}

/// [`Ear`] that takes a typed line as the transcript.
///
/// Stdin is read one byte at a time so nothing past the answer's newline is
/// pulled out of the process-wide stdin buffer. Lines typed ahead stay there
/// for other readers of stdin, such as the capture abort watcher.
pub struct ConsoleEar<R = BufReader<Stdin>> {
    lines: Mutex<Lines<R>>,
}

impl ConsoleEar {
    pub fn new() -> Self {
        Self::from_reader(BufReader::with_capacity(1, tokio::io::stdin()))
    }
}

impl Default for ConsoleEar {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AsyncBufRead + Unpin + Send> ConsoleEar<R> {
    /// Take answers from `reader` instead of stdin.
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> Ear for ConsoleEar<R> {
    async fn listen(&self) -> Result<String, HearingError> {
        let line = self
            .lines
            .lock()
            .await
            .next_line()
            .await
            .map_err(|e| HearingError::Microphone(e.to_string()))?;
        match line.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            Some(_) => Err(HearingError::Unintelligible),
            None => Err(HearingError::Microphone("input closed".into())),
        }
    }
}
