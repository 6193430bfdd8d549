use std::io::{self, BufRead};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread::{self, JoinHandle};
use tracing::info;

/// Operator request to end a capture session early.
#[derive(Debug, Clone, Default)]
pub struct AbortSwitch {
    pressed: Arc<AtomicBool>,
}

impl AbortSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self) {
        self.pressed.store(true, Ordering::SeqCst);
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.pressed.store(false, Ordering::SeqCst);
    }

    /// Press the switch when the operator types `key` and hits Enter.
    ///
    /// Runs on a detached thread so a pending read on stdin never holds up
    /// shutdown. Lines reach the watcher only if no other reader has
    /// buffered them first; `ConsoleEar` leaves unread lines in place.
    pub fn watch_stdin(&self, key: char) {
        let switch = self.clone();
        thread::spawn(move || switch.press_on_key(std::io::stdin().lines(), key));
    }

    /// Like [`watch_stdin`](Self::watch_stdin), reading lines from `input`.
    pub fn watch<R: BufRead + Send + 'static>(&self, input: R, key: char) -> JoinHandle<()> {
        let switch = self.clone();
        thread::spawn(move || switch.press_on_key(input.lines(), key))
    }

    /// A line matches when it is exactly `key`, ignoring surrounding
    /// whitespace.
    fn press_on_key(&self, lines: impl Iterator<Item = io::Result<String>>, key: char) {
        for line in lines {
            let Ok(line) = line else { break };
            let mut chars = line.trim().chars();
            if chars.next() == Some(key) && chars.next().is_none() {
                info!(%key, "abort requested");
                self.press();
                break;
            }
        }
    }
}
