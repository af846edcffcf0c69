//! Scripted key source for unit and integration testing.
//!
//! A [`MockKeySource`] replays a fixed script of key events, silences, and
//! failures.  Silences run on the tokio clock, so tests using
//! `#[tokio::test(start_paused = true)]` can cover multi-second heartbeat
//! windows instantly.  Once the script is exhausted the source stays silent
//! forever, like an idle reader.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use rfid_core::KeyEvent;
use tokio::time::{sleep_until, Instant};

use super::{DeviceError, KeySource};

/// One step of a [`MockKeySource`] script.
#[derive(Debug)]
pub enum ScriptStep {
    Event(KeyEvent),
    /// No device activity for the given duration.
    Silence(Duration),
    Fail(DeviceError),
}

/// A [`KeySource`] that replays a script.
#[derive(Debug)]
pub struct MockKeySource {
    name: String,
    script: VecDeque<ScriptStep>,
    // Deadline of the silence at the head of the script, kept across
    // cancelled `next_event` calls so a timeout does not restart it.
    silence_until: Option<Instant>,
    delivered: usize,
}

impl MockKeySource {
    /// Creates a source with an empty script that reports `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: VecDeque::new(),
            silence_until: None,
            delivered: 0,
        }
    }

    pub fn event(mut self, event: KeyEvent) -> Self {
        self.script.push_back(ScriptStep::Event(event));
        self
    }

    pub fn press(self, code: u16) -> Self {
        self.event(KeyEvent::press(code))
    }

    /// A press immediately followed by its release.
    pub fn tap(self, code: u16) -> Self {
        self.press(code).event(KeyEvent::release(code))
    }

    /// Taps each code in order, as a reader typing a tag.
    pub fn type_keys(self, codes: &[u16]) -> Self {
        codes.iter().fold(self, |source, &code| source.tap(code))
    }

    pub fn silence(mut self, duration: Duration) -> Self {
        self.script.push_back(ScriptStep::Silence(duration));
        self
    }

    pub fn fail(mut self, error: DeviceError) -> Self {
        self.script.push_back(ScriptStep::Fail(error));
        self
    }

    /// Number of key events handed out so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Number of script steps not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[async_trait]
impl KeySource for MockKeySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_event(&mut self) -> Result<KeyEvent, DeviceError> {
        loop {
            let silence = match self.script.front() {
                None => return std::future::pending().await,
                Some(ScriptStep::Silence(duration)) => Some(*duration),
                Some(_) => None,
            };

            if let Some(duration) = silence {
                let deadline = *self
                    .silence_until
                    .get_or_insert_with(|| Instant::now() + duration);
                sleep_until(deadline).await;
                self.silence_until = None;
                self.script.pop_front();
                continue;
            }

            match self.script.pop_front() {
                Some(ScriptStep::Event(event)) => {
                    self.delivered += 1;
                    return Ok(event);
                }
                Some(ScriptStep::Fail(error)) => return Err(error),
                _ => continue,
            }
        }
    }
}
