//! Dictation as a stream of transcript segments.
//!
//! A [`TranscriptSource`] starts a session and hands back a [`TranscriptStream`]:
//! a lazy, unbounded sequence of segments that only ends when the session is
//! stopped or the recognizer goes away. Only final segments are meant to be
//! committed to the input buffer; interim ones are skipped by
//! [`TranscriptStream::next_final`].
//!
//! The production source, [`CommandTranscriber`], runs an external dictation
//! command and reads one segment per stdout line. A plain line is a final
//! segment. A JSON line `{"transcript": "...", "isFinal": false}` can mark
//! interim results.

use crate::config::NotewiseConfig;
use crate::error::{NotewiseError, Result};
use serde::Deserialize;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

const SEGMENT_BUFFER: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSegment {
    pub text: String,
    pub is_final: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonSegment {
    transcript: String,
    #[serde(default = "default_final")]
    is_final: bool,
}

fn default_final() -> bool {
    true
}

impl TranscriptSegment {
    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }

    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    /// Parses one line of recognizer output. Blank lines yield nothing.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if line.starts_with('{') {
            if let Ok(seg) = serde_json::from_str::<JsonSegment>(line) {
                return Some(Self {
                    text: seg.transcript,
                    is_final: seg.is_final,
                });
            }
        }
        Some(Self::final_text(line))
    }
}

/// Receiving end of a dictation session. Dropping it stops the session.
pub struct TranscriptStream {
    rx: mpsc::Receiver<TranscriptSegment>,
    stop: Option<oneshot::Sender<()>>,
}

impl TranscriptStream {
    pub fn new(rx: mpsc::Receiver<TranscriptSegment>, stop: oneshot::Sender<()>) -> Self {
        Self {
            rx,
            stop: Some(stop),
        }
    }

    /// Next final, non-blank segment. `None` once the session has ended.
    pub async fn next_final(&mut self) -> Option<String> {
        while let Some(segment) = self.rx.recv().await {
            if segment.is_final && !segment.text.trim().is_empty() {
                return Some(segment.text.trim().to_string());
            }
        }
        None
    }

    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.rx.close();
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_none()
    }
}

impl Drop for TranscriptStream {
    fn drop(&mut self) {
        self.stop();
    }
}

pub trait TranscriptSource {
    fn start(&self) -> Result<TranscriptStream>;
}

/// Runs a shell command and treats its stdout lines as transcript segments.
pub struct CommandTranscriber {
    command: String,
}

impl CommandTranscriber {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Fails with [`NotewiseError::Unsupported`] when no dictation command is configured.
    pub fn from_config(config: &NotewiseConfig) -> Result<Self> {
        match config.dictation_command.as_deref() {
            Some(cmd) if !cmd.trim().is_empty() => Ok(Self::new(cmd)),
            _ => Err(NotewiseError::Unsupported(
                "Speech recognition is not supported: set `dictation-command` in config."
                    .to_string(),
            )),
        }
    }
}

fn shell_command(command: &str) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    }

    #[cfg(not(target_os = "windows"))]
    {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

impl TranscriptSource for CommandTranscriber {
    fn start(&self) -> Result<TranscriptStream> {
        let mut child = shell_command(&self.command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                NotewiseError::Unsupported(format!("Failed to start dictation command: {}", e))
            })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            NotewiseError::Unsupported("Dictation command has no stdout".to_string())
        })?;

        let (tx, rx) = mpsc::channel(SEGMENT_BUFFER);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        debug!(command = %self.command, "dictation started");

        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    line = lines.next_line() => match line {
                        Ok(Some(line)) => {
                            if let Some(segment) = TranscriptSegment::parse_line(&line) {
                                if tx.send(segment).await.is_err() {
                                    break;
                                }
                            }
                        }
                        Ok(None) => break,
                        Err(e) => {
                            warn!(error = %e, "failed to read dictation output");
                            break;
                        }
                    },
                }
            }
            let _ = child.kill().await;
            debug!("dictation stopped");
        });

        Ok(TranscriptStream::new(rx, stop_tx))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictationToggle {
    Started,
    Stopped,
}

/// At most one dictation session; toggling while active stops it.
#[derive(Default)]
pub struct Dictation {
    active: Option<TranscriptStream>,
}

impl Dictation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, source: &dyn TranscriptSource) -> Result<DictationToggle> {
        if let Some(mut stream) = self.active.take() {
            stream.stop();
            return Ok(DictationToggle::Stopped);
        }
        self.active = Some(source.start()?);
        Ok(DictationToggle::Started)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(mut stream) = self.active.take() {
            stream.stop();
        }
    }

    /// Waits for the next final segment; pends forever while no session is active.
    pub async fn next_final(&mut self) -> Option<String> {
        let Some(stream) = self.active.as_mut() else {
            return std::future::pending().await;
        };
        let next = stream.next_final().await;
        if next.is_none() {
            self.active = None;
        }
        next
    }
}
