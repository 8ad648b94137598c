//! # Command Layer
//!
//! The workflow logic of notewise. Each operation lives in its own submodule as a
//! plain function over [`AppState`](crate::state::AppState) and a
//! [`NoteStore`](crate::store::NoteStore).
//!
//! Commands never print, prompt or pick exit codes. They return a [`CmdResult`]
//! carrying:
//! - `affected_notes`: notes created, loaded or viewed
//! - `history`: the index to list (for `history`)
//! - `exported_paths`: files written by exports
//! - `config` / `doctor`: data for those commands
//! - `messages`: leveled messages (info, success, warning, error)
//!
//! The CLI decides how to render them.
//!
//! ## Testing Strategy
//!
//! Most behavior is tested here, against
//! [`MemoryKvStore`](crate::store::memory::MemoryKvStore) and a scripted
//! provider, so no test needs the network or the filesystem unless it is
//! about files. The API and CLI layers only check wiring.

use crate::config::NotewiseConfig;
use crate::model::{HistoryEntry, Note};
use std::path::PathBuf;

pub mod config;
pub mod delete;
pub mod doctor;
pub mod export;
pub mod history;
pub mod import;
pub mod load;
pub mod reset;
pub mod summarize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub history: Vec<HistoryEntry>,
    pub exported_paths: Vec<PathBuf>,
    pub config: Option<NotewiseConfig>,
    pub doctor: Option<doctor::DoctorReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = history;
        self
    }

    pub fn with_exported_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.exported_paths = paths;
        self
    }

    pub fn with_config(mut self, config: NotewiseConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_doctor(mut self, report: doctor::DoctorReport) -> Self {
        self.doctor = Some(report);
        self
    }
}
