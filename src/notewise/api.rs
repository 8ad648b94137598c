//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for front ends.
//! It owns the session: the note store, the summary provider, the [`AppState`] and
//! the loaded configuration.
//!
//! The facade resolves "which note" questions (an explicit id or the current note)
//! and forwards to `commands/*.rs`. It never prints and never exits.
//!
//! `NotewiseApi<S: KeyValueStore>` is generic over the storage backend:
//! - Production: `NotewiseApi<FileKvStore>`
//! - Testing: `NotewiseApi<MemoryKvStore>`

use crate::commands::{self, config::ConfigAction, CmdResult};
use crate::config::NotewiseConfig;
use crate::error::{NotewiseError, Result};
use crate::input::speech::CommandTranscriber;
use crate::model::{Note, NoteId, SummaryStyle};
use crate::provider::SummaryProvider;
use crate::state::AppState;
use crate::store::{KeyValueStore, NoteStore};
use chrono::Utc;
use std::path::{Path, PathBuf};

pub use crate::commands::{CmdMessage, MessageLevel};

pub struct NotewiseApi<S: KeyValueStore> {
    store: NoteStore<S>,
    provider: Box<dyn SummaryProvider>,
    state: AppState,
    config: NotewiseConfig,
    data_dir: PathBuf,
}

impl<S: KeyValueStore> NotewiseApi<S> {
    /// Opens a session: the history index is read once, everything else starts empty.
    pub fn new(
        kv: S,
        provider: Box<dyn SummaryProvider>,
        config: NotewiseConfig,
        data_dir: PathBuf,
    ) -> Result<Self> {
        let store = NoteStore::new(kv);
        let state = AppState::load(&store)?;
        Ok(Self {
            store,
            provider,
            state,
            config,
            data_dir,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn config(&self) -> &NotewiseConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input.set(text);
    }

    /// Summarizes the input buffer. `None` uses the configured default style.
    pub async fn summarize(&mut self, style: Option<SummaryStyle>) -> Result<CmdResult> {
        let style = style.unwrap_or(self.config.default_style);
        commands::summarize::run(
            &mut self.store,
            self.provider.as_ref(),
            &mut self.state,
            style,
        )
        .await
    }

    pub fn history(&self) -> CmdResult {
        commands::history::run(&self.state)
    }

    pub fn load_note(&mut self, id: &NoteId) -> Result<CmdResult> {
        commands::load::run(&self.store, &mut self.state, id)
    }

    pub fn delete_note(&mut self, id: &NoteId) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, &mut self.state, id)
    }

    pub fn new_note(&mut self) -> CmdResult {
        commands::reset::run(&mut self.state)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<CmdResult> {
        commands::import::run(&mut self.state, &self.config, path)
    }

    /// Returns a note without touching the session.
    pub fn view_note(&self, id: &NoteId) -> Result<CmdResult> {
        let note = self.resolve(Some(id))?;
        Ok(CmdResult::default().with_affected_notes(vec![note]))
    }

    pub fn copy_summary(&self, id: Option<&NoteId>) -> Result<CmdResult> {
        commands::export::copy(&self.resolve(id)?)
    }

    pub fn download_summary(&self, id: Option<&NoteId>, dir: &Path) -> Result<CmdResult> {
        commands::export::download(&self.resolve(id)?, dir)
    }

    pub fn export_image(&self, id: Option<&NoteId>, dir: &Path) -> Result<CmdResult> {
        commands::export::image(&self.resolve(id)?, dir)
    }

    pub fn archive(&self, dir: &Path) -> Result<CmdResult> {
        commands::export::archive(&self.store, dir, Utc::now())
    }

    pub fn doctor(&self) -> Result<CmdResult> {
        commands::doctor::run(&self.store)
    }

    /// Reads or updates the persisted config. A successful `Set` also updates
    /// this session's copy; the provider keeps the settings it was built with.
    pub fn config_action(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.data_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn dictation_source(&self) -> Result<CommandTranscriber> {
        CommandTranscriber::from_config(&self.config)
    }

    fn resolve(&self, id: Option<&NoteId>) -> Result<Note> {
        match id {
            Some(id) => {
                if let Some(current) = self.state.current.as_ref().filter(|n| &n.id == id) {
                    return Ok(current.clone());
                }
                self.store
                    .get_note(id)?
                    .ok_or_else(|| NotewiseError::NoteNotFound(id.clone()))
            }
            None => self
                .state
                .current
                .clone()
                .ok_or_else(|| NotewiseError::Api("No summary to export yet".to_string())),
        }
    }
}
