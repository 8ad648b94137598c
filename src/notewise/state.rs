use crate::error::Result;
use crate::input::InputBuffer;
use crate::model::{HistoryEntry, Note, NoteId};
use crate::store::{KeyValueStore, NoteStore};

/// Everything a front end shows, owned by the caller and threaded through the
/// workflow commands. Only `history` mirrors persisted data; the rest is lost
/// when the process exits.
#[derive(Debug, Default)]
pub struct AppState {
    pub current: Option<Note>,
    pub input: InputBuffer,
    pub error: Option<String>,
    /// Set while a summary request is outstanding.
    pub loading: bool,
    pub history: Vec<HistoryEntry>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh session state with the persisted history index.
    pub fn load<K: KeyValueStore>(store: &NoteStore<K>) -> Result<Self> {
        Ok(Self {
            history: store.get_history_index()?,
            ..Self::default()
        })
    }

    pub fn current_id(&self) -> Option<&NoteId> {
        self.current.as_ref().map(|note| &note.id)
    }
}
