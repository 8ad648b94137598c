//! # Storage Layer
//!
//! Persistence is split in two levels:
//!
//! - [`KeyValueStore`]: the narrow seam over a durable backend. It knows nothing
//!   about notes, only string keys mapped to string values.
//! - [`NoteStore`]: the logical layout on top of it. One key holds the history
//!   index, and each note body lives under its own `note_<id>` key.
//!
//! ## Implementations
//!
//! - [`fs::FileKvStore`]: one `<key>.json` file per key inside the data directory.
//! - [`memory::MemoryKvStore`]: in-memory map for tests, with write failure
//!   simulation.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── config.json                          # configuration (not managed by the store)
//! └── notes/                               # FileKvStore root
//!     ├── smart_summarize_history.json     # [{id, title, timestamp}, ...] most recent first
//!     └── note_1718000000000.json          # full note records
//! ```
//!
//! Index and body writes are independent. A failure between the two can leave a
//! history entry without a body, or a body without an entry. Nothing here repairs
//! that; `doctor` only reports it.

use crate::error::Result;
use crate::model::{HistoryEntry, Note, NoteId};
use tracing::debug;

pub mod fs;
pub mod memory;

pub const HISTORY_KEY: &str = "smart_summarize_history";
pub const NOTE_KEY_PREFIX: &str = "note_";

/// Durable key-value mapping scoped to one device.
pub trait KeyValueStore {
    /// Returns the value for `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Creates or overwrites `key` in a single write.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<()>;

    /// All keys currently stored, in no particular order.
    fn keys(&self) -> Result<Vec<String>>;
}

pub fn note_key(id: &NoteId) -> String {
    format!("{}{}", NOTE_KEY_PREFIX, id)
}

/// Notes and history index over any [`KeyValueStore`].
pub struct NoteStore<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> NoteStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn backend(&self) -> &K {
        &self.kv
    }

    pub fn backend_mut(&mut self) -> &mut K {
        &mut self.kv
    }

    pub fn get_history_index(&self) -> Result<Vec<HistoryEntry>> {
        match self.kv.get(HISTORY_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn put_history_index(&mut self, entries: &[HistoryEntry]) -> Result<()> {
        let raw = serde_json::to_string(entries)?;
        debug!(entries = entries.len(), "writing history index");
        self.kv.put(HISTORY_KEY, &raw)
    }

    pub fn get_note(&self, id: &NoteId) -> Result<Option<Note>> {
        match self.kv.get(&note_key(id))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn put_note(&mut self, note: &Note) -> Result<()> {
        let raw = serde_json::to_string(note)?;
        debug!(id = %note.id, "writing note body");
        self.kv.put(&note_key(&note.id), &raw)
    }

    pub fn delete_note(&mut self, id: &NoteId) -> Result<()> {
        debug!(id = %id, "deleting note body");
        self.kv.delete(&note_key(id))
    }

    /// Ids of every stored note body, sorted.
    pub fn note_ids(&self) -> Result<Vec<NoteId>> {
        let mut ids: Vec<NoteId> = self
            .kv
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(NOTE_KEY_PREFIX).map(NoteId::from))
            .collect();
        ids.sort();
        Ok(ids)
    }
}
