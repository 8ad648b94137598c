use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{HistoryEntry, Note};
use crate::state::AppState;
use crate::store::{KeyValueStore, NoteStore};

/// Lists the history index held in the session state.
pub fn run(state: &AppState) -> CmdResult {
    CmdResult::default().with_history(state.history.clone())
}

/// Puts `note` at the front of the history (dropping any older entry with the
/// same id), then writes the index followed by the note body.
pub fn save<K: KeyValueStore>(
    store: &mut NoteStore<K>,
    state: &mut AppState,
    note: &Note,
) -> Result<()> {
    let mut updated = Vec::with_capacity(state.history.len() + 1);
    updated.push(HistoryEntry::from(note));
    updated.extend(
        state
            .history
            .iter()
            .filter(|entry| entry.id != note.id)
            .cloned(),
    );
    state.history = updated;

    store.put_history_index(&state.history)?;
    store.put_note(note)?;
    Ok(())
}
