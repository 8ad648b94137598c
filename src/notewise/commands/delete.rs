use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NoteId;
use crate::state::AppState;
use crate::store::{KeyValueStore, NoteStore};
use tracing::debug;

/// Removes a note from the history index and deletes its body.
///
/// An id that is neither indexed nor stored is a no-op: nothing is written.
pub fn run<K: KeyValueStore>(
    store: &mut NoteStore<K>,
    state: &mut AppState,
    id: &NoteId,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let title = state
        .history
        .iter()
        .find(|entry| &entry.id == id)
        .map(|entry| entry.title.clone());
    let has_body = store.get_note(id)?.is_some();

    if title.is_none() && !has_body {
        debug!(id = %id, "delete of unknown note ignored");
        result.add_message(CmdMessage::info(format!("No note with id {}", id)));
        return Ok(result);
    }

    if title.is_some() {
        state.history.retain(|entry| &entry.id != id);
        store.put_history_index(&state.history)?;
    }
    store.delete_note(id)?;

    if state.current_id() == Some(id) {
        state.current = None;
    }

    let label = title.unwrap_or_else(|| id.to_string());
    result.add_message(CmdMessage::success(format!("Deleted note: {}", label)));
    Ok(result)
}
