use crate::commands::CmdResult;
use crate::error::{NotewiseError, Result};
use crate::model::NoteId;
use crate::state::AppState;
use crate::store::{KeyValueStore, NoteStore};

/// Makes a stored note current and puts its original text back in the input buffer.
pub fn run<K: KeyValueStore>(
    store: &NoteStore<K>,
    state: &mut AppState,
    id: &NoteId,
) -> Result<CmdResult> {
    let note = store
        .get_note(id)?
        .ok_or_else(|| NotewiseError::NoteNotFound(id.clone()))?;

    state.input.replace(note.original_text.clone());
    state.current = Some(note.clone());
    state.error = None;

    Ok(CmdResult::default().with_affected_notes(vec![note]))
}
