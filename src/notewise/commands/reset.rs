use crate::commands::{CmdMessage, CmdResult};
use crate::state::AppState;

/// Starts a new note: clears the current note, the input buffer and any error.
/// The history is left alone.
pub fn run(state: &mut AppState) -> CmdResult {
    state.current = None;
    state.input.clear();
    state.error = None;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info("Started a new note."));
    result
}
