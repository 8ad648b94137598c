use crate::commands::{CmdMessage, CmdResult};
use crate::config::NotewiseConfig;
use crate::error::Result;
use crate::input::file;
use crate::state::AppState;
use std::path::Path;

/// Replaces the input buffer with the contents of `path`.
pub fn run(state: &mut AppState, config: &NotewiseConfig, path: &Path) -> Result<CmdResult> {
    let text = file::read_file(path, config)?;
    state.input.replace(text);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Loaded {} ({} words)",
        path.display(),
        state.input.word_count()
    )));
    Ok(result)
}
