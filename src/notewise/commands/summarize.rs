use crate::commands::{history, CmdMessage, CmdResult};
use crate::error::{NotewiseError, Result, GENERATION_FAILED};
use crate::model::{Note, NoteId, SummaryStyle};
use crate::provider::{ProviderError, SummaryProvider};
use crate::state::AppState;
use crate::store::{KeyValueStore, NoteStore};
use chrono::Utc;
use tracing::{info, warn};

pub const EMPTY_INPUT: &str = "Please provide some notes to summarize.";

/// Summarizes the input buffer and records the result as the current note.
///
/// Blank input is rejected without calling the provider. On success the note
/// is persisted (history index first, then the body); a storage failure after
/// that point leaves `state.current` set to the new note.
pub async fn run<K: KeyValueStore>(
    store: &mut NoteStore<K>,
    provider: &dyn SummaryProvider,
    state: &mut AppState,
    style: SummaryStyle,
) -> Result<CmdResult> {
    if state.loading {
        return Err(NotewiseError::Api(
            "A summary is already being generated".to_string(),
        ));
    }
    if state.input.is_blank() {
        state.error = Some(EMPTY_INPUT.to_string());
        return Err(NotewiseError::Validation(EMPTY_INPUT.to_string()));
    }

    state.error = None;
    state.loading = true;
    let text = state.input.text().to_string();
    let outcome = provider.generate(&text, style).await;
    state.loading = false;

    let summary = match outcome {
        Ok(summary) if !summary.trim().is_empty() => summary,
        Ok(_) => return Err(fail(state, ProviderError::EmptyResponse)),
        Err(e) => return Err(fail(state, e)),
    };

    let now = Utc::now();
    let mut id = NoteId::generate(now);
    while store.get_note(&id)?.is_some() {
        id = NoteId::generate(now);
    }

    let note = Note::new(id, text, summary, style, now);
    state.current = Some(note.clone());
    history::save(store, state, &note)?;
    info!(id = %note.id, style = %style, "note saved");

    let mut result = CmdResult::default().with_affected_notes(vec![note.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Saved note {}: {}",
        note.id, note.title
    )));
    Ok(result)
}

fn fail(state: &mut AppState, error: ProviderError) -> NotewiseError {
    warn!(error = %error, "summary generation failed");
    state.error = Some(GENERATION_FAILED.to_string());
    NotewiseError::from(error)
}
