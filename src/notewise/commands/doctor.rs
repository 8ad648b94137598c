use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NoteId;
use crate::store::{KeyValueStore, NoteStore};
use std::collections::HashSet;

/// Inconsistencies between the history index and the stored note bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorReport {
    /// Indexed ids whose body is missing
    pub missing_bodies: Vec<NoteId>,
    /// Stored bodies no index entry points to
    pub orphaned_bodies: Vec<NoteId>,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.missing_bodies.is_empty() && self.orphaned_bodies.is_empty()
    }
}

/// Reports index/body mismatches. Nothing is repaired.
pub fn run<K: KeyValueStore>(store: &NoteStore<K>) -> Result<CmdResult> {
    let index = store.get_history_index()?;
    let stored = store.note_ids()?;
    let bodies: HashSet<&NoteId> = stored.iter().collect();
    let indexed: HashSet<&NoteId> = index.iter().map(|entry| &entry.id).collect();

    let report = DoctorReport {
        missing_bodies: index
            .iter()
            .filter(|entry| !bodies.contains(&entry.id))
            .map(|entry| entry.id.clone())
            .collect(),
        orphaned_bodies: stored
            .iter()
            .filter(|id| !indexed.contains(id))
            .cloned()
            .collect(),
    };

    let mut result = CmdResult::default();
    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found:"));
        if !report.missing_bodies.is_empty() {
            result.add_message(CmdMessage::info(format!(
                "  - {} history entr{} without a stored note.",
                report.missing_bodies.len(),
                if report.missing_bodies.len() == 1 { "y" } else { "ies" }
            )));
        }
        if !report.orphaned_bodies.is_empty() {
            result.add_message(CmdMessage::info(format!(
                "  - {} stored note(s) missing from history.",
                report.orphaned_bodies.len()
            )));
        }
    }
    Ok(result.with_doctor(report))
}
