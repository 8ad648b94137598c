use crate::clipboard;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotewiseError, Result};
use crate::model::Note;
use crate::store::{KeyValueStore, NoteStore};
use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use unicode_width::UnicodeWidthChar;

const CARD_WIDTH: usize = 720;
const CARD_PADDING: usize = 32;
const CARD_LINE_HEIGHT: usize = 24;
const CARD_WRAP_COLUMNS: usize = 72;
const CARD_BACKGROUND: &str = "#0f172a";

/// Copies the summary text of `note` to the system clipboard.
pub fn copy(note: &Note) -> Result<CmdResult> {
    clipboard::copy_to_clipboard(&note.summary)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Summary copied to clipboard!"));
    Ok(result)
}

/// Writes the summary to `summary_<id>.txt` in `dir`.
pub fn download(note: &Note, dir: &Path) -> Result<CmdResult> {
    let path = dir.join(format!("summary_{}.txt", note.id));
    write_file(&path, note.summary.as_bytes())?;
    Ok(exported(path))
}

/// Writes an SVG card of the note to `summary_<id>.svg` in `dir`.
pub fn image(note: &Note, dir: &Path) -> Result<CmdResult> {
    let path = dir.join(format!("summary_{}.svg", note.id));
    write_file(&path, svg_card(note).as_bytes())?;
    Ok(exported(path))
}

/// Writes every stored note, newest first, into `notewise-<timestamp>.tar.gz`.
pub fn archive<K: KeyValueStore>(
    store: &NoteStore<K>,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let mut notes = Vec::new();
    for entry in store.get_history_index()? {
        match store.get_note(&entry.id)? {
            Some(note) => notes.push(note),
            None => warn!(id = %entry.id, "history entry has no stored note, skipping"),
        }
    }

    if notes.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("No notes to export."));
        return Ok(result);
    }

    fs::create_dir_all(dir).map_err(NotewiseError::Io)?;
    let path = dir.join(format!("notewise-{}.tar.gz", now.format("%Y-%m-%d_%H-%M-%S")));
    let file = File::create(&path).map_err(NotewiseError::Io)?;
    write_archive(file, &notes)?;

    Ok(exported(path))
}

fn exported(path: PathBuf) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Exported to {}", path.display())));
    result.with_exported_paths(vec![path])
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(NotewiseError::Io)?;
    }
    fs::write(path, content).map_err(NotewiseError::Io)?;
    debug!(path = %path.display(), bytes = content.len(), "export written");
    Ok(())
}

fn archive_document(note: &Note) -> String {
    format!(
        "# {}\n\n- Style: {}\n- Date: {}\n- Words: {} -> {} ({}% shorter)\n\n## Summary\n\n{}\n\n## Original notes\n\n{}\n",
        note.title,
        note.style.label(),
        note.timestamp.format("%Y-%m-%d %H:%M"),
        note.stats.original_words,
        note.stats.summary_words,
        note.stats.reduction,
        note.summary.trim_end(),
        note.original_text.trim_end(),
    )
}

fn write_archive<W: Write>(writer: W, notes: &[Note]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for note in notes {
        let entry_name = format!(
            "notewise/{}-{}.md",
            sanitize_filename(&note.title),
            note.id
        );
        let content = archive_document(note);

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(note.timestamp.timestamp().max(0) as u64);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, content.as_bytes())
            .map_err(NotewiseError::Io)?;
    }

    tar.into_inner()
        .and_then(|enc| enc.finish())
        .map_err(NotewiseError::Io)?;
    Ok(())
}

fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .trim_end_matches("...")
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('_');
    if cleaned.is_empty() {
        "note".to_string()
    } else {
        cleaned.to_string()
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Greedy word wrap by display width. Words wider than `columns` are split.
fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut width = 0;
        for word in paragraph.split_whitespace() {
            let word_width: usize = word.chars().map(|c| c.width().unwrap_or(0)).sum();
            if width > 0 && width + 1 + word_width > columns {
                lines.push(std::mem::take(&mut line));
                width = 0;
            }
            if width > 0 {
                line.push(' ');
                width += 1;
            }
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if width + w > columns && width > 0 {
                    lines.push(std::mem::take(&mut line));
                    width = 0;
                }
                line.push(c);
                width += w;
            }
        }
        lines.push(line);
    }
    lines
}

fn svg_card(note: &Note) -> String {
    let body = wrap_text(&note.summary, CARD_WRAP_COLUMNS);
    let header_height = CARD_PADDING + 3 * CARD_LINE_HEIGHT;
    let height = header_height + body.len() * CARD_LINE_HEIGHT + CARD_PADDING;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = CARD_WIDTH,
        h = height
    ));
    svg.push_str(&format!(
        "  <rect width=\"100%\" height=\"100%\" rx=\"16\" fill=\"{}\"/>\n",
        CARD_BACKGROUND
    ));
    svg.push_str(&format!(
        "  <text x=\"{x}\" y=\"{y}\" fill=\"#f8fafc\" font-family=\"sans-serif\" font-size=\"20\" font-weight=\"bold\">{}</text>\n",
        escape_xml(&note.title),
        x = CARD_PADDING,
        y = CARD_PADDING + CARD_LINE_HEIGHT
    ));
    svg.push_str(&format!(
        "  <text x=\"{x}\" y=\"{y}\" fill=\"#94a3b8\" font-family=\"sans-serif\" font-size=\"14\">{} · {} · {} words → {} words · {}% shorter · {} min read</text>\n",
        escape_xml(note.style.label()),
        note.timestamp.format("%Y-%m-%d"),
        note.stats.original_words,
        note.stats.summary_words,
        note.stats.reduction,
        note.stats.reading_time,
        x = CARD_PADDING,
        y = CARD_PADDING + 2 * CARD_LINE_HEIGHT
    ));
    for (i, line) in body.iter().enumerate() {
        svg.push_str(&format!(
            "  <text x=\"{x}\" y=\"{y}\" fill=\"#e2e8f0\" font-family=\"monospace\" font-size=\"15\" xml:space=\"preserve\">{}</text>\n",
            escape_xml(line),
            x = CARD_PADDING,
            y = header_height + (i + 1) * CARD_LINE_HEIGHT
        ));
    }
    svg.push_str("</svg>\n");
    svg
}
