//! # Rendering
//!
//! Turns command results into terminal text. Layout math (widths, truncation,
//! relative times, markdown) happens here in Rust; the minijinja templates in
//! `templates/` only arrange the pieces and choose styles via the `style` filter.

use super::markdown::render_markdown;
use super::styles::{names, NOTEWISE_THEME};
use super::templates::{
    CONFIG_TEMPLATE, HELP_TEMPLATE, HISTORY_TEMPLATE, INPUT_TEMPLATE, MESSAGES_TEMPLATE,
    NOTE_TEMPLATE,
};
use chrono::{DateTime, Utc};
use minijinja::{Environment, Value};
use notewise::api::{CmdMessage, MessageLevel};
use notewise::config::{NotewiseConfig, CONFIG_KEYS};
use notewise::input::InputBuffer;
use notewise::model::{HistoryEntry, Note, NoteId, SummaryStyle};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
pub const TIME_WIDTH: usize = 16;
const CURRENT_MARKER: &str = "▸ ";
const HELP_COLUMN: usize = 22;

#[derive(Serialize)]
struct NoteData {
    id: String,
    title: String,
    style_label: String,
    date: String,
    time_ago: String,
    original_words: usize,
    summary_words: usize,
    reduction: i64,
    reading_time: u64,
    summary: String,
}

#[derive(Serialize)]
struct HistoryLine {
    marker: String,
    id: String,
    id_style: &'static str,
    title: String,
    padding: String,
    time_ago: String,
}

#[derive(Serialize)]
struct HistoryData {
    notes: Vec<HistoryLine>,
    empty: bool,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
}

#[derive(Serialize)]
struct HelpEntry {
    usage: String,
    padding: String,
    description: String,
}

#[derive(Serialize)]
struct StyleEntry {
    name: &'static str,
    padding: String,
    label: &'static str,
    description: &'static str,
}

pub struct Renderer {
    env: Environment<'static>,
    use_color: bool,
}

impl Renderer {
    pub fn new(use_color: bool) -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        let theme = NOTEWISE_THEME.clone();
        env.add_filter("style", move |value: Value, name: String| -> String {
            theme.apply(&name, &value.to_string(), use_color)
        });

        Self { env, use_color }
    }

    fn render<S: Serialize>(&self, name: &str, source: &str, data: S) -> String {
        self.env
            .render_named_str(name, source, data)
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    pub fn style(&self, name: &str, text: &str) -> String {
        NOTEWISE_THEME.apply(name, text, self.use_color)
    }

    pub fn note(&self, note: &Note) -> String {
        let summary = render_markdown(&note.summary, &NOTEWISE_THEME, self.use_color);
        let data = NoteData {
            id: note.id.to_string(),
            title: single_line(&note.title),
            style_label: note.style.label().to_string(),
            date: note.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            time_ago: format_time_ago(note.timestamp, Utc::now()),
            original_words: note.stats.original_words,
            summary_words: note.stats.summary_words,
            reduction: note.stats.reduction,
            reading_time: note.stats.reading_time,
            summary: summary.trim_end().to_string(),
        };
        self.render("note.tmp", NOTE_TEMPLATE, data)
    }

    pub fn history(&self, entries: &[HistoryEntry], current: Option<&NoteId>) -> String {
        let now = Utc::now();
        let id_width = entries.iter().map(|e| e.id.as_str().width()).max().unwrap_or(0);
        let notes = entries
            .iter()
            .map(|entry| {
                let is_current = current == Some(&entry.id);
                let marker = if is_current {
                    CURRENT_MARKER.to_string()
                } else {
                    " ".repeat(CURRENT_MARKER.width())
                };
                let id = format!("{:<width$}", entry.id.as_str(), width = id_width);
                let fixed = CURRENT_MARKER.width() + id_width + 2 + TIME_WIDTH;
                let available = LINE_WIDTH.saturating_sub(fixed);
                let title = truncate_to_width(&single_line(&entry.title), available);
                let padding = " ".repeat(available.saturating_sub(title.width()));

                HistoryLine {
                    marker,
                    id,
                    id_style: if is_current { names::CURRENT } else { names::ID },
                    title,
                    padding,
                    time_ago: format!(
                        "{:>width$}",
                        format_time_ago(entry.timestamp, now),
                        width = TIME_WIDTH
                    ),
                }
            })
            .collect::<Vec<_>>();

        let data = HistoryData {
            empty: notes.is_empty(),
            notes,
        };
        self.render("history.tmp", HISTORY_TEMPLATE, data)
    }

    pub fn messages(&self, messages: &[CmdMessage]) -> String {
        if messages.is_empty() {
            return String::new();
        }
        let messages: Vec<MessageData> = messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect();
        self.render(
            "messages.tmp",
            MESSAGES_TEMPLATE,
            minijinja::context! { messages },
        )
    }

    pub fn input(&self, input: &InputBuffer) -> String {
        self.render(
            "input.tmp",
            INPUT_TEMPLATE,
            minijinja::context! {
                empty => input.is_blank(),
                text => input.text(),
                words => input.word_count(),
                chars => input.char_count(),
            },
        )
    }

    pub fn config(&self, config: &NotewiseConfig) -> String {
        let entries: Vec<ConfigEntry> = CONFIG_KEYS
            .iter()
            .map(|key| ConfigEntry {
                key: *key,
                value: config.get(key).unwrap_or_default(),
            })
            .collect();
        self.render(
            "config.tmp",
            CONFIG_TEMPLATE,
            minijinja::context! { entries },
        )
    }

    pub fn help(&self, commands: &[(&str, &str)]) -> String {
        let commands: Vec<HelpEntry> = commands
            .iter()
            .map(|(usage, description)| HelpEntry {
                usage: usage.to_string(),
                padding: " ".repeat(HELP_COLUMN.saturating_sub(usage.width()).max(1)),
                description: description.to_string(),
            })
            .collect();
        let styles: Vec<StyleEntry> = SummaryStyle::ALL
            .iter()
            .map(|style| StyleEntry {
                name: style.as_str(),
                padding: " ".repeat(HELP_COLUMN.saturating_sub(style.as_str().width())),
                label: style.label(),
                description: style.description(),
            })
            .collect();
        self.render(
            "help.tmp",
            HELP_TEMPLATE,
            minijinja::context! { commands, styles },
        )
    }
}

fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let mut formatter = timeago::Formatter::new();
    formatter.num_items(1);
    formatter.convert(duration.to_std().unwrap_or_default())
}
