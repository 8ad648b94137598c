use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

/// Maximum number of characters of the input kept in a note title.
pub const TITLE_MAX_CHARS: usize = 30;
pub const TITLE_ELLIPSIS: &str = "...";

/// Words per minute used for the reading time estimate.
pub const READING_WPM: f64 = 200.0;

static LAST_ISSUED_ID: AtomicI64 = AtomicI64::new(0);

/// Identifier of a note: epoch milliseconds at creation, as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Issues a time based id, strictly greater than any id issued before by this process.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let candidate = now.timestamp_millis();
        let mut last = LAST_ISSUED_ID.load(Ordering::SeqCst);
        loop {
            let next = candidate.max(last + 1);
            match LAST_ISSUED_ID.compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return Self(next.to_string()),
                Err(actual) => last = actual,
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for NoteId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("note id cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Selects the instruction template used for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    #[default]
    Concise,
    Detailed,
    Bullets,
    Teacher,
}

impl SummaryStyle {
    pub const ALL: [SummaryStyle; 4] = [
        SummaryStyle::Concise,
        SummaryStyle::Detailed,
        SummaryStyle::Bullets,
        SummaryStyle::Teacher,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryStyle::Concise => "concise",
            SummaryStyle::Detailed => "detailed",
            SummaryStyle::Bullets => "bullets",
            SummaryStyle::Teacher => "teacher",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SummaryStyle::Concise => "Concise",
            SummaryStyle::Detailed => "Detailed",
            SummaryStyle::Bullets => "Bullet Points",
            SummaryStyle::Teacher => "Explain like Teacher",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SummaryStyle::Concise => "Short & precise",
            SummaryStyle::Detailed => "Deep dive",
            SummaryStyle::Bullets => "Quick scan",
            SummaryStyle::Teacher => "Simple & clear",
        }
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concise" => Ok(SummaryStyle::Concise),
            "detailed" => Ok(SummaryStyle::Detailed),
            "bullets" | "bullet" => Ok(SummaryStyle::Bullets),
            "teacher" => Ok(SummaryStyle::Teacher),
            other => Err(format!(
                "unknown style '{}' (expected concise, detailed, bullets or teacher)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteStats {
    pub original_words: usize,
    pub summary_words: usize,
    pub reduction: i64,
    pub reading_time: u64,
}

impl NoteStats {
    pub fn compute(original_text: &str, summary: &str) -> Self {
        let original_words = word_count(original_text);
        let summary_words = word_count(summary);

        let reduction = if original_words == 0 {
            0
        } else {
            let delta = original_words as f64 - summary_words as f64;
            round_half_up(delta / original_words as f64 * 100.0)
        };
        let reading_time = round_half_up(summary_words as f64 / READING_WPM).max(1) as u64;

        Self {
            original_words,
            summary_words,
            reduction,
            reading_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub original_text: String,
    pub summary: String,
    pub style: SummaryStyle,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub stats: NoteStats,
}

impl Note {
    /// Builds a note and its stats. The timestamp is truncated to milliseconds,
    /// the precision it is persisted with.
    pub fn new(
        id: NoteId,
        original_text: String,
        summary: String,
        style: SummaryStyle,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let stats = NoteStats::compute(&original_text, &summary);
        Self {
            id,
            title: derive_title(&original_text),
            original_text,
            summary,
            style,
            timestamp: timestamp.trunc_subsecs(3),
            stats,
        }
    }
}

/// Lightweight index record kept in the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: NoteId,
    pub title: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl From<&Note> for HistoryEntry {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            timestamp: note.timestamp,
        }
    }
}

pub fn derive_title(text: &str) -> String {
    let mut title: String = text.chars().take(TITLE_MAX_CHARS).collect();
    if text.chars().nth(TITLE_MAX_CHARS).is_some() {
        title.push_str(TITLE_ELLIPSIS);
    }
    title
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Rounds halves toward positive infinity, so -2.5 becomes -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_for_two_word_input() {
        let stats = NoteStats::compute("Hello world", "Hello");
        assert_eq!(stats.original_words, 2);
        assert_eq!(stats.summary_words, 1);
        assert_eq!(stats.reduction, 50);
        assert_eq!(stats.reading_time, 1);
    }

    #[test]
    fn reduction_is_zero_for_equal_lengths() {
        let stats = NoteStats::compute("one two three", "four five six");
        assert_eq!(stats.reduction, 0);
    }

    #[test]
    fn reduction_goes_negative_for_longer_summary() {
        let stats = NoteStats::compute("one two", "one two three four five");
        assert_eq!(stats.reduction, -150);
    }

    #[test]
    fn negative_halves_round_toward_positive() {
        // (8 - 9) / 8 * 100 = -12.5
        let stats = NoteStats::compute("a b c d e f g h", "a b c d e f g h i");
        assert_eq!(stats.reduction, -12);
    }

    #[test]
    fn reading_time_never_below_one() {
        assert_eq!(NoteStats::compute("a", "").reading_time, 1);
        let long_summary = vec!["word"; 700].join(" ");
        assert_eq!(NoteStats::compute("a", &long_summary).reading_time, 4);
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count("  one\ttwo\n\nthree  "), 3);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn title_is_truncated_with_ellipsis() {
        let text = "abcdefghijklmnopqrstuvwxyz0123456789";
        assert_eq!(derive_title(text), "abcdefghijklmnopqrstuvwxyz0123...");
        assert_eq!(derive_title("short"), "short");
        let exact = "x".repeat(TITLE_MAX_CHARS);
        assert_eq!(derive_title(&exact), exact);
    }

    #[test]
    fn generated_ids_are_strictly_increasing() {
        let now = Utc::now();
        let a = NoteId::generate(now);
        let b = NoteId::generate(now);
        let a_num: i64 = a.as_str().parse().unwrap();
        let b_num: i64 = b.as_str().parse().unwrap();
        assert!(b_num > a_num);
    }

    #[test]
    fn style_parses_case_insensitively() {
        assert_eq!("Teacher".parse::<SummaryStyle>().unwrap(), SummaryStyle::Teacher);
        assert!("poem".parse::<SummaryStyle>().is_err());
    }

    #[test]
    fn note_survives_a_json_round_trip() {
        let created = DateTime::from_timestamp(1_700_000_000, 123_456_789).unwrap();
        let note = Note::new(
            NoteId::new("7"),
            "Cells divide.".into(),
            "Cells divide.".into(),
            SummaryStyle::Concise,
            created,
        );
        assert_eq!(note.timestamp.timestamp_subsec_nanos(), 123_000_000);

        let json = serde_json::to_string(&note).unwrap();
        let restored: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, note);
        assert_eq!(HistoryEntry::from(&restored), HistoryEntry::from(&note));
    }

    #[test]
    fn note_persists_with_browser_field_names() {
        let note = Note::new(
            NoteId::new("1"),
            "Hello world".into(),
            "Hello".into(),
            SummaryStyle::Bullets,
            DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        );
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["originalText"], "Hello world");
        assert_eq!(json["style"], "bullets");
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
        assert_eq!(json["stats"]["summaryWords"], 1);
    }
}
