//! # Input Capture
//!
//! Every source of text ends up in one [`InputBuffer`]:
//!
//! - typed text, set or appended line by line
//! - an imported file ([`file::read_file`]), which replaces the buffer wholesale
//! - dictated utterances ([`speech`]), each final segment appended after a space

use crate::model::word_count;

pub mod file;
pub mod speech;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replaces the whole buffer, as a file import does.
    pub fn replace(&mut self, text: impl Into<String>) {
        self.set(text);
    }

    /// Appends a typed line, newline separated.
    pub fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }

    /// Appends a finalized dictation segment, space separated.
    pub fn append_transcript(&mut self, segment: &str) {
        let segment = segment.trim();
        if segment.is_empty() {
            return;
        }
        if !self.text.is_empty() && !self.text.ends_with(char::is_whitespace) {
            self.text.push(' ');
        }
        self.text.push_str(segment);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
