//! Output templates, kept as standalone minijinja files and included at compile time.
//!
//! Templates render with `trim_blocks` and `lstrip_blocks` on: a line holding only a
//! block tag produces no output. Widths, truncation and markdown are computed in
//! Rust; templates pick styles through the `style` filter.

pub const NOTE_TEMPLATE: &str = include_str!("templates/note.tmp");
pub const HISTORY_TEMPLATE: &str = include_str!("templates/history.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const INPUT_TEMPLATE: &str = include_str!("templates/input.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");
pub const HELP_TEMPLATE: &str = include_str!("templates/help.tmp");
