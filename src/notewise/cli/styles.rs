//! Named terminal styles.
//!
//! Templates and the markdown renderer refer to styles by semantic name only
//! (`title`, `time`, `error`...). The theme maps those names to `console` styles,
//! so the look can change without touching templates.
//!
//! When color is off, every style renders its text unchanged.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const MUTED: &str = "muted";
    pub const TITLE: &str = "title";
    pub const TIME: &str = "time";
    pub const ID: &str = "id";
    pub const CURRENT: &str = "current";
    pub const STYLE_TAG: &str = "style-tag";
    pub const STAT: &str = "stat";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
    pub const PROMPT: &str = "prompt";
    // Markdown
    pub const HEADING: &str = "heading";
    pub const STRONG: &str = "strong";
    pub const EMPHASIS: &str = "emphasis";
    pub const CODE: &str = "code";
    pub const BULLET: &str = "bullet";
    // Help
    pub const HELP_SECTION: &str = "help-section";
    pub const HELP_COMMAND: &str = "help-command";
    pub const HELP_DESC: &str = "help-desc";
}

#[derive(Debug, Clone, Default)]
pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    /// Applies the named style. Unknown names leave the text as is.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style
                .clone()
                .force_styling(true)
                .apply_to(text)
                .to_string(),
            _ => text.to_string(),
        }
    }
}

pub static NOTEWISE_THEME: Lazy<Theme> = Lazy::new(|| {
    let muted = Style::new().color256(246);
    let accent = Style::new().color256(75);

    Theme::new()
        .add(names::REGULAR, Style::new())
        .add(names::MUTED, muted.clone())
        .add(names::TITLE, Style::new().bold())
        .add(names::TIME, muted.clone().italic())
        .add(names::ID, Style::new().yellow())
        .add(names::CURRENT, Style::new().yellow().bold())
        .add(names::STYLE_TAG, accent.clone())
        .add(names::STAT, Style::new().green().bold())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted.clone())
        .add(names::PROMPT, accent.clone().bold())
        .add(names::HEADING, accent.clone().bold().underlined())
        .add(names::STRONG, Style::new().bold())
        .add(names::EMPHASIS, Style::new().italic())
        .add(names::CODE, Style::new().color256(180))
        .add(names::BULLET, accent.clone())
        .add(names::HELP_SECTION, Style::new().bold())
        .add(names::HELP_COMMAND, Style::new().green())
        .add(names::HELP_DESC, muted)
});
