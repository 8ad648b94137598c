//! Terminal rendering for Markdown summaries.
//!
//! Summaries come back from the model as Markdown. Block structure is laid out as
//! plain text (headings on their own line, bullets and numbers for lists, indented
//! code blocks) and inline markup is mapped to theme styles.

use super::styles::{names, Theme};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

const INDENT: &str = "  ";

struct MarkdownWriter<'a> {
    theme: &'a Theme,
    use_color: bool,
    out: String,
    /// One entry per open list: `Some(n)` is the next number of an ordered list.
    lists: Vec<Option<u64>>,
    heading: Option<String>,
    strong: usize,
    emphasis: usize,
    in_code_block: bool,
}

impl<'a> MarkdownWriter<'a> {
    fn new(theme: &'a Theme, use_color: bool) -> Self {
        Self {
            theme,
            use_color,
            out: String::new(),
            lists: Vec::new(),
            heading: None,
            strong: 0,
            emphasis: 0,
            in_code_block: false,
        }
    }

    fn styled(&self, name: &str, text: &str) -> String {
        self.theme.apply(name, text, self.use_color)
    }

    fn ensure_newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn blank_line(&mut self) {
        self.ensure_newline();
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(heading) = self.heading.as_mut() {
            heading.push_str(text);
            return;
        }
        if self.in_code_block {
            for line in text.lines() {
                let styled = self.styled(names::CODE, line);
                self.out.push_str("    ");
                self.out.push_str(&styled);
                self.out.push('\n');
            }
            return;
        }

        let style = if self.strong > 0 {
            names::STRONG
        } else if self.emphasis > 0 {
            names::EMPHASIS
        } else {
            names::REGULAR
        };
        let styled = self.styled(style, text);
        self.out.push_str(&styled);
    }

    fn start_item(&mut self) {
        self.ensure_newline();
        let depth = self.lists.len().saturating_sub(1);
        let marker = match self.lists.last_mut() {
            Some(Some(n)) => {
                let marker = format!("{}.", n);
                *n += 1;
                marker
            }
            _ => "•".to_string(),
        };
        let marker = self.styled(names::BULLET, &marker);
        self.out.push_str(&INDENT.repeat(depth));
        self.out.push_str(&marker);
        self.out.push(' ');
    }

    fn event(&mut self, event: Event) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                self.blank_line();
                self.heading = Some(String::new());
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = self.heading.take() {
                    let styled = self.styled(names::HEADING, &heading);
                    self.out.push_str(&styled);
                    self.out.push_str("\n\n");
                }
            }
            Event::Start(Tag::Paragraph) => {
                if self.lists.is_empty() {
                    self.ensure_newline();
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if self.lists.is_empty() {
                    self.blank_line();
                } else {
                    self.ensure_newline();
                }
            }
            Event::Start(Tag::List(start)) => {
                self.ensure_newline();
                self.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            Event::Start(Tag::Item) => self.start_item(),
            Event::End(TagEnd::Item) => self.ensure_newline(),
            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(TagEnd::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(TagEnd::Emphasis) => self.emphasis = self.emphasis.saturating_sub(1),
            Event::Start(Tag::CodeBlock(_)) => {
                self.blank_line();
                self.in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.in_code_block = false;
                self.blank_line();
            }
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                let styled = self.styled(names::CODE, &code);
                if let Some(heading) = self.heading.as_mut() {
                    heading.push_str(&code);
                } else {
                    self.out.push_str(&styled);
                }
            }
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.out.push('\n'),
            Event::Rule => {
                self.blank_line();
                let rule = self.styled(names::MUTED, &"─".repeat(40));
                self.out.push_str(&rule);
                self.out.push_str("\n\n");
            }
            Event::TaskListMarker(done) => {
                self.out.push_str(if done { "[x] " } else { "[ ] " });
            }
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            _ => {}
        }
    }
}

/// Renders Markdown for the terminal. The result ends with exactly one newline.
pub fn render_markdown(source: &str, theme: &Theme, use_color: bool) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut writer = MarkdownWriter::new(theme, use_color);
    for event in Parser::new_ext(source, options) {
        writer.event(event);
    }

    let mut out = writer.out.trim_end().to_string();
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::styles::NOTEWISE_THEME;

    fn plain(source: &str) -> String {
        render_markdown(source, &NOTEWISE_THEME, false)
    }

    #[test]
    fn headings_and_bullets() {
        assert_eq!(
            plain("# Cells\n\n- nucleus\n- **mitochondria**\n"),
            "Cells\n\n• nucleus\n• mitochondria\n"
        );
    }

    #[test]
    fn ordered_lists_are_numbered() {
        assert_eq!(plain("1. one\n2. two\n3. three"), "1. one\n2. two\n3. three\n");
    }

    #[test]
    fn nested_lists_are_indented() {
        assert_eq!(plain("- outer\n  - inner\n"), "• outer\n  • inner\n");
    }

    #[test]
    fn paragraphs_are_separated() {
        assert_eq!(
            plain("First line\nsame paragraph.\n\nSecond."),
            "First line same paragraph.\n\nSecond.\n"
        );
    }

    #[test]
    fn inline_code_and_emphasis_keep_text() {
        assert_eq!(plain("Use `ATP` for *energy*."), "Use ATP for energy.\n");
    }

    #[test]
    fn color_adds_escape_codes() {
        let colored = render_markdown("**bold**", &NOTEWISE_THEME, true);
        assert!(colored.contains('\u{1b}'));
        assert!(colored.contains("bold"));
    }
}
