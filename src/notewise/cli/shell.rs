//! Interactive session.
//!
//! Plain lines are appended to the input buffer. Lines starting with `:` are
//! commands (`:help` lists them); `::` escapes a literal leading colon. While
//! dictation is on, finalized transcript segments are appended as they arrive,
//! interleaved with typed lines.

use super::handlers::AppContext;
use super::styles::names;
use notewise::error::{NotewiseError, Result};
use notewise::input::speech::{Dictation, DictationToggle};
use notewise::model::{NoteId, SummaryStyle};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP_COMMANDS: &[(&str, &str)] = &[
    (":summarize [style]", "Summarize the input (alias :s)"),
    (":style [style]", "Show or change the summary style"),
    (":history", "List saved notes (alias :ls)"),
    (":load <id>", "Open a saved note and restore its input"),
    (":delete <id>", "Delete a saved note (alias :rm)"),
    (":new", "Clear the input and the current summary"),
    (":open <file>", "Replace the input with a file"),
    (":dictate", "Start or stop dictation"),
    (":show", "Show the current summary"),
    (":input", "Show the input buffer"),
    (":copy", "Copy the current summary"),
    (":download [dir]", "Save the current summary as text"),
    (":image [dir]", "Save the current summary as an SVG card"),
    (":help", "Show this help"),
    (":quit", "Leave the session (alias :q)"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Text(String),
    Summarize(Option<SummaryStyle>),
    Style(Option<SummaryStyle>),
    History,
    Load(NoteId),
    Delete(NoteId),
    New,
    Open(PathBuf),
    Dictate,
    Show,
    Input,
    Copy,
    Download(Option<PathBuf>),
    Image(Option<PathBuf>),
    Help,
    Quit,
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(':') else {
        return ShellCommand::Text(line.to_string());
    };
    if rest.starts_with(':') {
        return ShellCommand::Text(rest.to_string());
    }

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    let style = |arg: &str, wrap: fn(Option<SummaryStyle>) -> ShellCommand| match arg
        .parse::<SummaryStyle>()
    {
        Ok(style) => wrap(Some(style)),
        Err(e) => ShellCommand::Invalid(e),
    };

    match (name.as_str(), arg) {
        ("summarize" | "s", None) => ShellCommand::Summarize(None),
        ("summarize" | "s", Some(a)) => style(a, ShellCommand::Summarize),
        ("style", None) => ShellCommand::Style(None),
        ("style", Some(a)) => style(a, ShellCommand::Style),
        ("history" | "ls", _) => ShellCommand::History,
        ("load" | "l", Some(a)) => ShellCommand::Load(NoteId::new(a)),
        ("delete" | "rm", Some(a)) => ShellCommand::Delete(NoteId::new(a)),
        ("load" | "l" | "delete" | "rm", None) => {
            ShellCommand::Invalid(format!("Usage: :{} <id>", name))
        }
        ("new" | "n", _) => ShellCommand::New,
        ("open" | "o", Some(a)) => ShellCommand::Open(PathBuf::from(a)),
        ("open" | "o", None) => ShellCommand::Invalid("Usage: :open <file>".to_string()),
        ("dictate" | "mic", _) => ShellCommand::Dictate,
        ("show", _) => ShellCommand::Show,
        ("input" | "i", _) => ShellCommand::Input,
        ("copy" | "c", _) => ShellCommand::Copy,
        ("download" | "d", a) => ShellCommand::Download(a.map(PathBuf::from)),
        ("image" | "img", a) => ShellCommand::Image(a.map(PathBuf::from)),
        ("help" | "h" | "?", _) => ShellCommand::Help,
        ("quit" | "q" | "exit", _) => ShellCommand::Quit,
        (other, _) => ShellCommand::Invalid(format!("Unknown command :{} (try :help)", other)),
    }
}

pub async fn run(ctx: &mut AppContext, style: Option<SummaryStyle>) -> Result<()> {
    let mut style = style.unwrap_or(ctx.api.config().default_style);
    let mut dictation = Dictation::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let interactive = std::io::stdin().is_terminal();

    if interactive {
        println!(
            "{}",
            ctx.renderer
                .style(names::MUTED, "Type or paste your notes, then :summarize. :help lists commands.")
        );
    }

    loop {
        if interactive {
            print_prompt(ctx, style, &dictation);
        }

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if handle_line(ctx, &mut dictation, &mut style, &line).await == Flow::Quit {
                    break;
                }
            }
            segment = dictation.next_final(), if dictation.is_active() => match segment {
                Some(text) => {
                    ctx.api.state_mut().input.append_transcript(&text);
                    println!("{}", ctx.renderer.style(names::MUTED, &format!("[dictated] {}", text)));
                }
                None => println!("{}", ctx.renderer.style(names::INFO, "Dictation ended.")),
            },
        }
    }

    dictation.stop();
    Ok(())
}

fn print_prompt(ctx: &AppContext, style: SummaryStyle, dictation: &Dictation) {
    let mic = if dictation.is_active() { " [mic]" } else { "" };
    let prompt = format!("notewise ({}){}> ", style, mic);
    print!("{}", ctx.renderer.style(names::PROMPT, &prompt));
    let _ = std::io::stdout().flush();
}

async fn handle_line(
    ctx: &mut AppContext,
    dictation: &mut Dictation,
    style: &mut SummaryStyle,
    line: &str,
) -> Flow {
    let command = parse_line(line);
    debug!(?command, "shell command");
    match execute(ctx, dictation, style, command).await {
        Ok(flow) => flow,
        Err(e) => {
            println!("{}", ctx.renderer.style(names::ERROR, &e.to_string()));
            Flow::Continue
        }
    }
}

async fn execute(
    ctx: &mut AppContext,
    dictation: &mut Dictation,
    style: &mut SummaryStyle,
    command: ShellCommand,
) -> Result<Flow> {
    match command {
        ShellCommand::Text(text) => ctx.api.state_mut().input.push_line(&text),
        ShellCommand::Summarize(requested) => {
            if let Some(requested) = requested {
                *style = requested;
            }
            println!("{}", ctx.renderer.style(names::MUTED, "Summarizing..."));
            let result = ctx.api.summarize(Some(*style)).await?;
            for note in &result.affected_notes {
                print!("{}", ctx.renderer.note(note));
            }
            ctx.print(&result);
        }
        ShellCommand::Style(None) => {
            println!("{} ({})", style.label(), style.description());
        }
        ShellCommand::Style(Some(requested)) => {
            *style = requested;
            println!("Style set to {}", requested.label());
        }
        ShellCommand::History => {
            let result = ctx.api.history();
            let current = ctx.api.state().current_id();
            print!("{}", ctx.renderer.history(&result.history, current));
        }
        ShellCommand::Load(id) => {
            let result = ctx.api.load_note(&id)?;
            for note in &result.affected_notes {
                print!("{}", ctx.renderer.note(note));
            }
            ctx.print(&result);
        }
        ShellCommand::Delete(id) => {
            let result = ctx.api.delete_note(&id)?;
            ctx.print(&result);
        }
        ShellCommand::New => {
            let result = ctx.api.new_note();
            ctx.print(&result);
        }
        ShellCommand::Open(path) => {
            let result = ctx.api.import_file(&path)?;
            ctx.print(&result);
        }
        ShellCommand::Dictate => {
            let source = ctx.api.dictation_source()?;
            let message = match dictation.toggle(&source)? {
                DictationToggle::Started => "Dictation started. Run :dictate again to stop.",
                DictationToggle::Stopped => "Dictation stopped.",
            };
            println!("{}", ctx.renderer.style(names::INFO, message));
        }
        ShellCommand::Show => match &ctx.api.state().current {
            Some(note) => print!("{}", ctx.renderer.note(note)),
            None => println!("{}", ctx.renderer.style(names::MUTED, "No summary yet.")),
        },
        ShellCommand::Input => print!("{}", ctx.renderer.input(&ctx.api.state().input)),
        ShellCommand::Copy => {
            let result = ctx.api.copy_summary(None)?;
            ctx.print(&result);
        }
        ShellCommand::Download(dir) => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            let result = ctx.api.download_summary(None, &dir)?;
            ctx.print(&result);
        }
        ShellCommand::Image(dir) => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            let result = ctx.api.export_image(None, &dir)?;
            ctx.print(&result);
        }
        ShellCommand::Help => print!("{}", ctx.renderer.help(HELP_COMMANDS)),
        ShellCommand::Quit => return Ok(Flow::Quit),
        ShellCommand::Invalid(message) => return Err(NotewiseError::Validation(message)),
    }
    Ok(Flow::Continue)
}
