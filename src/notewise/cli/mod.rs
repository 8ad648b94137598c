//! # CLI
//!
//! One client of the notewise library: the only place that knows about the
//! terminal, stdin and exit codes.
//!
//! Running `notewise` with no subcommand lists the history. `summarize` reads its
//! text from arguments, `--file`, or stdin, in that order. `shell` opens an
//! interactive session that keeps a current note and an input buffer between
//! commands.
//!
//! ## Module Structure
//!
//! - `args`: clap definitions
//! - `handlers`: one-shot command handlers
//! - `shell`: the interactive session
//! - `render`: minijinja rendering of results
//! - `markdown`: terminal layout for Markdown summaries
//! - `styles`: the named-style theme
//! - `templates`: template sources

pub mod args;
mod handlers;
mod markdown;
mod render;
mod shell;
mod styles;
mod templates;

pub use handlers::run;
