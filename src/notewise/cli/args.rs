use clap::{Parser, Subcommand};
use notewise::model::{NoteId, SummaryStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notewise", bin_name = "notewise", version)]
#[command(about = "Summarize study notes with a hosted language model", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding notes and config (defaults to the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize text given as arguments, a file, or stdin
    #[command(alias = "s")]
    Summarize {
        /// Text to summarize (reads stdin when neither text nor --file is given)
        text: Vec<String>,

        /// Import the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Summary style: concise, detailed, bullets or teacher
        #[arg(short, long)]
        style: Option<SummaryStyle>,
    },

    /// List saved notes, newest first
    #[command(alias = "ls")]
    History,

    /// Show a saved note
    #[command(alias = "v")]
    Show { id: NoteId },

    /// Delete a saved note
    #[command(alias = "rm")]
    Delete { id: NoteId },

    /// Copy a note's summary to the clipboard
    Copy { id: NoteId },

    /// Save a note's summary as summary_<id>.txt
    Download {
        id: NoteId,

        /// Output directory (defaults to the current directory)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Save a note as an image card, summary_<id>.svg
    Image {
        id: NoteId,

        /// Output directory (defaults to the current directory)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Export every note into a tar.gz archive
    Archive {
        /// Output directory (defaults to the current directory)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Check the history against the stored notes
    Doctor,

    /// Get or set configuration values
    Config {
        /// Config key (e.g. default-style)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },

    /// Interactive session: type notes, summarize, browse history
    Shell {
        /// Initial summary style
        #[arg(short, long)]
        style: Option<SummaryStyle>,
    },
}
