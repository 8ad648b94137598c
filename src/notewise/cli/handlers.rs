//! One-shot command handlers: build the session, call the API, print the result.

use super::args::{Cli, Commands};
use super::render::Renderer;
use super::shell;
use directories::ProjectDirs;
use notewise::api::NotewiseApi;
use notewise::commands::config::ConfigAction;
use notewise::commands::summarize::EMPTY_INPUT;
use notewise::commands::CmdResult;
use notewise::config::NotewiseConfig;
use notewise::error::{NotewiseError, Result};
use notewise::model::{NoteId, SummaryStyle};
use notewise::provider::{api_key_from_env, build_provider};
use notewise::store::fs::FileKvStore;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;

pub struct AppContext {
    pub api: NotewiseApi<FileKvStore>,
    pub renderer: Renderer,
}

impl AppContext {
    pub fn print(&self, result: &CmdResult) {
        print!("{}", self.renderer.messages(&result.messages));
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Summarize { text, file, style }) => {
            handle_summarize(&mut ctx, text, file, style).await
        }
        Some(Commands::History) | None => handle_history(&ctx),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, &id),
        Some(Commands::Copy { id }) => handle_copy(&ctx, &id),
        Some(Commands::Download { id, out }) => handle_download(&ctx, &id, out),
        Some(Commands::Image { id, out }) => handle_image(&ctx, &id, out),
        Some(Commands::Archive { out }) => handle_archive(&ctx, out),
        Some(Commands::Doctor) => handle_doctor(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Shell { style }) => shell::run(&mut ctx, style).await,
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    let config = NotewiseConfig::load(&data_dir)?;
    debug!(data_dir = %data_dir.display(), policy = %config.failure_policy, "session starting");

    let provider = build_provider(&config, api_key_from_env());
    let store = FileKvStore::new(data_dir.join("notes"));
    let api = NotewiseApi::new(store, provider, config, data_dir)?;

    let use_color = !cli.no_color && console::colors_enabled();
    Ok(AppContext {
        api,
        renderer: Renderer::new(use_color),
    })
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "notewise", "notewise")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NotewiseError::Config("Could not determine data directory".to_string()))
}

fn out_dir(out: Option<PathBuf>) -> PathBuf {
    out.unwrap_or_else(|| PathBuf::from("."))
}

async fn handle_summarize(
    ctx: &mut AppContext,
    text: Vec<String>,
    file: Option<PathBuf>,
    style: Option<SummaryStyle>,
) -> Result<()> {
    if let Some(path) = file {
        ctx.api.import_file(&path)?;
    } else if !text.is_empty() {
        ctx.api.set_input(text.join(" "));
    } else {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(NotewiseError::Validation(EMPTY_INPUT.to_string()));
        }
        let mut buffer = String::new();
        stdin.lock().read_to_string(&mut buffer)?;
        ctx.api.set_input(buffer);
    }

    let result = ctx.api.summarize(style).await?;
    for note in &result.affected_notes {
        print!("{}", ctx.renderer.note(note));
    }
    ctx.print(&result);
    Ok(())
}

fn handle_history(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.history();
    print!("{}", ctx.renderer.history(&result.history, None));
    ctx.print(&result);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &NoteId) -> Result<()> {
    let result = ctx.api.view_note(id)?;
    for note in &result.affected_notes {
        print!("{}", ctx.renderer.note(note));
    }
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &NoteId) -> Result<()> {
    let result = ctx.api.delete_note(id)?;
    ctx.print(&result);
    Ok(())
}

fn handle_copy(ctx: &AppContext, id: &NoteId) -> Result<()> {
    let result = ctx.api.copy_summary(Some(id))?;
    ctx.print(&result);
    Ok(())
}

fn handle_download(ctx: &AppContext, id: &NoteId, out: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.download_summary(Some(id), &out_dir(out))?;
    ctx.print(&result);
    Ok(())
}

fn handle_image(ctx: &AppContext, id: &NoteId, out: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export_image(Some(id), &out_dir(out))?;
    ctx.print(&result);
    Ok(())
}

fn handle_archive(ctx: &AppContext, out: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.archive(&out_dir(out))?;
    ctx.print(&result);
    Ok(())
}

fn handle_doctor(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    ctx.print(&result);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config_action(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", ctx.renderer.config(config));
        }
    }
    ctx.print(&result);
    Ok(())
}
