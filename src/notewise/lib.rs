//! # Notewise Architecture
//!
//! Notewise turns study notes into summaries. A hosted language model writes the
//! summary in one of four styles; when it cannot, a local heuristic keeps the
//! tool usable offline. Every summary is kept as a note in a small key-value store
//! with a newest-first history.
//!
//! Like any UI-agnostic library, the core never touches the terminal. The binary
//! in `main.rs` is one client of it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Argument parsing, the interactive shell, rendering       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session (store, provider, state, config)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Note workflow: summarize, save, load, delete, export     │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                         │
//!                    ▼                         ▼
//! ┌────────────────────────────┐ ┌──────────────────────────────┐
//! │  Storage (store/)          │ │  Providers (provider/)       │
//! │  KeyValueStore + NoteStore │ │  Gemini, local fallback      │
//! └────────────────────────────┘ └──────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: The facade front ends talk to
//! - [`commands`]: Note workflow operations returning `CmdResult`
//! - [`state`]: Session state (current note, input buffer, error, loading flag, history)
//! - [`provider`]: Summary generation and the failure policy
//! - [`store`]: Key-value storage and the note/history record layout
//! - [`input`]: Input buffer, file import and dictation
//! - [`model`]: Notes, styles, stats and ids
//! - [`config`]: Persisted settings
//! - [`clipboard`]: Copying summaries out
//! - [`error`]: Error types
//! - `cli`: Binary-only argument parsing, shell and rendering

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod provider;
pub mod state;
pub mod store;
