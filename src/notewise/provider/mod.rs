//! # Summary Provider
//!
//! A [`SummaryProvider`] turns input text plus a [`SummaryStyle`] into summary text.
//! Generation is delegated to a hosted model ([`gemini::GeminiProvider`]); a single
//! attempt is made per call, with no caching, retries or timeout.
//!
//! What happens on failure is a policy decision, see [`FailurePolicy`]:
//!
//! - `Fallback` wraps the remote provider in [`fallback::FallbackProvider`], which
//!   swaps any failure for a deterministic local summary (first three sentences).
//! - `Strict` returns the typed [`ProviderError`] to the caller.

use crate::config::NotewiseConfig;
use crate::model::SummaryStyle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod fallback;
pub mod gemini;

#[cfg(test)]
pub(crate) mod scripted;

/// Environment variables checked, in order, for the API credential.
pub const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

const SYSTEM_PREAMBLE: &str = "You are a world-class academic assistant specialized in creating study notes.
Your goal is to help students understand complex topics quickly.
Output your response in clean Markdown format.";

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("no API key configured")]
    MissingCredentials,

    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("provider returned an empty summary")]
    EmptyResponse,
}

#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Generates a summary of `text`. `text` must not be blank.
    async fn generate(&self, text: &str, style: SummaryStyle) -> Result<String, ProviderError>;
}

/// What to do when the remote provider cannot produce a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Fallback,
    Strict,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Fallback => f.write_str("fallback"),
            FailurePolicy::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fallback" => Ok(FailurePolicy::Fallback),
            "strict" => Ok(FailurePolicy::Strict),
            other => Err(format!(
                "unknown failure policy '{}' (expected fallback or strict)",
                other
            )),
        }
    }
}

pub fn style_prompt(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Concise => {
            "Provide a high-level, short, and concise summary focusing only on the most critical points."
        }
        SummaryStyle::Detailed => {
            "Provide a comprehensive and detailed summary that covers all major sub-topics and nuances."
        }
        SummaryStyle::Bullets => {
            "Provide a structured summary using only bullet points. Organize them logically."
        }
        SummaryStyle::Teacher => {
            "Explain this like a helpful teacher would to a student. Use analogies, simplify complex terms, and be encouraging."
        }
    }
}

pub fn system_instruction(style: SummaryStyle) -> String {
    format!("{}\n{}", SYSTEM_PREAMBLE, style_prompt(style))
}

/// Reads the API credential from the environment, ignoring blank values.
pub fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
}

/// Builds the provider chain described by `config`.
pub fn build_provider(
    config: &NotewiseConfig,
    api_key: Option<String>,
) -> Box<dyn SummaryProvider> {
    let remote = gemini::GeminiProvider::from_config(config, api_key);
    match config.failure_policy {
        FailurePolicy::Fallback => Box::new(fallback::FallbackProvider::new(remote)),
        FailurePolicy::Strict => Box::new(remote),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_style_has_its_own_instruction() {
        let prompts: std::collections::HashSet<_> =
            SummaryStyle::ALL.iter().map(|s| style_prompt(*s)).collect();
        assert_eq!(prompts.len(), SummaryStyle::ALL.len());
    }

    #[test]
    fn system_instruction_asks_for_markdown() {
        let instruction = system_instruction(SummaryStyle::Bullets);
        assert!(instruction.contains("Markdown"));
        assert!(instruction.ends_with("Organize them logically."));
    }

    #[test]
    fn failure_policy_parses() {
        assert_eq!("STRICT".parse::<FailurePolicy>().unwrap(), FailurePolicy::Strict);
        assert_eq!(FailurePolicy::default(), FailurePolicy::Fallback);
        assert!("retry".parse::<FailurePolicy>().is_err());
    }

    #[tokio::test]
    async fn fallback_policy_never_fails_without_credentials() {
        let config = NotewiseConfig::default();
        let provider = build_provider(&config, None);
        let summary = provider
            .generate("A. B. C. D. E.", SummaryStyle::Concise)
            .await
            .unwrap();
        assert_eq!(summary, "A. B. C.");
    }

    #[tokio::test]
    async fn strict_policy_reports_missing_credentials() {
        let config = NotewiseConfig {
            failure_policy: FailurePolicy::Strict,
            ..NotewiseConfig::default()
        };
        let provider = build_provider(&config, None);
        let err = provider
            .generate("Some text.", SummaryStyle::Concise)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredentials));
    }
}
