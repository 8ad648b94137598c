use super::{ProviderError, SummaryProvider};
use crate::model::SummaryStyle;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Number of leading sentences kept by the local summary.
pub const FALLBACK_SENTENCES: usize = 3;

/// Deterministic summary used when no remote provider is available:
/// the first three `.`-separated segments, rejoined, trimmed, with a trailing period.
pub fn local_summary(text: &str) -> String {
    let head = text
        .split('.')
        .take(FALLBACK_SENTENCES)
        .collect::<Vec<_>>()
        .join(".");
    format!("{}.", head.trim())
}

/// Wraps a provider and downgrades every failure to [`local_summary`].
pub struct FallbackProvider<P> {
    inner: P,
}

impl<P: SummaryProvider> FallbackProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: SummaryProvider> SummaryProvider for FallbackProvider<P> {
    async fn generate(&self, text: &str, style: SummaryStyle) -> Result<String, ProviderError> {
        match self.inner.generate(text, style).await {
            Ok(summary) if !summary.trim().is_empty() => Ok(summary),
            Ok(_) => {
                warn!("provider returned an empty summary, using local summary");
                Ok(local_summary(text))
            }
            Err(ProviderError::MissingCredentials) => {
                debug!("no API key configured, using local summary");
                Ok(local_summary(text))
            }
            Err(err) => {
                warn!(error = %err, "provider failed, using local summary");
                Ok(local_summary(text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::scripted::ScriptedProvider;

    #[test]
    fn keeps_first_three_sentences() {
        assert_eq!(local_summary("A. B. C. D. E."), "A. B. C.");
    }

    #[test]
    fn short_input_gets_trailing_period() {
        assert_eq!(local_summary("Hello world"), "Hello world.");
        assert_eq!(local_summary("One. Two"), "One. Two.");
        assert_eq!(local_summary("A.B.C.D"), "A.B.C.");
    }

    #[test]
    fn empty_segments_count_toward_the_three() {
        assert_eq!(local_summary("Hmm... maybe. Yes. No."), "Hmm...");
        assert_eq!(local_summary("One. Two."), "One. Two..");
    }

    #[test]
    fn local_summary_is_never_empty() {
        assert_eq!(local_summary("..."), "...");
        assert!(!local_summary("x").is_empty());
    }

    #[tokio::test]
    async fn passes_through_successful_summary() {
        let provider = FallbackProvider::new(ScriptedProvider::replying("Remote summary"));
        let out = provider
            .generate("A. B. C. D.", SummaryStyle::Detailed)
            .await
            .unwrap();
        assert_eq!(out, "Remote summary");
        assert_eq!(provider.inner().calls(), 1);
    }

    #[tokio::test]
    async fn downgrades_failures() {
        let provider = FallbackProvider::new(ScriptedProvider::failing());
        let out = provider
            .generate("First. Second. Third. Fourth.", SummaryStyle::Concise)
            .await
            .unwrap();
        assert_eq!(out, "First. Second. Third.");
    }

    #[tokio::test]
    async fn downgrades_blank_summaries() {
        let provider = FallbackProvider::new(ScriptedProvider::replying("   "));
        let out = provider
            .generate("Only one sentence", SummaryStyle::Bullets)
            .await
            .unwrap();
        assert_eq!(out, "Only one sentence.");
    }
}
