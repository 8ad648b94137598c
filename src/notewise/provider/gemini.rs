use super::{system_instruction, ProviderError, SummaryProvider};
use crate::config::NotewiseConfig;
use crate::model::SummaryStyle;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any content.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        Some(
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>(),
        )
    }
}

impl GeminiProvider {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            temperature,
            api_key,
        }
    }

    pub fn from_config(config: &NotewiseConfig, api_key: Option<String>) -> Self {
        Self::new(
            api_key,
            config.api_base_url.clone(),
            config.model.clone(),
            config.temperature,
        )
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl SummaryProvider for GeminiProvider {
    async fn generate(&self, text: &str, style: SummaryStyle) -> Result<String, ProviderError> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(ProviderError::MissingCredentials),
        };

        let instruction = system_instruction(style);
        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: &instruction }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        debug!(model = %self.model, style = %style, chars = text.len(), "requesting summary");

        let resp = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        let summary = parsed.into_text().ok_or_else(|| {
            ProviderError::MalformedResponse("response has no candidate content".to_string())
        })?;

        if summary.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        debug!(chars = summary.len(), "summary received");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/v1beta/models/test-model:generateContent";

    fn provider_for(server: &MockServer, key: Option<&str>) -> GeminiProvider {
        GeminiProvider::new(key.map(String::from), server.uri(), "test-model", 0.7)
    }

    fn candidate_body(text: &str) -> serde_json::Value {
        json!({
            "candidates": [
                { "content": { "role": "model", "parts": [ { "text": text } ] } }
            ]
        })
    }

    #[tokio::test]
    async fn returns_generated_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("x-goog-api-key", "secret"))
            .and(body_partial_json(json!({
                "contents": [ { "role": "user", "parts": [ { "text": "Photosynthesis notes" } ] } ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("## Summary")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server, Some("secret"));
        let out = provider
            .generate("Photosynthesis notes", SummaryStyle::Concise)
            .await
            .unwrap();
        assert_eq!(out, "## Summary");
    }

    #[tokio::test]
    async fn joins_multiple_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    { "content": { "parts": [ { "text": "- one\n" }, { "text": "- two" } ] } }
                ]
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server, Some("k"));
        let out = provider.generate("text", SummaryStyle::Bullets).await.unwrap();
        assert_eq!(out, "- one\n- two");
    }

    #[tokio::test]
    async fn sends_style_instruction() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(body_partial_json(json!({
                "systemInstruction": { "parts": [ { "text": system_instruction(SummaryStyle::Teacher) } ] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server, Some("k"));
        provider.generate("text", SummaryStyle::Teacher).await.unwrap();
    }

    #[tokio::test]
    async fn missing_key_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("never")))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider_for(&server, Some("   "));
        assert!(!provider.has_credentials());
        let err = provider.generate("text", SummaryStyle::Concise).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredentials));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let provider = provider_for(&server, Some("bad"));
        let err = provider.generate("text", SummaryStyle::Concise).await.unwrap_err();
        match err {
            ProviderError::Status { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("not valid"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let provider = provider_for(&server, Some("k"));
        let err = provider.generate("text", SummaryStyle::Concise).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn missing_candidates_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let provider = provider_for(&server, Some("k"));
        let err = provider.generate("text", SummaryStyle::Concise).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn empty_text_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("")))
            .mount(&server)
            .await;

        let provider = provider_for(&server, Some("k"));
        let err = provider.generate("text", SummaryStyle::Concise).await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let provider = GeminiProvider::new(Some("k".into()), "http://127.0.0.1:9", "m", 0.7);
        let err = provider.generate("text", SummaryStyle::Concise).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }
}
