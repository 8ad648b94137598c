use super::{ProviderError, SummaryProvider};
use crate::model::SummaryStyle;
use async_trait::async_trait;
use std::sync::Mutex;

/// Test provider with a canned reply that records every request.
pub struct ScriptedProvider {
    reply: Option<String>,
    requests: Mutex<Vec<(String, SummaryStyle)>>,
}

impl ScriptedProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<(String, SummaryStyle)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SummaryProvider for ScriptedProvider {
    async fn generate(&self, text: &str, style: SummaryStyle) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push((text.to_string(), style));
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(ProviderError::Network("scripted failure".to_string())),
        }
    }
}
