//! Optional LLM expansion hook for incorrect-answer feedback
//!
//! The hook is a strategy object with a single method and a documented
//! "may fail, failure is swallowed" contract: the feedback agent calls it for
//! incorrect answers only, and any error leaves the deterministic detail
//! untouched. Absence of a hook is the default and fully supported.
//!
//! An Ollama-backed implementation is provided for local models; it issues a
//! single non-streaming generate request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::{CoachError, Result};
use crate::types::FeedbackDetail;

/// Default Ollama API endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default model for feedback expansion
pub const DEFAULT_MODEL: &str = "qwen2.5:7b-instruct";

/// Request timeout (30 seconds)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Context handed to the hook for one incorrect answer
#[derive(Debug, Clone, Serialize)]
pub struct ExpansionContext {
    /// The question prompt
    pub question: String,

    /// Expected expression the grader resolved
    pub expected_expr: String,

    /// The answer exactly as the user submitted it
    pub user_answer: String,

    /// The deterministic analysis the expansion builds on
    pub deterministic: FeedbackDetail,
}

/// Pluggable feedback expansion strategy
///
/// Implementations may fail; callers swallow the failure and keep the
/// deterministic detail. Expansion is strictly additive.
#[async_trait]
pub trait ExpansionHook: Send + Sync {
    /// Produce a richer natural-language explanation for the given context
    async fn expand(&self, context: &ExpansionContext) -> Result<String>;
}

/// Expansion hook backed by a local Ollama model
#[derive(Debug, Clone)]
pub struct OllamaExpansionHook {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaExpansionHook {
    /// Create a hook against the default local endpoint and model
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_OLLAMA_URL, DEFAULT_MODEL)
    }

    /// Create a hook with a custom endpoint and model
    pub fn with_config(base_url: &str, model: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(CoachError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            model: model.to_string(),
        })
    }

    /// Build the prompt from the deterministic detail
    fn build_prompt(context: &ExpansionContext) -> String {
        format!(
            "A student answered '{}' to the question '{}'. The correct approach is:\n{}\n\
             Hint already given: {}\n\
             Expand this into a short, encouraging explanation of the mistake and how to fix it.",
            context.user_answer,
            context.question,
            context.deterministic.steps.join("\n"),
            context.deterministic.hint,
        )
    }
}

#[async_trait]
impl ExpansionHook for OllamaExpansionHook {
    async fn expand(&self, context: &ExpansionContext) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        let request = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: Self::build_prompt(context),
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CoachError::HookError(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CoachError::HookError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| CoachError::HookError(format!("Invalid response body: {}", e)))?;

        Ok(body.response)
    }
}

/// Ollama generate request (non-streaming)
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Ollama generate response
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::explain_mistake;

    fn test_context() -> ExpansionContext {
        let detail = explain_mistake("Solve for x: 2*x + 3 = 11", "2*x + 3 = 11", "5");
        ExpansionContext {
            question: "Solve for x: 2*x + 3 = 11".to_string(),
            expected_expr: "2*x + 3 = 11".to_string(),
            user_answer: "5".to_string(),
            deterministic: detail,
        }
    }

    #[test]
    fn test_prompt_includes_detail() {
        let context = test_context();
        let prompt = OllamaExpansionHook::build_prompt(&context);
        assert!(prompt.contains("2*x + 3 = 11"));
        assert!(prompt.contains("Off by one"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        // Port 9 (discard) is never an Ollama server
        let hook = OllamaExpansionHook::with_config("http://127.0.0.1:9", "test-model").unwrap();
        let result = hook.expand(&test_context()).await;
        assert!(result.is_err());
    }
}
