use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::GenerationError;
use crate::config::Settings;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("Failed to read response body: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Server returned an error: {status}")]
    ServerError { status: u16 },
}

/// One JSON POST to the generation service.
pub trait Transport {
    fn post_json(&self, url: &str, api_key: &str, body: &Value) -> Result<Value, RequestError>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl Transport for UreqTransport {
    fn post_json(&self, url: &str, api_key: &str, body: &Value) -> Result<Value, RequestError> {
        let response = self
            .agent
            .post(url)
            .set("x-goog-api-key", api_key)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => RequestError::ServerError { status: code },
                other => RequestError::HttpError(other),
            })?;

        Ok(response.into_json()?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Schema-constrained `generateContent` calls against Gemini.
pub struct GeminiClient<T: Transport> {
    transport: T,
    api_key: Option<String>,
    endpoint: String,
    thinking_budget: u32,
}

impl GeminiClient<UreqTransport> {
    pub fn from_settings(api_key: Option<String>, settings: &Settings) -> Self {
        Self::with_transport(
            UreqTransport::new(Duration::from_secs(settings.timeout_seconds)),
            api_key,
            settings,
        )
    }
}

impl<T: Transport> GeminiClient<T> {
    pub fn with_transport(transport: T, api_key: Option<String>, settings: &Settings) -> Self {
        Self {
            transport,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            endpoint: format!(
                "{}/{}:generateContent",
                settings.base_url.trim_end_matches('/'),
                settings.model
            ),
            thinking_budget: settings.thinking_budget,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends the prompt and returns the raw JSON text the model produced.
    pub fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::Configuration)?;

        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
                thinking_config: ThinkingConfig {
                    thinking_budget: self.thinking_budget,
                },
            },
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        info!("requesting activity from {}", self.endpoint);
        let response = self.transport.post_json(&self.endpoint, api_key, &body)?;

        extract_text(response)
    }
}

fn extract_text(response: Value) -> Result<String, GenerationError> {
    let response: GenerateResponse = serde_json::from_value(response)
        .map_err(|e| GenerationError::MalformedResponse(format!("unexpected envelope: {}", e)))?;

    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::MalformedResponse(format!(
            "prompt was blocked: {}",
            reason
        )));
    }

    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .ok_or_else(|| GenerationError::MalformedResponse("no candidate returned".to_string()))?;

    let text: String = parts
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        return Err(GenerationError::MalformedResponse(
            "candidate has no text".to_string(),
        ));
    }

    debug!("received {} bytes of activity json", text.len());
    Ok(text)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    /// Returns canned responses and records every request.
    pub(crate) struct RecordingTransport {
        pub responses: RefCell<Vec<Result<Value, RequestError>>>,
        pub requests: RefCell<Vec<(String, String, Value)>>,
    }

    impl RecordingTransport {
        pub(crate) fn new(responses: Vec<Result<Value, RequestError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl Transport for RecordingTransport {
        fn post_json(
            &self,
            url: &str,
            api_key: &str,
            body: &Value,
        ) -> Result<Value, RequestError> {
            self.requests
                .borrow_mut()
                .push((url.to_string(), api_key.to_string(), body.clone()));
            self.responses.borrow_mut().remove(0)
        }
    }

    pub(crate) fn envelope(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    #[test]
    fn builds_request_body() {
        let settings = Settings {
            thinking_budget: 512,
            base_url: "http://localhost:9/models/".to_string(),
            ..Settings::default()
        };
        let client = GeminiClient::with_transport(
            RecordingTransport::new(vec![Ok(envelope("{}"))]),
            Some("secret".to_string()),
            &settings,
        );

        let schema = json!({ "type": "OBJECT" });
        assert_eq!(client.generate_json("hello", &schema).unwrap(), "{}");

        let requests = client.transport().requests.borrow();
        let (url, key, body) = &requests[0];
        assert_eq!(url, "http://localhost:9/models/gemini-3-pro-preview:generateContent");
        assert_eq!(key, "secret");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
        assert_eq!(body["generationConfig"]["thinkingConfig"]["thinkingBudget"], 512);
    }

    #[test]
    fn blank_key_fails_before_any_request() {
        let client = GeminiClient::with_transport(
            RecordingTransport::new(vec![]),
            Some("   ".to_string()),
            &Settings::default(),
        );

        let err = client.generate_json("p", &json!({})).unwrap_err();
        assert!(matches!(err, GenerationError::Configuration));
        assert_eq!(client.transport().calls(), 0);
    }

    #[test]
    fn skips_thought_parts() {
        let response = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "{\"a\":" },
                    { "text": "1}" }
                ]}
            }]
        });
        assert_eq!(extract_text(response).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn blocked_or_empty_responses_are_malformed() {
        let blocked = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert!(matches!(
            extract_text(blocked),
            Err(GenerationError::MalformedResponse(_))
        ));

        assert!(matches!(
            extract_text(json!({ "candidates": [] })),
            Err(GenerationError::MalformedResponse(_))
        ));

        assert!(matches!(
            extract_text(envelope("  ")),
            Err(GenerationError::MalformedResponse(_))
        ));
    }
}
