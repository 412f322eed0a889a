mod client;
mod prompt;
mod schema;

use log::debug;
use thiserror::Error;

use crate::activity::ActivityContent;
use crate::config::Config;
use crate::error::ErrorKind;

pub use client::{GeminiClient, RequestError, Transport, UreqTransport};
pub use prompt::build_prompt;
pub use schema::activity_schema;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("generation credential is missing, set API_KEY")]
    Configuration,

    #[error("generation service unavailable: {0}")]
    ServiceUnavailable(#[from] RequestError),

    #[error("generation service returned a malformed activity: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Configuration => ErrorKind::Configuration,
            GenerationError::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            GenerationError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }
}

/// Anything that can turn (subject, semester, topic) into an activity.
///
/// Callers guarantee `subject` and `topic` are non-empty.
pub trait Generate {
    fn generate(
        &self,
        subject: &str,
        semester: &str,
        topic: &str,
    ) -> Result<ActivityContent, GenerationError>;
}

/// Prompt + schema-guided Gemini call + strict parsing. One attempt per call.
pub struct ContentGenerator<T: Transport> {
    client: GeminiClient<T>,
}

impl ContentGenerator<UreqTransport> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(GeminiClient::from_settings(
            config.api_key.clone(),
            &config.settings,
        ))
    }
}

impl<T: Transport> ContentGenerator<T> {
    pub fn new(client: GeminiClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GeminiClient<T> {
        &self.client
    }
}

impl<T: Transport> Generate for ContentGenerator<T> {
    fn generate(
        &self,
        subject: &str,
        semester: &str,
        topic: &str,
    ) -> Result<ActivityContent, GenerationError> {
        let prompt = build_prompt(subject, semester, topic);
        let schema = activity_schema();
        debug!("prompt has {} chars", prompt.chars().count());

        let text = self.client.generate_json(&prompt, &schema)?;
        parse_activity(&text)
    }
}

/// Parses model output; anything not matching `ActivityContent` is malformed.
pub fn parse_activity(text: &str) -> Result<ActivityContent, GenerationError> {
    serde_json::from_str(text.trim()).map_err(|e| {
        debug!("rejected activity payload: {}", text);
        GenerationError::MalformedResponse(e.to_string())
    })
}
