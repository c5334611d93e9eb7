use serde::{Deserialize, Serialize};

use super::conversation::{Content, Part};
use crate::provider::{ProviderError, ProviderResult};

// Sampling policy for critiques. Passed through to the provider unchanged.
const TEMPERATURE: f64 = 1.0;
const TOP_P: f64 = 0.95;
const TOP_K: u32 = 64;
const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Finish reasons for which a candidate carries no usable text.
const BLOCKED_FINISH_REASONS: &[&str] = &["SAFETY", "RECITATION", "LANGUAGE"];

/// Sampling configuration sent with every generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// A chat-style generation call: seeded history plus the message being sent.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub history: Vec<Content>,
    pub message: Vec<Part>,
    pub config: GenerationConfig,
}

impl GenerationRequest {
    /// Full ordered turn list: history, then `message` as a user turn.
    pub fn contents(&self) -> Vec<Content> {
        let mut contents = self.history.clone();
        contents.push(Content::user(self.message.clone()));
        contents
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: Option<u32>,
    #[serde(default)]
    pub candidates_token_count: Option<u32>,
    #[serde(default)]
    pub total_token_count: Option<u32>,
}

/// Result of a generation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerationResponse {
    /// Build a response holding a single candidate with the given text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content::model(vec![Part::text(text)])),
                finish_reason: Some("STOP".to_string()),
                index: Some(0),
            }],
            prompt_feedback: None,
            usage_metadata: None,
        }
    }

    /// Plain text of the first candidate.
    ///
    /// Text parts are concatenated in order; other parts are skipped. A blocked
    /// candidate or a blocked prompt is an error. No candidates and no block
    /// reason yields an empty string.
    pub fn text(&self) -> ProviderResult<String> {
        if let Some(candidate) = self.candidates.first() {
            if self.candidates.len() > 1 {
                tracing::warn!(
                    candidates = self.candidates.len(),
                    "Multiple candidates returned, using the first"
                );
            }

            if let Some(reason) = candidate
                .finish_reason
                .as_deref()
                .filter(|r| BLOCKED_FINISH_REASONS.contains(r))
            {
                return Err(ProviderError::Blocked(format!(
                    "Candidate was blocked due to {}",
                    reason
                )));
            }

            let text = candidate
                .content
                .iter()
                .flat_map(|c| c.parts.iter())
                .filter_map(Part::as_text)
                .collect::<String>();
            return Ok(text);
        }

        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(ProviderError::Blocked(format!(
                "Text not available. Response was blocked due to {}",
                reason
            )));
        }

        Ok(String::new())
    }
}
