//! Conversation turns submitted to the generation model.
//!
//! A request is a short, fixed persona exchange followed by one real turn that
//! references the uploaded video and asks for the critique.

use serde::{Deserialize, Serialize};

use super::file::RemoteFile;

/// Opening user turn that sets the assistant persona.
pub const PERSONA_PROMPT: &str =
    "You are a world-class video ads and creative analyzer. Analyze the video I'm about to show you.";

/// Model turn acknowledging the persona.
pub const PERSONA_ACKNOWLEDGEMENT: &str = "Certainly! I'm ready to analyze the video ad you're about to show me. As a world-class video ads and creative analyzer, I'll provide a comprehensive analysis covering aspects such as audience engagement, messaging and storytelling, visual and audio elements, brand consistency, and platform optimization. Please provide me with the video, and I'll get started with the analysis.";

/// Instruction sent alongside the video reference.
pub const ANALYSIS_INSTRUCTION: &str = "Analyze this video ad. Provide insights on its content, key messages, audience engagement, visual and audio elements, brand consistency, and overall effectiveness. Also, suggest improvements and potential performance predictions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Reference to a file already stored by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub mime_type: String,
    pub file_uri: String,
}

/// One unit of content inside a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
    /// Part kinds we never send and ignore when reading (function calls, inline data, ...).
    Other(serde_json::Value),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn file(file: &RemoteFile) -> Self {
        Part::FileData {
            file_data: FileData {
                mime_type: file.mime_type.clone(),
                file_uri: file.uri.clone(),
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// A role-tagged turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some(Role::User),
            parts,
        }
    }

    pub fn model(parts: Vec<Part>) -> Self {
        Self {
            role: Some(Role::Model),
            parts,
        }
    }
}

/// The fixed persona exchange that precedes every analysis turn.
pub fn seed_history() -> Vec<Content> {
    vec![
        Content::user(vec![Part::text(PERSONA_PROMPT)]),
        Content::model(vec![Part::text(PERSONA_ACKNOWLEDGEMENT)]),
    ]
}

/// Parts of the analysis turn: the file reference first, then the instruction.
pub fn analysis_message(file: &RemoteFile) -> Vec<Part> {
    vec![Part::file(file), Part::text(ANALYSIS_INSTRUCTION)]
}
