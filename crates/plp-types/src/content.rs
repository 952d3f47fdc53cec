//! Prompt content: plain text, or a sequence of typed parts for multi-modal prompts.
//!
//! On the wire a plain prompt is a JSON string. A multi-modal prompt is an array of parts:
//!
//! ```json
//! [
//!   { "type": "text", "text": "Describe this image" },
//!   { "type": "image_url", "image_url": { "url": "https://…/cat.png", "detail": "low" } }
//! ]
//! ```

use serde::{Deserialize, Serialize};

/// Requested fidelity for an image part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Auto,
    Low,
    High,
}

/// Reference to an image by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ImageDetail>,
}

/// One typed part of a multi-modal prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>, detail: Option<ImageDetail>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl {
                url: url.into(),
                detail,
            },
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::ImageUrl { .. })
    }
}

/// The content of a prompt envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl From<String> for PromptContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for PromptContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Vec<ContentPart>> for PromptContent {
    fn from(parts: Vec<ContentPart>) -> Self {
        Self::Parts(parts)
    }
}

/// Returns `true` when the content carries at least one image part.
pub fn is_multi_modal(content: &PromptContent) -> bool {
    match content {
        PromptContent::Text(_) => false,
        PromptContent::Parts(parts) => parts.iter().any(ContentPart::is_image),
    }
}

/// Converts content to the parts form; plain text becomes a single text part.
pub fn normalize_content(content: &PromptContent) -> Vec<ContentPart> {
    match content {
        PromptContent::Text(text) => vec![ContentPart::text(text.clone())],
        PromptContent::Parts(parts) => parts.clone(),
    }
}

/// Returns the text of the prompt with image parts dropped, text parts joined by newlines.
///
/// Useful for token counting or text-only models.
pub fn text_content(content: &PromptContent) -> String {
    match content {
        PromptContent::Text(text) => text.clone(),
        PromptContent::Parts(parts) => parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                ContentPart::ImageUrl { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
