// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

// ─── Content part types ───────────────────────────────────────────────────────

/// A single content part in a multi-part message.
///
/// Images are data URLs (`data:<mime>;base64,<b64>`) or HTTPS URLs.  Input
/// also accepts the OpenAI `{"type":"image_url","image_url":{"url",…}}` block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case", from = "RawContentPart")]
pub enum ContentPart {
    Text { text: String },
    Image {
        /// Data URL (`data:image/png;base64,...`) or HTTPS URL.
        image_url: String,
        /// OpenAI vision detail level: `"low"`, `"high"`, or `"auto"`.
        /// `None` lets the provider choose.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(image_url: impl Into<String>) -> Self {
        Self::Image { image_url: image_url.into(), detail: None }
    }

    /// `detail` should be `"low"`, `"high"`, or `"auto"`.
    pub fn image_with_detail(image_url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Image { image_url: image_url.into(), detail: Some(detail.into()) }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawContentPart {
    Text { text: String },
    Image {
        image_url: String,
        #[serde(default)]
        detail: Option<String>,
    },
    ImageUrl { image_url: ImageUrlBlock },
}

/// `image_url` as sent by OpenAI: a bare URL or `{url, detail?}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImageUrlBlock {
    Url(String),
    Object {
        url: String,
        #[serde(default)]
        detail: Option<String>,
    },
}

impl From<RawContentPart> for ContentPart {
    fn from(raw: RawContentPart) -> Self {
        match raw {
            RawContentPart::Text { text } => Self::Text { text },
            RawContentPart::Image { image_url, detail } => Self::Image { image_url, detail },
            RawContentPart::ImageUrl { image_url: ImageUrlBlock::Url(image_url) } => {
                Self::Image { image_url, detail: None }
            }
            RawContentPart::ImageUrl { image_url: ImageUrlBlock::Object { url, detail } } => {
                Self::Image { image_url: url, detail }
            }
        }
    }
}

/// The body of a message: a plain string or a list of mixed parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

// ─── Tool calls ───────────────────────────────────────────────────────────────

/// `"tool_calls": null` is common in OpenAI message dumps; read it as empty.
fn null_as_empty<'de, D>(de: D) -> Result<Vec<ToolCall>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<ToolCall>>::deserialize(de)?.unwrap_or_default())
}

fn default_tool_type() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded argument object
    pub arguments: String,
}

/// A tool invocation requested by the assistant.
///
/// `id` is echoed back as `tool_call_id` on the matching [`Role::Tool`]
/// message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "default_tool_type")]
    pub kind: String,
    pub function: FunctionCall,
}

impl ToolCall {
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: default_tool_type(),
            function: FunctionCall { name: name.into(), arguments: arguments.into() },
        }
    }
}

// ─── Message types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "developer")]
    System,
    User,
    #[serde(alias = "model")]
    Assistant,
    Tool,
}

/// A single chat turn.
///
/// `tool_calls` is only meaningful for [`Role::Assistant`] and
/// `tool_call_id` only for [`Role::Tool`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    fn with_role(role: Role, content: Option<MessageContent>) -> Self {
        Self { role, content, name: None, tool_calls: Vec::new(), tool_call_id: None }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::with_role(Role::System, Some(MessageContent::Text(text.into())))
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role(Role::User, Some(MessageContent::Text(text.into())))
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, Some(MessageContent::Text(text.into())))
    }

    /// An assistant turn that only requests tool invocations.
    pub fn assistant_with_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self { tool_calls, ..Self::with_role(Role::Assistant, None) }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::with_role(Role::Tool, Some(MessageContent::Text(content.into())))
        }
    }

    /// Construct a user message from a list of content parts (text + images).
    ///
    /// An empty list becomes an empty text body and a single text part
    /// collapses to [`MessageContent::Text`].
    pub fn user_with_parts(parts: Vec<ContentPart>) -> Self {
        let content = match parts.as_slice() {
            [] => MessageContent::Text(String::new()),
            [ContentPart::Text { text }] => MessageContent::Text(text.clone()),
            _ => MessageContent::Parts(parts),
        };
        Self::with_role(Role::User, Some(content))
    }

    /// Attach a participant name (OpenAI `name` field).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Return the plain text of this message, if it has exactly one text part.
    pub fn as_text(&self) -> Option<&str> {
        match self.content.as_ref()? {
            MessageContent::Text(t) => Some(t),
            MessageContent::Parts(parts) => match parts.as_slice() {
                [ContentPart::Text { text }] => Some(text),
                _ => None,
            },
        }
    }

    /// Collect all image URLs present in this message.
    pub fn image_urls(&self) -> Vec<&str> {
        match &self.content {
            Some(MessageContent::Parts(parts)) => parts
                .iter()
                .filter_map(|p| match p {
                    ContentPart::Image { image_url, .. } => Some(image_url.as_str()),
                    _ => None,
                })
                .collect(),
            _ => vec![],
        }
    }

    /// True for an assistant message that carries tool calls and no body.
    pub fn is_tool_call_only(&self) -> bool {
        self.role == Role::Assistant && !self.tool_calls.is_empty() && self.content.is_none()
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
