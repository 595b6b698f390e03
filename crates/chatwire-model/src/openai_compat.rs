// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Message formatting for OpenAI-compatible chat completion APIs.
//!
//! [`MessageFormatter`] turns [`Message`]s into the `/chat/completions`
//! wire shape.  Tool-call ids are shortened with
//! [`normalize_tool_call_id`](crate::normalize_tool_call_id) in both places
//! they appear on the wire:
//! - `tool_calls[].id` on assistant messages
//! - `tool_call_id` on tool messages

use std::collections::HashMap;

use chatwire_config::{FormatConfig, SystemRole};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::{
    tool_id::{exceeds_tool_call_id_limit, normalize_tool_call_id},
    ContentPart, Message, MessageContent, Role, ToolCall,
};

/// Stateless converter from [`Message`] to OpenAI wire JSON.
///
/// Holds only immutable options, so one instance can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    system_role: SystemRole,
    coalesce_tool_calls: bool,
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new(&FormatConfig::default())
    }
}

impl MessageFormatter {
    pub fn new(cfg: &FormatConfig) -> Self {
        Self { system_role: cfg.system_role, coalesce_tool_calls: cfg.coalesce_tool_calls }
    }

    fn role_str(&self, r: Role) -> &'static str {
        match r {
            Role::System => match self.system_role {
                SystemRole::System => "system",
                SystemRole::Developer => "developer",
            },
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }

    /// Format a single message.
    ///
    /// Absent fields are omitted, except that tool messages always carry a
    /// `content` (empty string when the result had no body).
    pub fn format_message(&self, m: &Message) -> Value {
        let mut obj = Map::new();
        obj.insert("role".into(), json!(self.role_str(m.role)));

        match &m.content {
            Some(content) => {
                obj.insert("content".into(), content_to_json(content));
            }
            None if m.role == Role::Tool => {
                obj.insert("content".into(), json!(""));
            }
            None => {}
        }

        if let Some(name) = &m.name {
            obj.insert("name".into(), json!(name));
        }

        if !m.tool_calls.is_empty() {
            let calls: Vec<Value> = m.tool_calls.iter().map(tool_call_to_json).collect();
            obj.insert("tool_calls".into(), Value::Array(calls));
        }

        if let Some(id) = &m.tool_call_id {
            obj.insert("tool_call_id".into(), json!(wire_tool_call_id(id)));
        }

        Value::Object(obj)
    }

    /// Convert a whole conversation into the OpenAI wire-format JSON array.
    ///
    /// **Parallel tool call coalescing**: OpenAI requires all tool calls from
    /// one assistant turn inside a *single* assistant message.  With
    /// `coalesce_tool_calls` enabled, consecutive assistant messages that
    /// carry only tool calls and share the same `name` are merged before
    /// formatting.  The merged `tool_calls` array keeps the original order.
    pub fn format_messages(&self, messages: &[Message]) -> Vec<Value> {
        warn_on_id_collisions(messages);

        let mut result: Vec<Value> = Vec::with_capacity(messages.len());
        let mut i = 0;

        while i < messages.len() {
            let m = &messages[i];
            i += 1;

            if self.coalesce_tool_calls && m.is_tool_call_only() {
                let mut calls: Vec<ToolCall> = m.tool_calls.clone();
                while i < messages.len()
                    && messages[i].is_tool_call_only()
                    && messages[i].name == m.name
                {
                    calls.extend(messages[i].tool_calls.iter().cloned());
                    i += 1;
                }
                let merged = Message { tool_calls: calls, ..m.clone() };
                result.push(self.format_message(&merged));
                continue;
            }

            result.push(self.format_message(m));
        }

        result
    }
}

fn wire_tool_call_id(id: &str) -> &str {
    let out = normalize_tool_call_id(id);
    if exceeds_tool_call_id_limit(id) {
        debug!(original = id, truncated = out, "shortened tool call id");
    }
    out
}

fn tool_call_to_json(tc: &ToolCall) -> Value {
    json!({
        "id": wire_tool_call_id(&tc.id),
        "type": tc.kind,
        "function": {
            "name": tc.function.name,
            "arguments": tc.function.arguments,
        }
    })
}

fn content_to_json(content: &MessageContent) -> Value {
    match content {
        MessageContent::Text(t) => json!(t),
        MessageContent::Parts(parts) if !parts.is_empty() => {
            let arr: Vec<Value> = parts
                .iter()
                .map(|p| match p {
                    ContentPart::Text { text } => json!({ "type": "text", "text": text }),
                    ContentPart::Image { image_url, detail } => {
                        let mut img_obj = json!({ "url": image_url });
                        if let Some(d) = detail {
                            img_obj["detail"] = json!(d);
                        }
                        json!({ "type": "image_url", "image_url": img_obj })
                    }
                })
                .collect();
            json!(arr)
        }
        MessageContent::Parts(_) => json!(""),
    }
}

/// Log distinct ids that shorten to the same wire id.  Output is unaffected.
fn warn_on_id_collisions(messages: &[Message]) {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    let ids = messages.iter().flat_map(|m| {
        m.tool_calls.iter().map(|tc| tc.id.as_str()).chain(m.tool_call_id.as_deref())
    });
    for id in ids {
        let short = normalize_tool_call_id(id);
        match seen.get(short) {
            Some(prev) if *prev != id => {
                warn!(first = *prev, second = id, wire_id = short, "tool call ids collide after shortening");
            }
            Some(_) => {}
            None => {
                seen.insert(short, id);
            }
        }
    }
}
