// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Reading conversations from JSON or JSON Lines.
//!
//! Two layouts are accepted:
//! - a single JSON array of message objects
//! - JSON Lines, one message object per non-blank line
//!
//! Messages are validated structurally before they reach the formatter.

use crate::{Message, Role};

/// Parse an error with context.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid JSON conversation: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("line {line}: invalid JSON message: {source}")]
    InvalidLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("message {index}: tool message is missing tool_call_id")]
    MissingToolCallId { index: usize },
    #[error("message {index}: tool call has an empty id")]
    EmptyToolCallId { index: usize },
    #[error("message {index}: tool_calls are only allowed on assistant messages")]
    UnexpectedToolCalls { index: usize },
}

/// Parse a conversation from JSON array or JSON Lines text.
pub fn parse_conversation(text: &str) -> Result<Vec<Message>, ParseError> {
    let messages = if text.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<Message>>(text).map_err(ParseError::InvalidJson)?
    } else {
        parse_json_lines(text)?
    };
    for (index, m) in messages.iter().enumerate() {
        validate(index, m)?;
    }
    Ok(messages)
}

fn parse_json_lines(text: &str) -> Result<Vec<Message>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| {
            serde_json::from_str(l).map_err(|source| ParseError::InvalidLine { line: i + 1, source })
        })
        .collect()
}

fn validate(index: usize, m: &Message) -> Result<(), ParseError> {
    if m.role == Role::Tool && m.tool_call_id.is_none() {
        return Err(ParseError::MissingToolCallId { index });
    }
    if !m.tool_calls.is_empty() && m.role != Role::Assistant {
        return Err(ParseError::UnexpectedToolCalls { index });
    }
    if m.tool_calls.iter().any(|tc| tc.id.is_empty()) {
        return Err(ParseError::EmptyToolCallId { index });
    }
    Ok(())
}
