// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Tool-call identifier normalization.
//!
//! The chat-completions API rejects tool-call ids longer than
//! [`MAX_TOOL_CALL_ID_LEN`] characters, while the Responses API emits ids
//! such as `fc_0f0e50a1…` that are well past that.  Every id written to the
//! wire goes through [`normalize_tool_call_id`] so that the `id` of a tool
//! call and the `tool_call_id` of its result are shortened identically.
//!
//! Shortening is a plain prefix slice.  Two long ids sharing their first 40
//! characters map to the same value; that is accepted.

/// Longest tool-call id accepted by the chat-completions API, in characters.
pub const MAX_TOOL_CALL_ID_LEN: usize = 40;

/// Return `id` unchanged if it has at most [`MAX_TOOL_CALL_ID_LEN`]
/// characters, otherwise its first [`MAX_TOOL_CALL_ID_LEN`] characters.
///
/// Counts Unicode scalar values, so the cut never lands inside a multi-byte
/// character.
pub fn normalize_tool_call_id(id: &str) -> &str {
    match id.char_indices().nth(MAX_TOOL_CALL_ID_LEN) {
        Some((cut, _)) => &id[..cut],
        None => id,
    }
}

/// True when [`normalize_tool_call_id`] would shorten `id`.
pub fn exceeds_tool_call_id_limit(id: &str) -> bool {
    id.char_indices().nth(MAX_TOOL_CALL_ID_LEN).is_some()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
