// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod types;
mod tool_id;
mod openai_compat;
pub mod conversation;

pub use types::*;
pub use tool_id::{exceeds_tool_call_id_limit, normalize_tool_call_id, MAX_TOOL_CALL_ID_LEN};
pub use openai_compat::MessageFormatter;
pub use conversation::{parse_conversation, ParseError};

use chatwire_config::Config;

/// Construct a [`MessageFormatter`] from configuration.
pub fn formatter_from_config(cfg: &Config) -> MessageFormatter {
    MessageFormatter::new(&cfg.format)
}
