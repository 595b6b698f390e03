// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

/// Serde default helper — returns `true`.
///
/// `#[serde(default)]` on a `bool` falls back to `false`, so fields that are
/// enabled unless switched off need a named function.
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub format: FormatConfig,
}

/// Options for converting messages into the chat-completions wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Wire role used for system messages.  Newer OpenAI reasoning models
    /// expect `developer` in place of `system`.
    #[serde(default)]
    pub system_role: SystemRole,
    /// Merge consecutive tool-call-only assistant messages into one wire
    /// message, as required for parallel tool calls.
    #[serde(default = "default_true")]
    pub coalesce_tool_calls: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self { system_role: SystemRole::System, coalesce_tool_calls: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SystemRole {
    #[default]
    System,
    Developer,
}

impl std::fmt::Display for SystemRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemRole::System => write!(f, "system"),
            SystemRole::Developer => write!(f, "developer"),
        }
    }
}
