// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use chatwire_config::SystemRole;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "chatwire",
    about = "Convert chat conversations into the OpenAI chat-completions wire format",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format a conversation (JSON array or JSON Lines) as wire messages.
    ///
    /// Tool-call ids longer than 40 characters are shortened to their
    /// first 40 characters, both on assistant tool calls and on tool results.
    Format {
        /// Conversation file; reads stdin when omitted or `-`
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Wire role for system messages (overrides config)
        #[arg(long, value_enum)]
        system_role: Option<SystemRole>,
        /// Keep consecutive tool-call messages separate
        #[arg(long)]
        no_coalesce: bool,
    },

    /// Print the wire form of one or more tool-call ids.
    NormalizeId {
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },

    /// Print the effective configuration as YAML.
    ShowConfig,

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Input path for `format`, with `-` meaning stdin.
    pub fn input_path(file: &Option<PathBuf>) -> Option<&PathBuf> {
        file.as_ref().filter(|p| p.as_os_str() != "-")
    }
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "chatwire", &mut std::io::stdout());
}
