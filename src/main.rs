// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod cli;

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use chatwire_config::Config;
use chatwire_model::{normalize_tool_call_id, parse_conversation, MessageFormatter};
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Completions { shell } => {
            cli::print_completions(shell);
            Ok(())
        }
        Commands::NormalizeId { ids } => {
            let mut out = io::stdout().lock();
            for id in &ids {
                writeln!(out, "{}", normalize_tool_call_id(id))?;
            }
            Ok(())
        }
        Commands::ShowConfig => {
            let config = chatwire_config::load(cli.config.as_deref())?;
            print!("{}", serde_yaml::to_string(&config).context("serializing config")?);
            Ok(())
        }
        Commands::Format { ref file, pretty, system_role, no_coalesce } => {
            let mut config = chatwire_config::load(cli.config.as_deref())?;
            if let Some(role) = system_role {
                config.format.system_role = role;
            }
            if no_coalesce {
                config.format.coalesce_tool_calls = false;
            }
            format_cmd(&config, Commands::input_path(file), pretty)
        }
    }
}

/// Read a conversation, format it, and print the wire JSON array to stdout.
fn format_cmd(config: &Config, file: Option<&PathBuf>, pretty: bool) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading conversation {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading conversation from stdin")?;
            buf
        }
    };

    let messages = parse_conversation(&text).context("parsing conversation")?;
    debug!(messages = messages.len(), "formatting conversation");

    let wire = MessageFormatter::new(&config.format).format_messages(&messages);
    let rendered = if pretty {
        serde_json::to_string_pretty(&wire)?
    } else {
        serde_json::to_string(&wire)?
    };

    let mut out = io::stdout().lock();
    writeln!(out, "{rendered}")?;
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
