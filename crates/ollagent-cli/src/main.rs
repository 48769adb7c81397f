//! `ollagent`: ask a local model one question per line
//!
//! Every line is an independent turn; nothing is remembered between them.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use ollagent_core::config::{ConfigProvider, FileConfigProvider};
use ollagent_core::logging::{ConsoleLogger, SharedLogger};
use ollagent_core::{log_debug, log_error, Orchestrator};

const BANNER: &str = "Local Ollama Agent (stateless) - type 'exit' to quit";

struct Terminal {
    color: bool,
}

impl Terminal {
    fn banner(&self) {
        if self.color {
            println!("{}\n", BANNER.dimmed());
        } else {
            println!("{}\n", BANNER);
        }
    }

    fn prompt(&self) -> std::io::Result<()> {
        let mut out = std::io::stdout();
        if self.color {
            write!(out, "{} ", "You:".green())?;
        } else {
            write!(out, "You: ")?;
        }
        out.flush()
    }

    fn answer(&self, text: &str) {
        if self.color {
            println!("{} {}\n", "Assistant:".magenta(), text);
        } else {
            println!("Assistant: {}\n", text);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let source = FileConfigProvider::user();
    let config = source
        .load()
        .with_context(|| format!("failed to load {}", source.path().display()))?
        .with_env_overrides()
        .context("invalid OLLAGENT_* environment override")?;

    let logger: SharedLogger = Arc::new(ConsoleLogger::new(config.debug, config.color));
    log_debug!(
        logger,
        "using model {} at {} (config: {})",
        config.model,
        config.api_base,
        source.path().display()
    );

    let agent = Orchestrator::from_config(&config, Arc::clone(&logger))
        .context("failed to set up the agent")?;
    let terminal = Terminal { color: config.color };

    terminal.banner();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        terminal.prompt()?;
        let Some(line) = lines.next_line().await? else {
            println!("\n");
            break;
        };

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question.to_lowercase().as_str(), "exit" | "quit") {
            break;
        }

        match agent.run_turn(question).await {
            Ok(answer) => terminal.answer(&answer),
            Err(e) => {
                log_error!(logger, "turn failed: {}", e);
                terminal.answer(&e.user_message());
            }
        }
    }

    Ok(())
}
