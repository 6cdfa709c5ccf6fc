//! Site Helper console: a terminal chat panel over the configured responder.
//! Run: cargo run -p sitehelp-console
//! Type a message and press Enter; `/quit` (or EOF) closes the panel.

use sitehelp_core::{ChatSession, ChatView, KnowledgeBase, TypingId, WidgetConfig};
use sitehelp_providers::ChatProvider;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const QUIT_COMMAND: &str = "/quit";

/// Writes rendered rows as `name: text` lines. The typing indicator is a single `…` line.
struct ConsoleView<W: Write + Send> {
    out: W,
    bot_name: String,
}

impl<W: Write + Send> ConsoleView<W> {
    fn new(out: W, bot_name: impl Into<String>) -> Self {
        Self {
            out,
            bot_name: bot_name.into(),
        }
    }

    fn line(&mut self, who: &str, text: &str) {
        if let Err(e) = writeln!(self.out, "{}: {}", who, text).and_then(|_| self.out.flush()) {
            tracing::warn!(target: "sitehelp::console", "Failed to write to console: {}", e);
        }
    }
}

impl<W: Write + Send> ChatView for ConsoleView<W> {
    fn render_user(&mut self, text: &str) {
        self.line("you", text);
    }

    fn render_bot(&mut self, text: &str) {
        let name = self.bot_name.clone();
        self.line(&name, text);
    }

    fn show_typing(&mut self) -> TypingId {
        let name = self.bot_name.clone();
        self.line(&name, "…");
        TypingId::new()
    }

    fn hide_typing(&mut self, _id: TypingId) {}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[sitehelp-console] .env not loaded: {} (using system environment)", e);
    }

    // Logs go to stderr; stdout carries the transcript.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = WidgetConfig::load()?;
    let knowledge = Arc::new(KnowledgeBase::from_config(&config)?);
    let provider = Arc::new(ChatProvider::from_config(&config, knowledge));

    println!("{} — {}", config.bot_name, config.bot_subtitle);
    let view = ConsoleView::new(std::io::stdout(), config.bot_name.clone());
    let mut session = ChatSession::new(provider, view).with_greeting(config.greeting.clone());
    session.open();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == QUIT_COMMAND {
            break;
        }
        session.submit(&line).await;
    }
    Ok(())
}
