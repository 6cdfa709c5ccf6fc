//! Chat session: the UI-layer turn driver.
//!
//! A [`ChatSession`] owns one [`ChatView`] and one responder. It trims submissions, drops empty
//! ones, renders the user message, shows a typing indicator for the lifetime of the responder
//! call, and renders either the reply or the fixed apology. Failures are logged here and
//! nowhere else.

use crate::responder::Responder;
use crate::shared::{APOLOGY_MESSAGE, DEFAULT_GREETING};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Handle to one visible typing indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypingId(Uuid);

impl TypingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TypingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TypingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "typing-{}", self.0)
    }
}

/// Rendering surface the session drives. Implemented by terminals, web panels, test doubles.
pub trait ChatView: Send {
    fn render_user(&mut self, text: &str);
    fn render_bot(&mut self, text: &str);
    fn show_typing(&mut self) -> TypingId;
    fn hide_typing(&mut self, id: TypingId);
}

/// One widget instance: a view, a responder, and whether the greeting was shown.
pub struct ChatSession<V: ChatView> {
    responder: Arc<dyn Responder>,
    view: V,
    greeting: String,
    greeted: bool,
}

impl<V: ChatView> ChatSession<V> {
    pub fn new(responder: Arc<dyn Responder>, view: V) -> Self {
        Self {
            responder,
            view,
            greeting: DEFAULT_GREETING.to_string(),
            greeted: false,
        }
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Opens the panel. The greeting is rendered on the first open only.
    pub fn open(&mut self) {
        if !self.greeted {
            self.greeted = true;
            self.view.render_bot(&self.greeting);
        }
    }

    /// Handles one submitted message. Returns the rendered bot text, or `None` when the
    /// submission was blank and nothing happened.
    pub async fn submit(&mut self, raw: &str) -> Option<String> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        self.view.render_user(text);
        let typing = self.view.show_typing();

        let reply = match self.responder.respond(text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(
                    target: "sitehelp::session",
                    responder = self.responder.name(),
                    error = %e,
                    "Responder failed"
                );
                APOLOGY_MESSAGE.to_string()
            }
        };

        self.view.hide_typing(typing);
        self.view.render_bot(&reply);
        Some(reply)
    }

    pub fn responder_name(&self) -> &str {
        self.responder.name()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}

/// Who wrote a transcript row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One rendered message with its local `HH:MM` time stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptRow {
    pub role: Role,
    pub text: String,
    pub time: String,
}

/// In-memory [`ChatView`]: keeps rendered rows and the currently visible typing indicators.
#[derive(Debug, Default)]
pub struct Transcript {
    rows: Vec<TranscriptRow>,
    typing: Vec<TypingId>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[TranscriptRow] {
        &self.rows
    }

    pub fn is_typing(&self) -> bool {
        !self.typing.is_empty()
    }

    fn push(&mut self, role: Role, text: &str) {
        self.rows.push(TranscriptRow {
            role,
            text: text.to_string(),
            time: chrono::Local::now().format("%H:%M").to_string(),
        });
    }
}

impl ChatView for Transcript {
    fn render_user(&mut self, text: &str) {
        self.push(Role::User, text);
    }

    fn render_bot(&mut self, text: &str) {
        self.push(Role::Bot, text);
    }

    fn show_typing(&mut self) -> TypingId {
        let id = TypingId::new();
        self.typing.push(id);
        id
    }

    fn hide_typing(&mut self, id: TypingId) {
        self.typing.retain(|t| *t != id);
    }
}
