//! sitehelp-core: Site Helper core library (widget config, FAQ knowledge base, response engine).
//!
//! The response engine is the only part with algorithmic content: normalization,
//! keyword/phrase scoring, topic memory for short follow-ups, and the fallback policy.
//! Everything that renders messages talks to it through the [`Responder`] seam.

mod knowledge;
mod memory;
mod responder;
mod session;
mod shared;

// Shared
pub use shared::{ResponderMode, WidgetConfig, APOLOGY_MESSAGE, DEFAULT_GREETING};

// Knowledge base and matching helpers
pub use knowledge::{
    has_word, is_short_follow_up, keyword_matches, normalize, FaqEntry, KnowledgeBase,
    KnowledgeError, MatchResult, PRICING_TOPIC, SHORT_FOLLOW_UP_MAX_WORDS,
};

// Conversation memory
pub use memory::ConversationMemory;

// Responder seam and the local engine
pub use responder::{
    BoxError, LocalResponder, Responder, ResponderError, DEFAULT_REPLY_DELAY, PRICING_CLARIFIER,
};

// UI-layer turn driver
pub use session::{ChatSession, ChatView, Role, Transcript, TranscriptRow, TypingId};
