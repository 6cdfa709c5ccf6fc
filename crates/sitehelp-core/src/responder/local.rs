//! Local FAQ engine: keyword scoring with short follow-up memory, behind an artificial delay.

use super::{Responder, ResponderError};
use crate::knowledge::{is_short_follow_up, normalize, KnowledgeBase, PRICING_TOPIC};
use crate::memory::ConversationMemory;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

const RESPONDER_NAME: &str = "local";

/// Latency the engine simulates before every reply, so callers exercise the same async path
/// they would with a remote API.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(350);

/// Appended to pricing answers reached through full scoring.
pub const PRICING_CLARIFIER: &str = "For example: hair, nails, skincare, or tattoo?";

/// Rule-based responder owning one session's [`ConversationMemory`].
///
/// One instance per conversation; the memory lock is never held across an await.
pub struct LocalResponder {
    knowledge: Arc<KnowledgeBase>,
    memory: Mutex<ConversationMemory>,
    delay: Duration,
}

impl LocalResponder {
    /// A remembered topic the knowledge base does not know is dropped.
    pub fn new(knowledge: Arc<KnowledgeBase>, mut memory: ConversationMemory) -> Self {
        if let Some(topic) = memory.last_topic() {
            if knowledge.get(topic).is_none() {
                tracing::warn!(
                    target: "sitehelp::engine",
                    topic = %topic,
                    "Seeded topic is not in the knowledge base; starting without memory"
                );
                memory.clear();
            }
        }
        Self {
            knowledge,
            memory: Mutex::new(memory),
            delay: DEFAULT_REPLY_DELAY,
        }
    }

    /// Overrides the artificial delay (zero in tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    /// Snapshot of the session memory.
    pub fn memory(&self) -> ConversationMemory {
        self.lock_memory().clone()
    }

    pub fn last_topic(&self) -> Option<String> {
        self.lock_memory().last_topic().map(str::to_string)
    }

    /// Selects a reply without the artificial delay. Total: every input yields a string.
    pub fn reply(&self, text: &str) -> String {
        let input = normalize(text);
        let mut memory = self.lock_memory();

        if is_short_follow_up(&input) {
            if let Some(topic) = memory.last_topic() {
                if let Some(answer) = self.knowledge.answer_from_topic(topic, &input) {
                    tracing::debug!(
                        target: "sitehelp::engine",
                        topic = %topic,
                        "Answered from topic memory"
                    );
                    return answer;
                }
            }
        }

        match self.knowledge.find_best_match(&input) {
            Some(best) if best.is_confident() => {
                memory.remember(&best.faq.topic);
                tracing::debug!(
                    target: "sitehelp::engine",
                    topic = %best.faq.topic,
                    score = best.score,
                    "Answered from keyword scoring"
                );
                if best.faq.topic == PRICING_TOPIC {
                    format!("{} {}", best.faq.answer, PRICING_CLARIFIER)
                } else {
                    best.faq.answer.clone()
                }
            }
            _ => {
                tracing::debug!(
                    target: "sitehelp::engine",
                    last_topic = ?memory.last_topic(),
                    "No confident match; fallback"
                );
                self.fallback()
            }
        }
    }

    /// Guidance listing the available topics in declaration order.
    fn fallback(&self) -> String {
        let topics = self.knowledge.topics();
        if topics.is_empty() {
            return "I’m not totally sure yet — can you rephrase that?".to_string();
        }
        format!(
            "I’m not totally sure yet — can you rephrase that, or choose one: {}?",
            topics.join(", ")
        )
    }

    fn lock_memory(&self) -> std::sync::MutexGuard<'_, ConversationMemory> {
        self.memory.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl Responder for LocalResponder {
    fn name(&self) -> &str {
        RESPONDER_NAME
    }

    async fn respond(&self, text: &str) -> Result<String, ResponderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.reply(text))
    }
}
