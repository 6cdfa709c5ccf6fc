//! Per-session conversation memory: the last topic the engine answered with confidence.

use serde::{Deserialize, Serialize};

/// Single mutable cell shared by all turns of one session. No history stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMemory {
    last_topic: Option<String>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memory seeded with a topic (e.g. restoring a widget instance).
    pub fn with_last_topic(topic: impl Into<String>) -> Self {
        Self {
            last_topic: Some(topic.into()),
        }
    }

    pub fn last_topic(&self) -> Option<&str> {
        self.last_topic.as_deref()
    }

    /// Replaces the remembered topic.
    pub fn remember(&mut self, topic: &str) {
        self.last_topic = Some(topic.to_string());
    }

    pub fn clear(&mut self) {
        self.last_topic = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remember_replaces_previous_topic() {
        let mut memory = ConversationMemory::new();
        assert_eq!(memory.last_topic(), None);
        memory.remember("hours");
        memory.remember("pricing");
        assert_eq!(memory.last_topic(), Some("pricing"));
        memory.clear();
        assert_eq!(memory, ConversationMemory::default());
    }
}
