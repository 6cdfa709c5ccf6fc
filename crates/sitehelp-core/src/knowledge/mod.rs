//! FAQ knowledge base: an ordered list of topics, each with trigger keywords and one answer.
//!
//! Declaration order matters: it is the tie-break order of the scorer.

mod matcher;
mod scoring;

pub use matcher::{has_word, is_short_follow_up, keyword_matches, normalize, SHORT_FOLLOW_UP_MAX_WORDS};
pub use scoring::MatchResult;

use crate::shared::WidgetConfig;
use matcher::KeywordMatcher;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Topic whose scored answers get a clarifying question appended.
pub const PRICING_TOPIC: &str = "pricing";

/// One FAQ topic. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Unique topic identifier (e.g. "hours").
    pub topic: String,
    /// Single words or multi-word phrases, in order.
    pub keywords: Vec<String>,
    /// Canned answer for the topic.
    pub answer: String,
}

impl FaqEntry {
    pub fn new(topic: &str, keywords: &[&str], answer: &str) -> Self {
        Self {
            topic: topic.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            answer: answer.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge base {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid knowledge base JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("knowledge base entry #{index} has an empty topic")]
    EmptyTopic { index: usize },
    #[error("duplicate topic in knowledge base: {0}")]
    DuplicateTopic(String),
    #[error("keyword {keyword:?} of topic {topic} cannot be compiled: {source}")]
    Keyword {
        topic: String,
        keyword: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledEntry {
    pub(crate) faq: FaqEntry,
    pub(crate) matchers: Vec<KeywordMatcher>,
}

/// Static, ordered knowledge base with keywords compiled once.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<CompiledEntry>,
}

impl KnowledgeBase {
    /// Validates and compiles `entries`. Topics must be non-empty and unique; an empty list is fine.
    pub fn new(entries: Vec<FaqEntry>) -> Result<Self, KnowledgeError> {
        let mut seen = HashSet::new();
        let mut compiled = Vec::with_capacity(entries.len());
        for (index, faq) in entries.into_iter().enumerate() {
            if faq.topic.trim().is_empty() {
                return Err(KnowledgeError::EmptyTopic { index });
            }
            if !seen.insert(faq.topic.clone()) {
                return Err(KnowledgeError::DuplicateTopic(faq.topic));
            }
            let matchers = faq
                .keywords
                .iter()
                .map(|kw| {
                    KeywordMatcher::compile(kw).map_err(|source| KnowledgeError::Keyword {
                        topic: faq.topic.clone(),
                        keyword: kw.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            compiled.push(CompiledEntry { faq, matchers });
        }
        Ok(Self { entries: compiled })
    }

    /// A knowledge base with no topics. Every input falls back.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// The built-in salon FAQ: hours, pricing, booking, services.
    pub fn builtin() -> Self {
        Self::new(builtin_entries()).expect("built-in knowledge base is valid")
    }

    /// Parses a JSON array of `{ topic, keywords, answer }` objects.
    pub fn from_json_str(json: &str) -> Result<Self, KnowledgeError> {
        let entries: Vec<FaqEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Loads a JSON knowledge base file.
    pub fn load_json_path<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let kb = Self::from_json_str(&raw)?;
        tracing::info!(
            target: "sitehelp::knowledge",
            path = %path.display(),
            topics = kb.len(),
            "Knowledge base loaded from file"
        );
        Ok(kb)
    }

    /// `kb_path` from config when set, else the built-in FAQ.
    pub fn from_config(config: &WidgetConfig) -> Result<Self, KnowledgeError> {
        match config.kb_path.as_deref() {
            Some(path) => Self::load_json_path(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &FaqEntry> {
        self.entries.iter().map(|e| &e.faq)
    }

    /// Topic identifiers in declaration order.
    pub fn topics(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.faq.topic.as_str()).collect()
    }

    pub fn get(&self, topic: &str) -> Option<&FaqEntry> {
        self.compiled(topic).map(|e| &e.faq)
    }

    pub(crate) fn compiled(&self, topic: &str) -> Option<&CompiledEntry> {
        self.entries.iter().find(|e| e.faq.topic == topic)
    }

    pub(crate) fn compiled_entries(&self) -> &[CompiledEntry] {
        &self.entries
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_entries() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "hours",
            &["hours", "open", "close", "closing", "schedule", "weekdays", "weekends"],
            "We’re open Mon–Fri 9am–6pm, Sat 10am–4pm, and closed Sundays.",
        ),
        FaqEntry::new(
            PRICING_TOPIC,
            &["price", "pricing", "cost", "rates", "how much", "fee"],
            "Pricing depends on the service. Tell me what you’re looking for and I’ll point you in the right direction.",
        ),
        FaqEntry::new(
            "booking",
            &["book", "booking", "appointment", "schedule", "reserve", "availability"],
            "You can book by using our contact form. If you tell me the service + day, I’ll suggest next steps.",
        ),
        FaqEntry::new(
            "services",
            &["services", "offer", "do you do", "tattoo", "hair", "nails", "esthetician", "facial"],
            "We offer hair, nails, skincare, and tattoo services. What service are you interested in?",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_has_four_topics_in_order() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.topics(), vec!["hours", "pricing", "booking", "services"]);
        assert_eq!(kb.get("pricing").unwrap().keywords.len(), 6);
        assert!(kb.get("parking").is_none());
    }

    #[test]
    fn test_duplicate_topic_rejected() {
        let err = KnowledgeBase::new(vec![
            FaqEntry::new("hours", &["open"], "a"),
            FaqEntry::new("hours", &["close"], "b"),
        ])
        .unwrap_err();
        assert!(matches!(err, KnowledgeError::DuplicateTopic(ref t) if t == "hours"));
    }

    #[test]
    fn test_empty_topic_rejected() {
        let err = KnowledgeBase::new(vec![
            FaqEntry::new("hours", &["open"], "a"),
            FaqEntry::new("  ", &["close"], "b"),
        ])
        .unwrap_err();
        assert!(matches!(err, KnowledgeError::EmptyTopic { index: 1 }));
    }

    #[test]
    fn test_empty_kb_is_allowed() {
        let kb = KnowledgeBase::new(Vec::new()).unwrap();
        assert!(kb.is_empty());
        assert!(kb.topics().is_empty());
    }

    #[test]
    fn test_load_json_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"topic":"parking","keywords":["parking","park","where to leave"],"answer":"Free lot behind the shop."}}]"#
        )
        .unwrap();
        let kb = KnowledgeBase::load_json_path(file.path()).unwrap();
        assert_eq!(kb.topics(), vec!["parking"]);
        assert_eq!(kb.get("parking").unwrap().answer, "Free lot behind the shop.");
    }

    #[test]
    fn test_load_json_path_missing_file_is_io_error() {
        let err = KnowledgeBase::load_json_path("no/such/faq.json").unwrap_err();
        assert!(matches!(err, KnowledgeError::Io { .. }));
    }

    #[test]
    fn test_from_json_str_rejects_malformed() {
        let err = KnowledgeBase::from_json_str(r#"[{"topic":"x"}]"#).unwrap_err();
        assert!(matches!(err, KnowledgeError::Json(_)));
    }

    #[test]
    fn test_shipped_faq_json_matches_builtin() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/faq.json");
        let from_file = KnowledgeBase::load_json_path(path).unwrap();
        assert!(from_file.entries().eq(KnowledgeBase::builtin().entries()));
    }

    #[test]
    fn test_from_config_uses_builtin_without_kb_path() {
        let kb = KnowledgeBase::from_config(&WidgetConfig::default()).unwrap();
        assert_eq!(kb.len(), 4);
    }
}
