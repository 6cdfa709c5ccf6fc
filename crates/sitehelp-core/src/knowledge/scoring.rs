//! Additive keyword scoring and topic follow-ups over the knowledge base.

use super::matcher::is_short_follow_up;
use super::{FaqEntry, KnowledgeBase};

/// Best entry of one scoring pass. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult<'a> {
    pub faq: &'a FaqEntry,
    pub score: u32,
}

impl MatchResult<'_> {
    /// At least one keyword hit.
    pub fn is_confident(&self) -> bool {
        self.score >= 1
    }
}

impl KnowledgeBase {
    /// Scores every entry against normalized `input` (phrase hit +2, word hit +1) and returns
    /// the highest. Ties keep the earlier entry. A zero-score best is still returned; `None`
    /// only for an empty knowledge base.
    pub fn find_best_match(&self, input: &str) -> Option<MatchResult<'_>> {
        let mut best: Option<MatchResult<'_>> = None;
        for entry in self.compiled_entries() {
            let score: u32 = entry.matchers.iter().map(|m| m.weight(input)).sum();
            if best.map_or(true, |b| score > b.score) {
                best = Some(MatchResult {
                    faq: &entry.faq,
                    score,
                });
            }
        }
        best
    }

    /// Answers normalized `input` in the context of a remembered `topic`.
    ///
    /// Any keyword hit of that topic returns its answer. A short input without a hit gets a
    /// hedging confirmation that echoes it. Otherwise, or if the topic is gone, `None`.
    pub fn answer_from_topic(&self, topic: &str, input: &str) -> Option<String> {
        let entry = self.compiled(topic)?;

        if entry.matchers.iter().any(|m| m.is_match(input)) {
            return Some(entry.faq.answer.clone());
        }

        if is_short_follow_up(input) {
            return Some(format!(
                "When you say \"{}\", are you asking about {}? If yes, here’s the info: {}",
                input, entry.faq.topic, entry.faq.answer
            ));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::builtin()
    }

    #[test]
    fn test_single_word_hit_scores_one() {
        let kb = kb();
        let best = kb.find_best_match("what are your hours?").unwrap();
        assert_eq!(best.faq.topic, "hours");
        assert_eq!(best.score, 1);
        assert!(best.is_confident());
    }

    #[test]
    fn test_phrase_hit_scores_two() {
        let kb = kb();
        let best = kb.find_best_match("how much for a cut").unwrap();
        assert_eq!(best.faq.topic, "pricing");
        assert_eq!(best.score, 2);
    }

    #[test]
    fn test_scores_accumulate_across_keywords() {
        let kb = kb();
        // "how much" (2) + "price" (1) + "fee" (1)
        let best = kb.find_best_match("how much is the price and fee").unwrap();
        assert_eq!(best.faq.topic, "pricing");
        assert_eq!(best.score, 4);
    }

    #[test]
    fn test_facebook_does_not_trigger_booking() {
        let kb = kb();
        let best = kb.find_best_match("are you on facebook").unwrap();
        assert_eq!(best.score, 0);
        assert!(!best.is_confident());
    }

    #[test]
    fn test_tie_goes_to_first_declared_topic() {
        // "schedule" is a keyword of both hours (first) and booking.
        let kb = kb();
        let best = kb.find_best_match("schedule").unwrap();
        assert_eq!(best.faq.topic, "hours");
        assert_eq!(best.score, 1);
    }

    #[test]
    fn test_zero_score_still_returns_first_entry() {
        let kb = kb();
        let best = kb.find_best_match("banana spaceship").unwrap();
        assert_eq!(best.faq.topic, "hours");
        assert_eq!(best.score, 0);
    }

    #[test]
    fn test_empty_kb_has_no_best() {
        assert!(KnowledgeBase::empty().find_best_match("hours").is_none());
    }

    #[test]
    fn test_answer_from_topic_keyword_hit() {
        let kb = kb();
        let answer = kb.answer_from_topic("pricing", "nails? what's the cost").unwrap();
        assert_eq!(answer, kb.get("pricing").unwrap().answer);
    }

    #[test]
    fn test_answer_from_topic_hedges_short_input() {
        let kb = kb();
        let answer = kb.answer_from_topic("pricing", "nails?").unwrap();
        assert_eq!(
            answer,
            format!(
                "When you say \"nails?\", are you asking about pricing? If yes, here’s the info: {}",
                kb.get("pricing").unwrap().answer
            )
        );
    }

    #[test]
    fn test_answer_from_topic_long_input_without_hit_is_none() {
        let kb = kb();
        assert!(kb
            .answer_from_topic("pricing", "tell me something about your lovely staff")
            .is_none());
    }

    #[test]
    fn test_answer_from_topic_unknown_topic_is_none() {
        assert!(kb().answer_from_topic("parking", "ok").is_none());
    }
}
