//! Text normalization and keyword matching.
//!
//! Single-word keywords match as standalone tokens (ASCII `\b` on both sides), so "book" never
//! fires inside "facebook". Only ASCII alphanumerics and `_` count as word characters. Keywords containing a space are phrases and match by plain substring
//! containment. Both paths run on normalized text.

use regex::Regex;

/// A message with at most this many whitespace-separated words counts as a short follow-up.
pub const SHORT_FOLLOW_UP_MAX_WORDS: usize = 4;

/// Lower-cases and trims surrounding whitespace. Idempotent.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// True when `word` occurs in `text` as a standalone token, ignoring case.
/// An empty `word` never matches.
pub fn has_word(text: &str, word: &str) -> bool {
    match word_pattern(word) {
        Some(Ok(re)) => re.is_match(text),
        _ => false,
    }
}

/// Applies the phrase/word rule to a single (not yet normalized) keyword.
pub fn keyword_matches(input: &str, keyword: &str) -> bool {
    let kw = normalize(keyword);
    if kw.contains(' ') {
        input.contains(&kw)
    } else {
        has_word(input, &kw)
    }
}

/// True when `text` has at most [`SHORT_FOLLOW_UP_MAX_WORDS`] non-empty tokens.
pub fn is_short_follow_up(text: &str) -> bool {
    text.split_whitespace().count() <= SHORT_FOLLOW_UP_MAX_WORDS
}

fn word_pattern(word: &str) -> Option<Result<Regex, regex::Error>> {
    if word.is_empty() {
        return None;
    }
    Some(Regex::new(&format!(
        r"(?i)(?-u:\b){}(?-u:\b)",
        regex::escape(word)
    )))
}

/// A keyword compiled once at knowledge-base load.
#[derive(Debug, Clone)]
pub(crate) enum KeywordMatcher {
    /// Multi-word keyword; substring containment.
    Phrase(String),
    /// Single word; bounded token match.
    Word(Regex),
    /// Keyword that normalized to nothing.
    Never,
}

impl KeywordMatcher {
    pub(crate) fn compile(keyword: &str) -> Result<Self, regex::Error> {
        let kw = normalize(keyword);
        if kw.contains(' ') {
            return Ok(KeywordMatcher::Phrase(kw));
        }
        match word_pattern(&kw) {
            Some(re) => Ok(KeywordMatcher::Word(re?)),
            None => Ok(KeywordMatcher::Never),
        }
    }

    /// Score contribution against normalized input: phrase hit 2, word hit 1, miss 0.
    pub(crate) fn weight(&self, input: &str) -> u32 {
        match self {
            KeywordMatcher::Phrase(phrase) if input.contains(phrase.as_str()) => 2,
            KeywordMatcher::Word(re) if re.is_match(input) => 1,
            _ => 0,
        }
    }

    pub(crate) fn is_match(&self, input: &str) -> bool {
        self.weight(input) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(normalize("  HOURS?  "), "hours?");
        assert_eq!(normalize("\tWhat About Weekends\n"), "what about weekends");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["  Do You DO nails? ", "HOURS?", "   ", "Ünïcode Café "] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_has_word_respects_boundaries() {
        assert!(has_word("can i book tomorrow", "book"));
        assert!(has_word("book?", "book"));
        assert!(has_word("(book)", "book"));
        assert!(!has_word("are you on facebook", "book"));
        assert!(!has_word("bookings please", "book"));
        assert!(!has_word("notebook", "book"));
    }

    #[test]
    fn test_has_word_is_case_insensitive_and_escapes() {
        assert!(has_word("What are your HOURS", "hours"));
        assert!(has_word("see e.g here", "e.g"));
        assert!(!has_word("see exg here", "e.g"));
    }

    #[test]
    fn test_has_word_treats_non_ascii_letters_as_separators() {
        assert!(has_word("hoursé", "hours"));
        assert!(has_word("営業hours", "hours"));
        assert!(has_word("cafébook", "book"));
        assert!(!has_word("hours_x", "hours"));
        assert!(!has_word("hours9", "hours"));
    }

    #[test]
    fn test_has_word_empty_word_never_matches() {
        assert!(!has_word("anything at all", ""));
    }

    #[test]
    fn test_phrase_keywords_use_plain_substring() {
        // A phrase matches even when glued to surrounding letters; a single word does not.
        assert!(keyword_matches("xhow muchx is it", "how much"));
        assert!(keyword_matches("so how much?", "How Much"));
        assert!(!keyword_matches("xpricex", "price"));
        assert!(keyword_matches("the price?", "Price"));
    }

    #[test]
    fn test_short_follow_up_counts_non_empty_tokens() {
        assert!(is_short_follow_up(""));
        assert!(is_short_follow_up("nails?"));
        assert!(is_short_follow_up("what   about \t the  weekends"));
        assert!(!is_short_follow_up("what about the weekend hours"));
    }

    #[test]
    fn test_matcher_weights() {
        let phrase = KeywordMatcher::compile("Do You Do").unwrap();
        let word = KeywordMatcher::compile("Tattoo").unwrap();
        let blank = KeywordMatcher::compile("   ").unwrap();
        assert_eq!(phrase.weight("what do you do here"), 2);
        assert_eq!(word.weight("a tattoo please"), 1);
        assert_eq!(word.weight("tattoos please"), 0);
        assert_eq!(blank.weight("anything"), 0);
        assert!(!blank.is_match(""));
    }
}
