//! # Unknown-Word Classifier
//!
//! Guesses a tag for a word never seen in training from its surface shape.
//! Rules are evaluated top to bottom and the first match wins, so several
//! later rules are unreachable for inputs an earlier rule already claims
//! (`"Running"` is title-cased before it is an `-ing` form).

/// Tag returned when no rule matches.
pub const DEFAULT_TAG: &str = "NN";

/// Symbols that make a token read as an amount.
const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// One entry of the cascade.
#[derive(Debug, Clone, Copy)]
pub struct UnknownWordRule {
    /// Short label, used in logs and tests.
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub tag: &'static str,
}

/// The cascade, highest priority first.
pub const RULES: &[UnknownWordRule] = &[
    UnknownWordRule { name: "determiner", matches: is_determiner, tag: "DT" },
    UnknownWordRule { name: "infinitive-to", matches: |w| w.to_lowercase() == "to", tag: "TO" },
    UnknownWordRule { name: "title-case", matches: is_title_case, tag: "NNP" },
    UnknownWordRule { name: "pronoun-it", matches: |w| w.to_lowercase() == "it", tag: "PRP" },
    UnknownWordRule { name: "numeric", matches: is_numeric, tag: "CD" },
    UnknownWordRule { name: "possessive", matches: |w| w.ends_with("'s"), tag: "POS" },
    UnknownWordRule { name: "hyphenated", matches: |w| w.contains('-'), tag: "NNP" },
    UnknownWordRule { name: "gerund", matches: |w| w.ends_with("ing"), tag: "VBG" },
    UnknownWordRule { name: "past", matches: |w| w.ends_with("ed"), tag: "VBD" },
    UnknownWordRule { name: "plural", matches: is_plural, tag: "NNS" },
    UnknownWordRule { name: "adverb", matches: |w| w.ends_with("ly"), tag: "RB" },
    UnknownWordRule { name: "superlative", matches: |w| w.ends_with("est"), tag: "JJS" },
    UnknownWordRule { name: "comparative", matches: |w| w.ends_with("er"), tag: "JJR" },
    UnknownWordRule { name: "adjective", matches: is_adjective, tag: "JJ" },
    UnknownWordRule { name: "modal", matches: |w| w == "will" || w == "may", tag: "MD" },
    UnknownWordRule { name: "base-verb", matches: |w| w == "be", tag: "VB" },
    UnknownWordRule { name: "conjunction", matches: |w| w == "and", tag: "CC" },
    UnknownWordRule { name: "punctuation", matches: |w| w == ";" || w == "--", tag: ":" },
];

/// Fallback tag for an out-of-vocabulary word.
///
/// Takes the raw token (case matters for the title-case rule).
///
/// # Examples
/// ```
/// use hmmtag_core::tagger::classify_unknown;
///
/// assert_eq!(classify_unknown("Obama"), "NNP");
/// assert_eq!(classify_unknown("3.14"), "CD");
/// assert_eq!(classify_unknown("zzqx"), "NN");
/// ```
pub fn classify_unknown(word: &str) -> &'static str {
    matching_rule(word).map_or(DEFAULT_TAG, |rule| rule.tag)
}

/// The first rule that claims `word`, if any.
pub fn matching_rule(word: &str) -> Option<&'static UnknownWordRule> {
    RULES.iter().find(|rule| (rule.matches)(word))
}

fn is_determiner(word: &str) -> bool {
    let lower = word.to_lowercase();
    lower == "the" || lower == "this"
}

/// At least one cased character; upper case only after uncased characters,
/// lower case only after cased ones.
fn is_title_case(word: &str) -> bool {
    let mut seen_cased = false;
    let mut prev_cased = false;
    for c in word.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            seen_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            seen_cased = true;
        } else {
            prev_cased = false;
        }
    }
    seen_cased
}

fn is_numeric(word: &str) -> bool {
    let all_digits = !word.is_empty() && word.chars().all(|c| c.is_numeric());
    all_digits || word.starts_with(CURRENCY_SYMBOLS) || word.parse::<f64>().is_ok()
}

fn is_plural(word: &str) -> bool {
    word.ends_with('s') && word.chars().count() > 2
}

fn is_adjective(word: &str) -> bool {
    word.ends_with("able")
        || word.ends_with("ible")
        || word == "final"
        || word.to_lowercase() == "big"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_rule_fires() {
        for (word, expected) in [
            ("the", "DT"),
            ("This", "DT"),
            ("TO", "TO"),
            ("Obama", "NNP"),
            ("it", "PRP"),
            ("1987", "CD"),
            ("$5", "CD"),
            ("€20", "CD"),
            ("3.14", "CD"),
            ("-2.5e3", "CD"),
            ("dog's", "POS"),
            ("well-known", "NNP"),
            ("jumping", "VBG"),
            ("walked", "VBD"),
            ("cats", "NNS"),
            ("quickly", "RB"),
            ("fastest", "JJS"),
            ("faster", "JJR"),
            ("readable", "JJ"),
            ("edible", "JJ"),
            ("final", "JJ"),
            ("BIG", "JJ"),
            ("will", "MD"),
            ("may", "MD"),
            ("be", "VB"),
            ("and", "CC"),
            (";", ":"),
            ("zzqx", "NN"),
        ] {
            assert_eq!(classify_unknown(word), expected, "failed for word: {word}");
        }
    }

    #[test]
    fn earlier_rules_shadow_later_ones() {
        // title case beats the suffix rules
        assert_eq!(classify_unknown("Running"), "NNP");
        assert_eq!(classify_unknown("It"), "NNP");
        // possessive beats plural
        assert_eq!(classify_unknown("john's"), "POS");
        // hyphen beats -ing
        assert_eq!(classify_unknown("ever-lasting"), "NNP");
        // -ed beats the plural check, -s beats -ly
        assert_eq!(classify_unknown("seed"), "VBD");
        assert_eq!(classify_unknown("bullys"), "NNS");
        // dashes are claimed by the hyphen rule before the punctuation rule
        assert_eq!(classify_unknown("-"), "NNP");
        assert_eq!(classify_unknown("--"), "NNP");
        // "tables" is plural before it could be -able
        assert_eq!(classify_unknown("tables"), "NNS");
    }

    #[test]
    fn case_sensitive_rules_stay_case_sensitive() {
        assert_eq!(classify_unknown("WILL"), "NN");
        assert_eq!(classify_unknown("AND"), "NN");
        assert_eq!(classify_unknown("FINAL"), "NN");
    }

    #[test]
    fn short_words_are_not_plural() {
        assert_eq!(classify_unknown("is"), "NN");
        assert_eq!(classify_unknown("its"), "NNS");
    }

    #[test]
    fn title_case_detection() {
        assert!(is_title_case("Hello"));
        assert!(is_title_case("U.S."));
        assert!(is_title_case("New-York"));
        assert!(!is_title_case("HELLO"));
        assert!(!is_title_case("hello"));
        assert!(!is_title_case("McDonald"));
        assert!(!is_title_case("123"));
    }

    #[test]
    fn classification_is_pure() {
        let words = ["Zyx", "glorp", "1,000", "re-entry", "biggest"];
        let first: Vec<_> = words.iter().map(|w| classify_unknown(w)).collect();
        for _ in 0..10 {
            let again: Vec<_> = words.iter().map(|w| classify_unknown(w)).collect();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn matching_rule_names_the_rule() {
        assert_eq!(matching_rule("walked").map(|r| r.name), Some("past"));
        assert!(matching_rule("zzqx").is_none());
    }
}
