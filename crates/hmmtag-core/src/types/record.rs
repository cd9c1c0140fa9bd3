//! # Corpus Records
//!
//! Typed form of the tab-separated training corpus: one `word<TAB>tag` pair
//! per line, with blank lines marking sentence boundaries.

use serde::{Deserialize, Serialize};

use crate::error::{HmmError, Result};

/// A single line of a tagged corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorpusRecord {
    /// A token with its gold tag, both as written in the corpus.
    Token { word: String, tag: String },
    /// A blank line closing the current sentence.
    Boundary,
}

impl CorpusRecord {
    /// Convenience constructor for a token record.
    pub fn token(word: impl Into<String>, tag: impl Into<String>) -> Self {
        CorpusRecord::Token {
            word: word.into(),
            tag: tag.into(),
        }
    }

    /// Returns `true` for sentence-boundary markers.
    pub fn is_boundary(&self) -> bool {
        matches!(self, CorpusRecord::Boundary)
    }
}

/// Parse one corpus line.
///
/// `line_no` is 1-based and only used for error reporting. A trailing
/// `\n` or `\r\n` is ignored, as is anything after a second TAB.
///
/// # Errors
///
/// Returns `HmmError::MalformedRecord` for a non-blank line that is not a
/// `word<TAB>tag` pair with both halves non-empty.
pub fn parse_line(line_no: usize, line: &str) -> Result<CorpusRecord> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() {
        return Ok(CorpusRecord::Boundary);
    }

    let malformed = || HmmError::MalformedRecord {
        line: line_no,
        content: line.to_string(),
    };

    let (word, rest) = line.split_once('\t').ok_or_else(malformed)?;
    let tag = rest.split('\t').next().unwrap_or(rest).trim();
    if word.is_empty() || tag.is_empty() {
        return Err(malformed());
    }

    Ok(CorpusRecord::token(word, tag))
}

/// Parse a whole corpus text into records, preserving order.
///
/// # Examples
/// ```
/// use hmmtag_core::types::{parse_corpus, CorpusRecord};
///
/// let records = parse_corpus("The\tDT\ndog\tNN\n\n").unwrap();
/// assert_eq!(records.len(), 3);
/// assert_eq!(records[2], CorpusRecord::Boundary);
/// ```
pub fn parse_corpus(text: &str) -> Result<Vec<CorpusRecord>> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_token_line() {
        let record = parse_line(1, "Dog\tNN\n").unwrap();
        assert_eq!(record, CorpusRecord::token("Dog", "NN"));
    }

    #[test]
    fn blank_lines_are_boundaries() {
        assert!(parse_line(1, "").unwrap().is_boundary());
        assert!(parse_line(2, "\n").unwrap().is_boundary());
        assert!(parse_line(3, "  \r\n").unwrap().is_boundary());
    }

    #[test]
    fn crlf_is_stripped() {
        let record = parse_line(1, "runs\tVBZ\r\n").unwrap();
        assert_eq!(record, CorpusRecord::token("runs", "VBZ"));
    }

    #[test]
    fn missing_tab_is_malformed() {
        let err = parse_line(4, "dog NN").unwrap_err();
        assert!(matches!(err, HmmError::MalformedRecord { line: 4, .. }));
    }

    #[test]
    fn empty_tag_is_malformed() {
        assert!(parse_line(1, "dog\t").is_err());
        assert!(parse_line(1, "\tNN").is_err());
    }

    #[test]
    fn punctuation_tokens_survive() {
        let records = parse_corpus(".\t.\n,\t,\n;\t:\n").unwrap();
        assert_eq!(records[0], CorpusRecord::token(".", "."));
        assert_eq!(records[2], CorpusRecord::token(";", ":"));
    }
}
