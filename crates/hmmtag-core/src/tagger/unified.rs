//! # Unified Tagger Interface
//!
//! Pairs a trained model with decoding options and handles the blank-line
//! sentence markers found in token files.

use crate::error::{HmmError, Result};
use crate::model::{HmmModel, OOV_FLOOR};
use crate::tagger::viterbi::ViterbiDecoder;

/// How an out-of-vocabulary token's guessed tag affects scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OovPolicy {
    /// The guessed tag scores `ln(1)`, every other tag scores the floor.
    #[default]
    Prior,
    /// Only the guessed tag can be assigned to the token.
    Restrict,
}

/// How a token stream containing blank lines is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentenceMode {
    /// All non-blank tokens form one sequence.
    #[default]
    Continuous,
    /// Every blank-delimited sentence is decoded on its own.
    PerSentence,
}

/// Configuration for decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    /// Handling of tokens never seen in training
    pub oov_policy: OovPolicy,
    /// Log-score of any event missing from the probability tables
    pub floor: f64,
    /// Upper bound on tokens per decoded sequence
    pub max_tokens: Option<usize>,
    /// Treatment of blank-line markers in `tag_lines`
    pub sentence_mode: SentenceMode,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            oov_policy: OovPolicy::Prior,
            floor: OOV_FLOOR,
            max_tokens: None,
            sentence_mode: SentenceMode::Continuous,
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unknown-word policy.
    pub fn with_oov_policy(mut self, policy: OovPolicy) -> Self {
        self.oov_policy = policy;
        self
    }

    /// Set the floor used for unseen events.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Reject sequences longer than `max` tokens.
    pub fn with_max_tokens(mut self, max: usize) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_sentence_mode(mut self, mode: SentenceMode) -> Self {
        self.sentence_mode = mode;
        self
    }
}

/// A trained model ready to tag token streams.
#[derive(Debug, Clone)]
pub struct Tagger {
    model: HmmModel,
    config: DecoderConfig,
}

impl Tagger {
    /// Create a tagger with the given configuration.
    pub fn new(model: HmmModel, config: DecoderConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &HmmModel {
        &self.model
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// A decoder borrowing this tagger's model.
    pub fn decoder(&self) -> ViterbiDecoder<'_> {
        ViterbiDecoder::new(&self.model, self.config.clone())
    }

    /// Tag one token sequence.
    ///
    /// # Examples
    /// ```
    /// use hmmtag_core::model::HmmModel;
    /// use hmmtag_core::tagger::{DecoderConfig, Tagger};
    /// use hmmtag_core::types::parse_corpus;
    ///
    /// let records = parse_corpus("the\tDT\ndog\tNN\nruns\tVBZ\n.\t.\n\n").unwrap();
    /// let tagger = Tagger::new(HmmModel::train(&records).unwrap(), DecoderConfig::default());
    ///
    /// let tags = tagger.tag(&["the", "dog", "runs", "."]).unwrap();
    /// assert_eq!(tags, vec!["DT", "NN", "VBZ", "."]);
    /// ```
    pub fn tag<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<String>> {
        self.decoder().decode(tokens)
    }

    /// Tag a token file's lines.
    ///
    /// Blank lines are sentence markers: they are skipped, and the result
    /// holds one tag per non-blank line in order.
    pub fn tag_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<String>> {
        let decoder = self.decoder();

        match self.config.sentence_mode {
            SentenceMode::Continuous => {
                let tokens: Vec<&str> = lines
                    .iter()
                    .map(AsRef::as_ref)
                    .filter(|line| !is_blank(line))
                    .collect();
                decoder.decode(&tokens)
            }
            SentenceMode::PerSentence => {
                let mut tags = Vec::with_capacity(lines.len());
                for sentence in split_sentences(lines) {
                    tags.extend(decoder.decode(&sentence)?);
                }
                Ok(tags)
            }
        }
    }
}

/// Returns `true` for a sentence-boundary line.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Group non-blank lines into blank-delimited sentences.
pub fn split_sentences<S: AsRef<str>>(lines: &[S]) -> Vec<Vec<&str>> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();
    for line in lines.iter().map(AsRef::as_ref) {
        if is_blank(line) {
            if !current.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}

/// One line of tagged output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggedLine<'a> {
    /// A sentence boundary, written back unchanged.
    Blank,
    Token { word: &'a str, tag: &'a str },
}

/// Re-insert blank lines between the tags produced by `tag_lines`.
///
/// # Errors
///
/// Returns `HmmError::TagCountMismatch` unless there is exactly one tag per
/// non-blank line.
pub fn align_tags<'a, S, T>(lines: &'a [S], tags: &'a [T]) -> Result<Vec<TaggedLine<'a>>>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let expected = lines.iter().filter(|line| !is_blank(line.as_ref())).count();
    if expected != tags.len() {
        return Err(HmmError::TagCountMismatch {
            expected,
            got: tags.len(),
        });
    }

    let mut tags = tags.iter().map(AsRef::as_ref);
    let aligned = lines
        .iter()
        .map(AsRef::as_ref)
        .map(|word| {
            if is_blank(word) {
                TaggedLine::Blank
            } else {
                // counts were checked above
                let tag = tags.next().unwrap_or_default();
                TaggedLine::Token { word, tag }
            }
        })
        .collect();
    Ok(aligned)
}

/// Convenience function to tag tokens with default settings.
pub fn tag(model: &HmmModel, tokens: &[&str]) -> Result<Vec<String>> {
    ViterbiDecoder::new(model, DecoderConfig::default()).decode(tokens)
}
