//! # Viterbi Decoding for the HMM
//!
//! First-order Viterbi over a trained [`HmmModel`]: a forward pass filling a
//! trellis of cumulative log-scores with backpointers, then a backtrace from
//! the best final tag. All scores are natural logs and are combined by
//! addition.

use tracing::{debug, trace};

use crate::error::{HmmError, Result};
use crate::model::{lookup, HmmModel};
use crate::tagger::unified::{DecoderConfig, OovPolicy};
use crate::tagger::unknown::classify_unknown;
use crate::types::BEGIN_SENT;

/// Viterbi decoder bound to one model.
///
/// Transition scores are resolved against the model once, at construction;
/// each `decode` call allocates its own trellis.
#[derive(Debug, Clone)]
pub struct ViterbiDecoder<'m> {
    model: &'m HmmModel,
    config: DecoderConfig,
    /// `Begin_Sent` → tag, indexed by tag.
    start: Vec<f64>,
    /// `[prev][curr]` transition log-probabilities.
    transitions: Vec<Vec<f64>>,
}

/// Best path and its cumulative log-score.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub tags: Vec<String>,
    pub score: f64,
}

impl<'m> ViterbiDecoder<'m> {
    /// Create a decoder for `model`.
    pub fn new(model: &'m HmmModel, config: DecoderConfig) -> Self {
        let tags = model.tags();
        let table = model.transitions();
        let floor = config.floor;

        let start = tags
            .iter()
            .map(|tag| lookup(table, BEGIN_SENT, tag, floor))
            .collect();
        let transitions = tags
            .iter()
            .map(|prev| {
                tags.iter()
                    .map(|curr| lookup(table, prev, curr, floor))
                    .collect()
            })
            .collect();

        Self {
            model,
            config,
            start,
            transitions,
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode the most likely tag sequence for `tokens`.
    ///
    /// The output has exactly one tag per token. An empty input yields an
    /// empty output.
    ///
    /// # Errors
    ///
    /// - `HmmError::InputTooLong` if `tokens` exceeds the configured limit.
    /// - `HmmError::NoValidPath` if no tag reaches the last position with a
    ///   finite score.
    /// - `HmmError::BrokenBackpointer` if the backtrace hits a missing entry.
    pub fn decode<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<String>> {
        self.decode_scored(tokens).map(|decoded| decoded.tags)
    }

    /// Like [`decode`](Self::decode), also returning the path's log-score.
    pub fn decode_scored<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Decoded> {
        let seq_len = tokens.len();
        if seq_len == 0 {
            return Ok(Decoded {
                tags: Vec::new(),
                score: 0.0,
            });
        }
        if let Some(max) = self.config.max_tokens {
            if seq_len > max {
                return Err(HmmError::InputTooLong { len: seq_len, max });
            }
        }

        let num_tags = self.model.tags().len();
        if num_tags == 0 {
            return Err(HmmError::NoValidPath { len: seq_len });
        }

        let emission_scores: Vec<Vec<f64>> = tokens
            .iter()
            .map(|token| self.emission_scores(token.as_ref()))
            .collect();

        // DP tables: [seq_len][num_tags]
        let mut dp: Vec<Vec<f64>> = vec![vec![f64::NEG_INFINITY; num_tags]; seq_len];
        let mut backptr: Vec<Vec<Option<usize>>> = vec![vec![None; num_tags]; seq_len];

        // Initialize from the sentence-start context
        for tag in 0..num_tags {
            dp[0][tag] = self.start[tag] + emission_scores[0][tag];
        }

        // Forward pass
        for pos in 1..seq_len {
            for curr_tag in 0..num_tags {
                let emission = emission_scores[pos][curr_tag];
                if emission == f64::NEG_INFINITY {
                    continue;
                }

                let mut best_score = f64::NEG_INFINITY;
                let mut best_prev = None;

                for prev_tag in 0..num_tags {
                    let prev_score = dp[pos - 1][prev_tag];
                    if prev_score == f64::NEG_INFINITY {
                        continue;
                    }

                    let score = prev_score + self.transitions[prev_tag][curr_tag] + emission;

                    // strict: the first tag in tag-set order wins ties
                    if score > best_score {
                        best_score = score;
                        best_prev = Some(prev_tag);
                    }
                }

                dp[pos][curr_tag] = best_score;
                backptr[pos][curr_tag] = best_prev;
            }
        }

        // Find best final tag
        let mut best_final_tag = None;
        let mut best_final_score = f64::NEG_INFINITY;
        for tag in 0..num_tags {
            if dp[seq_len - 1][tag] > best_final_score {
                best_final_score = dp[seq_len - 1][tag];
                best_final_tag = Some(tag);
            }
        }
        let best_final_tag = best_final_tag.ok_or(HmmError::NoValidPath { len: seq_len })?;

        let path = backtrace(&backptr, best_final_tag)?;
        let tags = path
            .into_iter()
            .enumerate()
            .map(|(position, idx)| {
                self.model
                    .tags()
                    .get(idx)
                    .map(str::to_string)
                    .ok_or(HmmError::BrokenBackpointer { position })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(tokens = seq_len, score = best_final_score, "decoded sequence");
        Ok(Decoded {
            tags,
            score: best_final_score,
        })
    }

    /// Emission log-scores of `token` for every tag, in tag-set order.
    fn emission_scores(&self, token: &str) -> Vec<f64> {
        let tags = self.model.tags();
        let floor = self.config.floor;
        let word = token.to_lowercase();

        if self.model.is_known(&word) {
            return tags
                .iter()
                .map(|tag| lookup(self.model.emissions(), tag, &word, floor))
                .collect();
        }

        let guess = classify_unknown(token);
        match tags.index_of(guess) {
            Some(guess_idx) => {
                let others = match self.config.oov_policy {
                    OovPolicy::Prior => floor,
                    OovPolicy::Restrict => f64::NEG_INFINITY,
                };
                trace!(token, guess, "unknown word");
                let mut scores = vec![others; tags.len()];
                scores[guess_idx] = 0.0;
                scores
            }
            None => {
                debug!(token, guess, "unknown-word guess is outside the tag set");
                vec![floor; tags.len()]
            }
        }
    }
}

/// Walk `backpointers` from `last_tag` at the final position back to
/// position 0 and return the tag indices in forward order.
///
/// # Errors
///
/// Returns `HmmError::BrokenBackpointer` when the traced tag has no recorded
/// predecessor at some position after the first.
pub fn backtrace(backpointers: &[Vec<Option<usize>>], last_tag: usize) -> Result<Vec<usize>> {
    let seq_len = backpointers.len();
    let mut path = Vec::with_capacity(seq_len);
    if seq_len == 0 {
        return Ok(path);
    }

    path.push(last_tag);
    let mut curr_tag = last_tag;

    for pos in (1..seq_len).rev() {
        curr_tag = backpointers[pos]
            .get(curr_tag)
            .copied()
            .flatten()
            .ok_or(HmmError::BrokenBackpointer { position: pos })?;
        path.push(curr_tag);
    }

    path.reverse();
    Ok(path)
}
