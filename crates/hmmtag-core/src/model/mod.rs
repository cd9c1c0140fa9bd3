//! # Trained HMM
//!
//! [`HmmModel`] bundles the closed tag set, the vocabulary and the two
//! probability tables. It is built once from a corpus and never mutated.

pub mod counts;
pub mod probability;

use std::collections::HashSet;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::types::{CorpusRecord, TagSet};

pub use counts::{aggregate, CountAggregator, CountTable, Counts};
pub use probability::{lookup, ProbabilityTable, OOV_FLOOR};

/// Immutable HMM parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HmmModel {
    tags: TagSet,
    vocabulary: HashSet<String>,
    /// P(word | tag), keyed by tag.
    emissions: ProbabilityTable,
    /// P(tag | previous tag or sentinel), keyed by the previous context.
    transitions: ProbabilityTable,
}

impl HmmModel {
    /// Aggregate `records` and estimate both tables.
    ///
    /// # Examples
    /// ```
    /// use hmmtag_core::model::HmmModel;
    /// use hmmtag_core::types::parse_corpus;
    ///
    /// let records = parse_corpus("the\tDT\ndog\tNN\n\n").unwrap();
    /// let model = HmmModel::train(&records).unwrap();
    /// assert_eq!(model.tags().len(), 2);
    /// assert!(model.is_known("The"));
    /// ```
    pub fn train<'a, I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a CorpusRecord>,
    {
        let counts = aggregate(records)?;
        info!(
            tokens = counts.tokens,
            sentences = counts.sentences,
            tags = counts.tags.len(),
            words = counts.vocabulary.len(),
            "aggregated training counts"
        );
        Self::from_counts(counts)
    }

    /// Estimate both tables from finished counts.
    pub fn from_counts(counts: Counts) -> Result<Self> {
        let emissions = ProbabilityTable::estimate(&counts.emissions, "emission")?;
        let transitions = ProbabilityTable::estimate(&counts.transitions, "transition")?;
        Ok(Self {
            tags: counts.tags,
            vocabulary: counts.vocabulary,
            emissions,
            transitions,
        })
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn emissions(&self) -> &ProbabilityTable {
        &self.emissions
    }

    pub fn transitions(&self) -> &ProbabilityTable {
        &self.transitions
    }

    /// Returns `true` if the lower-cased `word` was seen under any tag.
    pub fn is_known(&self, word: &str) -> bool {
        self.vocabulary.contains(&word.to_lowercase())
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Write the model as JSON.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Read a model previously written by [`to_writer`](Self::to_writer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}
