//! # Count Aggregation
//!
//! Single pass over a tagged corpus producing raw co-occurrence counts for
//! (tag → word) and (previous context → tag). The aggregator is the only
//! mutable form; `finish` hands out immutable [`CountTable`]s.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{HmmError, Result};
use crate::types::{is_sentinel, CorpusRecord, TagSet, BEGIN_SENT, END_SENT};

type Rows<V> = HashMap<String, HashMap<String, V>>;

/// Immutable context → outcome → count mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable {
    rows: Rows<u64>,
}

impl CountTable {
    /// Build a table from already-aggregated rows.
    pub fn from_rows(rows: HashMap<String, HashMap<String, u64>>) -> Self {
        Self { rows }
    }

    /// Count of `outcome` under `context`, zero when never observed.
    pub fn get(&self, context: &str, outcome: &str) -> u64 {
        self.rows
            .get(context)
            .and_then(|row| row.get(outcome))
            .copied()
            .unwrap_or(0)
    }

    pub fn row(&self, context: &str) -> Option<&HashMap<String, u64>> {
        self.rows.get(context)
    }

    /// Sum of all outcome counts under `context`.
    pub fn total(&self, context: &str) -> u64 {
        self.rows
            .get(context)
            .map(|row| row.values().sum())
            .unwrap_or(0)
    }

    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &HashMap<String, u64>)> {
        self.rows.iter().map(|(ctx, row)| (ctx.as_str(), row))
    }

    /// Number of contexts.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything the aggregation pass produces.
#[derive(Debug, Clone, Default)]
pub struct Counts {
    /// Tags in first-seen order.
    pub tags: TagSet,
    /// Lower-cased words seen under any tag.
    pub vocabulary: HashSet<String>,
    /// word | tag counts, keyed by tag.
    pub emissions: CountTable,
    /// tag | previous context counts, keyed by previous tag or sentinel.
    pub transitions: CountTable,
    /// Number of token records consumed.
    pub tokens: usize,
    /// Number of sentences closed.
    pub sentences: usize,
}

/// Mutable builder fed one corpus record at a time.
#[derive(Debug, Default)]
pub struct CountAggregator {
    emissions: Rows<u64>,
    transitions: Rows<u64>,
    tags: TagSet,
    vocabulary: HashSet<String>,
    /// Tag of the previous token in the current sentence.
    prev: Option<String>,
    tokens: usize,
    sentences: usize,
}

impl CountAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one record.
    ///
    /// # Errors
    ///
    /// Returns `HmmError::ReservedTag` if a token carries a sentinel tag.
    pub fn observe(&mut self, record: &CorpusRecord) -> Result<()> {
        match record {
            CorpusRecord::Token { word, tag } => self.observe_token(word, tag),
            CorpusRecord::Boundary => {
                self.close_sentence();
                Ok(())
            }
        }
    }

    /// Count one tagged token. The word is lower-cased, the tag kept verbatim.
    pub fn observe_token(&mut self, word: &str, tag: &str) -> Result<()> {
        if is_sentinel(tag) {
            return Err(HmmError::ReservedTag(tag.to_string()));
        }

        let word = word.to_lowercase();
        let context = self.prev.as_deref().unwrap_or(BEGIN_SENT);
        bump(&mut self.transitions, context, tag);
        bump(&mut self.emissions, tag, &word);

        self.tags.insert(tag);
        self.vocabulary.insert(word);
        self.prev = Some(tag.to_string());
        self.tokens += 1;
        Ok(())
    }

    /// Close the current sentence, counting its last tag under `End_Sent`.
    ///
    /// A boundary with no token since the last one is ignored.
    pub fn close_sentence(&mut self) {
        if let Some(last) = self.prev.take() {
            bump(&mut self.transitions, END_SENT, &last);
            self.sentences += 1;
        }
    }

    /// Close any open sentence and freeze the tables.
    pub fn finish(mut self) -> Counts {
        self.close_sentence();
        Counts {
            tags: self.tags,
            vocabulary: self.vocabulary,
            emissions: CountTable::from_rows(self.emissions),
            transitions: CountTable::from_rows(self.transitions),
            tokens: self.tokens,
            sentences: self.sentences,
        }
    }
}

fn bump(rows: &mut Rows<u64>, context: &str, outcome: &str) {
    *rows
        .entry(context.to_string())
        .or_default()
        .entry(outcome.to_string())
        .or_insert(0) += 1;
}

/// Run the aggregation pass over `records`.
pub fn aggregate<'a, I>(records: I) -> Result<Counts>
where
    I: IntoIterator<Item = &'a CorpusRecord>,
{
    let mut aggregator = CountAggregator::new();
    for record in records {
        aggregator.observe(record)?;
    }
    Ok(aggregator.finish())
}
