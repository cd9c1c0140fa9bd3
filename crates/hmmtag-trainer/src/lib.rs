//! # hmmtag Trainer
//!
//! File-level workflows around `hmmtag-core`: reading tagged corpora and
//! token files, training and persisting models, scoring a model against
//! gold-tagged text, and writing tagged output.

pub mod data;
pub mod trainer;

pub use data::{gold_lines, load_corpus, load_tokens, write_tagged};
pub use trainer::{evaluate, Accuracy, Trainer};
