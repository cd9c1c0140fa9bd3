//! # hmmtag Core
//!
//! Part-of-speech tagging with a first-order Hidden Markov Model: count
//! aggregation over a tagged corpus, log-probability estimation, a rule
//! cascade for unknown words and Viterbi decoding.
//!
//! ## Quick Start
//!
//! ```rust
//! use hmmtag_core::{parse_corpus, DecoderConfig, HmmModel, Tagger};
//!
//! let records = parse_corpus("the\tDT\ndog\tNN\nruns\tVBZ\n.\t.\n\n").unwrap();
//! let model = HmmModel::train(&records).unwrap();
//! let tagger = Tagger::new(model, DecoderConfig::default());
//!
//! let tags = tagger.tag(&["the", "zzqx", "runs", "."]).unwrap();
//! assert_eq!(tags, vec!["DT", "NN", "VBZ", "."]);
//! ```
pub mod error;
pub mod model;
pub mod tagger;
pub mod types;

// Re-export primary API
pub use error::{HmmError, Result};
pub use model::{lookup, CountAggregator, CountTable, HmmModel, ProbabilityTable, OOV_FLOOR};
pub use tagger::{
    classify_unknown, DecoderConfig, OovPolicy, SentenceMode, Tagger, ViterbiDecoder,
};
pub use types::{parse_corpus, CorpusRecord, TagSet, BEGIN_SENT, END_SENT};
