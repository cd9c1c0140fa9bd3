pub mod unified;
pub mod unknown;
pub mod viterbi;

pub use unified::{align_tags, tag, DecoderConfig, OovPolicy, SentenceMode, TaggedLine, Tagger};
pub use unknown::{classify_unknown, UnknownWordRule, DEFAULT_TAG};
pub use viterbi::{backtrace, Decoded, ViterbiDecoder};
