pub mod record;
pub mod tagset;

pub use record::{parse_corpus, parse_line, CorpusRecord};
pub use tagset::{is_sentinel, TagSet, BEGIN_SENT, END_SENT};
