use thiserror::Error;

/// Errors that can occur during training and decoding.
#[derive(Debug, Error)]
pub enum HmmError {
    /// A non-blank corpus line is not a `word<TAB>tag` pair.
    #[error("malformed corpus record at line {line}: {content:?}")]
    MalformedRecord {
        /// 1-based line number within the corpus text.
        line: usize,
        /// The offending line, without its line terminator.
        content: String,
    },

    /// A corpus tag collides with one of the sentence-boundary sentinels.
    #[error("tag {0:?} is reserved for sentence boundaries")]
    ReservedTag(String),

    /// A count table row has no mass to normalize.
    #[error("context {context:?} in the {table} table has zero total count")]
    ZeroMassContext {
        /// Which table the row belongs to.
        table: &'static str,
        /// The context with no observed outcomes.
        context: String,
    },

    /// No tag reaches the final position with a finite score.
    #[error("no valid tag path for a sequence of {len} tokens")]
    NoValidPath {
        /// Length of the sequence that could not be decoded.
        len: usize,
    },

    /// The backpointer table has no entry for the tag being traced.
    #[error("missing backpointer at position {position} (trellis and backpointers diverged)")]
    BrokenBackpointer {
        /// Position at which the lookup failed.
        position: usize,
    },

    /// The input exceeds the configured token limit.
    #[error("input of {len} tokens exceeds the limit of {max}")]
    InputTooLong {
        /// Number of tokens submitted.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A model could not be read or written as JSON.
    #[error("model serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Tags and tokens disagree in number when zipping them back together.
    #[error("expected {expected} tags, got {got}")]
    TagCountMismatch {
        /// Number of non-blank tokens.
        expected: usize,
        /// Number of tags supplied.
        got: usize,
    },
}

/// Result type alias for hmmtag operations.
pub type Result<T> = std::result::Result<T, HmmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = HmmError::ZeroMassContext {
            table: "transition",
            context: "NN".into(),
        };
        assert_eq!(
            err.to_string(),
            "context \"NN\" in the transition table has zero total count"
        );

        let err = HmmError::MalformedRecord {
            line: 7,
            content: "dog NN".into(),
        };
        assert!(err.to_string().contains("line 7"));
        assert!(err.to_string().contains("dog NN"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HmmError>();
    }
}
