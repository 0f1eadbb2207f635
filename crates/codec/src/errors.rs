use thiserror::Error;

/// Errors a [`crate::BlockCodec`] implementation can surface to the core.
///
/// The core never interprets these — it forwards them to whatever called
/// into load/save.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The underlying transport (file, socket, decompressor) failed.
    #[error("codec source failed: {0}")]
    Source(#[from] std::io::Error),
    /// Bytes read from the source could not be interpreted by the codec
    /// (e.g. invalid UTF-8, a truncated gzip stream).
    #[error("codec could not decode its source: {0}")]
    Decode(String),
    /// `seek` was asked to move to an offset the source does not have.
    #[error("seek target {offset} is out of range")]
    SeekOutOfRange {
        /// The offset that was requested.
        offset: u64,
    },
}

/// Result type returned by fallible [`crate::BlockCodec`] methods.
pub type CodecResult<T> = Result<T, CodecError>;
