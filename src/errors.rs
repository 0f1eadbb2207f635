use thiserror::Error;

/// Aggregates every error a [`crate::PageBuffer`] operation can surface,
/// wiring the lower crates' own error enums in with `#[from]` the way a
/// host observes them at this facade's boundary.
#[derive(Debug, Error)]
pub enum BufferError {
    /// A `PageBuffer` operation failed (reversed range, invalidated
    /// handle).
    #[error(transparent)]
    Buffer(#[from] page_buffer::PageBufferError),
    /// A codec collaborator failed during load or save.
    #[error(transparent)]
    Codec(#[from] codec::CodecError),
    /// `BufferConfig` failed to load or validate.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Result type returned by fallible [`crate::PageBuffer`] operations.
pub type BufferResult<T> = Result<T, BufferError>;
