use thiserror::Error;

/// Errors a [`crate::PageBuffer`] operation can report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageBufferError {
    /// `delete_bytes` was called with a range whose end precedes its
    /// start.
    #[error("delete range end precedes its start")]
    ReverseRange,
    /// A cursor no longer resolves to a block any page in this buffer
    /// still owns.
    #[error("navigation attempted through an invalidated cursor")]
    InvalidHandleUse,
}

impl From<page::PageError> for PageBufferError {
    fn from(source: page::PageError) -> Self {
        match source {
            page::PageError::ReverseRange => Self::ReverseRange,
            page::PageError::InvalidHandleUse => Self::InvalidHandleUse,
        }
    }
}

/// Result type returned by fallible [`crate::PageBuffer`] operations.
pub type PageBufferResult<T> = Result<T, PageBufferError>;
