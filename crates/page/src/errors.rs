use thiserror::Error;

/// Errors a [`crate::Page`] operation can report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    /// `delete_bytes` was called with a range whose end precedes its start.
    #[error("delete range end precedes its start")]
    ReverseRange,
    /// A cursor's key no longer resolves to a block this page owns.
    #[error("navigation attempted through an invalidated cursor")]
    InvalidHandleUse,
}

/// Result type returned by fallible [`crate::Page`] operations.
pub type PageResult<T> = Result<T, PageError>;
