//! An in-memory, paged, attribute-aware byte buffer for text editors.
//!
//! The buffer hierarchy runs bottom-up: a [`ByteArray`] is plain bytes, a
//! [`Block`] pairs bytes with an [`Attributes`] tag, a [`page::Page`] keeps
//! blocks near a target size, and a [`PageBuffer`] keeps pages near a
//! target size and owns the document as a whole. Cursors
//! ([`Cursor`]) are persistent handles: one minted before an edit keeps
//! resolving to the same bytes afterward, even across a page split that
//! relocates its target block, as long as the block itself was not the one
//! removed.
//!
//! Loading and saving content is a host responsibility expressed through
//! [`BlockCodec`]; this crate never opens a file or interprets an
//! encoding. [`BufferConfig`] is the construction-time knob a host tunes
//! (target page size, and an optional block-coalescing floor applied only
//! by an explicit [`PageBuffer::compact`] call).

#![forbid(unsafe_code)]

mod config;
mod errors;

pub use block::{Attributes, Block};
pub use byte_array::ByteArray;
pub use change_set::{ChangeKind, ChangeSet};
pub use codec::{BlockCodec, CodecError, CodecResult};
pub use config::{BufferConfig, ConfigError};
pub use errors::{BufferError, BufferResult};
pub use page::BlockCursor as Cursor;
pub use page_buffer::{PageBuffer, PageBufferError, PageBufferResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Style(u8);

    #[test]
    fn a_config_builds_a_fresh_empty_buffer() {
        let config = BufferConfig::new(std::num::NonZeroUsize::new(64).unwrap());
        let buffer: PageBuffer<Style> = config.build();
        assert!(buffer.is_empty());
        assert_eq!(buffer.target_page_size(), 64);
    }
}
