//! The block codec boundary: how a [`page_buffer::PageBuffer`] (defined one
//! crate over) loads its initial content from, and saves its content back
//! to, whatever a host process backs a buffer with.
//!
//! No concrete codec ships here. A host process wires up its own
//! file-backed, gzip, or UTF-8-aware implementation of [`BlockCodec`]; this
//! crate only states the shape of that boundary and the error type crossing
//! it.

#![forbid(unsafe_code)]

mod block_codec;
mod errors;

pub use block_codec::BlockCodec;
pub use errors::{CodecError, CodecResult};
