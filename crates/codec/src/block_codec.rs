use block::Attributes;
use byte_array::ByteArray;

use crate::errors::CodecResult;

/// Collaborator boundary between the core and whatever supplies or receives
/// a buffer's bytes: a file on disk, a gzip stream, a UTF-8 decoder sitting
/// in front of either. The core only ever calls through this trait; it
/// never opens a file or knows an encoding.
///
/// A load walks `prepare_load`, then `peek_next_block`/`read_next_block` in
/// a loop until `peek_next_block` returns `0`, then `finalize_load`. A save
/// walks `prepare_save`, then `write_next_block` once per block, then
/// `finalize_save`. `seek` lets a host reposition the underlying source
/// between blocks (used when a page records the file offset its content
/// came from, to support partial reloads).
pub trait BlockCodec<A: Attributes> {
    /// Number of bytes the next call to `read_next_block` would read, or
    /// `0` once the source is exhausted.
    fn peek_next_block(&mut self) -> CodecResult<usize>;

    /// Reads the next block's bytes into `dst`, returning how many bytes
    /// were read and the attribute tag they carry.
    fn read_next_block(&mut self, dst: &mut ByteArray) -> CodecResult<(usize, A)>;

    /// Writes `src` with attribute `attr` as the next block, returning the
    /// number of bytes written.
    fn write_next_block(&mut self, src: &ByteArray, attr: &A) -> CodecResult<usize>;

    /// Repositions the underlying source at `offset` bytes from its start.
    fn seek(&mut self, offset: u64) -> CodecResult<()>;

    /// Called once before the first `read_next_block` of a load.
    fn prepare_load(&mut self) -> CodecResult<()>;

    /// Called once before the first `write_next_block` of a save.
    fn prepare_save(&mut self) -> CodecResult<()>;

    /// Called once after the last `read_next_block` of a load.
    fn finalize_load(&mut self) -> CodecResult<()>;

    /// Called once after the last `write_next_block` of a save.
    fn finalize_save(&mut self) -> CodecResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Style(u8);

    /// A minimal in-memory codec, one block per chunk, used only to prove
    /// the trait shape round-trips.
    #[derive(Debug, Default)]
    struct InMemoryCodec {
        chunks: Vec<(Vec<u8>, Style)>,
        cursor: usize,
        written: Vec<(Vec<u8>, Style)>,
    }

    impl BlockCodec<Style> for InMemoryCodec {
        fn peek_next_block(&mut self) -> CodecResult<usize> {
            Ok(self.chunks.get(self.cursor).map_or(0, |(bytes, _)| bytes.len()))
        }

        fn read_next_block(&mut self, dst: &mut ByteArray) -> CodecResult<(usize, Style)> {
            let (bytes, style) = &self.chunks[self.cursor];
            dst.append(&ByteArray::from(bytes.clone()));
            self.cursor += 1;
            Ok((bytes.len(), style.clone()))
        }

        fn write_next_block(&mut self, src: &ByteArray, attr: &Style) -> CodecResult<usize> {
            self.written.push((src.as_slice().to_vec(), attr.clone()));
            Ok(src.size())
        }

        fn seek(&mut self, offset: u64) -> CodecResult<()> {
            self.cursor = offset as usize;
            Ok(())
        }

        fn prepare_load(&mut self) -> CodecResult<()> {
            Ok(())
        }

        fn prepare_save(&mut self) -> CodecResult<()> {
            Ok(())
        }

        fn finalize_load(&mut self) -> CodecResult<()> {
            Ok(())
        }

        fn finalize_save(&mut self) -> CodecResult<()> {
            Ok(())
        }
    }

    #[test]
    fn reading_every_block_drains_the_source_to_empty() {
        let mut codec = InMemoryCodec {
            chunks: vec![(b"AAA".to_vec(), Style(1)), (b"BB".to_vec(), Style(2))],
            ..Default::default()
        };
        codec.prepare_load().unwrap();

        let mut total = ByteArray::new();
        let mut attrs = Vec::new();
        while codec.peek_next_block().unwrap() > 0 {
            let (read, attr) = codec.read_next_block(&mut total).unwrap();
            assert!(read > 0);
            attrs.push(attr);
        }
        codec.finalize_load().unwrap();

        assert_eq!(total.as_slice(), b"AAABB");
        assert_eq!(attrs, vec![Style(1), Style(2)]);
        assert_eq!(codec.peek_next_block().unwrap(), 0);
    }

    #[test]
    fn writing_blocks_records_what_the_core_sent() {
        let mut codec = InMemoryCodec::default();
        codec.prepare_save().unwrap();
        codec.write_next_block(&ByteArray::from("CCC"), &Style(3)).unwrap();
        codec.finalize_save().unwrap();

        assert_eq!(codec.written, vec![(b"CCC".to_vec(), Style(3))]);
    }
}
