use block::Attributes;
use byte_array::ByteArray;
use page::BlockCursor;

use crate::errors::{PageBufferError, PageBufferResult};

use super::PageBuffer;

impl<A: Attributes> PageBuffer<A> {
    /// Inserts `bytes` carrying attribute `attr` at `at`, splitting `at`'s
    /// page afterward if the insert pushed it past its target size.
    pub fn insert_bytes(
        &mut self,
        at: &BlockCursor<A>,
        bytes: &ByteArray,
        attr: A,
    ) -> PageBufferResult<(usize, BlockCursor<A>)> {
        let (page_index, page_key) = self.locate(at).ok_or(PageBufferError::InvalidHandleUse)?;

        let (n, cursor) = {
            let page_handle = self.pages.handle(page_key).expect("located page is live");
            page_handle.borrow_mut().insert_bytes(at, bytes, attr, &mut self.blocks)
        };

        let page_size = self
            .pages
            .handle(page_key)
            .expect("located page is live")
            .borrow()
            .size();
        let target = self.target_page_size;
        if page_size > target {
            self.split_page(page_index);
        }

        Ok((n, cursor))
    }
}

#[cfg(test)]
mod tests {
    use block::Block;

    use super::*;
    use crate::PageBuffer;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Style(u8);

    #[test]
    fn insert_bytes_grows_the_page_without_splitting_below_target() {
        let mut buffer: PageBuffer<Style> = PageBuffer::new(128);
        let at = buffer.first();
        let (n, _) = buffer.insert_bytes(&at, &ByteArray::from("AAA"), Style(1)).unwrap();
        assert_eq!(n, 3);
        assert_eq!(buffer.page_count(), 1);
        assert_eq!(buffer.size(), 3);
    }

    #[test]
    fn insert_bytes_past_target_size_splits_into_a_new_page() {
        let mut buffer: PageBuffer<Style> = PageBuffer::new(4);
        let at = buffer.first();
        buffer.insert_bytes(&at, &ByteArray::from("AAAAAAAAAA"), Style(1)).unwrap();
        assert!(buffer.page_count() > 1);
        assert_eq!(buffer.size(), 10);
    }

    #[test]
    fn insert_bytes_with_a_differing_attribute_still_works_across_pages() {
        let mut buffer: PageBuffer<Style> = PageBuffer::new(128);
        let at = buffer.first();
        let block = Block::new(ByteArray::from("AAA"), Style(1));
        // seed via a direct page-level insert to exercise attribute mixing
        let page_key = buffer.order[0];
        let cursor = {
            let page = buffer.pages.handle(page_key).unwrap();
            page.borrow_mut().insert_block(&at, block, &mut buffer.blocks)
        };
        let (_, cursor) = buffer.insert_bytes(&cursor, &ByteArray::from("B"), Style(2)).unwrap();
        assert_eq!(*cursor.block().attributes(), Style(2));
    }
}
