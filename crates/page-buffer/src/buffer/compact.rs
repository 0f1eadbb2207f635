use block::Attributes;

use super::PageBuffer;

impl<A: Attributes> PageBuffer<A> {
    /// Merges adjacent same-attribute blocks that fall under `min_block_size`
    /// into their left neighbor, page by page. Off by default and never
    /// called automatically by `insert_bytes`/`delete_bytes`: a host opts
    /// into this housekeeping pass explicitly, so it can never change the
    /// block-count behavior those operations otherwise pin down.
    pub fn compact(&mut self, min_block_size: usize) {
        if min_block_size == 0 {
            return;
        }

        for page_key in self.order.clone() {
            let page = self.pages.handle(page_key).expect("order keys are always live");
            let mut index = 0;
            loop {
                let block_count = page.borrow().block_count();
                if index + 1 >= block_count {
                    break;
                }
                let keys = page.borrow().order().to_vec();
                let current = self.blocks.handle(keys[index]).expect("order keys are always live");
                let next = self.blocks.handle(keys[index + 1]).expect("order keys are always live");
                let should_merge = current.borrow().attributes() == next.borrow().attributes()
                    && (current.borrow().size() < min_block_size || next.borrow().size() < min_block_size);
                drop(current);
                drop(next);

                if should_merge {
                    page.borrow_mut().merge_next(index, &mut self.blocks);
                } else {
                    index += 1;
                }
            }
        }

        tracing::debug!(min_block_size, "compacted buffer blocks");
    }
}

#[cfg(test)]
mod tests {
    use block::Block;
    use byte_array::ByteArray;

    use super::*;
    use crate::PageBuffer;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Style(u8);

    #[test]
    fn compact_merges_small_same_attribute_neighbors() {
        let mut buffer: PageBuffer<Style> = PageBuffer::new(128);
        buffer.append_page(vec![
            Block::new(ByteArray::from("A"), Style(1)),
            Block::new(ByteArray::from("B"), Style(1)),
            Block::new(ByteArray::from("C"), Style(2)),
        ]);

        buffer.compact(4);

        assert_eq!(buffer.bytes(&buffer.first(), 100).as_slice(), b"ABC");
    }

    #[test]
    fn compact_leaves_differing_attributes_unmerged() {
        let mut buffer: PageBuffer<Style> = PageBuffer::new(128);
        buffer.append_page(vec![Block::new(ByteArray::from("A"), Style(1)), Block::new(ByteArray::from("B"), Style(2))]);

        buffer.compact(4);

        assert_eq!(buffer.bytes(&buffer.first(), 100).as_slice(), b"AB");
    }

    #[test]
    fn compact_is_a_no_op_when_min_block_size_is_zero() {
        let mut buffer: PageBuffer<Style> = PageBuffer::new(128);
        buffer.append_page(vec![Block::new(ByteArray::from("A"), Style(1)), Block::new(ByteArray::from("B"), Style(1))]);

        buffer.compact(0);

        assert_eq!(buffer.bytes(&buffer.first(), 100).as_slice(), b"AB");
    }
}
