use block::{Attributes, Block};
use change_set::ChangeSet;
use handle_arena::Arena;

use crate::cursor::BlockCursor;
use crate::errors::{PageError, PageResult};

use super::Page;

impl<A: Attributes> Page<A> {
    /// Removes the block `at` points to, returning it along with a cursor
    /// at the block that followed (or `last()`, if `at` was the last
    /// block).
    ///
    /// Removing the page's sole block leaves a fresh empty sentinel behind
    /// (I1); the returned cursor then points at that sentinel.
    pub fn delete_block(&mut self, at: &BlockCursor<A>, blocks: &mut Arena<Block<A>>) -> (Block<A>, BlockCursor<A>) {
        let at_index = self
            .index_of(at.key())
            .expect("cursor belongs to this page");
        let removed_key = self.order.remove(at_index);
        let removed = blocks
            .handle(removed_key)
            .expect("key about to be removed is still live")
            .borrow()
            .clone();
        self.cached_size -= removed.size();
        blocks.remove(removed_key);

        if self.order.is_empty() {
            tracing::trace!(page_block_count = 0, "page emptied, inserting sentinel block");
            let key = blocks.insert(Block::empty());
            self.order.push(key);
            let handle = blocks.handle(key).expect("just inserted");
            return (removed, BlockCursor::new(handle, 0));
        }

        tracing::trace!(block_index = at_index, remaining = self.order.len(), "deleted block");

        if at_index < self.order.len() {
            let key = self.order[at_index];
            let handle = blocks.handle(key).expect("order keys are always live");
            (removed, BlockCursor::new(handle, 0))
        } else {
            (removed, self.last(blocks))
        }
    }

    /// Deletes the bytes between `from` and `to`, which may span several
    /// blocks, returning the change-set recording what was removed and a
    /// cursor at the position immediately following the deleted range.
    ///
    /// Both cursors must belong to this page and `from` must not come
    /// after `to`.
    pub fn delete_bytes(
        &mut self,
        from: &BlockCursor<A>,
        to: &BlockCursor<A>,
        blocks: &mut Arena<Block<A>>,
    ) -> PageResult<(ChangeSet<A>, BlockCursor<A>)> {
        let from_index = self.index_of(from.key()).ok_or(PageError::InvalidHandleUse)?;
        let to_index = self.index_of(to.key()).ok_or(PageError::InvalidHandleUse)?;

        if (from_index, from.pos) > (to_index, to.pos) {
            return Err(PageError::ReverseRange);
        }

        let offset = self.offset_of(from, blocks).ok_or(PageError::InvalidHandleUse)?;
        let mut removed = Vec::new();

        if from_index == to_index {
            let block_size = from.handle.borrow().size();
            let cursor = if from.pos == 0 && to.pos == block_size {
                let key = self.order[from_index];
                let at = BlockCursor::new(blocks.handle(key).expect("order keys are always live"), 0);
                let (block, next) = self.delete_block(&at, blocks);
                removed.push(block);
                next
            } else {
                let key = self.order[from_index];
                let handle = blocks.handle(key).expect("order keys are always live");
                let block = handle.borrow_mut().delete_bytes(from.pos, Some(to.pos - from.pos));
                self.cached_size -= block.size();
                removed.push(block);
                BlockCursor::new(handle, from.pos)
            };
            return Ok((ChangeSet::for_delete(offset, removed), cursor));
        }

        let from_key = self.order[from_index];
        let mut cursor_index = if from.pos == 0 {
            let at = BlockCursor::new(blocks.handle(from_key).expect("order keys are always live"), 0);
            let (block, _) = self.delete_block(&at, blocks);
            removed.push(block);
            from_index
        } else {
            let handle = blocks.handle(from_key).expect("order keys are always live");
            let block = handle.borrow_mut().delete_bytes(from.pos, None);
            self.cached_size -= block.size();
            removed.push(block);
            from_index + 1
        };

        let intermediate_count = to_index - from_index - 1;
        for _ in 0..intermediate_count {
            let key = self.order[cursor_index];
            let at = BlockCursor::new(blocks.handle(key).expect("order keys are always live"), 0);
            let (block, _) = self.delete_block(&at, blocks);
            removed.push(block);
        }

        let to_key = self.order[cursor_index];
        let to_handle = blocks.handle(to_key).expect("order keys are always live");
        let to_size = to_handle.borrow().size();

        let result_cursor = if to.pos == to_size {
            let at = BlockCursor::new(to_handle, to.pos);
            let (block, next) = self.delete_block(&at, blocks);
            removed.push(block);
            next
        } else {
            let block = to_handle.borrow_mut().delete_bytes(0, Some(to.pos));
            self.cached_size -= block.size();
            removed.push(block);
            BlockCursor::new(to_handle, 0)
        };

        Ok((ChangeSet::for_delete(offset, removed), result_cursor))
    }
}

#[cfg(test)]
mod tests {
    use byte_array::ByteArray;

    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Style(u8);

    #[test]
    fn delete_block_on_the_sole_block_leaves_a_sentinel() {
        let mut blocks = Arena::new();
        let mut page = Page::from_blocks(128, vec![Block::new(ByteArray::from("AAA"), Style(1))], &mut blocks);
        let at = page.first(&blocks);
        let (removed, cursor) = page.delete_block(&at, &mut blocks);
        assert_eq!(removed.bytes().as_slice(), b"AAA");
        assert_eq!(page.block_count(), 1);
        assert!(page.is_empty());
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn delete_bytes_within_one_block_shrinks_it_in_place() {
        let mut blocks = Arena::new();
        let mut page = Page::from_blocks(128, vec![Block::new(ByteArray::from("AAABBBCCC"), Style(1))], &mut blocks);
        let first = page.first(&blocks);
        let (_, from) = page.next(&first, 3, &blocks);
        let (_, to) = page.next(&first, 6, &blocks);
        let (cs, cursor) = page.delete_bytes(&from, &to, &mut blocks).unwrap();
        assert_eq!(cs.removed_bytes().as_slice(), b"BBB");
        assert_eq!(page.block_count(), 1);
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn delete_bytes_spanning_blocks_concatenates_removed_blocks_in_order() {
        let mut blocks = Arena::new();
        let mut page = Page::from_blocks(
            128,
            vec![
                Block::new(ByteArray::from("AAA"), Style(1)),
                Block::new(ByteArray::from("BBB"), Style(2)),
                Block::new(ByteArray::from("CCC"), Style(3)),
            ],
            &mut blocks,
        );
        let from = page.first(&blocks);
        let to = page.last(&blocks);
        let (cs, cursor) = page.delete_bytes(&from, &to, &mut blocks).unwrap();
        assert_eq!(cs.removed_bytes().as_slice(), b"AAABBBCCC");
        assert_eq!(page.block_count(), 1);
        assert!(page.is_empty());
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn delete_bytes_partial_on_both_ends_keeps_partial_blocks() {
        let mut blocks = Arena::new();
        let mut page = Page::from_blocks(
            128,
            vec![
                Block::new(ByteArray::from("AAA"), Style(1)),
                Block::new(ByteArray::from("BBB"), Style(2)),
                Block::new(ByteArray::from("CCC"), Style(3)),
            ],
            &mut blocks,
        );
        let first = page.first(&blocks);
        let (_, from) = page.next(&first, 1, &blocks);
        let (_, to) = page.next(&first, 8, &blocks);
        let (cs, _) = page.delete_bytes(&from, &to, &mut blocks).unwrap();
        assert_eq!(cs.removed_bytes().as_slice(), b"AABBBCC");
        assert_eq!(page.block_count(), 2);
    }

    #[test]
    fn delete_bytes_rejects_a_reversed_range() {
        let mut blocks = Arena::new();
        let mut page = Page::from_blocks(128, vec![Block::new(ByteArray::from("AAABBB"), Style(1))], &mut blocks);
        let first = page.first(&blocks);
        let (_, from) = page.next(&first, 4, &blocks);
        let to = page.first(&blocks);
        assert!(matches!(page.delete_bytes(&from, &to, &mut blocks), Err(PageError::ReverseRange)));
    }
}
