use block::{Attributes, Block};
use byte_array::ByteArray;
use handle_arena::Arena;

use crate::cursor::BlockCursor;

use super::Page;

impl<A: Attributes> Page<A> {
    /// Inserts `block` at `at`, returning a cursor at the end of the newly
    /// inserted block.
    ///
    /// If the page currently holds only the empty sentinel block, `block`
    /// replaces it outright. Otherwise `block` lands after `at`'s block
    /// when `at` sits at that block's end, or before it otherwise.
    pub fn insert_block(&mut self, at: &BlockCursor<A>, block: Block<A>, blocks: &mut Arena<Block<A>>) -> BlockCursor<A> {
        let size = block.size();
        let new_key = blocks.insert(block);

        if self.is_sentinel_empty(blocks) {
            let old_key = self.order[0];
            blocks.remove(old_key);
            self.order[0] = new_key;
        } else {
            let at_index = self
                .index_of(at.key())
                .expect("cursor belongs to this page");
            let at_size = at.handle.borrow().size();
            let insert_index = if at.pos >= at_size { at_index + 1 } else { at_index };
            self.order.insert(insert_index, new_key);
        }

        self.cached_size += size;
        let handle = blocks.handle(new_key).expect("just inserted");
        let pos = handle.borrow().size();
        BlockCursor::new(handle, pos)
    }

    /// Splits `at`'s block in two at `at.pos`, with the left half becoming
    /// a new block immediately before it. A no-op (returning `at` itself)
    /// when `at` already sits on a block boundary.
    pub fn split_block(&mut self, at: &BlockCursor<A>, blocks: &mut Arena<Block<A>>) -> BlockCursor<A> {
        let at_index = self
            .index_of(at.key())
            .expect("cursor belongs to this page");
        let size = at.handle.borrow().size();

        if at.pos == 0 || at.pos == size {
            return at.clone();
        }

        tracing::trace!(block_index = at_index, split_at = at.pos, "splitting block");

        let left = at.handle.borrow_mut().delete_bytes(0, Some(at.pos));
        let left_key = blocks.insert(left);
        self.order.insert(at_index, left_key);

        let handle = blocks.handle(at.key()).expect("right half stays live");
        BlockCursor::new(handle, 0)
    }

    /// Inserts `bytes` carrying attribute `attr` at `at`.
    ///
    /// If `attr` differs from the attribute of the block `at` points into,
    /// the block is split first and the new bytes land in their own block
    /// (P6: this is the only case where the page's block count grows from
    /// an insert). Otherwise `bytes` is merged straight into the existing
    /// block.
    pub fn insert_bytes(
        &mut self,
        at: &BlockCursor<A>,
        bytes: &ByteArray,
        attr: A,
        blocks: &mut Arena<Block<A>>,
    ) -> (usize, BlockCursor<A>) {
        let current_attr = at.handle.borrow().attributes().clone();

        if current_attr == attr {
            let n = at.handle.borrow_mut().insert_bytes(at.pos, bytes);
            self.cached_size += n;
            (n, BlockCursor::new(at.handle.clone(), at.pos + n))
        } else {
            let split_at = self.split_block(at, blocks);
            let new_block = Block::new(bytes.clone(), attr);
            let cursor = self.insert_block(&split_at, new_block, blocks);
            (bytes.size(), cursor)
        }
    }
}
