use block::{Attributes, Block};
use byte_array::ByteArray;
use handle_arena::Arena;

use crate::cursor::BlockCursor;

use super::Page;

impl<A: Attributes> Page<A> {
    /// A cursor at the start of the page's first block.
    pub fn first(&self, blocks: &Arena<Block<A>>) -> BlockCursor<A> {
        let key = self.order[0];
        let handle = blocks.handle(key).expect("first block is always live");
        BlockCursor::new(handle, 0)
    }

    /// A cursor at the end of the page's last block.
    pub fn last(&self, blocks: &Arena<Block<A>>) -> BlockCursor<A> {
        let key = *self.order.last().expect("page is never empty");
        let handle = blocks.handle(key).expect("last block is always live");
        let pos = handle.borrow().size();
        BlockCursor::new(handle, pos)
    }

    /// Advances `at` past its block into the next one, at byte 0.
    /// Returns the number of bytes skipped in `at`'s block, or `None` if
    /// `at` was already in the page's last block (in which case `at` is
    /// returned unchanged).
    pub fn next_block(&self, at: &BlockCursor<A>, blocks: &Arena<Block<A>>) -> (Option<usize>, BlockCursor<A>) {
        let idx = self.index_of(at.key()).expect("cursor belongs to this page");
        if idx + 1 >= self.order.len() {
            return (None, at.clone());
        }
        let skipped = at.handle.borrow().size() - at.pos;
        let key = self.order[idx + 1];
        let handle = blocks.handle(key).expect("order keys are always live");
        (Some(skipped), BlockCursor::new(handle, 0))
    }

    /// Moves `at` back to the end of the previous block.
    /// Returns the number of bytes skipped in `at`'s block, or `None` if
    /// `at` was already in the page's first block.
    pub fn prev_block(&self, at: &BlockCursor<A>, blocks: &Arena<Block<A>>) -> (Option<usize>, BlockCursor<A>) {
        let idx = self.index_of(at.key()).expect("cursor belongs to this page");
        if idx == 0 {
            return (None, at.clone());
        }
        let skipped = at.pos;
        let key = self.order[idx - 1];
        let handle = blocks.handle(key).expect("order keys are always live");
        let pos = handle.borrow().size();
        (Some(skipped), BlockCursor::new(handle, pos))
    }

    /// Advances `at` by up to `n` bytes, crossing block boundaries within
    /// this page. Returns the number of bytes actually advanced, which is
    /// less than `n` if the page's end was reached first.
    pub fn next(&self, at: &BlockCursor<A>, n: usize, blocks: &Arena<Block<A>>) -> (usize, BlockCursor<A>) {
        let mut remaining = n;
        let mut cursor = at.clone();
        while remaining > 0 {
            let available = cursor.handle.borrow().size() - cursor.pos;
            if remaining <= available {
                cursor.pos += remaining;
                remaining = 0;
                break;
            }
            let (skipped, next_cursor) = self.next_block(&cursor, blocks);
            match skipped {
                Some(_) => {
                    remaining -= available;
                    cursor = next_cursor;
                }
                None => break,
            }
        }
        (n - remaining, cursor)
    }

    /// Moves `at` back by up to `n` bytes, crossing block boundaries
    /// within this page. Returns the number of bytes actually retreated,
    /// which is less than `n` if the page's start was reached first.
    pub fn prev(&self, at: &BlockCursor<A>, n: usize, blocks: &Arena<Block<A>>) -> (usize, BlockCursor<A>) {
        let mut remaining = n;
        let mut cursor = at.clone();
        while remaining > 0 {
            let available = cursor.pos;
            if remaining <= available {
                cursor.pos -= remaining;
                remaining = 0;
                break;
            }
            let (skipped, prev_cursor) = self.prev_block(&cursor, blocks);
            match skipped {
                Some(_) => {
                    remaining -= available;
                    cursor = prev_cursor;
                }
                None => break,
            }
        }
        (n - remaining, cursor)
    }

    /// Reads up to `n` bytes starting at `at`, stopping early at the end
    /// of the page.
    pub fn bytes(&self, at: &BlockCursor<A>, n: usize, blocks: &Arena<Block<A>>) -> ByteArray {
        let mut out = ByteArray::new();
        let mut cursor = at.clone();
        let mut remaining = n;

        while remaining > 0 {
            let block_size = cursor.handle.borrow().size();
            let available = block_size - cursor.pos;
            let take = remaining.min(available);
            out.append(&cursor.handle.borrow().bytes().substring(cursor.pos, Some(take)));
            remaining -= take;

            if remaining == 0 {
                break;
            }
            let (skipped, next_cursor) = self.next_block(&cursor, blocks);
            if skipped.is_none() {
                break;
            }
            cursor = next_cursor;
        }

        out
    }
}
