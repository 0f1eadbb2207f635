use block::Attributes;
use byte_array::ByteArray;
use page::BlockCursor;

use super::PageBuffer;

impl<A: Attributes> PageBuffer<A> {
    /// A cursor at the start of the buffer's first page.
    pub fn first(&self) -> BlockCursor<A> {
        let key = self.order[0];
        self.pages.handle(key).expect("order keys are always live").borrow().first(&self.blocks)
    }

    /// A cursor at the end of the buffer's last page.
    pub fn last(&self) -> BlockCursor<A> {
        let key = *self.order.last().expect("buffer is never empty");
        self.pages.handle(key).expect("order keys are always live").borrow().last(&self.blocks)
    }

    /// Advances `at` into the next block, crossing into the next page if
    /// `at` was in the last block of its page. `None` if `at` was already
    /// at the very end of the buffer.
    pub fn next_block(&self, at: &BlockCursor<A>) -> Option<(usize, BlockCursor<A>)> {
        let (page_index, page_key) = self.locate(at)?;
        let page = self.pages.handle(page_key).expect("located page is live");
        let (skipped, cursor) = page.borrow().next_block(at, &self.blocks);
        if let Some(skipped) = skipped {
            return Some((skipped, cursor));
        }

        let next_page_key = *self.order.get(page_index + 1)?;
        let next_page = self.pages.handle(next_page_key).expect("order keys are always live");
        let skipped = at.block().size() - at.pos();
        Some((skipped, next_page.borrow().first(&self.blocks)))
    }

    /// Moves `at` back into the previous block, crossing into the
    /// previous page if `at` was in the first block of its page. `None`
    /// if `at` was already at the very start of the buffer.
    pub fn prev_block(&self, at: &BlockCursor<A>) -> Option<(usize, BlockCursor<A>)> {
        let (page_index, page_key) = self.locate(at)?;
        let page = self.pages.handle(page_key).expect("located page is live");
        let (skipped, cursor) = page.borrow().prev_block(at, &self.blocks);
        if let Some(skipped) = skipped {
            return Some((skipped, cursor));
        }

        if page_index == 0 {
            return None;
        }
        let prev_page_key = self.order[page_index - 1];
        let prev_page = self.pages.handle(prev_page_key).expect("order keys are always live");
        Some((at.pos(), prev_page.borrow().last(&self.blocks)))
    }

    /// Advances `at` by up to `n` bytes, crossing page boundaries.
    /// Returns the number of bytes actually advanced.
    pub fn next(&self, at: &BlockCursor<A>, n: usize) -> (usize, BlockCursor<A>) {
        let mut remaining = n;
        let mut cursor = at.clone();
        while remaining > 0 {
            let Some((page_index, page_key)) = self.locate(&cursor) else {
                break;
            };
            let page = self.pages.handle(page_key).expect("located page is live");
            let (advanced, next_cursor) = page.borrow().next(&cursor, remaining, &self.blocks);
            remaining -= advanced;
            cursor = next_cursor;
            if remaining == 0 {
                break;
            }
            let Some(next_page_key) = self.order.get(page_index + 1).copied() else {
                break;
            };
            let next_page = self.pages.handle(next_page_key).expect("order keys are always live");
            cursor = next_page.borrow().first(&self.blocks);
        }
        (n - remaining, cursor)
    }

    /// Moves `at` back by up to `n` bytes, crossing page boundaries.
    /// Returns the number of bytes actually retreated.
    pub fn prev(&self, at: &BlockCursor<A>, n: usize) -> (usize, BlockCursor<A>) {
        let mut remaining = n;
        let mut cursor = at.clone();
        while remaining > 0 {
            let Some((page_index, page_key)) = self.locate(&cursor) else {
                break;
            };
            let page = self.pages.handle(page_key).expect("located page is live");
            let (retreated, prev_cursor) = page.borrow().prev(&cursor, remaining, &self.blocks);
            remaining -= retreated;
            cursor = prev_cursor;
            if remaining == 0 {
                break;
            }
            if page_index == 0 {
                break;
            }
            let prev_page_key = self.order[page_index - 1];
            let prev_page = self.pages.handle(prev_page_key).expect("order keys are always live");
            cursor = prev_page.borrow().last(&self.blocks);
        }
        (n - remaining, cursor)
    }

    /// Reads up to `n` bytes starting at `at`, crossing page boundaries,
    /// stopping early at the end of the buffer.
    pub fn bytes(&self, at: &BlockCursor<A>, n: usize) -> ByteArray {
        let mut out = ByteArray::new();
        let mut cursor = at.clone();
        let mut remaining = n;

        while remaining > 0 {
            let Some((page_index, page_key)) = self.locate(&cursor) else {
                break;
            };
            let page = self.pages.handle(page_key).expect("located page is live");
            let chunk = page.borrow().bytes(&cursor, remaining, &self.blocks);
            remaining -= chunk.size();
            out.append(&chunk);
            if remaining == 0 {
                break;
            }
            let Some(next_page_key) = self.order.get(page_index + 1).copied() else {
                break;
            };
            let next_page = self.pages.handle(next_page_key).expect("order keys are always live");
            cursor = next_page.borrow().first(&self.blocks);
        }

        out
    }
}
