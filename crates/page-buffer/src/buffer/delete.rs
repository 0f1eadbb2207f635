use block::{Attributes, Block};
use change_set::ChangeSet;
use handle_arena::Key;
use page::BlockCursor;

use crate::errors::{PageBufferError, PageBufferResult};

use super::PageBuffer;

impl<A: Attributes> PageBuffer<A> {
    /// Removes the page at `index` from the buffer's ordering, along with
    /// every block it still held. Never removes the buffer's last
    /// remaining page (B1): callers are expected to have checked
    /// `page_count() > 1` first.
    pub(super) fn remove_page(&mut self, index: usize) {
        let key = self.order.remove(index);
        let page = self.pages.handle(key).expect("order keys are always live");
        for block_key in page.borrow().order() {
            self.blocks.remove(*block_key);
        }
        drop(page);
        self.pages.remove(key);
        tracing::trace!(page_index = index, remaining = self.order.len(), "removed page");
    }

    /// Deletes the bytes between `from` and `to`, which may span several
    /// pages, returning the change-set recording what was removed and a
    /// cursor at the position immediately following the deleted range.
    pub fn delete_bytes(&mut self, from: &BlockCursor<A>, to: &BlockCursor<A>) -> PageBufferResult<(ChangeSet<A>, BlockCursor<A>)> {
        let (from_page_index, from_page_key) = self.locate(from).ok_or(PageBufferError::InvalidHandleUse)?;
        let (to_page_index, to_page_key) = self.locate(to).ok_or(PageBufferError::InvalidHandleUse)?;

        if from_page_index > to_page_index {
            return Err(PageBufferError::ReverseRange);
        }

        if from_page_index == to_page_index {
            let page = self.pages.handle(from_page_key).expect("located page is live");
            let (cs, cursor) = page.borrow_mut().delete_bytes(from, to, &mut self.blocks)?;
            self.drop_if_emptied(from_page_index);
            return Ok((cs, cursor));
        }

        let from_page = self.pages.handle(from_page_key).expect("located page is live");
        let from_page_last = from_page.borrow().last(&self.blocks);
        let mut change_set = from_page.borrow_mut().delete_bytes(from, &from_page_last, &mut self.blocks)?.0;

        // Pages strictly between `from` and `to` are removed outright,
        // wholesale, rather than emptied one block at a time: collecting
        // their blocks directly into the change-set and dropping the page
        // does the same thing without the redundant intermediate shrink.
        // Indices shift left by one on each removal, so the next page to
        // remove is always the one immediately after `from`'s page.
        let intermediate_count = to_page_index - from_page_index - 1;
        for _ in 0..intermediate_count {
            let page_key = self.order[from_page_index + 1];
            let page = self.pages.handle(page_key).expect("order keys are always live");
            let block_keys: Vec<Key> = page.borrow().order().to_vec();
            let removed_blocks: Vec<Block<A>> = block_keys
                .iter()
                .map(|key| self.blocks.handle(*key).expect("block key is live").borrow().clone())
                .collect();
            drop(page);
            change_set.extend_delete(ChangeSet::for_delete(0, removed_blocks));
            self.remove_page(from_page_index + 1);
        }

        let to_page_key = self.order[from_page_index + 1];
        let to_page = self.pages.handle(to_page_key).expect("order keys are always live");
        let to_page_first = to_page.borrow().first(&self.blocks);
        let (cs, mut cursor) = to_page.borrow_mut().delete_bytes(&to_page_first, to, &mut self.blocks)?;
        change_set.extend_delete(cs);

        let to_page_emptied = self.drop_if_emptied(from_page_index + 1);
        if to_page_emptied {
            cursor = self.resolve_after_removal(from_page_index + 1);
        }
        self.drop_if_emptied(from_page_index);

        Ok((change_set, cursor))
    }

    /// If the page at `index` has gone empty and more than one page
    /// remains, removes it. Returns whether it was removed.
    fn drop_if_emptied(&mut self, index: usize) -> bool {
        if self.order.len() <= 1 {
            return false;
        }
        let key = self.order[index];
        let empty = self.pages.handle(key).expect("order keys are always live").borrow().is_empty();
        if empty {
            self.remove_page(index);
        }
        empty
    }

    /// A cursor at the start of whichever page now sits at `index`, or at
    /// the buffer's very end if `index` ran off the end — used after the
    /// page originally at `index` was removed out from under a cursor
    /// mid-delete.
    fn resolve_after_removal(&self, index: usize) -> BlockCursor<A> {
        match self.order.get(index) {
            Some(key) => self.pages.handle(*key).expect("order keys are always live").borrow().first(&self.blocks),
            None => self.last(),
        }
    }
}

#[cfg(test)]
mod tests {
    use byte_array::ByteArray;

    use super::*;
    use crate::PageBuffer;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Style(u8);

    fn seeded(target: usize, text: &str) -> PageBuffer<Style> {
        let mut buffer: PageBuffer<Style> = PageBuffer::new(target);
        let at = buffer.first();
        buffer.insert_bytes(&at, &ByteArray::from(text), Style(1)).unwrap();
        buffer
    }

    #[test]
    fn delete_bytes_within_one_page_behaves_like_the_page_level_call() {
        let mut buffer = seeded(128, "AAABBBCCC");
        let first = buffer.first();
        let (_, from) = buffer.next(&first, 3);
        let (_, to) = buffer.next(&first, 6);
        let (cs, _) = buffer.delete_bytes(&from, &to).unwrap();
        assert_eq!(cs.removed_bytes().as_slice(), b"BBB");
        assert_eq!(buffer.size(), 6);
    }

    #[test]
    fn delete_bytes_spanning_pages_removes_intermediate_pages() {
        let mut buffer = seeded(4, "AAAAAAAAAAAAAAAA");
        assert!(buffer.page_count() > 2);
        let first = buffer.first();
        let (cs, _) = buffer.delete_bytes(&first, &buffer.last()).unwrap();
        assert_eq!(cs.removed_bytes().size(), 16);
        assert_eq!(buffer.page_count(), 1);
        assert!(buffer.is_empty());
    }

    #[test]
    fn delete_bytes_partial_span_keeps_the_remaining_tail() {
        let mut buffer = seeded(4, "AAAABBBBCCCCDDDD");
        let first = buffer.first();
        let (_, from) = buffer.next(&first, 2);
        let (_, to) = buffer.next(&first, 14);
        let (cs, _) = buffer.delete_bytes(&from, &to).unwrap();
        assert_eq!(cs.removed_bytes().size(), 12);
        assert_eq!(buffer.bytes(&buffer.first(), 100).as_slice(), b"AADD");
    }

    #[test]
    fn delete_bytes_rejects_a_reversed_page_range() {
        let mut buffer = seeded(4, "AAAAAAAAAAAAAAAA");
        let first = buffer.first();
        let last = buffer.last();
        assert!(matches!(buffer.delete_bytes(&last, &first), Err(PageBufferError::ReverseRange)));
    }
}
